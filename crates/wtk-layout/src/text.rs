//! Word-wrapped text as leaf content.
//!
//! Text is measured on a fixed cell grid: each column of display width costs
//! `advance` pixels and each line `line_height` pixels. Given a width hint the
//! text wraps greedily at word boundaries, so its preferred height grows as
//! the width shrinks.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::{Hint, Size, Sizer, Sizes};
use wtk_core::geometry::DEFAULT_MAX_SIZE;

/// Monospace text that wraps to the width it is given.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedText {
    text: String,
    advance: f32,
    line_height: f32,
}

impl WrappedText {
    /// Text with an 8x16 cell.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            advance: 8.0,
            line_height: 16.0,
        }
    }

    /// Set the per-column advance and the line height.
    #[must_use]
    pub fn cell_metrics(mut self, advance: f32, line_height: f32) -> Self {
        self.advance = advance.max(0.0);
        self.line_height = line_height.max(0.0);
        self
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    fn measure(&self, s: &str) -> f32 {
        s.width() as f32 * self.advance
    }

    /// Width of the widest word: the narrowest the text can get without
    /// breaking inside a word.
    pub fn min_width(&self) -> f32 {
        self.text
            .split_word_bounds()
            .filter(|w| !w.trim().is_empty())
            .map(|w| self.measure(w))
            .fold(0.0, f32::max)
    }

    /// Break the text into lines no wider than `max_width`.
    ///
    /// Explicit newlines always break. Words wider than `max_width` get a
    /// line of their own and overflow it.
    pub fn wrap(&self, max_width: Option<f32>) -> Vec<String> {
        let mut lines = Vec::new();
        for paragraph in self.text.lines() {
            let Some(max_width) = max_width else {
                lines.push(paragraph.trim_end().to_string());
                continue;
            };
            let mut line = String::new();
            let mut width = 0.0;
            for token in paragraph.split_word_bounds() {
                let token_width = self.measure(token);
                let blank = token.trim().is_empty();
                if !line.is_empty() && width + token_width > max_width && !blank {
                    lines.push(line.trim_end().to_string());
                    line.clear();
                    width = 0.0;
                }
                if line.is_empty() && blank {
                    continue;
                }
                line.push_str(token);
                width += token_width;
            }
            lines.push(line.trim_end().to_string());
        }
        lines
    }
}

impl Sizer for WrappedText {
    fn sizes(&self, hint: Hint) -> Sizes {
        let lines = self.wrap(hint.width);
        let width = lines
            .iter()
            .map(|line| self.measure(line))
            .fold(0.0, f32::max);
        let pref = Size::new(width, lines.len() as f32 * self.line_height);
        // The height needed at this width is also the least the text accepts.
        let min = Size::new(self.min_width(), pref.height);
        Sizes::new(min, pref, Size::new(DEFAULT_MAX_SIZE, DEFAULT_MAX_SIZE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> WrappedText {
        WrappedText::new(s).cell_metrics(10.0, 16.0)
    }

    #[test]
    fn unconstrained_is_one_line_per_paragraph() {
        let t = text("aaaa bbbb cccc dddd");
        assert_eq!(t.wrap(None), vec!["aaaa bbbb cccc dddd"]);
        let sizes = t.sizes(Hint::NONE);
        assert_eq!(sizes.pref, Size::new(190.0, 16.0));
        assert_eq!(sizes.min.width, 40.0);
    }

    #[test]
    fn wraps_greedily_at_word_bounds() {
        let t = text("aaaa bbbb cccc dddd");
        assert_eq!(t.wrap(Some(100.0)), vec!["aaaa bbbb", "cccc dddd"]);
        assert_eq!(t.wrap(Some(45.0)), vec!["aaaa", "bbbb", "cccc", "dddd"]);
        let sizes = t.sizes(Hint::width(100.0));
        assert_eq!(sizes.pref, Size::new(90.0, 32.0));
        assert_eq!(sizes.min, Size::new(40.0, 32.0));
    }

    #[test]
    fn long_word_overflows_its_own_line() {
        let t = text("a verylongword b");
        assert_eq!(t.wrap(Some(50.0)), vec!["a", "verylongword", "b"]);
    }

    #[test]
    fn explicit_newlines_break() {
        let t = text("one\ntwo three");
        assert_eq!(t.wrap(None), vec!["one", "two three"]);
        assert_eq!(t.sizes(Hint::NONE).pref, Size::new(90.0, 32.0));
    }

    #[test]
    fn wide_characters_use_display_width() {
        let t = text("日本 語");
        assert_eq!(t.sizes(Hint::NONE).pref.width, 70.0);
    }

    #[test]
    fn empty_text_has_no_size() {
        let sizes = text("").sizes(Hint::width(50.0));
        assert_eq!(sizes.pref, Size::ZERO);
        assert_eq!(sizes.min, Size::ZERO);
    }
}
