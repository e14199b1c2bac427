//! A concrete box tree.
//!
//! A [`Panel`] owns its children, optionally carries a [`FlexLayout`] that
//! arranges them, and optionally wraps leaf content (anything implementing
//! [`Sizer`]). Bounds are relative to the parent panel.

use crate::cell::CellData;
use crate::flex::{Container, FlexLayout};
use crate::{Hint, Insets, Rect, Size, Sizer, Sizes};

/// A node in the box tree.
#[derive(Debug, Default)]
pub struct Panel {
    bounds: Rect,
    border: Option<Insets>,
    layout_data: Option<CellData>,
    flex: Option<FlexLayout>,
    content: Option<Box<dyn Sizer>>,
    children: Vec<Panel>,
}

impl Panel {
    /// An empty panel with no layout, border, or content.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A childless panel sized by `content`.
    #[must_use]
    pub fn leaf(content: impl Sizer + 'static) -> Self {
        Self::new().with_content(content)
    }

    #[must_use]
    pub fn with_layout(mut self, flex: FlexLayout) -> Self {
        self.flex = Some(flex);
        self
    }

    #[must_use]
    pub fn with_layout_data(mut self, data: CellData) -> Self {
        self.layout_data = Some(data);
        self
    }

    #[must_use]
    pub fn with_border(mut self, border: Insets) -> Self {
        self.border = Some(border);
        self
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Sizer + 'static) -> Self {
        self.content = Some(Box::new(content));
        self
    }

    /// Append a child.
    pub fn add(&mut self, child: Panel) {
        self.children.push(child);
    }

    /// Remove and return the child at `index`, if it exists.
    pub fn remove(&mut self, index: usize) -> Option<Panel> {
        (index < self.children.len()).then(|| self.children.remove(index))
    }

    #[inline]
    pub fn children(&self) -> &[Panel] {
        &self.children
    }

    #[inline]
    pub fn children_mut(&mut self) -> &mut [Panel] {
        &mut self.children
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[inline]
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    #[inline]
    pub fn border(&self) -> Option<Insets> {
        self.border
    }

    pub fn set_border(&mut self, border: Option<Insets>) {
        self.border = border;
    }

    #[inline]
    pub fn flex(&self) -> Option<&FlexLayout> {
        self.flex.as_ref()
    }

    pub fn set_flex(&mut self, flex: Option<FlexLayout>) {
        self.flex = flex;
    }

    /// Cell metadata for this panel, or the defaults when none is attached.
    pub fn layout_data(&self) -> CellData {
        self.layout_data.unwrap_or_default()
    }

    /// Cell metadata for this panel, attaching the defaults on first access.
    pub fn layout_data_mut(&mut self) -> &mut CellData {
        self.layout_data.get_or_insert_with(CellData::default)
    }

    pub fn set_layout_data(&mut self, data: CellData) {
        self.layout_data = Some(data);
    }

    /// Whether cell metadata has been attached.
    #[inline]
    pub fn has_layout_data(&self) -> bool {
        self.layout_data.is_some()
    }

    /// Lay out this panel's children with its layout, then every descendant.
    pub fn layout(&mut self) {
        if let Some(flex) = self.flex {
            flex.layout(self);
        }
        for child in &mut self.children {
            child.layout();
        }
    }
}

impl Sizer for Panel {
    fn sizes(&self, hint: Hint) -> Sizes {
        if let Some(flex) = &self.flex {
            return flex.sizes(self, hint);
        }
        let border = self.border.unwrap_or_default();
        match &self.content {
            Some(content) => content.sizes(hint.shrink(border)).grow(border),
            None => Sizes::at_least(Size::ZERO, Size::ZERO).grow(border),
        }
    }
}

impl Container for Panel {
    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child(&self, index: usize) -> &dyn Sizer {
        &self.children[index]
    }

    fn layout_data(&self, index: usize) -> CellData {
        self.children[index].layout_data()
    }

    fn set_child_bounds(&mut self, index: usize, bounds: Rect) {
        if let Some(child) = self.children.get_mut(index) {
            child.bounds = bounds;
        }
    }

    fn border(&self) -> Insets {
        self.border.unwrap_or_default()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
