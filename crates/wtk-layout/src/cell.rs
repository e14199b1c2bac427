//! Per-child cell metadata and the transient per-solve size cache.
//!
//! [`CellData`] is the owner-configured part: spans, alignment, grab flags,
//! and size overrides. It is attached to a child and never mutated by a
//! solve. [`CellCache`] is the computed part, built fresh by the solver for
//! every pass and discarded afterwards.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::{Alignment, Axis, Hint, Size, Sizer, Sizes};

/// Largest span a child may ask for along either axis.
///
/// Larger spans are clamped when the grid is built.
pub const MAX_SPAN: usize = 1024;

bitflags! {
    /// Axes along which a child wants a share of excess space.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Grab: u8 {
        const HORIZONTAL = 0b01;
        const VERTICAL = 0b10;
    }
}

impl Grab {
    /// The grab flag for a single axis.
    #[inline]
    pub const fn for_axis(axis: Axis) -> Grab {
        match axis {
            Axis::Horizontal => Grab::HORIZONTAL,
            Axis::Vertical => Grab::VERTICAL,
        }
    }
}

/// Layout parameters a child carries into its parent's grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellData {
    /// Columns occupied, starting at the placement cell. Values below 1 act as
    /// 1 and values above the column count act as the column count.
    pub h_span: usize,
    /// Rows occupied, starting at the placement cell. Values below 1 act as 1
    /// and values above [`MAX_SPAN`] act as [`MAX_SPAN`].
    pub v_span: usize,
    pub h_align: Alignment,
    pub v_align: Alignment,
    pub grab: Grab,
    /// Size that replaces the child's own answer, per axis.
    #[serde(with = "hint_serde")]
    pub size_hint: Hint,
    /// Minimum that replaces the child's own minimum, per axis.
    #[serde(with = "hint_serde")]
    pub min_size: Hint,
}

impl Default for CellData {
    fn default() -> Self {
        Self {
            h_span: 1,
            v_span: 1,
            h_align: Alignment::Start,
            v_align: Alignment::Start,
            grab: Grab::empty(),
            size_hint: Hint::NONE,
            min_size: Hint::NONE,
        }
    }
}

impl CellData {
    /// Default cell metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the horizontal span.
    pub fn h_span(mut self, span: usize) -> Self {
        self.h_span = span;
        self
    }

    /// Set the vertical span.
    pub fn v_span(mut self, span: usize) -> Self {
        self.v_span = span;
        self
    }

    /// Set the horizontal alignment.
    pub fn h_align(mut self, align: Alignment) -> Self {
        self.h_align = align;
        self
    }

    /// Set the vertical alignment.
    pub fn v_align(mut self, align: Alignment) -> Self {
        self.v_align = align;
        self
    }

    /// Enable or disable horizontal grab.
    pub fn h_grab(mut self, grab: bool) -> Self {
        self.grab.set(Grab::HORIZONTAL, grab);
        self
    }

    /// Enable or disable vertical grab.
    pub fn v_grab(mut self, grab: bool) -> Self {
        self.grab.set(Grab::VERTICAL, grab);
        self
    }

    /// Set the size override.
    pub fn size_hint(mut self, hint: Hint) -> Self {
        self.size_hint = hint;
        self
    }

    /// Set the minimum size override.
    pub fn min_size(mut self, min: Hint) -> Self {
        self.min_size = min;
        self
    }

    /// Span along an axis, clamped to `[1, limit]`.
    ///
    /// Pass `usize::MAX` as the limit for the unbounded row axis.
    #[inline]
    pub fn span(&self, axis: Axis, limit: usize) -> usize {
        let raw = match axis {
            Axis::Horizontal => self.h_span,
            Axis::Vertical => self.v_span,
        };
        raw.clamp(1, limit.max(1))
    }

    #[inline]
    pub fn align(&self, axis: Axis) -> Alignment {
        match axis {
            Axis::Horizontal => self.h_align,
            Axis::Vertical => self.v_align,
        }
    }

    #[inline]
    pub fn grabs(&self, axis: Axis) -> bool {
        self.grab.contains(Grab::for_axis(axis))
    }

    /// Reject overrides that are negative or non-finite.
    pub fn validate(&self) -> Result<(), CellDataError> {
        for (field, value) in [("h_span", self.h_span), ("v_span", self.v_span)] {
            if value > MAX_SPAN {
                return Err(CellDataError::SpanOutOfRange { field, value });
            }
        }
        let checks = [
            ("size_hint.width", self.size_hint.width),
            ("size_hint.height", self.size_hint.height),
            ("min_size.width", self.min_size.width),
            ("min_size.height", self.min_size.height),
        ];
        for (field, value) in checks {
            if let Some(value) = value
                && !(value.is_finite() && value >= 0.0)
            {
                return Err(CellDataError::InvalidOverride { field, value });
            }
        }
        Ok(())
    }

    /// The minimum this child imposes on a track, if any.
    ///
    /// A grabbing child can shrink to the track's natural minimum unless it
    /// carries an explicit minimum override.
    pub(crate) fn min_contribution(&self, axis: Axis, cache: &CellCache) -> Option<f32> {
        if self.grabs(axis) {
            axis.of_hint(self.min_size)
        } else {
            Some(axis.of(cache.min))
        }
    }
}

/// Validation errors for cell metadata.
#[derive(Debug, Clone, PartialEq)]
pub enum CellDataError {
    InvalidOverride { field: &'static str, value: f32 },
    SpanOutOfRange { field: &'static str, value: usize },
}

impl fmt::Display for CellDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOverride { field, value } => {
                write!(f, "cell {field} must be finite and non-negative, got {value}")
            }
            Self::SpanOutOfRange { field, value } => {
                write!(f, "cell {field} must be at most {MAX_SPAN}, got {value}")
            }
        }
    }
}

impl std::error::Error for CellDataError {}

/// Which of the size protocol's answers a solve pass reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolvePass {
    /// Solve with every child at its minimum size.
    Minimum,
    /// Solve with every child at its preferred size.
    Preferred,
}

impl SolvePass {
    #[inline]
    pub fn pick(self, sizes: &Sizes) -> Size {
        match self {
            SolvePass::Minimum => sizes.min,
            SolvePass::Preferred => sizes.pref,
        }
    }

    /// Short label for logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            SolvePass::Minimum => "minimum",
            SolvePass::Preferred => "preferred",
        }
    }
}

/// Sizes computed for one child during one solve pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellCache {
    /// Size the child asks for in this pass.
    pub size: Size,
    /// Smallest size the child accepts.
    pub min: Size,
}

impl CellCache {
    /// Query a child's size protocol and apply the cell's overrides.
    ///
    /// The pass picks min or pref, clamped into the child's own range. A
    /// concrete `hint` component then replaces it, an explicit minimum raises
    /// it, and an explicit size hint replaces it unconditionally.
    pub fn compute(child: &dyn Sizer, data: &CellData, hint: Hint, pass: SolvePass) -> Self {
        let sizes = child.sizes(hint);
        let picked = pass.pick(&sizes);
        let mut cache = CellCache::default();
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let min = sanitize(axis.of(sizes.min));
            let max = sanitize(axis.of(sizes.max)).max(min);
            let mut size = sanitize(axis.of(picked)).clamp(min, max);
            if let Some(v) = axis.of_hint(hint) {
                size = v;
            }
            let explicit_min = axis.of_hint(data.min_size);
            if let Some(v) = explicit_min {
                size = size.max(v);
            }
            if let Some(v) = axis.of_hint(data.size_hint) {
                size = v;
            }
            *axis.of_mut(&mut cache.size) = size;
            *axis.of_mut(&mut cache.min) = explicit_min.unwrap_or(min);
        }
        cache
    }
}

/// Map negative and non-finite sizes reported by children to zero.
#[inline]
fn sanitize(v: f32) -> f32 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

/// Serialize a [`Hint`] as `{ "width": w|null, "height": h|null }`.
mod hint_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::Hint;

    #[derive(Serialize, Deserialize, Default)]
    #[serde(default)]
    struct Repr {
        width: Option<f32>,
        height: Option<f32>,
    }

    pub fn serialize<S: Serializer>(hint: &Hint, serializer: S) -> Result<S::Ok, S::Error> {
        Repr {
            width: hint.width,
            height: hint.height,
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Hint, D::Error> {
        let repr = Repr::deserialize(deserializer)?;
        Ok(Hint::new(repr.width, repr.height))
    }
}
