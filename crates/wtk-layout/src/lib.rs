#![forbid(unsafe_code)]

//! Flexible grid layout engine.
//!
//! This crate lays out a box's children on a logical grid:
//!
//! - [`Sizer`] - the size protocol every layoutable box exposes
//! - [`CellData`] - per-child spans, alignment, grab flags, and overrides
//! - [`CellGrid`] - first-free-cell placement of children honoring spans
//! - [`solver`] - iterative column width / row height distribution
//! - [`FlexLayout`] - the facade tying it together for a [`Container`]
//! - [`Panel`] - a concrete box tree that owns children and a layout
//! - [`debug`] - solve introspection
//!
//! # Example
//!
//! ```
//! use wtk_layout::{Alignment, CellData, FlexLayout, Panel, Sizes};
//! use wtk_core::geometry::{Rect, Size};
//!
//! let mut root = Panel::new().with_layout(FlexLayout::new().columns(2).h_spacing(10.0));
//! root.add(Panel::leaf(Sizes::fixed(Size::new(50.0, 20.0))));
//! root.add(
//!     Panel::leaf(Sizes::fixed(Size::new(80.0, 20.0)))
//!         .with_layout_data(CellData::new().h_grab(true).h_align(Alignment::Fill)),
//! );
//! root.set_bounds(Rect::from_size(200.0, 20.0));
//! root.layout();
//! assert_eq!(root.children()[1].bounds().width, 140.0);
//! ```

pub mod cell;
pub mod debug;
pub mod flex;
pub mod grid;
pub mod panel;
pub mod place;
pub mod solver;
pub mod text;

pub use cell::{CellData, CellDataError, Grab, MAX_SPAN, SolvePass};
pub use debug::SolveReport;
pub use flex::{Container, FlexConfigError, FlexLayout};
pub use grid::{CellGrid, Placement};
pub use panel::Panel;
pub use solver::AxisSolution;
pub use text::WrappedText;
pub use wtk_core::geometry::{Hint, Insets, Point, Rect, Size};

use serde::{Deserialize, Serialize};
use std::fmt;
use wtk_core::geometry::DEFAULT_MAX_SIZE;

/// Placement of content within the space it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Align to the start (left/top).
    #[default]
    Start,
    /// Center within the available space.
    Middle,
    /// Align to the end (right/bottom).
    End,
    /// Stretch to fill the available space.
    Fill,
}

impl Alignment {
    /// Offset of content of length `used` within `available`.
    ///
    /// `Fill` behaves like `Start`; callers stretch the content instead.
    #[inline]
    pub fn offset(self, available: f32, used: f32) -> f32 {
        match self {
            Alignment::Start | Alignment::Fill => 0.0,
            Alignment::Middle => ((available - used) / 2.0).max(0.0),
            Alignment::End => (available - used).max(0.0),
        }
    }
}

/// A layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Columns, measured by width.
    Horizontal,
    /// Rows, measured by height.
    Vertical,
}

impl Axis {
    /// The other axis.
    #[inline]
    pub const fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// The extent of `size` along this axis.
    #[inline]
    pub const fn of(self, size: Size) -> f32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    /// Mutable extent of `size` along this axis.
    #[inline]
    pub fn of_mut(self, size: &mut Size) -> &mut f32 {
        match self {
            Axis::Horizontal => &mut size.width,
            Axis::Vertical => &mut size.height,
        }
    }

    /// The hint component along this axis.
    #[inline]
    pub const fn of_hint(self, hint: Hint) -> Option<f32> {
        match self {
            Axis::Horizontal => hint.width,
            Axis::Vertical => hint.height,
        }
    }

    /// Short label for logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Axis::Horizontal => "horizontal",
            Axis::Vertical => "vertical",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of a size query: minimum, preferred, and maximum sizes.
///
/// Implementations are expected to keep `min <= pref <= max`, but the solver
/// tolerates violations by clamping.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sizes {
    pub min: Size,
    pub pref: Size,
    pub max: Size,
}

impl Sizes {
    /// All three sizes zero.
    pub const ZERO: Self = Self {
        min: Size::ZERO,
        pref: Size::ZERO,
        max: Size::ZERO,
    };

    /// Create a new size triple.
    #[inline]
    pub const fn new(min: Size, pref: Size, max: Size) -> Self {
        Self { min, pref, max }
    }

    /// A rigid size (min == pref == max).
    #[inline]
    pub const fn fixed(size: Size) -> Self {
        Self::new(size, size, size)
    }

    /// Min and preferred sizes with an unbounded max.
    #[inline]
    pub const fn at_least(min: Size, pref: Size) -> Self {
        Self::new(min, pref, Size::new(DEFAULT_MAX_SIZE, DEFAULT_MAX_SIZE))
    }

    /// Grow every size by the given insets.
    pub fn grow(self, insets: Insets) -> Self {
        Self::new(
            self.min.grow(insets),
            self.pref.grow(insets),
            self.max.grow(insets),
        )
    }
}

/// The size protocol: what every layoutable box exposes to its parent's layout.
///
/// Given an optional width/height hint, report `(min, pref, max)`. Calls must
/// not mutate the tree; the same hint should produce the same answer.
pub trait Sizer: fmt::Debug {
    fn sizes(&self, hint: Hint) -> Sizes;
}

/// A constant size triple sizes itself, ignoring the hint.
impl Sizer for Sizes {
    fn sizes(&self, _hint: Hint) -> Sizes {
        *self
    }
}
