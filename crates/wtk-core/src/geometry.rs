#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All coordinates are logical pixels stored as `f32`, with the origin at the
//! top-left of the parent's coordinate space.

use std::ops::{Add, Sub};

/// Extent used for "unbounded" maximum sizes.
pub const DEFAULT_MAX_SIZE: f32 = 10_000.0;

/// A location in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Grow by the given insets.
    #[inline]
    pub fn grow(self, insets: Insets) -> Size {
        Size::new(self.width + insets.width(), self.height + insets.height())
    }

    /// Shrink by the given insets, clamping each dimension at zero.
    #[inline]
    pub fn shrink(self, insets: Insets) -> Size {
        Size::new(
            (self.width - insets.width()).max(0.0),
            (self.height - insets.height()).max(0.0),
        )
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Size) -> Size {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Size) -> Size {
        Size::new(self.width.min(other.width), self.height.min(other.height))
    }
}

impl Add for Size {
    type Output = Size;

    fn add(self, rhs: Size) -> Size {
        Size::new(self.width + rhs.width, self.height + rhs.height)
    }
}

impl Sub for Size {
    type Output = Size;

    fn sub(self, rhs: Size) -> Size {
        Size::new(self.width - rhs.width, self.height - rhs.height)
    }
}

/// An axis-aligned rectangle used for layout bounds and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f32,
    /// Top edge (inclusive).
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Create a rectangle from an origin and a size.
    #[inline]
    pub const fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Top-left corner.
    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width and height.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check if the rectangle has no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Create a new rectangle inside the current one with the given insets.
    ///
    /// Width and height clamp at zero.
    pub fn inner(&self, insets: Insets) -> Rect {
        Rect {
            x: self.x + insets.left,
            y: self.y + insets.top,
            width: (self.width - insets.width()).max(0.0),
            height: (self.height - insets.height()).max(0.0),
        }
    }

    /// The smallest rectangle that contains both this rectangle and another.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }
}

/// Fixed border insets around a box's content area.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl Insets {
    /// No insets.
    pub const ZERO: Self = Self::all(0.0);

    /// Equal insets on every side.
    pub const fn all(val: f32) -> Self {
        Self {
            top: val,
            left: val,
            bottom: val,
            right: val,
        }
    }

    /// Insets with specific values.
    pub const fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Sum of left and right.
    #[inline]
    pub fn width(&self) -> f32 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[inline]
    pub fn height(&self) -> f32 {
        self.top + self.bottom
    }
}

impl From<f32> for Insets {
    fn from(val: f32) -> Self {
        Self::all(val)
    }
}

/// An optional target size passed into size queries.
///
/// `None` on an axis means "unconstrained". A concrete value means "if you
/// must pick one size, target this one".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hint {
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl Hint {
    /// No hint on either axis.
    pub const NONE: Self = Self {
        width: None,
        height: None,
    };

    /// Create a hint from optional components.
    #[inline]
    pub const fn new(width: Option<f32>, height: Option<f32>) -> Self {
        Self { width, height }
    }

    /// A hint constraining only the width.
    #[inline]
    pub const fn width(width: f32) -> Self {
        Self::new(Some(width), None)
    }

    /// A hint constraining only the height.
    #[inline]
    pub const fn height(height: f32) -> Self {
        Self::new(None, Some(height))
    }

    /// A hint constraining both axes.
    #[inline]
    pub const fn exact(size: Size) -> Self {
        Self::new(Some(size.width), Some(size.height))
    }

    /// Build a hint from raw values, where any negative or non-finite value
    /// means "no hint".
    pub fn from_raw(width: f32, height: f32) -> Self {
        let pick = |v: f32| (v.is_finite() && v >= 0.0).then_some(v);
        Self::new(pick(width), pick(height))
    }

    /// Whether neither axis is constrained.
    #[inline]
    pub const fn is_none(&self) -> bool {
        self.width.is_none() && self.height.is_none()
    }

    /// Subtract insets from the concrete components, clamping at zero.
    pub fn shrink(self, insets: Insets) -> Hint {
        Hint::new(
            self.width.map(|w| (w - insets.width()).max(0.0)),
            self.height.map(|h| (h - insets.height()).max(0.0)),
        )
    }
}

impl From<Size> for Hint {
    fn from(size: Size) -> Self {
        Self::exact(size)
    }
}
