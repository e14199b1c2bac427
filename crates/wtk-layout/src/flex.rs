//! The flexible grid layout and the container seam it drives.

use std::fmt;

use serde::{Deserialize, Serialize};
use wtk_core::geometry::DEFAULT_MAX_SIZE;

use crate::cell::{CellCache, CellData, SolvePass};
use crate::debug::SolveReport;
use crate::grid::CellGrid;
use crate::{Alignment, Axis, Hint, Insets, Point, Rect, Size, Sizer, Sizes, place, solver};

/// A box whose children a [`FlexLayout`] can arrange.
pub trait Container {
    /// Number of children, in layout order.
    fn child_count(&self) -> usize;

    /// The size protocol of child `index`.
    fn child(&self, index: usize) -> &dyn Sizer;

    /// Cell metadata attached to child `index`, or the default when unattached.
    fn layout_data(&self, index: usize) -> CellData;

    /// Write the solved bounds of child `index`, relative to this box.
    fn set_child_bounds(&mut self, index: usize, bounds: Rect);

    /// Border insets around the layout area.
    fn border(&self) -> Insets {
        Insets::ZERO
    }

    /// Current bounds of this box.
    fn bounds(&self) -> Rect;
}

/// Invalid [`FlexLayout`] configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum FlexConfigError {
    /// The layout has no columns.
    ZeroColumns,
    /// A spacing is negative or non-finite.
    InvalidSpacing { axis: Axis, value: f32 },
}

impl fmt::Display for FlexConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroColumns => write!(f, "flex layout needs at least one column"),
            Self::InvalidSpacing { axis, value } => {
                write!(f, "{axis} spacing must be finite and non-negative, got {value}")
            }
        }
    }
}

impl std::error::Error for FlexConfigError {}

/// A grid of columns whose widths (and rows whose heights) adapt to the
/// children, spreading excess or missing space over grabbing tracks.
///
/// Children fill the grid row-major in the order the container lists them.
///
/// # Example
///
/// ```
/// use wtk_layout::{FlexLayout, Hint, Panel, Size, Sizer, Sizes};
///
/// let flex = FlexLayout::new().columns(3).h_spacing(8.0).equal_columns(true);
/// let mut panel = Panel::new().with_layout(flex);
/// for width in [20.0, 50.0, 30.0] {
///     panel.add(Panel::leaf(Sizes::fixed(Size::new(width, 10.0))));
/// }
/// assert_eq!(panel.sizes(Hint::NONE).pref, Size::new(3.0 * 50.0 + 2.0 * 8.0, 10.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlexLayout {
    columns: usize,
    h_spacing: f32,
    v_spacing: f32,
    h_align: Alignment,
    v_align: Alignment,
    equal_columns: bool,
}

impl Default for FlexLayout {
    fn default() -> Self {
        Self {
            columns: 1,
            h_spacing: 4.0,
            v_spacing: 2.0,
            h_align: Alignment::Start,
            v_align: Alignment::Start,
            equal_columns: false,
        }
    }
}

impl FlexLayout {
    /// A single-column layout with default spacing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column count.
    #[must_use]
    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    /// Set the spacing between columns.
    #[must_use]
    pub fn h_spacing(mut self, spacing: f32) -> Self {
        self.h_spacing = spacing;
        self
    }

    /// Set the spacing between rows.
    #[must_use]
    pub fn v_spacing(mut self, spacing: f32) -> Self {
        self.v_spacing = spacing;
        self
    }

    /// Set both spacings.
    #[must_use]
    pub fn spacing(self, h_spacing: f32, v_spacing: f32) -> Self {
        self.h_spacing(h_spacing).v_spacing(v_spacing)
    }

    /// Horizontal placement of the whole grid when it is narrower than the container.
    #[must_use]
    pub fn h_align(mut self, align: Alignment) -> Self {
        self.h_align = align;
        self
    }

    /// Vertical placement of the whole grid when it is shorter than the container.
    #[must_use]
    pub fn v_align(mut self, align: Alignment) -> Self {
        self.v_align = align;
        self
    }

    /// Force all columns to the same width.
    #[must_use]
    pub fn equal_columns(mut self, equal: bool) -> Self {
        self.equal_columns = equal;
        self
    }

    /// Configured column count.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// Configured `(horizontal, vertical)` spacing.
    #[inline]
    pub fn gaps(&self) -> (f32, f32) {
        (self.h_spacing, self.v_spacing)
    }

    #[inline]
    pub fn is_equal_columns(&self) -> bool {
        self.equal_columns
    }

    /// Check the configuration.
    ///
    /// Solving never fails: zero columns produce an empty layout and bad
    /// spacing is treated as zero. This reports those cases for callers that
    /// load layouts from configuration.
    pub fn validate(&self) -> Result<(), FlexConfigError> {
        if self.columns == 0 {
            return Err(FlexConfigError::ZeroColumns);
        }
        for (axis, value) in [
            (Axis::Horizontal, self.h_spacing),
            (Axis::Vertical, self.v_spacing),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(FlexConfigError::InvalidSpacing { axis, value });
            }
        }
        Ok(())
    }

    /// Run one full solve against `target`'s children and keep every
    /// intermediate result.
    ///
    /// `hint` constrains the content area, border excluded.
    pub fn solve<C: Container + ?Sized>(
        &self,
        target: &C,
        hint: Hint,
        pass: SolvePass,
    ) -> SolveReport {
        let count = target.child_count();
        let h_spacing = sanitize_spacing(self.h_spacing);
        let v_spacing = sanitize_spacing(self.v_spacing);
        if self.columns == 0 || count == 0 {
            wtk_core::trace!(
                columns = self.columns,
                children = count,
                "nothing to solve"
            );
            return SolveReport::empty(self.columns, pass, h_spacing, v_spacing);
        }

        let cells: Vec<CellData> = (0..count).map(|i| target.layout_data(i)).collect();
        let grid = CellGrid::build(self.columns, cells.iter().map(|d| (d.h_span, d.v_span)));
        let mut caches: Vec<CellCache> = cells
            .iter()
            .enumerate()
            .map(|(i, data)| CellCache::compute(target.child(i), data, Hint::NONE, pass))
            .collect();

        let columns = solver::solve_axis(
            Axis::Horizontal,
            &grid,
            &cells,
            &caches,
            h_spacing,
            self.equal_columns,
            hint.width,
        );
        if hint.width.is_some() {
            solver::reflow(target, &grid, &cells, &mut caches, &columns, h_spacing, pass);
        }
        let rows = solver::solve_axis(
            Axis::Vertical,
            &grid,
            &cells,
            &caches,
            v_spacing,
            false,
            hint.height,
        );

        let size = Size::new(columns.total(h_spacing), rows.total(v_spacing));
        SolveReport {
            pass,
            grid,
            cells,
            caches,
            columns,
            rows,
            h_spacing,
            v_spacing,
            size,
        }
    }

    /// Answer the size protocol for `target` under this layout.
    ///
    /// Min and pref come from solving with every child at its minimum and
    /// preferred size. The max is unbounded along an axis with any grabbing
    /// track and equals pref otherwise. Border insets are added to all three.
    pub fn sizes<C: Container + ?Sized>(&self, target: &C, hint: Hint) -> Sizes {
        let _span = wtk_core::debug_span!(
            "flex_solve",
            op = "sizes",
            columns = self.columns,
            children = target.child_count(),
            width_hint = ?hint.width,
            height_hint = ?hint.height
        )
        .entered();

        let insets = target.border();
        let inner = hint.shrink(insets);
        let min = self.solve(target, inner, SolvePass::Minimum).size;
        let preferred = self.solve(target, inner, SolvePass::Preferred);
        let pref = preferred.size.grow(insets);
        let max = Size::new(
            unbounded_if(pref.width, preferred.columns.expand_count > 0),
            unbounded_if(pref.height, preferred.rows.expand_count > 0),
        );
        Sizes::new(min.grow(insets), pref, max)
    }

    /// Solve against `target`'s current bounds and write every child's bounds.
    ///
    /// When the grid is smaller than the content area it is placed according
    /// to the layout's own alignment. Does not recurse into the children.
    pub fn layout<C: Container + ?Sized>(&self, target: &mut C) {
        let _span = wtk_core::debug_span!(
            "flex_solve",
            op = "layout",
            columns = self.columns,
            children = target.child_count()
        )
        .entered();

        let insets = target.border();
        let content = target.bounds().size().shrink(insets);
        let report = self.solve(target, Hint::exact(content), SolvePass::Preferred);
        let mut origin = Point::new(insets.left, insets.top);

        if report.grid.is_empty() {
            for index in 0..target.child_count() {
                target.set_child_bounds(index, Rect::from_parts(origin, Size::ZERO));
            }
            return;
        }

        origin.x += self.h_align.offset(content.width, report.size.width);
        origin.y += self.v_align.offset(content.height, report.size.height);
        for (child, bounds) in place::child_bounds(origin, &report) {
            target.set_child_bounds(child, bounds);
        }
    }
}

fn sanitize_spacing(spacing: f32) -> f32 {
    if spacing.is_finite() { spacing.max(0.0) } else { 0.0 }
}

fn unbounded_if(pref: f32, grows: bool) -> f32 {
    if grows { pref.max(DEFAULT_MAX_SIZE) } else { pref }
}
