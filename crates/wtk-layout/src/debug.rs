//! Introspection of a single solve.
//!
//! [`FlexLayout::solve`](crate::FlexLayout::solve) keeps everything the
//! solver computed instead of discarding it after placement. Nothing here
//! moves children.

use std::fmt;

use crate::cell::{CellCache, CellData, SolvePass};
use crate::grid::CellGrid;
use crate::solver::AxisSolution;
use crate::{Point, Rect, Size, place};

/// Everything one solve pass computed.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveReport {
    /// Which size the children were asked for.
    pub pass: SolvePass,
    pub grid: CellGrid,
    /// Cell metadata read from each child, by child index.
    pub cells: Vec<CellData>,
    /// Per-child caches after the wrap step, by child index.
    pub caches: Vec<CellCache>,
    pub columns: AxisSolution,
    pub rows: AxisSolution,
    /// Spacing actually used between columns.
    pub h_spacing: f32,
    /// Spacing actually used between rows.
    pub v_spacing: f32,
    /// Solved size of the grid, spacing included, border excluded.
    pub size: Size,
}

impl SolveReport {
    pub(crate) fn empty(columns: usize, pass: SolvePass, h_spacing: f32, v_spacing: f32) -> Self {
        Self {
            pass,
            grid: CellGrid::build(columns, std::iter::empty()),
            cells: Vec::new(),
            caches: Vec::new(),
            columns: AxisSolution::default(),
            rows: AxisSolution::default(),
            h_spacing,
            v_spacing,
            size: Size::ZERO,
        }
    }

    #[inline]
    pub fn column_widths(&self) -> &[f32] {
        &self.columns.sizes
    }

    #[inline]
    pub fn row_heights(&self) -> &[f32] {
        &self.rows.sizes
    }

    /// Slack rounds run across both axes.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.columns.iterations + self.rows.iterations
    }

    /// Child rectangles as `layout()` would write them for a grid at `origin`.
    pub fn child_bounds(&self, origin: Point) -> Vec<(usize, Rect)> {
        if self.grid.is_empty() {
            return Vec::new();
        }
        place::child_bounds(origin, self)
    }

    /// Union of all child rectangles for a grid at the origin, or `None`
    /// when nothing was placed.
    pub fn occupied(&self) -> Option<Rect> {
        self.child_bounds(Point::ZERO)
            .into_iter()
            .map(|(_, rect)| rect)
            .reduce(|a, b| a.union(&b))
    }
}

impl fmt::Display for SolveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} pass: {} columns x {} rows, {}x{}",
            self.pass.label(),
            self.grid.columns(),
            self.grid.rows(),
            self.size.width,
            self.size.height
        )?;
        for (name, axis) in [("columns", &self.columns), ("rows", &self.rows)] {
            write!(f, "  {name}:")?;
            for (i, size) in axis.sizes.iter().enumerate() {
                let grows = if axis.expand.get(i).copied().unwrap_or(false) {
                    "*"
                } else {
                    ""
                };
                write!(f, " {size}{grows} (min {})", axis.mins[i])?;
            }
            writeln!(f, ", {} rounds", axis.iterations)?;
        }
        for placement in self.grid.placements() {
            writeln!(
                f,
                "  child {} at ({}, {}) span {}x{}",
                placement.child, placement.row, placement.column, placement.h_span, placement.v_span
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CellData, FlexLayout, Hint, Panel, Sizes};

    fn panel() -> Panel {
        let mut panel = Panel::new().with_layout(FlexLayout::new().columns(2).spacing(10.0, 5.0));
        panel.add(Panel::leaf(Sizes::fixed(Size::new(30.0, 10.0))));
        panel.add(
            Panel::leaf(Sizes::fixed(Size::new(50.0, 20.0)))
                .with_layout_data(CellData::new().h_grab(true)),
        );
        panel.add(Panel::leaf(Sizes::fixed(Size::new(40.0, 15.0))));
        panel
    }

    #[test]
    fn report_exposes_tracks() {
        let panel = panel();
        let flex = FlexLayout::new().columns(2).spacing(10.0, 5.0);
        let report = flex.solve(&panel, Hint::NONE, SolvePass::Preferred);
        assert_eq!(report.column_widths(), &[40.0, 50.0]);
        assert_eq!(report.row_heights(), &[20.0, 15.0]);
        assert_eq!(report.size, Size::new(100.0, 40.0));
        assert_eq!(report.columns.expand_count, 1);
        assert_eq!(report.iterations(), 0);
    }

    #[test]
    fn occupied_is_union_of_children() {
        let panel = panel();
        let flex = FlexLayout::new().columns(2).spacing(10.0, 5.0);
        let report = flex.solve(&panel, Hint::width(200.0), SolvePass::Preferred);
        assert_eq!(report.column_widths(), &[40.0, 150.0]);
        // Child 1 is start-aligned, so it keeps its 50px inside the 150px column.
        assert_eq!(report.occupied(), Some(Rect::new(0.0, 0.0, 100.0, 40.0)));
    }

    #[test]
    fn empty_report() {
        let report = SolveReport::empty(3, SolvePass::Minimum, 4.0, 2.0);
        assert!(report.grid.is_empty());
        assert_eq!(report.occupied(), None);
        assert!(report.to_string().starts_with("minimum pass: 3 columns x 0 rows"));
    }

    #[test]
    fn display_marks_expandable_tracks() {
        let panel = panel();
        let flex = FlexLayout::new().columns(2).spacing(10.0, 5.0);
        let text = flex
            .solve(&panel, Hint::NONE, SolvePass::Preferred)
            .to_string();
        assert!(text.contains("columns: 40 (min 40) 50* (min 0)"), "{text}");
        assert!(text.contains("child 2 at (1, 0) span 1x1"), "{text}");
    }
}
