//! Turning solved track sizes into child rectangles.

use crate::cell::{CellCache, CellData};
use crate::debug::SolveReport;
use crate::{Alignment, Point, Rect, Size};

/// Bounds for every placed child, in grid order (rows top to bottom, cells
/// left to right), with the grid's top-left corner at `origin`.
pub fn child_bounds(origin: Point, report: &SolveReport) -> Vec<(usize, Rect)> {
    let grid = &report.grid;
    let widths = &report.columns.sizes;
    let heights = &report.rows.sizes;
    let mut placed = Vec::with_capacity(grid.placements().len());

    let mut y = origin.y;
    for row in 0..grid.rows() {
        let mut x = origin.x;
        for column in 0..grid.columns() {
            if let Some(placement) = grid.first_cell_of(row, column) {
                let cell = Rect::new(
                    x,
                    y,
                    report.columns.span_extent(column, placement.h_span, report.h_spacing),
                    report.rows.span_extent(row, placement.v_span, report.v_spacing),
                );
                let child = placement.child;
                placed.push((
                    child,
                    align_in_cell(cell, &report.cells[child], &report.caches[child]),
                ));
            }
            x += widths[column] + report.h_spacing;
        }
        y += heights[row] + report.v_spacing;
    }
    placed
}

/// Position a child of the cached size inside its cell.
///
/// Non-fill children keep their cached size, capped at the cell, and are
/// offset by their alignment. Fill children take the whole cell extent.
pub fn align_in_cell(cell: Rect, data: &CellData, cache: &CellCache) -> Rect {
    let (x, width) = align_along(cell.x, cell.width, cache.size.width, data.h_align);
    let (y, height) = align_along(cell.y, cell.height, cache.size.height, data.v_align);
    Rect::from_parts(Point::new(x, y), Size::new(width, height))
}

fn align_along(start: f32, available: f32, wanted: f32, align: Alignment) -> (f32, f32) {
    if align == Alignment::Fill {
        return (start, available);
    }
    let used = wanted.min(available);
    (start + align.offset(available, used), used)
}
