//! Logical grid built from a container's children.
//!
//! Children are placed in list order with a first-free-cell rule: each child
//! takes the earliest row-major position where its whole `v_span x h_span`
//! rectangle is free. Rows are appended as needed; the column count is fixed.

use crate::Axis;
use crate::cell::MAX_SPAN;

/// Where a child landed in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Index of the child in its container.
    pub child: usize,
    pub row: usize,
    pub column: usize,
    /// Normalized horizontal span.
    pub h_span: usize,
    /// Normalized vertical span.
    pub v_span: usize,
}

impl Placement {
    /// First track occupied along an axis.
    #[inline]
    pub const fn start(&self, axis: Axis) -> usize {
        match axis {
            Axis::Horizontal => self.column,
            Axis::Vertical => self.row,
        }
    }

    /// Tracks occupied along an axis.
    #[inline]
    pub const fn span(&self, axis: Axis) -> usize {
        match axis {
            Axis::Horizontal => self.h_span,
            Axis::Vertical => self.v_span,
        }
    }

    /// Last track occupied along an axis (inclusive).
    #[inline]
    pub const fn end(&self, axis: Axis) -> usize {
        self.start(axis) + self.span(axis) - 1
    }

    /// Whether the placement covers cell `(row, column)`.
    #[inline]
    pub const fn covers(&self, row: usize, column: usize) -> bool {
        row >= self.row
            && row < self.row + self.v_span
            && column >= self.column
            && column < self.column + self.h_span
    }
}

/// A `rows x columns` grid of child indices.
///
/// A multi-span child occupies several cells, all holding the same index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellGrid {
    columns: usize,
    rows: usize,
    cells: Vec<Option<usize>>,
    placements: Vec<Placement>,
}

impl CellGrid {
    /// Place children with the given `(h_span, v_span)` pairs, in order.
    ///
    /// Spans are clamped to `[1, columns]` horizontally and `[1, MAX_SPAN]`
    /// vertically.
    /// Zero columns or zero children yield an empty grid.
    pub fn build(columns: usize, spans: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut grid = CellGrid {
            columns,
            ..CellGrid::default()
        };
        if columns == 0 {
            return grid;
        }

        // Rows before this one have no free cells left.
        let mut first_open_row = 0;
        for (child, (h_span, v_span)) in spans.into_iter().enumerate() {
            let h_span = h_span.clamp(1, columns);
            let v_span = v_span.clamp(1, MAX_SPAN);
            let (row, column) = grid.find_slot(first_open_row, h_span, v_span);
            grid.occupy(Placement {
                child,
                row,
                column,
                h_span,
                v_span,
            });
            while first_open_row < grid.rows && grid.row_is_full(first_open_row) {
                first_open_row += 1;
            }
        }
        grid
    }

    fn find_slot(&mut self, start_row: usize, h_span: usize, v_span: usize) -> (usize, usize) {
        let (mut row, mut column) = (start_row, 0);
        loop {
            self.ensure_rows(row.saturating_add(v_span));
            while column < self.columns && self.get(row, column).is_some() {
                column += 1;
            }
            if column + h_span <= self.columns {
                match (column..column + h_span).find(|&c| !self.column_free(row, c, v_span)) {
                    None => return (row, column),
                    Some(blocked) => {
                        column = blocked + 1;
                        continue;
                    }
                }
            }
            column = 0;
            row += 1;
        }
    }

    fn column_free(&self, row: usize, column: usize, v_span: usize) -> bool {
        (row..row + v_span).all(|r| self.get(r, column).is_none())
    }

    fn row_is_full(&self, row: usize) -> bool {
        (0..self.columns).all(|c| self.get(row, c).is_some())
    }

    fn ensure_rows(&mut self, rows: usize) {
        let cells = rows.saturating_mul(self.columns);
        if self.cells.len() < cells {
            self.cells.resize(cells, None);
        }
    }

    fn occupy(&mut self, placement: Placement) {
        for row in placement.row..placement.row + placement.v_span {
            for column in placement.column..placement.column + placement.h_span {
                self.cells[row * self.columns + column] = Some(placement.child);
            }
        }
        self.rows = self.rows.max(placement.row + placement.v_span);
        self.placements.push(placement);
    }

    /// Number of columns.
    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows actually used.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of tracks along an axis.
    #[inline]
    pub fn tracks(&self, axis: Axis) -> usize {
        match axis {
            Axis::Horizontal => self.columns,
            Axis::Vertical => self.rows,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Child index occupying `(row, column)`, if any.
    #[inline]
    pub fn get(&self, row: usize, column: usize) -> Option<usize> {
        if column >= self.columns {
            return None;
        }
        self.cells.get(row * self.columns + column).copied().flatten()
    }

    /// Placement of a child, by child index.
    #[inline]
    pub fn placement(&self, child: usize) -> Option<&Placement> {
        self.placements.get(child)
    }

    /// All placements, in child order.
    #[inline]
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// The child whose top-left cell is `(row, column)`.
    pub fn first_cell_of(&self, row: usize, column: usize) -> Option<&Placement> {
        let placement = self.placement(self.get(row, column)?)?;
        (placement.row == row && placement.column == column).then_some(placement)
    }

    /// The child whose bottom-right cell is `(row, column)`.
    pub fn last_cell_of(&self, row: usize, column: usize) -> Option<&Placement> {
        let placement = self.placement(self.get(row, column)?)?;
        (placement.end(Axis::Vertical) == row && placement.end(Axis::Horizontal) == column)
            .then_some(placement)
    }

    /// Cell coordinates for a position given as (track along `axis`, line across it).
    #[inline]
    pub(crate) const fn cell(axis: Axis, track: usize, line: usize) -> (usize, usize) {
        match axis {
            Axis::Horizontal => (line, track),
            Axis::Vertical => (track, line),
        }
    }
}
