//! Column width / row height solver.
//!
//! The same routine solves both axes. For columns:
//!
//! 1. Single-span children raise their column to their cached width and mark
//!    grabbing columns expandable.
//! 2. Spanning children, visited by their last column, push any width they
//!    still lack into the columns they cover (see [`apportion`]).
//! 3. With equal columns, every column takes the same width.
//! 4. Otherwise, given a concrete width, slack (or deficit) is spread over the
//!    expandable columns until the total matches. A column that would drop
//!    below its minimum is pinned there and leaves the expandable set, and
//!    spanning minimums are re-applied after every round.
//!
//! Rows are solved after columns, once [`reflow`] has let width-dependent
//! children (wrapped text) recompute their height at the solved width.

use crate::cell::{CellCache, CellData, SolvePass};
use crate::flex::Container;
use crate::grid::{CellGrid, Placement};
use crate::{Alignment, Axis, Hint};

/// The slack loop stops once the total is this close to the target.
pub const EPSILON: f32 = 0.01;

/// Solved track sizes along one axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisSolution {
    /// Width of each column (or height of each row).
    pub sizes: Vec<f32>,
    /// Minimum of each track.
    pub mins: Vec<f32>,
    /// Tracks still eligible for slack when the solve finished.
    pub expand: Vec<bool>,
    /// Tracks marked expandable before slack distribution.
    pub expand_count: usize,
    /// Rounds the slack loop ran.
    pub iterations: usize,
}

impl AxisSolution {
    fn with_tracks(tracks: usize) -> Self {
        Self {
            sizes: vec![0.0; tracks],
            mins: vec![0.0; tracks],
            expand: vec![false; tracks],
            expand_count: 0,
            iterations: 0,
        }
    }

    /// Sum of all tracks plus the spacing between them.
    pub fn total(&self, spacing: f32) -> f32 {
        if self.sizes.is_empty() {
            return 0.0;
        }
        self.sizes.iter().sum::<f32>() + spacing * (self.sizes.len() - 1) as f32
    }

    /// Extent of `span` tracks starting at `start`, including inner spacing.
    pub fn span_extent(&self, start: usize, span: usize, spacing: f32) -> f32 {
        let end = (start + span).min(self.sizes.len());
        self.sizes[start.min(end)..end].iter().sum::<f32>()
            + spacing * span.saturating_sub(1) as f32
    }

    fn mark_expandable(&mut self, track: usize) {
        if !self.expand[track] {
            self.expand[track] = true;
            self.expand_count += 1;
        }
    }

    fn expandable_in(&self, placement: &Placement, axis: Axis) -> usize {
        let start = placement.start(axis);
        self.expand[start..=placement.end(axis)]
            .iter()
            .filter(|&&e| e)
            .count()
    }
}

/// Solve one axis of the grid.
///
/// `hint` is the concrete extent available along the axis, spacing included,
/// or `None` for natural sizes. `equal` forces equal track sizes.
pub fn solve_axis(
    axis: Axis,
    grid: &CellGrid,
    cells: &[CellData],
    caches: &[CellCache],
    spacing: f32,
    equal: bool,
    hint: Option<f32>,
) -> AxisSolution {
    let tracks = grid.tracks(axis);
    let lines = grid.tracks(axis.cross());
    let mut solution = AxisSolution::with_tracks(tracks);
    if tracks == 0 {
        return solution;
    }

    for track in 0..tracks {
        for line in 0..lines {
            let (row, column) = CellGrid::cell(axis, track, line);
            let Some(placement) = grid.first_cell_of(row, column) else {
                continue;
            };
            if placement.span(axis) != 1 {
                continue;
            }
            let data = &cells[placement.child];
            let cache = &caches[placement.child];
            solution.sizes[track] = solution.sizes[track].max(axis.of(cache.size));
            if data.grabs(axis) {
                solution.mark_expandable(track);
            }
            if let Some(min) = data.min_contribution(axis, cache) {
                solution.mins[track] = solution.mins[track].max(min);
            }
        }
        for line in 0..lines {
            let (row, column) = CellGrid::cell(axis, track, line);
            let Some(placement) = grid.last_cell_of(row, column) else {
                continue;
            };
            if placement.span(axis) > 1 {
                reconcile_span(
                    &mut solution,
                    axis,
                    placement,
                    &cells[placement.child],
                    &caches[placement.child],
                    spacing,
                    equal,
                );
            }
        }
    }

    let available = hint.map(|h| (h - spacing * (tracks - 1) as f32).max(0.0));
    if equal {
        equalize(&mut solution, available);
    } else if let Some(available) = available
        && solution.expand_count > 0
    {
        let spanning = spanning_with_minimums(axis, grid, cells, caches);
        distribute_slack(&mut solution, axis, &spanning, spacing, available);
    }
    solution
}

/// Push the width a spanning child lacks into the tracks it covers.
fn reconcile_span(
    solution: &mut AxisSolution,
    axis: Axis,
    placement: &Placement,
    data: &CellData,
    cache: &CellCache,
    spacing: f32,
    equal: bool,
) {
    let start = placement.start(axis);
    let last = placement.end(axis);
    let span = placement.span(axis);
    let span_size: f32 = solution.sizes[start..=last].iter().sum();
    let span_min: f32 = solution.mins[start..=last].iter().sum();
    let span_expand = solution.expandable_in(placement, axis);
    if data.grabs(axis) && span_expand == 0 {
        solution.mark_expandable(last);
    }

    let gaps = spacing * (span - 1) as f32;
    let extra = axis.of(cache.size) - span_size - gaps;
    if extra > 0.0 {
        if equal {
            let target = ((extra + span_size) / span as f32).ceil();
            for size in &mut solution.sizes[start..=last] {
                *size = size.max(target);
            }
        } else {
            apportion(
                extra,
                last,
                span_expand,
                span,
                &solution.expand,
                &mut solution.sizes,
            );
        }
    }

    if let Some(min) = data.min_contribution(axis, cache) {
        let extra = min - span_min - gaps;
        if extra > 0.0 {
            if equal {
                let target = ((extra + span_min) / span as f32).ceil();
                for track_min in &mut solution.mins[start..=last] {
                    *track_min = track_min.max(target);
                }
            } else {
                apportion(
                    extra,
                    last,
                    span_expand,
                    span,
                    &solution.expand,
                    &mut solution.mins,
                );
            }
        }
    }
}

/// Split `extra` among the expandable tracks of a span ending at `base`.
///
/// With no expandable tracks everything lands on `base`. Otherwise the whole
/// part of `extra` is split into equal integer shares, the leftover units go
/// one at a time to expandable tracks walking backward from `base`, and the
/// fractional part goes to the first expandable track visited.
pub fn apportion(
    extra: f32,
    base: usize,
    expandable: usize,
    span: usize,
    expand: &[bool],
    values: &mut [f32],
) {
    if expandable == 0 {
        values[base] += extra;
        return;
    }
    let whole = extra.floor();
    let mut fraction = extra - whole;
    let share = (whole / expandable as f32).floor();
    let mut remainder = whole - share * expandable as f32;
    let first = (base + 1).saturating_sub(span);

    let mut any = false;
    for track in (first..=base).rev() {
        if expand[track] {
            values[track] += share + fraction;
            fraction = 0.0;
            any = true;
        }
    }
    if !any {
        values[base] += extra;
        return;
    }
    while remainder >= 1.0 {
        for track in (first..=base).rev() {
            if remainder < 1.0 {
                break;
            }
            if expand[track] {
                values[track] += 1.0;
                remainder -= 1.0;
            }
        }
    }
}

/// Give every track the same size.
fn equalize(solution: &mut AxisSolution, available: Option<f32>) {
    let tracks = solution.sizes.len();
    let min_track = solution.mins.iter().copied().fold(0.0, f32::max);
    let natural = solution.sizes.iter().copied().fold(0.0, f32::max);
    let size = match available {
        Some(available) if solution.expand_count > 0 => {
            min_track.max((available / tracks as f32).floor())
        }
        _ => natural,
    };
    let grows = solution.expand_count > 0;
    solution.sizes.fill(size);
    solution.expand.fill(grows);
}

/// Spanning children that impose a minimum, in the order the span pass visits them.
fn spanning_with_minimums(
    axis: Axis,
    grid: &CellGrid,
    cells: &[CellData],
    caches: &[CellCache],
) -> Vec<(Placement, f32)> {
    let mut spanning = Vec::new();
    for track in 0..grid.tracks(axis) {
        for line in 0..grid.tracks(axis.cross()) {
            let (row, column) = CellGrid::cell(axis, track, line);
            if let Some(placement) = grid.last_cell_of(row, column)
                && placement.span(axis) > 1
                && let Some(min) =
                    cells[placement.child].min_contribution(axis, &caches[placement.child])
            {
                spanning.push((*placement, min));
            }
        }
    }
    spanning
}

/// Spread the gap between the natural total and `available` over the
/// expandable tracks.
fn distribute_slack(
    solution: &mut AxisSolution,
    axis: Axis,
    spanning: &[(Placement, f32)],
    spacing: f32,
    available: f32,
) {
    let tracks = solution.sizes.len();
    let max_rounds = 2 * tracks + 2;
    let mut remaining = solution.expand.iter().filter(|&&e| e).count();
    let mut total: f32 = solution.sizes.iter().sum();

    while (total - available).abs() > EPSILON && remaining > 0 {
        if solution.iterations >= max_rounds {
            wtk_core::debug!(
                axis = axis.label(),
                total,
                available,
                rounds = solution.iterations,
                "slack distribution hit its round limit"
            );
            break;
        }
        solution.iterations += 1;

        let delta = (available - total) / remaining as f32;
        for track in 0..tracks {
            if !solution.expand[track] {
                continue;
            }
            if solution.sizes[track] + delta > solution.mins[track] {
                solution.sizes[track] += delta;
            } else {
                solution.sizes[track] = solution.mins[track];
                solution.expand[track] = false;
                remaining -= 1;
            }
        }

        // Shrinking may have starved a spanning child; give it back its minimum.
        for (placement, min) in spanning {
            let start = placement.start(axis);
            let last = placement.end(axis);
            let span = placement.span(axis);
            let span_size: f32 = solution.sizes[start..=last].iter().sum();
            let extra = min - span_size - spacing * (span - 1) as f32;
            if extra > 0.0 {
                let span_expand = solution.expandable_in(placement, axis);
                apportion(
                    extra,
                    last,
                    span_expand,
                    span,
                    &solution.expand,
                    &mut solution.sizes,
                );
            }
        }

        total = solution.sizes.iter().sum();
        wtk_core::trace!(
            axis = axis.label(),
            round = solution.iterations,
            delta,
            total,
            remaining,
            "slack round"
        );
    }
}

/// Let children whose cell width differs from what they asked for recompute
/// their size at the solved width.
///
/// Only cells without an explicit height hint are reconsidered: those that
/// fill their cell, and those that asked for more width than they got.
pub(crate) fn reflow<C: Container + ?Sized>(
    target: &C,
    grid: &CellGrid,
    cells: &[CellData],
    caches: &mut [CellCache],
    columns: &AxisSolution,
    spacing: f32,
    pass: SolvePass,
) {
    for column in 0..grid.columns() {
        for row in 0..grid.rows() {
            let Some(placement) = grid.last_cell_of(row, column) else {
                continue;
            };
            let data = &cells[placement.child];
            if data.size_hint.height.is_some() {
                continue;
            }
            let current = columns.span_extent(placement.column, placement.h_span, spacing);
            let cached = caches[placement.child].size.width;
            let differs = (current - cached).abs() > EPSILON;
            if !((differs && data.h_align == Alignment::Fill) || cached > current + EPSILON) {
                continue;
            }
            let mut cache =
                CellCache::compute(target.child(placement.child), data, Hint::width(current), pass);
            if data.grabs(Axis::Vertical)
                && let Some(min_height) = data.min_size.height
                && min_height > cache.size.height
            {
                cache.size.height = min_height;
            }
            caches[placement.child] = cache;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Size;

    fn cache(width: f32, min_width: f32) -> CellCache {
        CellCache {
            size: Size::new(width, 10.0),
            min: Size::new(min_width, 10.0),
        }
    }

    fn columns(
        spans: &[(usize, usize)],
        cells: &[CellData],
        caches: &[CellCache],
        columns: usize,
        spacing: f32,
        hint: Option<f32>,
    ) -> AxisSolution {
        let grid = CellGrid::build(columns, spans.iter().copied());
        solve_axis(
            Axis::Horizontal,
            &grid,
            cells,
            caches,
            spacing,
            false,
            hint,
        )
    }

    #[test]
    fn apportion_without_expandable_goes_to_base() {
        let mut values = vec![40.0, 40.0, 0.0];
        apportion(30.0, 1, 0, 2, &[false, false, false], &mut values);
        assert_eq!(values, vec![40.0, 70.0, 0.0]);
    }

    #[test]
    fn apportion_splits_evenly_between_expandable() {
        let mut values = vec![40.0, 40.0];
        apportion(30.0, 1, 2, 2, &[true, true], &mut values);
        assert_eq!(values, vec![55.0, 55.0]);
    }

    #[test]
    fn apportion_hands_remainder_backward() {
        let mut values = vec![0.0; 3];
        apportion(8.0, 2, 3, 3, &[true, true, true], &mut values);
        // 8 = 3 * 2 + 2: the last two tracks get the leftover units.
        assert_eq!(values, vec![2.0, 3.0, 3.0]);
    }

    #[test]
    fn apportion_skips_non_expandable_tracks() {
        let mut values = vec![0.0; 3];
        apportion(7.5, 2, 2, 3, &[true, false, true], &mut values);
        assert_eq!(values, vec![3.0, 0.0, 4.5]);
        assert_eq!(values.iter().sum::<f32>(), 7.5);
    }

    #[test]
    fn apportion_stays_inside_span() {
        let mut values = vec![0.0; 4];
        apportion(10.0, 3, 1, 2, &[true, false, false, true], &mut values);
        assert_eq!(values, vec![0.0, 0.0, 0.0, 10.0]);
    }

    #[test]
    fn single_span_children_set_natural_widths() {
        let cells = vec![CellData::new(); 4];
        let caches = vec![cache(30.0, 5.0), cache(50.0, 5.0), cache(45.0, 7.0), cache(20.0, 1.0)];
        let solution = columns(&[(1, 1); 4], &cells, &caches, 2, 4.0, None);
        assert_eq!(solution.sizes, vec![45.0, 50.0]);
        assert_eq!(solution.mins, vec![7.0, 5.0]);
        assert_eq!(solution.expand_count, 0);
        assert_eq!(solution.total(4.0), 99.0);
    }

    #[test]
    fn grab_marks_column_once() {
        let grabbing = CellData::new().h_grab(true);
        let cells = vec![grabbing, CellData::new(), grabbing, CellData::new()];
        let caches = vec![cache(10.0, 0.0); 4];
        let solution = columns(&[(1, 1); 4], &cells, &caches, 2, 0.0, None);
        assert_eq!(solution.expand, vec![true, false]);
        assert_eq!(solution.expand_count, 1);
    }

    #[test]
    fn spanning_excess_lands_on_last_column_without_grab() {
        // Row 0: A spans columns 0-1. Row 1: two 40-wide children under it.
        let cells = vec![CellData::new().h_span(2), CellData::new(), CellData::new()];
        let caches = vec![cache(120.0, 0.0), cache(40.0, 0.0), cache(40.0, 0.0)];
        let solution = columns(&[(2, 1), (1, 1), (1, 1)], &cells, &caches, 2, 10.0, None);
        assert_eq!(solution.sizes, vec![40.0, 70.0]);
    }

    #[test]
    fn spanning_excess_split_between_grabbing_columns() {
        let grab = CellData::new().h_grab(true);
        let cells = vec![CellData::new().h_span(2), grab, grab];
        let caches = vec![cache(120.0, 0.0), cache(40.0, 0.0), cache(40.0, 0.0)];
        let solution = columns(&[(2, 1), (1, 1), (1, 1)], &cells, &caches, 2, 10.0, None);
        assert_eq!(solution.sizes, vec![55.0, 55.0]);
    }

    #[test]
    fn grabbing_span_over_fixed_columns_marks_last() {
        let cells = vec![CellData::new().h_span(2).h_grab(true), CellData::new(), CellData::new()];
        let caches = vec![cache(10.0, 0.0), cache(40.0, 0.0), cache(40.0, 0.0)];
        let solution = columns(&[(2, 1), (1, 1), (1, 1)], &cells, &caches, 2, 0.0, None);
        assert_eq!(solution.expand, vec![false, true]);
        assert_eq!(solution.expand_count, 1);
    }

    #[test]
    fn slack_grows_expandable_columns_to_hint() {
        let cells = vec![CellData::new(), CellData::new().h_grab(true)];
        let caches = vec![cache(50.0, 50.0), cache(80.0, 10.0)];
        let solution = columns(&[(1, 1); 2], &cells, &caches, 2, 10.0, Some(200.0));
        assert_eq!(solution.sizes, vec![50.0, 140.0]);
        assert_eq!(solution.total(10.0), 200.0);
        assert_eq!(solution.iterations, 1);
    }

    #[test]
    fn deficit_pins_columns_at_their_minimum() {
        let with_min = |min: f32| CellData::new().h_grab(true).min_size(Hint::width(min));
        let cells = vec![with_min(60.0), with_min(10.0)];
        let caches = vec![cache(80.0, 60.0), cache(80.0, 10.0)];
        // 100 wide: both shrink by 30 at first, which is below column 0's minimum.
        let solution = columns(&[(1, 1); 2], &cells, &caches, 2, 0.0, Some(100.0));
        assert_eq!(solution.sizes, vec![60.0, 40.0]);
        assert_eq!(solution.expand, vec![false, true]);
        assert!(solution.iterations <= 2 * 2 + 2);
    }

    #[test]
    fn hint_below_minimums_overflows_instead_of_shrinking_further() {
        let with_min = |min: f32| CellData::new().h_grab(true).min_size(Hint::width(min));
        let cells = vec![with_min(60.0), with_min(60.0)];
        let caches = vec![cache(80.0, 60.0), cache(80.0, 60.0)];
        let solution = columns(&[(1, 1); 2], &cells, &caches, 2, 0.0, Some(50.0));
        assert_eq!(solution.sizes, vec![60.0, 60.0]);
        assert!(solution.expand.iter().all(|e| !e));
    }

    #[test]
    fn spanning_minimum_is_reapplied_while_shrinking() {
        // A non-grabbing 2-span child needs 100; both columns grab and shrink.
        let grab = CellData::new().h_grab(true);
        let cells = vec![CellData::new().h_span(2), grab, grab];
        let caches = vec![cache(100.0, 100.0), cache(60.0, 0.0), cache(60.0, 0.0)];
        let solution = columns(&[(2, 1), (1, 1), (1, 1)], &cells, &caches, 2, 0.0, Some(40.0));
        let total: f32 = solution.sizes.iter().sum();
        assert!(total >= 100.0 - EPSILON, "span minimum violated: {total}");
        assert!(solution.iterations <= 2 * 2 + 2);
    }

    #[test]
    fn no_tracks_is_empty() {
        let grid = CellGrid::build(0, std::iter::empty());
        let solution = solve_axis(Axis::Horizontal, &grid, &[], &[], 4.0, false, Some(100.0));
        assert!(solution.sizes.is_empty());
        assert_eq!(solution.total(4.0), 0.0);
    }

    #[test]
    fn span_extent_includes_inner_spacing() {
        let solution = AxisSolution {
            sizes: vec![10.0, 20.0, 30.0],
            ..AxisSolution::default()
        };
        assert_eq!(solution.span_extent(0, 1, 5.0), 10.0);
        assert_eq!(solution.span_extent(1, 2, 5.0), 55.0);
        assert_eq!(solution.total(5.0), 70.0);
    }
}
