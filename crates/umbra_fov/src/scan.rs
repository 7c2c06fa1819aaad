//! Single-octant shadow scan
//!
//! Walks rows of increasing depth inside one octant, reporting cells whose
//! slope range lies inside the current interval. When a run of absorbing
//! cells starts, the interval to its left is queued as a continuation at the
//! next depth instead of recursing.

use umbra_memory::{Allocator, GrowableStack, StackError};

use crate::octant::Octant;
use crate::visibility::Visibility;

/// Pending scan work: resume at `row`, limited to `[start, finish)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanState {
    /// Depth from the origin along the octant's primary axis
    pub row: i32,
    /// Slope bound the interval starts at
    pub start: i32,
    /// Slope bound the interval ends at
    pub finish: i32,
}

impl ScanState {
    /// Full interval at depth 1, pushed once per octant
    pub const SEED: Self = Self::new(1, 1, 0);

    pub const fn new(row: i32, start: i32, finish: i32) -> Self {
        Self { row, start, finish }
    }

    /// Whether the interval is non-empty and worth scanning
    #[inline]
    pub fn is_open(&self) -> bool {
        self.start >= self.finish
    }
}

/// Work stack holding scan states
pub type WorkStack<'a, A> = GrowableStack<'a, ScanState, A>;

/// Slope bound of a column's near edge
///
/// Integer division truncating toward zero, which decides exactly where
/// shadow edges fall. Computed in `i64` so the doubled offsets never overflow.
#[inline]
pub fn left_slope(dx: i32, dy: i32) -> i32 {
    ((2 * dx as i64 - 1) / (2 * dy as i64 - 1)) as i32
}

/// Slope bound of a column's far edge, truncating toward zero
#[inline]
pub fn right_slope(dx: i32, dy: i32) -> i32 {
    ((2 * dx as i64 + 1) / (2 * dy as i64 + 1)) as i32
}

/// Counters for one octant pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// States popped from the stack, open or not
    pub states_processed: usize,
    /// Cells reported through `update`
    pub cells_visited: usize,
    /// Continuation states pushed
    pub continuations: usize,
}

impl PassStats {
    /// Accumulate another pass into this one
    pub fn merge(&mut self, other: &PassStats) {
        self.states_processed += other.states_processed;
        self.cells_visited += other.cells_visited;
        self.continuations += other.continuations;
    }
}

/// Drain the work stack for one octant
///
/// The caller seeds the stack. Returns when the stack is empty, or with the
/// first push failure.
pub fn scan_octant<V, A>(
    x0: i32,
    y0: i32,
    power: i32,
    octant: &Octant,
    stack: &mut WorkStack<'_, A>,
    visibility: &mut V,
) -> Result<PassStats, StackError>
where
    V: Visibility + ?Sized,
    A: Allocator,
{
    let mut stats = PassStats::default();

    while let Some(state) = stack.pop() {
        stats.states_processed += 1;
        if !state.is_open() {
            continue;
        }

        let mut start = state.start;
        let finish = state.finish;
        let mut depth = state.row;

        while depth < power {
            let dy = -depth;
            let mut blocked = false;
            let mut new_start = 0;

            for dx in dy..=0 {
                let left = left_slope(dx, dy);
                let right = right_slope(dx, dy);

                if start < right {
                    continue;
                }
                if finish > left {
                    break;
                }

                let (x, y) = octant.to_grid(x0, y0, dx, dy);
                visibility.update(x, y);
                stats.cells_visited += 1;
                let absorbs = visibility.absorb(x, y);

                if blocked {
                    if absorbs {
                        new_start = right;
                    } else {
                        blocked = false;
                        start = new_start;
                    }
                } else if absorbs && depth < power {
                    stack.push(ScanState::new(depth + 1, start, left))?;
                    stats.continuations += 1;
                    blocked = true;
                    new_start = right;
                }
            }

            depth += 1;
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::octant::OCTANTS;
    use crate::visibility::from_fns;
    use umbra_memory::SystemAllocator;

    #[test]
    fn test_slopes_truncate_toward_zero() {
        // -1 / -3 and 1 / -3 both truncate to 0; floor division would give -1
        assert_eq!(left_slope(0, -1), 0);
        assert_eq!(right_slope(0, -2), 0);
        assert_eq!(right_slope(0, -1), -1);

        // Diagonal columns sit exactly on slope 1
        assert_eq!(left_slope(-3, -3), 1);
        assert_eq!(right_slope(-3, -3), 1);
        assert_eq!(left_slope(-2, -3), 0);
        assert_eq!(right_slope(-2, -3), 0);
    }

    #[test]
    fn test_slopes_at_large_depth() {
        let deep = -(i32::MAX / 2) - 10;
        assert_eq!(left_slope(deep, deep), 1);
        assert_eq!(right_slope(0, deep), 0);
    }

    #[test]
    fn test_seed_is_open_and_empty_interval_is_not() {
        assert!(ScanState::SEED.is_open());
        assert!(ScanState::new(3, 0, 0).is_open());
        assert!(!ScanState::new(3, 0, 1).is_open());
    }

    #[test]
    fn test_closed_state_is_dropped() {
        let heap = SystemAllocator;
        let mut stack = WorkStack::with_capacity_in(1, &heap).unwrap();
        stack.push(ScanState::new(1, -1, 0)).unwrap();

        let mut visited = 0;
        let mut vis = from_fns(|_, _| visited += 1, |_, _| false);
        let stats = scan_octant(0, 0, 5, &OCTANTS[0], &mut stack, &mut vis).unwrap();

        drop(vis);
        assert_eq!(visited, 0);
        assert_eq!(stats.states_processed, 1);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_first_octant_order_on_open_grid() {
        let heap = SystemAllocator;
        let mut stack = WorkStack::with_capacity_in(1, &heap).unwrap();
        stack.push(ScanState::SEED).unwrap();

        let mut cells = Vec::new();
        let mut vis = from_fns(|x, y| cells.push((x, y)), |_, _| false);
        let stats = scan_octant(0, 0, 3, &OCTANTS[0], &mut stack, &mut vis).unwrap();

        drop(vis);
        assert_eq!(cells, vec![(1, 1), (1, 0), (2, 2), (2, 1), (2, 0)]);
        assert_eq!(stats.cells_visited, 5);
        assert_eq!(stats.continuations, 0);
    }

    #[test]
    fn test_absorbing_cell_queues_continuation() {
        let heap = SystemAllocator;
        let mut stack = WorkStack::with_capacity_in(1, &heap).unwrap();
        stack.push(ScanState::SEED).unwrap();

        let mut cells = Vec::new();
        let mut vis = from_fns(|x, y| cells.push((x, y)), |x, y| (x, y) == (1, 0));
        let stats = scan_octant(0, 0, 3, &OCTANTS[0], &mut stack, &mut vis).unwrap();

        drop(vis);
        // (1, 0) opens a continuation at depth 2 that rescans the row
        assert_eq!(stats.continuations, 1);
        assert_eq!(stats.states_processed, 2);
        assert_eq!(
            cells,
            vec![(1, 1), (1, 0), (2, 2), (2, 1), (2, 0), (2, 2), (2, 1), (2, 0)]
        );
    }

    #[test]
    fn test_zero_power_visits_nothing() {
        let heap = SystemAllocator;
        let mut stack = WorkStack::with_capacity_in(1, &heap).unwrap();
        stack.push(ScanState::SEED).unwrap();

        let mut visited = 0;
        let mut vis = from_fns(|_, _| visited += 1, |_, _| true);
        let stats = scan_octant(0, 0, 1, &OCTANTS[3], &mut stack, &mut vis).unwrap();

        drop(vis);
        assert_eq!(visited, 0);
        assert_eq!(stats.cells_visited, 0);
        assert_eq!(stats.states_processed, 1);
    }
}
