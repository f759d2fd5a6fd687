//! One-ring hazard dilation.
//!
//! Operates on the hazard set of a [`GridIndex`]:
//!
//! - Every burning cell examines its four orthogonal neighbours.
//! - A neighbour ignites if it is in bounds, not a wall, not an exit and
//!   not already burning.
//! - Candidates are computed from a snapshot of the hazard set taken
//!   before any ignition, so a cell ignited this tick does not itself
//!   spread until the next tick (breadth-synchronous growth).
//!
//! The hazard set only ever grows; there is no cap other than the grid
//! boundary and the firebreaks.

use evac_core::{Cell, CellSet};
use evac_grid::GridIndex;

/// The hazard-spread operator.
///
/// Stateless: all state lives in the [`GridIndex`] it is applied to.
#[derive(Clone, Copy, Debug, Default)]
pub struct HazardSpread;

impl HazardSpread {
    /// Create the operator.
    pub fn new() -> Self {
        Self
    }

    /// Cells that would ignite on the next tick, without mutating `grid`.
    ///
    /// Order is deterministic: burning cells in hazard-set order, each
    /// contributing its neighbours in up, down, left, right order, with
    /// duplicates removed.
    pub fn ignition_candidates(&self, grid: &GridIndex) -> CellSet {
        let mut candidates = CellSet::new();
        for &burning in grid.hazard() {
            for next in grid.neighbours(burning) {
                if !grid.is_wall(next) && !grid.is_exit(next) && !grid.is_hazard(next) {
                    candidates.insert(next);
                }
            }
        }
        candidates
    }

    /// Advance the hazard by one ring. Returns the newly ignited cells.
    ///
    /// # Examples
    ///
    /// ```
    /// use evac_core::Cell;
    /// use evac_grid::GridIndex;
    /// use evac_hazard::HazardSpread;
    ///
    /// let mut grid = GridIndex::new(3, 3).unwrap();
    /// grid.add_hazard(Cell::new(1, 1));
    /// let ignited = HazardSpread::new().step(&mut grid);
    /// assert_eq!(ignited.len(), 4);
    /// assert_eq!(grid.hazard().len(), 5);
    /// ```
    pub fn step(&self, grid: &mut GridIndex) -> Vec<Cell> {
        let candidates = self.ignition_candidates(grid);
        let mut ignited = Vec::with_capacity(candidates.len());
        for cell in candidates {
            if grid.add_hazard(cell) {
                ignited.push(cell);
            }
        }
        ignited
    }
}
