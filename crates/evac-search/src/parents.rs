//! Predecessor links shared by all strategies for route reconstruction.

use evac_core::Cell;
use evac_grid::GridIndex;

use crate::route::Route;

/// Dense predecessor table indexed by the grid's row-major cell index.
pub(crate) struct Parents {
    start: Cell,
    links: Vec<Option<Cell>>,
}

impl Parents {
    pub(crate) fn new(grid: &GridIndex, start: Cell) -> Self {
        Self {
            start,
            links: vec![None; grid.cell_count()],
        }
    }

    /// Record `parent` as the predecessor of the cell at `child_index`.
    pub(crate) fn link(&mut self, child_index: usize, parent: Cell) {
        self.links[child_index] = Some(parent);
    }

    /// Walk predecessor links back from `goal` to the start cell.
    ///
    /// The start cell itself is excluded; the goal is included.
    pub(crate) fn route_to(&self, grid: &GridIndex, goal: Cell) -> Route {
        let mut steps = Vec::new();
        let mut current = goal;
        while current != self.start {
            steps.push(current);
            match grid.index_of(current).and_then(|i| self.links[i]) {
                Some(prev) => current = prev,
                None => break,
            }
        }
        steps.reverse();
        Route::new(steps)
    }
}
