//! Breadth-first search: FIFO expansion, shortest routes on unit costs.

use std::collections::VecDeque;

use evac_core::{Cell, CellSet};
use evac_grid::GridIndex;

use crate::parents::Parents;
use crate::route::Route;
use crate::strategy::{SearchStrategy, StrategyKind};

/// Level-order search.
///
/// Cells are marked visited when enqueued, so each cell enters the queue
/// at most once. The first goal dequeued is at minimum step distance.
#[derive(Clone, Copy, Debug, Default)]
pub struct BreadthFirst;

impl SearchStrategy for BreadthFirst {
    fn kind(&self) -> StrategyKind {
        StrategyKind::BreadthFirst
    }

    fn search(&self, start: Cell, goals: &CellSet, grid: &GridIndex) -> Option<Route> {
        let start_index = grid.index_of(start)?;
        let mut parents = Parents::new(grid, start);
        let mut visited = vec![false; grid.cell_count()];
        visited[start_index] = true;

        let mut queue = VecDeque::new();
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            if goals.contains(&current) {
                return Some(parents.route_to(grid, current));
            }
            for next in grid.passable_neighbours(current) {
                let Some(i) = grid.index_of(next) else {
                    continue;
                };
                if !visited[i] {
                    visited[i] = true;
                    parents.link(i, current);
                    queue.push_back(next);
                }
            }
        }
        None
    }
}
