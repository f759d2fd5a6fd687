//! Uniform-cost search (Dijkstra) on unit edge costs.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use evac_core::{Cell, CellSet};
use evac_grid::GridIndex;

use crate::parents::Parents;
use crate::route::Route;
use crate::strategy::{SearchStrategy, StrategyKind};

/// Dijkstra's algorithm.
///
/// The frontier is a min-heap keyed by `(accumulated cost, insertion
/// sequence)`, so equal-cost entries pop in the order they were pushed.
/// Stale heap entries for already-finalized cells are skipped on pop.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformCost;

impl SearchStrategy for UniformCost {
    fn kind(&self) -> StrategyKind {
        StrategyKind::UniformCost
    }

    fn search(&self, start: Cell, goals: &CellSet, grid: &GridIndex) -> Option<Route> {
        let start_index = grid.index_of(start)?;
        let n = grid.cell_count();
        let mut parents = Parents::new(grid, start);
        let mut dist = vec![u32::MAX; n];
        let mut finalized = vec![false; n];
        let mut seq: u64 = 0;
        let mut heap = BinaryHeap::new();

        dist[start_index] = 0;
        heap.push(Reverse((0u32, seq, start_index)));

        while let Some(Reverse((cost, _, index))) = heap.pop() {
            if finalized[index] {
                continue;
            }
            finalized[index] = true;

            let current = grid.cell_at(index);
            if goals.contains(&current) {
                return Some(parents.route_to(grid, current));
            }

            for next in grid.passable_neighbours(current) {
                let Some(i) = grid.index_of(next) else {
                    continue;
                };
                if finalized[i] {
                    continue;
                }
                let alt = cost + 1;
                if alt < dist[i] {
                    dist[i] = alt;
                    parents.link(i, current);
                    seq += 1;
                    heap.push(Reverse((alt, seq, i)));
                }
            }
        }
        None
    }
}
