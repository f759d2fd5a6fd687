//! Depth-first search: LIFO expansion.
//!
//! This is **not** a shortest-path strategy. It returns the first route
//! its stack discipline happens to reach, which on open grids is usually
//! a long meander.

use evac_core::{Cell, CellSet};
use evac_grid::GridIndex;

use crate::parents::Parents;
use crate::route::Route;
use crate::strategy::{SearchStrategy, StrategyKind};

/// Stack-based search.
///
/// Cells are marked visited when pushed; the most recently pushed cell is
/// expanded next. Finds a route whenever one exists.
#[derive(Clone, Copy, Debug, Default)]
pub struct DepthFirst;

impl SearchStrategy for DepthFirst {
    fn kind(&self) -> StrategyKind {
        StrategyKind::DepthFirst
    }

    fn search(&self, start: Cell, goals: &CellSet, grid: &GridIndex) -> Option<Route> {
        let start_index = grid.index_of(start)?;
        let mut parents = Parents::new(grid, start);
        let mut visited = vec![false; grid.cell_count()];
        visited[start_index] = true;

        let mut stack = vec![start];

        while let Some(current) = stack.pop() {
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
                    stack.push(next);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evac_test_utils::{open_grid, parse_grid};

    #[test]
    fn straight_corridor_is_exact() {
        let fx = parse_grid("A....E");
        let route = DepthFirst
            .search(fx.start(), fx.grid.exits(), &fx.grid)
            .unwrap();
        assert_eq!(route.len(), 5);
    }

    #[test]
    fn finds_some_route_on_open_grid() {
        let grid = open_grid(6, 6, &[Cell::new(5, 5)]);
        let route = DepthFirst
            .search(Cell::new(0, 0), grid.exits(), &grid)
            .unwrap();
        assert!(route.len() >= 10);
        assert_eq!(route.goal(), Some(Cell::new(5, 5)));
        assert!(route.is_contiguous_from(Cell::new(0, 0)));
    }

    #[test]
    fn route_never_repeats_a_cell() {
        let grid = open_grid(5, 7, &[Cell::new(6, 0)]);
        let route = DepthFirst
            .search(Cell::new(0, 4), grid.exits(), &grid)
            .unwrap();
        let mut seen = CellSet::new();
        for &c in &route {
            assert!(seen.insert(c), "cell {c} visited twice");
        }
    }

    #[test]
    fn walled_off_exit_is_unreachable() {
        let fx = parse_grid(
            "
            A.#E
            ..#.
            ",
        );
        assert!(DepthFirst
            .search(fx.start(), fx.grid.exits(), &fx.grid)
            .is_none());
    }
}
