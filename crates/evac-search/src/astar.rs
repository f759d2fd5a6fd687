//! A* search with a nearest-goal Manhattan heuristic.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use evac_core::{Cell, CellSet};
use evac_grid::GridIndex;

use crate::parents::Parents;
use crate::route::Route;
use crate::strategy::{SearchStrategy, StrategyKind};

/// Manhattan distance from `cell` to the closest cell in `goals`.
///
/// Returns 0 when `goals` is empty. On a 4-connected unit-cost grid this
/// is admissible and consistent, so A* stays optimal.
///
/// ```
/// use evac_core::{Cell, CellSet};
/// use evac_search::nearest_goal_distance;
///
/// let goals: CellSet = [Cell::new(9, 0), Cell::new(0, 3)].into_iter().collect();
/// assert_eq!(nearest_goal_distance(Cell::new(0, 0), &goals), 3);
/// ```
pub fn nearest_goal_distance(cell: Cell, goals: &CellSet) -> u32 {
    goals
        .iter()
        .map(|&goal| cell.manhattan(goal))
        .min()
        .unwrap_or(0)
}

/// A* search.
///
/// The open set is a min-heap keyed by `(f = g + h, insertion sequence)`.
/// A cell is closed when popped; closed cells are never reopened, and
/// stale heap entries (superseded by a cheaper push) are skipped.
#[derive(Clone, Copy, Debug, Default)]
pub struct AStar;

impl SearchStrategy for AStar {
    fn kind(&self) -> StrategyKind {
        StrategyKind::AStar
    }

    fn search(&self, start: Cell, goals: &CellSet, grid: &GridIndex) -> Option<Route> {
        let start_index = grid.index_of(start)?;
        let n = grid.cell_count();
        let mut parents = Parents::new(grid, start);
        let mut g_score = vec![u32::MAX; n];
        let mut closed = vec![false; n];
        let mut seq: u64 = 0;
        let mut open = BinaryHeap::new();

        g_score[start_index] = 0;
        open.push(Reverse((nearest_goal_distance(start, goals), seq, start_index)));

        while let Some(Reverse((_, _, index))) = open.pop() {
            if closed[index] {
                continue;
            }
            closed[index] = true;

            let current = grid.cell_at(index);
            if goals.contains(&current) {
                return Some(parents.route_to(grid, current));
            }

            let tentative = g_score[index] + 1;
            for next in grid.passable_neighbours(current) {
                let Some(i) = grid.index_of(next) else {
                    continue;
                };
                if closed[i] || tentative >= g_score[i] {
                    continue;
                }
                g_score[i] = tentative;
                parents.link(i, current);
                seq += 1;
                let f = tentative + nearest_goal_distance(next, goals);
                open.push(Reverse((f, seq, i)));
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
    fn heuristic_picks_closest_goal() {
        let goals: CellSet = [Cell::new(4, 4), Cell::new(1, 0)].into_iter().collect();
        assert_eq!(nearest_goal_distance(Cell::new(0, 0), &goals), 1);
        assert_eq!(nearest_goal_distance(Cell::new(0, 0), &CellSet::new()), 0);
    }

    #[test]
    fn corner_to_corner_is_manhattan() {
        let grid = open_grid(5, 5, &[Cell::new(4, 4)]);
        let route = AStar.search(Cell::new(0, 0), grid.exits(), &grid).unwrap();
        assert_eq!(route.len(), 8);
        assert!(route.is_contiguous_from(Cell::new(0, 0)));
    }

    #[test]
    fn heads_for_nearer_exit() {
        let fx = parse_grid(
            "
            E......
            ...A...
            ......E
            ",
        );
        let route = AStar.search(fx.start(), fx.grid.exits(), &fx.grid).unwrap();
        assert_eq!(route.len(), 4);
    }

    #[test]
    fn misleading_heuristic_still_optimal() {
        // The exit is right behind the wall; the only opening is far away.
        let fx = parse_grid(
            "
            A#E
            .#.
            .#.
            ...
            ",
        );
        let route = AStar.search(fx.start(), fx.grid.exits(), &fx.grid).unwrap();
        assert_eq!(route.len(), 8);
        assert_eq!(route.goal(), Some(Cell::new(2, 0)));
    }

    #[test]
    fn equal_f_ties_break_by_insertion_order() {
        // Both exits have f = 1. The upper one is pushed first.
        let fx = parse_grid(
            "
            E
            A
            E
            ",
        );
        let route = AStar.search(fx.start(), fx.grid.exits(), &fx.grid).unwrap();
        assert_eq!(route.steps(), &[Cell::new(0, 0)]);
    }

    #[test]
    fn no_exits_means_unreachable() {
        let grid = open_grid(3, 3, &[]);
        assert!(AStar.search(Cell::new(1, 1), grid.exits(), &grid).is_none());
    }
}
