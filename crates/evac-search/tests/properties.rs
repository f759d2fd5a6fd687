//! Cross-strategy properties checked over randomly generated mazes.

use evac_core::{Cell, CellSet};
use evac_grid::GridIndex;
use evac_search::{StrategyKind, COMPARISON_ORDER};
use evac_test_utils::{open_grid, parse_grid, render};
use proptest::prelude::*;

/// A random maze: dimensions, a wall mask, a start and a single exit.
#[derive(Clone, Debug)]
struct Maze {
    grid: GridIndex,
    start: Cell,
}

fn arb_maze() -> impl Strategy<Value = Maze> {
    (1u32..9, 1u32..9).prop_flat_map(|(rows, cols)| {
        let n = (rows * cols) as usize;
        (
            Just(rows),
            Just(cols),
            prop::collection::vec(prop::bool::weighted(0.3), n),
            0..n,
            0..n,
        )
            .prop_map(|(rows, cols, walls, start, exit)| {
                let mut grid = GridIndex::new(rows, cols).unwrap();
                for (i, &is_wall) in walls.iter().enumerate() {
                    if is_wall && i != start && i != exit {
                        grid.add_wall(grid.cell_at(i));
                    }
                }
                let exit_cell = grid.cell_at(exit);
                grid.add_exit(exit_cell);
                let start = grid.cell_at(start);
                Maze { grid, start }
            })
    })
}

proptest! {
    #[test]
    fn shortest_path_strategies_agree_on_length(maze in arb_maze()) {
        let goals = maze.grid.exits().clone();
        let lengths: Vec<Option<usize>> = [
            StrategyKind::BreadthFirst,
            StrategyKind::UniformCost,
            StrategyKind::AStar,
        ]
        .into_iter()
        .map(|k| k.search(maze.start, &goals, &maze.grid).map(|r| r.len()))
        .collect();
        prop_assert_eq!(lengths[0], lengths[1], "\n{}", render(&maze.grid, &[]));
        prop_assert_eq!(lengths[1], lengths[2], "\n{}", render(&maze.grid, &[]));
    }

    #[test]
    fn depth_first_agrees_on_reachability(maze in arb_maze()) {
        let goals = maze.grid.exits().clone();
        let bfs = StrategyKind::BreadthFirst.search(maze.start, &goals, &maze.grid);
        let dfs = StrategyKind::DepthFirst.search(maze.start, &goals, &maze.grid);
        prop_assert_eq!(bfs.is_some(), dfs.is_some());
        if let (Some(bfs), Some(dfs)) = (bfs, dfs) {
            prop_assert!(dfs.len() >= bfs.len());
        }
    }

    #[test]
    fn every_route_is_a_legal_walk_to_a_goal(maze in arb_maze()) {
        let goals = maze.grid.exits().clone();
        for kind in COMPARISON_ORDER {
            let Some(route) = kind.search(maze.start, &goals, &maze.grid) else {
                continue;
            };
            prop_assert!(route.is_contiguous_from(maze.start), "{kind}: {:?}", route);
            prop_assert!(route.iter().all(|&c| maze.grid.in_bounds(c) && !maze.grid.is_wall(c)));
            match route.goal() {
                Some(goal) => prop_assert!(goals.contains(&goal)),
                None => prop_assert!(goals.contains(&maze.start)),
            }
            // Goals are only ever the final step.
            let interior = &route.steps()[..route.len().saturating_sub(1)];
            prop_assert!(interior.iter().all(|c| !goals.contains(c)));
        }
    }

    #[test]
    fn straight_corridor_length_is_manhattan(len in 1i32..30) {
        let mut picture = String::from("A");
        picture.push_str(&".".repeat((len - 1) as usize));
        picture.push('E');
        let fx = parse_grid(&picture);
        for kind in COMPARISON_ORDER {
            let route = kind.search(fx.start(), fx.grid.exits(), &fx.grid).unwrap();
            prop_assert_eq!(route.len(), len as usize, "{}", kind);
        }
    }

    #[test]
    fn clear_straight_line_gives_manhattan_for_shortest_strategies(
        maze in arb_maze(),
    ) {
        // Clear the row between start and a fresh exit on the same row.
        let mut grid = maze.grid.clone();
        grid.clear_exits();
        let row = maze.start.y;
        let far_x = if maze.start.x == 0 { grid.cols() as i32 - 1 } else { 0 };
        let (lo, hi) = (maze.start.x.min(far_x), maze.start.x.max(far_x));
        for x in lo..=hi {
            grid.remove_wall(Cell::new(x, row));
        }
        let exit = Cell::new(far_x, row);
        grid.add_exit(exit);
        let goals: CellSet = grid.exits().clone();
        for kind in COMPARISON_ORDER {
            let route = kind.search(maze.start, &goals, &grid).unwrap();
            if kind.is_shortest_path() {
                prop_assert_eq!(route.len() as u32, maze.start.manhattan(exit), "{}", kind);
            } else {
                prop_assert!(route.len() as u32 >= maze.start.manhattan(exit));
            }
        }
    }
}

#[test]
fn walled_in_start_is_unreachable_for_all_strategies() {
    let fx = parse_grid(
        "
        .....
        ..#..
        .#A#.
        ..#..
        E....
        ",
    );
    for kind in COMPARISON_ORDER {
        assert!(
            kind.search(fx.start(), fx.grid.exits(), &fx.grid).is_none(),
            "{kind} found a route out of a sealed cell"
        );
    }
}

#[test]
fn sealed_exit_is_unreachable_for_all_strategies() {
    let fx = parse_grid(
        "
        A....
        ...#.
        ..#E#
        ...#.
        ",
    );
    for kind in COMPARISON_ORDER {
        assert!(kind.search(fx.start(), fx.grid.exits(), &fx.grid).is_none());
    }
}

#[test]
fn five_by_five_reference_route() {
    let grid = open_grid(5, 5, &[Cell::new(4, 4)]);
    for kind in [
        StrategyKind::AStar,
        StrategyKind::BreadthFirst,
        StrategyKind::UniformCost,
    ] {
        let route = kind.search(Cell::new(0, 0), grid.exits(), &grid).unwrap();
        assert_eq!(route.len(), 8, "{kind}");
    }
}

#[test]
fn routes_may_cross_fire() {
    // Planning is hazard-agnostic: the only way out runs through fire, and
    // every strategy still takes it.
    let fx = parse_grid(
        "
        #####
        A.F.E
        #####
        ",
    );
    for kind in COMPARISON_ORDER {
        let route = kind.search(fx.start(), fx.grid.exits(), &fx.grid).unwrap();
        assert!(route.iter().any(|&c| fx.grid.is_hazard(c)), "{kind}");
    }
}
