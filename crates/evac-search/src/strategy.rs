//! The [`SearchStrategy`] trait and the [`StrategyKind`] dispatch table.

use std::fmt;
use std::str::FromStr;

use evac_core::{Cell, CellSet};
use evac_grid::GridIndex;

use crate::astar::AStar;
use crate::breadth_first::BreadthFirst;
use crate::depth_first::DepthFirst;
use crate::route::Route;
use crate::uniform_cost::UniformCost;

/// A graph-search strategy over the walkable cells of a grid.
///
/// # Contract
///
/// - Neighbours are the 4-connected, in-bounds, non-wall cells
///   ([`GridIndex::passable_neighbours`]). Hazard cells are *not* filtered.
/// - The search returns as soon as a cell in `goals` is expanded (removed
///   from the frontier), not after exhausting the frontier.
/// - A cell is never expanded twice, so the search terminates on any
///   finite grid.
/// - `None` means no goal is reachable. `Some` with an empty route means
///   `start` is itself a goal.
/// - Strategies never mutate shared state.
///
/// # Object safety
///
/// This trait is object-safe; [`StrategyKind::strategy`] hands out
/// `&'static dyn SearchStrategy`.
pub trait SearchStrategy: Send + Sync {
    /// The tag identifying this strategy.
    fn kind(&self) -> StrategyKind;

    /// Find a route from `start` to any cell in `goals`.
    fn search(&self, start: Cell, goals: &CellSet, grid: &GridIndex) -> Option<Route>;
}

/// Tag selecting one of the four built-in strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StrategyKind {
    /// A* with a nearest-goal Manhattan heuristic.
    AStar,
    /// Level-order (FIFO) expansion.
    BreadthFirst,
    /// Dijkstra's algorithm on unit edge costs.
    UniformCost,
    /// Stack-based (LIFO) expansion. Finds *a* route, not the shortest.
    DepthFirst,
}

/// Order in which comparison mode runs the strategies. The first entry
/// drives agent movement.
pub const COMPARISON_ORDER: [StrategyKind; 4] = [
    StrategyKind::AStar,
    StrategyKind::BreadthFirst,
    StrategyKind::UniformCost,
    StrategyKind::DepthFirst,
];

static ASTAR: AStar = AStar;
static BREADTH_FIRST: BreadthFirst = BreadthFirst;
static UNIFORM_COST: UniformCost = UniformCost;
static DEPTH_FIRST: DepthFirst = DepthFirst;

impl StrategyKind {
    /// The strategy implementation for this tag.
    ///
    /// ```
    /// use evac_search::StrategyKind;
    ///
    /// for kind in evac_search::COMPARISON_ORDER {
    ///     assert_eq!(kind.strategy().kind(), kind);
    /// }
    /// ```
    pub fn strategy(self) -> &'static dyn SearchStrategy {
        match self {
            Self::AStar => &ASTAR,
            Self::BreadthFirst => &BREADTH_FIRST,
            Self::UniformCost => &UNIFORM_COST,
            Self::DepthFirst => &DEPTH_FIRST,
        }
    }

    /// Short stable label: `astar`, `bfs`, `dijkstra` or `dfs`.
    pub fn label(self) -> &'static str {
        match self {
            Self::AStar => "astar",
            Self::BreadthFirst => "bfs",
            Self::UniformCost => "dijkstra",
            Self::DepthFirst => "dfs",
        }
    }

    /// Whether the strategy guarantees a shortest route on unit costs.
    pub fn is_shortest_path(self) -> bool {
        !matches!(self, Self::DepthFirst)
    }

    /// Shorthand for `self.strategy().search(start, goals, grid)`.
    pub fn search(self, start: Cell, goals: &CellSet, grid: &GridIndex) -> Option<Route> {
        self.strategy().search(start, goals, grid)
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned by [`StrategyKind::from_str`] for an unrecognised label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseStrategyError {
    /// The label that failed to parse.
    pub label: String,
}

impl fmt::Display for ParseStrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown strategy '{}' (expected astar, bfs, dijkstra or dfs)",
            self.label
        )
    }
}

impl std::error::Error for ParseStrategyError {}

impl FromStr for StrategyKind {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "astar" | "a*" => Ok(Self::AStar),
            "bfs" => Ok(Self::BreadthFirst),
            "dijkstra" | "ucs" => Ok(Self::UniformCost),
            "dfs" => Ok(Self::DepthFirst),
            _ => Err(ParseStrategyError {
                label: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_from_str() {
        for kind in COMPARISON_ORDER {
            assert_eq!(kind.label().parse::<StrategyKind>().unwrap(), kind);
            assert_eq!(kind.to_string(), kind.label());
        }
    }

    #[test]
    fn from_str_accepts_aliases_and_case() {
        assert_eq!("A*".parse::<StrategyKind>().unwrap(), StrategyKind::AStar);
        assert_eq!(" BFS ".parse::<StrategyKind>().unwrap(), StrategyKind::BreadthFirst);
        assert_eq!("ucs".parse::<StrategyKind>().unwrap(), StrategyKind::UniformCost);
    }

    #[test]
    fn from_str_rejects_unknown() {
        let err = "greedy".parse::<StrategyKind>().unwrap_err();
        assert_eq!(err.label, "greedy");
        assert!(err.to_string().contains("greedy"));
    }

    #[test]
    fn dispatch_table_matches_tags() {
        for kind in COMPARISON_ORDER {
            assert_eq!(kind.strategy().kind(), kind);
        }
    }

    #[test]
    fn only_depth_first_is_not_shortest() {
        let non_shortest: Vec<_> = COMPARISON_ORDER
            .into_iter()
            .filter(|k| !k.is_shortest_path())
            .collect();
        assert_eq!(non_shortest, vec![StrategyKind::DepthFirst]);
    }
}
