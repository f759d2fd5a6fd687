//! One-shot route computation at run start.
//!
//! A [`RoutePlan`] holds one route per agent for every strategy in the
//! run. Only the driving strategy's routes move agents. The rest feed the
//! [`TraceMap`] overlay.

use std::fmt;

use indexmap::IndexMap;

use evac_core::{AgentId, Cell, RunError};
use evac_grid::GridIndex;
use evac_search::{Route, StrategyKind, COMPARISON_ORDER};

use crate::agents::AgentRegistry;

/// For every cell on any computed route, the first strategy (in run
/// order) whose route touched it.
pub type TraceMap = IndexMap<Cell, StrategyKind>;

/// Which strategies a run computes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
    /// One strategy computes and drives.
    Single(StrategyKind),
    /// Every strategy in [`COMPARISON_ORDER`] computes; the first drives.
    Compare,
}

impl Default for RunMode {
    fn default() -> Self {
        Self::Single(StrategyKind::AStar)
    }
}

impl RunMode {
    /// Strategies computed by this mode, driver first.
    pub fn strategies(self) -> Vec<StrategyKind> {
        match self {
            Self::Single(kind) => vec![kind],
            Self::Compare => COMPARISON_ORDER.to_vec(),
        }
    }

    /// The strategy whose routes move agents.
    pub fn driver(self) -> StrategyKind {
        match self {
            Self::Single(kind) => kind,
            Self::Compare => COMPARISON_ORDER[0],
        }
    }

    /// Report label: the strategy's label, or `"comparison"`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Single(kind) => kind.label(),
            Self::Compare => "comparison",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Routes for every non-terminal agent under every strategy of a run.
///
/// Unreachable agents hold an empty route and never move.
#[derive(Clone, Debug)]
pub struct RoutePlan {
    mode: RunMode,
    routes: IndexMap<StrategyKind, IndexMap<AgentId, Route>>,
    max_len: usize,
    trace: TraceMap,
}

impl RoutePlan {
    /// Search from every non-terminal agent's position to the current
    /// exits.
    ///
    /// # Errors
    ///
    /// - [`RunError::NoExit`] if the grid has no exits. No search runs.
    /// - [`RunError::NoRoute`] if every route of every strategy is empty.
    pub fn compute(
        mode: RunMode,
        agents: &AgentRegistry,
        grid: &GridIndex,
    ) -> Result<Self, RunError> {
        if grid.exits().is_empty() {
            return Err(RunError::NoExit);
        }

        let mut routes = IndexMap::new();
        for kind in mode.strategies() {
            let per_agent: IndexMap<AgentId, Route> = agents
                .iter()
                .filter(|a| !a.is_terminal())
                .map(|a| {
                    let route = kind
                        .search(a.position, grid.exits(), grid)
                        .unwrap_or_else(Route::empty);
                    (a.id, route)
                })
                .collect();
            routes.insert(kind, per_agent);
        }

        let max_len = routes
            .values()
            .flat_map(|per_agent| per_agent.values())
            .map(Route::len)
            .max()
            .unwrap_or(0);
        if max_len == 0 {
            return Err(RunError::NoRoute);
        }

        let mut trace = TraceMap::new();
        for (&kind, per_agent) in &routes {
            for &cell in per_agent.values().flat_map(Route::iter) {
                trace.entry(cell).or_insert(kind);
            }
        }

        Ok(Self {
            mode,
            routes,
            max_len,
            trace,
        })
    }

    /// The mode this plan was computed for.
    pub fn mode(&self) -> RunMode {
        self.mode
    }

    /// Report label for this run.
    pub fn label(&self) -> &'static str {
        self.mode.label()
    }

    /// Routes that move agents.
    pub fn driver_routes(&self) -> &IndexMap<AgentId, Route> {
        // compute() always inserts the driver first.
        &self.routes[0]
    }

    /// Routes computed by `kind`, if it took part in this run.
    pub fn routes_for(&self, kind: StrategyKind) -> Option<&IndexMap<AgentId, Route>> {
        self.routes.get(&kind)
    }

    /// Length of the longest route across all strategies. The run lasts
    /// exactly this many ticks.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// The trace annotation.
    pub fn trace(&self) -> &TraceMap {
        &self.trace
    }
}
