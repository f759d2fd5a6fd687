//! Simulation configuration, validation, and error types.
//!
//! [`SimConfig`] is the builder-input for an [`EvacWorld`](crate::EvacWorld).
//! Every field is settable while no run is in progress and inert while
//! one is.

use std::error::Error;
use std::fmt;
use std::time::Duration;

use evac_core::PlacementError;
use evac_grid::GridError;

use crate::agents::PlacementMode;
use crate::clock::TieBreak;
use crate::plan::RunMode;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected by [`SimConfig::validate()`] or while applying a
/// configuration to a world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Rows or columns is zero.
    EmptyGrid,
    /// Grid construction failed.
    Grid(GridError),
    /// A timer period is zero.
    InvalidPeriod {
        /// Which period.
        name: &'static str,
    },
    /// Manual placement asked for more agents than the grid has cells.
    TooManyAgents {
        /// Requested agent count.
        requested: usize,
        /// Cells on the grid.
        capacity: usize,
    },
    /// Agents could not be placed.
    Placement(PlacementError),
    /// A run is in progress; configuration is inert until it ends.
    RunInProgress,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid has zero rows or columns"),
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::InvalidPeriod { name } => write!(f, "{name} must be non-zero"),
            Self::TooManyAgents {
                requested,
                capacity,
            } => write!(
                f,
                "{requested} agents requested but the grid has only {capacity} cells"
            ),
            Self::Placement(e) => write!(f, "placement: {e}"),
            Self::RunInProgress => write!(f, "cannot reconfigure while a run is in progress"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Placement(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<PlacementError> for ConfigError {
    fn from(e: PlacementError) -> Self {
        Self::Placement(e)
    }
}

// ── SimConfig ──────────────────────────────────────────────────────

/// Everything needed to build and run an [`EvacWorld`](crate::EvacWorld).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Grid rows. Default: 20.
    pub rows: u32,
    /// Grid columns. Default: 20.
    pub cols: u32,
    /// Simulation (agent step) timer period. Default: 100 ms.
    pub tick_period: Duration,
    /// Hazard spread timer period. Default: 1500 ms.
    pub hazard_period: Duration,
    /// Number of agents. Default: 10.
    pub agent_count: usize,
    /// How new agents are placed. Default: random.
    pub placement: PlacementMode,
    /// Strategy selection. Default: A* alone.
    pub mode: RunMode,
    /// Order of simultaneous timer firings. Default: hazard first.
    pub tie_break: TieBreak,
    /// Seed for random placement. Default: 0.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 20,
            tick_period: Duration::from_millis(100),
            hazard_period: Duration::from_millis(1500),
            agent_count: 10,
            placement: PlacementMode::Random,
            mode: RunMode::default(),
            tie_break: TieBreak::default(),
            seed: 0,
        }
    }
}

impl SimConfig {
    /// Check structural invariants.
    ///
    /// # Errors
    ///
    /// The first violated invariant, checked in field order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.tick_period.is_zero() {
            return Err(ConfigError::InvalidPeriod {
                name: "tick_period",
            });
        }
        if self.hazard_period.is_zero() {
            return Err(ConfigError::InvalidPeriod {
                name: "hazard_period",
            });
        }
        // Random placement may stack agents; manual placement gives each
        // agent its own cell while cells last.
        let capacity = (self.rows as usize).saturating_mul(self.cols as usize);
        if self.placement == PlacementMode::Manual && self.agent_count > capacity {
            return Err(ConfigError::TooManyAgents {
                requested: self.agent_count,
                capacity,
            });
        }
        Ok(())
    }
}
