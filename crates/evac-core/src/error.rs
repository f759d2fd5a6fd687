//! Error types shared across the Evac crates.
//!
//! None of these are fatal. Each describes a request the engine refused
//! while leaving all state exactly as it was. An unreachable goal is not
//! an error at all: searches return `None` and the run-starter checks for
//! at least one usable route.

use std::error::Error;
use std::fmt;

use crate::{AgentId, Cell};

/// Why an agent could not be placed on (or moved to) a cell.
///
/// Produced by the agent registry's placement predicate and never
/// escalated past it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlacementError {
    /// The cell lies outside the grid.
    OutOfBounds {
        /// The rejected cell.
        cell: Cell,
    },
    /// The cell is a wall.
    Wall {
        /// The rejected cell.
        cell: Cell,
    },
    /// The cell is currently on fire.
    Hazard {
        /// The rejected cell.
        cell: Cell,
    },
    /// Another non-terminal agent already stands on the cell.
    Occupied {
        /// The rejected cell.
        cell: Cell,
        /// The agent occupying it.
        by: AgentId,
    },
    /// No agent with this ID exists in the registry.
    UnknownAgent {
        /// The requested ID.
        id: AgentId,
    },
    /// The agent has escaped or died and can no longer move.
    Terminal {
        /// The agent concerned.
        id: AgentId,
    },
    /// Random placement found no cell free of walls, exits and hazard.
    NoFreeCell,
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { cell } => write!(f, "cell {cell} is out of bounds"),
            Self::Wall { cell } => write!(f, "cell {cell} is a wall"),
            Self::Hazard { cell } => write!(f, "cell {cell} is on fire"),
            Self::Occupied { cell, by } => write!(f, "cell {cell} is occupied by agent {by}"),
            Self::UnknownAgent { id } => write!(f, "no agent with id {id}"),
            Self::Terminal { id } => write!(f, "agent {id} has already escaped or died"),
            Self::NoFreeCell => write!(f, "no free cell available for placement"),
        }
    }
}

impl Error for PlacementError {}

/// Why a run could not be started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunError {
    /// The grid has no exit cells; no search was executed.
    NoExit,
    /// Every strategy returned an empty route for every agent.
    NoRoute,
    /// A run is already in progress.
    AlreadyRunning,
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoExit => write!(f, "grid has no exit cells"),
            Self::NoRoute => write!(f, "no route found for any agent"),
            Self::AlreadyRunning => write!(f, "a run is already in progress"),
        }
    }
}

impl Error for RunError {}
