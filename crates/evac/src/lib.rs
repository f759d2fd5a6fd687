//! Evac: a grid fire-evacuation simulator.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Evac sub-crates. For most users, adding `evac` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use evac::prelude::*;
//!
//! let config = SimConfig {
//!     rows: 5,
//!     cols: 5,
//!     agent_count: 0,
//!     placement: PlacementMode::Manual,
//!     mode: RunMode::Single(StrategyKind::BreadthFirst),
//!     ..SimConfig::default()
//! };
//! let mut world = EvacWorld::new(config).unwrap();
//! world.grid_mut().add_exit(Cell::new(4, 4));
//! let id = world.spawn_agent(Cell::new(0, 0)).unwrap();
//!
//! world.start_run().unwrap();
//! let summary = world.run_to_completion().unwrap();
//!
//! assert_eq!(summary.ticks, 8);
//! assert_eq!(summary.survivors, 1);
//! assert_eq!(world.agents().get(id).unwrap().status, AgentStatus::Escaped);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `evac-core` | Cells, IDs, agent status, shared errors |
//! | [`grid`] | `evac-grid` | Wall/exit/hazard cell index |
//! | [`search`] | `evac-search` | Search strategies and routes |
//! | [`hazard`] | `evac-hazard` | Fire spread |
//! | [`engine`] | `evac-engine` | Agents, planning, scheduling, worlds |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, IDs, and shared errors (`evac-core`).
pub use evac_core as types;

/// The wall/exit/hazard cell index (`evac-grid`).
///
/// [`grid::GridIndex`] keeps the three cell-sets disjoint; every mutator
/// reports whether it changed anything.
pub use evac_grid as grid;

/// Path search (`evac-search`).
///
/// The [`search::SearchStrategy`] trait, its four implementations, and the
/// [`search::StrategyKind`] dispatch tag.
pub use evac_search as search;

/// Fire spread (`evac-hazard`).
pub use evac_hazard as hazard;

/// Run orchestration (`evac-engine`).
///
/// [`engine::EvacWorld`] for stepping by hand or by virtual clock,
/// [`engine::RealtimeRun`] for wall-clock playback on a background thread.
pub use evac_engine as engine;

/// Common imports for typical Evac usage.
///
/// ```rust
/// use evac::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use evac_core::{AgentId, AgentStatus, Cell, CellSet, TickId};

    // Errors
    pub use evac_core::{PlacementError, RunError};
    pub use evac_engine::ConfigError;
    pub use evac_grid::GridError;

    // Grid and search
    pub use evac_grid::{CellKind, GridIndex};
    pub use evac_search::{Route, SearchStrategy, StrategyKind, COMPARISON_ORDER};

    // Hazard
    pub use evac_hazard::HazardSpread;

    // Engine
    pub use evac_engine::{
        Agent, AgentRegistry, EvacWorld, LifecycleRecord, PlacementMode, RealtimeRun, RunEvent,
        RunMode, RunState, RunSummary, SimConfig, TickReport, TieBreak,
    };
}
