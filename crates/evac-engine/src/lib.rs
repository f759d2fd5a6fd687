//! Run orchestration for Evac simulations.
//!
//! Provides [`AgentRegistry`] for agent placement, [`RoutePlan`] for the
//! one-shot route computation at run start, [`SimulationScheduler`] for
//! tick-by-tick playback, and [`EvacWorld`] which ties them together with
//! the hazard timer behind a [`CooperativeClock`]. [`RealtimeRun`] drives
//! a world in wall-clock time on a background thread.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod agents;
pub mod clock;
pub mod config;
pub mod plan;
pub mod realtime;
pub mod scheduler;
pub mod world;

pub use agents::{Agent, AgentRegistry, PlacementMode, MANUAL_PROBE_BUDGET};
pub use clock::{ClockEvent, CooperativeClock, TieBreak, TimerKind};
pub use config::{ConfigError, SimConfig};
pub use plan::{RoutePlan, RunMode, TraceMap};
pub use realtime::{RealtimeError, RealtimeRun, DEFAULT_EVENT_CAPACITY};
pub use scheduler::{LifecycleRecord, RunState, RunSummary, SimulationScheduler, TickReport};
pub use world::{EvacWorld, RunEvent};
