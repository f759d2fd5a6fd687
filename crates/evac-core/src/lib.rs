//! Core types for the Evac evacuation simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental vocabulary shared by every other Evac crate: cell
//! coordinates, agent and tick identifiers, agent lifecycle status, and
//! the error enums that cross crate boundaries.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod error;
pub mod id;
pub mod status;

pub use cell::{Cell, CellSet};
pub use error::{PlacementError, RunError};
pub use id::{AgentId, TickId};
pub use status::AgentStatus;
