//! The grid model for Evac simulations.
//!
//! [`GridIndex`] records which cells of a `rows × cols` grid are walls,
//! exits or on fire. It is pure data: membership tests, bounds checks,
//! 4-connected neighbour enumeration and invariant-preserving mutators.
//! Agents are not part of the grid; see the engine's agent registry.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;

pub use error::GridError;
pub use grid::{CellKind, GridIndex, ORTHOGONAL};
