//! Hazard spread for Evac simulations.
//!
//! The hazard is a binary dilation of the burning cell-set by one
//! 4-connected ring per tick, with walls and exits acting as firebreaks.
//! See [`HazardSpread`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod spread;

pub use spread::HazardSpread;
