//! Path-search strategies over an Evac grid.
//!
//! Every strategy implements [`SearchStrategy`]: given a start cell, a set
//! of goal cells and the current [`GridIndex`](evac_grid::GridIndex), it
//! returns the [`Route`] to the first goal it *expands*, or `None` when the
//! frontier empties first. Neighbour generation is shared: 4-connected,
//! in-bounds, non-wall. Hazard cells are traversable during planning.
//!
//! | Strategy | Frontier | Shortest? |
//! |---|---|---|
//! | [`BreadthFirst`] | FIFO queue | yes |
//! | [`DepthFirst`] | LIFO stack | **no** |
//! | [`UniformCost`] | min-heap on `g`, ties by insertion order | yes |
//! | [`AStar`] | min-heap on `g + h`, ties by insertion order | yes |
//!
//! Strategies are selected at run time through [`StrategyKind`], whose
//! [`strategy()`](StrategyKind::strategy) method is the dispatch table.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod astar;
pub mod breadth_first;
pub mod depth_first;
mod parents;
pub mod route;
pub mod strategy;
pub mod uniform_cost;

pub use astar::{nearest_goal_distance, AStar};
pub use breadth_first::BreadthFirst;
pub use depth_first::DepthFirst;
pub use route::Route;
pub use strategy::{ParseStrategyError, SearchStrategy, StrategyKind, COMPARISON_ORDER};
pub use uniform_cost::UniformCost;
