//! City graph and trip demand.
//!
//! The network is loaded once per run and shared read-only by every
//! evaluation and operator.
//!
//! - [`CityGraph`]: street graph with travel-time weights and parallel edges
//! - [`DemandTable`]: hotspot origin → destination trip counts
//! - [`grid_city`]: synthetic grid street network

mod demand;
mod graph;
mod grid;

pub use demand::DemandTable;
pub use graph::{CityGraph, EdgeId, NodeId, Street};
pub use grid::grid_city;
