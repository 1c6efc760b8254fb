//! Genetic-algorithm design of bus route networks.
//!
//! Given a street graph with travel times, commuter demand out of a set of
//! hotspots and a fixed number of bus routes to run, searches for the
//! route set that best trades operator cost (street minutes the buses
//! cover) against user cost (commuter travel time over the bus network).
//!
//! - [`network`]: city graph, demand table, synthetic grid cities
//! - [`evaluation`]: cost model and route set scoring
//! - [`transit`]: route genomes, their operators, and the optimization problem
//! - [`ga`]: generic evolutionary engine with pluggable selection and
//!   caller-supplied termination
//!
//! # Architecture
//!
//! The engine in [`ga`] knows nothing about routes or graphs; the transit
//! layer implements [`ga::GaProblem`] for it. Graph and demand are
//! immutable during a run and shared by reference across the rayon
//! workers that score each generation.
//!
//! Logging goes through the `log` facade. The crate installs no logger.

pub mod error;
pub mod evaluation;
pub mod ga;
pub mod network;
pub mod random;
pub mod transit;

pub use error::{Error, Result};
