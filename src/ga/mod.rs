//! Genetic Algorithm framework.
//!
//! A generic, domain-agnostic GA engine built on trait-based abstractions.
//! Users define their problem by implementing [`GaProblem`], which specifies
//! how to create, evaluate, crossover, and mutate individuals. The transit
//! optimizer in [`crate::transit`] is one such problem; nothing in this
//! module knows about routes or graphs.
//!
//! # Core Traits
//!
//! - [`Individual`]: A candidate solution with associated fitness type
//! - [`GaProblem`]: Problem definition — initialization, evaluation, operators
//! - [`Termination`]: Caller-supplied stopping rule, consulted every generation
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, selection, tendency)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`RunState`]: Per-run state (population, all-time best) seen by the stopping rule
//! - [`GaResult`]: Final optimization result
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
mod runner;
mod selection;
mod termination;
mod types;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner, RunState};
pub use selection::Selection;
pub use termination::{Both, CancelFlag, MaxGenerations, StagnationLimit, Termination, TimeLimit};
pub use types::{Fitness, GaProblem, Individual, Tendency};
