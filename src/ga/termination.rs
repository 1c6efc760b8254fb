//! Stopping rules for the evolutionary loop.
//!
//! The runner has no stopping rule of its own. Before breeding each new
//! generation it asks a [`Termination`] whether to continue, handing it the
//! full [`RunState`]. Any `FnMut(&RunState<I>) -> bool` closure qualifies,
//! which lets callers interleave progress reporting with the loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::runner::RunState;
use super::types::Individual;

/// Decides whether the run goes on for another generation.
pub trait Termination<I: Individual> {
    /// Returns `true` to breed the next generation, `false` to stop.
    fn should_continue(&mut self, state: &RunState<I>) -> bool;
}

impl<I, F> Termination<I> for F
where
    I: Individual,
    F: FnMut(&RunState<I>) -> bool,
{
    fn should_continue(&mut self, state: &RunState<I>) -> bool {
        self(state)
    }
}

/// Stops once `n` generations have been bred.
#[derive(Debug, Clone, Copy)]
pub struct MaxGenerations(pub usize);

impl<I: Individual> Termination<I> for MaxGenerations {
    fn should_continue(&mut self, state: &RunState<I>) -> bool {
        state.generation() < self.0
    }
}

/// Stops after `n` consecutive generations without a new all-time best.
#[derive(Debug, Clone, Copy)]
pub struct StagnationLimit(pub usize);

impl<I: Individual> Termination<I> for StagnationLimit {
    fn should_continue(&mut self, state: &RunState<I>) -> bool {
        state.generations_since_improvement() < self.0
    }
}

/// Stops once a wall-clock budget is spent.
///
/// The clock starts at the first check, i.e. right after the initial
/// population has been scored. The check happens between generations, so
/// a run may exceed the limit by one generation's worth of work.
#[derive(Debug, Clone)]
pub struct TimeLimit {
    limit: Duration,
    started: Option<Instant>,
}

impl TimeLimit {
    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            started: None,
        }
    }
}

impl<I: Individual> Termination<I> for TimeLimit {
    fn should_continue(&mut self, _state: &RunState<I>) -> bool {
        let started = *self.started.get_or_insert_with(Instant::now);
        started.elapsed() < self.limit
    }
}

/// Stops when a shared flag is raised, e.g. from another thread.
#[derive(Debug, Clone)]
pub struct CancelFlag(pub Arc<AtomicBool>);

impl<I: Individual> Termination<I> for CancelFlag {
    fn should_continue(&mut self, _state: &RunState<I>) -> bool {
        !self.0.load(Ordering::Relaxed)
    }
}

/// Continues only while both rules continue.
///
/// ```
/// use u_transit::ga::{Both, MaxGenerations, StagnationLimit};
///
/// let rule = Both(MaxGenerations(500), StagnationLimit(50));
/// ```
#[derive(Debug, Clone)]
pub struct Both<A, B>(pub A, pub B);

impl<I, A, B> Termination<I> for Both<A, B>
where
    I: Individual,
    A: Termination<I>,
    B: Termination<I>,
{
    fn should_continue(&mut self, state: &RunState<I>) -> bool {
        // evaluate both so stateful rules see every generation
        let a = self.0.should_continue(state);
        let b = self.1.should_continue(state);
        a && b
    }
}
