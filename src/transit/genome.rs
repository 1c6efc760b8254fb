//! Route set individual.

use crate::evaluation::{CostBreakdown, Evaluation};
use crate::ga::{Fitness, Individual, Tendency};

use super::route::Route;

/// One candidate bus network: a fixed-size list of routes.
///
/// Fitness and cost breakdown are unset until the set has been evaluated,
/// and are cleared again whenever its routes change.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSet {
    routes: Vec<Route>,
    fitness: Option<f64>,
    breakdown: Option<CostBreakdown>,
}

impl RouteSet {
    /// Creates an unevaluated route set.
    pub fn new(routes: Vec<Route>) -> Self {
        Self {
            routes,
            fitness: None,
            breakdown: None,
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub(crate) fn routes_mut(&mut self) -> &mut [Route] {
        self.clear_evaluation();
        &mut self.routes
    }

    pub fn into_routes(self) -> Vec<Route> {
        self.routes
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Fitness if evaluated.
    pub fn evaluated_fitness(&self) -> Option<f64> {
        self.fitness
    }

    /// Cost breakdown if evaluated.
    pub fn breakdown(&self) -> Option<CostBreakdown> {
        self.breakdown
    }

    pub(crate) fn record(&mut self, evaluation: &Evaluation) {
        self.fitness = Some(evaluation.fitness);
        self.breakdown = Some(evaluation.breakdown);
    }

    fn clear_evaluation(&mut self) {
        self.fitness = None;
        self.breakdown = None;
    }
}

impl From<Vec<Route>> for RouteSet {
    fn from(routes: Vec<Route>) -> Self {
        Self::new(routes)
    }
}

impl Individual for RouteSet {
    type Fitness = f64;

    /// Unevaluated sets report the worst maximized score.
    fn fitness(&self) -> f64 {
        self.fitness.unwrap_or_else(|| f64::worst(Tendency::Maximize))
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
        self.breakdown = None;
    }
}
