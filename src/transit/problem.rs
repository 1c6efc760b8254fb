//! GA problem definition for bus route network design.
//!
//! Implements [`GaProblem`] over [`RouteSet`] genomes: random-walk creation,
//! single-cut route-list crossover, per-route extend/trim/regenerate
//! mutation, and scoring by [`FitnessEvaluator`]. Fitness is maximized.

use rand::Rng;

use crate::error::{Error, Result};
use crate::evaluation::{Evaluation, FitnessEvaluator};
use crate::ga::{GaProblem, GaResult, GaRunner, Individual, MaxGenerations, RunState, Termination};
use crate::network::{CityGraph, DemandTable, NodeId};

use super::config::TransitConfig;
use super::genome::RouteSet;
use super::operators::{crossover_routes, mutate_routes, random_routes};
use super::route::Route;

/// Route network design over one city.
///
/// Owns the street graph, the commuter demand and the hotspot list, all
/// read-only for the lifetime of the problem, so individuals can be scored
/// concurrently without locking.
///
/// # Examples
///
/// ```
/// use u_transit::network::{CityGraph, DemandTable};
/// use u_transit::transit::{TransitConfig, TransitProblem};
///
/// let mut graph = CityGraph::undirected(4);
/// graph.add_edge(0, 1, 1.0).unwrap();
/// graph.add_edge(1, 2, 1.0).unwrap();
/// graph.add_edge(2, 3, 1.0).unwrap();
///
/// let mut demand = DemandTable::new();
/// demand.add_trips(0, 3, 10);
///
/// let config = TransitConfig::fast()
///     .with_route_count(2)
///     .with_route_length(2, 4)
///     .with_max_generations(5)
///     .with_seed(42);
/// let problem = TransitProblem::new(graph, demand, vec![0], config).unwrap();
/// let result = problem.optimize().unwrap();
/// assert_eq!(result.best.len(), 2);
/// assert!(result.best_fitness > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct TransitProblem {
    graph: CityGraph,
    demand: DemandTable,
    hotspots: Vec<NodeId>,
    config: TransitConfig,
    evaluator: FitnessEvaluator,
}

impl TransitProblem {
    /// Creates a problem, validating every input against the graph.
    ///
    /// Duplicate hotspots are dropped, keeping first occurrence order.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidConfig`] if the configuration is out of range, or
    ///   demand originates at a node that is not a hotspot
    /// - [`Error::UnknownNode`] if a hotspot, demand endpoint or the gene
    ///   range lies outside the graph
    pub fn new(
        graph: CityGraph,
        demand: DemandTable,
        hotspots: Vec<NodeId>,
        config: TransitConfig,
    ) -> Result<Self> {
        config.validate_for(&graph)?;
        demand.validate_against(&graph)?;

        let mut unique: Vec<NodeId> = Vec::with_capacity(hotspots.len());
        for hotspot in hotspots {
            graph.check_node(hotspot)?;
            if !unique.contains(&hotspot) {
                unique.push(hotspot);
            }
        }
        if let Some(origin) = demand.origins().find(|o| !unique.contains(o)) {
            return Err(Error::InvalidConfig(format!(
                "demand originates at node {origin}, which is not a hotspot"
            )));
        }

        log::info!(
            "transit problem: {} nodes, {} streets, {} hotspots, {} trips",
            graph.node_count(),
            graph.edge_count(),
            unique.len(),
            demand.total_trips()
        );

        let evaluator = FitnessEvaluator::new(config.costs.clone());
        Ok(Self {
            graph,
            demand,
            hotspots: unique,
            config,
            evaluator,
        })
    }

    pub fn graph(&self) -> &CityGraph {
        &self.graph
    }

    pub fn demand(&self) -> &DemandTable {
        &self.demand
    }

    pub fn hotspots(&self) -> &[NodeId] {
        &self.hotspots
    }

    pub fn config(&self) -> &TransitConfig {
        &self.config
    }

    /// Scores an arbitrary route list against this city.
    pub fn evaluate_routes(&self, routes: &[Route]) -> Evaluation {
        self.evaluator
            .evaluate(routes, &self.graph, &self.demand, &self.hotspots)
    }

    /// Runs for the configured number of generations.
    pub fn optimize(&self) -> Result<GaResult<RouteSet>> {
        self.optimize_until(MaxGenerations(self.config.max_generations))
    }

    /// Runs until `termination` says stop.
    ///
    /// `config.max_generations` is not applied; combine the rule with
    /// [`MaxGenerations`] to keep a cap.
    pub fn optimize_until<T>(&self, termination: T) -> Result<GaResult<RouteSet>>
    where
        T: Termination<RouteSet>,
    {
        GaRunner::run(self, &self.config.ga_config(), termination)
    }

    /// Runs for the configured number of generations, handing a
    /// [`GenerationReport`] to `report` after the initial population and
    /// after every bred generation.
    pub fn optimize_with_report<F>(&self, mut report: F) -> Result<GaResult<RouteSet>>
    where
        F: FnMut(&GenerationReport<'_>),
    {
        let max_generations = self.config.max_generations;
        self.optimize_until(|state: &RunState<RouteSet>| {
            report(&GenerationReport::from_state(state));
            state.generation() < max_generations
        })
    }
}

impl GaProblem for TransitProblem {
    type Individual = RouteSet;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> RouteSet {
        RouteSet::new(random_routes(&self.graph, &self.config, rng))
    }

    fn evaluate(&self, individual: &RouteSet) -> f64 {
        self.evaluate_routes(individual.routes()).fitness
    }

    fn assign_fitness(&self, individual: &mut RouteSet) {
        let evaluation = self.evaluate_routes(individual.routes());
        individual.record(&evaluation);
    }

    fn crossover<R: Rng>(&self, parent1: &RouteSet, parent2: &RouteSet, rng: &mut R) -> Vec<RouteSet> {
        let (c1, c2) = crossover_routes(
            parent1.routes(),
            parent2.routes(),
            self.config.crossover_probability,
            rng,
        );
        vec![RouteSet::new(c1), RouteSet::new(c2)]
    }

    fn mutate<R: Rng>(&self, individual: &mut RouteSet, rng: &mut R) {
        mutate_routes(individual.routes_mut(), &self.graph, &self.config, rng);
    }
}

/// Progress of a run after one generation.
#[derive(Debug, Clone, Copy)]
pub struct GenerationReport<'a> {
    /// 0 for the initial population.
    pub generation: usize,
    /// Best route set of this generation.
    pub generation_best: &'a RouteSet,
    /// Best route set seen so far.
    pub best: &'a RouteSet,
}

impl<'a> GenerationReport<'a> {
    fn from_state(state: &'a RunState<RouteSet>) -> Self {
        Self {
            generation: state.generation(),
            generation_best: state.generation_best(),
            best: state.best(),
        }
    }

    /// Fitness of the all-time best.
    pub fn best_fitness(&self) -> f64 {
        self.best.fitness()
    }
}
