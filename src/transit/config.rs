//! Transit optimization configuration.

use std::ops::Range;

use crate::error::{Error, Result};
use crate::evaluation::CostModel;
use crate::ga::{GaConfig, Selection, Tendency};
use crate::network::{CityGraph, NodeId};

/// Parameters of one route network optimization run.
///
/// Immutable once the run starts. [`validate`](Self::validate) rejects
/// out-of-range values before any generation is bred.
///
/// # Builder Pattern
///
/// ```
/// use u_transit::transit::TransitConfig;
///
/// let config = TransitConfig::default()
///     .with_route_count(4)
///     .with_route_length(3, 12)
///     .with_population_size(30)
///     .with_max_generations(40)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitConfig {
    /// Nodes a new route may start from. `None` allows every node.
    pub gene_range: Option<Range<NodeId>>,

    /// Routes per genome, constant for the whole run.
    pub route_count: usize,

    /// Fewest stops a freshly built route aims for.
    pub min_route_length: usize,

    /// Most stops a route may have.
    pub max_route_length: usize,

    /// Individuals per generation.
    pub population_size: usize,

    /// Generations bred after the initial population.
    pub max_generations: usize,

    /// Per-route probability of mutation.
    pub mutation_probability: f64,

    /// Probability that a parent pair is recombined rather than copied.
    pub crossover_probability: f64,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Whether to evaluate individuals in parallel.
    pub parallel: bool,

    /// Random seed; `None` draws one from entropy.
    pub seed: Option<u64>,

    /// Cost function constants.
    pub costs: CostModel,
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            gene_range: None,
            route_count: 10,
            min_route_length: 5,
            max_route_length: 150,
            population_size: 20,
            max_generations: 50,
            mutation_probability: 0.4,
            crossover_probability: 0.7,
            selection: Selection::Tournament(3),
            parallel: true,
            seed: None,
            costs: CostModel::default(),
        }
    }
}

impl TransitConfig {
    /// Restricts route start nodes to `range`.
    pub fn with_gene_range(mut self, range: Range<NodeId>) -> Self {
        self.gene_range = Some(range);
        self
    }

    pub fn with_route_count(mut self, n: usize) -> Self {
        self.route_count = n;
        self
    }

    /// Sets the stop-count bounds of random-walk routes.
    pub fn with_route_length(mut self, min: usize, max: usize) -> Self {
        self.min_route_length = min;
        self.max_route_length = max;
        self
    }

    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p;
        self
    }

    pub fn with_crossover_probability(mut self, p: f64) -> Self {
        self.crossover_probability = p;
        self
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_costs(mut self, costs: CostModel) -> Self {
        self.costs = costs;
        self
    }

    /// Preset for quick feasibility checks: few short routes, small population.
    ///
    /// - Routes: 4 of 3–20 stops, Population: 16, Generations: 25
    pub fn fast() -> Self {
        Self {
            route_count: 4,
            min_route_length: 3,
            max_route_length: 20,
            population_size: 16,
            max_generations: 25,
            ..Self::default()
        }
    }

    /// Preset matching the reference city setup.
    ///
    /// - Routes: 10 of 5–150 stops, Population: 20, Generations: 50
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Preset for longer searches on large street graphs.
    ///
    /// - Routes: 10 of 5–300 stops, Population: 60, Generations: 200
    pub fn quality() -> Self {
        Self {
            max_route_length: 300,
            population_size: 60,
            max_generations: 200,
            ..Self::default()
        }
    }

    /// Engine configuration for this run: fitness is maximized.
    pub fn ga_config(&self) -> GaConfig {
        let config = GaConfig::default()
            .with_population_size(self.population_size)
            .with_selection(self.selection)
            .with_tendency(Tendency::Maximize)
            .with_parallel(self.parallel);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }

    /// Validates the parameters on their own.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(invalid("population_size must be at least 1"));
        }
        if self.route_count == 0 {
            return Err(invalid("route_count must be at least 1"));
        }
        if self.max_generations == 0 {
            return Err(invalid("max_generations must be at least 1"));
        }
        if self.min_route_length == 0 {
            return Err(invalid("min_route_length must be at least 1"));
        }
        if self.max_route_length < self.min_route_length {
            return Err(invalid("max_route_length must not be below min_route_length"));
        }
        for (name, p) in [
            ("mutation_probability", self.mutation_probability),
            ("crossover_probability", self.crossover_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be in [0, 1], got {p}"
                )));
            }
        }
        if let Some(range) = &self.gene_range {
            if range.is_empty() {
                return Err(invalid("gene_range must not be empty"));
            }
        }
        self.ga_config().validate()?;
        self.costs.validate()
    }

    /// Validates the parameters against the graph they will run on.
    pub fn validate_for(&self, graph: &CityGraph) -> Result<()> {
        self.validate()?;
        if graph.node_count() == 0 {
            return Err(invalid("graph has no nodes"));
        }
        if let Some(range) = &self.gene_range {
            if range.end > graph.node_count() {
                return Err(Error::UnknownNode {
                    node: range.end - 1,
                    node_count: graph.node_count(),
                });
            }
        }
        Ok(())
    }

    /// Start-node range on `graph`.
    pub(crate) fn start_range(&self, graph: &CityGraph) -> Range<NodeId> {
        self.gene_range
            .clone()
            .unwrap_or(0..graph.node_count())
    }
}

fn invalid(reason: &str) -> Error {
    Error::InvalidConfig(reason.into())
}
