//! Bus route network design.
//!
//! A genome is a [`RouteSet`]: a fixed number of [`Route`]s, each an
//! ordered walk of stops over the city's street graph. [`TransitProblem`]
//! plugs route sets into the generic engine in [`crate::ga`].
//!
//! # Operators
//!
//! - **Create**: bounded random walk from a random start node
//! - **Crossover**: single cut over the route list; routes stay whole
//! - **Mutation**: per route, extend, trim or regenerate
//!
//! # Example
//!
//! ```
//! use u_transit::network::{grid_city, DemandTable};
//! use u_transit::random::create_rng;
//! use u_transit::transit::{TransitConfig, TransitProblem};
//!
//! let mut rng = create_rng(42);
//! let graph = grid_city(5, &mut rng);
//! let hotspots = vec![0, 12, 24];
//! let demand = DemandTable::synthetic(graph.node_count(), &hotspots, 4, &mut rng);
//!
//! let config = TransitConfig::fast().with_max_generations(10).with_seed(42);
//! let problem = TransitProblem::new(graph, demand, hotspots, config).unwrap();
//!
//! let result = problem
//!     .optimize_with_report(|report| {
//!         println!("generation {}: best {:.1}", report.generation, report.best_fitness());
//!     })
//!     .unwrap();
//! assert_eq!(result.best.len(), 4);
//! ```

mod config;
mod genome;
mod operators;
mod problem;
mod route;

pub use config::TransitConfig;
pub use genome::RouteSet;
pub use operators::{
    apply_mutation, crossover_routes, mutate_routes, random_routes, random_walk_route,
    MutationAction,
};
pub use problem::{GenerationReport, TransitProblem};
pub use route::Route;
