//! Graph-aware route set operators.
//!
//! All randomness comes from the generator passed in, so a seeded
//! generator reproduces the same routes.
//!
//! - [`random_walk_route`] / [`random_routes`]: creation by bounded random walk
//! - [`crossover_routes`]: single-cut splice over the route list
//! - [`mutate_routes`]: per-route extend, trim or regenerate

use std::ops::Range;

use rand::seq::IndexedRandom;
use rand::Rng;

use super::config::TransitConfig;
use super::route::Route;
use crate::network::{CityGraph, NodeId};

/// Builds a route by walking the street graph from a random start.
///
/// The start is drawn uniformly from `starts`, the target stop count
/// uniformly from `min_len..=max_len`. Each step moves to a uniformly
/// chosen neighbor; the walk ends early at a node without neighbors.
///
/// # Panics
///
/// Panics if `starts` is empty or `min_len > max_len`.
pub fn random_walk_route<R: Rng>(
    graph: &CityGraph,
    starts: Range<NodeId>,
    min_len: usize,
    max_len: usize,
    rng: &mut R,
) -> Route {
    let mut current = rng.random_range(starts);
    let target_len = rng.random_range(min_len..=max_len);

    let mut route = Route::new(Vec::with_capacity(target_len));
    route.push(current);
    while route.len() < target_len {
        let neighbors = graph.neighbors(current).unwrap_or_default();
        let Some(&next) = neighbors.choose(rng) else {
            break;
        };
        route.push(next);
        current = next;
    }
    route
}

/// Builds `config.route_count` random-walk routes.
pub fn random_routes<R: Rng>(graph: &CityGraph, config: &TransitConfig, rng: &mut R) -> Vec<Route> {
    (0..config.route_count)
        .map(|_| new_route(graph, config, rng))
        .collect()
}

fn new_route<R: Rng>(graph: &CityGraph, config: &TransitConfig, rng: &mut R) -> Route {
    random_walk_route(
        graph,
        config.start_range(graph),
        config.min_route_length,
        config.max_route_length,
        rng,
    )
}

/// Recombines two route lists at a single cut.
///
/// With probability `probability`, picks a cut in `1..len` and swaps the
/// route tails; otherwise (or when the lists cannot be cut) returns
/// copies. Routes are never split.
pub fn crossover_routes<R: Rng>(
    a: &[Route],
    b: &[Route],
    probability: f64,
    rng: &mut R,
) -> (Vec<Route>, Vec<Route>) {
    if !rng.random_bool(probability) || a.len() != b.len() || a.len() < 2 {
        return (a.to_vec(), b.to_vec());
    }

    let cut = rng.random_range(1..a.len());
    let mut c1 = a[..cut].to_vec();
    c1.extend_from_slice(&b[cut..]);
    let mut c2 = b[..cut].to_vec();
    c2.extend_from_slice(&a[cut..]);
    (c1, c2)
}

/// Structural change applied to a single route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationAction {
    /// Append a random neighbor of the last stop.
    Extend,
    /// Drop the last stop.
    Trim,
    /// Replace the route with a fresh random walk.
    Regenerate,
}

impl MutationAction {
    const ALL: [MutationAction; 3] = [
        MutationAction::Extend,
        MutationAction::Trim,
        MutationAction::Regenerate,
    ];

    /// Draws one action uniformly.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Applies `action` to `route`, returning whether the route changed.
///
/// Extend is refused at `max_route_length` or when the last stop has no
/// neighbors; trim is refused on routes of two stops or fewer.
pub fn apply_mutation<R: Rng>(
    route: &mut Route,
    action: MutationAction,
    graph: &CityGraph,
    config: &TransitConfig,
    rng: &mut R,
) -> bool {
    match action {
        MutationAction::Extend => {
            if route.len() >= config.max_route_length {
                return false;
            }
            let Some(last) = route.last() else {
                return false;
            };
            let neighbors = graph.neighbors(last).unwrap_or_default();
            match neighbors.choose(rng) {
                Some(&next) => {
                    route.push(next);
                    true
                }
                None => false,
            }
        }
        MutationAction::Trim => {
            if route.len() <= 2 {
                return false;
            }
            route.pop();
            true
        }
        MutationAction::Regenerate => {
            *route = new_route(graph, config, rng);
            true
        }
    }
}

/// Mutates each route independently with `config.mutation_probability`.
///
/// Returns the number of routes that changed. The route count never
/// changes.
pub fn mutate_routes<R: Rng>(
    routes: &mut [Route],
    graph: &CityGraph,
    config: &TransitConfig,
    rng: &mut R,
) -> usize {
    let mut changed = 0;
    for route in routes.iter_mut() {
        if rng.random_bool(config.mutation_probability) {
            let action = MutationAction::random(rng);
            if apply_mutation(route, action, graph, config, rng) {
                changed += 1;
            }
        }
    }
    changed
}
