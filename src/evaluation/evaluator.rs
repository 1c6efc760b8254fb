//! Operator and commuter cost of a route set.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use petgraph::algo::dijkstra;
use petgraph::graphmap::UnGraphMap;

use super::cost::{CostModel, EdgeCharging};
use crate::error::Result;
use crate::network::{CityGraph, DemandTable, NodeId};
use crate::transit::Route;

/// The two cost terms of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostBreakdown {
    /// Cost of running buses over the covered streets.
    pub operator_cost: f64,
    /// Commuter travel time plus unserved-trip penalties.
    pub user_cost: f64,
}

impl CostBreakdown {
    /// Breakdown of a genome that could not be scored.
    pub fn penalized() -> Self {
        Self {
            operator_cost: f64::INFINITY,
            user_cost: f64::INFINITY,
        }
    }
}

/// Result of scoring one route set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Higher is better.
    pub fitness: f64,
    pub total_cost: f64,
    pub breakdown: CostBreakdown,
}

impl Evaluation {
    /// Maximal penalty: infinite cost, zero fitness.
    pub fn penalized() -> Self {
        Self {
            fitness: 0.0,
            total_cost: f64::INFINITY,
            breakdown: CostBreakdown::penalized(),
        }
    }
}

/// Street network served by a route set, with bus-discounted weights.
///
/// Built fresh for every evaluation; it owns its edges and never refers
/// back to the city graph.
#[derive(Debug, Clone, Default)]
pub struct TransitSubgraph {
    graph: UnGraphMap<NodeId, f64>,
}

impl TransitSubgraph {
    /// Returns `true` if any served street touches `node`.
    pub fn contains(&self, node: NodeId) -> bool {
        self.graph.contains_node(node)
    }

    /// Number of served streets.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Discounted travel time of a served street.
    pub fn edge_weight(&self, u: NodeId, v: NodeId) -> Option<f64> {
        self.graph.edge_weight(u, v).copied()
    }

    /// Shortest discounted travel time from `source` to every reachable node.
    pub fn distances_from(&self, source: NodeId) -> HashMap<NodeId, f64> {
        if !self.contains(source) {
            return HashMap::new();
        }
        dijkstra(&self.graph, source, None, |(_, _, w)| *w)
    }
}

/// Scores route sets against a city graph and hotspot demand.
///
/// Evaluation is a pure function of its inputs: the same routes against
/// the same graph and demand always give the same result.
///
/// # Examples
///
/// ```
/// use u_transit::evaluation::{CostModel, FitnessEvaluator};
/// use u_transit::network::{CityGraph, DemandTable};
/// use u_transit::transit::Route;
///
/// let mut g = CityGraph::undirected(3);
/// g.add_edge(0, 1, 1.0).unwrap();
/// g.add_edge(1, 2, 1.0).unwrap();
/// let mut demand = DemandTable::new();
/// demand.add_trips(0, 2, 10);
///
/// let evaluator = FitnessEvaluator::new(CostModel::default().with_bus_speed_multiplier(0.5));
/// let eval = evaluator.evaluate(&[Route::from(vec![0, 1, 2])], &g, &demand, &[0]);
/// assert_eq!(eval.breakdown.operator_cost, 1.0);
/// assert_eq!(eval.breakdown.user_cost, 10.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FitnessEvaluator {
    costs: CostModel,
}

impl FitnessEvaluator {
    pub fn new(costs: CostModel) -> Self {
        Self { costs }
    }

    pub fn costs(&self) -> &CostModel {
        &self.costs
    }

    /// Scores a route set. Never fails.
    ///
    /// A route set referencing an unknown node is maximally penalized
    /// (see [`Evaluation::penalized`]).
    pub fn evaluate(
        &self,
        routes: &[Route],
        graph: &CityGraph,
        demand: &DemandTable,
        hotspots: &[NodeId],
    ) -> Evaluation {
        match self.try_evaluate(routes, graph, demand, hotspots) {
            Ok(eval) => eval,
            Err(err) => {
                log::warn!("penalizing route set: {err}");
                Evaluation::penalized()
            }
        }
    }

    /// Scores a route set, reporting unknown nodes as errors.
    pub fn try_evaluate(
        &self,
        routes: &[Route],
        graph: &CityGraph,
        demand: &DemandTable,
        hotspots: &[NodeId],
    ) -> Result<Evaluation> {
        for route in routes {
            for &stop in route.stops() {
                graph.check_node(stop)?;
            }
        }
        for &hotspot in hotspots {
            graph.check_node(hotspot)?;
        }

        let (operator_cost, transit) = self.operator_cost(routes, graph);
        let user_cost = self.user_cost(&transit, demand, hotspots);

        let total_cost = self.costs.total_cost(operator_cost, user_cost);
        Ok(Evaluation {
            fitness: self.costs.fitness(total_cost),
            total_cost,
            breakdown: CostBreakdown {
                operator_cost,
                user_cost,
            },
        })
    }

    /// Operator cost of the route set, plus the transit subgraph it covers.
    ///
    /// Streets are keyed by their sorted endpoint pair; the weight is read
    /// in the direction the street is first traversed. Hops without a
    /// street cost the teleport penalty and add nothing to the subgraph.
    pub fn operator_cost(&self, routes: &[Route], graph: &CityGraph) -> (f64, TransitSubgraph) {
        let m = self.costs.bus_speed_multiplier;
        // sorted key -> street weight, None for a teleport
        let mut covered: BTreeMap<(NodeId, NodeId), Option<f64>> = BTreeMap::new();
        let mut cost = 0.0;

        for route in routes {
            let mut seen_in_route = BTreeSet::new();
            for (u, v) in route.hops() {
                let key = (u.min(v), u.max(v));
                let first_in_genome = !covered.contains_key(&key);
                let weight = *covered
                    .entry(key)
                    .or_insert_with(|| graph.edge_weight(u, v));

                let charge = match self.costs.edge_charging {
                    EdgeCharging::Once => first_in_genome,
                    EdgeCharging::PerRoute => seen_in_route.insert(key),
                };
                if charge {
                    cost += match weight {
                        Some(w) => w * m * self.costs.operator_cost_per_minute,
                        None => self.costs.teleport_penalty,
                    };
                }
            }
        }

        let mut transit = TransitSubgraph::default();
        for (&(u, v), weight) in &covered {
            if let Some(w) = weight {
                transit.graph.add_edge(u, v, w * m);
            }
        }
        (cost, transit)
    }

    /// Commuter cost of the hotspot demand over a transit subgraph.
    ///
    /// Every demanded trip contributes either `count * distance` or
    /// `count * unserved_penalty`; nothing is dropped. Hotspots form a set:
    /// a repeated hotspot is counted once.
    pub fn user_cost(
        &self,
        transit: &TransitSubgraph,
        demand: &DemandTable,
        hotspots: &[NodeId],
    ) -> f64 {
        let penalty = self.costs.unserved_penalty;
        let mut cost = 0.0;
        let mut seen = BTreeSet::new();

        for &hotspot in hotspots {
            if !seen.insert(hotspot) {
                continue;
            }
            if !transit.contains(hotspot) {
                cost += demand.trips_total_from(hotspot) as f64 * penalty;
                continue;
            }
            let distances = transit.distances_from(hotspot);
            for (dest, count) in demand.trips_from(hotspot) {
                let per_trip = distances.get(&dest).copied().unwrap_or(penalty);
                cost += count as f64 * per_trip;
            }
        }
        cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn cycle4() -> CityGraph {
        let mut g = CityGraph::undirected(4);
        for (u, v) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
            g.add_edge(u, v, 1.0).unwrap();
        }
        g
    }

    fn half_speed() -> CostModel {
        CostModel::default().with_bus_speed_multiplier(0.5)
    }

    fn routes(list: &[&[NodeId]]) -> Vec<Route> {
        list.iter().map(|r| Route::from(r.to_vec())).collect()
    }

    #[test]
    fn test_cycle_scenario() {
        let g = cycle4();
        let mut demand = DemandTable::new();
        demand.add_trips(0, 2, 10);
        let eval = FitnessEvaluator::new(half_speed()).evaluate(
            &routes(&[&[0, 1, 2]]),
            &g,
            &demand,
            &[0],
        );

        // two streets at 1 min * 0.5 * 1.0
        assert_eq!(eval.breakdown.operator_cost, 1.0);
        // 0 -> 2 over two discounted streets = 1.0 min, 10 trips
        assert_eq!(eval.breakdown.user_cost, 10.0);
        assert_eq!(eval.total_cost, 1.0 * 10.0 + 10.0 * 1.0);
        assert_eq!(eval.fitness, 1e9 / 20.0);
    }

    #[test]
    fn test_shared_edge_charged_once() {
        let g = cycle4();
        let e = FitnessEvaluator::new(half_speed());
        let (single, _) = e.operator_cost(&routes(&[&[0, 1]]), &g);
        let (shared, transit) = e.operator_cost(&routes(&[&[0, 1], &[1, 0], &[0, 1, 0]]), &g);
        assert_eq!(single, 0.5);
        assert_eq!(shared, 0.5);
        assert_eq!(transit.edge_count(), 1);
    }

    #[test]
    fn test_per_route_charging() {
        let g = cycle4();
        let e = FitnessEvaluator::new(half_speed().with_edge_charging(EdgeCharging::PerRoute));
        let (cost, _) = e.operator_cost(&routes(&[&[0, 1, 0], &[1, 0], &[2, 3]]), &g);
        // (0,1) once per route that uses it: 2 * 0.5, plus (2,3): 0.5
        assert_eq!(cost, 1.5);
    }

    #[test]
    fn test_teleport_penalty_once() {
        let g = cycle4();
        let e = FitnessEvaluator::new(half_speed().with_teleport_penalty(50.0));
        let (cost, transit) = e.operator_cost(&routes(&[&[0, 2], &[2, 0]]), &g);
        assert_eq!(cost, 50.0);
        assert_eq!(transit.edge_count(), 0);
    }

    #[test]
    fn test_subgraph_discounted() {
        let mut g = CityGraph::directed(3);
        g.add_edge(1, 0, 4.0).unwrap();
        g.add_edge(1, 2, 2.0).unwrap();
        let e = FitnessEvaluator::new(half_speed());
        let (cost, transit) = e.operator_cost(&routes(&[&[0, 1, 2]]), &g);
        assert_eq!(cost, 3.0);
        assert_eq!(transit.edge_weight(0, 1), Some(2.0));
        assert_eq!(transit.edge_weight(2, 1), Some(1.0));
        assert_eq!(g.edge_weight(0, 1), Some(4.0));
    }

    #[test]
    fn test_unreachable_destination_penalized() {
        let g = cycle4();
        let mut demand = DemandTable::new();
        demand.add_trips(0, 1, 2);
        demand.add_trips(0, 3, 5);
        let e = FitnessEvaluator::new(half_speed().with_unserved_penalty(100.0));
        let eval = e.evaluate(&routes(&[&[0, 1]]), &g, &demand, &[0]);
        assert_eq!(eval.breakdown.user_cost, 2.0 * 0.5 + 5.0 * 100.0);
    }

    #[test]
    fn test_hotspot_off_network_penalized() {
        let g = cycle4();
        let mut demand = DemandTable::new();
        demand.add_trips(3, 1, 4);
        let e = FitnessEvaluator::new(half_speed().with_unserved_penalty(100.0));
        let eval = e.evaluate(&routes(&[&[0, 1]]), &g, &demand, &[3]);
        assert_eq!(eval.breakdown.user_cost, 400.0);
    }

    #[test]
    fn test_hotspot_without_demand_costs_nothing() {
        let g = cycle4();
        let demand = DemandTable::new();
        let e = FitnessEvaluator::new(half_speed());
        let eval = e.evaluate(&routes(&[&[0, 1]]), &g, &demand, &[0, 3]);
        assert_eq!(eval.breakdown.user_cost, 0.0);
    }

    #[test]
    fn test_repeated_hotspot_counted_once() {
        let mut g = CityGraph::undirected(3);
        g.add_edge(0, 1, 1.0).unwrap();
        g.add_edge(1, 2, 1.0).unwrap();
        let mut demand = DemandTable::new();
        demand.add_trips(0, 2, 10);
        let e = FitnessEvaluator::new(half_speed());
        let genome = routes(&[&[0, 1, 2]]);

        let single = e.evaluate(&genome, &g, &demand, &[0]);
        let repeated = e.evaluate(&genome, &g, &demand, &[0, 0, 0]);
        assert_eq!(single.breakdown.user_cost, 10.0);
        assert_eq!(repeated, single);

        // off the network too
        let off = e.evaluate(&routes(&[&[1, 2]]), &g, &demand, &[0, 0]);
        assert_eq!(off.breakdown.user_cost, 10.0 * 1000.0);
    }

    #[test]
    fn test_degenerate_genome() {
        let g = cycle4();
        let mut demand = DemandTable::new();
        demand.add_trips(0, 2, 3);
        let e = FitnessEvaluator::new(half_speed().with_unserved_penalty(10.0));
        let eval = e.evaluate(&routes(&[&[1], &[]]), &g, &demand, &[0]);
        assert_eq!(eval.breakdown.operator_cost, 0.0);
        assert_eq!(eval.breakdown.user_cost, 30.0);
    }

    #[test]
    fn test_zero_cost_is_best_fitness() {
        let g = cycle4();
        let e = FitnessEvaluator::new(half_speed());
        let eval = e.evaluate(&[], &g, &DemandTable::new(), &[]);
        assert_eq!(eval.total_cost, 0.0);
        assert_eq!(eval.fitness, crate::evaluation::BEST_FITNESS);
    }

    #[test]
    fn test_unknown_node_penalized() {
        let g = cycle4();
        let e = FitnessEvaluator::new(half_speed());
        let bad = routes(&[&[0, 1, 17]]);
        assert_eq!(
            e.try_evaluate(&bad, &g, &DemandTable::new(), &[0]),
            Err(Error::UnknownNode {
                node: 17,
                node_count: 4
            })
        );
        let eval = e.evaluate(&bad, &g, &DemandTable::new(), &[0]);
        assert_eq!(eval, Evaluation::penalized());
        assert!(e
            .try_evaluate(&routes(&[&[0, 1]]), &g, &DemandTable::new(), &[9])
            .is_err());
    }

    #[test]
    fn test_idempotent() {
        let g = cycle4();
        let mut demand = DemandTable::new();
        demand.add_trips(0, 2, 7);
        demand.add_trips(1, 3, 2);
        let e = FitnessEvaluator::default();
        let r = routes(&[&[0, 1, 2, 3], &[3, 0], &[1, 3]]);
        let a = e.evaluate(&r, &g, &demand, &[0, 1]);
        let b = e.evaluate(&r, &g, &demand, &[0, 1]);
        assert_eq!(a, b);
    }
}
