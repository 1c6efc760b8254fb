//! Origin–destination trip demand.

use std::collections::BTreeMap;

use rand::seq::index::sample;
use rand::Rng;

use super::graph::{CityGraph, NodeId};
use crate::error::Result;

/// Trip counts from hotspot origins to destinations.
///
/// Ordered maps keep iteration (and therefore floating-point summation in
/// the evaluator) deterministic. Self-trips and zero counts are never
/// stored.
///
/// # Examples
///
/// ```
/// use u_transit::network::DemandTable;
///
/// let mut demand = DemandTable::new();
/// demand.add_trips(0, 2, 10);
/// demand.add_trips(0, 0, 5); // ignored: self-trip
///
/// assert_eq!(demand.trips_from(0).collect::<Vec<_>>(), vec![(2, 10)]);
/// assert_eq!(demand.trips_from(3).count(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemandTable {
    trips: BTreeMap<NodeId, BTreeMap<NodeId, u32>>,
}

impl DemandTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` trips from `origin` to `destination`.
    ///
    /// Counts for the same pair accumulate. Returns `false` (and records
    /// nothing) for self-trips or a zero count.
    pub fn add_trips(&mut self, origin: NodeId, destination: NodeId, count: u32) -> bool {
        if origin == destination || count == 0 {
            return false;
        }
        let entry = self
            .trips
            .entry(origin)
            .or_default()
            .entry(destination)
            .or_insert(0);
        *entry = entry.saturating_add(count);
        true
    }

    /// Destinations and trip counts for one origin.
    ///
    /// Empty when the origin has no recorded demand.
    pub fn trips_from(&self, origin: NodeId) -> impl Iterator<Item = (NodeId, u32)> + '_ {
        self.trips
            .get(&origin)
            .into_iter()
            .flat_map(|dests| dests.iter().map(|(&d, &c)| (d, c)))
    }

    /// Total trips leaving `origin`.
    pub fn trips_total_from(&self, origin: NodeId) -> u64 {
        self.trips_from(origin).map(|(_, c)| c as u64).sum()
    }

    /// Origins with at least one recorded trip.
    pub fn origins(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.trips.keys().copied()
    }

    /// Total trips in the table.
    pub fn total_trips(&self) -> u64 {
        self.trips
            .values()
            .flat_map(|d| d.values())
            .map(|&c| c as u64)
            .sum()
    }

    /// Returns `true` if no trips are recorded.
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Checks that every origin and destination exists in `graph`.
    pub fn validate_against(&self, graph: &CityGraph) -> Result<()> {
        for (&origin, dests) in &self.trips {
            graph.check_node(origin)?;
            for &dest in dests.keys() {
                graph.check_node(dest)?;
            }
        }
        Ok(())
    }

    /// Builds a table from a dense demand matrix, keeping only hotspot rows.
    ///
    /// `matrix[i][j]` is the number of trips from `i` to `j`. Hotspots
    /// outside the matrix and diagonal entries are skipped.
    pub fn from_matrix(matrix: &[Vec<u32>], hotspots: &[NodeId]) -> Self {
        let mut table = Self::new();
        for &origin in hotspots {
            let Some(row) = matrix.get(origin) else {
                continue;
            };
            for (dest, &count) in row.iter().enumerate() {
                table.add_trips(origin, dest, count);
            }
        }
        table
    }

    /// Generates synthetic hotspot demand.
    ///
    /// Each hotspot sends trips to `targets_per_hotspot` distinct nodes
    /// (never itself). All targets of one hotspot receive the same count,
    /// drawn uniformly from `[10, 50)`.
    pub fn synthetic<R: Rng>(
        node_count: usize,
        hotspots: &[NodeId],
        targets_per_hotspot: usize,
        rng: &mut R,
    ) -> Self {
        let mut table = Self::new();
        if node_count < 2 {
            return table;
        }
        for &origin in hotspots {
            if origin >= node_count {
                continue;
            }
            let amount = targets_per_hotspot.min(node_count - 1);
            let count = rng.random_range(10..50u32);
            for idx in sample(rng, node_count - 1, amount).iter() {
                // skip over the origin itself
                let dest = if idx >= origin { idx + 1 } else { idx };
                table.add_trips(origin, dest, count);
            }
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_accumulates() {
        let mut d = DemandTable::new();
        assert!(d.add_trips(1, 2, 3));
        assert!(d.add_trips(1, 2, 4));
        assert_eq!(d.trips_from(1).collect::<Vec<_>>(), vec![(2, 7)]);
        assert_eq!(d.total_trips(), 7);
    }

    #[test]
    fn test_rejects_self_and_zero() {
        let mut d = DemandTable::new();
        assert!(!d.add_trips(1, 1, 3));
        assert!(!d.add_trips(1, 2, 0));
        assert!(d.is_empty());
    }

    #[test]
    fn test_from_matrix_keeps_hotspot_rows() {
        let matrix = vec![vec![5, 1, 0], vec![2, 0, 3], vec![9, 9, 9]];
        let d = DemandTable::from_matrix(&matrix, &[0, 1, 7]);
        assert_eq!(d.trips_from(0).collect::<Vec<_>>(), vec![(1, 1)]);
        assert_eq!(d.trips_from(1).collect::<Vec<_>>(), vec![(0, 2), (2, 3)]);
        assert_eq!(d.trips_from(2).count(), 0);
        assert_eq!(d.origins().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_synthetic_shape() {
        let mut rng = create_rng(42);
        let d = DemandTable::synthetic(20, &[3, 11], 5, &mut rng);
        for origin in [3, 11] {
            let trips: Vec<_> = d.trips_from(origin).collect();
            assert_eq!(trips.len(), 5);
            let count = trips[0].1;
            assert!((10..50).contains(&count));
            for (dest, c) in trips {
                assert_ne!(dest, origin);
                assert!(dest < 20);
                assert_eq!(c, count);
            }
        }
    }

    #[test]
    fn test_synthetic_caps_targets() {
        let mut rng = create_rng(1);
        let d = DemandTable::synthetic(4, &[0], 30, &mut rng);
        assert_eq!(
            d.trips_from(0).map(|(n, _)| n).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_validate_against_graph() {
        let g = CityGraph::undirected(3);
        let mut d = DemandTable::new();
        d.add_trips(0, 2, 1);
        assert!(d.validate_against(&g).is_ok());
        d.add_trips(0, 5, 1);
        assert!(d.validate_against(&g).is_err());
    }
}
