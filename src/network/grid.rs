//! Synthetic grid city.

use rand::Rng;

use super::graph::CityGraph;

/// Street travel times (minutes) a grid segment can take.
const TRAVEL_TIMES: [f64; 4] = [1.0, 2.0, 3.0, 5.0];

/// Builds a `side × side` undirected street grid.
///
/// Node `y * side + x` sits at column `x`, row `y`, and is joined to its
/// right and lower neighbors. Each street gets a travel time drawn
/// uniformly from {1, 2, 3, 5} minutes.
///
/// # Examples
///
/// ```
/// use u_transit::network::grid_city;
/// use u_transit::random::create_rng;
///
/// let g = grid_city(3, &mut create_rng(42));
/// assert_eq!(g.node_count(), 9);
/// assert_eq!(g.edge_count(), 12);
/// ```
pub fn grid_city<R: Rng>(side: usize, rng: &mut R) -> CityGraph {
    let mut graph = CityGraph::undirected(side * side);
    for y in 0..side {
        for x in 0..side {
            let node = y * side + x;
            if x + 1 < side {
                let w = TRAVEL_TIMES[rng.random_range(0..TRAVEL_TIMES.len())];
                graph.insert_edge(node, node + 1, w);
            }
            if y + 1 < side {
                let w = TRAVEL_TIMES[rng.random_range(0..TRAVEL_TIMES.len())];
                graph.insert_edge(node, node + side, w);
            }
        }
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_grid_topology() {
        let g = grid_city(4, &mut create_rng(7));
        assert_eq!(g.node_count(), 16);
        assert_eq!(g.edge_count(), 2 * 4 * 3);
        // corner, edge and interior degrees
        assert_eq!(g.neighbors(0).unwrap(), vec![1, 4]);
        assert_eq!(g.neighbors(1).unwrap(), vec![0, 2, 5]);
        assert_eq!(g.neighbors(5).unwrap(), vec![1, 4, 6, 9]);
    }

    #[test]
    fn test_grid_weights_from_table() {
        let g = grid_city(5, &mut create_rng(3));
        for street in g.edges() {
            assert!(TRAVEL_TIMES.contains(&street.minutes));
        }
    }

    #[test]
    fn test_empty_grid() {
        let g = grid_city(0, &mut create_rng(0));
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
    }
}
