//! Weighted street graph.

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::error::{Error, Result};

/// Dense node identifier in `0..node_count`.
pub type NodeId = usize;

/// Stable identifier of one street segment.
///
/// Parallel streets between the same pair of nodes keep distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

/// One street segment as stored in the graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Street {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    /// Expected travel time in minutes.
    pub minutes: f64,
}

/// City street graph with travel-time weights.
///
/// Edges are kept as an explicit list (petgraph `Graph` with `EdgeIndex`
/// ids), so parallel streets between the same nodes are representable.
/// Queries that need a single weight for a node pair use the **minimum**
/// weight among the parallel streets.
///
/// The graph is built once and then shared read-only; nothing in the
/// optimizer mutates it.
///
/// # Examples
///
/// ```
/// use u_transit::network::CityGraph;
///
/// let mut g = CityGraph::undirected(3);
/// g.add_edge(0, 1, 2.0).unwrap();
/// g.add_edge(1, 2, 4.0).unwrap();
/// g.add_edge(0, 1, 1.5).unwrap(); // parallel street
///
/// assert_eq!(g.edge_weight(1, 0), Some(1.5));
/// assert_eq!(g.edge_weight(0, 2), None);
/// assert_eq!(g.neighbors(1).unwrap(), vec![0, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct CityGraph {
    graph: DiGraph<(), f64>,
    directed: bool,
}

impl CityGraph {
    /// Creates a directed graph with `node_count` nodes and no edges.
    ///
    /// Neighbors follow outgoing edges only.
    pub fn directed(node_count: usize) -> Self {
        Self::with_nodes(node_count, true)
    }

    /// Creates an undirected graph with `node_count` nodes and no edges.
    pub fn undirected(node_count: usize) -> Self {
        Self::with_nodes(node_count, false)
    }

    fn with_nodes(node_count: usize, directed: bool) -> Self {
        let mut graph = DiGraph::with_capacity(node_count, node_count * 2);
        for _ in 0..node_count {
            graph.add_node(());
        }
        Self { graph, directed }
    }

    /// Adds a street from `source` to `target` taking `minutes` to traverse.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownNode`] if either endpoint is out of range,
    /// [`Error::InvalidEdge`] if the weight is negative or not finite.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId, minutes: f64) -> Result<EdgeId> {
        self.check_node(source)?;
        self.check_node(target)?;
        if !minutes.is_finite() || minutes < 0.0 {
            return Err(Error::InvalidEdge {
                source,
                target,
                weight: minutes,
            });
        }
        Ok(self.insert_edge(source, target, minutes))
    }

    /// Inserts an edge whose endpoints and weight are already known valid.
    pub(crate) fn insert_edge(&mut self, source: NodeId, target: NodeId, minutes: f64) -> EdgeId {
        debug_assert!(source < self.node_count() && target < self.node_count());
        debug_assert!(minutes.is_finite() && minutes >= 0.0);
        let idx = self
            .graph
            .add_edge(NodeIndex::new(source), NodeIndex::new(target), minutes);
        EdgeId(idx.index())
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of street segments, parallel streets counted separately.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether edge direction matters for [`neighbors`](Self::neighbors).
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Returns `true` if `node` is a valid identifier.
    pub fn contains(&self, node: NodeId) -> bool {
        node < self.node_count()
    }

    /// Returns `Ok(())` if `node` exists, [`Error::UnknownNode`] otherwise.
    pub fn check_node(&self, node: NodeId) -> Result<()> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(Error::UnknownNode {
                node,
                node_count: self.node_count(),
            })
        }
    }

    /// Nodes reachable from `node` in one hop, sorted and deduplicated.
    pub fn neighbors(&self, node: NodeId) -> Result<Vec<NodeId>> {
        self.check_node(node)?;
        let idx = NodeIndex::new(node);
        let mut out: Vec<NodeId> = if self.directed {
            self.graph
                .neighbors_directed(idx, Direction::Outgoing)
                .map(|n| n.index())
                .collect()
        } else {
            self.graph
                .neighbors_undirected(idx)
                .map(|n| n.index())
                .collect()
        };
        out.sort_unstable();
        out.dedup();
        Ok(out)
    }

    /// Travel time between `u` and `v`, looked up in either direction.
    ///
    /// Tries `u -> v` first, then `v -> u`. Among parallel streets the
    /// minimum weight wins. Returns `None` if no street joins the pair or
    /// either node is unknown.
    pub fn edge_weight(&self, u: NodeId, v: NodeId) -> Option<f64> {
        if !self.contains(u) || !self.contains(v) {
            return None;
        }
        self.min_weight(u, v).or_else(|| self.min_weight(v, u))
    }

    fn min_weight(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.graph
            .edges_connecting(NodeIndex::new(from), NodeIndex::new(to))
            .map(|e| *e.weight())
            .fold(None, |acc: Option<f64>, w| {
                Some(acc.map_or(w, |best| best.min(w)))
            })
    }

    /// Looks up a single street by id.
    pub fn edge(&self, id: EdgeId) -> Option<Street> {
        let idx = EdgeIndex::new(id.0);
        let (source, target) = self.graph.edge_endpoints(idx)?;
        let minutes = *self.graph.edge_weight(idx)?;
        Some(Street {
            id,
            source: source.index(),
            target: target.index(),
            minutes,
        })
    }

    /// Iterates over all streets in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = Street> + '_ {
        self.graph.edge_references().map(|e| Street {
            id: EdgeId(e.id().index()),
            source: e.source().index(),
            target: e.target().index(),
            minutes: *e.weight(),
        })
    }
}
