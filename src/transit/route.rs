//! Bus route representation.

use crate::network::NodeId;

/// Ordered stops of one bus line.
///
/// Consecutive stops need not share a street; such hops are charged a
/// teleport penalty by the evaluator rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    stops: Vec<NodeId>,
}

impl Route {
    /// Creates a route visiting `stops` in order.
    pub fn new(stops: Vec<NodeId>) -> Self {
        Self { stops }
    }

    /// The stops in visiting order.
    pub fn stops(&self) -> &[NodeId] {
        &self.stops
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if the route has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Last stop, if any.
    pub fn last(&self) -> Option<NodeId> {
        self.stops.last().copied()
    }

    /// Consecutive stop pairs `(from, to)`.
    ///
    /// Empty for routes with fewer than two stops.
    pub fn hops(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.stops.windows(2).map(|w| (w[0], w[1]))
    }

    pub(crate) fn push(&mut self, node: NodeId) {
        self.stops.push(node);
    }

    pub(crate) fn pop(&mut self) -> Option<NodeId> {
        self.stops.pop()
    }
}

impl From<Vec<NodeId>> for Route {
    fn from(stops: Vec<NodeId>) -> Self {
        Self::new(stops)
    }
}
