//! Error types shared across the crate.

use std::fmt;

use crate::network::NodeId;

/// Errors raised while building a network or starting a run.
///
/// Evaluation never returns these to the engine: an [`Error::UnknownNode`]
/// met while scoring a genome is turned into a maximal cost penalty so that
/// sibling evaluations and the generation loop keep going.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A route, hotspot or demand entry references a node outside the graph.
    UnknownNode { node: NodeId, node_count: usize },
    /// A configuration parameter is out of range.
    InvalidConfig(String),
    /// An edge weight is negative or not finite.
    InvalidEdge {
        source: NodeId,
        target: NodeId,
        weight: f64,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownNode { node, node_count } => write!(
                f,
                "node {} does not exist (graph has {} nodes)",
                node, node_count
            ),
            Error::InvalidConfig(reason) => write!(f, "invalid configuration: {}", reason),
            Error::InvalidEdge {
                source,
                target,
                weight,
            } => write!(
                f,
                "edge {} -> {} has invalid weight {}",
                source, target, weight
            ),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
