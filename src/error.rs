//! Error kinds surfaced to the presentation collaborator.

use thiserror::Error;

/// Failures the graph store and the analyses can report.
///
/// Every analysis not covered by one of these kinds is total over any
/// well-formed graph, including the empty and the single-node graph, and
/// returns empty or zero results instead of erroring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Construction rejected the input data: an edge referenced an undeclared
    /// node, a self-loop was present, a node was declared twice, or an
    /// adjacency matrix had the wrong shape. Rejecting surfaces upstream data
    /// errors instead of silently repairing them.
    #[error("malformed graph: {0}")]
    MalformedGraph(String),

    /// A query referenced a node absent from the current graph. Distinct from
    /// a "no path" outcome so callers can tell bad input from disconnection.
    #[error("unknown node `{0}`")]
    UnknownNode(String),

    /// The requested measure is undefined on a disconnected graph.
    #[error("graph is not connected, the requested measure is undefined")]
    DisconnectedGraph,

    /// The requested measure is undefined on a graph without edges.
    #[error("graph has no edges, the requested measure is undefined")]
    EmptyGraph,
}
