//! Degree distribution summaries.

use std::collections::BTreeMap;

use crate::graph::{Graph, NodeLabel};

/// Tallies how many nodes carry each observed degree.
///
/// Bins with a zero count are omitted; keys iterate in ascending degree
/// order. The counts always sum to the node count.
///
/// # Examples
///
/// ```
/// use sociogram::distribution;
/// use sociogram::edge::Edge;
/// use sociogram::graph::Graph;
///
/// let graph = Graph::build(
///     ["a", "b", "c"],
///     [Edge::new("a", "b"), Edge::new("b", "c")],
/// )
/// .unwrap();
///
/// let histogram = distribution::degree_histogram(&graph);
/// assert_eq!(histogram[&1], 2);
/// assert_eq!(histogram[&2], 1);
/// ```
pub fn degree_histogram<T: NodeLabel>(graph: &Graph<T>) -> BTreeMap<usize, usize> {
    let mut histogram = BTreeMap::new();

    for neighbors in graph.adjacency() {
        *histogram.entry(neighbors.len()).or_insert(0) += 1;
    }

    histogram
}
