//! Centrality measures: degree, betweenness, closeness, eigenvector, and the
//! local clustering coefficient.

use std::collections::{HashMap, VecDeque};

use nalgebra::SymmetricEigen;
use tracing::debug;

use crate::{
    graph::{Graph, GraphIndex, NodeLabel},
    traversal,
};

/// Returns the degree centrality of every node: `degree(v) / (n - 1)`.
///
/// Zero for every node of a single-node graph.
///
/// # Examples
///
/// ```
/// use sociogram::centrality;
/// use sociogram::edge::Edge;
/// use sociogram::graph::Graph;
///
/// let graph = Graph::build(
///     ["a", "b", "c"],
///     [Edge::new("a", "b"), Edge::new("a", "c")],
/// )
/// .unwrap();
///
/// let centrality = centrality::degree_centrality(&graph);
/// assert_eq!(centrality["a"], 1.0);
/// assert_eq!(centrality["b"], 0.5);
/// ```
pub fn degree_centrality<T: NodeLabel>(graph: &Graph<T>) -> HashMap<T, f64> {
    let n = graph.node_count();

    if n <= 1 {
        return graph.nodes().iter().map(|v| (v.clone(), 0.0)).collect();
    }

    let norm = (n - 1) as f64;

    graph
        .nodes()
        .iter()
        .zip(graph.adjacency())
        .map(|(v, neighbors)| (v.clone(), neighbors.len() as f64 / norm))
        .collect()
}

/// Returns the betweenness centrality of every node, normalized to [0, 1].
///
/// For each node, the fraction of all-pairs shortest paths passing through
/// it, accumulated source by source and divided by `(n - 1)(n - 2)` for
/// `n > 2` (the undirected accumulation visits every unordered pair from both
/// ends, which cancels the factor two of the usual normalization).
///
/// # Examples
///
/// ```
/// use sociogram::centrality;
/// use sociogram::edge::Edge;
/// use sociogram::graph::Graph;
///
/// let graph = Graph::build(
///     ["hub", "a", "b", "c"],
///     [
///         Edge::new("hub", "a"),
///         Edge::new("hub", "b"),
///         Edge::new("hub", "c"),
///     ],
/// )
/// .unwrap();
///
/// let centrality = centrality::betweenness_centrality(&graph);
/// assert_eq!(centrality["hub"], 1.0);
/// assert_eq!(centrality["a"], 0.0);
/// ```
pub fn betweenness_centrality<T: NodeLabel>(graph: &Graph<T>) -> HashMap<T, f64> {
    let n = graph.node_count();
    let adjacency = graph.adjacency();

    debug!(
        nodes = n,
        edges = graph.edge_count(),
        "computing betweenness centrality"
    );

    let mut betweenness = vec![0.0; n];
    for source in 0..n {
        betweenness_for_source(adjacency, source, &mut betweenness);
    }

    if n > 2 {
        let divisor = ((n - 1) * (n - 2)) as f64;
        for value in &mut betweenness {
            *value /= divisor;
        }
    }

    graph
        .nodes()
        .iter()
        .cloned()
        .zip(betweenness)
        .collect()
}

/// Single-source pass of Ulrik Brandes's "A Faster Algorithm for Betweenness
/// Centrality": a BFS counting shortest paths, followed by dependency
/// accumulation in reverse finish order.
fn betweenness_for_source(
    adjacency: &[Vec<GraphIndex>],
    source: GraphIndex,
    betweenness: &mut [f64],
) {
    let num_nodes = adjacency.len();

    let mut sigma = vec![0.0; num_nodes];
    let mut distance = vec![usize::MAX; num_nodes];
    let mut predecessors: Vec<Vec<GraphIndex>> = vec![Vec::new(); num_nodes];
    let mut delta = vec![0.0; num_nodes];
    let mut queue = VecDeque::new();
    let mut stack = Vec::new();

    sigma[source] = 1.0;
    distance[source] = 0;
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        stack.push(v);

        for &w in &adjacency[v] {
            if distance[w] == usize::MAX {
                distance[w] = distance[v] + 1;
                queue.push_back(w);
            }
            if distance[w] == distance[v] + 1 {
                sigma[w] += sigma[v];
                predecessors[w].push(v);
            }
        }
    }

    while let Some(w) = stack.pop() {
        for &v in &predecessors[w] {
            delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
        }
        if w != source {
            betweenness[w] += delta[w];
        }
    }
}

/// Returns the closeness centrality of every node.
///
/// Reachability-scaled form: `((r - 1) / (n - 1)) * ((r - 1) / Σd)` where `r`
/// counts the nodes reachable from `v` (itself included) and `Σd` sums their
/// distances, so disconnected graphs degrade gracefully. Isolated nodes score
/// zero.
pub fn closeness_centrality<T: NodeLabel>(graph: &Graph<T>) -> HashMap<T, f64> {
    let n = graph.node_count();
    let adjacency = graph.adjacency();

    graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(v, label)| {
            let mut total_path_length = 0;
            let mut reachable = 0;

            for distance in traversal::distances_from(adjacency, v).into_iter().flatten() {
                total_path_length += distance;
                reachable += 1;
            }

            let closeness = if reachable > 1 {
                let r = (reachable - 1) as f64;
                (r * r) / ((n - 1) as f64 * total_path_length as f64)
            } else {
                0.0
            };

            (label.clone(), closeness)
        })
        .collect()
}

/// Returns the eigenvector centrality (the relative importance of the node)
/// of every node.
///
/// The dominant eigenvector of the adjacency matrix, components made
/// non-negative and scaled so their mean is one. Empty map for the empty
/// graph.
pub fn eigenvector_centrality<T: NodeLabel>(graph: &Graph<T>) -> HashMap<T, f64> {
    let matrix = graph.adjacency_matrix();

    // The eigendecomposition requires a matrix with at least a dim of 1x1.
    if matrix.is_empty() {
        return HashMap::new();
    }

    let eigen = SymmetricEigen::new(matrix);

    let mut dominant = 0;
    for (i, value) in eigen.eigenvalues.iter().enumerate() {
        if *value > eigen.eigenvalues[dominant] {
            dominant = i;
        }
    }

    // By Perron-Frobenius the dominant eigenvector is single-signed, so the
    // absolute values recover the scores whichever sign the solver picked.
    let vector = eigen.eigenvectors.column(dominant);
    let sum: f64 = vector.iter().map(|component| component.abs()).sum();

    if sum == 0.0 {
        return graph.nodes().iter().map(|v| (v.clone(), 0.0)).collect();
    }

    let scale = graph.node_count() as f64 / sum;

    graph
        .nodes()
        .iter()
        .zip(vector.iter())
        .map(|(v, component)| (v.clone(), component.abs() * scale))
        .collect()
}

/// Returns the local clustering coefficient of every node.
///
/// For a node with degree `k < 2` the coefficient is zero; otherwise it is
/// `2 * triangles / (k * (k - 1))`, with triangles counted among the node's
/// neighbor set.
///
/// # Examples
///
/// ```
/// use sociogram::centrality;
/// use sociogram::edge::Edge;
/// use sociogram::graph::Graph;
///
/// let graph = Graph::build(
///     ["a", "b", "c"],
///     [Edge::new("a", "b"), Edge::new("b", "c"), Edge::new("c", "a")],
/// )
/// .unwrap();
///
/// let clustering = centrality::clustering_coefficient(&graph);
/// assert_eq!(clustering["a"], 1.0);
/// ```
pub fn clustering_coefficient<T: NodeLabel>(graph: &Graph<T>) -> HashMap<T, f64> {
    let adjacency = graph.adjacency();

    graph
        .nodes()
        .iter()
        .zip(adjacency)
        .map(|(label, neighbors)| {
            let k = neighbors.len();
            if k < 2 {
                return (label.clone(), 0.0);
            }

            let mut triangles = 0;
            for (i, &u) in neighbors.iter().enumerate() {
                for &w in &neighbors[(i + 1)..] {
                    // Neighbor lists are sorted, adjacency is a binary search.
                    if adjacency[u].binary_search(&w).is_ok() {
                        triangles += 1;
                    }
                }
            }

            let coefficient = 2.0 * triangles as f64 / (k * (k - 1)) as f64;
            (label.clone(), coefficient)
        })
        .collect()
}
