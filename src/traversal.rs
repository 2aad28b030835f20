//! Breadth-first primitives shared by the higher-level analyses.

use std::collections::{HashMap, VecDeque};

use crate::{
    error::GraphError,
    graph::{Graph, GraphIndex, NodeLabel},
};

/// Returns the breadth-first layering from `source`.
///
/// Every node of the graph is present in the result; unreachable nodes map to
/// `None`, distinct from distance zero. Fails with
/// [`GraphError::UnknownNode`] if `source` is absent.
///
/// # Examples
///
/// ```
/// use sociogram::edge::Edge;
/// use sociogram::graph::Graph;
/// use sociogram::traversal;
///
/// let graph = Graph::build(
///     ["a", "b", "c", "z"],
///     [Edge::new("a", "b"), Edge::new("b", "c")],
/// )
/// .unwrap();
///
/// let distances = traversal::bfs_distances(&graph, &"a").unwrap();
/// assert_eq!(distances["c"], Some(2));
/// assert_eq!(distances["z"], None);
/// ```
pub fn bfs_distances<T: NodeLabel>(
    graph: &Graph<T>,
    source: &T,
) -> Result<HashMap<T, Option<usize>>, GraphError> {
    let source = graph.idx(source)?;

    Ok(distances_from(graph.adjacency(), source)
        .into_iter()
        .enumerate()
        .map(|(i, distance)| (graph.label(i).clone(), distance))
        .collect())
}

/// Returns a shortest path from `source` to `target`, reconstructed through
/// predecessor tracking.
///
/// `Ok(None)` reports disconnection; an absent endpoint is
/// [`GraphError::UnknownNode`] instead, so callers can tell bad input from a
/// genuinely unreachable target. A node is connected to itself by the
/// single-node path.
///
/// # Examples
///
/// ```
/// use sociogram::edge::Edge;
/// use sociogram::graph::Graph;
/// use sociogram::traversal;
///
/// let graph = Graph::build(
///     ["a", "b", "c"],
///     [Edge::new("a", "b"), Edge::new("b", "c")],
/// )
/// .unwrap();
///
/// let path = traversal::shortest_path(&graph, &"a", &"c").unwrap();
/// assert_eq!(path, Some(vec!["a", "b", "c"]));
/// ```
pub fn shortest_path<T: NodeLabel>(
    graph: &Graph<T>,
    source: &T,
    target: &T,
) -> Result<Option<Vec<T>>, GraphError> {
    let source = graph.idx(source)?;
    let target = graph.idx(target)?;

    if source == target {
        return Ok(Some(vec![graph.label(source).clone()]));
    }

    let adjacency = graph.adjacency();
    let mut visited = vec![false; adjacency.len()];
    let mut predecessor: Vec<Option<GraphIndex>> = vec![None; adjacency.len()];
    let mut queue = VecDeque::new();

    visited[source] = true;
    queue.push_back(source);

    'search: while let Some(v) = queue.pop_front() {
        for &w in &adjacency[v] {
            if !visited[w] {
                visited[w] = true;
                predecessor[w] = Some(v);

                if w == target {
                    break 'search;
                }

                queue.push_back(w);
            }
        }
    }

    if !visited[target] {
        return Ok(None);
    }

    // Walk the predecessor chain back to the source.
    let mut path = vec![target];
    let mut current = target;
    while let Some(previous) = predecessor[current] {
        path.push(previous);
        current = previous;
    }
    path.reverse();

    Ok(Some(path.into_iter().map(|i| graph.label(i).clone()).collect()))
}

/// Returns the connected components of the graph.
///
/// Components appear in the order their first node occurs in the graph's
/// stable iteration order; members are listed in breadth-first discovery
/// order.
pub fn connected_components<T: NodeLabel>(graph: &Graph<T>) -> Vec<Vec<T>> {
    let adjacency = graph.adjacency();
    let mut seen = vec![false; adjacency.len()];
    let mut components = Vec::new();

    for start in 0..adjacency.len() {
        if seen[start] {
            continue;
        }

        seen[start] = true;
        let mut members = vec![start];
        let mut queue = VecDeque::from([start]);

        while let Some(v) = queue.pop_front() {
            for &w in &adjacency[v] {
                if !seen[w] {
                    seen[w] = true;
                    members.push(w);
                    queue.push_back(w);
                }
            }
        }

        components.push(members.into_iter().map(|i| graph.label(i).clone()).collect());
    }

    components
}

/// Breadth-first distances over the index-based adjacency lists; `None`
/// marks unreachable.
pub(crate) fn distances_from(
    adjacency: &[Vec<GraphIndex>],
    source: GraphIndex,
) -> Vec<Option<usize>> {
    let mut distances = vec![None; adjacency.len()];
    let mut queue = VecDeque::new();

    distances[source] = Some(0);
    queue.push_back((source, 0));

    while let Some((v, distance)) = queue.pop_front() {
        for &w in &adjacency[v] {
            if distances[w].is_none() {
                distances[w] = Some(distance + 1);
                queue.push_back((w, distance + 1));
            }
        }
    }

    distances
}
