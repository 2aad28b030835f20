//! Common-neighbor link prediction over non-adjacent node pairs.

use std::cmp::Ordering;

use itertools::Itertools;

use crate::{
    graph::{Graph, GraphIndex, NodeLabel},
    traversal::distances_from,
};

/// Default blend between the local common-neighbor count and the global
/// distance term of [`common_neighbor_scores`].
pub const DEFAULT_ALPHA: f64 = 0.8;

/// Scores every non-adjacent node pair with the default
/// [`DEFAULT_ALPHA`] blend.
///
/// # Examples
///
/// ```
/// use sociogram::edge::Edge;
/// use sociogram::graph::Graph;
/// use sociogram::link_prediction;
///
/// // A four-cycle: the two diagonals are the candidate links.
/// let graph = Graph::build(
///     ["a", "b", "c", "d"],
///     [
///         Edge::new("a", "b"),
///         Edge::new("b", "c"),
///         Edge::new("c", "d"),
///         Edge::new("d", "a"),
///     ],
/// )
/// .unwrap();
///
/// let scores = link_prediction::common_neighbor_scores(&graph);
/// assert_eq!(scores.len(), 2);
/// assert_eq!((scores[0].0, scores[0].1), ("a", "c"));
/// ```
pub fn common_neighbor_scores<T: NodeLabel>(graph: &Graph<T>) -> Vec<(T, T, f64)> {
    common_neighbor_scores_with_alpha(graph, DEFAULT_ALPHA)
}

/// Scores every non-adjacent node pair by common-neighbor centrality:
/// `score(u, v) = α * |N(u) ∩ N(v)| + (1 - α) * n / d(u, v)`
/// where `d` is the shortest-path distance between the pair.
///
/// Shared neighbors raise the score; so does sitting close together in the
/// graph at large. The distance term is dropped for pairs in different
/// components. Results are sorted by descending score, ties broken by
/// lexicographic `(u, v)`.
pub fn common_neighbor_scores_with_alpha<T: NodeLabel>(
    graph: &Graph<T>,
    alpha: f64,
) -> Vec<(T, T, f64)> {
    let n = graph.node_count();
    let adjacency = graph.adjacency();

    // Every candidate pair needs a distance; one BFS per node covers them
    // all.
    let distances: Vec<Vec<Option<usize>>> =
        (0..n).map(|v| distances_from(adjacency, v)).collect();

    let mut scores = Vec::new();

    for (i, j) in (0..n).tuple_combinations::<(_, _)>() {
        if adjacency[i].binary_search(&j).is_ok() {
            continue;
        }

        let common = common_neighbor_count(&adjacency[i], &adjacency[j]);

        let mut score = alpha * common as f64;
        if let Some(distance) = distances[i][j] {
            score += (1.0 - alpha) * n as f64 / distance as f64;
        }

        let (u, v) = if graph.label(i) <= graph.label(j) {
            (graph.label(i), graph.label(j))
        } else {
            (graph.label(j), graph.label(i))
        };

        scores.push((u.clone(), v.clone(), score));
    }

    scores.sort_by(|a, b| {
        b.2.partial_cmp(&a.2)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
            .then_with(|| a.1.cmp(&b.1))
    });

    scores
}

/// Intersection size of two sorted neighbor lists.
fn common_neighbor_count(a: &[GraphIndex], b: &[GraphIndex]) -> usize {
    let (mut i, mut j, mut count) = (0, 0, 0);

    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Equal => {
                count += 1;
                i += 1;
                j += 1;
            }
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
        }
    }

    count
}
