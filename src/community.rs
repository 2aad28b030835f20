//! Community structure: greedy modularity maximization and partition scoring.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{
    error::GraphError,
    graph::{Graph, NodeLabel},
};

/// A division of the node set into disjoint communities.
///
/// Each community is sorted by label and the communities are ordered by their
/// smallest member, so the same graph always yields the same value.
pub type Partition<T> = Vec<Vec<T>>;

/// Detects communities by greedy modularity maximization.
///
/// Clauset-Newman-Moore style agglomeration: every node starts as its own
/// community and the merge with the largest modularity increase
/// `ΔQ = e_ab/m - (D_a * D_b) / (2m²)` is applied until no merge increases
/// modularity. When several merges tie on the increase, the pair whose
/// combined identifier (the smallest member of each side) is
/// lexicographically smallest wins, keeping the output reproducible.
///
/// A graph without edges has no merges worth making and comes back as
/// singletons; the empty graph yields an empty partition.
///
/// # Examples
///
/// ```
/// use sociogram::community;
/// use sociogram::edge::Edge;
/// use sociogram::graph::Graph;
///
/// // Two triangles joined by a single bridge edge.
/// let graph = Graph::build(
///     ["a", "b", "c", "d", "e", "f"],
///     [
///         Edge::new("a", "b"),
///         Edge::new("b", "c"),
///         Edge::new("c", "a"),
///         Edge::new("d", "e"),
///         Edge::new("e", "f"),
///         Edge::new("f", "d"),
///         Edge::new("c", "d"),
///     ],
/// )
/// .unwrap();
///
/// let communities = community::greedy_modularity_communities(&graph);
/// assert_eq!(communities, vec![vec!["a", "b", "c"], vec!["d", "e", "f"]]);
/// ```
pub fn greedy_modularity_communities<T: NodeLabel>(graph: &Graph<T>) -> Partition<T> {
    let n = graph.node_count();
    if n == 0 {
        return Vec::new();
    }

    if graph.edge_count() == 0 {
        return graph.nodes().iter().map(|v| vec![v.clone()]).collect();
    }

    let m = graph.edge_count() as f64;

    debug!(
        nodes = n,
        edges = graph.edge_count(),
        "greedy modularity search"
    );

    // Community id per node; a community is identified for tie-breaking by
    // the smallest label among its members.
    let mut membership: Vec<usize> = (0..n).collect();
    let mut degree_sum: Vec<f64> = graph
        .adjacency()
        .iter()
        .map(|neighbors| neighbors.len() as f64)
        .collect();
    let mut smallest: Vec<T> = graph.nodes().to_vec();

    loop {
        // Inter-community edge counts for the current assignment. Only pairs
        // with at least one edge between them can have a positive gain.
        let mut between: HashMap<(usize, usize), f64> = HashMap::new();
        for &(i, j) in graph.edge_pairs() {
            let (a, b) = (membership[i], membership[j]);
            if a != b {
                *between.entry((a.min(b), a.max(b))).or_insert(0.0) += 1.0;
            }
        }

        let mut best: Option<(f64, (T, T), (usize, usize))> = None;

        for (&(a, b), &e_ab) in &between {
            let gain = e_ab / m - degree_sum[a] * degree_sum[b] / (2.0 * m * m);

            let id = if smallest[a] <= smallest[b] {
                (smallest[a].clone(), smallest[b].clone())
            } else {
                (smallest[b].clone(), smallest[a].clone())
            };

            let replace = match &best {
                None => true,
                Some((best_gain, best_id, _)) => {
                    gain > *best_gain || (gain == *best_gain && id < *best_id)
                }
            };

            if replace {
                best = Some((gain, id, (a, b)));
            }
        }

        let Some((gain, _, (a, b))) = best else {
            break;
        };
        if gain <= 0.0 {
            break;
        }

        trace!(gain, "merging communities");

        for community in &mut membership {
            if *community == b {
                *community = a;
            }
        }
        degree_sum[a] += degree_sum[b];

        let absorbed = smallest[b].clone();
        if absorbed < smallest[a] {
            smallest[a] = absorbed;
        }
    }

    let mut by_community: HashMap<usize, Vec<T>> = HashMap::new();
    for (i, &community) in membership.iter().enumerate() {
        by_community
            .entry(community)
            .or_default()
            .push(graph.label(i).clone());
    }

    let mut partition: Partition<T> = by_community.into_values().collect();
    for community in &mut partition {
        community.sort();
    }
    partition.sort();

    partition
}

/// Scores a partition of the graph's nodes:
/// `Q = Σ_c [edges_within(c)/m - (Σ degrees in c / 2m)²]`.
///
/// Fails with [`GraphError::EmptyGraph`] when the graph has no edges
/// (modularity is undefined there) and with [`GraphError::UnknownNode`] if
/// the partition names a node outside the graph. Disjointness and coverage of
/// the node set are the caller's contract.
///
/// # Examples
///
/// ```
/// use sociogram::community;
/// use sociogram::edge::Edge;
/// use sociogram::graph::Graph;
///
/// let graph = Graph::build(
///     ["a", "b", "c"],
///     [Edge::new("a", "b"), Edge::new("b", "c")],
/// )
/// .unwrap();
///
/// // The trivial partition scores zero on any graph.
/// let q = community::modularity(&graph, &[graph.nodes().to_vec()]).unwrap();
/// assert_eq!(q, 0.0);
/// ```
pub fn modularity<T: NodeLabel>(
    graph: &Graph<T>,
    partition: &[Vec<T>],
) -> Result<f64, GraphError> {
    if graph.edge_count() == 0 {
        return Err(GraphError::EmptyGraph);
    }

    let m = graph.edge_count() as f64;
    let two_m = 2.0 * m;

    let mut community_of = vec![None; graph.node_count()];
    for (community, members) in partition.iter().enumerate() {
        for node in members {
            community_of[graph.idx(node)?] = Some(community);
        }
    }

    let mut intra = vec![0.0; partition.len()];
    let mut degree_sum = vec![0.0; partition.len()];

    for (i, neighbors) in graph.adjacency().iter().enumerate() {
        if let Some(c) = community_of[i] {
            degree_sum[c] += neighbors.len() as f64;
        }
    }

    for &(i, j) in graph.edge_pairs() {
        if let (Some(a), Some(b)) = (community_of[i], community_of[j]) {
            if a == b {
                intra[a] += 1.0;
            }
        }
    }

    Ok((0..partition.len())
        .map(|c| intra[c] / m - (degree_sum[c] / two_m).powi(2))
        .sum())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bridged_triangles() -> Graph<&'static str> {
        graph!(["a", "b", "c", "a"], ["d", "e", "f", "d"], ["c", "d"])
    }

    #[test]
    fn greedy_finds_the_two_triangles() {
        let communities = greedy_modularity_communities(&bridged_triangles());

        assert_eq!(
            communities,
            vec![vec!["a", "b", "c"], vec!["d", "e", "f"]]
        );
    }

    #[test]
    fn greedy_merges_a_lone_triangle_fully() {
        let graph = graph!(["a", "b", "c", "a"]);

        let communities = greedy_modularity_communities(&graph);

        assert_eq!(communities, vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn greedy_on_empty_graph() {
        let graph: Graph<&str> = Graph::build([], []).unwrap();

        assert!(greedy_modularity_communities(&graph).is_empty());
    }

    #[test]
    fn greedy_without_edges_keeps_singletons() {
        let graph = graph!(["a"], ["b"], ["c"]);

        assert_eq!(
            greedy_modularity_communities(&graph),
            vec![vec!["a"], vec!["b"], vec!["c"]]
        );
    }

    #[test]
    fn greedy_partition_covers_every_node_once() {
        let graph = graph!(["a", "b", "c", "d", "a"], ["c", "e"], ["f"]);

        let communities = greedy_modularity_communities(&graph);

        let mut members: Vec<_> = communities.into_iter().flatten().collect();
        members.sort();
        assert_eq!(members, ["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn modularity_of_trivial_partition_is_zero() {
        let graph = bridged_triangles();

        let q = modularity(&graph, &[graph.nodes().to_vec()]).unwrap();

        assert_eq!(q, 0.0);
    }

    #[test]
    fn modularity_of_the_triangle_split() {
        let graph = bridged_triangles();

        let q = modularity(
            &graph,
            &[vec!["a", "b", "c"], vec!["d", "e", "f"]],
        )
        .unwrap();

        // Both halves hold three of the seven edges and half the degree mass.
        let expected = 2.0 * (3.0 / 7.0 - 0.25);
        assert!((q - expected).abs() < 1e-12);
    }

    #[test]
    fn modularity_ranks_the_good_split_above_a_bad_one() {
        let graph = bridged_triangles();

        let good = modularity(&graph, &[vec!["a", "b", "c"], vec!["d", "e", "f"]]).unwrap();
        let bad = modularity(&graph, &[vec!["a", "d"], vec!["b", "c", "e", "f"]]).unwrap();

        assert!(good > bad);
    }

    #[test]
    fn modularity_of_edgeless_graph_is_undefined() {
        let graph = graph!(["a"], ["b"]);

        assert_eq!(
            modularity(&graph, &[vec!["a"], vec!["b"]]),
            Err(GraphError::EmptyGraph)
        );
    }

    #[test]
    fn modularity_rejects_unknown_nodes() {
        let graph = graph!(["a", "b"]);

        assert_eq!(
            modularity(&graph, &[vec!["a", "z"]]),
            Err(GraphError::UnknownNode("z".into()))
        );
    }

    #[test]
    fn greedy_result_scores_at_least_the_trivial_partition() {
        let graph = graph!(["a", "b", "c", "d", "a"], ["b", "d"]);

        let communities = greedy_modularity_communities(&graph);
        let q = modularity(&graph, &communities).unwrap();

        assert!(q >= 0.0);
    }
}
