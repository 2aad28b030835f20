//! Connectivity structure: articulation points, diameter and path queries.

use tracing::debug;

use crate::{
    error::GraphError,
    graph::{Graph, GraphIndex, NodeLabel},
    traversal::distances_from,
};

// The path query belongs with the other connectivity questions but is pure
// traversal; it lives with the kernel.
pub use crate::traversal::shortest_path;

/// Returns the articulation points of the graph, sorted by label.
///
/// A node is an articulation point if removing it increases the number of
/// connected components. Found with a single depth-first pass per component,
/// tracking discovery times and the lowest discovery time reachable through
/// each subtree: a non-root node `u` cuts the graph if some DFS child `c` has
/// `low[c] >= disc[u]`; a root cuts it if it has more than one DFS child.
///
/// # Examples
///
/// ```
/// use sociogram::connectivity;
/// use sociogram::edge::Edge;
/// use sociogram::graph::Graph;
///
/// let graph = Graph::build(
///     ["a", "b", "c", "d"],
///     [Edge::new("a", "b"), Edge::new("b", "c"), Edge::new("c", "d")],
/// )
/// .unwrap();
///
/// assert_eq!(connectivity::articulation_points(&graph), ["b", "c"]);
/// ```
pub fn articulation_points<T: NodeLabel>(graph: &Graph<T>) -> Vec<T> {
    let adjacency = graph.adjacency();
    let n = adjacency.len();

    let mut disc = vec![usize::MAX; n];
    let mut low = vec![0; n];
    let mut cut = vec![false; n];
    let mut clock = 0;

    fn visit(
        u: GraphIndex,
        parent: Option<GraphIndex>,
        adjacency: &[Vec<GraphIndex>],
        disc: &mut [usize],
        low: &mut [usize],
        cut: &mut [bool],
        clock: &mut usize,
    ) {
        disc[u] = *clock;
        low[u] = *clock;
        *clock += 1;

        let mut children = 0;

        for &v in &adjacency[u] {
            // A simple graph has a single edge back to the parent.
            if Some(v) == parent {
                continue;
            }

            if disc[v] != usize::MAX {
                low[u] = low[u].min(disc[v]);
            } else {
                children += 1;
                visit(v, Some(u), adjacency, disc, low, cut, clock);
                low[u] = low[u].min(low[v]);

                if parent.is_some() && low[v] >= disc[u] {
                    cut[u] = true;
                }
            }
        }

        if parent.is_none() && children > 1 {
            cut[u] = true;
        }
    }

    // Each unvisited node seeds a new DFS tree, so disconnected graphs get
    // the same root rule per component.
    for root in 0..n {
        if disc[root] == usize::MAX {
            visit(root, None, adjacency, &mut disc, &mut low, &mut cut, &mut clock);
        }
    }

    let mut points: Vec<T> = cut
        .iter()
        .enumerate()
        .filter(|(_, &is_cut)| is_cut)
        .map(|(i, _)| graph.label(i).clone())
        .collect();
    points.sort();

    points
}

/// Returns the diameter of the graph: the greatest shortest-path distance
/// between any two nodes.
///
/// Computed by breadth-first search from every node. Fails with
/// [`GraphError::DisconnectedGraph`] as soon as any pair is unreachable:
/// the diameter is undefined there and is reported as such rather than
/// silently computed over the reachable pairs. The empty graph is reported
/// the same way; a single node has diameter zero.
///
/// # Examples
///
/// ```
/// use sociogram::connectivity;
/// use sociogram::edge::Edge;
/// use sociogram::graph::Graph;
///
/// let graph = Graph::build(
///     ["a", "b", "c", "d"],
///     [Edge::new("a", "b"), Edge::new("b", "c"), Edge::new("c", "d")],
/// )
/// .unwrap();
///
/// assert_eq!(connectivity::diameter(&graph), Ok(3));
/// ```
pub fn diameter<T: NodeLabel>(graph: &Graph<T>) -> Result<usize, GraphError> {
    let n = graph.node_count();
    if n == 0 {
        return Err(GraphError::DisconnectedGraph);
    }

    debug!(nodes = n, "computing diameter");

    let adjacency = graph.adjacency();
    let mut max_distance = 0;

    for source in 0..n {
        for distance in distances_from(adjacency, source) {
            match distance {
                Some(d) => max_distance = max_distance.max(d),
                None => return Err(GraphError::DisconnectedGraph),
            }
        }
    }

    Ok(max_distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn articulation_points_of_path() {
        let graph = graph!(["a", "b", "c", "d"]);

        assert_eq!(articulation_points(&graph), ["b", "c"]);
    }

    #[test]
    fn articulation_points_of_cycle() {
        let graph = graph!(["a", "b", "c", "d", "a"]);

        assert!(articulation_points(&graph).is_empty());
    }

    #[test]
    fn articulation_points_of_bridged_triangles() {
        let graph = graph!(
            ["a", "b", "c", "a"],
            ["d", "e", "f", "d"],
            ["c", "d"]
        );

        assert_eq!(articulation_points(&graph), ["c", "d"]);
    }

    #[test]
    fn articulation_points_of_star_center() {
        let graph = graph!(["hub", "a"], ["hub", "b"], ["hub", "c"]);

        assert_eq!(articulation_points(&graph), ["hub"]);
    }

    #[test]
    fn articulation_points_cover_every_component() {
        let graph = graph!(["a", "b", "c"], ["x", "y", "z"]);

        assert_eq!(articulation_points(&graph), ["b", "y"]);
    }

    #[test]
    fn articulation_points_of_empty_graph() {
        let graph: Graph<&str> = Graph::build([], []).unwrap();

        assert!(articulation_points(&graph).is_empty());
    }

    #[test]
    fn diameter_of_path_is_its_length() {
        let graph = graph!(["a", "b", "c", "d", "e"]);

        assert_eq!(diameter(&graph), Ok(4));
    }

    #[test]
    fn diameter_of_single_node_is_zero() {
        let graph = graph!(["a"]);

        assert_eq!(diameter(&graph), Ok(0));
    }

    #[test]
    fn diameter_of_disconnected_graph_is_undefined() {
        let graph = graph!(["a", "b", "c", "a"], ["x", "y", "z", "x"]);

        assert_eq!(diameter(&graph), Err(GraphError::DisconnectedGraph));
    }

    #[test]
    fn diameter_of_empty_graph_is_undefined() {
        let graph: Graph<&str> = Graph::build([], []).unwrap();

        assert_eq!(diameter(&graph), Err(GraphError::DisconnectedGraph));
    }

    #[test]
    fn shortest_path_is_reexported() {
        let graph = graph!(["a", "b", "c"]);

        assert_eq!(
            shortest_path(&graph, &"a", &"c").unwrap(),
            Some(vec!["a", "b", "c"])
        );
    }
}
