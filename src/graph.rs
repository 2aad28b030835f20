//! The graph store: an immutable, undirected simple graph.
//!
//! A [`Graph`] is built once from a node set and an edge set (or from an
//! adjacency matrix) and never mutated afterwards. Loading new data means
//! constructing a new value; analyses in flight keep reading the graph they
//! were handed.

use std::{
    collections::{HashMap, HashSet},
    fmt::{Debug, Display},
    hash::Hash,
};

use nalgebra::DMatrix;

use crate::{edge::Edge, error::GraphError};

/// Bound alias for types usable as node identifiers.
///
/// Blanket-implemented; node labels are typically strings, but anything
/// cloneable, hashable, ordered and printable works.
pub trait NodeLabel: Clone + Eq + Hash + Ord + Display + Debug {}

impl<T: Clone + Eq + Hash + Ord + Display + Debug> NodeLabel for T {}

/// Dense index of a node within the graph's stable iteration order.
pub(crate) type GraphIndex = usize;

/// An undirected simple graph with stable, insertion-ordered node iteration.
#[derive(Clone, Debug)]
pub struct Graph<T> {
    /// Node labels in insertion order; the order every analysis reports in.
    labels: Vec<T>,
    /// Reverse mapping from label to its [`GraphIndex`].
    index: HashMap<T, GraphIndex>,
    /// Neighbor lists per node, sorted by index.
    adjacency: Vec<Vec<GraphIndex>>,
    /// The deduplicated edge set, in insertion order.
    edges: Vec<Edge<T>>,
    /// Edge endpoints as index pairs, parallel to `edges`.
    pairs: Vec<(GraphIndex, GraphIndex)>,
}

impl<T: NodeLabel> Graph<T> {
    /// Builds a graph from a node set and an edge set.
    ///
    /// Fails with [`GraphError::MalformedGraph`] if an edge references a node
    /// not in the node set, if a self-loop is present, or if a node is
    /// declared twice. Duplicate edges are collapsed; the first occurrence
    /// wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use sociogram::edge::Edge;
    /// use sociogram::graph::Graph;
    ///
    /// let graph = Graph::build(["a", "b", "c"], [Edge::new("a", "b")]).unwrap();
    ///
    /// assert_eq!(graph.node_count(), 3);
    /// assert_eq!(graph.edge_count(), 1);
    /// ```
    pub fn build(
        nodes: impl IntoIterator<Item = T>,
        edges: impl IntoIterator<Item = Edge<T>>,
    ) -> Result<Self, GraphError> {
        let mut labels = Vec::new();
        let mut index = HashMap::new();

        for node in nodes {
            if index.contains_key(&node) {
                return Err(GraphError::MalformedGraph(format!(
                    "node `{node}` is declared twice"
                )));
            }

            index.insert(node.clone(), labels.len());
            labels.push(node);
        }

        let mut adjacency = vec![Vec::new(); labels.len()];
        let mut kept = Vec::new();
        let mut pairs = Vec::new();
        let mut seen = HashSet::new();

        for edge in edges {
            let i = Self::endpoint(&index, edge.source())?;
            let j = Self::endpoint(&index, edge.target())?;

            if i == j {
                return Err(GraphError::MalformedGraph(format!(
                    "self-loop on node `{}`",
                    edge.source()
                )));
            }

            if seen.insert((i.min(j), i.max(j))) {
                adjacency[i].push(j);
                adjacency[j].push(i);
                pairs.push((i, j));
                kept.push(edge);
            }
        }

        // Sorted neighbor lists keep traversals in the stable node order and
        // allow binary-search adjacency tests.
        for neighbors in &mut adjacency {
            neighbors.sort_unstable();
        }

        Ok(Self {
            labels,
            index,
            adjacency,
            edges: kept,
            pairs,
        })
    }

    /// Builds a graph from a labeled adjacency matrix.
    ///
    /// A nonzero off-diagonal cell denotes an edge; the cell value is carried
    /// as the edge weight. Fails with [`GraphError::MalformedGraph`] if the
    /// matrix isn't square, if its size doesn't match the label count, or if
    /// a diagonal cell is nonzero (a self-loop).
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::dmatrix;
    /// use sociogram::graph::Graph;
    ///
    /// let matrix = dmatrix![0.0, 1.0;
    ///                       1.0, 0.0];
    /// let graph = Graph::from_adjacency_matrix(vec!["a", "b"], &matrix).unwrap();
    ///
    /// assert_eq!(graph.edge_count(), 1);
    /// ```
    pub fn from_adjacency_matrix(
        labels: Vec<T>,
        matrix: &DMatrix<f64>,
    ) -> Result<Self, GraphError> {
        if !matrix.is_square() {
            return Err(GraphError::MalformedGraph(format!(
                "adjacency matrix must be square, got {}x{}",
                matrix.nrows(),
                matrix.ncols()
            )));
        }

        if matrix.nrows() != labels.len() {
            return Err(GraphError::MalformedGraph(format!(
                "{} axis labels for a {}x{} matrix",
                labels.len(),
                matrix.nrows(),
                matrix.ncols()
            )));
        }

        let mut edges = Vec::new();

        for i in 0..labels.len() {
            if matrix[(i, i)] != 0.0 {
                return Err(GraphError::MalformedGraph(format!(
                    "nonzero diagonal cell for node `{}`",
                    labels[i]
                )));
            }

            // Either nonzero cell of the symmetric pair marks the edge.
            for j in (i + 1)..labels.len() {
                let cell = if matrix[(i, j)] != 0.0 {
                    matrix[(i, j)]
                } else {
                    matrix[(j, i)]
                };

                if cell != 0.0 {
                    edges.push(Edge::new_weighted(labels[i].clone(), labels[j].clone(), cell));
                }
            }
        }

        Self::build(labels, edges)
    }

    /// Returns the node count of the graph.
    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    /// Returns the edge count of the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Checks whether the graph contains the given node.
    pub fn has_node(&self, node: &T) -> bool {
        self.index.contains_key(node)
    }

    /// Returns the nodes in their stable iteration order.
    pub fn nodes(&self) -> &[T] {
        &self.labels
    }

    /// Returns the deduplicated edge set.
    ///
    /// Together with [`nodes`](Self::nodes), this is the handoff a drawing
    /// collaborator needs; node positioning is its business, not the
    /// engine's.
    pub fn edges(&self) -> &[Edge<T>] {
        &self.edges
    }

    /// Returns an iterator over the neighbors of a node, in the stable node
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sociogram::edge::Edge;
    /// use sociogram::graph::Graph;
    ///
    /// let graph = Graph::build(
    ///     ["a", "b", "c"],
    ///     [Edge::new("a", "b"), Edge::new("a", "c")],
    /// )
    /// .unwrap();
    ///
    /// let neighbors: Vec<_> = graph.neighbors(&"a").unwrap().collect();
    /// assert_eq!(neighbors, [&"b", &"c"]);
    /// ```
    pub fn neighbors<'a>(
        &'a self,
        node: &T,
    ) -> Result<impl Iterator<Item = &'a T> + 'a, GraphError> {
        let i = self.idx(node)?;

        Ok(self.adjacency[i].iter().map(move |&j| &self.labels[j]))
    }

    /// Returns the degree of a node.
    pub fn degree(&self, node: &T) -> Result<usize, GraphError> {
        Ok(self.adjacency[self.idx(node)?].len())
    }

    /// Computes the density of the graph, the ratio of edges with respect to
    /// the maximum possible edges. Zero below two nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use sociogram::edge::Edge;
    /// use sociogram::graph::Graph;
    ///
    /// let graph = Graph::build(
    ///     ["a", "b", "c"],
    ///     [Edge::new("a", "b"), Edge::new("a", "c")],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(graph.density(), 2.0 / 3.0);
    /// ```
    pub fn density(&self) -> f64 {
        let vc = self.node_count() as f64;
        if vc < 2.0 {
            return 0.0;
        }

        let ec = self.edge_count() as f64;

        // Calculate the total number of possible edges given a node count.
        let pec = vc * (vc - 1.0) / 2.0;
        ec / pec
    }

    /// Constructs the 0/1 adjacency matrix for this graph, indexed in the
    /// stable node order. As the graph is undirected, the matrix is
    /// symmetric.
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::dmatrix;
    /// use sociogram::edge::Edge;
    /// use sociogram::graph::Graph;
    ///
    /// let graph = Graph::build(["a", "b"], [Edge::new("a", "b")]).unwrap();
    /// assert_eq!(
    ///     graph.adjacency_matrix(),
    ///     dmatrix![0.0, 1.0;
    ///              1.0, 0.0]
    /// );
    /// ```
    pub fn adjacency_matrix(&self) -> DMatrix<f64> {
        let n = self.node_count();
        let mut matrix = DMatrix::zeros(n, n);

        for &(i, j) in &self.pairs {
            matrix[(i, j)] = 1.0;
            matrix[(j, i)] = 1.0;
        }

        matrix
    }

    //
    // Crate-internal
    //

    /// Resolves a label to its dense index.
    pub(crate) fn idx(&self, node: &T) -> Result<GraphIndex, GraphError> {
        self.index
            .get(node)
            .copied()
            .ok_or_else(|| GraphError::UnknownNode(node.to_string()))
    }

    /// Returns the label at a dense index.
    pub(crate) fn label(&self, i: GraphIndex) -> &T {
        &self.labels[i]
    }

    /// Returns the index-based neighbor lists, sorted per node.
    pub(crate) fn adjacency(&self) -> &[Vec<GraphIndex>] {
        &self.adjacency
    }

    /// Returns the edge endpoints as index pairs.
    pub(crate) fn edge_pairs(&self) -> &[(GraphIndex, GraphIndex)] {
        &self.pairs
    }

    fn endpoint(index: &HashMap<T, GraphIndex>, node: &T) -> Result<GraphIndex, GraphError> {
        index.get(node).copied().ok_or_else(|| {
            GraphError::MalformedGraph(format!("edge endpoint `{node}` is not in the node set"))
        })
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::dmatrix;

    use super::*;

    #[test]
    fn build_empty() {
        let graph: Graph<&str> = Graph::build([], []).unwrap();

        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn build_keeps_isolated_nodes() {
        let graph = Graph::build(["a", "b", "z"], [Edge::new("a", "b")]).unwrap();

        assert_eq!(graph.node_count(), 3);
        assert!(graph.has_node(&"z"));
        assert_eq!(graph.degree(&"z").unwrap(), 0);
    }

    #[test]
    fn build_rejects_self_loop() {
        let result = Graph::build(["a", "b"], [Edge::new("a", "a")]);

        assert!(matches!(result, Err(GraphError::MalformedGraph(_))));
    }

    #[test]
    fn build_rejects_unknown_endpoint() {
        let result = Graph::build(["a", "b"], [Edge::new("a", "c")]);

        assert!(matches!(result, Err(GraphError::MalformedGraph(_))));
    }

    #[test]
    fn build_rejects_duplicate_node() {
        let result: Result<Graph<&str>, _> = Graph::build(["a", "b", "a"], []);

        assert!(matches!(result, Err(GraphError::MalformedGraph(_))));
    }

    #[test]
    fn build_collapses_duplicate_edges() {
        let graph = Graph::build(
            ["a", "b"],
            [Edge::new("a", "b"), Edge::new("b", "a")],
        )
        .unwrap();

        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn nodes_iterate_in_insertion_order() {
        let graph = Graph::build(["c", "a", "b"], [Edge::new("a", "b")]).unwrap();

        assert_eq!(graph.nodes(), ["c", "a", "b"]);
    }

    #[test]
    fn neighbors_unknown_node() {
        let graph = Graph::build(["a"], []).unwrap();

        assert!(matches!(
            graph.neighbors(&"z").map(|_| ()),
            Err(GraphError::UnknownNode(_))
        ));
    }

    #[test]
    fn degree_sum_is_twice_the_edge_count() {
        let graph = graph!(["a", "b", "c", "a"], ["b", "d"]);

        let degree_sum: usize = graph
            .nodes()
            .iter()
            .map(|node| graph.degree(node).unwrap())
            .sum();

        assert_eq!(degree_sum, 2 * graph.edge_count());
    }

    #[test]
    fn adjacency_round_trips_the_edge_set() {
        let graph = graph!(["a", "b", "c", "a"], ["b", "d"]);

        // Rebuild the edge set from the adjacency structure; it must come
        // back symmetric, deduplicated and loop-free.
        let mut via_adjacency = HashSet::new();
        for node in graph.nodes() {
            for neighbor in graph.neighbors(node).unwrap() {
                assert_ne!(node, neighbor);
                via_adjacency.insert(Edge::new(node.clone(), neighbor.clone()));
            }
        }

        let direct: HashSet<_> = graph.edges().iter().cloned().collect();
        assert_eq!(via_adjacency, direct);
    }

    #[test]
    fn from_adjacency_matrix_reads_either_triangle() {
        // Asymmetric input: only the lower triangle carries the b-c edge.
        let matrix = dmatrix![0.0, 1.0, 0.0;
                             1.0, 0.0, 0.0;
                             0.0, 1.0, 0.0];
        let graph = Graph::from_adjacency_matrix(vec!["a", "b", "c"], &matrix).unwrap();

        assert_eq!(graph.edge_count(), 2);
        assert!(graph.edges().contains(&Edge::new("b", "c")));
    }

    #[test]
    fn from_adjacency_matrix_carries_weights() {
        let matrix = dmatrix![0.0, 2.5;
                             2.5, 0.0];
        let graph = Graph::from_adjacency_matrix(vec!["a", "b"], &matrix).unwrap();

        assert_eq!(graph.edges()[0].weight(), Some(2.5));
    }

    #[test]
    fn from_adjacency_matrix_rejects_nonzero_diagonal() {
        let matrix = dmatrix![1.0, 0.0;
                             0.0, 0.0];
        let result = Graph::from_adjacency_matrix(vec!["a", "b"], &matrix);

        assert!(matches!(result, Err(GraphError::MalformedGraph(_))));
    }

    #[test]
    fn from_adjacency_matrix_rejects_label_mismatch() {
        let matrix = dmatrix![0.0, 1.0;
                             1.0, 0.0];
        let result = Graph::from_adjacency_matrix(vec!["a"], &matrix);

        assert!(matches!(result, Err(GraphError::MalformedGraph(_))));
    }

    #[test]
    fn matrix_round_trip() {
        let matrix = dmatrix![0.0, 1.0, 1.0;
                             1.0, 0.0, 0.0;
                             1.0, 0.0, 0.0];
        let graph = Graph::from_adjacency_matrix(vec!["a", "b", "c"], &matrix).unwrap();

        assert_eq!(graph.adjacency_matrix(), matrix);
    }

    #[test]
    fn density() {
        let graph: Graph<&str> = Graph::build([], []).unwrap();
        assert_eq!(graph.density(), 0.0);

        let graph = graph!(["a", "b"]);
        assert_eq!(graph.density(), 1.0);

        let graph = graph!(["a", "b"], ["a", "c"]);
        assert_eq!(graph.density(), 2.0 / 3.0);
    }
}
