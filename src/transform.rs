/*!
# Graph Transforms

Pure structural copies over the read-only query surface: every transform
consumes `nodes()`, `edges()` and the orientation flags of its input and
produces a fresh graph through the ordinary construction operations. None of
them require anything beyond the public contract of
[`Graph`](crate::repr::Graph) — deriving `Clone` already covers plain
duplication, so the transforms here are the ones that change something on the
way: edge values, node values, or the node set.
*/

use fxhash::FxHashMap;

use crate::{
    key::{GraphKey, KeyFn, NodeKey},
    repr::Graph,
};

/// Creates a weighted graph with the same nodes, topology and orientation in
/// which every *valued* edge's value is replaced by `f(value)`. Edges
/// connected without a value stay valueless.
///
/// ```
/// use kgraphs::prelude::*;
/// use kgraphs::transform::map_edges;
///
/// let mut g: Graph<&str, u32> = Graph::directed();
/// g.insert_all(["a", "b"]);
/// g.connect_with(&"a", &"b", 21);
///
/// let doubled: Graph<&str, u64> = map_edges(&g, |w| u64::from(*w) * 2);
/// assert_eq!(doubled.edge_value(&"a", &"b"), Some(Some(&42)));
/// ```
pub fn map_edges<V, E, R>(g: &Graph<V, E>, f: impl Fn(&E) -> R) -> Graph<V, R>
where
    V: Clone,
    R: Clone + PartialEq,
{
    let mut mapped: Graph<V, R> =
        Graph::new_with_key(g.is_undirected(), false, g.key_fn().clone());
    mapped.insert_all(g.nodes().cloned());
    for edge in g.edges() {
        match edge.value {
            Some(value) => mapped.connect_with(edge.source, edge.target, f(value)),
            None => mapped.connect(edge.source, edge.target),
        };
    }
    mapped
}

/// Creates a graph of the same variant whose node values are replaced by
/// `f(value)`, keyed by the default key function of `N`.
///
/// If two mapped values collide on the same key they merge into one node;
/// edges between merged nodes become self-loops. Edge values carry over
/// unchanged, with later arcs overwriting earlier ones on collision.
pub fn map_nodes<V, E, N>(g: &Graph<V, E>, f: impl Fn(&V) -> N) -> Graph<N, E>
where
    N: GraphKey,
    E: Clone + PartialEq,
{
    map_nodes_with_key(g, f, crate::key::default_key_fn())
}

/// [`map_nodes`] with an explicitly injected key function for the new node
/// type.
pub fn map_nodes_with_key<V, E, N>(
    g: &Graph<V, E>,
    f: impl Fn(&V) -> N,
    key_fn: KeyFn<N>,
) -> Graph<N, E>
where
    E: Clone + PartialEq,
{
    let mut mapped: Graph<N, E> =
        Graph::new_with_key(g.is_undirected(), g.is_unweighted(), key_fn);
    mapped.insert_all(g.nodes().map(&f));
    for edge in g.edges() {
        let source = f(edge.source);
        let target = f(edge.target);
        match edge.value {
            Some(value) => mapped.connect_with(&source, &target, value.clone()),
            None => mapped.connect(&source, &target),
        };
    }
    mapped
}

/// Creates the subgraph induced by the given node subset: it contains every
/// listed node that exists in `g`, and every edge of `g` whose endpoints both
/// survive, with its value.
pub fn subset<V, E>(g: &Graph<V, E>, nodes: &[V]) -> Graph<V, E>
where
    V: Clone,
    E: Clone + PartialEq,
{
    let keep: fxhash::FxHashSet<NodeKey> = nodes.iter().map(|n| g.key_of(n)).collect();

    let mut sub = g.empty_like();
    sub.insert_all(
        g.nodes()
            .filter(|n| keep.contains(&g.key_of(n)))
            .cloned(),
    );
    for edge in g.edges() {
        if !sub.contains(edge.source) || !sub.contains(edge.target) {
            continue;
        }
        match edge.value {
            Some(value) => sub.connect_with(edge.source, edge.target, value.clone()),
            None => sub.connect(edge.source, edge.target),
        };
    }
    sub
}

/// An adjacency-matrix projection of a graph.
///
/// Rows and columns are indexed by node insertion order; `index_of` maps a
/// node key to its row. `matrix[i][j]` is *true* exactly if an arc from node
/// `i` to node `j` is stored, so undirected graphs yield a symmetric matrix.
#[derive(Debug, Clone)]
pub struct AdjacencyMatrix<V, E> {
    pub matrix: Vec<Vec<bool>>,
    pub values: Vec<Vec<Option<E>>>,
    pub index_of: FxHashMap<NodeKey, usize>,
    pub nodes: Vec<V>,
}

/// Exports the graph as an [`AdjacencyMatrix`].
pub fn adjacency_matrix<V, E>(g: &Graph<V, E>) -> AdjacencyMatrix<V, E>
where
    V: Clone,
    E: Clone,
{
    let n = g.number_of_nodes();
    let index_of: FxHashMap<NodeKey, usize> = g
        .nodes()
        .enumerate()
        .map(|(i, node)| (g.key_of(node), i))
        .collect();

    let mut matrix = vec![vec![false; n]; n];
    let mut values: Vec<Vec<Option<E>>> = (0..n).map(|_| (0..n).map(|_| None).collect()).collect();

    for node in g.nodes() {
        let row = index_of[&g.key_of(node)];
        for edge in g.outgoing_edges_of(node) {
            let col = index_of[&g.key_of(edge.target)];
            matrix[row][col] = true;
            values[row][col] = edge.value.cloned();
        }
    }

    AdjacencyMatrix { matrix, values, index_of, nodes: g.nodes().cloned().collect() }
}
