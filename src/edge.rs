/*!
# Edge Representation

An [`Edge`] is a *projection*, not a stored entity: the adjacency structure
stores directed arcs keyed by node identity, and the query surface
([`edges`](crate::repr::Graph::edges),
[`outgoing_edges_of`](crate::repr::Graph::outgoing_edges_of),
[`incoming_edges_of`](crate::repr::Graph::incoming_edges_of)) materializes
edges on demand, borrowing the node and value storage of the graph.

For undirected graphs an edge is backed by two mirrored arcs, but `edges()`
emits each logical edge exactly once.
*/

use std::fmt::{Debug, Display};

/// A single edge of a graph, as seen by a caller.
///
/// Queries produce `Edge<&V, &E>`: endpoints and value borrow the graph.
/// `value` is `None` for edges of unweighted graphs and for edges connected
/// without a value; an absent edge is never represented by an `Edge` at all,
/// so a `None` value cannot be confused with "no edge".
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge<V, E> {
    pub source: V,
    pub target: V,
    pub value: Option<E>,
    /// *true* iff the owning graph is undirected and this edge stands for a
    /// mirrored arc pair.
    pub undirected: bool,
}

impl<V, E> Edge<V, E> {
    /// Reverses the edge by switching the endpoints.
    pub fn reverse(self) -> Self {
        Edge {
            source: self.target,
            target: self.source,
            value: self.value,
            undirected: self.undirected,
        }
    }

    /// Returns the endpoints as a `(source, target)` pair, dropping the value.
    pub fn endpoints(self) -> (V, V) {
        (self.source, self.target)
    }
}

impl<V: Display, E: Display> Display for Edge<V, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arrow = if self.undirected { "--" } else { "->" };
        match &self.value {
            Some(value) => write!(f, "({} {} {} : {})", self.source, arrow, self.target, value),
            None => write!(f, "({} {} {})", self.source, arrow, self.target),
        }
    }
}

impl<V: Debug, E: Debug> Debug for Edge<V, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arrow = if self.undirected { "--" } else { "->" };
        match &self.value {
            Some(value) => write!(
                f,
                "({:?} {} {:?} : {:?})",
                self.source, arrow, self.target, value
            ),
            None => write!(f, "({:?} {} {:?})", self.source, arrow, self.target),
        }
    }
}
