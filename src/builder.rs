/*!
# Graph Construction

Fluent construction sugar on top of the ordinary `insert`/`connect`
operations. The builder collects the variant choice, an optional key
function, and any pre-populated nodes and edges, then materializes the graph
in one step:

```
use kgraphs::prelude::*;

let g: Graph<&str, u32> = GraphBuilder::new()
    .undirected()
    .node("c")
    .edge_with("a", "b", 7)
    .build();

assert_eq!(g.number_of_nodes(), 3);
assert!(g.has_edge(&"b", &"a"));
```
*/

use crate::{
    key::{GraphKey, KeyFn},
    repr::Graph,
};

/// Builder for all four graph variants. Starts out directed and weighted.
pub struct GraphBuilder<V, E = ()> {
    key_fn: Option<KeyFn<V>>,
    undirected: bool,
    unweighted: bool,
    nodes: Vec<V>,
    edges: Vec<(V, V, Option<E>)>,
}

impl<V, E> GraphBuilder<V, E> {
    pub fn new() -> Self {
        Self {
            key_fn: None,
            undirected: false,
            unweighted: false,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Injects a key function; without one, `build` falls back to the
    /// default key function of `V`.
    pub fn key_fn(mut self, key_fn: KeyFn<V>) -> Self {
        self.key_fn = Some(key_fn);
        self
    }

    /// Edges of the built graph have no orientation.
    pub fn undirected(mut self) -> Self {
        self.undirected = true;
        self
    }

    /// Edges of the built graph are oriented. This is the default.
    pub fn directed(mut self) -> Self {
        self.undirected = false;
        self
    }

    /// Edges of the built graph carry no values.
    pub fn unweighted(mut self) -> Self {
        self.unweighted = true;
        self
    }

    /// Edges of the built graph may carry values. This is the default.
    pub fn weighted(mut self) -> Self {
        self.unweighted = false;
        self
    }

    /// Pre-populates a node.
    pub fn node(mut self, node: V) -> Self {
        self.nodes.push(node);
        self
    }

    /// Pre-populates several nodes.
    pub fn nodes(mut self, nodes: impl IntoIterator<Item = V>) -> Self {
        self.nodes.extend(nodes);
        self
    }

    /// Pre-populates a valueless edge. Endpoints are inserted as nodes if
    /// they are not listed separately.
    pub fn edge(mut self, source: V, target: V) -> Self {
        self.edges.push((source, target, None));
        self
    }

    /// Pre-populates an edge carrying a value. Endpoints are inserted as
    /// nodes if they are not listed separately.
    pub fn edge_with(mut self, source: V, target: V, value: E) -> Self {
        self.edges.push((source, target, Some(value)));
        self
    }

    /// Materializes the graph using an injected key function.
    ///
    /// # Panics
    /// Panics if no key function was injected; use `build` with a
    /// `V: GraphKey` value type instead.
    pub fn build_with_key(self) -> Graph<V, E>
    where
        V: Clone,
        E: Clone + PartialEq,
    {
        let key_fn = self.key_fn.as_ref().expect("no key function injected").clone();
        self.materialize(key_fn)
    }

    fn materialize(self, key_fn: KeyFn<V>) -> Graph<V, E>
    where
        V: Clone,
        E: Clone + PartialEq,
    {
        let mut g = Graph::new_with_key(self.undirected, self.unweighted, key_fn);
        g.insert_all(self.nodes);
        for (source, target, value) in self.edges {
            g.insert(source.clone());
            g.insert(target.clone());
            match value {
                Some(value) => g.connect_with(&source, &target, value),
                None => g.connect(&source, &target),
            };
        }
        g
    }
}

impl<V: GraphKey, E> GraphBuilder<V, E> {
    /// Materializes the graph, defaulting to the key function of `V` if none
    /// was injected.
    pub fn build(self) -> Graph<V, E>
    where
        V: Clone,
        E: Clone + PartialEq,
    {
        let key_fn = self
            .key_fn
            .clone()
            .unwrap_or_else(crate::key::default_key_fn);
        self.materialize(key_fn)
    }
}

impl<V, E> Default for GraphBuilder<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn default_build_is_directed_weighted() {
        let g: Graph<u32, u32> = GraphBuilder::new().edge_with(1, 2, 5).build();
        assert!(!g.is_undirected());
        assert!(!g.is_unweighted());
        assert!(g.has_edge(&1, &2));
        assert!(!g.has_edge(&2, &1));
    }

    #[test]
    fn unweighted_builds_drop_values() {
        let g: Graph<u32, u32> = GraphBuilder::new().unweighted().edge_with(1, 2, 5).build();
        assert!(g.is_unweighted());
        assert_eq!(g.edge_value(&1, &2), Some(None));
    }

    #[test]
    fn injected_key_function_governs_identity() {
        let g: Graph<i32, ()> = GraphBuilder::new()
            .key_fn(Rc::new(|v: &i32| v.abs().to_string()))
            .nodes([3, -3, 4])
            .build_with_key();
        assert_eq!(g.number_of_nodes(), 2);
    }

    #[test]
    fn edge_endpoints_are_inserted_implicitly() {
        let g: Graph<&str, ()> = GraphBuilder::new().undirected().edge("x", "y").build();
        assert!(g.contains_all([&"x", &"y"]));
        assert_eq!(g.number_of_edges(), 1);
    }
}
