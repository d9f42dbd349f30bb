/*!
# Topological Ordering

Kahn's algorithm over the key-level adjacency: repeatedly emit a node without
remaining predecessors and relax its successors. An ordering exists exactly
for directed acyclic graphs, so the entry point rejects undirected graphs
with edges and cyclic graphs up front.
*/

use std::collections::VecDeque;

use fxhash::FxHashMap;

use crate::{key::NodeKey, repr::Graph};

impl<V: Clone, E> Graph<V, E> {
    /// Returns the nodes in a topological order, or `None` if no such order
    /// exists — that is, for a cyclic graph or an undirected graph with at
    /// least one edge. For every edge `(u, v)` of a DAG, `u` precedes `v` in
    /// the returned ordering, and the ordering covers every node.
    ///
    /// ```
    /// use kgraphs::prelude::*;
    ///
    /// let mut g: Graph<&str> = Graph::directed_unweighted();
    /// g.insert_all(["shirt", "tie", "jacket"]);
    /// g.connect(&"shirt", &"tie");
    /// g.connect(&"tie", &"jacket");
    ///
    /// assert_eq!(g.topological_sort(), Some(vec!["shirt", "tie", "jacket"]));
    /// ```
    pub fn topological_sort(&self) -> Option<Vec<V>> {
        if self.is_undirected() && self.number_of_edges() > 0 {
            return None;
        }
        if self.has_cycle() {
            return None;
        }

        let mut in_degrees: FxHashMap<&NodeKey, usize> = self
            .order_keys()
            .iter()
            .map(|key| (key, self.in_arcs_of(key).count()))
            .collect();

        // Seeding in insertion order keeps the result deterministic.
        let mut queue: VecDeque<&NodeKey> = self
            .order_keys()
            .iter()
            .filter(|key| in_degrees[*key] == 0)
            .collect();

        let mut ordering = Vec::with_capacity(self.number_of_nodes());
        while let Some(node) = queue.pop_front() {
            ordering.push(self.value_by_key(node).expect("keys are nodes").clone());
            for (succ, _) in self.out_arcs_of(node) {
                let remaining = in_degrees.get_mut(succ).expect("successors are nodes");
                *remaining -= 1;
                if *remaining == 0 {
                    queue.push_back(succ);
                }
            }
        }

        debug_assert_eq!(ordering.len(), self.number_of_nodes());
        Some(ordering)
    }
}
