/*!
# Graph Representation

One adjacency representation unifies all four graph variants —
directed/undirected × weighted/unweighted — behind a single API. The two
orientation flags are fixed at construction and consulted by the shared
logic; there is no inheritance chain of per-variant types.

## Storage

- Node values live in a hash map keyed by their [`NodeKey`], together with an
  insertion-order list of keys so that iteration is deterministic.
- Adjacency is a pair of nested maps, `source key -> target key -> arc value`
  and its transposed twin for incoming lookups.
- An arc value is `Option<E>`: a *present* entry with `None` is the explicit
  "edge exists but carries no value" sentinel, distinct from a missing entry.
  Weighted edges may therefore legitimately carry any `E`, including zero.

## Invariants

- For every stored arc `(u, v)` of an undirected graph, the mirror arc
  `(v, u)` holds the same value. Mutations establish and tear down both sides
  atomically; a violation is a bug in this module, not a caller error.
- Removing a node deletes every arc incident to it, in both directions.
- Mutations on absent endpoints return `false`/`0` and never panic, so
  algorithms can treat "no-op" uniformly.
*/

use std::fmt::Debug;

use fxhash::{FxHashMap, FxHashSet};
use itertools::Itertools;

use crate::{
    edge::Edge,
    key::{default_key_fn, GraphKey, KeyFn, NodeKey},
};

type ArcMap<E> = FxHashMap<NodeKey, FxHashMap<NodeKey, Option<E>>>;

/// A graph over arbitrary node values `V` with optional edge values `E`.
///
/// Node identity is governed exclusively by the graph's key function; see
/// [`crate::key`]. The orientation flags are fixed at construction:
///
/// ```
/// use kgraphs::prelude::*;
///
/// let mut g: Graph<&str, u32> = Graph::undirected();
/// g.insert_all(["a", "b"]);
/// assert!(g.connect_with(&"a", &"b", 3));
/// assert!(g.has_edge(&"b", &"a"));
/// ```
#[derive(Clone)]
pub struct Graph<V, E = ()> {
    key_fn: KeyFn<V>,
    nodes: FxHashMap<NodeKey, V>,
    order: Vec<NodeKey>,
    out_arcs: ArcMap<E>,
    in_arcs: ArcMap<E>,
    num_edges: usize,
    undirected: bool,
    unweighted: bool,
}

impl<V, E> Graph<V, E> {
    /// Creates an empty graph of the given variant with an injected key
    /// function.
    pub fn new_with_key(undirected: bool, unweighted: bool, key_fn: KeyFn<V>) -> Self {
        Self {
            key_fn,
            nodes: FxHashMap::default(),
            order: Vec::new(),
            out_arcs: FxHashMap::default(),
            in_arcs: FxHashMap::default(),
            num_edges: 0,
            undirected,
            unweighted,
        }
    }

    /// Creates an empty graph of the same variant and with the same key
    /// function as `self`.
    pub fn empty_like(&self) -> Self {
        Self::new_with_key(self.undirected, self.unweighted, self.key_fn.clone())
    }

    /// Returns *true* if edges of this graph have no orientation.
    pub fn is_undirected(&self) -> bool {
        self.undirected
    }

    /// Returns *true* if edges of this graph carry no values.
    pub fn is_unweighted(&self) -> bool {
        self.unweighted
    }

    /// Returns the key function governing node identity.
    pub fn key_fn(&self) -> &KeyFn<V> {
        &self.key_fn
    }

    /// Returns the canonical key of a value under this graph's key function.
    /// The value does not have to be a node of the graph.
    pub fn key_of(&self, node: &V) -> NodeKey {
        (self.key_fn)(node)
    }

    /// Returns the number of nodes of the graph.
    pub fn number_of_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of logical edges of the graph. A mirrored arc pair
    /// of an undirected graph counts once.
    pub fn number_of_edges(&self) -> usize {
        self.num_edges
    }

    /// Returns *true* if the graph has no nodes (and thus no edges).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns an iterator over all node values in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &V> + '_ {
        self.order.iter().map(|k| &self.nodes[k])
    }

    /// Returns *true* if the node is present in the graph.
    pub fn contains(&self, node: &V) -> bool {
        self.nodes.contains_key(&self.key_of(node))
    }

    /// Returns *true* if every given node is present in the graph.
    pub fn contains_all<'a>(&self, nodes: impl IntoIterator<Item = &'a V>) -> bool
    where
        V: 'a,
    {
        nodes.into_iter().all(|n| self.contains(n))
    }

    /// Adds a node. Returns *true* exactly if no node with the same key was
    /// present before; re-inserting an existing key is a no-op.
    pub fn insert(&mut self, node: V) -> bool {
        let key = self.key_of(&node);
        if self.nodes.contains_key(&key) {
            return false;
        }
        self.order.push(key.clone());
        self.nodes.insert(key, node);
        true
    }

    /// Adds all nodes in the collection and returns the number actually added.
    pub fn insert_all(&mut self, nodes: impl IntoIterator<Item = V>) -> usize {
        let mut added = 0;
        for node in nodes {
            if self.insert(node) {
                added += 1;
            }
        }
        added
    }

    /// Removes a node and every arc incident to it, in both directions.
    /// Returns *true* exactly if the node was present.
    pub fn remove(&mut self, node: &V) -> bool {
        let key = self.key_of(node);
        if !self.nodes.contains_key(&key) {
            return false;
        }

        let outs = self.out_arcs.remove(&key).unwrap_or_default();
        let ins = self.in_arcs.remove(&key).unwrap_or_default();
        let has_loop = outs.contains_key(&key);

        for target in outs.keys() {
            if let Some(arcs) = self.in_arcs.get_mut(target) {
                arcs.remove(&key);
            }
        }
        for source in ins.keys() {
            if let Some(arcs) = self.out_arcs.get_mut(source) {
                arcs.remove(&key);
            }
        }

        self.num_edges -= if self.undirected {
            outs.len()
        } else {
            outs.len() + ins.len() - usize::from(has_loop)
        };

        self.nodes.remove(&key);
        self.order.retain(|k| k != &key);
        true
    }

    /// Removes all given nodes and returns the number actually removed.
    pub fn remove_all<'a>(&mut self, nodes: impl IntoIterator<Item = &'a V>) -> usize
    where
        V: 'a,
    {
        let mut removed = 0;
        for node in nodes {
            if self.remove(node) {
                removed += 1;
            }
        }
        removed
    }

    /// Returns *true* if an edge from `source` to `target` exists, regardless
    /// of its value. On undirected graphs the orientation of the query is
    /// irrelevant.
    pub fn has_edge(&self, source: &V, target: &V) -> bool {
        self.arc_value(&self.key_of(source), &self.key_of(target))
            .is_some()
    }

    /// Returns *true* if an edge from `source` to `target` exists **and**
    /// carries exactly the given value. An edge connected without a value
    /// never matches.
    pub fn has_edge_with(&self, source: &V, target: &V, value: &E) -> bool
    where
        E: PartialEq,
    {
        matches!(
            self.arc_value(&self.key_of(source), &self.key_of(target)),
            Some(Some(stored)) if stored == value
        )
    }

    /// Returns the value of the edge from `source` to `target`.
    ///
    /// The outer `Option` distinguishes "no such edge" (`None`) from an edge
    /// present in the graph; the inner `Option` is `None` for an edge that
    /// carries no value.
    pub fn edge_value(&self, source: &V, target: &V) -> Option<Option<&E>> {
        self.arc_value(&self.key_of(source), &self.key_of(target))
            .map(Option::as_ref)
    }

    /// Creates an edge from `source` to `target` carrying no value.
    ///
    /// Returns *true* exactly if the graph changed: connecting two nodes that
    /// are already connected without a value is a no-op, and connecting an
    /// absent endpoint always fails. On undirected graphs the mirror arc is
    /// established atomically.
    pub fn connect(&mut self, source: &V, target: &V) -> bool
    where
        E: Clone + PartialEq,
    {
        self.connect_impl(source, target, None)
    }

    /// Creates an edge from `source` to `target` carrying `value`.
    ///
    /// If an edge with a different value (or no value) already exists, the
    /// value is replaced and the call still reports a change; connecting with
    /// an identical existing value returns *false*. Unweighted graphs record
    /// the edge but drop the value.
    pub fn connect_with(&mut self, source: &V, target: &V, value: E) -> bool
    where
        E: Clone + PartialEq,
    {
        self.connect_impl(source, target, Some(value))
    }

    fn connect_impl(&mut self, source: &V, target: &V, value: Option<E>) -> bool
    where
        E: Clone + PartialEq,
    {
        let source_key = self.key_of(source);
        let target_key = self.key_of(target);
        if !self.nodes.contains_key(&source_key) || !self.nodes.contains_key(&target_key) {
            return false;
        }

        // The unweighted flag wins over a value handed to `connect_with`.
        let value = if self.unweighted { None } else { value };

        let is_new_arc = match self.arc_value(&source_key, &target_key) {
            Some(stored) if stored == &value => return false,
            Some(_) => false,
            None => true,
        };
        if is_new_arc {
            self.num_edges += 1;
        }

        if self.undirected && source_key != target_key {
            self.store_arc(target_key.clone(), source_key.clone(), value.clone());
        }
        self.store_arc(source_key, target_key, value);
        true
    }

    /// Removes the edge from `source` to `target` regardless of its value.
    /// Returns *true* exactly if an edge was removed; disconnecting two
    /// existing but unconnected nodes returns *false*, not an error. On
    /// undirected graphs the mirror arc is removed atomically.
    pub fn disconnect(&mut self, source: &V, target: &V) -> bool
    where
        E: PartialEq,
    {
        self.disconnect_impl(source, target, None)
    }

    /// Removes the edge from `source` to `target` only if its stored value
    /// equals `value`. An edge connected without a value never matches.
    pub fn disconnect_with(&mut self, source: &V, target: &V, value: &E) -> bool
    where
        E: PartialEq,
    {
        self.disconnect_impl(source, target, Some(value))
    }

    fn disconnect_impl(&mut self, source: &V, target: &V, value: Option<&E>) -> bool
    where
        E: PartialEq,
    {
        let source_key = self.key_of(source);
        let target_key = self.key_of(target);

        let Some(stored) = self.arc_value(&source_key, &target_key) else {
            return false;
        };
        if let Some(requested) = value {
            if stored.as_ref() != Some(requested) {
                return false;
            }
        }

        self.erase_arc(&source_key, &target_key);
        if self.undirected && source_key != target_key {
            self.erase_arc(&target_key, &source_key);
        }
        self.num_edges -= 1;
        true
    }

    /// Returns the degree of a node: the number of incident arcs for directed
    /// graphs (in + out, a self-loop counting twice), and the number of
    /// neighbors for undirected graphs (a self-loop counting once). Absent
    /// nodes have degree `0`.
    pub fn degree_of(&self, node: &V) -> usize {
        if self.undirected {
            self.out_degree_of(node)
        } else {
            self.out_degree_of(node) + self.in_degree_of(node)
        }
    }

    /// Returns the number of arcs leaving the node. Equals
    /// [`degree_of`](Self::degree_of) on undirected graphs.
    pub fn out_degree_of(&self, node: &V) -> usize {
        self.out_arcs
            .get(&self.key_of(node))
            .map_or(0, |arcs| arcs.len())
    }

    /// Returns the number of arcs entering the node. Equals
    /// [`degree_of`](Self::degree_of) on undirected graphs.
    pub fn in_degree_of(&self, node: &V) -> usize {
        self.in_arcs
            .get(&self.key_of(node))
            .map_or(0, |arcs| arcs.len())
    }

    /// Returns a distribution of node degrees, sorted by degree.
    pub fn degree_distribution(&self) -> Vec<(usize, usize)> {
        let mut distr = self
            .nodes()
            .map(|n| self.degree_of(n))
            .counts()
            .into_iter()
            .collect_vec();
        distr.sort_unstable_by_key(|(d, _)| *d);
        distr
    }

    /// Returns the maximum degree in the graph.
    pub fn max_degree(&self) -> usize {
        self.nodes().map(|n| self.degree_of(n)).max().unwrap_or(0)
    }

    /// Returns all edges of the graph. For undirected graphs each logical
    /// edge is emitted exactly once, not once per stored mirror arc.
    pub fn edges(&self) -> Vec<Edge<&V, &E>> {
        let mut edges = Vec::with_capacity(self.num_edges);
        let mut emitted: FxHashSet<(&NodeKey, &NodeKey)> = FxHashSet::default();

        for source_key in &self.order {
            let Some(arcs) = self.out_arcs.get(source_key) else {
                continue;
            };
            for (target_key, value) in arcs {
                if self.undirected {
                    if emitted.contains(&(source_key, target_key)) {
                        continue;
                    }
                    emitted.insert((target_key, source_key));
                }
                edges.push(self.project_arc(source_key, target_key, value));
            }
        }
        edges
    }

    /// Returns all edges leaving the node. Absent nodes yield no edges.
    pub fn outgoing_edges_of(&self, node: &V) -> Vec<Edge<&V, &E>> {
        let key = self.key_of(node);
        self.out_arcs.get(&key).map_or_else(Vec::new, |arcs| {
            arcs.iter()
                .map(|(target_key, value)| self.project_arc(&key, target_key, value))
                .collect()
        })
    }

    /// Returns all edges entering the node. Absent nodes yield no edges.
    pub fn incoming_edges_of(&self, node: &V) -> Vec<Edge<&V, &E>> {
        let key = self.key_of(node);
        self.in_arcs.get(&key).map_or_else(Vec::new, |arcs| {
            arcs.iter()
                .map(|(source_key, value)| self.project_arc(source_key, &key, value))
                .collect()
        })
    }

    fn project_arc<'a>(
        &'a self,
        source_key: &str,
        target_key: &str,
        value: &'a Option<E>,
    ) -> Edge<&'a V, &'a E> {
        Edge {
            source: &self.nodes[source_key],
            target: &self.nodes[target_key],
            value: value.as_ref(),
            undirected: self.undirected,
        }
    }

    fn store_arc(&mut self, source_key: NodeKey, target_key: NodeKey, value: Option<E>)
    where
        E: Clone,
    {
        self.in_arcs
            .entry(target_key.clone())
            .or_default()
            .insert(source_key.clone(), value.clone());
        self.out_arcs
            .entry(source_key)
            .or_default()
            .insert(target_key, value);
    }

    fn erase_arc(&mut self, source_key: &str, target_key: &str) {
        if let Some(arcs) = self.out_arcs.get_mut(source_key) {
            arcs.remove(target_key);
        }
        if let Some(arcs) = self.in_arcs.get_mut(target_key) {
            arcs.remove(source_key);
        }
    }

    pub(crate) fn arc_value(&self, source_key: &str, target_key: &str) -> Option<&Option<E>> {
        self.out_arcs.get(source_key).and_then(|m| m.get(target_key))
    }

    /// Overwrites the value of an existing arc without touching the mirror of
    /// an undirected graph; callers on directed graphs only. Returns *true*
    /// exactly if the arc exists.
    pub(crate) fn update_arc(&mut self, source_key: &str, target_key: &str, value: E) -> bool
    where
        E: Clone,
    {
        let Some(arcs) = self.out_arcs.get_mut(source_key) else {
            return false;
        };
        let Some(stored) = arcs.get_mut(target_key) else {
            return false;
        };
        *stored = Some(value.clone());
        let transposed = self
            .in_arcs
            .get_mut(target_key)
            .and_then(|arcs| arcs.get_mut(source_key))
            .expect("transposed adjacency out of sync");
        *transposed = Some(value);
        true
    }

    /// Node keys in insertion order.
    pub(crate) fn order_keys(&self) -> &[NodeKey] {
        &self.order
    }

    /// The graph-owned canonical key equal to `key`, if the node exists.
    pub(crate) fn stored_key(&self, key: &str) -> Option<&NodeKey> {
        self.nodes.get_key_value(key).map(|(k, _)| k)
    }

    pub(crate) fn value_by_key(&self, key: &str) -> Option<&V> {
        self.nodes.get(key)
    }

    pub(crate) fn out_arcs_of(
        &self,
        key: &str,
    ) -> impl Iterator<Item = (&NodeKey, &Option<E>)> + '_ {
        self.out_arcs.get(key).into_iter().flatten()
    }

    pub(crate) fn in_arcs_of(
        &self,
        key: &str,
    ) -> impl Iterator<Item = (&NodeKey, &Option<E>)> + '_ {
        self.in_arcs.get(key).into_iter().flatten()
    }
}

impl<V: GraphKey, E> Graph<V, E> {
    /// Creates an empty graph of the given variant using the default key
    /// function of `V`.
    pub fn new(undirected: bool, unweighted: bool) -> Self {
        Self::new_with_key(undirected, unweighted, default_key_fn())
    }

    /// An empty directed, weighted graph.
    pub fn directed() -> Self {
        Self::new(false, false)
    }

    /// An empty undirected, weighted graph.
    pub fn undirected() -> Self {
        Self::new(true, false)
    }

    /// An empty directed, unweighted graph.
    pub fn directed_unweighted() -> Self {
        Self::new(false, true)
    }

    /// An empty undirected, unweighted graph.
    pub fn undirected_unweighted() -> Self {
        Self::new(true, true)
    }
}

impl<V: Debug, E: Debug> Debug for Graph<V, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("undirected", &self.undirected)
            .field("unweighted", &self.unweighted)
            .field("nodes", &self.nodes().collect::<Vec<_>>())
            .field("edges", &self.edges())
            .finish()
    }
}

crate::testing::graph_variant_tests!(directed_weighted_ops, false, false);
crate::testing::graph_variant_tests!(directed_unweighted_ops, false, true);
crate::testing::graph_variant_tests!(undirected_weighted_ops, true, false);
crate::testing::graph_variant_tests!(undirected_unweighted_ops, true, true);

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn identity_is_governed_by_the_key_function() {
        // All numbers with the same absolute value collapse to one node.
        let mut g: Graph<i32, ()> =
            Graph::new_with_key(false, true, std::rc::Rc::new(|v: &i32| v.abs().to_string()));

        assert!(g.insert(3));
        assert!(!g.insert(-3));
        assert_eq!(g.number_of_nodes(), 1);
        assert!(g.contains(&3) && g.contains(&-3));
    }

    #[test]
    fn nodes_iterate_in_insertion_order() {
        let mut g: Graph<u32> = Graph::directed_unweighted();
        g.insert_all([4, 2, 9, 2, 7]);
        assert_eq!(g.nodes().copied().collect_vec(), vec![4, 2, 9, 7]);

        g.remove(&2);
        assert_eq!(g.nodes().copied().collect_vec(), vec![4, 9, 7]);
    }

    #[test]
    fn weighted_connect_replaces_values() {
        let mut g: Graph<&str, u32> = Graph::directed();
        g.insert_all(["a", "b"]);

        assert!(g.connect_with(&"a", &"b", 1));
        assert!(!g.connect_with(&"a", &"b", 1)); // identical value: no-op
        assert!(g.connect_with(&"a", &"b", 2)); // different value: replaced
        assert_eq!(g.edge_value(&"a", &"b"), Some(Some(&2)));
        assert_eq!(g.number_of_edges(), 1);
    }

    #[test]
    fn valueless_and_valued_edges_stay_distinct() {
        let mut g: Graph<&str, u32> = Graph::directed();
        g.insert_all(["a", "b"]);

        assert!(g.connect(&"a", &"b"));
        assert_eq!(g.edge_value(&"a", &"b"), Some(None));
        assert!(!g.has_edge_with(&"a", &"b", &0));

        // Upgrading to a value (even zero) is a change.
        assert!(g.connect_with(&"a", &"b", 0));
        assert!(g.has_edge_with(&"a", &"b", &0));
        assert_eq!(g.number_of_edges(), 1);
    }

    #[test]
    fn disconnect_with_requires_a_value_match() {
        let mut g: Graph<&str, u32> = Graph::directed();
        g.insert_all(["a", "b", "c"]);
        g.connect_with(&"a", &"b", 5);
        g.connect(&"a", &"c");

        assert!(!g.disconnect_with(&"a", &"b", &7));
        assert!(!g.disconnect_with(&"a", &"c", &5)); // valueless arc never matches
        assert!(g.disconnect_with(&"a", &"b", &5));
        assert!(g.disconnect(&"a", &"c"));
        assert_eq!(g.number_of_edges(), 0);
    }

    #[test]
    fn undirected_self_loop_counts_once() {
        let mut g: Graph<u32, ()> = Graph::undirected_unweighted();
        g.insert_all([1, 2]);
        g.connect(&1, &1);
        g.connect(&1, &2);

        assert_eq!(g.degree_of(&1), 2);
        assert_eq!(g.in_degree_of(&1), 2);
        assert_eq!(g.out_degree_of(&1), 2);
        assert_eq!(g.number_of_edges(), 2);
    }

    #[test]
    fn directed_self_loop_counts_twice() {
        let mut g: Graph<u32, ()> = Graph::directed_unweighted();
        g.insert(1);
        g.connect(&1, &1);

        assert_eq!(g.out_degree_of(&1), 1);
        assert_eq!(g.in_degree_of(&1), 1);
        assert_eq!(g.degree_of(&1), 2);
        assert_eq!(g.number_of_edges(), 1);
    }

    #[test]
    fn undirected_edges_are_emitted_once() {
        let mut g: Graph<u32, u32> = Graph::undirected();
        g.insert_all([1, 2, 3]);
        g.connect_with(&1, &2, 12);
        g.connect_with(&2, &3, 23);
        g.connect(&3, &3);

        let edges = g.edges();
        assert_eq!(edges.len(), 3);
        assert_eq!(g.number_of_edges(), 3);

        let endpoint_sets = edges
            .iter()
            .map(|e| {
                let (a, b) = (*e.source, *e.target);
                (a.min(b), a.max(b))
            })
            .sorted()
            .collect_vec();
        assert_eq!(endpoint_sets, vec![(1, 2), (2, 3), (3, 3)]);
    }

    #[test]
    fn removal_deletes_incident_arcs_in_both_directions() {
        let mut g: Graph<u32, u32> = Graph::directed();
        g.insert_all([1, 2, 3]);
        g.connect_with(&1, &2, 1);
        g.connect_with(&2, &3, 2);
        g.connect_with(&3, &2, 3);
        g.connect_with(&2, &2, 4);

        assert!(g.remove(&2));
        assert_eq!(g.degree_of(&2), 0);
        assert!(g.incoming_edges_of(&2).is_empty());
        assert!(g.outgoing_edges_of(&2).is_empty());
        assert_eq!(g.number_of_edges(), 0);
        assert!(g.edges().is_empty());
    }

    #[test]
    fn queries_on_absent_nodes_are_empty_not_errors() {
        let mut g: Graph<&str, u32> = Graph::directed();
        g.insert("a");

        assert_eq!(g.degree_of(&"ghost"), 0);
        assert!(g.outgoing_edges_of(&"ghost").is_empty());
        assert!(g.incoming_edges_of(&"ghost").is_empty());
        assert!(!g.connect_with(&"a", &"ghost", 1));
        assert!(!g.disconnect(&"a", &"ghost"));
        assert!(!g.remove(&"ghost"));
    }
}
