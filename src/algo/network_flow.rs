/*!
# Network Flow

Maximum (s, t)-flow via the Edmonds–Karp augmenting-path algorithm.

The input is any weighted graph whose edge values are non-negative integral
capacities. The solver derives a **residual network** from it: a directed,
weighted graph whose arcs carry a `{capacity, flow}` pair ([`FlowArc`]). An
undirected input edge contributes two independent residual arcs, one per
direction. The residual network is owned by the solve and mutated in place as
augmenting paths are applied; the input graph is never touched.

Each round runs a BFS from the source that may move **forward** along an
outgoing arc with leftover capacity (`capacity - flow > 0`) or **backward**
along an incoming arc with positive flow (canceling previously pushed flow —
the backward move reads the original forward arc, there is no second storage
slot for reverse arcs). When the sink is reached, the bottleneck available
along the discovered path is pushed; when it is not, the accumulated flow is
maximum.

Termination is guaranteed because capacities are integral: every augmentation
increases the total flow by at least one, and the total is bounded.
*/

use std::collections::VecDeque;

use fxhash::{FxHashMap, FxHashSet};
use num::PrimInt;

use crate::{key::NodeKey, repr::Graph, transform::map_edges};

/// Residual bookkeeping of a single directed arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowArc<C> {
    pub capacity: C,
    pub flow: C,
}

/// The result of a successful max-flow computation.
#[derive(Debug, Clone)]
pub struct MaxFlow<V, C> {
    /// Total flow pushed from source to sink.
    pub flow: C,
    /// A directed weighted graph with the residual network's topology where
    /// each edge's value is its final flow (capacities stripped).
    pub flow_graph: Graph<V, C>,
}

/// One step of a discovered augmenting path, recorded sink-to-source.
struct Move {
    from: NodeKey,
    to: NodeKey,
    reverse: bool,
}

impl<V: Clone, C: PrimInt> Graph<V, C> {
    /// Computes the maximum flow from `source` to `sink`.
    ///
    /// Returns `None` if a flow is not defined for the input: the graph is
    /// unweighted, an endpoint is missing, an edge carries no value or a
    /// negative capacity, or the sink is not reachable from the source.
    /// Capacities are integral by construction (`C: PrimInt`), which is what
    /// guarantees termination and an integral result.
    ///
    /// ```
    /// use kgraphs::prelude::*;
    ///
    /// let mut g: Graph<&str, u32> = Graph::directed();
    /// g.insert_all(["s", "a", "t"]);
    /// g.connect_with(&"s", &"a", 2);
    /// g.connect_with(&"a", &"t", 3);
    ///
    /// let result = g.find_max_flow(&"s", &"t").unwrap();
    /// assert_eq!(result.flow, 2);
    /// ```
    pub fn find_max_flow(&self, source: &V, sink: &V) -> Option<MaxFlow<V, C>> {
        if self.is_unweighted() || !self.contains(source) || !self.contains(sink) {
            return None;
        }
        for edge in self.edges() {
            match edge.value {
                Some(capacity) if *capacity >= C::zero() => {}
                _ => return None,
            }
        }
        // Reachability on the input graph; without a source-sink route there
        // is no flow to speak of.
        self.shortest_path(source, sink)?;

        let mut residual = self.residual_network();
        let source_key = self.key_of(source);
        let sink_key = self.key_of(sink);

        let mut total = C::zero();
        while let Some((moves, bottleneck)) = augmenting_path(&residual, &source_key, &sink_key) {
            for step in &moves {
                let arc = match residual.arc_value(&step.from, &step.to) {
                    Some(Some(arc)) => *arc,
                    _ => unreachable!("augmenting path leaves the residual network"),
                };
                let flow = if step.reverse {
                    arc.flow - bottleneck
                } else {
                    arc.flow + bottleneck
                };
                residual.update_arc(&step.from, &step.to, FlowArc { flow, ..arc });
            }
            total = total + bottleneck;
        }

        Some(MaxFlow {
            flow: total,
            flow_graph: map_edges(&residual, |arc| arc.flow),
        })
    }

    /// Builds the residual network: a directed weighted twin of the input in
    /// which every original edge becomes a `{capacity, flow: 0}` arc, and
    /// every undirected edge becomes two such arcs.
    fn residual_network(&self) -> Graph<V, FlowArc<C>> {
        let mut residual: Graph<V, FlowArc<C>> =
            Graph::new_with_key(false, false, self.key_fn().clone());
        residual.insert_all(self.nodes().cloned());

        for edge in self.edges() {
            let capacity = match edge.value {
                Some(&capacity) => capacity,
                None => continue, // ruled out by the caller's validation
            };
            let arc = FlowArc { capacity, flow: C::zero() };
            residual.connect_with(edge.source, edge.target, arc);
            if self.is_undirected() && self.key_of(edge.source) != self.key_of(edge.target) {
                residual.connect_with(edge.target, edge.source, arc);
            }
        }
        residual
    }
}

/// BFS for one augmenting path. Returns the moves to apply (sink-to-source)
/// and the bottleneck available along them, or `None` once the sink is no
/// longer discoverable.
fn augmenting_path<V, C: PrimInt>(
    residual: &Graph<V, FlowArc<C>>,
    source_key: &str,
    sink_key: &str,
) -> Option<(Vec<Move>, C)> {
    struct Discovery<'a, C> {
        parent: &'a NodeKey,
        available: C,
        reverse: bool,
    }

    let start = residual.stored_key(source_key)?;
    let mut discovered: FxHashMap<&NodeKey, Discovery<'_, C>> = FxHashMap::default();
    let mut visited: FxHashSet<&NodeKey> = FxHashSet::default();
    let mut queue: VecDeque<&NodeKey> = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);
    let mut found = false;

    'bfs: while let Some(node) = queue.pop_front() {
        // Forward moves: leftover capacity on outgoing arcs.
        let forward = residual
            .out_arcs_of(node)
            .map(|(next, arc)| (next, arc, false));
        // Backward moves: cancelable flow on incoming arcs.
        let backward = residual
            .in_arcs_of(node)
            .map(|(next, arc)| (next, arc, true));

        for (next, arc, reverse) in forward.chain(backward) {
            let Some(arc) = arc.as_ref() else {
                continue; // residual arcs always carry values
            };
            let available = if reverse {
                arc.flow
            } else {
                arc.capacity - arc.flow
            };
            if available <= C::zero() || visited.contains(next) {
                continue;
            }
            visited.insert(next);
            discovered.insert(next, Discovery { parent: node, available, reverse });
            if next == sink_key {
                found = true;
                break 'bfs;
            }
            queue.push_back(next);
        }
    }

    if !found {
        return None;
    }

    let mut moves = Vec::new();
    let mut bottleneck = C::max_value();
    let mut node = residual.stored_key(sink_key)?;
    while node != source_key {
        let step = &discovered[node];
        bottleneck = bottleneck.min(step.available);
        moves.push(if step.reverse {
            // A backward move cancels flow on the original forward arc,
            // which runs `node -> parent`.
            Move { from: node.clone(), to: step.parent.clone(), reverse: true }
        } else {
            Move { from: step.parent.clone(), to: node.clone(), reverse: false }
        });
        node = step.parent;
    }
    Some((moves, bottleneck))
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn network(edges: &[(&'static str, &'static str, i64)]) -> Graph<&'static str, i64> {
        let mut g = Graph::directed();
        for &(u, v, _) in edges {
            g.insert(u);
            g.insert(v);
        }
        for &(u, v, c) in edges {
            g.connect_with(&u, &v, c);
        }
        g
    }

    /// Inflow minus outflow at a node of a solved flow graph.
    fn net_flow<'a>(flow_graph: &Graph<&'a str, i64>, node: &&'a str) -> i64 {
        let inflow: i64 = flow_graph
            .incoming_edges_of(node)
            .iter()
            .filter_map(|e| e.value)
            .sum();
        let outflow: i64 = flow_graph
            .outgoing_edges_of(node)
            .iter()
            .filter_map(|e| e.value)
            .sum();
        inflow - outflow
    }

    #[test]
    fn reference_network_yields_ten() {
        let g = network(&[
            ("s", "A", 7),
            ("s", "D", 4),
            ("A", "B", 5),
            ("A", "C", 3),
            ("D", "A", 3),
            ("D", "C", 2),
            ("C", "B", 3),
            ("B", "t", 8),
            ("C", "t", 5),
        ]);

        let result = g.find_max_flow(&"s", &"t").unwrap();
        assert_eq!(result.flow, 10);

        // Conservation: interior nodes pass everything through, the source
        // emits and the sink absorbs exactly the reported flow.
        for node in ["A", "B", "C", "D"] {
            assert_eq!(net_flow(&result.flow_graph, &node), 0);
        }
        assert_eq!(net_flow(&result.flow_graph, &"s"), -10);
        assert_eq!(net_flow(&result.flow_graph, &"t"), 10);
    }

    #[test]
    fn flow_is_bounded_by_the_narrowest_cut() {
        let g = network(&[("s", "a", 2), ("a", "t", 5)]);
        assert_eq!(g.find_max_flow(&"s", &"t").unwrap().flow, 2);
    }

    #[test]
    fn crossing_paths_fill_the_diamond() {
        // Both unit paths must be found even after a greedy first path takes
        // the cross edge.
        let g = network(&[
            ("s", "a", 1),
            ("s", "b", 1),
            ("a", "b", 1),
            ("a", "t", 1),
            ("b", "t", 1),
        ]);
        assert_eq!(g.find_max_flow(&"s", &"t").unwrap().flow, 2);
    }

    #[test]
    fn undirected_edges_carry_flow_both_ways() {
        let mut g: Graph<&str, i64> = Graph::undirected();
        g.insert_all(["s", "a", "t"]);
        g.connect_with(&"s", &"a", 4);
        g.connect_with(&"a", &"t", 3);

        let result = g.find_max_flow(&"s", &"t").unwrap();
        assert_eq!(result.flow, 3);
        assert!(!result.flow_graph.is_undirected());
    }

    #[test]
    fn zero_capacity_edges_carry_nothing() {
        let g = network(&[("s", "a", 0), ("a", "t", 3)]);
        assert_eq!(g.find_max_flow(&"s", &"t").unwrap().flow, 0);
    }

    #[test]
    fn preconditions_are_checked() {
        // Missing endpoints.
        let g = network(&[("s", "a", 1), ("a", "t", 1)]);
        assert!(g.find_max_flow(&"s", &"missing").is_none());
        assert!(g.find_max_flow(&"missing", &"t").is_none());

        // Unreachable sink.
        let mut g = network(&[("s", "a", 1)]);
        g.insert("t");
        assert!(g.find_max_flow(&"s", &"t").is_none());

        // Negative capacity.
        let g = network(&[("s", "a", -1), ("a", "t", 1)]);
        assert!(g.find_max_flow(&"s", &"t").is_none());

        // An edge without a value.
        let mut g = network(&[("s", "a", 1), ("a", "t", 1)]);
        g.connect(&"s", &"t");
        assert!(g.find_max_flow(&"s", &"t").is_none());

        // Unweighted graphs have no capacities at all.
        let mut g: Graph<&str, i64> = Graph::new(false, true);
        g.insert_all(["s", "t"]);
        g.connect(&"s", &"t");
        assert!(g.find_max_flow(&"s", &"t").is_none());
    }

    #[test]
    fn flow_graph_values_match_arc_flows() {
        let g = network(&[("s", "a", 2), ("s", "b", 1), ("a", "t", 1), ("b", "t", 2)]);
        let result = g.find_max_flow(&"s", &"t").unwrap();
        assert_eq!(result.flow, 2);

        let flows = result
            .flow_graph
            .edges()
            .into_iter()
            .map(|e| ((*e.source, *e.target), *e.value.unwrap()))
            .sorted()
            .collect_vec();
        assert_eq!(
            flows,
            vec![
                (("a", "t"), 1),
                (("b", "t"), 1),
                (("s", "a"), 1),
                (("s", "b"), 1),
            ]
        );
    }
}
