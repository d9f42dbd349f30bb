/*!
# Cycle Detection

A cycle is a non-empty walk that starts and ends at the same node using
distinct edges; a self-loop counts as a cycle. The two orientations need
different strategies and are dispatched on the graph's orientation flag:

- **directed**: iterative 3-color DFS. Nodes on the current DFS path are
  *gray*; meeting a gray successor closes a directed cycle. Fully explored
  nodes turn *black* and are never revisited.
- **undirected**: DFS over the mirrored adjacency, tracking for each frontier
  entry the node it was discovered from. Re-reaching a visited node is a
  cycle unless it is exactly the mirror arc back to the immediate parent.

Both restart per unvisited root, so disconnected components are covered.
*/

use fxhash::{FxHashMap, FxHashSet};

use crate::{key::NodeKey, repr::Graph};

const WHITE: u8 = 0;
const GRAY: u8 = 1;
const BLACK: u8 = 2;

impl<V, E> Graph<V, E> {
    /// Returns *true* if the graph contains a cycle.
    ///
    /// ```
    /// use kgraphs::prelude::*;
    ///
    /// let mut g: Graph<u32> = Graph::directed_unweighted();
    /// g.insert_all([0, 1, 2]);
    /// g.connect(&0, &1);
    /// g.connect(&1, &2);
    /// assert!(!g.has_cycle());
    ///
    /// g.connect(&2, &0);
    /// assert!(g.has_cycle());
    /// ```
    pub fn has_cycle(&self) -> bool {
        if self.is_undirected() {
            self.has_cycle_undirected()
        } else {
            self.has_cycle_directed()
        }
    }

    fn has_cycle_directed(&self) -> bool {
        let mut color: FxHashMap<&NodeKey, u8> = FxHashMap::default();
        // (node, successors, next successor index); an explicit stack instead
        // of recursion keeps deep graphs from exhausting the call stack.
        let mut stack: Vec<(&NodeKey, Vec<&NodeKey>, usize)> = Vec::new();

        for root in self.order_keys() {
            if color.get(root).copied().unwrap_or(WHITE) != WHITE {
                continue;
            }

            color.insert(root, GRAY);
            stack.push((root, self.out_arcs_of(root).map(|(t, _)| t).collect(), 0));

            while let Some(top) = stack.last_mut() {
                let node = top.0;
                let next = top.1.get(top.2).copied();
                top.2 += 1;

                let Some(succ) = next else {
                    color.insert(node, BLACK);
                    stack.pop();
                    continue;
                };
                match color.get(succ).copied().unwrap_or(WHITE) {
                    GRAY => return true,
                    BLACK => {}
                    _ => {
                        color.insert(succ, GRAY);
                        let succs = self.out_arcs_of(succ).map(|(t, _)| t).collect();
                        stack.push((succ, succs, 0));
                    }
                }
            }
        }
        false
    }

    fn has_cycle_undirected(&self) -> bool {
        let mut visited: FxHashSet<&NodeKey> = FxHashSet::default();
        let mut stack: Vec<(&NodeKey, Option<&NodeKey>)> = Vec::new();

        for root in self.order_keys() {
            if visited.contains(root) {
                continue;
            }
            stack.clear();
            stack.push((root, None));

            while let Some((node, parent)) = stack.pop() {
                if !visited.insert(node) {
                    return true;
                }
                for (neighbor, _) in self.out_arcs_of(node) {
                    // The mirror arc back to the immediate parent is the same
                    // logical edge, not a cycle.
                    if parent != Some(neighbor) {
                        stack.push((neighbor, Some(node)));
                    }
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use crate::repr::Graph;

    fn ring(n: u32) -> Graph<u32, ()> {
        let mut g = Graph::directed_unweighted();
        g.insert_all(0..n);
        for u in 0..n {
            g.connect(&u, &((u + 1) % n));
        }
        g
    }

    #[test]
    fn empty_graph_has_no_cycle() {
        let g: Graph<u32> = Graph::directed_unweighted();
        assert!(!g.has_cycle());
        let g: Graph<u32> = Graph::undirected_unweighted();
        assert!(!g.has_cycle());
    }

    #[test]
    fn directed_ring_has_a_cycle() {
        assert!(ring(5).has_cycle());
    }

    #[test]
    fn broken_ring_has_no_cycle() {
        let mut g = ring(5);
        assert!(g.disconnect(&4, &0));
        assert!(!g.has_cycle());
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let mut g: Graph<u32> = Graph::directed_unweighted();
        g.insert(1);
        assert!(!g.has_cycle());
        g.connect(&1, &1);
        assert!(g.has_cycle());

        let mut g: Graph<u32> = Graph::undirected_unweighted();
        g.insert(1);
        g.connect(&1, &1);
        assert!(g.has_cycle());
    }

    #[test]
    fn antiparallel_arcs_are_a_directed_cycle() {
        let mut g: Graph<u32> = Graph::directed_unweighted();
        g.insert_all([1, 2]);
        g.connect(&1, &2);
        assert!(!g.has_cycle());
        g.connect(&2, &1);
        assert!(g.has_cycle());
    }

    #[test]
    fn undirected_mirror_is_not_a_cycle() {
        let mut g: Graph<u32> = Graph::undirected_unweighted();
        g.insert_all([1, 2, 3]);
        g.connect(&1, &2);
        g.connect(&2, &3);
        assert!(!g.has_cycle());

        g.connect(&3, &1);
        assert!(g.has_cycle());
    }

    #[test]
    fn disconnected_components_are_searched() {
        // An acyclic component first, the cycle hidden in a later one.
        let mut g: Graph<u32> = Graph::directed_unweighted();
        g.insert_all(0..6);
        g.connect(&0, &1);
        g.connect(&3, &4);
        g.connect(&4, &5);
        g.connect(&5, &3);
        assert!(g.has_cycle());

        let mut g: Graph<u32> = Graph::undirected_unweighted();
        g.insert_all(0..5);
        g.connect(&0, &1);
        g.connect(&2, &3);
        g.connect(&3, &4);
        g.connect(&4, &2);
        assert!(g.has_cycle());
    }
}
