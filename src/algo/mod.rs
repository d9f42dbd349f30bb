/*!
# Graph Algorithms

This module provides the classical algorithms built on top of the graph
representation in this crate. All of them consume the graph through its
read-only query surface and are exposed as methods on
[`Graph`](crate::repr::Graph):

- [cycle detection](crate::repr::Graph::has_cycle) for both orientations,
- [breadth-first shortest paths](crate::repr::Graph::shortest_path),
- [topological ordering](crate::repr::Graph::topological_sort) of DAGs,
- [maximum flow](crate::repr::Graph::find_max_flow) via augmenting paths.

Everything is synchronous and allocation-local: an algorithm call runs to
completion and returns a value, with no background state left behind. The
only mutation ever performed is on the *derived* residual network owned by a
max-flow call, never on the input graph.
*/

mod cycle;
mod network_flow;
mod shortest_path;
mod topo;

pub use network_flow::{FlowArc, MaxFlow};
