/*!
`kgraphs` is a graph data structure & algorithms library designed for graphs that are
- **k**eyed : Node values are arbitrary; identity is governed by a pluggable key function
- directed **or** undirected, weighted **or** unweighted — all four variants behind one API

# Representation

We represent **nodes** as arbitrary values of a type `V`. Two values are the same node
exactly if their canonical string keys are equal — see the [`key`] module. The key
function is injected at construction; by default it is derived from the value
([`GraphKey`](key::GraphKey)), and [`structural_key`](key::structural_key) covers plain
data types so that structurally-equal instances collide to the same node.
**Edges** are projections ([`Edge`](edge::Edge)) over an adjacency structure that maps
node keys to neighbor keys and optional edge values.

### Directed vs Undirected

Both orientations are supported by the same [`Graph`](repr::Graph) type:

- In an **undirected** graph, every edge is stored as two mirrored arcs that are kept
  in sync atomically; queries and edge listings treat them as one logical edge.
- In a **directed** graph, the arc from `u` to `v` is distinct from the arc from `v` to `u`.

Whether edges carry values is the second construction-time flag. A present edge
without a value is distinct from an absent edge, so weighted edges may legitimately
carry zero or any other "falsy" value.

# Design

The graph is built and mutated through ordinary operations (`insert`, `connect`,
`remove`, `disconnect`) that report what they did via return values instead of
errors: mutations on missing nodes are uniform no-ops. Algorithms consume the
read-only query surface and are exposed as methods on the graph itself; see [`algo`].

# Usage

There are *5* core submodules you probably want to interact with:
- [`prelude`] re-exports the graph type, edges, keys and the builder,
- [`algo`] provides cycle detection, BFS shortest paths, topological ordering and
  Edmonds–Karp maximum flow as methods on the graph,
- [`builder`] provides fluent one-expression construction,
- [`transform`] provides structural copies: mapped edge/node values, induced
  subgraphs and an adjacency-matrix export,
- [`io`] converts graphs to and from a plain JSON exchange record.

In most use-cases, `use kgraphs::prelude::*;` suffices for your needs.

```
use kgraphs::prelude::*;

let mut g: Graph<&str, u32> = Graph::directed();
g.insert_all(["a", "b", "c"]);
g.connect_with(&"a", &"b", 1);
g.connect_with(&"b", &"c", 1);

assert_eq!(g.shortest_path(&"a", &"c"), Some(vec!["a", "b", "c"]));
assert!(!g.has_cycle());
```

# When to use

You should only use this library if your node values need identity beyond plain
integers — deduplicated domain objects, string ids, structural records. For dense
integer-indexed graphs where performance dominates, an index-based representation
such as [petgraph](https://crates.io/crates/petgraph) is the better fit.
*/

pub mod algo;
pub mod builder;
pub mod edge;
pub mod io;
pub mod key;
pub mod repr;
pub mod transform;

pub(crate) mod testing;

/// `kgraphs::prelude` includes the graph type, edge projection, key machinery and the builder.
pub mod prelude {
    pub use super::{
        algo::{FlowArc, MaxFlow},
        builder::GraphBuilder,
        edge::Edge,
        key::{GraphKey, KeyFn, NodeKey},
        repr::Graph,
    };
}
