/// Shared operation test-suite, instantiated once per graph variant.
///
/// The suite checks the contracts that must hold uniformly across all four
/// variants: key-based identity, connect/disconnect signalling, the mirror
/// invariant, degree bookkeeping and node removal. Variant-specific behavior
/// is covered by the dedicated test modules next to each algorithm.
macro_rules! graph_variant_tests {
    ($env:ident, $undirected:literal, $unweighted:literal) => {
        #[cfg(test)]
        mod $env {
            use crate::repr::Graph;
            use itertools::Itertools;
            use rand::{Rng, SeedableRng};
            use rand_pcg::Pcg64Mcg;

            fn graph() -> Graph<u32, i64> {
                Graph::new($undirected, $unweighted)
            }

            fn connected(g: &mut Graph<u32, i64>, u: u32, v: u32) -> bool {
                if $unweighted {
                    g.connect(&u, &v)
                } else {
                    g.connect_with(&u, &v, (u * 1000 + v) as i64)
                }
            }

            #[test]
            fn insert_is_keyed_and_counted() {
                let mut g = graph();
                assert_eq!(g.insert_all([1, 2, 3]), 3);
                assert_eq!(g.insert_all([3, 4]), 1);
                assert_eq!(g.number_of_nodes(), 4);
                assert!(g.contains_all([&1, &2, &3, &4]));
                assert!(!g.contains(&5));
            }

            #[test]
            fn connect_requires_both_endpoints() {
                let mut g = graph();
                g.insert(1);
                assert!(!connected(&mut g, 1, 2));
                assert!(!connected(&mut g, 2, 1));
                assert_eq!(g.number_of_edges(), 0);

                g.insert(2);
                assert!(connected(&mut g, 1, 2));
                assert_eq!(g.number_of_edges(), 1);
            }

            #[test]
            fn reconnect_is_a_no_op() {
                let mut g = graph();
                g.insert_all([1, 2]);
                assert!(connected(&mut g, 1, 2));
                assert!(!connected(&mut g, 1, 2));
                assert_eq!(g.number_of_edges(), 1);
            }

            #[test]
            fn disconnect_unconnected_is_false() {
                let mut g = graph();
                g.insert_all([1, 2]);
                assert!(!g.disconnect(&1, &2));

                assert!(connected(&mut g, 1, 2));
                assert!(g.disconnect(&1, &2));
                assert!(!g.disconnect(&1, &2));
                assert!(!g.has_edge(&1, &2));
            }

            #[test]
            fn removal_clears_all_incident_arcs() {
                let mut g = graph();
                g.insert_all([1, 2, 3, 4]);
                assert!(connected(&mut g, 1, 2));
                assert!(connected(&mut g, 2, 3));
                assert!(connected(&mut g, 4, 2));
                assert!(connected(&mut g, 2, 2));

                assert_eq!(g.remove_all([&2, &7]), 1);
                assert_eq!(g.degree_of(&2), 0);
                assert!(g.incoming_edges_of(&2).is_empty());
                assert!(g.outgoing_edges_of(&2).is_empty());
                assert!(g
                    .edges()
                    .iter()
                    .all(|e| *e.source != 2 && *e.target != 2));
            }

            #[test]
            fn random_mutations_keep_adjacency_consistent() {
                let rng = &mut Pcg64Mcg::seed_from_u64(7);
                let n = 12u32;

                let mut g = graph();
                g.insert_all(0..n);

                for _ in 0..500 {
                    let u = rng.random_range(0..n);
                    let v = rng.random_range(0..n);
                    if rng.random_bool(0.7) {
                        connected(&mut g, u, v);
                    } else {
                        g.disconnect(&u, &v);
                    }

                    if $undirected {
                        assert_eq!(g.has_edge(&u, &v), g.has_edge(&v, &u));
                    }
                }

                // Logical edge count matches what the edge projection emits,
                // and every reported edge answers `has_edge`.
                let edges = g.edges().into_iter().map(|e| (*e.source, *e.target)).collect_vec();
                assert_eq!(edges.len(), g.number_of_edges());
                for (u, v) in edges {
                    assert!(g.has_edge(&u, &v));
                }

                // Degrees add up: every variant counts each self-loop-free
                // logical edge twice over all nodes.
                let degree_sum: usize = (0..n).map(|u| g.degree_of(&u)).sum();
                let loops = (0..n).filter(|u| g.has_edge(u, u)).count();
                let expected = if $undirected {
                    2 * g.number_of_edges() - loops
                } else {
                    2 * g.number_of_edges()
                };
                assert_eq!(degree_sum, expected);
            }
        }
    };
}

pub(crate) use graph_variant_tests;
