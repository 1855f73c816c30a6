/// Stamps out a test checking the stepping protocol of an engine:
/// - every engine reaches a terminal status within a bounded number of steps,
/// - after the first `None`, further steps keep returning `None` and the status stays put,
/// - `is_complete` and `failure` agree with `status`.
///
/// The engine is built by `$ctor` from a `&Graph` bound to `$graph`, for the demo graph, for
/// random graphs with and without a spanning tree (ids `0..n`, `n >= 1`) and for a graph with
/// sparse ids up to `NodeId::MAX`. Every graph contains node `0`.
macro_rules! test_stepper {
    ($name:ident, |$graph:ident| $ctor:expr) => {
        #[test]
        fn $name() {
            use rand::SeedableRng;
            use rand_pcg::Pcg64Mcg;

            use $crate::{
                Graph, NodeId,
                algo::{Status, Stepper},
                gens::{RandomWeighted, default_graph},
            };

            let rng = &mut Pcg64Mcg::seed_from_u64(0x5eed);

            let mut graphs = vec![default_graph()];
            for n in [1, 2, 6, 15] {
                for connected in [true, false] {
                    graphs.push(
                        RandomWeighted::new()
                            .nodes(n)
                            .extra_edges(n)
                            .connected(connected)
                            .generate(rng),
                    );
                }
            }

            let mut sparse = Graph::new();
            for (id, name) in [(NodeId::MAX, "w"), (0, "x"), (1 << 20, "y"), (77, "z")] {
                sparse.add_node(id, name, 0.0, 0.0).unwrap();
            }
            sparse.insert_edge("w-x", "w", "x", 2.0).unwrap();
            sparse.insert_edge("x-y", "x", "y", 1.0).unwrap();
            sparse.insert_edge("y-w", "y", "w", 4.0).unwrap();
            graphs.push(sparse);

            for graph in &graphs {
                let $graph = graph;
                let mut engine = $ctor;

                let n = graph.len() + graph.number_of_edges() as usize;
                let bound = n * n * n + 1;

                let mut steps = 0;
                while engine.step().is_some() {
                    steps += 1;
                    assert!(steps <= bound, "engine did not terminate");
                }

                let status = engine.status();
                assert!(status.is_terminal());
                assert_eq!(engine.is_complete(), status == Status::Complete);
                assert_eq!(engine.failure().is_some(), !engine.is_complete());

                for _ in 0..3 {
                    assert!(engine.step().is_none());
                    assert_eq!(engine.status(), status);
                }
            }
        }
    };
}

pub(crate) use test_stepper;
