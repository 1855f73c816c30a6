/*!
# Minimum Spanning Tree by Edge Sorting

[`Kruskal`] examines the edges in ascending order of weight (ties keep insertion order) and accepts
an edge unless its endpoints are already connected by accepted edges, which a [`UnionFind`] tells
in near-constant time. Each examined edge is one step.

The run ends early once `n - 1` edges are accepted. If the edges run out before that, the graph is
disconnected and the engine stops with [`AlgoError::Disconnected`].
*/

use itertools::Itertools;
use tracing::{debug, info, warn};

use super::*;
use crate::union_find::UnionFind;

/// Observation of a single Kruskal step
#[derive(Debug, Clone, PartialEq)]
pub struct KruskalStep {
    /// The edge examined in this step
    pub chosen_edge: Edge,
    /// True if the edge would close a cycle and was discarded
    pub cycle: bool,
}

/// Stepped Kruskal.
///
/// # Examples
/// ```
/// use stepgraphs::{algo::*, gens::default_graph};
///
/// let graph = default_graph();
/// let mut kruskal = Kruskal::new(&graph);
///
/// let first = kruskal.step().unwrap();
/// assert_eq!((first.chosen_edge.name.as_str(), first.cycle), ("C-D", false));
///
/// kruskal.run();
/// assert!(kruskal.is_complete());
/// assert_eq!(kruskal.total_weight(), 53.0);
/// ```
#[derive(Debug, Clone)]
pub struct Kruskal<'a> {
    edges: Vec<&'a Edge>,
    /// Node positions of the endpoints of `edges[i]`
    endpoints: Vec<(NodeIndex, NodeIndex)>,
    next: usize,
    union_find: UnionFind,
    accepted: Vec<&'a Edge>,
    target: usize,
    status: Status,
}

impl<'a> Kruskal<'a> {
    /// Sorts the edges of `graph` by weight and prepares an empty forest over its `n` nodes.
    pub fn new(graph: &'a Graph) -> Self {
        let (edges, endpoints): (Vec<_>, Vec<_>) = graph
            .edges()
            .iter()
            .sorted_by(|a, b| a.weight.total_cmp(&b.weight))
            .filter_map(|e| Some((e, (graph.index_of(e.from)?, graph.index_of(e.to)?))))
            .unzip();

        let mut kruskal = Self {
            edges,
            endpoints,
            next: 0,
            union_find: UnionFind::new(graph.len()),
            accepted: Vec::new(),
            target: graph.len().saturating_sub(1),
            status: Status::Running,
        };
        kruskal.update_status();
        kruskal
    }

    /// Number of edges a spanning tree needs, i.e. `n - 1`
    pub fn target(&self) -> usize {
        self.target
    }

    /// Edges not examined yet, in examination order
    pub fn remaining_edges(&self) -> &[&'a Edge] {
        &self.edges[self.next..]
    }

    /// Accepted edges in acceptance order
    pub fn tree_edges(&self) -> Vec<&'a Edge> {
        self.accepted.clone()
    }

    /// Total weight of the accepted edges
    pub fn total_weight(&self) -> f64 {
        self.accepted.iter().map(|e| e.weight).sum()
    }

    fn update_status(&mut self) {
        if self.accepted.len() == self.target {
            info!(weight = self.total_weight(), "spanning tree complete");
            self.status = Status::Complete;
        } else if self.next == self.edges.len() {
            warn!(
                accepted = self.accepted.len(),
                needed = self.target,
                "edges exhausted, graph is disconnected"
            );
            self.status = Status::Failed(AlgoError::Disconnected);
        }
    }
}

impl Stepper for Kruskal<'_> {
    type Step = KruskalStep;

    fn step(&mut self) -> Option<Self::Step> {
        if self.status != Status::Running {
            return None;
        }

        let edge = self.edges[self.next];
        let (u, v) = self.endpoints[self.next];
        self.next += 1;

        let cycle = !self.union_find.union(u, v);
        if !cycle {
            self.accepted.push(edge);
        }
        debug!(edge = %edge, cycle, "examine");

        self.update_status();

        Some(KruskalStep {
            chosen_edge: edge.clone(),
            cycle,
        })
    }

    fn status(&self) -> Status {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::{
        gens::{RandomWeighted, default_graph},
        testing::test_stepper,
    };

    test_stepper!(stepper_contract, |graph| Kruskal::new(graph));

    #[test]
    fn default_graph_steps() {
        let graph = default_graph();
        let mut kruskal = graph.kruskal();
        assert_eq!(kruskal.target(), 7);

        let steps = kruskal.steps().collect_vec();
        assert_eq!(
            steps
                .iter()
                .map(|s| (s.chosen_edge.name.as_str(), s.cycle))
                .collect_vec(),
            vec![
                ("C-D", false),
                ("B-F", false),
                ("A-B", false),
                ("E-F", false),
                ("B-D", false),
                ("F-G", false),
                ("D-E", true),
                ("A-F", true),
                ("B-C", true),
                ("E-H", false),
            ]
        );
        assert!(kruskal.is_complete());
        assert!(kruskal.remaining_edges().is_empty());
        assert_eq!(kruskal.step(), None);
        assert_eq!(kruskal.total_weight(), 53.0);
    }

    #[test]
    fn stops_once_tree_is_complete() {
        let mut graph = default_graph();
        let heavy: NodeId = 7;
        graph.insert_edge("A-H", "A", heavy, 100.0).unwrap();

        let mut kruskal = graph.kruskal();
        assert_eq!(kruskal.steps().count(), 10);
        assert!(kruskal.is_complete());
        assert_eq!(kruskal.remaining_edges().len(), 1);
        assert_eq!(kruskal.remaining_edges()[0].name, "A-H");
    }

    #[test]
    fn disconnected() {
        let mut graph = default_graph();
        graph.insert_node("I", 0.0, 0.0).unwrap();

        let mut kruskal = graph.kruskal();
        let accepted = kruskal.steps().filter(|s| !s.cycle).count();
        assert_eq!(accepted, 7);
        assert!(accepted < kruskal.target());
        assert!(!kruskal.is_complete());
        assert_eq!(kruskal.failure(), Some(AlgoError::Disconnected));
        assert_eq!(graph.minimum_spanning_tree(), Err(AlgoError::Disconnected));
    }

    #[test]
    fn trivial_graphs() {
        let mut graph = Graph::new();
        assert!(graph.kruskal().is_complete());

        graph.insert_node("a", 0.0, 0.0).unwrap();
        assert!(graph.kruskal().is_complete());

        graph.insert_node("b", 0.0, 0.0).unwrap();
        let mut kruskal = graph.kruskal();
        assert_eq!(kruskal.failure(), Some(AlgoError::Disconnected));
        assert_eq!(kruskal.step(), None);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut graph = Graph::new();
        for name in ["a", "b", "c"] {
            graph.insert_node(name, 0.0, 0.0).unwrap();
        }
        graph.insert_edge("first", "a", "b", 1.0).unwrap();
        graph.insert_edge("second", "b", "c", 1.0).unwrap();
        graph.insert_edge("third", "a", "c", 1.0).unwrap();

        let tree = graph.minimum_spanning_tree().unwrap();
        assert_eq!(tree.iter().map(|e| e.name.as_str()).collect_vec(), vec!["first", "second"]);
    }

    #[test]
    fn sparse_ids() {
        let mut graph = Graph::new();
        for (id, name) in [(NodeId::MAX, "a"), (12, "b"), (900_000, "c"), (0, "d")] {
            graph.add_node(id, name, 0.0, 0.0).unwrap();
        }
        graph.insert_edge("a-b", "a", "b", 1.0).unwrap();
        graph.insert_edge("b-c", "b", "c", 2.0).unwrap();
        graph.insert_edge("a-c", "a", "c", 3.0).unwrap();
        graph.insert_edge("c-d", "c", "d", 4.0).unwrap();

        let mut kruskal = graph.kruskal();
        assert_eq!(kruskal.target(), 3);
        assert_eq!(
            kruskal.steps().map(|s| s.cycle).collect_vec(),
            vec![false, false, true, false]
        );
        assert!(kruskal.is_complete());
        assert_eq!(kruskal.total_weight(), 7.0);
    }

    #[test]
    fn agrees_with_prim() {
        let rng = &mut Pcg64Mcg::seed_from_u64(8);

        for n in [2, 5, 12, 40] {
            for _ in 0..5 {
                let graph = RandomWeighted::new()
                    .nodes(n)
                    .extra_edges(3 * n)
                    .generate(rng);

                let mut kruskal = graph.kruskal();
                assert_eq!(kruskal.run(), Status::Complete);
                assert_eq!(kruskal.tree_edges().len(), n as usize - 1);

                let mut prim = graph.prim(NodeRef::Id(0)).unwrap();
                assert_eq!(prim.run(), Status::Complete);

                assert!((kruskal.total_weight() - prim.total_weight()).abs() < 1e-9);
            }
        }
    }
}
