use rand::Rng;
use rand_distr::{Distribution, Uniform};

use super::*;

/// Generator for random weighted graphs.
///
/// Nodes get ids `0..n`, their id as name and random coordinates in `[0, 1000)^2`.
/// If `connected` is set (the default), every node `u > 0` is first attached to a uniformly chosen
/// node `v < u`, which yields a random spanning tree. Then `extra_edges` further edges between
/// uniformly chosen distinct nodes are added; these may run parallel to existing ones.
/// All weights are whole numbers drawn uniformly from `[1, max_weight]`.
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use rand_pcg::Pcg64Mcg;
/// use stepgraphs::{algo::*, gens::RandomWeighted};
///
/// let rng = &mut Pcg64Mcg::seed_from_u64(1);
/// let graph = RandomWeighted::new().nodes(10).extra_edges(5).generate(rng);
///
/// assert_eq!(graph.number_of_nodes(), 10);
/// assert_eq!(graph.number_of_edges(), 9 + 5);
/// assert!(graph.minimum_spanning_tree().is_ok());
/// ```
#[derive(Debug, Copy, Clone)]
pub struct RandomWeighted {
    n: NumNodes,
    extra_edges: NumEdges,
    max_weight: u32,
    connected: bool,
}

impl Default for RandomWeighted {
    fn default() -> Self {
        Self {
            n: 0,
            extra_edges: 0,
            max_weight: 20,
            connected: true,
        }
    }
}

impl RandomWeighted {
    /// Creates a generator for connected graphs with weights in `[1, 20]`
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_nodes(&mut self, n: NumNodes) {
        self.n = n;
    }

    /// Sets the number of nodes
    pub fn nodes(mut self, n: NumNodes) -> Self {
        self.set_nodes(n);
        self
    }

    pub fn set_extra_edges(&mut self, m: NumEdges) {
        self.extra_edges = m;
    }

    /// Sets the number of edges added on top of the spanning tree
    pub fn extra_edges(mut self, m: NumEdges) -> Self {
        self.set_extra_edges(m);
        self
    }

    /// Sets the largest possible weight; values below `1` are raised to `1`
    pub fn set_max_weight(&mut self, max_weight: u32) {
        self.max_weight = max_weight.max(1);
    }

    /// Sets the largest possible weight; values below `1` are raised to `1`
    pub fn max_weight(mut self, max_weight: u32) -> Self {
        self.set_max_weight(max_weight);
        self
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// If set, the graph contains a random spanning tree
    pub fn connected(mut self, connected: bool) -> Self {
        self.set_connected(connected);
        self
    }

    /// Generates a new graph
    pub fn generate<R>(&self, rng: &mut R) -> Graph
    where
        R: Rng,
    {
        let weight_gen =
            Uniform::new_inclusive(1, self.max_weight.max(1)).expect("weight range is non-empty");
        let mut graph = Graph::new();

        for u in 0..self.n {
            let (x, y) = (rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0));
            graph
                .add_node(u, u.to_string(), x, y)
                .expect("ids and names are unique");
        }

        let edge = |graph: &mut Graph, rng: &mut R, u: NodeId, v: NodeId| {
            let weight = weight_gen.sample(rng) as f64;
            graph
                .insert_edge(format!("{u}-{v}"), u, v, weight)
                .expect("endpoints are distinct and exist");
        };

        if self.connected {
            for u in 1..self.n {
                let v = rng.random_range(0..u);
                edge(&mut graph, rng, v, u);
            }
        }

        if self.n >= 2 {
            for _ in 0..self.extra_edges {
                let u = rng.random_range(0..self.n);
                let v = (u + rng.random_range(1..self.n)) % self.n;
                edge(&mut graph, rng, u.min(v), u.max(v));
            }
        }

        graph
    }
}
