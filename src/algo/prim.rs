/*!
# Minimum Spanning Tree by Vertex Growth

[`Prim`] starts with every node in the queue (the source at key `0`, all others at `f64::INFINITY`)
and admits one vertex to the tree per step: the pending vertex with the lightest edge into the
tree. Keys of its neighbors outside the tree are lowered via decrease-key.

If the next vertex still has an infinite key, it cannot be reached from the source and no spanning
tree exists; the engine then stops with [`AlgoError::NoFeasibleTree`].
*/

use tracing::{debug, error, info};

use super::*;
use crate::queue::{Entry, PriorityQueue};

/// Edge connecting a vertex to its parent in the spanning tree
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TreeEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: f64,
}

/// Observation of a single Prim step
#[derive(Debug, Clone, PartialEq)]
pub struct PrimStep {
    /// Vertex admitted to the tree in this step
    pub vertex_in_mst: NodeId,
    /// Edge joining the vertex to the tree; `None` for the source
    pub chosen_edge: Option<TreeEdge>,
    /// Pending vertices in heap layout after this step
    pub queue: Vec<Entry<NodeId>>,
}

/// Stepped Prim.
///
/// Keys, parents and tree membership are indexed by node position (see [`Graph::index_of`]);
/// every accessor taking or returning nodes speaks in node ids.
///
/// # Examples
/// ```
/// use stepgraphs::{algo::*, gens::default_graph};
///
/// let graph = default_graph();
/// let mut prim = Prim::new(&graph, "A").unwrap();
///
/// let first = prim.step().unwrap();
/// assert_eq!((first.vertex_in_mst, first.chosen_edge), (0, None));
///
/// prim.run();
/// assert!(prim.is_complete());
/// assert_eq!(prim.total_weight(), 53.0);
/// ```
#[derive(Debug, Clone)]
pub struct Prim<'a> {
    graph: &'a Graph,
    in_tree: NodeBitSet,
    parent: Vec<Option<OptionalIndex>>,
    key: Vec<f64>,
    queue: PriorityQueue<NodeIndex>,
    status: Status,
}

impl<'a> Prim<'a> {
    /// Creates a new engine that grows the tree from `source`.
    ///
    /// # Errors
    /// Fails with [`GraphError::NodeNotFound`] if `source` does not exist.
    pub fn new<'n>(graph: &'a Graph, source: impl Into<NodeRef<'n>>) -> Result<Self, GraphError> {
        let source = graph.check_node_index(source)?;
        let n = graph.number_of_nodes();

        let mut key = vec![f64::INFINITY; n as usize];
        key[source as usize] = 0.0;

        let mut queue = PriorityQueue::with_capacity(n as usize);
        for u in 0..n {
            queue.enqueue(u, key[u as usize]);
        }

        Ok(Self {
            graph,
            in_tree: NodeBitSet::new(n),
            parent: vec![None; n as usize],
            key,
            queue,
            status: Status::Running,
        })
    }

    /// Returns true if `u` has been admitted to the tree
    pub fn is_in_tree(&self, u: NodeId) -> bool {
        self.graph
            .index_of(u)
            .is_some_and(|index| self.in_tree.get_bit(index))
    }

    /// Weight of the lightest known edge from each node into the tree, indexed by node position
    pub fn keys(&self) -> &[f64] {
        &self.key
    }

    /// Tree parent of `u`; `None` for the source and for nodes not reached yet
    pub fn parent_of(&self, u: NodeId) -> Option<NodeId> {
        let index = self.graph.index_of(u)?;
        self.parent[index as usize].map(|p| self.graph.id_at(p.get()))
    }

    /// Tree parents indexed by node position
    pub fn parents(&self) -> Vec<Option<NodeId>> {
        self.parent
            .iter()
            .map(|p| p.map(|p| self.graph.id_at(p.get())))
            .collect()
    }

    /// Pending vertices in heap layout
    pub fn queue(&self) -> Vec<Entry<NodeId>> {
        self.queue.map_entries(|&i| self.graph.id_at(i))
    }

    /// The parent array of the finished tree; `None` while the tree is incomplete
    pub fn mst(&self) -> Option<Vec<Option<NodeId>>> {
        self.is_complete().then(|| self.parents())
    }

    /// Edges joining the vertices admitted so far
    pub fn tree_edges(&self) -> Vec<TreeEdge> {
        self.in_tree
            .iter_set_bits()
            .filter_map(|u| self.tree_edge(u))
            .collect()
    }

    /// Total weight of the edges admitted so far
    pub fn total_weight(&self) -> f64 {
        self.tree_edges().iter().map(|e| e.weight).sum()
    }

    fn tree_edge(&self, u: NodeIndex) -> Option<TreeEdge> {
        self.parent[u as usize].map(|p| TreeEdge {
            from: self.graph.id_at(p.get()),
            to: self.graph.id_at(u),
            weight: self.key[u as usize],
        })
    }
}

impl Stepper for Prim<'_> {
    type Step = PrimStep;

    fn step(&mut self) -> Option<Self::Step> {
        if self.status != Status::Running {
            return None;
        }

        let u = self.queue.dequeue()?;
        if self.key[u as usize].is_infinite() {
            error!(node = self.graph.id_at(u), "no feasible spanning tree exists");
            self.status = Status::Failed(AlgoError::NoFeasibleTree);
            return None;
        }

        self.in_tree.set_bit(u);
        debug!(node = self.graph.id_at(u), key = self.key[u as usize], "admit to tree");

        let graph = self.graph;
        for &IndexedNeighbor { index: v, weight } in graph.neighbors_at(u) {
            if !self.in_tree.get_bit(v) && weight < self.key[v as usize] {
                self.key[v as usize] = weight;
                self.parent[v as usize] = OptionalIndex::new(u);
                self.queue.decrease_key(&v, weight);
            }
        }

        if self.queue.is_empty() {
            info!(weight = self.total_weight(), "spanning tree complete");
            self.status = Status::Complete;
        }

        Some(PrimStep {
            vertex_in_mst: self.graph.id_at(u),
            chosen_edge: self.tree_edge(u),
            queue: self.queue(),
        })
    }

    fn status(&self) -> Status {
        self.status
    }
}
