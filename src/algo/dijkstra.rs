/*!
# Single-Source Shortest Paths

[`Dijkstra`] settles one node per step: it dequeues the pending node of smallest tentative distance,
relaxes all of its edges and reports what changed. Newly discovered nodes are enqueued, improved
ones have their priority lowered via decrease-key.

For display purposes the engine keeps the set of "current" relaxation edges: for every reached
node only the edge that last improved its distance is kept.
*/

use tracing::{debug, trace, warn};

use super::*;
use crate::queue::{Entry, PriorityQueue};

/// Observation of a single Dijkstra step. All fields are snapshots owned by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct DijkstraStep {
    /// Node settled in this step
    pub curr_node: NodeId,
    /// For every reached node, the edge `(parent, node)` that last improved its distance
    pub curr_edges: Vec<(NodeId, NodeId)>,
    /// Tentative distances indexed by node position (see [`Graph::index_of`]); unreached nodes
    /// are at `f64::INFINITY`
    pub distances: Vec<f64>,
    /// Pending nodes in heap layout
    pub queue: Vec<Entry<NodeId>>,
}

/// Stepped single-source shortest path search.
///
/// A run is single-pass: it is seeded with its source on construction and a new run requires a
/// new engine. Its state is indexed by node position, so it takes `O(n)` space for `n` nodes
/// regardless of the node ids.
///
/// # Examples
/// ```
/// use stepgraphs::{prelude::*, algo::*, gens::default_graph};
///
/// let graph = default_graph();
/// let mut dijkstra = Dijkstra::new(&graph, "A").unwrap();
///
/// let order: Vec<_> = dijkstra.steps().map(|step| step.curr_node).collect();
/// assert_eq!(order, vec![0, 1, 5, 3, 2, 4, 6, 7]);
/// assert!(dijkstra.is_complete());
/// assert_eq!(dijkstra.distance_to(3), Some(14.0));
/// ```
#[derive(Debug, Clone)]
pub struct Dijkstra<'a> {
    graph: &'a Graph,
    source: NodeIndex,
    distances: Vec<f64>,
    settled: NodeBitSet,
    parent: Vec<Option<OptionalIndex>>,
    queue: PriorityQueue<NodeIndex>,
    current_edges: Vec<(NodeIndex, NodeIndex)>,
    status: Status,
}

impl<'a> Dijkstra<'a> {
    /// Creates a new search on `graph` starting at `source`.
    ///
    /// # Errors
    /// Fails with [`GraphError::NodeNotFound`] if `source` does not exist.
    pub fn new<'n>(graph: &'a Graph, source: impl Into<NodeRef<'n>>) -> Result<Self, GraphError> {
        let source = graph.check_node_index(source)?;
        let n = graph.len();

        let mut distances = vec![f64::INFINITY; n];
        distances[source as usize] = 0.0;

        let mut queue = PriorityQueue::with_capacity(n);
        queue.enqueue(source, 0.0);

        Ok(Self {
            graph,
            source,
            distances,
            settled: NodeBitSet::new(graph.number_of_nodes()),
            parent: vec![None; n],
            queue,
            current_edges: Vec::new(),
            status: Status::Running,
        })
    }

    pub fn source(&self) -> NodeId {
        self.graph.id_at(self.source)
    }

    /// Tentative distances indexed by node position
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Predecessor of `u` on its current shortest path; `None` for the source and unreached nodes
    pub fn parent_of(&self, u: NodeId) -> Option<NodeId> {
        let index = self.graph.index_of(u)?;
        self.parent_at(index).map(|p| self.graph.id_at(p))
    }

    fn parent_at(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.parent[index as usize].map(|p| p.get())
    }

    /// Predecessors on the current shortest paths, indexed by node position
    pub fn parents(&self) -> Vec<Option<NodeId>> {
        (0..self.graph.number_of_nodes())
            .map(|i| self.parent_at(i).map(|p| self.graph.id_at(p)))
            .collect()
    }

    /// Pending nodes in heap layout
    pub fn queue(&self) -> Vec<Entry<NodeId>> {
        self.queue.map_entries(|&i| self.graph.id_at(i))
    }

    /// The current relaxation edges `(parent, node)`
    pub fn current_edges(&self) -> Vec<(NodeId, NodeId)> {
        self.current_edges
            .iter()
            .map(|&(p, v)| (self.graph.id_at(p), self.graph.id_at(v)))
            .collect()
    }

    /// Returns true if `u` has been settled, i.e. its distance is final
    pub fn is_settled(&self, u: NodeId) -> bool {
        self.graph
            .index_of(u)
            .is_some_and(|index| self.settled.get_bit(index))
    }

    /// Tentative distance to `u`; `None` if `u` has not been reached (yet)
    pub fn distance_to(&self, u: NodeId) -> Option<f64> {
        self.graph
            .index_of(u)
            .map(|index| self.distances[index as usize])
            .filter(|d| d.is_finite())
    }

    /// Follows the parent pointers from `target` back to the source and returns the path in
    /// source-to-target order. Returns an empty path if `target` has not been reached.
    ///
    /// The path is a shortest one once `target` is settled.
    pub fn path_to(&self, target: NodeId) -> Vec<NodeId> {
        let Some(mut u) = self
            .graph
            .index_of(target)
            .filter(|&index| self.distances[index as usize].is_finite())
        else {
            return Vec::new();
        };

        let mut path = vec![target];
        while let Some(p) = self.parent_at(u) {
            path.push(self.graph.id_at(p));
            u = p;
        }
        debug_assert_eq!(u, self.source);

        path.reverse();
        path
    }

    /// Settles nodes until `target` is settled or the queue runs empty.
    /// Returns true iff `target` was settled.
    pub fn run_until(&mut self, target: NodeId) -> bool {
        let Some(target) = self.graph.index_of(target) else {
            return false;
        };
        while !self.settled.get_bit(target) {
            if self.settle_next().is_none() {
                return false;
            }
        }
        true
    }

    /// Dequeues the closest pending node, marks it settled and relaxes its edges.
    fn settle_next(&mut self) -> Option<NodeIndex> {
        if self.status != Status::Running {
            return None;
        }

        let u = self.queue.dequeue()?;
        self.settled.set_bit(u);
        trace!(node = self.graph.id_at(u), distance = self.distances[u as usize], "settle");

        let graph = self.graph;
        for &IndexedNeighbor { index: v, weight } in graph.neighbors_at(u) {
            let candidate = self.distances[u as usize] + weight;
            if candidate >= self.distances[v as usize] {
                continue;
            }

            debug!(from = graph.id_at(u), to = graph.id_at(v), distance = candidate, "relax");
            self.distances[v as usize] = candidate;
            let discovered =
                std::mem::replace(&mut self.parent[v as usize], OptionalIndex::new(u)).is_none();

            self.current_edges.retain(|&(_, to)| to != v);
            self.current_edges.push((u, v));

            if discovered {
                self.queue.enqueue(v, candidate);
            } else {
                self.queue.decrease_key(&v, candidate);
            }
        }

        if self.queue.is_empty() {
            self.status = Status::Complete;
        }

        Some(u)
    }
}

impl Stepper for Dijkstra<'_> {
    type Step = DijkstraStep;

    fn step(&mut self) -> Option<Self::Step> {
        let curr_node = self.settle_next()?;
        Some(DijkstraStep {
            curr_node: self.graph.id_at(curr_node),
            curr_edges: self.current_edges(),
            distances: self.distances.clone(),
            queue: self.queue(),
        })
    }

    fn status(&self) -> Status {
        self.status
    }
}

/// Shortest path queries exposed directly on the graph
pub trait ShortestPaths {
    /// Returns a [`Dijkstra`] engine seeded at `source`.
    ///
    /// # Errors
    /// Fails if `source` does not exist.
    fn dijkstra<'n>(&self, source: impl Into<NodeRef<'n>>) -> Result<Dijkstra<'_>, GraphError>;

    /// Computes a shortest path and its length; `Ok(None)` if `to` is unreachable from `from`.
    ///
    /// # Errors
    /// Fails if either endpoint does not exist.
    fn shortest_path_with_distance<'f, 't>(
        &self,
        from: impl Into<NodeRef<'f>>,
        to: impl Into<NodeRef<'t>>,
    ) -> Result<Option<(Vec<NodeId>, f64)>, GraphError>;

    /// Computes the node sequence of a shortest path from `from` to `to`.
    /// An empty sequence means that `to` is unreachable; this is not an error.
    ///
    /// # Errors
    /// Fails if either endpoint does not exist.
    ///
    /// # Examples
    /// ```
    /// use stepgraphs::{algo::*, gens::default_graph};
    ///
    /// let graph = default_graph();
    /// assert_eq!(graph.shortest_path("A", "H").unwrap(), vec![0, 1, 5, 4, 7]);
    /// ```
    fn shortest_path<'f, 't>(
        &self,
        from: impl Into<NodeRef<'f>>,
        to: impl Into<NodeRef<'t>>,
    ) -> Result<Vec<NodeId>, GraphError> {
        Ok(self
            .shortest_path_with_distance(from, to)?
            .map(|(path, _)| path)
            .unwrap_or_default())
    }
}

impl ShortestPaths for Graph {
    fn dijkstra<'n>(&self, source: impl Into<NodeRef<'n>>) -> Result<Dijkstra<'_>, GraphError> {
        Dijkstra::new(self, source)
    }

    fn shortest_path_with_distance<'f, 't>(
        &self,
        from: impl Into<NodeRef<'f>>,
        to: impl Into<NodeRef<'t>>,
    ) -> Result<Option<(Vec<NodeId>, f64)>, GraphError> {
        let mut dijkstra = Dijkstra::new(self, from)?;
        let target = self.check_node(to)?;

        if !dijkstra.run_until(target) {
            warn!(
                source = dijkstra.source(),
                target, "no feasible path from source to target"
            );
            return Ok(None);
        }

        let distance = dijkstra.distance_to(target).unwrap_or(f64::INFINITY);
        Ok(Some((dijkstra.path_to(target), distance)))
    }
}
