/*!
# Weighted Undirected Graph

[`Graph`] owns its nodes and edges together with a symmetric adjacency index and two name indices.
All mutations are validated first and either fully succeed or leave the graph untouched.

Besides its caller-chosen [`NodeId`], every node has a dense [`NodeIndex`]: its position in
[`Graph::nodes`]. Adjacency is stored by position, so algorithms can size their state by
[`Graph::len`] no matter how sparse the ids are.

```
use stepgraphs::prelude::*;

let mut graph = Graph::new();
graph.add_node(0, "A", 0.0, 0.0).unwrap();
graph.add_node(1000, "B", 3.0, 4.0).unwrap();
graph.add_edge(0, "A-B", "A", "B", EdgeAttrs::new().weight(5.0)).unwrap();

let neighbors: Vec<_> = graph.neighbors_of(0).collect();
assert_eq!(neighbors, vec![Neighbor { node: 1000, weight: 5.0 }]);
assert_eq!(graph.index_of(1000), Some(1));
assert_eq!(graph.neighbors_at(1), &[IndexedNeighbor { index: 0, weight: 5.0 }]);

// self-loops are rejected and do not change the graph
assert!(matches!(
    graph.add_edge(1, "B-B", "B", "B", EdgeAttrs::new()),
    Err(GraphError::SelfLoop(_))
));
assert_eq!(graph.number_of_edges(), 1);
```
*/

use fxhash::FxHashMap;
use tracing::{debug, warn};

use crate::{error::GraphError, prelude::*};

/// Policy for a second edge between an already connected pair of nodes
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum ParallelEdges {
    /// Parallel edges are permitted
    #[default]
    Allow,
    /// A second edge between the same endpoints fails with [`GraphError::EdgeExists`]
    Reject,
}

/// Settings of a [`Graph`]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct GraphConfig {
    parallel_edges: ParallelEdges,
}

impl GraphConfig {
    /// Creates the default config which permits parallel edges
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the policy for parallel edges
    pub fn set_parallel_edges(&mut self, policy: ParallelEdges) {
        self.parallel_edges = policy;
    }

    /// Sets the policy for parallel edges
    pub fn parallel_edges(mut self, policy: ParallelEdges) -> Self {
        self.set_parallel_edges(policy);
        self
    }

    pub fn get_parallel_edges(&self) -> ParallelEdges {
        self.parallel_edges
    }
}

/// Entry of an adjacency list
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Neighbor {
    pub node: NodeId,
    pub weight: f64,
}

/// Entry of an adjacency list in dense positions
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct IndexedNeighbor {
    pub index: NodeIndex,
    pub weight: f64,
}

/// An undirected weighted graph with named nodes.
///
/// Cloning a graph yields new containers holding the same entities, which lets editing
/// collaborators apply a change to a copy and swap it in afterwards.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    config: GraphConfig,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    /// `adjacency[i]` belongs to `nodes[i]`
    adjacency: Vec<Vec<IndexedNeighbor>>,
    name_to_id: FxHashMap<String, NodeId>,
    id_to_index: FxHashMap<NodeId, NodeIndex>,
}

impl Graph {
    /// Creates an empty graph that permits parallel edges
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with the given settings
    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Adds a node with a caller-supplied id. The node gets the next dense position.
    ///
    /// Ids are not required to be contiguous, but they must be unique: a reused id is rejected
    /// with [`GraphError::DuplicateNodeId`] instead of shadowing the node that already holds it.
    ///
    /// # Errors
    /// - [`GraphError::DuplicateNode`] if `name` is already used
    /// - [`GraphError::DuplicateNodeId`] if `id` is already used
    /// - [`GraphError::IdsExhausted`] if the graph already holds `2^32 - 1` nodes
    pub fn add_node<S: Into<String>>(
        &mut self,
        id: NodeId,
        name: S,
        x: f64,
        y: f64,
    ) -> Result<(), GraphError> {
        let name = name.into();
        if self.name_to_id.contains_key(&name) {
            warn!(%name, "duplicate node name");
            return Err(GraphError::DuplicateNode(name));
        }
        if self.id_to_index.contains_key(&id) {
            warn!(id, "duplicate node id");
            return Err(GraphError::DuplicateNodeId(id));
        }
        // `NodeIndex::MAX` is the niche of `OptionalIndex`
        let index = NodeIndex::try_from(self.nodes.len())
            .ok()
            .filter(|&index| index != NodeIndex::MAX)
            .ok_or(GraphError::IdsExhausted("node position"))?;

        debug!(id, index, %name, x, y, "add node");
        self.adjacency.push(Vec::new());
        self.name_to_id.insert(name.clone(), id);
        self.id_to_index.insert(id, index);
        self.nodes.push(Node { id, name, x, y });
        Ok(())
    }

    /// Adds a node under the next free id (see [`Graph::next_node_id`]) and returns that id.
    ///
    /// # Errors
    /// Fails with [`GraphError::IdsExhausted`] if `NodeId::MAX` is in use, in addition to the
    /// errors of [`Graph::add_node`].
    pub fn insert_node<S: Into<String>>(
        &mut self,
        name: S,
        x: f64,
        y: f64,
    ) -> Result<NodeId, GraphError> {
        let id = self.next_node_id().ok_or_else(|| {
            warn!("no node id left");
            GraphError::IdsExhausted("node id")
        })?;
        self.add_node(id, name, x, y)?;
        Ok(id)
    }

    /// Adds an undirected edge with a caller-supplied id. The endpoints may be given by id or by
    /// name; omitted attributes take their defaults (weight `1`, line `1`, color `#000000`).
    ///
    /// # Errors
    /// See [`Graph::check_edge`].
    pub fn add_edge<'f, 't, S, A>(
        &mut self,
        id: EdgeId,
        name: S,
        from: impl Into<NodeRef<'f>>,
        to: impl Into<NodeRef<'t>>,
        attrs: A,
    ) -> Result<(), GraphError>
    where
        S: Into<String>,
        A: Into<EdgeAttrs>,
    {
        let attrs = attrs.into();
        let [(from, fi), (to, ti)] =
            self.validate_edge(from.into(), to.into(), attrs.supplied_weight())?;
        let weight = attrs.get_weight();

        debug!(id, from, to, weight, "add edge");
        self.adjacency[fi as usize].push(IndexedNeighbor { index: ti, weight });
        self.adjacency[ti as usize].push(IndexedNeighbor { index: fi, weight });
        self.edges.push(Edge {
            id,
            name: name.into(),
            from,
            to,
            weight,
            line: attrs.get_line(),
            color: attrs.get_color().to_string(),
        });
        Ok(())
    }

    /// Adds an edge under the next free id (see [`Graph::next_edge_id`]) and returns that id.
    ///
    /// # Errors
    /// Fails with [`GraphError::IdsExhausted`] if `EdgeId::MAX` is in use, in addition to the
    /// errors of [`Graph::add_edge`].
    pub fn insert_edge<'f, 't, S, A>(
        &mut self,
        name: S,
        from: impl Into<NodeRef<'f>>,
        to: impl Into<NodeRef<'t>>,
        attrs: A,
    ) -> Result<EdgeId, GraphError>
    where
        S: Into<String>,
        A: Into<EdgeAttrs>,
    {
        let id = self.next_edge_id().ok_or_else(|| {
            warn!("no edge id left");
            GraphError::IdsExhausted("edge id")
        })?;
        self.add_edge(id, name, from, to, attrs)?;
        Ok(id)
    }

    /// Checks that the node exists and returns its id.
    pub fn check_node<'a>(&self, node: impl Into<NodeRef<'a>>) -> Result<NodeId, GraphError> {
        self.locate(node.into()).map(|(id, _)| id)
    }

    /// Checks that the node exists and returns its dense position.
    pub fn check_node_index<'a>(
        &self,
        node: impl Into<NodeRef<'a>>,
    ) -> Result<NodeIndex, GraphError> {
        self.locate(node.into()).map(|(_, index)| index)
    }

    fn locate(&self, node: NodeRef<'_>) -> Result<(NodeId, NodeIndex), GraphError> {
        let id = match node {
            NodeRef::Id(id) => Some(id),
            NodeRef::Name(name) => self.id_of(name),
        };
        id.and_then(|id| self.index_of(id).map(|index| (id, index)))
            .ok_or_else(|| GraphError::node_not_found(node))
    }

    /// Validates a prospective edge without changing the graph and returns its resolved endpoints.
    ///
    /// # Errors
    /// - [`GraphError::NodeNotFound`] if an endpoint does not exist
    /// - [`GraphError::SelfLoop`] if both endpoints are the same node
    /// - [`GraphError::NonPositiveWeight`] if a supplied weight is not a positive finite number
    /// - [`GraphError::EdgeExists`] if the endpoints are already connected and the graph rejects
    ///   parallel edges
    pub fn check_edge<'f, 't>(
        &self,
        from: impl Into<NodeRef<'f>>,
        to: impl Into<NodeRef<'t>>,
        weight: Option<f64>,
    ) -> Result<(NodeId, NodeId), GraphError> {
        let [(from, _), (to, _)] = self.validate_edge(from.into(), to.into(), weight)?;
        Ok((from, to))
    }

    fn validate_edge(
        &self,
        from: NodeRef<'_>,
        to: NodeRef<'_>,
        weight: Option<f64>,
    ) -> Result<[(NodeId, NodeIndex); 2], GraphError> {
        let (from, fi) = self.locate(from)?;
        let (to, ti) = self.locate(to)?;

        if fi == ti {
            warn!(node = from, "self-loop rejected");
            return Err(GraphError::SelfLoop(self.nodes[fi as usize].name.clone()));
        }

        if let Some(weight) = weight.filter(|w| !(*w > 0.0 && w.is_finite())) {
            warn!(weight, "non-positive edge weight rejected");
            return Err(GraphError::NonPositiveWeight(weight.to_string()));
        }

        if self.config.parallel_edges == ParallelEdges::Reject
            && self.neighbors_at(fi).iter().any(|nb| nb.index == ti)
        {
            warn!(from, to, "parallel edge rejected");
            return Err(GraphError::EdgeExists(from, to));
        }

        Ok([(from, fi), (to, ti)])
    }

    /// Resolves a node reference to an id of an existing node
    pub fn resolve(&self, node: NodeRef<'_>) -> Option<NodeId> {
        self.locate(node).ok().map(|(id, _)| id)
    }

    /// All nodes in insertion order, i.e. `nodes()[i]` is the node at position `i`
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.index_of(id).map(|index| &self.nodes[index as usize])
    }

    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.id_of(name).and_then(|id| self.node(id))
    }

    pub fn id_of(&self, name: &str) -> Option<NodeId> {
        self.name_to_id.get(name).copied()
    }

    pub fn name_of(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|node| node.name.as_str())
    }

    /// Dense position of node `id`
    pub fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.id_to_index.get(&id).copied()
    }

    /// Id of the node at position `index`
    ///
    /// ** Panics if `index >= self.len()` **
    pub fn id_at(&self, index: NodeIndex) -> NodeId {
        self.nodes[index as usize].id
    }

    /// Returns the adjacency list of `u` in insertion order; empty if `u` does not exist
    pub fn neighbors_of(&self, u: NodeId) -> impl Iterator<Item = Neighbor> + '_ {
        let entries = self.index_of(u).map_or(&[][..], |index| self.neighbors_at(index));
        entries.iter().map(move |nb| Neighbor {
            node: self.id_at(nb.index),
            weight: nb.weight,
        })
    }

    /// Returns the adjacency list of the node at position `index`; empty if there is none
    pub fn neighbors_at(&self, index: NodeIndex) -> &[IndexedNeighbor] {
        self.adjacency
            .get(index as usize)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the number of adjacency entries of `u`, counting parallel edges
    pub fn degree_of(&self, u: NodeId) -> usize {
        self.index_of(u)
            .map_or(0, |index| self.neighbors_at(index).len())
    }

    /// Returns true if some edge joins `u` and `v`
    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.neighbors_of(u).any(|nb| nb.node == v)
    }

    /// Returns the first edge (in insertion order) joining `u` and `v` in either orientation
    pub fn edge_between(&self, u: NodeId, v: NodeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.connects(u, v))
    }

    pub fn number_of_nodes(&self) -> NumNodes {
        // `add_node` keeps the length below `NodeIndex::MAX`
        self.nodes.len() as NumNodes
    }

    pub fn number_of_edges(&self) -> NumEdges {
        self.edges.len() as NumEdges
    }

    /// Returns the number of nodes as usize
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns an iterator over all node ids in insertion order
    pub fn vertices(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|node| node.id)
    }

    /// Smallest id larger than every node id in use; `None` once `NodeId::MAX` is taken
    pub fn next_node_id(&self) -> Option<NodeId> {
        self.vertices().max().map_or(Some(0), |id| id.checked_add(1))
    }

    /// Smallest id larger than every edge id in use; `None` once `EdgeId::MAX` is taken
    pub fn next_edge_id(&self) -> Option<EdgeId> {
        self.edges
            .iter()
            .map(|e| e.id)
            .max()
            .map_or(Some(0), |id| id.checked_add(1))
    }

    /// Sum of all edge weights
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|e| e.weight).sum()
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    use super::*;

    fn triangle() -> Graph {
        let mut graph = Graph::new();
        for (id, name) in ["a", "b", "c"].into_iter().enumerate() {
            graph.add_node(id as NodeId, name, id as f64, 0.0).unwrap();
        }
        graph
    }

    #[test]
    fn add_node() {
        let mut graph = triangle();
        assert_eq!(graph.number_of_nodes(), 3);
        assert_eq!(graph.id_of("b"), Some(1));
        assert_eq!(graph.name_of(2), Some("c"));
        assert_eq!(graph.node_by_name("c").map(|n| n.x), Some(2.0));
        assert_eq!(graph.neighbors_of(0).count(), 0);

        assert_eq!(
            graph.add_node(3, "a", 0.0, 0.0),
            Err(GraphError::DuplicateNode("a".into()))
        );
        assert_eq!(
            graph.add_node(1, "d", 0.0, 0.0),
            Err(GraphError::DuplicateNodeId(1))
        );
        assert_eq!(graph.number_of_nodes(), 3);
        assert_eq!(graph.id_of("d"), None);

        assert_eq!(graph.insert_node("d", 1.0, 1.0), Ok(3));
        assert_eq!(graph.next_node_id(), Some(4));
    }

    #[test]
    fn sparse_ids_get_dense_positions() {
        let mut graph = Graph::new();
        for (id, name) in [(50_000, "a"), (7, "b"), (NodeId::MAX, "c")] {
            graph.add_node(id, name, 0.0, 0.0).unwrap();
        }
        graph.add_edge(0, "a-c", "a", "c", 2.0).unwrap();

        assert_eq!(
            graph.vertices().map(|u| graph.index_of(u)).collect_vec(),
            vec![Some(0), Some(1), Some(2)]
        );
        assert_eq!(graph.index_of(8), None);
        assert_eq!(graph.id_at(2), NodeId::MAX);
        assert_eq!(graph.check_node_index("b"), Ok(1));
        assert_eq!(graph.neighbors_at(0), &[IndexedNeighbor { index: 2, weight: 2.0 }]);
        assert_eq!(
            graph.neighbors_of(NodeId::MAX).collect_vec(),
            vec![Neighbor { node: 50_000, weight: 2.0 }]
        );
        assert_eq!(graph.name_of(7), Some("b"));
        assert!(graph.neighbors_at(3).is_empty());
    }

    #[test]
    fn exhausted_ids_are_reported() {
        let mut graph = Graph::new();
        graph.add_node(0, "a", 0.0, 0.0).unwrap();
        graph.add_node(NodeId::MAX, "b", 0.0, 0.0).unwrap();

        assert_eq!(graph.next_node_id(), None);
        assert_eq!(
            graph.insert_node("c", 0.0, 0.0),
            Err(GraphError::IdsExhausted("node id"))
        );
        assert_eq!(graph.number_of_nodes(), 2);
        assert_eq!(graph.id_of("c"), None);

        graph.add_edge(EdgeId::MAX, "a-b", "a", "b", 1.0).unwrap();
        assert_eq!(graph.next_edge_id(), None);
        assert_eq!(
            graph.insert_edge("b-a", "b", "a", 1.0),
            Err(GraphError::IdsExhausted("edge id"))
        );
        assert_eq!(graph.number_of_edges(), 1);
    }

    #[test]
    fn add_edge_defaults() {
        let mut graph = triangle();
        graph.add_edge(0, "a-b", "a", "b", EdgeAttrs::new()).unwrap();

        let edge = &graph.edges()[0];
        assert_eq!((edge.from, edge.to), (0, 1));
        assert_eq!(edge.weight, DEFAULT_WEIGHT);
        assert_eq!(edge.line, DEFAULT_LINE);
        assert_eq!(edge.color, DEFAULT_COLOR);
    }

    #[test]
    fn add_edge_by_id_and_name() {
        let mut graph = triangle();
        let (b, c): (NodeId, NodeId) = (1, 2);
        graph.add_edge(0, "b-c", b, "c", 2.0).unwrap();
        graph.add_edge(1, "c-a", NodeRef::Id(c), NodeRef::Id(0), 3.0).unwrap();

        assert_eq!(graph.neighbors_of(2).map(|n| n.node).collect_vec(), vec![1, 0]);
        assert_eq!(graph.edge_between(0, 2).map(|e| e.id), Some(1));
        assert_eq!(graph.edge_between(2, 0).map(|e| e.id), Some(1));
        assert_eq!(graph.edge_between(0, 1), None);
        assert_eq!(graph.total_weight(), 5.0);
        assert_eq!(graph.next_edge_id(), Some(2));
    }

    #[test]
    fn rejected_edges_leave_graph_unchanged() {
        let mut graph = triangle();
        graph.add_edge(0, "a-b", "a", "b", 1.0).unwrap();

        let attempts = [
            (graph.add_edge(1, "a-x", "a", "x", 1.0), 1),
            (graph.add_edge(1, "a-a", "a", "a", 1.0), 3),
            (graph.add_edge(1, "a-c", "a", "c", 0.0), 4),
            (graph.add_edge(1, "a-c", "a", "c", -2.0), 4),
            (graph.add_edge(1, "a-c", "a", "c", f64::NAN), 4),
            (graph.add_edge(1, "a-c", "a", "c", f64::INFINITY), 4),
        ];
        for (res, code) in attempts {
            assert_eq!(res.unwrap_err().code(), code);
        }

        assert_eq!(graph.number_of_edges(), 1);
        assert_eq!(graph.degree_of(0), 1);
        assert_eq!(graph.degree_of(1), 1);
        assert_eq!(graph.degree_of(2), 0);
    }

    #[test]
    fn parallel_edges() {
        let mut graph = triangle();
        graph.add_edge(0, "a-b", "a", "b", 1.0).unwrap();
        graph.add_edge(1, "b-a", "b", "a", 2.0).unwrap();
        assert_eq!(graph.degree_of(0), 2);

        let mut strict = Graph::with_config(GraphConfig::new().parallel_edges(ParallelEdges::Reject));
        for (id, name) in ["a", "b"].into_iter().enumerate() {
            strict.add_node(id as NodeId, name, 0.0, 0.0).unwrap();
        }
        strict.add_edge(0, "a-b", "a", "b", 1.0).unwrap();
        assert_eq!(
            strict.add_edge(1, "b-a", "b", "a", 2.0),
            Err(GraphError::EdgeExists(1, 0))
        );
        assert_eq!(strict.number_of_edges(), 1);
    }

    #[test]
    fn check_node() {
        let graph = triangle();
        assert_eq!(graph.check_node("c"), Ok(2));
        assert_eq!(graph.check_node(NodeRef::Id(1)), Ok(1));
        assert!(graph.check_node("z").is_err());
        assert!(graph.check_node(NodeRef::Id(3)).is_err());
        assert_eq!(graph.check_edge("a", "c", None), Ok((0, 2)));
    }

    #[test]
    fn copy_is_independent() {
        let mut graph = triangle();
        graph.add_edge(0, "a-b", "a", "b", 1.0).unwrap();

        let mut copy = graph.clone();
        copy.add_edge(1, "b-c", "b", "c", 1.0).unwrap();
        copy.insert_node("d", 0.0, 0.0).unwrap();

        assert_eq!(graph.number_of_edges(), 1);
        assert_eq!(graph.number_of_nodes(), 3);
        assert_eq!(graph.degree_of(1), 1);
        assert_eq!(copy.degree_of(1), 2);
        assert_eq!(copy.nodes()[..3], graph.nodes()[..]);
    }

    #[test]
    fn random_edges_keep_adjacency_symmetric() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for n in [5 as NodeId, 10, 20] {
            let mut graph = Graph::new();
            for u in 0..n {
                graph.insert_node(u.to_string(), 0.0, 0.0).unwrap();
            }

            for _ in 0..(n * 3) {
                let u: NodeId = rng.random_range(0..n);
                let v: NodeId = rng.random_range(0..n);
                let w: f64 = rng.random_range(-1.0..10.0);

                let before = (graph.number_of_edges(), graph.degree_of(u), graph.degree_of(v));
                match graph.insert_edge(format!("{u}-{v}"), u, v, w) {
                    Ok(_) => {
                        assert!(graph.neighbors_of(u).any(|nb| nb == Neighbor { node: v, weight: w }));
                        assert!(graph.neighbors_of(v).any(|nb| nb == Neighbor { node: u, weight: w }));
                    }
                    Err(_) => assert_eq!(
                        before,
                        (graph.number_of_edges(), graph.degree_of(u), graph.degree_of(v))
                    ),
                }
            }

            let degree_sum: usize = graph.vertices().map(|u| graph.degree_of(u)).sum();
            assert_eq!(degree_sum, 2 * graph.number_of_edges() as usize);
        }
    }
}
