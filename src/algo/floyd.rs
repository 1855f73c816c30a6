/*!
# All-Pairs Shortest Paths

[`Floyd`] runs the Floyd–Warshall algorithm on a dense distance matrix and yields **every** triple
`(k, i, j)` (with `k` as the outer loop and `(i, j)` in row-major order) as its own step, including
those that do not improve anything. This gives `n^3` steps for `n` nodes.

Rows and columns of the matrix are node positions (see [`Graph::index_of`]), so the matrix is
`n x n` however the node ids are spread; [`Floyd::nodes`] maps positions back to ids.
*/

use std::ops::Index;

use tracing::trace;

use super::*;

/// Dense square matrix of path lengths indexed by node position. Unreachable pairs are at
/// `f64::INFINITY`.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Creates an `n x n` matrix with zeros on the diagonal and `f64::INFINITY` elsewhere
    pub fn new(n: usize) -> Self {
        let mut data = vec![f64::INFINITY; n * n];
        for i in 0..n {
            data[i * n + i] = 0.0;
        }
        Self { n, data }
    }

    /// Seeds the matrix from the edges of a graph, mirroring each weight into both directions.
    /// Of several parallel edges the lightest one is used.
    pub fn from_graph(graph: &Graph) -> Self {
        let mut matrix = Self::new(graph.len());
        for u in 0..graph.number_of_nodes() {
            for &IndexedNeighbor { index: v, weight } in graph.neighbors_at(u) {
                let (u, v) = (u as usize, v as usize);
                if weight < matrix[(u, v)] {
                    matrix.set(u, v, weight);
                    matrix.set(v, u, weight);
                }
            }
        }
        matrix
    }

    /// Number of rows (and columns)
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// ** Panics if `i >= n || j >= n` **
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self[(i, j)]
    }

    /// ** Panics if `i >= n || j >= n` **
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        assert!(i < self.n && j < self.n);
        self.data[i * self.n + j] = value;
    }

    /// ** Panics if `i >= n` **
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Returns an iterator over all rows
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.n).map(|i| self.row(i))
    }

    /// Returns true if `m[i][j] == m[j][i]` for all `i, j`
    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| (0..i).all(|j| self[(i, j)] == self[(j, i)]))
    }
}

impl Index<(usize, usize)> for DistanceMatrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        assert!(i < self.n && j < self.n);
        &self.data[i * self.n + j]
    }
}

/// Observation of a single Floyd–Warshall step. `k`, `i` and `j` are node positions.
#[derive(Debug, Clone, PartialEq)]
pub struct FloydStep {
    /// Intermediate node
    pub k: usize,
    /// Row, i.e. the path's source
    pub i: usize,
    /// Column, i.e. the path's target
    pub j: usize,
    /// Whether `distances[i][j]` was improved in this step
    pub updated: bool,
    /// Copy of the matrix after this step
    pub distances: DistanceMatrix,
}

/// Stepped Floyd–Warshall.
///
/// # Examples
/// ```
/// use stepgraphs::{algo::*, gens::default_graph};
///
/// let graph = default_graph();
/// let mut floyd = Floyd::new(&graph);
/// assert_eq!(floyd.steps().count(), 8 * 8 * 8);
/// assert!(floyd.is_complete());
/// assert_eq!(floyd.distances()[(0, 3)], 14.0);
/// ```
#[derive(Debug, Clone)]
pub struct Floyd {
    nodes: Vec<NodeId>,
    distances: DistanceMatrix,
    k: usize,
    i: usize,
    j: usize,
    status: Status,
}

impl Floyd {
    /// Seeds the distance matrix from `graph`. The graph is not needed afterwards.
    pub fn new(graph: &Graph) -> Self {
        let mut floyd = Self::from_matrix(DistanceMatrix::from_graph(graph));
        floyd.nodes = graph.vertices().collect();
        floyd
    }

    /// Runs on an already seeded matrix whose rows are labelled `0..n`
    pub fn from_matrix(distances: DistanceMatrix) -> Self {
        let status = if distances.is_empty() {
            Status::Complete
        } else {
            Status::Running
        };

        Self {
            nodes: (0..distances.len() as NodeId).collect(),
            distances,
            k: 0,
            i: 0,
            j: 0,
            status,
        }
    }

    /// The current matrix; final once [`Stepper::is_complete`] holds
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Node id of every row (and column)
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Current length of the shortest known path from `u` to `v`; `None` if either node is unknown
    pub fn distance(&self, u: NodeId, v: NodeId) -> Option<f64> {
        let row = |u: NodeId| self.nodes.iter().position(|&w| w == u);
        Some(self.distances[(row(u)?, row(v)?)])
    }

    /// Consumes the engine and returns the current matrix
    pub fn into_distances(self) -> DistanceMatrix {
        self.distances
    }

    /// The triple that the next step will process
    pub fn cursor(&self) -> Option<(usize, usize, usize)> {
        (self.status == Status::Running).then_some((self.k, self.i, self.j))
    }

    fn advance(&mut self) {
        let n = self.distances.len();
        self.j += 1;
        if self.j < n {
            return;
        }
        self.j = 0;
        self.i += 1;
        if self.i < n {
            return;
        }
        self.i = 0;
        self.k += 1;
        if self.k == n {
            self.status = Status::Complete;
        }
    }
}

impl Stepper for Floyd {
    type Step = FloydStep;

    fn step(&mut self) -> Option<Self::Step> {
        let (k, i, j) = self.cursor()?;

        let candidate = self.distances[(i, k)] + self.distances[(k, j)];
        let updated = candidate < self.distances[(i, j)];
        if updated {
            trace!(k, i, j, distance = candidate, "improve");
            self.distances.set(i, j, candidate);
        }

        self.advance();

        Some(FloydStep {
            k,
            i,
            j,
            updated,
            distances: self.distances.clone(),
        })
    }

    fn status(&self) -> Status {
        self.status
    }
}

/// All-pairs shortest paths exposed directly on the graph
pub trait AllPairs {
    /// Returns a [`Floyd`] engine seeded from the graph
    fn floyd(&self) -> Floyd;

    /// Runs Floyd–Warshall to completion and returns the final matrix
    fn all_pairs_distances(&self) -> DistanceMatrix {
        let mut floyd = self.floyd();
        floyd.run();
        floyd.into_distances()
    }
}

impl AllPairs for Graph {
    fn floyd(&self) -> Floyd {
        Floyd::new(self)
    }
}
