/*!
# Stepped Graph Algorithms

This module provides the four algorithms of this crate, each restructured to make **one discrete
unit of progress per call** so a caller can drive and observe them interactively:

- [`Dijkstra`]: single-source shortest paths, one step per settled node,
- [`Floyd`]: all-pairs shortest paths, one step per `(k, i, j)` triple,
- [`Prim`]: minimum spanning tree by vertex growth, one step per vertex admitted to the tree,
- [`Kruskal`]: minimum spanning tree by edge sorting, one step per edge examined.

All of them implement [`Stepper`]. Between two calls of [`Stepper::step`] the engine's state can be
inspected freely; to stop early, simply stop stepping. Engines borrow the graph immutably and keep
all derived state (distances, settled sets, parents) to themselves. That state is indexed by node
position ([`Graph::index_of`]) and thus sized by the number of nodes; nodes in step records are
reported by id.

In addition, the traits [`ShortestPaths`], [`AllPairs`] and [`SpanningTree`] expose the algorithms
directly on [`Graph`], so that
```rust
use stepgraphs::{prelude::*, algo::*, gens::default_graph};

let graph = default_graph();
assert_eq!(graph.shortest_path("A", "D").unwrap(), vec![0, 1, 3]);
```
works without configuring an engine first.
*/

mod dijkstra;
mod floyd;
mod kruskal;
mod prim;

use std::iter::FusedIterator;

use crate::{error::AlgoError, prelude::*};

pub use dijkstra::*;
pub use floyd::*;
pub use kruskal::*;
pub use prim::*;

/// Progress of a stepped algorithm. `Complete` and `Failed` are terminal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Status {
    /// More steps are available
    Running,
    /// The algorithm finished normally
    Complete,
    /// The algorithm stopped without a solution
    Failed(AlgoError),
}

impl Status {
    /// Returns true if no further steps will be produced
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Status::Running)
    }
}

/// An algorithm that advances one unit of work per call.
pub trait Stepper {
    /// Observation produced by a single step
    type Step;

    /// Performs the next unit of work and returns its observation, or `None` once the algorithm
    /// has reached a terminal [`Status`]. After the first `None`, every further call returns `None`.
    fn step(&mut self) -> Option<Self::Step>;

    /// Current progress
    fn status(&self) -> Status;

    /// Returns true if the algorithm finished normally
    fn is_complete(&self) -> bool {
        self.status() == Status::Complete
    }

    /// Returns the reason the algorithm stopped without a solution, if it did
    fn failure(&self) -> Option<AlgoError> {
        match self.status() {
            Status::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Borrows the stepper as an iterator over its remaining steps.
    /// The stepper can still be inspected once the iterator is dropped.
    fn steps(&mut self) -> Steps<'_, Self>
    where
        Self: Sized,
    {
        Steps { stepper: self }
    }

    /// Steps until a terminal status is reached and returns it
    fn run(&mut self) -> Status
    where
        Self: Sized,
    {
        self.steps().for_each(drop);
        self.status()
    }
}

/// Iterator over the remaining steps of a [`Stepper`]; see [`Stepper::steps`].
pub struct Steps<'s, S> {
    stepper: &'s mut S,
}

impl<S> Iterator for Steps<'_, S>
where
    S: Stepper,
{
    type Item = S::Step;

    fn next(&mut self) -> Option<Self::Item> {
        self.stepper.step()
    }
}

impl<S> FusedIterator for Steps<'_, S> where S: Stepper {}

/// Minimum spanning tree algorithms exposed directly on the graph
pub trait SpanningTree {
    /// Returns a [`Prim`] engine growing the tree from `source`.
    ///
    /// # Errors
    /// Fails if `source` does not exist.
    fn prim<'n>(&self, source: impl Into<NodeRef<'n>>) -> Result<Prim<'_>, GraphError>;

    /// Returns a [`Kruskal`] engine over all edges of the graph
    fn kruskal(&self) -> Kruskal<'_>;

    /// Computes a minimum spanning tree and returns its edges in the order they were accepted.
    ///
    /// # Errors
    /// Returns [`AlgoError::Disconnected`] if no spanning tree exists.
    ///
    /// # Examples
    /// ```
    /// use stepgraphs::{algo::*, gens::default_graph};
    ///
    /// let tree = default_graph().minimum_spanning_tree().unwrap();
    /// assert_eq!(tree.len(), 7);
    /// assert_eq!(tree.iter().map(|e| e.weight).sum::<f64>(), 53.0);
    /// ```
    fn minimum_spanning_tree(&self) -> Result<Vec<Edge>, AlgoError>;
}

impl SpanningTree for Graph {
    fn prim<'n>(&self, source: impl Into<NodeRef<'n>>) -> Result<Prim<'_>, GraphError> {
        Prim::new(self, source)
    }

    fn kruskal(&self) -> Kruskal<'_> {
        Kruskal::new(self)
    }

    fn minimum_spanning_tree(&self) -> Result<Vec<Edge>, AlgoError> {
        let mut kruskal = self.kruskal();
        match kruskal.run() {
            Status::Failed(err) => Err(err),
            _ => Ok(kruskal.tree_edges().into_iter().cloned().collect()),
        }
    }
}
