/*!
`stepgraphs` is a library of weighted undirected graphs and **stepped** graph algorithms: every
algorithm advances by one discrete unit of work per call, so that a caller can drive it
interactively and inspect its state between steps.

# Representation

A [`Graph`] owns named **nodes** identified by a caller-visible `u32` ([`NodeId`]) with canvas
coordinates, and **edges** with a positive weight, a `line` number and a color. Most operations take
a [`NodeRef`] so that endpoints can be given by id or by name. Mutations are validated up front and
either fully succeed or leave the graph untouched; all failures are returned as [`GraphError`].

Parallel edges are permitted by default; [`GraphConfig`] can reject them instead.

# Algorithms

See the [`algo`] module:

- [`Dijkstra`](algo::Dijkstra): single-source shortest paths,
- [`Floyd`](algo::Floyd): all-pairs shortest paths,
- [`Prim`](algo::Prim) and [`Kruskal`](algo::Kruskal): minimum spanning trees.

All of them implement the [`Stepper`](algo::Stepper) trait. The most common uses are also
implemented via traits on the graph itself, making them usable without configuring an engine.

# Usage

There are *5* submodules you probably want to interact with:
- [`prelude`] includes definitions for nodes, edges, the graph and its errors,
- [`algo`] includes the stepped engines and the algorithm traits implemented on [`Graph`],
- [`gens`] includes the demo graph, metro construction and a random graph generator,
- [`io`] includes the station/route dataset reader,
- [`itinerary`] turns a path into per-station travel details.

In most use-cases, `use stepgraphs::{prelude::*, algo::*};` suffices for your needs.

```
use stepgraphs::{prelude::*, algo::*};

let mut graph = Graph::new();
for (name, x, y) in [("A", 0.0, 0.0), ("B", 1.0, 0.0), ("C", 2.0, 0.0)] {
    graph.insert_node(name, x, y).unwrap();
}
graph.insert_edge("A-B", "A", "B", 2.0).unwrap();
graph.insert_edge("B-C", "B", "C", 3.0).unwrap();
graph.insert_edge("A-C", "A", "C", 10.0).unwrap();

let mut dijkstra = graph.dijkstra("A").unwrap();
let settled: Vec<_> = dijkstra.steps().map(|step| step.curr_node).collect();
assert_eq!(settled, vec![0, 1, 2]);
assert_eq!(dijkstra.distances(), &[0.0, 2.0, 5.0]);
```
*/

pub mod algo;
pub mod edge;
pub mod error;
pub mod gens;
pub mod graph;
pub mod io;
pub mod itinerary;
pub mod logging;
pub mod node;
pub mod queue;
#[cfg(test)]
pub(crate) mod testing;
pub mod union_find;

pub use edge::*;
pub use error::{AlgoError, DatasetError, GraphError};
pub use graph::*;
pub use node::*;

/// `stepgraphs::prelude` includes definitions for nodes, edges, the graph and its errors.
pub mod prelude {
    pub use super::{
        edge::*,
        error::{AlgoError, GraphError},
        graph::*,
        node::*,
    };
}
