/*!
# Graph Factories

This module provides ready-made graphs:

- [`default_graph`]: the 8-node demo graph `A..H` with canvas coordinates,
- [`metro_graph`]: a graph built from a station/route [`MetroDataset`](crate::io::MetroDataset),
- [`RandomWeighted`]: a builder for random weighted graphs, mainly for randomised tests.

```
use stepgraphs::{algo::*, gens::*};

let graph = default_graph();
assert_eq!(graph.number_of_nodes(), 8);
assert_eq!(graph.number_of_edges(), 10);
assert_eq!(graph.shortest_path_with_distance("A", "H").unwrap(), Some((vec![0, 1, 5, 4, 7], 33.0)));
```
*/

use crate::prelude::*;

mod metro;
mod random;

pub use metro::*;
pub use random::*;

const DEFAULT_NODES: [(&str, f64, f64); 8] = [
    ("A", 300.0, 100.0),
    ("B", 100.0, 300.0),
    ("C", 100.0, 500.0),
    ("D", 300.0, 700.0),
    ("E", 500.0, 500.0),
    ("F", 500.0, 300.0),
    ("G", 700.0, 200.0),
    ("H", 700.0, 600.0),
];

const DEFAULT_EDGES: [(&str, &str, f64); 10] = [
    ("A", "B", 6.0),
    ("A", "F", 12.0),
    ("B", "F", 5.0),
    ("B", "D", 8.0),
    ("B", "C", 14.0),
    ("C", "D", 3.0),
    ("D", "E", 10.0),
    ("E", "F", 7.0),
    ("F", "G", 9.0),
    ("E", "H", 15.0),
];

/// Builds the demo graph: nodes `A..H` with ids `0..8` and the edges
/// `A-B(6), A-F(12), B-F(5), B-D(8), B-C(14), C-D(3), D-E(10), E-F(7), F-G(9), E-H(15)`
/// with ids `0..10` in that order.
pub fn default_graph() -> Graph {
    let mut graph = Graph::new();

    for (name, x, y) in DEFAULT_NODES {
        graph
            .insert_node(name, x, y)
            .expect("demo node names are unique");
    }

    for (from, to, weight) in DEFAULT_EDGES {
        graph
            .insert_edge(format!("{from}-{to}"), from, to, weight)
            .expect("demo edges join distinct existing nodes");
    }

    graph
}
