/*!
# Itineraries

Turns a path (as returned by [`ShortestPaths::shortest_path`](crate::algo::ShortestPaths::shortest_path))
into per-station travel details: the line to take from each station and the station after it.

```
use stepgraphs::{algo::*, gens::default_graph, itinerary::itinerary};

let graph = default_graph();
let path = graph.shortest_path("A", "D").unwrap();
let legs = itinerary(&graph, &path, &["Main Line"]).unwrap();

assert_eq!(legs.len(), 3);
assert_eq!(legs[0].to_string(), "A | Line 1 (new) | B");
assert_eq!(legs[2].to_string(), "D | - | terminal");
```
*/

use std::fmt::Display;

use crate::{error::GraphError, prelude::*};

/// One station of an itinerary
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    pub station: NodeId,
    pub station_name: String,
    /// Display name of the line joining this station to the next one
    pub line: Option<String>,
    pub next: Option<NodeId>,
    pub next_name: Option<String>,
}

impl Leg {
    /// Returns true if the itinerary ends at this station
    pub fn is_terminal(&self) -> bool {
        self.next.is_none()
    }
}

impl Display for Leg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} | {}",
            self.station_name,
            self.line.as_deref().unwrap_or("-"),
            self.next_name.as_deref().unwrap_or("terminal")
        )
    }
}

/// Name of line `line`: `line_names[line]` if present, `"Line {line} (new)"` otherwise
pub fn line_name<S: AsRef<str>>(line: u32, line_names: &[S]) -> String {
    line_names
        .get(line as usize)
        .map_or_else(|| format!("Line {line} (new)"), |name| name.as_ref().to_string())
}

/// Builds the itinerary along `path`.
///
/// For each station the line is taken from the first edge joining it to the following station
/// (in either orientation). If no such edge exists, the leg has neither a line nor a next station.
/// The last station always forms a terminal leg.
///
/// # Errors
/// Fails with [`GraphError::NodeNotFound`] if `path` contains an unknown node.
pub fn itinerary<S: AsRef<str>>(
    graph: &Graph,
    path: &[NodeId],
    line_names: &[S],
) -> Result<Vec<Leg>, GraphError> {
    let name = |u: NodeId| {
        graph
            .name_of(u)
            .map(str::to_string)
            .ok_or_else(|| GraphError::node_not_found(NodeRef::Id(u)))
    };

    path.iter()
        .enumerate()
        .map(|(i, &u)| {
            let edge = path
                .get(i + 1)
                .and_then(|&v| graph.edge_between(u, v));

            let (line, next) = match edge {
                Some(edge) => (Some(line_name(edge.line, line_names)), edge.opposite(u)),
                None => (None, None),
            };

            Ok(Leg {
                station: u,
                station_name: name(u)?,
                line,
                next,
                next_name: next.map(&name).transpose()?,
            })
        })
        .collect()
}
