use tracing::info;

use super::*;
use crate::{error::DatasetError, io::MetroDataset};

/// Builds a transit graph from a dataset.
///
/// Every station becomes a node whose id is the station id minus one. Every pair of consecutive
/// stops of a route becomes an edge named `"{from}-{to}"` whose weight is the Euclidean distance
/// between the two stations, whose `line` is the index of the route and whose color is the route's.
/// Edge ids are allocated sequentially over all routes in order.
///
/// # Errors
/// Fails if a station id is `0` or if the resulting graph would be invalid, e.g. because a route
/// refers to an unknown station or two consecutive stops share their coordinates.
///
/// # Examples
/// ```
/// use stepgraphs::{algo::*, gens::metro_graph, io::MetroDataset};
///
/// let dataset = MetroDataset::from_json_str(r##"{
///     "stations": [
///         {"id": 1, "name": "West", "x": 0.0, "y": 0.0},
///         {"id": 2, "name": "Center", "x": 3.0, "y": 4.0},
///         {"id": 3, "name": "East", "x": 6.0, "y": 8.0}
///     ],
///     "routes": [{"name": "Line 1", "color": "#ff0000", "stations": [0, 1, 2]}]
/// }"##).unwrap();
///
/// let graph = metro_graph(&dataset).unwrap();
/// assert_eq!(graph.edges()[1].name, "1-2");
/// assert_eq!(graph.shortest_path_with_distance("West", "East").unwrap(), Some((vec![0, 1, 2], 10.0)));
/// ```
pub fn metro_graph(dataset: &MetroDataset) -> Result<Graph, DatasetError> {
    let mut graph = Graph::new();

    for station in &dataset.stations {
        graph.add_node(station.node_id()?, station.name.as_str(), station.x, station.y)?;
    }

    let mut id: EdgeId = 0;
    for (line, route) in (0..).zip(&dataset.routes) {
        for (from, to) in route.segments() {
            let weight = match (graph.node(from), graph.node(to)) {
                (Some(u), Some(v)) => u.distance_to(v),
                _ => DEFAULT_WEIGHT,
            };

            let attrs = EdgeAttrs::new()
                .weight(weight)
                .line(line)
                .color(route.color.as_str());
            graph.add_edge(id, format!("{from}-{to}"), from, to, attrs)?;
            id += 1;
        }
    }

    info!(
        stations = graph.number_of_nodes(),
        segments = graph.number_of_edges(),
        "metro graph built"
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::GraphError,
        io::{Route, Station},
    };

    fn station(id: u32, name: &str, x: f64, y: f64) -> Station {
        Station {
            id,
            name: name.into(),
            x,
            y,
        }
    }

    fn route(name: &str, color: &str, stations: &[NodeId]) -> Route {
        Route {
            name: name.into(),
            color: color.into(),
            stations: stations.to_vec(),
        }
    }

    fn dataset() -> MetroDataset {
        MetroDataset {
            stations: vec![
                station(1, "Harbor", 0.0, 0.0),
                station(2, "Market", 3.0, 4.0),
                station(3, "Castle", 3.0, 10.0),
                station(4, "Park", 9.0, 10.0),
            ],
            routes: vec![
                route("Red", "#ff0000", &[0, 1, 2]),
                route("Blue", "#0000ff", &[1, 3, 2]),
            ],
        }
    }

    #[test]
    fn stations_and_segments() {
        let graph = metro_graph(&dataset()).unwrap();

        assert_eq!(graph.number_of_nodes(), 4);
        assert_eq!(graph.id_of("Harbor"), Some(0));
        assert_eq!(graph.id_of("Park"), Some(3));

        let edges = graph.edges();
        assert_eq!(edges.len(), 4);
        assert_eq!(
            edges.iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
        assert_eq!(edges[0].name, "0-1");
        assert_eq!(edges[0].weight, 5.0);
        assert_eq!((edges[0].line, edges[0].color.as_str()), (0, "#ff0000"));
        assert_eq!(edges[3].name, "3-2");
        assert_eq!(edges[3].weight, 6.0);
        assert_eq!((edges[3].line, edges[3].color.as_str()), (1, "#0000ff"));
    }

    #[test]
    fn invalid_datasets() {
        let mut data = dataset();
        data.stations.push(station(0, "Nowhere", 1.0, 1.0));
        assert!(matches!(
            metro_graph(&data),
            Err(DatasetError::InvalidStationId(0))
        ));

        let mut data = dataset();
        data.routes.push(route("Green", "#00ff00", &[2, 9]));
        assert!(matches!(
            metro_graph(&data),
            Err(DatasetError::Graph(GraphError::NodeNotFound(_)))
        ));

        let mut data = dataset();
        data.stations[1].name = "Harbor".into();
        assert!(matches!(
            metro_graph(&data),
            Err(DatasetError::Graph(GraphError::DuplicateNode(_)))
        ));
    }
}
