use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{NodeId, error::DatasetError};

/// A station record. Ids start at `1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: u32,
    pub name: String,
    pub x: f64,
    pub y: f64,
}

impl Station {
    /// Node id of the station, i.e. its record id shifted to start at `0`.
    ///
    /// # Errors
    /// Fails with [`DatasetError::InvalidStationId`] if the record id is `0`.
    pub fn node_id(&self) -> Result<NodeId, DatasetError> {
        self.id
            .checked_sub(1)
            .ok_or(DatasetError::InvalidStationId(self.id))
    }
}

/// A route record: a named, colored sequence of stops given by node id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub name: String,
    pub color: String,
    pub stations: Vec<NodeId>,
}

impl Route {
    /// Returns an iterator over consecutive pairs of stops
    pub fn segments(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.stations.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Stations and routes of a transit network.
///
/// # Examples
/// ```
/// use stepgraphs::io::MetroDataset;
///
/// let dataset = MetroDataset::from_json_str(r##"{
///     "stations": [
///         {"id": 1, "name": "North", "x": 0.0, "y": 0.0},
///         {"id": 2, "name": "South", "x": 0.0, "y": 10.0}
///     ],
///     "routes": [{"name": "Line 1", "color": "#ff0000", "stations": [0, 1]}]
/// }"##).unwrap();
///
/// assert_eq!(dataset.stations.len(), 2);
/// assert_eq!(dataset.line_name(0), Some("Line 1"));
/// assert_eq!(dataset.line_name(1), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetroDataset {
    pub stations: Vec<Station>,
    pub routes: Vec<Route>,
}

impl MetroDataset {
    /// Parses a single JSON document holding both record lists
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let dataset: Self = serde_json::from_reader(reader)?;
        dataset.log_loaded();
        Ok(dataset)
    }

    /// Parses a single JSON document holding both record lists
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let dataset: Self = serde_json::from_str(json)?;
        dataset.log_loaded();
        Ok(dataset)
    }

    /// Reads the stations and the routes from two files holding one JSON array each
    pub fn from_files<P, Q>(stations: P, routes: Q) -> Result<Self, DatasetError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let stations = serde_json::from_reader(BufReader::new(File::open(stations)?))?;
        let routes = serde_json::from_reader(BufReader::new(File::open(routes)?))?;

        let dataset = Self { stations, routes };
        dataset.log_loaded();
        Ok(dataset)
    }

    /// Display name of the route with index `line`
    pub fn line_name(&self, line: u32) -> Option<&str> {
        self.routes
            .get(line as usize)
            .map(|route| route.name.as_str())
    }

    /// Display names of all routes, indexed by line
    pub fn line_names(&self) -> Vec<&str> {
        self.routes.iter().map(|route| route.name.as_str()).collect()
    }

    fn log_loaded(&self) {
        debug!(
            stations = self.stations.len(),
            routes = self.routes.len(),
            "dataset loaded"
        );
    }
}
