use std::fmt::{Debug, Display};

use crate::NodeId;

/// Edges are identified by caller-visible unsigned integers
pub type EdgeId = u32;

/// We limit the number of edges to `2^32 - 1`.
pub type NumEdges = EdgeId;

/// Weight used when an edge is added without an explicit one
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Line used when an edge is added without an explicit one
pub const DEFAULT_LINE: u32 = 1;

/// Color used when an edge is added without an explicit one
pub const DEFAULT_COLOR: &str = "#000000";

/// An undirected weighted edge.
/// `(from, to)` and `(to, from)` denote the same edge; `from != to` and `weight > 0` always hold
/// for edges stored in a [`Graph`](crate::Graph).
#[derive(Clone, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub name: String,
    pub from: NodeId,
    pub to: NodeId,
    pub weight: f64,
    /// Logical grouping, e.g. a transit line
    pub line: u32,
    pub color: String,
}

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{}; {})", self.from, self.to, self.weight)
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Edge {
    /// Returns the endpoints with the smaller id first
    pub fn normalized(&self) -> (NodeId, NodeId) {
        (self.from.min(self.to), self.from.max(self.to))
    }

    /// Returns true if the edge joins `u` and `v` in either orientation
    pub fn connects(&self, u: NodeId, v: NodeId) -> bool {
        (self.from == u && self.to == v) || (self.from == v && self.to == u)
    }

    /// Given one endpoint, returns the other one; `None` if `u` is not an endpoint
    pub fn opposite(&self, u: NodeId) -> Option<NodeId> {
        if self.from == u {
            Some(self.to)
        } else if self.to == u {
            Some(self.from)
        } else {
            None
        }
    }
}

/// Optional attributes of an edge that is about to be added.
/// Every attribute that is not set falls back to its default.
///
/// ```
/// use stepgraphs::prelude::*;
///
/// let attrs = EdgeAttrs::new().weight(2.5).color("#ff0000");
/// assert_eq!(attrs.get_weight(), 2.5);
/// assert_eq!(attrs.get_line(), DEFAULT_LINE);
/// assert_eq!(attrs.get_color(), "#ff0000");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeAttrs {
    weight: Option<f64>,
    line: Option<u32>,
    color: Option<String>,
}

impl EdgeAttrs {
    /// Creates a new set of attributes where everything is defaulted
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the weight
    pub fn set_weight(&mut self, weight: f64) {
        self.weight = Some(weight);
    }

    /// Sets the weight
    pub fn weight(mut self, weight: f64) -> Self {
        self.set_weight(weight);
        self
    }

    /// Sets the line
    pub fn set_line(&mut self, line: u32) {
        self.line = Some(line);
    }

    /// Sets the line
    pub fn line(mut self, line: u32) -> Self {
        self.set_line(line);
        self
    }

    /// Sets the color
    pub fn set_color<S: Into<String>>(&mut self, color: S) {
        self.color = Some(color.into());
    }

    /// Sets the color
    pub fn color<S: Into<String>>(mut self, color: S) -> Self {
        self.set_color(color);
        self
    }

    /// The weight as supplied by the caller, `None` if it was omitted
    pub fn supplied_weight(&self) -> Option<f64> {
        self.weight
    }

    pub fn get_weight(&self) -> f64 {
        self.weight.unwrap_or(DEFAULT_WEIGHT)
    }

    pub fn get_line(&self) -> u32 {
        self.line.unwrap_or(DEFAULT_LINE)
    }

    pub fn get_color(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_COLOR)
    }
}

impl From<f64> for EdgeAttrs {
    fn from(weight: f64) -> Self {
        EdgeAttrs::new().weight(weight)
    }
}
