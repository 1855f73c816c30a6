/*!
# Errors

Every failure in this crate is an expected, recoverable condition and is reported as a value:

- [`GraphError`] covers rejected graph mutations and unknown node references. A rejected
  mutation never changes the graph.
- [`AlgoError`] covers algorithm-level "no more work" / "no solution" outcomes. They are terminal
  for the engine that reports them but say nothing about the health of the process.
- [`DatasetError`] covers reading station/route datasets.
*/

use thiserror::Error;

use crate::{NodeId, NodeRef};

/// Rejected graph mutation or lookup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("node not found: {0}")]
    NodeNotFound(String),

    #[error("duplicate node name: {0:?}")]
    DuplicateNode(String),

    #[error("duplicate node id: {0}")]
    DuplicateNodeId(NodeId),

    #[error("source and target of an edge cannot be the same node: {0}")]
    SelfLoop(String),

    #[error("edge weight has to be positive and finite, got {0}")]
    NonPositiveWeight(String),

    /// Required input was absent. Only raised by input collaborators, never by the graph itself.
    #[error("missing required information: {0}")]
    MissingInfo(String),

    #[error("an edge between {0} and {1} already exists")]
    EdgeExists(NodeId, NodeId),

    /// Every id (or dense node position) of the named kind is taken
    #[error("no free {0} left")]
    IdsExhausted(&'static str),
}

impl GraphError {
    pub(crate) fn node_not_found(node: NodeRef<'_>) -> Self {
        GraphError::NodeNotFound(node.to_string())
    }

    /// Numeric result code as used by input collaborators; `0` is reserved for success
    pub fn code(&self) -> u8 {
        match self {
            GraphError::NodeNotFound(_) => 1,
            GraphError::DuplicateNode(_) => 2,
            GraphError::SelfLoop(_) => 3,
            GraphError::NonPositiveWeight(_) => 4,
            GraphError::MissingInfo(_) => 5,
            GraphError::EdgeExists(..) => 6,
            GraphError::DuplicateNodeId(_) => 7,
            GraphError::IdsExhausted(_) => 8,
        }
    }
}

/// Algorithm-level outcome signalling that no further progress or no solution is possible
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AlgoError {
    #[error("priority queue is empty")]
    EmptyQueue,

    #[error("no spanning tree exists: graph is disconnected from the source")]
    NoFeasibleTree,

    #[error("graph is disconnected")]
    Disconnected,
}

/// Failure while reading a station/route dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid dataset: {0}")]
    Graph(#[from] GraphError),

    #[error("station ids start at 1, got {0}")]
    InvalidStationId(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let errors = [
            GraphError::NodeNotFound("a".into()),
            GraphError::DuplicateNode("a".into()),
            GraphError::SelfLoop("a".into()),
            GraphError::NonPositiveWeight("0".into()),
            GraphError::MissingInfo("name".into()),
            GraphError::EdgeExists(0, 1),
            GraphError::DuplicateNodeId(0),
            GraphError::IdsExhausted("node id"),
        ];
        let mut codes: Vec<_> = errors.iter().map(GraphError::code).collect();
        assert_eq!(codes, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn messages() {
        assert_eq!(
            GraphError::node_not_found(NodeRef::Name("X")).to_string(),
            "node not found: \"X\""
        );
        assert_eq!(
            GraphError::node_not_found(NodeRef::Id(4)).to_string(),
            "node not found: #4"
        );
    }
}
