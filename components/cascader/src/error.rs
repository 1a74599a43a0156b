//! Error types for the selection engine.

use thiserror::Error;

use crate::tree::NodeId;

/// Error returned when a selection operation cannot be carried out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CascaderError {
    /// No node in the column at `level` carries the requested value.
    #[error("no option with value {value} at level {level}")]
    NodeNotFound {
        /// Depth of the column that was searched.
        level: usize,
        /// Debug rendering of the value that was not found.
        value: String,
    },
    /// The value path ran out before a leaf option was reached.
    #[error("value path of {levels} level(s) ends before a leaf option")]
    IncompletePath {
        /// Number of values that were consumed.
        levels: usize,
    },
    /// The node id does not belong to this tree.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
    /// The upward walk needed a parent the node does not have.
    #[error("node {node} has no ancestor at level index {level}")]
    MissingParent {
        /// Node the walk started from.
        node: NodeId,
        /// Level index that was requested for the node.
        level: usize,
    },
}
