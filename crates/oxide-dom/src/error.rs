//! Error types for document operations.

use thiserror::Error;

use crate::document::NodeId;

/// Document-specific errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomError {
    /// The node id does not belong to this document.
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    /// The operation requires an element but the node is a text node.
    #[error("node {0} is not an element")]
    NotAnElement(NodeId),

    /// The node has no parent to insert relative to.
    #[error("node {0} has no parent")]
    NoParent(NodeId),

    /// Inserting the node would make it its own ancestor.
    #[error("cannot insert {child} into {parent}: would create a cycle")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    /// Unrecognized event name.
    #[error("unknown event: {0}")]
    UnknownEvent(String),
}

/// Result type alias for document operations.
pub type Result<T> = std::result::Result<T, DomError>;
