//! Error types for form validation.

use oxide_dom::{DomError, NodeId};
use thiserror::Error;

/// Validation-layer errors.
///
/// A field failing its rules is not an error: it is reported through the
/// engine's verdict and reflected in the document.
#[derive(Debug, Error)]
pub enum JudgeError {
    /// A dispatched command name is not a known operation.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// A command was dispatched without a required argument.
    #[error("operation {operation} requires argument {argument}")]
    MissingArgument {
        operation: &'static str,
        argument: &'static str,
    },

    /// The node is not a `<form>` element.
    #[error("node {0} is not a form")]
    NotAForm(NodeId),

    /// The options object could not be read.
    #[error("invalid validator options: {0}")]
    Options(#[from] serde_json::Error),

    /// A `data-validate` rule set could not be compiled.
    #[error("invalid rules on {field}: {message}")]
    Rules { field: String, message: String },

    /// A document operation failed.
    #[error(transparent)]
    Dom(#[from] DomError),
}

/// Result type alias for validation operations.
pub type Result<T> = std::result::Result<T, JudgeError>;
