//! Error types for scenario replay.

use std::path::PathBuf;

use oxide_dom::DomError;
use oxide_judge::JudgeError;

/// Errors that can occur while loading or replaying a scenario.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// The scenario file could not be read.
    #[error("Failed to read scenario '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scenario is not valid JSON or has the wrong shape.
    #[error("Failed to parse scenario: {0}")]
    Parse(#[from] serde_json::Error),

    /// A step names an element id that is not in the document.
    #[error("No element with id '{0}'")]
    UnknownElement(String),

    #[error(transparent)]
    Judge(#[from] JudgeError),

    #[error(transparent)]
    Dom(#[from] DomError),
}

/// Result type alias for scenario operations.
pub type Result<T> = std::result::Result<T, ScenarioError>;
