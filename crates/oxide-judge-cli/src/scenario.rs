//! Scenario files: forms to mount and user actions to replay.
//!
//! ```json
//! {
//!   "forms": [{"id": "new_user", "fields": [{"name": "user[email]", "rules": [{"kind": "presence"}]}]}],
//!   "taken": {"user[email]": ["judge@example.com"]},
//!   "steps": [
//!     {"action": "set", "target": "user_email", "value": "judge@example.com"},
//!     {"action": "event", "event": "blur", "target": "user_email"},
//!     {"action": "settle"}
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use futures::future::{self, LocalBoxFuture};
use futures::FutureExt;
use oxide_judge::{FieldRef, FormSpec, UniquenessCheck};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, ScenarioError};

/// A replayable scenario.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub forms: Vec<ScenarioForm>,
    /// Values already taken, keyed by field name.
    #[serde(default)]
    pub taken: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// A form to mount, optionally attached with explicit options before the
/// page-wide defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioForm {
    #[serde(flatten)]
    pub spec: FormSpec,
    #[serde(default)]
    pub options: Option<Value>,
}

/// One user or host action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Change a field's value without firing events.
    Set { target: String, value: String },
    Check { target: String },
    Uncheck { target: String },
    /// Fire `event` (`blur`, `input`, `change`, `submit`) at `target`.
    Event { event: String, target: String },
    /// Run a named operation on a form, like `validateAll`.
    Command {
        form: String,
        name: String,
        #[serde(default)]
        args: Vec<String>,
    },
    /// Let pending asynchronous checks finish.
    Settle,
}

impl Scenario {
    /// Parses a scenario from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Parse`] if the JSON does not describe a
    /// scenario.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a scenario file.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Io`] if the file cannot be read, or fails
    /// like [`Scenario::from_json`].
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

/// Uniqueness lookup answering from a fixed table of taken values.
#[derive(Debug, Clone, Default)]
pub struct TakenValues {
    taken: BTreeMap<String, Vec<String>>,
}

impl TakenValues {
    #[must_use]
    pub const fn new(taken: BTreeMap<String, Vec<String>>) -> Self {
        Self { taken }
    }
}

impl UniquenessCheck for TakenValues {
    fn is_unique(&self, field: &FieldRef, value: &str) -> LocalBoxFuture<'static, bool> {
        let taken = field
            .key()
            .and_then(|key| self.taken.get(key))
            .is_some_and(|values| values.iter().any(|v| v == value));
        future::ready(!taken).boxed_local()
    }
}
