//! Validator options.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Which field states re-validate on `input`/`change`.
///
/// Missing keys in a deserialized object read as `false`: a caller passing
/// `{"valid": false}` turns off all three clauses, because a partial object
/// replaces the defaults instead of being merged into them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveOptions {
    /// Re-validate fields that were never validated.
    #[serde(default)]
    pub not_validated: bool,
    /// Re-validate fields currently valid.
    #[serde(default)]
    pub valid: bool,
    /// Re-validate fields currently invalid.
    #[serde(default)]
    pub invalid: bool,
}

impl Default for LiveOptions {
    fn default() -> Self {
        Self::all()
    }
}

impl LiveOptions {
    /// Live revalidation in every state.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            not_validated: true,
            valid: true,
            invalid: true,
        }
    }

    /// No live revalidation: only blur and submit validate.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            not_validated: false,
            valid: false,
            invalid: false,
        }
    }
}

const fn default_live() -> Option<LiveOptions> {
    Some(LiveOptions::all())
}

/// Options of a [`crate::FormValidator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorOptions {
    /// Live revalidation policy. `None` (JSON `null`) disables it.
    #[serde(default = "default_live")]
    pub live: Option<LiveOptions>,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            live: default_live(),
        }
    }
}

impl ValidatorOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the live revalidation policy.
    #[must_use]
    pub const fn live(mut self, live: LiveOptions) -> Self {
        self.live = Some(live);
        self
    }

    /// Disables live revalidation.
    #[must_use]
    pub const fn without_live(mut self) -> Self {
        self.live = None;
        self
    }

    /// Merges a caller-supplied object over the defaults.
    ///
    /// Only top-level keys are merged. Nested objects such as `live` replace
    /// the default value wholesale. Unknown keys are ignored; a value that is
    /// not an object leaves the defaults untouched.
    ///
    /// # Errors
    ///
    /// Returns [`crate::JudgeError::Options`] if a merged value has the wrong type.
    pub fn from_value(overrides: Value) -> Result<Self> {
        let mut merged = serde_json::to_value(Self::default())?;
        if let (Value::Object(base), Value::Object(overrides)) = (&mut merged, overrides) {
            for (key, value) in overrides {
                base.insert(key, value);
            }
        }
        Ok(serde_json::from_value(merged)?)
    }

    /// Parses a JSON options object and merges it over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`crate::JudgeError::Options`] for malformed JSON or mistyped values.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let options = ValidatorOptions::default();
        assert_eq!(options.live, Some(LiveOptions::all()));
    }

    #[test]
    fn test_empty_object_keeps_defaults() {
        let options = ValidatorOptions::from_value(json!({})).unwrap();
        assert_eq!(options, ValidatorOptions::default());
    }

    #[test]
    fn test_partial_live_replaces_defaults() {
        let options = ValidatorOptions::from_value(json!({ "live": { "valid": true } })).unwrap();
        assert_eq!(
            options.live,
            Some(LiveOptions {
                not_validated: false,
                valid: true,
                invalid: false,
            })
        );
    }

    #[test]
    fn test_null_live_disables() {
        let options = ValidatorOptions::from_json(r#"{"live": null}"#).unwrap();
        assert_eq!(options.live, None);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let options = ValidatorOptions::from_value(json!({ "theme": "dark" })).unwrap();
        assert_eq!(options, ValidatorOptions::default());
    }

    #[test]
    fn test_non_object_keeps_defaults() {
        let options = ValidatorOptions::from_value(json!("validateAll")).unwrap();
        assert_eq!(options, ValidatorOptions::default());
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        assert!(ValidatorOptions::from_value(json!({ "live": { "valid": "yes" } })).is_err());
    }
}
