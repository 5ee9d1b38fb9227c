//! Reference validation engine reading declarative rules from fields.
//!
//! A field's `data-validate` attribute holds a JSON array of rules:
//!
//! ```json
//! [
//!   {"kind": "presence", "messages": {"blank": "can't be blank"}},
//!   {"kind": "length", "options": {"minimum": 3}},
//!   {"kind": "uniqueness"}
//! ]
//! ```
//!
//! An empty attribute declares no rules. Every rule but `presence` and
//! `acceptance` ignores blank values. `uniqueness` is answered
//! asynchronously by a [`UniquenessCheck`] running on a local executor.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use futures::executor::LocalSpawner;
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use oxide_dom::{Document, NodeId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::classes::FIELD_ATTR;
use crate::engine::{ValidationEngine, Verdict};
use crate::error::{JudgeError, Result};
use crate::validation::{
    LengthBound, LengthValidator, ListValidator, NumericBound, NumericalityValidator,
    RegexValidator, RequiredValidator, Validator,
};

/// Per-rule message overrides, keyed by message name (`blank`, `taken`, ...).
pub type Messages = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub without: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericalityOptions {
    #[serde(default)]
    pub only_integer: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greater_than: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greater_than_or_equal_to: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_than: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_than_or_equal_to: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    #[serde(rename = "in", default)]
    pub values: Vec<String>,
}

/// One declarative rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rule {
    Presence {
        #[serde(default, skip_serializing_if = "Messages::is_empty")]
        messages: Messages,
    },
    Length {
        #[serde(default)]
        options: LengthOptions,
        #[serde(default, skip_serializing_if = "Messages::is_empty")]
        messages: Messages,
    },
    Format {
        #[serde(default)]
        options: FormatOptions,
        #[serde(default, skip_serializing_if = "Messages::is_empty")]
        messages: Messages,
    },
    Numericality {
        #[serde(default)]
        options: NumericalityOptions,
        #[serde(default, skip_serializing_if = "Messages::is_empty")]
        messages: Messages,
    },
    Inclusion {
        #[serde(default)]
        options: ListOptions,
        #[serde(default, skip_serializing_if = "Messages::is_empty")]
        messages: Messages,
    },
    Exclusion {
        #[serde(default)]
        options: ListOptions,
        #[serde(default, skip_serializing_if = "Messages::is_empty")]
        messages: Messages,
    },
    Acceptance {
        #[serde(default, skip_serializing_if = "Messages::is_empty")]
        messages: Messages,
    },
    /// The value must equal the element `#<id>_confirmation`.
    Confirmation {
        #[serde(default, skip_serializing_if = "Messages::is_empty")]
        messages: Messages,
    },
    Uniqueness {
        #[serde(default, skip_serializing_if = "Messages::is_empty")]
        messages: Messages,
    },
}

impl Rule {
    #[must_use]
    pub const fn presence() -> Self {
        Self::Presence {
            messages: Messages::new(),
        }
    }

    #[must_use]
    pub const fn length(minimum: Option<usize>, maximum: Option<usize>) -> Self {
        Self::Length {
            options: LengthOptions {
                minimum,
                maximum,
                is: None,
            },
            messages: Messages::new(),
        }
    }

    #[must_use]
    pub fn format(pattern: impl Into<String>) -> Self {
        Self::Format {
            options: FormatOptions {
                with: Some(pattern.into()),
                without: None,
            },
            messages: Messages::new(),
        }
    }

    #[must_use]
    pub const fn numericality(options: NumericalityOptions) -> Self {
        Self::Numericality {
            options,
            messages: Messages::new(),
        }
    }

    #[must_use]
    pub fn inclusion<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Inclusion {
            options: ListOptions {
                values: values.into_iter().map(Into::into).collect(),
            },
            messages: Messages::new(),
        }
    }

    #[must_use]
    pub fn exclusion<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Exclusion {
            options: ListOptions {
                values: values.into_iter().map(Into::into).collect(),
            },
            messages: Messages::new(),
        }
    }

    #[must_use]
    pub const fn acceptance() -> Self {
        Self::Acceptance {
            messages: Messages::new(),
        }
    }

    #[must_use]
    pub const fn confirmation() -> Self {
        Self::Confirmation {
            messages: Messages::new(),
        }
    }

    #[must_use]
    pub const fn uniqueness() -> Self {
        Self::Uniqueness {
            messages: Messages::new(),
        }
    }

    /// Overrides one message of this rule.
    #[must_use]
    pub fn message(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.messages_mut().insert(key.into(), text.into());
        self
    }

    fn messages_mut(&mut self) -> &mut Messages {
        match self {
            Self::Presence { messages }
            | Self::Length { messages, .. }
            | Self::Format { messages, .. }
            | Self::Numericality { messages, .. }
            | Self::Inclusion { messages, .. }
            | Self::Exclusion { messages, .. }
            | Self::Acceptance { messages }
            | Self::Confirmation { messages }
            | Self::Uniqueness { messages } => messages,
        }
    }

    /// Compiles the value-only checks of this rule. Rules needing the
    /// document or a lookup compile to nothing.
    fn value_checks(&self) -> std::result::Result<Vec<Box<dyn Validator>>, regex::Error> {
        let mut checks: Vec<Box<dyn Validator>> = Vec::new();
        match self {
            Self::Presence { messages } => {
                checks.push(Box::new(
                    messages
                        .get("blank")
                        .map_or_else(RequiredValidator::new, RequiredValidator::with_message),
                ));
            }
            Self::Length { options, messages } => {
                let bounds = [
                    (options.is.map(LengthBound::Exactly), "wrong_length"),
                    (options.minimum.map(LengthBound::Minimum), "too_short"),
                    (options.maximum.map(LengthBound::Maximum), "too_long"),
                ];
                for (bound, key) in bounds {
                    if let Some(bound) = bound {
                        checks.push(Box::new(messages.get(key).map_or_else(
                            || LengthValidator::new(bound),
                            |m| LengthValidator::with_message(bound, m),
                        )));
                    }
                }
            }
            Self::Format { options, messages } => {
                let message = text(messages, "invalid", "is invalid");
                if let Some(pattern) = &options.with {
                    checks.push(Box::new(RegexValidator::new(pattern, message.clone())?));
                }
                if let Some(pattern) = &options.without {
                    checks.push(Box::new(RegexValidator::rejecting(pattern, message)?));
                }
            }
            Self::Numericality { options, messages } => {
                let mut v = NumericalityValidator::new().messages(
                    messages.get("not_a_number").cloned(),
                    messages.get("not_an_integer").cloned(),
                );
                if options.only_integer {
                    v = v.only_integer();
                }
                let bounds = [
                    (
                        options.greater_than.map(NumericBound::GreaterThan),
                        "greater_than",
                    ),
                    (
                        options
                            .greater_than_or_equal_to
                            .map(NumericBound::GreaterThanOrEqualTo),
                        "greater_than_or_equal_to",
                    ),
                    (options.less_than.map(NumericBound::LessThan), "less_than"),
                    (
                        options
                            .less_than_or_equal_to
                            .map(NumericBound::LessThanOrEqualTo),
                        "less_than_or_equal_to",
                    ),
                ];
                for (bound, key) in bounds {
                    if let Some(bound) = bound {
                        let message = messages
                            .get(key)
                            .cloned()
                            .unwrap_or_else(|| bound.default_message());
                        v = v.bound_with_message(bound, message);
                    }
                }
                checks.push(Box::new(v));
            }
            Self::Inclusion { options, messages } => {
                let mut v = ListValidator::inclusion(options.values.clone());
                if let Some(m) = messages.get("inclusion") {
                    v = v.with_message(m);
                }
                checks.push(Box::new(v));
            }
            Self::Exclusion { options, messages } => {
                let mut v = ListValidator::exclusion(options.values.clone());
                if let Some(m) = messages.get("exclusion") {
                    v = v.with_message(m);
                }
                checks.push(Box::new(v));
            }
            Self::Acceptance { .. } | Self::Confirmation { .. } | Self::Uniqueness { .. } => {}
        }
        Ok(checks)
    }
}

fn text(messages: &Messages, key: &str, default: &str) -> String {
    messages
        .get(key)
        .cloned()
        .unwrap_or_else(|| default.to_string())
}

/// Reads the rules declared on `field`. An empty attribute declares none.
///
/// # Errors
///
/// Returns [`JudgeError::Rules`] if the attribute is not a JSON rule array.
pub fn parse_rules(doc: &Document, field: NodeId) -> Result<Vec<Rule>> {
    let raw = doc.attr(field, FIELD_ATTR).unwrap_or("").trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(|err| JudgeError::Rules {
        field: field_label(doc, field),
        message: err.to_string(),
    })
}

fn field_label(doc: &Document, field: NodeId) -> String {
    doc.attr(field, "id")
        .or_else(|| doc.attr(field, "name"))
        .map_or_else(|| field.to_string(), ToString::to_string)
}

/// Identifies the field a uniqueness lookup is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl FieldRef {
    fn of(doc: &Document, field: NodeId) -> Self {
        Self {
            id: doc.attr(field, "id").map(ToString::to_string),
            name: doc.attr(field, "name").map(ToString::to_string),
        }
    }

    /// Returns the name, falling back to the id.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.name.as_deref().or(self.id.as_deref())
    }
}

/// Asynchronous lookup answering whether a value is still free.
pub trait UniquenessCheck {
    fn is_unique(&self, field: &FieldRef, value: &str) -> LocalBoxFuture<'static, bool>;
}

/// [`ValidationEngine`] evaluating `data-validate` rules.
#[derive(Default)]
pub struct RuleEngine {
    uniqueness: Option<(Rc<dyn UniquenessCheck>, LocalSpawner)>,
}

impl fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleEngine")
            .field("uniqueness", &self.uniqueness.is_some())
            .finish()
    }
}

impl RuleEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `uniqueness` rules with `check`, running lookups on `spawner`.
    #[must_use]
    pub fn with_uniqueness(
        mut self,
        check: impl UniquenessCheck + 'static,
        spawner: LocalSpawner,
    ) -> Self {
        self.uniqueness = Some((Rc::new(check), spawner));
        self
    }

    /// Evaluates every synchronous rule and returns the messages, in rule
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`JudgeError::Rules`] if a `format` pattern does not compile.
    pub fn evaluate(&self, doc: &Document, field: NodeId, rules: &[Rule]) -> Result<Vec<String>> {
        let value = doc.value(field);
        let blank = value.trim().is_empty();
        let mut messages = Vec::new();

        for rule in rules {
            match rule {
                Rule::Presence { .. } => {}
                Rule::Acceptance { messages: m } => {
                    if !doc.is_checked(field) {
                        messages.push(text(m, "accepted", "must be accepted"));
                    }
                    continue;
                }
                Rule::Confirmation { messages: m } => {
                    if !blank && !confirmed(doc, field) {
                        messages.push(text(m, "confirmation", "doesn't match confirmation"));
                    }
                    continue;
                }
                _ if blank => continue,
                _ => {}
            }

            let checks = rule.value_checks().map_err(|err| JudgeError::Rules {
                field: field_label(doc, field),
                message: err.to_string(),
            })?;
            messages.extend(checks.iter().filter_map(|c| c.validate(value).err()));
        }
        Ok(messages)
    }
}

fn confirmed(doc: &Document, field: NodeId) -> bool {
    let Some(id) = doc.attr(field, "id") else {
        return true;
    };
    doc.get_element_by_id(&format!("{id}_confirmation"))
        .is_none_or(|other| doc.value(other) == doc.value(field))
}

fn conclude(verdict: Verdict, messages: Vec<String>) {
    if messages.is_empty() {
        verdict.valid();
    } else {
        verdict.invalid(messages);
    }
}

impl ValidationEngine for RuleEngine {
    fn validate(&self, doc: &Document, field: NodeId, verdict: Verdict) {
        let rules = parse_rules(doc, field).and_then(|rules| {
            let messages = self.evaluate(doc, field, &rules)?;
            Ok((rules, messages))
        });
        let (rules, mut messages) = match rules {
            Ok(found) => found,
            Err(err) => {
                warn!(field = %field, error = %err, "ignoring unreadable rules");
                verdict.valid();
                return;
            }
        };

        let taken = rules.iter().find_map(|rule| match rule {
            Rule::Uniqueness { messages } => {
                Some(text(messages, "taken", "has already been taken"))
            }
            _ => None,
        });
        let value = doc.value(field).to_string();

        match (taken, &self.uniqueness) {
            (Some(taken), Some((check, spawner))) if !value.trim().is_empty() => {
                debug!(field = %field, "scheduling uniqueness lookup");
                let lookup = check.is_unique(&FieldRef::of(doc, field), &value);
                let task = async move {
                    if !lookup.await {
                        messages.push(taken);
                    }
                    conclude(verdict, messages);
                };
                if let Err(err) = spawner.spawn_local(task) {
                    warn!(field = %field, error = %err, "could not schedule uniqueness lookup");
                }
            }
            (Some(_), None) => {
                warn!(field = %field, "no uniqueness check configured, skipping rule");
                conclude(verdict, messages);
            }
            _ => conclude(verdict, messages),
        }
    }
}
