//! Live revalidation predicate.

use std::fmt;

use oxide_dom::{Document, NodeId};

use crate::classes::{FIELD_ATTR, FIELD_ERROR, FIELD_SUCCESS};
use crate::options::ValidatorOptions;
use crate::state::{is_field, FieldState};

/// Decides whether an `input`/`change` event re-validates a field.
///
/// Built once from the options; each clause is OR-ed and also requires the
/// element to be a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiveSelector {
    not_validated: bool,
    valid: bool,
    invalid: bool,
}

impl LiveSelector {
    #[must_use]
    pub fn from_options(options: &ValidatorOptions) -> Self {
        options.live.map_or_else(Self::default, |live| Self {
            not_validated: live.not_validated,
            valid: live.valid,
            invalid: live.invalid,
        })
    }

    /// Returns whether no field can ever match.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.not_validated || self.valid || self.invalid)
    }

    #[must_use]
    pub const fn matches_state(&self, state: FieldState) -> bool {
        match state {
            FieldState::NotValidated => self.not_validated,
            FieldState::Valid => self.valid,
            FieldState::Invalid => self.invalid,
        }
    }

    #[must_use]
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        is_field(doc, node) && self.matches_state(FieldState::of(doc, node))
    }
}

/// Renders the equivalent CSS selector, for diagnostics.
impl fmt::Display for LiveSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut clauses = Vec::new();
        if self.not_validated {
            clauses.push(format!(
                "[{FIELD_ATTR}]:not(.{FIELD_SUCCESS}, .{FIELD_ERROR})"
            ));
        }
        if self.valid {
            clauses.push(format!("[{FIELD_ATTR}].{FIELD_SUCCESS}"));
        }
        if self.invalid {
            clauses.push(format!("[{FIELD_ATTR}].{FIELD_ERROR}"));
        }
        f.write_str(&clauses.join(", "))
    }
}
