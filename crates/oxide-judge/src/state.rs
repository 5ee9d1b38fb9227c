//! Field validation state, read back from the document.

use std::fmt;

use oxide_dom::{Document, NodeId};

use crate::classes::{FIELD_ATTR, FIELD_ERROR, FIELD_SUCCESS};

/// Last known validation state of a field.
///
/// Never stored: it is derived from the field's classes on every read, so
/// it follows whatever the document currently says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldState {
    NotValidated,
    Valid,
    Invalid,
}

impl FieldState {
    /// Reads the state of `field`. The error class wins if both are present.
    #[must_use]
    pub fn of(doc: &Document, field: NodeId) -> Self {
        if doc.has_class(field, FIELD_ERROR) {
            Self::Invalid
        } else if doc.has_class(field, FIELD_SUCCESS) {
            Self::Valid
        } else {
            Self::NotValidated
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotValidated => "not_validated",
            Self::Valid => "valid",
            Self::Invalid => "invalid",
        }
    }
}

impl fmt::Display for FieldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns whether `node` is a validatable field.
#[must_use]
pub fn is_field(doc: &Document, node: NodeId) -> bool {
    doc.has_attr(node, FIELD_ATTR)
}

/// Returns every field below `form`, in document order.
#[must_use]
pub fn fields_of(doc: &Document, form: NodeId) -> Vec<NodeId> {
    doc.descendants(form)
        .into_iter()
        .filter(|&n| is_field(doc, n))
        .collect()
}
