//! Contract with the validation engine.
//!
//! The engine decides whether a field is valid; the validator only reflects
//! that decision. An engine receives a [`Verdict`] per call and resolves it
//! exactly once, either before returning or later (for example after a
//! uniqueness lookup). Resolutions are queued in an [`Outbox`] in arrival
//! order and applied by the validator on its next flush. Nothing is ever
//! cancelled: two overlapping verdicts for one field both apply, the later
//! arrival winning.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use oxide_dom::{Document, NodeId};
use tracing::warn;

/// Result of validating one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Valid,
    /// Ordered messages to display.
    Invalid(Vec<String>),
}

/// An outcome for a specific field, as queued in an [`Outbox`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub field: NodeId,
    pub outcome: Outcome,
}

/// Arrival-ordered queue of resolutions, shared between a validator and
/// the verdicts it handed out.
#[derive(Debug, Clone, Default)]
pub struct Outbox {
    queue: Rc<RefCell<VecDeque<Resolution>>>,
}

impl Outbox {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, resolution: Resolution) {
        self.queue.borrow_mut().push_back(resolution);
    }

    /// Takes every queued resolution, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<Resolution> {
        self.queue.borrow_mut().drain(..).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

/// One-shot handle through which an engine reports a field's outcome.
///
/// Consumed on resolution, so it can report at most once. Dropping it
/// unresolved leaves the field in its previous state.
#[derive(Debug)]
pub struct Verdict {
    field: NodeId,
    outbox: Outbox,
    resolved: bool,
}

impl Verdict {
    #[must_use]
    pub const fn new(field: NodeId, outbox: Outbox) -> Self {
        Self {
            field,
            outbox,
            resolved: false,
        }
    }

    /// The field being validated.
    #[must_use]
    pub const fn field(&self) -> NodeId {
        self.field
    }

    /// Reports the field as valid.
    pub fn valid(self) {
        self.resolve(Outcome::Valid);
    }

    /// Reports the field as invalid with the given messages.
    pub fn invalid<I, S>(self, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resolve(Outcome::Invalid(
            messages.into_iter().map(Into::into).collect(),
        ));
    }

    /// Reports an outcome.
    pub fn resolve(mut self, outcome: Outcome) {
        self.resolved = true;
        self.outbox.push(Resolution {
            field: self.field,
            outcome,
        });
    }
}

impl Drop for Verdict {
    fn drop(&mut self) {
        if !self.resolved {
            warn!(field = %self.field, "validation verdict dropped without a result");
        }
    }
}

/// Evaluates a field's rules and resolves the verdict.
pub trait ValidationEngine {
    /// Validates `field`. Must resolve `verdict` now or later, once.
    fn validate(&self, doc: &Document, field: NodeId, verdict: Verdict);
}

impl<F> ValidationEngine for F
where
    F: Fn(&Document, NodeId, Verdict),
{
    fn validate(&self, doc: &Document, field: NodeId, verdict: Verdict) {
        self(doc, field, verdict);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolutions_queue_in_arrival_order() {
        let mut doc = Document::new();
        let field = doc.create_element("input");
        let outbox = Outbox::new();

        let first = Verdict::new(field, outbox.clone());
        let second = Verdict::new(field, outbox.clone());
        second.invalid(["is too short"]);
        first.valid();

        assert_eq!(
            outbox.drain(),
            vec![
                Resolution {
                    field,
                    outcome: Outcome::Invalid(vec!["is too short".to_string()]),
                },
                Resolution {
                    field,
                    outcome: Outcome::Valid,
                },
            ]
        );
        assert!(outbox.is_empty());
    }

    #[test]
    fn test_dropped_verdict_reports_nothing() {
        let mut doc = Document::new();
        let field = doc.create_element("input");
        let outbox = Outbox::new();
        drop(Verdict::new(field, outbox.clone()));
        assert!(outbox.is_empty());
    }

    #[test]
    fn test_closure_engine() {
        let mut doc = Document::new();
        let field = doc.create_element("input");
        let outbox = Outbox::new();
        let engine = |_: &Document, _: NodeId, verdict: Verdict| verdict.valid();
        engine.validate(&doc, field, Verdict::new(field, outbox.clone()));
        assert_eq!(outbox.len(), 1);
    }
}
