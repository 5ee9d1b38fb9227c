//! Per-form validator: event bindings and field validation.

use std::fmt;
use std::rc::Rc;

use oxide_dom::{Document, Event, EventKind, NodeId};
use tracing::{debug, info};

use crate::engine::{Outbox, Outcome, Resolution, ValidationEngine, Verdict};
use crate::error::Result;
use crate::options::ValidatorOptions;
use crate::reflect;
use crate::selector::LiveSelector;
use crate::state::{fields_of, is_field, FieldState};

/// Which elements a binding listens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// Any field below the form (delegated).
    Field,
    /// Fields matching the live revalidation selector (delegated).
    Live(LiveSelector),
    /// The form element itself.
    Form,
}

impl Filter {
    fn matches(self, doc: &Document, node: NodeId) -> bool {
        match self {
            Self::Field => is_field(doc, node),
            Self::Live(selector) => selector.matches(doc, node),
            Self::Form => false,
        }
    }
}

/// What a binding does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Validate the element the binding matched.
    ValidateInput,
    /// Validate every field and gate the submission.
    ValidateAll,
}

/// One event listener installed on a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub event: EventKind,
    pub filter: Filter,
    pub action: Action,
}

/// Validation behavior attached to one form.
pub struct FormValidator {
    form: NodeId,
    options: ValidatorOptions,
    live: LiveSelector,
    bindings: Vec<Binding>,
    engine: Rc<dyn ValidationEngine>,
    outbox: Outbox,
}

impl fmt::Debug for FormValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormValidator")
            .field("form", &self.form)
            .field("options", &self.options)
            .field("live", &self.live)
            .field("bindings", &self.bindings)
            .field("pending", &self.outbox.len())
            .finish_non_exhaustive()
    }
}

impl FormValidator {
    /// Creates a validator for `form` and installs its bindings.
    #[must_use]
    pub fn new(form: NodeId, options: ValidatorOptions, engine: Rc<dyn ValidationEngine>) -> Self {
        let mut validator = Self {
            form,
            live: LiveSelector::from_options(&options),
            options,
            bindings: Vec::new(),
            engine,
            outbox: Outbox::new(),
        };
        validator.bind_events();
        validator
    }

    #[must_use]
    pub const fn form(&self) -> NodeId {
        self.form
    }

    #[must_use]
    pub const fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    #[must_use]
    pub const fn live_selector(&self) -> LiveSelector {
        self.live
    }

    #[must_use]
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Replaces the options and rebuilds the live selector and bindings.
    pub fn set_options(&mut self, options: ValidatorOptions) {
        self.live = LiveSelector::from_options(&options);
        self.options = options;
        self.bind_events();
    }

    fn bind_events(&mut self) {
        self.bindings = vec![
            Binding {
                event: EventKind::Blur,
                filter: Filter::Field,
                action: Action::ValidateInput,
            },
            Binding {
                event: EventKind::Input,
                filter: Filter::Live(self.live),
                action: Action::ValidateInput,
            },
            // Selects and checkboxes fire change, not input.
            Binding {
                event: EventKind::Change,
                filter: Filter::Live(self.live),
                action: Action::ValidateInput,
            },
            Binding {
                event: EventKind::Submit,
                filter: Filter::Form,
                action: Action::ValidateAll,
            },
        ];
        debug!(form = %self.form, live = %self.live, "bound form events");
    }

    /// Runs this form's listeners for an event bubbling through the form.
    ///
    /// Delegated bindings fire for every matching element from the target up
    /// to, but excluding, the form; bindings on the form fire last. Matches
    /// are decided before any handler runs, against the state at dispatch.
    ///
    /// # Errors
    ///
    /// Returns an error if reflecting a verdict into `doc` fails.
    pub fn handle(&self, doc: &mut Document, event: &mut Event) -> Result<()> {
        let mut path = Vec::new();
        if event.target != self.form {
            path.push(event.target);
            path.extend(doc.ancestors(event.target).take_while(|&a| a != self.form));
        }

        let mut queue: Vec<(NodeId, Action)> = Vec::new();
        for node in path {
            for binding in &self.bindings {
                if binding.event == event.kind && binding.filter.matches(doc, node) {
                    queue.push((node, binding.action));
                }
            }
        }
        for binding in &self.bindings {
            if binding.event == event.kind && binding.filter == Filter::Form {
                queue.push((self.form, binding.action));
            }
        }

        let mut current = None;
        for (node, action) in queue {
            if current != Some(node) && event.is_propagation_stopped() {
                break;
            }
            current = Some(node);
            event.current_target = Some(node);
            match action {
                Action::ValidateInput => self.validate_input(doc, node)?,
                Action::ValidateAll => self.validate_all(doc, event)?,
            }
        }
        Ok(())
    }

    /// Validates every field of the form, then cancels `event` if any field
    /// ended invalid. Fields still waiting on an asynchronous verdict do not
    /// block.
    ///
    /// # Errors
    ///
    /// Returns an error if reflecting a verdict into `doc` fails.
    pub fn validate_all(&self, doc: &mut Document, event: &mut Event) -> Result<()> {
        let fields = self.fields(doc);
        debug!(form = %self.form, count = fields.len(), "validating all fields");
        for field in fields {
            self.validate_input(doc, field)?;
        }

        if self.has_invalid_field(doc) {
            info!(form = %self.form, "submission blocked by invalid fields");
            event.stop_propagation();
            event.prevent_default();
        }
        Ok(())
    }

    /// Asks the engine about one field and applies whatever has resolved.
    ///
    /// # Errors
    ///
    /// Returns an error if reflecting a verdict into `doc` fails.
    pub fn validate_input(&self, doc: &mut Document, field: NodeId) -> Result<()> {
        debug!(form = %self.form, field = %field, "validating field");
        self.engine
            .validate(doc, field, Verdict::new(field, self.outbox.clone()));
        self.flush(doc)?;
        Ok(())
    }

    /// Applies queued verdicts in arrival order. Returns how many applied.
    ///
    /// # Errors
    ///
    /// Returns an error if a verdict names a node that is not an element.
    pub fn flush(&self, doc: &mut Document) -> Result<usize> {
        let resolutions = self.outbox.drain();
        let count = resolutions.len();
        for Resolution { field, outcome } in resolutions {
            match outcome {
                Outcome::Valid => reflect::on_valid(doc, field)?,
                Outcome::Invalid(messages) => reflect::on_invalid(doc, field, &messages)?,
            }
        }
        Ok(count)
    }

    /// Returns the number of verdicts waiting to be applied.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.outbox.len()
    }

    /// Returns the form's fields in document order.
    #[must_use]
    pub fn fields(&self, doc: &Document) -> Vec<NodeId> {
        fields_of(doc, self.form)
    }

    /// Returns whether any field of the form is currently invalid.
    #[must_use]
    pub fn has_invalid_field(&self, doc: &Document) -> bool {
        self.fields(doc)
            .into_iter()
            .any(|f| FieldState::of(doc, f) == FieldState::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::FIELD_ATTR;
    use crate::options::LiveOptions;

    fn reject_empty(doc: &Document, field: NodeId, verdict: Verdict) {
        if doc.value(field).is_empty() {
            verdict.invalid(["can't be blank"]);
        } else {
            verdict.valid();
        }
    }

    fn form_with(doc: &mut Document, ids: &[&str]) -> (NodeId, Vec<NodeId>) {
        let root = doc.root();
        let form = doc.build("form").append_to(root).unwrap();
        let fields = ids
            .iter()
            .map(|id| {
                let group = doc.build("div").append_to(form).unwrap();
                doc.build("input")
                    .id(id)
                    .attr(FIELD_ATTR, "")
                    .append_to(group)
                    .unwrap()
            })
            .collect();
        (form, fields)
    }

    #[test]
    fn test_default_bindings() {
        let mut doc = Document::new();
        let (form, _) = form_with(&mut doc, &[]);
        let v = FormValidator::new(form, ValidatorOptions::default(), Rc::new(reject_empty));
        let events: Vec<_> = v.bindings().iter().map(|b| b.event).collect();
        assert_eq!(
            events,
            vec![
                EventKind::Blur,
                EventKind::Input,
                EventKind::Change,
                EventKind::Submit
            ]
        );
    }

    #[test]
    fn test_set_options_rebuilds_selector() {
        let mut doc = Document::new();
        let (form, _) = form_with(&mut doc, &[]);
        let mut v = FormValidator::new(form, ValidatorOptions::default(), Rc::new(reject_empty));
        v.set_options(ValidatorOptions::new().live(LiveOptions::none()));
        assert!(v.live_selector().is_empty());
        assert_eq!(v.bindings()[1].filter, Filter::Live(LiveSelector::default()));
    }

    #[test]
    fn test_validate_all_does_not_short_circuit() {
        let mut doc = Document::new();
        let (form, fields) = form_with(&mut doc, &["a", "b", "c"]);
        doc.set_value(fields[1], "filled").unwrap();
        let v = FormValidator::new(form, ValidatorOptions::default(), Rc::new(reject_empty));

        let mut event = Event::new(EventKind::Submit, form);
        v.validate_all(&mut doc, &mut event).unwrap();

        assert_eq!(FieldState::of(&doc, fields[0]), FieldState::Invalid);
        assert_eq!(FieldState::of(&doc, fields[1]), FieldState::Valid);
        assert_eq!(FieldState::of(&doc, fields[2]), FieldState::Invalid);
        assert!(event.is_default_prevented());
        assert!(event.is_propagation_stopped());
    }

    #[test]
    fn test_handle_blur_on_field() {
        let mut doc = Document::new();
        let (form, fields) = form_with(&mut doc, &["a"]);
        let v = FormValidator::new(form, ValidatorOptions::default(), Rc::new(reject_empty));

        let mut event = Event::new(EventKind::Blur, fields[0]);
        v.handle(&mut doc, &mut event).unwrap();
        assert_eq!(event.current_target, Some(fields[0]));
        assert_eq!(FieldState::of(&doc, fields[0]), FieldState::Invalid);
        assert!(event.outcome().proceeds());
    }

    #[test]
    fn test_handle_ignores_unmarked_elements() {
        let mut doc = Document::new();
        let (form, _) = form_with(&mut doc, &[]);
        let plain = doc.build("input").append_to(form).unwrap();
        let v = FormValidator::new(form, ValidatorOptions::default(), Rc::new(reject_empty));

        let mut event = Event::new(EventKind::Blur, plain);
        v.handle(&mut doc, &mut event).unwrap();
        assert_eq!(event.current_target, None);
        assert!(doc.classes(plain).unwrap().is_empty());
    }

    #[test]
    fn test_pending_verdicts_apply_on_flush() {
        use std::cell::RefCell;

        let parked: Rc<RefCell<Vec<Verdict>>> = Rc::default();
        let sink = Rc::clone(&parked);
        let engine = move |_: &Document, _: NodeId, verdict: Verdict| {
            sink.borrow_mut().push(verdict);
        };

        let mut doc = Document::new();
        let (form, fields) = form_with(&mut doc, &["a"]);
        let v = FormValidator::new(form, ValidatorOptions::default(), Rc::new(engine));
        v.validate_input(&mut doc, fields[0]).unwrap();
        assert_eq!(FieldState::of(&doc, fields[0]), FieldState::NotValidated);

        let verdict = parked.borrow_mut().pop().unwrap();
        verdict.invalid(["has already been taken"]);
        assert_eq!(v.pending(), 1);
        assert_eq!(v.flush(&mut doc).unwrap(), 1);
        assert_eq!(FieldState::of(&doc, fields[0]), FieldState::Invalid);
    }
}
