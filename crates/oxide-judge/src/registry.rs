//! Attaching validators to forms and routing events to them.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use oxide_dom::{Document, Event, EventKind, EventOutcome, NodeId};
use tracing::{debug, info};

use crate::classes::{FORM_NO_VALIDATE_ATTR, INPUT_BASE};
use crate::engine::ValidationEngine;
use crate::error::{JudgeError, Result};
use crate::options::ValidatorOptions;
use crate::validator::FormValidator;

/// Operation dispatched by name to a form's existing validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Validate every field, as on submit.
    ValidateAll,
    /// Validate a single field.
    ValidateInput(NodeId),
}

impl Command {
    /// Resolves a method name and its arguments.
    ///
    /// # Errors
    ///
    /// Returns [`JudgeError::UnknownOperation`] for a name that is not a
    /// command and [`JudgeError::MissingArgument`] when `validateInput` has
    /// no field.
    pub fn parse(name: &str, args: &[NodeId]) -> Result<Self> {
        match name {
            "validateAll" => Ok(Self::ValidateAll),
            "validateInput" => args
                .first()
                .copied()
                .map(Self::ValidateInput)
                .ok_or(JudgeError::MissingArgument {
                    operation: "validateInput",
                    argument: "field",
                }),
            other => Err(JudgeError::UnknownOperation(other.to_string())),
        }
    }
}

/// Argument of [`FormValidation::attach`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachArg {
    /// Bind with these options (ignored when already bound).
    Options(ValidatorOptions),
    /// Bind with defaults if needed, then run the command.
    Command(Command),
}

impl From<ValidatorOptions> for AttachArg {
    fn from(options: ValidatorOptions) -> Self {
        Self::Options(options)
    }
}

impl From<Command> for AttachArg {
    fn from(command: Command) -> Self {
        Self::Command(command)
    }
}

/// What attaching did to one form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachStatus {
    /// The form opted out with `data-novalidate="true"`.
    Skipped,
    /// A validator was created.
    Bound,
    /// The form already had a validator.
    AlreadyBound,
    /// A command ran; `validateAll` reports the synthetic submit outcome.
    Ran(Option<EventOutcome>),
}

/// Registry of form validators, keyed by form.
pub struct FormValidation {
    engine: Rc<dyn ValidationEngine>,
    validators: BTreeMap<NodeId, FormValidator>,
}

impl fmt::Debug for FormValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormValidation")
            .field("validators", &self.validators)
            .finish_non_exhaustive()
    }
}

impl FormValidation {
    /// Creates an empty registry validating through `engine`.
    #[must_use]
    pub const fn new(engine: Rc<dyn ValidationEngine>) -> Self {
        Self {
            engine,
            validators: BTreeMap::new(),
        }
    }

    /// Returns the validator bound to `form`.
    #[must_use]
    pub fn validator(&self, form: NodeId) -> Option<&FormValidator> {
        self.validators.get(&form)
    }

    /// Returns a mutable handle to the validator bound to `form`.
    pub fn validator_mut(&mut self, form: NodeId) -> Option<&mut FormValidator> {
        self.validators.get_mut(&form)
    }

    /// Returns whether `form` has a validator.
    #[must_use]
    pub fn is_bound(&self, form: NodeId) -> bool {
        self.validators.contains_key(&form)
    }

    /// Iterates over bound forms.
    pub fn forms(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.validators.keys().copied()
    }

    /// Attaches validation to each form, then dispatches a command if one
    /// was given. Stops at the first failing form.
    ///
    /// # Errors
    ///
    /// Returns [`JudgeError::NotAForm`] if a node is not a `<form>`, or the
    /// error of the command that failed.
    pub fn attach(
        &mut self,
        doc: &mut Document,
        forms: &[NodeId],
        arg: impl Into<AttachArg>,
    ) -> Result<Vec<AttachStatus>> {
        let arg = arg.into();
        forms
            .iter()
            .map(|&form| self.attach_one(doc, form, &arg))
            .collect()
    }

    fn attach_one(
        &mut self,
        doc: &mut Document,
        form: NodeId,
        arg: &AttachArg,
    ) -> Result<AttachStatus> {
        if doc.tag(form) != Some("form") {
            return Err(JudgeError::NotAForm(form));
        }
        if is_opted_out(doc, form) {
            debug!(form = %form, "form opted out of validation");
            return Ok(AttachStatus::Skipped);
        }
        add_input_classes(doc, form)?;

        let status = if self.validators.contains_key(&form) {
            AttachStatus::AlreadyBound
        } else {
            let options = match arg {
                AttachArg::Options(options) => options.clone(),
                AttachArg::Command(_) => ValidatorOptions::default(),
            };
            info!(form = %form, "attaching form validation");
            let validator = FormValidator::new(form, options, Rc::clone(&self.engine));
            self.validators.insert(form, validator);
            AttachStatus::Bound
        };

        match arg {
            AttachArg::Options(_) => Ok(status),
            AttachArg::Command(command) => self.run(doc, form, *command).map(AttachStatus::Ran),
        }
    }

    /// Runs a command on a bound form.
    ///
    /// # Errors
    ///
    /// Returns [`JudgeError::NotAForm`] if `form` has no validator.
    pub fn run(
        &self,
        doc: &mut Document,
        form: NodeId,
        command: Command,
    ) -> Result<Option<EventOutcome>> {
        let validator = self.validators.get(&form).ok_or(JudgeError::NotAForm(form))?;
        match command {
            Command::ValidateAll => {
                let mut event = Event::new(EventKind::Submit, form);
                event.current_target = Some(form);
                validator.validate_all(doc, &mut event)?;
                Ok(Some(event.outcome()))
            }
            Command::ValidateInput(field) => {
                validator.validate_input(doc, field)?;
                Ok(None)
            }
        }
    }

    /// Dispatches `event` through every bound form on its path, innermost
    /// first, until propagation is stopped.
    ///
    /// # Errors
    ///
    /// Returns an error if reflecting a verdict into `doc` fails.
    pub fn dispatch(&self, doc: &mut Document, event: &mut Event) -> Result<EventOutcome> {
        let path: Vec<NodeId> = std::iter::once(event.target)
            .chain(doc.ancestors(event.target))
            .collect();
        for node in path {
            if let Some(validator) = self.validators.get(&node) {
                validator.handle(doc, event)?;
                if event.is_propagation_stopped() {
                    break;
                }
            }
        }
        event.current_target = None;
        Ok(event.outcome())
    }

    /// Applies verdicts that arrived since the last flush, for every form.
    ///
    /// # Errors
    ///
    /// Returns an error if reflecting a verdict into `doc` fails.
    pub fn flush(&self, doc: &mut Document) -> Result<usize> {
        let mut applied = 0;
        for validator in self.validators.values() {
            applied += validator.flush(doc)?;
        }
        Ok(applied)
    }
}

fn is_opted_out(doc: &Document, form: NodeId) -> bool {
    doc.attr(form, FORM_NO_VALIDATE_ATTR) == Some("true")
}

/// Gives identifiable inputs the base input class, except checkboxes and
/// buttons.
fn add_input_classes(doc: &mut Document, form: NodeId) -> Result<()> {
    let targets: Vec<NodeId> = doc
        .descendants(form)
        .into_iter()
        .filter(|&n| is_styled_input(doc, n))
        .collect();
    for node in targets {
        doc.add_class(node, INPUT_BASE)?;
    }
    Ok(())
}

fn is_styled_input(doc: &Document, node: NodeId) -> bool {
    let input_like = matches!(
        doc.tag(node),
        Some("input" | "select" | "textarea" | "button")
    );
    let has_id = doc.attr(node, "id").is_some_and(|id| !id.is_empty());
    let excluded = matches!(doc.attr(node, "type"), Some("checkbox" | "button"));
    input_like && has_id && !excluded
}
