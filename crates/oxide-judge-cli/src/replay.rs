//! Replaying scenarios on a page.

use std::fmt;
use std::rc::Rc;

use futures::executor::LocalPool;
use oxide_dom::{Document, EventKind, EventOutcome, NodeId};
use oxide_judge::{
    reflect, AttachStatus, Command, FieldState, Page, RuleEngine, ValidatorOptions,
};
use tracing::{debug, info};

use crate::error::{Result, ScenarioError};
use crate::scenario::{Scenario, Step, TakenValues};

/// What one step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub step: String,
    /// Outcome of a fired event or `validateAll`.
    pub outcome: Option<EventOutcome>,
    /// Verdicts applied by a `settle`.
    pub applied: Option<usize>,
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.step)?;
        if let Some(outcome) = self.outcome {
            let verdict = if outcome.proceeds() {
                "proceeds"
            } else {
                "blocked"
            };
            write!(f, " -> {verdict}")?;
        }
        if let Some(applied) = self.applied {
            write!(f, " -> {applied} verdict(s) applied")?;
        }
        Ok(())
    }
}

/// Final state of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReport {
    pub id: String,
    pub state: FieldState,
    pub message: Option<String>,
}

impl fmt::Display for FieldReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<32} {}", self.id, self.state)?;
        if let Some(message) = &self.message {
            write!(f, " ({message})")?;
        }
        Ok(())
    }
}

/// Result of a replay.
#[derive(Debug, Clone)]
pub struct Report {
    pub steps: Vec<StepReport>,
    pub fields: Vec<FieldReport>,
    pub html: String,
}

impl Report {
    /// Returns the report for the field with `id`.
    #[must_use]
    pub fn field(&self, id: &str) -> Option<&FieldReport> {
        self.fields.iter().find(|f| f.id == id)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Steps:")?;
        for (i, step) in self.steps.iter().enumerate() {
            writeln!(f, " {:>3}. {step}", i + 1)?;
        }
        writeln!(f, "\nFields:")?;
        for field in &self.fields {
            writeln!(f, "  {field}")?;
        }
        Ok(())
    }
}

/// Mounts the scenario's forms and attaches validation: forms with
/// options first, then every form with defaults.
///
/// # Errors
///
/// Fails if a form cannot be mounted or its options are malformed.
pub fn build_page(scenario: &Scenario) -> Result<Page> {
    let pool = LocalPool::new();
    let engine = RuleEngine::new()
        .with_uniqueness(TakenValues::new(scenario.taken.clone()), pool.spawner());

    let mut doc = Document::new();
    let root = doc.root();
    let mut configured = Vec::new();
    for form in &scenario.forms {
        let node = form.spec.mount(&mut doc, root)?;
        if let Some(options) = &form.options {
            configured.push((node, ValidatorOptions::from_value(options.clone())?));
        }
    }

    let mut page = Page::with_pool(doc, pool, Rc::new(engine));
    for (form, options) in configured {
        page.attach(&[form], options)?;
    }
    let statuses = page.ready()?;
    let skipped = statuses
        .iter()
        .filter(|s| **s == AttachStatus::Skipped)
        .count();
    info!(forms = statuses.len(), skipped, "page ready");
    Ok(page)
}

/// Replays every step of `scenario`.
///
/// # Errors
///
/// Fails like [`build_page`], or when a step names an unknown element,
/// event or command.
pub fn replay(scenario: &Scenario) -> Result<Report> {
    let mut page = build_page(scenario)?;
    let mut steps = Vec::with_capacity(scenario.steps.len());
    for step in &scenario.steps {
        debug!(?step, "replaying step");
        steps.push(run_step(&mut page, step)?);
    }
    Ok(Report {
        steps,
        fields: field_reports(&page),
        html: render(&page),
    })
}

fn run_step(page: &mut Page, step: &Step) -> Result<StepReport> {
    let mut report = StepReport {
        step: describe(step),
        outcome: None,
        applied: None,
    };
    match step {
        Step::Set { target, value } => {
            let node = find(page, target)?;
            page.document_mut().set_value(node, value)?;
        }
        Step::Check { target } => {
            let node = find(page, target)?;
            page.document_mut().set_checked(node, true)?;
        }
        Step::Uncheck { target } => {
            let node = find(page, target)?;
            page.document_mut().set_checked(node, false)?;
        }
        Step::Event { event, target } => {
            let kind: EventKind = event.parse()?;
            let node = find(page, target)?;
            report.outcome = Some(page.dispatch(kind, node)?);
        }
        Step::Command { form, name, args } => {
            let form = find(page, form)?;
            let args = args
                .iter()
                .map(|id| find(page, id))
                .collect::<Result<Vec<NodeId>>>()?;
            let command = Command::parse(name, &args)?;
            for status in page.attach(&[form], command)? {
                if let AttachStatus::Ran(outcome) = status {
                    report.outcome = outcome;
                }
            }
        }
        Step::Settle => {
            report.applied = Some(page.settle()?);
        }
    }
    Ok(report)
}

fn describe(step: &Step) -> String {
    match step {
        Step::Set { target, value } => format!("set #{target} = {value:?}"),
        Step::Check { target } => format!("check #{target}"),
        Step::Uncheck { target } => format!("uncheck #{target}"),
        Step::Event { event, target } => format!("{event} on #{target}"),
        Step::Command { form, name, args } if args.is_empty() => format!("{name} on #{form}"),
        Step::Command { form, name, args } => format!("{name}({}) on #{form}", args.join(", ")),
        Step::Settle => "settle".to_string(),
    }
}

fn find(page: &Page, id: &str) -> Result<NodeId> {
    page.find(id)
        .ok_or_else(|| ScenarioError::UnknownElement(id.to_string()))
}

fn field_reports(page: &Page) -> Vec<FieldReport> {
    let doc = page.document();
    doc.elements_by_tag("form")
        .into_iter()
        .flat_map(|form| oxide_judge::fields_of(doc, form))
        .map(|field| FieldReport {
            id: doc
                .attr(field, "id")
                .map_or_else(|| field.to_string(), ToString::to_string),
            state: FieldState::of(doc, field),
            message: reflect::message_container(doc, field).map(|m| doc.text_content(m)),
        })
        .collect()
}

/// Serializes the page body.
#[must_use]
pub fn render(page: &Page) -> String {
    let doc = page.document();
    doc.inner_html(doc.root())
}
