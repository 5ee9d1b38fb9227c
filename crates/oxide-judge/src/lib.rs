//! # oxide-judge
//!
//! Live client-side form validation with Bootstrap feedback.
//!
//! This crate provides:
//! - Per-form validators bound to blur, input, change and submit
//! - Reflection of verdicts as classes, icons and inline messages
//! - Submit gating while any field is invalid
//! - A rule engine reading declarative `data-validate` rules, with
//!   asynchronous uniqueness lookups
//! - Form definitions and field presets rendering Bootstrap markup
//!
//! ## Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use oxide_dom::{Document, EventKind};
//! use oxide_judge::fields::{char_field, email_field};
//! use oxide_judge::{FieldState, FormSpec, Page, RuleEngine};
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! FormSpec::new()
//!     .id("new_user")
//!     .field(char_field("user[name]", "Name", 30, true))
//!     .field(email_field("user[email]", "Email", true, false))
//!     .mount(&mut doc, root)
//!     .unwrap();
//!
//! let mut page = Page::new(doc, Rc::new(RuleEngine::new()));
//! page.ready().unwrap();
//!
//! // Submitting an empty form is blocked.
//! let form = page.find("new_user").unwrap();
//! let outcome = page.dispatch(EventKind::Submit, form).unwrap();
//! assert!(outcome.default_prevented);
//!
//! // Fixing a field re-validates it live.
//! let email = page.find("user_email").unwrap();
//! page.document_mut().set_value(email, "judge@example.com").unwrap();
//! page.dispatch(EventKind::Input, email).unwrap();
//! assert_eq!(FieldState::of(page.document(), email), FieldState::Valid);
//! ```
//!
//! ## Custom engines
//!
//! Any `Fn(&Document, NodeId, Verdict)` is an engine:
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use oxide_dom::{Document, NodeId};
//! use oxide_judge::{FormValidation, Verdict};
//!
//! let engine = |doc: &Document, field: NodeId, verdict: Verdict| {
//!     if doc.value(field).len() < 3 {
//!         verdict.invalid(["is too short"]);
//!     } else {
//!         verdict.valid();
//!     }
//! };
//! let validation = FormValidation::new(Rc::new(engine));
//! assert_eq!(validation.forms().count(), 0);
//! ```

pub mod classes;
mod engine;
mod error;
pub mod fields;
mod form;
mod options;
mod page;
pub mod reflect;
mod registry;
mod rules;
mod selector;
mod state;
pub mod validation;
mod validator;

pub use engine::{Outbox, Outcome, Resolution, ValidationEngine, Verdict};
pub use error::{JudgeError, Result};
pub use form::{FieldSpec, FormSpec, Widget};
pub use options::{LiveOptions, ValidatorOptions};
pub use page::Page;
pub use registry::{AttachArg, AttachStatus, Command, FormValidation};
pub use rules::{
    parse_rules, FieldRef, FormatOptions, LengthOptions, ListOptions, Messages,
    NumericalityOptions, Rule, RuleEngine, UniquenessCheck,
};
pub use selector::LiveSelector;
pub use state::{fields_of, is_field, FieldState};
pub use validator::{Action, Binding, Filter, FormValidator};
