//! # oxide-dom
//!
//! A small in-memory HTML document used by the form validation layer.
//!
//! This crate provides:
//! - An arena-backed element tree addressed by [`NodeId`]
//! - Attribute and class-list manipulation
//! - Tree navigation in document order
//! - Interaction events ([`Event`], [`EventKind`])
//! - HTML serialization
//!
//! ## Quick Start
//!
//! ```rust
//! use oxide_dom::Document;
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! let group = doc
//!     .build("div")
//!     .class("form-group")
//!     .append_to(root)
//!     .unwrap();
//! let input = doc
//!     .build("input")
//!     .id("email")
//!     .attr("data-validate", "")
//!     .append_to(group)
//!     .unwrap();
//!
//! doc.add_class(input, "error").unwrap();
//! assert!(doc.has_class(input, "error"));
//! assert_eq!(doc.parent(input), Some(group));
//! assert_eq!(
//!     doc.to_html(group),
//!     r#"<div class="form-group"><input id="email" data-validate class="error"></div>"#,
//! );
//! ```

mod class_list;
mod document;
mod error;
mod event;
mod html;

pub use class_list::ClassList;
pub use document::{Document, ElementBuilder, ElementData, NodeId, NodeKind};
pub use error::{DomError, Result};
pub use event::{Event, EventKind, EventOutcome};
pub use html::html_escape;
