//! Shared fixtures for form validation integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use oxide_dom::{Document, NodeId};
use oxide_judge::{classes::FIELD_ATTR, ValidationEngine, Verdict};

/// A form with one Bootstrap group per field id.
pub struct Fixture {
    pub doc: Document,
    pub form: NodeId,
    pub groups: Vec<NodeId>,
    pub fields: Vec<NodeId>,
}

pub fn form_with(ids: &[&str]) -> Fixture {
    let mut doc = Document::new();
    let root = doc.root();
    let form = doc.build("form").id("form").append_to(root).unwrap();
    let mut groups = Vec::new();
    let mut fields = Vec::new();
    for id in ids {
        let group = doc
            .build("div")
            .class("form-group")
            .append_to(form)
            .unwrap();
        let field = doc
            .build("input")
            .id(id)
            .attr("type", "text")
            .attr(FIELD_ATTR, "")
            .append_to(group)
            .unwrap();
        groups.push(group);
        fields.push(field);
    }
    Fixture {
        doc,
        form,
        groups,
        fields,
    }
}

/// Blank values fail with "can't be blank"; anything else passes.
pub fn presence(doc: &Document, field: NodeId, verdict: Verdict) {
    if doc.value(field).trim().is_empty() {
        verdict.invalid(["can't be blank"]);
    } else {
        verdict.valid();
    }
}

/// Values must look like an email.
pub fn email(doc: &Document, field: NodeId, verdict: Verdict) {
    if doc.value(field).contains('@') {
        verdict.valid();
    } else {
        verdict.invalid(["must be an email"]);
    }
}

/// Engine that records every call and parks verdicts for the test to
/// resolve by hand.
#[derive(Default)]
pub struct Deferred {
    pub calls: RefCell<Vec<NodeId>>,
    pub parked: RefCell<Vec<Verdict>>,
}

impl Deferred {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Removes and returns the oldest parked verdict.
    pub fn take_first(&self) -> Verdict {
        self.parked.borrow_mut().remove(0)
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl ValidationEngine for Deferred {
    fn validate(&self, _doc: &Document, field: NodeId, verdict: Verdict) {
        self.calls.borrow_mut().push(field);
        self.parked.borrow_mut().push(verdict);
    }
}

/// Engine counting calls and answering valid.
#[derive(Default)]
pub struct Counting {
    pub calls: RefCell<Vec<NodeId>>,
}

impl ValidationEngine for Counting {
    fn validate(&self, _doc: &Document, field: NodeId, verdict: Verdict) {
        self.calls.borrow_mut().push(field);
        verdict.valid();
    }
}
