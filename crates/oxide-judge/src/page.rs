//! A document together with its validators and the executor that
//! delivers asynchronous verdicts.

use std::fmt;
use std::rc::Rc;

use futures::executor::LocalPool;
use oxide_dom::{Document, Event, EventKind, EventOutcome, NodeId};
use tracing::{debug, info};

use crate::engine::ValidationEngine;
use crate::error::Result;
use crate::options::ValidatorOptions;
use crate::registry::{AttachArg, AttachStatus, FormValidation};

/// Host page driving validation.
pub struct Page {
    document: Document,
    validation: FormValidation,
    pool: LocalPool,
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl Page {
    /// Creates a page with its own executor.
    #[must_use]
    pub fn new(document: Document, engine: Rc<dyn ValidationEngine>) -> Self {
        Self::with_pool(document, LocalPool::new(), engine)
    }

    /// Creates a page running asynchronous checks on `pool`. Engines that
    /// spawn work should have been given `pool.spawner()`.
    #[must_use]
    pub const fn with_pool(document: Document, pool: LocalPool, engine: Rc<dyn ValidationEngine>) -> Self {
        Self {
            document,
            validation: FormValidation::new(engine),
            pool,
        }
    }

    /// Attaches default validation to every form in the document.
    ///
    /// # Errors
    ///
    /// Fails like [`FormValidation::attach`].
    pub fn ready(&mut self) -> Result<Vec<AttachStatus>> {
        let forms = self.document.elements_by_tag("form");
        info!(count = forms.len(), "attaching validation to page forms");
        self.validation.attach(
            &mut self.document,
            &forms,
            AttachArg::Options(ValidatorOptions::default()),
        )
    }

    /// Attaches to `forms` or runs a command on them.
    ///
    /// # Errors
    ///
    /// Fails like [`FormValidation::attach`].
    pub fn attach(
        &mut self,
        forms: &[NodeId],
        arg: impl Into<AttachArg>,
    ) -> Result<Vec<AttachStatus>> {
        self.validation.attach(&mut self.document, forms, arg)
    }

    /// Fires an event of `kind` at `target` and returns how it ended.
    ///
    /// # Errors
    ///
    /// Returns an error if reflecting a verdict into the document fails.
    pub fn dispatch(&mut self, kind: EventKind, target: NodeId) -> Result<EventOutcome> {
        debug!(event = %kind, target = %target, "dispatching event");
        let mut event = Event::new(kind, target);
        self.validation.dispatch(&mut self.document, &mut event)
    }

    /// Runs pending asynchronous checks until none can progress, then
    /// applies their verdicts in arrival order.
    ///
    /// # Errors
    ///
    /// Returns an error if reflecting a verdict into the document fails.
    pub fn settle(&mut self) -> Result<usize> {
        self.pool.run_until_stalled();
        let applied = self.validation.flush(&mut self.document)?;
        debug!(applied, "settled asynchronous verdicts");
        Ok(applied)
    }

    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    pub const fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    #[must_use]
    pub const fn validation(&self) -> &FormValidation {
        &self.validation
    }

    pub const fn validation_mut(&mut self) -> &mut FormValidation {
        &mut self.validation
    }

    /// Looks an element up by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<NodeId> {
        self.document.get_element_by_id(id)
    }

    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }
}
