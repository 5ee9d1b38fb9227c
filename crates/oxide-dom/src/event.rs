//! Interaction events.

use std::fmt;
use std::str::FromStr;

use crate::document::NodeId;
use crate::error::DomError;

/// Events a form listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Field lost focus. Delegated like `focusout`, so it bubbles.
    Blur,
    /// Field value edited.
    Input,
    /// Field value committed (selects, checkboxes).
    Change,
    /// Form submission.
    Submit,
}

impl EventKind {
    /// Returns the DOM event name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blur => "blur",
            Self::Input => "input",
            Self::Change => "change",
            Self::Submit => "submit",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blur" | "focusout" => Ok(Self::Blur),
            "input" => Ok(Self::Input),
            "change" => Ok(Self::Change),
            "submit" => Ok(Self::Submit),
            other => Err(DomError::UnknownEvent(other.to_string())),
        }
    }
}

/// A dispatched event and the flags handlers set on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// What happened.
    pub kind: EventKind,
    /// Node the event was fired at.
    pub target: NodeId,
    /// Node whose listener is currently running.
    pub current_target: Option<NodeId>,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    /// Creates an event fired at `target`.
    #[must_use]
    pub const fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            current_target: None,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Cancels the default action (e.g. the form submission).
    pub const fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Stops the event from bubbling past the current node.
    pub const fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Returns whether the default action was cancelled.
    #[must_use]
    pub const fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Returns whether bubbling was stopped.
    #[must_use]
    pub const fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Returns the flags as a plain outcome.
    #[must_use]
    pub const fn outcome(&self) -> EventOutcome {
        EventOutcome {
            default_prevented: self.default_prevented,
            propagation_stopped: self.propagation_stopped,
        }
    }
}

/// What handlers decided about an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

impl EventOutcome {
    /// Returns whether the event went through untouched.
    #[must_use]
    pub const fn proceeds(&self) -> bool {
        !self.default_prevented
    }
}
