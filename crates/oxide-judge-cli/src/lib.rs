//! Scenario replay for `oxide-judge`.
//!
//! A scenario mounts forms into a fresh document, attaches validation the
//! way a page does on load, and replays user actions (typing, blurring,
//! submitting) so the resulting feedback can be inspected or rendered.

pub mod error;
pub mod replay;
pub mod scenario;

pub use error::{Result, ScenarioError};
pub use replay::{build_page, render, replay, FieldReport, Report, StepReport};
pub use scenario::{Scenario, ScenarioForm, Step, TakenValues};
