//! Select field presets.

use crate::form::{FieldSpec, Widget};
use crate::rules::Rule;

/// Creates a select whose value must be one of the choice values.
#[must_use]
pub fn choice_field(name: &str, label: &str, choices: Vec<(&str, &str)>, required: bool) -> FieldSpec {
    let values: Vec<&str> = choices.iter().map(|(v, _)| *v).collect();
    let widget = Widget::Select {
        choices: choices
            .into_iter()
            .map(|(v, l)| (v.to_string(), l.to_string()))
            .collect(),
    };

    let mut field = FieldSpec::new(name, label).widget(widget);
    if required {
        field = field.rule(Rule::presence());
    }
    field.rule(Rule::inclusion(values))
}
