//! Checkbox field presets.

use crate::form::{FieldSpec, Widget};
use crate::rules::Rule;

/// Creates a checkbox with no rules.
#[must_use]
pub fn boolean_field(name: &str, label: &str) -> FieldSpec {
    FieldSpec::new(name, label).widget(Widget::Checkbox)
}

/// Creates a checkbox that must be ticked, such as terms of service.
#[must_use]
pub fn acceptance_field(name: &str, label: &str) -> FieldSpec {
    boolean_field(name, label).rule(Rule::acceptance())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_field() {
        let field = boolean_field("user[newsletter]", "Newsletter");
        assert_eq!(field.widget, Widget::Checkbox);
        assert_eq!(field.rules, Some(Vec::new()));
    }

    #[test]
    fn test_acceptance_field() {
        let field = acceptance_field("user[terms]", "I accept");
        assert_eq!(field.rules, Some(vec![Rule::acceptance()]));
    }
}
