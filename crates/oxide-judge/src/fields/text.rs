//! Text field presets.

use crate::form::{FieldSpec, Widget};
use crate::rules::{NumericalityOptions, Rule};

/// Loose address check: something, an `@`, then something without spaces.
pub const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+$";

/// Creates a single-line text field with a maximum length.
#[must_use]
pub fn char_field(name: &str, label: &str, max_length: usize, required: bool) -> FieldSpec {
    let mut field = FieldSpec::new(name, label);
    if required {
        field = field.rule(Rule::presence());
    }
    field.rule(Rule::length(None, Some(max_length)))
}

/// Creates a textarea.
#[must_use]
pub fn text_field(name: &str, label: &str, required: bool) -> FieldSpec {
    let mut field = FieldSpec::new(name, label).widget(Widget::Textarea);
    if required {
        field = field.rule(Rule::presence());
    }
    field
}

/// Creates an email field. With `unique`, the address is also checked
/// against taken ones.
#[must_use]
pub fn email_field(name: &str, label: &str, required: bool, unique: bool) -> FieldSpec {
    let mut field = FieldSpec::new(name, label).widget(Widget::input("email"));
    if required {
        field = field.rule(Rule::presence());
    }
    field = field.rule(Rule::format(EMAIL_PATTERN).message("invalid", "must be an email"));
    if unique {
        field = field.rule(Rule::uniqueness());
    }
    field
}

/// Creates a numeric field.
#[must_use]
pub fn number_field(name: &str, label: &str, options: NumericalityOptions) -> FieldSpec {
    FieldSpec::new(name, label)
        .widget(Widget::input("number"))
        .rule(Rule::numericality(options))
}

/// Creates a required password field and its unvalidated confirmation
/// companion.
#[must_use]
pub fn password_fields(name: &str, label: &str, min_length: Option<usize>) -> [FieldSpec; 2] {
    let mut password = FieldSpec::new(name, label)
        .widget(Widget::input("password"))
        .rule(Rule::presence());
    if let Some(min) = min_length {
        password = password.rule(Rule::length(Some(min), None));
    }
    let password = password.rule(Rule::confirmation());

    let confirmation = FieldSpec::new(confirmation_name(name), format!("{label} confirmation"))
        .id(format!("{}_confirmation", password.element_id()))
        .widget(Widget::input("password"))
        .unvalidated();
    [password, confirmation]
}

fn confirmation_name(name: &str) -> String {
    name.strip_suffix(']').map_or_else(
        || format!("{name}_confirmation"),
        |stem| format!("{stem}_confirmation]"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_field() {
        let field = char_field("user[name]", "Name", 150, true);
        assert_eq!(field.name, "user[name]");
        assert_eq!(
            field.rules,
            Some(vec![Rule::presence(), Rule::length(None, Some(150))])
        );
    }

    #[test]
    fn test_email_field() {
        let field = email_field("user[email]", "Email", false, true);
        assert_eq!(field.widget, Widget::input("email"));
        let rules = field.rules.unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[1], Rule::uniqueness());
    }

    #[test]
    fn test_password_fields() {
        let [password, confirmation] = password_fields("user[password]", "Password", Some(8));
        assert_eq!(password.rules.as_ref().map(Vec::len), Some(3));
        assert_eq!(confirmation.name, "user[password_confirmation]");
        assert_eq!(confirmation.element_id(), "user_password_confirmation");
        assert_eq!(confirmation.rules, None);
    }
}
