//! Form definitions mounted into a document as Bootstrap markup.

use oxide_dom::{Document, NodeId};
use serde::{Deserialize, Serialize};

use crate::classes::{FIELD_ATTR, FORM_NO_VALIDATE_ATTR};
use crate::error::Result;
use crate::rules::Rule;

/// How a field is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Widget {
    Input {
        #[serde(rename = "type", default = "default_input_type")]
        input_type: String,
    },
    Textarea,
    Select {
        /// `(value, label)` pairs.
        choices: Vec<(String, String)>,
    },
    Checkbox,
}

fn default_input_type() -> String {
    "text".to_string()
}

impl Default for Widget {
    fn default() -> Self {
        Self::Input {
            input_type: default_input_type(),
        }
    }
}

impl Widget {
    #[must_use]
    pub fn input(input_type: &str) -> Self {
        Self::Input {
            input_type: input_type.to_string(),
        }
    }
}

/// Definition of one form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Submitted name, such as `user[email]`.
    pub name: String,
    #[serde(default)]
    pub label: String,
    /// Element id. Derived from the name when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub widget: Widget,
    /// Declared rules. `None` renders the field without the validation
    /// marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<Rule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl FieldSpec {
    /// Creates a text field validated with no rules.
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            id: None,
            widget: Widget::default(),
            rules: Some(Vec::new()),
            value: None,
        }
    }

    #[must_use]
    pub fn widget(mut self, widget: Widget) -> Self {
        self.widget = widget;
        self
    }

    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Adds a rule.
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.get_or_insert_with(Vec::new).push(rule);
        self
    }

    /// Renders the field without the validation marker.
    #[must_use]
    pub fn unvalidated(mut self) -> Self {
        self.rules = None;
        self
    }

    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Returns the element id: `user[email]` becomes `user_email`.
    #[must_use]
    pub fn element_id(&self) -> String {
        self.id.clone().unwrap_or_else(|| {
            self.name
                .replace("][", "_")
                .replace('[', "_")
                .replace(']', "")
        })
    }

    /// Appends the field's group to `parent` and returns the field element.
    ///
    /// # Errors
    ///
    /// Fails if `parent` is not an element of `doc` or the rules cannot be
    /// serialized.
    pub fn mount(&self, doc: &mut Document, parent: NodeId) -> Result<NodeId> {
        let id = self.element_id();
        let group = doc.build("div").class("form-group").append_to(parent)?;

        if self.widget != Widget::Checkbox && !self.label.is_empty() {
            doc.build("label")
                .attr("for", &id)
                .class("control-label")
                .text(&self.label)
                .append_to(group)?;
        }

        let tag = match &self.widget {
            Widget::Input { .. } | Widget::Checkbox => "input",
            Widget::Textarea => "textarea",
            Widget::Select { .. } => "select",
        };
        let mut builder = doc.build(tag).id(&id).attr("name", &self.name);
        match &self.widget {
            Widget::Input { input_type } => builder = builder.attr("type", input_type),
            Widget::Checkbox => builder = builder.attr("type", "checkbox").attr("value", "1"),
            Widget::Textarea | Widget::Select { .. } => {}
        }
        if let Some(rules) = &self.rules {
            let marker = if rules.is_empty() {
                String::new()
            } else {
                serde_json::to_string(rules)?
            };
            builder = builder.attr(FIELD_ATTR, &marker);
        }
        if self.widget != Widget::Checkbox {
            if let Some(value) = &self.value {
                builder = builder.attr("value", value);
            }
        }
        let field = builder.append_to(group)?;

        match &self.widget {
            Widget::Select { choices } => {
                for (value, label) in choices {
                    doc.build("option")
                        .attr("value", value)
                        .text(label)
                        .append_to(field)?;
                }
            }
            Widget::Checkbox => {
                if self.value.as_deref().is_some_and(|v| !v.is_empty() && v != "0") {
                    doc.set_checked(field, true)?;
                }
                doc.build("label")
                    .attr("for", &id)
                    .text(&self.label)
                    .append_to(group)?;
            }
            Widget::Input { .. } | Widget::Textarea => {}
        }
        Ok(field)
    }
}

/// Definition of a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default = "default_action")]
    pub action: String,
    #[serde(default = "default_method")]
    pub method: String,
    /// Renders `data-novalidate="true"`.
    #[serde(default)]
    pub novalidate: bool,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(default = "default_submit")]
    pub submit: String,
}

fn default_action() -> String {
    "/".to_string()
}

fn default_method() -> String {
    "post".to_string()
}

fn default_submit() -> String {
    "Submit".to_string()
}

impl Default for FormSpec {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSpec {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: None,
            action: default_action(),
            method: default_method(),
            novalidate: false,
            fields: Vec::new(),
            submit: default_submit(),
        }
    }

    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    #[must_use]
    pub const fn novalidate(mut self) -> Self {
        self.novalidate = true;
        self
    }

    /// Adds a field.
    #[must_use]
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends the form with its fields and submit button to `parent`.
    ///
    /// # Errors
    ///
    /// Fails if `parent` is not an element of `doc` or a field cannot be
    /// mounted.
    pub fn mount(&self, doc: &mut Document, parent: NodeId) -> Result<NodeId> {
        let mut builder = doc
            .build("form")
            .attr("action", &self.action)
            .attr("method", &self.method);
        if let Some(id) = &self.id {
            builder = builder.id(id);
        }
        if self.novalidate {
            builder = builder.attr(FORM_NO_VALIDATE_ATTR, "true");
        }
        let form = builder.append_to(parent)?;

        for field in &self.fields {
            field.mount(doc, form)?;
        }

        let actions = doc.build("div").class("form-group").append_to(form)?;
        doc.build("button")
            .attr("type", "submit")
            .class("btn btn-primary")
            .text(&self.submit)
            .append_to(actions)?;
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::parse_rules;
    use crate::state::fields_of;

    #[test]
    fn test_element_id_from_name() {
        assert_eq!(FieldSpec::new("user[email]", "").element_id(), "user_email");
        assert_eq!(
            FieldSpec::new("user[address][city]", "").element_id(),
            "user_address_city"
        );
        assert_eq!(FieldSpec::new("q", "").id("search").element_id(), "search");
    }

    #[test]
    fn test_mount_text_field() {
        let mut doc = Document::new();
        let root = doc.root();
        let field = FieldSpec::new("user[email]", "Email")
            .widget(Widget::input("email"))
            .rule(Rule::presence())
            .value("a@b.c")
            .mount(&mut doc, root)
            .unwrap();

        assert_eq!(
            doc.to_html(doc.parent(field).unwrap()),
            concat!(
                r#"<div class="form-group">"#,
                r#"<label for="user_email" class="control-label">Email</label>"#,
                r#"<input id="user_email" name="user[email]" type="email" "#,
                r#"data-validate="[{&quot;kind&quot;:&quot;presence&quot;}]" value="a@b.c">"#,
                "</div>"
            )
        );
        assert_eq!(parse_rules(&doc, field).unwrap(), vec![Rule::presence()]);
    }

    #[test]
    fn test_mount_form() {
        let mut doc = Document::new();
        let root = doc.root();
        let form = FormSpec::new()
            .id("new_user")
            .field(FieldSpec::new("user[name]", "Name"))
            .field(
                FieldSpec::new("user[role]", "Role").widget(Widget::Select {
                    choices: vec![("user".into(), "User".into()), ("admin".into(), "Admin".into())],
                }),
            )
            .field(FieldSpec::new("user[nickname]", "Nickname").unvalidated())
            .field(FieldSpec::new("user[terms]", "Terms").widget(Widget::Checkbox))
            .mount(&mut doc, root)
            .unwrap();

        let ids: Vec<_> = fields_of(&doc, form)
            .into_iter()
            .map(|f| doc.attr(f, "id").unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["user_name", "user_role", "user_terms"]);
        assert_eq!(doc.elements_by_tag("option").len(), 2);
        assert_eq!(doc.elements_by_tag("button").len(), 1);
        assert_eq!(doc.attr(form, FORM_NO_VALIDATE_ATTR), None);
    }

    #[test]
    fn test_deserialize_defaults() {
        let spec: FormSpec = serde_json::from_str(
            r#"{"novalidate": true, "fields": [
                {"name": "q"},
                {"name": "kind", "widget": {"kind": "select", "choices": [["a", "A"]]}}
            ]}"#,
        )
        .unwrap();
        assert!(spec.novalidate);
        assert_eq!(spec.method, "post");
        assert_eq!(spec.fields[0].widget, Widget::input("text"));
        assert_eq!(spec.fields[0].rules, None);
        assert_eq!(
            spec.fields[1].widget,
            Widget::Select {
                choices: vec![("a".into(), "A".into())]
            }
        );
    }
}
