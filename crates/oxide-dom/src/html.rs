//! HTML serialization.

use std::fmt::Write;

use crate::document::{Document, NodeId, NodeKind};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Escapes HTML special characters.
#[must_use]
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

impl Document {
    /// Serializes `id` and its subtree.
    ///
    /// Attributes keep insertion order; `class` comes last. Attributes with
    /// an empty value are written in their bare boolean form.
    #[must_use]
    pub fn to_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    /// Serializes the children of `id`.
    #[must_use]
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(id) {
            self.write_html(child, &mut out);
        }
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let el = match self.kind(id) {
            Some(NodeKind::Element(el)) => el,
            Some(NodeKind::Text(text)) => {
                out.push_str(&html_escape(text));
                return;
            }
            None => return,
        };

        out.push('<');
        out.push_str(el.tag());
        for (name, value) in el.attrs() {
            if value.is_empty() {
                let _ = write!(out, " {name}");
            } else {
                let _ = write!(out, r#" {name}="{}""#, html_escape(value));
            }
        }
        if !el.classes().is_empty() {
            let _ = write!(out, r#" class="{}""#, html_escape(&el.classes().to_string()));
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&el.tag()) {
            return;
        }
        for &child in self.children(id) {
            self.write_html(child, out);
        }
        let _ = write!(out, "</{}>", el.tag());
    }
}
