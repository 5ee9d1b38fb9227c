//! Reflection of a field's validation result into the document.
//!
//! Both entry points are idempotent and may run in any order, since
//! asynchronous verdicts can arrive late or out of order.

use oxide_dom::{Document, NodeId};
use tracing::trace;

use crate::classes::{
    FIELD_ERROR, FIELD_SUCCESS, ICON_BASE, ICON_ERROR, ICON_SUCCESS, ICON_TAG, MESSAGE,
    PARENT_BASE, PARENT_ERROR, PARENT_SUCCESS,
};
use crate::error::Result;

/// Marks `field` valid: drops every message block, flips classes to
/// success and shows the success icon.
///
/// # Errors
///
/// Returns an error if `field` is not an element of `doc`.
pub fn on_valid(doc: &mut Document, field: NodeId) -> Result<()> {
    trace!(field = %field, "reflecting valid");
    for message in message_containers(doc, field) {
        doc.remove(message)?;
    }
    let parent = doc.parent(field);
    if let Some(parent) = parent {
        doc.add_class(parent, PARENT_BASE)?;
    }

    doc.remove_class(field, FIELD_ERROR)?;
    doc.add_class(field, FIELD_SUCCESS)?;

    if let Some(parent) = parent {
        doc.remove_class(parent, PARENT_ERROR)?;
        doc.add_class(parent, PARENT_SUCCESS)?;
        refresh_icon(doc, field, ICON_SUCCESS)?;
    }
    Ok(())
}

/// Marks `field` invalid: shows `messages` joined by `", "` in a single
/// message block, flips classes to error and shows the error icon.
///
/// The first existing block is reused and any further ones are removed.
///
/// # Errors
///
/// Returns an error if `field` is not an element of `doc`.
pub fn on_invalid(doc: &mut Document, field: NodeId, messages: &[String]) -> Result<()> {
    trace!(field = %field, count = messages.len(), "reflecting invalid");
    if let Some(message) = find_or_create_message(doc, field)? {
        doc.set_text(message, &messages.join(", "))?;
    }
    let parent = doc.parent(field);
    if let Some(parent) = parent {
        doc.add_class(parent, PARENT_BASE)?;
    }

    doc.remove_class(field, FIELD_SUCCESS)?;
    doc.add_class(field, FIELD_ERROR)?;

    if let Some(parent) = parent {
        doc.remove_class(parent, PARENT_SUCCESS)?;
        doc.add_class(parent, PARENT_ERROR)?;
        refresh_icon(doc, field, ICON_ERROR)?;
    }
    Ok(())
}

/// Returns every message block inside the field's parent, in document
/// order.
///
/// Matched by class only, so blocks inserted by someone else count too.
#[must_use]
pub fn message_containers(doc: &Document, field: NodeId) -> Vec<NodeId> {
    doc.parent(field).map_or_else(Vec::new, |parent| {
        doc.descendants(parent)
            .into_iter()
            .filter(|&n| doc.has_class(n, MESSAGE))
            .collect()
    })
}

/// Returns the first message block inside the field's parent.
#[must_use]
pub fn message_container(doc: &Document, field: NodeId) -> Option<NodeId> {
    message_containers(doc, field).into_iter().next()
}

/// Returns the one message block to write into: the first existing block,
/// with any others removed, or a new block right after the field. A field
/// without a parent has nowhere to put one.
fn find_or_create_message(doc: &mut Document, field: NodeId) -> Result<Option<NodeId>> {
    let mut existing = message_containers(doc, field).into_iter();
    if let Some(first) = existing.next() {
        for extra in existing {
            doc.remove(extra)?;
        }
        return Ok(Some(first));
    }
    if doc.parent(field).is_none() {
        return Ok(None);
    }
    let block = doc.build("div").class(MESSAGE).finish();
    doc.insert_after(field, block)?;
    Ok(Some(block))
}

/// Replaces every icon under the field's parent with a fresh one placed
/// right after the field.
fn refresh_icon(doc: &mut Document, field: NodeId, glyph: &str) -> Result<()> {
    if doc.parent(field).is_none() {
        return Ok(());
    }
    for icon in icons(doc, field) {
        doc.remove(icon)?;
    }

    let icon = doc
        .build(ICON_TAG)
        .class(ICON_BASE)
        .class(glyph)
        .finish();
    doc.insert_after(field, icon)?;
    Ok(())
}

/// Returns the icons currently under the field's parent.
#[must_use]
pub fn icons(doc: &Document, field: NodeId) -> Vec<NodeId> {
    doc.parent(field).map_or_else(Vec::new, |parent| {
        doc.element_children(parent)
            .filter(|&c| doc.tag(c) == Some(ICON_TAG))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::FIELD_ATTR;

    fn setup() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let group = doc.build("div").append_to(root).unwrap();
        let field = doc
            .build("input")
            .id("email")
            .attr(FIELD_ATTR, "")
            .append_to(group)
            .unwrap();
        (doc, group, field)
    }

    fn msgs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_invalid_scenario() {
        let (mut doc, group, field) = setup();
        on_invalid(&mut doc, field, &msgs(&["must be an email"])).unwrap();

        assert_eq!(
            doc.classes(group).unwrap().to_string(),
            "has-feedback has-error"
        );
        assert!(doc.has_class(field, "error"));
        let icon = doc.next_sibling(field).unwrap();
        assert_eq!(doc.tag(icon), Some("i"));
        assert!(doc.has_class(icon, "fa-times"));
        assert!(doc.has_class(icon, "form-control-feedback"));
        let message = message_container(&doc, field).unwrap();
        assert_eq!(doc.text_content(message), "must be an email");
        assert_eq!(doc.children(group), &[field, icon, message]);
    }

    #[test]
    fn test_invalid_joins_messages() {
        let (mut doc, _, field) = setup();
        on_invalid(&mut doc, field, &msgs(&["is too short", "is invalid"])).unwrap();
        let message = message_container(&doc, field).unwrap();
        assert_eq!(doc.text_content(message), "is too short, is invalid");
    }

    #[test]
    fn test_invalid_reuses_message_block() {
        let (mut doc, group, field) = setup();
        on_invalid(&mut doc, field, &msgs(&["a"])).unwrap();
        on_invalid(&mut doc, field, &msgs(&["b"])).unwrap();
        let blocks: Vec<_> = doc
            .descendants(group)
            .into_iter()
            .filter(|&n| doc.has_class(n, MESSAGE))
            .collect();
        assert_eq!(blocks.len(), 1);
        assert_eq!(doc.text_content(blocks[0]), "b");
    }

    #[test]
    fn test_valid_clears_invalid() {
        let (mut doc, group, field) = setup();
        on_invalid(&mut doc, field, &msgs(&["a"])).unwrap();
        on_valid(&mut doc, field).unwrap();

        assert!(doc.has_class(field, "success"));
        assert!(!doc.has_class(field, "error"));
        assert!(message_container(&doc, field).is_none());
        assert_eq!(
            doc.classes(group).unwrap().to_string(),
            "has-feedback has-success"
        );
        let icon_list = icons(&doc, field);
        assert_eq!(icon_list.len(), 1);
        assert!(doc.has_class(icon_list[0], "fa-check"));
    }

    #[test]
    fn test_valid_is_idempotent() {
        let (mut doc, group, field) = setup();
        on_valid(&mut doc, field).unwrap();
        let once = doc.to_html(group);
        on_valid(&mut doc, field).unwrap();
        assert_eq!(doc.to_html(group), once);
    }

    #[test]
    fn test_single_icon_after_alternation() {
        let (mut doc, _, field) = setup();
        for round in 0..5 {
            if round % 2 == 0 {
                on_valid(&mut doc, field).unwrap();
            } else {
                on_invalid(&mut doc, field, &msgs(&["nope"])).unwrap();
            }
            assert_eq!(icons(&doc, field).len(), 1);
        }
    }

    #[test]
    fn test_external_message_block_is_reused() {
        let (mut doc, group, field) = setup();
        let wrapper = doc.build("span").append_to(group).unwrap();
        let external = doc
            .build("p")
            .class(MESSAGE)
            .text("hint")
            .append_to(wrapper)
            .unwrap();

        on_invalid(&mut doc, field, &msgs(&["required"])).unwrap();
        assert_eq!(message_container(&doc, field), Some(external));
        assert_eq!(doc.text_content(external), "required");
    }

    #[test]
    fn test_valid_removes_every_message_block() {
        let (mut doc, group, field) = setup();
        let wrapper = doc.build("span").append_to(group).unwrap();
        doc.build("span")
            .class(MESSAGE)
            .text("server error")
            .append_to(wrapper)
            .unwrap();
        on_invalid(&mut doc, field, &msgs(&["must be an email"])).unwrap();
        doc.build("p")
            .class(MESSAGE)
            .text("hint")
            .append_to(group)
            .unwrap();
        assert_eq!(message_containers(&doc, field).len(), 2);

        on_valid(&mut doc, field).unwrap();
        assert!(message_containers(&doc, field).is_empty());
        assert!(!doc.to_html(group).contains(MESSAGE));
    }

    #[test]
    fn test_invalid_keeps_a_single_message_block() {
        let (mut doc, group, field) = setup();
        let first = doc
            .build("p")
            .class(MESSAGE)
            .text("hint")
            .append_to(group)
            .unwrap();
        let second = doc
            .build("span")
            .class(MESSAGE)
            .text("server error")
            .append_to(group)
            .unwrap();

        on_invalid(&mut doc, field, &msgs(&["is required"])).unwrap();
        assert_eq!(message_containers(&doc, field), vec![first]);
        assert_eq!(doc.text_content(first), "is required");
        assert!(!doc.is_connected(second));
    }

    #[test]
    fn test_parentless_field_only_toggles_classes() {
        let mut doc = Document::new();
        let field = doc.build("input").attr(FIELD_ATTR, "").finish();
        on_invalid(&mut doc, field, &msgs(&["x"])).unwrap();
        assert!(doc.has_class(field, "error"));
        on_valid(&mut doc, field).unwrap();
        assert!(doc.has_class(field, "success"));
        assert!(!doc.has_class(field, "error"));
    }
}
