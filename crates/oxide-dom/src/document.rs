//! The document tree.

use std::fmt;

use crate::class_list::ClassList;
use crate::error::{DomError, Result};

/// Handle to a node owned by a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the arena index of this node.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Element payload: tag, attributes and classes.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    tag: String,
    attrs: Vec<(String, String)>,
    classes: ClassList,
}

impl ElementData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Returns the lowercase tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the class list.
    #[must_use]
    pub const fn classes(&self) -> &ClassList {
        &self.classes
    }

    /// Iterates over non-class attributes in insertion order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn set_attr(&mut self, name: &str, value: &str) {
        if name == "class" {
            self.classes = ClassList::parse(value);
            return;
        }
        if let Some(slot) = self.attrs.iter_mut().find(|(k, _)| k == name) {
            slot.1 = value.to_string();
            return;
        }
        self.attrs.push((name.to_string(), value.to_string()));
    }

    fn remove_attr(&mut self, name: &str) -> bool {
        if name == "class" {
            let had = !self.classes.is_empty();
            self.classes = ClassList::new();
            return had;
        }
        let before = self.attrs.len();
        self.attrs.retain(|(k, _)| k != name);
        self.attrs.len() != before
    }
}

/// Payload of a node.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

/// An HTML document held in an arena.
///
/// Nodes are never freed: removing a node detaches it from its parent and
/// leaves its id valid, so callers holding an id can still inspect it.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document with an empty `<body>` root.
    #[must_use]
    pub fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            kind: NodeKind::Element(ElementData::new("body")),
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    /// Returns the root element.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Returns whether `id` belongs to this document.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.0).ok_or(DomError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id.0).ok_or(DomError::UnknownNode(id))
    }

    /// Returns the element payload of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::UnknownNode`] for a foreign id and
    /// [`DomError::NotAnElement`] for a text node.
    pub fn element(&self, id: NodeId) -> Result<&ElementData> {
        match &self.node(id)?.kind {
            NodeKind::Element(el) => Ok(el),
            NodeKind::Text(_) => Err(DomError::NotAnElement(id)),
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Element(el) => Ok(el),
            NodeKind::Text(_) => Err(DomError::NotAnElement(id)),
        }
    }

    /// Returns the payload of `id`.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(id.0).map(|n| &n.kind)
    }

    /// Creates a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element(ElementData::new(tag)))
    }

    /// Creates a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            kind,
        });
        id
    }

    /// Starts building a detached element.
    pub fn build(&mut self, tag: &str) -> ElementBuilder<'_> {
        ElementBuilder {
            doc: self,
            data: ElementData::new(tag),
            text: Vec::new(),
        }
    }

    // Navigation

    /// Returns the tag name of an element, or `None` for text nodes.
    #[must_use]
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).ok().map(ElementData::tag)
    }

    /// Returns whether `id` is an element.
    #[must_use]
    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_ok()
    }

    /// Returns the parent of `id`.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    /// Returns the children of `id`, in order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map_or(&[][..], |n| n.children.as_slice())
    }

    /// Iterates over the element children of `id`.
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.is_element(c))
    }

    /// Returns the node immediately after `id` under the same parent.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|&c| c == id)?;
        siblings.get(pos + 1).copied()
    }

    /// Iterates over the ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&n| self.parent(n))
    }

    /// Returns whether `ancestor` is `id` or one of its ancestors.
    #[must_use]
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        ancestor == id || self.ancestors(id).any(|a| a == ancestor)
    }

    /// Returns whether `id` is attached under the root.
    #[must_use]
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.is_inclusive_ancestor(self.root, id)
    }

    /// Returns all descendants of `id` in document order, excluding `id`.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Returns the first connected element whose `id` attribute equals `value`.
    #[must_use]
    pub fn get_element_by_id(&self, value: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&n| self.attr(n, "id") == Some(value))
    }

    /// Returns every connected element with the given tag, in document order.
    #[must_use]
    pub fn elements_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|&n| self.tag(n) == Some(tag))
            .collect()
    }

    // Mutation

    fn check_insert(&self, parent: NodeId, child: NodeId) -> Result<()> {
        self.element(parent)?;
        self.node(child)?;
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        Ok(())
    }

    fn detach(&mut self, id: NodeId) -> Result<()> {
        if let Some(parent) = self.node(id)?.parent {
            self.node_mut(parent)?.children.retain(|&c| c != id);
            self.node_mut(id)?.parent = None;
        }
        Ok(())
    }

    /// Appends `child` as the last child of `parent`, moving it if attached.
    ///
    /// # Errors
    ///
    /// Fails if either id is unknown, `parent` is not an element, or the
    /// move would make `child` its own ancestor.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check_insert(parent, child)?;
        self.detach(child)?;
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Inserts `child` immediately after `reference` under the same parent.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NoParent`] if `reference` is detached, otherwise
    /// fails like [`Document::append_child`].
    pub fn insert_after(&mut self, reference: NodeId, child: NodeId) -> Result<()> {
        let parent = self.parent(reference).ok_or(DomError::NoParent(reference))?;
        if child == reference {
            return Ok(());
        }
        self.check_insert(parent, child)?;
        self.detach(child)?;
        let siblings = &mut self.node_mut(parent)?.children;
        let pos = siblings
            .iter()
            .position(|&c| c == reference)
            .map_or(siblings.len(), |p| p + 1);
        siblings.insert(pos, child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Detaches `id` from its parent. Detached nodes are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::UnknownNode`] for a foreign id.
    pub fn remove(&mut self, id: NodeId) -> Result<()> {
        self.detach(id)
    }

    // Attributes

    /// Returns an attribute value. The class attribute is exposed through
    /// the class methods instead.
    #[must_use]
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).ok().and_then(|el| el.attr(name))
    }

    /// Returns whether the element carries the attribute.
    #[must_use]
    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.attr(id, name).is_some()
    }

    /// Sets an attribute. Setting `class` replaces the class list.
    ///
    /// # Errors
    ///
    /// Fails unless `id` is an element of this document. The same holds for
    /// every attribute, value and class setter below.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> Result<()> {
        self.element_mut(id)?.set_attr(name, value);
        Ok(())
    }

    /// Removes an attribute. Returns whether it was present.
    ///
    /// # Errors
    ///
    /// Fails unless `id` is an element of this document.
    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Result<bool> {
        Ok(self.element_mut(id)?.remove_attr(name))
    }

    /// Returns the `value` attribute, or an empty string.
    #[must_use]
    pub fn value(&self, id: NodeId) -> &str {
        self.attr(id, "value").unwrap_or("")
    }

    /// Sets the `value` attribute.
    ///
    /// # Errors
    ///
    /// Fails unless `id` is an element of this document.
    pub fn set_value(&mut self, id: NodeId, value: &str) -> Result<()> {
        self.set_attr(id, "value", value)
    }

    /// Returns whether a checkable input carries `checked`.
    #[must_use]
    pub fn is_checked(&self, id: NodeId) -> bool {
        self.has_attr(id, "checked")
    }

    /// Sets or clears the `checked` attribute.
    ///
    /// # Errors
    ///
    /// Fails unless `id` is an element of this document.
    pub fn set_checked(&mut self, id: NodeId, checked: bool) -> Result<()> {
        if checked {
            self.set_attr(id, "checked", "")
        } else {
            self.remove_attr(id, "checked").map(|_| ())
        }
    }

    // Classes

    /// Returns the class list of an element.
    #[must_use]
    pub fn classes(&self, id: NodeId) -> Option<&ClassList> {
        self.element(id).ok().map(ElementData::classes)
    }

    /// Returns whether the element carries `class`.
    #[must_use]
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.classes(id).is_some_and(|c| c.contains(class))
    }

    /// Adds every whitespace-separated class in `classes`.
    ///
    /// # Errors
    ///
    /// Fails unless `id` is an element of this document.
    pub fn add_class(&mut self, id: NodeId, classes: &str) -> Result<()> {
        let list = &mut self.element_mut(id)?.classes;
        for class in classes.split_whitespace() {
            list.add(class);
        }
        Ok(())
    }

    /// Removes every whitespace-separated class in `classes`.
    ///
    /// # Errors
    ///
    /// Fails unless `id` is an element of this document.
    pub fn remove_class(&mut self, id: NodeId, classes: &str) -> Result<()> {
        let list = &mut self.element_mut(id)?.classes;
        for class in classes.split_whitespace() {
            list.remove(class);
        }
        Ok(())
    }

    // Text

    /// Concatenates all text below `id`.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        match self.kind(id) {
            Some(NodeKind::Text(text)) => text.clone(),
            Some(NodeKind::Element(_)) => self
                .descendants(id)
                .into_iter()
                .filter_map(|n| match self.kind(n) {
                    Some(NodeKind::Text(text)) => Some(text.as_str()),
                    _ => None,
                })
                .collect(),
            None => String::new(),
        }
    }

    /// Replaces the children of `id` with a single text node.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::UnknownNode`] for a foreign id.
    pub fn set_text(&mut self, id: NodeId, text: &str) -> Result<()> {
        if let NodeKind::Text(existing) = &mut self.node_mut(id)?.kind {
            *existing = text.to_string();
            return Ok(());
        }
        for child in self.children(id).to_vec() {
            self.detach(child)?;
        }
        if !text.is_empty() {
            let node = self.create_text(text);
            self.append_child(id, node)?;
        }
        Ok(())
    }
}

/// Builder for a new element, returned by [`Document::build`].
pub struct ElementBuilder<'a> {
    doc: &'a mut Document,
    data: ElementData,
    text: Vec<String>,
}

impl ElementBuilder<'_> {
    /// Sets an attribute.
    #[must_use]
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.data.set_attr(name, value);
        self
    }

    /// Sets the `id` attribute.
    #[must_use]
    pub fn id(self, value: &str) -> Self {
        self.attr("id", value)
    }

    /// Adds whitespace-separated classes.
    #[must_use]
    pub fn class(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            self.data.classes.add(class);
        }
        self
    }

    /// Appends a text child.
    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.text.push(text.to_string());
        self
    }

    /// Appends the element to `parent` and returns its id.
    ///
    /// # Errors
    ///
    /// Fails if `parent` is not an element of the document.
    pub fn append_to(self, parent: NodeId) -> Result<NodeId> {
        let Self { doc, data, text } = self;
        let id = materialize(doc, data, text);
        doc.append_child(parent, id)?;
        Ok(id)
    }

    /// Returns the id of the still detached element.
    #[must_use]
    pub fn finish(self) -> NodeId {
        let Self { doc, data, text } = self;
        materialize(doc, data, text)
    }
}

fn materialize(doc: &mut Document, data: ElementData, text: Vec<String>) -> NodeId {
    let id = doc.push(NodeKind::Element(data));
    for chunk in text {
        let node = doc.push(NodeKind::Text(chunk));
        doc.nodes[node.0].parent = Some(id);
        doc.nodes[id.0].children.push(node);
    }
    id
}
