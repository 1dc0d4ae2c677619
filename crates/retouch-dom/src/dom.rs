//! Arena-backed in-memory document.

use slotmap::{new_key_type, SlotMap};

use crate::handle::ElementRef;

new_key_type! {
    /// Stable identifier for a node in a [`Document`].
    pub struct NodeId;
}

/// Description of an element to insert into a [`Document`].
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    /// Lowercase tag name.
    pub tag: String,
    /// Optional `id` attribute.
    pub id: Option<String>,
    /// CSS classes in document order.
    pub classes: Vec<String>,
    /// Computed-style snapshot, in declaration order.
    pub styles: Vec<(String, String)>,
}

impl ElementData {
    /// Create an element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Set the `id` attribute.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a CSS class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Add a computed-style entry.
    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.push((property.into(), value.into()));
        self
    }
}

#[derive(Debug)]
struct NodeData {
    element: ElementData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An in-memory element tree with an implicit `body` root.
///
/// Nodes live in a slotmap arena; [`NodeId`]s stay valid until the node is
/// removed. Borrow an [`DomElement`] handle via [`Document::element`] to
/// hand the tree to the style engine.
#[derive(Debug)]
pub struct Document {
    nodes: SlotMap<NodeId, NodeData>,
    root: NodeId,
}

impl Document {
    /// Create a document containing only the `body` root.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(NodeData {
            element: ElementData::new("body"),
            parent: None,
            children: vec![],
        });
        Self { nodes, root }
    }

    /// The `body` root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Append a child element under `parent` and return its id.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not a live node of this document.
    pub fn append(&mut self, parent: NodeId, element: ElementData) -> NodeId {
        assert!(
            self.nodes.contains_key(parent),
            "parent node is not part of this document"
        );
        tracing::trace!(tag = %element.tag, "appending element");
        let id = self.nodes.insert(NodeData {
            element,
            parent: Some(parent),
            children: vec![],
        });
        self.nodes[parent].children.push(id);
        id
    }

    /// Remove a node and its subtree.
    pub fn remove(&mut self, id: NodeId) {
        if id == self.root || !self.nodes.contains_key(id) {
            return;
        }
        let children = self.nodes[id].children.clone();
        for child in children {
            self.remove(child);
        }
        if let Some(parent) = self.nodes[id].parent {
            self.nodes[parent].children.retain(|c| *c != id);
        }
        self.nodes.remove(id);
    }

    /// Number of live nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document holds only the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Borrow an element handle for the style engine.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a live node of this document.
    pub fn element(&self, id: NodeId) -> DomElement<'_> {
        assert!(
            self.nodes.contains_key(id),
            "node is not part of this document"
        );
        DomElement { doc: self, id }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrowed handle to one element of a [`Document`].
#[derive(Debug, Clone, Copy)]
pub struct DomElement<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> DomElement<'a> {
    /// The underlying node id.
    pub fn node_id(&self) -> NodeId {
        self.id
    }

    fn data(&self) -> &'a NodeData {
        &self.doc.nodes[self.id]
    }
}

impl PartialEq for DomElement<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for DomElement<'_> {}

impl<'a> ElementRef for DomElement<'a> {
    fn tag_name(&self) -> &str {
        &self.data().element.tag
    }

    fn element_id(&self) -> Option<&str> {
        self.data().element.id.as_deref()
    }

    fn classes(&self) -> &[String] {
        &self.data().element.classes
    }

    fn computed_style(&self, property: &str) -> Option<&str> {
        self.data()
            .element
            .styles
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    fn computed_styles(&self) -> Vec<(String, String)> {
        self.data().element.styles.clone()
    }

    fn parent(&self) -> Option<Self> {
        self.data().parent.map(|id| DomElement { doc: self.doc, id })
    }

    fn children(&self) -> Vec<Self> {
        self.data()
            .children
            .iter()
            .map(|id| DomElement {
                doc: self.doc,
                id: *id,
            })
            .collect()
    }

    fn is_scope_root(&self) -> bool {
        self.data().parent.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_starts_with_body_root() {
        let doc = Document::new();
        let root = doc.element(doc.root());
        assert_eq!(root.tag_name(), "body");
        assert!(root.is_scope_root());
        assert!(doc.is_empty());
    }

    #[test]
    fn append_builds_tree() {
        let mut doc = Document::new();
        let section = doc.append(doc.root(), ElementData::new("section"));
        let div = doc.append(section, ElementData::new("div").with_class("a"));

        let div = doc.element(div);
        assert_eq!(div.tag_name(), "div");
        assert_eq!(div.classes(), ["a".to_string()]);
        assert_eq!(div.parent().unwrap().tag_name(), "section");
        assert_eq!(div.scope_root().tag_name(), "body");
    }

    #[test]
    fn sibling_positions() {
        let mut doc = Document::new();
        let ul = doc.append(doc.root(), ElementData::new("ul"));
        let _first = doc.append(ul, ElementData::new("li"));
        let second = doc.append(ul, ElementData::new("li"));
        let _span = doc.append(ul, ElementData::new("span"));
        let third = doc.append(ul, ElementData::new("li"));

        let second = doc.element(second);
        assert_eq!(second.position_of_type(), 2);
        assert_eq!(second.position_in_parent(), 2);
        assert_eq!(second.same_tag_sibling_count(), 3);

        // An element after a different tag: of-type and in-parent diverge.
        let third = doc.element(third);
        assert_eq!(third.position_of_type(), 3);
        assert_eq!(third.position_in_parent(), 4);
    }

    #[test]
    fn remove_drops_subtree() {
        let mut doc = Document::new();
        let section = doc.append(doc.root(), ElementData::new("section"));
        let _div = doc.append(section, ElementData::new("div"));
        assert_eq!(doc.len(), 3);

        doc.remove(section);
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn computed_style_lookup() {
        let mut doc = Document::new();
        let div = doc.append(
            doc.root(),
            ElementData::new("div").with_style("color", "#336699"),
        );
        let div = doc.element(div);
        assert_eq!(div.computed_style("color"), Some("#336699"));
        assert_eq!(div.computed_style("margin"), None);
    }
}
