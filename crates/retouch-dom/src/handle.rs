//! The element-handle capability trait.

/// Read-only view of one element in a document tree.
///
/// Handles are cheap to clone and compare. Two handles are equal when they
/// refer to the same element of the same document, which is what selector
/// validation relies on.
pub trait ElementRef: Clone + PartialEq {
    /// Lowercase tag name (e.g. "div", "li").
    fn tag_name(&self) -> &str;

    /// The element's `id` attribute, if any.
    fn element_id(&self) -> Option<&str>;

    /// The element's CSS classes, in document order.
    fn classes(&self) -> &[String];

    /// Snapshot value of a single computed style property.
    fn computed_style(&self, property: &str) -> Option<&str>;

    /// The full computed-style snapshot, in declaration order.
    fn computed_styles(&self) -> Vec<(String, String)>;

    /// Parent element, or `None` at the scope root.
    fn parent(&self) -> Option<Self>;

    /// Child elements in document order.
    fn children(&self) -> Vec<Self>;

    /// Whether this element is the selector scope root (`body`).
    fn is_scope_root(&self) -> bool;

    /// Walk up to the scope root. Returns `self` when already there.
    fn scope_root(&self) -> Self {
        let mut current = self.clone();
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    /// Siblings sharing this element's parent (including self).
    fn siblings(&self) -> Vec<Self> {
        match self.parent() {
            Some(parent) => parent.children(),
            None => vec![self.clone()],
        }
    }

    /// 1-based position among siblings of the same tag.
    fn position_of_type(&self) -> usize {
        let tag = self.tag_name().to_string();
        let mut position = 0;
        for sibling in self.siblings() {
            if sibling.tag_name() == tag {
                position += 1;
            }
            if sibling == *self {
                return position;
            }
        }
        1
    }

    /// 1-based position among all element siblings.
    fn position_in_parent(&self) -> usize {
        for (index, sibling) in self.siblings().iter().enumerate() {
            if *sibling == *self {
                return index + 1;
            }
        }
        1
    }

    /// Number of siblings sharing this element's tag (including self).
    fn same_tag_sibling_count(&self) -> usize {
        let tag = self.tag_name();
        self.siblings()
            .iter()
            .filter(|s| s.tag_name() == tag)
            .count()
    }
}
