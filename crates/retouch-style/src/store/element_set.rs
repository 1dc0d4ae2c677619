//! Per-selector override set.

use std::collections::HashMap;

/// The tracked overrides for one selector.
///
/// The overrides map and the modified set of the original design are one
/// structure here: a property is modified iff it has an entry, so the two
/// can never drift apart. Modification order is preserved for stable
/// generation output.
#[derive(Debug, Clone, Default)]
pub struct ElementStyleSet {
    selector: String,
    overrides: HashMap<String, String>,
    order: Vec<String>,
}

impl ElementStyleSet {
    /// Create an empty set for a selector.
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            overrides: HashMap::new(),
            order: vec![],
        }
    }

    /// The selector this set is keyed under.
    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub(crate) fn set_selector(&mut self, selector: impl Into<String>) {
        self.selector = selector.into();
    }

    /// Set a property override.
    ///
    /// An empty or whitespace-only value is treated as removal, not an
    /// error; the panel clears a field to drop an override.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        if value.trim().is_empty() {
            self.remove(&property);
            return;
        }
        self.insert_raw(property, value);
    }

    /// Insert an override keeping blank values.
    ///
    /// Spacing collapse intentionally leaves a blank general entry; that
    /// path must bypass the empty-means-remove rule of [`set`](Self::set).
    pub(crate) fn insert_raw(&mut self, property: String, value: String) {
        if !self.overrides.contains_key(&property) {
            self.order.push(property.clone());
        }
        self.overrides.insert(property, value);
    }

    /// Remove a property override. Returns the removed value.
    pub fn remove(&mut self, property: &str) -> Option<String> {
        let removed = self.overrides.remove(property);
        if removed.is_some() {
            self.order.retain(|p| p != property);
        }
        removed
    }

    /// Get an override value.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.overrides.get(property).map(|v| v.as_str())
    }

    /// Whether the property is modified (has an override entry).
    pub fn is_modified(&self, property: &str) -> bool {
        self.overrides.contains_key(property)
    }

    /// Number of overrides.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the set holds no overrides.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate overrides in modification order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order
            .iter()
            .filter_map(|p| self.overrides.get(p).map(|v| (p.as_str(), v.as_str())))
    }

    /// Modified property names in modification order.
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|p| p.as_str())
    }

    /// Drop every override.
    pub fn clear(&mut self) {
        self.overrides.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_iff_modified() {
        let mut set = ElementStyleSet::new(".a");
        set.set("color", "red");
        set.set("margin-top", "4px");

        for prop in ["color", "margin-top"] {
            assert!(set.is_modified(prop));
            assert!(set.get(prop).is_some());
        }

        set.remove("color");
        assert!(!set.is_modified("color"));
        assert!(set.get("color").is_none());
        assert_eq!(set.len(), 1);

        // Every ordered property has a map entry and vice versa.
        assert_eq!(set.properties().count(), set.iter().count());
    }

    #[test]
    fn empty_value_removes() {
        let mut set = ElementStyleSet::new(".a");
        set.set("color", "red");
        set.set("color", "   ");
        assert!(!set.is_modified("color"));
        assert!(set.is_empty());
    }

    #[test]
    fn modification_order_is_stable() {
        let mut set = ElementStyleSet::new(".a");
        set.set("z-index", "2");
        set.set("color", "red");
        set.set("background-color", "blue");
        // Re-setting an existing property keeps its slot.
        set.set("z-index", "3");

        let props: Vec<&str> = set.properties().collect();
        assert_eq!(props, ["z-index", "color", "background-color"]);
        assert_eq!(set.get("z-index"), Some("3"));
    }

    #[test]
    fn raw_insert_keeps_blank_values() {
        let mut set = ElementStyleSet::new(".a");
        set.insert_raw("margin".into(), String::new());
        assert!(set.is_modified("margin"));
        assert_eq!(set.get("margin"), Some(""));
    }
}
