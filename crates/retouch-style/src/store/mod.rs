//! Per-selector style override state.

pub mod compound;
pub mod element_set;
pub mod shadow;
pub mod spacing;

pub use compound::BorderSide;
pub use element_set::ElementStyleSet;
pub use shadow::{ShadowList, ShadowRecord};
pub use spacing::{SpacingGroup, SpacingState};

use std::collections::BTreeMap;

/// All tracked override sets, keyed by selector.
///
/// Selectors are kept sorted so iteration (and therefore generated CSS)
/// is deterministic.
#[derive(Debug, Clone, Default)]
pub struct OverrideStore {
    sets: BTreeMap<String, ElementStyleSet>,
}

impl OverrideStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property override for a selector, creating the set on first
    /// touch. An empty value removes the override.
    pub fn set_property(
        &mut self,
        selector: &str,
        property: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.entry(selector).set(property, value);
    }

    /// Remove a property override.
    pub fn remove_property(&mut self, selector: &str, property: &str) {
        if let Some(set) = self.sets.get_mut(selector) {
            set.remove(property);
        }
    }

    /// Borrow a selector's set.
    pub fn get(&self, selector: &str) -> Option<&ElementStyleSet> {
        self.sets.get(selector)
    }

    /// Mutably borrow a selector's set.
    pub fn get_mut(&mut self, selector: &str) -> Option<&mut ElementStyleSet> {
        self.sets.get_mut(selector)
    }

    /// Borrow or create a selector's set.
    pub fn entry(&mut self, selector: &str) -> &mut ElementStyleSet {
        self.sets
            .entry(selector.to_string())
            .or_insert_with(|| ElementStyleSet::new(selector))
    }

    /// Drop a selector's set entirely. Returns the removed set.
    pub fn remove(&mut self, selector: &str) -> Option<ElementStyleSet> {
        self.sets.remove(selector)
    }

    /// Drop a set when it holds no overrides.
    ///
    /// Used on element switch: an outgoing selector is only retained when
    /// something was actually changed under it.
    pub fn drop_if_empty(&mut self, selector: &str) {
        if self.sets.get(selector).is_some_and(|s| s.is_empty()) {
            self.sets.remove(selector);
        }
    }

    /// Move a set to a new selector key.
    ///
    /// When the new key already has a set, the renamed overrides win on
    /// conflicting properties.
    pub fn rename_selector(&mut self, old: &str, new: &str) {
        if old == new {
            return;
        }
        let Some(mut moved) = self.sets.remove(old) else {
            return;
        };
        moved.set_selector(new);
        match self.sets.remove(new) {
            Some(existing) => {
                let mut merged = existing;
                merged.set_selector(new);
                for (prop, value) in moved.iter() {
                    merged.insert_raw(prop.to_string(), value.to_string());
                }
                self.sets.insert(new.to_string(), merged);
            }
            None => {
                self.sets.insert(new.to_string(), moved);
            }
        }
        tracing::debug!(old, new, "renamed selector key");
    }

    /// Iterate sets in selector order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ElementStyleSet)> {
        self.sets.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Tracked selectors in sorted order.
    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(|k| k.as_str())
    }

    /// Number of tracked selectors.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Whether any selector is tracked.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Drop every tracked selector. Total, not scoped.
    pub fn clear(&mut self) {
        self.sets.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_remove() {
        let mut store = OverrideStore::new();
        store.set_property(".a", "color", "red");
        assert_eq!(store.get(".a").unwrap().get("color"), Some("red"));

        store.remove_property(".a", "color");
        assert!(store.get(".a").unwrap().is_empty());
    }

    #[test]
    fn rename_moves_overrides() {
        let mut store = OverrideStore::new();
        store.set_property(".a", "color", "red");
        store.rename_selector(".a", ".b");

        assert!(store.get(".a").is_none());
        let set = store.get(".b").unwrap();
        assert_eq!(set.selector(), ".b");
        assert_eq!(set.get("color"), Some("red"));
    }

    #[test]
    fn rename_merge_prefers_renamed() {
        let mut store = OverrideStore::new();
        store.set_property(".a", "color", "red");
        store.set_property(".b", "color", "blue");
        store.set_property(".b", "margin", "4px");

        store.rename_selector(".a", ".b");
        let set = store.get(".b").unwrap();
        assert_eq!(set.get("color"), Some("red"));
        assert_eq!(set.get("margin"), Some("4px"));
    }

    #[test]
    fn drop_if_empty_only_drops_empty() {
        let mut store = OverrideStore::new();
        store.entry(".empty");
        store.set_property(".full", "color", "red");

        store.drop_if_empty(".empty");
        store.drop_if_empty(".full");

        assert!(store.get(".empty").is_none());
        assert!(store.get(".full").is_some());
    }

    #[test]
    fn selectors_iterate_sorted() {
        let mut store = OverrideStore::new();
        store.set_property(".z", "color", "red");
        store.set_property(".a", "color", "red");
        store.set_property(".m", "color", "red");

        let keys: Vec<&str> = store.selectors().collect();
        assert_eq!(keys, [".a", ".m", ".z"]);
    }
}
