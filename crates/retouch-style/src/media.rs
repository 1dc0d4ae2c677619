//! Viewport contexts for scoping overrides into `@media` rules.

use std::collections::BTreeMap;
use std::fmt;

/// A named viewport bucket.
///
/// Declaration order is emission order in generated CSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum MediaContext {
    /// Every viewport; emitted unwrapped.
    #[default]
    All,
    /// Wide viewports (`min-width`).
    Desktop,
    /// Medium viewports (`max-width`).
    Tablet,
    /// Narrow viewports (`max-width`).
    Phone,
}

impl MediaContext {
    /// All contexts in emission order.
    pub const ALL: [MediaContext; 4] = [
        MediaContext::All,
        MediaContext::Desktop,
        MediaContext::Tablet,
        MediaContext::Phone,
    ];

    /// The `@media` condition for this context, `None` for [`All`](Self::All).
    pub fn condition(&self, breakpoints: &Breakpoints) -> Option<String> {
        match self {
            MediaContext::All => None,
            MediaContext::Desktop => {
                Some(format!("(min-width: {}px)", breakpoints.desktop_min_px))
            }
            MediaContext::Tablet => Some(format!("(max-width: {}px)", breakpoints.tablet_max_px)),
            MediaContext::Phone => Some(format!("(max-width: {}px)", breakpoints.phone_max_px)),
        }
    }
}

impl fmt::Display for MediaContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MediaContext::All => "all",
            MediaContext::Desktop => "desktop",
            MediaContext::Tablet => "tablet",
            MediaContext::Phone => "phone",
        };
        write!(f, "{}", name)
    }
}

/// Configurable breakpoint widths for the non-`all` contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoints {
    /// Desktop lower bound (`min-width`).
    pub desktop_min_px: u32,
    /// Tablet upper bound (`max-width`).
    pub tablet_max_px: u32,
    /// Phone upper bound (`max-width`).
    pub phone_max_px: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            desktop_min_px: 992,
            tablet_max_px: 768,
            phone_max_px: 480,
        }
    }
}

/// Per-(selector, property) media context tags.
///
/// Untagged pairs default to [`MediaContext::All`]; only non-default tags
/// are stored.
#[derive(Debug, Clone, Default)]
pub struct MediaContextIndex {
    tags: BTreeMap<(String, String), MediaContext>,
}

impl MediaContextIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag a (selector, property) pair with a context.
    pub fn set(&mut self, selector: &str, property: &str, context: MediaContext) {
        let key = (selector.to_string(), property.to_string());
        if context == MediaContext::All {
            self.tags.remove(&key);
        } else {
            self.tags.insert(key, context);
        }
    }

    /// The context for a (selector, property) pair.
    pub fn get(&self, selector: &str, property: &str) -> MediaContext {
        self.tags
            .get(&(selector.to_string(), property.to_string()))
            .copied()
            .unwrap_or_default()
    }

    /// Drop the tag for a removed property.
    pub fn remove_property(&mut self, selector: &str, property: &str) {
        self.tags
            .remove(&(selector.to_string(), property.to_string()));
    }

    /// Move every tag under a renamed selector key.
    pub fn rename_selector(&mut self, old: &str, new: &str) {
        if old == new {
            return;
        }
        let moved: Vec<(String, MediaContext)> = self
            .tags
            .iter()
            .filter(|((sel, _), _)| sel == old)
            .map(|((_, prop), ctx)| (prop.clone(), *ctx))
            .collect();
        self.tags.retain(|(sel, _), _| sel != old);
        for (prop, ctx) in moved {
            self.tags.insert((new.to_string(), prop), ctx);
        }
    }

    /// Drop every tag.
    pub fn clear(&mut self) {
        self.tags.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_context_is_all() {
        let index = MediaContextIndex::new();
        assert_eq!(index.get(".a", "color"), MediaContext::All);
    }

    #[test]
    fn set_and_reset() {
        let mut index = MediaContextIndex::new();
        index.set(".a", "color", MediaContext::Tablet);
        assert_eq!(index.get(".a", "color"), MediaContext::Tablet);

        index.set(".a", "color", MediaContext::All);
        assert_eq!(index.get(".a", "color"), MediaContext::All);
    }

    #[test]
    fn rename_moves_tags() {
        let mut index = MediaContextIndex::new();
        index.set(".a", "color", MediaContext::Phone);
        index.set(".a", "margin", MediaContext::Tablet);
        index.set(".b", "color", MediaContext::Desktop);

        index.rename_selector(".a", ".c");
        assert_eq!(index.get(".c", "color"), MediaContext::Phone);
        assert_eq!(index.get(".c", "margin"), MediaContext::Tablet);
        assert_eq!(index.get(".a", "color"), MediaContext::All);
        assert_eq!(index.get(".b", "color"), MediaContext::Desktop);
    }

    #[test]
    fn conditions_use_breakpoints() {
        let bp = Breakpoints::default();
        assert_eq!(MediaContext::All.condition(&bp), None);
        assert_eq!(
            MediaContext::Desktop.condition(&bp).unwrap(),
            "(min-width: 992px)"
        );
        assert_eq!(
            MediaContext::Tablet.condition(&bp).unwrap(),
            "(max-width: 768px)"
        );
        assert_eq!(
            MediaContext::Phone.condition(&bp).unwrap(),
            "(max-width: 480px)"
        );
    }
}
