//! Editing session: the command surface tying the stores together.
//!
//! A session owns the override store, media tags, variable registry and
//! bindings, plus the active-element state (selector text, decomposed
//! parts, computed snapshot). Every mutating command regenerates the
//! stylesheet and pushes it to the attached sink synchronously, then fires
//! the change hook; readers can also pull [`generate_css`](EditorSession::generate_css)
//! directly.

use retouch_dom::ElementRef;

use crate::error::{Error, Result};
use crate::generate;
use crate::media::{Breakpoints, MediaContext, MediaContextIndex};
use crate::parser::{discover_root_variables, validate_selector};
use crate::selector::{match_count, parse_parts, rebuild, synthesize, Selector, Synthesis};
use crate::store::{compound, spacing, BorderSide, OverrideStore, ShadowList, ShadowRecord};
use crate::store::{SpacingGroup, SpacingState};
use crate::variables::{var_reference, CssVariable, VariableBindingIndex, VariableRegistry};

/// Receiver for regenerated stylesheet text.
///
/// In the editor this is the live page: the pushed text replaces the
/// contents of the override `<style>` element.
pub trait StyleSink {
    fn apply_css(&mut self, css: &str);
}

/// What a mutating command changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    ElementPicked {
        selector: String,
        unique: bool,
    },
    PropertyChanged {
        selector: String,
        property: String,
    },
    PropertyRemoved {
        selector: String,
        property: String,
    },
    SelectorRenamed {
        old: String,
        new: String,
        /// Advisory match count against the live tree.
        matches: usize,
    },
    ContextChanged {
        selector: String,
        property: String,
        context: MediaContext,
    },
    VariableChanged {
        name: String,
    },
    StylesheetLoaded,
    Cleared,
}

/// One editing session over a page.
#[derive(Default)]
pub struct EditorSession {
    store: OverrideStore,
    media: MediaContextIndex,
    registry: VariableRegistry,
    bindings: VariableBindingIndex,
    breakpoints: Breakpoints,

    active_selector: Option<String>,
    active_parts: Selector,
    active_computed: Vec<(String, String)>,

    external_css: Vec<String>,
    sink: Option<Box<dyn StyleSink>>,
    on_change: Option<Box<dyn FnMut(&ChangeEvent)>>,
}

impl EditorSession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the live-page sink. The current stylesheet is pushed
    /// immediately so the sink never starts stale.
    pub fn set_sink(&mut self, sink: Box<dyn StyleSink>) {
        self.sink = Some(sink);
        let css = self.full_css();
        if let Some(sink) = self.sink.as_mut() {
            sink.apply_css(&css);
        }
    }

    /// Attach a change hook, fired after every mutating command.
    pub fn set_change_hook(&mut self, hook: Box<dyn FnMut(&ChangeEvent)>) {
        self.on_change = Some(hook);
    }

    // ---- active element ----------------------------------------------

    /// Pick an element: synthesize its selector, decompose it into parts,
    /// and snapshot computed styles for the panel.
    ///
    /// The outgoing selector's set is dropped when nothing was modified
    /// under it, so only touched selectors accumulate.
    pub fn pick_element<E: ElementRef>(&mut self, element: &E) -> Synthesis {
        if let Some(previous) = self.active_selector.take() {
            self.store.drop_if_empty(&previous);
        }

        let synthesis = synthesize(element);
        self.active_parts = parse_parts(&synthesis.selector, element);
        self.active_computed = element.computed_styles();
        self.active_selector = Some(synthesis.selector.clone());

        self.publish(ChangeEvent::ElementPicked {
            selector: synthesis.selector.clone(),
            unique: synthesis.unique,
        });
        synthesis
    }

    /// The active selector text, if an element is picked.
    pub fn active_selector(&self) -> Option<&str> {
        self.active_selector.as_deref()
    }

    /// The active selector decomposed into editable steps.
    pub fn active_parts(&self) -> &Selector {
        &self.active_parts
    }

    /// A computed style from the pick-time snapshot.
    pub fn computed_style(&self, property: &str) -> Option<&str> {
        self.active_computed
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    // ---- property overrides ------------------------------------------

    /// Set a property override. An empty value removes the override and
    /// its media tag. A direct set on a bound property drops the binding
    /// without restoring the saved literal.
    pub fn set_property(&mut self, selector: &str, property: &str, value: &str) {
        self.bindings.remove_property(selector, property);
        if value.trim().is_empty() {
            self.media.remove_property(selector, property);
        }
        self.store.set_property(selector, property, value);
        self.publish(ChangeEvent::PropertyChanged {
            selector: selector.to_string(),
            property: property.to_string(),
        });
    }

    /// Remove a property override along with its media tag and binding.
    pub fn remove_property(&mut self, selector: &str, property: &str) {
        self.store.remove_property(selector, property);
        self.media.remove_property(selector, property);
        self.bindings.remove_property(selector, property);
        self.publish(ChangeEvent::PropertyRemoved {
            selector: selector.to_string(),
            property: property.to_string(),
        });
    }

    /// The stored value for an override, with bound properties
    /// dereferenced through the registry live.
    pub fn display_value(&self, selector: &str, property: &str) -> Option<String> {
        if let Some(binding) = self.bindings.get(selector, property) {
            if let Some(variable) = self.registry.get(&binding.variable) {
                return Some(variable.value.clone());
            }
        }
        self.store
            .get(selector)
            .and_then(|set| set.get(property))
            .map(str::to_string)
    }

    // ---- spacing groups ----------------------------------------------

    /// The current representation of a spacing group.
    pub fn spacing_state(&self, selector: &str, group: SpacingGroup) -> SpacingState {
        match self.store.get(selector) {
            Some(set) => SpacingState::of(set, group),
            None => SpacingState::Unexpanded { value: None },
        }
    }

    /// Switch a spacing group to four side values.
    ///
    /// The general property's media tag and binding move with the value:
    /// the four sides inherit them and the general entries are cleared, so
    /// no stale tag can reapply when the general property is later re-set.
    pub fn expand_spacing(&mut self, selector: &str, group: SpacingGroup) {
        let general = group.general_property();
        if !self.spacing_state(selector, group).is_expanded() {
            spacing::expand(self.store.entry(selector), group);

            let context = self.media.get(selector, general);
            self.media.remove_property(selector, general);
            let binding = self.bindings.unbind(selector, general);
            for side in group.side_properties() {
                self.media.set(selector, side, context);
                if let Some(binding) = &binding {
                    self.bindings.bind(
                        selector,
                        side,
                        &binding.variable,
                        binding.saved_literal.clone(),
                    );
                }
            }
        }
        self.publish(ChangeEvent::PropertyChanged {
            selector: selector.to_string(),
            property: general.to_string(),
        });
    }

    /// Switch a spacing group back to one general value (lossy). Side
    /// media tags and bindings are discarded with the side values.
    pub fn collapse_spacing(&mut self, selector: &str, group: SpacingGroup) {
        let general = group.general_property();
        if self.spacing_state(selector, group).is_expanded() {
            spacing::collapse(self.store.entry(selector), group);

            for side in group.side_properties() {
                self.media.remove_property(selector, side);
                self.bindings.remove_property(selector, side);
            }
            self.media.remove_property(selector, general);
            self.bindings.remove_property(selector, general);
        }
        self.publish(ChangeEvent::PropertyChanged {
            selector: selector.to_string(),
            property: general.to_string(),
        });
    }

    // ---- border sides ------------------------------------------------

    /// Activate per-side border editing for one side.
    ///
    /// Seeded side entries inherit the corresponding general
    /// sub-property's media tag and binding; the general entries keep
    /// theirs, since general and per-side values coexist.
    pub fn activate_border_side(&mut self, selector: &str, side: BorderSide) {
        let newly_active = !self.border_side_active(selector, side);
        compound::activate_side(self.store.entry(selector), side);
        if newly_active {
            for (general, side_property) in compound::general_properties()
                .into_iter()
                .zip(side.properties())
            {
                let context = self.media.get(selector, &general);
                self.media.set(selector, &side_property, context);
                if let Some(binding) = self.bindings.get(selector, &general).cloned() {
                    self.bindings.bind(
                        selector,
                        &side_property,
                        &binding.variable,
                        binding.saved_literal,
                    );
                }
            }
        }
        self.publish(ChangeEvent::PropertyChanged {
            selector: selector.to_string(),
            property: "border".to_string(),
        });
    }

    /// Clear one side's border sub-properties along with their media tags
    /// and bindings.
    pub fn remove_border_side(&mut self, selector: &str, side: BorderSide) {
        if let Some(set) = self.store.get_mut(selector) {
            compound::remove_side(set, side);
        }
        for property in side.properties() {
            self.media.remove_property(selector, &property);
            self.bindings.remove_property(selector, &property);
        }
        self.publish(ChangeEvent::PropertyRemoved {
            selector: selector.to_string(),
            property: "border".to_string(),
        });
    }

    /// Whether a border side has per-side entries.
    pub fn border_side_active(&self, selector: &str, side: BorderSide) -> bool {
        self.store
            .get(selector)
            .is_some_and(|set| compound::side_active(set, side))
    }

    // ---- shadows ------------------------------------------------------

    /// The shadow list for a selector; the stored `box-shadow` text when
    /// present, the default single layer otherwise.
    pub fn shadows(&self, selector: &str) -> ShadowList {
        self.store
            .get(selector)
            .and_then(|set| set.get("box-shadow"))
            .map(ShadowList::parse)
            .unwrap_or_default()
    }

    /// Append a shadow layer (the default layer when the property was
    /// untouched). Returns the new layer's index.
    pub fn add_shadow(&mut self, selector: &str) -> usize {
        let already_stored = self
            .store
            .get(selector)
            .is_some_and(|set| set.is_modified("box-shadow"));
        let mut list = self.shadows(selector);
        let index = if already_stored { list.add_default() } else { 0 };
        self.write_shadows(selector, &list);
        index
    }

    /// Replace the shadow layer at `index`.
    pub fn update_shadow(&mut self, selector: &str, index: usize, record: ShadowRecord) -> Result<()> {
        let mut list = self.shadows(selector);
        list.update(index, record)?;
        self.write_shadows(selector, &list);
        Ok(())
    }

    /// Remove the shadow layer at `index`. The last layer is never
    /// removed; `Ok(false)` reports the refusal.
    pub fn remove_shadow(&mut self, selector: &str, index: usize) -> Result<bool> {
        let mut list = self.shadows(selector);
        let removed = list.remove(index)?;
        self.write_shadows(selector, &list);
        Ok(removed)
    }

    fn write_shadows(&mut self, selector: &str, list: &ShadowList) {
        self.bindings.remove_property(selector, "box-shadow");
        self.store
            .set_property(selector, "box-shadow", list.to_string());
        self.publish(ChangeEvent::PropertyChanged {
            selector: selector.to_string(),
            property: "box-shadow".to_string(),
        });
    }

    // ---- media contexts ----------------------------------------------

    /// Tag an override with a viewport context.
    pub fn set_media_context(&mut self, selector: &str, property: &str, context: MediaContext) {
        self.media.set(selector, property, context);
        self.publish(ChangeEvent::ContextChanged {
            selector: selector.to_string(),
            property: property.to_string(),
            context,
        });
    }

    /// The context an override is tagged with.
    pub fn media_context(&self, selector: &str, property: &str) -> MediaContext {
        self.media.get(selector, property)
    }

    /// The breakpoint widths used for `@media` conditions.
    pub fn breakpoints(&self) -> Breakpoints {
        self.breakpoints
    }

    /// Replace the breakpoint widths.
    pub fn set_breakpoints(&mut self, breakpoints: Breakpoints) {
        self.breakpoints = breakpoints;
        self.publish(ChangeEvent::StylesheetLoaded);
    }

    // ---- variables ----------------------------------------------------

    /// The variable registry.
    pub fn variables(&self) -> &VariableRegistry {
        &self.registry
    }

    /// Create (or overwrite) a user variable.
    pub fn create_variable(&mut self, name: &str, value: &str) {
        self.registry.create(name, value);
        self.publish(ChangeEvent::VariableChanged {
            name: name.to_string(),
        });
    }

    /// Update a variable's value. Bound overrides pick the change up
    /// without being rewritten; they store `var(--name)`.
    pub fn set_variable_value(&mut self, name: &str, value: &str) -> Result<()> {
        self.registry.set_value(name, value)?;
        self.publish(ChangeEvent::VariableChanged {
            name: name.to_string(),
        });
        Ok(())
    }

    /// Delete a user-created variable, restoring the saved literal on
    /// every override bound to it.
    pub fn delete_variable(&mut self, name: &str) -> Result<CssVariable> {
        let deleted = self.registry.delete(name)?;
        for (selector, property) in self.bindings.bound_to(&deleted.name) {
            if let Some(binding) = self.bindings.unbind(&selector, &property) {
                self.store
                    .set_property(&selector, &property, binding.saved_literal);
            }
        }
        self.publish(ChangeEvent::VariableChanged {
            name: deleted.name.clone(),
        });
        Ok(deleted)
    }

    /// Bind an override to a variable: the stored value becomes
    /// `var(--name)` and the previous literal is kept for restore.
    pub fn bind_variable(&mut self, selector: &str, property: &str, name: &str) -> Result<()> {
        let variable = self
            .registry
            .get(name)
            .ok_or_else(|| Error::unknown_variable(name))?;
        let variable_name = variable.name.clone();

        let saved = self
            .store
            .get(selector)
            .and_then(|set| set.get(property))
            .unwrap_or_default()
            .to_string();
        self.bindings
            .bind(selector, property, &variable_name, saved);
        self.store
            .set_property(selector, property, var_reference(&variable_name));
        self.publish(ChangeEvent::PropertyChanged {
            selector: selector.to_string(),
            property: property.to_string(),
        });
        Ok(())
    }

    /// Remove a binding and restore the saved literal.
    pub fn unbind_variable(&mut self, selector: &str, property: &str) {
        if let Some(binding) = self.bindings.unbind(selector, property) {
            self.store
                .set_property(selector, property, binding.saved_literal);
            self.publish(ChangeEvent::PropertyChanged {
                selector: selector.to_string(),
                property: property.to_string(),
            });
        }
    }

    // ---- selector editing --------------------------------------------

    /// Replace the active selector with manually edited text.
    ///
    /// The text is validated first; on error no state changes and the
    /// caller keeps the typed text for correction. On success overrides,
    /// media tags and bindings move under the new key, the parts model is
    /// re-derived, and the advisory match count is returned.
    pub fn set_selector_text<E: ElementRef>(&mut self, text: &str, element: &E) -> Result<usize> {
        validate_selector(text)?;
        let old = self
            .active_selector
            .clone()
            .ok_or_else(|| Error::unknown_selector(text))?;
        Ok(self.apply_rename(&old, text, element))
    }

    /// Replace the active selector with edited parts (recomposed to text).
    pub fn update_selector_parts<E: ElementRef>(
        &mut self,
        parts: Selector,
        element: &E,
    ) -> Result<usize> {
        let text = rebuild(&parts);
        let old = self
            .active_selector
            .clone()
            .ok_or_else(|| Error::unknown_selector(&text))?;
        Ok(self.apply_rename(&old, &text, element))
    }

    fn apply_rename<E: ElementRef>(&mut self, old: &str, new: &str, element: &E) -> usize {
        self.store.rename_selector(old, new);
        self.media.rename_selector(old, new);
        self.bindings.rename_selector(old, new);

        self.active_selector = Some(new.to_string());
        self.active_parts = parse_parts(new, element);

        let matches = match_count(&element.scope_root(), &self.active_parts);
        if matches != 1 {
            tracing::debug!(selector = new, matches, "edited selector is not unique");
        }
        self.publish(ChangeEvent::SelectorRenamed {
            old: old.to_string(),
            new: new.to_string(),
            matches,
        });
        matches
    }

    // ---- stylesheets --------------------------------------------------

    /// Load external stylesheet text: it is scanned for `:root` variables
    /// and prepended before the override rules in every sink push.
    pub fn load_css(&mut self, css: &str) {
        self.registry
            .record_discovered(discover_root_variables(&[css]));
        self.external_css.push(css.to_string());
        self.publish(ChangeEvent::StylesheetLoaded);
    }

    /// Render the override stylesheet (pull path; external CSS excluded).
    pub fn generate_css(&self) -> String {
        generate::generate_css(&self.store, &self.media, &self.registry, &self.breakpoints)
    }

    /// The override store (read-only).
    pub fn store(&self) -> &OverrideStore {
        &self.store
    }

    /// Drop every override, media tag and binding. The variable registry
    /// survives; variables describe the page, not the edits.
    pub fn clear_all(&mut self) {
        self.store.clear();
        self.media.clear();
        self.bindings.clear();
        self.publish(ChangeEvent::Cleared);
    }

    // ---- push path ----------------------------------------------------

    fn full_css(&self) -> String {
        let generated = self.generate_css();
        if self.external_css.is_empty() {
            return generated;
        }
        let mut parts: Vec<&str> = self.external_css.iter().map(String::as_str).collect();
        if !generated.is_empty() {
            parts.push(&generated);
        }
        parts.join("\n\n")
    }

    fn publish(&mut self, event: ChangeEvent) {
        let css = self.full_css();
        if let Some(sink) = self.sink.as_mut() {
            sink.apply_css(&css);
        }
        if let Some(hook) = self.on_change.as_mut() {
            hook(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retouch_dom::{Document, ElementData, NodeId};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn page() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let section = doc.append(
            doc.root(),
            ElementData::new("section").with_style("color", "rgb(0, 0, 0)"),
        );
        let div = doc.append(section, ElementData::new("div").with_class("a"));
        (doc, section, div)
    }

    #[test]
    fn pick_then_set_emits_block() {
        let (doc, _, div) = page();
        let mut session = EditorSession::new();

        let synthesis = session.pick_element(&doc.element(div));
        assert!(synthesis.unique);
        session.set_property(&synthesis.selector, "margin-top", "12px");

        assert_eq!(
            session.generate_css(),
            "body > section > div.a {\n  margin-top: 12px;\n}"
        );
    }

    #[test]
    fn repeated_set_is_idempotent_in_output() {
        let (doc, _, div) = page();
        let mut session = EditorSession::new();
        let selector = session.pick_element(&doc.element(div)).selector;

        session.set_property(&selector, "color", "red");
        let first = session.generate_css();
        session.set_property(&selector, "color", "red");
        assert_eq!(session.generate_css(), first);
    }

    #[test]
    fn untouched_selector_dropped_on_switch() {
        let (doc, section, div) = page();
        let mut session = EditorSession::new();

        let selector = session.pick_element(&doc.element(div)).selector;
        session.set_property(&selector, "color", "red");
        session.set_property(&selector, "color", "");

        session.pick_element(&doc.element(section));
        assert!(session.store().is_empty());
    }

    #[test]
    fn computed_snapshot_available_after_pick() {
        let (doc, section, _) = page();
        let mut session = EditorSession::new();
        session.pick_element(&doc.element(section));
        assert_eq!(session.computed_style("color"), Some("rgb(0, 0, 0)"));
    }

    #[test]
    fn spacing_flow() {
        let (doc, _, div) = page();
        let mut session = EditorSession::new();
        let selector = session.pick_element(&doc.element(div)).selector;

        session.set_property(&selector, "margin", "8px");
        session.expand_spacing(&selector, SpacingGroup::Margin);
        assert!(session
            .spacing_state(&selector, SpacingGroup::Margin)
            .is_expanded());

        let css = session.generate_css();
        assert!(css.contains("margin-top: 8px;"));
        assert!(css.contains("margin-left: 8px;"));
        assert!(!css.contains("margin: 8px;"));

        session.collapse_spacing(&selector, SpacingGroup::Margin);
        // Blank general entry is state-only, not emitted.
        assert!(!session.generate_css().contains("margin"));
    }

    #[test]
    fn border_side_flow() {
        let (doc, _, div) = page();
        let mut session = EditorSession::new();
        let selector = session.pick_element(&doc.element(div)).selector;

        session.set_property(&selector, "border-width", "2px");
        session.activate_border_side(&selector, BorderSide::Top);
        assert!(session.border_side_active(&selector, BorderSide::Top));

        let css = session.generate_css();
        assert!(css.contains("border-top-width: 2px;"));
        assert!(css.contains("border-top-style: solid;"));

        session.remove_border_side(&selector, BorderSide::Top);
        assert!(!session.border_side_active(&selector, BorderSide::Top));
        assert!(session.generate_css().contains("border-width: 2px;"));
    }

    #[test]
    fn expand_moves_media_scoping_to_sides() {
        let (doc, _, div) = page();
        let mut session = EditorSession::new();
        let selector = session.pick_element(&doc.element(div)).selector;

        session.set_property(&selector, "margin", "8px");
        session.set_media_context(&selector, "margin", MediaContext::Tablet);
        session.expand_spacing(&selector, SpacingGroup::Margin);

        // The sides keep the tablet scoping the general value carried.
        let css = session.generate_css();
        assert!(css.contains("@media (max-width: 768px)"));
        assert!(css.contains("    margin-top: 8px;"));
        assert!(!css.contains("\n  margin-top"));

        // Collapse discards the side tags, and the general tag is gone
        // too: re-setting the general value must not land in @media.
        session.collapse_spacing(&selector, SpacingGroup::Margin);
        assert_eq!(session.media_context(&selector, "margin"), MediaContext::All);

        session.set_property(&selector, "margin", "4px");
        let css = session.generate_css();
        assert!(!css.contains("@media"));
        assert!(css.contains("margin: 4px;"));
    }

    #[test]
    fn expand_carries_binding_to_sides() {
        let (doc, _, div) = page();
        let mut session = EditorSession::new();
        let selector = session.pick_element(&doc.element(div)).selector;
        session.create_variable("--gap", "8px");

        session.set_property(&selector, "margin", "2px");
        session.bind_variable(&selector, "margin", "--gap").unwrap();
        session.expand_spacing(&selector, SpacingGroup::Margin);

        let stored = session.store().get(&selector).unwrap().get("margin-top");
        assert_eq!(stored, Some("var(--gap)"));
        assert_eq!(
            session.display_value(&selector, "margin-top").as_deref(),
            Some("8px")
        );
        // No binding lingers for the deleted general entry.
        assert_eq!(session.display_value(&selector, "margin"), None);

        // Unbinding a side restores the literal the general held.
        session.unbind_variable(&selector, "margin-top");
        let stored = session.store().get(&selector).unwrap().get("margin-top");
        assert_eq!(stored, Some("2px"));
    }

    #[test]
    fn border_side_inherits_general_scoping() {
        let (doc, _, div) = page();
        let mut session = EditorSession::new();
        let selector = session.pick_element(&doc.element(div)).selector;

        session.set_property(&selector, "border-width", "2px");
        session.set_media_context(&selector, "border-width", MediaContext::Tablet);
        session.activate_border_side(&selector, BorderSide::Top);

        // The seeded side lands in the same context as the general value.
        assert_eq!(
            session.media_context(&selector, "border-top-width"),
            MediaContext::Tablet
        );
        assert_eq!(
            session.media_context(&selector, "border-width"),
            MediaContext::Tablet
        );
        let css = session.generate_css();
        assert!(css.contains("@media (max-width: 768px)"));
        assert!(css.contains("    border-top-width: 2px;"));

        // Untagged sub-properties seed untagged.
        assert_eq!(
            session.media_context(&selector, "border-top-style"),
            MediaContext::All
        );

        session.remove_border_side(&selector, BorderSide::Top);
        assert_eq!(
            session.media_context(&selector, "border-top-width"),
            MediaContext::All
        );
    }

    #[test]
    fn shadow_flow() {
        let (doc, _, div) = page();
        let mut session = EditorSession::new();
        let selector = session.pick_element(&doc.element(div)).selector;

        // First add materializes the default layer.
        assert_eq!(session.add_shadow(&selector), 0);
        assert_eq!(session.shadows(&selector).len(), 1);
        assert!(session.generate_css().contains("box-shadow:"));

        assert_eq!(session.add_shadow(&selector), 1);
        assert_eq!(session.shadows(&selector).len(), 2);

        let mut inset = ShadowRecord::default();
        inset.inset = true;
        session.update_shadow(&selector, 0, inset).unwrap();
        assert!(session.shadows(&selector).records()[0].inset);

        assert!(session.remove_shadow(&selector, 1).unwrap());
        // The last layer is refused, not removed.
        assert!(!session.remove_shadow(&selector, 0).unwrap());
        assert_eq!(session.shadows(&selector).len(), 1);
    }

    #[test]
    fn media_context_splits_output() {
        let (doc, _, div) = page();
        let mut session = EditorSession::new();
        let selector = session.pick_element(&doc.element(div)).selector;

        session.set_property(&selector, "color", "red");
        session.set_property(&selector, "font-size", "14px");
        session.set_media_context(&selector, "font-size", MediaContext::Tablet);

        let css = session.generate_css();
        assert!(css.contains("body > section > div.a {\n  color: red;\n}"));
        assert!(css.contains("@media (max-width: 768px) {"));
        assert!(css.contains("    font-size: 14px;"));
    }

    #[test]
    fn bind_round_trip() {
        let (doc, _, div) = page();
        let mut session = EditorSession::new();
        let selector = session.pick_element(&doc.element(div)).selector;
        session.load_css(":root { --brand: #336699; }");

        session.set_property(&selector, "color", "#123456");
        session.bind_variable(&selector, "color", "--brand").unwrap();

        let stored = session.store().get(&selector).unwrap().get("color");
        assert_eq!(stored, Some("var(--brand)"));
        assert_eq!(
            session.display_value(&selector, "color").as_deref(),
            Some("#336699")
        );

        session.unbind_variable(&selector, "color");
        let stored = session.store().get(&selector).unwrap().get("color");
        assert_eq!(stored, Some("#123456"));
    }

    #[test]
    fn variable_edit_propagates_without_rewriting() {
        let (doc, _, div) = page();
        let mut session = EditorSession::new();
        let selector = session.pick_element(&doc.element(div)).selector;
        session.create_variable("--accent", "#ff0000");

        session.set_property(&selector, "color", "blue");
        session.bind_variable(&selector, "color", "accent").unwrap();
        session.set_variable_value("--accent", "#00ff00").unwrap();

        assert_eq!(
            session.display_value(&selector, "color").as_deref(),
            Some("#00ff00")
        );
        let stored = session.store().get(&selector).unwrap().get("color");
        assert_eq!(stored, Some("var(--accent)"));
    }

    #[test]
    fn deleting_variable_restores_bound_literals() {
        let (doc, _, div) = page();
        let mut session = EditorSession::new();
        let selector = session.pick_element(&doc.element(div)).selector;
        session.create_variable("--gap", "8px");

        session.set_property(&selector, "margin-top", "4px");
        session
            .bind_variable(&selector, "margin-top", "--gap")
            .unwrap();
        session.delete_variable("--gap").unwrap();

        let stored = session.store().get(&selector).unwrap().get("margin-top");
        assert_eq!(stored, Some("4px"));
        assert!(session.variables().get("--gap").is_none());
    }

    #[test]
    fn direct_set_drops_binding_without_restore() {
        let (doc, _, div) = page();
        let mut session = EditorSession::new();
        let selector = session.pick_element(&doc.element(div)).selector;
        session.create_variable("--brand", "#336699");

        session.set_property(&selector, "color", "#123456");
        session.bind_variable(&selector, "color", "--brand").unwrap();
        session.set_property(&selector, "color", "green");

        // Unbind after a direct set is a no-op; "green" stays.
        session.unbind_variable(&selector, "color");
        let stored = session.store().get(&selector).unwrap().get("color");
        assert_eq!(stored, Some("green"));
    }

    #[test]
    fn selector_text_edit_moves_state() {
        let (doc, _, div) = page();
        let mut session = EditorSession::new();
        let element = doc.element(div);
        let selector = session.pick_element(&element).selector;

        session.set_property(&selector, "color", "red");
        session.set_media_context(&selector, "color", MediaContext::Phone);

        let matches = session.set_selector_text(".a", &element).unwrap();
        assert_eq!(matches, 1);
        assert_eq!(session.active_selector(), Some(".a"));
        assert_eq!(session.media_context(".a", "color"), MediaContext::Phone);
        assert!(session.generate_css().contains(".a {"));
        assert!(session.store().get(&selector).is_none());
    }

    #[test]
    fn invalid_selector_text_leaves_state_untouched() {
        let (doc, _, div) = page();
        let mut session = EditorSession::new();
        let element = doc.element(div);
        let selector = session.pick_element(&element).selector;
        session.set_property(&selector, "color", "red");

        assert!(session.set_selector_text("..broken", &element).is_err());
        assert_eq!(session.active_selector(), Some(selector.as_str()));
        assert!(session.store().get(&selector).is_some());
    }

    #[test]
    fn part_edit_renames_and_reports_matches() {
        let mut doc = Document::new();
        let ul = doc.append(doc.root(), ElementData::new("ul"));
        doc.append(ul, ElementData::new("li"));
        let second = doc.append(ul, ElementData::new("li"));
        doc.append(ul, ElementData::new("li"));

        let element = doc.element(second);
        let mut session = EditorSession::new();
        let selector = session.pick_element(&element).selector;
        assert_eq!(selector, "body > ul > li:nth-of-type(2)");
        session.set_property(&selector, "color", "red");

        // Widen the position filter to every li.
        let mut parts = session.active_parts().clone();
        let last = parts.steps.len() - 1;
        parts.steps[last].position = crate::selector::PositionFilter::All;
        let matches = session.update_selector_parts(parts, &element).unwrap();

        assert_eq!(matches, 3);
        assert_eq!(session.active_selector(), Some("body > ul > li"));
        assert!(session.generate_css().contains("body > ul > li {"));
    }

    struct RecordingSink(Rc<RefCell<Vec<String>>>);

    impl StyleSink for RecordingSink {
        fn apply_css(&mut self, css: &str) {
            self.0.borrow_mut().push(css.to_string());
        }
    }

    #[test]
    fn every_mutation_pushes_to_sink() {
        let (doc, _, div) = page();
        let pushed = Rc::new(RefCell::new(vec![]));
        let mut session = EditorSession::new();
        session.set_sink(Box::new(RecordingSink(Rc::clone(&pushed))));

        let selector = session.pick_element(&doc.element(div)).selector;
        session.set_property(&selector, "color", "red");
        session.remove_property(&selector, "color");

        let pushed = pushed.borrow();
        // Attach, pick, set, remove.
        assert_eq!(pushed.len(), 4);
        assert!(pushed[2].contains("color: red;"));
        assert_eq!(pushed[3], "");
    }

    #[test]
    fn external_css_prepended_in_pushes() {
        let (doc, _, div) = page();
        let pushed = Rc::new(RefCell::new(vec![]));
        let mut session = EditorSession::new();
        session.set_sink(Box::new(RecordingSink(Rc::clone(&pushed))));

        session.load_css(".base { color: black; }");
        let selector = session.pick_element(&doc.element(div)).selector;
        session.set_property(&selector, "color", "red");

        let last = pushed.borrow().last().unwrap().clone();
        assert!(last.starts_with(".base { color: black; }"));
        assert!(last.ends_with("body > section > div.a {\n  color: red;\n}"));
        // Pull path stays overrides-only.
        assert!(!session.generate_css().contains(".base"));
    }

    #[test]
    fn clear_all_keeps_variables() {
        let (doc, _, div) = page();
        let mut session = EditorSession::new();
        let selector = session.pick_element(&doc.element(div)).selector;
        session.create_variable("--brand", "#336699");
        session.set_property(&selector, "color", "red");

        session.clear_all();

        assert!(session.store().is_empty());
        assert!(session.variables().get("--brand").is_some());
        // The :root block for user variables still emits.
        assert_eq!(session.generate_css(), ":root {\n  --brand: #336699;\n}");
    }

    #[test]
    fn change_hook_fires() {
        let (doc, _, div) = page();
        let events = Rc::new(RefCell::new(vec![]));
        let seen = Rc::clone(&events);

        let mut session = EditorSession::new();
        session.set_change_hook(Box::new(move |event: &ChangeEvent| {
            seen.borrow_mut().push(event.clone());
        }));

        let selector = session.pick_element(&doc.element(div)).selector;
        session.set_property(&selector, "color", "red");

        let events = events.borrow();
        assert!(matches!(events[0], ChangeEvent::ElementPicked { .. }));
        assert!(matches!(events[1], ChangeEvent::PropertyChanged { .. }));
    }
}
