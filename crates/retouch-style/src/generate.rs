//! Deterministic CSS text generation from the override state.
//!
//! The same state always yields byte-identical output: selectors come out
//! in sorted order, properties in modification order, and media contexts
//! in a fixed sequence. Generation is pull-only; it reads the stores and
//! never mutates them.

use std::fmt::Write;

use crate::media::{Breakpoints, MediaContext, MediaContextIndex};
use crate::store::OverrideStore;
use crate::variables::VariableRegistry;

/// Render the full override stylesheet.
///
/// Layout: an optional `:root` block carrying user-created variables,
/// then unwrapped rules for the `all` context, then one `@media` block
/// per non-`all` context that has any tagged overrides. Blank override
/// values (a collapsed spacing general entry) are held in state but not
/// emitted.
pub fn generate_css(
    store: &OverrideStore,
    media: &MediaContextIndex,
    registry: &VariableRegistry,
    breakpoints: &Breakpoints,
) -> String {
    let mut blocks: Vec<String> = vec![];

    let root = root_block(registry);
    if !root.is_empty() {
        blocks.push(root);
    }

    for context in MediaContext::ALL {
        let rules = context_rules(store, media, context);
        if rules.is_empty() {
            continue;
        }
        match context.condition(breakpoints) {
            None => blocks.extend(rules),
            Some(condition) => {
                let mut wrapped = format!("@media {} {{\n", condition);
                for (i, rule) in rules.iter().enumerate() {
                    if i > 0 {
                        wrapped.push('\n');
                    }
                    for line in rule.lines() {
                        let _ = writeln!(wrapped, "  {}", line);
                    }
                }
                wrapped.push('}');
                blocks.push(wrapped);
            }
        }
    }

    blocks.join("\n\n")
}

fn root_block(registry: &VariableRegistry) -> String {
    let declarations: Vec<(&str, &str)> = registry
        .user_created()
        .map(|v| (v.name.as_str(), v.value.as_str()))
        .collect();
    if declarations.is_empty() {
        return String::new();
    }
    format_rule(":root", &declarations)
}

/// Rules for one context, selector-sorted via store iteration order.
fn context_rules(
    store: &OverrideStore,
    media: &MediaContextIndex,
    context: MediaContext,
) -> Vec<String> {
    let mut rules = vec![];
    for (selector, set) in store.iter() {
        let declarations: Vec<(&str, &str)> = set
            .iter()
            .filter(|(property, value)| {
                !value.trim().is_empty() && media.get(selector, property) == context
            })
            .collect();
        if declarations.is_empty() {
            continue;
        }
        rules.push(format_rule(selector, &declarations));
    }
    rules
}

fn format_rule(selector: &str, declarations: &[(&str, &str)]) -> String {
    let mut out = format!("{} {{\n", selector);
    for (property, value) in declarations {
        let _ = writeln!(out, "  {}: {};", property, value);
    }
    out.push('}');
    out
}
