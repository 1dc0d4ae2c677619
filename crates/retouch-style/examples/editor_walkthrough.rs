//! End-to-end walkthrough of an editing session.
//!
//! Run with: cargo run -p retouch-style --example editor_walkthrough

use retouch_dom::{Document, ElementData};
use retouch_style::prelude::*;

fn build_page() -> (Document, retouch_dom::NodeId) {
    let mut doc = Document::new();
    let section = doc.append(
        doc.root(),
        ElementData::new("section").with_class("content"),
    );
    let ul = doc.append(section, ElementData::new("ul"));
    doc.append(ul, ElementData::new("li"));
    let second = doc.append(ul, ElementData::new("li"));
    doc.append(ul, ElementData::new("li"));
    (doc, second)
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let (doc, picked) = build_page();
    let element = doc.element(picked);

    let mut session = EditorSession::new();
    session.load_css(":root { --brand: #336699; --gap: 12px; }");

    // Pick the middle list item; synthesis disambiguates with a position.
    let synthesis = session.pick_element(&element);
    println!("picked: {} (unique: {})", synthesis.selector, synthesis.unique);

    let selector = synthesis.selector;
    session.set_property(&selector, "color", "#222222");
    session.bind_variable(&selector, "color", "--brand").unwrap();

    session.set_property(&selector, "padding", "8px");
    session.expand_spacing(&selector, SpacingGroup::Padding);
    session.set_property(&selector, "padding-left", "24px");

    session.set_property(&selector, "font-size", "14px");
    session.set_media_context(&selector, "font-size", MediaContext::Phone);

    session.add_shadow(&selector);

    println!("\n--- generated overrides ---\n{}", session.generate_css());

    // Widen the selector to every list item and regenerate.
    let mut parts = session.active_parts().clone();
    let last = parts.steps.len() - 1;
    parts.steps[last].position = PositionFilter::All;
    let matches = session.update_selector_parts(parts, &element).unwrap();
    println!("\nwidened selector matches {} elements", matches);

    println!("\n--- after widening ---\n{}", session.generate_css());
}
