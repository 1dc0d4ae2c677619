//! Unique selector synthesis for a picked element.
//!
//! Synthesis never fails: the primary ancestor-walk algorithm is validated
//! by querying the document, and when the result does not resolve to
//! exactly the picked element a bounded position-exact fallback takes over.
//! If even the fallback fails validation the best-effort selector is still
//! returned; non-uniqueness under a mutating or pathological tree is a
//! documented soft condition, not an error.

use retouch_dom::ElementRef;

use super::matcher::query_all;
use super::types::{Combinator, PositionFilter, PositionKind, Selector, SelectorStep};

/// Ancestor bound for the fallback algorithm.
const FALLBACK_DEPTH: usize = 10;

/// Outcome of selector synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesis {
    /// The synthesized selector text.
    pub selector: String,
    /// Whether the selector was validated to resolve to exactly the
    /// picked element.
    pub unique: bool,
}

/// Synthesize a selector for an element.
pub fn synthesize<E: ElementRef>(element: &E) -> Synthesis {
    // An id is assumed unique; no walk needed.
    if let Some(id) = element.element_id() {
        if !id.is_empty() {
            return Synthesis {
                selector: format!("#{}", id),
                unique: true,
            };
        }
    }

    let root = element.scope_root();

    let primary = primary_selector(element);
    if resolves_uniquely(&root, &primary, element) {
        return Synthesis {
            selector: primary.to_string(),
            unique: true,
        };
    }

    tracing::debug!(
        selector = %primary,
        "primary selector not unique, using position-exact fallback"
    );

    let fallback = fallback_selector(element);
    let unique = resolves_uniquely(&root, &fallback, element);
    if !unique {
        tracing::warn!(
            selector = %fallback,
            "fallback selector did not validate; returning best effort"
        );
    }
    Synthesis {
        selector: fallback.to_string(),
        unique,
    }
}

/// Primary algorithm: one `tag[.class…]` token per ancestor level up to
/// `body`, `:nth-of-type(n)` only under same-tag sibling competition.
fn primary_selector<E: ElementRef>(element: &E) -> Selector {
    let mut steps = vec![];
    let mut current = element.clone();

    while !current.is_scope_root() {
        steps.push(level_step(&current, PositionKind::OfType));
        match current.parent() {
            Some(parent) => current = parent,
            None => break,
        }
    }

    steps.push(SelectorStep::new(current.tag_name()));
    steps.reverse();
    Selector::new(steps)
}

/// Fallback algorithm: bounded walk with `#id` short-circuit, positions
/// exact via `:nth-child(n)`. Unique within the bound, not globally.
fn fallback_selector<E: ElementRef>(element: &E) -> Selector {
    let mut steps = vec![];
    let mut current = element.clone();

    for _ in 0..FALLBACK_DEPTH {
        if let Some(id) = current.element_id() {
            if !id.is_empty() {
                steps.push(SelectorStep::id_only(id));
                break;
            }
        }
        steps.push(level_step(&current, PositionKind::Child));
        match current.parent() {
            Some(parent) if !parent.is_scope_root() => current = parent,
            _ => break,
        }
    }

    steps.reverse();
    Selector::new(steps)
}

/// Build the step describing one ancestor level.
fn level_step<E: ElementRef>(element: &E, kind: PositionKind) -> SelectorStep {
    let mut step = SelectorStep::new(element.tag_name()).with_combinator(Combinator::Child);
    for class in element.classes() {
        step.classes.push(class.clone());
    }

    let (position, competition) = match kind {
        PositionKind::OfType => (
            element.position_of_type(),
            element.same_tag_sibling_count(),
        ),
        PositionKind::Child => (element.position_in_parent(), element.siblings().len()),
    };
    step.sibling_count = element.same_tag_sibling_count();
    if competition > 1 {
        step.position = PositionFilter::Nth(position as u32);
        step.position_kind = kind;
    }
    step
}

/// True when the selector's match set is exactly the target element.
fn resolves_uniquely<E: ElementRef>(root: &E, selector: &Selector, element: &E) -> bool {
    let matched = query_all(root, selector);
    matched.len() == 1 && matched[0] == *element
}
