//! Query engine over element handles.
//!
//! Matching walks the candidate subtree and checks each element against the
//! selector right-to-left, the subject step first and ancestor steps after,
//! following each step's combinator. The engine serves synthesis validation
//! and the advisory match counts shown while refining a selector.

use retouch_dom::ElementRef;

use super::types::{PositionKind, Selector, SelectorStep};

/// Collect every element under `root` (inclusive) matching the selector.
pub fn query_all<E: ElementRef>(root: &E, selector: &Selector) -> Vec<E> {
    let mut out = vec![];
    collect(root, selector, &mut out);
    out
}

/// Number of elements under `root` matching the selector.
pub fn match_count<E: ElementRef>(root: &E, selector: &Selector) -> usize {
    query_all(root, selector).len()
}

fn collect<E: ElementRef>(element: &E, selector: &Selector, out: &mut Vec<E>) {
    if matches(element, selector) {
        out.push(element.clone());
    }
    for child in element.children() {
        collect(&child, selector, out);
    }
}

/// Check whether an element matches the full selector.
pub fn matches<E: ElementRef>(element: &E, selector: &Selector) -> bool {
    let Some(subject) = selector.subject() else {
        return false;
    };
    if !step_matches(subject, element) {
        return false;
    }

    // Walk ancestor steps right-to-left. Descendant hops are greedy: the
    // nearest matching ancestor is taken without backtracking.
    let mut current = element.clone();
    for i in (1..selector.steps.len()).rev() {
        let step = &selector.steps[i - 1];
        let combinator = selector.steps[i].combinator;

        match combinator {
            super::types::Combinator::Child => {
                let Some(parent) = current.parent() else {
                    return false;
                };
                if !step_matches(step, &parent) {
                    return false;
                }
                current = parent;
            }
            super::types::Combinator::Descendant => {
                let mut found = None;
                let mut cursor = current.parent();
                while let Some(ancestor) = cursor {
                    if step_matches(step, &ancestor) {
                        found = Some(ancestor);
                        break;
                    }
                    cursor = ancestor.parent();
                }
                match found {
                    Some(ancestor) => current = ancestor,
                    None => return false,
                }
            }
        }
    }

    true
}

/// Check a single step against an element, ignoring combinators.
pub fn step_matches<E: ElementRef>(step: &SelectorStep, element: &E) -> bool {
    if !step.tag.is_empty() && step.tag != "*" && step.tag != element.tag_name() {
        return false;
    }

    if let Some(id) = &step.id {
        match element.element_id() {
            Some(element_id) if element_id == id => {}
            _ => return false,
        }
    }

    for class in &step.classes {
        if !element.classes().iter().any(|c| c == class) {
            return false;
        }
    }

    let position = match step.position_kind {
        PositionKind::OfType => element.position_of_type(),
        PositionKind::Child => element.position_in_parent(),
    };
    step.position.matches(position)
}
