//! Decomposing selector text into editable steps and back.
//!
//! The panel shows one row per step (token, combinator, position filter).
//! Parsing runs against the live tree because the position option list is
//! bounded by the sibling count at each level, and a bare `.class`/`#id`
//! token takes its tag from the element at that level. Tokens are processed
//! from the subject outward for the same reason.

use retouch_dom::ElementRef;

use super::matcher::step_matches;
use super::types::{Combinator, PositionFilter, PositionKind, Selector, SelectorStep};

/// Decompose selector text into steps, resolving sibling counts and missing
/// tags against the element the selector was synthesized for.
///
/// Parsing is lenient: unrecognized pseudo segments are carried through
/// verbatim, and a selector deeper than the element's ancestor chain keeps
/// its own text untouched. Syntax validation happens separately at the
/// query boundary.
pub fn parse_parts<E: ElementRef>(selector_text: &str, element: &E) -> Selector {
    let tokens = split_tokens(selector_text);
    if tokens.is_empty() {
        return Selector::default();
    }

    let mut steps = vec![];
    let mut level: Option<E> = Some(element.clone());

    for i in (0..tokens.len()).rev() {
        let (combinator, raw) = &tokens[i];
        let token = parse_token(raw);

        let tag = match (&token.tag, &level) {
            (Some(tag), _) => tag.clone(),
            (None, Some(at)) => at.tag_name().to_string(),
            (None, None) => String::new(),
        };

        let mut step = SelectorStep::new(tag).with_combinator(*combinator);
        step.id = token.id;
        step.classes = token.classes;
        step.extras = token.extras;
        if let Some((position, kind)) = token.position {
            step.position = position;
            step.position_kind = kind;
        }
        step.sibling_count = level
            .as_ref()
            .map(|at| at.same_tag_sibling_count())
            .unwrap_or(1);
        steps.push(step);

        if i > 0 {
            level = outer_level(level, *combinator, &tokens[i - 1].1);
        }
    }

    steps.reverse();
    Selector::new(steps)
}

/// Recompose edited steps into selector text.
pub fn rebuild(selector: &Selector) -> String {
    selector.to_string()
}

/// Move one level out, honoring the combinator that connects the levels.
fn outer_level<E: ElementRef>(
    level: Option<E>,
    combinator: Combinator,
    outer_raw: &str,
) -> Option<E> {
    let current = level?;
    match combinator {
        Combinator::Child => current.parent(),
        Combinator::Descendant => {
            // Nearest ancestor the outer token describes; the immediate
            // parent when nothing matches.
            let outer = parse_token(outer_raw);
            let mut probe = SelectorStep::new(outer.tag.unwrap_or_default());
            probe.id = outer.id;
            probe.classes = outer.classes;

            let mut cursor = current.parent();
            while let Some(ancestor) = cursor.clone() {
                if step_matches(&probe, &ancestor) {
                    return Some(ancestor);
                }
                cursor = ancestor.parent();
            }
            current.parent()
        }
    }
}

/// Split selector text into (preceding combinator, token text) pairs.
fn split_tokens(text: &str) -> Vec<(Combinator, String)> {
    let mut tokens = vec![];
    let mut pending = Combinator::Descendant;
    let mut current = String::new();
    let mut depth = 0usize;

    let flush = |tokens: &mut Vec<(Combinator, String)>,
                 current: &mut String,
                 pending: &mut Combinator| {
        if !current.is_empty() {
            tokens.push((*pending, std::mem::take(current)));
            *pending = Combinator::Descendant;
        }
    };

    for c in text.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            c if c.is_whitespace() && depth == 0 => {
                flush(&mut tokens, &mut current, &mut pending);
            }
            '>' if depth == 0 => {
                flush(&mut tokens, &mut current, &mut pending);
                pending = Combinator::Child;
            }
            _ => current.push(c),
        }
    }
    flush(&mut tokens, &mut current, &mut pending);
    tokens
}

#[derive(Debug, Default)]
struct RawToken {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    extras: Vec<String>,
    position: Option<(PositionFilter, PositionKind)>,
}

/// Parse one token: `tag`, `.class`, `#id`, and `:pseudo` segments, with
/// `:nth-of-type`/`:nth-child` lifted into the position filter.
fn parse_token(raw: &str) -> RawToken {
    let mut token = RawToken::default();
    let mut chars = raw.chars().peekable();

    let mut lead = String::new();
    while let Some(&c) = chars.peek() {
        if c == '.' || c == '#' || c == ':' {
            break;
        }
        lead.push(c);
        chars.next();
    }
    if !lead.is_empty() {
        token.tag = Some(lead);
    }

    while let Some(marker) = chars.next() {
        let mut segment = String::new();
        let mut depth = 0usize;
        while let Some(&c) = chars.peek() {
            match c {
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                '.' | '#' | ':' if depth == 0 => break,
                _ => {}
            }
            segment.push(c);
            chars.next();
        }
        match marker {
            '.' => token.classes.push(segment),
            '#' => token.id = Some(segment),
            ':' => match parse_position(&segment) {
                Some(position) => token.position = Some(position),
                None => token.extras.push(segment),
            },
            _ => {}
        }
    }

    token
}

/// Lift `nth-of-type(..)` / `nth-child(..)` into a position filter.
fn parse_position(segment: &str) -> Option<(PositionFilter, PositionKind)> {
    let (name, args) = segment.split_once('(')?;
    let args = args.strip_suffix(')')?.trim();

    let kind = match name {
        "nth-of-type" => PositionKind::OfType,
        "nth-child" => PositionKind::Child,
        _ => return None,
    };

    let filter = match args {
        "even" => PositionFilter::Even,
        "odd" => PositionFilter::Odd,
        n => PositionFilter::Nth(n.parse().ok()?),
    };
    Some((filter, kind))
}
