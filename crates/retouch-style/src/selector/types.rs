//! Structural selector types.

use std::fmt;

/// A selector decomposed into editable steps.
///
/// Each step carries the combinator that connects it to the *previous*
/// step; the first step's combinator is not rendered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    /// Steps in document order (outermost first, subject last).
    pub steps: Vec<SelectorStep>,
}

impl Selector {
    /// Create a selector from steps.
    pub fn new(steps: Vec<SelectorStep>) -> Self {
        Self { steps }
    }

    /// The rightmost (subject) step.
    pub fn subject(&self) -> Option<&SelectorStep> {
        self.steps.last()
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the selector has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                match step.combinator {
                    Combinator::Child => write!(f, " > ")?,
                    Combinator::Descendant => write!(f, " ")?,
                }
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

/// One editable segment of a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorStep {
    /// Tag name; empty when the step is id-only (fallback synthesis).
    pub tag: String,
    /// `#id` component, if any.
    pub id: Option<String>,
    /// `.class` components in source order.
    pub classes: Vec<String>,
    /// Raw pseudo segments carried through from manual edits (e.g. "hover").
    pub extras: Vec<String>,
    /// Combinator connecting this step to the previous one.
    pub combinator: Combinator,
    /// Structural position filter.
    pub position: PositionFilter,
    /// Whether the filter counts same-tag or all element siblings.
    pub position_kind: PositionKind,
    /// Same-tag siblings at this level, counted against the live tree at
    /// parse time. Bounds the "position N" option list in the panel.
    pub sibling_count: usize,
}

impl SelectorStep {
    /// Create a step for a tag with no filters.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: vec![],
            extras: vec![],
            combinator: Combinator::Child,
            position: PositionFilter::All,
            position_kind: PositionKind::OfType,
            sibling_count: 1,
        }
    }

    /// Create an id-only step (`#id`).
    pub fn id_only(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::new("")
        }
    }

    /// Add a class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set the combinator connecting to the previous step.
    pub fn with_combinator(mut self, combinator: Combinator) -> Self {
        self.combinator = combinator;
        self
    }

    /// Set the position filter.
    pub fn with_position(mut self, position: PositionFilter, kind: PositionKind) -> Self {
        self.position = position;
        self.position_kind = kind;
        self
    }

    /// The token text without its position suffix (e.g. "div.a.b").
    pub fn token(&self) -> String {
        let mut out = self.tag.clone();
        if let Some(id) = &self.id {
            out.push('#');
            out.push_str(id);
        }
        for class in &self.classes {
            out.push('.');
            out.push_str(class);
        }
        for extra in &self.extras {
            out.push(':');
            out.push_str(extra);
        }
        out
    }
}

impl fmt::Display for SelectorStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())?;
        let name = match self.position_kind {
            PositionKind::OfType => "nth-of-type",
            PositionKind::Child => "nth-child",
        };
        match self.position {
            PositionFilter::All => {}
            PositionFilter::Even => write!(f, ":{}(even)", name)?,
            PositionFilter::Odd => write!(f, ":{}(odd)", name)?,
            PositionFilter::Nth(n) => write!(f, ":{}({})", name, n)?,
        }
        Ok(())
    }
}

/// Combinator between selector steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Combinator {
    /// Child combinator (`>`).
    #[default]
    Child,
    /// Descendant combinator (space).
    Descendant,
}

/// Structural position filter for a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionFilter {
    /// No filter; matches every position.
    #[default]
    All,
    /// Even positions (1-based).
    Even,
    /// Odd positions (1-based).
    Odd,
    /// One exact 1-based position.
    Nth(u32),
}

impl PositionFilter {
    /// Check a 1-based sibling position against the filter.
    pub fn matches(&self, position: usize) -> bool {
        match self {
            PositionFilter::All => true,
            PositionFilter::Even => position % 2 == 0,
            PositionFilter::Odd => position % 2 == 1,
            PositionFilter::Nth(n) => position == *n as usize,
        }
    }
}

/// Which sibling population a position filter counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionKind {
    /// `:nth-of-type`, counting same-tag siblings only.
    #[default]
    OfType,
    /// `:nth-child`, counting all element siblings.
    Child,
}
