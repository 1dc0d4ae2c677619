//! Spacing property groups: one general value or four side values.
//!
//! margin, padding, and border-radius are edited either as a single general
//! value or as four independent sides, never both. The two representations
//! are a tagged [`SpacingState`], so the illegal simultaneous state has no
//! encoding. Collapse is lossy: side values are discarded and the general
//! entry is left blank for the panel to refill (the generator skips blank
//! values).

use super::element_set::ElementStyleSet;

/// A property group that supports general/side expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpacingGroup {
    Margin,
    Padding,
    BorderRadius,
}

impl SpacingGroup {
    /// The general (shorthand) property name.
    pub fn general_property(&self) -> &'static str {
        match self {
            SpacingGroup::Margin => "margin",
            SpacingGroup::Padding => "padding",
            SpacingGroup::BorderRadius => "border-radius",
        }
    }

    /// The four side property names, clockwise from top / top-left.
    pub fn side_properties(&self) -> [&'static str; 4] {
        match self {
            SpacingGroup::Margin => ["margin-top", "margin-right", "margin-bottom", "margin-left"],
            SpacingGroup::Padding => [
                "padding-top",
                "padding-right",
                "padding-bottom",
                "padding-left",
            ],
            SpacingGroup::BorderRadius => [
                "border-top-left-radius",
                "border-top-right-radius",
                "border-bottom-right-radius",
                "border-bottom-left-radius",
            ],
        }
    }
}

/// The current representation of a spacing group for one selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpacingState {
    /// One general value (absent when never modified).
    Unexpanded { value: Option<String> },
    /// Four side values; blank strings for untouched sides.
    Expanded { sides: [String; 4] },
}

impl SpacingState {
    /// Read the state of a group from a style set.
    ///
    /// The group is expanded iff any side property has an entry; the
    /// mutation paths below never let sides and a general entry coexist.
    pub fn of(set: &ElementStyleSet, group: SpacingGroup) -> Self {
        let sides = group.side_properties();
        if sides.iter().any(|p| set.is_modified(p)) {
            SpacingState::Expanded {
                sides: sides.map(|p| set.get(p).unwrap_or_default().to_string()),
            }
        } else {
            SpacingState::Unexpanded {
                value: set.get(group.general_property()).map(str::to_string),
            }
        }
    }

    /// Whether the group is in the expanded representation.
    pub fn is_expanded(&self) -> bool {
        matches!(self, SpacingState::Expanded { .. })
    }
}

/// Expand a group: copy the general value into all four sides, then delete
/// the general entry. No-op when already expanded.
pub fn expand(set: &mut ElementStyleSet, group: SpacingGroup) {
    if SpacingState::of(set, group).is_expanded() {
        return;
    }
    let general = set
        .remove(group.general_property())
        .unwrap_or_default();
    for side in group.side_properties() {
        set.insert_raw(side.to_string(), general.clone());
    }
}

/// Collapse a group: delete all four side entries and leave the general
/// entry blank. Side values are not merged back. No-op when not expanded.
pub fn collapse(set: &mut ElementStyleSet, group: SpacingGroup) {
    if !SpacingState::of(set, group).is_expanded() {
        return;
    }
    for side in group.side_properties() {
        set.remove(side);
    }
    set.insert_raw(group.general_property().to_string(), String::new());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_copies_general_into_sides() {
        let mut set = ElementStyleSet::new(".a");
        set.set("margin", "8px");

        expand(&mut set, SpacingGroup::Margin);

        assert!(!set.is_modified("margin"));
        for side in SpacingGroup::Margin.side_properties() {
            assert_eq!(set.get(side), Some("8px"));
        }
        assert!(SpacingState::of(&set, SpacingGroup::Margin).is_expanded());
    }

    #[test]
    fn collapse_is_documented_lossy() {
        let mut set = ElementStyleSet::new(".a");
        set.set("margin", "8px");
        expand(&mut set, SpacingGroup::Margin);
        set.set("margin-top", "16px");

        collapse(&mut set, SpacingGroup::Margin);

        for side in SpacingGroup::Margin.side_properties() {
            assert!(!set.is_modified(side));
        }
        // The general entry comes back blank, not merged.
        assert_eq!(set.get("margin"), Some(""));
    }

    #[test]
    fn expand_then_collapse_yields_blank_general() {
        let mut set = ElementStyleSet::new(".a");
        set.set("padding", "4px");

        expand(&mut set, SpacingGroup::Padding);
        collapse(&mut set, SpacingGroup::Padding);

        assert_eq!(set.get("padding"), Some(""));
        match SpacingState::of(&set, SpacingGroup::Padding) {
            SpacingState::Unexpanded { value } => assert_eq!(value.as_deref(), Some("")),
            SpacingState::Expanded { .. } => panic!("group should be unexpanded"),
        }
    }

    #[test]
    fn representations_are_mutually_exclusive() {
        let mut set = ElementStyleSet::new(".a");
        set.set("margin", "8px");
        expand(&mut set, SpacingGroup::Margin);

        // Expanding again changes nothing; the general entry stays gone.
        expand(&mut set, SpacingGroup::Margin);
        assert!(!set.is_modified("margin"));

        collapse(&mut set, SpacingGroup::Margin);
        collapse(&mut set, SpacingGroup::Margin);
        assert!(!set.is_modified("margin-top"));
        assert!(set.is_modified("margin"));
    }

    #[test]
    fn border_radius_uses_corner_properties() {
        let mut set = ElementStyleSet::new(".a");
        set.set("border-radius", "6px");
        expand(&mut set, SpacingGroup::BorderRadius);
        assert_eq!(set.get("border-top-left-radius"), Some("6px"));
        assert_eq!(set.get("border-bottom-right-radius"), Some("6px"));
    }
}
