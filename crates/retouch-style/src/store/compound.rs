//! Compound border property: general sub-properties plus per-side sets.
//!
//! Unlike spacing groups, the general sub-properties and the per-side
//! sub-properties may coexist: activating a side layers that side's three
//! entries on top of the general ones, and removing a side clears only
//! those three entries.

use super::element_set::ElementStyleSet;

const SUB_PARTS: [&str; 3] = ["width", "style", "color"];

/// One side of the border compound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl BorderSide {
    /// All sides, clockwise from top.
    pub const ALL: [BorderSide; 4] = [
        BorderSide::Top,
        BorderSide::Right,
        BorderSide::Bottom,
        BorderSide::Left,
    ];

    fn name(&self) -> &'static str {
        match self {
            BorderSide::Top => "top",
            BorderSide::Right => "right",
            BorderSide::Bottom => "bottom",
            BorderSide::Left => "left",
        }
    }

    /// The side's sub-property names (`border-top-width`, ...).
    pub fn properties(&self) -> [String; 3] {
        SUB_PARTS.map(|part| format!("border-{}-{}", self.name(), part))
    }
}

/// The general sub-property names (`border-width`, ...).
pub fn general_properties() -> [String; 3] {
    SUB_PARTS.map(|part| format!("border-{}", part))
}

/// Activate a side: seed its three sub-properties from the general values
/// where present, built-in defaults otherwise. General entries are left
/// untouched. No-op when the side is already active.
pub fn activate_side(set: &mut ElementStyleSet, side: BorderSide) {
    if side_active(set, side) {
        return;
    }
    for (part, property) in SUB_PARTS.iter().zip(side.properties()) {
        let general = format!("border-{}", part);
        let value = match set.get(&general) {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => default_for(part).to_string(),
        };
        set.insert_raw(property, value);
    }
}

/// Remove a side: clear only that side's sub-properties.
pub fn remove_side(set: &mut ElementStyleSet, side: BorderSide) {
    for property in side.properties() {
        set.remove(&property);
    }
}

/// Whether any of the side's sub-properties is set.
pub fn side_active(set: &ElementStyleSet, side: BorderSide) -> bool {
    side.properties().iter().any(|p| set.is_modified(p))
}

fn default_for(part: &str) -> &'static str {
    match part {
        "width" => "1px",
        "style" => "solid",
        _ => "#000000",
    }
}
