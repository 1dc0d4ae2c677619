//! Lenient parsing for panel-entered scalar values.
//!
//! The panel never rejects an edit: unparseable sizes and numbers fall back
//! to a zero-equivalent, unknown colors to transparent. The parsed forms
//! feed steppers and color wells; the stored override keeps the raw string.

use std::fmt;

/// Units accepted for length values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthUnit {
    /// Absolute pixels.
    #[default]
    Px,
    /// Relative to the element font size.
    Em,
    /// Relative to the root font size.
    Rem,
    /// Percentage of the containing block.
    Percent,
    /// Viewport width fraction.
    Vw,
    /// Viewport height fraction.
    Vh,
}

impl LengthUnit {
    fn suffix(&self) -> &'static str {
        match self {
            LengthUnit::Px => "px",
            LengthUnit::Em => "em",
            LengthUnit::Rem => "rem",
            LengthUnit::Percent => "%",
            LengthUnit::Vw => "vw",
            LengthUnit::Vh => "vh",
        }
    }

    fn from_suffix(s: &str) -> Option<Self> {
        match s {
            "px" | "" => Some(LengthUnit::Px),
            "em" => Some(LengthUnit::Em),
            "rem" => Some(LengthUnit::Rem),
            "%" => Some(LengthUnit::Percent),
            "vw" => Some(LengthUnit::Vw),
            "vh" => Some(LengthUnit::Vh),
            _ => None,
        }
    }
}

/// A size value with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Length {
    pub value: f32,
    pub unit: LengthUnit,
}

impl Length {
    /// Pixel length.
    pub fn px(value: f32) -> Self {
        Self {
            value,
            unit: LengthUnit::Px,
        }
    }

    /// The zero-equivalent fallback.
    pub fn zero() -> Self {
        Self::px(0.0)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value == self.value.trunc() {
            write!(f, "{}{}", self.value as i64, self.unit.suffix())
        } else {
            write!(f, "{}{}", self.value, self.unit.suffix())
        }
    }
}

/// Parse a length, falling back to `0px` on anything unparseable.
pub fn parse_length(input: &str) -> Length {
    let input = input.trim();
    let split = input
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit() && *c != '.' && *c != '-' && *c != '+')
        .map(|(i, _)| i)
        .unwrap_or(input.len());

    let (number, suffix) = input.split_at(split);
    match (number.parse::<f32>(), LengthUnit::from_suffix(suffix.trim())) {
        (Ok(value), Some(unit)) => Length { value, unit },
        _ => Length::zero(),
    }
}

/// Parse a bare number, falling back to zero.
pub fn parse_number(input: &str) -> f32 {
    input.trim().parse().unwrap_or(0.0)
}

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Opaque color from components.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// The zero-equivalent fallback (fully transparent black).
    pub fn transparent() -> Self {
        Self::default()
    }

    /// Hex form, `#RRGGBB` or `#RRGGBBAA` when translucent.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Parse a color, falling back to transparent on anything unparseable.
///
/// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`, `rgba()`, and
/// a handful of common keywords.
pub fn parse_color(input: &str) -> Rgba {
    let input = input.trim();

    if let Some(hex) = input.strip_prefix('#') {
        return parse_hex(hex).unwrap_or_else(Rgba::transparent);
    }

    let lower = input.to_ascii_lowercase();
    if lower.starts_with("rgb(") || lower.starts_with("rgba(") {
        return parse_rgb_function(&lower).unwrap_or_else(Rgba::transparent);
    }

    match lower.as_str() {
        "transparent" => Rgba::transparent(),
        "black" => Rgba::rgb(0, 0, 0),
        "white" => Rgba::rgb(255, 255, 255),
        "red" => Rgba::rgb(255, 0, 0),
        "green" => Rgba::rgb(0, 128, 0),
        "blue" => Rgba::rgb(0, 0, 255),
        "gray" | "grey" => Rgba::rgb(128, 128, 128),
        _ => Rgba::transparent(),
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    let expand = |c: u8| (c << 4) | c;
    let nibble = |c: char| c.to_digit(16).map(|d| d as u8);

    let digits: Vec<u8> = hex.chars().map(nibble).collect::<Option<_>>()?;
    match digits.len() {
        3 => Some(Rgba {
            r: expand(digits[0]),
            g: expand(digits[1]),
            b: expand(digits[2]),
            a: 255,
        }),
        4 => Some(Rgba {
            r: expand(digits[0]),
            g: expand(digits[1]),
            b: expand(digits[2]),
            a: expand(digits[3]),
        }),
        6 => Some(Rgba {
            r: (digits[0] << 4) | digits[1],
            g: (digits[2] << 4) | digits[3],
            b: (digits[4] << 4) | digits[5],
            a: 255,
        }),
        8 => Some(Rgba {
            r: (digits[0] << 4) | digits[1],
            g: (digits[2] << 4) | digits[3],
            b: (digits[4] << 4) | digits[5],
            a: (digits[6] << 4) | digits[7],
        }),
        _ => None,
    }
}

fn parse_rgb_function(input: &str) -> Option<Rgba> {
    let inner = input.split_once('(')?.1.strip_suffix(')')?;
    let parts: Vec<&str> = inner
        .split(|c| c == ',' || c == '/')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .flat_map(|p| p.split_whitespace())
        .collect();
    if parts.len() < 3 {
        return None;
    }

    let channel = |s: &str| -> Option<u8> {
        if let Some(pct) = s.strip_suffix('%') {
            let v: f32 = pct.parse().ok()?;
            Some((v / 100.0 * 255.0).round().clamp(0.0, 255.0) as u8)
        } else {
            let v: f32 = s.parse().ok()?;
            Some(v.round().clamp(0.0, 255.0) as u8)
        }
    };

    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;
    let a = match parts.get(3) {
        Some(alpha) => {
            if let Some(pct) = alpha.strip_suffix('%') {
                let v: f32 = pct.parse().ok()?;
                (v / 100.0 * 255.0).round().clamp(0.0, 255.0) as u8
            } else {
                let v: f32 = alpha.parse().ok()?;
                (v * 255.0).round().clamp(0.0, 255.0) as u8
            }
        }
        None => 255,
    };
    Some(Rgba { r, g, b, a })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_parsing() {
        assert_eq!(parse_length("12px"), Length::px(12.0));
        assert_eq!(
            parse_length("1.5em"),
            Length {
                value: 1.5,
                unit: LengthUnit::Em
            }
        );
        assert_eq!(
            parse_length("50%"),
            Length {
                value: 50.0,
                unit: LengthUnit::Percent
            }
        );
        assert_eq!(parse_length("17"), Length::px(17.0));
    }

    #[test]
    fn unparseable_length_falls_back_to_zero() {
        assert_eq!(parse_length("auto"), Length::zero());
        assert_eq!(parse_length("12banana"), Length::zero());
        assert_eq!(parse_length(""), Length::zero());
    }

    #[test]
    fn length_display() {
        assert_eq!(parse_length("12px").to_string(), "12px");
        assert_eq!(parse_length("1.5em").to_string(), "1.5em");
        assert_eq!(parse_length("50%").to_string(), "50%");
    }

    #[test]
    fn number_fallback() {
        assert_eq!(parse_number("2.5"), 2.5);
        assert_eq!(parse_number("bogus"), 0.0);
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_color("#336699"), Rgba::rgb(0x33, 0x66, 0x99));
        assert_eq!(parse_color("#fff"), Rgba::rgb(255, 255, 255));
        assert_eq!(parse_color("#00000080").a, 0x80);
    }

    #[test]
    fn rgb_function_colors() {
        assert_eq!(parse_color("rgb(255, 0, 0)"), Rgba::rgb(255, 0, 0));
        let c = parse_color("rgba(0, 0, 0, 0.5)");
        assert_eq!(c.a, 128);
    }

    #[test]
    fn unparseable_color_falls_back_to_transparent() {
        assert_eq!(parse_color("chartreuse-ish"), Rgba::transparent());
        assert_eq!(parse_color("#xyz"), Rgba::transparent());
    }

    #[test]
    fn color_hex_round_trip() {
        assert_eq!(parse_color("#336699").to_hex(), "#336699");
        assert_eq!(parse_color("rgba(0,0,0,0.5)").to_hex(), "#00000080");
    }
}
