//! Multi-value box-shadow: an ordered list of structured records.

use std::fmt;

use crate::error::{Error, Result};
use crate::value::{parse_length, Length};

/// One box-shadow layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowRecord {
    pub x: Length,
    pub y: Length,
    pub blur: Length,
    pub spread: Length,
    pub color: String,
    pub inset: bool,
}

impl Default for ShadowRecord {
    fn default() -> Self {
        Self {
            x: Length::px(0.0),
            y: Length::px(2.0),
            blur: Length::px(4.0),
            spread: Length::px(0.0),
            color: "rgba(0, 0, 0, 0.25)".to_string(),
            inset: false,
        }
    }
}

impl fmt::Display for ShadowRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inset {
            write!(f, "inset ")?;
        }
        write!(
            f,
            "{} {} {} {} {}",
            self.x, self.y, self.blur, self.spread, self.color
        )
    }
}

/// An ordered list of shadow layers, never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowList {
    records: Vec<ShadowRecord>,
}

impl Default for ShadowList {
    fn default() -> Self {
        Self {
            records: vec![ShadowRecord::default()],
        }
    }
}

impl ShadowList {
    /// Parse a box-shadow value leniently.
    ///
    /// Layers are split on top-level commas; within a layer the numeric
    /// tokens map to x/y/blur/spread in order and any remaining token is
    /// the color. Unparseable input yields the default single layer.
    pub fn parse(value: &str) -> Self {
        let mut records = vec![];
        for layer in split_layers(value) {
            if let Some(record) = parse_layer(&layer) {
                records.push(record);
            }
        }
        if records.is_empty() {
            return Self::default();
        }
        Self { records }
    }

    /// The layers in order.
    pub fn records(&self) -> &[ShadowRecord] {
        &self.records
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// A shadow list is never empty; always false.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Append a default layer and return its index.
    pub fn add_default(&mut self) -> usize {
        self.records.push(ShadowRecord::default());
        self.records.len() - 1
    }

    /// Replace the layer at `index`.
    pub fn update(&mut self, index: usize, record: ShadowRecord) -> Result<()> {
        let len = self.records.len();
        let slot = self
            .records
            .get_mut(index)
            .ok_or(Error::ShadowIndexOutOfRange { index, len })?;
        *slot = record;
        Ok(())
    }

    /// Remove the layer at `index`.
    ///
    /// Returns `false` (and leaves the list untouched) when only one layer
    /// remains; the list never empties.
    pub fn remove(&mut self, index: usize) -> Result<bool> {
        let len = self.records.len();
        if index >= len {
            return Err(Error::ShadowIndexOutOfRange { index, len });
        }
        if len == 1 {
            return Ok(false);
        }
        self.records.remove(index);
        Ok(true)
    }
}

impl fmt::Display for ShadowList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, record) in self.records.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", record)?;
        }
        Ok(())
    }
}

/// Split on commas outside parentheses (rgba colors contain commas).
fn split_layers(value: &str) -> Vec<String> {
    let mut layers = vec![];
    let mut current = String::new();
    let mut depth = 0usize;
    for c in value.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => {
                layers.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    if !current.trim().is_empty() {
        layers.push(current);
    }
    layers
}

fn parse_layer(layer: &str) -> Option<ShadowRecord> {
    let tokens = split_tokens(layer);
    if tokens.is_empty() {
        return None;
    }

    let mut record = ShadowRecord {
        color: String::new(),
        ..ShadowRecord::default()
    };
    let mut lengths = vec![];

    for token in tokens {
        if token.eq_ignore_ascii_case("inset") {
            record.inset = true;
        } else if starts_numeric(&token) {
            lengths.push(parse_length(&token));
        } else {
            record.color = token;
        }
    }

    let mut lengths = lengths.into_iter();
    record.x = lengths.next().unwrap_or_else(Length::zero);
    record.y = lengths.next().unwrap_or_else(Length::zero);
    record.blur = lengths.next().unwrap_or_else(Length::zero);
    record.spread = lengths.next().unwrap_or_else(Length::zero);
    if record.color.is_empty() {
        record.color = "rgba(0, 0, 0, 0.25)".to_string();
    }
    Some(record)
}

/// Split on whitespace outside parentheses.
fn split_tokens(layer: &str) -> Vec<String> {
    let mut tokens = vec![];
    let mut current = String::new();
    let mut depth = 0usize;
    for c in layer.chars() {
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
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn starts_numeric(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '-' || c == '+' || c == '.')
}
