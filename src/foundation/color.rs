use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::foundation::{
    core::Rgba8,
    error::{GraphfoldError, GraphfoldResult},
};

/// A validated `#RRGGBB` / `#RRGGBBAA` color that remembers its text form.
///
/// The text is normalized to lowercase with a leading `#`, so two spellings of the same
/// color compare equal and serialize identically.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HexColor {
    text: String,
    rgba: Rgba8,
}

impl HexColor {
    /// The color given to every node outside the highlighted set.
    pub const DEFAULT_TEXT: &'static str = "#000000";

    pub fn parse(s: &str) -> GraphfoldResult<Self> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let rgba = parse_hex_digits(digits).map_err(GraphfoldError::validation)?;
        Ok(Self {
            text: format!("#{}", digits.to_ascii_lowercase()),
            rgba,
        })
    }

    pub fn default_node() -> Self {
        Self::from_rgba8(Rgba8::BLACK)
    }

    pub fn from_rgba8(rgba: Rgba8) -> Self {
        let text = if rgba.a == 255 {
            format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b, rgba.a)
        };
        Self { text, rgba }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn rgba(&self) -> Rgba8 {
        self.rgba
    }
}

fn parse_hex_digits(s: &str) -> Result<Rgba8, String> {
    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !s.is_ascii() {
        return Err(format!("hex color \"#{s}\" contains non-ascii characters"));
    }

    match s.len() {
        6 => Ok(Rgba8 {
            r: hex_byte(&s[0..2])?,
            g: hex_byte(&s[2..4])?,
            b: hex_byte(&s[4..6])?,
            a: 255,
        }),
        8 => Ok(Rgba8 {
            r: hex_byte(&s[0..2])?,
            g: hex_byte(&s[2..4])?,
            b: hex_byte(&s[4..6])?,
            a: hex_byte(&s[6..8])?,
        }),
        _ => Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
    }
}

impl FromStr for HexColor {
    type Err = GraphfoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for HexColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Parse an ordered palette, rejecting empty lists and malformed entries.
pub fn parse_palette<S: AsRef<str>>(entries: &[S]) -> GraphfoldResult<Vec<HexColor>> {
    if entries.is_empty() {
        return Err(GraphfoldError::validation("palette must not be empty"));
    }
    entries.iter().map(|e| HexColor::parse(e.as_ref())).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
