//! Visual styling primitives shared by all series builders.
//!
//! Colors are stored as plain RGB and only combined with an opacity when a
//! rendering adapter asks for a concrete color string.

use std::fmt;

use crate::{ChartError, Result};

// ============================================================
// COLOR
// ============================================================

/// Opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ChartError::InvalidColor(hex.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ChartError::InvalidColor(hex.to_string()))
        };
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS `rgba(...)` string. Opacity is clamped to 0.0..=1.0.
    pub fn to_rgba(self, opacity: f64) -> String {
        let alpha = if opacity.is_nan() { 1.0 } else { opacity.clamp(0.0, 1.0) };
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl serde::Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_hex().serialize(s)
    }
}

impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let value = String::deserialize(d)?;
        Color::from_hex(&value).map_err(serde::de::Error::custom)
    }
}

// ============================================================
// LINE / MARKER STYLE
// ============================================================

/// Stroke pattern of a line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dash {
    #[default]
    Solid,
    Dash,
    Dot,
}

impl Dash {
    pub fn as_str(self) -> &'static str {
        match self {
            Dash::Solid => "solid",
            Dash::Dash => "dash",
            Dash::Dot => "dot",
        }
    }
}

/// Stroke of a line series
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct LineStyle {
    pub color: Color,
    pub width: f64,
    pub dash: Dash,
    /// 0.0..=1.0
    pub opacity: f64,
}

impl LineStyle {
    pub const fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: Dash::Solid,
            opacity: 1.0,
        }
    }

    pub const fn dashed(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: Dash::Dash,
            opacity: 1.0,
        }
    }

    pub const fn dotted(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: Dash::Dot,
            opacity: 1.0,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
}

/// Glyph used by marker annotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerSymbol {
    TriangleUp,
    TriangleDown,
    Diamond,
    Circle,
}

impl MarkerSymbol {
    pub fn as_str(self) -> &'static str {
        match self {
            MarkerSymbol::TriangleUp => "triangle-up",
            MarkerSymbol::TriangleDown => "triangle-down",
            MarkerSymbol::Diamond => "diamond",
            MarkerSymbol::Circle => "circle",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip() {
        let color = Color::from_hex("#26a69a").unwrap();
        assert_eq!(color, Color::rgb(0x26, 0xa6, 0x9a));
        assert_eq!(color.to_hex(), "#26a69a");
        assert_eq!(Color::from_hex("EF5350").unwrap(), Color::rgb(0xef, 0x53, 0x50));
    }

    #[test]
    fn test_invalid_hex() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#zzzzzz").is_err());
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn test_rgba_clamps_opacity() {
        let color = Color::rgb(1, 2, 3);
        assert_eq!(color.to_rgba(0.5), "rgba(1, 2, 3, 0.5)");
        assert_eq!(color.to_rgba(3.0), "rgba(1, 2, 3, 1)");
        assert_eq!(color.to_rgba(-1.0), "rgba(1, 2, 3, 0)");
    }

    #[test]
    fn test_color_serde() {
        let color: Color = serde_json::from_str("\"#ff0000\"").unwrap();
        assert_eq!(color, Color::rgb(255, 0, 0));
        assert!(serde_json::from_str::<Color>("\"red\"").is_err());
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#ff0000\"");
    }
}
