//! RGBA color type, hex parsing, and the palette used by maps and scouting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
/// On the wire a color travels as a CSS-style hex string (`"#1976D2"`).
///
/// # Examples
///
/// ```
/// use pitmap::draw::Color;
/// let blue: Color = "#1976D2".parse().unwrap();
/// assert_eq!(blue.to_hex(), "#1976D2");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

/// Error returned when a hex color string cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid hex color '{0}'")]
pub struct ParseColorError(pub String);

impl Color {
    /// Creates a new color from RGBA components.
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the same color with its alpha replaced.
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Formats the color as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        if channel(self.a) == 255 {
            format!(
                "#{:02X}{:02X}{:02X}",
                channel(self.r),
                channel(self.g),
                channel(self.b)
            )
        } else {
            format!(
                "#{:02X}{:02X}{:02X}{:02X}",
                channel(self.r),
                channel(self.g),
                channel(self.b),
                channel(self.a)
            )
        }
    }

    /// Parses a hex color, falling back to `fallback` (with a warning) when invalid.
    pub fn from_hex_or(hex: &str, fallback: Color) -> Color {
        hex.parse().unwrap_or_else(|err| {
            log::warn!("{err}, using {}", fallback.to_hex());
            fallback
        })
    }

    /// Chooses black or white, whichever contrasts better with this color.
    pub fn contrasting(&self) -> Color {
        let brightness = self.r * 0.299 + self.g * 0.587 + self.b * 0.114;
        if brightness > 0.5 { BLACK } else { WHITE }
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Accepts `#RGB`, `#RRGGBB` and `#RRGGBBAA` (the leading `#` is optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let digits = s.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }

        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| err());
        let nibble = |i: usize| {
            u8::from_str_radix(&digits[i..i + 1], 16)
                .map(|v| v * 17)
                .map_err(|_| err())
        };

        let (r, g, b, a) = match digits.len() {
            3 => (nibble(0)?, nibble(1)?, nibble(2)?, 255),
            6 => (byte(0)?, byte(2)?, byte(4)?, 255),
            8 => (byte(0)?, byte(2)?, byte(4)?, byte(6)?),
            _ => return Err(err()),
        };

        Ok(Color {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: a as f64 / 255.0,
        })
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ============================================================================
// Palette
// ============================================================================

/// Default stroke color for new elements (#1976D2)
pub const MAP_BLUE: Color = Color::new(25.0 / 255.0, 118.0 / 255.0, 210.0 / 255.0, 1.0);

/// Background grid stroke (#F0F0F0)
pub const GRID_GRAY: Color = Color::new(240.0 / 255.0, 240.0 / 255.0, 240.0 / 255.0, 1.0);

/// Pits nobody has visited yet (#EF4444)
pub const STATUS_RED: Color = Color::new(239.0 / 255.0, 68.0 / 255.0, 68.0 / 255.0, 1.0);

/// Scouted pits (#22C55E)
pub const STATUS_GREEN: Color = Color::new(34.0 / 255.0, 197.0 / 255.0, 94.0 / 255.0, 1.0);

/// Pits whose team was absent (#EAB308)
pub const STATUS_YELLOW: Color = Color::new(234.0 / 255.0, 179.0 / 255.0, 8.0 / 255.0, 1.0);

/// Neutral color for the cancel control (#6B7280)
pub const CANCEL_GRAY: Color = Color::new(107.0 / 255.0, 114.0 / 255.0, 128.0 / 255.0, 1.0);

pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
