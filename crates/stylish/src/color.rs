//! Color values for terminal style declarations.
//!
//! Supported formats:
//!
//! - Named colors: `red`, `green`, `blue`, etc. (8 ANSI colors, `gray`/`grey`)
//! - Bright variants: `bright_red`, `bright_green`, etc.
//! - 256-color palette: `0` through `255`
//! - RGB hex: `"#ff6b35"` or `"#fff"`
//! - RGB tuple: `[255, 107, 53]`
//!
//! ```rust
//! use stylish::ColorDef;
//!
//! assert_eq!(ColorDef::parse_string("#fff").unwrap(), ColorDef::Rgb(255, 255, 255));
//! assert!(ColorDef::parse_string("bright_cyan").is_ok());
//! ```

use console::Color;
use serde::de::{self, Deserializer};
use serde::Deserialize;

/// A parsed color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorDef {
    /// Named ANSI color.
    Named(Color),
    /// 256-color palette index.
    Color256(u8),
    /// True color RGB, downsampled to the 256-color palette on output.
    Rgb(u8, u8, u8),
}

impl ColorDef {
    /// Parses a color from a string value.
    pub fn parse_string(s: &str) -> Result<Self, String> {
        let s = s.trim();

        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        if let Ok(index) = s.parse::<u8>() {
            return Ok(ColorDef::Color256(index));
        }

        Self::parse_named(s)
    }

    fn parse_hex(hex: &str) -> Result<Self, String> {
        if !hex.is_ascii() {
            return Err(format!("Invalid hex: #{}", hex));
        }
        let channel = |digits: &str| {
            u8::from_str_radix(digits, 16).map_err(|_| format!("Invalid hex: #{}", hex))
        };
        match hex.len() {
            3 => Ok(ColorDef::Rgb(
                channel(&hex[0..1])? * 17,
                channel(&hex[1..2])? * 17,
                channel(&hex[2..3])? * 17,
            )),
            6 => Ok(ColorDef::Rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(format!(
                "Invalid hex color: #{} (must be 3 or 6 digits)",
                hex
            )),
        }
    }

    fn parse_named(name: &str) -> Result<Self, String> {
        let name_lower = name.to_lowercase();

        if let Some(base) = name_lower.strip_prefix("bright_") {
            let index = match base {
                "black" => 8,
                "red" => 9,
                "green" => 10,
                "yellow" => 11,
                "blue" => 12,
                "magenta" => 13,
                "cyan" => 14,
                "white" => 15,
                _ => return Err(format!("Unknown bright color: {}", name)),
            };
            return Ok(ColorDef::Color256(index));
        }

        let color = match name_lower.as_str() {
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" | "gray" | "grey" => Color::White,
            _ => return Err(format!("Unknown color name: {}", name)),
        };

        Ok(ColorDef::Named(color))
    }

    /// Converts this color to a `console::Color`.
    pub fn to_console_color(&self) -> Color {
        match self {
            ColorDef::Named(c) => *c,
            ColorDef::Color256(n) => Color::Color256(*n),
            ColorDef::Rgb(r, g, b) => Color::Color256(rgb_to_ansi256((*r, *g, *b))),
        }
    }
}

impl<'de> Deserialize<'de> for ColorDef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Index(u64),
            Rgb(Vec<u64>),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(s) => ColorDef::parse_string(&s).map_err(de::Error::custom),
            Raw::Index(n) => u8::try_from(n).map(ColorDef::Color256).map_err(|_| {
                de::Error::custom(format!(
                    "Color palette index {} out of range (0-255)",
                    n
                ))
            }),
            Raw::Rgb(parts) => {
                let [r, g, b] = parts[..] else {
                    return Err(de::Error::custom(format!(
                        "RGB tuple must have exactly 3 values, got {}",
                        parts.len()
                    )));
                };
                let component = |n: u64| -> Result<u8, D::Error> {
                    u8::try_from(n).map_err(|_| {
                        de::Error::custom(format!("RGB component out of range (0-255): {}", n))
                    })
                };
                Ok(ColorDef::Rgb(component(r)?, component(g)?, component(b)?))
            }
        }
    }
}

/// Converts an RGB triplet to the nearest ANSI 256-color palette index.
///
/// ```rust
/// use stylish::rgb_to_ansi256;
///
/// assert_eq!(rgb_to_ansi256((255, 0, 0)), 196);
/// ```
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let red = (r as u16 * 5 / 255) as u8;
        let green = (g as u16 * 5 / 255) as u8;
        let blue = (b as u16 * 5 / 255) as u8;
        16 + 36 * red + 6 * green + blue
    }
}
