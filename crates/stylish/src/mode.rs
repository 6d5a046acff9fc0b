//! Theme mode preference and its resolution to a concrete color scheme.
//!
//! A [`ThemeMode`] is what the user picked (`light`, `dark` or `system`).
//! A [`ColorScheme`] is what actually gets drawn. The two meet in
//! [`ThemeMode::resolve`], which consults the OS-reported scheme only when
//! the mode is [`ThemeMode::System`].
//!
//! ```rust
//! use stylish::{ColorScheme, ThemeMode};
//!
//! assert_eq!(ThemeMode::Dark.resolve(None), ColorScheme::Dark);
//! assert_eq!(ThemeMode::System.resolve(Some(ColorScheme::Dark)), ColorScheme::Dark);
//! assert_eq!(ThemeMode::System.resolve(None), ColorScheme::Light);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The user's theme preference, as persisted across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Always use the light style table.
    Light,
    /// Always use the dark style table.
    Dark,
    /// Follow the operating system's color scheme.
    #[default]
    System,
}

/// A concrete color scheme, as drawn on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    Dark,
}

impl ThemeMode {
    /// All modes, in the order a mode picker would list them.
    pub const ALL: [ThemeMode; 3] = [ThemeMode::Light, ThemeMode::Dark, ThemeMode::System];

    /// Resolves this mode against the scheme reported by the OS.
    ///
    /// An unknown OS scheme (`None`) counts as light.
    pub fn resolve(self, scheme: Option<ColorScheme>) -> ColorScheme {
        match self {
            ThemeMode::Light => ColorScheme::Light,
            ThemeMode::Dark => ColorScheme::Dark,
            ThemeMode::System => match scheme {
                Some(ColorScheme::Dark) => ColorScheme::Dark,
                _ => ColorScheme::Light,
            },
        }
    }

    /// Returns the lowercase name used for persistence and display.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    /// Decodes a persisted mode value.
    ///
    /// Accepts the JSON form written by the storage layer (`"\"dark\""`) as
    /// well as a bare name (`dark`). Anything else yields `None`.
    pub fn parse_stored(raw: &str) -> Option<ThemeMode> {
        let raw = raw.trim();
        if let Ok(mode) = serde_json::from_str::<ThemeMode>(raw) {
            return Some(mode);
        }
        raw.parse().ok()
    }

    /// Cycles light → dark → system → light.
    pub fn next(self) -> ThemeMode {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::System,
            ThemeMode::System => ThemeMode::Light,
        }
    }
}

/// Resolves a possibly missing mode, falling back to light.
///
/// This is the total form of [`ThemeMode::resolve`]: an unset or corrupted
/// mode never prevents a theme from being picked.
pub fn resolve_scheme(mode: Option<ThemeMode>, scheme: Option<ColorScheme>) -> ColorScheme {
    match mode {
        Some(mode) => mode.resolve(scheme),
        None => ColorScheme::Light,
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a valid [`ThemeMode`] name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme mode '{0}' (expected light, dark or system)")]
pub struct ParseModeError(pub String);

impl FromStr for ThemeMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "system" | "auto" => Ok(ThemeMode::System),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

impl ColorScheme {
    pub fn is_dark(self) -> bool {
        self == ColorScheme::Dark
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorScheme::Light => f.write_str("light"),
            ColorScheme::Dark => f.write_str("dark"),
        }
    }
}
