//! Built-in color palettes.
//!
//! A minimal light/dark palette (`background`, `text`, `linkText`) plus a
//! few brand colors, for apps that want a working theme before designing
//! their own.
//!
//! Values are CSS-style strings (`brand` is `dodgerblue`), so these tables
//! fit `ThemeConfig<String, String>`; terminal configs built on
//! [`ColorDef`](crate::ColorDef) need hex or ANSI names instead.

use crate::config::ThemeConfig;
use crate::table::StyleTable;

pub fn default_light_colors() -> StyleTable<String> {
    StyleTable::new()
        .add("background", "#FFFFFF")
        .add("text", "#000000")
        .add("linkText", "#0000EE")
}

pub fn default_dark_colors() -> StyleTable<String> {
    StyleTable::new()
        .add("background", "#1C1C1E")
        .add("text", "#FFFFFF")
        .add("linkText", "#ADD8E6")
}

pub fn default_static_colors() -> StyleTable<String> {
    StyleTable::new()
        .add("brand", "dodgerblue")
        .add("white", "white")
        .add("green", "#008521")
        .add("red", "#FF3B30")
        .add("gray", "#808080")
}

impl ThemeConfig<String, String> {
    /// The built-in dual-theme palette.
    pub fn default_colors() -> Self {
        ThemeConfig::dual(
            default_light_colors(),
            default_dark_colors(),
            default_static_colors(),
        )
    }
}
