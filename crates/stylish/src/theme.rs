//! The active theme aggregate and how it is composed.
//!
//! A [`Theme`] pairs the style table for the current color scheme with the
//! static table that never changes. It is rebuilt, never mutated, whenever
//! the mode, the OS scheme or the registered tables change.
//!
//! Consecutive aggregates are compared through their [`ThemeKey`], which is
//! derived from the inputs (resolved scheme and config version) rather than
//! from the table contents, so the comparison is O(1).

use crate::mode::ColorScheme;
use crate::table::StyleTable;

/// The resolved theme handed to style generators.
///
/// # Example
///
/// ```rust
/// use stylish::{configure_theme, StyleTable, ThemeConfig, ThemeMode};
///
/// let config: ThemeConfig<String, String> = ThemeConfig::dual(
///     StyleTable::new().add("bg", "#fff"),
///     StyleTable::new().add("bg", "#000"),
///     StyleTable::new().add("brand", "blue"),
/// )
/// .initial_mode(ThemeMode::Dark);
///
/// let registry = configure_theme(config).unwrap();
/// let theme = registry.active_theme();
/// assert_eq!(theme.theme_styles.get("bg").map(String::as_str), Some("#000"));
/// assert_eq!(theme.static_styles.get("brand").map(String::as_str), Some("blue"));
/// ```
#[derive(Debug)]
pub struct Theme<T, S> {
    /// The table for the active color scheme. Empty in single-theme mode.
    pub theme_styles: StyleTable<T>,
    /// The mode-independent table.
    pub static_styles: StyleTable<S>,
}

impl<T, S> Clone for Theme<T, S> {
    fn clone(&self) -> Self {
        Self {
            theme_styles: self.theme_styles.clone(),
            static_styles: self.static_styles.clone(),
        }
    }
}

/// Identity of a composed [`Theme`].
///
/// Two aggregates with equal keys were built from the same tables for the
/// same scheme. `scheme` is `None` in single-theme mode, where the scheme
/// has no visible effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThemeKey {
    pub scheme: Option<ColorScheme>,
    pub version: u64,
}

/// The registered tables a theme is composed from.
#[derive(Debug)]
pub struct ThemeTables<T, S> {
    /// Light and dark tables; `None` in single-theme mode.
    pub(crate) modes: Option<(StyleTable<T>, StyleTable<T>)>,
    pub(crate) static_styles: StyleTable<S>,
}

impl<T, S> ThemeTables<T, S> {
    pub fn dual(light: StyleTable<T>, dark: StyleTable<T>, static_styles: StyleTable<S>) -> Self {
        Self {
            modes: Some((light, dark)),
            static_styles,
        }
    }

    pub fn single(static_styles: StyleTable<S>) -> Self {
        Self {
            modes: None,
            static_styles,
        }
    }

    pub fn is_single_theme(&self) -> bool {
        self.modes.is_none()
    }

    pub fn light(&self) -> Option<&StyleTable<T>> {
        self.modes.as_ref().map(|(light, _)| light)
    }

    pub fn dark(&self) -> Option<&StyleTable<T>> {
        self.modes.as_ref().map(|(_, dark)| dark)
    }

    pub fn static_styles(&self) -> &StyleTable<S> {
        &self.static_styles
    }

    /// Returns the identity key of the theme these tables compose to.
    pub fn key(&self, scheme: ColorScheme, version: u64) -> ThemeKey {
        ThemeKey {
            scheme: self.modes.as_ref().map(|_| scheme),
            version,
        }
    }
}

/// Builds the theme aggregate for `scheme`.
///
/// In single-theme configurations the per-mode table is empty and the
/// scheme is ignored.
pub fn compose<T, S>(tables: &ThemeTables<T, S>, scheme: ColorScheme) -> Theme<T, S> {
    let theme_styles = match (&tables.modes, scheme) {
        (Some((light, _)), ColorScheme::Light) => light.clone(),
        (Some((_, dark)), ColorScheme::Dark) => dark.clone(),
        (None, _) => StyleTable::new(),
    };
    Theme {
        theme_styles,
        static_styles: tables.static_styles.clone(),
    }
}
