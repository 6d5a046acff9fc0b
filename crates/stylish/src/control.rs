//! Mode and table control handle.

use std::fmt;

use crate::config::ThemeUpdate;
use crate::mode::{ColorScheme, ThemeMode};
use crate::registry::ThemeRegistry;
use crate::table::StyleTable;

/// Reads and changes the theme of one registry.
///
/// Obtained from [`ThemeRegistry::theme_control`]. Every change is visible to
/// all style factories of the same registry on their next read.
///
/// ```rust
/// use stylish::{configure_theme, ThemeConfig, ThemeMode};
///
/// let registry = configure_theme(ThemeConfig::default_colors().initial_mode(ThemeMode::Light)).unwrap();
/// let control = registry.theme_control();
///
/// control.toggle_mode();
/// assert_eq!(control.mode(), ThemeMode::Dark);
/// control.reset_mode();
/// assert_eq!(control.mode(), ThemeMode::Light);
/// ```
pub struct ThemeControl<T, S> {
    registry: ThemeRegistry<T, S>,
}

impl<T, S> ThemeControl<T, S> {
    pub(crate) fn new(registry: ThemeRegistry<T, S>) -> Self {
        Self { registry }
    }

    pub fn mode(&self) -> ThemeMode {
        self.registry.mode()
    }

    /// The scheme the active theme resolves to.
    pub fn scheme(&self) -> ColorScheme {
        self.registry.resolved_scheme()
    }

    pub fn set_mode(&self, mode: ThemeMode) {
        self.registry.set_mode(mode);
    }

    /// Returns to the configured initial mode.
    pub fn reset_mode(&self) {
        self.registry.reset_mode();
    }

    /// Moves to the next mode: light, dark, system, light.
    pub fn toggle_mode(&self) {
        self.registry.set_mode(self.registry.mode().next());
    }

    pub fn set_light_styles(&self, table: StyleTable<T>) {
        self.registry
            .update_theme_config(ThemeUpdate::new().light(table));
    }

    pub fn set_dark_styles(&self, table: StyleTable<T>) {
        self.registry
            .update_theme_config(ThemeUpdate::new().dark(table));
    }

    pub fn set_static_styles(&self, table: StyleTable<S>) {
        self.registry
            .update_theme_config(ThemeUpdate::new().static_styles(table));
    }

    pub fn registry(&self) -> &ThemeRegistry<T, S> {
        &self.registry
    }
}

impl<T, S> Clone for ThemeControl<T, S> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
        }
    }
}

impl<T, S> fmt::Debug for ThemeControl<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeControl")
            .field("mode", &self.mode())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeConfig;
    use crate::scheme::ManualScheme;
    use crate::storage::MemoryStorage;

    fn control(initial: ThemeMode) -> ThemeControl<String, String> {
        ThemeRegistry::builder(ThemeConfig::default_colors().initial_mode(initial))
            .storage(MemoryStorage::new())
            .scheme_source(ManualScheme::new(Some(ColorScheme::Dark)))
            .build()
            .unwrap()
            .theme_control()
    }

    #[test]
    fn test_toggle_cycles_modes() {
        let control = control(ThemeMode::Light);
        control.toggle_mode();
        assert_eq!(control.mode(), ThemeMode::Dark);
        control.toggle_mode();
        assert_eq!(control.mode(), ThemeMode::System);
        control.toggle_mode();
        assert_eq!(control.mode(), ThemeMode::Light);
    }

    #[test]
    fn test_scheme_follows_mode() {
        let control = control(ThemeMode::Light);
        assert_eq!(control.scheme(), ColorScheme::Light);
        control.set_mode(ThemeMode::System);
        assert_eq!(control.scheme(), ColorScheme::Dark);
    }

    #[test]
    fn test_clones_share_registry() {
        let a = control(ThemeMode::System);
        let b = a.clone();
        a.set_mode(ThemeMode::Dark);
        assert_eq!(b.mode(), ThemeMode::Dark);
        b.reset_mode();
        assert_eq!(a.mode(), ThemeMode::System);
    }

    #[test]
    fn test_table_setters_bump_version() {
        let control = control(ThemeMode::Dark);
        control.set_dark_styles(StyleTable::new().add("background", "#000000"));
        control.set_light_styles(StyleTable::new());
        control.set_static_styles(StyleTable::new());
        assert_eq!(control.registry().version(), 3);
        assert_eq!(
            control
                .registry()
                .active_theme()
                .theme_styles
                .get("background")
                .map(String::as_str),
            Some("#000000")
        );
    }
}
