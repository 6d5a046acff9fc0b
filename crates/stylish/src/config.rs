//! Theme configuration and runtime table updates.
//!
//! A [`ThemeConfig`] is either dual-theme (light and dark tables plus a
//! static table) or single-theme (static table only). Giving exactly one of
//! the two per-mode tables is rejected by
//! [`configure_theme`](crate::configure_theme).
//!
//! Configs can be built in code or loaded from YAML/JSON documents:
//!
//! ```rust
//! use stylish::{ThemeConfig, ThemeMode};
//!
//! let config: ThemeConfig<String, String> = ThemeConfig::from_yaml(r##"
//! light:
//!   background: "#FFFFFF"
//! dark:
//!   background: "#1C1C1E"
//! static:
//!   brand: dodgerblue
//! initial_mode: dark
//! "##).unwrap();
//!
//! assert_eq!(config.initial_mode, Some(ThemeMode::Dark));
//! assert!(!config.is_single_theme());
//! ```

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::mode::ThemeMode;
use crate::table::StyleTable;
use crate::theme::ThemeTables;

/// Setup-time theme configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(
    deny_unknown_fields,
    bound(deserialize = "T: Deserialize<'de>, S: Deserialize<'de>")
)]
pub struct ThemeConfig<T, S> {
    /// Table used when the resolved scheme is light.
    #[serde(default, alias = "lightThemeStyles")]
    pub light: Option<StyleTable<T>>,
    /// Table used when the resolved scheme is dark.
    #[serde(default, alias = "darkThemeStyles")]
    pub dark: Option<StyleTable<T>>,
    /// Mode-independent table.
    #[serde(default = "StyleTable::new", rename = "static", alias = "staticStyles")]
    pub static_styles: StyleTable<S>,
    /// Mode used when nothing is persisted, and by `reset_mode`.
    /// Defaults to [`ThemeMode::System`].
    #[serde(default, alias = "initialMode")]
    pub initial_mode: Option<ThemeMode>,
}

impl<T, S> ThemeConfig<T, S> {
    /// A dual-theme config.
    pub fn dual(light: StyleTable<T>, dark: StyleTable<T>, static_styles: StyleTable<S>) -> Self {
        Self {
            light: Some(light),
            dark: Some(dark),
            static_styles,
            initial_mode: None,
        }
    }

    /// A single-theme config: mode switching has no visible effect.
    ///
    /// [`initial_mode`](Self::initial_mode) is still honored here: it is
    /// what `reset_mode` restores and what gets persisted, even though every
    /// mode composes the same theme.
    pub fn single(static_styles: StyleTable<S>) -> Self {
        Self {
            light: None,
            dark: None,
            static_styles,
            initial_mode: None,
        }
    }

    pub fn light(mut self, table: StyleTable<T>) -> Self {
        self.light = Some(table);
        self
    }

    pub fn dark(mut self, table: StyleTable<T>) -> Self {
        self.dark = Some(table);
        self
    }

    pub fn static_styles(mut self, table: StyleTable<S>) -> Self {
        self.static_styles = table;
        self
    }

    pub fn initial_mode(mut self, mode: ThemeMode) -> Self {
        self.initial_mode = Some(mode);
        self
    }

    /// True when no per-mode tables are given.
    pub fn is_single_theme(&self) -> bool {
        self.light.is_none() && self.dark.is_none()
    }

    /// Checks the per-mode tables are given together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match (&self.light, &self.dark) {
            (Some(_), None) => Err(ConfigError::MissingDarkStyles),
            (None, Some(_)) => Err(ConfigError::MissingLightStyles),
            _ => Ok(()),
        }
    }

    /// Validates and splits the config into tables and the initial mode.
    pub(crate) fn into_parts(self) -> Result<(ThemeTables<T, S>, ThemeMode), ConfigError> {
        self.validate()?;
        let initial_mode = self.initial_mode.unwrap_or_default();
        let tables = match (self.light, self.dark) {
            (Some(light), Some(dark)) => ThemeTables::dual(light, dark, self.static_styles),
            _ => ThemeTables::single(self.static_styles),
        };
        Ok((tables, initial_mode))
    }
}

impl<T: DeserializeOwned, S: DeserializeOwned> ThemeConfig<T, S> {
    /// Parses a config from YAML.
    ///
    /// Only syntax and shape are checked here; pairing of the per-mode
    /// tables is checked by `configure_theme`.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            path: None,
            message: e.to_string(),
        })
    }

    /// Parses a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            path: None,
            message: e.to_string(),
        })
    }

    /// Loads a config file, picking the format from its extension
    /// (`.yaml`, `.yml` or `.json`).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> Result<Self, ConfigError> = match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml,
            Some("json") => Self::from_json,
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        parse(&content).map_err(|err| match err {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: Some(path.to_path_buf()),
                message,
            },
            other => other,
        })
    }
}

/// A partial replacement of registered tables.
///
/// Fields left as `None` keep their current table.
#[derive(Debug, Clone)]
pub struct ThemeUpdate<T, S> {
    pub light: Option<StyleTable<T>>,
    pub dark: Option<StyleTable<T>>,
    pub static_styles: Option<StyleTable<S>>,
}

impl<T, S> ThemeUpdate<T, S> {
    pub fn new() -> Self {
        Self {
            light: None,
            dark: None,
            static_styles: None,
        }
    }

    pub fn light(mut self, table: StyleTable<T>) -> Self {
        self.light = Some(table);
        self
    }

    pub fn dark(mut self, table: StyleTable<T>) -> Self {
        self.dark = Some(table);
        self
    }

    pub fn static_styles(mut self, table: StyleTable<S>) -> Self {
        self.static_styles = Some(table);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.light.is_none() && self.dark.is_none() && self.static_styles.is_none()
    }
}

impl<T, S> Default for ThemeUpdate<T, S> {
    fn default() -> Self {
        Self::new()
    }
}
