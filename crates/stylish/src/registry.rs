//! The theme registry: configuration entry point and shared theme state.
//!
//! [`configure_theme`] validates a [`ThemeConfig`] and returns a
//! [`ThemeRegistry`] that owns everything the rest of the crate reads:
//!
//! - the light, dark and static style tables
//! - the selected [`ThemeMode`], seeded from storage
//! - a version counter bumped by every table update
//! - the storage and OS-scheme collaborators
//!
//! Each call yields an independent registry. Clones of a registry share
//! state, which is how style factories and theme controls stay in sync.
//!
//! # Example
//!
//! ```rust
//! use stylish::{configure_theme, NamedStyles, StyleTable, ThemeConfig, ThemeMode};
//!
//! let registry = configure_theme(
//!     ThemeConfig::<String, String>::dual(
//!         StyleTable::new().add("bg", "#fff"),
//!         StyleTable::new().add("bg", "#000"),
//!         StyleTable::new().add("brand", "blue"),
//!     )
//!     .initial_mode(ThemeMode::Light),
//! )
//! .unwrap();
//!
//! let use_styles = registry.create_themed_styles(|theme, _: &()| {
//!     NamedStyles::new().add("box", theme.theme_styles.get("bg").cloned().unwrap_or_default())
//! });
//!
//! assert_eq!(use_styles.use_default_styles().styles["box"], "#fff");
//!
//! registry.theme_control().set_mode(ThemeMode::Dark);
//! assert_eq!(use_styles.use_default_styles().styles["box"], "#000");
//! ```

use std::cell::RefCell;
use std::convert::Infallible;
use std::fmt;
use std::rc::Rc;

use crate::cell::{Observable, SubscriptionId};
use crate::config::{ThemeConfig, ThemeUpdate};
use crate::control::ThemeControl;
use crate::engine::{Passthrough, StyleEngine};
use crate::error::{ConfigError, StorageError};
use crate::mode::{ColorScheme, ThemeMode};
use crate::scheme::{OsScheme, SchemeSource};
use crate::storage::{MemoryStorage, ModeStorage, DEFAULT_STORAGE_KEY};
use crate::styled::StyledFactory;
use crate::table::NamedStyles;
use crate::theme::{compose, Theme, ThemeKey, ThemeTables};

/// Validates `config` and builds a registry with in-memory mode storage and
/// OS color scheme detection.
///
/// Use [`ThemeRegistry::builder`] to plug in other collaborators.
///
/// # Errors
///
/// Returns [`ConfigError::MissingDarkStyles`] or
/// [`ConfigError::MissingLightStyles`] when only one per-mode table is given.
pub fn configure_theme<T, S>(config: ThemeConfig<T, S>) -> Result<ThemeRegistry<T, S>, ConfigError> {
    ThemeRegistry::builder(config).build()
}

struct Shared<T, S> {
    tables: RefCell<ThemeTables<T, S>>,
    mode: Observable<ThemeMode>,
    version: Observable<u64>,
    initial_mode: ThemeMode,
    storage: Box<dyn ModeStorage>,
    storage_key: String,
    scheme: Box<dyn SchemeSource>,
}

/// Shared theme state. Cheap to clone; clones see the same state.
pub struct ThemeRegistry<T, S> {
    shared: Rc<Shared<T, S>>,
}

impl<T, S> ThemeRegistry<T, S> {
    /// Starts building a registry from `config`.
    pub fn builder(config: ThemeConfig<T, S>) -> ThemeRegistryBuilder<T, S> {
        ThemeRegistryBuilder {
            config,
            storage: None,
            scheme: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    /// The currently selected mode.
    pub fn mode(&self) -> ThemeMode {
        self.shared.mode.get()
    }

    /// The mode `reset_mode` returns to.
    pub fn initial_mode(&self) -> ThemeMode {
        self.shared.initial_mode
    }

    /// Selects `mode` and persists it.
    ///
    /// Storage failures are logged and otherwise ignored.
    pub fn set_mode(&self, mode: ThemeMode) {
        let previous = self.shared.mode.get();
        if let Err(err) = self.persist_mode(mode) {
            tracing::warn!(%mode, error = %err, "failed to persist theme mode");
        }
        if self.shared.mode.set(mode) {
            tracing::info!(from = %previous, to = %mode, "theme mode changed");
        }
    }

    /// Restores the configured initial mode.
    pub fn reset_mode(&self) {
        self.set_mode(self.shared.initial_mode);
    }

    fn persist_mode(&self, mode: ThemeMode) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(&mode)?;
        self.shared.storage.set(&self.shared.storage_key, &encoded)
    }

    /// The scheme currently reported by the OS, `None` if unknown.
    pub fn os_scheme(&self) -> Option<ColorScheme> {
        self.shared.scheme.query()
    }

    /// The concrete scheme the active theme is built for.
    pub fn resolved_scheme(&self) -> ColorScheme {
        self.mode().resolve(self.os_scheme())
    }

    /// True when the registry was configured with static styles only.
    pub fn is_single_theme(&self) -> bool {
        self.shared.tables.borrow().is_single_theme()
    }

    /// Number of table updates applied so far.
    pub fn version(&self) -> u64 {
        self.shared.version.get()
    }

    /// The identity key of the theme [`active_theme`](Self::active_theme)
    /// would return right now.
    pub fn theme_key(&self) -> ThemeKey {
        self.snapshot().0
    }

    /// Builds the active theme aggregate.
    pub fn active_theme(&self) -> Theme<T, S> {
        self.snapshot().1
    }

    /// Returns the active theme together with its key, read in one go.
    pub(crate) fn snapshot(&self) -> (ThemeKey, Theme<T, S>) {
        let scheme = self.resolved_scheme();
        let version = self.shared.version.get();
        let tables = self.shared.tables.borrow();
        (tables.key(scheme, version), compose(&tables, scheme))
    }

    /// Replaces any subset of the registered tables.
    ///
    /// Every style factory built from this registry recomputes its styles on
    /// the next read. In single-theme mode, per-mode tables in the update are
    /// ignored.
    pub fn update_theme_config(&self, update: ThemeUpdate<T, S>) {
        if update.is_empty() {
            return;
        }
        {
            let mut tables = self.shared.tables.borrow_mut();
            match (&mut tables.modes, update.light, update.dark) {
                (Some((light, dark)), new_light, new_dark) => {
                    if let Some(table) = new_light {
                        *light = table;
                    }
                    if let Some(table) = new_dark {
                        *dark = table;
                    }
                }
                (None, None, None) => {}
                (None, _, _) => {
                    tracing::warn!(
                        "ignoring light/dark styles update: registry is configured for a single theme"
                    );
                }
            }
            if let Some(table) = update.static_styles {
                tables.static_styles = table;
            }
        }
        self.shared.version.update(|v| v + 1);
        tracing::debug!(version = self.version(), "theme tables updated");
    }

    /// Calls `listener` after every mode change.
    pub fn subscribe_mode(&self, listener: impl Fn(&ThemeMode) + 'static) -> SubscriptionId {
        self.shared.mode.subscribe(listener)
    }

    pub fn unsubscribe_mode(&self, id: SubscriptionId) -> bool {
        self.shared.mode.unsubscribe(id)
    }

    /// Calls `listener` after every table update, with the new version.
    pub fn subscribe_version(&self, listener: impl Fn(&u64) + 'static) -> SubscriptionId {
        self.shared.version.subscribe(listener)
    }

    pub fn unsubscribe_version(&self, id: SubscriptionId) -> bool {
        self.shared.version.unsubscribe(id)
    }

    /// Returns the mode control handle for this registry.
    pub fn theme_control(&self) -> ThemeControl<T, S> {
        ThemeControl::new(self.clone())
    }
}

impl<T: 'static, S: 'static> ThemeRegistry<T, S> {
    /// Creates a style factory from an infallible generator.
    ///
    /// The generator's [`NamedStyles`] are returned as-is; use
    /// [`create_themed_styles_with`](Self::create_themed_styles_with) to run
    /// them through a [`StyleEngine`].
    pub fn create_themed_styles<P, D, F>(
        &self,
        generator: F,
    ) -> StyledFactory<T, S, P, NamedStyles<D>, Infallible>
    where
        P: PartialEq + 'static,
        D: 'static,
        F: Fn(&Theme<T, S>, &P) -> NamedStyles<D> + 'static,
    {
        self.create_themed_styles_with(Passthrough, generator)
    }

    /// Creates a style factory whose generator output is realized by `engine`.
    pub fn create_themed_styles_with<P, D, G, F>(
        &self,
        engine: G,
        generator: F,
    ) -> StyledFactory<T, S, P, G::Output, Infallible>
    where
        P: PartialEq + 'static,
        D: 'static,
        G: StyleEngine<D> + 'static,
        G::Output: 'static,
        F: Fn(&Theme<T, S>, &P) -> NamedStyles<D> + 'static,
    {
        StyledFactory::new(
            self.clone(),
            Rc::new(move |theme: &Theme<T, S>, props: &P| Ok(engine.create(generator(theme, props)))),
        )
    }

    /// Creates a style factory from a fallible generator.
    ///
    /// Errors returned by the generator reach the caller of
    /// [`StyledFactory::try_use_styles`] unchanged.
    pub fn try_create_themed_styles<P, D, E, F>(
        &self,
        generator: F,
    ) -> StyledFactory<T, S, P, NamedStyles<D>, E>
    where
        P: PartialEq + 'static,
        D: 'static,
        E: 'static,
        F: Fn(&Theme<T, S>, &P) -> Result<NamedStyles<D>, E> + 'static,
    {
        self.try_create_themed_styles_with(Passthrough, generator)
    }

    /// Fallible counterpart of
    /// [`create_themed_styles_with`](Self::create_themed_styles_with).
    pub fn try_create_themed_styles_with<P, D, E, G, F>(
        &self,
        engine: G,
        generator: F,
    ) -> StyledFactory<T, S, P, G::Output, E>
    where
        P: PartialEq + 'static,
        D: 'static,
        E: 'static,
        G: StyleEngine<D> + 'static,
        G::Output: 'static,
        F: Fn(&Theme<T, S>, &P) -> Result<NamedStyles<D>, E> + 'static,
    {
        StyledFactory::new(
            self.clone(),
            Rc::new(move |theme: &Theme<T, S>, props: &P| {
                generator(theme, props).map(|styles| engine.create(styles))
            }),
        )
    }
}

impl<T, S> Clone for ThemeRegistry<T, S> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T, S> fmt::Debug for ThemeRegistry<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeRegistry")
            .field("mode", &self.mode())
            .field("initial_mode", &self.shared.initial_mode)
            .field("single_theme", &self.is_single_theme())
            .field("version", &self.version())
            .field("storage_key", &self.shared.storage_key)
            .finish()
    }
}

/// Builder for [`ThemeRegistry`].
///
/// ```rust
/// use stylish::{ColorScheme, MemoryStorage, ThemeConfig, ThemeRegistry, StyleTable};
///
/// let registry = ThemeRegistry::builder(ThemeConfig::<String, String>::single(
///     StyleTable::new().add("brand", "blue"),
/// ))
/// .storage(MemoryStorage::new())
/// .scheme_source(|| Some(ColorScheme::Dark))
/// .build()
/// .unwrap();
///
/// assert!(registry.is_single_theme());
/// ```
pub struct ThemeRegistryBuilder<T, S> {
    config: ThemeConfig<T, S>,
    storage: Option<Box<dyn ModeStorage>>,
    scheme: Option<Box<dyn SchemeSource>>,
    storage_key: String,
}

impl<T, S> ThemeRegistryBuilder<T, S> {
    /// Persists the mode through `storage`. Defaults to [`MemoryStorage`].
    pub fn storage(mut self, storage: impl ModeStorage + 'static) -> Self {
        self.storage = Some(Box::new(storage));
        self
    }

    /// Reads the OS color scheme from `source`. Defaults to [`OsScheme`].
    pub fn scheme_source(mut self, source: impl SchemeSource + 'static) -> Self {
        self.scheme = Some(Box::new(source));
        self
    }

    /// Changes the storage key. Defaults to [`DEFAULT_STORAGE_KEY`].
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Validates the config and seeds the mode from storage.
    ///
    /// A missing stored mode falls back to the configured initial mode; an
    /// unreadable one is logged and resolved to [`ThemeMode::Light`].
    pub fn build(self) -> Result<ThemeRegistry<T, S>, ConfigError> {
        let (tables, initial_mode) = self.config.into_parts()?;
        let storage = self
            .storage
            .unwrap_or_else(|| Box::new(MemoryStorage::new()));
        let scheme = self.scheme.unwrap_or_else(|| Box::new(OsScheme));

        let mode = match storage.get(&self.storage_key) {
            None => initial_mode,
            Some(raw) => ThemeMode::parse_stored(&raw).unwrap_or_else(|| {
                tracing::warn!(
                    key = %self.storage_key,
                    value = %raw,
                    "unrecognized stored theme mode; falling back to light"
                );
                ThemeMode::Light
            }),
        };

        tracing::debug!(
            %mode,
            %initial_mode,
            single_theme = tables.is_single_theme(),
            "theme registry configured"
        );

        Ok(ThemeRegistry {
            shared: Rc::new(Shared {
                tables: RefCell::new(tables),
                mode: Observable::new(mode),
                version: Observable::new(0),
                initial_mode,
                storage,
                storage_key: self.storage_key,
                scheme,
            }),
        })
    }
}
