//! # Stylish - Light/Dark Theming for Named Styles
//!
//! `stylish` keeps an application's color tables in one place, tracks which
//! theme mode the user picked, and hands components memoized style objects
//! that follow the active theme.
//!
//! ## Core Concepts
//!
//! - [`ThemeConfig`]: light, dark and static style tables, plus the initial mode
//! - [`ThemeRegistry`]: validated configuration and live theme state, created by
//!   [`configure_theme`]
//! - [`ThemeMode`]: `Light`, `Dark` or `System`, persisted through a
//!   [`ModeStorage`] under [`DEFAULT_STORAGE_KEY`]
//! - [`Theme`]: the active per-mode table paired with the static table
//! - [`StyledFactory`]: a style generator with a one-entry cache keyed on the
//!   theme identity and the caller's props
//! - [`StyleEngine`]: turns generator output into realized styles
//! - [`ThemeControl`]: change the mode or swap tables at runtime
//!
//! ## Quick Start
//!
//! ```rust
//! use stylish::{configure_theme, NamedStyles, ThemeConfig, ThemeMode};
//!
//! let registry = configure_theme(
//!     ThemeConfig::default_colors().initial_mode(ThemeMode::Light),
//! )
//! .unwrap();
//!
//! #[derive(PartialEq)]
//! struct CardProps {
//!     highlighted: bool,
//! }
//!
//! let use_card_styles = registry.create_themed_styles(|theme, props: &CardProps| {
//!     let text = theme.theme_styles.get("text").cloned().unwrap_or_default();
//!     let border = if props.highlighted {
//!         theme.static_styles.get("brand").cloned().unwrap_or_default()
//!     } else {
//!         text.clone()
//!     };
//!     NamedStyles::new().add("title", text).add("border", border)
//! });
//!
//! let card = use_card_styles.use_styles(CardProps { highlighted: true });
//! assert_eq!(card.styles["title"], "#000000");
//! assert_eq!(card.styles["border"], "dodgerblue");
//!
//! registry.theme_control().set_mode(ThemeMode::Dark);
//! let card = use_card_styles.use_styles(CardProps { highlighted: false });
//! assert_eq!(card.styles["title"], "#FFFFFF");
//! ```
//!
//! ## Terminal Styles
//!
//! [`ConsoleEngine`] realizes [`StyleDeclaration`]s as `console::Style`
//! values:
//!
//! ```rust
//! use stylish::{
//!     configure_theme, ColorDef, ConsoleEngine, NamedStyles, StyleDeclaration, StyleTable,
//!     ThemeConfig,
//! };
//!
//! let registry = configure_theme(ThemeConfig::<ColorDef, ColorDef>::dual(
//!     StyleTable::new().add("accent", ColorDef::Color256(25)),
//!     StyleTable::new().add("accent", ColorDef::Color256(117)),
//!     StyleTable::new(),
//! ))
//! .unwrap();
//!
//! let styles = registry.create_themed_styles_with(
//!     ConsoleEngine::new().force_styling(false),
//!     |theme, _: &()| {
//!         let mut heading = StyleDeclaration::new().bold();
//!         heading.fg = theme.theme_styles.get("accent").cloned();
//!         NamedStyles::new().add("heading", heading)
//!     },
//! );
//!
//! let themed = styles.use_default_styles();
//! assert_eq!(themed.styles.paint("heading", "Report"), "Report");
//! ```
//!
//! ## Persistence
//!
//! The registry reads the stored mode once when built and writes it on every
//! [`ThemeControl::set_mode`]. Plug in [`JsonFileStorage`] to keep the choice
//! across runs:
//!
//! ```rust,no_run
//! use stylish::{JsonFileStorage, ThemeConfig, ThemeRegistry};
//!
//! let registry = ThemeRegistry::builder(ThemeConfig::default_colors())
//!     .storage(JsonFileStorage::new("settings/theme.json"))
//!     .build()?;
//! # Ok::<(), stylish::ConfigError>(())
//! ```

mod cell;
pub mod color;
pub mod config;
mod control;
pub mod defaults;
pub mod engine;
mod error;
pub mod mode;
mod registry;
pub mod scheme;
pub mod storage;
mod styled;
mod table;
pub mod theme;

pub use cell::{Observable, SubscriptionId};
pub use color::{rgb_to_ansi256, ColorDef};
pub use config::{ThemeConfig, ThemeUpdate};
pub use control::ThemeControl;
pub use defaults::{default_dark_colors, default_light_colors, default_static_colors};
pub use engine::{
    ConsoleEngine, Passthrough, StyleDeclaration, StyleEngine, TerminalStyles,
    DEFAULT_MISSING_STYLE_INDICATOR,
};
pub use error::{ConfigError, StorageError};
pub use mode::{resolve_scheme, ColorScheme, ParseModeError, ThemeMode};
pub use registry::{configure_theme, ThemeRegistry, ThemeRegistryBuilder};
pub use scheme::{ManualScheme, OsScheme, SchemeSource};
pub use storage::{JsonFileStorage, MemoryStorage, ModeStorage, NoStorage, DEFAULT_STORAGE_KEY};
pub use styled::{StyledFactory, ThemedStyles};
pub use table::{NamedStyles, StyleTable};
pub use theme::{compose, Theme, ThemeKey, ThemeTables};
