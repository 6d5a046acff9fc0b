//! Sources for the operating system's color scheme.
//!
//! The registry queries its [`SchemeSource`] whenever it needs to resolve
//! [`ThemeMode::System`](crate::ThemeMode::System). `None` means the scheme
//! is unknown, which resolves to light.
//!
//! Override detection for tests by passing a closure:
//!
//! ```rust
//! use stylish::{ColorScheme, SchemeSource};
//!
//! let source = || Some(ColorScheme::Dark);
//! assert_eq!(source.query(), Some(ColorScheme::Dark));
//! ```

use std::cell::Cell;
use std::rc::Rc;

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};

use crate::mode::ColorScheme;

/// A zero-argument query for the current color scheme.
pub trait SchemeSource {
    fn query(&self) -> Option<ColorScheme>;
}

impl<F> SchemeSource for F
where
    F: Fn() -> Option<ColorScheme>,
{
    fn query(&self) -> Option<ColorScheme> {
        (self)()
    }
}

/// Asks the operating system through `dark-light`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsScheme;

impl SchemeSource for OsScheme {
    fn query(&self) -> Option<ColorScheme> {
        match detect_os_theme() {
            Ok(OsThemeMode::Dark) => Some(ColorScheme::Dark),
            Ok(OsThemeMode::Light) => Some(ColorScheme::Light),
            Ok(OsThemeMode::Unspecified) => None,
            Err(err) => {
                tracing::debug!(error = %err, "color scheme detection failed");
                None
            }
        }
    }
}

/// A scheme that can be changed by hand.
///
/// Clones share the same value, so a host can keep one clone and push OS
/// appearance changes into it while the registry holds another.
#[derive(Debug, Default, Clone)]
pub struct ManualScheme {
    current: Rc<Cell<Option<ColorScheme>>>,
}

impl ManualScheme {
    pub fn new(scheme: Option<ColorScheme>) -> Self {
        Self {
            current: Rc::new(Cell::new(scheme)),
        }
    }

    pub fn set(&self, scheme: Option<ColorScheme>) {
        self.current.set(scheme);
    }
}

impl SchemeSource for ManualScheme {
    fn query(&self) -> Option<ColorScheme> {
        self.current.get()
    }
}
