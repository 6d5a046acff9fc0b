//! Memoized, theme-aware style factories.
//!
//! A [`StyledFactory`] is built once per component from a style generator,
//! a function of the active [`Theme`] and the caller's props. Each read goes
//! through [`StyledFactory::use_styles`]:
//!
//! - if the theme identity ([`ThemeKey`]) and the props are unchanged since
//!   the previous read, the previous realized styles are returned as the
//!   same `Rc`
//! - otherwise the generator runs, its output goes through the factory's
//!   [`StyleEngine`](crate::StyleEngine), and the result replaces the cached
//!   entry
//!
//! The returned [`ThemedStyles`] also carries the theme snapshot and a
//! [`get_dynamic_styles`](ThemedStyles::get_dynamic_styles) escape hatch for
//! callers that need styles for other props without touching the cache.

use std::cell::RefCell;
use std::convert::Infallible;
use std::fmt;
use std::rc::Rc;

use crate::registry::ThemeRegistry;
use crate::theme::{Theme, ThemeKey};

/// Generator composed with its engine.
pub(crate) type Realize<T, S, P, O, E> = dyn Fn(&Theme<T, S>, &P) -> Result<O, E>;

struct Memo<P, O> {
    key: ThemeKey,
    props: P,
    styles: Rc<O>,
}

/// A style generator bound to a registry, with a one-entry cache.
///
/// `E` is the generator's error type; factories built from infallible
/// generators use [`Infallible`] and offer the non-`try` methods.
pub struct StyledFactory<T, S, P, O, E = Infallible> {
    registry: ThemeRegistry<T, S>,
    realize: Rc<Realize<T, S, P, O, E>>,
    memo: RefCell<Option<Memo<P, O>>>,
}

impl<T, S, P: PartialEq, O, E> StyledFactory<T, S, P, O, E> {
    pub(crate) fn new(registry: ThemeRegistry<T, S>, realize: Rc<Realize<T, S, P, O, E>>) -> Self {
        Self {
            registry,
            realize,
            memo: RefCell::new(None),
        }
    }

    /// Returns the realized styles for `props` under the active theme.
    ///
    /// # Errors
    ///
    /// Whatever the generator returns. Nothing is cached on error, so the
    /// next call runs the generator again.
    pub fn try_use_styles(&self, props: P) -> Result<ThemedStyles<T, S, P, O, E>, E> {
        let (key, theme) = self.registry.snapshot();

        if let Some(memo) = self.memo.borrow().as_ref() {
            if memo.key == key && memo.props == props {
                return Ok(self.themed(Rc::clone(&memo.styles), theme));
            }
        }

        tracing::trace!(
            scheme = ?key.scheme,
            version = key.version,
            "recomputing themed styles"
        );
        let styles = Rc::new((self.realize)(&theme, &props)?);
        *self.memo.borrow_mut() = Some(Memo {
            key,
            props,
            styles: Rc::clone(&styles),
        });
        Ok(self.themed(styles, theme))
    }

    /// [`try_use_styles`](Self::try_use_styles) with default props.
    pub fn try_use_default_styles(&self) -> Result<ThemedStyles<T, S, P, O, E>, E>
    where
        P: Default,
    {
        self.try_use_styles(P::default())
    }

    /// Drops the cached entry.
    pub fn invalidate(&self) {
        self.memo.borrow_mut().take();
    }

    pub fn registry(&self) -> &ThemeRegistry<T, S> {
        &self.registry
    }

    fn themed(&self, styles: Rc<O>, theme: Theme<T, S>) -> ThemedStyles<T, S, P, O, E> {
        ThemedStyles {
            styles,
            theme,
            realize: Rc::clone(&self.realize),
        }
    }
}

impl<T, S, P: PartialEq, O> StyledFactory<T, S, P, O, Infallible> {
    /// Returns the realized styles for `props` under the active theme.
    ///
    /// A panic in the generator propagates to the caller.
    pub fn use_styles(&self, props: P) -> ThemedStyles<T, S, P, O> {
        infallible(self.try_use_styles(props))
    }

    /// [`use_styles`](Self::use_styles) with default props.
    pub fn use_default_styles(&self) -> ThemedStyles<T, S, P, O>
    where
        P: Default,
    {
        self.use_styles(P::default())
    }
}

impl<T, S, P, O, E> fmt::Debug for StyledFactory<T, S, P, O, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyledFactory")
            .field("registry", &self.registry)
            .field(
                "cached_key",
                &self.memo.borrow().as_ref().map(|memo| memo.key),
            )
            .finish()
    }
}

/// What a factory read returns.
pub struct ThemedStyles<T, S, P, O, E = Infallible> {
    /// Realized styles. The same `Rc` across reads while theme and props
    /// are unchanged.
    pub styles: Rc<O>,
    /// The theme the styles were realized for.
    pub theme: Theme<T, S>,
    realize: Rc<Realize<T, S, P, O, E>>,
}

impl<T, S, P, O, E> ThemedStyles<T, S, P, O, E> {
    /// Realizes styles for `props` against this snapshot's theme.
    ///
    /// Always runs the generator and never touches the factory's cache.
    pub fn try_get_dynamic_styles(&self, props: &P) -> Result<O, E> {
        (self.realize)(&self.theme, props)
    }
}

impl<T, S, P, O> ThemedStyles<T, S, P, O, Infallible> {
    pub fn get_dynamic_styles(&self, props: &P) -> O {
        infallible(self.try_get_dynamic_styles(props))
    }
}

impl<T, S, P, O, E> Clone for ThemedStyles<T, S, P, O, E> {
    fn clone(&self) -> Self {
        Self {
            styles: Rc::clone(&self.styles),
            theme: self.theme.clone(),
            realize: Rc::clone(&self.realize),
        }
    }
}

impl<T: fmt::Debug, S: fmt::Debug, P, O: fmt::Debug, E> fmt::Debug for ThemedStyles<T, S, P, O, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemedStyles")
            .field("styles", &self.styles)
            .field("theme", &self.theme)
            .finish()
    }
}

fn infallible<V>(result: Result<V, Infallible>) -> V {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}
