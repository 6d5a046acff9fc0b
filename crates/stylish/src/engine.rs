//! Styling engines: turning named declarations into realized styles.
//!
//! A style generator describes styles as [`NamedStyles`] of some
//! declaration type. A [`StyleEngine`] validates and converts that map into
//! whatever the UI layer actually draws with. The factory treats the engine
//! as an opaque, synchronous transform.
//!
//! Two engines ship with the crate:
//!
//! - [`Passthrough`]: returns the declarations unchanged.
//! - [`ConsoleEngine`]: builds `console::Style` values from
//!   [`StyleDeclaration`]s, for terminal UIs.
//!
//! Any `Fn(NamedStyles<D>) -> O` closure is an engine too.

use console::Style;
use serde::Deserialize;

use crate::color::ColorDef;
use crate::table::NamedStyles;

/// Shown in place of a style name that has no realized style.
pub const DEFAULT_MISSING_STYLE_INDICATOR: &str = "(!?)";

/// Converts generator output into realized styles.
pub trait StyleEngine<D> {
    type Output;

    fn create(&self, styles: NamedStyles<D>) -> Self::Output;
}

impl<D, O, F> StyleEngine<D> for F
where
    F: Fn(NamedStyles<D>) -> O,
{
    type Output = O;

    fn create(&self, styles: NamedStyles<D>) -> O {
        (self)(styles)
    }
}

/// Engine that hands declarations back untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct Passthrough;

impl<D> StyleEngine<D> for Passthrough {
    type Output = NamedStyles<D>;

    fn create(&self, styles: NamedStyles<D>) -> NamedStyles<D> {
        styles
    }
}

/// A terminal style declaration.
///
/// Deserializes from the same shape theme files use:
///
/// ```rust
/// use stylish::StyleDeclaration;
///
/// let decl: StyleDeclaration = serde_yaml::from_str("{ fg: cyan, bold: true }").unwrap();
/// assert!(decl.bold);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleDeclaration {
    pub fg: Option<ColorDef>,
    pub bg: Option<ColorDef>,
    pub bold: bool,
    pub italic: bool,
    pub dim: bool,
    pub underline: bool,
    pub reverse: bool,
}

impl StyleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(mut self, color: ColorDef) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn bg(mut self, color: ColorDef) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Builds the `console::Style` for this declaration.
    pub fn to_style(&self) -> Style {
        let mut style = Style::new();
        if let Some(fg) = &self.fg {
            style = style.fg(fg.to_console_color());
        }
        if let Some(bg) = &self.bg {
            style = style.bg(bg.to_console_color());
        }
        if self.bold {
            style = style.bold();
        }
        if self.italic {
            style = style.italic();
        }
        if self.dim {
            style = style.dim();
        }
        if self.underline {
            style = style.underlined();
        }
        if self.reverse {
            style = style.reverse();
        }
        style
    }
}

/// Terminal styles realized by [`ConsoleEngine`].
#[derive(Debug, Clone)]
pub struct TerminalStyles {
    styles: NamedStyles<Style>,
}

impl TerminalStyles {
    pub fn get(&self, name: &str) -> Option<&Style> {
        self.styles.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.styles.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Applies the named style to `text`.
    ///
    /// Unknown names are flagged with [`DEFAULT_MISSING_STYLE_INDICATOR`]
    /// instead of failing, so a typo shows up on screen.
    pub fn paint(&self, name: &str, text: &str) -> String {
        match self.styles.get(name) {
            Some(style) => style.apply_to(text).to_string(),
            None => format!("{} {}", DEFAULT_MISSING_STYLE_INDICATOR, text),
        }
    }
}

/// Engine producing `console::Style` values.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleEngine {
    force_styling: Option<bool>,
}

impl ConsoleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces styling on or off regardless of terminal detection.
    pub fn force_styling(mut self, enabled: bool) -> Self {
        self.force_styling = Some(enabled);
        self
    }
}

impl StyleEngine<StyleDeclaration> for ConsoleEngine {
    type Output = TerminalStyles;

    fn create(&self, styles: NamedStyles<StyleDeclaration>) -> TerminalStyles {
        let force = self.force_styling;
        TerminalStyles {
            styles: styles.map(|_, decl| {
                let style = decl.to_style();
                match force {
                    Some(enabled) => style.force_styling(enabled),
                    None => style,
                }
            }),
        }
    }
}
