//! Error types.
//!
//! - [`ConfigError`]: raised by [`configure_theme`](crate::configure_theme)
//!   and the config loaders. Always reported at configuration time.
//! - [`StorageError`]: raised by [`ModeStorage`](crate::ModeStorage) writes.
//!   The registry logs these and carries on.
//!
//! Errors from style generators are never wrapped; see
//! [`StyledFactory::try_use_styles`](crate::StyledFactory::try_use_styles).

use std::path::PathBuf;

use thiserror::Error;

/// Invalid theme configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A light table was given without a dark one.
    #[error(
        "light theme styles provided without dark theme styles; \
         provide both for dual-theme mode, or only static styles for single-theme mode"
    )]
    MissingDarkStyles,

    /// A dark table was given without a light one.
    #[error(
        "dark theme styles provided without light theme styles; \
         provide both for dual-theme mode, or only static styles for single-theme mode"
    )]
    MissingLightStyles,

    /// The config document could not be parsed.
    #[error("failed to parse theme config{}: {message}", location(.path))]
    Parse {
        path: Option<PathBuf>,
        message: String,
    },

    /// The config file could not be read.
    #[error("failed to read theme config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file extension is neither YAML nor JSON.
    #[error(
        "unsupported theme config format: {} (expected .yaml, .yml or .json)",
        .path.display()
    )]
    UnsupportedFormat { path: PathBuf },
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}

/// Failure persisting the theme mode.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The existing file is not a JSON object and is left untouched.
    #[error("refusing to overwrite {}: {message}", .path.display())]
    Corrupt { path: PathBuf, message: String },

    #[error("failed to serialize stored values: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Backend-specific failure from a custom storage implementation.
    #[error("{0}")]
    Backend(String),
}
