//! Menu error types.
//!
//! Deriving open and selected keys never fails. Keys whose pattern does not
//! compile are logged and never match; the remaining errors only surface
//! where configuration is loaded or HTML is rendered.

use thiserror::Error;

/// Errors raised while compiling a path pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// A `(` group was never closed.
    #[error("pattern '{pattern}': unbalanced group starting at offset {offset}")]
    UnbalancedGroup { pattern: String, offset: usize },

    /// The generated expression was rejected by the regex engine.
    #[error("pattern '{pattern}': {details}")]
    InvalidRegex { pattern: String, details: String },
}

/// Errors raised while loading or rendering a menu.
#[derive(Debug, Error)]
pub enum MenuError {
    /// The menu file could not be read.
    #[error("failed to read menu file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The menu file extension is not one we know how to parse.
    #[error("menu file {path}: unsupported format, expected .yml, .yaml, .json or .toml")]
    UnsupportedFormat { path: String },

    /// The menu document did not deserialize.
    #[error("failed to parse {format} menu: {details}")]
    Parse {
        format: &'static str,
        details: String,
    },

    #[error("template error: {0}")]
    Template(#[from] tera::Error),
}

/// Result type alias using MenuError.
pub type MenuResult<T> = Result<T, MenuError>;
