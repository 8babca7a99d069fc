//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `OhError` as one variant
//! via `#[from]`.

use thiserror::Error;

/// The top-level error type for `oh-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum OhError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `oh-*` crates.
pub type OhResult<T> = Result<T, OhError>;
