//! Error handling for the novatile core layer.
//!
//! The main error type for this crate is [`CoreError`], which wraps the more specific
//! [`ConfigError`] and [`LoggingError`]. All of them are defined with `thiserror`.
//!
//! Errors here are for recoverable, user-facing failures (a bad configuration file,
//! a log directory that cannot be created). Broken internal invariants are not
//! errors; they go through [`crate::fatal::fatal_error`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error of the core layer.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("logging: {0}")]
    Logging(#[from] LoggingError),

    /// A filesystem operation on `path` failed.
    #[error("{message} at {path:?}")]
    Filesystem {
        message: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Loading or validating the configuration failed. Wrapped by [`CoreError::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path:?}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Not TOML, or keys that do not match the schema.
    #[error("malformed configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    ValidationError(String),

    /// The platform reports no configuration base directory.
    #[error("no {dir_type} directory available")]
    DirectoryUnavailable { dir_type: String },
}

#[derive(Debug, Error)]
pub enum LoggingError {
    /// The subscriber could not be built or installed.
    #[error("cannot initialize logging: {0}")]
    InitializationFailure(String),
}
