//! Configuration management for novatile.
//!
//! - [`types`]: the configuration schema ([`CoreConfig`] and its sections).
//! - [`defaults`]: default values used by `serde` when a key is missing.
//! - [`loader`]: [`ConfigLoader`], which locates, parses and validates the TOML file.
//!
//! A missing configuration file is not an error; the defaults are used instead.

pub mod defaults;
pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{CoreConfig, DisplayConfig, HeadlessConfig, LoggingConfig, WindowManagementConfig};
