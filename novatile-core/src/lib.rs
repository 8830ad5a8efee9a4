//! # novatile Core Library (`novatile-core`)
//!
//! `novatile-core` is the foundational library of the novatile compositor. It holds
//! the pieces every other crate in the workspace leans on:
//!
//! - **Error Handling**: [`CoreError`] and the more specific [`ConfigError`] and
//!   [`LoggingError`], plus the [`fatal_error!`] helper for broken internal invariants.
//! - **Geometry**: integer value types for points, sizes, displacements and rectangles
//!   ([`Point`], [`Size`], [`Displacement`], [`Rectangle`], [`Rectangles`]).
//! - **Configuration Management**: TOML configuration with defaults and validation
//!   through [`ConfigLoader`] and [`CoreConfig`].
//! - **Logging**: a `tracing` based logging setup configurable for console and file
//!   output in text or JSON format.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use novatile_core::config::ConfigLoader;
//! use novatile_core::logging::{init_logging, init_minimal_logging};
//! use novatile_core::error::CoreError;
//!
//! fn main() -> Result<(), CoreError> {
//!     init_minimal_logging();
//!     let config = ConfigLoader::load()?;
//!     init_logging(&config.logging, true)?;
//!     tracing::info!("novatile core initialized.");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod fatal;
pub mod logging;
pub mod types;

// Re-export key types for convenience
pub use config::{
    ConfigLoader, CoreConfig, DisplayConfig, HeadlessConfig, LoggingConfig, WindowManagementConfig,
};
pub use error::{ConfigError, CoreError, LoggingError};
pub use logging::{init_logging, init_minimal_logging};
pub use types::geometry::{Displacement, Point, Rectangle, Rectangles, Size};
