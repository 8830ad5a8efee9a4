//! Configuration loading.
//!
//! [`ConfigLoader::load`] looks for the configuration file in this order:
//!
//! 1. the path in the `NOVATILE_CONFIG` environment variable, if set;
//! 2. `config.toml` in the per-user configuration directory for `novatile`.
//!
//! A file that does not exist yields [`CoreConfig::default`]. Anything else that goes
//! wrong while reading, parsing or validating is reported as a [`ConfigError`].

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories_next::ProjectDirs;
use tracing::{debug, info};

use crate::config::CoreConfig;
use crate::error::{ConfigError, CoreError};

/// Environment variable overriding the configuration file location.
pub const CONFIG_PATH_ENV: &str = "NOVATILE_CONFIG";

const CONFIG_FILE_NAME: &str = "config.toml";
const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const VALID_FORMATS: [&str; 2] = ["text", "json"];

/// Namespace for configuration loading.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates the configuration from its default location.
    pub fn load() -> Result<CoreConfig, CoreError> {
        let path = Self::resolve_config_path(env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))?;
        Self::load_or_default(&path)
    }

    /// Loads `path` if it exists, otherwise validates and returns the defaults.
    pub fn load_or_default(path: &Path) -> Result<CoreConfig, CoreError> {
        match Self::load_from_path(path) {
            Err(CoreError::Config(ConfigError::ReadError { source, .. }))
                if source.kind() == io::ErrorKind::NotFound =>
            {
                info!("No configuration file at {:?}; using defaults.", path);
                let mut config = CoreConfig::default();
                Self::validate_config(&mut config)?;
                Ok(config)
            }
            other => other,
        }
    }

    /// Reads, parses and validates the configuration file at `path`.
    pub fn load_from_path(path: &Path) -> Result<CoreConfig, CoreError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded configuration file {:?} ({} bytes).", path, content.len());
        Self::load_from_str(&content)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn load_from_str(content: &str) -> Result<CoreConfig, CoreError> {
        let mut config: CoreConfig = toml::from_str(content).map_err(ConfigError::ParseError)?;
        Self::validate_config(&mut config)?;
        Ok(config)
    }

    /// Returns `override_path` if given, else the per-user `config.toml`.
    pub fn resolve_config_path(override_path: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
        if let Some(path) = override_path {
            return Ok(path);
        }
        let dirs = ProjectDirs::from("org", "NovaDE", "novatile").ok_or_else(|| {
            ConfigError::DirectoryUnavailable {
                dir_type: "configuration".to_string(),
            }
        })?;
        Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Normalizes string settings to lowercase and rejects unusable values.
    pub fn validate_config(config: &mut CoreConfig) -> Result<(), ConfigError> {
        let logging = &mut config.logging;
        logging.level = logging.level.to_lowercase();
        if !VALID_LEVELS.contains(&logging.level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid log level '{}'; expected one of {:?}",
                logging.level, VALID_LEVELS
            )));
        }
        logging.format = logging.format.to_lowercase();
        if !VALID_FORMATS.contains(&logging.format.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid log format '{}'; expected one of {:?}",
                logging.format, VALID_FORMATS
            )));
        }

        let divisor = config.window_management.dialog_vertical_bias_divisor;
        if divisor <= 0 {
            return Err(ConfigError::ValidationError(format!(
                "dialog_vertical_bias_divisor must be positive, got {}",
                divisor
            )));
        }

        let headless = &config.headless;
        if headless.sessions == 0 {
            return Err(ConfigError::ValidationError(
                "headless.sessions must be at least 1".to_string(),
            ));
        }
        if let Some(display) = headless.displays.iter().find(|d| d.width <= 0 || d.height <= 0) {
            return Err(ConfigError::ValidationError(format!(
                "display {}x{} at ({}, {}) has no area",
                display.width, display.height, display.x, display.y
            )));
        }
        Ok(())
    }
}
