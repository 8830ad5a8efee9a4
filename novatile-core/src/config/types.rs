//! Configuration data structures.
//!
//! Every struct uses `#[serde(deny_unknown_fields)]` so that typos in the TOML file
//! are reported instead of silently ignored, and per-field defaults from
//! [`super::defaults`] so that any key may be omitted.

use super::defaults;
use crate::types::geometry::Rectangle;
use serde::Deserialize;
use std::path::PathBuf;

/// Configuration settings for the logging subsystem.
///
/// ```
/// use novatile_core::config::LoggingConfig;
///
/// let config: LoggingConfig = toml::from_str("level = \"debug\"").unwrap();
/// assert_eq!(config.level, "debug");
/// assert_eq!(config.format, "text");
/// assert_eq!(config.file_path, None);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Minimum level: "trace", "debug", "info", "warn" or "error".
    #[serde(default = "defaults::default_log_level")]
    pub level: String,
    /// Optional log file. Rotated daily.
    #[serde(default = "defaults::default_log_file_path")]
    pub file_path: Option<PathBuf>,
    /// "text" or "json".
    #[serde(default = "defaults::default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        defaults::default_logging_config()
    }
}

/// Tunables of the tiling window management policy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowManagementConfig {
    /// A dialog centred on its parent is moved up by
    /// `(parent_height - dialog_height) / dialog_vertical_bias_divisor`.
    #[serde(default = "defaults::default_dialog_vertical_bias_divisor")]
    pub dialog_vertical_bias_divisor: i32,
}

impl Default for WindowManagementConfig {
    fn default() -> Self {
        defaults::default_window_management_config()
    }
}

/// One output area of the headless driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl DisplayConfig {
    pub fn area(&self) -> Rectangle {
        Rectangle::from_xywh(self.x, self.y, self.width, self.height)
    }
}

/// Settings for the `novatile` headless driver.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeadlessConfig {
    /// Number of display refreshes to simulate.
    #[serde(default = "defaults::default_frames")]
    pub frames: u32,
    /// Number of client sessions to start.
    #[serde(default = "defaults::default_sessions")]
    pub sessions: u32,
    /// Output areas.
    #[serde(default = "defaults::default_displays")]
    pub displays: Vec<DisplayConfig>,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        defaults::default_headless_config()
    }
}

/// Root configuration structure.
///
/// ```
/// use novatile_core::config::CoreConfig;
///
/// let config: CoreConfig = toml::from_str(r#"
/// [logging]
/// level = "warn"
///
/// [window_management]
/// dialog_vertical_bias_divisor = 4
/// "#).unwrap();
/// assert_eq!(config.logging.level, "warn");
/// assert_eq!(config.window_management.dialog_vertical_bias_divisor, 4);
/// assert_eq!(config.headless.sessions, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoreConfig {
    #[serde(default = "defaults::default_logging_config")]
    pub logging: LoggingConfig,
    #[serde(default = "defaults::default_window_management_config")]
    pub window_management: WindowManagementConfig,
    #[serde(default = "defaults::default_headless_config")]
    pub headless: HeadlessConfig,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            logging: defaults::default_logging_config(),
            window_management: defaults::default_window_management_config(),
            headless: defaults::default_headless_config(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn logging_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.file_path, None);
        assert_eq!(config.format, "text");
    }

    #[test]
    fn empty_document_yields_defaults() {
        let config: CoreConfig = toml::from_str("").unwrap();
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.window_management.dialog_vertical_bias_divisor, 6);
        assert_eq!(config.headless.displays[0].area(), Rectangle::from_xywh(0, 0, 1920, 1080));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<CoreConfig, _> = toml::from_str("[logging]\nverbosity = 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn displays_parse_as_array_of_tables() {
        let config: CoreConfig = toml::from_str(
            r#"
            [headless]
            frames = 10

            [[headless.displays]]
            x = 0
            y = 0
            width = 800
            height = 600

            [[headless.displays]]
            x = 800
            y = 0
            width = 800
            height = 600
            "#,
        )
        .unwrap();

        assert_eq!(config.headless.frames, 10);
        assert_eq!(config.headless.displays.len(), 2);
        assert_eq!(config.headless.displays[1].area(), Rectangle::from_xywh(800, 0, 800, 600));
    }
}
