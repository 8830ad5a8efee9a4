//! Default configuration values.
//!
//! These functions are referenced from `#[serde(default = "...")]` attributes in
//! [`super::types`] and from the `Default` impls there.

use crate::config::types::{DisplayConfig, HeadlessConfig, LoggingConfig, WindowManagementConfig};
use std::path::PathBuf;

pub(crate) fn default_logging_config() -> LoggingConfig {
    LoggingConfig {
        level: default_log_level(),
        file_path: default_log_file_path(),
        format: default_log_format(),
    }
}

pub(crate) fn default_log_level() -> String {
    "info".to_string()
}

pub(crate) fn default_log_file_path() -> Option<PathBuf> {
    None
}

pub(crate) fn default_log_format() -> String {
    "text".to_string()
}

pub(crate) fn default_window_management_config() -> WindowManagementConfig {
    WindowManagementConfig {
        dialog_vertical_bias_divisor: default_dialog_vertical_bias_divisor(),
    }
}

/// Dialogs centred on their parent are lifted by `1/6` of the height difference.
pub(crate) fn default_dialog_vertical_bias_divisor() -> i32 {
    6
}

pub(crate) fn default_headless_config() -> HeadlessConfig {
    HeadlessConfig {
        frames: default_frames(),
        sessions: default_sessions(),
        displays: default_displays(),
    }
}

pub(crate) fn default_frames() -> u32 {
    120
}

pub(crate) fn default_sessions() -> u32 {
    3
}

pub(crate) fn default_displays() -> Vec<DisplayConfig> {
    vec![DisplayConfig {
        x: 0,
        y: 0,
        width: 1920,
        height: 1080,
    }]
}
