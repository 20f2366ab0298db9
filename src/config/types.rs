//! Configuration type definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::input::DeviceSettings;

/// Mouse device configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Dispatch events to a listener instead of polling
    #[serde(default = "default_true")]
    pub buffered: bool,

    /// Confine the pointer to the window
    #[serde(default = "default_true")]
    pub grab: bool,

    /// Hide the cursor over the window
    #[serde(default = "default_true")]
    pub hide: bool,

    /// Window width in pixels
    #[serde(default = "default_width")]
    pub width: i32,

    /// Window height in pixels
    #[serde(default = "default_height")]
    pub height: i32,
}

fn default_true() -> bool {
    true
}

fn default_width() -> i32 {
    640
}

fn default_height() -> i32 {
    480
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            buffered: true,
            grab: true,
            hide: true,
            width: default_width(),
            height: default_height(),
        }
    }
}

impl DeviceConfig {
    /// Settings for [`crate::input::MouseDevice::new`]
    pub fn to_device_settings(&self) -> DeviceSettings {
        DeviceSettings {
            buffered: self.buffered,
            grab: self.grab,
            hide: self.hide,
            width: self.width,
            height: self.height,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level ("trace", "debug", "info", "warn", "error")
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format ("pretty", "compact", "json")
    #[serde(default = "default_format")]
    pub format: String,

    /// Also write logs to this file
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
            log_file: None,
        }
    }
}
