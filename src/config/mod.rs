//! Configuration management
//!
//! Handles loading, validation, and merging of configuration from:
//! - TOML files
//! - Environment variables (through the CLI)
//! - CLI arguments

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod types;

pub use types::{DeviceConfig, LoggingConfig};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Mouse device configuration
    #[serde(default)]
    pub device: DeviceConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Force pointer confinement on or off
    pub grab: Option<bool>,
    /// Force cursor hiding on or off
    pub hide: Option<bool>,
    /// Disable listener dispatch
    pub unbuffered: bool,
    /// Log format
    pub log_format: Option<String>,
    /// Log file
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Create default configuration
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.device.width <= 0 || self.device.height <= 0 {
            anyhow::bail!(
                "Invalid window size: {}x{}",
                self.device.width,
                self.device.height
            );
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Invalid log level: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "pretty" | "compact" | "json" => {}
            _ => anyhow::bail!("Invalid log format: {}", self.logging.format),
        }

        Ok(())
    }

    /// Override config with CLI arguments
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(grab) = overrides.grab {
            self.device.grab = grab;
        }
        if let Some(hide) = overrides.hide {
            self.device.hide = hide;
        }
        if overrides.unbuffered {
            self.device.buffered = false;
        }
        if let Some(format) = overrides.log_format {
            self.logging.format = format;
        }
        if overrides.log_file.is_some() {
            self.logging.log_file = overrides.log_file;
        }

        self
    }
}
