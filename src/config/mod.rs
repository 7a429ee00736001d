//! Configuration management for Aurora
//!
//! This module handles loading, parsing, and validating configuration from
//! TOML files. It combines settings for the window registry, default window
//! geometry, and telemetry.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main configuration struct containing all Aurora settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AuroraConfig {
    /// Window registry settings
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Default window geometry for shell-opened windows
    #[serde(default)]
    pub window: WindowConfig,

    /// Telemetry sink selection
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// General shell settings
    #[serde(default)]
    pub general: GeneralConfig,
}

/// Window registry configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RegistryConfig {
    /// Starting value of the stacking counter; the first window opens at
    /// `base_z_index + 1`
    pub base_z_index: u64,
}

/// Default geometry for windows the shell opens itself (e.g. `--demo`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Default window width (pixels)
    pub default_width: f64,

    /// Default window height (pixels)
    pub default_height: f64,

    /// Position of the first opened window
    pub default_x: f64,
    pub default_y: f64,

    /// Diagonal offset applied to each subsequent window
    pub cascade_offset: f64,
}

/// Breadcrumb category used for window lifecycle events unless configured
pub const DEFAULT_BREADCRUMB_CATEGORY: &str = "window";

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Sink backend: "log" forwards to the log facade, "none" discards
    pub sink: String,

    /// Category stamped on window lifecycle breadcrumbs
    pub category: String,
}

/// General shell settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable debug logging
    pub debug: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { base_z_index: 100 }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            default_width: 640.0,
            default_height: 480.0,
            default_x: 120.0,
            default_y: 80.0,
            cascade_offset: 30.0,
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            sink: "log".to_string(),
            category: DEFAULT_BREADCRUMB_CATEGORY.to_string(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { debug: false }
    }
}

impl AuroraConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Expand ~ to home directory
        let expanded_path = if path.to_string_lossy().starts_with('~') {
            let home = std::env::var("HOME").context("Failed to get HOME environment variable")?;
            Path::new(&home).join(path.strip_prefix("~").unwrap_or(path))
        } else {
            path.to_path_buf()
        };

        let contents = fs::read_to_string(&expanded_path)
            .with_context(|| format!("Failed to read config file: {}", expanded_path.display()))?;

        let config: AuroraConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", expanded_path.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let valid_sinks = ["log", "none"];
        if !valid_sinks.contains(&self.telemetry.sink.as_str()) {
            anyhow::bail!(
                "Invalid telemetry sink: {} (expected \"log\" or \"none\")",
                self.telemetry.sink
            );
        }

        if self.telemetry.category.is_empty() {
            anyhow::bail!("Invalid telemetry category: must not be empty");
        }

        if self.window.default_width <= 0.0 || self.window.default_height <= 0.0 {
            anyhow::bail!("Invalid default window size: must be positive");
        }

        if self.window.cascade_offset < 0.0 {
            anyhow::bail!("Invalid cascade_offset: must not be negative");
        }

        Ok(())
    }

    /// Save configuration to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(path, contents).context("Failed to write configuration file")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests;
