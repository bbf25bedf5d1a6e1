//! Settings file

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use statusbar_types::settings::{
    DEFAULT_AM_PM_STYLE, DEFAULT_BATTERY_STYLE, DEFAULT_CLOCK_STYLE, DEFAULT_SHOW_CLOCK,
    DEFAULT_TIME_12_24, STATUS_BAR_AM_PM, STATUS_BAR_BATTERY, STATUS_BAR_CLOCK,
    STATUS_BAR_CLOCK_STYLE, TIME_12_24,
};
use statusbar_types::{BatteryStrings, DisplayMetrics, LocalePatterns};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Current settings file format version
pub const CONFIG_VERSION: u32 = 1;

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_settings() -> BTreeMap<String, i32> {
    BTreeMap::from([
        (STATUS_BAR_BATTERY.to_string(), DEFAULT_BATTERY_STYLE),
        (STATUS_BAR_AM_PM.to_string(), DEFAULT_AM_PM_STYLE),
        (STATUS_BAR_CLOCK_STYLE.to_string(), DEFAULT_CLOCK_STYLE),
        (STATUS_BAR_CLOCK.to_string(), DEFAULT_SHOW_CLOCK),
        (TIME_12_24.to_string(), DEFAULT_TIME_12_24),
    ])
}

/// Persisted status bar configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the config format
    #[serde(default = "default_version")]
    pub version: u32,
    /// Integer settings keyed by setting name
    #[serde(default = "default_settings")]
    pub settings: BTreeMap<String, i32>,
    /// Localized base time patterns
    #[serde(default)]
    pub locale: LocalePatterns,
    /// Localized battery level texts
    #[serde(default)]
    pub battery_strings: BatteryStrings,
    /// Display geometry used for device classification
    #[serde(default)]
    pub display: DisplayMetrics,
}

impl AppConfig {
    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to_path(&config_path)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("org", "statusbar-sync", "statusbar-sync")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("settings.json"))
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a specific file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write settings file {}", path.display()))?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            settings: default_settings(),
            locale: LocalePatterns::default(),
            battery_strings: BatteryStrings::default(),
            display: DisplayMetrics::default(),
        }
    }
}
