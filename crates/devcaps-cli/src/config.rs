//! Configuration loading and validation

use anyhow::Result;
use devcaps_core::FocusOverrides;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub watch: WatchConfig,
    #[serde(default, rename = "focus_overrides")]
    pub focus_overrides: FocusOverridesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Refresh interval in seconds for watch mode
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
        }
    }
}

fn default_interval() -> u64 {
    5
}

/// Auto-focus override table configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FocusOverridesConfig {
    /// Replace the built-in model table instead of extending it
    #[serde(default)]
    pub replace: bool,
    /// Model codes whose back camera supports auto focus despite the
    /// platform reporting otherwise
    #[serde(default)]
    pub models: Vec<String>,
}

impl Config {
    /// Build the override table from the built-in defaults and the
    /// configured entries.
    pub fn to_focus_overrides(&self) -> FocusOverrides {
        if self.focus_overrides.replace {
            FocusOverrides::from_models(self.focus_overrides.models.iter().cloned())
        } else {
            let mut overrides = FocusOverrides::default();
            overrides.extend(self.focus_overrides.models.iter().cloned());
            overrides
        }
    }
}

/// Load configuration from file, falling back to defaults when absent.
pub fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    } else {
        info!(
            path = %path.display(),
            "Configuration file not found, using defaults"
        );
        Ok(Config::default())
    }
}

/// Save default configuration to file
pub fn save_default_config(path: &Path) -> Result<()> {
    let config = Config {
        watch: WatchConfig::default(),
        focus_overrides: FocusOverridesConfig {
            replace: false,
            models: vec!["RM-1234".to_string()],
        },
    };
    let content = toml::to_string_pretty(&config)?;
    std::fs::write(path, content)?;
    Ok(())
}
