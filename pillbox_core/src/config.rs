//! Configuration file support for Pillbox.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/pillbox/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

/// Data location configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_history_path")]
    pub history_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            history_path: default_history_path(),
        }
    }
}

/// Ledger rendering configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Width of the longest bar, in characters
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,

    /// Days closing at or below this count are flagged
    #[serde(default)]
    pub low_stock_pills: i64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            bar_width: default_bar_width(),
            low_stock_pills: 0,
        }
    }
}

// Default value functions
fn default_history_path() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("pillbox").join("history.json")
}

fn default_bar_width() -> usize {
    40
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("pillbox").join("config.toml")
    }

    /// Reject values the renderer cannot use
    pub fn validate(&self) -> Result<()> {
        if self.display.bar_width == 0 {
            return Err(Error::Config("display.bar_width must be at least 1".into()));
        }
        Ok(())
    }
}
