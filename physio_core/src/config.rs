//! Configuration file support for PhysioHub.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/physio/config.toml`.

use crate::ranges::{range_table, RangeOverrides, RangeTable};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub ranges: RangeOverrides,
}

/// Output format for front-ends
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Display configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_decimals")]
    pub decimals: u32,

    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            decimals: default_decimals(),
            format: OutputFormat::default(),
        }
    }
}

/// Most decimal places `round_to` can apply while staying finite
pub const MAX_DECIMALS: u32 = 15;

fn default_decimals() -> u32 {
    1
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
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
        if config.display.decimals > MAX_DECIMALS {
            return Err(Error::Config(format!(
                "display.decimals {} exceeds {}",
                config.display.decimals, MAX_DECIMALS
            )));
        }
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let base = match dirs::config_dir() {
            Some(dir) => dir,
            None => {
                let home = std::env::var("HOME").map_err(|_| {
                    Error::Config("HOME environment variable not set".into())
                })?;
                PathBuf::from(home).join(".config")
            }
        };
        Ok(base.join("physio").join("config.toml"))
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Default range table with configured overrides applied
    ///
    /// Fails if the merged table no longer validates.
    pub fn range_table(&self) -> Result<RangeTable> {
        if self.ranges.is_empty() {
            return Ok(range_table().clone());
        }

        let table = range_table().with_overrides(&self.ranges);
        let errors = table.validate();
        if !errors.is_empty() {
            return Err(Error::RangeValidation(errors.join("; ")));
        }
        tracing::info!("Applied {} range overrides", self.ranges.len());
        Ok(table)
    }
}
