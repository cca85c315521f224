//! User defaults for the CLI.
//!
//! Stored in `~/.pixelmark/config.toml`. Every field is optional in the
//! file; anything missing falls back to the built-in default.
//!
//! ```toml
//! strength = "medium"
//! crop_retain_pct = 80.0
//! noise_intensity = 0.1
//! noise_seed = 42
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::codec::Strength;
use crate::resilience::AttackError;

/// Default share of each dimension kept by the crop attack.
pub const DEFAULT_CROP_RETAIN_PCT: f64 = 80.0;

/// Default probability that the noise attack hits a pixel.
pub const DEFAULT_NOISE_INTENSITY: f64 = 0.1;

/// Errors that can occur when loading or saving the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config directory not found. Unable to determine home directory.")]
    NoConfigDir,

    #[error("Invalid config value: {0}")]
    InvalidValue(#[from] AttackError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),
}

/// CLI defaults.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Strength used when `--strength` is not given.
    pub strength: Strength,

    /// Percentage of each dimension kept by `attack crop`.
    pub crop_retain_pct: f64,

    /// Per-pixel hit probability for `attack noise`.
    pub noise_intensity: f64,

    /// Fixed seed for the noise attack; random when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noise_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strength: Strength::default(),
            crop_retain_pct: DEFAULT_CROP_RETAIN_PCT,
            noise_intensity: DEFAULT_NOISE_INTENSITY,
            noise_seed: None,
        }
    }
}

impl Config {
    /// Load the configuration from the default location.
    ///
    /// Returns defaults if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load the configuration from `path`, or defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Save the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(get_config_dir()?.join("config.toml"))
    }

    /// Rejects attack defaults that the attacks themselves would reject.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.crop_retain_pct > 0.0 && self.crop_retain_pct <= 100.0) {
            return Err(AttackError::InvalidRetention(self.crop_retain_pct).into());
        }
        if !(0.0..=1.0).contains(&self.noise_intensity) {
            return Err(AttackError::InvalidIntensity(self.noise_intensity).into());
        }
        Ok(())
    }
}

/// Get the pixelmark config directory (`~/.pixelmark`).
pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(".pixelmark"))
        .ok_or(ConfigError::NoConfigDir)
}
