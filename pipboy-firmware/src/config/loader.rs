//! Configuration file loading
//!
//! Reads pipboy.toml from a given path, or parses the embedded default.
//! Anything wrong with the file is a startup error.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use super::sections::PipboyConfig;

/// Embedded default configuration (compiled into the binary)
pub const EMBEDDED_CONFIG: &str = include_str!("../../pipboy.toml");

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Value out of range
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl PipboyConfig {
    /// Parse and validate a TOML document
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: PipboyConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values the types alone cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        let canvas = &self.display.canvas;
        if canvas.width == 0 || canvas.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "display size {}x{} must be non-zero",
                canvas.width, canvas.height
            )));
        }
        if canvas.fps == 0 {
            return Err(ConfigError::Invalid("display fps must be at least 1".into()));
        }
        let hum = &self.sound.hum;
        if !(0.0..=1.0).contains(&hum.min_volume) || !(0.0..=1.0).contains(&hum.max_volume) {
            return Err(ConfigError::Invalid(
                "hum volumes must be within 0.0-1.0".into(),
            ));
        }
        if hum.min_volume > hum.max_volume {
            return Err(ConfigError::Invalid(
                "min_hum_volume is above max_hum_volume".into(),
            ));
        }
        if self.serial.enabled && self.serial.baudrate == 0 {
            return Err(ConfigError::Invalid("serial baudrate must be non-zero".into()));
        }
        Ok(())
    }
}

/// Load configuration
///
/// - `path`: file given on the command line; `None` uses the embedded copy
pub fn load_config(path: Option<&Path>) -> Result<PipboyConfig, ConfigError> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            let config = PipboyConfig::from_toml(&text)?;
            info!("Loaded configuration from {}", path.display());
            Ok(config)
        }
        None => {
            let config = PipboyConfig::from_toml(EMBEDDED_CONFIG)?;
            info!("Loaded embedded configuration");
            Ok(config)
        }
    }
}
