//! # Configuration
//!
//! Library settings read from YAML:
//!
//! ```yaml
//! songs-dir: /home/me/songs
//! sample-rate: 48000
//! default-bpm: 90
//! ```
//!
//! Every key is optional; missing keys fall back to `songs`, 44100 and 120.

use crate::error::SongError;
use crate::score::DEFAULT_BPM;
use crate::timing::DEFAULT_SAMPLE_RATE;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SONGS_DIR: &str = "songs";

/// Validated configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub songs_dir: PathBuf,
    pub sample_rate: u32,
    pub default_bpm: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            songs_dir: PathBuf::from(DEFAULT_SONGS_DIR),
            sample_rate: DEFAULT_SAMPLE_RATE,
            default_bpm: DEFAULT_BPM,
        }
    }
}

/// Raw configuration for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawConfig {
    pub songs_dir: Option<PathBuf>,
    pub sample_rate: Option<u32>,
    pub default_bpm: Option<u32>,
}

impl Config {
    /// Parse configuration from YAML text. Empty text gives the defaults.
    ///
    /// # Example
    /// ```
    /// use songbook::Config;
    ///
    /// let config = Config::from_yaml_str("sample-rate: 48000")?;
    /// assert_eq!(config.sample_rate, 48000);
    /// assert_eq!(config.default_bpm, 120);
    /// # Ok::<(), songbook::SongError>(())
    /// ```
    pub fn from_yaml_str(content: &str) -> Result<Self, SongError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| SongError::ConfigError(e.to_string()))?;
        Self::from_raw(raw)
    }

    /// Read and parse a YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SongError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| SongError::io(path, e))?;
        log::debug!("loaded configuration from {}", path.display());
        Self::from_yaml_str(&content)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, SongError> {
        let defaults = Self::default();

        let sample_rate = raw.sample_rate.unwrap_or(defaults.sample_rate);
        if sample_rate == 0 {
            return Err(SongError::ConfigError(
                "sample-rate must be greater than zero".to_string(),
            ));
        }

        let default_bpm = raw.default_bpm.unwrap_or(defaults.default_bpm);
        if default_bpm == 0 {
            return Err(SongError::ConfigError(
                "default-bpm must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            songs_dir: raw.songs_dir.unwrap_or(defaults.songs_dir),
            sample_rate,
            default_bpm,
        })
    }
}
