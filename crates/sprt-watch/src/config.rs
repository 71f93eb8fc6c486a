//! Configuration file loading for the results watcher.
//!
//! Settings are read from `sprt-watch.toml` in the current directory when it
//! exists. Every key is optional; command-line flags override whatever the
//! file says.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::watcher::Matchup;

/// Errors that can occur when loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Only one of the two contestants was named.
    #[error("Both engine_a and engine_b must be set, or neither")]
    IncompleteMatchup,
    /// Both contestants have the same name.
    #[error("engine_a and engine_b must differ, both are {0:?}")]
    SameContestant(String),
    /// The refresh interval is zero.
    #[error("refresh_ms must be greater than zero")]
    ZeroRefreshInterval,
    /// The Elo axis range is not a positive, finite number.
    #[error("elo_axis_range must be a positive finite number, got {0}")]
    InvalidEloAxisRange(f64),
}

/// Watcher settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct WatchConfig {
    /// Results file written by the match runner. Defaults to `results.pgn`.
    #[serde(default = "default_pgn_path")]
    pub pgn_path: PathBuf,
    /// Milliseconds between re-reads of the results file. Defaults to 2000.
    #[serde(default = "default_refresh_ms")]
    pub refresh_ms: u64,
    /// Elo values in the trend are clamped to `±elo_axis_range`.
    /// Defaults to 100.
    #[serde(default = "default_elo_axis_range")]
    pub elo_axis_range: f64,
    /// How many recent games and trend points a report lists. Defaults to 50.
    #[serde(default = "default_console_lines")]
    pub console_lines: usize,
    /// Contestant A. When unset, White of the first game is used.
    #[serde(default)]
    pub engine_a: Option<String>,
    /// Contestant B. When unset, Black of the first game is used.
    #[serde(default)]
    pub engine_b: Option<String>,
}

fn default_pgn_path() -> PathBuf {
    PathBuf::from("results.pgn")
}

fn default_refresh_ms() -> u64 {
    2000
}

fn default_elo_axis_range() -> f64 {
    100.0
}

fn default_console_lines() -> usize {
    50
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            pgn_path: default_pgn_path(),
            refresh_ms: default_refresh_ms(),
            elo_axis_range: default_elo_axis_range(),
            console_lines: default_console_lines(),
            engine_a: None,
            engine_b: None,
        }
    }
}

impl WatchConfig {
    /// Loads the configuration from [`Self::config_path()`].
    ///
    /// Returns the defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads the configuration from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Returns the path to the default configuration file.
    pub fn config_path() -> PathBuf {
        PathBuf::from("sprt-watch.toml")
    }

    /// Returns the configured contestants, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IncompleteMatchup`] when only one name is set and
    /// [`ConfigError::SameContestant`] when both names are equal.
    pub fn matchup(&self) -> Result<Option<Matchup>, ConfigError> {
        match (&self.engine_a, &self.engine_b) {
            (None, None) => Ok(None),
            (Some(a), Some(b)) if a == b => Err(ConfigError::SameContestant(a.clone())),
            (Some(a), Some(b)) => Ok(Some(Matchup::new(a.clone(), b.clone()))),
            _ => Err(ConfigError::IncompleteMatchup),
        }
    }

    /// Checks settings that would otherwise fail at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_ms == 0 {
            return Err(ConfigError::ZeroRefreshInterval);
        }
        if !(self.elo_axis_range.is_finite() && self.elo_axis_range > 0.0) {
            return Err(ConfigError::InvalidEloAxisRange(self.elo_axis_range));
        }
        self.matchup().map(|_| ())
    }
}
