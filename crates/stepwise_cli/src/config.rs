//! Stepwise configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File looked up in the working directory when no `--config` is given
pub const CONFIG_FILE: &str = "stepwise.toml";

/// Top-level Stepwise configuration (stepwise.toml)
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct StepwiseConfig {
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Playback defaults
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct PlaybackConfig {
    /// Delay between steps in milliseconds
    #[serde(default = "default_speed_ms")]
    pub speed_ms: u64,
}

fn default_speed_ms() -> u64 {
    500
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed_ms: default_speed_ms(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct LogConfig {
    /// `tracing` filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

/// Output formatting
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct OutputConfig {
    /// Pretty-print recorded traces
    #[serde(default)]
    pub pretty: bool,
}

impl StepwiseConfig {
    /// Load configuration from an explicit path, or from `stepwise.toml` in
    /// the working directory.
    ///
    /// An explicit path must exist. The implicit file falls back to defaults
    /// when missing.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => {
                let path = Path::new(CONFIG_FILE);
                if path.exists() {
                    Self::load_from_file(path)
                } else {
                    tracing::debug!("no {} found, using defaults", CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        anyhow::ensure!(config.playback.speed_ms > 0, "playback.speed_ms must be positive");
        Ok(config)
    }
}
