use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::formats::{FormatOptions, FormatRegistry, DEFAULT_MAX_LINE_LENGTH};
use crate::timecode::{self, DEFAULT_FRAME_RATE};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Maximum visible characters per subtitle line when re-flowing text
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,

    /// Frame rate for frame-based formats
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f64,

    /// Target format name used by `convert` when none is given
    #[serde(default = "default_format")]
    pub default_format: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching filter for the `log` facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_max_line_length() -> usize {
    DEFAULT_MAX_LINE_LENGTH
}

fn default_frame_rate() -> f64 {
    DEFAULT_FRAME_RATE
}

fn default_format() -> String {
    "SubRip".to_string()
}

impl Config {
    /// Load a configuration file, or create it with defaults when missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            Ok(config)
        } else {
            log::warn!("Config file not found at '{}', creating default config.", path.display());
            let config = Config::default();
            config.save(path)?;
            Ok(config)
        }
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.max_line_length == 0 {
            return Err(anyhow!("max_line_length must be greater than zero"));
        }

        timecode::validate_frame_rate(self.frame_rate)
            .context("frame_rate must be a positive number")?;

        if FormatRegistry::with_default_formats()
            .find_by_name(&self.default_format)
            .is_none()
        {
            return Err(anyhow!("Unknown default format: {}", self.default_format));
        }

        Ok(())
    }

    /// Options handed to every decode/encode call
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            max_line_length: self.max_line_length,
            frame_rate: self.frame_rate,
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            max_line_length: default_max_line_length(),
            frame_rate: default_frame_rate(),
            default_format: default_format(),
            log_level: LogLevel::default(),
        }
    }
}
