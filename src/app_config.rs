use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::PathBuf;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Library section to search ("Movies" unless overridden)
    #[serde(default = "default_section")]
    pub section: String,

    /// Directory subtitle files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Container the primary extraction attempt targets
    #[serde(default = "default_primary_format")]
    pub primary_format: String,

    /// Container the stream-copy fallback attempt targets
    #[serde(default = "default_fallback_format")]
    pub fallback_format: String,

    /// Timeout for a single ffmpeg invocation, in seconds
    #[serde(default = "default_ffmpeg_timeout_secs")]
    pub ffmpeg_timeout_secs: u64,

    /// Timeout for Plex API requests, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log level setting
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    // @level: Errors only
    Error,
    // @level: Warnings and errors
    Warn,
    // @level: Default verbosity
    #[default]
    Info,
    // @level: Developer diagnostics
    Debug,
    // @level: Everything
    Trace,
}

fn default_section() -> String {
    "Movies".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("subtitles")
}

fn default_primary_format() -> String {
    "srt".to_string()
}

fn default_fallback_format() -> String {
    "sup".to_string()
}

fn default_ffmpeg_timeout_secs() -> u64 {
    120
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            section: default_section(),
            output_dir: default_output_dir(),
            primary_format: default_primary_format(),
            fallback_format: default_fallback_format(),
            ffmpeg_timeout_secs: default_ffmpeg_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.section.trim().is_empty() {
            return Err(anyhow!("Library section name cannot be empty"));
        }

        if self.primary_format.trim().is_empty() || self.fallback_format.trim().is_empty() {
            return Err(anyhow!("Subtitle format extensions cannot be empty"));
        }

        if self.primary_format.starts_with('.') || self.fallback_format.starts_with('.') {
            return Err(anyhow!(
                "Subtitle format extensions must not include a leading dot"
            ));
        }

        if self.ffmpeg_timeout_secs == 0 {
            return Err(anyhow!("ffmpeg timeout must be greater than zero"));
        }

        if self.request_timeout_secs == 0 {
            return Err(anyhow!("Request timeout must be greater than zero"));
        }

        Ok(())
    }
}
