//! Configuration management for the console.
//!
//! Settings are loaded from a TOML file; a missing file yields defaults.
//! CLI flags are applied on top by the binary.

use crate::error::{ConsoleError, Result};
use crate::logger::DEFAULT_LOG_PREFIX;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Console behavior.
    #[serde(default)]
    pub console: ConsoleSettings,
}

/// Console construction options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    /// Replace the handler when a name is registered twice.
    #[serde(default)]
    pub overwrite_commands: bool,

    /// Prompt printed before each read.
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Prefix attached to console log records.
    #[serde(default = "default_log_prefix")]
    pub log_prefix: String,

    /// Exit the process once the console stops.
    #[serde(default = "default_exit_on_stop")]
    pub exit_on_stop: bool,
}

fn default_prompt() -> String {
    crate::console::DEFAULT_PROMPT.to_string()
}

fn default_log_prefix() -> String {
    DEFAULT_LOG_PREFIX.to_string()
}

fn default_exit_on_stop() -> bool {
    true
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            overwrite_commands: false,
            prompt: default_prompt(),
            log_prefix: default_log_prefix(),
            exit_on_stop: default_exit_on_stop(),
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("opconsole")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConsoleError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            ConsoleError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }
}
