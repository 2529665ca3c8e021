//! Command-line argument parsing for the console binary.

use clap::Parser;
use opconsole::config::{Config, ConsoleSettings};
use std::path::PathBuf;

/// A minimal interactive operator console.
#[derive(Parser, Debug)]
#[command(name = "opconsole")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(long, value_name = "PATH", env = "OPCONSOLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Replace handlers when a command name is registered twice
    #[arg(long)]
    pub overwrite_commands: bool,

    /// Prompt printed before each command
    #[arg(long, value_name = "PROMPT")]
    pub prompt: Option<String>,

    /// Keep the process alive after the console stops (until Ctrl+C)
    #[arg(long)]
    pub no_exit: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Applies flags on top of file settings. Flags only ever switch options on.
    pub fn apply(&self, settings: &mut ConsoleSettings) {
        if self.overwrite_commands {
            settings.overwrite_commands = true;
        }
        if let Some(prompt) = &self.prompt {
            settings.prompt = prompt.clone();
        }
        if self.no_exit {
            settings.exit_on_stop = false;
        }
    }
}
