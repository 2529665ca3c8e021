//! Error types for the console.
//!
//! Registration never fails with an error; see [`crate::commands::RegisterOutcome`].
//! These variants cover configuration, IO and lifecycle misuse.

use thiserror::Error;

/// Main error type for console operations.
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// Configuration errors (unreadable file, invalid TOML, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors outside the dispatch loop (stdin/stdout setup, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// `start` was called while the dispatch loop is already running.
    #[error("Console is already running")]
    AlreadyRunning,

    /// Internal errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConsoleError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "Configuration Error",
            Self::Io(_) => "IO Error",
            Self::AlreadyRunning => "Lifecycle Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using ConsoleError.
pub type Result<T> = std::result::Result<T, ConsoleError>;
