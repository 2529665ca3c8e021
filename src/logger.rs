//! Leveled log sink used by the registry and the dispatch loop.
//!
//! The console never talks to `tracing` directly; it goes through
//! [`ConsoleLogger`] so that an embedding application can supply its own sink.

use std::sync::Arc;
use tracing::Level;

/// Prefix used by the default logger.
pub const DEFAULT_LOG_PREFIX: &str = "CONSOLE";

/// An opaque sink accepting leveled text messages.
pub trait ConsoleLogger: Send + Sync {
    /// Records a message at the given level.
    fn log(&self, level: Level, message: &str);

    fn debug(&self, message: &str) {
        self.log(Level::DEBUG, message);
    }

    fn info(&self, message: &str) {
        self.log(Level::INFO, message);
    }

    fn warn(&self, message: &str) {
        self.log(Level::WARN, message);
    }

    fn error(&self, message: &str) {
        self.log(Level::ERROR, message);
    }
}

/// Shared handle to a logger.
pub type SharedLogger = Arc<dyn ConsoleLogger>;

/// Default logger forwarding to `tracing`.
///
/// Timestamps and the output stream come from whichever subscriber the
/// process installed (see [`crate::logging`]).
#[derive(Debug, Clone)]
pub struct TracingLogger {
    prefix: String,
}

impl TracingLogger {
    /// Creates a logger tagging every record with `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Returns the prefix attached to each record.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_PREFIX)
    }
}

impl ConsoleLogger for TracingLogger {
    fn log(&self, level: Level, message: &str) {
        let prefix = self.prefix.as_str();
        match level {
            Level::ERROR => tracing::error!(prefix, "{message}"),
            Level::WARN => tracing::warn!(prefix, "{message}"),
            Level::INFO => tracing::info!(prefix, "{message}"),
            Level::DEBUG => tracing::debug!(prefix, "{message}"),
            _ => tracing::trace!(prefix, "{message}"),
        }
    }
}

/// Builds the default logger for `prefix`.
///
/// A [`TracingLogger`] emits nothing without a subscriber, so when the process
/// has not installed one, the stderr subscriber from [`crate::logging`] is
/// installed. An application's own subscriber is never replaced.
pub fn default_logger(prefix: impl Into<String>) -> SharedLogger {
    if !tracing::dispatcher::has_been_set() {
        crate::logging::init_stderr_logging();
    }
    Arc::new(TracingLogger::new(prefix))
}

/// Returns `logger` if supplied, otherwise [`default_logger`] with the default prefix.
pub fn or_default(logger: Option<SharedLogger>) -> SharedLogger {
    logger.unwrap_or_else(|| default_logger(DEFAULT_LOG_PREFIX))
}
