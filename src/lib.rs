//! opconsole - a minimal interactive command console for long-running processes.
//!
//! Register handlers on a [`Console`], start it, and operators can type
//! `help`, `stop` or any registered command on stdin.

pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod lifecycle;
pub mod logger;
pub mod logging;

pub use commands::{CommandHandler, ConsoleOutput, RegisterOutcome};
pub use console::{Console, ConsoleBuilder, ConsoleHandle};
pub use error::{ConsoleError, Result};
pub use lifecycle::ConsoleState;
pub use logger::{ConsoleLogger, SharedLogger, TracingLogger};
