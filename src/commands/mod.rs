//! Command registration, tokenizing and the built-in commands.
//!
//! Parsing is kept separate from the dispatch loop so that registry policy and
//! tokenization can be unit tested without any input stream.

pub mod builtins;
pub mod handler;
pub mod help;
pub mod output;
pub mod registry;
pub mod tokenizer;

pub use builtins::{HELP_COMMAND, STOP_COMMAND};
pub use handler::{CommandHandler, SharedHandler};
pub use output::{CapturedOutput, ConsoleOutput};
pub use registry::{CommandRegistry, RegisterOutcome};
pub use tokenizer::{tokenize, ParsedLine};
