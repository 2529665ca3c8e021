//! The read/dispatch loop.
//!
//! One line at a time: prompt, read, tokenize, look up, invoke. Nothing a
//! handler or the input stream does can terminate the loop except flipping the
//! lifecycle to Stopped (or the input reaching end of stream).

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::commands::{tokenize, CommandRegistry, ConsoleOutput, HELP_COMMAND};
use crate::lifecycle::Lifecycle;
use crate::logger::SharedLogger;

/// Line source consumed by the loop.
pub type BoxedInput = Box<dyn AsyncBufRead + Send + Unpin>;

/// What happened to a single input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Blank line; nothing dispatched.
    Empty,
    /// Handler ran and succeeded.
    Executed { command: String },
    /// Handler ran and reported a failure.
    Failed { command: String, error: String },
    /// No handler is bound to the name; `help` ran as a fallback.
    Unknown { command: String },
}

/// Everything the loop needs, cloned out of the owning `Console`.
pub(crate) struct Dispatcher {
    pub(crate) registry: Arc<CommandRegistry>,
    pub(crate) lifecycle: Arc<Lifecycle>,
    pub(crate) logger: SharedLogger,
    pub(crate) output: ConsoleOutput,
    pub(crate) prompt: String,
}

impl Dispatcher {
    /// Runs until the lifecycle leaves Running, then hands the input back.
    pub(crate) async fn run(&self, mut input: BoxedInput) -> BoxedInput {
        let mut line = String::new();

        while self.lifecycle.is_running() {
            self.output.print(&self.prompt);

            line.clear();
            match input.read_line(&mut line).await {
                Ok(0) => {
                    // A closed stream would otherwise report EOF forever.
                    self.logger.warn("Input stream closed, stopping console");
                    self.lifecycle.stop();
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    self.logger.error(&format!("Error reading command: {e}"));
                    self.output.println(&format!("Error reading command: {e}"));
                    continue;
                }
            }

            let outcome = self.dispatch_line(&line);
            self.logger.debug(&format!("Dispatched line: {outcome:?}"));
        }

        input
    }

    /// Tokenizes and dispatches one line.
    pub(crate) fn dispatch_line(&self, line: &str) -> DispatchOutcome {
        let Some(parsed) = tokenize(line) else {
            return DispatchOutcome::Empty;
        };

        match self.registry.get(&parsed.command) {
            Some(handler) => match handler.call(&parsed.args) {
                Ok(()) => DispatchOutcome::Executed {
                    command: parsed.command,
                },
                Err(e) => {
                    self.output
                        .println(&format!("Error executing command: {e}"));
                    DispatchOutcome::Failed {
                        command: parsed.command,
                        error: e.to_string(),
                    }
                }
            },
            None => {
                self.output.println(&format!("Unknown command: {parsed}"));
                if let Some(help) = self.registry.get(HELP_COMMAND) {
                    if let Err(e) = help.call(&[]) {
                        self.logger.debug(&format!("Fallback help failed: {e}"));
                    }
                }
                DispatchOutcome::Unknown {
                    command: parsed.command,
                }
            }
        }
    }
}
