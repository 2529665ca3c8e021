//! The console aggregate: registry, lifecycle and the background dispatch loop.
//!
//! A `Console` is configured and populated with commands while Stopped, then
//! [`Console::start`] injects `help`/`stop`, flips the lifecycle to Running
//! and spawns the loop on the current tokio runtime. `start` never blocks on
//! the loop; completion is observed through the returned [`ConsoleHandle`] or
//! through the channel passed to [`Console::start_with_signal`].
//!
//! Handlers run synchronously on the loop task. A handler that never returns
//! stalls the console, and a `stop` only takes effect once the current read
//! and handler have finished.

mod dispatch;

pub use dispatch::{BoxedInput, DispatchOutcome};

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::io::{AsyncBufRead, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::commands::builtins::register_builtins;
use crate::commands::{CommandHandler, CommandRegistry, ConsoleOutput, RegisterOutcome};
use crate::config::ConsoleSettings;
use crate::error::{ConsoleError, Result};
use crate::lifecycle::{ConsoleState, Lifecycle};
use crate::logger::{self, SharedLogger};
use dispatch::Dispatcher;

/// Prompt printed before each read.
pub const DEFAULT_PROMPT: &str = ">> ";

/// Interactive command console.
pub struct Console {
    registry: Arc<CommandRegistry>,
    lifecycle: Arc<Lifecycle>,
    logger: SharedLogger,
    output: ConsoleOutput,
    prompt: String,
    /// Taken by a running loop and put back when it exits.
    input: Arc<Mutex<Option<BoxedInput>>>,
}

impl Console {
    /// Creates a console reading stdin and writing stdout.
    ///
    /// With no logger a [`TracingLogger`](crate::logger::TracingLogger) is
    /// used; if the process has not installed a `tracing` subscriber yet, a
    /// timestamped stderr subscriber is installed so registration warnings are
    /// not lost.
    pub fn new(logger: Option<SharedLogger>, overwrite_commands: bool) -> Self {
        let mut builder = Self::builder().overwrite_commands(overwrite_commands);
        if let Some(logger) = logger {
            builder = builder.logger(logger);
        }
        builder.build()
    }

    pub fn builder() -> ConsoleBuilder {
        ConsoleBuilder::default()
    }

    /// Registers a closure under `name`. See [`CommandRegistry::register`].
    pub fn register<F>(&self, name: impl Into<String>, handler: F) -> RegisterOutcome
    where
        F: Fn(&[String]) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.registry.register(name, handler)
    }

    /// Registers a shared handler under `name`.
    pub fn register_handler(
        &self,
        name: impl Into<String>,
        handler: Arc<dyn CommandHandler>,
    ) -> RegisterOutcome {
        self.registry.register_handler(name, handler)
    }

    /// Starts the dispatch loop in the background.
    pub fn start(&self) -> Result<ConsoleHandle> {
        self.launch(None)
    }

    /// Starts the dispatch loop; `done` receives exactly one message when the
    /// loop exits.
    pub fn start_with_signal(&self, done: mpsc::Sender<()>) -> Result<ConsoleHandle> {
        self.launch(Some(done))
    }

    fn launch(&self, done: Option<mpsc::Sender<()>>) -> Result<ConsoleHandle> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|_| ConsoleError::internal("console must be started inside a tokio runtime"))?;

        if self.lifecycle.state() != ConsoleState::Stopped {
            return Err(ConsoleError::AlreadyRunning);
        }

        let input = self
            .input
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or_else(|| {
                ConsoleError::internal("input stream is still held by a previous run")
            })?;

        register_builtins(&self.registry, &self.output);

        self.logger.info("Starting console...");
        self.output.println("Starting console...");

        if !self.registry.begin_running() {
            self.restore_input(input);
            return Err(ConsoleError::AlreadyRunning);
        }

        let dispatcher = Dispatcher {
            registry: self.registry.clone(),
            lifecycle: self.lifecycle.clone(),
            logger: self.logger.clone(),
            output: self.output.clone(),
            prompt: self.prompt.clone(),
        };
        let slot = self.input.clone();

        let task = runtime.spawn(async move {
            let input = dispatcher.run(input).await;

            dispatcher.logger.info("Console stopped.");
            dispatcher.output.println("Console stopped.");
            *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(input);
            // Stopped is only observable once the input is back in the slot.
            dispatcher.lifecycle.finish();

            if let Some(done) = done {
                if done.send(()).await.is_err() {
                    dispatcher
                        .logger
                        .warn("Completion receiver dropped before console stopped");
                }
            }
        });

        Ok(ConsoleHandle {
            task,
            lifecycle: self.lifecycle.clone(),
        })
    }

    fn restore_input(&self, input: BoxedInput) {
        *self.input.lock().unwrap_or_else(PoisonError::into_inner) = Some(input);
    }

    pub fn state(&self) -> ConsoleState {
        self.lifecycle.state()
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle.is_running()
    }

    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    pub fn logger(&self) -> &SharedLogger {
        &self.logger
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("registry", &self.registry)
            .field("prompt", &self.prompt)
            .finish_non_exhaustive()
    }
}

/// Handle to a running dispatch loop.
#[derive(Debug)]
pub struct ConsoleHandle {
    task: JoinHandle<()>,
    lifecycle: Arc<Lifecycle>,
}

impl ConsoleHandle {
    /// Waits for the loop to exit.
    pub async fn wait(self) -> Result<()> {
        self.task
            .await
            .map_err(|e| ConsoleError::internal(format!("console task failed: {e}")))
    }

    /// Asks the loop to stop; takes effect at the top of the next iteration.
    ///
    /// A read that is already blocked is not interrupted.
    pub fn request_stop(&self) -> bool {
        self.lifecycle.stop()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Builder for [`Console`].
pub struct ConsoleBuilder {
    logger: Option<SharedLogger>,
    log_prefix: Option<String>,
    overwrite_commands: bool,
    prompt: String,
    input: Option<BoxedInput>,
    output: Option<ConsoleOutput>,
}

impl Default for ConsoleBuilder {
    fn default() -> Self {
        Self {
            logger: None,
            log_prefix: None,
            overwrite_commands: false,
            prompt: DEFAULT_PROMPT.to_string(),
            input: None,
            output: None,
        }
    }
}

impl ConsoleBuilder {
    /// Applies settings loaded from the config file.
    pub fn settings(mut self, settings: &ConsoleSettings) -> Self {
        self.overwrite_commands = settings.overwrite_commands;
        self.prompt = settings.prompt.clone();
        self.log_prefix = Some(settings.log_prefix.clone());
        self
    }

    /// Uses `logger` instead of the default tracing logger.
    pub fn logger(mut self, logger: SharedLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn overwrite_commands(mut self, overwrite: bool) -> Self {
        self.overwrite_commands = overwrite;
        self
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Reads lines from `input` instead of stdin.
    pub fn input(mut self, input: impl AsyncBufRead + Send + Unpin + 'static) -> Self {
        self.input = Some(Box::new(input));
        self
    }

    /// Writes prompts and notices to `output` instead of stdout.
    pub fn output(mut self, output: ConsoleOutput) -> Self {
        self.output = Some(output);
        self
    }

    pub fn output_writer(self, writer: impl Write + Send + 'static) -> Self {
        self.output(ConsoleOutput::new(writer))
    }

    pub fn build(self) -> Console {
        let logger = match (self.logger, self.log_prefix) {
            (Some(logger), _) => logger,
            (None, Some(prefix)) => logger::default_logger(prefix),
            (None, None) => logger::or_default(None),
        };
        let lifecycle = Arc::new(Lifecycle::new());
        let registry = Arc::new(CommandRegistry::new(
            logger.clone(),
            self.overwrite_commands,
            lifecycle.clone(),
        ));
        let input = self
            .input
            .unwrap_or_else(|| Box::new(BufReader::new(tokio::io::stdin())));

        Console {
            registry,
            lifecycle,
            logger,
            output: self.output.unwrap_or_else(ConsoleOutput::stdout),
            prompt: self.prompt,
            input: Arc::new(Mutex::new(Some(input))),
        }
    }
}
