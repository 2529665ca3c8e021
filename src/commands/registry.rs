//! Command registry: name -> handler mapping with a fail-fast registration policy.
//!
//! Registration never blocks and never returns an error. Every attempt yields a
//! [`RegisterOutcome`] and a log record; rejected attempts leave the mapping
//! untouched.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, TryLockError};

use super::handler::{CommandHandler, SharedHandler};
use crate::lifecycle::Lifecycle;
use crate::logger::SharedLogger;

/// Result of a registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The name was new and the handler was inserted.
    Registered,
    /// The name existed and overwriting is enabled; the handler was replaced.
    Overwritten,
    /// The name existed and overwriting is disabled; nothing changed.
    Skipped,
    /// The console is running; nothing changed.
    RejectedRunning,
    /// Another registration held the lock; nothing changed.
    RejectedContended,
    /// The name was empty or contained whitespace; nothing changed.
    RejectedInvalidName,
}

impl RegisterOutcome {
    /// Returns true if the handler is now bound to the name.
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Registered | Self::Overwritten)
    }
}

/// Mapping from command name to handler.
///
/// Names are case-sensitive. Iteration order is lexicographic.
pub struct CommandRegistry {
    commands: RwLock<BTreeMap<String, SharedHandler>>,
    overwrite_commands: bool,
    lifecycle: Arc<Lifecycle>,
    logger: SharedLogger,
}

impl CommandRegistry {
    /// Creates an empty registry guarded by `lifecycle`.
    pub fn new(
        logger: SharedLogger,
        overwrite_commands: bool,
        lifecycle: Arc<Lifecycle>,
    ) -> Self {
        Self {
            commands: RwLock::new(BTreeMap::new()),
            overwrite_commands,
            lifecycle,
            logger,
        }
    }

    /// Registers a closure under `name`.
    pub fn register<F>(&self, name: impl Into<String>, handler: F) -> RegisterOutcome
    where
        F: Fn(&[String]) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.register_handler(name, Arc::new(handler))
    }

    /// Registers an already shared handler under `name`.
    pub fn register_handler(
        &self,
        name: impl Into<String>,
        handler: Arc<dyn CommandHandler>,
    ) -> RegisterOutcome {
        let name = name.into();

        if name.is_empty() || name.chars().any(char::is_whitespace) {
            self.logger
                .warn(&format!("Refusing to register invalid command name {name:?}"));
            return RegisterOutcome::RejectedInvalidName;
        }

        if self.lifecycle.is_running() {
            return self.reject_running(&name);
        }

        let mut commands = match self.commands.try_write() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => {
                self.logger.warn(&format!(
                    "Refusing to register command {name}: another registration is in progress"
                ));
                return RegisterOutcome::RejectedContended;
            }
        };

        self.insert_locked(&mut commands, name, handler)
    }

    /// Inserts with the write lock held. `begin_running` may have flipped the
    /// lifecycle between the unlocked check and lock acquisition, so the state
    /// is checked again here.
    fn insert_locked(
        &self,
        commands: &mut BTreeMap<String, SharedHandler>,
        name: String,
        handler: SharedHandler,
    ) -> RegisterOutcome {
        if self.lifecycle.is_running() {
            return self.reject_running(&name);
        }

        let outcome = if commands.contains_key(&name) {
            if !self.overwrite_commands {
                self.logger
                    .info(&format!("Command {name} already registered, skipping"));
                return RegisterOutcome::Skipped;
            }
            self.logger
                .info(&format!("Command {name} already registered, overwriting"));
            RegisterOutcome::Overwritten
        } else {
            RegisterOutcome::Registered
        };

        self.logger.info(&format!("Registering command {name}"));
        commands.insert(name, handler);
        outcome
    }

    fn reject_running(&self, name: &str) -> RegisterOutcome {
        self.logger
            .warn(&format!("Refusing to register command {name}: console is running"));
        RegisterOutcome::RejectedRunning
    }

    /// Flips the lifecycle to Running while holding the write lock, so no
    /// registration can be mid-flight across the transition.
    ///
    /// Returns `false` if the console was already running.
    pub(crate) fn begin_running(&self) -> bool {
        let _commands = self.commands.write().unwrap_or_else(PoisonError::into_inner);
        self.lifecycle.start()
    }

    /// Looks up the handler bound to `name`.
    pub fn get(&self, name: &str) -> Option<SharedHandler> {
        self.read().get(name).cloned()
    }

    /// Returns true if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// Returns all registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Whether re-registering a name replaces its handler.
    pub fn overwrite_commands(&self) -> bool {
        self.overwrite_commands
    }

    pub fn lifecycle(&self) -> &Arc<Lifecycle> {
        &self.lifecycle
    }

    pub fn logger(&self) -> &SharedLogger {
        &self.logger
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<String, SharedHandler>> {
        self.commands.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.names())
            .field("overwrite_commands", &self.overwrite_commands)
            .field("state", &self.lifecycle.state())
            .finish()
    }
}
