//! The handler abstraction bound to each command name.

use std::sync::Arc;

/// A unit of behavior invoked with the argument tokens of a command line.
///
/// Failures are reported back to the dispatch loop, which prints them and
/// keeps running.
pub trait CommandHandler: Send + Sync {
    /// Runs the command with the tokens following the command name.
    fn call(&self, args: &[String]) -> anyhow::Result<()>;
}

impl<F> CommandHandler for F
where
    F: Fn(&[String]) -> anyhow::Result<()> + Send + Sync,
{
    fn call(&self, args: &[String]) -> anyhow::Result<()> {
        self(args)
    }
}

/// Shared, type-erased handler as stored in the registry.
pub type SharedHandler = Arc<dyn CommandHandler>;
