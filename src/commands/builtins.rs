//! Built-in commands injected by `Console::start` (`help`, `stop`).

use std::sync::{Arc, Weak};

use super::help::render_help;
use super::output::ConsoleOutput;
use super::registry::CommandRegistry;
use crate::lifecycle::Lifecycle;
use crate::logger::SharedLogger;

pub const HELP_COMMAND: &str = "help";
pub const STOP_COMMAND: &str = "stop";

/// Builds the `help` handler: lists every registered command name.
///
/// Holds the registry weakly; the registry owns this handler.
pub fn help_handler(
    registry: Weak<CommandRegistry>,
    output: ConsoleOutput,
) -> impl Fn(&[String]) -> anyhow::Result<()> + Send + Sync + 'static {
    move |_: &[String]| -> anyhow::Result<()> {
        let registry = registry
            .upgrade()
            .ok_or_else(|| anyhow::anyhow!("command registry is no longer available"))?;
        output.print(&render_help(registry.names()));
        Ok(())
    }
}

/// Builds the `stop` handler: flips the lifecycle so the loop exits after
/// the current iteration.
pub fn stop_handler(
    lifecycle: Arc<Lifecycle>,
    logger: SharedLogger,
    output: ConsoleOutput,
) -> impl Fn(&[String]) -> anyhow::Result<()> + Send + Sync + 'static {
    move |_: &[String]| -> anyhow::Result<()> {
        logger.info("Received stop command via console");
        output.println("Stopping application...");
        lifecycle.stop();
        Ok(())
    }
}

/// Registers `help` and `stop` through the normal registration path, so an
/// earlier user registration of either name wins unless overwriting is on.
pub fn register_builtins(registry: &Arc<CommandRegistry>, output: &ConsoleOutput) {
    registry.register(
        HELP_COMMAND,
        help_handler(Arc::downgrade(registry), output.clone()),
    );
    registry.register(
        STOP_COMMAND,
        stop_handler(
            registry.lifecycle().clone(),
            registry.logger().clone(),
            output.clone(),
        ),
    );
}
