//! Running/Stopping/Stopped state shared by the registry guard and the dispatch loop.

use std::sync::atomic::{AtomicU8, Ordering};

const STOPPED: u8 = 0;
const RUNNING: u8 = 1;
const STOPPING: u8 = 2;

/// Observable lifecycle state of a console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleState {
    /// No loop is alive; the console can be started.
    Stopped,
    /// The loop is reading and dispatching.
    Running,
    /// A stop was requested; the loop is winding down and still holds its input.
    Stopping,
}

/// Single source of truth for whether the dispatch loop is running.
///
/// Only state transitions are exposed; the flag itself is never handed out.
#[derive(Debug, Default)]
pub struct Lifecycle {
    state: AtomicU8,
}

impl Lifecycle {
    /// Creates a lifecycle in the Stopped state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transitions Stopped -> Running.
    ///
    /// Returns `false` if the console was not fully stopped.
    pub fn start(&self) -> bool {
        self.transition(STOPPED, RUNNING)
    }

    /// Transitions Running -> Stopping. The loop exits at its next check.
    ///
    /// Returns `false` if the console was not running.
    pub fn stop(&self) -> bool {
        self.transition(RUNNING, STOPPING)
    }

    /// Transitions to Stopped once the loop has released its resources.
    pub(crate) fn finish(&self) {
        self.state.store(STOPPED, Ordering::Release);
    }

    /// Returns true while the dispatch loop should keep running.
    pub fn is_running(&self) -> bool {
        self.state.load(Ordering::Acquire) == RUNNING
    }

    /// Returns the current state.
    pub fn state(&self) -> ConsoleState {
        match self.state.load(Ordering::Acquire) {
            RUNNING => ConsoleState::Running,
            STOPPING => ConsoleState::Stopping,
            _ => ConsoleState::Stopped,
        }
    }

    fn transition(&self, from: u8, to: u8) -> bool {
        self.state
            .compare_exchange(from, to, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}
