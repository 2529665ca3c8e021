//! Common test utilities for console tests.

use std::sync::{Arc, Mutex};

use opconsole::commands::CapturedOutput;
use opconsole::{Console, ConsoleLogger, ConsoleOutput};
use tokio::io::AsyncBufRead;
use tracing::Level;

/// Logger that keeps every record for later assertions.
#[derive(Default)]
pub struct RecordingLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl RecordingLogger {
    pub fn messages(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub fn count_at(&self, level: Level) -> usize {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .count()
    }
}

impl ConsoleLogger for RecordingLogger {
    fn log(&self, level: Level, message: &str) {
        self.records
            .lock()
            .unwrap()
            .push((level, message.to_string()));
    }
}

/// Builds a console over `input` with captured output and a recording logger.
pub fn console_with(
    input: impl AsyncBufRead + Send + Unpin + 'static,
    overwrite: bool,
) -> (Console, CapturedOutput, Arc<RecordingLogger>) {
    let (output, captured) = ConsoleOutput::buffer();
    let logger = Arc::new(RecordingLogger::default());
    let console = Console::builder()
        .logger(logger.clone())
        .overwrite_commands(overwrite)
        .input(input)
        .output(output)
        .build();
    (console, captured, logger)
}

/// Builds a console reading a fixed script.
pub fn scripted(script: &'static str) -> (Console, CapturedOutput, Arc<RecordingLogger>) {
    console_with(script.as_bytes(), false)
}
