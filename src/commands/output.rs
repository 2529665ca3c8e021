//! Shared text output for the console protocol.
//!
//! Prompts, notices and built-in command output all go through one
//! [`ConsoleOutput`] so that an embedding application (or a test) can redirect
//! them away from stdout.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

type BoxedWriter = Box<dyn Write + Send>;

/// A cloneable, thread-safe text sink.
#[derive(Clone)]
pub struct ConsoleOutput {
    inner: Arc<Mutex<BoxedWriter>>,
}

impl ConsoleOutput {
    /// Creates an output writing to `writer`.
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Creates an output writing to the process's standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Creates an in-memory output and a handle for reading what was written.
    pub fn buffer() -> (Self, CapturedOutput) {
        let captured = CapturedOutput::default();
        (Self::new(captured.clone()), captured)
    }

    /// Writes `text` as-is and flushes.
    pub fn print(&self, text: &str) {
        let mut writer = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let result = match writer.write_all(text.as_bytes()) {
            Ok(()) => writer.flush(),
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            tracing::debug!("Console output write failed: {e}");
        }
    }

    /// Writes `line` followed by a newline.
    pub fn println(&self, line: &str) {
        self.print(&format!("{line}\n"));
    }
}

impl std::fmt::Debug for ConsoleOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleOutput").finish_non_exhaustive()
    }
}

/// In-memory buffer filled by a [`ConsoleOutput::buffer`] output.
#[derive(Clone, Default)]
pub struct CapturedOutput {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CapturedOutput {
    /// Returns everything written so far as (lossy) UTF-8.
    pub fn contents(&self) -> String {
        let bytes = self.bytes.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
