//! Routing of engine stdout/stderr into caller-supplied sinks.
//!
//! The engine writes raw bytes through WASI `fd_write`. Sinks receive whole lines,
//! without the trailing newline, the same way Emscripten's `print`/`printErr` hooks do.

use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;
use wasmtime_wasi::{HostOutputStream, StdoutStream, StreamResult, Subscribe};

/// A text-consuming callback. Called once per line of engine output.
pub type OutputSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Default stdout sink: `[DOOM] <line>` at info level.
///
/// Output is dropped when no tracing subscriber is installed; call
/// [`crate::logging::init`] or pass an explicit sink to see it.
pub fn default_print() -> OutputSink {
    Arc::new(|line: &str| tracing::info!(target: "doom", "[DOOM] {}", line))
}

/// Default stderr sink: `[DOOM ERROR] <line>` at error level.
pub fn default_print_err() -> OutputSink {
    Arc::new(|line: &str| tracing::error!(target: "doom", "[DOOM ERROR] {}", line))
}

/// Splits a byte stream into lines and hands each one to a sink.
pub struct LineBuffer {
    pending: Vec<u8>,
    sink: OutputSink,
}

impl LineBuffer {
    pub fn new(sink: OutputSink) -> Self {
        Self { pending: Vec::new(), sink }
    }

    pub fn push(&mut self, bytes: &[u8]) {
        self.pending.extend_from_slice(bytes);
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.emit(&line[..line.len() - 1]);
        }
    }

    /// Deliver any partial line still buffered.
    pub fn flush(&mut self) {
        if !self.pending.is_empty() {
            let line = std::mem::take(&mut self.pending);
            self.emit(&line);
        }
    }

    fn emit(&self, line: &[u8]) {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        (self.sink)(&String::from_utf8_lossy(line));
    }
}

impl Drop for LineBuffer {
    fn drop(&mut self) {
        self.flush();
    }
}

/// WASI stdout/stderr implementation backed by a shared [`LineBuffer`].
///
/// wasmtime asks for a fresh stream every time the guest touches the descriptor, so all
/// of them share one buffer and partial lines survive between writes.
#[derive(Clone)]
pub(crate) struct SinkStream {
    buffer: Arc<Mutex<LineBuffer>>,
}

impl SinkStream {
    pub(crate) fn new(sink: OutputSink) -> Self {
        Self {
            buffer: Arc::new(Mutex::new(LineBuffer::new(sink))),
        }
    }
}

impl StdoutStream for SinkStream {
    fn stream(&self) -> Box<dyn HostOutputStream> {
        Box::new(self.clone())
    }

    fn isatty(&self) -> bool {
        false
    }
}

#[async_trait::async_trait]
impl Subscribe for SinkStream {
    async fn ready(&mut self) {}
}

impl HostOutputStream for SinkStream {
    fn write(&mut self, bytes: Bytes) -> StreamResult<()> {
        self.buffer.lock().push(&bytes);
        Ok(())
    }

    fn flush(&mut self) -> StreamResult<()> {
        // Guest-side flushes happen mid-line (printf without '\n'); keep buffering.
        Ok(())
    }

    fn check_write(&mut self) -> StreamResult<usize> {
        Ok(64 * 1024)
    }
}
