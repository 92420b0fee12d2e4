//! Shared utilities for integration tests.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use correlation_log::logger::{CorrelationLabels, Destination, StreamLogger};
use correlation_log::Severity;

/// In-memory destination that can be inspected after logging.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writer that hands its input over in small chunks, so a line written
/// without serialization would be torn apart by other threads.
#[derive(Clone)]
pub struct ChunkedWriter {
    inner: SharedBuffer,
    chunk: usize,
}

impl ChunkedWriter {
    pub fn new(inner: SharedBuffer, chunk: usize) -> Self {
        Self { inner, chunk }
    }
}

impl Write for ChunkedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = buf.len().min(self.chunk);
        self.inner.write(&buf[..n])?;
        std::thread::yield_now();
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Stream logger with the VERBOSE vocabulary writing into `buffer`.
#[allow(dead_code)]
pub fn stream_logger(buffer: &SharedBuffer, level: Severity) -> StreamLogger {
    StreamLogger::builder(Destination::writer(buffer.clone()))
        .labels(CorrelationLabels)
        .level(level)
        .build()
        .unwrap()
}
