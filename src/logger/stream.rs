//! Line-oriented leveled logger.
//!
//! # Responsibilities
//! - Own the destination sink and serialize writes to it
//! - Gate records on an atomically stored threshold
//! - Resolve labels through the pluggable hook and render lines
//!
//! # Design Decisions
//! - One `write_all` per line under a mutex, so lines never interleave
//! - Deferred messages are resolved before taking the lock
//! - A closed logger fails before running a deferred message
//! - A poisoned lock is recovered rather than disabling logging
//! - Suppressed records return `Ok(true)`, same as written ones

use std::borrow::Cow;
use std::io::Write;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Local;

use crate::config::LoggingConfig;
use crate::error::{LogError, LogResult};
use crate::logger::destination::Destination;
use crate::logger::format::{is_valid_datetime_format, Line, LineFormat, DEFAULT_DATETIME_FORMAT};
use crate::logger::writer::{CorrelationLabels, LeveledWriter, Message, SeverityLabels, StandardLabels};
use crate::severity::{parse_threshold, Severity};

/// Threshold used while silenced. Nothing passes it.
const SILENCED: i64 = i64::MAX;

/// Conventional leveled logger writing formatted lines to a destination.
pub struct StreamLogger {
    sink: Mutex<Option<Box<dyn Write + Send>>>,
    threshold: AtomicI64,
    labels: Box<dyn SeverityLabels>,
    format: LineFormat,
    datetime_format: String,
    progname: Option<String>,
}

impl StreamLogger {
    /// Open `destination` with the standard DEBUG..FATAL labels and no threshold.
    pub fn new(destination: impl Into<Destination>) -> LogResult<Self> {
        Self::builder(destination).build()
    }

    pub fn builder(destination: impl Into<Destination>) -> StreamLoggerBuilder {
        StreamLoggerBuilder::new(destination.into())
    }

    /// Build a logger with the VERBOSE vocabulary from configuration.
    pub fn from_config(config: &LoggingConfig) -> LogResult<Self> {
        let threshold = parse_threshold(&config.level).unwrap_or_else(|| {
            tracing::warn!(level = %config.level, "Unknown log level, falling back to info");
            Severity::Info.index()
        });

        Self::builder(Destination::parse(&config.destination))
            .threshold(threshold)
            .labels(CorrelationLabels)
            .format(config.format)
            .datetime_format(config.datetime_format.clone())
            .build()
    }

    pub fn set_threshold(&self, threshold: i64) {
        self.threshold.store(threshold, Ordering::SeqCst);
    }

    pub fn set_level(&self, severity: Severity) {
        self.set_threshold(severity.index());
    }

    /// Run `f` with every record suppressed, then restore the previous threshold.
    pub fn silence<T>(&self, f: impl FnOnce() -> T) -> T {
        let previous = self.threshold.swap(SILENCED, Ordering::SeqCst);
        let _restore = RestoreThreshold {
            threshold: &self.threshold,
            previous,
        };
        f()
    }

    /// Flush and release the sink. Later writes fail with [`LogError::Closed`].
    pub fn close(&self) -> LogResult<()> {
        if let Some(mut sink) = self.lock_sink().take() {
            sink.flush()?;
        }
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.lock_sink().is_none()
    }

    fn lock_sink(&self) -> MutexGuard<'_, Option<Box<dyn Write + Send>>> {
        self.sink.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_line(&self, line: &str) -> LogResult<()> {
        let mut guard = self.lock_sink();
        let sink = guard.as_mut().ok_or(LogError::Closed)?;
        sink.write_all(line.as_bytes())?;
        sink.flush()?;
        Ok(())
    }
}

impl LeveledWriter for StreamLogger {
    fn add(&self, severity: i64, message: Option<Message<'_>>, tag: Option<&str>) -> LogResult<bool> {
        if severity < self.threshold() {
            return Ok(true);
        }
        if self.is_closed() {
            return Err(LogError::Closed);
        }

        let progname = self.progname.as_deref();
        let (message, tag) = match message {
            Some(message) => (message.resolve(), tag.or(progname)),
            // No message: the tag is the message, the program name is the tag.
            None => (Cow::Borrowed(tag.or(progname).unwrap_or("")), progname),
        };

        let label = self.labels.label(severity);
        let line = Line::new(
            &Local::now(),
            &self.datetime_format,
            &label,
            tag.unwrap_or(""),
            &message,
        )
        .render(self.format)?;

        self.write_line(&line)?;
        Ok(true)
    }

    fn threshold(&self) -> i64 {
        self.threshold.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for StreamLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamLogger")
            .field("threshold", &self.threshold())
            .field("format", &self.format)
            .field("datetime_format", &self.datetime_format)
            .field("progname", &self.progname)
            .finish_non_exhaustive()
    }
}

struct RestoreThreshold<'a> {
    threshold: &'a AtomicI64,
    previous: i64,
}

impl Drop for RestoreThreshold<'_> {
    fn drop(&mut self) {
        self.threshold.store(self.previous, Ordering::SeqCst);
    }
}

/// Builder for [`StreamLogger`].
pub struct StreamLoggerBuilder {
    destination: Destination,
    threshold: i64,
    labels: Box<dyn SeverityLabels>,
    format: LineFormat,
    datetime_format: String,
    progname: Option<String>,
}

impl StreamLoggerBuilder {
    fn new(destination: Destination) -> Self {
        Self {
            destination,
            threshold: 0,
            labels: Box::new(StandardLabels),
            format: LineFormat::Text,
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
            progname: None,
        }
    }

    pub fn threshold(mut self, threshold: i64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn level(self, severity: Severity) -> Self {
        self.threshold(severity.index())
    }

    pub fn labels(mut self, labels: impl SeverityLabels + 'static) -> Self {
        self.labels = Box::new(labels);
        self
    }

    pub fn format(mut self, format: LineFormat) -> Self {
        self.format = format;
        self
    }

    pub fn datetime_format(mut self, datetime_format: impl Into<String>) -> Self {
        self.datetime_format = datetime_format.into();
        self
    }

    /// Default tag used when a call supplies none.
    pub fn progname(mut self, progname: impl Into<String>) -> Self {
        self.progname = Some(progname.into());
        self
    }

    pub fn build(self) -> LogResult<StreamLogger> {
        if !is_valid_datetime_format(&self.datetime_format) {
            return Err(LogError::InvalidDatetimeFormat(self.datetime_format));
        }
        let header_timestamp = Local::now().format(&self.datetime_format).to_string();
        let sink = self.destination.open(&header_timestamp)?;

        Ok(StreamLogger {
            sink: Mutex::new(Some(sink)),
            threshold: AtomicI64::new(self.threshold),
            labels: self.labels,
            format: self.format,
            datetime_format: self.datetime_format,
            progname: self.progname,
        })
    }
}
