//! Leveled writer backed by `tracing`.
//!
//! Lets a `CorrelationLogger` feed an application's existing subscriber
//! instead of a file. The correlation ID becomes a structured field.
//!
//! Severity mapping: VERBOSE → DEBUG, INFO → INFO, WARN → WARN, everything
//! from ERROR up (including unknown indices) → ERROR.

use std::borrow::Cow;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::error::LogResult;
use crate::logger::writer::{CorrelationLabels, LeveledWriter, Message, SeverityLabels};
use crate::severity::Severity;

/// Writer that turns records into `tracing` events.
pub struct TracingWriter {
    threshold: AtomicI64,
    labels: Box<dyn SeverityLabels>,
}

impl TracingWriter {
    pub fn new(level: Severity) -> Self {
        Self {
            threshold: AtomicI64::new(level.index()),
            labels: Box::new(CorrelationLabels),
        }
    }

    pub fn with_labels(mut self, labels: impl SeverityLabels + 'static) -> Self {
        self.labels = Box::new(labels);
        self
    }

    pub fn set_level(&self, level: Severity) {
        self.threshold.store(level.index(), Ordering::SeqCst);
    }
}

impl Default for TracingWriter {
    fn default() -> Self {
        Self::new(Severity::Verbose)
    }
}

impl LeveledWriter for TracingWriter {
    fn add(&self, severity: i64, message: Option<Message<'_>>, tag: Option<&str>) -> LogResult<bool> {
        if severity < self.threshold() {
            return Ok(true);
        }

        let (message, correlation_id) = match message {
            Some(message) => (message.resolve(), tag.unwrap_or("")),
            None => (Cow::Borrowed(tag.unwrap_or("")), ""),
        };
        let label = self.labels.label(severity);

        match Severity::from_index(severity) {
            Some(Severity::Verbose) => {
                tracing::debug!(correlation_id, severity = %label, "{}", message)
            }
            Some(Severity::Info) => {
                tracing::info!(correlation_id, severity = %label, "{}", message)
            }
            Some(Severity::Warn) => {
                tracing::warn!(correlation_id, severity = %label, "{}", message)
            }
            Some(Severity::Error) | Some(Severity::Fatal) | None => {
                tracing::error!(correlation_id, severity = %label, "{}", message)
            }
        }
        Ok(true)
    }

    fn threshold(&self) -> i64 {
        self.threshold.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for TracingWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TracingWriter")
            .field("threshold", &self.threshold())
            .finish_non_exhaustive()
    }
}
