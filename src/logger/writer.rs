//! The leveled-writer seam.
//!
//! # Responsibilities
//! - Define the gated `add(severity, message, tag)` primitive every writer exposes
//! - Carry a message either as text or as a deferred producer
//! - Define the pluggable severity-to-label hook
//!
//! # Design Decisions
//! - Writers follow the conventional calling contract: when `add` gets no
//!   message, the tag is promoted to the message and the writer's own program
//!   name fills the tag slot. `CorrelationLogger` never relies on it.
//! - A deferred message is evaluated by the writer, and only for records
//!   that pass the threshold.

use std::borrow::Cow;
use std::fmt;

use crate::error::LogResult;
use crate::severity::{label_for, ANY_LABEL};

/// Message payload of one record.
pub enum Message<'a> {
    /// Literal message text.
    Text(Cow<'a, str>),
    /// Producer invoked only if the record is emitted.
    Deferred(Box<dyn FnOnce() -> String + 'a>),
}

impl<'a> Message<'a> {
    pub fn text(text: impl Into<Cow<'a, str>>) -> Self {
        Message::Text(text.into())
    }

    pub fn deferred<F>(producer: F) -> Self
    where
        F: FnOnce() -> String + 'a,
    {
        Message::Deferred(Box::new(producer))
    }

    /// Pick between an explicit message and a deferred producer.
    ///
    /// The explicit message wins when both are given; the producer is then
    /// dropped without being called.
    pub fn pick<F>(message: Option<&'a str>, deferred: Option<F>) -> Option<Self>
    where
        F: FnOnce() -> String + 'a,
    {
        match (message, deferred) {
            (Some(text), _) => Some(Message::text(text)),
            (None, Some(producer)) => Some(Message::deferred(producer)),
            (None, None) => None,
        }
    }

    /// Produce the final text, running the deferred producer if needed.
    pub fn resolve(self) -> Cow<'a, str> {
        match self {
            Message::Text(text) => text,
            Message::Deferred(producer) => Cow::Owned(producer()),
        }
    }
}

impl fmt::Debug for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Message::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl<'a> From<&'a str> for Message<'a> {
    fn from(text: &'a str) -> Self {
        Message::text(text)
    }
}

impl From<String> for Message<'_> {
    fn from(text: String) -> Self {
        Message::text(text)
    }
}

/// A severity-gated log writer.
pub trait LeveledWriter: Send + Sync {
    /// Emit one record if `severity` passes the threshold.
    ///
    /// Returns `Ok(true)` both when the record was written and when it was
    /// suppressed. A suppressed record never evaluates a deferred message.
    fn add(&self, severity: i64, message: Option<Message<'_>>, tag: Option<&str>)
        -> LogResult<bool>;

    /// Lowest severity index that is emitted.
    fn threshold(&self) -> i64;

    /// Whether a record at `severity` would be emitted.
    fn enabled(&self, severity: i64) -> bool {
        severity >= self.threshold()
    }
}

/// Severity-to-label formatting hook.
pub trait SeverityLabels: Send + Sync {
    /// Label for `severity`. Must not fail for any input.
    fn label(&self, severity: i64) -> Cow<'static, str>;
}

impl<F> SeverityLabels for F
where
    F: Fn(i64) -> Cow<'static, str> + Send + Sync,
{
    fn label(&self, severity: i64) -> Cow<'static, str> {
        self(severity)
    }
}

/// The conventional DEBUG..FATAL vocabulary, with `ANY` at index 5.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardLabels;

impl SeverityLabels for StandardLabels {
    fn label(&self, severity: i64) -> Cow<'static, str> {
        Cow::Borrowed(match severity {
            0 => "DEBUG",
            1 => "INFO",
            2 => "WARN",
            3 => "ERROR",
            4 => "FATAL",
            _ => ANY_LABEL,
        })
    }
}

/// VERBOSE..FATAL vocabulary used by `CorrelationLogger`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CorrelationLabels;

impl SeverityLabels for CorrelationLabels {
    fn label(&self, severity: i64) -> Cow<'static, str> {
        Cow::Borrowed(label_for(severity))
    }
}
