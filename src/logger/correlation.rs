//! Correlation-aware logger.
//!
//! # Responsibilities
//! - Carry one request's correlation ID into the tag slot of every record
//! - Expose one convenience method per severity, with explicit and deferred forms
//! - Compose any [`LeveledWriter`] instead of extending a concrete logger
//!
//! # Design Decisions
//! - The user's argument always lands in the message slot; the correlation ID
//!   always lands in the tag slot. The writer's "promote tag to message"
//!   convention is never triggered by a convenience call.
//! - Threshold checks and deferred evaluation belong to the writer.
//! - Instances are immutable after construction and cheap to derive per request.

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::error::LogResult;
use crate::logger::destination::Destination;
use crate::logger::stream::StreamLogger;
use crate::logger::writer::{CorrelationLabels, LeveledWriter, Message};
use crate::severity::Severity;

/// Identifier tying log lines to the request that produced them.
///
/// Absent and empty IDs are the same thing: both render as an empty tag field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CorrelationId(Option<String>);

impl CorrelationId {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        if id.is_empty() {
            Self(None)
        } else {
            Self(Some(id))
        }
    }

    pub fn none() -> Self {
        Self(None)
    }

    /// Generate a fresh UUID v4 correlation ID.
    pub fn generate() -> Self {
        Self::from(Uuid::new_v4())
    }

    /// The ID, or `None` when absent.
    pub fn get(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// The ID as rendered in the tag field.
    pub fn as_str(&self) -> &str {
        self.get().unwrap_or("")
    }

    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for CorrelationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CorrelationId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<Option<String>> for CorrelationId {
    fn from(id: Option<String>) -> Self {
        id.map(Self::new).unwrap_or_default()
    }
}

impl From<Option<&str>> for CorrelationId {
    fn from(id: Option<&str>) -> Self {
        id.map(Self::new).unwrap_or_default()
    }
}

impl From<Uuid> for CorrelationId {
    fn from(id: Uuid) -> Self {
        Self(Some(id.to_string()))
    }
}

/// Leveled logger that tags every record with a correlation ID.
pub struct CorrelationLogger<W: LeveledWriter = StreamLogger> {
    writer: Arc<W>,
    correlation_id: CorrelationId,
}

impl CorrelationLogger<StreamLogger> {
    /// Open `destination` with the VERBOSE..FATAL vocabulary.
    ///
    /// The destination is handed to [`StreamLogger`] unchanged; any open
    /// failure is its error.
    pub fn new(
        destination: impl Into<Destination>,
        correlation_id: impl Into<CorrelationId>,
    ) -> LogResult<Self> {
        let writer = StreamLogger::builder(destination)
            .labels(CorrelationLabels)
            .build()?;
        Ok(Self::with_writer(Arc::new(writer), correlation_id))
    }
}

impl<W: LeveledWriter> CorrelationLogger<W> {
    /// Compose an existing, possibly shared, writer.
    pub fn with_writer(writer: Arc<W>, correlation_id: impl Into<CorrelationId>) -> Self {
        Self {
            writer,
            correlation_id: correlation_id.into(),
        }
    }

    /// A logger for another request, sharing this one's writer.
    pub fn scoped(&self, correlation_id: impl Into<CorrelationId>) -> Self {
        Self::with_writer(Arc::clone(&self.writer), correlation_id)
    }

    pub fn correlation_id(&self) -> &CorrelationId {
        &self.correlation_id
    }

    pub fn writer(&self) -> &Arc<W> {
        &self.writer
    }

    /// Whether a record at `severity` would be written.
    pub fn enabled(&self, severity: Severity) -> bool {
        self.writer.enabled(severity.index())
    }

    /// Log with an explicit message, a deferred one, or both.
    ///
    /// The explicit message wins when both are given. The deferred producer
    /// runs at most once, and only if the writer lets the record through.
    pub fn log<F>(&self, severity: Severity, message: Option<&str>, deferred: Option<F>) -> LogResult<bool>
    where
        F: FnOnce() -> String,
    {
        self.add(severity, Message::pick(message, deferred))
    }

    fn add(&self, severity: Severity, message: Option<Message<'_>>) -> LogResult<bool> {
        // Always pass a message so the writer never promotes the tag.
        let message = message.unwrap_or_else(|| Message::text(""));
        self.writer
            .add(severity.index(), Some(message), Some(self.correlation_id.as_str()))
    }

    pub fn verbose(&self, message: &str) -> LogResult<bool> {
        self.add(Severity::Verbose, Some(Message::text(message)))
    }

    pub fn verbose_with(&self, deferred: impl FnOnce() -> String) -> LogResult<bool> {
        self.add(Severity::Verbose, Some(Message::deferred(deferred)))
    }

    pub fn info(&self, message: &str) -> LogResult<bool> {
        self.add(Severity::Info, Some(Message::text(message)))
    }

    pub fn info_with(&self, deferred: impl FnOnce() -> String) -> LogResult<bool> {
        self.add(Severity::Info, Some(Message::deferred(deferred)))
    }

    pub fn warn(&self, message: &str) -> LogResult<bool> {
        self.add(Severity::Warn, Some(Message::text(message)))
    }

    pub fn warn_with(&self, deferred: impl FnOnce() -> String) -> LogResult<bool> {
        self.add(Severity::Warn, Some(Message::deferred(deferred)))
    }

    pub fn error(&self, message: &str) -> LogResult<bool> {
        self.add(Severity::Error, Some(Message::text(message)))
    }

    pub fn error_with(&self, deferred: impl FnOnce() -> String) -> LogResult<bool> {
        self.add(Severity::Error, Some(Message::deferred(deferred)))
    }

    pub fn fatal(&self, message: &str) -> LogResult<bool> {
        self.add(Severity::Fatal, Some(Message::text(message)))
    }

    pub fn fatal_with(&self, deferred: impl FnOnce() -> String) -> LogResult<bool> {
        self.add(Severity::Fatal, Some(Message::deferred(deferred)))
    }
}

impl<W: LeveledWriter> Clone for CorrelationLogger<W> {
    fn clone(&self) -> Self {
        self.scoped(self.correlation_id.clone())
    }
}

impl<W: LeveledWriter> fmt::Debug for CorrelationLogger<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CorrelationLogger")
            .field("correlation_id", &self.correlation_id)
            .field("threshold", &self.writer.threshold())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every `add` call verbatim.
    #[derive(Default)]
    struct RecordingWriter {
        threshold: i64,
        calls: Mutex<Vec<(i64, Option<String>, Option<String>)>>,
    }

    impl LeveledWriter for RecordingWriter {
        fn add(&self, severity: i64, message: Option<Message<'_>>, tag: Option<&str>) -> LogResult<bool> {
            if severity < self.threshold {
                return Ok(true);
            }
            let message = message.map(|m| m.resolve().into_owned());
            self.calls
                .lock()
                .unwrap()
                .push((severity, message, tag.map(str::to_string)));
            Ok(true)
        }

        fn threshold(&self) -> i64 {
            self.threshold
        }
    }

    fn recording(threshold: i64, id: &str) -> CorrelationLogger<RecordingWriter> {
        let writer = RecordingWriter {
            threshold,
            ..RecordingWriter::default()
        };
        CorrelationLogger::with_writer(Arc::new(writer), id)
    }

    fn calls(logger: &CorrelationLogger<RecordingWriter>) -> Vec<(i64, Option<String>, Option<String>)> {
        logger.writer().calls.lock().unwrap().clone()
    }

    #[test]
    fn test_each_method_sends_message_and_tag() {
        let logger = recording(0, "req-1");
        logger.verbose("v").unwrap();
        logger.info("i").unwrap();
        logger.warn("w").unwrap();
        logger.error("e").unwrap();
        logger.fatal("f").unwrap();

        let expected: Vec<_> = [(0_i64, "v"), (1, "i"), (2, "w"), (3, "e"), (4, "f")]
            .into_iter()
            .map(|(sev, msg)| (sev, Some(msg.to_string()), Some("req-1".to_string())))
            .collect();
        assert_eq!(calls(&logger), expected);
    }

    #[test]
    fn test_deferred_forms_send_tag() {
        let logger = recording(0, "req-2");
        logger.verbose_with(|| "v".into()).unwrap();
        logger.info_with(|| "i".into()).unwrap();
        logger.warn_with(|| "w".into()).unwrap();
        logger.error_with(|| "e".into()).unwrap();
        logger.fatal_with(|| "f".into()).unwrap();

        let recorded = calls(&logger);
        assert_eq!(recorded.len(), 5);
        assert!(recorded.iter().all(|(_, _, tag)| tag.as_deref() == Some("req-2")));
        assert_eq!(recorded[4], (4_i64, Some("f".to_string()), Some("req-2".to_string())));
    }

    #[test]
    fn test_log_without_any_message_keeps_tag_in_place() {
        let logger = recording(0, "req-3");
        logger.log::<fn() -> String>(Severity::Warn, None, None).unwrap();

        assert_eq!(calls(&logger), vec![(2_i64, Some(String::new()), Some("req-3".to_string()))]);
    }

    #[test]
    fn test_log_prefers_explicit_message() {
        let logger = recording(0, "req-4");
        let mut runs = 0;
        logger
            .log(Severity::Info, Some("explicit"), Some(|| {
                runs += 1;
                "deferred".to_string()
            }))
            .unwrap();

        assert_eq!(runs, 0);
        assert_eq!(calls(&logger)[0].1.as_deref(), Some("explicit"));
    }

    #[test]
    fn test_absent_id_is_empty_tag() {
        let logger = recording(0, "");
        logger.info("hi").unwrap();
        assert_eq!(calls(&logger)[0].2.as_deref(), Some(""));
        assert!(logger.correlation_id().is_none());
    }

    #[test]
    fn test_scoped_shares_writer() {
        let logger = recording(0, "parent");
        let child = logger.scoped("child");
        logger.info("a").unwrap();
        child.info("b").unwrap();

        assert!(Arc::ptr_eq(logger.writer(), child.writer()));
        let tags: Vec<_> = calls(&logger).into_iter().map(|c| c.2.unwrap()).collect();
        assert_eq!(tags, ["parent", "child"]);
    }

    #[test]
    fn test_enabled_follows_writer_threshold() {
        let logger = recording(Severity::Info.index(), "x");
        assert!(!logger.enabled(Severity::Verbose));
        assert!(logger.enabled(Severity::Info));
        assert!(logger.enabled(Severity::Fatal));
    }

    #[test]
    fn test_correlation_id_conversions() {
        assert_eq!(CorrelationId::from(None::<String>), CorrelationId::none());
        assert_eq!(CorrelationId::from(Some("")), CorrelationId::none());
        assert_eq!(CorrelationId::from("abc").to_string(), "abc");

        let generated = CorrelationId::generate();
        assert!(Uuid::parse_str(generated.as_str()).is_ok());
        assert_ne!(generated, CorrelationId::generate());
    }
}
