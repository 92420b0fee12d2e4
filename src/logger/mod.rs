//! Correlated leveled logging.
//!
//! # Data Flow
//! ```text
//! caller
//!     → correlation.rs (CorrelationLogger::warn / warn_with / log)
//!     → writer.rs (LeveledWriter::add: threshold gate, deferred message)
//!     → labels hook (severity index → "VERBOSE" .. "FATAL" / "ANY")
//!     → format.rs (text or JSON line)
//!     → destination.rs (stdout, stderr, file, any writer)
//! ```
//!
//! `tracing_bridge.rs` is an alternative writer that ends in a `tracing`
//! subscriber instead of a destination.
//!
//! # Design Decisions
//! - Composition over inheritance: `CorrelationLogger` holds an `Arc<W>`
//! - The correlation ID always travels in the tag slot
//! - Write serialization lives in the writer, never in `CorrelationLogger`

pub mod correlation;
pub mod destination;
pub mod format;
pub mod stream;
pub mod tracing_bridge;
pub mod writer;

pub use correlation::{CorrelationId, CorrelationLogger};
pub use destination::Destination;
pub use format::LineFormat;
pub use stream::{StreamLogger, StreamLoggerBuilder};
pub use tracing_bridge::TracingWriter;
pub use writer::{CorrelationLabels, LeveledWriter, Message, SeverityLabels, StandardLabels};
