//! Correlated leveled logging.
//!
//! Adds a VERBOSE severity below INFO and puts a request correlation ID in
//! the tag slot of every line:
//!
//! ```text
//! E, [2024-03-09T14:05:07.123456 #4242] ERROR -- abc-123: boom
//! ```
//!
//! ```rust,no_run
//! use correlation_log::{CorrelationLogger, Destination};
//!
//! let logger = CorrelationLogger::new(Destination::Stderr, "abc-123")?;
//! logger.error("boom")?;
//! logger.verbose_with(|| format!("expensive {}", 42))?;
//! # Ok::<(), correlation_log::LogError>(())
//! ```

pub mod config;
pub mod error;
pub mod logger;
pub mod severity;

pub use config::Config;
pub use error::{LogError, LogResult};
pub use logger::{CorrelationId, CorrelationLogger, Destination, LeveledWriter, StreamLogger};
pub use severity::{label_for, Severity};
