//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files and
//! default every field, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::logger::format::{LineFormat, DEFAULT_DATETIME_FORMAT};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    /// Output settings for the stream logger.
    pub logging: LoggingConfig,

    /// Correlation ID handling.
    pub correlation: CorrelationConfig,
}

/// Stream logger configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum severity (verbose, info, warn, error, fatal, any).
    pub level: String,

    /// `stdout`, `stderr` or a file path.
    pub destination: String,

    /// Line format.
    pub format: LineFormat,

    /// chrono format string for the timestamp field.
    pub datetime_format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            destination: "stderr".to_string(),
            format: LineFormat::Text,
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
        }
    }
}

/// Correlation ID configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorrelationConfig {
    /// Generate a UUID v4 when the caller supplies no ID.
    pub generate_if_absent: bool,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            generate_if_absent: true,
        }
    }
}
