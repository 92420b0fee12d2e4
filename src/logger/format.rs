//! Line formatting.
//!
//! Text lines follow the conventional template:
//!
//! ```text
//! <L>, [<timestamp> #<pid>] <LABEL> -- <tag>: <message>
//! ```
//!
//! where `<L>` is the first character of the label and the label is
//! right-aligned to five columns. JSON lines carry the same data as fields.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::LogResult;

/// Default timestamp format (ISO-8601 with microseconds).
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Output line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineFormat {
    #[default]
    Text,
    Json,
}

/// One record ready to be rendered.
#[derive(Debug, Clone, Serialize)]
pub struct Line<'a> {
    #[serde(rename = "ts")]
    pub timestamp: String,
    pub pid: u32,
    pub severity: &'a str,
    #[serde(rename = "correlation_id")]
    pub tag: &'a str,
    #[serde(rename = "msg")]
    pub message: &'a str,
}

impl<'a> Line<'a> {
    pub fn new(
        time: &DateTime<Local>,
        datetime_format: &str,
        severity: &'a str,
        tag: &'a str,
        message: &'a str,
    ) -> Self {
        Self {
            timestamp: time.format(datetime_format).to_string(),
            pid: std::process::id(),
            severity,
            tag,
            message,
        }
    }

    /// Render the line, including the trailing newline.
    pub fn render(&self, format: LineFormat) -> LogResult<String> {
        match format {
            LineFormat::Text => Ok(self.render_text()),
            LineFormat::Json => {
                let mut line = serde_json::to_string(self)?;
                line.push('\n');
                Ok(line)
            }
        }
    }

    fn render_text(&self) -> String {
        let initial = self.severity.chars().next().unwrap_or(' ');
        format!(
            "{}, [{} #{}] {:>5} -- {}: {}\n",
            initial, self.timestamp, self.pid, self.severity, self.tag, self.message
        )
    }
}

/// Whether `format` is a usable chrono format string.
pub fn is_valid_datetime_format(format: &str) -> bool {
    use chrono::format::{Item, StrftimeItems};

    !format.is_empty() && StrftimeItems::new(format).all(|item| !matches!(item, Item::Error))
}
