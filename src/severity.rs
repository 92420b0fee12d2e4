//! Severity vocabulary.
//!
//! # Responsibilities
//! - Define the closed, ordered set of severities (VERBOSE below INFO)
//! - Resolve any integer index to a label, falling back to `ANY`
//! - Parse severity names coming from configuration and the CLI
//!
//! # Design Decisions
//! - Indices are `i64` so every integer is a valid formatting input
//! - Unknown indices are not errors; they render as `ANY`

/// Label used for any index outside the canonical range.
pub const ANY_LABEL: &str = "ANY";

/// Ordered severity levels. Numeric order encodes increasing urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Verbose = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
    Fatal = 4,
}

impl Severity {
    /// All severities in increasing order of urgency.
    pub const ALL: [Severity; 5] = [
        Severity::Verbose,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Numeric index passed to the writer's `add` primitive.
    pub fn index(self) -> i64 {
        self as i64
    }

    /// Canonical label.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Verbose => "VERBOSE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    /// Map an index back to a severity, if it has one.
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Severity::Verbose),
            1 => Some(Severity::Info),
            2 => Some(Severity::Warn),
            3 => Some(Severity::Error),
            4 => Some(Severity::Fatal),
            _ => None,
        }
    }

    /// Parse a severity name, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "verbose" => Some(Severity::Verbose),
            "info" => Some(Severity::Info),
            "warn" | "warning" => Some(Severity::Warn),
            "error" => Some(Severity::Error),
            "fatal" => Some(Severity::Fatal),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Resolve a severity index to its label. Total over all integers.
pub fn label_for(index: i64) -> &'static str {
    match Severity::from_index(index) {
        Some(severity) => severity.label(),
        None => ANY_LABEL,
    }
}

/// Parse a threshold name from configuration.
///
/// Accepts the severity names plus `any`, which only lets records with
/// indices above FATAL through.
pub fn parse_threshold(name: &str) -> Option<i64> {
    if name.trim().eq_ignore_ascii_case("any") {
        return Some(Severity::Fatal.index() + 1);
    }
    Severity::parse(name).map(Severity::index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_labels_in_order() {
        let labels: Vec<&str> = (0..=4).map(label_for).collect();
        assert_eq!(labels, ["VERBOSE", "INFO", "WARN", "ERROR", "FATAL"]);
    }

    #[test]
    fn out_of_range_indices_are_any() {
        for index in [-1, -42, 5, 6, 1_000, i64::MIN, i64::MAX] {
            assert_eq!(label_for(index), "ANY", "index {index}");
        }
    }

    #[test]
    fn verbose_is_below_info() {
        assert!(Severity::Verbose < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
        assert_eq!(Severity::Verbose.index(), 0);
    }

    #[test]
    fn index_round_trips_for_known_levels() {
        for severity in Severity::ALL {
            assert_eq!(Severity::from_index(severity.index()), Some(severity));
        }
    }

    #[test]
    fn parse_names() {
        assert_eq!(Severity::parse("VERBOSE"), Some(Severity::Verbose));
        assert_eq!(Severity::parse(" warning "), Some(Severity::Warn));
        assert_eq!(Severity::parse("debug"), None);
        assert_eq!(parse_threshold("any"), Some(5));
        assert_eq!(parse_threshold("error"), Some(3));
        assert_eq!(parse_threshold("loud"), None);
    }
}
