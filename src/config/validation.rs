//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the level names a known severity
//! - Check the destination and timestamp format are usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: Config → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::Config;
use crate::logger::format::is_valid_datetime_format;
use crate::severity::parse_threshold;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown log level '{0}' (expected verbose, info, warn, error, fatal or any)")]
    UnknownLevel(String),

    #[error("logging destination is empty")]
    EmptyDestination,

    #[error("invalid datetime format '{0}'")]
    InvalidDatetimeFormat(String),
}

/// Validate a parsed configuration, collecting every error.
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let logging = &config.logging;

    if parse_threshold(&logging.level).is_none() {
        errors.push(ValidationError::UnknownLevel(logging.level.clone()));
    }

    if logging.destination.trim().is_empty() {
        errors.push(ValidationError::EmptyDestination);
    }

    if !is_valid_datetime_format(&logging.datetime_format) {
        errors.push(ValidationError::InvalidDatetimeFormat(
            logging.datetime_format.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&Config::default()), Ok(()));
    }

    #[test]
    fn test_all_errors_reported() {
        let mut config = Config::default();
        config.logging.level = "debug".into();
        config.logging.destination = "  ".into();
        config.logging.datetime_format = String::new();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::UnknownLevel("debug".into()),
                ValidationError::EmptyDestination,
                ValidationError::InvalidDatetimeFormat(String::new()),
            ]
        );
    }

    #[test]
    fn test_any_level_accepted() {
        let mut config = Config::default();
        config.logging.level = "ANY".into();
        assert!(validate_config(&config).is_ok());
    }
}
