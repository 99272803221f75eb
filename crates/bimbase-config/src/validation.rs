//! Configuration validation module.
//!
//! Collects every problem in one pass so a bad deployment fails fast with
//! the full list instead of one error at a time.

use crate::AppConfig;
use bimbase_core::validation::rules;
use std::fmt;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    /// Application name is empty.
    EmptyAppName,
    /// Log level is invalid.
    InvalidLogLevel { value: String },
    /// Storage override keyed by an invalid resource name.
    InvalidResourceName { value: String },
    /// Retry attempts must be at least one.
    ZeroRetryAttempts,
    /// Initial retry delay exceeds the maximum delay.
    InvalidRetryDelay { initial_ms: u64, max_ms: u64 },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyAppName => write!(f, "Application name must not be empty"),
            Self::InvalidLogLevel { value } => {
                write!(
                    f,
                    "Invalid log level: '{}' (valid: trace, debug, info, warn, error)",
                    value
                )
            }
            Self::InvalidResourceName { value } => {
                write!(f, "Invalid resource name in storage.entities: '{}'", value)
            }
            Self::ZeroRetryAttempts => {
                write!(f, "storage.read_retry.max_attempts must be at least 1")
            }
            Self::InvalidRetryDelay { initial_ms, max_ms } => {
                write!(
                    f,
                    "Initial retry delay ({}ms) cannot exceed the maximum delay ({}ms)",
                    initial_ms, max_ms
                )
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Valid log levels.
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        if config.app.name.trim().is_empty() {
            errors.push(ConfigValidationError::EmptyAppName);
        }

        let level = config.logging.level.to_lowercase();
        if !Self::VALID_LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::InvalidLogLevel {
                value: config.logging.level.clone(),
            });
        }

        let mut resources: Vec<&String> = config.storage.entities.keys().collect();
        resources.sort();
        for resource in resources {
            if rules::valid_resource_name(resource).is_err() {
                errors.push(ConfigValidationError::InvalidResourceName {
                    value: resource.clone(),
                });
            }
        }

        let retry = &config.storage.read_retry;
        if retry.max_attempts == 0 {
            errors.push(ConfigValidationError::ZeroRetryAttempts);
        }
        if retry.initial_delay_ms > retry.max_delay_ms {
            errors.push(ConfigValidationError::InvalidRetryDelay {
                initial_ms: retry.initial_delay_ms,
                max_ms: retry.max_delay_ms,
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
