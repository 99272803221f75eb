//! Unified error types for the data access layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for Bimbase.
///
/// The first four variants form the closed taxonomy every DAO reports
/// through. Backend-specific failures are translated into one of them so
/// upper layers never depend on a storage engine's own error types.
/// "Not found" on a point lookup and "zero matched" on a bulk operation are
/// ordinary results and never surface as errors.
#[derive(Error, Debug)]
pub enum BimError {
    // ============ DAO Errors ============
    /// Update target (or other required entity) does not exist
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Uniqueness, required-field or type rule broken
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// The implementation cannot evaluate the requested operation
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Backing store unreachable
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    // ============ Infrastructure Errors ============
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// The kind of a DAO failure, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DaoErrorKind {
    NotFound,
    ConstraintViolation,
    UnsupportedOperation,
    StorageUnavailable,
}

impl BimError {
    /// Returns the DAO error kind, or `None` for errors outside the DAO taxonomy.
    #[must_use]
    pub const fn kind(&self) -> Option<DaoErrorKind> {
        match self {
            Self::NotFound { .. } => Some(DaoErrorKind::NotFound),
            Self::ConstraintViolation(_) => Some(DaoErrorKind::ConstraintViolation),
            Self::UnsupportedOperation(_) => Some(DaoErrorKind::UnsupportedOperation),
            Self::StorageUnavailable(_) => Some(DaoErrorKind::StorageUnavailable),
            Self::Configuration(_) => None,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::ConstraintViolation(_) => "CONSTRAINT_VIOLATION",
            Self::UnsupportedOperation(_) => "UNSUPPORTED_OPERATION",
            Self::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a constraint violation error.
    #[must_use]
    pub fn constraint<T: Into<String>>(message: T) -> Self {
        Self::ConstraintViolation(message.into())
    }

    /// Creates an unsupported operation error.
    #[must_use]
    pub fn unsupported<T: Into<String>>(message: T) -> Self {
        Self::UnsupportedOperation(message.into())
    }

    /// Creates a storage unavailable error.
    #[must_use]
    pub fn unavailable<T: Into<String>>(message: T) -> Self {
        Self::StorageUnavailable(message.into())
    }

    /// Checks if this error is transient and may succeed on retry.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }
}

impl From<serde_json::Error> for BimError {
    fn from(err: serde_json::Error) -> Self {
        Self::ConstraintViolation(format!("type mismatch: {}", err))
    }
}

/// Field-level validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(BimError::not_found("Project", 1).error_code(), "NOT_FOUND");
        assert_eq!(BimError::constraint("x").error_code(), "CONSTRAINT_VIOLATION");
        assert_eq!(BimError::unsupported("x").error_code(), "UNSUPPORTED_OPERATION");
        assert_eq!(BimError::unavailable("x").error_code(), "STORAGE_UNAVAILABLE");
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(BimError::not_found("Project", 1).kind(), Some(DaoErrorKind::NotFound));
        assert_eq!(
            BimError::constraint("x").kind(),
            Some(DaoErrorKind::ConstraintViolation)
        );
        assert_eq!(
            BimError::unsupported("x").kind(),
            Some(DaoErrorKind::UnsupportedOperation)
        );
        assert_eq!(
            BimError::unavailable("x").kind(),
            Some(DaoErrorKind::StorageUnavailable)
        );
        assert_eq!(BimError::Configuration("x".to_string()).kind(), None);
    }

    #[test]
    fn test_only_storage_unavailable_is_retriable() {
        assert!(BimError::unavailable("connection lost").is_retriable());
        assert!(!BimError::not_found("Project", 1).is_retriable());
        assert!(!BimError::constraint("dup").is_retriable());
        assert!(!BimError::unsupported("median").is_retriable());
    }

    #[test]
    fn test_not_found_message_names_resource() {
        let err = BimError::not_found("Project", "projectId-123");
        let message = err.to_string();
        assert!(message.contains("Project"));
        assert!(message.contains("projectId-123"));
    }

    #[test]
    fn test_json_error_maps_to_constraint_violation() {
        let err: BimError = serde_json::from_str::<u32>("\"text\"").unwrap_err().into();
        assert_eq!(err.kind(), Some(DaoErrorKind::ConstraintViolation));
    }
}
