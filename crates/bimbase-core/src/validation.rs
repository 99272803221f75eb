//! Validation utilities.

use crate::{BimError, FieldError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `ConstraintViolation` on failure.
    fn validate_request(&self) -> Result<(), BimError> {
        self.validate().map_err(validation_errors_to_bim_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field errors.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

/// Converts `validator::ValidationErrors` to `BimError::ConstraintViolation`.
#[must_use]
pub fn validation_errors_to_bim_error(errors: ValidationErrors) -> BimError {
    let message = field_errors(&errors)
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    BimError::ConstraintViolation(message)
}

impl From<ValidationErrors> for BimError {
    fn from(errors: ValidationErrors) -> Self {
        validation_errors_to_bim_error(errors)
    }
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }

    /// Validates a resource name used to key storage bindings.
    pub fn valid_resource_name(name: &str) -> Result<(), ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::new("resource_name_empty"));
        }
        if name.len() > 64 {
            return Err(ValidationError::new("resource_name_too_long"));
        }
        if !name.chars().next().is_some_and(char::is_alphabetic) {
            return Err(ValidationError::new("resource_name_must_start_with_letter"));
        }
        if !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(ValidationError::new("resource_name_invalid_characters"));
        }
        Ok(())
    }
}
