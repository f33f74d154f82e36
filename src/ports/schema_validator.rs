//! Request schema port.
//!
//! Request bodies and query strings are checked in two passes: serde enforces
//! field presence and primitive shape while deserializing, then
//! [`RequestSchema::validate`] enforces the remaining per-field rules (non-empty
//! strings, positive integers, allowed values). Both passes run before a
//! handler body executes.

use thiserror::Error;

use crate::domain::foundation::ValidationError;

/// A request payload with field-level rules beyond its serde shape.
pub trait RequestSchema {
    /// Returns `Ok(())` if every field satisfies its rule.
    fn validate(&self) -> Result<(), SchemaValidationError>;
}

/// Errors that can occur during schema validation.
#[derive(Debug, Clone, Error)]
pub enum SchemaValidationError {
    #[error("Missing required field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid type for field {field}: expected {expected}, got {actual}")]
    InvalidType {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("Value out of range for field {field}: {value} not in [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("Invalid format for field {field}: expected {format}")]
    InvalidFormat { field: String, format: String },

    #[error("Schema validation failed: {message}")]
    Generic { message: String },

    #[error("Validation errors: {0:?}")]
    Multiple(Vec<SchemaValidationError>),
}

impl SchemaValidationError {
    /// Convert to client-safe error message.
    pub fn to_client_message(&self) -> String {
        match self {
            SchemaValidationError::MissingRequired { field } => {
                format!("Missing required field: {}", field)
            }
            SchemaValidationError::InvalidType { field, expected, .. } => {
                format!("Invalid type for field '{}': expected {}", field, expected)
            }
            SchemaValidationError::OutOfRange { field, min, max, .. } => {
                format!("Field '{}' must be between {} and {}", field, min, max)
            }
            SchemaValidationError::InvalidFormat { field, format } => {
                format!("Field '{}' must be a valid {}", field, format)
            }
            SchemaValidationError::Generic { message } => {
                if message.len() > 200 {
                    let cut = message
                        .char_indices()
                        .map(|(i, _)| i)
                        .take_while(|i| *i <= 197)
                        .last()
                        .unwrap_or(0);
                    format!("Validation failed: {}...", &message[..cut])
                } else {
                    format!("Validation failed: {}", message)
                }
            }
            SchemaValidationError::Multiple(errors) => errors
                .first()
                .map(|e| e.to_client_message())
                .unwrap_or_else(|| "Validation failed".to_string()),
        }
    }

    /// Collapses a list of errors; `Ok` when the list is empty.
    pub fn from_errors(mut errors: Vec<SchemaValidationError>) -> Result<(), SchemaValidationError> {
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(SchemaValidationError::Multiple(errors)),
        }
    }

    /// Get the count of validation errors.
    pub fn error_count(&self) -> usize {
        match self {
            SchemaValidationError::Multiple(errors) => errors.len(),
            _ => 1,
        }
    }
}

impl From<ValidationError> for SchemaValidationError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::EmptyField { field } => SchemaValidationError::InvalidFormat {
                field,
                format: "non-empty string".to_string(),
            },
            ValidationError::OutOfRange {
                field,
                min,
                max,
                actual,
            } => SchemaValidationError::OutOfRange {
                field,
                value: actual.to_string(),
                min: min.to_string(),
                max: max.to_string(),
            },
            ValidationError::InvalidFormat { field, reason } => {
                SchemaValidationError::InvalidFormat { field, format: reason }
            }
            ValidationError::MissingRequired { field } => {
                SchemaValidationError::MissingRequired { field }
            }
        }
    }
}

impl PartialEq for SchemaValidationError {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
