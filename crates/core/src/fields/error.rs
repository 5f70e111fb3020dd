//! Custom field error types.

use thiserror::Error;

use super::value::FieldType;

/// Errors raised when a raw custom-field value does not fit its definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// A required field has no value.
    #[error("Field '{0}' is required")]
    Required(String),

    /// The raw value has the wrong JSON shape for the field type.
    #[error("Field '{field}' expects a {expected} value")]
    TypeMismatch {
        /// The field key.
        field: String,
        /// The declared type.
        expected: FieldType,
    },

    /// A select field received a value outside its options.
    #[error("Field '{field}' does not accept '{value}'")]
    UnknownOption {
        /// The field key.
        field: String,
        /// The rejected value.
        value: String,
    },
}

impl FieldError {
    /// Returns the error code for display and logs.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Required(_) => "FIELD_REQUIRED",
            Self::TypeMismatch { .. } => "FIELD_TYPE_MISMATCH",
            Self::UnknownOption { .. } => "FIELD_UNKNOWN_OPTION",
        }
    }
}
