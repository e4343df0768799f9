//! Error types for schema editing.
//!
//! Generation and preview validation are total and never fail; only the
//! mutation operations on [`Form`](crate::schema::Form) return errors.

use thiserror::Error;

/// Result type alias for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Error raised when a form mutation cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Field index does not address an existing field.
    #[error("Field index {index} is out of bounds (form has {len} field(s))")]
    FieldIndexOutOfBounds { index: usize, len: usize },

    /// Option index does not address an existing option of the field.
    #[error("Option index {index} is out of bounds for field '{field}' ({len} option(s))")]
    OptionIndexOutOfBounds {
        field: String,
        index: usize,
        len: usize,
    },

    /// Another field already uses this id.
    #[error("Field id '{id}' is already used in this form")]
    DuplicateFieldId { id: String },

    /// Pattern source does not compile.
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl SchemaError {
    /// Create a field index error.
    pub fn field_index(index: usize, len: usize) -> Self {
        Self::FieldIndexOutOfBounds { index, len }
    }

    /// Create an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}
