//! Error types for annotation format operations.

use thiserror::Error;

/// Errors that can occur during format import/export operations.
#[derive(Error, Debug)]
pub enum FormatError {
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Required field is missing.
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the missing field
        field: String,
    },

    /// Invalid or malformed data in the format.
    #[error("Invalid data: {message}")]
    InvalidData {
        /// Description of the problem
        message: String,
    },
}

impl FormatError {
    /// Create a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid data error with a message.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }
}
