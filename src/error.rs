//! Crate-level error types.
//!
//! All of these are non-fatal: handlers convert them into the transient
//! status message and the user may retry the action.

use thiserror::Error;

use crate::formats::FormatError;

/// Errors surfaced to the user by application operations.
#[derive(Error, Debug)]
pub enum SvatError {
    /// An action requiring an uploaded image was attempted without one.
    #[error("upload an image first")]
    SessionMissing,

    /// Segmentation was requested with no points and no box.
    #[error("add points or box first")]
    EmptyInput,

    /// Non-2xx or network failure from a backend call. The message is the
    /// backend's error detail when present, else a generic description.
    #[error("backend error: {message}")]
    Backend {
        /// Human-readable failure description.
        message: String,
    },

    /// Import/export format failure.
    #[error(transparent)]
    Format(#[from] FormatError),
}

impl SvatError {
    /// Create a backend error with a message.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}
