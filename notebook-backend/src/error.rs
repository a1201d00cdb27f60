//! Error types for the notebook backend.

use thiserror::Error;

/// Result type alias for note operations
pub type NoteResult<T> = Result<T, NoteError>;

/// Failure taxonomy for the note core. Every failure path surfaces one of
/// these; nothing is swallowed on the way to the HTTP boundary.
#[derive(Error, Debug)]
pub enum NoteError {
    #[error("validation failed for {field}: {message}")]
    Validation { field: String, message: String },

    #[error("note with id {0} not found")]
    NotFound(String),

    #[error("database error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NoteError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        NoteError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        NoteError::NotFound(id.into())
    }
}
