//! # Blog Errors
//!
//! Error types for post validation and storage.

use thiserror::Error;

/// Result type for blog operations
pub type BlogResult<T> = Result<T, BlogError>;

/// Post validation and storage errors
#[derive(Debug, Clone, Error)]
pub enum BlogError {
    /// Request body failed validation
    #[error("{0}")]
    Validation(String),

    /// Post does not exist
    #[error("Post not found")]
    NotFound,

    /// Storage operation failed
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl BlogError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            BlogError::Validation(_) => 400,
            BlogError::NotFound => 404,
            BlogError::StorageError(_) => 500,
        }
    }
}
