//! # Auth Errors
//!
//! Error types for the authentication module.

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication and authorization errors
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // ==================
    // Authentication Errors
    // ==================

    /// Unknown user or wrong password (generic - don't leak which)
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Username already registered
    #[error("expected `username` to be unique")]
    UsernameTaken,

    /// Username does not meet requirements
    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    /// Password does not meet requirements
    #[error("Password does not meet requirements: {0}")]
    WeakPassword(String),

    // ==================
    // Token Errors
    // ==================

    /// Token is malformed
    #[error("token invalid")]
    MalformedToken,

    /// Token has expired
    #[error("token expired")]
    TokenExpired,

    /// Token signature is invalid
    #[error("token invalid")]
    InvalidSignature,

    // ==================
    // Access Errors
    // ==================

    /// No credential supplied
    #[error("token missing")]
    AuthenticationRequired,

    /// Caller does not own the resource
    #[error("only the creator can delete a blog")]
    Unauthorized,

    // ==================
    // Internal Errors
    // ==================

    /// Password hashing failed
    #[error("Internal error: password hashing failed")]
    HashingFailed,

    /// Token generation failed
    #[error("Internal error: token generation failed")]
    TokenGenerationFailed,

    /// Storage operation failed
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            AuthError::InvalidUsername(_) => 400,
            AuthError::WeakPassword(_) => 400,

            // 401 Unauthorized
            AuthError::InvalidCredentials => 401,
            AuthError::MalformedToken => 401,
            AuthError::TokenExpired => 401,
            AuthError::InvalidSignature => 401,
            AuthError::AuthenticationRequired => 401,

            // 403 Forbidden
            AuthError::Unauthorized => 403,

            // 409 Conflict
            AuthError::UsernameTaken => 409,

            // 500 Internal Server Error
            AuthError::HashingFailed => 500,
            AuthError::TokenGenerationFailed => 500,
            AuthError::StorageError(_) => 500,
        }
    }
}
