//! # API Errors
//!
//! Errors surfaced by HTTP handlers and their JSON rendering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthError;
use crate::blog::BlogError;
use crate::observability::{Event, Logger};

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Handler errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Path identifier is not a valid ID
    #[error("malformatted id")]
    MalformedId,

    /// Request body could not be decoded
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("{0}")]
    Blog(#[from] BlogError),

    #[error("{0}")]
    Auth(#[from] AuthError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        let code = match self {
            ApiError::MalformedId => 400,
            ApiError::InvalidBody(_) => 400,
            ApiError::Blog(err) => err.status_code(),
            ApiError::Auth(err) => err.status_code(),
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            let message = self.to_string();
            Logger::event(Event::RequestFailed, &[("error", message.as_str())]);
        }
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}
