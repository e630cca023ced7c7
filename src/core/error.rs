//! Error type system for the taskboard service
//!
//! A single error enum shared by every layer, with HTTP status code mapping
//! and JSON error responses carrying a trace ID.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Main error type for the taskboard service
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    // System-level errors
    #[error("System initialization failed: {0}")]
    InitializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    // API-related errors
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // I/O errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    // Blocking task errors
    #[error("Task error: {0}")]
    TaskError(String),
}

impl BoardError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            BoardError::InvalidRequest(_)
            | BoardError::ValidationError(_)
            | BoardError::DuplicateUsername(_) => StatusCode::BAD_REQUEST,

            // 401 Unauthorized
            BoardError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,

            // 404 Not Found
            BoardError::NotFound(_) => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            BoardError::InitializationError(_)
            | BoardError::ConfigError(_)
            | BoardError::DatabaseError(_)
            | BoardError::IoError(_)
            | BoardError::TaskError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type name for API responses
    pub fn error_type(&self) -> &'static str {
        match self {
            BoardError::InitializationError(_) => "InitializationError",
            BoardError::ConfigError(_) => "ConfigError",
            BoardError::DatabaseError(_) => "DatabaseError",
            BoardError::InvalidRequest(_) => "InvalidRequest",
            BoardError::ValidationError(_) => "ValidationError",
            BoardError::DuplicateUsername(_) => "DuplicateUsername",
            BoardError::AuthenticationError(_) => "AuthenticationError",
            BoardError::NotFound(_) => "NotFound",
            BoardError::IoError(_) => "IoError",
            BoardError::TaskError(_) => "TaskError",
        }
    }
}

/// Error response structure for API endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error type identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique trace ID for this error
    pub trace_id: String,
}

impl ErrorResponse {
    /// Create a new error response with a generated trace ID
    pub fn new(error: String, message: String) -> Self {
        Self {
            error,
            message,
            trace_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an error response from a BoardError
    pub fn from_error(error: &BoardError) -> Self {
        Self::new(error.error_type().to_string(), error.to_string())
    }
}

/// Implement IntoResponse for BoardError to enable automatic error handling in Axum
impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let error_response = ErrorResponse::from_error(&self);

        tracing::error!(
            error_type = self.error_type(),
            trace_id = %error_response.trace_id,
            status_code = %status_code,
            "Request failed: {}",
            self
        );

        (status_code, Json(error_response)).into_response()
    }
}

/// Result type alias for operations that can fail with BoardError
pub type Result<T> = std::result::Result<T, BoardError>;
