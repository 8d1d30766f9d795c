//! Gateway error types.
//!
//! [`ApiError`] is what a request handler fails with; it always maps to an
//! HTTP status and a `{"detail": ...}` body. [`GatewayError`] covers the
//! service lifecycle (startup, bind, shutdown).

use serde::Serialize;

/// Request-level failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Missing or mismatching API key
    #[error("forbidden")]
    Unauthorized,

    /// A query parameter failed validation
    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// The founders store could not answer
    #[error("store failure: {0}")]
    Store(String),
}

impl ApiError {
    pub fn invalid_params(details: impl Into<String>) -> Self {
        ApiError::InvalidParams(details.into())
    }

    pub fn store(details: impl Into<String>) -> Self {
        ApiError::Store(details.into())
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Unauthorized => 403,
            ApiError::InvalidParams(_) => 400,
            ApiError::Store(_) => 500,
        }
    }

    /// Client-facing body. Store details stay in the logs.
    pub fn body(&self) -> ErrorBody {
        let detail = match self {
            ApiError::Unauthorized => "Forbidden".to_string(),
            ApiError::InvalidParams(reason) => reason.clone(),
            ApiError::Store(_) => "Internal server error".to_string(),
        };
        ErrorBody { detail }
    }
}

/// JSON error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Result type for request handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Service-level errors
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("server bind error: {0}")]
    Bind(String),

    #[error("server error: {0}")]
    Server(String),
}
