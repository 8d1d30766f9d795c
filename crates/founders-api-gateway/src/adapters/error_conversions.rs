//! Error conversions from infrastructure types.
//!
//! These conversions involve I/O and HTTP types and belong in the adapters
//! layer.

use crate::domain::ApiError;
use crate::ports::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::store(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Store(details) = &self {
            error!(error = %details, "Founders store failure");
        }

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body())).into_response()
    }
}
