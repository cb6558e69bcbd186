//! API-boundary error handling.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use sitetrust_core::CoreError;
use sitetrust_store::StoreError;
use thiserror::Error;

/// Result type alias for handlers and the pipeline
pub type ApiResult<T> = Result<T, ApiError>;

/// Request-level failures.
///
/// Validation is the only class a well-behaved client will ever see; the
/// rest indicate an unhealthy deployment and deliberately carry no detail
/// in the response body.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed request payload (bad label, unusable host)
    #[error("validation error: {0}")]
    Validation(String),

    /// Per-request storage failure; not retried, surfaced as-is
    #[error("storage error: {0}")]
    Storage(String),

    /// Anything else
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Storage(msg) => {
                tracing::error!(error = %msg, "storage failure during request");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage error".to_string())
            }
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "internal failure during request");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));
        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidHost(_) => Self::Validation(err.to_string()),
            CoreError::Json(_) => Self::Internal(err.to_string()),
        }
    }
}
