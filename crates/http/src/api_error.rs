//! Typed API error for HTTP handlers.
//!
//! Handlers return `Result<Json<T>, ApiError>`; the error renders as
//! `{"error": "message"}` with a matching status code.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use paintlog_service::ServiceError;

/// API error with HTTP status code and human-readable message.
///
/// Query filters never fail validation (blank values are dropped, unknown modes
/// fall back to OR), so the only failure left is the store itself.
#[derive(Debug)]
pub enum ApiError {
    /// 500 Internal Server Error. Details logged, not exposed.
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            },
        };
        let body = serde_json::json!({"error": message});
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self::Internal(err.into())
    }
}
