use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use miam_core::DispatchError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`DispatchError`] for dispatch failures and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce consistent JSON error
/// responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A fatal dispatch failure from `miam_core`.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // Capability failures map to 500 so the at-least-once trigger
            // mechanism redelivers the event.
            AppError::Dispatch(err) => {
                tracing::error!(error = %err, "Dispatch failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DISPATCH_FAILED",
                    "Favorite notification dispatch failed".to_string(),
                )
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
