use crate::error::AppError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// API-specific error wrapper that converts AppError into HTTP responses.
///
/// Validation failures carry only `error`; server-side failures also carry
/// the underlying `message`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": msg }),
            ),
            AppError::Upstream { context, message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": context, "message": message }),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": "Internal server error", "message": msg }),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}
