use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use cityinfo_core::DomainError;

/// Translate a domain outcome into the standardized response shape.
pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Validation(violations) => (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({
                "error": "validation_failed",
                "message": "validation failed",
                "violations": violations,
            })),
        )
            .into_response(),
        DomainError::MalformedPatch(msg) => {
            json_error(StatusCode::BAD_REQUEST, "malformed_patch", msg)
        }
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::Internal(msg) => {
            tracing::error!("internal fault while handling request: {msg}");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "a problem happened while handling your request",
            )
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
