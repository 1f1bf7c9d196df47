use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use keygate_core::AuthError;

/// Map a service error onto the wire.
///
/// 401 and 5xx bodies are generic on purpose: which credential check failed,
/// and what the store or a crypto primitive actually said, stay in the logs.
pub fn auth_error_to_response(err: AuthError) -> axum::response::Response {
    match err {
        AuthError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        AuthError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        AuthError::Authentication => {
            json_error(StatusCode::UNAUTHORIZED, "invalid_credentials", "invalid credentials")
        }
        AuthError::Authorization => json_error(StatusCode::FORBIDDEN, "forbidden", "forbidden"),
        AuthError::Storage(detail) => {
            tracing::error!(detail = %detail, "user store failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", "internal error")
        }
        e @ (AuthError::Hashing | AuthError::Signing) => {
            tracing::error!(error = %e, "credential primitive failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "internal error")
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
