//! Public credential endpoints: registration and login.

use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::{dto, errors, services::AuthServices};

pub async fn register(
    Extension(services): Extension<Arc<AuthServices>>,
    Json(body): Json<dto::CredentialsRequest>,
) -> axum::response::Response {
    match services.register(&body.email, &body.password) {
        Ok(result) => (StatusCode::CREATED, Json(result)).into_response(),
        Err(e) => errors::auth_error_to_response(e),
    }
}

pub async fn login(
    Extension(services): Extension<Arc<AuthServices>>,
    Json(body): Json<dto::CredentialsRequest>,
) -> axum::response::Response {
    match services.login(&body.email, &body.password) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => errors::auth_error_to_response(e),
    }
}
