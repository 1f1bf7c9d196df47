//! Admin-only endpoints.
//!
//! The role gate is layered here, per route group, so other groups can
//! require different roles without touching the gate itself.

use axum::{extract::Extension, response::IntoResponse, routing::get, Json, Router};

use keygate_auth::Role;

use crate::authz;
use crate::context::RequestIdentity;

pub fn router() -> Router {
    Router::new()
        .route("/overview", get(overview))
        .layer(axum::middleware::from_fn_with_state(
            Role::ADMIN,
            authz::require_role,
        ))
}

pub async fn overview(Extension(identity): Extension<RequestIdentity>) -> impl IntoResponse {
    Json(serde_json::json!({
        "subject": identity.subject(),
        "role": identity.role().as_str(),
        "scope": "admin",
    }))
}
