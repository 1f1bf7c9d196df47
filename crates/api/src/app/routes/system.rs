use axum::{extract::Extension, response::IntoResponse, Json};
use chrono::Utc;

use crate::context::RequestIdentity;

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "ok": true,
        "service": "keygate",
        "time": Utc::now(),
    }))
}

pub async fn whoami(Extension(identity): Extension<RequestIdentity>) -> impl IntoResponse {
    Json(serde_json::json!({
        "subject": identity.subject(),
        "role": identity.role().as_str(),
    }))
}
