use axum::{routing::get, Router};

pub mod admin;
pub mod auth;
pub mod system;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/admin", admin::router())
}
