//! HTTP application wiring (axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: registration/login orchestration over the user store
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};

use keygate_auth::TokenCodec;
use keygate_infra::{InMemoryUserStore, UserStore};

use crate::middleware::{self, AuthState};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(jwt_secret: &str) -> Router {
    let store: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
    build_app_with_store(jwt_secret, store)
}

/// Build the router against a caller-supplied user store.
pub fn build_app_with_store(jwt_secret: &str, store: Arc<dyn UserStore>) -> Router {
    let codec = Arc::new(TokenCodec::new(jwt_secret.as_bytes()));
    let services = Arc::new(services::AuthServices::new(store, codec.clone()));
    let auth_state = AuthState { codec };

    // Protected routes: everything behind the identity gate. The admin
    // subtree adds its own role gate inside.
    let protected = routes::router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::authenticate,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .merge(protected)
        .layer(Extension(services))
}
