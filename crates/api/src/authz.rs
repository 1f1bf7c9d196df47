//! Role gate: route-group authorization against a required role.
//!
//! Layered strictly inside the identity gate — its contract assumes the
//! request identity has already been attached. The required role is the
//! middleware's state, so each protected route group picks its own.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

use keygate_auth::Role;
use keygate_core::AuthError;

use crate::app::errors;
use crate::context::RequestIdentity;

/// Reject the request unless its identity carries `required`.
///
/// Missing identity is a 401 (not logged in); a role mismatch is a 403
/// (logged in, insufficient privilege) — distinct statuses so callers can
/// tell the two apart.
pub async fn require_role(
    State(required): State<Role>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let Some(identity) = req.extensions().get::<RequestIdentity>() else {
        return Err(errors::json_error(
            StatusCode::UNAUTHORIZED,
            "unauthenticated",
            "authentication required",
        ));
    };

    if !identity.role().matches(&required) {
        tracing::debug!(
            subject = identity.subject(),
            role = %identity.role(),
            required = %required,
            "role check failed"
        );
        return Err(errors::auth_error_to_response(AuthError::Authorization));
    }

    Ok(next.run(req).await)
}
