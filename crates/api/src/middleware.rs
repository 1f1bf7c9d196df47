//! Identity gate: bearer-token authentication for protected routes.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::Response,
};

use keygate_auth::TokenCodec;

use crate::app::errors;
use crate::context::RequestIdentity;

#[derive(Clone)]
pub struct AuthState {
    pub codec: Arc<TokenCodec>,
}

/// Authenticate a request from its `Authorization: Bearer <token>` header.
///
/// On success, inserts a [`RequestIdentity`] into the request extensions and
/// passes the request on. Every rejection short-circuits with a 401. Token
/// validation failures all share one outward message — whether the token was
/// malformed, mis-signed, or expired is logged, never echoed.
pub async fn authenticate(
    State(state): State<AuthState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer(req.headers()).map_err(unauthenticated)?;

    let claims = state.codec.validate(token).map_err(|e| {
        tracing::debug!(kind = %e, "rejecting bearer token");
        unauthenticated("invalid or expired credentials")
    })?;

    req.extensions_mut()
        .insert(RequestIdentity::new(claims.sub, claims.role));

    Ok(next.run(req).await)
}

fn unauthenticated(message: &'static str) -> Response {
    errors::json_error(StatusCode::UNAUTHORIZED, "unauthenticated", message)
}

/// Pull the bearer token out of the authorization header.
///
/// The header must split into exactly two parts; the scheme comparison is
/// case-insensitive.
fn extract_bearer(headers: &HeaderMap) -> Result<&str, &'static str> {
    let header = headers
        .get(header::AUTHORIZATION)
        .ok_or("missing credentials")?;

    let header = header.to_str().map_err(|_| "missing credentials")?.trim();
    if header.is_empty() {
        return Err("missing credentials");
    }

    let mut parts = header.splitn(2, ' ');
    let scheme = parts.next().unwrap_or_default().trim();
    let token = parts.next().ok_or("malformed authorization header")?.trim();

    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err("authorization scheme must be Bearer");
    }
    if token.is_empty() {
        return Err("missing bearer token");
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn accepts_bearer_in_any_case() {
        for value in ["Bearer abc", "bearer abc", "BEARER abc", "  Bearer   abc  "] {
            assert_eq!(extract_bearer(&headers_with(value)), Ok("abc"), "{value:?}");
        }
    }

    #[test]
    fn rejects_missing_header() {
        assert_eq!(
            extract_bearer(&HeaderMap::new()),
            Err("missing credentials")
        );
    }

    #[test]
    fn rejects_blank_header() {
        assert_eq!(
            extract_bearer(&headers_with("   ")),
            Err("missing credentials")
        );
    }

    #[test]
    fn rejects_single_part() {
        // Trailing whitespace is trimmed with the header, so a scheme with no
        // token is one part however it is padded.
        for value in ["Bearer", "Bearer   "] {
            assert_eq!(
                extract_bearer(&headers_with(value)),
                Err("malformed authorization header"),
                "{value:?}"
            );
        }
    }

    #[test]
    fn rejects_wrong_scheme() {
        assert_eq!(
            extract_bearer(&headers_with("Token abc")),
            Err("authorization scheme must be Bearer")
        );
    }
}
