//! Stateless session token codec.
//!
//! Tokens are HS256 JWTs carrying [`Claims`]. The signing algorithm is pinned
//! on both issue and validate: a token whose header declares any other `alg`
//! is rejected outright, regardless of whether its signature would verify.

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use thiserror::Error;

use crate::{Claims, Role};

/// Token validation/issuance failure.
///
/// `Invalid` deliberately covers malformed tokens, bad signatures, and
/// algorithm substitution in one kind: callers must not be able to probe
/// which check failed. `Expired` is distinct so it can be logged separately,
/// but maps to the same 401 surface.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is malformed or its signature does not verify")]
    Invalid,

    #[error("token has expired")]
    Expired,

    #[error("token signing failed")]
    Signing,
}

/// Issues and validates signed session tokens.
///
/// Holds the shared signing secret for the lifetime of the process. The
/// codec is immutable after construction and safe for unsynchronized
/// concurrent use.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact: a token is rejected the second its window closes.
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Mint a token for `subject` with `role`, valid for [`crate::TOKEN_TTL_SECS`].
    pub fn issue(&self, subject: &str, role: Role) -> Result<String, TokenError> {
        let claims = Claims::new(subject, role, Utc::now());

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| {
            tracing::error!(error = %e, "token signing failed");
            TokenError::Signing
        })
    }

    /// Parse and verify a token, returning its claims.
    ///
    /// Rejects (as [`TokenError::Invalid`]) tokens that are malformed, carry
    /// a signature that does not verify under the shared secret, declare an
    /// algorithm other than HS256, or have an empty subject. An elapsed
    /// expiry is the distinct [`TokenError::Expired`] kind.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            }
        })?;

        if data.claims.sub.trim().is_empty() {
            return Err(TokenError::Invalid);
        }

        Ok(data.claims)
    }
}
