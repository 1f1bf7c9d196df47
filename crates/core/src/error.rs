//! Error taxonomy for the credential service.

use thiserror::Error;

/// Result type used across the service layers.
pub type AuthResult<T> = Result<T, AuthError>;

/// Service-level error.
///
/// Each variant corresponds to one class of rejection the HTTP layer knows
/// how to map to a status code. Internal detail (store messages, primitive
/// errors) stays inside the variant payloads for logging and must never be
/// echoed across the trust boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Caller input failed validation (e.g. malformed email, short password).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Bad, missing, or expired credentials. Carries no detail: unknown email
    /// and wrong password must be indistinguishable to the caller.
    #[error("invalid credentials")]
    Authentication,

    /// Authenticated but lacking the required role.
    #[error("forbidden")]
    Authorization,

    /// A unique field (email) is already taken.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The user-store collaborator failed.
    #[error("store failure: {0}")]
    Storage(String),

    /// The password-hashing primitive failed.
    #[error("password hashing failure")]
    Hashing,

    /// The token-signing primitive failed.
    #[error("token signing failure")]
    Signing,
}

impl AuthError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
