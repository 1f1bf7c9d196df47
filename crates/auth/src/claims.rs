use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Role;

/// Fixed token lifetime: 7 days.
pub const TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Claims embedded in a session token.
///
/// Timestamps are unix seconds (the JWT wire convention). The invariant
/// `exp = iat + TOKEN_TTL_SECS` holds for every token this service mints;
/// tokens are immutable once issued and never persisted server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user identifier, as an opaque string.
    pub sub: String,

    /// RBAC role granted to the subject.
    pub role: Role,

    /// Issued-at, unix seconds.
    pub iat: i64,

    /// Expires-at, unix seconds.
    pub exp: i64,
}

impl Claims {
    /// Build claims for a token issued at `now`.
    pub fn new(subject: impl Into<String>, role: Role, now: DateTime<Utc>) -> Self {
        let iat = now.timestamp();
        Self {
            sub: subject.into(),
            role,
            iat,
            exp: iat + TOKEN_TTL_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifetime_is_seven_days() {
        let claims = Claims::new("u-1", Role::USER, Utc::now());
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }
}
