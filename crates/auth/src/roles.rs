use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role identifier used for RBAC.
///
/// Roles are opaque strings at this layer; which role a route requires is
/// decided by the caller/pipeline configuration. Comparison for access
/// control is case-insensitive (`"Admin"` and `"admin"` name the same role).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    /// Role granted to every newly registered account.
    pub const USER: Role = Role::from_static("user");

    /// Role required by the admin route group.
    pub const ADMIN: Role = Role::from_static("admin");

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive role comparison (the access-control equality).
    pub fn matches(&self, required: &Role) -> bool {
        self.0.eq_ignore_ascii_case(&required.0)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_is_case_insensitive() {
        assert!(Role::new("Admin").matches(&Role::ADMIN));
        assert!(Role::new("ADMIN").matches(&Role::ADMIN));
        assert!(!Role::USER.matches(&Role::ADMIN));
    }

    #[test]
    fn serializes_as_a_bare_string() {
        let json = serde_json::to_string(&Role::USER).unwrap();
        assert_eq!(json, "\"user\"");

        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert!(role.matches(&Role::ADMIN));
    }
}
