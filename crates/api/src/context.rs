use keygate_auth::Role;

/// Identity attached to a request by the identity gate.
///
/// Request-scoped: inserted into the request's extensions after token
/// validation, read by the role gate and handlers, and dropped with the
/// request. Never shared across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestIdentity {
    subject: String,
    role: Role,
}

impl RequestIdentity {
    pub fn new(subject: impl Into<String>, role: Role) -> Self {
        Self {
            subject: subject.into(),
            role,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn role(&self) -> &Role {
        &self.role
    }
}
