//! User records and the store contract.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use keygate_auth::Role;
use keygate_core::UserId;

/// A stored account credential record.
///
/// The password hash never leaves the service boundary: this type has no
/// `Serialize` impl, and the wire projection is [`PublicUser`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    /// Lowercase, unique within the store.
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Public-safe projection of this record.
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            email: self.email.clone(),
            role: self.role.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A record ready to be persisted; the store assigns the identifier.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public-safe user projection (camelCase on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: UserId,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User-store operation error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record with the requested email.
    #[error("user not found")]
    NotFound,

    /// The email is already registered (unique constraint).
    #[error("email already registered")]
    DuplicateEmail,

    /// The backing store failed.
    #[error("user store unavailable: {0}")]
    Unavailable(String),
}

/// Lookup/insert contract the credential service consumes.
///
/// Implementations own their per-operation atomicity: `create` must enforce
/// email uniqueness in the same atomic step as the insert (a unique index,
/// or one critical section), so the service's lookup-then-create sequence
/// cannot race into duplicates.
pub trait UserStore: Send + Sync {
    /// Find a record by email. The email is normalized before lookup.
    fn find_by_email(&self, email: &str) -> Result<UserRecord, StoreError>;

    /// Persist a new record, assigning its identifier.
    fn create(&self, user: NewUser) -> Result<UserRecord, StoreError>;
}

impl<S> UserStore for Arc<S>
where
    S: UserStore + ?Sized,
{
    fn find_by_email(&self, email: &str) -> Result<UserRecord, StoreError> {
        (**self).find_by_email(email)
    }

    fn create(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        (**self).create(user)
    }
}

/// Canonical email form: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
