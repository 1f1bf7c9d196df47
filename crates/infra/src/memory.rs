//! In-memory user store for dev and tests.

use std::collections::HashMap;
use std::sync::RwLock;

use keygate_core::UserId;

use crate::user::{normalize_email, NewUser, StoreError, UserRecord, UserStore};

/// In-memory [`UserStore`] keyed by normalized email.
///
/// Uniqueness is enforced inside one write-lock section, which stands in for
/// the unique index a database-backed implementation would rely on.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl UserStore for InMemoryUserStore {
    fn find_by_email(&self, email: &str) -> Result<UserRecord, StoreError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))?;

        map.get(&normalize_email(email))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn create(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))?;

        let email = normalize_email(&user.email);
        if map.contains_key(&email) {
            return Err(StoreError::DuplicateEmail);
        }

        let record = UserRecord {
            id: UserId::new(),
            email: email.clone(),
            password_hash: user.password_hash,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        };
        map.insert(email, record.clone());

        Ok(record)
    }
}
