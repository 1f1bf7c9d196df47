//! Registration/login orchestration.

use std::sync::Arc;

use chrono::Utc;

use keygate_auth::{hash_password, verify_password, Role, TokenCodec};
use keygate_core::{AuthError, AuthResult};
use keygate_infra::{normalize_email, NewUser, StoreError, UserStore};

use crate::app::dto::AuthResponse;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Orchestrates credential flows: validates input, talks to the user store,
/// hashes/verifies passwords, and mints tokens.
pub struct AuthServices {
    store: Arc<dyn UserStore>,
    codec: Arc<TokenCodec>,
}

impl AuthServices {
    pub fn new(store: Arc<dyn UserStore>, codec: Arc<TokenCodec>) -> Self {
        Self { store, codec }
    }

    /// Create an account with role `user` and log it in.
    pub fn register(&self, email: &str, password: &str) -> AuthResult<AuthResponse> {
        let (email, password) = normalize_credentials(email, password)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        // Not-found is the happy path here; anything else from the store is fatal.
        match self.store.find_by_email(&email) {
            Ok(_) => return Err(AuthError::conflict("email already registered")),
            Err(StoreError::NotFound) => {}
            Err(e) => return Err(AuthError::storage(e.to_string())),
        }

        let password_hash = hash_password(&password).map_err(|_| AuthError::Hashing)?;

        let now = Utc::now();
        let record = self
            .store
            .create(NewUser {
                email,
                password_hash,
                role: Role::USER,
                created_at: now,
                updated_at: now,
            })
            .map_err(|e| match e {
                // The store's uniqueness check closes the lookup-then-create race.
                StoreError::DuplicateEmail => AuthError::conflict("email already registered"),
                other => AuthError::storage(other.to_string()),
            })?;

        let token = self
            .codec
            .issue(&record.id.to_string(), record.role.clone())
            .map_err(|_| AuthError::Signing)?;

        tracing::info!(user = %record.id, "account registered");
        Ok(AuthResponse {
            token,
            user: record.to_public(),
        })
    }

    /// Verify credentials and mint a session token.
    ///
    /// Unknown email and wrong password produce the same
    /// [`AuthError::Authentication`] — no account-existence oracle.
    pub fn login(&self, email: &str, password: &str) -> AuthResult<AuthResponse> {
        let (email, password) = normalize_credentials(email, password)?;

        let record = match self.store.find_by_email(&email) {
            Ok(record) => record,
            Err(StoreError::NotFound) => return Err(AuthError::Authentication),
            Err(e) => return Err(AuthError::storage(e.to_string())),
        };

        match verify_password(&record.password_hash, &password) {
            Ok(true) => {}
            Ok(false) => return Err(AuthError::Authentication),
            Err(_) => return Err(AuthError::Hashing),
        }

        let token = self
            .codec
            .issue(&record.id.to_string(), record.role.clone())
            .map_err(|_| AuthError::Signing)?;

        tracing::info!(user = %record.id, "login succeeded");
        Ok(AuthResponse {
            token,
            user: record.to_public(),
        })
    }
}

/// Trim both inputs and lowercase the email; reject empties.
///
/// Passwords keep their case — folding them would merge distinct credentials.
fn normalize_credentials(email: &str, password: &str) -> AuthResult<(String, String)> {
    let email = normalize_email(email);
    let password = password.trim().to_string();

    if email.is_empty() || password.is_empty() {
        return Err(AuthError::validation("email and password are required"));
    }

    Ok((email, password))
}
