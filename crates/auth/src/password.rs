//! Password hashing and verification.

use scrypt::{
    password_hash::{
        rand_core::OsRng, Error as PasswordHashError, PasswordHash, PasswordHasher,
        PasswordVerifier, SaltString,
    },
    Scrypt,
};
use thiserror::Error;

/// Hashing/verification failure.
///
/// A password *mismatch* is not an error — `verify_password` reports it as
/// `Ok(false)`. These variants cover primitive failures only, and carry no
/// payload so nothing cryptographic leaks through error messages.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HashError {
    #[error("password hashing failed")]
    Hash,

    #[error("stored password hash is malformed")]
    Malformed,
}

/// Hash a password with scrypt and a fresh random salt.
///
/// Output is a PHC-format string embedding salt and parameters; two calls
/// with the same input produce different hashes.
pub fn hash_password(plain: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Scrypt
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            tracing::error!(error = %e, "scrypt hashing failed");
            HashError::Hash
        })?
        .to_string();
    Ok(hash)
}

/// Verify a password against a stored hash.
///
/// `Ok(false)` on mismatch; `Err(HashError::Malformed)` only when the stored
/// hash cannot be parsed or used. The comparison itself is constant-time.
pub fn verify_password(hash: &str, plain: &str) -> Result<bool, HashError> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        tracing::warn!(error = %e, "stored password hash is malformed");
        HashError::Malformed
    })?;

    match Scrypt.verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PasswordHashError::Password) => Ok(false),
        Err(e) => {
            tracing::warn!(error = %e, "stored password hash is unusable");
            Err(HashError::Malformed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_accepts_the_password() {
        let hash = hash_password("secret1").unwrap();
        assert_eq!(verify_password(&hash, "secret1"), Ok(true));
    }

    #[test]
    fn wrong_password_is_a_mismatch_not_an_error() {
        let hash = hash_password("secret1").unwrap();
        assert_eq!(verify_password(&hash, "secret2"), Ok(false));
        // Case matters: passwords are never case-folded.
        assert_eq!(verify_password(&hash, "SECRET1"), Ok(false));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("secret1").unwrap();
        let b = hash_password("secret1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        assert_eq!(
            verify_password("not-a-phc-string", "secret1"),
            Err(HashError::Malformed)
        );
    }
}
