//! `keygate-auth` — pure authentication primitives (zero-trust boundary).
//!
//! This crate is intentionally decoupled from HTTP and storage: it knows how
//! to hash and verify passwords, how to mint and validate signed session
//! tokens, and what a role is. Wiring these into a request pipeline is the
//! API layer's job.

pub mod claims;
pub mod password;
pub mod roles;
pub mod token;

pub use claims::{Claims, TOKEN_TTL_SECS};
pub use password::{hash_password, verify_password, HashError};
pub use roles::Role;
pub use token::{TokenCodec, TokenError};
