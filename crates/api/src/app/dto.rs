use serde::{Deserialize, Serialize};

use keygate_infra::PublicUser;

// -------------------------
// Request DTOs
// -------------------------

/// Body shared by `/register` and `/login`.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}
