//! Environment configuration.

use std::net::SocketAddr;

use thiserror::Error;

const DEFAULT_ADDR: &str = "0.0.0.0:8080";

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Shared token-signing secret. Guaranteed non-empty.
    pub jwt_secret: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Covers both an unset variable and one set to whitespace: starting up
    /// with an empty signing secret would mint forgeable tokens.
    #[error("KEYGATE_JWT_SECRET is missing or empty")]
    MissingSecret,

    #[error("KEYGATE_ADDR is not a valid socket address: {0}")]
    InvalidAddr(String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            std::env::var("KEYGATE_JWT_SECRET").ok(),
            std::env::var("KEYGATE_ADDR").ok(),
        )
    }

    fn from_values(secret: Option<String>, addr: Option<String>) -> Result<Self, ConfigError> {
        let jwt_secret = secret.unwrap_or_default().trim().to_string();
        if jwt_secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }

        let addr = addr.unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let bind_addr = addr
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidAddr(addr.trim().to_string()))?;

        Ok(Self {
            bind_addr,
            jwt_secret,
        })
    }
}
