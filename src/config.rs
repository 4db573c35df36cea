//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the JSON database file
    pub database_path: String,
    /// Directory served under /app
    pub app_root: String,
    /// Server port
    pub port: u16,
    /// JWT signing key for access tokens (raw bytes)
    pub jwt_secret: Vec<u8>,
    /// Shared key the Polka payment webhook authenticates with
    pub polka_key: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "database.json".to_string()),
            app_root: env::var("APP_ROOT").unwrap_or_else(|_| ".".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| ConfigError::Missing("JWT_SECRET"))?
                .into_bytes(),
            polka_key: env::var("POLKA_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("POLKA_KEY"))?,
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            database_path: "database.json".to_string(),
            app_root: ".".to_string(),
            port: 8080,
            jwt_secret: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            polka_key: "test_polka_key".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
