//! Configuration for the Auth API service.

use janus_auth_core::AuthConfig;
use std::time::Duration;

/// Auth API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,

    /// Database URL
    pub database_url: String,

    /// Auth core configuration
    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let http_port = std::env::var("HTTP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("HTTP_PORT"))?;

        // Token signing (minimum 32 bytes, enforced by AuthConfig)
        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;

        let jwt_issuer = std::env::var("JWT_ISSUER").unwrap_or_else(|_| "janus".to_string());

        let jwt_audience =
            std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "janus-api".to_string());

        // Access token lifetime (default 15 minutes)
        let access_ttl_minutes: u64 = std::env::var("ACCESS_TOKEN_TTL_MINUTES")
            .unwrap_or_else(|_| "15".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("ACCESS_TOKEN_TTL_MINUTES"))?;

        // Refresh token lifetime (default 7 days)
        let refresh_ttl_days: u64 = std::env::var("REFRESH_TOKEN_TTL_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("REFRESH_TOKEN_TTL_DAYS"))?;

        let auth = AuthConfig::try_new(&jwt_secret, &jwt_issuer, &jwt_audience)
            .map_err(|e| ConfigError::AuthConfig(e.to_string()))?
            .with_access_token_ttl(Duration::from_secs(access_ttl_minutes * 60))
            .with_refresh_token_ttl(Duration::from_secs(refresh_ttl_days * 24 * 3600));

        Ok(Self {
            http_port,
            database_url,
            auth,
        })
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),

    #[error("Auth config error: {0}")]
    AuthConfig(String),
}
