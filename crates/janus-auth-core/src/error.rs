//! Auth errors

use thiserror::Error;

/// Authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Login failed. Covers both unknown email and wrong password so the
    /// response cannot be used for account enumeration.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Refresh token unknown or expired; the caller must log in again.
    #[error("invalid refresh token")]
    InvalidToken,

    /// An already-rotated refresh token was presented again. The whole
    /// session family for that subject has been revoked.
    #[error("refresh token reuse detected")]
    ReuseDetected,

    /// Access token missing, malformed, tampered, or expired.
    #[error("unauthenticated")]
    Unauthenticated,

    /// Authenticated but denied by policy.
    #[error("forbidden")]
    Forbidden,

    /// Database error
    #[error("database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidCredentials
            | Self::InvalidToken
            | Self::ReuseDetected
            | Self::Unauthenticated => 401,
            Self::Forbidden => 403,
            Self::Database(_) | Self::Configuration(_) | Self::Internal(_) => 500,
        }
    }

    /// Get error code for API responses.
    ///
    /// `ReuseDetected` intentionally shares the generic invalid-token code:
    /// the distinction matters for server-side telemetry, not for clients.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken | Self::ReuseDetected => "INVALID_TOKEN",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Forbidden => "FORBIDDEN",
            Self::Database(_) | Self::Configuration(_) | Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<janus_db::DbError> for AuthError {
    fn from(err: janus_db::DbError) -> Self {
        tracing::error!("Database error: {}", err);
        Self::Database(err.to_string())
    }
}
