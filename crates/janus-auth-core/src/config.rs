//! Configuration types for the auth subsystem

use std::time::Duration;

use crate::AuthError;

/// Auth subsystem configuration.
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Clone)]
pub struct AuthConfig {
    /// Symmetric signing secret for access tokens (min 32 bytes)
    pub signing_secret: String,
    /// Issuer claim stamped into and required from access tokens
    pub issuer: String,
    /// Audience claim stamped into and required from access tokens
    pub audience: String,
    /// Access token lifetime
    pub access_token_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_token_ttl: Duration,
}

impl AuthConfig {
    /// Minimum signing secret length in bytes (256 bits)
    pub const MIN_SECRET_LENGTH: usize = 32;

    /// Create a new auth config.
    ///
    /// # Errors
    /// Returns `AuthError::Configuration` if the secret is shorter than
    /// 32 bytes.
    pub fn try_new(
        signing_secret: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Result<Self, AuthError> {
        let signing_secret = signing_secret.into();
        if signing_secret.len() < Self::MIN_SECRET_LENGTH {
            return Err(AuthError::Configuration(format!(
                "signing secret must be at least {} bytes",
                Self::MIN_SECRET_LENGTH
            )));
        }

        Ok(Self {
            signing_secret,
            issuer: issuer.into(),
            audience: audience.into(),
            access_token_ttl: Duration::from_secs(15 * 60),
            refresh_token_ttl: Duration::from_secs(7 * 24 * 60 * 60),
        })
    }

    /// Set access token lifetime
    pub fn with_access_token_ttl(mut self, ttl: Duration) -> Self {
        self.access_token_ttl = ttl;
        self
    }

    /// Set refresh token lifetime
    pub fn with_refresh_token_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_token_ttl = ttl;
        self
    }
}

// Manual impl so the signing secret never lands in debug output.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_secret_rejected() {
        let result = AuthConfig::try_new("short", "janus", "janus-api");
        assert!(matches!(result, Err(AuthError::Configuration(_))));
    }

    #[test]
    fn test_defaults() {
        let config = AuthConfig::try_new("s".repeat(32), "janus", "janus-api").unwrap();
        assert_eq!(config.access_token_ttl, Duration::from_secs(900));
        assert_eq!(config.refresh_token_ttl, Duration::from_secs(7 * 24 * 3600));
    }
}
