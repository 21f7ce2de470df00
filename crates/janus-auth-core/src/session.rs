//! Session rotation engine
//!
//! The state machine governing login, refresh, and reuse detection. A
//! refresh token record moves from active to exactly one terminal state:
//! rotated (a successor was issued), expired (wall-clock, checked lazily at
//! lookup), or compromised (revoked by the reuse cascade). Rotation always
//! revokes the presented token in the same store transaction that creates
//! its successor.

use chrono::{Duration as ChronoDuration, Utc};
use janus_db::{CreateRefreshToken, DbError, RefreshTokenRepository, RefreshTokenRow, UserRepository, UserRow};
use janus_types::{Role, TokenPair, UserId};
use std::str::FromStr;
use std::sync::Arc;

use crate::crypto::generate_refresh_token;
use crate::token::TokenIssuer;
use crate::{AuthConfig, AuthError};

/// Login, refresh-with-rotation, and logout over the refresh token store.
#[derive(Clone)]
pub struct SessionManager<U, R> {
    issuer: TokenIssuer,
    refresh_ttl: ChronoDuration,
    users: Arc<U>,
    tokens: Arc<R>,
}

impl<U: UserRepository, R: RefreshTokenRepository> SessionManager<U, R> {
    /// Create a new session manager
    pub fn new(config: &AuthConfig, issuer: TokenIssuer, users: Arc<U>, tokens: Arc<R>) -> Self {
        let refresh_ttl = ChronoDuration::from_std(config.refresh_token_ttl)
            .unwrap_or_else(|_| ChronoDuration::days(7));
        Self {
            issuer,
            refresh_ttl,
            users,
            tokens,
        }
    }

    /// Verify credentials and open a new session.
    ///
    /// The failure is uniform whether the email is unknown or the password
    /// is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        let user = match self.users.find_by_email(email).await? {
            Some(user) if crate::crypto::verify_password(password, &user.password_hash) => user,
            _ => {
                tracing::debug!("Login rejected");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let role = parse_role(&user)?;
        let user_id = user.user_id();

        let record = self.create_record(user_id).await?;
        let access = self.issuer.issue(user_id, role)?;

        tracing::info!(%user_id, "Session opened");
        Ok(TokenPair::bearer(access, record.token, self.issuer.access_ttl_secs()))
    }

    /// Rotate a presented refresh token.
    ///
    /// Classification order: absent -> `InvalidToken`; expired ->
    /// `InvalidToken` (expiry wins even when the record is also revoked, so
    /// an abandoned token cannot fire the cascade); revoked -> reuse
    /// cascade; active -> atomic revoke-and-replace. A lost
    /// compare-and-swap is re-read exactly once and surfaced per the
    /// post-conflict state.
    pub async fn refresh(&self, presented: &str) -> Result<TokenPair, AuthError> {
        for _ in 0..2 {
            let record = match self.tokens.find_by_value(presented).await? {
                Some(record) => record,
                None => {
                    tracing::debug!("Unknown refresh token presented");
                    return Err(AuthError::InvalidToken);
                }
            };

            if record.is_expired() {
                tracing::debug!(user_id = record.user_id, "Expired refresh token presented");
                return Err(AuthError::InvalidToken);
            }

            if record.is_revoked {
                return self.handle_reuse(record.owner_id()).await;
            }

            let user = self
                .users
                .find_by_id(record.user_id)
                .await?
                .ok_or_else(|| {
                    // The FK restricts user deletion, so an orphaned token
                    // indicates store corruption rather than client error.
                    AuthError::Internal("refresh token owner missing".to_string())
                })?;
            let role = parse_role(&user)?;

            match self.rotate_record(presented, record.user_id).await? {
                Some(successor) => {
                    let access = self.issuer.issue(user.user_id(), role)?;
                    return Ok(TokenPair::bearer(
                        access,
                        successor.token,
                        self.issuer.access_ttl_secs(),
                    ));
                }
                // Lost the swap to a concurrent rotation; loop once more to
                // observe the token as revoked and take the reuse path.
                None => continue,
            }
        }

        Err(AuthError::InvalidToken)
    }

    /// Revoke a presented refresh token. Idempotent: unknown or already
    /// revoked tokens are not an error.
    pub async fn logout(&self, presented: &str) -> Result<(), AuthError> {
        if self.tokens.revoke(presented).await? {
            tracing::debug!("Refresh token revoked on logout");
        }
        Ok(())
    }

    /// Revoke every refresh token for a user. Returns the number revoked.
    pub async fn revoke_all_sessions(&self, user_id: UserId) -> Result<u64, AuthError> {
        Ok(self.tokens.revoke_all_for_user(user_id.0).await?)
    }

    /// Reuse containment: kill the whole session family for the subject.
    async fn handle_reuse(&self, user_id: UserId) -> Result<TokenPair, AuthError> {
        let revoked = self.tokens.revoke_all_for_user(user_id.0).await?;
        tracing::warn!(
            %user_id,
            revoked,
            "Refresh token reuse detected; all sessions for subject revoked"
        );
        Err(AuthError::ReuseDetected)
    }

    /// Insert a fresh refresh token record, retrying once on a value
    /// collision.
    async fn create_record(&self, user_id: UserId) -> Result<RefreshTokenRow, AuthError> {
        let expires_at = Utc::now() + self.refresh_ttl;
        let mut retried = false;
        loop {
            let create = CreateRefreshToken {
                token: generate_refresh_token(),
                user_id: user_id.0,
                expires_at,
            };
            match self.tokens.create(create).await {
                Ok(row) => return Ok(row),
                Err(DbError::UniqueViolation) if !retried => retried = true,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Atomically revoke `presented` and insert its successor, retrying once
    /// on a successor value collision. `None` means the swap was lost.
    async fn rotate_record(
        &self,
        presented: &str,
        user_id: i32,
    ) -> Result<Option<RefreshTokenRow>, AuthError> {
        let expires_at = Utc::now() + self.refresh_ttl;
        let mut retried = false;
        loop {
            let successor = CreateRefreshToken {
                token: generate_refresh_token(),
                user_id,
                expires_at,
            };
            match self.tokens.rotate(presented, successor).await {
                Ok(outcome) => return Ok(outcome),
                Err(DbError::UniqueViolation) if !retried => retried = true,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

fn parse_role(user: &UserRow) -> Result<Role, AuthError> {
    Role::from_str(&user.role).map_err(|e| {
        tracing::error!(user_id = user.id, "Unparseable role in store: {}", e);
        AuthError::Internal("invalid role in user record".to_string())
    })
}

impl<U, R> std::fmt::Debug for SessionManager<U, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}
