//! Auth service - ties together credential verification, token issuance,
//! session rotation, and policy checks

use janus_db::{RefreshTokenRepository, UserRepository};
use janus_types::{Role, TokenPair, UserId};
use std::sync::Arc;

use crate::policy;
use crate::session::SessionManager;
use crate::token::{AccessClaims, TokenIssuer};
use crate::{AuthConfig, AuthError};

/// Authentication service
///
/// The single interface collaborators consume:
/// - `login` / `refresh` / `logout` for session lifecycle
/// - `authenticate` as the pre-check on every protected call
/// - `authorize_*` for policy decisions over decoded claims
pub struct AuthService<U: UserRepository, R: RefreshTokenRepository> {
    config: AuthConfig,
    issuer: TokenIssuer,
    sessions: SessionManager<U, R>,
}

impl<U: UserRepository, R: RefreshTokenRepository> AuthService<U, R> {
    /// Create a new auth service
    pub fn new(config: AuthConfig, users: Arc<U>, tokens: Arc<R>) -> Self {
        let issuer = TokenIssuer::new(&config);
        let sessions = SessionManager::new(&config, issuer.clone(), users, tokens);
        Self {
            config,
            issuer,
            sessions,
        }
    }

    /// Verify credentials and open a session.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        self.sessions.login(email, password).await
    }

    /// Rotate a refresh token into a fresh pair.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        self.sessions.refresh(refresh_token).await
    }

    /// Revoke a refresh token.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), AuthError> {
        self.sessions.logout(refresh_token).await
    }

    /// Revoke every session for a user (administrative containment).
    pub async fn revoke_all_sessions(&self, user_id: UserId) -> Result<u64, AuthError> {
        self.sessions.revoke_all_sessions(user_id).await
    }

    /// Verify an access token and return its claims.
    pub fn authenticate(&self, access_token: &str) -> Result<AccessClaims, AuthError> {
        self.issuer.verify(access_token)
    }

    /// Self-or-admin authorization over decoded claims.
    pub fn authorize_self_or_admin(
        &self,
        claims: &AccessClaims,
        target_owner: UserId,
    ) -> Result<(), AuthError> {
        policy::self_or_admin(claims, target_owner)
    }

    /// Role authorization over decoded claims.
    pub fn authorize_role(&self, claims: &AccessClaims, required: Role) -> Result<(), AuthError> {
        policy::require_role(claims, required)
    }
}

impl<U: UserRepository, R: RefreshTokenRepository> std::fmt::Debug for AuthService<U, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("config", &self.config)
            .finish()
    }
}
