//! Repository traits
//!
//! Define async repository interfaces for database operations. The refresh
//! token repository is the seam the rotation engine drives: `rotate` must
//! revoke the presented token and insert its successor atomically so that
//! two concurrent rotations of the same token resolve to exactly one winner.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::DbResult;
use crate::models::{RefreshTokenRow, UserRow};

/// User repository trait
///
/// Only the operations the auth subsystem consumes; the rest of the users
/// CRUD surface lives with its own collaborators.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: i32) -> DbResult<Option<UserRow>>;

    /// Find a user by email
    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>>;

    /// Create a new user
    async fn create(&self, user: CreateUser) -> DbResult<UserRow>;
}

/// Create user input
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

/// Refresh token repository trait
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Create a new refresh token record.
    ///
    /// Returns `DbError::UniqueViolation` if the token value already exists.
    async fn create(&self, token: CreateRefreshToken) -> DbResult<RefreshTokenRow>;

    /// Find a refresh token by its value, regardless of state.
    ///
    /// Revoked and expired records are returned too; the rotation engine
    /// needs to distinguish them.
    async fn find_by_value(&self, token: &str) -> DbResult<Option<RefreshTokenRow>>;

    /// Revoke a token if it is not already revoked.
    ///
    /// Conditional update on the revoked flag; returns whether this call
    /// performed the transition.
    async fn revoke(&self, token: &str) -> DbResult<bool>;

    /// Revoke every token belonging to a user. Returns the number of
    /// records newly revoked.
    async fn revoke_all_for_user(&self, user_id: i32) -> DbResult<u64>;

    /// Atomically revoke `presented` and insert its successor.
    ///
    /// The revocation is conditional on the presented token still being
    /// unrevoked. Returns the successor row on success, or `None` if the
    /// presented token was already revoked or does not exist — the caller
    /// must re-read to classify the loss. Both steps happen in one
    /// transaction: a lost race never leaves a dangling successor.
    async fn rotate(
        &self,
        presented: &str,
        successor: CreateRefreshToken,
    ) -> DbResult<Option<RefreshTokenRow>>;
}

/// Create refresh token input
#[derive(Debug, Clone)]
pub struct CreateRefreshToken {
    pub token: String,
    pub user_id: i32,
    pub expires_at: DateTime<Utc>,
}
