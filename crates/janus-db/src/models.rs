//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// User row from the database
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserRow {
    /// Convert to domain UserId
    pub fn user_id(&self) -> janus_types::UserId {
        janus_types::UserId(self.id)
    }
}

/// Refresh token row from the database
#[derive(Debug, Clone, FromRow)]
pub struct RefreshTokenRow {
    pub id: i64,
    pub token: String,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub is_revoked: bool,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshTokenRow {
    /// Owning user as a domain UserId
    pub fn owner_id(&self) -> janus_types::UserId {
        janus_types::UserId(self.user_id)
    }

    /// Check if the token is expired (wall-clock, evaluated at read time)
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Check if the token is still usable (not revoked and not expired)
    pub fn is_active(&self) -> bool {
        !self.is_revoked && !self.is_expired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn token_row(expires_at: DateTime<Utc>, is_revoked: bool) -> RefreshTokenRow {
        RefreshTokenRow {
            id: 1,
            token: "value".to_string(),
            user_id: 1,
            created_at: Utc::now(),
            expires_at,
            is_revoked,
            revoked_at: is_revoked.then(Utc::now),
        }
    }

    #[test]
    fn test_active_token() {
        let row = token_row(Utc::now() + Duration::days(7), false);
        assert!(row.is_active());
        assert!(!row.is_expired());
    }

    #[test]
    fn test_expired_token_not_active() {
        let row = token_row(Utc::now() - Duration::seconds(1), false);
        assert!(row.is_expired());
        assert!(!row.is_active());
    }

    #[test]
    fn test_revoked_token_not_active() {
        let row = token_row(Utc::now() + Duration::days(7), true);
        assert!(!row.is_expired());
        assert!(!row.is_active());
    }
}
