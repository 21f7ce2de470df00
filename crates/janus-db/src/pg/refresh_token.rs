//! PostgreSQL refresh token repository implementation

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::DbResult;
use crate::models::RefreshTokenRow;
use crate::repo::{CreateRefreshToken, RefreshTokenRepository};

const TOKEN_COLUMNS: &str =
    "id, token, user_id, created_at, expires_at, is_revoked, revoked_at";

/// PostgreSQL refresh token repository
#[derive(Clone)]
pub struct PgRefreshTokenRepository {
    pool: PgPool,
}

impl PgRefreshTokenRepository {
    /// Create a new refresh token repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenRepository for PgRefreshTokenRepository {
    async fn create(&self, token: CreateRefreshToken) -> DbResult<RefreshTokenRow> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(&format!(
            r#"
            INSERT INTO refresh_tokens (token, user_id, expires_at)
            VALUES ($1, $2, $3)
            RETURNING {TOKEN_COLUMNS}
            "#
        ))
        .bind(&token.token)
        .bind(token.user_id)
        .bind(token.expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_value(&self, token: &str) -> DbResult<Option<RefreshTokenRow>> {
        // No state filter here: revoked and expired rows must be visible so
        // the rotation engine can tell reuse apart from expiry.
        let row = sqlx::query_as::<_, RefreshTokenRow>(&format!(
            r#"
            SELECT {TOKEN_COLUMNS}
            FROM refresh_tokens
            WHERE token = $1
            "#
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn revoke(&self, token: &str) -> DbResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET is_revoked = TRUE, revoked_at = NOW()
            WHERE token = $1 AND is_revoked = FALSE
            "#,
        )
        .bind(token)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn revoke_all_for_user(&self, user_id: i32) -> DbResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET is_revoked = TRUE, revoked_at = NOW()
            WHERE user_id = $1 AND is_revoked = FALSE
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn rotate(
        &self,
        presented: &str,
        successor: CreateRefreshToken,
    ) -> DbResult<Option<RefreshTokenRow>> {
        let mut tx = self.pool.begin().await?;

        // Compare-and-swap on the revoked flag. Losing this update means a
        // concurrent rotation already consumed the presented token.
        let revoked = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET is_revoked = TRUE, revoked_at = NOW()
            WHERE token = $1 AND is_revoked = FALSE
            "#,
        )
        .bind(presented)
        .execute(&mut *tx)
        .await?;

        if revoked.rows_affected() != 1 {
            tx.rollback().await?;
            return Ok(None);
        }

        let row = sqlx::query_as::<_, RefreshTokenRow>(&format!(
            r#"
            INSERT INTO refresh_tokens (token, user_id, expires_at)
            VALUES ($1, $2, $3)
            RETURNING {TOKEN_COLUMNS}
            "#
        ))
        .bind(&successor.token)
        .bind(successor.user_id)
        .bind(successor.expires_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(row))
    }
}
