//! Mock repositories for testing

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use janus_db::{
    CreateRefreshToken, CreateUser, DbError, DbResult, RefreshTokenRepository, RefreshTokenRow,
    UserRepository, UserRow,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory user repository for testing
#[derive(Default, Clone)]
pub struct MockUserRepository {
    users: Arc<DashMap<i32, UserRow>>,
    by_email: Arc<DashMap<String, i32>>,
    next_id: Arc<AtomicI32>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: i32) -> DbResult<Option<UserRow>> {
        Ok(self.users.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>> {
        Ok(self
            .by_email
            .get(email)
            .and_then(|id| self.users.get(id.value()).map(|r| r.value().clone())))
    }

    async fn create(&self, user: CreateUser) -> DbResult<UserRow> {
        if self.by_email.contains_key(&user.email) {
            return Err(DbError::UniqueViolation);
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let row = UserRow {
            id,
            name: user.name,
            email: user.email.clone(),
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.by_email.insert(user.email, id);
        self.users.insert(id, row.clone());
        Ok(row)
    }
}

/// In-memory refresh token repository for testing.
///
/// Keyed by token value behind a single mutex so `rotate` is genuinely
/// transactional: the compare-and-swap on the revoked flag and the
/// successor insert happen under one lock, matching the Pg implementation's
/// transaction. No await ever happens while the lock is held.
#[derive(Default, Clone)]
pub struct MockRefreshTokenRepository {
    tokens: Arc<Mutex<HashMap<String, RefreshTokenRow>>>,
    next_id: Arc<AtomicI64>,
}

impl MockRefreshTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn build_row(&self, token: CreateRefreshToken) -> RefreshTokenRow {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        RefreshTokenRow {
            id,
            token: token.token,
            user_id: token.user_id,
            created_at: Utc::now(),
            expires_at: token.expires_at,
            is_revoked: false,
            revoked_at: None,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, RefreshTokenRow>> {
        self.tokens.lock().expect("mock token store poisoned")
    }

    /// Insert a token row directly, bypassing the create path
    #[allow(dead_code)]
    pub fn insert_row(&self, row: RefreshTokenRow) {
        self.lock().insert(row.token.clone(), row);
    }

    /// Snapshot every stored row for a user
    pub fn rows_for_user(&self, user_id: i32) -> Vec<RefreshTokenRow> {
        self.lock()
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Look up a single row by token value
    pub fn row(&self, token: &str) -> Option<RefreshTokenRow> {
        self.lock().get(token).cloned()
    }
}

#[async_trait]
impl RefreshTokenRepository for MockRefreshTokenRepository {
    async fn create(&self, token: CreateRefreshToken) -> DbResult<RefreshTokenRow> {
        let mut tokens = self.lock();
        if tokens.contains_key(&token.token) {
            return Err(DbError::UniqueViolation);
        }
        let row = self.build_row(token);
        tokens.insert(row.token.clone(), row.clone());
        Ok(row)
    }

    async fn find_by_value(&self, token: &str) -> DbResult<Option<RefreshTokenRow>> {
        Ok(self.lock().get(token).cloned())
    }

    async fn revoke(&self, token: &str) -> DbResult<bool> {
        match self.lock().get_mut(token) {
            Some(row) if !row.is_revoked => {
                row.is_revoked = true;
                row.revoked_at = Some(Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke_all_for_user(&self, user_id: i32) -> DbResult<u64> {
        let mut count = 0;
        for row in self.lock().values_mut() {
            if row.user_id == user_id && !row.is_revoked {
                row.is_revoked = true;
                row.revoked_at = Some(Utc::now());
                count += 1;
            }
        }
        Ok(count)
    }

    async fn rotate(
        &self,
        presented: &str,
        successor: CreateRefreshToken,
    ) -> DbResult<Option<RefreshTokenRow>> {
        let mut tokens = self.lock();

        // Compare-and-swap: exactly one concurrent caller can take the
        // presented token out of the active state.
        match tokens.get_mut(presented) {
            Some(row) if !row.is_revoked => {
                row.is_revoked = true;
                row.revoked_at = Some(Utc::now());
            }
            _ => return Ok(None),
        }

        if tokens.contains_key(&successor.token) {
            return Err(DbError::UniqueViolation);
        }
        let row = self.build_row(successor);
        tokens.insert(row.token.clone(), row.clone());
        Ok(Some(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_rotate_wins_only_once() {
        let repo = MockRefreshTokenRepository::new();
        repo.create(CreateRefreshToken {
            token: "t1".to_string(),
            user_id: 1,
            expires_at: Utc::now() + Duration::days(7),
        })
        .await
        .unwrap();

        let successor = |t: &str| CreateRefreshToken {
            token: t.to_string(),
            user_id: 1,
            expires_at: Utc::now() + Duration::days(7),
        };

        let first = repo.rotate("t1", successor("t2")).await.unwrap();
        assert!(first.is_some());

        let second = repo.rotate("t1", successor("t3")).await.unwrap();
        assert!(second.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_token_value_rejected() {
        let repo = MockRefreshTokenRepository::new();
        let create = CreateRefreshToken {
            token: "dup".to_string(),
            user_id: 1,
            expires_at: Utc::now() + Duration::days(7),
        };
        repo.create(create.clone()).await.unwrap();
        assert!(matches!(
            repo.create(create).await,
            Err(DbError::UniqueViolation)
        ));
    }

    #[tokio::test]
    async fn test_revoke_all_counts_only_live_rows() {
        let repo = MockRefreshTokenRepository::new();
        for i in 0..3 {
            repo.create(CreateRefreshToken {
                token: format!("t{i}"),
                user_id: 1,
                expires_at: Utc::now() + Duration::days(7),
            })
            .await
            .unwrap();
        }
        repo.revoke("t0").await.unwrap();

        let count = repo.revoke_all_for_user(1).await.unwrap();
        assert_eq!(count, 2);
        assert!(repo.rows_for_user(1).iter().all(|r| r.is_revoked));
    }
}
