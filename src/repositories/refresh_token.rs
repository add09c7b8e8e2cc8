//! Refresh token persistence. One row per user email.

use crate::error::AppError;
use crate::models::RefreshToken;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<RefreshToken>, AppError>;
    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, AppError>;
    /// Replace the user's token (or insert the first one).
    async fn upsert_for_email(
        &self,
        email: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshToken, AppError>;
    async fn delete_by_token(&self, token: &str) -> Result<bool, AppError>;
    async fn delete_all_for_email(&self, email: &str) -> Result<u64, AppError>;
}

const COLUMNS: &str = "id, user_email, token, expires_at, created_at";

pub struct PgRefreshTokenRepository {
    pool: PgPool,
}

impl PgRefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        PgRefreshTokenRepository { pool }
    }
}

#[async_trait]
impl RefreshTokenRepository for PgRefreshTokenRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<RefreshToken>, AppError> {
        let sql = format!("SELECT {} FROM refresh_token WHERE user_email = $1", COLUMNS);
        Ok(sqlx::query_as::<_, RefreshToken>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, AppError> {
        let sql = format!("SELECT {} FROM refresh_token WHERE token = $1", COLUMNS);
        Ok(sqlx::query_as::<_, RefreshToken>(&sql)
            .bind(token)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn upsert_for_email(
        &self,
        email: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshToken, AppError> {
        let sql = format!(
            "INSERT INTO refresh_token (id, user_email, token, expires_at) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (user_email) DO UPDATE SET token = EXCLUDED.token, \
             expires_at = EXCLUDED.expires_at, created_at = NOW() RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, email, "query");
        Ok(sqlx::query_as::<_, RefreshToken>(&sql)
            .bind(Uuid::new_v4())
            .bind(email)
            .bind(token)
            .bind(expires_at)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn delete_by_token(&self, token: &str) -> Result<bool, AppError> {
        let done = sqlx::query("DELETE FROM refresh_token WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected() > 0)
    }

    async fn delete_all_for_email(&self, email: &str) -> Result<u64, AppError> {
        let done = sqlx::query("DELETE FROM refresh_token WHERE user_email = $1")
            .bind(email)
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected())
    }
}
