//! User persistence.

use crate::error::AppError;
use crate::models::{NewUser, User};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;
    async fn list(&self, skip: u32, limit: u32) -> Result<Vec<User>, AppError>;
    /// Fails with `Conflict` when the email is taken.
    async fn create(&self, user: NewUser) -> Result<User, AppError>;
    /// Persist every mutable column of `user`.
    async fn update(&self, user: &User) -> Result<User, AppError>;
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

const USER_COLUMNS: &str = "id, email, is_active, is_superuser, full_name, preferred_language, \
     hashed_password, auth_provider, provider_id, avatar_url, identifier, metadata, created_at";

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        PgUserRepository { pool }
    }
}

fn unique_to_conflict(e: sqlx::Error, email: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict(format!("user {} already exists", email))
        }
        _ => AppError::Db(e),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn list(&self, skip: u32, limit: u32) -> Result<Vec<User>, AppError> {
        let sql = format!(
            "SELECT {} FROM users ORDER BY created_at, email LIMIT $1 OFFSET $2",
            USER_COLUMNS
        );
        tracing::debug!(sql = %sql, skip, limit, "query");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(i64::from(limit))
            .bind(i64::from(skip))
            .fetch_all(&self.pool)
            .await?)
    }

    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let sql = format!(
            "INSERT INTO users (id, email, hashed_password, full_name, preferred_language, \
             is_superuser, is_active, auth_provider) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}",
            USER_COLUMNS
        );
        tracing::debug!(sql = %sql, email = %user.email, "query");
        let email = user.email.clone();
        sqlx::query_as::<_, User>(&sql)
            .bind(Uuid::new_v4())
            .bind(&user.email)
            .bind(&user.hashed_password)
            .bind(&user.full_name)
            .bind(&user.preferred_language)
            .bind(user.is_superuser)
            .bind(user.is_active)
            .bind(&user.auth_provider)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| unique_to_conflict(e, &email))
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        let sql = format!(
            "UPDATE users SET email = $2, is_active = $3, is_superuser = $4, full_name = $5, \
             preferred_language = $6, hashed_password = $7, avatar_url = $8, metadata = $9 \
             WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        );
        tracing::debug!(sql = %sql, id = %user.id, "query");
        sqlx::query_as::<_, User>(&sql)
            .bind(user.id)
            .bind(&user.email)
            .bind(user.is_active)
            .bind(user.is_superuser)
            .bind(&user.full_name)
            .bind(&user.preferred_language)
            .bind(&user.hashed_password)
            .bind(&user.avatar_url)
            .bind(&user.metadata)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| unique_to_conflict(e, &user.email))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let sql = "DELETE FROM users WHERE id = $1";
        tracing::debug!(sql = %sql, %id, "query");
        let done = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(done.rows_affected() > 0)
    }
}
