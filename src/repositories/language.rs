//! Translation persistence.

use crate::error::AppError;
use crate::models::{Language, LanguageCreate, LanguageUpdate, TranslationMap};
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

#[async_trait]
pub trait LanguageRepository: Send + Sync {
    async fn list(&self, skip: u32, limit: u32) -> Result<Vec<Language>, AppError>;
    async fn get(&self, id: Uuid) -> Result<Option<Language>, AppError>;
    async fn by_code(&self, code: &str) -> Result<Vec<Language>, AppError>;
    async fn by_code_and_key(&self, code: &str, key: &str) -> Result<Option<Language>, AppError>;
    async fn create(&self, data: LanguageCreate) -> Result<Language, AppError>;
    async fn update(&self, id: Uuid, data: LanguageUpdate) -> Result<Option<Language>, AppError>;
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;

    /// `code -> {key: value}` for each requested code. Unknown codes map to an empty table.
    async fn bulk(&self, codes: &[String]) -> Result<TranslationMap, AppError> {
        let mut out = HashMap::with_capacity(codes.len());
        for code in codes {
            let rows = self.by_code(code).await?;
            out.insert(
                code.clone(),
                rows.into_iter().map(|r| (r.key, r.value)).collect(),
            );
        }
        Ok(out)
    }

    async fn exists(&self, code: &str, key: &str) -> Result<bool, AppError> {
        Ok(self.by_code_and_key(code, key).await?.is_some())
    }
}

pub struct PgLanguageRepository {
    pool: PgPool,
}

impl PgLanguageRepository {
    pub fn new(pool: PgPool) -> Self {
        PgLanguageRepository { pool }
    }
}

#[async_trait]
impl LanguageRepository for PgLanguageRepository {
    async fn list(&self, skip: u32, limit: u32) -> Result<Vec<Language>, AppError> {
        Ok(sqlx::query_as::<_, Language>(
            "SELECT id, language_code, key, value FROM language \
             ORDER BY language_code, key LIMIT $1 OFFSET $2",
        )
        .bind(i64::from(limit))
        .bind(i64::from(skip))
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Language>, AppError> {
        Ok(sqlx::query_as::<_, Language>(
            "SELECT id, language_code, key, value FROM language WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn by_code(&self, code: &str) -> Result<Vec<Language>, AppError> {
        Ok(sqlx::query_as::<_, Language>(
            "SELECT id, language_code, key, value FROM language WHERE language_code = $1 ORDER BY key",
        )
        .bind(code)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn by_code_and_key(&self, code: &str, key: &str) -> Result<Option<Language>, AppError> {
        Ok(sqlx::query_as::<_, Language>(
            "SELECT id, language_code, key, value FROM language WHERE language_code = $1 AND key = $2",
        )
        .bind(code)
        .bind(key)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn create(&self, data: LanguageCreate) -> Result<Language, AppError> {
        tracing::debug!(code = %data.language_code, key = %data.key, "insert translation");
        Ok(sqlx::query_as::<_, Language>(
            "INSERT INTO language (id, language_code, key, value) VALUES ($1, $2, $3, $4) \
             RETURNING id, language_code, key, value",
        )
        .bind(Uuid::new_v4())
        .bind(&data.language_code)
        .bind(&data.key)
        .bind(&data.value)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update(&self, id: Uuid, data: LanguageUpdate) -> Result<Option<Language>, AppError> {
        Ok(sqlx::query_as::<_, Language>(
            "UPDATE language SET language_code = COALESCE($2, language_code), \
             key = COALESCE($3, key), value = COALESCE($4, value) \
             WHERE id = $1 RETURNING id, language_code, key, value",
        )
        .bind(id)
        .bind(&data.language_code)
        .bind(&data.key)
        .bind(&data.value)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let done = sqlx::query("DELETE FROM language WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected() > 0)
    }
}
