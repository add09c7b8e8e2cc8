//! Persistence for `qa_article` over the generic CRUD service.

use crate::app::models::qa_article::{QaArticle, QaArticleCreate, QaArticleUpdate, QA_ARTICLE};
use crate::error::AppError;
use crate::service::crud::{from_row, to_fields, CrudService};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

pub struct QaArticleRepository;

impl QaArticleRepository {
    pub async fn list(
        pool: &PgPool,
        filters: &[(String, Value)],
        skip: u32,
        limit: u32,
    ) -> Result<Vec<QaArticle>, AppError> {
        CrudService::list(pool, &QA_ARTICLE, filters, limit, skip)
            .await?
            .into_iter()
            .map(from_row)
            .collect()
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> Result<Option<QaArticle>, AppError> {
        CrudService::read(pool, &QA_ARTICLE, &Value::String(id.to_string()))
            .await?
            .map(from_row)
            .transpose()
    }

    pub async fn create(pool: &PgPool, data: &QaArticleCreate) -> Result<QaArticle, AppError> {
        let row = CrudService::create(pool, &QA_ARTICLE, &to_fields(data)?).await?;
        from_row(row)
    }

    pub async fn update(pool: &PgPool, id: Uuid, data: &QaArticleUpdate) -> Result<Option<QaArticle>, AppError> {
        CrudService::update(pool, &QA_ARTICLE, &Value::String(id.to_string()), &to_fields(data)?)
            .await?
            .map(from_row)
            .transpose()
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let removed = CrudService::delete(pool, &QA_ARTICLE, &Value::String(id.to_string())).await?;
        Ok(removed.is_some())
    }
}
