//! `qa_article` business rules.

use crate::app::models::qa_article::{QaArticle, QaArticleCreate, QaArticleUpdate};
use crate::app::repositories::qa_article::QaArticleRepository;
use crate::error::AppError;
use crate::extractors::Locale;
use crate::state::AppState;
use serde_json::Value;
use uuid::Uuid;

pub struct QaArticleService;

impl QaArticleService {
    pub async fn list(
        state: &AppState,
        filters: &[(String, Value)],
        skip: u32,
        limit: u32,
    ) -> Result<Vec<QaArticle>, AppError> {
        QaArticleRepository::list(&state.pool, filters, skip, limit).await
    }

    pub async fn get(state: &AppState, locale: &Locale, id: Uuid) -> Result<QaArticle, AppError> {
        QaArticleRepository::get(&state.pool, id)
            .await?
            .ok_or_else(|| not_found(locale))
    }

    pub async fn create(state: &AppState, data: QaArticleCreate) -> Result<QaArticle, AppError> {
        QaArticleRepository::create(&state.pool, &data).await
    }

    pub async fn update(state: &AppState, locale: &Locale, id: Uuid, data: QaArticleUpdate) -> Result<QaArticle, AppError> {
        QaArticleRepository::update(&state.pool, id, &data)
            .await?
            .ok_or_else(|| not_found(locale))
    }

    pub async fn delete(state: &AppState, locale: &Locale, id: Uuid) -> Result<(), AppError> {
        if !QaArticleRepository::delete(&state.pool, id).await? {
            return Err(not_found(locale));
        }
        Ok(())
    }
}

fn not_found(locale: &Locale) -> AppError {
    AppError::NotFound(locale.t_with("resource_not_found", &[("resource", "qa_article")]))
}
