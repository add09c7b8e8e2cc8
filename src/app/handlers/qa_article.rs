//! `qa_article` handlers.

use crate::app::models::qa_article::{QaArticle, QaArticleCreate, QaArticleUpdate, QA_ARTICLE};
use crate::app::services::qa_article::QaArticleService;
use crate::error::AppError;
use crate::extractors::{Locale, Path};
use crate::handlers::resource::list_params;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use std::collections::HashMap;
use uuid::Uuid;

/// `?skip&limit` plus exact-match filters on any column.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<QaArticle>>, AppError> {
    let (skip, limit, filters) = list_params(&QA_ARTICLE, params);
    Ok(Json(QaArticleService::list(&state, &filters, skip, limit).await?))
}

pub async fn get(
    State(state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<Json<QaArticle>, AppError> {
    Ok(Json(QaArticleService::get(&state, &locale, id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<QaArticleCreate>,
) -> Result<(StatusCode, Json<QaArticle>), AppError> {
    let created = QaArticleService::create(&state, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(body): Json<QaArticleUpdate>,
) -> Result<Json<QaArticle>, AppError> {
    Ok(Json(QaArticleService::update(&state, &locale, id, body).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    QaArticleService::delete(&state, &locale, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
