//! Translation handlers. Reads are public; writes require a superuser.

use crate::error::AppError;
use crate::extractors::{AdminUser, Locale, Path};
use crate::models::{Language, LanguageCreate, LanguageUpdate, TranslationMap};
use crate::response::{created, Message, Pagination};
use crate::service::LanguageService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Language>>, AppError> {
    Ok(Json(LanguageService::list(&state, page.skip, page.clamped_limit()).await?))
}

/// `languages` may repeat (`?languages=en&languages=cs`) or be comma separated.
pub fn requested_codes(params: &[(String, String)]) -> Vec<String> {
    let mut codes: Vec<String> = Vec::new();
    for (k, v) in params {
        if k != "languages" {
            continue;
        }
        for code in v.split(',').map(str::trim).filter(|c| !c.is_empty()) {
            if !codes.iter().any(|c| c == code) {
                codes.push(code.to_string());
            }
        }
    }
    codes
}

pub async fn bulk(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<TranslationMap>, AppError> {
    let codes = requested_codes(&params);
    if codes.is_empty() {
        return Err(AppError::Validation("languages is required".into()));
    }
    Ok(Json(LanguageService::bulk(&state, &codes).await?))
}

pub async fn get(
    State(state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<Json<Language>, AppError> {
    Ok(Json(LanguageService::get(&state, &locale, id).await?))
}

pub async fn by_code(
    State(state): State<AppState>,
    locale: Locale,
    Path(code): Path<String>,
) -> Result<Json<Vec<Language>>, AppError> {
    Ok(Json(LanguageService::by_code(&state, &locale, &code).await?))
}

pub async fn by_code_and_key(
    State(state): State<AppState>,
    locale: Locale,
    Path((code, key)): Path<(String, String)>,
) -> Result<Json<Language>, AppError> {
    Ok(Json(LanguageService::by_code_and_key(&state, &locale, &code, &key).await?))
}

pub async fn create(
    State(state): State<AppState>,
    locale: Locale,
    _admin: AdminUser,
    Json(body): Json<LanguageCreate>,
) -> Result<impl IntoResponse, AppError> {
    Ok(created(LanguageService::create(&state, &locale, body).await?))
}

pub async fn create_bulk(
    State(state): State<AppState>,
    locale: Locale,
    _admin: AdminUser,
    Json(items): Json<Vec<LanguageCreate>>,
) -> Result<impl IntoResponse, AppError> {
    let result = LanguageService::create_bulk(&state, &locale, items).await?;
    if !result.failed_keys.is_empty() {
        tracing::warn!(failed = ?result.failed_keys, "some translations were not inserted");
    }
    let msg = locale.t_with(
        "languages_created_count",
        &[("count", &result.inserted_count.to_string())],
    );
    Ok(created(Message::new(msg)))
}

pub async fn update(
    State(state): State<AppState>,
    locale: Locale,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(body): Json<LanguageUpdate>,
) -> Result<Json<Language>, AppError> {
    Ok(Json(LanguageService::update(&state, &locale, id, body).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    locale: Locale,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    LanguageService::delete(&state, &locale, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_requested_codes() {
        let params = pairs(&[("languages", "en, cs"), ("languages", "de"), ("other", "x"), ("languages", "en")]);
        assert_eq!(requested_codes(&params), vec!["en", "cs", "de"]);
        assert!(requested_codes(&pairs(&[("languages", " , ")])).is_empty());
    }
}
