//! Translation management.

use crate::error::AppError;
use crate::extractors::Locale;
use crate::models::{BulkLanguageResponse, Language, LanguageCreate, LanguageUpdate, TranslationMap};
use crate::state::AppState;
use uuid::Uuid;

const BULK_LIMIT: usize = 1000;

pub struct LanguageService;

impl LanguageService {
    pub async fn list(state: &AppState, skip: u32, limit: u32) -> Result<Vec<Language>, AppError> {
        state.languages.list(skip, limit).await
    }

    pub async fn bulk(state: &AppState, codes: &[String]) -> Result<TranslationMap, AppError> {
        state.languages.bulk(codes).await
    }

    pub async fn get(state: &AppState, locale: &Locale, id: Uuid) -> Result<Language, AppError> {
        state
            .languages
            .get(id)
            .await?
            .ok_or_else(|| not_found(locale))
    }

    /// All rows for a code; an unknown code is a 404.
    pub async fn by_code(state: &AppState, locale: &Locale, code: &str) -> Result<Vec<Language>, AppError> {
        let rows = state.languages.by_code(code).await?;
        if rows.is_empty() {
            return Err(not_found(locale));
        }
        Ok(rows)
    }

    pub async fn by_code_and_key(state: &AppState, locale: &Locale, code: &str, key: &str) -> Result<Language, AppError> {
        state
            .languages
            .by_code_and_key(code, key)
            .await?
            .ok_or_else(|| not_found(locale))
    }

    pub async fn create(state: &AppState, locale: &Locale, data: LanguageCreate) -> Result<Language, AppError> {
        data.validate()?;
        if state.languages.exists(&data.language_code, &data.key).await? {
            return Err(AppError::Conflict(locale.t("language_key_exists")));
        }
        let row = state.languages.create(data).await?;
        state.translator.merge(
            &row.language_code,
            [(row.key.clone(), row.value.clone())].into_iter().collect(),
        );
        Ok(row)
    }

    /// Insert every valid, new `(code, key)` pair. Invalid or existing entries are reported,
    /// not fatal.
    pub async fn create_bulk(
        state: &AppState,
        locale: &Locale,
        items: Vec<LanguageCreate>,
    ) -> Result<BulkLanguageResponse, AppError> {
        if items.len() > BULK_LIMIT {
            return Err(AppError::BadRequest(format!(
                "bulk create limited to {} items",
                BULK_LIMIT
            )));
        }
        let mut inserted = 0usize;
        let mut failed_keys = Vec::new();
        for item in items {
            if item.validate().is_err() || state.languages.exists(&item.language_code, &item.key).await? {
                failed_keys.push(format!("{}.{}", item.language_code, item.key));
                continue;
            }
            state.languages.create(item).await?;
            inserted += 1;
        }
        tracing::info!(inserted, failed = failed_keys.len(), "bulk translation insert");
        Ok(BulkLanguageResponse {
            message: locale.t("languages_created_successfully"),
            inserted_count: inserted,
            failed_keys,
        })
    }

    pub async fn update(state: &AppState, locale: &Locale, id: Uuid, data: LanguageUpdate) -> Result<Language, AppError> {
        data.validate()?;
        state
            .languages
            .update(id, data)
            .await?
            .ok_or_else(|| not_found(locale))
    }

    pub async fn delete(state: &AppState, locale: &Locale, id: Uuid) -> Result<(), AppError> {
        if !state.languages.delete(id).await? {
            return Err(not_found(locale));
        }
        Ok(())
    }
}

fn not_found(locale: &Locale) -> AppError {
    AppError::NotFound(locale.t("language_not_found"))
}
