//! First-run data: the initial superuser and bundled translations.

use crate::config::Settings;
use crate::error::AppError;
use crate::models::{LanguageCreate, UserCreate};
use crate::repositories::{LanguageRepository, UserRepository};
use crate::service::auth::new_local_user;
use std::path::Path;

/// Create `FIRST_SUPERUSER` unless an account with that email exists. Returns whether one was created.
pub async fn init_superuser(users: &dyn UserRepository, settings: &Settings) -> Result<bool, AppError> {
    let email = &settings.first_superuser;
    if users.get_by_email(email).await?.is_some() {
        tracing::info!(%email, "superuser already exists");
        return Ok(false);
    }
    let body = UserCreate {
        email: email.clone(),
        password: settings.first_superuser_password.clone(),
        full_name: None,
        preferred_language: None,
        is_superuser: true,
    };
    users.create(new_local_user(body, true)?).await?;
    tracing::info!(%email, "superuser created");
    Ok(true)
}

/// Insert translations from a JSON array of `{language_code, key, value}` that are not stored yet.
/// A missing or malformed file is logged and seeds nothing.
pub async fn seed_languages(languages: &dyn LanguageRepository, path: &Path) -> Result<usize, AppError> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "translations file not readable");
            return Ok(0);
        }
    };
    let entries: Vec<LanguageCreate> = match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "translations file is not valid");
            return Ok(0);
        }
    };
    let mut inserted = 0;
    for entry in entries {
        if entry.validate().is_err() {
            tracing::warn!(code = %entry.language_code, key = %entry.key, "skipping invalid translation");
            continue;
        }
        if languages.exists(&entry.language_code, &entry.key).await? {
            continue;
        }
        languages.create(entry).await?;
        inserted += 1;
    }
    tracing::info!(inserted, "translations seeded");
    Ok(inserted)
}

/// `swx db seed`: refused in production.
pub async fn seed(users: &dyn UserRepository, languages: &dyn LanguageRepository, settings: &Settings) -> Result<(), AppError> {
    if settings.is_production() {
        tracing::warn!("seeding data in production is disabled");
        return Ok(());
    }
    init_superuser(users, settings).await?;
    seed_languages(languages, &settings.translations_file).await?;
    Ok(())
}
