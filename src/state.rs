//! Shared application state for all routes.

use crate::config::Settings;
use crate::email::{LogMailer, Mailer};
use crate::i18n::Translator;
use crate::repositories::{
    LanguageRepository, PgLanguageRepository, PgRefreshTokenRepository, PgUserRepository,
    RefreshTokenRepository, UserRepository,
};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub pool: PgPool,
    pub users: Arc<dyn UserRepository>,
    pub refresh_tokens: Arc<dyn RefreshTokenRepository>,
    pub languages: Arc<dyn LanguageRepository>,
    /// Refreshed in the background from the `language` table.
    pub translator: Translator,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    /// PostgreSQL-backed state. Translations start from the cache file, if present.
    pub fn new(settings: Settings, pool: PgPool) -> Self {
        let translator = Translator::new(Translator::load_cache(&settings.translation_cache_file));
        AppState {
            settings: Arc::new(settings),
            users: Arc::new(PgUserRepository::new(pool.clone())),
            refresh_tokens: Arc::new(PgRefreshTokenRepository::new(pool.clone())),
            languages: Arc::new(PgLanguageRepository::new(pool.clone())),
            pool,
            translator,
            mailer: Arc::new(LogMailer),
        }
    }
}
