//! Request language from `Accept-Language`, bound to the shared translator.

use crate::i18n::{parse_accept_language, Translator, FALLBACK_LANGUAGE};
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::ACCEPT_LANGUAGE, request::Parts, HeaderMap},
};

#[derive(Clone)]
pub struct Locale {
    pub lang: String,
    translator: Translator,
}

impl Locale {
    pub fn new(lang: impl Into<String>, translator: Translator) -> Self {
        Locale {
            lang: lang.into(),
            translator,
        }
    }

    pub fn from_headers(headers: &HeaderMap, translator: Translator) -> Self {
        let lang = headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_accept_language)
            .unwrap_or_else(|| FALLBACK_LANGUAGE.to_string());
        Locale::new(lang, translator)
    }

    /// Translated text for `key`.
    pub fn t(&self, key: &str) -> String {
        self.translator.translate(&self.lang, key)
    }

    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        self.translator.translate_with(&self.lang, key, args)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Locale {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(Locale::from_headers(&parts.headers, state.translator.clone()))
    }
}
