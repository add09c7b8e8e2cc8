//! Translation rows (`language` table).

use crate::error::AppError;
use crate::service::validation::length;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Language {
    pub id: Uuid,
    pub language_code: String,
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageCreate {
    pub language_code: String,
    pub key: String,
    pub value: String,
}

impl LanguageCreate {
    pub fn validate(&self) -> Result<(), AppError> {
        length("language_code", &self.language_code, Some(2), Some(5))?;
        length("key", &self.key, Some(1), Some(255))?;
        length("value", &self.value, Some(1), Some(1000))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LanguageUpdate {
    pub language_code: Option<String>,
    pub key: Option<String>,
    pub value: Option<String>,
}

impl LanguageUpdate {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(code) = &self.language_code {
            length("language_code", code, Some(2), Some(5))?;
        }
        if let Some(key) = &self.key {
            length("key", key, Some(1), Some(255))?;
        }
        if let Some(value) = &self.value {
            length("value", value, Some(1), Some(1000))?;
        }
        Ok(())
    }

    pub fn apply(self, row: &mut Language) {
        if let Some(code) = self.language_code {
            row.language_code = code;
        }
        if let Some(key) = self.key {
            row.key = key;
        }
        if let Some(value) = self.value {
            row.value = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkLanguageResponse {
    pub message: String,
    pub inserted_count: usize,
    pub failed_keys: Vec<String>,
}

/// `language_code -> key -> value`.
pub type TranslationMap = HashMap<String, HashMap<String, String>>;
