//! `qa_article`: articles collected for question answering.

use crate::service::validation::ValidationRule;
use crate::sql::{ColumnSpec, TableSpec};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub static QA_ARTICLE: TableSpec = TableSpec {
    table: "qa_article",
    primary_key: "id",
    columns: &[
        ColumnSpec::new("id", "uuid").defaulted(),
        ColumnSpec::new("title", "text").rule(ValidationRule {
            max_length: Some(255),
            ..ValidationRule::NONE
        }),
        ColumnSpec::new("url", "text").rule(ValidationRule {
            max_length: Some(2048),
            pattern: Some(r"^https?://"),
            ..ValidationRule::NONE
        }),
        ColumnSpec::new("source", "text"),
        ColumnSpec::new("content", "text"),
        ColumnSpec::new("created_at", "timestamptz").defaulted(),
    ],
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaArticle {
    pub id: Uuid,
    pub title: Option<String>,
    pub url: Option<String>,
    pub source: Option<String>,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QaArticleCreate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

pub type QaArticleUpdate = QaArticleCreate;
