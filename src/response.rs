//! Response bodies shared by all handlers.

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

/// Plain `{"message": ...}` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Message {
            message: message.into(),
        }
    }
}

/// Page of items plus the number of items in the page.
#[derive(Debug, Serialize, Deserialize)]
pub struct Paged<T> {
    pub data: Vec<T>,
    pub count: u64,
}

impl<T> Paged<T> {
    pub fn new(data: Vec<T>) -> Self {
        let count = data.len() as u64;
        Paged { data, count }
    }
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

pub fn message(text: impl Into<String>) -> Json<Message> {
    Json(Message::new(text))
}

/// Skip/limit query used by list endpoints. Limit defaults to 100 and is capped at 1000.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

pub const DEFAULT_LIMIT: u32 = 100;
pub const MAX_LIMIT: u32 = 1000;

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    pub fn clamped_limit(&self) -> u32 {
        self.limit.clamp(1, MAX_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paged_counts_items() {
        let p = Paged::new(vec![1, 2, 3]);
        assert_eq!(p.count, 3);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json, serde_json::json!({"data": [1, 2, 3], "count": 3}));
    }

    #[test]
    fn test_pagination_limits() {
        let p: Pagination = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!((p.skip, p.limit), (0, 100));
        let p = Pagination { skip: 0, limit: 50_000 };
        assert_eq!(p.clamped_limit(), 1000);
        let p = Pagination { skip: 0, limit: 0 };
        assert_eq!(p.clamped_limit(), 1);
    }
}
