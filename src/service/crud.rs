//! Generic CRUD execution against PostgreSQL for resources described by a [`TableSpec`].

use crate::error::AppError;
use crate::service::validation::RequestValidator;
use crate::sql::{delete, insert, select_by_id, select_list, update, PgBindValue, QueryBuf, TableSpec};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use sqlx::PgPool;
use std::collections::HashMap;

pub struct CrudService;

impl CrudService {
    /// List rows with optional filters (exact match), limit (capped at 1000) and offset.
    pub async fn list(
        pool: &PgPool,
        spec: &TableSpec,
        filters: &[(String, Value)],
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Value>, AppError> {
        let q = select_list(spec, filters, limit, offset);
        Self::fetch_all(pool, &q).await
    }

    /// Fetch one row by primary key.
    pub async fn read(pool: &PgPool, spec: &TableSpec, id: &Value) -> Result<Option<Value>, AppError> {
        Self::fetch_optional(pool, &select_by_id(spec, id)).await
    }

    /// Validate against the column rules and insert one row. Returns the created row.
    pub async fn create(
        pool: &PgPool,
        spec: &TableSpec,
        body: &HashMap<String, Value>,
    ) -> Result<Value, AppError> {
        RequestValidator::validate(body, spec.rules())?;
        let q = insert(spec, body);
        Self::fetch_optional(pool, &q)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    /// Partial update by id. Only present fields are validated and written.
    pub async fn update(
        pool: &PgPool,
        spec: &TableSpec,
        id: &Value,
        body: &HashMap<String, Value>,
    ) -> Result<Option<Value>, AppError> {
        RequestValidator::validate_partial(body, spec.rules())?;
        Self::fetch_optional(pool, &update(spec, id, body)).await
    }

    /// Delete one row by id. Returns the deleted row or None.
    pub async fn delete(pool: &PgPool, spec: &TableSpec, id: &Value) -> Result<Option<Value>, AppError> {
        Self::fetch_optional(pool, &delete(spec, id)).await
    }

    async fn fetch_all(pool: &PgPool, q: &QueryBuf) -> Result<Vec<Value>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        let rows = query.fetch_all(pool).await?;
        Ok(rows.iter().map(row_to_json).collect())
    }

    async fn fetch_optional(pool: &PgPool, q: &QueryBuf) -> Result<Option<Value>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        let row = query.fetch_optional(pool).await?;
        Ok(row.map(|r| row_to_json(&r)))
    }
}

/// Request model as a column map. `None` fields must be skipped by the model's serializer.
pub fn to_fields<T: Serialize>(data: &T) -> Result<HashMap<String, Value>, AppError> {
    match serde_json::to_value(data).map_err(|e| AppError::Internal(e.to_string()))? {
        Value::Object(m) => Ok(m.into_iter().collect()),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

/// Typed view of a row produced by [`row_to_json`].
pub fn from_row<T: DeserializeOwned>(row: Value) -> Result<T, AppError> {
    serde_json::from_value(row).map_err(|e| AppError::Internal(format!("row decode: {}", e)))
}

/// Row as a JSON object keyed by column name.
pub fn row_to_json(row: &sqlx::postgres::PgRow) -> Value {
    use sqlx::{Column, Row};
    let mut map = serde_json::Map::new();
    for col in row.columns() {
        let name = col.name();
        map.insert(name.to_string(), cell_to_value(row, name));
    }
    Value::Object(map)
}

fn cell_to_value(row: &sqlx::postgres::PgRow, name: &str) -> Value {
    use sqlx::Row;
    if let Ok(Some(n)) = row.try_get::<Option<i16>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i32>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<f32>, _>(name) {
        if let Some(n) = serde_json::Number::from_f64(f64::from(n)) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(n)) = row.try_get::<Option<f64>, _>(name) {
        if let Some(n) = serde_json::Number::from_f64(n) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(b)) = row.try_get::<Option<bool>, _>(name) {
        return Value::Bool(b);
    }
    if let Ok(Some(u)) = row.try_get::<Option<uuid::Uuid>, _>(name) {
        return Value::String(u.to_string());
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(name) {
        return Value::String(d.to_rfc3339());
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::NaiveDateTime>, _>(name) {
        return Value::String(d.format("%Y-%m-%dT%H:%M:%S%.f").to_string());
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::NaiveDate>, _>(name) {
        return Value::String(d.format("%Y-%m-%d").to_string());
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    if let Ok(Some(j)) = row.try_get::<Option<Value>, _>(name) {
        return j;
    }
    Value::Null
}
