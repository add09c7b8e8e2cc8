//! Builds parameterized INSERT, SELECT, UPDATE, DELETE from a table description.

use super::table::{is_managed, TableSpec};
use serde_json::Value;
use std::collections::HashMap;

/// Quote identifier for PostgreSQL (safe: only from table descriptions).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Append a parameter and return its placeholder, cast to `pg_type` when given.
    fn push_param(&mut self, v: Value, pg_type: Option<&str>) -> String {
        self.params.push(v);
        let n = self.params.len();
        match pg_type {
            Some(t) if !t.is_empty() => format!("${}::{}", n, t),
            _ => format!("${}", n),
        }
    }
}

/// SELECT list: numeric columns as text so they decode without a decimal crate.
fn select_column_list(spec: &TableSpec) -> String {
    spec.columns
        .iter()
        .map(|c| {
            let q = quoted(c.name);
            if c.pg_type == "numeric" {
                format!("{}::text AS {}", q, q)
            } else {
                q
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn pk_type(spec: &TableSpec) -> Option<&'static str> {
    spec.column(spec.primary_key).map(|c| c.pg_type)
}

/// SELECT by primary key. Caller's id is the sole param.
pub fn select_by_id(spec: &TableSpec, id: &Value) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(id.clone(), pk_type(spec));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = {}",
        select_column_list(spec),
        quoted(spec.table),
        quoted(spec.primary_key),
        ph
    );
    q
}

/// SELECT list with optional exact-match filters, LIMIT/OFFSET. Rows come oldest first when the
/// table has `created_at`, with the pk as tie-breaker. Filters on unknown columns are ignored.
pub fn select_list(spec: &TableSpec, filters: &[(String, Value)], limit: u32, offset: u32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut where_parts = Vec::new();
    for (col, val) in filters {
        let Some(c) = spec.column(col) else { continue };
        let ph = q.push_param(val.clone(), Some(c.pg_type));
        where_parts.push(format!("{} = {}", quoted(col), ph));
    }
    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    let order_by = if spec.has_column("created_at") {
        format!("{}, {}", quoted("created_at"), quoted(spec.primary_key))
    } else {
        quoted(spec.primary_key)
    };
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {} LIMIT {} OFFSET {}",
        select_column_list(spec),
        quoted(spec.table),
        where_clause,
        order_by,
        limit.min(1000),
        offset
    );
    q
}

/// INSERT: one placeholder per known column in `body`. Columns with a DB default are omitted
/// when absent; other absent columns are inserted as NULL.
pub fn insert(spec: &TableSpec, body: &HashMap<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for c in spec.columns {
        let val = body.get(c.name).cloned();
        if val.is_none() && (c.has_default || c.name == spec.primary_key || is_managed(c.name)) {
            continue;
        }
        placeholders.push(q.push_param(val.unwrap_or(Value::Null), Some(c.pg_type)));
        cols.push(quoted(c.name));
    }
    q.sql = if cols.is_empty() {
        format!(
            "INSERT INTO {} DEFAULT VALUES RETURNING {}",
            quoted(spec.table),
            select_column_list(spec)
        )
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            quoted(spec.table),
            cols.join(", "),
            placeholders.join(", "),
            select_column_list(spec)
        )
    };
    q
}

/// UPDATE by id: SET only known, non-key columns present in body. Touches `updated_at` when the
/// table has one. With nothing to set this degrades to a SELECT by id.
pub fn update(spec: &TableSpec, id: &Value, body: &HashMap<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    let mut keys: Vec<&String> = body.keys().collect();
    keys.sort();
    for k in keys {
        if k == spec.primary_key || is_managed(k) {
            continue;
        }
        let Some(c) = spec.column(k) else { continue };
        let ph = q.push_param(body[k].clone(), Some(c.pg_type));
        sets.push(format!("{} = {}", quoted(k), ph));
    }
    if sets.is_empty() {
        return select_by_id(spec, id);
    }
    if spec.has_column("updated_at") {
        sets.push(format!("{} = NOW()", quoted("updated_at")));
    }
    let id_ph = q.push_param(id.clone(), pk_type(spec));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {} RETURNING {}",
        quoted(spec.table),
        sets.join(", "),
        quoted(spec.primary_key),
        id_ph,
        select_column_list(spec)
    );
    q
}

/// DELETE by id, returning the removed row.
pub fn delete(spec: &TableSpec, id: &Value) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(id.clone(), pk_type(spec));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = {} RETURNING {}",
        quoted(spec.table),
        quoted(spec.primary_key),
        ph,
        select_column_list(spec)
    );
    q
}
