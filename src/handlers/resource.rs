//! Query-string plumbing for app resource handlers.

use crate::response::{DEFAULT_LIMIT, MAX_LIMIT};
use crate::sql::TableSpec;
use serde_json::Value;
use std::collections::HashMap;

/// Query string value typed after the column it filters.
fn query_value_for_column(spec: &TableSpec, col: &str, s: &str) -> Value {
    let pg_type = spec.column(col).map(|c| c.pg_type).unwrap_or("");
    if pg_type.contains("int") {
        if let Ok(n) = s.parse::<i64>() {
            return Value::Number(n.into());
        }
    }
    if pg_type.starts_with("bool") {
        if s.eq_ignore_ascii_case("true") {
            return Value::Bool(true);
        }
        if s.eq_ignore_ascii_case("false") {
            return Value::Bool(false);
        }
    }
    Value::String(s.to_string())
}

/// Split query params into `(skip, limit)` and exact-match column filters.
pub fn list_params(spec: &TableSpec, params: HashMap<String, String>) -> (u32, u32, Vec<(String, Value)>) {
    let mut skip = 0;
    let mut limit = DEFAULT_LIMIT;
    let mut filters = Vec::new();
    for (k, v) in params {
        match k.as_str() {
            "skip" | "offset" => skip = v.parse().unwrap_or(0),
            "limit" => limit = v.parse().unwrap_or(DEFAULT_LIMIT),
            _ if spec.has_column(&k) => {
                let val = query_value_for_column(spec, &k, &v);
                filters.push((k, val));
            }
            _ => {}
        }
    }
    filters.sort_by(|a, b| a.0.cmp(&b.0));
    (skip, limit.clamp(1, MAX_LIMIT), filters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::ColumnSpec;
    use serde_json::json;

    static THING: TableSpec = TableSpec {
        table: "thing",
        primary_key: "id",
        columns: &[
            ColumnSpec::new("id", "uuid").defaulted(),
            ColumnSpec::new("qty", "int8"),
            ColumnSpec::new("active", "boolean"),
            ColumnSpec::new("name", "text"),
        ],
    };

    #[test]
    fn test_list_params() {
        let params: HashMap<String, String> = [
            ("skip", "5"),
            ("limit", "5000"),
            ("qty", "3"),
            ("active", "TRUE"),
            ("unknown", "x"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let (skip, limit, filters) = list_params(&THING, params);
        assert_eq!((skip, limit), (5, 1000));
        assert_eq!(
            filters,
            vec![("active".to_string(), json!(true)), ("qty".to_string(), json!(3))]
        );
    }
}
