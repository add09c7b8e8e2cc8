//! `--columns "name:str, price:float, description"` parsing.

use crate::error::ScaffoldError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Str,
    Text,
    Int,
    Float,
    Bool,
    DateTime,
    Date,
    Uuid,
    Json,
}

impl ColumnType {
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.trim().to_ascii_lowercase().as_str() {
            "str" => ColumnType::Str,
            "text" => ColumnType::Text,
            "int" => ColumnType::Int,
            "float" => ColumnType::Float,
            "bool" => ColumnType::Bool,
            "datetime" => ColumnType::DateTime,
            "date" => ColumnType::Date,
            "uuid" => ColumnType::Uuid,
            "json" => ColumnType::Json,
            _ => return None,
        })
    }

    pub fn rust_type(self) -> &'static str {
        match self {
            ColumnType::Str | ColumnType::Text => "String",
            ColumnType::Int => "i64",
            ColumnType::Float => "f64",
            ColumnType::Bool => "bool",
            ColumnType::DateTime => "DateTime<Utc>",
            ColumnType::Date => "NaiveDate",
            ColumnType::Uuid => "Uuid",
            ColumnType::Json => "serde_json::Value",
        }
    }

    /// Cast used for bound parameters.
    pub fn pg_type(self) -> &'static str {
        match self {
            ColumnType::Str | ColumnType::Text => "text",
            ColumnType::Int => "int8",
            ColumnType::Float => "float8",
            ColumnType::Bool => "boolean",
            ColumnType::DateTime => "timestamptz",
            ColumnType::Date => "date",
            ColumnType::Uuid => "uuid",
            ColumnType::Json => "jsonb",
        }
    }

    /// Column type in `CREATE TABLE`.
    pub fn sql_type(self) -> &'static str {
        match self {
            ColumnType::Str => "VARCHAR(255)",
            ColumnType::Text => "TEXT",
            ColumnType::Int => "BIGINT",
            ColumnType::Float => "DOUBLE PRECISION",
            ColumnType::Bool => "BOOLEAN",
            ColumnType::DateTime => "TIMESTAMPTZ",
            ColumnType::Date => "DATE",
            ColumnType::Uuid => "UUID",
            ColumnType::Json => "JSONB",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub ty: ColumnType,
}

const RESERVED: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while",
];

/// Lowercase ASCII identifier usable as a Rust field, module and SQL column name.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_') && !RESERVED.contains(&s)
}

/// Comma separated `name[:type]` list; the type defaults to `str`. `id` and `created_at` are
/// always generated and may not be declared.
pub fn parse_columns(raw: &str) -> Result<Vec<ColumnDef>, ScaffoldError> {
    let mut out: Vec<ColumnDef> = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (name, ty) = match part.split_once(':') {
            Some((n, t)) => (n.trim(), t.trim()),
            None => (part, "str"),
        };
        if !is_identifier(name) {
            return Err(ScaffoldError::InvalidColumn(format!("'{}' is not a valid column name", name)));
        }
        if matches!(name, "id" | "created_at") {
            return Err(ScaffoldError::InvalidColumn(format!("'{}' is generated automatically", name)));
        }
        if out.iter().any(|c| c.name == name) {
            return Err(ScaffoldError::InvalidColumn(format!("duplicate column '{}'", name)));
        }
        let ty = ColumnType::parse(ty)
            .ok_or_else(|| ScaffoldError::InvalidColumn(format!("unknown type '{}' for '{}'", ty, name)))?;
        out.push(ColumnDef {
            name: name.to_string(),
            ty,
        });
    }
    Ok(out)
}
