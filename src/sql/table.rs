//! Static table descriptions for generic resources.

use crate::service::validation::ValidationRule;

/// One column: name, PostgreSQL type used for parameter casts, whether the DB supplies a default.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub pg_type: &'static str,
    pub has_default: bool,
    pub rule: ValidationRule,
}

impl ColumnSpec {
    pub const fn new(name: &'static str, pg_type: &'static str) -> Self {
        ColumnSpec {
            name,
            pg_type,
            has_default: false,
            rule: ValidationRule::NONE,
        }
    }

    pub const fn defaulted(mut self) -> Self {
        self.has_default = true;
        self
    }

    pub const fn rule(mut self, rule: ValidationRule) -> Self {
        self.rule = rule;
        self
    }
}

/// Table with a single-column primary key. Identifiers come from code, never from requests.
#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    pub table: &'static str,
    pub primary_key: &'static str,
    pub columns: &'static [ColumnSpec],
}

impl TableSpec {
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// `(column, rule)` pairs for the request validator. Server-managed columns are skipped.
    pub fn rules(&self) -> impl Iterator<Item = (&'static str, &'static ValidationRule)> + '_ {
        self.columns
            .iter()
            .filter(|c| c.name != self.primary_key && !is_managed(c.name))
            .map(|c| (c.name, &c.rule))
    }
}

/// Timestamps maintained by the database or the builder.
pub fn is_managed(column: &str) -> bool {
    matches!(column, "created_at" | "updated_at")
}
