//! Code generation for application resources (`swx make ...`).

pub mod columns;
pub mod generator;
pub mod templates;

pub use columns::{parse_columns, ColumnDef, ColumnType};
pub use generator::{Component, Report, Scaffolder};
