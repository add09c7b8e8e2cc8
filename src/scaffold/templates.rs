//! Source templates for generated resources. They follow the layout of `app::*::qa_article`.
//! Placeholders are `{{name}}` tokens.

use super::columns::{ColumnDef, ColumnType};

/// Names shared by every file of one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Names {
    /// snake_case: file, module, table and URL segment.
    pub base: String,
    /// PascalCase model type.
    pub type_name: String,
    /// Module path of the resource folder, e.g. `crate::app`.
    pub module: String,
}

impl Names {
    pub fn const_name(&self) -> String {
        self.base.to_ascii_uppercase()
    }

    fn vars(&self) -> Vec<(&'static str, String)> {
        vec![
            ("base", self.base.clone()),
            ("Type", self.type_name.clone()),
            ("CONST", self.const_name()),
            ("module", self.module.clone()),
        ]
    }
}

/// Replace every `{{key}}` in `template`.
pub fn fill(template: &str, vars: &[(&str, String)]) -> String {
    vars.iter().fold(template.to_string(), |acc, (k, v)| {
        acc.replace(&format!("{{{{{}}}}}", k), v)
    })
}

const MODEL: &str = r#"//! `{{base}}` resource.

{{imports}}
pub static {{CONST}}: TableSpec = TableSpec {
    table: "{{base}}",
    primary_key: "id",
    columns: &[
        ColumnSpec::new("id", "uuid").defaulted(),
{{spec_columns}}        ColumnSpec::new("created_at", "timestamptz").defaulted(),
    ],
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct {{Type}} {
    pub id: Uuid,
{{fields}}    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct {{Type}}Create {
{{create_fields}}}

pub type {{Type}}Update = {{Type}}Create;
"#;

const REPOSITORY: &str = r#"//! Persistence for `{{base}}` over the generic CRUD service.

use {{module}}::models::{{base}}::{{{Type}}, {{Type}}Create, {{Type}}Update, {{CONST}}};
use crate::error::AppError;
use crate::service::crud::{from_row, to_fields, CrudService};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

pub struct {{Type}}Repository;

impl {{Type}}Repository {
    pub async fn list(
        pool: &PgPool,
        filters: &[(String, Value)],
        skip: u32,
        limit: u32,
    ) -> Result<Vec<{{Type}}>, AppError> {
        CrudService::list(pool, &{{CONST}}, filters, limit, skip)
            .await?
            .into_iter()
            .map(from_row)
            .collect()
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> Result<Option<{{Type}}>, AppError> {
        CrudService::read(pool, &{{CONST}}, &Value::String(id.to_string()))
            .await?
            .map(from_row)
            .transpose()
    }

    pub async fn create(pool: &PgPool, data: &{{Type}}Create) -> Result<{{Type}}, AppError> {
        let row = CrudService::create(pool, &{{CONST}}, &to_fields(data)?).await?;
        from_row(row)
    }

    pub async fn update(pool: &PgPool, id: Uuid, data: &{{Type}}Update) -> Result<Option<{{Type}}>, AppError> {
        CrudService::update(pool, &{{CONST}}, &Value::String(id.to_string()), &to_fields(data)?)
            .await?
            .map(from_row)
            .transpose()
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let removed = CrudService::delete(pool, &{{CONST}}, &Value::String(id.to_string())).await?;
        Ok(removed.is_some())
    }
}
"#;

const SERVICE: &str = r#"//! `{{base}}` business rules.

use {{module}}::models::{{base}}::{{{Type}}, {{Type}}Create, {{Type}}Update};
use {{module}}::repositories::{{base}}::{{Type}}Repository;
use crate::error::AppError;
use crate::extractors::Locale;
use crate::state::AppState;
use serde_json::Value;
use uuid::Uuid;

pub struct {{Type}}Service;

impl {{Type}}Service {
    pub async fn list(
        state: &AppState,
        filters: &[(String, Value)],
        skip: u32,
        limit: u32,
    ) -> Result<Vec<{{Type}}>, AppError> {
        {{Type}}Repository::list(&state.pool, filters, skip, limit).await
    }

    pub async fn get(state: &AppState, locale: &Locale, id: Uuid) -> Result<{{Type}}, AppError> {
        {{Type}}Repository::get(&state.pool, id)
            .await?
            .ok_or_else(|| not_found(locale))
    }

    pub async fn create(state: &AppState, data: {{Type}}Create) -> Result<{{Type}}, AppError> {
        {{Type}}Repository::create(&state.pool, &data).await
    }

    pub async fn update(state: &AppState, locale: &Locale, id: Uuid, data: {{Type}}Update) -> Result<{{Type}}, AppError> {
        {{Type}}Repository::update(&state.pool, id, &data)
            .await?
            .ok_or_else(|| not_found(locale))
    }

    pub async fn delete(state: &AppState, locale: &Locale, id: Uuid) -> Result<(), AppError> {
        if !{{Type}}Repository::delete(&state.pool, id).await? {
            return Err(not_found(locale));
        }
        Ok(())
    }
}

fn not_found(locale: &Locale) -> AppError {
    AppError::NotFound(locale.t_with("resource_not_found", &[("resource", "{{base}}")]))
}
"#;

const HANDLER: &str = r#"//! `{{base}}` handlers.

use {{module}}::models::{{base}}::{{{Type}}, {{Type}}Create, {{Type}}Update, {{CONST}}};
use {{module}}::services::{{base}}::{{Type}}Service;
use crate::error::AppError;
use crate::extractors::{Locale, Path};
use crate::handlers::resource::list_params;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use std::collections::HashMap;
use uuid::Uuid;

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<{{Type}}>>, AppError> {
    let (skip, limit, filters) = list_params(&{{CONST}}, params);
    Ok(Json({{Type}}Service::list(&state, &filters, skip, limit).await?))
}

pub async fn get(
    State(state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<Json<{{Type}}>, AppError> {
    Ok(Json({{Type}}Service::get(&state, &locale, id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<{{Type}}Create>,
) -> Result<(StatusCode, Json<{{Type}}>), AppError> {
    let created = {{Type}}Service::create(&state, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(body): Json<{{Type}}Update>,
) -> Result<Json<{{Type}}>, AppError> {
    Ok(Json({{Type}}Service::update(&state, &locale, id, body).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    {{Type}}Service::delete(&state, &locale, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
"#;

const ROUTE: &str = r#"//! `{{url}}`.

use {{module}}::handlers::{{base}};
use crate::routes::registry::RouteModule;
use axum::{routing::get, Router};

pub fn module() -> RouteModule {
    let router = Router::new()
        .route("/", get({{base}}::list).post({{base}}::create))
        .route(
            "/:id",
            get({{base}}::get)
                .put({{base}}::update)
                .delete({{base}}::delete),
        );
    RouteModule::new(module_path!(), router)
}
"#;

/// `routes/mod.rs` for a folder that has none yet.
pub const ROUTES_MOD: &str = r#"use crate::routes::registry::RouteModule;

/// Every route module of this folder. New resources are registered above the marker.
pub fn modules() -> Vec<RouteModule> {
    #[allow(unused_mut)]
    let mut modules = Vec::new();
    // swx:register
    modules
}
"#;

pub const REGISTER_MARKER: &str = "// swx:register";

fn imports(columns: &[ColumnDef]) -> String {
    let has = |ty: ColumnType| columns.iter().any(|c| c.ty == ty);
    let mut lines = Vec::new();
    if has(ColumnType::Str) {
        lines.push("use crate::service::validation::ValidationRule;".to_string());
    }
    lines.push("use crate::sql::{ColumnSpec, TableSpec};".to_string());
    if has(ColumnType::Date) {
        lines.push("use chrono::{DateTime, NaiveDate, Utc};".to_string());
    } else {
        lines.push("use chrono::{DateTime, Utc};".to_string());
    }
    lines.push("use serde::{Deserialize, Serialize};".to_string());
    lines.push("use uuid::Uuid;".to_string());
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn spec_column(c: &ColumnDef) -> String {
    match c.ty {
        ColumnType::Str => format!(
            "        ColumnSpec::new(\"{}\", \"{}\").rule(ValidationRule {{\n            max_length: Some(255),\n            ..ValidationRule::NONE\n        }}),\n",
            c.name,
            c.ty.pg_type()
        ),
        _ => format!("        ColumnSpec::new(\"{}\", \"{}\"),\n", c.name, c.ty.pg_type()),
    }
}

pub fn render_model(names: &Names, columns: &[ColumnDef]) -> String {
    let spec_columns: String = columns.iter().map(spec_column).collect();
    let fields: String = columns
        .iter()
        .map(|c| format!("    pub {}: Option<{}>,\n", c.name, c.ty.rust_type()))
        .collect();
    let create_fields: String = columns
        .iter()
        .map(|c| {
            format!(
                "    #[serde(skip_serializing_if = \"Option::is_none\")]\n    pub {}: Option<{}>,\n",
                c.name,
                c.ty.rust_type()
            )
        })
        .collect();
    let mut vars = names.vars();
    vars.push(("imports", imports(columns)));
    vars.push(("spec_columns", spec_columns));
    vars.push(("fields", fields));
    vars.push(("create_fields", create_fields));
    fill(MODEL, &vars)
}

pub fn render_repository(names: &Names) -> String {
    fill(REPOSITORY, &names.vars())
}

pub fn render_service(names: &Names) -> String {
    fill(SERVICE, &names.vars())
}

pub fn render_handler(names: &Names) -> String {
    fill(HANDLER, &names.vars())
}

pub fn render_route(names: &Names, version: Option<&str>) -> String {
    let url = match version {
        Some(v) => format!("/{}/{}", v, names.base),
        None => format!("/{}", names.base),
    };
    let mut vars = names.vars();
    vars.push(("url", url));
    fill(ROUTE, &vars)
}

pub fn render_create_table(table: &str, columns: &[ColumnDef]) -> String {
    let mut lines = vec!["    id UUID PRIMARY KEY DEFAULT gen_random_uuid()".to_string()];
    lines.extend(columns.iter().map(|c| format!("    {} {}", c.name, c.ty.sql_type())));
    lines.push("    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()".to_string());
    format!("CREATE TABLE IF NOT EXISTS {} (\n{}\n);", table, lines.join(",\n"))
}

pub fn render_drop_table(table: &str) -> String {
    format!("DROP TABLE IF EXISTS {};", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaffold::columns::parse_columns;

    fn names() -> Names {
        Names {
            base: "product".into(),
            type_name: "Product".into(),
            module: "crate::app".into(),
        }
    }

    #[test]
    fn test_fill() {
        let out = fill("{{a}}-{{b}}-{{a}}", &[("a", "x".into()), ("b", "y".into())]);
        assert_eq!(out, "x-y-x");
    }

    #[test]
    fn test_model_lists_columns() {
        let cols = parse_columns("name:str, price:float, released:date").unwrap();
        let src = render_model(&names(), &cols);
        assert!(src.contains("pub static PRODUCT: TableSpec"));
        assert!(src.contains("ColumnSpec::new(\"price\", \"float8\"),"));
        assert!(src.contains("max_length: Some(255)"));
        assert!(src.contains("pub released: Option<NaiveDate>,"));
        assert!(src.contains("use chrono::{DateTime, NaiveDate, Utc};"));
        assert!(src.contains("pub type ProductUpdate = ProductCreate;"));
        assert!(!src.contains("{{"));
    }

    #[test]
    fn test_model_without_string_columns_skips_rule_import() {
        let cols = parse_columns("qty:int").unwrap();
        assert!(!render_model(&names(), &cols).contains("ValidationRule"));
    }

    #[test]
    fn test_component_templates_reference_each_other() {
        let n = names();
        assert!(render_repository(&n).contains("use crate::app::models::product::{Product, ProductCreate, ProductUpdate, PRODUCT};"));
        assert!(render_service(&n).contains("use crate::app::repositories::product::ProductRepository;"));
        assert!(render_handler(&n).contains("ProductService::list"));
        let route = render_route(&n, Some("v1"));
        assert!(route.starts_with("//! `/v1/product`."));
        assert!(route.contains("use crate::app::handlers::product;"));
    }

    #[test]
    fn test_ddl() {
        let cols = parse_columns("name:str, meta:json").unwrap();
        let ddl = render_create_table("product", &cols);
        assert!(ddl.starts_with("CREATE TABLE IF NOT EXISTS product ("));
        assert!(ddl.contains("    name VARCHAR(255),\n    meta JSONB,"));
        assert_eq!(render_drop_table("product"), "DROP TABLE IF EXISTS product;");
    }
}
