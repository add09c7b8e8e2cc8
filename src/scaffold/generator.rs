//! Writes generated resource files into the source tree and registers them.

use super::columns::{is_identifier, ColumnDef};
use super::templates::{self, Names, REGISTER_MARKER, ROUTES_MOD};
use crate::case::{normalize_resource_names, resolve_base_path};
use crate::error::ScaffoldError;
use crate::migration;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Model,
    Repository,
    Service,
    /// HTTP handlers.
    Controller,
    Route,
}

impl Component {
    pub const RESOURCE: [Component; 5] = [
        Component::Model,
        Component::Repository,
        Component::Service,
        Component::Controller,
        Component::Route,
    ];

    fn folder(self) -> &'static str {
        match self {
            Component::Model => "models",
            Component::Repository => "repositories",
            Component::Service => "services",
            Component::Controller => "handlers",
            Component::Route => "routes",
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Component::Model => "model",
            Component::Repository => "repository",
            Component::Service => "service",
            Component::Controller => "controller",
            Component::Route => "route",
        }
    }
}

/// What a run did. Existing files are never overwritten.
#[derive(Debug, Default)]
pub struct Report {
    pub created: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub migration: Option<PathBuf>,
}

/// Resolved target of one resource.
#[derive(Debug, Clone)]
struct Target {
    folder: PathBuf,
    version: Option<String>,
    names: Names,
}

pub struct Scaffolder {
    root: PathBuf,
    migrations_dir: PathBuf,
}

impl Scaffolder {
    /// `migrations_dir` is taken relative to `root` unless absolute.
    pub fn new(root: impl Into<PathBuf>, migrations_dir: impl AsRef<Path>) -> Self {
        let root = root.into();
        let migrations_dir = root.join(migrations_dir.as_ref());
        Scaffolder { root, migrations_dir }
    }

    fn target(&self, name: &str, component: Component) -> Result<Target, ScaffoldError> {
        let base_path = resolve_base_path(name.trim());
        let (base, _, _) = normalize_resource_names(&base_path.resource, component.suffix());
        let (_, _, type_name) = normalize_resource_names(&base_path.resource, "model");
        if !is_identifier(&base) {
            return Err(ScaffoldError::InvalidName(name.to_string()));
        }
        if matches!(base.as_str(), "mod" | "handlers" | "models" | "repositories" | "routes" | "services") {
            return Err(ScaffoldError::InvalidName(format!("'{}' is reserved", base)));
        }
        Ok(Target {
            folder: self.root.join(base_path.folder),
            version: base_path.version,
            names: Names {
                base,
                type_name,
                module: base_path.module.to_string(),
            },
        })
    }

    /// Generate one component of `name` (e.g. `product`, `v1/product`, `core/audit`).
    pub fn make(
        &self,
        component: Component,
        name: &str,
        columns: &[ColumnDef],
        report: &mut Report,
    ) -> Result<(), ScaffoldError> {
        let target = self.target(name, component)?;
        let names = &target.names;
        let content = match component {
            Component::Model => templates::render_model(names, columns),
            Component::Repository => templates::render_repository(names),
            Component::Service => templates::render_service(names),
            Component::Controller => templates::render_handler(names),
            Component::Route => templates::render_route(names, target.version.as_deref()),
        };
        let mut dir = target.folder.join(component.folder());
        if component == Component::Route {
            if let Some(version) = &target.version {
                register_module(&dir.join("mod.rs"), version)?;
                dir = dir.join(version);
            }
        }
        let path = dir.join(format!("{}.rs", names.base));
        if create_file(&path, &content)? {
            report.created.push(path);
        } else {
            report.skipped.push(path);
        }
        register_module(&dir.join("mod.rs"), &names.base)?;
        if component == Component::Route {
            let call = match &target.version {
                Some(v) => format!("{}::{}::module()", v, names.base),
                None => format!("{}::module()", names.base),
            };
            register_route(&target.folder.join("routes").join("mod.rs"), &call)?;
        }
        Ok(())
    }

    /// Model, repository, service, handlers and route; optionally a migration.
    pub fn make_resource(
        &self,
        name: &str,
        columns: &[ColumnDef],
        with_migration: bool,
    ) -> Result<Report, ScaffoldError> {
        let mut report = Report::default();
        for component in Component::RESOURCE {
            self.make(component, name, columns, &mut report)?;
        }
        if with_migration {
            report.migration = Some(self.make_migration(name, columns)?);
        }
        Ok(report)
    }

    /// Revision creating the resource table on top of the current head.
    pub fn make_migration(&self, name: &str, columns: &[ColumnDef]) -> Result<PathBuf, ScaffoldError> {
        let table = self.target(name, Component::Model)?.names.base;
        let path = migration::new_revision(
            &self.migrations_dir,
            &format!("create {} table", table),
            &templates::render_create_table(&table, columns),
            &templates::render_drop_table(&table),
        )?;
        Ok(path)
    }
}

/// Write `content` unless `path` exists. Returns whether the file was created.
pub fn create_file(path: &Path, content: &str) -> Result<bool, ScaffoldError> {
    if path.exists() {
        tracing::warn!(path = %path.display(), "skipped (already exists)");
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    tracing::info!(path = %path.display(), "created");
    Ok(true)
}

/// Add `pub mod <name>;` to `mod_rs` (created when missing) after the last `pub mod` line.
pub fn register_module(mod_rs: &Path, name: &str) -> Result<(), ScaffoldError> {
    let decl = format!("pub mod {};", name);
    let content = if mod_rs.exists() {
        fs::read_to_string(mod_rs)?
    } else if mod_rs.parent().map(|p| p.ends_with("routes")).unwrap_or(false) {
        ROUTES_MOD.to_string()
    } else {
        String::new()
    };
    if content.lines().any(|l| l.trim() == decl) {
        return Ok(());
    }
    let mut lines: Vec<&str> = content.lines().collect();
    let at = match lines.iter().rposition(|l| l.trim_start().starts_with("pub mod ")) {
        Some(i) => i + 1,
        None => {
            let docs = lines.iter().take_while(|l| l.starts_with("//!")).count();
            if docs > 0 {
                docs + 1
            } else {
                0
            }
        }
    };
    let blank_after = at == 0 && !lines.is_empty();
    let at = at.min(lines.len());
    lines.insert(at, &decl);
    if blank_after {
        lines.insert(at + 1, "");
    }
    if let Some(parent) = mod_rs.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut out = lines.join("\n");
    out.push('\n');
    fs::write(mod_rs, out)?;
    Ok(())
}

/// Insert `modules.push(<call>);` above the registration marker of a routes `mod.rs`.
pub fn register_route(mod_rs: &Path, call: &str) -> Result<(), ScaffoldError> {
    let content = if mod_rs.exists() {
        fs::read_to_string(mod_rs)?
    } else {
        ROUTES_MOD.to_string()
    };
    if content.contains(call) {
        return Ok(());
    }
    let Some(pos) = content.find(REGISTER_MARKER) else {
        return Err(ScaffoldError::InvalidName(format!(
            "{} has no '{}' marker",
            mod_rs.display(),
            REGISTER_MARKER
        )));
    };
    let line_start = content[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let indent = &content[line_start..pos];
    let mut out = String::with_capacity(content.len() + call.len() + 24);
    out.push_str(&content[..line_start]);
    out.push_str(&format!("{}modules.push({});\n", indent, call));
    out.push_str(&content[line_start..]);
    fs::write(mod_rs, out)?;
    Ok(())
}
