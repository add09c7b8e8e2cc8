//! Revision files: a comment header plus `-- +upgrade` and `-- +downgrade` sections.
//!
//! ```sql
//! -- Revision ID: 3f9a0c1b2d4e
//! -- Revises: None
//! -- Create Date: 2024-05-01 10:00:00
//! -- Message: create users
//!
//! -- +upgrade
//! CREATE TABLE ...;
//!
//! -- +downgrade
//! DROP TABLE ...;
//! ```

use crate::error::MigrationError;
use std::path::{Path, PathBuf};

pub const UPGRADE_MARKER: &str = "-- +upgrade";
pub const DOWNGRADE_MARKER: &str = "-- +downgrade";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    pub id: String,
    pub revises: Option<String>,
    pub create_date: Option<String>,
    pub message: String,
    pub upgrade: String,
    pub downgrade: String,
    pub path: Option<PathBuf>,
}

enum Section {
    Header,
    Upgrade,
    Downgrade,
}

fn header_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    line.strip_prefix("--")?
        .trim_start()
        .strip_prefix(key)?
        .strip_prefix(':')
        .map(str::trim)
}

/// Parse one revision. `file` only labels errors.
pub fn parse_revision(file: &str, text: &str) -> Result<Revision, MigrationError> {
    let err = |reason: &str| MigrationError::Parse {
        file: file.to_string(),
        reason: reason.to_string(),
    };
    let mut id = None;
    let mut revises = None;
    let mut create_date = None;
    let mut message = String::new();
    let mut upgrade = Vec::new();
    let mut downgrade = Vec::new();
    let mut section = Section::Header;
    let mut saw_upgrade = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case(UPGRADE_MARKER) {
            if saw_upgrade {
                return Err(err("duplicate upgrade section"));
            }
            saw_upgrade = true;
            section = Section::Upgrade;
            continue;
        }
        if trimmed.eq_ignore_ascii_case(DOWNGRADE_MARKER) {
            if !saw_upgrade {
                return Err(err("downgrade section before upgrade section"));
            }
            section = Section::Downgrade;
            continue;
        }
        match section {
            Section::Header => {
                if let Some(v) = header_value(trimmed, "Revision ID") {
                    id = Some(v.to_string());
                } else if let Some(v) = header_value(trimmed, "Revises") {
                    revises = match v {
                        "" | "None" | "none" => None,
                        other => Some(other.to_string()),
                    };
                } else if let Some(v) = header_value(trimmed, "Create Date") {
                    create_date = Some(v.to_string());
                } else if let Some(v) = header_value(trimmed, "Message") {
                    message = v.to_string();
                }
            }
            Section::Upgrade => upgrade.push(line),
            Section::Downgrade => downgrade.push(line),
        }
    }

    let id = id.filter(|s| !s.is_empty()).ok_or_else(|| err("missing Revision ID"))?;
    if !saw_upgrade {
        return Err(err("missing upgrade section"));
    }
    Ok(Revision {
        id,
        revises,
        create_date,
        message,
        upgrade: upgrade.join("\n").trim().to_string(),
        downgrade: downgrade.join("\n").trim().to_string(),
        path: None,
    })
}

pub fn render_revision(rev: &Revision) -> String {
    format!(
        "-- Revision ID: {}\n-- Revises: {}\n-- Create Date: {}\n-- Message: {}\n\n{}\n{}\n\n{}\n{}\n",
        rev.id,
        rev.revises.as_deref().unwrap_or("None"),
        rev.create_date.as_deref().unwrap_or(""),
        rev.message,
        UPGRADE_MARKER,
        rev.upgrade,
        DOWNGRADE_MARKER,
        rev.downgrade
    )
}

/// All `*.sql` revisions in `dir`, sorted by file name. A missing directory has no revisions.
pub fn load_dir(dir: &Path) -> Result<Vec<Revision>, MigrationError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "sql"))
        .collect();
    paths.sort();
    let mut out = Vec::with_capacity(paths.len());
    for path in paths {
        let text = std::fs::read_to_string(&path)?;
        let mut rev = parse_revision(&path.display().to_string(), &text)?;
        rev.path = Some(path);
        out.push(rev);
    }
    Ok(out)
}

/// File-name slug: lowercase, non-alphanumerics collapsed to `_`, at most 40 chars.
pub fn slugify(message: &str) -> String {
    let mut slug = String::new();
    for ch in message.to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug: String = slug.trim_matches('_').chars().take(40).collect();
    slug.trim_end_matches('_').to_string()
}
