//! Applies and reverts revisions, tracked in `swx_migrations`.

use super::file::{load_dir, render_revision, slugify, Revision};
use super::planner::{head, plan};
use crate::error::MigrationError;
use sqlx::PgPool;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const TRACKING_TABLE: &str = "swx_migrations";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionStatus {
    pub revision: String,
    pub message: String,
    pub applied: bool,
}

pub async fn ensure_tracking_table(pool: &PgPool) -> Result<(), MigrationError> {
    sqlx::query(&format!(
        "CREATE TABLE IF NOT EXISTS {} (\
         revision TEXT PRIMARY KEY, \
         applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW())",
        TRACKING_TABLE
    ))
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn applied_revisions(pool: &PgPool) -> Result<HashSet<String>, MigrationError> {
    let rows: Vec<(String,)> = sqlx::query_as(&format!("SELECT revision FROM {}", TRACKING_TABLE))
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|r| r.0).collect())
}

fn load_plan(dir: &Path) -> Result<Vec<Revision>, MigrationError> {
    plan(load_dir(dir)?)
}

/// Planned revisions not yet applied, in apply order.
pub fn pending<'a>(planned: &'a [Revision], applied: &HashSet<String>) -> Vec<&'a Revision> {
    planned.iter().filter(|r| !applied.contains(&r.id)).collect()
}

/// The `steps` most recently applied revisions, newest first.
pub fn to_revert<'a>(
    planned: &'a [Revision],
    applied: &HashSet<String>,
    steps: usize,
) -> Result<Vec<&'a Revision>, MigrationError> {
    let known: HashSet<&str> = planned.iter().map(|r| r.id.as_str()).collect();
    if let Some(unknown) = applied.iter().find(|id| !known.contains(id.as_str())) {
        return Err(MigrationError::Chain(format!(
            "applied revision {} has no file",
            unknown
        )));
    }
    Ok(planned
        .iter()
        .rev()
        .filter(|r| applied.contains(&r.id))
        .take(steps)
        .collect())
}

/// Apply every pending revision, each in its own transaction. Returns the applied ids.
pub async fn upgrade(pool: &PgPool, dir: &Path) -> Result<Vec<String>, MigrationError> {
    let planned = load_plan(dir)?;
    ensure_tracking_table(pool).await?;
    let applied = applied_revisions(pool).await?;
    let mut done = Vec::new();
    for rev in pending(&planned, &applied) {
        tracing::info!(revision = %rev.id, message = %rev.message, "applying migration");
        let mut tx = pool.begin().await?;
        if !rev.upgrade.is_empty() {
            sqlx::raw_sql(&rev.upgrade).execute(&mut *tx).await?;
        }
        sqlx::query(&format!("INSERT INTO {} (revision) VALUES ($1)", TRACKING_TABLE))
            .bind(&rev.id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        done.push(rev.id.clone());
    }
    Ok(done)
}

/// Revert the `steps` most recent revisions, newest first. Returns the reverted ids.
pub async fn downgrade(pool: &PgPool, dir: &Path, steps: usize) -> Result<Vec<String>, MigrationError> {
    let planned = load_plan(dir)?;
    ensure_tracking_table(pool).await?;
    let applied = applied_revisions(pool).await?;
    let mut done = Vec::new();
    for rev in to_revert(&planned, &applied, steps)? {
        tracing::info!(revision = %rev.id, message = %rev.message, "reverting migration");
        let mut tx = pool.begin().await?;
        if !rev.downgrade.is_empty() {
            sqlx::raw_sql(&rev.downgrade).execute(&mut *tx).await?;
        }
        sqlx::query(&format!("DELETE FROM {} WHERE revision = $1", TRACKING_TABLE))
            .bind(&rev.id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        done.push(rev.id.clone());
    }
    Ok(done)
}

pub async fn status(pool: &PgPool, dir: &Path) -> Result<Vec<RevisionStatus>, MigrationError> {
    let planned = load_plan(dir)?;
    ensure_tracking_table(pool).await?;
    let applied = applied_revisions(pool).await?;
    Ok(planned
        .into_iter()
        .map(|r| RevisionStatus {
            applied: applied.contains(&r.id),
            revision: r.id,
            message: r.message,
        })
        .collect())
}

/// 12 lowercase hex characters.
pub fn new_revision_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..12].to_string()
}

/// Write a new revision on top of the current head. Returns the file path.
pub fn new_revision(dir: &Path, message: &str, upgrade: &str, downgrade: &str) -> Result<PathBuf, MigrationError> {
    let planned = load_plan(dir)?;
    std::fs::create_dir_all(dir)?;
    let rev = Revision {
        id: new_revision_id(),
        revises: head(&planned).map(String::from),
        create_date: Some(chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()),
        message: message.trim().to_string(),
        upgrade: upgrade.trim().to_string(),
        downgrade: downgrade.trim().to_string(),
        path: None,
    };
    // Timestamp prefix keeps file names in creation order.
    let stamp = chrono::Utc::now().format("%Y%m%d%H%M%S");
    let slug = slugify(message);
    let name = if slug.is_empty() {
        format!("{}_{}.sql", stamp, rev.id)
    } else {
        format!("{}_{}_{}.sql", stamp, rev.id, slug)
    };
    let path = dir.join(name);
    std::fs::write(&path, render_revision(&rev))?;
    tracing::info!(revision = %rev.id, path = %path.display(), "created revision");
    Ok(path)
}
