//! `swx db ...`

use super::DbAction;
use crate::config::Settings;
use crate::database::{self, seed, READY_ATTEMPTS, READY_DELAY};
use crate::migration::{self, RevisionStatus};
use crate::state::AppState;
use sqlx::PgPool;

/// Create the database when missing, then wait until it accepts queries.
pub async fn connect_ready(settings: &Settings) -> anyhow::Result<PgPool> {
    if let Err(e) = database::ensure_database_exists(&settings.database_url()).await {
        // The server may still be starting; readiness polling below retries.
        tracing::warn!(error = %e, "could not ensure database exists");
    }
    let pool = database::connect_lazy(settings)?;
    database::wait_until_ready(&pool, READY_ATTEMPTS, READY_DELAY).await?;
    Ok(pool)
}

pub async fn run(settings: Settings, action: DbAction) -> anyhow::Result<()> {
    if let DbAction::Revision { message } = &action {
        let path = migration::new_revision(&settings.migrations_dir, message, "", "")?;
        println!("Created revision {}", path.display());
        return Ok(());
    }
    let pool = connect_ready(&settings).await?;
    let dir = settings.migrations_dir.clone();
    match action {
        DbAction::Setup => {
            let state = AppState::new(settings, pool.clone());
            database::setup_database(&state).await?;
            println!("Database is ready.");
        }
        DbAction::Seed => {
            let state = AppState::new(settings, pool.clone());
            seed::seed(state.users.as_ref(), state.languages.as_ref(), &state.settings).await?;
            println!("Seeding finished.");
        }
        DbAction::Migrate => {
            let applied = migration::upgrade(&pool, &dir).await?;
            if applied.is_empty() {
                println!("Already at head.");
            }
            for id in applied {
                println!("Applied {}", id);
            }
        }
        DbAction::Downgrade { steps } => {
            let reverted = migration::downgrade(&pool, &dir, steps).await?;
            if reverted.is_empty() {
                println!("Nothing to revert.");
            }
            for id in reverted {
                println!("Reverted {}", id);
            }
        }
        DbAction::Status => {
            print!("{}", render_status(&migration::status(&pool, &dir).await?));
        }
        DbAction::Revision { .. } => {}
    }
    pool.close().await;
    Ok(())
}

pub fn render_status(rows: &[RevisionStatus]) -> String {
    if rows.is_empty() {
        return "No revisions.\n".to_string();
    }
    rows.iter()
        .map(|r| {
            let mark = if r.applied { "applied" } else { "pending" };
            format!("{:<8} {}  {}\n", mark, r.revision, r.message)
        })
        .collect()
}
