//! Connection pool, database creation, readiness and first-run setup.

pub mod seed;

use crate::config::Settings;
use crate::error::AppError;
use crate::migration;
use crate::state::AppState;
use sqlx::postgres::PgPoolOptions;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;
use std::time::Duration;

pub const READY_ATTEMPTS: u32 = 300;
pub const READY_DELAY: Duration = Duration::from_secs(1);

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// `postgres` maintenance database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

/// `(maintenance url, database name)` for a PostgreSQL URL.
fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let mut split = path_and_query.splitn(2, '?');
    let db_name = split.next().unwrap_or("").trim();
    let query = split.next().map(|q| format!("?{}", q)).unwrap_or_default();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres{}", base, query), db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

pub async fn connect(settings: &Settings) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.db_max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&settings.database_url())
        .await?;
    Ok(pool)
}

/// Lazy pool: no connection is attempted until first use.
pub fn connect_lazy(settings: &Settings) -> Result<PgPool, AppError> {
    Ok(PgPoolOptions::new()
        .max_connections(settings.db_max_connections)
        .connect_lazy(&settings.database_url())?)
}

/// Run `SELECT 1` until it succeeds or `attempts` are used up.
pub async fn wait_until_ready(pool: &PgPool, attempts: u32, delay: Duration) -> Result<(), AppError> {
    let mut last = None;
    for attempt in 1..=attempts.max(1) {
        match sqlx::query("SELECT 1").execute(pool).await {
            Ok(_) => {
                if attempt > 1 {
                    tracing::info!(attempt, "database is ready");
                }
                return Ok(());
            }
            Err(e) => {
                tracing::error!(attempt, error = %e, "database is not ready");
                last = Some(e);
                if attempt < attempts {
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
    Err(last.map(AppError::Db).unwrap_or_else(|| AppError::Internal("database not ready".into())))
}

/// Startup sequence: wait for the database, migrate to head, ensure the superuser, seed
/// translations. Seeding is skipped in production.
pub async fn setup_database(state: &AppState) -> Result<(), AppError> {
    wait_until_ready(&state.pool, READY_ATTEMPTS, READY_DELAY).await?;
    let applied = migration::upgrade(&state.pool, &state.settings.migrations_dir).await?;
    tracing::info!(applied = applied.len(), "migrations up to date");
    seed::init_superuser(state.users.as_ref(), &state.settings).await?;
    if state.settings.is_production() {
        tracing::warn!("skipping translation seeding in production");
    } else {
        seed::seed_languages(state.languages.as_ref(), &state.settings.translations_file).await?;
    }
    Ok(())
}
