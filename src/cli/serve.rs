//! `swx serve`: database setup, background refresh, HTTP server.

use super::db::connect_ready;
use crate::config::Settings;
use crate::database;
use crate::routes::build_router;
use crate::state::AppState;
use crate::tasks::{spawn_translation_refresh, REFRESH_INTERVAL};
use tokio::net::TcpListener;

pub async fn run(settings: Settings, host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let addr = format!(
        "{}:{}",
        host.unwrap_or_else(|| settings.api_host.clone()),
        port.unwrap_or(settings.api_port)
    );
    let pool = connect_ready(&settings).await?;
    let state = AppState::new(settings, pool);
    database::setup_database(&state).await?;
    tracing::info!(
        project = %state.settings.project_name,
        environment = state.settings.environment.as_str(),
        emails_enabled = state.settings.emails_enabled(),
        "startup complete"
    );

    let refresher = spawn_translation_refresh(state.clone(), REFRESH_INTERVAL);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, build_router(state.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    refresher.abort();
    state.pool.close().await;
    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "could not listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
