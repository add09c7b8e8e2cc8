//! Background jobs started by `swx serve`.

use crate::error::AppError;
use crate::state::AppState;
use std::time::Duration;
use tokio::task::JoinHandle;

pub const REFRESH_LANGUAGES: [&str; 2] = ["en", "cs"];
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Reload translations from the repository into the shared translator and the cache file.
/// An empty result leaves the current table in place. Returns the number of keys loaded.
pub async fn refresh_translations(state: &AppState) -> Result<usize, AppError> {
    let codes: Vec<String> = REFRESH_LANGUAGES.iter().map(|c| c.to_string()).collect();
    let table = state.languages.bulk(&codes).await?;
    let count: usize = table.values().map(|t| t.len()).sum();
    if count == 0 {
        tracing::warn!("no translations found; keeping the current table");
        return Ok(0);
    }
    state.translator.replace(table);
    if let Err(e) = state.translator.save_cache(&state.settings.translation_cache_file) {
        tracing::warn!(error = %e, "could not write translation cache");
    }
    tracing::info!(count, "translations refreshed");
    Ok(count)
}

/// Refresh now, then every `every`. Failures are logged and retried on the next tick.
pub fn spawn_translation_refresh(state: AppState, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            if let Err(e) = refresh_translations(&state).await {
                tracing::error!(error = %e, "translation refresh failed");
            }
        }
    })
}
