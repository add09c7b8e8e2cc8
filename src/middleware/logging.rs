//! Per-request log line: method, path, status, duration.

use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

pub async fn log_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();
    let response = next.run(request).await;
    let status = response.status().as_u16();
    let duration = format!("{:.4}", started.elapsed().as_secs_f64());
    if status >= 500 {
        tracing::error!(%method, %path, status_code = status, duration = %duration, "request failed");
    } else if status >= 400 {
        tracing::warn!(%method, %path, status_code = status, duration = %duration, "request rejected");
    } else if state.settings.is_local() {
        tracing::info!(%method, %path, status_code = status, duration = %duration, "request");
    } else {
        tracing::debug!(%method, %path, status_code = status, duration = %duration, "request");
    }
    response
}
