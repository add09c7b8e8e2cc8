//! Service endpoints: welcome, health, readiness, version.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Serialize)]
pub struct ReadyBody {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<&'static str>,
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to swX API 🚀" }))
}

pub async fn health_check() -> Json<bool> {
    Json(true)
}

pub async fn ready(State(state): State<AppState>) -> Result<Json<ReadyBody>, (StatusCode, Json<ReadyBody>)> {
    if let Err(e) = sqlx::query("SELECT 1").execute(&state.pool).await {
        tracing::warn!(error = %e, "readiness check failed");
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyBody {
                status: "degraded",
                database: Some("unavailable"),
            }),
        ));
    }
    Ok(Json(ReadyBody {
        status: "ok",
        database: Some("ok"),
    }))
}

pub async fn version(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": state.settings.project_name,
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.settings.environment.as_str(),
    }))
}
