//! `/utils`: health, readiness, version.

pub mod language;

use crate::handlers::utils;
use crate::routes::registry::RouteModule;
use axum::{routing::get, Router};

pub fn module() -> RouteModule {
    let router = Router::new()
        .route("/health-check", get(utils::health_check))
        .route("/ready", get(utils::ready))
        .route("/version", get(utils::version));
    RouteModule::new(module_path!(), router)
}
