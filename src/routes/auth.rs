//! `/auth`: login, refresh, registration, logout, password recovery.

use super::registry::RouteModule;
use crate::handlers::auth;
use axum::{routing::post, Router};

pub fn module() -> RouteModule {
    let router = Router::new()
        .route("/", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/register", post(auth::register))
        .route("/revoke", post(auth::logout))
        .route("/password/recover/:email", post(auth::recover_password))
        .route("/password/reset", post(auth::reset_password));
    RouteModule::new(module_path!(), router)
}
