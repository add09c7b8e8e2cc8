//! `/user/profile`: the caller's own account.

use crate::handlers::user;
use crate::routes::registry::RouteModule;
use axum::{
    routing::{delete, get, patch},
    Router,
};

pub fn module() -> RouteModule {
    let router = Router::new()
        .route("/", get(user::me).patch(user::update_me))
        .route("/password/update", patch(user::update_password))
        .route("/delete", delete(user::delete_me))
        .route("/:user_id", get(user::read_by_id));
    RouteModule::new(module_path!(), router)
}
