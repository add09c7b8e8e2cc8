//! `/admin/user`. The registry guards every admin prefix with the superuser check.

use crate::handlers::admin;
use crate::routes::registry::RouteModule;
use axum::{routing::get, Router};

pub fn module() -> RouteModule {
    let router = Router::new()
        .route("/", get(admin::list_users).post(admin::create_user))
        .route(
            "/:user_id",
            get(admin::get_user)
                .patch(admin::update_user)
                .delete(admin::delete_user),
        );
    RouteModule::new(module_path!(), router)
}
