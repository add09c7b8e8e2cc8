//! `/utils/language`: translation lookup and management.

use crate::handlers::language;
use crate::routes::registry::RouteModule;
use axum::{routing::get, Router};

pub fn module() -> RouteModule {
    // `:id` doubles as the language code in `/:id/:key`; the router requires one name per position.
    let router = Router::new()
        .route("/", get(language::list).post(language::create))
        .route("/bulk", get(language::bulk).post(language::create_bulk))
        .route("/code/:code", get(language::by_code))
        .route(
            "/:id",
            get(language::get)
                .put(language::update)
                .delete(language::delete),
        )
        .route("/:id/:key", get(language::by_code_and_key));
    RouteModule::new(module_path!(), router)
}
