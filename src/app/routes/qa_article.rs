//! `/qa_article`.

use crate::app::handlers::qa_article;
use crate::routes::registry::RouteModule;
use axum::{routing::get, Router};

pub fn module() -> RouteModule {
    let router = Router::new()
        .route("/", get(qa_article::list).post(qa_article::create))
        .route(
            "/:id",
            get(qa_article::get)
                .put(qa_article::update)
                .delete(qa_article::delete),
        );
    RouteModule::new(module_path!(), router)
}
