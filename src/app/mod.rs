//! Application resources. `swx make ...` writes new modules here and registers them.

pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
