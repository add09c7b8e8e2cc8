//! swX API: API-first PostgreSQL backend with JWT auth, i18n, reversible migrations and a
//! scaffolding CLI.

pub mod app;
pub mod case;
pub mod cli;
pub mod config;
pub mod database;
pub mod email;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod i18n;
pub mod logging;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod repositories;
pub mod response;
pub mod routes;
pub mod scaffold;
pub mod security;
pub mod service;
pub mod sql;
pub mod state;
pub mod tasks;

pub use config::Settings;
pub use error::{AppError, ConfigError, MigrationError, ScaffoldError};
pub use routes::build_router;
pub use state::AppState;
