//! Persistence seams. Each trait has a PostgreSQL implementation; tests use the in-memory ones.

pub mod language;
pub mod refresh_token;
pub mod user;

#[cfg(test)]
pub mod memory;

pub use language::{LanguageRepository, PgLanguageRepository};
pub use refresh_token::{PgRefreshTokenRepository, RefreshTokenRepository};
pub use user::{PgUserRepository, UserRepository};
