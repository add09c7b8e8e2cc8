//! Core data model.

pub mod language;
pub mod token;
pub mod user;

pub use language::*;
pub use token::*;
pub use user::*;
