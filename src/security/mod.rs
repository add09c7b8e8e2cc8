//! Passwords, JWTs and refresh tokens.

pub mod jwt;
pub mod password;
pub mod refresh;

pub use password::{hash_password, verify_password};
