//! HTTP handlers for the core API and shared plumbing for app resources.

pub mod admin;
pub mod auth;
pub mod language;
pub mod resource;
pub mod user;
pub mod utils;
