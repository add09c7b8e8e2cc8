//! Request extractors: caller identity, language, path parameters.

pub mod auth;
pub mod locale;
pub mod path;

pub use auth::{AdminUser, CurrentUser};
pub use locale::Locale;
pub use path::Path;
