//! Business logic between handlers and repositories.

pub mod auth;
pub mod crud;
pub mod language;
pub mod user;
pub mod validation;

pub use auth::AuthService;
pub use crud::CrudService;
pub use language::LanguageService;
pub use user::UserService;
pub use validation::RequestValidator;
