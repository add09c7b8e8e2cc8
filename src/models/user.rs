//! User account and the request/response shapes built from it.

use crate::error::AppError;
use crate::service::validation::{email, length};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub const LOCAL_PROVIDER: &str = "local";
pub const DEFAULT_LANGUAGE: &str = "en";

const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 40;

/// Stored user row (`users` table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub full_name: Option<String>,
    pub preferred_language: String,
    pub hashed_password: Option<String>,
    pub auth_provider: String,
    pub provider_id: Option<String>,
    pub avatar_url: Option<String>,
    pub identifier: Option<String>,
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_local(&self) -> bool {
        self.auth_provider == LOCAL_PROVIDER
    }
}

/// Insert payload; the hash is computed by the caller.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub hashed_password: Option<String>,
    pub full_name: Option<String>,
    pub preferred_language: String,
    pub is_superuser: bool,
    pub is_active: bool,
    pub auth_provider: String,
}

impl NewUser {
    pub fn into_user(self, id: Uuid, created_at: DateTime<Utc>) -> User {
        User {
            id,
            email: self.email,
            is_active: self.is_active,
            is_superuser: self.is_superuser,
            full_name: self.full_name,
            preferred_language: self.preferred_language,
            hashed_password: self.hashed_password,
            auth_provider: self.auth_provider,
            provider_id: None,
            avatar_url: None,
            identifier: None,
            metadata: Value::Object(Default::default()),
            created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub preferred_language: Option<String>,
    #[serde(default)]
    pub is_superuser: bool,
}

impl UserCreate {
    pub fn validate(&self) -> Result<(), AppError> {
        email("email", &self.email)?;
        length("password", &self.password, Some(PASSWORD_MIN), Some(PASSWORD_MAX))?;
        if let Some(name) = &self.full_name {
            length("full_name", name, None, Some(255))?;
        }
        if let Some(lang) = &self.preferred_language {
            length("preferred_language", lang, Some(2), Some(3))?;
        }
        Ok(())
    }
}

/// Partial profile update; absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub preferred_language: Option<String>,
}

impl UserUpdate {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(e) = &self.email {
            email("email", e)?;
        }
        if let Some(p) = &self.password {
            length("password", p, Some(PASSWORD_MIN), Some(PASSWORD_MAX))?;
        }
        if let Some(name) = &self.full_name {
            length("full_name", name, None, Some(255))?;
        }
        if let Some(lang) = &self.preferred_language {
            length("preferred_language", lang, Some(2), Some(3))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPublic {
    pub id: Uuid,
    pub email: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub full_name: Option<String>,
    pub preferred_language: String,
    pub auth_provider: String,
    pub avatar_url: Option<String>,
}

impl From<User> for UserPublic {
    fn from(u: User) -> Self {
        UserPublic {
            id: u.id,
            email: u.email,
            is_active: u.is_active,
            is_superuser: u.is_superuser,
            full_name: u.full_name,
            preferred_language: u.preferred_language,
            auth_provider: u.auth_provider,
            avatar_url: u.avatar_url,
        }
    }
}

pub type UsersPublic = crate::response::Paged<UserPublic>;

#[derive(Debug, Clone, Deserialize)]
pub struct UserUpdatePassword {
    pub current_password: String,
    pub new_password: String,
}

impl UserUpdatePassword {
    pub fn validate(&self) -> Result<(), AppError> {
        length("current_password", &self.current_password, None, Some(255))?;
        length("new_password", &self.new_password, Some(PASSWORD_MIN), Some(PASSWORD_MAX))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserNewPassword {
    pub token: String,
    pub new_password: String,
}

impl UserNewPassword {
    pub fn validate(&self) -> Result<(), AppError> {
        length("new_password", &self.new_password, Some(PASSWORD_MIN), Some(PASSWORD_MAX))
    }
}
