//! In-memory repositories for handler and service tests.

use super::{LanguageRepository, RefreshTokenRepository, UserRepository};
use crate::error::AppError;
use crate::models::{
    Language, LanguageCreate, LanguageUpdate, NewUser, RefreshToken, User,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn list(&self, skip: u32, limit: u32) -> Result<Vec<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict(format!("user {} already exists", user.email)));
        }
        let user = user.into_user(Uuid::new_v4(), Utc::now());
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email && u.id != user.id) {
            return Err(AppError::Conflict(format!("user {} already exists", user.email)));
        }
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))?;
        *slot = user.clone();
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() != before)
    }
}

#[derive(Default)]
pub struct InMemoryRefreshTokens {
    rows: Mutex<Vec<RefreshToken>>,
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokens {
    async fn find_by_email(&self, email: &str) -> Result<Option<RefreshToken>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|r| r.user_email == email).cloned())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|r| r.token == token).cloned())
    }

    async fn upsert_for_email(
        &self,
        email: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshToken, AppError> {
        let mut rows = self.rows.lock().unwrap();
        rows.retain(|r| r.user_email != email);
        let row = RefreshToken {
            id: Uuid::new_v4(),
            user_email: email.to_string(),
            token: token.to_string(),
            expires_at,
            created_at: Utc::now(),
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn delete_by_token(&self, token: &str) -> Result<bool, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.token != token);
        Ok(rows.len() != before)
    }

    async fn delete_all_for_email(&self, email: &str) -> Result<u64, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.user_email != email);
        Ok((before - rows.len()) as u64)
    }
}

#[derive(Default)]
pub struct InMemoryLanguages {
    rows: Mutex<Vec<Language>>,
}

#[async_trait]
impl LanguageRepository for InMemoryLanguages {
    async fn list(&self, skip: u32, limit: u32) -> Result<Vec<Language>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Language>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|r| r.id == id).cloned())
    }

    async fn by_code(&self, code: &str) -> Result<Vec<Language>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|r| r.language_code == code)
            .cloned()
            .collect())
    }

    async fn by_code_and_key(&self, code: &str, key: &str) -> Result<Option<Language>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|r| r.language_code == code && r.key == key)
            .cloned())
    }

    async fn create(&self, data: LanguageCreate) -> Result<Language, AppError> {
        let row = Language {
            id: Uuid::new_v4(),
            language_code: data.language_code,
            key: data.key,
            value: data.value,
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: Uuid, data: LanguageUpdate) -> Result<Option<Language>, AppError> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|r| r.id == id).map(|row| {
            data.apply(row);
            row.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() != before)
    }
}
