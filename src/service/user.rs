//! Profile management for the current user and user administration.

use crate::error::AppError;
use crate::extractors::Locale;
use crate::models::{User, UserCreate, UserUpdate, UserUpdatePassword};
use crate::response::Message;
use crate::security::{hash_password, refresh, verify_password};
use crate::service::auth::new_local_user;
use crate::state::AppState;
use uuid::Uuid;

pub struct UserService;

impl UserService {
    /// Apply the present fields. Passwords are only stored for local accounts.
    pub async fn update(state: &AppState, locale: &Locale, mut user: User, body: UserUpdate) -> Result<User, AppError> {
        body.validate()?;
        if let Some(email) = body.email {
            if email != user.email {
                if state.users.get_by_email(&email).await?.is_some() {
                    return Err(AppError::Conflict(locale.t("user_already_exists")));
                }
                user.email = email;
            }
        }
        if let Some(password) = body.password {
            if user.is_local() {
                user.hashed_password = Some(hash_password(&password)?);
            }
        }
        if let Some(name) = body.full_name {
            user.full_name = Some(name);
        }
        if let Some(lang) = body.preferred_language {
            user.preferred_language = lang;
        }
        state.users.update(&user).await
    }

    pub async fn list(state: &AppState, skip: u32, limit: u32) -> Result<Vec<User>, AppError> {
        state.users.list(skip, limit).await
    }

    pub async fn get(state: &AppState, locale: &Locale, id: Uuid) -> Result<User, AppError> {
        state
            .users
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(locale.t("user_not_found")))
    }

    /// Profile lookup restricted to the caller's own id.
    pub async fn get_own(state: &AppState, locale: &Locale, caller: &User, id: Uuid) -> Result<User, AppError> {
        if caller.id != id {
            return Err(AppError::Forbidden(locale.t("access_denied")));
        }
        Self::get(state, locale, id).await
    }

    pub async fn update_password(
        state: &AppState,
        locale: &Locale,
        mut user: User,
        body: &UserUpdatePassword,
    ) -> Result<Message, AppError> {
        body.validate()?;
        let current_ok = user.is_local()
            && user
                .hashed_password
                .as_deref()
                .is_some_and(|hash| verify_password(&body.current_password, hash));
        if !current_ok {
            return Err(AppError::BadRequest(locale.t("password_update_failed")));
        }
        user.hashed_password = Some(hash_password(&body.new_password)?);
        state.users.update(&user).await?;
        Ok(Message::new(locale.t("password_updated_successfully")))
    }

    /// Remove the account and its refresh token.
    pub async fn delete(state: &AppState, locale: &Locale, user: &User) -> Result<Message, AppError> {
        if !state.users.delete(user.id).await? {
            return Err(AppError::BadRequest(locale.t("user_deletion_failed")));
        }
        refresh::revoke_all(state.refresh_tokens.as_ref(), &user.email).await?;
        Ok(Message::new(locale.t("user_deleted_successfully")))
    }

    /// Admin creation; unlike public sign-up this may create superusers.
    pub async fn create(state: &AppState, locale: &Locale, body: UserCreate) -> Result<User, AppError> {
        body.validate()?;
        if state.users.get_by_email(&body.email).await?.is_some() {
            return Err(AppError::BadRequest(locale.t("user_already_exists")));
        }
        state.users.create(new_local_user(body, true)?).await
    }

    pub async fn update_by_id(state: &AppState, locale: &Locale, id: Uuid, body: UserUpdate) -> Result<User, AppError> {
        let user = Self::get(state, locale, id).await?;
        Self::update(state, locale, user, body).await
    }

    pub async fn delete_by_id(state: &AppState, locale: &Locale, id: Uuid) -> Result<Message, AppError> {
        let user = Self::get(state, locale, id).await?;
        Self::delete(state, locale, &user).await?;
        Ok(Message::new(locale.t("user_deleted_successfully")))
    }
}
