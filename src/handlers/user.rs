//! Current-user profile handlers.

use crate::error::AppError;
use crate::extractors::{CurrentUser, Locale, Path};
use crate::models::{UserPublic, UserUpdate, UserUpdatePassword};
use crate::response::Message;
use crate::service::UserService;
use crate::state::AppState;
use axum::{
    extract::State,
    Json,
};
use uuid::Uuid;

pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserPublic> {
    Json(user.into())
}

pub async fn update_me(
    State(state): State<AppState>,
    locale: Locale,
    CurrentUser(user): CurrentUser,
    Json(body): Json<UserUpdate>,
) -> Result<Json<UserPublic>, AppError> {
    let user = UserService::update(&state, &locale, user, body).await?;
    Ok(Json(user.into()))
}

pub async fn read_by_id(
    State(state): State<AppState>,
    locale: Locale,
    CurrentUser(user): CurrentUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserPublic>, AppError> {
    let found = UserService::get_own(&state, &locale, &user, user_id).await?;
    Ok(Json(found.into()))
}

pub async fn update_password(
    State(state): State<AppState>,
    locale: Locale,
    CurrentUser(user): CurrentUser,
    Json(body): Json<UserUpdatePassword>,
) -> Result<Json<Message>, AppError> {
    Ok(Json(UserService::update_password(&state, &locale, user, &body).await?))
}

pub async fn delete_me(
    State(state): State<AppState>,
    locale: Locale,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Message>, AppError> {
    Ok(Json(UserService::delete(&state, &locale, &user).await?))
}
