//! User administration. Mounted under an admin prefix, so the superuser guard runs first.

use crate::error::AppError;
use crate::extractors::{Locale, Path};
use crate::models::{UserCreate, UserPublic, UserUpdate, UsersPublic};
use crate::response::{Message, Pagination};
use crate::service::UserService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use uuid::Uuid;

/// An empty page is a 404.
pub async fn list_users(
    State(state): State<AppState>,
    locale: Locale,
    Query(page): Query<Pagination>,
) -> Result<Json<UsersPublic>, AppError> {
    let users = UserService::list(&state, page.skip, page.clamped_limit()).await?;
    if users.is_empty() {
        return Err(AppError::NotFound(locale.t("no_users_found")));
    }
    Ok(Json(UsersPublic::new(users.into_iter().map(UserPublic::from).collect())))
}

pub async fn get_user(
    State(state): State<AppState>,
    locale: Locale,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserPublic>, AppError> {
    Ok(Json(UserService::get(&state, &locale, user_id).await?.into()))
}

pub async fn create_user(
    State(state): State<AppState>,
    locale: Locale,
    Json(body): Json<UserCreate>,
) -> Result<Json<UserPublic>, AppError> {
    let user = UserService::create(&state, &locale, body).await?;
    tracing::info!(email = %user.email, superuser = user.is_superuser, "admin created user");
    Ok(Json(user.into()))
}

pub async fn update_user(
    State(state): State<AppState>,
    locale: Locale,
    Path(user_id): Path<Uuid>,
    Json(body): Json<UserUpdate>,
) -> Result<Json<UserPublic>, AppError> {
    Ok(Json(UserService::update_by_id(&state, &locale, user_id, body).await?.into()))
}

pub async fn delete_user(
    State(state): State<AppState>,
    locale: Locale,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Message>, AppError> {
    Ok(Json(UserService::delete_by_id(&state, &locale, user_id).await?))
}
