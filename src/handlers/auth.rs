//! Authentication handlers: login, refresh, register, logout, password recovery.

use crate::error::AppError;
use crate::extractors::{Locale, Path};
use crate::models::{LoginForm, Token, TokenRefreshRequest, UserCreate, UserNewPassword, UserPublic};
use crate::response::Message;
use crate::service::AuthService;
use crate::state::AppState;
use axum::{
    extract::State,
    Form, Json,
};

/// OAuth2 password flow: form fields `username` (the email) and `password`.
pub async fn login(
    State(state): State<AppState>,
    locale: Locale,
    Form(form): Form<LoginForm>,
) -> Result<Json<Token>, AppError> {
    Ok(Json(AuthService::login(&state, &locale, &form).await?))
}

pub async fn refresh(
    State(state): State<AppState>,
    locale: Locale,
    Json(body): Json<TokenRefreshRequest>,
) -> Result<Json<Token>, AppError> {
    Ok(Json(AuthService::refresh(&state, &locale, &body).await?))
}

pub async fn register(
    State(state): State<AppState>,
    locale: Locale,
    Json(body): Json<UserCreate>,
) -> Result<Json<UserPublic>, AppError> {
    let user = AuthService::register(&state, &locale, body).await?;
    Ok(Json(user.into()))
}

pub async fn logout(
    State(state): State<AppState>,
    locale: Locale,
    Json(body): Json<TokenRefreshRequest>,
) -> Result<Json<Message>, AppError> {
    Ok(Json(AuthService::logout(&state, &locale, &body).await?))
}

pub async fn recover_password(
    State(state): State<AppState>,
    locale: Locale,
    Path(email): Path<String>,
) -> Result<Json<Message>, AppError> {
    Ok(Json(AuthService::recover_password(&state, &locale, &email).await?))
}

pub async fn reset_password(
    State(state): State<AppState>,
    locale: Locale,
    Json(body): Json<UserNewPassword>,
) -> Result<Json<Message>, AppError> {
    Ok(Json(AuthService::reset_password(&state, &locale, &body).await?))
}
