//! Bearer-token authentication and role checks.

use crate::error::AppError;
use crate::extractors::locale::Locale;
use crate::models::User;
use crate::security::jwt;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

/// Token from `Authorization: Bearer <token>`. The scheme is case-insensitive.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Resolve the caller: valid access token, known user, active account.
pub async fn authenticate(state: &AppState, headers: &HeaderMap, locale: &Locale) -> Result<User, AppError> {
    let unauthorized = || AppError::Unauthorized(locale.t("could_not_validate_credentials"));
    let token = bearer_token(headers).ok_or_else(unauthorized)?;
    let payload = jwt::decode_access_token(&state.settings, token).map_err(|_| unauthorized())?;
    let user = state
        .users
        .get_by_email(&payload.sub)
        .await?
        .ok_or_else(|| AppError::NotFound(locale.t("user_not_found")))?;
    if !user.is_active {
        return Err(AppError::BadRequest(locale.t("inactive_user")));
    }
    Ok(user)
}

/// The authenticated, active user.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }
        let locale = Locale::from_headers(&parts.headers, state.translator.clone());
        let user = authenticate(state, &parts.headers, &locale).await?;
        Ok(CurrentUser(user))
    }
}

/// The authenticated user, required to be a superuser.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if !user.is_superuser {
            let locale = Locale::from_headers(&parts.headers, state.translator.clone());
            return Err(AppError::Forbidden(locale.t("insufficient_privileges")));
        }
        Ok(AdminUser(user))
    }
}

/// Whether the user holds `role`. Roles are named after the boolean account flags.
pub fn has_role(user: &User, role: &str) -> bool {
    match role {
        "superuser" | "is_superuser" | "admin" => user.is_superuser,
        "active" | "is_active" => user.is_active,
        _ => false,
    }
}

/// Route-layer guard: superusers only. Authenticated users are passed on in request extensions.
pub async fn require_superuser(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let locale = Locale::from_headers(request.headers(), state.translator.clone());
    let user = authenticate(&state, request.headers(), &locale).await?;
    if !user.is_superuser {
        tracing::warn!(email = %user.email, path = %request.uri().path(), "admin route refused");
        return Err(AppError::Forbidden(locale.t("insufficient_privileges")));
    }
    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

/// State for [`require_roles`]: the caller must hold at least one of `roles`.
#[derive(Clone)]
pub struct RoleGuard {
    pub state: AppState,
    pub roles: &'static [&'static str],
}

pub async fn require_roles(
    State(guard): State<RoleGuard>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let locale = Locale::from_headers(request.headers(), guard.state.translator.clone());
    let user = authenticate(&guard.state, request.headers(), &locale).await?;
    if !guard.roles.iter().any(|role| has_role(&user, role)) {
        return Err(AppError::Forbidden(locale.t("user_lacks_required_privileges")));
    }
    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}
