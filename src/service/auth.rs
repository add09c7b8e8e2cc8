//! Login, token refresh, registration, logout and password recovery.

use crate::email;
use crate::error::AppError;
use crate::extractors::Locale;
use crate::models::{
    LoginForm, NewUser, Token, TokenRefreshRequest, User, UserCreate, UserNewPassword,
    DEFAULT_LANGUAGE, LOCAL_PROVIDER,
};
use crate::response::Message;
use crate::security::{hash_password, jwt, refresh, verify_password};
use crate::state::AppState;

pub struct AuthService;

impl AuthService {
    /// User for `email` whose password matches. Non-local accounts never match.
    pub async fn authenticate(state: &AppState, email: &str, password: &str) -> Result<Option<User>, AppError> {
        let Some(user) = state.users.get_by_email(email).await? else {
            return Ok(None);
        };
        let matches = user.is_local()
            && user
                .hashed_password
                .as_deref()
                .is_some_and(|hash| verify_password(password, hash));
        Ok(matches.then_some(user))
    }

    /// Access token plus a fresh refresh token (replacing the stored one).
    pub async fn issue_tokens(state: &AppState, email: &str, provider: &str) -> Result<Token, AppError> {
        let access = jwt::create_access_token(&state.settings, email, provider)?;
        let refresh = refresh::issue(state.refresh_tokens.as_ref(), &state.settings, email, provider).await?;
        Ok(Token::bearer(access, Some(refresh)))
    }

    pub async fn login(state: &AppState, locale: &Locale, form: &LoginForm) -> Result<Token, AppError> {
        let user = Self::authenticate(state, &form.username, &form.password)
            .await?
            .ok_or_else(|| AppError::BadRequest(locale.t("incorrect_email_or_password")))?;
        if !user.is_active {
            return Err(AppError::BadRequest(locale.t("inactive_user")));
        }
        tracing::info!(email = %user.email, "login");
        Self::issue_tokens(state, &user.email, &user.auth_provider).await
    }

    /// Trade a valid refresh token for a new pair. The old refresh token stops working.
    pub async fn refresh(state: &AppState, locale: &Locale, body: &TokenRefreshRequest) -> Result<Token, AppError> {
        let (email, provider) = refresh::verify(state.refresh_tokens.as_ref(), &state.settings, &body.refresh_token)
            .await?
            .map_err(|e| AppError::Unauthorized(locale.t(e.key())))?;
        Self::issue_tokens(state, &email, &provider).await
    }

    /// Public sign-up. Accounts created here are never superusers.
    pub async fn register(state: &AppState, locale: &Locale, body: UserCreate) -> Result<User, AppError> {
        body.validate()?;
        if state.users.get_by_email(&body.email).await?.is_some() {
            return Err(AppError::BadRequest(locale.t("user_already_exists")));
        }
        let created = state
            .users
            .create(new_local_user(body, false)?)
            .await
            .map_err(|e| match e {
                AppError::Conflict(_) => AppError::BadRequest(locale.t("user_already_exists")),
                other => other,
            })?;
        tracing::info!(email = %created.email, "registered user");
        Ok(created)
    }

    pub async fn logout(state: &AppState, locale: &Locale, body: &TokenRefreshRequest) -> Result<Message, AppError> {
        refresh::verify(state.refresh_tokens.as_ref(), &state.settings, &body.refresh_token)
            .await?
            .map_err(|e| AppError::Unauthorized(locale.t(e.key())))?;
        if !refresh::revoke(state.refresh_tokens.as_ref(), &body.refresh_token).await? {
            return Err(AppError::Unauthorized(locale.t("token_already_revoked")));
        }
        Ok(Message::new(locale.t("logged_out_successfully")))
    }

    pub async fn recover_password(state: &AppState, locale: &Locale, email: &str) -> Result<Message, AppError> {
        let user = state
            .users
            .get_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound(locale.t("user_email_not_found")))?;
        let token = jwt::create_password_reset_token(&state.settings, &user.email, &user.auth_provider)?
            .ok_or_else(|| AppError::BadRequest(locale.t("password_reset_not_available")))?;
        let mail = email::reset_password_email(&state.settings, &user.email, email, &token)?;
        state.mailer.send(&user.email, &mail).await?;
        Ok(Message::new(locale.t("password_recovery_email_sent_successfully")))
    }

    /// Set a new password from a reset token and sign the user out everywhere.
    pub async fn reset_password(state: &AppState, locale: &Locale, body: &UserNewPassword) -> Result<Message, AppError> {
        body.validate()?;
        let email = jwt::verify_password_reset_token(&state.settings, &body.token)
            .ok_or_else(|| AppError::BadRequest(locale.t("invalid_or_expired_reset_token")))?;
        let mut user = state
            .users
            .get_by_email(&email)
            .await?
            .ok_or_else(|| AppError::NotFound(locale.t("user_not_found")))?;
        user.hashed_password = Some(hash_password(&body.new_password)?);
        state.users.update(&user).await?;
        refresh::revoke_all(state.refresh_tokens.as_ref(), &email).await?;
        Ok(Message::new(locale.t("password_reset_successful")))
    }
}

/// Insert payload for a local account.
pub fn new_local_user(body: UserCreate, allow_superuser: bool) -> Result<NewUser, AppError> {
    Ok(NewUser {
        hashed_password: Some(hash_password(&body.password)?),
        email: body.email,
        full_name: body.full_name,
        preferred_language: body
            .preferred_language
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        is_superuser: allow_superuser && body.is_superuser,
        is_active: true,
        auth_provider: LOCAL_PROVIDER.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::{add_user, test_app};

    fn locale(state: &AppState) -> Locale {
        Locale::new("en", state.translator.clone())
    }

    fn form(username: &str, password: &str) -> LoginForm {
        LoginForm {
            username: username.into(),
            password: password.into(),
            grant_type: None,
            scope: None,
        }
    }

    #[tokio::test]
    async fn test_login_issues_both_tokens() {
        let app = test_app();
        add_user(&app.state, "a@example.com", "password123", false).await;
        let token = AuthService::login(&app.state, &locale(&app.state), &form("a@example.com", "password123"))
            .await
            .unwrap();
        assert_eq!(token.token_type, "bearer");
        assert!(token.refresh_token.is_some());
    }

    #[tokio::test]
    async fn test_login_rejects_bad_password_and_inactive() {
        let app = test_app();
        let l = locale(&app.state);
        let mut user = add_user(&app.state, "a@example.com", "password123", false).await;
        let err = AuthService::login(&app.state, &l, &form("a@example.com", "nope")).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(m) if m == "incorrect_email_or_password"));
        user.is_active = false;
        app.state.users.update(&user).await.unwrap();
        let err = AuthService::login(&app.state, &l, &form("a@example.com", "password123"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(m) if m == "inactive_user"));
    }

    #[tokio::test]
    async fn test_refresh_rotates() {
        let app = test_app();
        let l = locale(&app.state);
        add_user(&app.state, "a@example.com", "password123", false).await;
        let first = AuthService::login(&app.state, &l, &form("a@example.com", "password123")).await.unwrap();
        let old = TokenRefreshRequest {
            refresh_token: first.refresh_token.unwrap(),
        };
        let second = AuthService::refresh(&app.state, &l, &old).await.unwrap();
        assert!(second.refresh_token.is_some());
        let err = AuthService::refresh(&app.state, &l, &old).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(m) if m == "invalid_or_revoked_refresh_token"));
    }

    #[tokio::test]
    async fn test_register_never_grants_superuser() {
        let app = test_app();
        let l = locale(&app.state);
        let body = UserCreate {
            email: "new@example.com".into(),
            password: "password123".into(),
            full_name: Some("New".into()),
            preferred_language: None,
            is_superuser: true,
        };
        let user = AuthService::register(&app.state, &l, body.clone()).await.unwrap();
        assert!(!user.is_superuser);
        assert_eq!(user.preferred_language, "en");
        let err = AuthService::register(&app.state, &l, body).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(m) if m == "user_already_exists"));
    }

    #[tokio::test]
    async fn test_logout_twice() {
        let app = test_app();
        let l = locale(&app.state);
        add_user(&app.state, "a@example.com", "password123", false).await;
        let token = AuthService::login(&app.state, &l, &form("a@example.com", "password123")).await.unwrap();
        let body = TokenRefreshRequest {
            refresh_token: token.refresh_token.unwrap(),
        };
        let msg = AuthService::logout(&app.state, &l, &body).await.unwrap();
        assert_eq!(msg.message, "logged_out_successfully");
        assert!(matches!(
            AuthService::logout(&app.state, &l, &body).await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_recover_and_reset_password() {
        let app = test_app();
        let l = locale(&app.state);
        add_user(&app.state, "a@example.com", "password123", false).await;
        AuthService::login(&app.state, &l, &form("a@example.com", "password123")).await.unwrap();

        let msg = AuthService::recover_password(&app.state, &l, "a@example.com").await.unwrap();
        assert_eq!(msg.message, "password_recovery_email_sent_successfully");
        let sent = app.mailer.sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 1);
        let html = &sent[0].1.html_content;
        let start = html.find("token=").unwrap() + "token=".len();
        let end = html[start..].find('"').unwrap() + start;
        let token = html[start..end].to_string();

        let body = UserNewPassword {
            token,
            new_password: "brand-new-pass".into(),
        };
        let msg = AuthService::reset_password(&app.state, &l, &body).await.unwrap();
        assert_eq!(msg.message, "password_reset_successful");
        assert!(AuthService::authenticate(&app.state, "a@example.com", "brand-new-pass")
            .await
            .unwrap()
            .is_some());
        assert!(app
            .state
            .refresh_tokens
            .find_by_email("a@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_recover_unknown_and_social_users() {
        let app = test_app();
        let l = locale(&app.state);
        let err = AuthService::recover_password(&app.state, &l, "ghost@example.com").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(m) if m == "user_email_not_found"));

        let mut user = add_user(&app.state, "g@example.com", "password123", false).await;
        user.auth_provider = "google".into();
        app.state.users.update(&user).await.unwrap();
        let err = AuthService::recover_password(&app.state, &l, "g@example.com").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(m) if m == "password_reset_not_available"));
    }

    #[tokio::test]
    async fn test_reset_with_bad_token() {
        let app = test_app();
        let body = UserNewPassword {
            token: "garbage".into(),
            new_password: "brand-new-pass".into(),
        };
        let err = AuthService::reset_password(&app.state, &locale(&app.state), &body)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(m) if m == "invalid_or_expired_reset_token"));
    }
}
