//! JWT signing and verification for access, refresh and password-reset tokens.
//!
//! Access and reset tokens are signed with `SECRET_KEY`, refresh tokens with
//! `REFRESH_SECRET_KEY`. The `scope` claim keeps the three kinds apart even when
//! both secrets are configured to the same value.

use crate::config::Settings;
use crate::error::AppError;
use crate::models::{TokenPayload, PASSWORD_RESET_SCOPE};
use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

pub const REFRESH_SCOPE: &str = "refresh";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    Expired,
    Invalid,
}

fn sign(claims: &TokenPayload, secret: &str, alg: Algorithm) -> Result<String, AppError> {
    encode(
        &Header::new(alg),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("failed to encode JWT: {}", e)))
}

fn verify(token: &str, secret: &str, alg: Algorithm) -> Result<TokenPayload, TokenError> {
    let mut validation = Validation::new(alg);
    validation.leeway = 0;
    decode::<TokenPayload>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        })
}

fn lifetime(delta: Option<TimeDelta>, what: &str) -> Result<TimeDelta, AppError> {
    delta.ok_or_else(|| AppError::Internal(format!("{} lifetime out of range", what)))
}

/// Claims with `exp` set `ttl` from now.
pub fn claims(
    email: &str,
    provider: &str,
    ttl: TimeDelta,
    scope: Option<&str>,
) -> Result<TokenPayload, AppError> {
    let exp = Utc::now()
        .checked_add_signed(ttl)
        .ok_or_else(|| AppError::Internal("token expiry out of range".into()))?;
    Ok(TokenPayload {
        sub: email.to_string(),
        auth_provider: provider.to_string(),
        exp: exp.timestamp(),
        scope: scope.map(str::to_string),
        jti: None,
    })
}

pub fn create_access_token(
    settings: &Settings,
    email: &str,
    provider: &str,
) -> Result<String, AppError> {
    let ttl = lifetime(TimeDelta::try_minutes(settings.access_token_expire_minutes), "access token")?;
    sign(
        &claims(email, provider, ttl, None)?,
        &settings.secret_key,
        settings.jwt_algorithm,
    )
}

/// Decode a bearer token. Tokens carrying any scope (reset, refresh) are not access tokens.
pub fn decode_access_token(settings: &Settings, token: &str) -> Result<TokenPayload, TokenError> {
    let payload = verify(token, &settings.secret_key, settings.jwt_algorithm)?;
    if payload.scope.is_some() || payload.sub.is_empty() {
        return Err(TokenError::Invalid);
    }
    Ok(payload)
}

/// Signed refresh JWT and its expiry. A random `jti` makes every issued token distinct.
pub fn create_refresh_jwt(
    settings: &Settings,
    email: &str,
    provider: &str,
) -> Result<(String, DateTime<Utc>), AppError> {
    let ttl = lifetime(TimeDelta::try_days(settings.refresh_token_expire_days), "refresh token")?;
    let mut payload = claims(email, provider, ttl, Some(REFRESH_SCOPE))?;
    payload.jti = Some(uuid::Uuid::new_v4().to_string());
    let expires_at = DateTime::<Utc>::from_timestamp(payload.exp, 0)
        .ok_or_else(|| AppError::Internal("refresh expiry out of range".into()))?;
    let token = sign(&payload, &settings.refresh_secret_key, settings.jwt_algorithm)?;
    Ok((token, expires_at))
}

pub fn decode_refresh_jwt(settings: &Settings, token: &str) -> Result<TokenPayload, TokenError> {
    let payload = verify(token, &settings.refresh_secret_key, settings.jwt_algorithm)?;
    if payload.scope.as_deref() != Some(REFRESH_SCOPE) {
        return Err(TokenError::Invalid);
    }
    Ok(payload)
}

/// Reset token for local accounts only; social-login users reset through their provider.
pub fn create_password_reset_token(
    settings: &Settings,
    email: &str,
    provider: &str,
) -> Result<Option<String>, AppError> {
    if provider != crate::models::LOCAL_PROVIDER {
        return Ok(None);
    }
    let ttl = lifetime(TimeDelta::try_hours(settings.email_reset_token_expire_hours), "reset token")?;
    sign(
        &claims(email, provider, ttl, Some(PASSWORD_RESET_SCOPE))?,
        &settings.secret_key,
        settings.jwt_algorithm,
    )
    .map(Some)
}

/// Email from a valid, unexpired reset token.
pub fn verify_password_reset_token(settings: &Settings, token: &str) -> Option<String> {
    let payload = verify(token, &settings.secret_key, settings.jwt_algorithm).ok()?;
    (payload.scope.as_deref() == Some(PASSWORD_RESET_SCOPE) && !payload.sub.is_empty())
        .then_some(payload.sub)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_round_trip() {
        let s = Settings::for_tests();
        let token = create_access_token(&s, "a@example.com", "local").unwrap();
        let payload = decode_access_token(&s, &token).unwrap();
        assert_eq!(payload.sub, "a@example.com");
        assert_eq!(payload.auth_provider, "local");
    }

    #[test]
    fn test_expired_access_token() {
        let s = Settings::for_tests();
        let expired = claims("a@example.com", "local", TimeDelta::seconds(-120), None).unwrap();
        let token = sign(&expired, &s.secret_key, s.jwt_algorithm).unwrap();
        assert_eq!(decode_access_token(&s, &token), Err(TokenError::Expired));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let s = Settings::for_tests();
        let token = create_access_token(&s, "a@example.com", "local").unwrap();
        let mut other = s.clone();
        other.secret_key = "another-secret".into();
        assert_eq!(decode_access_token(&other, &token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_reset_token_is_not_an_access_token() {
        let s = Settings::for_tests();
        let reset = create_password_reset_token(&s, "a@example.com", "local")
            .unwrap()
            .unwrap();
        assert_eq!(decode_access_token(&s, &reset), Err(TokenError::Invalid));
        assert_eq!(
            verify_password_reset_token(&s, &reset).as_deref(),
            Some("a@example.com")
        );
    }

    #[test]
    fn test_access_token_is_not_a_reset_token() {
        let s = Settings::for_tests();
        let access = create_access_token(&s, "a@example.com", "local").unwrap();
        assert!(verify_password_reset_token(&s, &access).is_none());
    }

    #[test]
    fn test_no_reset_token_for_social_accounts() {
        let s = Settings::for_tests();
        assert!(create_password_reset_token(&s, "a@example.com", "google")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_refresh_tokens_are_unique_and_scoped() {
        let s = Settings::for_tests();
        let (a, exp) = create_refresh_jwt(&s, "a@example.com", "local").unwrap();
        let (b, _) = create_refresh_jwt(&s, "a@example.com", "local").unwrap();
        assert_ne!(a, b);
        assert!(exp > Utc::now() + TimeDelta::days(29));
        assert_eq!(decode_refresh_jwt(&s, &a).unwrap().sub, "a@example.com");
        assert_eq!(decode_access_token(&s, &a), Err(TokenError::Invalid));
    }

    #[test]
    fn test_huge_lifetimes_are_errors_not_panics() {
        let mut s = Settings::for_tests();
        s.refresh_token_expire_days = 100_000_000;
        assert!(matches!(
            create_refresh_jwt(&s, "a@example.com", "local"),
            Err(AppError::Internal(_))
        ));
        s.access_token_expire_minutes = i64::MAX;
        assert!(matches!(
            create_access_token(&s, "a@example.com", "local"),
            Err(AppError::Internal(_))
        ));
        s.email_reset_token_expire_hours = i64::MAX / 2;
        assert!(create_password_reset_token(&s, "a@example.com", "local").is_err());
        assert!(claims("a@example.com", "local", TimeDelta::MAX, None).is_err());
    }
}
