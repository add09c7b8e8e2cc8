//! Refresh token lifecycle: issue, verify against storage, revoke.

use crate::config::Settings;
use crate::error::AppError;
use crate::repositories::RefreshTokenRepository;
use crate::security::jwt::{self, TokenError};
use chrono::Utc;

/// Why a refresh token was refused. `key()` is the translation key for the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshError {
    MissingSubject,
    Revoked,
    Expired,
    Invalid,
}

impl RefreshError {
    pub fn key(&self) -> &'static str {
        match self {
            RefreshError::MissingSubject => "invalid_refresh_token_payload",
            RefreshError::Revoked => "invalid_or_revoked_refresh_token",
            RefreshError::Expired => "refresh_token_expired",
            RefreshError::Invalid => "invalid_refresh_token",
        }
    }
}

/// Sign a new refresh token and store it as the user's only one.
pub async fn issue(
    repo: &dyn RefreshTokenRepository,
    settings: &Settings,
    email: &str,
    provider: &str,
) -> Result<String, AppError> {
    let (token, expires_at) = jwt::create_refresh_jwt(settings, email, provider)?;
    repo.upsert_for_email(email, &token, expires_at).await?;
    Ok(token)
}

/// `(email, auth_provider)` for a token that decodes, is stored, and has not expired.
pub async fn verify(
    repo: &dyn RefreshTokenRepository,
    settings: &Settings,
    token: &str,
) -> Result<Result<(String, String), RefreshError>, AppError> {
    let payload = match jwt::decode_refresh_jwt(settings, token) {
        Ok(p) => p,
        Err(TokenError::Expired) => return Ok(Err(RefreshError::Expired)),
        Err(TokenError::Invalid) => return Ok(Err(RefreshError::Invalid)),
    };
    if payload.sub.is_empty() {
        return Ok(Err(RefreshError::MissingSubject));
    }
    let Some(stored) = repo.find_by_token(token).await? else {
        return Ok(Err(RefreshError::Revoked));
    };
    if stored.expires_at < Utc::now() {
        return Ok(Err(RefreshError::Expired));
    }
    Ok(Ok((payload.sub, payload.auth_provider)))
}

/// Remove one token. Returns false when it was already gone.
pub async fn revoke(repo: &dyn RefreshTokenRepository, token: &str) -> Result<bool, AppError> {
    repo.delete_by_token(token).await
}

pub async fn revoke_all(repo: &dyn RefreshTokenRepository, email: &str) -> Result<u64, AppError> {
    let n = repo.delete_all_for_email(email).await?;
    tracing::info!(email, revoked = n, "revoked refresh tokens");
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory::InMemoryRefreshTokens;
    use chrono::Duration;

    #[tokio::test]
    async fn test_issue_then_verify() {
        let repo = InMemoryRefreshTokens::default();
        let s = Settings::for_tests();
        let token = issue(&repo, &s, "a@example.com", "local").await.unwrap();
        let got = verify(&repo, &s, &token).await.unwrap();
        assert_eq!(got, Ok(("a@example.com".to_string(), "local".to_string())));
    }

    #[tokio::test]
    async fn test_reissue_replaces_previous_token() {
        let repo = InMemoryRefreshTokens::default();
        let s = Settings::for_tests();
        let first = issue(&repo, &s, "a@example.com", "local").await.unwrap();
        let second = issue(&repo, &s, "a@example.com", "local").await.unwrap();
        assert_eq!(verify(&repo, &s, &first).await.unwrap(), Err(RefreshError::Revoked));
        assert!(verify(&repo, &s, &second).await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_revoked_and_garbage_tokens() {
        let repo = InMemoryRefreshTokens::default();
        let s = Settings::for_tests();
        let token = issue(&repo, &s, "a@example.com", "local").await.unwrap();
        assert!(revoke(&repo, &token).await.unwrap());
        assert!(!revoke(&repo, &token).await.unwrap());
        assert_eq!(verify(&repo, &s, &token).await.unwrap(), Err(RefreshError::Revoked));
        assert_eq!(verify(&repo, &s, "garbage").await.unwrap(), Err(RefreshError::Invalid));
    }

    #[tokio::test]
    async fn test_stored_expiry_is_enforced() {
        let repo = InMemoryRefreshTokens::default();
        let s = Settings::for_tests();
        let token = issue(&repo, &s, "a@example.com", "local").await.unwrap();
        repo.upsert_for_email("a@example.com", &token, Utc::now() - Duration::minutes(1))
            .await
            .unwrap();
        assert_eq!(verify(&repo, &s, &token).await.unwrap(), Err(RefreshError::Expired));
    }

    #[tokio::test]
    async fn test_revoke_all() {
        let repo = InMemoryRefreshTokens::default();
        let s = Settings::for_tests();
        issue(&repo, &s, "a@example.com", "local").await.unwrap();
        assert_eq!(revoke_all(&repo, "a@example.com").await.unwrap(), 1);
        assert!(repo.find_by_email("a@example.com").await.unwrap().is_none());
    }
}
