//! Token bodies, JWT claims and the stored refresh token row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const PASSWORD_RESET_SCOPE: &str = "password_reset";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub token_type: String,
}

impl Token {
    pub fn bearer(access_token: String, refresh_token: Option<String>) -> Self {
        Token {
            access_token,
            refresh_token,
            token_type: "bearer".into(),
        }
    }
}

/// JWT claims shared by access, refresh and reset tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPayload {
    pub sub: String,
    #[serde(default = "default_provider")]
    pub auth_provider: String,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

fn default_provider() -> String {
    crate::models::user::LOCAL_PROVIDER.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenRefreshRequest {
    pub refresh_token: String,
}

/// OAuth2 password flow form (`application/x-www-form-urlencoded`).
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub grant_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Stored refresh token (`refresh_token` table). One row per user email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RefreshToken {
    pub id: Uuid,
    pub user_email: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_type_is_bearer() {
        let t = Token::bearer("a".into(), None);
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json, serde_json::json!({"access_token": "a", "token_type": "bearer"}));
    }

    #[test]
    fn test_payload_provider_defaults_to_local() {
        let p: TokenPayload =
            serde_json::from_value(serde_json::json!({"sub": "a@b.io", "exp": 1})).unwrap();
        assert_eq!(p.auth_provider, "local");
        assert!(p.scope.is_none());
    }
}
