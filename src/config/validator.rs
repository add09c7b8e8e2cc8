//! Settings sanity checks run once at startup.

use crate::config::settings::{Settings, DEFAULT_SUPERUSER_PASSWORD};
use crate::error::ConfigError;

const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// One year.
pub const MAX_ACCESS_TOKEN_MINUTES: i64 = 525_600;
/// Ten years.
pub const MAX_REFRESH_TOKEN_DAYS: i64 = 3650;
/// Thirty days.
pub const MAX_RESET_TOKEN_HOURS: i64 = 720;

fn lifetime_in_range(key: &str, value: i64, max: i64) -> Result<(), ConfigError> {
    if value <= 0 {
        return Err(ConfigError::Validation(format!("{} must be positive", key)));
    }
    if value > max {
        return Err(ConfigError::Validation(format!("{} must be at most {}", key, max)));
    }
    Ok(())
}

pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    lifetime_in_range(
        "ACCESS_TOKEN_EXPIRE_MINUTES",
        settings.access_token_expire_minutes,
        MAX_ACCESS_TOKEN_MINUTES,
    )?;
    lifetime_in_range(
        "REFRESH_TOKEN_EXPIRE_DAYS",
        settings.refresh_token_expire_days,
        MAX_REFRESH_TOKEN_DAYS,
    )?;
    lifetime_in_range(
        "EMAIL_RESET_TOKEN_EXPIRE_HOURS",
        settings.email_reset_token_expire_hours,
        MAX_RESET_TOKEN_HOURS,
    )?;
    if !settings.route_prefix.is_empty() && !settings.route_prefix.starts_with('/') {
        return Err(ConfigError::Validation("ROUTE_PREFIX must start with '/'".into()));
    }
    if settings.is_production() {
        if settings.first_superuser_password == DEFAULT_SUPERUSER_PASSWORD {
            return Err(ConfigError::Validation(
                "FIRST_SUPERUSER_PASSWORD must be changed in production".into(),
            ));
        }
        for (key, value) in [
            ("SECRET_KEY", &settings.secret_key),
            ("REFRESH_SECRET_KEY", &settings.refresh_secret_key),
        ] {
            if value.len() < MIN_PRODUCTION_SECRET_LEN {
                return Err(ConfigError::Validation(format!(
                    "{} must be at least {} characters in production",
                    key, MIN_PRODUCTION_SECRET_LEN
                )));
            }
        }
    }
    Ok(())
}
