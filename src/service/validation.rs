//! Field validation for request bodies: typed checks for core models and rule tables for
//! generic resources.

use crate::error::AppError;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Email,
    Uuid,
}

/// Per-column rule. Built in `const` context by generated resources.
#[derive(Debug, Clone, Copy)]
pub struct ValidationRule {
    pub required: bool,
    pub format: Option<Format>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<&'static str>,
    pub allowed: &'static [&'static str],
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

impl ValidationRule {
    pub const NONE: ValidationRule = ValidationRule {
        required: false,
        format: None,
        min_length: None,
        max_length: None,
        pattern: None,
        allowed: &[],
        minimum: None,
        maximum: None,
    };

    pub const REQUIRED: ValidationRule = ValidationRule {
        required: true,
        ..ValidationRule::NONE
    };
}

pub struct RequestValidator;

impl RequestValidator {
    /// Validate body against per-column rules. All required fields must be present.
    pub fn validate<'a, I>(body: &HashMap<String, Value>, rules: I) -> Result<(), AppError>
    where
        I: IntoIterator<Item = (&'a str, &'a ValidationRule)>,
    {
        for (col, rule) in rules {
            let val = body.get(col);
            if rule.required && (val.is_none() || val == Some(&Value::Null)) {
                return Err(AppError::Validation(format!("{} is required", col)));
            }
            if let Some(v) = val {
                validate_field(col, v, rule)?;
            }
        }
        Ok(())
    }

    /// Validate only the fields present in body (for PATCH/PUT). Missing fields are not enforced.
    pub fn validate_partial<'a, I>(body: &HashMap<String, Value>, rules: I) -> Result<(), AppError>
    where
        I: IntoIterator<Item = (&'a str, &'a ValidationRule)>,
    {
        for (col, rule) in rules {
            if let Some(v) = body.get(col) {
                if rule.required && v.is_null() {
                    return Err(AppError::Validation(format!("{} must not be null", col)));
                }
                validate_field(col, v, rule)?;
            }
        }
        Ok(())
    }
}

fn validate_field(col: &str, v: &Value, rule: &ValidationRule) -> Result<(), AppError> {
    if v.is_null() {
        return Ok(());
    }
    if let Some(format) = rule.format {
        if let Some(s) = v.as_str() {
            match format {
                Format::Email => email(col, s)?,
                Format::Uuid => {
                    if uuid::Uuid::parse_str(s).is_err() {
                        return Err(AppError::Validation(format!("{} must be a valid UUID", col)));
                    }
                }
            }
        }
    }
    if let Some(s) = v.as_str() {
        length(col, s, rule.min_length, rule.max_length)?;
        if let Some(pattern) = rule.pattern {
            let re = Regex::new(pattern)
                .map_err(|_| AppError::Validation(format!("invalid pattern for {}", col)))?;
            if !re.is_match(s) {
                return Err(AppError::Validation(format!(
                    "{} does not match required pattern",
                    col
                )));
            }
        }
        if !rule.allowed.is_empty() && !rule.allowed.contains(&s) {
            return Err(AppError::Validation(format!(
                "{} must be one of: {:?}",
                col,
                rule.allowed.iter().take(5).collect::<Vec<_>>()
            )));
        }
    }
    if let Some(n) = v.as_f64() {
        if let Some(min) = rule.minimum {
            if n < min {
                return Err(AppError::Validation(format!("{} must be at least {}", col, min)));
            }
        }
        if let Some(max) = rule.maximum {
            if n > max {
                return Err(AppError::Validation(format!("{} must be at most {}", col, max)));
            }
        }
    }
    Ok(())
}

/// Character-count bounds (inclusive).
pub fn length(field: &str, s: &str, min: Option<usize>, max: Option<usize>) -> Result<(), AppError> {
    let n = s.chars().count();
    if let Some(min) = min {
        if n < min {
            return Err(AppError::Validation(format!(
                "{} must be at least {} characters",
                field, min
            )));
        }
    }
    if let Some(max) = max {
        if n > max {
            return Err(AppError::Validation(format!(
                "{} must be at most {} characters",
                field, max
            )));
        }
    }
    Ok(())
}

/// Minimal address check: one `@`, non-empty local part, dotted domain, no whitespace.
pub fn email(field: &str, s: &str) -> Result<(), AppError> {
    let valid = match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !s.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid || s.len() > 255 {
        return Err(AppError::Validation(format!("{} must be a valid email", field)));
    }
    Ok(())
}
