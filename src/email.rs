//! Outgoing email: askama templates under `templates/email/` and the delivery seam.
//!
//! Delivery is disabled by default: `LogMailer` only records that a message would have
//! been sent.

use crate::config::Settings;
use crate::error::AppError;
use askama::Template;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailData {
    pub subject: String,
    pub html_content: String,
}

#[derive(Template)]
#[template(path = "email/test_email.html")]
struct TestEmailTemplate<'a> {
    project_name: &'a str,
    email: &'a str,
}

#[derive(Template)]
#[template(path = "email/reset_password.html")]
struct ResetPasswordTemplate<'a> {
    project_name: &'a str,
    username: &'a str,
    link: &'a str,
    valid_hours: i64,
}

#[derive(Template)]
#[template(path = "email/new_account.html")]
struct NewAccountTemplate<'a> {
    project_name: &'a str,
    username: &'a str,
    password: &'a str,
    link: &'a str,
}

fn render(template: &impl Template) -> Result<String, AppError> {
    template
        .render()
        .map_err(|e| AppError::Internal(format!("email template: {}", e)))
}

pub fn test_email(settings: &Settings, email_to: &str) -> Result<EmailData, AppError> {
    Ok(EmailData {
        subject: format!("{} - Test email", settings.project_name),
        html_content: render(&TestEmailTemplate {
            project_name: &settings.project_name,
            email: email_to,
        })?,
    })
}

pub fn reset_password_email(
    settings: &Settings,
    _email_to: &str,
    email: &str,
    token: &str,
) -> Result<EmailData, AppError> {
    let link = format!(
        "{}/reset-password?token={}",
        settings.frontend_host.trim_end_matches('/'),
        token
    );
    Ok(EmailData {
        subject: format!("{} - Password recovery for user {}", settings.project_name, email),
        html_content: render(&ResetPasswordTemplate {
            project_name: &settings.project_name,
            username: email,
            link: &link,
            valid_hours: settings.email_reset_token_expire_hours,
        })?,
    })
}

pub fn new_account_email(
    settings: &Settings,
    _email_to: &str,
    username: &str,
    password: &str,
) -> Result<EmailData, AppError> {
    Ok(EmailData {
        subject: format!("{} - New account for user {}", settings.project_name, username),
        html_content: render(&NewAccountTemplate {
            project_name: &settings.project_name,
            username,
            password,
            link: &settings.frontend_host,
        })?,
    })
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email_to: &str, email: &EmailData) -> Result<(), AppError>;
}

/// Logs instead of sending.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email_to: &str, email: &EmailData) -> Result<(), AppError> {
        tracing::info!(to = email_to, subject = %email.subject, "email delivery disabled; message not sent");
        Ok(())
    }
}

/// Keeps every message for assertions.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: std::sync::Mutex<Vec<(String, EmailData)>>,
}

#[cfg(test)]
#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email_to: &str, email: &EmailData) -> Result<(), AppError> {
        self.sent
            .lock()
            .unwrap()
            .push((email_to.to_string(), email.clone()));
        Ok(())
    }
}
