//! Tracing setup: JSON lines to a daily rolling file, plus a console layer in local runs.

use crate::config::Settings;
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_FILE_NAME: &str = "swx_api.log";

/// Filter used when `RUST_LOG` is unset.
pub fn default_directive(settings: &Settings) -> String {
    let level = settings.log_level.as_directive();
    format!("{level},swx_api={level},sqlx=warn")
}

/// Install the global subscriber. Keep the returned guard alive for the life of the process
/// so buffered file output is flushed on exit.
pub fn init_logging(settings: &Settings) -> std::io::Result<WorkerGuard> {
    fs::create_dir_all(&settings.log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&settings.log_dir, LOG_FILE_NAME);
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = fmt::layer()
        .json()
        .with_current_span(false)
        .with_writer(non_blocking_writer);

    let console_layer = settings
        .is_local()
        .then(|| fmt::layer().with_target(false).with_writer(std::io::stdout));

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(settings)));

    // A second init (tests, embedded use) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init();

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;

    #[test]
    fn test_directive_follows_log_level() {
        let mut s = Settings::for_tests();
        assert_eq!(default_directive(&s), "warn,swx_api=warn,sqlx=warn");
        s.log_level = LogLevel::Critical;
        assert!(default_directive(&s).starts_with("error,"));
    }

    #[test]
    fn test_init_creates_log_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = Settings::for_tests();
        s.log_dir = dir.path().join("nested").join("logs");
        let _guard = init_logging(&s).unwrap();
        assert!(s.log_dir.is_dir());
    }
}
