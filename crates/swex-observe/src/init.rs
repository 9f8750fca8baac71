use tracing::Subscriber;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::LoggerConfig,
    error::{LoggerError, LoggerResult},
    timer::LoggerRfc3339,
};

/// Initializes text logger.
pub(crate) fn logger_text(cfg: &LoggerConfig, timer: LoggerRfc3339) -> LoggerResult<()> {
    let fmt_layer = fmt::layer()
        .with_ansi(cfg.should_use_color())
        .with_target(cfg.with_targets)
        .with_timer(timer);

    let subscriber = tracing_subscriber::registry()
        .with(cfg.level.to_env_filter())
        .with(fmt_layer);
    init_subscriber(subscriber)
}

/// Initializes JSON (structured) logger.
pub(crate) fn logger_json(cfg: &LoggerConfig, timer: LoggerRfc3339) -> LoggerResult<()> {
    let fmt_layer = fmt::layer()
        .json()
        .with_ansi(false)
        .with_target(cfg.with_targets)
        .with_current_span(false)
        .with_timer(timer);

    let subscriber = tracing_subscriber::registry()
        .with(cfg.level.to_env_filter())
        .with(fmt_layer);
    init_subscriber(subscriber)
}

/// Initializes journald logger (Linux only).
#[cfg(target_os = "linux")]
pub(crate) fn logger_journald(cfg: &LoggerConfig) -> LoggerResult<()> {
    let journald =
        tracing_journald::layer().map_err(|e| LoggerError::JournaldInitFailed(e.to_string()))?;

    let subscriber = tracing_subscriber::registry()
        .with(cfg.level.to_env_filter())
        .with(journald);
    init_subscriber(subscriber)
}

/// Stub for journald on non-Linux platforms.
#[cfg(not(target_os = "linux"))]
pub(crate) fn logger_journald(_cfg: &LoggerConfig) -> LoggerResult<()> {
    Err(LoggerError::JournaldNotSupported)
}

/// Installs the subscriber as the global default.
fn init_subscriber<S>(subscriber: S) -> LoggerResult<()>
where
    S: Subscriber + Send + Sync + 'static,
{
    subscriber
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::LoggerTimeZone;

    #[test]
    fn second_init_reports_already_initialized() {
        let cfg = LoggerConfig {
            use_color: false,
            ..Default::default()
        };
        let timer = LoggerRfc3339::for_zone(LoggerTimeZone::Utc);

        let _ = logger_text(&cfg, timer);
        let second = logger_json(&cfg, timer);

        assert!(matches!(second, Err(LoggerError::AlreadyInitialized)));
    }
}
