//! Logging setup for the swarm service exporter.
mod config;
mod error;
mod format;
mod init;
mod level;
mod timer;

pub use config::{ENV_LOG_COLOR, ENV_LOG_FORMAT, ENV_LOG_LEVEL, ENV_LOG_TZ, LoggerConfig};
pub use error::{LoggerError, LoggerResult};
pub use format::LoggerFormat;
pub use level::LoggerLevel;
pub use timer::{LoggerRfc3339, LoggerTimeZone};

/// Installs the global tracing subscriber described by `cfg`.
///
/// With `LoggerTimeZone::Local` the offset is detected here, once; call this
/// from `main()` before starting the tokio runtime, since offset detection is
/// refused by most Unix platforms once other threads exist.
///
/// # Examples
/// ```rust
/// use swex_observe::{LoggerConfig, init_logger};
///
/// let config = LoggerConfig::default();
/// init_logger(&config).expect("Failed to initialize logger");
///
/// tracing::info!("Logger initialized successfully");
/// ```
pub fn init_logger(cfg: &LoggerConfig) -> LoggerResult<()> {
    let timer = LoggerRfc3339::for_zone(cfg.tz);
    match cfg.format {
        LoggerFormat::Text => init::logger_text(cfg, timer),
        LoggerFormat::Json => init::logger_json(cfg, timer),
        LoggerFormat::Journald => init::logger_journald(cfg),
    }
}
