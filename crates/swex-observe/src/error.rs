use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Invalid log format: {0} (expected: text|json|journald)")]
    InvalidFormat(String),

    #[error("Journald is not supported on this platform")]
    JournaldNotSupported,

    #[error("Failed to initialize journald: {0}")]
    JournaldInitFailed(String),

    #[error("Logger already initialized")]
    AlreadyInitialized,

    #[error("Invalid timezone: {0} (expected: utc|local)")]
    InvalidTimeZone(String),

    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidSetting { key: &'static str, value: String },
}

pub type LoggerResult<T> = Result<T, LoggerError>;
