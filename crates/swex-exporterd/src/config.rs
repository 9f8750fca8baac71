use std::{net::SocketAddr, time::Duration};

use thiserror::Error;

use swex_core::{DEFAULT_POLL_INTERVAL, OrchestratorError};
use swex_docker::DockerConfig;
use swex_observe::{LoggerConfig, LoggerError};

/// Scrape listener port.
pub const ENV_PORT: &str = "EXPORTER_PORT";
/// Seconds between polling cycles.
pub const ENV_POLL_INTERVAL_SECS: &str = "EXPORTER_POLL_INTERVAL_SECS";

pub const DEFAULT_PORT: u16 = 9180;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid EXPORTER_PORT: {0:?} (expected 1-65535)")]
    InvalidPort(String),

    #[error("invalid EXPORTER_POLL_INTERVAL_SECS: {0:?} (expected a positive number of seconds)")]
    InvalidInterval(String),

    #[error("logger: {0}")]
    Logger(#[from] LoggerError),

    #[error("docker: {0}")]
    Docker(#[from] OrchestratorError),
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ExporterConfig {
    pub port: u16,
    pub poll_interval: Duration,
    pub logger: LoggerConfig,
    pub docker: DockerConfig,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            logger: LoggerConfig::default(),
            docker: DockerConfig::default(),
        }
    }
}

impl ExporterConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get(ENV_PORT) {
            Some(raw) => parse_port(&raw)?,
            None => DEFAULT_PORT,
        };
        let poll_interval = match get(ENV_POLL_INTERVAL_SECS) {
            Some(raw) => parse_interval(&raw)?,
            None => DEFAULT_POLL_INTERVAL,
        };

        Ok(Self {
            port,
            poll_interval,
            logger: LoggerConfig::from_lookup(&lookup)?,
            docker: DockerConfig::from_lookup(&lookup)?,
        })
    }

    /// Address the scrape endpoint binds to (all interfaces).
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    match raw.trim().parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(ConfigError::InvalidPort(raw.to_string())),
    }
}

fn parse_interval(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidInterval(raw.to_string())),
    }
}
