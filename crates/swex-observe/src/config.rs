use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::{
    error::{LoggerError, LoggerResult},
    format::LoggerFormat,
    level::LoggerLevel,
    timer::LoggerTimeZone,
};

/// Filter expression, e.g. `info` or `swex_core=debug,info`.
pub const ENV_LOG_LEVEL: &str = "EXPORTER_LOG_LEVEL";
/// `text`, `json` or `journald`.
pub const ENV_LOG_FORMAT: &str = "EXPORTER_LOG_FORMAT";
/// `utc` or `local`.
pub const ENV_LOG_TZ: &str = "EXPORTER_LOG_TZ";
/// `true`/`false`; color is still suppressed when stdout is not a terminal.
pub const ENV_LOG_COLOR: &str = "EXPORTER_LOG_COLOR";

/// Logger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Output format.
    pub format: LoggerFormat,
    /// Log level filter expression.
    pub level: LoggerLevel,
    /// Timezone for timestamps.
    pub tz: LoggerTimeZone,
    /// Whether to include module/target names in log output.
    pub with_targets: bool,
    /// Whether to use colored output.
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::default(),
            level: LoggerLevel::default(),
            tz: LoggerTimeZone::default(),
            with_targets: true,
            use_color: true,
        }
    }
}

impl LoggerConfig {
    /// Read overrides through an arbitrary variable lookup.
    ///
    /// Unset or blank variables keep their default; malformed ones are an error.
    pub fn from_lookup<F>(lookup: F) -> LoggerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut cfg = Self::default();

        if let Some(v) = get(ENV_LOG_LEVEL) {
            cfg.level = v.parse()?;
        }
        if let Some(v) = get(ENV_LOG_FORMAT) {
            cfg.format = v.parse()?;
        }
        if let Some(v) = get(ENV_LOG_TZ) {
            cfg.tz = v.parse()?;
        }
        if let Some(v) = get(ENV_LOG_COLOR) {
            cfg.use_color = parse_bool(ENV_LOG_COLOR, &v)?;
        }
        Ok(cfg)
    }

    /// Color is used only if enabled and stdout is a terminal.
    pub fn should_use_color(&self) -> bool {
        self.use_color && std::io::stdout().is_terminal()
    }
}

fn parse_bool(key: &'static str, v: &str) -> LoggerResult<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(LoggerError::InvalidSetting {
            key,
            value: v.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn default_values() {
        let config = LoggerConfig::default();

        assert_eq!(config.format, LoggerFormat::Text);
        assert_eq!(config.tz, LoggerTimeZone::Utc);
        assert_eq!(config.level.as_str(), "info");
        assert!(config.with_targets);
        assert!(config.use_color);
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = LoggerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, LoggerConfig::default());
    }

    #[test]
    fn environment_overrides() {
        let config = LoggerConfig::from_lookup(lookup(&[
            (ENV_LOG_LEVEL, "swex_core=debug,warn"),
            (ENV_LOG_FORMAT, "json"),
            (ENV_LOG_TZ, "local"),
            (ENV_LOG_COLOR, "off"),
        ]))
        .unwrap();

        assert_eq!(config.level.as_str(), "swex_core=debug,warn");
        assert_eq!(config.format, LoggerFormat::Json);
        assert_eq!(config.tz, LoggerTimeZone::Local);
        assert!(!config.use_color);
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = LoggerConfig::from_lookup(lookup(&[(ENV_LOG_LEVEL, "  "), (ENV_LOG_FORMAT, "")])).unwrap();
        assert_eq!(config, LoggerConfig::default());
    }

    #[test]
    fn malformed_values_are_errors() {
        assert!(matches!(
            LoggerConfig::from_lookup(lookup(&[(ENV_LOG_FORMAT, "xml")])),
            Err(LoggerError::InvalidFormat(_))
        ));
        assert!(matches!(
            LoggerConfig::from_lookup(lookup(&[(ENV_LOG_COLOR, "maybe")])),
            Err(LoggerError::InvalidSetting { key: ENV_LOG_COLOR, .. })
        ));
    }

    #[test]
    fn serde_uses_defaults_for_missing_fields() {
        let config: LoggerConfig = serde_json::from_str(r#"{"format": "json"}"#).unwrap();

        assert_eq!(config.format, LoggerFormat::Json);
        assert_eq!(config.level.as_str(), "info");
        assert!(config.with_targets);
    }
}
