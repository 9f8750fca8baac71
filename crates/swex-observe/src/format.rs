use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};

use crate::error::LoggerError;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum LoggerFormat {
    /// Human-readable lines, colored on a terminal.
    #[default]
    Text,
    /// One JSON object per event, for log collectors.
    Json,
    /// systemd-journald (Linux only).
    Journald,
}

impl FromStr for LoggerFormat {
    type Err = LoggerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "journald" | "journal" => {
                if cfg!(target_os = "linux") {
                    Ok(Self::Journald)
                } else {
                    Err(LoggerError::JournaldNotSupported)
                }
            }
            _ => Err(LoggerError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for LoggerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LoggerFormat::Text => "text",
            LoggerFormat::Json => "json",
            LoggerFormat::Journald => "journald",
        })
    }
}

impl Serialize for LoggerFormat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LoggerFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_text() {
        assert_eq!(LoggerFormat::default(), LoggerFormat::Text);
    }

    #[test]
    fn parses_case_insensitive() {
        assert_eq!("TEXT".parse::<LoggerFormat>().unwrap(), LoggerFormat::Text);
        assert_eq!(" json ".parse::<LoggerFormat>().unwrap(), LoggerFormat::Json);
    }

    #[test]
    fn journald_only_on_linux() {
        let parsed = "journald".parse::<LoggerFormat>();
        if cfg!(target_os = "linux") {
            assert_eq!(parsed.unwrap(), LoggerFormat::Journald);
        } else {
            assert!(matches!(parsed, Err(LoggerError::JournaldNotSupported)));
        }
    }

    #[test]
    fn rejects_unknown_format() {
        for input in ["", "xml", "logfmt"] {
            assert!(
                input.parse::<LoggerFormat>().is_err(),
                "expected error for {input:?}"
            );
        }
    }

    #[test]
    fn serde_uses_canonical_names() {
        assert_eq!(serde_json::to_string(&LoggerFormat::Json).unwrap(), r#""json""#);
        let parsed: LoggerFormat = serde_json::from_str(r#""Text""#).unwrap();
        assert_eq!(parsed, LoggerFormat::Text);
    }
}
