use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339};
use tracing_subscriber::fmt::{format::Writer, time::FormatTime};

use crate::error::LoggerError;

/// Timezone for log timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoggerTimeZone {
    /// UTC (default).
    #[default]
    Utc,
    /// System timezone, detected once at logger initialization.
    Local,
}

impl FromStr for LoggerTimeZone {
    type Err = LoggerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utc" => Ok(Self::Utc),
            "local" => Ok(Self::Local),
            _ => Err(LoggerError::InvalidTimeZone(s.to_string())),
        }
    }
}

impl fmt::Display for LoggerTimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LoggerTimeZone::Utc => "utc",
            LoggerTimeZone::Local => "local",
        })
    }
}

/// RFC 3339 timestamp formatter with a fixed offset.
///
/// Falls back to UTC when the local offset cannot be determined.
#[derive(Debug, Clone, Copy)]
pub struct LoggerRfc3339 {
    offset: UtcOffset,
}

impl LoggerRfc3339 {
    pub fn for_zone(tz: LoggerTimeZone) -> Self {
        let offset = match tz {
            LoggerTimeZone::Utc => UtcOffset::UTC,
            LoggerTimeZone::Local => UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC),
        };
        Self { offset }
    }

    #[inline]
    pub fn offset(&self) -> UtcOffset {
        self.offset
    }

    fn now(&self) -> Result<String, time::error::Format> {
        OffsetDateTime::now_utc().to_offset(self.offset).format(&Rfc3339)
    }
}

impl FormatTime for LoggerRfc3339 {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        match self.now() {
            Ok(ts) => write!(w, "{ts}"),
            Err(_) => write!(w, "<invalid-time>"),
        }
    }
}
