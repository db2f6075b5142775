//! Timestamp formatting utilities
//!
//! Formatters render the event date through a [`TimestampFormat`]. Events are
//! stamped with millisecond precision, so the millisecond formats are lossless.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::str::FromStr;

/// Standardized timestamp format options
///
/// # Examples
///
/// ```
/// use hierarchical_logger::core::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::DateTimeMillis.format(&at)?, "2025-01-08 10:30:45.000");
/// assert!(TimestampFormat::custom("%Q").is_err());
/// # Ok::<(), hierarchical_logger::LoggerError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampFormat {
    /// Date and time with milliseconds: `2025-01-08 10:30:45.123`
    #[default]
    DateTimeMillis,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// RFC 3339 format: `2025-01-08T10:30:45.123+00:00`
    Rfc3339,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    ///
    /// Allows specifying any strftime-compatible format string, e.g.
    /// `"%d/%b/%Y:%H:%M:%S %z"`.
    Custom(String),
}

impl TimestampFormat {
    /// A custom strftime format, rejected if chrono cannot parse the pattern
    pub fn custom(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(LoggerError::formatter(
                "timestamp",
                format!("invalid strftime pattern '{}'", pattern),
            ));
        }
        Ok(TimestampFormat::Custom(pattern))
    }

    /// Format a `DateTime<Utc>` according to this format
    ///
    /// Only a `Custom` pattern can fail, when it holds an unknown specifier.
    pub fn format(&self, datetime: &DateTime<Utc>) -> Result<String> {
        Ok(match self {
            TimestampFormat::DateTimeMillis => {
                datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
            }
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Rfc3339 => {
                datetime.to_rfc3339_opts(chrono::SecondsFormat::Millis, false)
            }
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(pattern) => {
                let mut out = String::new();
                write!(out, "{}", datetime.format(pattern)).map_err(|_| {
                    LoggerError::formatter(
                        "timestamp",
                        format!("invalid strftime pattern '{}'", pattern),
                    )
                })?;
                out
            }
        })
    }

    /// Check if this is a Unix-based numeric format
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, TimestampFormat::UnixMillis)
    }
}

/// Named formats are matched case-insensitively; anything else must be a
/// valid strftime pattern.
impl FromStr for TimestampFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "datetime_millis" | "datetime" => Ok(TimestampFormat::DateTimeMillis),
            "iso8601" => Ok(TimestampFormat::Iso8601),
            "rfc3339" => Ok(TimestampFormat::Rfc3339),
            "unix_millis" | "unixmillis" => Ok(TimestampFormat::UnixMillis),
            _ => TimestampFormat::custom(s),
        }
    }
}
