//! Log level definitions
//!
//! Levels follow RFC 5424: each member carries a numeric code and a higher code
//! means a more severe event.

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u16)]
pub enum LogLevel {
    /// Debug-level messages
    Debug = 100,
    /// Informational messages
    Info = 200,
    /// Normal but significant conditions
    Notice = 300,
    /// Warning conditions
    Warning = 400,
    /// Error conditions
    Error = 500,
    /// Critical conditions
    Critical = 600,
    /// Action must be taken immediately
    Alert = 700,
    /// System is unusable
    Emergency = 800,
}

impl LogLevel {
    /// Every level, least severe first
    pub const ALL: [LogLevel; 8] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Notice,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Critical,
        LogLevel::Alert,
        LogLevel::Emergency,
    ];

    /// Whether `code` belongs to the fixed set of levels
    pub fn is_valid(code: u16) -> bool {
        Self::ALL.iter().any(|level| level.code() == code)
    }

    pub fn from_code(code: u16) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|level| level.code() == code)
            .ok_or(LoggerError::InvalidLevel { code })
    }

    #[inline]
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Lower-case name, as used in configuration and structured output
    pub const fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Notice => "notice",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Critical => "critical",
            LogLevel::Alert => "alert",
            LogLevel::Emergency => "emergency",
        }
    }

    /// Upper-case name, as used in the text format
    pub const fn label(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Notice => "NOTICE",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
            LogLevel::Alert => "ALERT",
            LogLevel::Emergency => "EMERGENCY",
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Debug => BrightBlack,
            LogLevel::Info => Green,
            LogLevel::Notice => Cyan,
            LogLevel::Warning => Yellow,
            LogLevel::Error => Red,
            LogLevel::Critical | LogLevel::Alert | LogLevel::Emergency => BrightRed,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "notice" => Ok(LogLevel::Notice),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            "critical" => Ok(LogLevel::Critical),
            "alert" => Ok(LogLevel::Alert),
            "emergency" => Ok(LogLevel::Emergency),
            _ => Err(LoggerError::UnknownLevelName {
                name: s.to_string(),
            }),
        }
    }
}

impl TryFrom<u16> for LogLevel {
    type Error = LoggerError;

    fn try_from(code: u16) -> Result<Self> {
        Self::from_code(code)
    }
}
