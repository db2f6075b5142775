//! Formatter trait and output format selection
//!
//! Provides the rendering contract shared by all writers:
//! - Text: one human-readable line per event (default)
//! - Json: one JSON object per event, HTML-sensitive characters escaped
//! - Xml: one `<entry>` element per event

use super::error::{LoggerError, Result};
use super::error_info::ErrorInfo;
use super::log_event::LogEvent;
use super::timestamp::TimestampFormat;
use crate::formatters::{JsonFormatter, TextFormatter, XmlFormatter};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Renders events and attached errors
///
/// Implementations are pure: formatting the same event twice yields the same
/// output.
pub trait Formatter: Send + Sync {
    fn format_event(&self, event: &LogEvent) -> Result<String>;
    fn format_error(&self, error: &ErrorInfo) -> Result<String>;
    fn name(&self) -> &str;
}

/// Output format for log events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text format (default)
    ///
    /// Example: `2025-01-08 10:30:45.123 [INFO]     App\Service.42 Request processed`
    #[default]
    Text,

    /// JSON format for machine processing
    ///
    /// Example:
    /// `{"message":"Done","date":"...","class":"App\\Service","line":42,"level":"info"}`
    Json,

    /// XML format
    ///
    /// Example: `<entry><date>...</date><message>Request processed</message>...</entry>`
    Xml,
}

impl OutputFormat {
    /// Build the formatter for this format
    pub fn build(self, timestamp_format: TimestampFormat) -> Box<dyn Formatter> {
        match self {
            OutputFormat::Text => {
                Box::new(TextFormatter::new().with_timestamp_format(timestamp_format))
            }
            OutputFormat::Json => {
                Box::new(JsonFormatter::new().with_timestamp_format(timestamp_format))
            }
            OutputFormat::Xml => {
                Box::new(XmlFormatter::new().with_timestamp_format(timestamp_format))
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Xml => "xml",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "xml" => Ok(OutputFormat::Xml),
            _ => Err(LoggerError::formatter(s, "unknown output format")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }

    #[test]
    fn test_build_selects_formatter() {
        for format in [OutputFormat::Text, OutputFormat::Json, OutputFormat::Xml] {
            let formatter = format.build(TimestampFormat::default());
            assert_eq!(formatter.name(), format.as_str());
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
