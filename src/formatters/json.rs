//! JSON formatter
//!
//! Each event becomes one JSON object with the keys `message`, `date`,
//! `class`, `line` and `level`, plus `exception` and `context` when present.
//! `<`, `>`, `&`, `'` and `"` inside strings are written as `\uXXXX` escapes so
//! the output can be embedded in HTML unchanged.

use crate::core::{ErrorInfo, Formatter, LogEvent, LoggerError, Result, TimestampFormat};
use serde::Serialize;
use serde_json::ser::{CharEscape, CompactFormatter};
use std::io;

#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    timestamp_format: TimestampFormat,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timestamp format for this formatter
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Build the JSON object for an event without serializing it
    pub fn to_json_value(&self, event: &LogEvent) -> Result<serde_json::Value> {
        let mut entry = serde_json::Map::new();

        entry.insert(
            "message".to_string(),
            serde_json::Value::String(event.message().unwrap_or_default().to_string()),
        );
        entry.insert("date".to_string(), self.format_date(event)?);
        entry.insert(
            "class".to_string(),
            serde_json::Value::String(event.component().to_string()),
        );
        entry.insert(
            "line".to_string(),
            serde_json::Value::Number(event.location().line().into()),
        );
        entry.insert(
            "level".to_string(),
            serde_json::Value::String(event.level().as_str().to_string()),
        );

        if let Some(error) = event.error() {
            entry.insert("exception".to_string(), error.to_json_value());
        }

        if let Some(context) = event.context().filter(|c| !c.is_empty()) {
            let fields = context
                .iter()
                .map(|(key, value)| (key.to_string(), serde_json::Value::String(value.render())))
                .collect();
            entry.insert("context".to_string(), serde_json::Value::Object(fields));
        }

        Ok(serde_json::Value::Object(entry))
    }

    /// Numeric formats become JSON numbers, everything else a string
    fn format_date(&self, event: &LogEvent) -> Result<serde_json::Value> {
        if self.timestamp_format.is_numeric() {
            return Ok(serde_json::Value::Number(
                event.timestamp().timestamp_millis().into(),
            ));
        }
        Ok(serde_json::Value::String(
            self.timestamp_format.format(event.timestamp())?,
        ))
    }
}

impl Formatter for JsonFormatter {
    fn format_event(&self, event: &LogEvent) -> Result<String> {
        to_html_safe_string(&self.to_json_value(event)?)
    }

    fn format_error(&self, error: &ErrorInfo) -> Result<String> {
        to_html_safe_string(&error.to_json_value())
    }

    fn name(&self) -> &str {
        "json"
    }
}

/// Compact JSON output with HTML-sensitive characters hex-escaped
struct HtmlSafeFormatter;

impl serde_json::ser::Formatter for HtmlSafeFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, byte) in fragment.bytes().enumerate() {
            let escaped: &[u8] = match byte {
                b'<' => b"\\u003C",
                b'>' => b"\\u003E",
                b'&' => b"\\u0026",
                b'\'' => b"\\u0027",
                _ => continue,
            };
            writer.write_all(fragment[start..index].as_bytes())?;
            writer.write_all(escaped)?;
            start = index + 1;
        }
        writer.write_all(fragment[start..].as_bytes())
    }

    fn write_char_escape<W>(&mut self, writer: &mut W, char_escape: CharEscape) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        match char_escape {
            CharEscape::Quote => writer.write_all(b"\\u0022"),
            other => CompactFormatter.write_char_escape(writer, other),
        }
    }
}

fn to_html_safe_string(value: &serde_json::Value) -> Result<String> {
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, HtmlSafeFormatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buffer).map_err(|e| LoggerError::formatter("json", e.to_string()))
}
