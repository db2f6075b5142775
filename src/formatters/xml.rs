//! XML formatter
//!
//! One `<entry>` element per event. Context fields become
//! `<field name="key">value</field>` children of `<context>`.

use crate::core::{ErrorInfo, Formatter, LogEvent, Result, TimestampFormat};

#[derive(Debug, Clone, Default)]
pub struct XmlFormatter {
    timestamp_format: TimestampFormat,
}

impl XmlFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timestamp format for this formatter
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn push_element(out: &mut String, name: &str, value: &str) {
        out.push('<');
        out.push_str(name);
        out.push('>');
        out.push_str(&escape_xml(value));
        out.push_str("</");
        out.push_str(name);
        out.push('>');
    }

    fn push_error(out: &mut String, info: &ErrorInfo) {
        Self::push_element(out, "class", info.class());
        Self::push_element(out, "message", info.message());
        if let Some(file) = info.file() {
            Self::push_element(out, "file", file);
        }
        if let Some(line) = info.line() {
            Self::push_element(out, "line", &line.to_string());
        }
        if let Some(trace) = info.trace() {
            Self::push_element(out, "trace", trace);
        }
        if let Some(cause) = info.cause() {
            out.push_str("<cause>");
            Self::push_error(out, cause);
            out.push_str("</cause>");
        }
    }
}

impl Formatter for XmlFormatter {
    fn format_event(&self, event: &LogEvent) -> Result<String> {
        let mut out = String::with_capacity(256);
        out.push_str("<entry>");
        let date = self.timestamp_format.format(event.timestamp())?;
        Self::push_element(&mut out, "date", &date);
        Self::push_element(&mut out, "message", event.message().unwrap_or_default());
        Self::push_element(&mut out, "level", event.level().as_str());
        Self::push_element(&mut out, "class", event.component());
        Self::push_element(&mut out, "line", &event.location().line().to_string());

        if let Some(error) = event.error() {
            out.push_str("<exception>");
            out.push_str(&self.format_error(error)?);
            out.push_str("</exception>");
        }

        if let Some(context) = event.context().filter(|c| !c.is_empty()) {
            out.push_str("<context>");
            for (key, value) in context.iter() {
                out.push_str(&format!(
                    "<field name=\"{}\">{}</field>",
                    escape_xml(key),
                    escape_xml(&value.render())
                ));
            }
            out.push_str("</context>");
        }

        out.push_str("</entry>\n");
        Ok(out)
    }

    /// Children of an `<exception>` element, causes nested in `<cause>`
    fn format_error(&self, error: &ErrorInfo) -> Result<String> {
        let mut out = String::new();
        Self::push_error(&mut out, error);
        Ok(out)
    }

    fn name(&self) -> &str {
        "xml"
    }
}

/// Escape text and attribute content
fn escape_xml(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&apos;"),
            _ => result.push(c),
        }
    }
    result
}
