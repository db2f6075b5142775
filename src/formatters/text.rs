//! Single-line text formatter
//!
//! `<date> [LEVEL]    <class>.<line> <message>`, followed by the attached
//! error (each cause as its own "Caused by" paragraph) and one
//! `[key] => value` line per context field.

use crate::core::{ErrorInfo, Formatter, LogContext, LogEvent, Result, TimestampFormat};

#[derive(Debug, Clone, Default)]
pub struct TextFormatter {
    timestamp_format: TimestampFormat,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timestamp format for this formatter
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn error_block(info: &ErrorInfo) -> String {
        let mut block = format!(
            "Exception {} with message \"{}\"",
            info.class(),
            info.message()
        );
        if let Some(file) = info.file() {
            block.push_str(&format!(" in {}({})", file, info.line().unwrap_or(0)));
        }
        if let Some(trace) = info.trace() {
            block.push('\n');
            block.push_str(trace);
        }
        block
    }

    fn context_lines(context: &LogContext) -> String {
        let mut lines = String::new();
        for (key, value) in context.iter() {
            lines.push_str(&format!("[{}] => {}\n", key, value.render()));
        }
        lines
    }
}

impl Formatter for TextFormatter {
    fn format_event(&self, event: &LogEvent) -> Result<String> {
        let mut body = event.message().unwrap_or_default().to_string();

        if let Some(error) = event.error() {
            body.push('\n');
            body.push_str(&self.format_error(error)?);
        }

        if let Some(context) = event.context().filter(|c| !c.is_empty()) {
            body.push('\n');
            body.push_str(&Self::context_lines(context));
        }

        Ok(format!(
            "{} {:<10} {}.{} {}\n",
            self.timestamp_format.format(event.timestamp())?,
            format!("[{}]", event.level().label()),
            event.component(),
            event.location().line(),
            body
        ))
    }

    fn format_error(&self, error: &ErrorInfo) -> Result<String> {
        let mut chain = error.chain();
        let mut rendered = chain.next().map(Self::error_block).unwrap_or_default();
        for cause in chain {
            rendered.push_str("\n\nCaused by ");
            rendered.push_str(&Self::error_block(cause));
        }
        Ok(rendered)
    }

    fn name(&self) -> &str {
        "text"
    }
}
