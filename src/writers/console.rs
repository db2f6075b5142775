//! Console writer implementation

use crate::core::{
    Formatter, LogEvent, LogLevel, OutputFormat, Result, TimestampFormat, Writer,
};
use colored::Colorize;
use std::io::Write;

/// Prints rendered events to stdout, `error` and above to stderr
pub struct ConsoleWriter {
    use_colors: bool,
    output_format: OutputFormat,
    timestamp_format: TimestampFormat,
    formatter: Box<dyn Formatter>,
}

impl ConsoleWriter {
    pub fn new() -> Self {
        Self::with_colors(true)
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            output_format: OutputFormat::Text,
            timestamp_format: TimestampFormat::default(),
            formatter: OutputFormat::Text.build(TimestampFormat::default()),
        }
    }

    /// Set the output format for this writer
    ///
    /// # Example
    ///
    /// ```
    /// use hierarchical_logger::writers::ConsoleWriter;
    /// use hierarchical_logger::OutputFormat;
    ///
    /// let writer = ConsoleWriter::new().with_output_format(OutputFormat::Json);
    /// ```
    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self.formatter = format.build(self.timestamp_format.clone());
        self
    }

    /// Set the timestamp format for this writer
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.formatter = self.output_format.build(format.clone());
        self.timestamp_format = format;
        self
    }

    fn goes_to_stderr(level: LogLevel) -> bool {
        level >= LogLevel::Error
    }

    /// Colour the `[LEVEL]` tag of a text rendering
    fn colorize(&self, level: LogLevel, rendered: String) -> String {
        if !self.use_colors || self.output_format != OutputFormat::Text {
            return rendered;
        }
        let tag = format!("[{}]", level.label());
        let painted = tag.color(level.color_code()).to_string();
        rendered.replacen(&tag, &painted, 1)
    }
}

impl Default for ConsoleWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for ConsoleWriter {
    fn process_event(&self, event: &LogEvent) -> Result<()> {
        let rendered = self.colorize(event.level(), self.formatter.format_event(event)?);
        let rendered = rendered.trim_end_matches('\n');

        if Self::goes_to_stderr(event.level()) {
            eprintln!("{}", rendered);
        } else {
            println!("{}", rendered);
        }
        Ok(())
    }

    fn formatter(&self) -> &dyn Formatter {
        self.formatter.as_ref()
    }

    fn flush(&self) -> Result<()> {
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
