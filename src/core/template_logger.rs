//! Template-convention logger
//!
//! Messages are templates whose `{key}` placeholders are filled from the
//! context passed alongside them:
//!
//! ```
//! use hierarchical_logger::{log_context, LogLevel, TemplateLogger};
//! use hierarchical_logger::writers::MemoryWriter;
//! use hierarchical_logger::Writer;
//!
//! let sink = MemoryWriter::new();
//! let writers: Vec<Box<dyn Writer>> = vec![Box::new(sink.clone())];
//! let logger = TemplateLogger::from_parts("App\\Auth", Some(LogLevel::Info), writers);
//!
//! logger.info("User {user} logged in", log_context! { "user" => "alice" })?;
//! assert_eq!(sink.events()[0].message(), Some("User alice logged in"));
//! # Ok::<(), hierarchical_logger::LoggerError>(())
//! ```

use super::error::Result;
use super::log_context::LogContext;
use super::log_level::LogLevel;
use super::logger::{Logger, LoggerCore};
use super::metrics::LoggerMetrics;
use super::writer::Writer;
use std::sync::Arc;

/// Replace every `{key}` whose key is present in `context`
///
/// Single pass: substituted text is never rescanned, and placeholders naming
/// unknown keys are left verbatim.
pub fn interpolate(template: &str, context: &LogContext) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let Some(close) = after_open.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };

        let key = &after_open[..close];
        if key.contains('{') {
            // An inner '{' may start a real placeholder
            out.push('{');
            rest = after_open;
            continue;
        }

        match context.get(key) {
            Some(value) => out.push_str(&value.render()),
            None => out.push_str(&rest[open..open + close + 2]),
        }
        rest = &after_open[close + 1..];
    }

    out.push_str(rest);
    out
}

/// Logger taking a message template and a context
///
/// Shares its pipeline with [`Logger`]; the two can wrap the same core.
#[derive(Debug, Clone)]
pub struct TemplateLogger {
    core: Arc<LoggerCore>,
}

impl TemplateLogger {
    pub fn from_core(core: Arc<LoggerCore>) -> Self {
        Self { core }
    }

    pub fn from_parts(
        component: impl Into<Arc<str>>,
        threshold: Option<LogLevel>,
        writers: Vec<Box<dyn Writer>>,
    ) -> Self {
        Self::from_core(Arc::new(LoggerCore::new(component, threshold, writers)))
    }

    pub fn disabled(component: impl Into<Arc<str>>) -> Self {
        Self::from_parts(component, None, Vec::new())
    }

    /// The positional logger over the same core
    pub fn positional(&self) -> Logger {
        Logger::from_core(Arc::clone(&self.core))
    }

    pub fn component(&self) -> &str {
        self.core.component()
    }

    pub fn threshold(&self) -> Option<LogLevel> {
        self.core.threshold()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        self.core.metrics()
    }

    pub fn flush(&self) -> Result<()> {
        self.core.flush()
    }

    pub fn is_enabled_for(&self, level: LogLevel) -> bool {
        self.core.is_enabled_for(level)
    }

    /// Interpolate, attach the context and dispatch
    ///
    /// A context entry under `"exception"` holding an error also becomes the
    /// event's error; it stays in the context.
    #[track_caller]
    pub fn log(&self, level: LogLevel, template: &str, context: LogContext) -> Result<()> {
        if !self.core.admit(level) {
            return Ok(());
        }

        let mut event = self.core.start_event(level);
        if context.is_empty() {
            event = event.with_message(template);
        } else {
            event = event.with_message(interpolate(template, &context));
            if let Some(error) = context.error() {
                event = event.with_error(error.clone());
            }
            event = event.with_context(context);
        }

        self.core.dispatch(&event)
    }

    /// Log with a numeric level code; unknown codes fail before filtering
    #[track_caller]
    pub fn log_code(&self, code: u16, template: &str, context: LogContext) -> Result<()> {
        let level = LogLevel::from_code(code)?;
        self.log(level, template, context)
    }

    #[track_caller]
    pub fn debug(&self, template: &str, context: LogContext) -> Result<()> {
        self.log(LogLevel::Debug, template, context)
    }

    #[track_caller]
    pub fn info(&self, template: &str, context: LogContext) -> Result<()> {
        self.log(LogLevel::Info, template, context)
    }

    #[track_caller]
    pub fn notice(&self, template: &str, context: LogContext) -> Result<()> {
        self.log(LogLevel::Notice, template, context)
    }

    #[track_caller]
    pub fn warning(&self, template: &str, context: LogContext) -> Result<()> {
        self.log(LogLevel::Warning, template, context)
    }

    #[track_caller]
    pub fn error(&self, template: &str, context: LogContext) -> Result<()> {
        self.log(LogLevel::Error, template, context)
    }

    #[track_caller]
    pub fn critical(&self, template: &str, context: LogContext) -> Result<()> {
        self.log(LogLevel::Critical, template, context)
    }

    #[track_caller]
    pub fn alert(&self, template: &str, context: LogContext) -> Result<()> {
        self.log(LogLevel::Alert, template, context)
    }

    #[track_caller]
    pub fn emergency(&self, template: &str, context: LogContext) -> Result<()> {
        self.log(LogLevel::Emergency, template, context)
    }
}
