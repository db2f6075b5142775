//! Log event structure

use super::call_site::CallSite;
use super::error_info::ErrorInfo;
use super::log_context::LogContext;
use super::log_level::LogLevel;
use chrono::{DateTime, SubsecRound, Utc};
use std::sync::Arc;

/// One occurrence of a log call
///
/// Level, timestamp, component and location are fixed at construction. The
/// message, error and context are attached with the consuming `with_*`
/// methods before the event is handed to writers, which only ever see
/// `&LogEvent`.
#[derive(Debug, Clone)]
pub struct LogEvent {
    timestamp: DateTime<Utc>,
    level: LogLevel,
    component: Arc<str>,
    location: CallSite,
    message: Option<String>,
    error: Option<ErrorInfo>,
    context: Option<LogContext>,
}

impl LogEvent {
    /// Create an event stamped now and attributed to the caller
    #[track_caller]
    pub fn create(component: impl Into<Arc<str>>, level: LogLevel) -> Self {
        Self::new(component, level, CallSite::capture())
    }

    pub fn new(component: impl Into<Arc<str>>, level: LogLevel, location: CallSite) -> Self {
        Self {
            timestamp: Utc::now().trunc_subsecs(3),
            level,
            component: component.into(),
            location,
            message: None,
            error: None,
            context: None,
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp.trunc_subsecs(3);
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_error(mut self, error: ErrorInfo) -> Self {
        self.error = Some(error);
        self
    }

    #[must_use]
    pub fn with_context(mut self, context: LogContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn timestamp(&self) -> &DateTime<Utc> {
        &self.timestamp
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn location(&self) -> &CallSite {
        &self.location
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        self.error.as_ref()
    }

    /// The context as supplied; `Some` even when it holds no fields
    pub fn context(&self) -> Option<&LogContext> {
        self.context.as_ref()
    }

    pub fn has_message(&self) -> bool {
        self.message.is_some()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// True only for a context with at least one field
    pub fn has_context(&self) -> bool {
        self.context.as_ref().is_some_and(|c| !c.is_empty())
    }
}
