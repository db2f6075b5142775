//! Logger implementation
//!
//! [`LoggerCore`] is the pipeline shared by both calling conventions: it holds
//! the component identity, the resolved threshold and the writers, and fans a
//! finished event out to every writer. [`Logger`] is the positional
//! convention on top of it; [`TemplateLogger`](super::TemplateLogger) is the
//! template convention.

use super::config::ConfigResolver;
use super::error::{LoggerError, Result, WriterFailure};
use super::error_info::ErrorInfo;
use super::log_context::LogContext;
use super::log_event::LogEvent;
use super::log_level::LogLevel;
use super::metrics::LoggerMetrics;
use super::writer::{Writer, WriterRegistry};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Threshold, writers and counters bound to one component identity
pub struct LoggerCore {
    component: Arc<str>,
    target: Option<String>,
    threshold: Option<LogLevel>,
    writers: Vec<Box<dyn Writer>>,
    metrics: LoggerMetrics,
}

impl LoggerCore {
    pub fn new(
        component: impl Into<Arc<str>>,
        threshold: Option<LogLevel>,
        writers: Vec<Box<dyn Writer>>,
    ) -> Self {
        Self {
            component: component.into(),
            target: None,
            threshold,
            writers,
            metrics: LoggerMetrics::new(),
        }
    }

    /// Resolve `component` and build the writers of the matching rule
    ///
    /// No matching rule yields a disabled core. Any writer that cannot be
    /// built fails the whole construction.
    pub fn resolve(
        component: &str,
        resolver: &ConfigResolver,
        registry: &WriterRegistry,
    ) -> Result<Self> {
        let Some(resolved) = resolver.resolve(component) else {
            return Ok(Self::new(component, None, Vec::new()));
        };

        let writers = resolved
            .rule
            .writers
            .iter()
            .map(|spec| registry.build(spec))
            .collect::<Result<Vec<_>>>()?;

        let mut core = Self::new(component, Some(resolved.rule.threshold), writers);
        core.target = Some(resolved.rule.prefix);
        Ok(core)
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    /// Prefix of the rule this core was resolved from
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn threshold(&self) -> Option<LogLevel> {
        self.threshold
    }

    pub fn writers(&self) -> &[Box<dyn Writer>] {
        &self.writers
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    #[inline]
    pub fn is_enabled_for(&self, level: LogLevel) -> bool {
        self.threshold
            .is_some_and(|threshold| level.code() >= threshold.code())
    }

    /// Check the threshold, counting the call as suppressed when it fails
    #[inline]
    pub(crate) fn admit(&self, level: LogLevel) -> bool {
        let enabled = self.is_enabled_for(level);
        if !enabled {
            self.metrics.record_suppressed();
        }
        enabled
    }

    /// Start an event for this component attributed to the caller
    #[track_caller]
    pub(crate) fn start_event(&self, level: LogLevel) -> LogEvent {
        LogEvent::create(Arc::clone(&self.component), level)
    }

    /// Hand `event` to every writer in order
    ///
    /// A failing (or panicking) writer does not stop the writers after it.
    /// Once all writers ran, any failures are returned together.
    pub fn dispatch(&self, event: &LogEvent) -> Result<()> {
        self.metrics.record_dispatched();

        let mut failures = Vec::new();
        for writer in &self.writers {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| writer.process_event(event)));
            let error = match outcome {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => e,
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    LoggerError::other(format!("writer panicked: {}", panic_msg))
                }
            };

            self.metrics.record_writer_failure();
            failures.push(WriterFailure {
                writer: writer.name().to_string(),
                error,
            });
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(LoggerError::Dispatch {
                component: self.component.to_string(),
                failed: failures.len(),
                total: self.writers.len(),
                failures,
            })
        }
    }

    /// Dispatch a prebuilt event if its level passes the threshold
    pub fn log_event(&self, event: LogEvent) -> Result<()> {
        if !self.admit(event.level()) {
            return Ok(());
        }
        self.dispatch(&event)
    }

    /// Flush every writer; the first error is returned after all were flushed
    pub fn flush(&self) -> Result<()> {
        let mut first_error = None;
        for writer in &self.writers {
            if let Err(e) = writer.flush() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl fmt::Debug for LoggerCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerCore")
            .field("component", &self.component)
            .field("target", &self.target)
            .field("threshold", &self.threshold)
            .field(
                "writers",
                &self.writers.iter().map(|w| w.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// First argument of a positional call: a message or an error
#[derive(Debug, Clone)]
pub enum Subject {
    Message(String),
    Error(ErrorInfo),
}

impl From<&str> for Subject {
    fn from(message: &str) -> Self {
        Subject::Message(message.to_string())
    }
}

impl From<String> for Subject {
    fn from(message: String) -> Self {
        Subject::Message(message)
    }
}

impl From<ErrorInfo> for Subject {
    fn from(error: ErrorInfo) -> Self {
        Subject::Error(error)
    }
}

/// Second argument of a positional call: a context or an error
#[derive(Debug, Clone)]
pub enum Detail {
    Context(LogContext),
    Error(ErrorInfo),
}

impl From<LogContext> for Detail {
    fn from(context: LogContext) -> Self {
        Detail::Context(context)
    }
}

impl From<ErrorInfo> for Detail {
    fn from(error: ErrorInfo) -> Self {
        Detail::Error(error)
    }
}

/// Arguments of a positional call
///
/// ```
/// use hierarchical_logger::{ErrorInfo, LogArgs, LogContext};
///
/// let _: LogArgs = "started".into();
/// let _: LogArgs = ("retrying", LogContext::new().with_field("attempt", 2)).into();
/// let _: LogArgs = ("gave up", ErrorInfo::new("Timeout", "5s elapsed")).into();
/// let _: LogArgs = (
///     ErrorInfo::new("Timeout", "5s elapsed"),
///     LogContext::new(),
///     LogContext::new().with_field("host", "db1"),
/// )
///     .into();
/// ```
#[derive(Debug, Clone)]
pub struct LogArgs {
    pub subject: Subject,
    pub detail: Option<Detail>,
    pub context: Option<LogContext>,
}

impl LogArgs {
    pub fn new(subject: impl Into<Subject>) -> Self {
        Self {
            subject: subject.into(),
            detail: None,
            context: None,
        }
    }

    /// Populate `event`
    ///
    /// The detail context is attached even when empty; the trailing context
    /// only when it holds fields, replacing any detail context.
    pub fn apply(self, event: LogEvent) -> LogEvent {
        let mut event = match self.subject {
            Subject::Message(message) => event.with_message(message),
            Subject::Error(error) => event.with_error(error),
        };

        event = match self.detail {
            Some(Detail::Context(context)) => event.with_context(context),
            Some(Detail::Error(error)) => event.with_error(error),
            None => event,
        };

        match self.context {
            Some(context) if !context.is_empty() => event.with_context(context),
            _ => event,
        }
    }
}

impl From<&str> for LogArgs {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for LogArgs {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<ErrorInfo> for LogArgs {
    fn from(error: ErrorInfo) -> Self {
        Self::new(error)
    }
}

impl<S, D> From<(S, D)> for LogArgs
where
    S: Into<Subject>,
    D: Into<Detail>,
{
    fn from((subject, detail): (S, D)) -> Self {
        Self {
            subject: subject.into(),
            detail: Some(detail.into()),
            context: None,
        }
    }
}

impl<S, D> From<(S, D, LogContext)> for LogArgs
where
    S: Into<Subject>,
    D: Into<Detail>,
{
    fn from((subject, detail, context): (S, D, LogContext)) -> Self {
        Self {
            subject: subject.into(),
            detail: Some(detail.into()),
            context: Some(context),
        }
    }
}

/// Positional-convention logger
///
/// Cheap to clone; clones share the same core. Every emission method returns
/// `Ok(())` without building an event when the level is below the threshold,
/// and records the caller's location otherwise.
///
/// # Example
///
/// ```
/// use hierarchical_logger::{ConfigResolver, ConfigurationRule, Logger, LogLevel, WriterRegistry};
///
/// let resolver = ConfigResolver::with_rules(vec![ConfigurationRule::new("App", LogLevel::Info)])?;
/// let logger = Logger::create("App\\Service", &resolver, &WriterRegistry::with_builtins())?;
///
/// assert!(logger.is_info_enabled());
/// assert!(!logger.is_debug_enabled());
/// logger.info("Application started")?;
/// # Ok::<(), hierarchical_logger::LoggerError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Logger {
    core: Arc<LoggerCore>,
}

impl Logger {
    /// Resolve `component` against `resolver` and build its writers
    pub fn create(
        component: &str,
        resolver: &ConfigResolver,
        registry: &WriterRegistry,
    ) -> Result<Self> {
        Ok(Self::from_core(Arc::new(LoggerCore::resolve(
            component, resolver, registry,
        )?)))
    }

    /// A logger that never emits
    pub fn disabled(component: impl Into<Arc<str>>) -> Self {
        Self::from_parts(component, None, Vec::new())
    }

    /// A logger with an explicit threshold and writers
    pub fn from_parts(
        component: impl Into<Arc<str>>,
        threshold: Option<LogLevel>,
        writers: Vec<Box<dyn Writer>>,
    ) -> Self {
        Self::from_core(Arc::new(LoggerCore::new(component, threshold, writers)))
    }

    pub fn from_core(core: Arc<LoggerCore>) -> Self {
        Self { core }
    }

    pub fn core(&self) -> &Arc<LoggerCore> {
        &self.core
    }

    pub fn component(&self) -> &str {
        self.core.component()
    }

    pub fn target(&self) -> Option<&str> {
        self.core.target()
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

    #[inline]
    pub fn is_enabled_for(&self, level: LogLevel) -> bool {
        self.core.is_enabled_for(level)
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.is_enabled_for(LogLevel::Debug)
    }

    pub fn is_info_enabled(&self) -> bool {
        self.is_enabled_for(LogLevel::Info)
    }

    pub fn is_notice_enabled(&self) -> bool {
        self.is_enabled_for(LogLevel::Notice)
    }

    pub fn is_warning_enabled(&self) -> bool {
        self.is_enabled_for(LogLevel::Warning)
    }

    pub fn is_error_enabled(&self) -> bool {
        self.is_enabled_for(LogLevel::Error)
    }

    pub fn is_critical_enabled(&self) -> bool {
        self.is_enabled_for(LogLevel::Critical)
    }

    pub fn is_alert_enabled(&self) -> bool {
        self.is_enabled_for(LogLevel::Alert)
    }

    pub fn is_emergency_enabled(&self) -> bool {
        self.is_enabled_for(LogLevel::Emergency)
    }

    #[track_caller]
    pub fn log<A: Into<LogArgs>>(&self, level: LogLevel, args: A) -> Result<()> {
        if !self.core.admit(level) {
            return Ok(());
        }
        let event = args.into().apply(self.core.start_event(level));
        self.core.dispatch(&event)
    }

    /// Log with a numeric level code; unknown codes fail before filtering
    #[track_caller]
    pub fn log_code<A: Into<LogArgs>>(&self, code: u16, args: A) -> Result<()> {
        let level = LogLevel::from_code(code)?;
        self.log(level, args)
    }

    /// Dispatch a prebuilt event, still subject to the threshold
    pub fn log_event(&self, event: LogEvent) -> Result<()> {
        self.core.log_event(event)
    }

    #[track_caller]
    pub fn debug<A: Into<LogArgs>>(&self, args: A) -> Result<()> {
        self.log(LogLevel::Debug, args)
    }

    #[track_caller]
    pub fn info<A: Into<LogArgs>>(&self, args: A) -> Result<()> {
        self.log(LogLevel::Info, args)
    }

    #[track_caller]
    pub fn notice<A: Into<LogArgs>>(&self, args: A) -> Result<()> {
        self.log(LogLevel::Notice, args)
    }

    #[track_caller]
    pub fn warning<A: Into<LogArgs>>(&self, args: A) -> Result<()> {
        self.log(LogLevel::Warning, args)
    }

    #[track_caller]
    pub fn error<A: Into<LogArgs>>(&self, args: A) -> Result<()> {
        self.log(LogLevel::Error, args)
    }

    #[track_caller]
    pub fn critical<A: Into<LogArgs>>(&self, args: A) -> Result<()> {
        self.log(LogLevel::Critical, args)
    }

    #[track_caller]
    pub fn alert<A: Into<LogArgs>>(&self, args: A) -> Result<()> {
        self.log(LogLevel::Alert, args)
    }

    #[track_caller]
    pub fn emergency<A: Into<LogArgs>>(&self, args: A) -> Result<()> {
        self.log(LogLevel::Emergency, args)
    }
}
