//! Core logger types and traits

pub mod call_site;
pub mod config;
pub mod error;
pub mod error_info;
pub mod formatter;
pub mod log_context;
pub mod log_event;
pub mod log_level;
pub mod logger;
pub mod manager;
pub mod metrics;
pub mod template_logger;
pub mod timestamp;
pub mod writer;

pub use call_site::CallSite;
pub use config::{ConfigResolver, ConfigurationRule, ResolvedConfig};
pub use error::{LoggerError, Result, WriterFailure};
pub use error_info::ErrorInfo;
pub use formatter::{Formatter, OutputFormat};
pub use log_context::{FieldValue, LogContext, ERROR_KEY};
pub use log_event::LogEvent;
pub use log_level::LogLevel;
pub use logger::{Detail, LogArgs, Logger, LoggerCore, Subject};
pub use manager::LoggerManager;
pub use metrics::LoggerMetrics;
pub use template_logger::{interpolate, TemplateLogger};
pub use timestamp::TimestampFormat;
pub use writer::{Writer, WriterFactory, WriterRegistry, WriterSpec};
