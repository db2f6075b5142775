//! # Hierarchical Logger
//!
//! A structured logging library whose configuration is resolved per
//! component identity by longest-prefix matching.
//!
//! ## Features
//!
//! - **Hierarchical configuration**: one flat rule list; the most specific
//!   prefix of an identity decides its threshold and writers
//! - **Two calling conventions**: positional arguments ([`Logger`]) and
//!   `{key}` templates filled from a context ([`TemplateLogger`])
//! - **Attached errors**: full cause chains rendered by every formatter
//! - **Text, JSON and XML output** through file, console or custom writers
//! - **`log` facade bridge** (feature `bridge`)
//!
//! ## Example
//!
//! ```
//! use hierarchical_logger::prelude::*;
//!
//! let manager = LoggerManager::new();
//! manager.configure_json(r#"[
//!     {"prefix": "App", "threshold": "warning", "writers": []},
//!     {"prefix": "App\\Service", "threshold": "debug", "writers": []}
//! ]"#)?;
//!
//! let logger = manager.logger("App\\Service\\Billing")?;
//! assert!(logger.is_debug_enabled());
//! assert!(!manager.logger("Unrelated\\Module")?.is_emergency_enabled());
//! # Ok::<(), LoggerError>(())
//! ```

#[cfg(feature = "bridge")]
pub mod bridge;
pub mod core;
pub mod formatters;
pub mod macros;
pub mod writers;

pub mod prelude {
    pub use crate::core::{
        CallSite, ConfigResolver, ConfigurationRule, Detail, ErrorInfo, FieldValue, Formatter,
        LogArgs, LogContext, LogEvent, LogLevel, Logger, LoggerError, LoggerManager,
        LoggerMetrics, OutputFormat, Result, Subject, TemplateLogger, TimestampFormat, Writer,
        WriterRegistry, WriterSpec,
    };
    pub use crate::writers::MemoryWriter;
}

#[cfg(feature = "bridge")]
pub use bridge::LogBridge;
pub use core::{
    interpolate, CallSite, ConfigResolver, ConfigurationRule, Detail, ErrorInfo, FieldValue,
    Formatter, LogArgs, LogContext, LogEvent, LogLevel, Logger, LoggerCore, LoggerError,
    LoggerManager, LoggerMetrics, OutputFormat, ResolvedConfig, Result, Subject, TemplateLogger,
    TimestampFormat, Writer, WriterFactory, WriterFailure, WriterRegistry, WriterSpec, ERROR_KEY,
};
