//! Logging macros for ergonomic log message formatting.
//!
//! The level macros format their arguments like `format!` and pass the result
//! to the positional logger, returning its `Result`. The call site recorded
//! on the event is the macro invocation.
//!
//! # Examples
//!
//! ```
//! use hierarchical_logger::prelude::*;
//! use hierarchical_logger::{info, log_context};
//!
//! let logger = Logger::from_parts("App\\Server", Some(LogLevel::Info), Vec::new());
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port)?;
//!
//! let context = log_context! { "port" => 8080, "tls" => true };
//! logger.info(("Server ready", context))?;
//! # Ok::<(), LoggerError>(())
//! ```

/// Log a formatted message at the given level.
///
/// # Examples
///
/// ```
/// # use hierarchical_logger::prelude::*;
/// # let logger = Logger::disabled("App");
/// use hierarchical_logger::log;
/// log!(logger, LogLevel::Info, "Simple message")?;
/// log!(logger, LogLevel::Error, "Error code: {}", 500)?;
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! notice {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Notice, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// ```
/// # use hierarchical_logger::prelude::*;
/// # let logger = Logger::disabled("App");
/// use hierarchical_logger::warning;
/// warning!(logger, "Retry attempt {} of {}", 3, 5)?;
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}

#[macro_export]
macro_rules! alert {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Alert, $($arg)+)
    };
}

#[macro_export]
macro_rules! emergency {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Emergency, $($arg)+)
    };
}

/// Build a [`LogContext`](crate::LogContext) from `key => value` pairs,
/// keeping their order.
///
/// ```
/// use hierarchical_logger::log_context;
///
/// let context = log_context! { "user" => "alice", "attempt" => 3 };
/// assert_eq!(context.len(), 2);
/// assert!(log_context! {}.is_empty());
/// ```
#[macro_export]
macro_rules! log_context {
    () => {
        $crate::LogContext::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::LogContext::new()$(.with_field($key, $value))+
    };
}
