//! Error types for the logger system

use std::fmt;

pub type Result<T> = std::result::Result<T, LoggerError>;

/// One writer that failed while an event was being dispatched
#[derive(Debug)]
pub struct WriterFailure {
    pub writer: String,
    pub error: LoggerError,
}

impl fmt::Display for WriterFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.writer, self.error)
    }
}

fn join_failures(failures: &[WriterFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Level code outside the fixed set
    #[error("The given log level [{code}] is not a valid one")]
    InvalidLevel { code: u16 },

    /// Level name that does not match any member
    #[error("The given log level name [{name}] is not a valid one")]
    UnknownLevelName { name: String },

    /// A configuration rule failed validation
    #[error("Malformed configuration for rule #{index} ({rule}): {reason}")]
    MalformedConfiguration {
        index: usize,
        rule: String,
        reason: String,
    },

    /// A writer described by the configuration could not be built
    #[error("Writer setup failed for kind '{kind}': {reason}")]
    WriterSetup { kind: String, reason: String },

    /// The sink was used before its destination was configured
    #[error("Destination not set for the {writer} writer")]
    DestinationNotSet { writer: String },

    /// The sink destination could not be opened
    #[error("Destination '{path}' is unavailable: {source}")]
    DestinationUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File lock error
    #[error("Failed to acquire file lock on '{path}'")]
    FileLockError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Formatter error with format type
    #[error("Formatter error ({format_type}): {message}")]
    FormatterError {
        format_type: String,
        message: String,
    },

    /// One or more writers failed while the others still received the event
    #[error(
        "{failed} of {total} writers failed for '{component}': {}",
        join_failures(.failures)
    )]
    Dispatch {
        component: String,
        failed: usize,
        total: usize,
        failures: Vec<WriterFailure>,
    },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an invalid level error
    pub fn invalid_level(code: u16) -> Self {
        LoggerError::InvalidLevel { code }
    }

    /// Create a malformed configuration error for the rule at `index`
    pub fn malformed(index: usize, rule: impl Into<String>, reason: impl Into<String>) -> Self {
        LoggerError::MalformedConfiguration {
            index,
            rule: rule.into(),
            reason: reason.into(),
        }
    }

    /// Create a writer setup error
    pub fn writer_setup(kind: impl Into<String>, reason: impl Into<String>) -> Self {
        LoggerError::WriterSetup {
            kind: kind.into(),
            reason: reason.into(),
        }
    }

    /// Create a destination-not-set error
    pub fn destination_not_set(writer: impl Into<String>) -> Self {
        LoggerError::DestinationNotSet {
            writer: writer.into(),
        }
    }

    /// Create a destination-unavailable error
    pub fn destination_unavailable(path: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::DestinationUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Create a file lock error
    pub fn file_lock(path: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::FileLockError {
            path: path.into(),
            source,
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a formatter error
    pub fn formatter(format_type: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FormatterError {
            format_type: format_type.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// Whether this error came from configuration (load or logger creation)
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LoggerError::MalformedConfiguration { .. } | LoggerError::WriterSetup { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::invalid_level(42);
        assert!(matches!(err, LoggerError::InvalidLevel { code: 42 }));

        let err = LoggerError::malformed(2, "{}", "missing prefix");
        assert!(err.is_configuration());

        let err = LoggerError::destination_not_set("file");
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::invalid_level(150);
        assert_eq!(
            err.to_string(),
            "The given log level [150] is not a valid one"
        );

        let err = LoggerError::writer_setup("syslog", "unknown writer kind");
        assert_eq!(
            err.to_string(),
            "Writer setup failed for kind 'syslog': unknown writer kind"
        );

        let err = LoggerError::formatter("JSON", "Invalid field type");
        assert_eq!(
            err.to_string(),
            "Formatter error (JSON): Invalid field type"
        );
    }

    #[test]
    fn test_dispatch_error_lists_failures() {
        let err = LoggerError::Dispatch {
            component: "App\\Service".to_string(),
            failed: 2,
            total: 3,
            failures: vec![
                WriterFailure {
                    writer: "file".to_string(),
                    error: LoggerError::destination_not_set("file"),
                },
                WriterFailure {
                    writer: "memory".to_string(),
                    error: LoggerError::other("boom"),
                },
            ],
        };

        let text = err.to_string();
        assert!(text.starts_with("2 of 3 writers failed for 'App\\Service'"));
        assert!(text.contains("file: Destination not set for the file writer"));
        assert!(text.contains("memory: boom"));
    }

    #[test]
    fn test_destination_unavailable_keeps_source() {
        use std::error::Error as _;

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::destination_unavailable("/var/log/app.log", io_err);

        assert!(err.to_string().contains("/var/log/app.log"));
        assert!(err.source().is_some());
    }
}
