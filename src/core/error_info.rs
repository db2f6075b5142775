//! Errors attached to log events
//!
//! An attached error is stored as plain data: a type tag, a message, the place
//! it was captured, an optional backtrace and the chain of causes behind it.
//! Formatters render it without needing the original error value.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;
use std::panic::Location;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    class: String,
    message: String,
    file: Option<String>,
    line: Option<u32>,
    trace: Option<String>,
    cause: Option<Box<ErrorInfo>>,
}

impl ErrorInfo {
    pub fn new(class: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            message: message.into(),
            file: None,
            line: None,
            trace: None,
            cause: None,
        }
    }

    /// Capture a Rust error together with its `source()` chain
    ///
    /// The location recorded for the top-level error is the caller of this
    /// function. Causes reached through `source()` carry no location.
    #[track_caller]
    pub fn capture<E>(err: &E) -> Self
    where
        E: Error + 'static,
    {
        let caller = Location::caller();
        let mut info = Self::new(std::any::type_name::<E>(), err.to_string())
            .with_location(caller.file(), caller.line());

        let backtrace = Backtrace::capture();
        if backtrace.status() == BacktraceStatus::Captured {
            info.trace = Some(backtrace.to_string());
        }

        info.cause = err.source().map(|source| Box::new(Self::from_dyn(source)));
        info
    }

    /// Build from a type-erased error, walking its `source()` chain
    pub fn from_dyn(err: &(dyn Error + 'static)) -> Self {
        let mut info = Self::new(class_of(err), err.to_string());
        info.cause = err.source().map(|source| Box::new(Self::from_dyn(source)));
        info
    }

    #[must_use]
    pub fn with_location(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    #[must_use]
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    /// Append `cause` at the end of the chain
    #[must_use]
    pub fn with_cause(mut self, cause: ErrorInfo) -> Self {
        self.push_cause(cause);
        self
    }

    fn push_cause(&mut self, cause: ErrorInfo) {
        match self.cause {
            Some(ref mut next) => next.push_cause(cause),
            None => self.cause = Some(Box::new(cause)),
        }
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn line(&self) -> Option<u32> {
        self.line
    }

    pub fn trace(&self) -> Option<&str> {
        self.trace.as_deref()
    }

    pub fn cause(&self) -> Option<&ErrorInfo> {
        self.cause.as_deref()
    }

    /// This error followed by each of its causes, oldest last
    pub fn chain(&self) -> impl Iterator<Item = &ErrorInfo> {
        std::iter::successors(Some(self), |info| info.cause())
    }

    /// Convert to a JSON object, nesting causes under `cause`
    pub fn to_json_value(&self) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        obj.insert("class".to_string(), self.class.clone().into());
        obj.insert("message".to_string(), self.message.clone().into());
        obj.insert(
            "file".to_string(),
            self.file.clone().map_or(serde_json::Value::Null, Into::into),
        );
        obj.insert(
            "line".to_string(),
            self.line.map_or(serde_json::Value::Null, Into::into),
        );
        obj.insert(
            "trace".to_string(),
            self.trace.clone().map_or(serde_json::Value::Null, Into::into),
        );
        if let Some(cause) = self.cause() {
            obj.insert("cause".to_string(), cause.to_json_value());
        }
        serde_json::Value::Object(obj)
    }
}

impl<E> From<E> for ErrorInfo
where
    E: Error + 'static,
{
    #[track_caller]
    fn from(err: E) -> Self {
        Self::capture(&err)
    }
}

/// Best-effort type tag for a type-erased error: the leading identifier of
/// its `Debug` output (`Custom { .. }` gives `Custom`, `ParseIntError { .. }`
/// gives `ParseIntError`).
fn class_of(err: &(dyn Error + 'static)) -> String {
    let debug = format!("{:?}", err);
    let ident: String = debug
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == ':')
        .collect();
    if ident.is_empty() {
        "Error".to_string()
    } else {
        ident
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Outer {
        inner: Inner,
    }

    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("request failed")
        }
    }

    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("connection reset")
        }
    }

    impl Error for Outer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.inner)
        }
    }

    impl Error for Inner {}

    #[test]
    fn test_capture_walks_source_chain() {
        let err = Outer { inner: Inner };
        let line = line!() + 1;
        let info = ErrorInfo::capture(&err);

        assert!(info.class().ends_with("Outer"));
        assert_eq!(info.message(), "request failed");
        assert_eq!(info.file(), Some(file!()));
        assert_eq!(info.line(), Some(line));

        let cause = info.cause().expect("inner error captured");
        assert_eq!(cause.class(), "Inner");
        assert_eq!(cause.message(), "connection reset");
        assert!(cause.cause().is_none());
    }

    #[test]
    fn test_with_cause_appends_to_end_of_chain() {
        let info = ErrorInfo::new("Top", "top")
            .with_cause(ErrorInfo::new("Middle", "middle"))
            .with_cause(ErrorInfo::new("Root", "root"));

        let classes: Vec<&str> = info.chain().map(ErrorInfo::class).collect();
        assert_eq!(classes, vec!["Top", "Middle", "Root"]);
    }

    #[test]
    fn test_from_std_error() {
        let parse_err = "abc".parse::<i32>().unwrap_err();
        let info: ErrorInfo = parse_err.into();

        assert!(info.class().ends_with("ParseIntError"));
        assert_eq!(info.message(), "invalid digit found in string");
    }

    #[test]
    fn test_json_value_nests_causes() {
        let info = ErrorInfo::new("Top", "top")
            .with_location("src/main.rs", 10)
            .with_cause(ErrorInfo::new("Root", "root"));

        let json = info.to_json_value();
        assert_eq!(json["class"], "Top");
        assert_eq!(json["line"], 10);
        assert_eq!(json["cause"]["class"], "Root");
        assert!(json["cause"].get("cause").is_none());
    }
}
