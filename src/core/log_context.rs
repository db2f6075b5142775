//! Structured logging context for key-value fields
//!
//! `LogContext` keeps its entries in insertion order so that every formatter
//! renders them in the order the caller supplied.

use super::error_info::ErrorInfo;
use std::fmt;

/// Key under which a template context may carry an attached error
pub const ERROR_KEY: &str = "exception";

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    List(Vec<FieldValue>),
    Map(LogContext),
    Error(ErrorInfo),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
            FieldValue::List(_) | FieldValue::Map(_) => {
                let json = serde_json::to_string_pretty(&self.to_json_value())
                    .map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
            FieldValue::Error(info) => write!(f, "{:#?}", info),
        }
    }
}

impl FieldValue {
    /// Render for output: scalars as their string form, structures as their
    /// full export representation
    pub fn render(&self) -> String {
        self.to_string()
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(
            self,
            FieldValue::List(_) | FieldValue::Map(_) | FieldValue::Error(_)
        )
    }

    pub fn as_error(&self) -> Option<&ErrorInfo> {
        match self {
            FieldValue::Error(info) => Some(info),
            _ => None,
        }
    }

    /// Convert to serde_json::Value for JSON serialization
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Null => serde_json::Value::Null,
            FieldValue::List(items) => {
                serde_json::Value::Array(items.iter().map(FieldValue::to_json_value).collect())
            }
            FieldValue::Map(context) => context.to_json_value(),
            FieldValue::Error(info) => info.to_json_value(),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<ErrorInfo> for FieldValue {
    fn from(info: ErrorInfo) -> Self {
        FieldValue::Error(info)
    }
}

impl From<LogContext> for FieldValue {
    fn from(context: LogContext) -> Self {
        FieldValue::Map(context)
    }
}

impl<V: Into<FieldValue>> From<Vec<V>> for FieldValue {
    fn from(items: Vec<V>) -> Self {
        FieldValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<FieldValue>> From<Option<V>> for FieldValue {
    fn from(value: Option<V>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// Context for structured logging with key-value fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogContext {
    fields: Vec<(String, FieldValue)>,
}

impl LogContext {
    /// Create a new empty log context
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a field to the context
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.add_field(key, value);
        self
    }

    /// Add a field to the context (mutable version)
    ///
    /// An existing key keeps its position and takes the new value.
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if context has any fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The error stored under [`ERROR_KEY`], if any
    pub fn error(&self) -> Option<&ErrorInfo> {
        self.get(ERROR_KEY).and_then(FieldValue::as_error)
    }

    /// Format fields as key=value pairs
    pub fn format_fields(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        for (key, value) in self.iter() {
            obj.insert(key.to_string(), value.to_json_value());
        }
        serde_json::Value::Object(obj)
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}

impl<K, V> FromIterator<(K, V)> for LogContext
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = LogContext::new();
        for (key, value) in iter {
            context.add_field(key, value);
        }
        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_context_creation() {
        let ctx = LogContext::new();
        assert!(ctx.is_empty());
    }

    #[test]
    fn test_log_context_keeps_insertion_order() {
        let ctx = LogContext::new()
            .with_field("zeta", 1)
            .with_field("alpha", 2)
            .with_field("mid", 3);

        let keys: Vec<&str> = ctx.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_add_field_replaces_in_place() {
        let ctx = LogContext::new()
            .with_field("a", 1)
            .with_field("b", 2)
            .with_field("a", "one");

        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.iter().next().unwrap().0, "a");
        assert_eq!(ctx.get("a"), Some(&FieldValue::String("one".to_string())));
    }

    #[test]
    fn test_log_context_format() {
        let ctx = LogContext::new()
            .with_field("key1", "value1")
            .with_field("key2", 42);

        assert_eq!(ctx.format_fields(), "key1=value1 key2=42");
    }

    #[test]
    fn test_scalar_rendering() {
        assert_eq!(FieldValue::from(42).render(), "42");
        assert_eq!(FieldValue::from("login").render(), "login");
        assert_eq!(FieldValue::from(true).render(), "true");
        assert_eq!(FieldValue::Null.render(), "null");
        assert_eq!(FieldValue::from(1.5).render(), "1.5");
    }

    #[test]
    fn test_structured_rendering_is_full_export() {
        let value = FieldValue::from(vec![1, 2]);
        assert_eq!(value.render(), "[\n  1,\n  2\n]");

        let nested = FieldValue::from(LogContext::new().with_field("id", 7));
        assert_eq!(nested.render(), "{\n  \"id\": 7\n}");
        assert!(!nested.is_scalar());
    }

    #[test]
    fn test_error_lookup() {
        let ctx = LogContext::new()
            .with_field("user", "alice")
            .with_field(ERROR_KEY, ErrorInfo::new("Timeout", "took too long"));

        assert_eq!(ctx.error().map(ErrorInfo::class), Some("Timeout"));
        assert!(LogContext::new().with_field(ERROR_KEY, "text").error().is_none());
    }

    #[test]
    fn test_collect_from_pairs() {
        let ctx: LogContext = vec![("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.to_json_value()["b"], 2);
    }
}
