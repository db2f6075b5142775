//! Writer trait, writer specifications and the writer factory registry

use super::error::{LoggerError, Result};
use super::formatter::{Formatter, OutputFormat};
use super::log_event::LogEvent;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// A destination for rendered events
///
/// Each writer owns exactly one formatter and renders every event through it.
/// Implementations take `&self` so a logger can share them across threads;
/// sinks that need mutation lock internally.
pub trait Writer: Send + Sync {
    fn process_event(&self, event: &LogEvent) -> Result<()>;
    fn formatter(&self) -> &dyn Formatter;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

/// Declarative description of one writer inside a configuration rule
///
/// Deserializes from a bare kind string (`"console"`) or from an object:
///
/// ```
/// use hierarchical_logger::{OutputFormat, WriterSpec};
///
/// let spec: WriterSpec = serde_json::from_str(
///     r#"{"kind": "file", "format": "json", "options": {"path": "app.log"}}"#,
/// ).unwrap();
/// assert_eq!(spec.kind, "file");
/// assert_eq!(spec.format, Some(OutputFormat::Json));
/// assert_eq!(spec.option("path"), Some("app.log"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriterSpec {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
}

impl WriterSpec {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            format: None,
            options: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    /// The configured format, text when none was given
    pub fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}

impl From<&str> for WriterSpec {
    fn from(kind: &str) -> Self {
        Self::new(kind)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawWriterSpec {
    Kind(String),
    Full {
        kind: String,
        #[serde(default)]
        format: Option<OutputFormat>,
        #[serde(default)]
        options: BTreeMap<String, String>,
    },
}

impl<'de> Deserialize<'de> for WriterSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(match RawWriterSpec::deserialize(deserializer)? {
            RawWriterSpec::Kind(kind) => WriterSpec::new(kind),
            RawWriterSpec::Full {
                kind,
                format,
                options,
            } => WriterSpec {
                kind,
                format,
                options,
            },
        })
    }
}

/// Builds a writer from its specification
pub type WriterFactory = Arc<dyn Fn(&WriterSpec) -> Result<Box<dyn Writer>> + Send + Sync>;

/// Writer factories keyed by kind
#[derive(Clone, Default)]
pub struct WriterRegistry {
    factories: HashMap<String, WriterFactory>,
}

impl WriterRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the writers compiled into this build
    ///
    /// - `file` (feature `file`): option `path`, optional until the first write
    /// - `console` (feature `console`): option `colors` (`true`/`false`)
    pub fn with_builtins() -> Self {
        #[allow(unused_mut)]
        let mut registry = Self::new();

        #[cfg(feature = "file")]
        registry.register("file", |spec: &WriterSpec| {
            let mut writer =
                crate::writers::FileWriter::new().with_output_format(spec.output_format());
            if let Some(path) = spec.option("path") {
                writer = writer.with_path(path);
            }
            Ok(Box::new(writer) as Box<dyn Writer>)
        });

        #[cfg(feature = "console")]
        registry.register("console", |spec: &WriterSpec| {
            let colors = match spec.option("colors") {
                None => true,
                Some(value) => value.parse::<bool>().map_err(|_| {
                    LoggerError::writer_setup(
                        &spec.kind,
                        format!("option 'colors' must be true or false, got '{}'", value),
                    )
                })?,
            };
            let writer = crate::writers::ConsoleWriter::with_colors(colors)
                .with_output_format(spec.output_format());
            Ok(Box::new(writer) as Box<dyn Writer>)
        });

        registry
    }

    /// Register a factory, replacing any previous factory of the same kind
    pub fn register<F>(&mut self, kind: impl Into<String>, factory: F)
    where
        F: Fn(&WriterSpec) -> Result<Box<dyn Writer>> + Send + Sync + 'static,
    {
        self.factories.insert(kind.into(), Arc::new(factory));
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Build one writer; unknown kinds and factory failures become `WriterSetup`
    pub fn build(&self, spec: &WriterSpec) -> Result<Box<dyn Writer>> {
        let factory = self
            .factories
            .get(&spec.kind)
            .ok_or_else(|| LoggerError::writer_setup(&spec.kind, "unknown writer kind"))?;

        factory(spec).map_err(|e| match e {
            LoggerError::WriterSetup { .. } => e,
            other => LoggerError::writer_setup(&spec.kind, other.to_string()),
        })
    }
}

impl fmt::Debug for WriterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}
