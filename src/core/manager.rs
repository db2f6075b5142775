//! Logger manager
//!
//! Ties the configuration resolver and the writer registry together and
//! caches one pipeline per component identity that matched a rule.
//! Identities with no matching rule get a fresh disabled pipeline on each
//! call, so arbitrary names (such as `log` facade targets) never grow the
//! cache. Reconfiguring replaces the rule set and empties the cache; handles
//! obtained earlier keep the configuration they were built with.

use super::config::{ConfigResolver, ConfigurationRule};
use super::error::Result;
use super::logger::{Logger, LoggerCore};
use super::template_logger::TemplateLogger;
use super::writer::{Writer, WriterRegistry, WriterSpec};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

static GLOBAL_MANAGER: OnceCell<LoggerManager> = OnceCell::new();

#[derive(Debug)]
pub struct LoggerManager {
    resolver: ConfigResolver,
    registry: RwLock<WriterRegistry>,
    cores: RwLock<HashMap<String, Arc<LoggerCore>>>,
}

impl LoggerManager {
    /// A manager with no rules and the built-in writers
    pub fn new() -> Self {
        Self::with_registry(WriterRegistry::with_builtins())
    }

    pub fn with_registry(registry: WriterRegistry) -> Self {
        Self {
            resolver: ConfigResolver::new(),
            registry: RwLock::new(registry),
            cores: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide manager, created empty on first use
    ///
    /// Configuration is replace-only: `configure*` swaps the whole rule set.
    pub fn global() -> &'static LoggerManager {
        GLOBAL_MANAGER.get_or_init(LoggerManager::new)
    }

    pub fn configure(&self, rules: Vec<ConfigurationRule>) -> Result<()> {
        let mut cores = self.cores.write();
        self.resolver.load(rules)?;
        cores.clear();
        Ok(())
    }

    pub fn configure_value(&self, value: &serde_json::Value) -> Result<()> {
        let mut cores = self.cores.write();
        self.resolver.load_value(value)?;
        cores.clear();
        Ok(())
    }

    pub fn configure_json(&self, json: &str) -> Result<()> {
        let mut cores = self.cores.write();
        self.resolver.load_json(json)?;
        cores.clear();
        Ok(())
    }

    /// Register a writer factory; cached pipelines are rebuilt on next use
    pub fn register_writer<F>(&self, kind: impl Into<String>, factory: F)
    where
        F: Fn(&WriterSpec) -> Result<Box<dyn Writer>> + Send + Sync + 'static,
    {
        let mut cores = self.cores.write();
        self.registry.write().register(kind, factory);
        cores.clear();
    }

    pub fn resolver(&self) -> &ConfigResolver {
        &self.resolver
    }

    pub fn logger(&self, component: &str) -> Result<Logger> {
        Ok(Logger::from_core(self.core(component)?))
    }

    pub fn template_logger(&self, component: &str) -> Result<TemplateLogger> {
        Ok(TemplateLogger::from_core(self.core(component)?))
    }

    /// Number of cached pipelines
    pub fn cached(&self) -> usize {
        self.cores.read().len()
    }

    /// Flush the writers of every cached pipeline
    ///
    /// All pipelines are flushed; the first error is returned afterwards.
    pub fn flush(&self) -> Result<()> {
        let cores: Vec<Arc<LoggerCore>> = self.cores.read().values().cloned().collect();
        let mut first_error = None;
        for core in cores {
            if let Err(e) = core.flush() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn core(&self, component: &str) -> Result<Arc<LoggerCore>> {
        if let Some(core) = self.cores.read().get(component) {
            return Ok(Arc::clone(core));
        }

        let mut cores = self.cores.write();
        if let Some(core) = cores.get(component) {
            return Ok(Arc::clone(core));
        }

        let core = Arc::new(LoggerCore::resolve(
            component,
            &self.resolver,
            &self.registry.read(),
        )?);
        if core.threshold().is_some() {
            cores.insert(component.to_string(), Arc::clone(&core));
        }
        Ok(core)
    }
}

impl Default for LoggerManager {
    fn default() -> Self {
        Self::new()
    }
}
