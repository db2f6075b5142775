//! Hierarchical configuration resolution
//!
//! Rules are a flat, ordered list. A component identity is governed by the
//! rule whose prefix is the longest byte-wise, case-sensitive prefix of the
//! identity; among prefixes of equal length the earliest rule wins. An
//! identity matched by no rule has logging disabled.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::writer::WriterSpec;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One entry of the configuration list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationRule {
    #[serde(alias = "class")]
    pub prefix: String,
    #[serde(alias = "level")]
    pub threshold: LogLevel,
    pub writers: Vec<WriterSpec>,
}

impl ConfigurationRule {
    pub fn new(prefix: impl Into<String>, threshold: LogLevel) -> Self {
        Self {
            prefix: prefix.into(),
            threshold,
            writers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_writer(mut self, writer: impl Into<WriterSpec>) -> Self {
        self.writers.push(writer.into());
        self
    }

    /// Whether this rule governs `component`
    pub fn matches(&self, component: &str) -> bool {
        component.starts_with(self.prefix.as_str())
    }
}

/// The rule chosen for an identity and the length of its matched prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub rule: ConfigurationRule,
    pub specificity: usize,
}

/// Pick the most specific rule for `component`
///
/// Only a strictly longer prefix replaces the current best, so ties go to
/// the rule that appears first.
pub fn best_match<'a>(
    rules: &'a [ConfigurationRule],
    component: &str,
) -> Option<&'a ConfigurationRule> {
    let mut best: Option<&ConfigurationRule> = None;
    for rule in rules.iter().filter(|rule| rule.matches(component)) {
        match best {
            Some(current) if rule.prefix.len() <= current.prefix.len() => {}
            _ => best = Some(rule),
        }
    }
    best
}

/// Holds the active rule set
///
/// Loading replaces the whole set at once; readers clone an `Arc` snapshot
/// and never observe a partially loaded configuration.
#[derive(Debug)]
pub struct ConfigResolver {
    rules: RwLock<Arc<[ConfigurationRule]>>,
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigResolver {
    /// A resolver with no rules; every identity resolves to nothing
    pub fn new() -> Self {
        Self {
            rules: RwLock::new(Arc::from(Vec::new())),
        }
    }

    pub fn with_rules(rules: Vec<ConfigurationRule>) -> Result<Self> {
        let resolver = Self::new();
        resolver.load(rules)?;
        Ok(resolver)
    }

    /// Validate and install `rules`; on failure the previous set stays active
    pub fn load(&self, rules: Vec<ConfigurationRule>) -> Result<()> {
        for (index, rule) in rules.iter().enumerate() {
            if rule.prefix.is_empty() {
                return Err(LoggerError::malformed(
                    index,
                    "<empty>",
                    "the prefix must not be empty",
                ));
            }
        }

        *self.rules.write() = Arc::from(rules);
        Ok(())
    }

    /// Validate a raw configuration value and install it
    ///
    /// Expects an array of objects, each with `prefix` (or `class`),
    /// `threshold` (or `level`) naming a level, and a `writers` array.
    pub fn load_value(&self, value: &serde_json::Value) -> Result<()> {
        let entries = value.as_array().ok_or_else(|| {
            LoggerError::malformed(0, "<root>", "the configuration must be an array of rules")
        })?;

        let mut rules = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            rules.push(parse_rule(index, entry)?);
        }
        self.load(rules)
    }

    pub fn load_json(&self, json: &str) -> Result<()> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        self.load_value(&value)
    }

    /// Snapshot of the active rules
    pub fn rules(&self) -> Arc<[ConfigurationRule]> {
        Arc::clone(&self.rules.read())
    }

    /// The rule governing `component`, or `None` when logging is disabled for it
    pub fn resolve(&self, component: &str) -> Option<ResolvedConfig> {
        let rules = self.rules();
        best_match(&rules, component).map(|rule| ResolvedConfig {
            specificity: rule.prefix.len(),
            rule: rule.clone(),
        })
    }
}

fn required_string<'a>(
    index: usize,
    object: &'a serde_json::Map<String, serde_json::Value>,
    names: [&str; 2],
    rule: &str,
) -> Result<&'a str> {
    let value = names
        .iter()
        .find_map(|name| object.get(*name))
        .ok_or_else(|| {
            LoggerError::malformed(
                index,
                rule,
                format!("each rule has to define a \"{}\" property", names[0]),
            )
        })?;
    value.as_str().ok_or_else(|| {
        LoggerError::malformed(
            index,
            rule,
            format!("each rule has to define a \"{}\" property, as a string", names[0]),
        )
    })
}

fn parse_rule(index: usize, entry: &serde_json::Value) -> Result<ConfigurationRule> {
    let object = entry
        .as_object()
        .ok_or_else(|| {
            LoggerError::malformed(index, "<not an object>", "each rule must be an object")
        })?;

    let prefix = required_string(index, object, ["prefix", "class"], "<unnamed>")?;
    if prefix.is_empty() {
        return Err(LoggerError::malformed(index, "<empty>", "the prefix must not be empty"));
    }

    let level_name = required_string(index, object, ["threshold", "level"], prefix)?;
    let threshold = level_name
        .parse::<LogLevel>()
        .map_err(|e| LoggerError::malformed(index, prefix, e.to_string()))?;

    let writers = object
        .get("writers")
        .ok_or_else(|| {
            LoggerError::malformed(index, prefix, "each rule has to define a \"writers\" property")
        })?;
    if !writers.is_array() {
        return Err(LoggerError::malformed(
            index,
            prefix,
            "each rule has to define a \"writers\" property, as an array",
        ));
    }
    let writers: Vec<WriterSpec> = serde_json::from_value(writers.clone())
        .map_err(|e| LoggerError::malformed(index, prefix, format!("invalid writer: {}", e)))?;

    Ok(ConfigurationRule {
        prefix: prefix.to_string(),
        threshold,
        writers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolver() -> ConfigResolver {
        ConfigResolver::with_rules(vec![
            ConfigurationRule::new("App", LogLevel::Warning).with_writer("file"),
            ConfigurationRule::new("App\\Service", LogLevel::Debug).with_writer("console"),
        ])
        .unwrap()
    }

    #[test]
    fn test_longest_prefix_wins() {
        let resolver = resolver();

        let resolved = resolver.resolve("App\\Service\\Billing").unwrap();
        assert_eq!(resolved.rule.prefix, "App\\Service");
        assert_eq!(resolved.specificity, "App\\Service".len());

        let resolved = resolver.resolve("App\\Controller").unwrap();
        assert_eq!(resolved.rule.threshold, LogLevel::Warning);
    }

    #[test]
    fn test_no_match_disables() {
        let resolver = resolver();
        assert!(resolver.resolve("Unrelated\\Module").is_none());
        assert!(resolver.resolve("app\\Service").is_none());
        assert!(resolver.resolve("Ap").is_none());
    }

    #[test]
    fn test_equal_length_keeps_first() {
        let resolver = ConfigResolver::with_rules(vec![
            ConfigurationRule::new("Core", LogLevel::Error),
            ConfigurationRule::new("Core", LogLevel::Debug),
        ])
        .unwrap();

        for _ in 0..3 {
            assert_eq!(resolver.resolve("Core\\Db").unwrap().rule.threshold, LogLevel::Error);
        }
    }

    #[test]
    fn test_exact_identity_matches() {
        let resolver = resolver();
        assert_eq!(resolver.resolve("App").unwrap().specificity, 3);
    }

    #[test]
    fn test_empty_prefix_rejected_and_old_set_kept() {
        let resolver = resolver();
        let err = resolver
            .load(vec![
                ConfigurationRule::new("Other", LogLevel::Info),
                ConfigurationRule::new("", LogLevel::Info),
            ])
            .unwrap_err();

        assert!(matches!(err, LoggerError::MalformedConfiguration { index: 1, .. }));
        assert_eq!(resolver.rules().len(), 2);
        assert!(resolver.resolve("Other").is_none());
    }

    #[test]
    fn test_load_replaces_rules() {
        let resolver = resolver();
        resolver.load(vec![ConfigurationRule::new("Other", LogLevel::Info)]).unwrap();

        assert!(resolver.resolve("App\\Service").is_none());
        assert!(resolver.resolve("Other\\Thing").is_some());
    }

    #[test]
    fn test_load_value_with_aliases() {
        let resolver = ConfigResolver::new();
        resolver
            .load_value(&json!([
                {"class": "App", "level": "warn", "writers": ["file"]},
                {"prefix": "App\\Db", "threshold": "debug", "writers": [
                    {"kind": "file", "format": "xml", "options": {"path": "db.log"}}
                ]}
            ]))
            .unwrap();

        let rules = resolver.rules();
        assert_eq!(rules[0].threshold, LogLevel::Warning);
        assert_eq!(rules[1].writers[0].option("path"), Some("db.log"));
    }

    #[test]
    fn test_load_value_rejects_bad_shapes() {
        let resolver = ConfigResolver::new();
        let cases = [
            json!({"class": "App"}),
            json!(["App"]),
            json!([{"level": "info", "writers": []}]),
            json!([{"class": 3, "level": "info", "writers": []}]),
            json!([{"class": "", "level": "info", "writers": []}]),
            json!([{"class": "App", "writers": []}]),
            json!([{"class": "App", "level": 200, "writers": []}]),
            json!([{"class": "App", "level": "verbose", "writers": []}]),
            json!([{"class": "App", "level": "info"}]),
            json!([{"class": "App", "level": "info", "writers": "file"}]),
        ];

        for case in cases {
            let err = resolver.load_value(&case).unwrap_err();
            assert!(err.is_configuration(), "{case} gave {err}");
        }
        assert!(resolver.rules().is_empty());
    }

    #[test]
    fn test_load_json() {
        let resolver = ConfigResolver::new();
        resolver
            .load_json(r#"[{"prefix": "Jobs", "threshold": "notice", "writers": []}]"#)
            .unwrap();
        assert_eq!(resolver.resolve("Jobs\\Nightly").unwrap().rule.threshold, LogLevel::Notice);
        assert!(resolver.load_json("not json").is_err());
    }
}
