//! Lint configuration.
//!
//! ```json
//! {
//!   "rules": {
//!     "no-duplicate-case": "error",
//!     "switch-exhaustiveness-check": ["warn", { "requireDefaultForNonUnion": true }],
//!     "prefer-ts-expect-error": "off"
//!   }
//! }
//! ```
//!
//! Rule entries keep their file order. Options are validated by each rule's
//! own options struct when the rule is constructed.

use crate::error::ConfigError;
use anyhow::Context;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Off,
    Warn,
    Error,
}

impl Severity {
    /// `"off" | "warn" | "error"` or the numeric forms `0 | 1 | 2`.
    fn from_value(rule: &str, value: &Value) -> Result<Severity, ConfigError> {
        let severity = match value {
            Value::String(s) => match s.as_str() {
                "off" => Some(Severity::Off),
                "warn" => Some(Severity::Warn),
                "error" => Some(Severity::Error),
                _ => None,
            },
            Value::Number(n) => match n.as_u64() {
                Some(0) => Some(Severity::Off),
                Some(1) => Some(Severity::Warn),
                Some(2) => Some(Severity::Error),
                _ => None,
            },
            _ => None,
        };
        severity.ok_or_else(|| ConfigError::InvalidSeverity {
            rule: rule.to_string(),
            value: value.to_string(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LintConfig {
    pub rules: IndexMap<String, Value>,
}

/// One resolved rule entry.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleSetting {
    pub name: String,
    pub severity: Severity,
    /// `Value::Null` when the entry carries no options.
    pub options: Value,
}

impl LintConfig {
    pub fn from_json(text: &str) -> Result<LintConfig, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: &Path) -> anyhow::Result<LintConfig> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read lint config {}", path.display()))?;
        let config = LintConfig::from_json(&text)
            .with_context(|| format!("failed to parse lint config {}", path.display()))?;
        Ok(config)
    }

    #[must_use]
    pub fn with_rule(mut self, name: &str, setting: Value) -> LintConfig {
        self.rules.insert(name.to_string(), setting);
        self
    }

    /// Split every entry into severity and options.
    pub fn resolve(&self) -> Result<Vec<RuleSetting>, ConfigError> {
        self.rules
            .iter()
            .map(|(name, value)| {
                let (severity, options) = match value {
                    Value::Array(items) => match items.as_slice() {
                        [severity] => (severity, Value::Null),
                        [severity, options] => (severity, options.clone()),
                        _ => {
                            return Err(ConfigError::InvalidSeverity {
                                rule: name.clone(),
                                value: value.to_string(),
                            });
                        }
                    },
                    severity => (severity, Value::Null),
                };
                Ok(RuleSetting {
                    name: name.clone(),
                    severity: Severity::from_value(name, severity)?,
                    options,
                })
            })
            .collect()
    }
}

/// Deserialize a rule's options, defaulting every field when absent.
pub fn parse_options<T: DeserializeOwned + Default>(
    rule: &str,
    options: &Value,
) -> Result<T, ConfigError> {
    if options.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(options.clone()).map_err(|source| ConfigError::InvalidOptions {
        rule: rule.to_string(),
        source,
    })
}
