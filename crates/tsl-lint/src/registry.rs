//! Rule registry: rule names to constructors.

use crate::error::ConfigError;
use crate::rule::Rule;
use crate::rules;
use indexmap::IndexMap;
use serde_json::Value;

/// Builds a rule from its (possibly null) options.
pub type RuleFactory = fn(&Value) -> Result<Box<dyn Rule>, ConfigError>;

#[derive(Default)]
pub struct RuleRegistry {
    factories: IndexMap<&'static str, RuleFactory>,
}

impl RuleRegistry {
    #[must_use]
    pub fn new() -> RuleRegistry {
        RuleRegistry::default()
    }

    /// Registry holding every rule shipped with the crate.
    #[must_use]
    pub fn with_builtin_rules() -> RuleRegistry {
        let mut registry = RuleRegistry::new();
        for (name, factory) in rules::BUILTIN_RULES {
            registry.register(name, *factory);
        }
        registry
    }

    /// Add or replace a rule constructor.
    pub fn register(&mut self, name: &'static str, factory: RuleFactory) {
        self.factories.insert(name, factory);
    }

    pub fn create(&self, name: &str, options: &Value) -> Result<Box<dyn Rule>, ConfigError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ConfigError::UnknownRule(name.to_string()))?;
        factory(options)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}
