//! Type-aware lint rules over `tsl-syntax` trees.
//!
//! A `Linter` is built from a set of configured rules (usually through
//! `LintConfig` and the `RuleRegistry`) and run once per `SourceFile`,
//! optionally with a `TypeOracle` for the rules that need type information.
//!
//! ```ignore
//! let registry = RuleRegistry::with_builtin_rules();
//! let linter = Linter::from_config(&LintConfig::from_path(path)?, &registry)?;
//! let diagnostics = linter.lint(&file, Some(&oracle))?;
//! ```

pub mod config;
pub mod context;
pub mod driver;
pub mod error;
pub mod fixer;
pub mod registry;
pub mod rule;
pub mod rules;
pub mod tracing_config;

pub use config::{LintConfig, RuleSetting, Severity};
pub use context::{Report, RuleContext};
pub use driver::{ConfiguredRule, Linter};
pub use error::{ConfigError, LintError, RuleFailure};
pub use fixer::Fixer;
pub use registry::{RuleFactory, RuleRegistry};
pub use rule::{Rule, RuleMeta, RuleResult, RuleVisitor, Subscription};
