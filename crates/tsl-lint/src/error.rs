//! Error types of the lint engine.
//!
//! `RuleFailure` is local to one rule invocation and never escapes the
//! driver. `ConfigError` surfaces while building a `Linter`; `LintError` is
//! the only error `Linter::lint` returns.

use thiserror::Error;
use tsl_syntax::{NodeIndex, SyntaxKind};

/// Why a rule invocation gave up. The driver discards what the invocation
/// staged and moves on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleFailure {
    #[error("expected `{expected}` token near node {}", node.0)]
    MissingToken {
        expected: &'static str,
        node: NodeIndex,
    },
    #[error("node {} is not a {expected:?}", node.0)]
    UnexpectedShape {
        expected: SyntaxKind,
        node: NodeIndex,
    },
    #[error("no type available for node {}", node.0)]
    MissingType { node: NodeIndex },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown rule `{0}`")]
    UnknownRule(String),
    #[error("invalid options for rule `{rule}`: {source}")]
    InvalidOptions {
        rule: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid severity for rule `{rule}`: {value}")]
    InvalidSeverity { rule: String, value: String },
    #[error("malformed lint configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LintError {
    /// Type-aware rules are enabled but the host supplied no type oracle.
    #[error("rules {rules:?} need type information but no type oracle was provided")]
    OracleUnavailable { rules: Vec<&'static str> },
}
