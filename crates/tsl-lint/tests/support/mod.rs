//! Helpers shared by the rule test targets.
#![allow(dead_code)]

use serde_json::Value;
use tsl_common::{Diagnostic, DiagnosticCategory, Fix};
use tsl_lint::{ConfiguredRule, Linter, RuleRegistry};
use tsl_syntax::SourceFile;
use tsl_types::{TypeOracle, TypeTable};

pub fn linter(rule: &str, options: Value) -> Linter {
    let rule = RuleRegistry::with_builtin_rules()
        .create(rule, &options)
        .expect("rule should build");
    Linter::new(vec![ConfiguredRule::new(rule, DiagnosticCategory::Error)])
}

/// Display text of the error a rule constructor rejects `options` with.
pub fn linter_error(rule: &str, options: Value) -> String {
    match RuleRegistry::with_builtin_rules().create(rule, &options) {
        Ok(_) => panic!("`{rule}` accepted {options}"),
        Err(error) => error.to_string(),
    }
}

/// Run one rule with the given options against a bound table.
pub fn lint_with(
    rule: &str,
    options: Value,
    file: &SourceFile,
    table: &TypeTable,
) -> Vec<Diagnostic> {
    linter(rule, options)
        .lint(file, Some(table as &dyn TypeOracle))
        .expect("oracle is available")
}

pub fn lint(rule: &str, file: &SourceFile, table: &TypeTable) -> Vec<Diagnostic> {
    lint_with(rule, Value::Null, file, table)
}

/// Run a rule that needs no type information.
pub fn lint_syntactic(rule: &str, options: Value, file: &SourceFile) -> Vec<Diagnostic> {
    linter(rule, options)
        .lint(file, None)
        .expect("rule does not need an oracle")
}

pub fn bound_table(file: &SourceFile) -> TypeTable {
    let mut table = TypeTable::new();
    table.bind(file);
    table
}

pub fn message_ids(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics.iter().map(|d| d.message_id.as_str()).collect()
}

/// Source text covered by a diagnostic.
pub fn reported_text<'a>(file: &'a SourceFile, diagnostic: &Diagnostic) -> &'a str {
    &file.text()[diagnostic.start as usize..diagnostic.end as usize]
}

pub fn apply(file: &SourceFile, fix: &Fix) -> String {
    fix.apply(file.text()).expect("fix should apply cleanly")
}

/// Apply the only fix of a diagnostic.
pub fn apply_single_fix(file: &SourceFile, diagnostic: &Diagnostic) -> String {
    assert_eq!(diagnostic.fixes.len(), 1, "expected exactly one fix");
    apply(file, &diagnostic.fixes[0])
}
