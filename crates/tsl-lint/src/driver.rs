//! Traversal driver.
//!
//! One pre-order walk per file. Each node is dispatched by kind to every rule
//! that subscribed to that kind; the table is built once per `Linter`. Every
//! rule invocation runs against a fresh `RuleContext` whose staged reports
//! are committed only when the invocation succeeds.

use crate::config::{LintConfig, Severity};
use crate::context::RuleContext;
use crate::error::{ConfigError, LintError};
use crate::registry::RuleRegistry;
use crate::rule::{Rule, RuleResult, RuleVisitor, Subscription};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, debug_span, trace, warn};
use tsl_common::{Diagnostic, DiagnosticCategory, EditError};
use tsl_syntax::visit::preorder;
use tsl_syntax::{NodeIndex, SourceFile, SyntaxKind};
use tsl_types::TypeOracle;

/// A rule together with the category its findings are reported under.
pub struct ConfiguredRule {
    pub rule: Box<dyn Rule>,
    pub category: DiagnosticCategory,
}

impl ConfiguredRule {
    #[must_use]
    pub fn new(rule: Box<dyn Rule>, category: DiagnosticCategory) -> Self {
        ConfiguredRule { rule, category }
    }
}

pub struct Linter {
    rules: Vec<ConfiguredRule>,
    dispatch: FxHashMap<SyntaxKind, SmallVec<[usize; 4]>>,
    all_nodes: SmallVec<[usize; 2]>,
}

impl Linter {
    #[must_use]
    pub fn new(rules: Vec<ConfiguredRule>) -> Linter {
        let mut dispatch: FxHashMap<SyntaxKind, SmallVec<[usize; 4]>> = FxHashMap::default();
        let mut all_nodes = SmallVec::new();
        for (index, configured) in rules.iter().enumerate() {
            match configured.rule.subscription() {
                Subscription::Kinds(kinds) => {
                    for &kind in kinds {
                        dispatch.entry(kind).or_default().push(index);
                    }
                }
                Subscription::AllNodes => all_nodes.push(index),
            }
        }
        Linter {
            rules,
            dispatch,
            all_nodes,
        }
    }

    /// Build a linter from the enabled entries of a configuration.
    pub fn from_config(
        config: &LintConfig,
        registry: &RuleRegistry,
    ) -> Result<Linter, ConfigError> {
        let mut rules = Vec::new();
        for setting in config.resolve()? {
            let category = match setting.severity {
                Severity::Off => continue,
                Severity::Warn => DiagnosticCategory::Warning,
                Severity::Error => DiagnosticCategory::Error,
            };
            let rule = registry.create(&setting.name, &setting.options)?;
            rules.push(ConfiguredRule::new(rule, category));
        }
        Ok(Linter::new(rules))
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.rule.meta().name)
    }

    /// Lint one file. Diagnostics come back in document order.
    pub fn lint(
        &self,
        file: &SourceFile,
        oracle: Option<&dyn TypeOracle>,
    ) -> Result<Vec<Diagnostic>, LintError> {
        let _span = debug_span!("lint", file = file.file_name()).entered();

        if oracle.is_none() {
            let rules: Vec<&'static str> = self
                .rules
                .iter()
                .map(|r| r.rule.meta())
                .filter(|meta| meta.requires_type_info)
                .map(|meta| meta.name)
                .collect();
            if !rules.is_empty() {
                return Err(LintError::OracleUnavailable { rules });
            }
        }

        let mut visitors: Vec<Box<dyn RuleVisitor + '_>> =
            self.rules.iter().map(|r| r.rule.visitor()).collect();
        let mut diagnostics = Vec::new();

        for (index, visitor) in visitors.iter_mut().enumerate() {
            let configured = &self.rules[index];
            let mut ctx =
                RuleContext::new(file, oracle, configured.rule.meta(), configured.category);
            let result = visitor.check_file(&mut ctx);
            commit(file, configured, file.root(), result, &mut ctx, &mut diagnostics);
        }

        let arena = file.arena();
        for node in preorder(arena, file.root()) {
            let Some(kind) = arena.kind(node) else {
                continue;
            };
            let by_kind = self.dispatch.get(&kind).map_or(&[][..], |rules| rules.as_slice());
            for &index in by_kind.iter().chain(self.all_nodes.iter()) {
                let configured = &self.rules[index];
                trace!(rule = configured.rule.meta().name, ?kind, node = node.0, "dispatch");
                let mut ctx =
                    RuleContext::new(file, oracle, configured.rule.meta(), configured.category);
                let result = visitors[index].visit(&mut ctx, node);
                commit(file, configured, node, result, &mut ctx, &mut diagnostics);
            }
        }

        diagnostics.sort_by_key(|d| d.start);
        debug!(count = diagnostics.len(), "lint finished");
        Ok(diagnostics)
    }
}

fn commit(
    file: &SourceFile,
    configured: &ConfiguredRule,
    node: NodeIndex,
    result: RuleResult,
    ctx: &mut RuleContext<'_>,
    out: &mut Vec<Diagnostic>,
) {
    let staged = ctx.take_staged();
    let rule = configured.rule.meta().name;
    if let Err(failure) = result {
        debug!(rule, node = node.0, %failure, discarded = staged.len(), "rule invocation failed");
        return;
    }
    let len = file.text().len() as u32;
    for diagnostic in staged {
        match validate(&diagnostic, len) {
            Ok(()) => out.push(diagnostic),
            Err(error) => warn!(
                rule,
                message_id = diagnostic.message_id,
                %error,
                "dropping diagnostic with invalid span or fix"
            ),
        }
    }
}

fn validate(diagnostic: &Diagnostic, len: u32) -> Result<(), EditError> {
    if diagnostic.start > diagnostic.end || diagnostic.end > len {
        return Err(EditError::OutOfBounds {
            start: diagnostic.start,
            end: diagnostic.end,
            len,
        });
    }
    diagnostic.fixes.iter().try_for_each(|fix| fix.validate(len))
}
