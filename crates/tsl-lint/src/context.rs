//! The reporting channel handed to a rule invocation.
//!
//! Reports are staged in the context. The driver commits them when the
//! invocation returns `Ok` and discards them when it fails, so a rule that
//! gives up halfway never leaves a partial finding behind.

use crate::error::RuleFailure;
use crate::fixer::Fixer;
use crate::rule::RuleMeta;
use tsl_common::diagnostics::format_message;
use tsl_common::{Diagnostic, DiagnosticCategory, Fix};
use tsl_syntax::{NodeArena, NodeIndex, SourceFile};
use tsl_types::type_queries;
use tsl_types::{CompilerOptions, TypeDatabase, TypeId, TypeOracle};

/// A finding before it is turned into a `Diagnostic`.
#[derive(Debug)]
pub struct Report {
    pub message_id: &'static str,
    pub args: Vec<String>,
    /// Replaces the formatted template when set.
    pub message_text: Option<String>,
    pub start: u32,
    pub end: u32,
    pub fixes: Vec<Fix>,
}

impl Report {
    #[must_use]
    pub fn new(message_id: &'static str, (start, end): (u32, u32)) -> Report {
        Report {
            message_id,
            args: Vec::new(),
            message_text: None,
            start,
            end,
            fixes: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, value: impl Into<String>) -> Report {
        self.args.push(value.into());
        self
    }

    #[must_use]
    pub fn text(mut self, message_text: impl Into<String>) -> Report {
        self.message_text = Some(message_text.into());
        self
    }

    #[must_use]
    pub fn fix(mut self, fix: Fix) -> Report {
        self.fixes.push(fix);
        self
    }
}

pub struct RuleContext<'a> {
    file: &'a SourceFile,
    oracle: Option<&'a dyn TypeOracle>,
    meta: &'static RuleMeta,
    category: DiagnosticCategory,
    staged: Vec<Diagnostic>,
}

impl<'a> RuleContext<'a> {
    #[must_use]
    pub fn new(
        file: &'a SourceFile,
        oracle: Option<&'a dyn TypeOracle>,
        meta: &'static RuleMeta,
        category: DiagnosticCategory,
    ) -> Self {
        RuleContext {
            file,
            oracle,
            meta,
            category,
            staged: Vec::new(),
        }
    }

    #[must_use]
    pub fn file(&self) -> &'a SourceFile {
        self.file
    }

    #[must_use]
    pub fn arena(&self) -> &'a NodeArena {
        self.file.arena()
    }

    #[must_use]
    pub fn fixer(&self) -> Fixer<'a> {
        Fixer::new(self.file)
    }

    /// `[start, end)` of a node without leading trivia.
    #[must_use]
    pub fn range(&self, node: NodeIndex) -> (u32, u32) {
        self.fixer().range(node)
    }

    pub fn oracle(&self) -> Result<&'a dyn TypeOracle, RuleFailure> {
        self.oracle.ok_or(RuleFailure::MissingType {
            node: self.file.root(),
        })
    }

    pub fn db(&self) -> Result<&'a dyn TypeDatabase, RuleFailure> {
        Ok(self.oracle()?.db())
    }

    pub fn compiler_options(&self) -> Result<&'a CompilerOptions, RuleFailure> {
        Ok(self.oracle()?.compiler_options())
    }

    /// Type the oracle reports for `node`.
    pub fn type_at(&self, node: NodeIndex) -> Result<TypeId, RuleFailure> {
        self.oracle()?
            .type_at_node(node)
            .ok_or(RuleFailure::MissingType { node })
    }

    /// Type at `node` with type parameters replaced by their constraints.
    pub fn constrained_type_at(&self, node: NodeIndex) -> Result<TypeId, RuleFailure> {
        type_queries::constrained_type(self.oracle()?, node)
            .ok_or(RuleFailure::MissingType { node })
    }

    /// Format a message template of the current rule.
    #[must_use]
    pub fn message(&self, message_id: &str, args: &[&str]) -> String {
        match self.meta.message(message_id) {
            Some(template) => format_message(template, args),
            None => message_id.to_string(),
        }
    }

    pub fn report(&mut self, report: Report) {
        let message_text = report.message_text.unwrap_or_else(|| {
            let args: Vec<&str> = report.args.iter().map(String::as_str).collect();
            self.message(report.message_id, &args)
        });
        self.staged.push(Diagnostic {
            file: self.file.file_name().to_string(),
            rule: self.meta.name.to_string(),
            message_id: report.message_id.to_string(),
            category: self.category,
            message_text,
            start: report.start,
            end: report.end,
            fixes: report.fixes,
        });
    }

    pub(crate) fn take_staged(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.staged)
    }
}
