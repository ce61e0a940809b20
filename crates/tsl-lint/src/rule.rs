//! The rule interface.
//!
//! A rule is constructed once from its validated options and lives as long
//! as the `Linter`. Per file it hands out a `RuleVisitor`, which owns any
//! state that must not outlive one traversal.

use crate::context::RuleContext;
use crate::error::RuleFailure;
use tsl_syntax::{NodeIndex, SyntaxKind};

pub type RuleResult = Result<(), RuleFailure>;

/// Static description of a rule.
#[derive(Debug)]
pub struct RuleMeta {
    pub name: &'static str,
    pub description: &'static str,
    /// The rule queries the type oracle.
    pub requires_type_info: bool,
    /// Message templates by id. `{0}`, `{1}`... are substituted on report.
    pub messages: &'static [(&'static str, &'static str)],
}

impl RuleMeta {
    #[must_use]
    pub fn message(&self, id: &str) -> Option<&'static str> {
        self.messages
            .iter()
            .find(|(message_id, _)| *message_id == id)
            .map(|(_, template)| *template)
    }
}

/// Which nodes the driver hands to a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Subscription {
    Kinds(&'static [SyntaxKind]),
    AllNodes,
}

pub trait Rule: Send + Sync {
    fn meta(&self) -> &'static RuleMeta;

    fn subscription(&self) -> Subscription;

    /// Runs once per file before the walk.
    fn check_file(&self, _ctx: &mut RuleContext<'_>) -> RuleResult {
        Ok(())
    }

    /// Runs for every subscribed node.
    fn check(&self, _ctx: &mut RuleContext<'_>, _node: NodeIndex) -> RuleResult {
        Ok(())
    }

    /// Per-file visitor. Rules without traversal state use the default,
    /// which forwards to `check_file` and `check`.
    fn visitor(&self) -> Box<dyn RuleVisitor + '_> {
        Box::new(Stateless { rule: self })
    }
}

pub trait RuleVisitor {
    fn check_file(&mut self, _ctx: &mut RuleContext<'_>) -> RuleResult {
        Ok(())
    }

    fn visit(&mut self, ctx: &mut RuleContext<'_>, node: NodeIndex) -> RuleResult;
}

struct Stateless<'r, R: Rule + ?Sized> {
    rule: &'r R,
}

impl<R: Rule + ?Sized> RuleVisitor for Stateless<'_, R> {
    fn check_file(&mut self, ctx: &mut RuleContext<'_>) -> RuleResult {
        self.rule.check_file(ctx)
    }

    fn visit(&mut self, ctx: &mut RuleContext<'_>, node: NodeIndex) -> RuleResult {
        self.rule.check(ctx, node)
    }
}
