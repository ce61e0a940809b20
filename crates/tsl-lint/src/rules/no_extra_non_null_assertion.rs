//! `no-extra-non-null-assertion`: `a!!`, `a!?.b` and `a!?.()`.

use crate::config::parse_options;
use crate::context::{Report, RuleContext};
use crate::error::ConfigError;
use crate::rule::{Rule, RuleMeta, RuleResult, Subscription};
use crate::rules::NoOptions;
use serde_json::Value;
use tsl_syntax::{NodeIndex, SyntaxKind};

pub const NAME: &str = "no-extra-non-null-assertion";

static META: RuleMeta = RuleMeta {
    name: NAME,
    description: "Disallow extra non-null assertions",
    requires_type_info: false,
    messages: &[("noExtraNonNullAssertion", "Forbidden extra non-null assertion.")],
};

pub struct NoExtraNonNullAssertion;

pub fn create(options: &Value) -> Result<Box<dyn Rule>, ConfigError> {
    let NoOptions {} = parse_options(NAME, options)?;
    Ok(Box::new(NoExtraNonNullAssertion))
}

impl Rule for NoExtraNonNullAssertion {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn subscription(&self) -> Subscription {
        Subscription::Kinds(&[SyntaxKind::NonNullExpression])
    }

    fn check(&self, ctx: &mut RuleContext<'_>, node: NodeIndex) -> RuleResult {
        let arena = ctx.arena();
        let parent = arena.parent(node);
        let Some(parent_node) = arena.get(parent) else {
            return Ok(());
        };
        let redundant = match parent_node.kind {
            SyntaxKind::NonNullExpression => true,
            SyntaxKind::PropertyAccessExpression | SyntaxKind::ElementAccessExpression => arena
                .get_access_expr(parent_node)
                .is_some_and(|a| a.expression == node && a.question_dot_token.is_some()),
            SyntaxKind::CallExpression => arena
                .get_call_expr(parent_node)
                .is_some_and(|c| c.expression == node && c.question_dot_token.is_some()),
            _ => false,
        };
        if !redundant {
            return Ok(());
        }

        let (start, end) = ctx.range(node);
        let fixer = ctx.fixer();
        let fix = fixer.fix("Remove the extra `!`", vec![fixer.remove_range(end - 1, end)]);
        ctx.report(Report::new("noExtraNonNullAssertion", (start, end)).fix(fix));
        Ok(())
    }
}
