//! `no-unnecessary-optional-chain`: `a?.b`, `a?.[k]` and `f?.()` where the
//! receiver cannot be nullish.
//!
//! Only the receiver's own nullability counts. In `a?.b?.c` with a
//! non-nullable `b`, the type of `a?.b` includes `undefined` solely because
//! of the first step, so the second `?.` is reported.

use crate::config::parse_options;
use crate::context::{Report, RuleContext};
use crate::error::{ConfigError, RuleFailure};
use crate::rule::{Rule, RuleMeta, RuleResult, Subscription};
use crate::rules::NoOptions;
use crate::rules::member_nullability::{
    chain_link, is_call_expression_nullable_origin_from_callee,
    is_member_expression_nullable_origin_from_object, option_chain_contains_option_array_index,
};
use serde_json::Value;
use tsl_syntax::utilities::token_after;
use tsl_syntax::{Node, NodeIndex, SyntaxKind};
use tsl_types::type_queries::{is_nullable_like, is_type_flag_set};
use tsl_types::TypeFlags;

pub const NAME: &str = "no-unnecessary-optional-chain";

static META: RuleMeta = RuleMeta {
    name: NAME,
    description: "Disallow optional chains on values that are never nullish",
    requires_type_info: true,
    messages: &[(
        "neverOptionalChain",
        "Unnecessary optional chain on a non-nullish value.",
    )],
};

pub struct NoUnnecessaryOptionalChain;

pub fn create(options: &Value) -> Result<Box<dyn Rule>, ConfigError> {
    let NoOptions {} = parse_options(NAME, options)?;
    Ok(Box::new(NoUnnecessaryOptionalChain))
}

impl Rule for NoUnnecessaryOptionalChain {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn subscription(&self) -> Subscription {
        Subscription::Kinds(&[
            SyntaxKind::PropertyAccessExpression,
            SyntaxKind::ElementAccessExpression,
            SyntaxKind::CallExpression,
        ])
    }

    fn check(&self, ctx: &mut RuleContext<'_>, node: NodeIndex) -> RuleResult {
        let arena = ctx.arena();
        let Some((receiver, true)) = chain_link(arena, node) else {
            return Ok(());
        };
        if option_chain_contains_option_array_index(ctx, node)? {
            return Ok(());
        }
        if is_optionable_expression(ctx, receiver)? {
            return Ok(());
        }

        let question_dot = token_after(
            arena,
            receiver,
            Some(&|t: &Node| t.kind == SyntaxKind::QuestionDotToken),
        )
        .ok_or(RuleFailure::MissingToken {
            expected: "?.",
            node,
        })?;
        // `a?.b` becomes `a.b`; `a?.[k]` and `f?.()` lose the token entirely.
        let replacement = match arena.kind(node) {
            Some(SyntaxKind::PropertyAccessExpression) => ".",
            _ => "",
        };
        let fixer = ctx.fixer();
        let fix = fixer.fix(
            "Remove unnecessary optional chain",
            vec![fixer.replace(question_dot, replacement)],
        );
        ctx.report(Report::new("neverOptionalChain", fixer.range(question_dot)).fix(fix));
        Ok(())
    }
}

/// The receiver may legitimately be nullish: its type holds `any` or
/// `unknown`, or it is nullable on its own account.
fn is_optionable_expression(ctx: &RuleContext<'_>, node: NodeIndex) -> Result<bool, RuleFailure> {
    let db = ctx.db()?;
    let type_id = ctx.constrained_type_at(node)?;
    if is_type_flag_set(db, type_id, TypeFlags::ANY_OR_UNKNOWN) {
        return Ok(true);
    }
    let own_nullable = match ctx.arena().kind(node) {
        Some(SyntaxKind::PropertyAccessExpression | SyntaxKind::ElementAccessExpression) => {
            !is_member_expression_nullable_origin_from_object(ctx, node)?
        }
        Some(SyntaxKind::CallExpression) => {
            !is_call_expression_nullable_origin_from_callee(ctx, node)?
        }
        _ => true,
    };
    Ok(own_nullable && is_nullable_like(db, type_id))
}
