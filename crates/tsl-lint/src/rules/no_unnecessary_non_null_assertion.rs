//! `no-unnecessary-non-null-assertion`: `x!` where `x` cannot be nullish, or
//! where the receiving position accepts the nullish value anyway.

use crate::config::parse_options;
use crate::context::{Report, RuleContext};
use crate::error::{ConfigError, RuleFailure};
use crate::rule::{Rule, RuleMeta, RuleResult, Subscription};
use crate::rules::NoOptions;
use serde_json::Value;
use tsl_syntax::{NodeIndex, SyntaxKind};
use tsl_types::type_queries::{is_nullable_like, is_type_flag_set};
use tsl_types::{TypeFlags, TypeId};

pub const NAME: &str = "no-unnecessary-non-null-assertion";

static META: RuleMeta = RuleMeta {
    name: NAME,
    description: "Disallow non-null assertions that do not change the type of an expression",
    requires_type_info: true,
    messages: &[
        (
            "unnecessaryAssertion",
            "This assertion is unnecessary since it does not change the type of the expression.",
        ),
        (
            "contextuallyUnnecessary",
            "This assertion is unnecessary since the receiver accepts the original type of the expression.",
        ),
    ],
};

pub struct NoUnnecessaryNonNullAssertion;

pub fn create(options: &Value) -> Result<Box<dyn Rule>, ConfigError> {
    let NoOptions {} = parse_options(NAME, options)?;
    Ok(Box::new(NoUnnecessaryNonNullAssertion))
}

impl Rule for NoUnnecessaryNonNullAssertion {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn subscription(&self) -> Subscription {
        Subscription::Kinds(&[SyntaxKind::NonNullExpression])
    }

    fn check(&self, ctx: &mut RuleContext<'_>, node: NodeIndex) -> RuleResult {
        let arena = ctx.arena();
        let expression = arena
            .get(node)
            .and_then(|n| arena.get_non_null_expr(n))
            .ok_or(RuleFailure::UnexpectedShape {
                expected: SyntaxKind::NonNullExpression,
                node,
            })?
            .expression;

        let parent = arena.parent(node);
        if let Some(assignment) = arena.get(parent).and_then(|p| arena.get_binary_expr(p))
            && assignment.operator == SyntaxKind::EqualsToken
        {
            // Only the target of `x! = y` is judged; a `!` in the assigned
            // value still narrows the variable for the code that follows.
            if assignment.left == node {
                report(ctx, node, "contextuallyUnnecessary");
            }
            return Ok(());
        }

        let db = ctx.db()?;
        let operand = ctx.constrained_type_at(expression)?;
        if !is_nullable_like(db, operand) {
            if arena.kind(expression) == Some(SyntaxKind::Identifier)
                && is_possibly_used_before_assigned(ctx, expression, operand)?
            {
                return Ok(());
            }
            report(ctx, node, "unnecessaryAssertion");
            return Ok(());
        }

        let Some(contextual) = ctx.oracle()?.contextual_type(node) else {
            return Ok(());
        };
        if is_type_flag_set(db, operand, TypeFlags::UNKNOWN)
            && !is_type_flag_set(db, contextual, TypeFlags::UNKNOWN)
        {
            return Ok(());
        }
        let accepts = |flag: TypeFlags| {
            !is_type_flag_set(db, operand, flag) || is_type_flag_set(db, contextual, flag)
        };
        if accepts(TypeFlags::UNDEFINED) && accepts(TypeFlags::NULL) && accepts(TypeFlags::VOID) {
            report(ctx, node, "contextuallyUnnecessary");
        }
        Ok(())
    }
}

fn report(ctx: &mut RuleContext<'_>, node: NodeIndex, message_id: &'static str) {
    let (start, end) = ctx.range(node);
    let fixer = ctx.fixer();
    let fix = fixer.fix(
        "Remove unnecessary non-null assertion",
        vec![fixer.remove_range(end - 1, end)],
    );
    ctx.report(Report::new(message_id, (start, end)).fix(fix));
}

/// `let x: T; x!` may read `x` before any assignment; dropping the `!`
/// would then turn into a compile error. Unknown declarations count as
/// possibly unassigned.
fn is_possibly_used_before_assigned(
    ctx: &RuleContext<'_>,
    identifier: NodeIndex,
    current: TypeId,
) -> Result<bool, RuleFailure> {
    let oracle = ctx.oracle()?;
    let Some(declaration) = oracle.declaration_of(identifier) else {
        return Ok(true);
    };
    if !oracle.compiler_options().strict_null_checks {
        return Ok(false);
    }
    let arena = ctx.arena();
    let Some(decl) = arena
        .get(declaration)
        .and_then(|d| arena.get_variable_declaration(d))
    else {
        return Ok(false);
    };
    if decl.initializer.is_some() || decl.exclamation_token || decl.type_annotation.is_none() {
        return Ok(false);
    }
    Ok(oracle.type_from_type_node(decl.type_annotation) == Some(current))
}
