//! `no-unnecessary-condition`: conditions whose outcome is fixed by their
//! type.
//!
//! Tested positions are `if`/loop/ternary conditions, the left operand of
//! `&&`, `||` and `??` (and their assignment forms) and the return value of
//! array predicate callbacks. A logical expression used as a condition only
//! has its right operand checked there; the left operand is checked when the
//! logical expression itself is visited.

use crate::config::parse_options;
use crate::context::{Report, RuleContext};
use crate::error::ConfigError;
use crate::rule::{Rule, RuleMeta, RuleResult, Subscription};
use crate::rules::NO_STRICT_NULL_CHECK;
use crate::rules::member_nullability::{
    is_array_index_expression, is_nullable_member_expression,
    option_chain_contains_option_array_index,
};
use serde::Deserialize;
use serde_json::Value;
use std::cmp::Ordering;
use tsl_syntax::utilities::skip_parentheses;
use tsl_syntax::{NodeIndex, SyntaxKind};
use tsl_types::type_queries::{
    call_signature_return_types, flags_of, is_always_nullish, is_any_or_unknown,
    is_array_or_tuple_type, is_possibly_falsy, is_possibly_nullish, is_possibly_truthy,
    is_type_flag_set, literal_value,
};
use tsl_types::{LiteralValue, TypeDatabase, TypeFlags, TypeId};

pub const NAME: &str = "no-unnecessary-condition";

static META: RuleMeta = RuleMeta {
    name: NAME,
    description: "Disallow conditionals whose type makes them always truthy or always falsy",
    requires_type_info: true,
    messages: &[
        ("alwaysTruthy", "Unnecessary conditional, value is always truthy."),
        ("alwaysFalsy", "Unnecessary conditional, value is always falsy."),
        (
            "alwaysTruthyFunc",
            "This callback should return a conditional, but return is always truthy.",
        ),
        (
            "alwaysFalsyFunc",
            "This callback should return a conditional, but return is always falsy.",
        ),
        (
            "neverNullish",
            "Unnecessary conditional, expected left-hand side of `??` operator to be possibly null or undefined.",
        ),
        (
            "alwaysNullish",
            "Unnecessary conditional, left-hand side of `??` operator is always `null` or `undefined`.",
        ),
        (
            "literalBooleanExpression",
            "Unnecessary conditional, both sides of the expression are literal values.",
        ),
        (
            "literalComparisonResult",
            "Unnecessary conditional, both sides of the expression are literal values, so the comparison is always {0}.",
        ),
        (
            "noOverlapBooleanExpression",
            "Unnecessary conditional, the types have no overlap.",
        ),
        ("never", "Unnecessary conditional, value is `never`."),
        NO_STRICT_NULL_CHECK,
    ],
};

const ARRAY_PREDICATE_FUNCTIONS: &[&str] = &[
    "filter",
    "find",
    "findIndex",
    "findLast",
    "findLastIndex",
    "some",
    "every",
];

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Accept `while (true)` and friends.
    pub allow_constant_loop_conditions: bool,
    pub allow_rule_to_run_without_strict_null_checks_i_know_what_i_am_doing: bool,
}

pub struct NoUnnecessaryCondition {
    options: Options,
}

pub fn create(options: &Value) -> Result<Box<dyn Rule>, ConfigError> {
    Ok(Box::new(NoUnnecessaryCondition {
        options: parse_options(NAME, options)?,
    }))
}

impl Rule for NoUnnecessaryCondition {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn subscription(&self) -> Subscription {
        Subscription::Kinds(&[
            SyntaxKind::IfStatement,
            SyntaxKind::ConditionalExpression,
            SyntaxKind::WhileStatement,
            SyntaxKind::DoStatement,
            SyntaxKind::ForStatement,
            SyntaxKind::BinaryExpression,
            SyntaxKind::CallExpression,
        ])
    }

    fn check_file(&self, ctx: &mut RuleContext<'_>) -> RuleResult {
        if !ctx.compiler_options()?.strict_null_checks
            && !self
                .options
                .allow_rule_to_run_without_strict_null_checks_i_know_what_i_am_doing
        {
            ctx.report(Report::new("noStrictNullCheck", (0, 0)));
        }
        Ok(())
    }

    fn check(&self, ctx: &mut RuleContext<'_>, node: NodeIndex) -> RuleResult {
        let arena = ctx.arena();
        let Some(n) = arena.get(node) else {
            return Ok(());
        };
        match n.kind {
            SyntaxKind::IfStatement => match arena.get_if_statement(n) {
                Some(stmt) => check_node(ctx, stmt.expression, false),
                None => Ok(()),
            },
            SyntaxKind::ConditionalExpression => match arena.get_conditional_expr(n) {
                Some(cond) => check_node(ctx, cond.condition, false),
                None => Ok(()),
            },
            SyntaxKind::WhileStatement | SyntaxKind::DoStatement | SyntaxKind::ForStatement => {
                let Some(condition) = arena.get_loop(n).and_then(|l| l.condition.into_option())
                else {
                    return Ok(());
                };
                if self.options.allow_constant_loop_conditions
                    && ctx.constrained_type_at(condition)? == TypeId::TRUE
                {
                    return Ok(());
                }
                check_node(ctx, condition, false)
            }
            SyntaxKind::BinaryExpression => {
                let Some(binary) = arena.get_binary_expr(n) else {
                    return Ok(());
                };
                match binary.operator {
                    SyntaxKind::QuestionQuestionToken | SyntaxKind::QuestionQuestionEqualsToken => {
                        check_node_for_nullish(ctx, binary.left)
                    }
                    SyntaxKind::AmpersandAmpersandToken
                    | SyntaxKind::BarBarToken
                    | SyntaxKind::AmpersandAmpersandEqualsToken
                    | SyntaxKind::BarBarEqualsToken => check_node(ctx, binary.left, false),
                    op if op.is_equality_operator() || op.is_relational_operator() => {
                        check_comparison(ctx, node, binary.left, op, binary.right)
                    }
                    _ => Ok(()),
                }
            }
            SyntaxKind::CallExpression => check_array_predicate(ctx, node),
            _ => Ok(()),
        }
    }
}

/// Judge a tested expression. `negated` is set under a `!`, which swaps the
/// truthy and falsy verdicts.
fn check_node(ctx: &mut RuleContext<'_>, node: NodeIndex, negated: bool) -> RuleResult {
    let arena = ctx.arena();
    let node = skip_parentheses(arena, node);
    let Some(n) = arena.get(node) else {
        return Ok(());
    };
    if let Some(unary) = arena.get_unary_expr(n)
        && n.kind == SyntaxKind::PrefixUnaryExpression
        && unary.operator == SyntaxKind::ExclamationToken
    {
        return check_node(ctx, unary.operand, true);
    }
    if !ctx.compiler_options()?.no_unchecked_indexed_access
        && is_array_index_expression(ctx, node)?
    {
        return Ok(());
    }
    if let Some(binary) = arena.get_binary_expr(n)
        && matches!(
            binary.operator,
            SyntaxKind::AmpersandAmpersandToken | SyntaxKind::BarBarToken
        )
    {
        return check_node(ctx, binary.right, false);
    }

    let db = ctx.db()?;
    let type_id = ctx.constrained_type_at(node)?;
    if is_type_flag_set(
        db,
        type_id,
        TypeFlags::ANY_OR_UNKNOWN | TypeFlags::TYPE_PARAMETER,
    ) {
        return Ok(());
    }
    let message_id = if is_type_flag_set(db, type_id, TypeFlags::NEVER) {
        "never"
    } else if !is_possibly_truthy(db, type_id) {
        if negated { "alwaysTruthy" } else { "alwaysFalsy" }
    } else if !is_possibly_falsy(db, type_id) {
        if negated { "alwaysFalsy" } else { "alwaysTruthy" }
    } else {
        return Ok(());
    };
    ctx.report(Report::new(message_id, ctx.range(node)));
    Ok(())
}

/// Left operand of `??` / `??=`.
fn check_node_for_nullish(ctx: &mut RuleContext<'_>, node: NodeIndex) -> RuleResult {
    let arena = ctx.arena();
    let node = skip_parentheses(arena, node);
    let db = ctx.db()?;
    let type_id = ctx.constrained_type_at(node)?;
    if is_type_flag_set(
        db,
        type_id,
        TypeFlags::ANY_OR_UNKNOWN | TypeFlags::TYPE_PARAMETER,
    ) {
        return Ok(());
    }

    let message_id = if is_type_flag_set(db, type_id, TypeFlags::NEVER) {
        "never"
    } else if !is_possibly_nullish(db, type_id) {
        let is_optional_chain = arena.get(node).is_some_and(|n| n.is_optional_chain());
        if is_array_index_expression(ctx, node)?
            || (is_optional_chain && option_chain_contains_option_array_index(ctx, node)?)
            || is_nullable_member_expression(ctx, node)?
        {
            return Ok(());
        }
        "neverNullish"
    } else if is_always_nullish(db, type_id) {
        "alwaysNullish"
    } else {
        return Ok(());
    };
    ctx.report(Report::new(message_id, ctx.range(node)));
    Ok(())
}

fn check_comparison(
    ctx: &mut RuleContext<'_>,
    node: NodeIndex,
    left: NodeIndex,
    operator: SyntaxKind,
    right: NodeIndex,
) -> RuleResult {
    let db = ctx.db()?;
    let left_type = ctx.constrained_type_at(left)?;
    let right_type = ctx.constrained_type_at(right)?;

    if is_literal_operand(db, left_type) && is_literal_operand(db, right_type) {
        let mut report = Report::new("literalBooleanExpression", ctx.range(node));
        if let Some(result) = evaluate_comparison(db, operator, left_type, right_type) {
            report = report.text(ctx.message(
                "literalComparisonResult",
                &[if result { "true" } else { "false" }],
            ));
        }
        ctx.report(report);
        return Ok(());
    }

    if !ctx.compiler_options()?.strict_null_checks {
        return Ok(());
    }
    // Comparing against `undefined` or `null` is not checked for overlap by
    // the compiler; catch the cases where the other side cannot be nullish.
    let loose = matches!(
        operator,
        SyntaxKind::EqualsEqualsToken | SyntaxKind::ExclamationEqualsToken
    );
    let is_comparable = |type_id: TypeId, flags: TypeFlags| {
        let mut flags = flags | TypeFlags::ANY_OR_UNKNOWN | TypeFlags::TYPE_PARAMETER;
        if loose {
            flags |= TypeFlags::NULLABLE | TypeFlags::VOID;
        }
        is_type_flag_set(db, type_id, flags)
    };
    let undefined_or_void = TypeFlags::UNDEFINED | TypeFlags::VOID;
    let no_overlap = (left_type == TypeId::UNDEFINED
        && !is_comparable(right_type, undefined_or_void))
        || (right_type == TypeId::UNDEFINED && !is_comparable(left_type, undefined_or_void))
        || (left_type == TypeId::NULL && !is_comparable(right_type, TypeFlags::NULL))
        || (right_type == TypeId::NULL && !is_comparable(left_type, TypeFlags::NULL));
    if no_overlap {
        ctx.report(Report::new("noOverlapBooleanExpression", ctx.range(node)));
    }
    Ok(())
}

/// A type with exactly one value: boolean, string, number and bigint
/// literals, `undefined`, `null` and `void`.
fn is_literal_operand(db: &dyn TypeDatabase, type_id: TypeId) -> bool {
    matches!(
        type_id,
        TypeId::TRUE | TypeId::FALSE | TypeId::UNDEFINED | TypeId::NULL | TypeId::VOID
    ) || flags_of(db, type_id).intersects(
        TypeFlags::STRING_LITERAL | TypeFlags::NUMBER_LITERAL | TypeFlags::BIGINT_LITERAL,
    )
}

enum Operand {
    Null,
    Undefined,
    Value(LiteralValue),
}

fn operand(db: &dyn TypeDatabase, type_id: TypeId) -> Option<Operand> {
    match type_id {
        TypeId::NULL => Some(Operand::Null),
        TypeId::UNDEFINED => Some(Operand::Undefined),
        _ => literal_value(db, type_id).map(Operand::Value),
    }
}

/// Result of comparing two literal operands, when it does not depend on
/// type coercion.
fn evaluate_comparison(
    db: &dyn TypeDatabase,
    operator: SyntaxKind,
    left: TypeId,
    right: TypeId,
) -> Option<bool> {
    let left = operand(db, left)?;
    let right = operand(db, right)?;
    match operator {
        SyntaxKind::EqualsEqualsEqualsToken => Some(strict_equals(&left, &right)),
        SyntaxKind::ExclamationEqualsEqualsToken => Some(!strict_equals(&left, &right)),
        SyntaxKind::EqualsEqualsToken => loose_equals(&left, &right),
        SyntaxKind::ExclamationEqualsToken => loose_equals(&left, &right).map(|eq| !eq),
        SyntaxKind::LessThanToken => compare(&left, &right).map(|o| o == Some(Ordering::Less)),
        SyntaxKind::GreaterThanToken => {
            compare(&left, &right).map(|o| o == Some(Ordering::Greater))
        }
        SyntaxKind::LessThanEqualsToken => compare(&left, &right)
            .map(|o| matches!(o, Some(Ordering::Less | Ordering::Equal))),
        SyntaxKind::GreaterThanEqualsToken => compare(&left, &right)
            .map(|o| matches!(o, Some(Ordering::Greater | Ordering::Equal))),
        _ => None,
    }
}

fn strict_equals(left: &Operand, right: &Operand) -> bool {
    match (left, right) {
        (Operand::Null, Operand::Null) | (Operand::Undefined, Operand::Undefined) => true,
        (Operand::Value(LiteralValue::Number(a)), Operand::Value(LiteralValue::Number(b))) => {
            a.0 == b.0
        }
        (Operand::Value(a), Operand::Value(b)) => a == b,
        _ => false,
    }
}

fn loose_equals(left: &Operand, right: &Operand) -> Option<bool> {
    match (left, right) {
        (Operand::Null | Operand::Undefined, Operand::Null | Operand::Undefined) => Some(true),
        (Operand::Null | Operand::Undefined, Operand::Value(_))
        | (Operand::Value(_), Operand::Null | Operand::Undefined) => Some(false),
        (Operand::Value(a), Operand::Value(b))
            if std::mem::discriminant(a) == std::mem::discriminant(b) =>
        {
            Some(strict_equals(left, right))
        }
        _ => None,
    }
}

/// Outer `None`: not evaluated. Inner `None`: unordered (`NaN`).
fn compare(left: &Operand, right: &Operand) -> Option<Option<Ordering>> {
    let (Operand::Value(a), Operand::Value(b)) = (left, right) else {
        return None;
    };
    match (a, b) {
        (LiteralValue::Number(a), LiteralValue::Number(b)) => Some(a.0.partial_cmp(&b.0)),
        (LiteralValue::String(a), LiteralValue::String(b)) => {
            Some(Some(a.encode_utf16().cmp(b.encode_utf16())))
        }
        (LiteralValue::BigInt(a), LiteralValue::BigInt(b)) => {
            let a = a.parse::<i128>().ok()?;
            let b = b.parse::<i128>().ok()?;
            Some(Some(a.cmp(&b)))
        }
        _ => None,
    }
}

/// `arr.filter(x => cond)`: the callback's result is a tested position.
fn check_array_predicate(ctx: &mut RuleContext<'_>, node: NodeIndex) -> RuleResult {
    let arena = ctx.arena();
    let Some(call) = arena.get(node).and_then(|n| arena.get_call_expr(n)) else {
        return Ok(());
    };
    let Some(&callback) = call.arguments.first() else {
        return Ok(());
    };
    let Some(callee) = arena
        .get(call.expression)
        .filter(|c| c.kind == SyntaxKind::PropertyAccessExpression)
        .and_then(|c| arena.get_access_expr(c))
    else {
        return Ok(());
    };
    let is_predicate = arena
        .identifier_text(callee.name_or_argument)
        .is_some_and(|name| ARRAY_PREDICATE_FUNCTIONS.contains(&name));
    if !is_predicate {
        return Ok(());
    }
    let db = ctx.db()?;
    if !is_array_or_tuple_type(db, ctx.constrained_type_at(callee.expression)?) {
        return Ok(());
    }

    if let Some(function) = arena.get(callback).and_then(|f| arena.get_function(f)) {
        let body = function.body;
        let Some(body_node) = arena.get(body) else {
            return Ok(());
        };
        match arena.get_block(body_node) {
            None => return check_node(ctx, body, false),
            Some(block) => {
                if let [statement] = block.statements.as_slice()
                    && let Some(ret) = arena
                        .get(*statement)
                        .filter(|s| s.kind == SyntaxKind::ReturnStatement)
                    && let Some(argument) = arena
                        .get_jump(ret)
                        .and_then(|j| j.expression.into_option())
                {
                    return check_node(ctx, argument, false);
                }
            }
        }
    }

    let callback_type = ctx.constrained_type_at(callback)?;
    let returns = call_signature_return_types(db, callback_type);
    if returns.is_empty() || returns.iter().any(|&t| is_any_or_unknown(db, t)) {
        return Ok(());
    }
    let message_id = if !returns.iter().any(|&t| is_possibly_falsy(db, t)) {
        "alwaysTruthyFunc"
    } else if !returns.iter().any(|&t| is_possibly_truthy(db, t)) {
        "alwaysFalsyFunc"
    } else {
        return Ok(());
    };
    ctx.report(Report::new(message_id, ctx.range(callback)));
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/literal_comparison_tests.rs"]
mod tests;
