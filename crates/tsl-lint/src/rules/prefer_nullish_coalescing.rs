//! `prefer-nullish-coalescing`: `a || b` and `a == null ? b : a` where the
//! intent is "fall back when nullish".

use crate::config::parse_options;
use crate::context::{Report, RuleContext};
use crate::error::{ConfigError, RuleFailure};
use crate::rule::{Rule, RuleMeta, RuleResult, Subscription};
use crate::rules::NO_STRICT_NULL_CHECK;
use rustc_hash::FxHashSet;
use serde::Deserialize;
use serde_json::Value;
use tsl_common::TextEdit;
use tsl_syntax::utilities::{
    binary_operator, is_nodes_equal, is_null_literal, is_undefined_identifier, skip_parentheses,
    token_after, walk_up_parentheses,
};
use tsl_syntax::{Node, NodeArena, NodeIndex, SyntaxKind};
use tsl_types::TypeFlags;
use tsl_types::type_queries::{flags_of, is_nullable_type, is_type_flag_set, union_type_parts};

pub const NAME: &str = "prefer-nullish-coalescing";

static META: RuleMeta = RuleMeta {
    name: NAME,
    description: "Enforce using the nullish coalescing operator instead of logical or and ternaries",
    requires_type_info: true,
    messages: &[
        (
            "preferNullishOverOr",
            "Prefer using nullish coalescing operator (`??`) instead of a logical or (`||`), as it is a safer operator.",
        ),
        (
            "preferNullishOverTernary",
            "Prefer using nullish coalescing operator (`??`) instead of a ternary expression, as it is simpler to read.",
        ),
        NO_STRICT_NULL_CHECK,
    ],
};

const FIX_DESCRIPTION: &str = "Fix to nullish coalescing operator (`??`).";

/// Primitive kinds whose falsy values `||` is meant to skip.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrimitiveKinds {
    pub bigint: bool,
    pub boolean: bool,
    pub number: bool,
    pub string: bool,
}

/// `true` ignores every primitive kind.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(untagged)]
pub enum IgnorePrimitives {
    All(bool),
    Kinds(PrimitiveKinds),
}

impl Default for IgnorePrimitives {
    fn default() -> Self {
        IgnorePrimitives::Kinds(PrimitiveKinds::default())
    }
}

impl IgnorePrimitives {
    fn flags(self) -> TypeFlags {
        let kinds = match self {
            IgnorePrimitives::All(all) => PrimitiveKinds {
                bigint: all,
                boolean: all,
                number: all,
                string: all,
            },
            IgnorePrimitives::Kinds(kinds) => kinds,
        };
        let mut flags = TypeFlags::empty();
        if kinds.bigint {
            flags |= TypeFlags::BIGINT_LIKE;
        }
        if kinds.boolean {
            flags |= TypeFlags::BOOLEAN_LITERAL;
        }
        if kinds.number {
            flags |= TypeFlags::NUMBER_LIKE;
        }
        if kinds.string {
            flags |= TypeFlags::STRING_LIKE;
        }
        flags
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Leave `||` alone inside `if`/loop/ternary conditions.
    pub ignore_conditional_tests: bool,
    pub ignore_ternary_tests: bool,
    /// Leave `||` alone when it shares an expression with `&&`.
    pub ignore_mixed_logical_expressions: bool,
    pub ignore_primitives: IgnorePrimitives,
    pub allow_rule_to_run_without_strict_null_checks_i_know_what_i_am_doing: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            ignore_conditional_tests: true,
            ignore_ternary_tests: false,
            ignore_mixed_logical_expressions: false,
            ignore_primitives: IgnorePrimitives::default(),
            allow_rule_to_run_without_strict_null_checks_i_know_what_i_am_doing: false,
        }
    }
}

pub struct PreferNullishCoalescing {
    options: Options,
}

pub fn create(options: &Value) -> Result<Box<dyn Rule>, ConfigError> {
    Ok(Box::new(PreferNullishCoalescing {
        options: parse_options(NAME, options)?,
    }))
}

impl Rule for PreferNullishCoalescing {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn subscription(&self) -> Subscription {
        Subscription::Kinds(&[
            SyntaxKind::BinaryExpression,
            SyntaxKind::ConditionalExpression,
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
        match ctx.arena().kind(node) {
            Some(SyntaxKind::BinaryExpression) => self.check_logical_or(ctx, node),
            Some(SyntaxKind::ConditionalExpression) if !self.options.ignore_ternary_tests => {
                check_ternary(ctx, node)
            }
            _ => Ok(()),
        }
    }
}

impl PreferNullishCoalescing {
    fn check_logical_or(&self, ctx: &mut RuleContext<'_>, node: NodeIndex) -> RuleResult {
        let arena = ctx.arena();
        let Some(binary) = arena.get(node).and_then(|n| arena.get_binary_expr(n)) else {
            return Ok(());
        };
        if binary.operator != SyntaxKind::BarBarToken {
            return Ok(());
        }

        let db = ctx.db()?;
        let left_type = ctx.type_at(binary.left)?;
        if !is_nullable_type(db, left_type) {
            return Ok(());
        }
        if self.options.ignore_conditional_tests && is_conditional_test(arena, node) {
            return Ok(());
        }
        if self.options.ignore_mixed_logical_expressions && is_mixed_logical_expression(arena, node)
        {
            return Ok(());
        }
        let ignorable = self.options.ignore_primitives.flags();
        let left_flags = flags_of(db, left_type);
        let bare_nullish = left_flags == TypeFlags::NULL || left_flags == TypeFlags::UNDEFINED;
        if !ignorable.is_empty()
            && !bare_nullish
            && union_type_parts(db, left_type)
                .into_iter()
                .any(|part| is_type_flag_set(db, part, ignorable))
        {
            return Ok(());
        }

        let operator = token_after(
            arena,
            binary.left,
            Some(&|t: &Node| t.kind == SyntaxKind::BarBarToken),
        )
        .ok_or(RuleFailure::MissingToken {
            expected: "||",
            node,
        })?;

        let fixer = ctx.fixer();
        let mut edits: Vec<TextEdit> = Vec::new();
        // `??` may not be mixed with `&&` or `||` without parentheses.
        let in_logical = binary_operator(arena, arena.parent(node)).is_some_and(is_and_or);
        if in_logical {
            edits.push(fixer.insert_before(node, "("));
        }
        let wrap_operand = |edits: &mut Vec<TextEdit>, operand: NodeIndex| {
            if needs_parentheses_around_coalesce(arena, operand) {
                edits.push(fixer.insert_before(operand, "("));
                edits.push(fixer.insert_after(operand, ")"));
            }
        };
        wrap_operand(&mut edits, binary.left);
        edits.push(fixer.replace(operator, "??"));
        wrap_operand(&mut edits, binary.right);
        if in_logical {
            edits.push(fixer.insert_after(node, ")"));
        }

        let fix = fixer.fix(FIX_DESCRIPTION, edits);
        ctx.report(Report::new("preferNullishOverOr", fixer.range(operator)).fix(fix));
        Ok(())
    }
}

/// Operands that would regroup, or fail to parse, next to a bare `??`.
fn needs_parentheses_around_coalesce(arena: &NodeArena, operand: NodeIndex) -> bool {
    match arena.kind(operand) {
        Some(SyntaxKind::ConditionalExpression | SyntaxKind::ArrowFunction) => true,
        _ => binary_operator(arena, operand).is_some_and(|operator| {
            operator.is_logical_operator()
                || operator.is_assignment_operator()
                || operator == SyntaxKind::CommaToken
        }),
    }
}

fn is_and_or(operator: SyntaxKind) -> bool {
    matches!(
        operator,
        SyntaxKind::AmpersandAmpersandToken | SyntaxKind::BarBarToken
    )
}

/// The expression sits (possibly nested) in the condition of an `if`,
/// loop or ternary, without crossing a function boundary.
fn is_conditional_test(arena: &NodeArena, node: NodeIndex) -> bool {
    let mut child = node;
    let mut current = arena.parent(node);
    while let Some(n) = arena.get(current) {
        let test = match n.kind {
            SyntaxKind::IfStatement => arena.get_if_statement(n).map(|s| s.expression),
            SyntaxKind::ConditionalExpression => arena.get_conditional_expr(n).map(|c| c.condition),
            SyntaxKind::WhileStatement | SyntaxKind::DoStatement | SyntaxKind::ForStatement => {
                arena.get_loop(n).map(|l| l.condition)
            }
            SyntaxKind::ArrowFunction | SyntaxKind::FunctionExpression => return false,
            _ => None,
        };
        if test == Some(child) {
            return true;
        }
        child = current;
        current = arena.parent(current);
    }
    false
}

/// Some `&&` is reachable from `node` through a chain of `||` expressions,
/// upwards or downwards.
fn is_mixed_logical_expression(arena: &NodeArena, node: NodeIndex) -> bool {
    let mut seen = FxHashSet::default();
    let mut queue = Vec::new();
    let push_neighbours = |queue: &mut Vec<NodeIndex>, index: NodeIndex| {
        queue.push(arena.parent(walk_up_parentheses(arena, index)));
        if let Some(binary) = arena.get(index).and_then(|n| arena.get_binary_expr(n)) {
            queue.push(skip_parentheses(arena, binary.left));
            queue.push(skip_parentheses(arena, binary.right));
        }
    };
    seen.insert(node);
    push_neighbours(&mut queue, node);
    while let Some(current) = queue.pop() {
        if !seen.insert(current) {
            continue;
        }
        match binary_operator(arena, current) {
            Some(SyntaxKind::AmpersandAmpersandToken) => return true,
            Some(SyntaxKind::BarBarToken) => push_neighbours(&mut queue, current),
            _ => {}
        }
    }
    false
}

/// `a !== null && a !== undefined ? a : b`, `a == null ? b : a` and the like.
fn check_ternary(ctx: &mut RuleContext<'_>, node: NodeIndex) -> RuleResult {
    let arena = ctx.arena();
    let Some(conditional) = arena.get(node).and_then(|n| arena.get_conditional_expr(n)) else {
        return Ok(());
    };
    let test = skip_parentheses(arena, conditional.condition);
    let Some(test_binary) = arena.get(test).and_then(|n| arena.get_binary_expr(n)) else {
        return Ok(());
    };

    let mut operands = Vec::with_capacity(4);
    let operator = if test_binary.operator.is_equality_operator() {
        operands.extend([test_binary.left, test_binary.right]);
        Some(test_binary.operator)
    } else {
        let sides = (
            arena.get(test_binary.left).and_then(|n| arena.get_binary_expr(n)),
            arena.get(test_binary.right).and_then(|n| arena.get_binary_expr(n)),
        );
        match sides {
            (Some(left), Some(right)) => {
                operands.extend([left.left, left.right, right.left, right.right]);
                combined_operator(test_binary.operator, left.operator, right.operator)
            }
            _ => None,
        }
    };
    let Some(operator) = operator else {
        return Ok(());
    };
    let is_positive = matches!(
        operator,
        SyntaxKind::EqualsEqualsToken | SyntaxKind::EqualsEqualsEqualsToken
    );
    let when_true = skip_parentheses(arena, conditional.when_true);
    let when_false = skip_parentheses(arena, conditional.when_false);

    let mut identifier = None;
    let mut has_undefined_check = false;
    let mut has_null_check = false;
    for operand in operands {
        let operand = skip_parentheses(arena, operand);
        if is_null_literal(arena, operand) {
            has_null_check = true;
        } else if is_undefined_identifier(arena, operand) {
            has_undefined_check = true;
        } else if !is_positive && is_nodes_equal(arena, operand, when_true) {
            identifier = Some(operand);
        } else if is_positive && is_nodes_equal(arena, operand, when_false) {
            identifier = Some(operand);
        } else {
            return Ok(());
        }
    }
    let Some(identifier) = identifier else {
        return Ok(());
    };

    let fixable = if has_undefined_check == has_null_check {
        has_undefined_check
    } else if matches!(
        operator,
        SyntaxKind::EqualsEqualsToken | SyntaxKind::ExclamationEqualsToken
    ) {
        true
    } else {
        // A strict check for only one of null/undefined may be dropped when
        // the type cannot hold the other one.
        let db = ctx.db()?;
        let type_id = ctx.type_at(identifier)?;
        if is_type_flag_set(db, type_id, TypeFlags::ANY_OR_UNKNOWN) {
            false
        } else if has_undefined_check {
            !is_type_flag_set(db, type_id, TypeFlags::NULL)
        } else {
            !is_type_flag_set(db, type_id, TypeFlags::UNDEFINED)
        }
    };
    if !fixable {
        return Ok(());
    }

    let (value, fallback) = if is_positive {
        (conditional.when_false, conditional.when_true)
    } else {
        (conditional.when_true, conditional.when_false)
    };
    let fixer = ctx.fixer();
    let operand_text = |operand: NodeIndex| {
        if needs_parentheses_around_coalesce(arena, operand) {
            format!("({})", fixer.text(operand))
        } else {
            fixer.text(operand).to_string()
        }
    };
    let text = format!("{} ?? {}", operand_text(value), operand_text(fallback));
    let fix = fixer.fix(FIX_DESCRIPTION, vec![fixer.replace(node, text)]);
    ctx.report(Report::new("preferNullishOverTernary", ctx.range(node)).fix(fix));
    Ok(())
}

/// Equality operator equivalent to two comparisons joined by `||` (both
/// positive) or `&&` (both negative). Mixing strict and loose comparisons
/// yields the loose form.
fn combined_operator(
    logical: SyntaxKind,
    left: SyntaxKind,
    right: SyntaxKind,
) -> Option<SyntaxKind> {
    let (strict, loose) = match logical {
        SyntaxKind::BarBarToken => (
            SyntaxKind::EqualsEqualsEqualsToken,
            SyntaxKind::EqualsEqualsToken,
        ),
        SyntaxKind::AmpersandAmpersandToken => (
            SyntaxKind::ExclamationEqualsEqualsToken,
            SyntaxKind::ExclamationEqualsToken,
        ),
        _ => return None,
    };
    if left == strict && right == strict {
        Some(strict)
    } else if (left == strict || left == loose) && (right == strict || right == loose) {
        Some(loose)
    } else {
        None
    }
}
