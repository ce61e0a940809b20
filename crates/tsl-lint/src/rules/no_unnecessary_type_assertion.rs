//! `no-unnecessary-type-assertion`: `x as T` and `<T>x` where `x` already
//! has type `T` and would keep it without the assertion.

use crate::config::parse_options;
use crate::context::{Report, RuleContext};
use crate::error::{ConfigError, RuleFailure};
use crate::rule::{Rule, RuleMeta, RuleResult, Subscription};
use serde::Deserialize;
use serde_json::Value;
use tsl_common::TextEdit;
use tsl_syntax::utilities::{token_after, token_before};
use tsl_syntax::{Node, NodeIndex, SyntaxKind, VariableKind};
use tsl_types::type_queries::{flags_of, is_type_flag_set, union_type_parts};
use tsl_types::{TypeDatabase, TypeFlags, TypeId};

pub const NAME: &str = "no-unnecessary-type-assertion";

static META: RuleMeta = RuleMeta {
    name: NAME,
    description: "Disallow type assertions that do not change the type of an expression",
    requires_type_info: true,
    messages: &[(
        "unnecessaryAssertion",
        "This assertion is unnecessary since it does not change the type of the expression.",
    )],
};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Type annotations, as written, whose assertions are never reported.
    pub types_to_ignore: Vec<String>,
    /// Report `x as const` when `x` already has the literal type.
    pub check_literal_const_assertions: bool,
}

pub struct NoUnnecessaryTypeAssertion {
    options: Options,
}

pub fn create(options: &Value) -> Result<Box<dyn Rule>, ConfigError> {
    Ok(Box::new(NoUnnecessaryTypeAssertion {
        options: parse_options(NAME, options)?,
    }))
}

impl Rule for NoUnnecessaryTypeAssertion {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn subscription(&self) -> Subscription {
        Subscription::Kinds(&[
            SyntaxKind::AsExpression,
            SyntaxKind::TypeAssertionExpression,
        ])
    }

    fn check(&self, ctx: &mut RuleContext<'_>, node: NodeIndex) -> RuleResult {
        let arena = ctx.arena();
        let Some(n) = arena.get(node) else {
            return Ok(());
        };
        let assertion = arena.get_type_assertion(n).ok_or(RuleFailure::UnexpectedShape {
            expected: n.kind,
            node,
        })?;
        let file = ctx.file();
        let type_text = file.node_text(assertion.type_node);
        if self.options.types_to_ignore.iter().any(|t| t == type_text) {
            return Ok(());
        }

        let db = ctx.db()?;
        let cast = ctx.type_at(node)?;
        let cast_is_literal = is_literal_type(db, cast);
        let const_assertion = is_const_assertion(ctx, assertion.type_node);
        if cast_is_literal && const_assertion && !self.options.check_literal_const_assertions {
            return Ok(());
        }

        let uncast = ctx.type_at(assertion.expression)?;
        let unchanged = is_type_unchanged(ctx, db, uncast, cast)?;
        let same_type_inferred = if cast_is_literal {
            is_implicitly_narrowed_const_declaration(ctx, node, assertion.expression)
        } else {
            !const_assertion
        };
        if !(unchanged && same_type_inferred) {
            return Ok(());
        }

        let edit = if n.kind == SyntaxKind::TypeAssertionExpression {
            remove_angle_brackets(ctx, assertion.type_node)?
        } else {
            remove_as_suffix(ctx, node, assertion.expression)?
        };
        let fix = ctx.fixer().fix("Remove unnecessary type assertion", vec![edit]);
        ctx.report(Report::new("unnecessaryAssertion", ctx.range(node)).fix(fix));
        Ok(())
    }
}

/// String, number and bigint literal types. Boolean literals do not count:
/// `true` widens to `boolean` the same way with or without an assertion.
fn is_literal_type(db: &dyn TypeDatabase, type_id: TypeId) -> bool {
    flags_of(db, type_id).intersects(
        TypeFlags::STRING_LITERAL | TypeFlags::NUMBER_LITERAL | TypeFlags::BIGINT_LITERAL,
    )
}

fn is_const_assertion(ctx: &RuleContext<'_>, type_node: NodeIndex) -> bool {
    let arena = ctx.arena();
    arena
        .get(type_node)
        .and_then(|t| arena.get_type_ref(t))
        .is_some_and(|r| arena.identifier_text(r.type_name) == Some("const"))
}

/// Identity, except that under `exactOptionalPropertyTypes` an `undefined`
/// member present on both sides is ignored when the rest matches.
fn is_type_unchanged(
    ctx: &RuleContext<'_>,
    db: &dyn TypeDatabase,
    uncast: TypeId,
    cast: TypeId,
) -> Result<bool, RuleFailure> {
    if uncast == cast {
        return Ok(true);
    }
    if !ctx.compiler_options()?.exact_optional_property_types
        || !is_type_flag_set(db, uncast, TypeFlags::UNDEFINED)
        || !is_type_flag_set(db, cast, TypeFlags::UNDEFINED)
    {
        return Ok(false);
    }
    let defined = |t: TypeId| -> Vec<TypeId> {
        union_type_parts(db, t)
            .into_iter()
            .filter(|&part| !flags_of(db, part).contains(TypeFlags::UNDEFINED))
            .collect()
    };
    let uncast_parts = defined(uncast);
    let cast_parts = defined(cast);
    Ok(uncast_parts.len() == cast_parts.len()
        && cast_parts.iter().all(|part| uncast_parts.contains(part)))
}

/// `const x = 'a' as 'a'`: a `const` binding keeps the literal type of its
/// initializer on its own, unless the initializer is a template with
/// substitutions (those widen to `string`).
fn is_implicitly_narrowed_const_declaration(
    ctx: &RuleContext<'_>,
    node: NodeIndex,
    expression: NodeIndex,
) -> bool {
    let arena = ctx.arena();
    let declaration = arena.parent(node);
    if arena.kind(declaration) != Some(SyntaxKind::VariableDeclaration) {
        return false;
    }
    let is_const = arena
        .get(arena.parent(declaration))
        .and_then(|list| arena.get_variable_list(list))
        .is_some_and(|list| list.kind == VariableKind::Const);
    is_const && arena.kind(expression) != Some(SyntaxKind::TemplateExpression)
}

/// `<T>(x)`: remove `<` through `>`.
fn remove_angle_brackets(
    ctx: &RuleContext<'_>,
    type_node: NodeIndex,
) -> Result<TextEdit, RuleFailure> {
    let arena = ctx.arena();
    let open = token_before(
        arena,
        type_node,
        Some(&|t: &Node| t.kind == SyntaxKind::LessThanToken),
    )
    .ok_or(RuleFailure::MissingToken {
        expected: "<",
        node: type_node,
    })?;
    let close = token_after(
        arena,
        type_node,
        Some(&|t: &Node| t.kind == SyntaxKind::GreaterThanToken),
    )
    .ok_or(RuleFailure::MissingToken {
        expected: ">",
        node: type_node,
    })?;
    let fixer = ctx.fixer();
    Ok(fixer.remove_range(fixer.range(open).0, fixer.range(close).1))
}

/// `x as T`: remove from the end of whatever precedes `as` (the expression,
/// or a comment between it and `as`) to the end of the assertion.
fn remove_as_suffix(
    ctx: &RuleContext<'_>,
    node: NodeIndex,
    expression: NodeIndex,
) -> Result<TextEdit, RuleFailure> {
    let arena = ctx.arena();
    let as_token = token_after(
        arena,
        expression,
        Some(&|t: &Node| t.kind == SyntaxKind::AsKeyword),
    )
    .ok_or(RuleFailure::MissingToken {
        expected: "as",
        node,
    })?;
    let fixer = ctx.fixer();
    let expression_end = fixer.range(expression).1;
    let start = ctx
        .file()
        .leading_comments(as_token)
        .last()
        .map_or(expression_end, |comment| comment.end.max(expression_end));
    Ok(fixer.remove_range(start, fixer.range(node).1))
}
