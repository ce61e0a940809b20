//! `switch-exhaustiveness-check`: switches over literal unions must handle
//! every member.
//!
//! The discriminant's constrained type is split into union members and
//! those into intersection parts. Every literal-like part (literal, `null`,
//! `undefined`, unique symbol) without a `case` of the identical type is a
//! missing branch.

use crate::config::parse_options;
use crate::context::{Report, RuleContext};
use crate::error::{ConfigError, RuleFailure};
use crate::rule::{Rule, RuleMeta, RuleResult, Subscription};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tsl_common::{Fix, TextEdit};
use tsl_syntax::utilities::needs_quoting;
use tsl_syntax::{NodeIndex, SyntaxKind};
use tsl_types::type_queries::{
    atomic_type_parts, enum_name_of, flags_of, intersection_type_parts, is_literal_like,
    member_name_of, union_type_parts,
};
use tsl_types::{TypeFlags, TypeId, type_to_string};

pub const NAME: &str = "switch-exhaustiveness-check";

static META: RuleMeta = RuleMeta {
    name: NAME,
    description: "Require switch statements over unions to be exhaustive",
    requires_type_info: true,
    messages: &[
        (
            "switchIsNotExhaustive",
            "Switch is not exhaustive. Cases not matched: {0}",
        ),
        (
            "dangerousDefaultCase",
            "The switch statement is exhaustive, so the default case is unnecessary.",
        ),
        ("addMissingCases", "Add branches for missing cases."),
    ],
};

#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Keep `default` on switches that already cover every member.
    pub allow_default_case_for_exhaustive_switch: bool,
    /// Switches over non-literal types (`string`, `number`, ...) need a
    /// `default`.
    pub require_default_for_non_union: bool,
    /// A `default` clause covers whatever union members are missing.
    pub consider_default_exhaustive_for_unions: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            allow_default_case_for_exhaustive_switch: true,
            require_default_for_non_union: false,
            consider_default_exhaustive_for_unions: true,
        }
    }
}

pub struct SwitchExhaustivenessCheck {
    options: Options,
}

pub fn create(options: &Value) -> Result<Box<dyn Rule>, ConfigError> {
    Ok(Box::new(SwitchExhaustivenessCheck {
        options: parse_options(NAME, options)?,
    }))
}

struct SwitchMetadata {
    discriminant: NodeIndex,
    clauses: Vec<NodeIndex>,
    default_clause: Option<NodeIndex>,
    /// Enum the discriminant is a union of, for quoting member names
    enum_name: Option<Arc<str>>,
    missing: Vec<TypeId>,
    contains_non_literal_type: bool,
}

impl Rule for SwitchExhaustivenessCheck {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn subscription(&self) -> Subscription {
        Subscription::Kinds(&[SyntaxKind::SwitchStatement])
    }

    fn check(&self, ctx: &mut RuleContext<'_>, node: NodeIndex) -> RuleResult {
        let metadata = switch_metadata(ctx, node)?;
        self.check_exhaustive(ctx, node, &metadata)?;
        self.check_unnecessary_default(ctx, &metadata);
        self.check_non_union_default(ctx, node, &metadata)
    }
}

impl SwitchExhaustivenessCheck {
    fn check_exhaustive(
        &self,
        ctx: &mut RuleContext<'_>,
        node: NodeIndex,
        metadata: &SwitchMetadata,
    ) -> RuleResult {
        if metadata.missing.is_empty()
            || (metadata.default_clause.is_some()
                && self.options.consider_default_exhaustive_for_unions)
        {
            return Ok(());
        }
        let db = ctx.db()?;
        let missing = metadata
            .missing
            .iter()
            .map(|&part| {
                if flags_of(db, part).intersects(TypeFlags::ES_SYMBOL_LIKE)
                    && let Some(name) = member_name_of(db, part)
                {
                    format!("typeof {name}")
                } else {
                    type_to_string(db, part)
                }
            })
            .collect::<Vec<_>>()
            .join(" | ");

        let mut report = Report::new("switchIsNotExhaustive", ctx.range(metadata.discriminant))
            .arg(missing);
        for &part in &metadata.missing {
            let test = case_test(ctx, part, metadata.enum_name.as_deref())?;
            let code = format!(
                "case {test}: {{ throw new Error('Not implemented yet: {} case') }}",
                escape_single_quoted(&test)
            );
            report = report.fix(insert_clause(
                ctx,
                node,
                metadata,
                &code,
                &format!("Add branch for `{test}`"),
                Placement::BeforeLast,
            )?);
        }
        ctx.report(report);
        Ok(())
    }

    fn check_unnecessary_default(&self, ctx: &mut RuleContext<'_>, metadata: &SwitchMetadata) {
        if self.options.allow_default_case_for_exhaustive_switch {
            return;
        }
        if let Some(default_clause) = metadata.default_clause
            && metadata.missing.is_empty()
            && !metadata.contains_non_literal_type
        {
            ctx.report(Report::new("dangerousDefaultCase", ctx.range(default_clause)));
        }
    }

    fn check_non_union_default(
        &self,
        ctx: &mut RuleContext<'_>,
        node: NodeIndex,
        metadata: &SwitchMetadata,
    ) -> RuleResult {
        if !self.options.require_default_for_non_union
            || !metadata.contains_non_literal_type
            || metadata.default_clause.is_some()
        {
            return Ok(());
        }
        let fix = insert_clause(
            ctx,
            node,
            metadata,
            "default: { throw new Error('default case') }",
            "Add a default clause",
            Placement::AfterLast,
        )?;
        ctx.report(
            Report::new("switchIsNotExhaustive", ctx.range(metadata.discriminant))
                .arg("default")
                .fix(fix),
        );
        Ok(())
    }
}

fn switch_metadata(ctx: &RuleContext<'_>, node: NodeIndex) -> Result<SwitchMetadata, RuleFailure> {
    let arena = ctx.arena();
    let unexpected = RuleFailure::UnexpectedShape {
        expected: SyntaxKind::SwitchStatement,
        node,
    };
    let switch = arena
        .get(node)
        .and_then(|n| arena.get_switch(n))
        .ok_or(unexpected)?;
    let clauses: Vec<NodeIndex> = arena
        .get(switch.case_block)
        .and_then(|b| arena.get_block(b))
        .map(|b| b.statements.to_vec())
        .unwrap_or_default();

    let db = ctx.db()?;
    let discriminant_type = ctx.constrained_type_at(switch.expression)?;
    let mut default_clause = None;
    let mut case_types = Vec::with_capacity(clauses.len());
    for &clause in &clauses {
        let Some(data) = arena.get(clause).and_then(|c| arena.get_case_clause(c)) else {
            continue;
        };
        match data.expression.into_option() {
            Some(test) => case_types.push(ctx.constrained_type_at(test)?),
            None => default_clause = Some(clause),
        }
    }

    let missing = atomic_type_parts(db, discriminant_type)
        .into_iter()
        .filter(|&part| is_literal_like(db, part) && !case_types.contains(&part))
        .collect();
    let contains_non_literal_type = union_type_parts(db, discriminant_type)
        .into_iter()
        .any(|part| {
            intersection_type_parts(db, part)
                .into_iter()
                .all(|p| !is_literal_like(db, p))
        });

    Ok(SwitchMetadata {
        discriminant: switch.expression,
        clauses,
        default_clause,
        enum_name: enum_name_of(db, discriminant_type),
        missing,
        contains_non_literal_type,
    })
}

/// Case expression for a missing member: the printed type, the symbol name
/// for unique symbols, or `Enum['member']` when the member is not a valid
/// identifier.
fn case_test(
    ctx: &RuleContext<'_>,
    part: TypeId,
    enum_name: Option<&str>,
) -> Result<String, RuleFailure> {
    let db = ctx.db()?;
    let member = member_name_of(db, part);
    let mut test = match &member {
        Some(name) if flags_of(db, part).intersects(TypeFlags::ES_SYMBOL_LIKE) => name.to_string(),
        _ => type_to_string(db, part),
    };
    if let Some(enum_name) = enum_name
        && let Some(member) = member
        && needs_quoting(&member, ctx.compiler_options()?.target)
    {
        let escaped = member
            .replace('\'', "\\'")
            .replace('\n', "\\n")
            .replace('\r', "\\r");
        test = format!("{enum_name}['{escaped}']");
    }
    Ok(test)
}

fn escape_single_quoted(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}

#[derive(Clone, Copy)]
enum Placement {
    BeforeLast,
    AfterLast,
}

/// Insert a clause next to the last existing one, copying its indentation,
/// or fill an empty case block using the switch's indentation.
fn insert_clause(
    ctx: &RuleContext<'_>,
    node: NodeIndex,
    metadata: &SwitchMetadata,
    code: &str,
    description: &str,
    placement: Placement,
) -> Result<Fix, RuleFailure> {
    let fixer = ctx.fixer();
    let column = |index: NodeIndex| {
        let position = ctx.file().offset_to_position(fixer.range(index).0);
        " ".repeat(position.character as usize)
    };

    let edit: TextEdit = match metadata.clauses.last() {
        Some(&last) => {
            let indent = column(last);
            match placement {
                Placement::BeforeLast => fixer.insert_before(last, format!("{code}\n{indent}")),
                Placement::AfterLast => fixer.insert_after(last, format!("\n{indent}{code}")),
            }
        }
        None => {
            let arena = ctx.arena();
            let case_block = arena
                .get(node)
                .and_then(|n| arena.get_switch(n))
                .map(|s| s.case_block)
                .ok_or(RuleFailure::MissingToken {
                    expected: "{",
                    node,
                })?;
            let indent = column(node);
            fixer.replace(case_block, format!("{{\n{indent}{code}\n{indent}}}"))
        }
    };
    Ok(fixer.fix(description, vec![edit]))
}
