//! Where the nullability of a member access or call comes from.
//!
//! In `a?.b.c` the type of `a?.b` includes `undefined` only because of the
//! optional step before it. Rules judging a later step need to tell that
//! inherited nullability apart from a member that is nullable on its own.

use crate::context::RuleContext;
use crate::error::RuleFailure;
use tsl_syntax::utilities::is_literal_expression;
use tsl_syntax::{NodeArena, NodeIndex, SyntaxKind};
use tsl_types::format::number_to_string;
use tsl_types::type_queries::{
    index_signature_key_types, index_signature_type, is_array_type, is_nullable_type,
    is_optional_property, is_tuple_type, is_union_type, literal_value, property_type,
    union_type_parts,
};
use tsl_types::{LiteralValue, TypeDatabase, TypeId};

/// Receiver of a member access or callee of a call, and whether the step
/// is written with `?.`.
pub(crate) fn chain_link(arena: &NodeArena, node: NodeIndex) -> Option<(NodeIndex, bool)> {
    let n = arena.get(node)?;
    if let Some(access) = arena.get_access_expr(n) {
        return Some((access.expression, access.question_dot_token.is_some()));
    }
    if n.kind == SyntaxKind::CallExpression {
        let call = arena.get_call_expr(n)?;
        return Some((call.expression, call.question_dot_token.is_some()));
    }
    None
}

/// `arr[i]` on an array type, or on a tuple with a computed index. Index
/// types say nothing about out-of-bounds reads, so these are never judged.
pub(crate) fn is_array_index_expression(
    ctx: &RuleContext<'_>,
    node: NodeIndex,
) -> Result<bool, RuleFailure> {
    let arena = ctx.arena();
    let Some(access) = arena
        .get(node)
        .filter(|n| n.kind == SyntaxKind::ElementAccessExpression)
        .and_then(|n| arena.get_access_expr(n))
    else {
        return Ok(false);
    };
    let db = ctx.db()?;
    let object = ctx.type_at(access.expression)?;
    let is_array = union_type_parts(db, object)
        .iter()
        .all(|&part| is_array_type(db, part));
    Ok(is_array
        || (is_tuple_type(db, object) && !is_literal_expression(arena, access.name_or_argument)))
}

/// Some optional step of the chain ending at `node` reads an array index.
pub(crate) fn option_chain_contains_option_array_index(
    ctx: &RuleContext<'_>,
    node: NodeIndex,
) -> Result<bool, RuleFailure> {
    let arena = ctx.arena();
    let Some((receiver, optional)) = chain_link(arena, node) else {
        return Ok(false);
    };
    if optional && is_array_index_expression(ctx, receiver)? {
        return Ok(true);
    }
    if chain_link(arena, receiver).is_some() {
        return option_chain_contains_option_array_index(ctx, receiver);
    }
    Ok(false)
}

/// Reading `key` from `object` may produce `null` or `undefined`.
pub(crate) fn is_nullable_property_type(
    db: &dyn TypeDatabase,
    object: TypeId,
    key: TypeId,
) -> bool {
    if is_union_type(db, key) {
        return union_type_parts(db, key)
            .into_iter()
            .any(|part| is_nullable_property_type(db, object, part));
    }
    let name = match literal_value(db, key) {
        Some(LiteralValue::String(name)) => Some(name.to_string()),
        Some(LiteralValue::Number(value)) => Some(number_to_string(value.0)),
        _ => None,
    };
    if let Some(name) = name
        && let Some(property) = property_type(db, object, &name)
    {
        return is_nullable_type(db, property);
    }
    index_signature_key_types(db, object).contains(&key)
}

/// `a.b` where `a` is nullable but no non-nullish part of `a` declares a
/// nullable `b`: the nullability of `a.b` comes from `a`.
pub(crate) fn is_member_expression_nullable_origin_from_object(
    ctx: &RuleContext<'_>,
    node: NodeIndex,
) -> Result<bool, RuleFailure> {
    let arena = ctx.arena();
    let Some(n) = arena.get(node) else {
        return Ok(false);
    };
    let Some(access) = arena.get_access_expr(n) else {
        return Ok(false);
    };
    let computed = n.kind == SyntaxKind::ElementAccessExpression;
    let Some(name) = arena.identifier_text(access.name_or_argument) else {
        return Ok(false);
    };

    let db = ctx.db()?;
    let previous = ctx.constrained_type_at(access.expression)?;
    if !is_union_type(db, previous) {
        return Ok(false);
    }
    let key = if computed {
        Some(ctx.constrained_type_at(access.name_or_argument)?)
    } else {
        None
    };
    let own_nullable = union_type_parts(db, previous).into_iter().any(|part| match key {
        Some(key) => is_nullable_property_type(db, part, key),
        None => match property_type(db, part, name) {
            Some(property) => is_nullable_type(db, property),
            None => index_signature_type(db, part, TypeId::STRING).is_some(),
        },
    });
    Ok(!own_nullable && is_nullable_type(db, previous))
}

/// `f()` where `f` is nullable but none of its signatures returns a
/// nullable type.
pub(crate) fn is_call_expression_nullable_origin_from_callee(
    ctx: &RuleContext<'_>,
    node: NodeIndex,
) -> Result<bool, RuleFailure> {
    let arena = ctx.arena();
    let Some(call) = arena
        .get(node)
        .filter(|n| n.kind == SyntaxKind::CallExpression)
        .and_then(|n| arena.get_call_expr(n))
    else {
        return Ok(false);
    };
    let db = ctx.db()?;
    let previous = ctx.constrained_type_at(call.expression)?;
    if !is_union_type(db, previous) {
        return Ok(false);
    }
    let own_nullable = union_type_parts(db, previous).into_iter().any(|part| {
        db.call_signatures(part)
            .iter()
            .any(|signature| is_nullable_type(db, signature.return_type))
    });
    Ok(!own_nullable && is_nullable_type(db, previous))
}

/// A member read that may be absent even though its type says otherwise:
/// an optional property (`exactOptionalPropertyTypes` drops the implied
/// `undefined`) or an index whose value type is nullable.
pub(crate) fn is_nullable_member_expression(
    ctx: &RuleContext<'_>,
    node: NodeIndex,
) -> Result<bool, RuleFailure> {
    let arena = ctx.arena();
    let Some(n) = arena.get(node) else {
        return Ok(false);
    };
    let Some(access) = arena.get_access_expr(n) else {
        return Ok(false);
    };
    let db = ctx.db()?;
    let object = ctx.type_at(access.expression)?;
    if n.kind == SyntaxKind::ElementAccessExpression {
        let key = ctx.type_at(access.name_or_argument)?;
        return Ok(is_nullable_property_type(db, object, key));
    }
    Ok(arena
        .identifier_text(access.name_or_argument)
        .is_some_and(|name| is_optional_property(db, object, name)))
}
