//! Tree query utilities.
//!
//! Token lookup, positional lookup, parenthesis skipping and structural node
//! comparison. Nothing here needs type information.

use crate::node::{Node, NodeArena, NodeIndex};
use crate::source_file::SourceFile;
use crate::{SyntaxKind, visit};
use tsl_common::common::ScriptTarget;

/// First token of a subtree in document order.
#[must_use]
pub fn first_token(arena: &NodeArena, index: NodeIndex) -> Option<NodeIndex> {
    let node = arena.get(index)?;
    if node.kind.is_token() {
        return Some(index);
    }
    node.children
        .iter()
        .find_map(|&child| first_token(arena, child))
}

/// Last token of a subtree in document order.
#[must_use]
pub fn last_token(arena: &NodeArena, index: NodeIndex) -> Option<NodeIndex> {
    let node = arena.get(index)?;
    if node.kind.is_token() {
        return Some(index);
    }
    node.children
        .iter()
        .rev()
        .find_map(|&child| last_token(arena, child))
}

/// Find the token before `index` among the tokens of its parent, i.e. the
/// preceding siblings and their descendants. `condition` narrows the search;
/// `None` accepts any token.
#[must_use]
pub fn token_before(
    arena: &NodeArena,
    index: NodeIndex,
    condition: Option<&dyn Fn(&Node) -> bool>,
) -> Option<NodeIndex> {
    let siblings = arena.children(arena.parent(index));
    let position = siblings.iter().position(|&s| s == index)?;
    siblings[..position]
        .iter()
        .rev()
        .flat_map(|&sibling| {
            let mut tokens: Vec<NodeIndex> = visit::tokens(arena, sibling).collect();
            tokens.reverse();
            tokens
        })
        .find(|&token| matches_condition(arena, token, condition))
}

/// Find the token after `index` among the tokens of its parent.
#[must_use]
pub fn token_after(
    arena: &NodeArena,
    index: NodeIndex,
    condition: Option<&dyn Fn(&Node) -> bool>,
) -> Option<NodeIndex> {
    let siblings = arena.children(arena.parent(index));
    let position = siblings.iter().position(|&s| s == index)?;
    siblings[position + 1..]
        .iter()
        .flat_map(|&sibling| visit::tokens(arena, sibling))
        .find(|&token| matches_condition(arena, token, condition))
}

fn matches_condition(
    arena: &NodeArena,
    token: NodeIndex,
    condition: Option<&dyn Fn(&Node) -> bool>,
) -> bool {
    match (condition, arena.get(token)) {
        (None, Some(_)) => true,
        (Some(cond), Some(node)) => cond(node),
        (_, None) => false,
    }
}

/// First direct child token of the given kind.
#[must_use]
pub fn child_token(arena: &NodeArena, index: NodeIndex, kind: SyntaxKind) -> Option<NodeIndex> {
    arena
        .children(index)
        .iter()
        .copied()
        .find(|&c| arena.kind(c) == Some(kind))
}

/// Deepest node whose `[pos, end)` contains `offset`. An offset at the very
/// end of the file resolves to the end-of-file token.
#[must_use]
pub fn node_at_offset(arena: &NodeArena, root: NodeIndex, offset: u32) -> NodeIndex {
    let mut current = root;
    'descend: loop {
        for &child in arena.children(current) {
            let Some(node) = arena.get(child) else {
                continue;
            };
            let contains = node.pos <= offset && offset < node.end;
            let at_eof = node.kind == SyntaxKind::EndOfFileToken && offset >= node.pos;
            if contains || at_eof {
                current = child;
                continue 'descend;
            }
        }
        return current;
    }
}

/// Follow parents up to the `SourceFile` node.
#[must_use]
pub fn enclosing_source_file(arena: &NodeArena, index: NodeIndex) -> Option<NodeIndex> {
    if arena.kind(index) == Some(SyntaxKind::SourceFile) {
        return Some(index);
    }
    visit::ancestors(arena, index).find(|&a| arena.kind(a) == Some(SyntaxKind::SourceFile))
}

/// Nearest ancestor satisfying `predicate`.
#[must_use]
pub fn find_ancestor(
    arena: &NodeArena,
    index: NodeIndex,
    predicate: impl Fn(&Node) -> bool,
) -> Option<NodeIndex> {
    visit::ancestors(arena, index).find(|&a| arena.get(a).is_some_and(&predicate))
}

/// Strip any number of enclosing parentheses from an expression.
#[must_use]
pub fn skip_parentheses(arena: &NodeArena, mut index: NodeIndex) -> NodeIndex {
    while let Some(node) = arena.get(index)
        && let Some(paren) = arena.get_parenthesized(node)
    {
        index = paren.expression;
    }
    index
}

/// Walk up through parenthesized parents, returning the outermost one (or
/// `index` itself when it is not parenthesized).
#[must_use]
pub fn walk_up_parentheses(arena: &NodeArena, mut index: NodeIndex) -> NodeIndex {
    while arena.kind(arena.parent(index)) == Some(SyntaxKind::ParenthesizedExpression) {
        index = arena.parent(index);
    }
    index
}

#[must_use]
pub fn is_parenthesized(arena: &NodeArena, index: NodeIndex) -> bool {
    arena.kind(arena.parent(index)) == Some(SyntaxKind::ParenthesizedExpression)
}

/// Operator of a binary expression, if `index` is one.
#[must_use]
pub fn binary_operator(arena: &NodeArena, index: NodeIndex) -> Option<SyntaxKind> {
    let node = arena.get(index)?;
    arena.get_binary_expr(node).map(|b| b.operator)
}

/// `a && b`, `a || b` or `a ?? b`.
#[must_use]
pub fn is_logical_expression(arena: &NodeArena, index: NodeIndex) -> bool {
    binary_operator(arena, index).is_some_and(SyntaxKind::is_logical_operator)
}

/// `undefined` written as an identifier.
#[must_use]
pub fn is_undefined_identifier(arena: &NodeArena, index: NodeIndex) -> bool {
    arena.identifier_text(index) == Some("undefined")
}

#[must_use]
pub fn is_null_literal(arena: &NodeArena, index: NodeIndex) -> bool {
    arena.kind(index) == Some(SyntaxKind::NullKeyword)
}

/// Literal expressions whose value is fixed by their spelling.
#[must_use]
pub fn is_literal_expression(arena: &NodeArena, index: NodeIndex) -> bool {
    matches!(
        arena.kind(index),
        Some(
            SyntaxKind::StringLiteral
                | SyntaxKind::NumericLiteral
                | SyntaxKind::BigIntLiteral
                | SyntaxKind::NoSubstitutionTemplateLiteral
                | SyntaxKind::TrueKeyword
                | SyntaxKind::FalseKeyword
                | SyntaxKind::NullKeyword
        )
    )
}

/// Structural equality of identifiers, `this`, literals and member access
/// chains. Any other shape compares unequal.
#[must_use]
pub fn is_nodes_equal(arena: &NodeArena, a: NodeIndex, b: NodeIndex) -> bool {
    let (Some(left), Some(right)) = (arena.get(a), arena.get(b)) else {
        return false;
    };
    if left.kind != right.kind {
        return false;
    }
    match left.kind {
        SyntaxKind::ThisKeyword | SyntaxKind::NullKeyword => true,
        SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => true,
        SyntaxKind::Identifier => arena.identifier_text(a) == arena.identifier_text(b),
        SyntaxKind::StringLiteral
        | SyntaxKind::NumericLiteral
        | SyntaxKind::BigIntLiteral
        | SyntaxKind::NoSubstitutionTemplateLiteral => {
            arena.get_literal(left).map(|l| &l.text) == arena.get_literal(right).map(|l| &l.text)
        }
        SyntaxKind::PropertyAccessExpression | SyntaxKind::ElementAccessExpression => {
            match (arena.get_access_expr(left), arena.get_access_expr(right)) {
                (Some(l), Some(r)) => {
                    l.question_dot_token.is_some() == r.question_dot_token.is_some()
                        && is_nodes_equal(arena, l.name_or_argument, r.name_or_argument)
                        && is_nodes_equal(arena, l.expression, r.expression)
                }
                _ => false,
            }
        }
        _ => false,
    }
}

/// Token-by-token equality of two subtrees, ignoring trivia.
#[must_use]
pub fn is_token_equal(file: &SourceFile, a: NodeIndex, b: NodeIndex) -> bool {
    let arena = file.arena();
    let mut left = visit::tokens(arena, a);
    let mut right = visit::tokens(arena, b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return true,
            (Some(l), Some(r)) => {
                if arena.kind(l) != arena.kind(r) || file.node_text(l) != file.node_text(r) {
                    return false;
                }
            }
            _ => return false,
        }
    }
}

// =============================================================================
// Identifier validity
// =============================================================================

fn is_identifier_start(ch: char, target: ScriptTarget) -> bool {
    if ch.is_ascii() {
        return ch.is_ascii_alphabetic() || ch == '$' || ch == '_';
    }
    if !target.supports_astral_identifiers() && u32::from(ch) > 0xFFFF {
        return false;
    }
    ch.is_alphabetic()
}

fn is_identifier_part(ch: char, target: ScriptTarget) -> bool {
    if ch.is_ascii() {
        return ch.is_ascii_alphanumeric() || ch == '$' || ch == '_';
    }
    if !target.supports_astral_identifiers() && u32::from(ch) > 0xFFFF {
        return false;
    }
    // ZWNJ and ZWJ are valid identifier parts.
    ch.is_alphanumeric() || ch == '\u{200C}' || ch == '\u{200D}'
}

/// True when `name` cannot be written as a dotted property name and needs
/// bracket notation with a quoted string instead.
#[must_use]
pub fn needs_quoting(name: &str, target: ScriptTarget) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return true;
    };
    if !is_identifier_start(first, target) {
        return true;
    }
    chars.any(|ch| !is_identifier_part(ch, target))
}
