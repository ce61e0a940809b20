use tsl_common::ScriptTarget;
use tsl_syntax::utilities::{
    enclosing_source_file, first_token, is_nodes_equal, is_token_equal, last_token,
    needs_quoting, node_at_offset, skip_parentheses, token_after, token_before,
    walk_up_parentheses,
};
use tsl_syntax::{Node, NodeIndex, SourceBuilder, SyntaxKind, VariableKind};

#[test]
fn test_token_before_and_after_as_keyword() {
    let mut b = SourceBuilder::new("test.ts");
    let (mut x, mut assertion) = (NodeIndex::NONE, NodeIndex::NONE);
    let stmt = b.var_decl(VariableKind::Const, "y", None, |b| {
        x = b.ident("x");
        assertion = b.as_expr(x, "string");
        assertion
    });
    let file = b.finish(vec![stmt]);
    let arena = file.arena();

    let as_token = token_after(arena, x, None).unwrap();
    assert_eq!(arena.kind(as_token), Some(SyntaxKind::AsKeyword));
    assert_eq!(token_before(arena, as_token, None), Some(x));

    let is_as: &dyn Fn(&Node) -> bool = &|n| n.kind == SyntaxKind::AsKeyword;
    assert_eq!(token_after(arena, x, Some(is_as)), Some(as_token));
    assert_eq!(token_before(arena, as_token, Some(is_as)), None);
}

#[test]
fn test_token_before_descends_into_siblings() {
    let mut b = SourceBuilder::new("test.ts");
    let mut paren = NodeIndex::NONE;
    let mut assertion = NodeIndex::NONE;
    let stmt = b.expr_stmt(|b| {
        paren = b.paren(|b| {
            let left = b.ident("a");
            b.binary(left, SyntaxKind::PlusToken, |b| b.ident("b"))
        });
        assertion = b.as_expr(paren, "number");
        assertion
    });
    let file = b.finish(vec![stmt]);
    let arena = file.arena();

    let as_token = token_after(arena, paren, None).unwrap();
    let before = token_before(arena, as_token, None).unwrap();
    assert_eq!(arena.kind(before), Some(SyntaxKind::CloseParenToken));
    assert_eq!(last_token(arena, paren), Some(before));
    assert_eq!(
        arena.kind(first_token(arena, assertion).unwrap()),
        Some(SyntaxKind::OpenParenToken)
    );
}

#[test]
fn test_node_at_offset() {
    let mut b = SourceBuilder::new("test.ts");
    let stmt = b.expr_stmt(|b| {
        let a = b.ident("a");
        let non_null = b.non_null(a);
        b.property_access(non_null, "b")
    });
    let file = b.finish(vec![stmt]);
    let arena = file.arena();
    let root = file.root();

    assert_eq!(file.text(), "a!.b;\n");
    let at = |offset| arena.kind(node_at_offset(arena, root, offset));
    assert_eq!(at(0), Some(SyntaxKind::Identifier));
    assert_eq!(at(1), Some(SyntaxKind::ExclamationToken));
    assert_eq!(at(2), Some(SyntaxKind::DotToken));
    assert_eq!(at(4), Some(SyntaxKind::SemicolonToken));
    assert_eq!(at(6), Some(SyntaxKind::EndOfFileToken));
}

#[test]
fn test_enclosing_source_file_and_parentheses() {
    let mut b = SourceBuilder::new("test.ts");
    let (mut inner, mut outer) = (NodeIndex::NONE, NodeIndex::NONE);
    let stmt = b.expr_stmt(|b| {
        outer = b.paren(|b| {
            b.paren(|b| {
                inner = b.ident("a");
                inner
            })
        });
        outer
    });
    let file = b.finish(vec![stmt]);
    let arena = file.arena();

    assert_eq!(enclosing_source_file(arena, inner), Some(file.root()));
    assert_eq!(skip_parentheses(arena, outer), inner);
    assert_eq!(walk_up_parentheses(arena, inner), outer);
}

#[test]
fn test_nodes_equal_member_chains() {
    let mut b = SourceBuilder::new("test.ts");
    let mut sides = Vec::new();
    let stmt = b.expr_stmt(|b| {
        let a = b.ident("a");
        let left = b.property_access(a, "b");
        let comparison = b.binary(left, SyntaxKind::EqualsEqualsEqualsToken, |b| {
            let a = b.ident("a");
            b.property_access(a, "b")
        });
        let comparison = b.binary(comparison, SyntaxKind::AmpersandAmpersandToken, |b| {
            let a = b.ident("a");
            b.property_access(a, "c")
        });
        sides.push(left);
        comparison
    });
    let file = b.finish(vec![stmt]);
    let arena = file.arena();

    let outer = arena.get_binary_expr(arena.get(arena.children(stmt)[0]).unwrap()).unwrap();
    let inner = arena.get_binary_expr(arena.get(outer.left).unwrap()).unwrap();
    assert!(is_nodes_equal(arena, inner.left, inner.right));
    assert!(!is_nodes_equal(arena, inner.left, outer.right));
    assert!(is_token_equal(&file, inner.left, inner.right));
    assert!(!is_token_equal(&file, sides[0], outer.right));
}

#[test]
fn test_needs_quoting() {
    assert!(needs_quoting("", ScriptTarget::ESNext));
    assert!(needs_quoting("a-b", ScriptTarget::ESNext));
    assert!(needs_quoting("1a", ScriptTarget::ESNext));
    assert!(needs_quoting("a b", ScriptTarget::ESNext));
    assert!(!needs_quoting("Apple", ScriptTarget::ESNext));
    assert!(!needs_quoting("$_x1", ScriptTarget::ESNext));
    assert!(!needs_quoting("ünï", ScriptTarget::ESNext));
    assert!(!needs_quoting("\u{10480}", ScriptTarget::ESNext));
    assert!(needs_quoting("\u{10480}", ScriptTarget::ES5));
}
