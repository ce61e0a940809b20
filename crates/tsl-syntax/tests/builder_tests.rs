use pretty_assertions::assert_eq;
use tsl_syntax::node::node_flags;
use tsl_syntax::{
    NodeArena, NodeIndex, SourceBuilder, SourceFile, SourceFileError, SyntaxKind, VariableKind,
};

#[test]
fn test_variable_and_if_layout() {
    let mut b = SourceBuilder::new("test.ts");
    let decl = b.var_decl(VariableKind::Const, "x", Some("number"), |b| b.number("1"));
    let stmt = b.if_stmt(
        |b| b.ident("x"),
        |b| b.block(|b| vec![b.expr_stmt(|b| b.ident("x"))]),
    );
    let file = b.finish(vec![decl, stmt]);

    assert_eq!(file.text(), "const x: number = 1;\nif (x) {\n    x;\n}\n");
    assert_eq!(file.node_text(decl), "const x: number = 1;");
    assert_eq!(file.node_text(stmt), "if (x) {\n    x;\n}");
}

#[test]
fn test_switch_layout() {
    let mut b = SourceBuilder::new("test.ts");
    let stmt = b.switch_stmt(
        |b| b.ident("k"),
        |b| {
            vec![
                b.case_clause(|b| b.string("a"), |b| vec![b.break_stmt()]),
                b.default_clause(|_| vec![]),
            ]
        },
    );
    let file = b.finish(vec![stmt]);

    assert_eq!(
        file.text(),
        "switch (k) {\n    case 'a':\n        break;\n    default:\n}\n"
    );
    let arena = file.arena();
    let switch = arena.get(stmt).and_then(|n| arena.get_switch(n)).unwrap();
    let block = arena.get(switch.case_block).and_then(|n| arena.get_block(n)).unwrap();
    assert_eq!(block.statements.len(), 2);
    let default = arena.get(block.statements[1]).unwrap();
    assert_eq!(default.kind, SyntaxKind::DefaultClause);
    assert!(arena.get_case_clause(default).unwrap().expression.is_none());
}

#[test]
fn test_non_null_and_access_spans() {
    let mut b = SourceBuilder::new("test.ts");
    let mut non_null = NodeIndex::NONE;
    let stmt = b.expr_stmt(|b| {
        let a = b.ident("a");
        non_null = b.non_null(a);
        b.property_access(non_null, "b")
    });
    let file = b.finish(vec![stmt]);

    assert_eq!(file.text(), "a!.b;\n");
    let node = file.arena().get(non_null).unwrap();
    assert_eq!((node.start, node.end), (0, 2));
    assert_eq!(file.node_text(non_null), "a!");
}

#[test]
fn test_optional_chain_flags() {
    let mut b = SourceBuilder::new("test.ts");
    let (mut inner, mut outer, mut broken) = (NodeIndex::NONE, NodeIndex::NONE, NodeIndex::NONE);
    let first = b.expr_stmt(|b| {
        let a = b.ident("a");
        inner = b.optional_property_access(a, "b");
        outer = b.property_access(inner, "c");
        outer
    });
    let second = b.expr_stmt(|b| {
        let paren = b.paren(|b| {
            let a = b.ident("a");
            b.optional_property_access(a, "b")
        });
        broken = b.property_access(paren, "c");
        broken
    });
    let file = b.finish(vec![first, second]);
    let arena = file.arena();

    assert_eq!(file.text(), "a?.b.c;\n(a?.b).c;\n");
    assert!(arena.get(inner).unwrap().is_optional_chain());
    assert!(arena.get(outer).unwrap().is_optional_chain());
    assert_eq!(arena.get(broken).unwrap().flags & node_flags::OPTIONAL_CHAIN, 0);
    let access = arena.get_access_expr(arena.get(outer).unwrap()).unwrap();
    assert!(access.question_dot_token.is_none());
}

#[test]
fn test_type_assertion_layout() {
    let mut b = SourceBuilder::new("test.ts");
    let stmt = b.var_decl(VariableKind::Const, "x", None, |b| {
        b.type_assertion("number", |b| {
            b.paren(|b| {
                let left = b.number("3");
                b.binary(left, SyntaxKind::PlusToken, |b| b.number("5"))
            })
        })
    });
    let file = b.finish(vec![stmt]);
    assert_eq!(file.text(), "const x = <number>(3 + 5);\n");
}

#[test]
fn test_union_type_annotation() {
    let mut b = SourceBuilder::new("test.ts");
    let stmt = b.var_decl_uninit(VariableKind::Let, "v", Some("string | undefined"));
    let file = b.finish(vec![stmt]);
    let arena = file.arena();

    assert_eq!(file.text(), "let v: string | undefined;\n");
    let union = tsl_syntax::visit::preorder(arena, file.root())
        .find(|&i| arena.kind(i) == Some(SyntaxKind::UnionType))
        .unwrap();
    let composite = arena.get_composite_type(arena.get(union).unwrap()).unwrap();
    let kinds: Vec<_> = composite
        .types
        .iter()
        .filter_map(|&t| arena.kind(t))
        .collect();
    assert_eq!(kinds, vec![SyntaxKind::StringKeyword, SyntaxKind::UndefinedKeyword]);
}

#[test]
fn test_loops_layout() {
    let mut b = SourceBuilder::new("test.ts");
    let forever = b.for_stmt(|_| None, |b| b.block(|_| vec![]));
    let bounded = b.for_stmt(|b| Some(b.ident("x")), |b| b.block(|_| vec![]));
    let do_loop = b.do_while(|b| b.block(|_| vec![]), |b| b.ident("x"));
    let while_loop = b.while_stmt(|b| b.keyword(SyntaxKind::TrueKeyword), |b| b.block(|_| vec![]));
    let file = b.finish(vec![forever, bounded, do_loop, while_loop]);

    assert_eq!(
        file.text(),
        "for (;;) {}\nfor (; x;) {}\ndo {} while (x);\nwhile (true) {}\n"
    );
    let arena = file.arena();
    let data = arena.get_loop(arena.get(forever).unwrap()).unwrap();
    assert!(data.condition.is_none());
}

#[test]
fn test_template_expression() {
    let mut b = SourceBuilder::new("test.ts");
    let stmt = b.expr_stmt(|b| b.template_expr("x", &[("y", "z")]));
    let file = b.finish(vec![stmt]);
    assert_eq!(file.text(), "`x${y}z`;\n");
}

#[test]
fn test_call_with_arguments_and_arrow() {
    let mut b = SourceBuilder::new("test.ts");
    let mut call = NodeIndex::NONE;
    let stmt = b.expr_stmt(|b| {
        let items = b.ident("items");
        let filter = b.property_access(items, "filter");
        call = b.call(filter, |b| {
            let callback = b.arrow(&["x"], |b| b.keyword(SyntaxKind::TrueKeyword));
            let comma = b.comma();
            let this_arg = b.ident("ctx");
            vec![callback, comma, this_arg]
        });
        call
    });
    let file = b.finish(vec![stmt]);
    let arena = file.arena();

    assert_eq!(file.text(), "items.filter((x) => true, ctx);\n");
    let data = arena.get_call_expr(arena.get(call).unwrap()).unwrap();
    assert_eq!(data.arguments.len(), 2);
}

#[test]
fn test_leading_comments_attach_to_next_statement() {
    let mut b = SourceBuilder::new("test.ts");
    b.comment("// @ts-ignore");
    let stmt = b.expr_stmt(|b| b.ident("a"));
    let file = b.finish(vec![stmt]);

    assert_eq!(file.text(), "// @ts-ignore\na;\n");
    let comments = file.leading_comments(stmt);
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].get_text(file.text()), "// @ts-ignore");
    assert_eq!(file.comments().len(), 1);
}

#[test]
fn test_source_file_validation() {
    let err = SourceFile::new("test.ts", "", NodeArena::new(), NodeIndex(0)).unwrap_err();
    assert_eq!(err, SourceFileError::InvalidRoot(NodeIndex(0)));

    let mut b = SourceBuilder::new("test.ts");
    let stmt = b.expr_stmt(|b| b.ident("a"));
    let file = b.finish(vec![stmt]);
    let rebuilt = SourceFile::new(
        file.file_name(),
        file.text(),
        file.arena().clone(),
        file.root(),
    )
    .unwrap();
    assert_eq!(rebuilt.text(), file.text());

    let err = SourceFile::new("test.ts", "a", file.arena().clone(), file.root()).unwrap_err();
    assert!(matches!(err, SourceFileError::SpanOutOfBounds { .. }));
}
