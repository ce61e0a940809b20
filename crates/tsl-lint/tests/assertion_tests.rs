mod support;

use pretty_assertions::assert_eq;
use serde_json::json;
use support::{apply_single_fix, bound_table, lint, lint_syntactic, lint_with, message_ids};
use tsl_syntax::{NodeIndex, SourceBuilder, SyntaxKind, VariableKind};
use tsl_types::{TypeId, TypeOracle, TypeTable};

const TYPE_ASSERTION: &str = "no-unnecessary-type-assertion";
const NON_NULL: &str = "no-unnecessary-non-null-assertion";
const EXTRA_NON_NULL: &str = "no-extra-non-null-assertion";

#[test]
fn test_angle_bracket_assertion_on_same_type() {
    let mut b = SourceBuilder::new("test.ts");
    let mut sum = NodeIndex::NONE;
    let decl = b.var_decl(VariableKind::Const, "x", None, |b| {
        b.type_assertion("number", |b| {
            sum = b.paren(|b| {
                let three = b.number("3");
                b.binary(three, SyntaxKind::PlusToken, |b| b.number("5"))
            });
            sum
        })
    });
    let file = b.finish(vec![decl]);
    assert_eq!(file.text(), "const x = <number>(3 + 5);\n");

    let mut table = TypeTable::new();
    table.set_type(sum, TypeId::NUMBER);
    table.bind(&file);

    let diagnostics = lint(TYPE_ASSERTION, &file, &table);
    assert_eq!(message_ids(&diagnostics), vec!["unnecessaryAssertion"]);
    assert_eq!(
        apply_single_fix(&file, &diagnostics[0]),
        "const x = (3 + 5);\n"
    );
}

#[test]
fn test_const_assertion_is_kept_by_default() {
    let mut b = SourceBuilder::new("test.ts");
    let decl = b.var_decl(VariableKind::Const, "y", None, |b| {
        let foo = b.string("foo");
        b.as_expr(foo, "const")
    });
    let file = b.finish(vec![decl]);
    let table = bound_table(&file);

    assert!(lint(TYPE_ASSERTION, &file, &table).is_empty());
}

#[test]
fn test_literal_assertion_on_const_declaration() {
    let mut b = SourceBuilder::new("test.ts");
    let decl = b.var_decl(VariableKind::Const, "z", None, |b| {
        let foo = b.string("foo");
        b.as_expr(foo, "'foo'")
    });
    let file = b.finish(vec![decl]);
    let table = bound_table(&file);

    let diagnostics = lint(TYPE_ASSERTION, &file, &table);
    assert_eq!(message_ids(&diagnostics), vec!["unnecessaryAssertion"]);
    assert_eq!(apply_single_fix(&file, &diagnostics[0]), "const z = 'foo';\n");
}

#[test]
fn test_literal_assertion_on_let_declaration_is_needed() {
    // Without the assertion `let` would widen to `string`.
    let mut b = SourceBuilder::new("test.ts");
    let decl = b.var_decl(VariableKind::Let, "z", None, |b| {
        let foo = b.string("foo");
        b.as_expr(foo, "'foo'")
    });
    let file = b.finish(vec![decl]);
    let table = bound_table(&file);

    assert!(lint(TYPE_ASSERTION, &file, &table).is_empty());
}

fn foo_alias_file() -> (tsl_syntax::SourceFile, TypeTable) {
    let mut b = SourceBuilder::new("test.ts");
    let decl = b.declare_var(VariableKind::Const, "x", "Foo");
    let stmt = b.expr_stmt(|b| {
        let x = b.ident("x");
        b.as_expr(x, "Foo")
    });
    let file = b.finish(vec![decl, stmt]);
    let mut table = TypeTable::new();
    table.define_type("Foo", TypeId::STRING);
    table.bind(&file);
    (file, table)
}

#[test]
fn test_as_suffix_removed() {
    let (file, table) = foo_alias_file();
    let diagnostics = lint(TYPE_ASSERTION, &file, &table);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        apply_single_fix(&file, &diagnostics[0]),
        "declare const x: Foo;\nx;\n"
    );
}

#[test]
fn test_types_to_ignore() {
    let (file, table) = foo_alias_file();
    let diagnostics = lint_with(
        TYPE_ASSERTION,
        json!({ "typesToIgnore": ["Foo"] }),
        &file,
        &table,
    );
    assert!(diagnostics.is_empty());
}

#[test]
fn test_non_null_on_non_nullable_value() {
    let mut b = SourceBuilder::new("test.ts");
    let decl = b.var_decl(VariableKind::Const, "a", Some("string"), |b| b.string("x"));
    let stmt = b.expr_stmt(|b| {
        let a = b.ident("a");
        b.non_null(a)
    });
    let file = b.finish(vec![decl, stmt]);
    let table = bound_table(&file);

    let diagnostics = lint(NON_NULL, &file, &table);
    assert_eq!(message_ids(&diagnostics), vec!["unnecessaryAssertion"]);
    assert_eq!(
        apply_single_fix(&file, &diagnostics[0]),
        "const a: string = 'x';\na;\n"
    );
}

#[test]
fn test_non_null_on_nullable_value_is_needed() {
    let mut b = SourceBuilder::new("test.ts");
    let decl = b.declare_var(VariableKind::Const, "b", "string | undefined");
    let stmt = b.expr_stmt(|b| {
        let id = b.ident("b");
        b.non_null(id)
    });
    let file = b.finish(vec![decl, stmt]);
    let table = bound_table(&file);

    assert!(lint(NON_NULL, &file, &table).is_empty());
}

#[test]
fn test_non_null_on_possibly_unassigned_variable() {
    let mut b = SourceBuilder::new("test.ts");
    let decl = b.var_decl_uninit(VariableKind::Let, "c", Some("string"));
    let stmt = b.expr_stmt(|b| {
        let c = b.ident("c");
        b.non_null(c)
    });
    let file = b.finish(vec![decl, stmt]);
    let table = bound_table(&file);

    assert!(lint(NON_NULL, &file, &table).is_empty());
}

#[test]
fn test_non_null_on_ambient_declaration_without_initializer() {
    let mut b = SourceBuilder::new("test.ts");
    let decl = b.declare_var(VariableKind::Let, "c", "string");
    let stmt = b.expr_stmt(|b| {
        let c = b.ident("c");
        b.non_null(c)
    });
    let file = b.finish(vec![decl, stmt]);
    assert_eq!(file.text(), "declare let c: string;\nc!;\n");
    let table = bound_table(&file);

    assert!(lint(NON_NULL, &file, &table).is_empty());
}

#[test]
fn test_non_null_where_receiver_accepts_nullish() {
    let mut b = SourceBuilder::new("test.ts");
    let decl = b.declare_var(VariableKind::Const, "d", "string | undefined");
    let mut bang = NodeIndex::NONE;
    let stmt = b.expr_stmt(|b| {
        let d = b.ident("d");
        bang = b.non_null(d);
        bang
    });
    let file = b.finish(vec![decl, stmt]);
    let mut table = bound_table(&file);
    let optional_string = table.interner().union2(TypeId::STRING, TypeId::UNDEFINED);
    table.set_contextual_type(bang, optional_string);

    let diagnostics = lint(NON_NULL, &file, &table);
    assert_eq!(message_ids(&diagnostics), vec!["contextuallyUnnecessary"]);
    assert_eq!(
        diagnostics[0].message_text,
        "This assertion is unnecessary since the receiver accepts the original type of the expression."
    );
    assert_eq!(
        apply_single_fix(&file, &diagnostics[0]),
        "declare const d: string | undefined;\nd;\n"
    );
}

#[test]
fn test_non_null_contextual_type_without_nullish() {
    let mut b = SourceBuilder::new("test.ts");
    let decl = b.declare_var(VariableKind::Const, "d", "string | undefined");
    let mut bang = NodeIndex::NONE;
    let stmt = b.expr_stmt(|b| {
        let d = b.ident("d");
        bang = b.non_null(d);
        bang
    });
    let file = b.finish(vec![decl, stmt]);
    let mut table = bound_table(&file);
    table.set_contextual_type(bang, TypeId::STRING);

    assert!(lint(NON_NULL, &file, &table).is_empty());
    assert!(table.contextual_type(bang).is_some());
}

#[test]
fn test_double_non_null_assertion() {
    let mut b = SourceBuilder::new("test.ts");
    let stmt = b.expr_stmt(|b| {
        let a = b.ident("a");
        let inner = b.non_null(a);
        b.non_null(inner)
    });
    let file = b.finish(vec![stmt]);
    assert_eq!(file.text(), "a!!;\n");

    let diagnostics = lint_syntactic(EXTRA_NON_NULL, serde_json::Value::Null, &file);
    assert_eq!(message_ids(&diagnostics), vec!["noExtraNonNullAssertion"]);
    assert_eq!((diagnostics[0].start, diagnostics[0].end), (0, 2));
    assert_eq!(apply_single_fix(&file, &diagnostics[0]), "a!;\n");
}

#[test]
fn test_non_null_before_optional_chain() {
    let mut b = SourceBuilder::new("test.ts");
    let stmt = b.expr_stmt(|b| {
        let a = b.ident("a");
        let bang = b.non_null(a);
        b.optional_property_access(bang, "b")
    });
    let file = b.finish(vec![stmt]);
    assert_eq!(file.text(), "a!?.b;\n");

    let diagnostics = lint_syntactic(EXTRA_NON_NULL, serde_json::Value::Null, &file);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(apply_single_fix(&file, &diagnostics[0]), "a?.b;\n");
}
