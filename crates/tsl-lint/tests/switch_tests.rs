mod support;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use support::{apply, apply_single_fix, bound_table, lint, lint_with, message_ids};
use tsl_syntax::{NodeIndex, SourceBuilder, SourceFile, VariableKind};
use tsl_types::{LiteralValue, OrderedFloat, TypeTable};

const RULE: &str = "switch-exhaustiveness-check";

/// `switch (t.k) { case 'a': break; }`, plus a `default` clause when asked.
/// `t.k` is typed `"a" | "b"`.
fn union_switch(with_default: bool) -> (SourceFile, TypeTable) {
    let mut b = SourceBuilder::new("test.ts");
    let mut discriminant = NodeIndex::NONE;
    let stmt = b.switch_stmt(
        |b| {
            let t = b.ident("t");
            discriminant = b.property_access(t, "k");
            discriminant
        },
        |b| {
            let mut clauses = vec![b.case_clause(|b| b.string("a"), |b| vec![b.break_stmt()])];
            if with_default {
                clauses.push(b.default_clause(|b| vec![b.break_stmt()]));
            }
            clauses
        },
    );
    let file = b.finish(vec![stmt]);
    let mut table = TypeTable::new();
    let a = table.interner().literal_string("a");
    let b_literal = table.interner().literal_string("b");
    let union = table.interner().union2(a, b_literal);
    table.set_type(discriminant, union);
    table.bind(&file);
    (file, table)
}

#[test]
fn test_missing_union_member() {
    let (file, table) = union_switch(false);
    assert_eq!(
        file.text(),
        "switch (t.k) {\n    case 'a':\n        break;\n}\n"
    );

    let diagnostics = lint(RULE, &file, &table);
    assert_eq!(message_ids(&diagnostics), vec!["switchIsNotExhaustive"]);
    assert_eq!(
        diagnostics[0].message_text,
        "Switch is not exhaustive. Cases not matched: \"b\""
    );
    assert_eq!(diagnostics[0].fixes[0].description, "Add branch for `\"b\"`");
    assert_eq!(
        apply_single_fix(&file, &diagnostics[0]),
        "switch (t.k) {\n    case \"b\": { throw new Error('Not implemented yet: \"b\" case') }\n    case 'a':\n        break;\n}\n"
    );
}

#[test]
fn test_default_covers_missing_members() {
    let (file, table) = union_switch(true);
    assert!(lint(RULE, &file, &table).is_empty());

    let diagnostics = lint_with(
        RULE,
        json!({ "considerDefaultExhaustiveForUnions": false }),
        &file,
        &table,
    );
    assert_eq!(message_ids(&diagnostics), vec!["switchIsNotExhaustive"]);
}

fn exhaustive_switch_with_default() -> SourceFile {
    let mut b = SourceBuilder::new("test.ts");
    let decl = b.declare_var(VariableKind::Const, "k", "'a' | 'b'");
    let stmt = b.switch_stmt(
        |b| b.ident("k"),
        |b| {
            vec![
                b.case_clause(|b| b.string("a"), |b| vec![b.break_stmt()]),
                b.case_clause(|b| b.string("b"), |b| vec![b.break_stmt()]),
                b.default_clause(|b| vec![b.break_stmt()]),
            ]
        },
    );
    b.finish(vec![decl, stmt])
}

#[test]
fn test_default_on_exhaustive_switch() {
    let file = exhaustive_switch_with_default();
    let table = bound_table(&file);
    assert!(lint(RULE, &file, &table).is_empty());

    let diagnostics = lint_with(
        RULE,
        json!({ "allowDefaultCaseForExhaustiveSwitch": false }),
        &file,
        &table,
    );
    assert_eq!(message_ids(&diagnostics), vec!["dangerousDefaultCase"]);
    assert!(
        support::reported_text(&file, &diagnostics[0]).starts_with("default:")
    );
}

#[test]
fn test_require_default_for_non_union() {
    let mut b = SourceBuilder::new("test.ts");
    let decl = b.declare_var(VariableKind::Const, "n", "number");
    let stmt = b.switch_stmt(
        |b| b.ident("n"),
        |b| vec![b.case_clause(|b| b.number("1"), |b| vec![b.break_stmt()])],
    );
    let file = b.finish(vec![decl, stmt]);
    let table = bound_table(&file);
    assert!(lint(RULE, &file, &table).is_empty());

    let diagnostics = lint_with(
        RULE,
        json!({ "requireDefaultForNonUnion": true }),
        &file,
        &table,
    );
    assert_eq!(message_ids(&diagnostics), vec!["switchIsNotExhaustive"]);
    assert_eq!(
        diagnostics[0].message_text,
        "Switch is not exhaustive. Cases not matched: default"
    );
    assert_eq!(
        apply_single_fix(&file, &diagnostics[0]),
        "declare const n: number;\nswitch (n) {\n    case 1:\n        break;\n    default: { throw new Error('default case') }\n}\n"
    );
}

#[test]
fn test_empty_switch_gets_a_fix_per_member() {
    let mut b = SourceBuilder::new("test.ts");
    let decl = b.declare_var(VariableKind::Const, "k", "'a' | 'b'");
    let stmt = b.switch_stmt(|b| b.ident("k"), |_| vec![]);
    let file = b.finish(vec![decl, stmt]);
    assert_eq!(file.text(), "declare const k: 'a' | 'b';\nswitch (k) {}\n");
    let table = bound_table(&file);

    let diagnostics = lint(RULE, &file, &table);
    assert_eq!(diagnostics.len(), 1);
    let mut descriptions: Vec<&str> = diagnostics[0]
        .fixes
        .iter()
        .map(|f| f.description.as_str())
        .collect();
    descriptions.sort_unstable();
    assert_eq!(
        descriptions,
        vec!["Add branch for `\"a\"`", "Add branch for `\"b\"`"]
    );

    let fix_a = diagnostics[0]
        .fixes
        .iter()
        .find(|f| f.description.contains("\"a\""))
        .unwrap();
    assert_eq!(
        apply(&file, fix_a),
        "declare const k: 'a' | 'b';\nswitch (k) {\ncase \"a\": { throw new Error('Not implemented yet: \"a\" case') }\n}\n"
    );
}

#[test]
fn test_enum_member_needing_quotes() {
    let mut b = SourceBuilder::new("test.ts");
    let (mut discriminant, mut apple_test) = (NodeIndex::NONE, NodeIndex::NONE);
    let stmt = b.switch_stmt(
        |b| {
            discriminant = b.ident("f");
            discriminant
        },
        |b| {
            vec![b.case_clause(
                |b| {
                    let fruit = b.ident("Fruit");
                    apple_test = b.property_access(fruit, "Apple");
                    apple_test
                },
                |b| vec![b.break_stmt()],
            )]
        },
    );
    let file = b.finish(vec![stmt]);

    let mut table = TypeTable::new();
    let fruit = table.interner().enum_type(
        "Fruit",
        &[
            ("Apple", LiteralValue::Number(OrderedFloat(0.0))),
            ("Blood-Orange", LiteralValue::Number(OrderedFloat(1.0))),
        ],
    );
    let apple = table
        .interner()
        .enum_literal("Fruit", "Apple", LiteralValue::Number(OrderedFloat(0.0)));
    table.set_type(discriminant, fruit);
    table.set_type(apple_test, apple);
    table.bind(&file);

    let diagnostics = lint_with(RULE, Value::Null, &file, &table);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].message_text,
        "Switch is not exhaustive. Cases not matched: Fruit[\"Blood-Orange\"]"
    );
    assert_eq!(
        diagnostics[0].fixes[0].description,
        "Add branch for `Fruit['Blood-Orange']`"
    );
    assert_eq!(
        apply_single_fix(&file, &diagnostics[0]),
        "switch (f) {\n    case Fruit['Blood-Orange']: { throw new Error('Not implemented yet: Fruit[\\'Blood-Orange\\'] case') }\n    case Fruit.Apple:\n        break;\n}\n"
    );
}

#[test]
fn test_unique_symbol_members() {
    let mut b = SourceBuilder::new("test.ts");
    let mut discriminant = NodeIndex::NONE;
    let stmt = b.switch_stmt(
        |b| {
            discriminant = b.ident("s");
            discriminant
        },
        |b| vec![b.default_clause(|b| vec![b.break_stmt()])],
    );
    let file = b.finish(vec![stmt]);

    let mut table = TypeTable::new();
    let up = table.interner().unique_symbol("up");
    let down = table.interner().unique_symbol("down");
    let union = table.interner().union2(up, down);
    table.set_type(discriminant, union);
    table.bind(&file);

    let diagnostics = lint_with(
        RULE,
        json!({ "considerDefaultExhaustiveForUnions": false }),
        &file,
        &table,
    );
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message_text.contains("typeof up"));
    assert!(diagnostics[0].message_text.contains("typeof down"));
    assert!(
        diagnostics[0]
            .fixes
            .iter()
            .any(|f| f.description == "Add branch for `up`")
    );
}
