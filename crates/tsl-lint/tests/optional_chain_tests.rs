mod support;

use pretty_assertions::assert_eq;
use support::{apply_single_fix, lint, message_ids, reported_text};
use tsl_syntax::{SourceBuilder, SourceFile, VariableKind};
use tsl_types::{ObjectShape, PropertyInfo, TypeId, TypeTable};

const RULE: &str = "no-unnecessary-optional-chain";

/// `Foo { c: string }` and `Bar { b: Foo }`.
fn table_with_shapes() -> TypeTable {
    let mut table = TypeTable::new();
    let foo = table.interner().object(ObjectShape {
        name: Some("Foo".into()),
        properties: vec![PropertyInfo::new("c", TypeId::STRING)],
        ..ObjectShape::default()
    });
    let bar = table.interner().object(ObjectShape {
        name: Some("Bar".into()),
        properties: vec![PropertyInfo::new("b", foo)],
        ..ObjectShape::default()
    });
    table.define_type("Foo", foo);
    table.define_type("Bar", bar);
    table
}

fn optional_access(type_text: &str) -> SourceFile {
    let mut b = SourceBuilder::new("test.ts");
    let decl = b.declare_var(VariableKind::Const, "o", type_text);
    let stmt = b.expr_stmt(|b| {
        let o = b.ident("o");
        b.optional_property_access(o, "c")
    });
    b.finish(vec![decl, stmt])
}

#[test]
fn test_optional_access_on_non_nullable_receiver() {
    let file = optional_access("Foo");
    let mut table = table_with_shapes();
    table.bind(&file);

    let diagnostics = lint(RULE, &file, &table);
    assert_eq!(message_ids(&diagnostics), vec!["neverOptionalChain"]);
    assert_eq!(reported_text(&file, &diagnostics[0]), "?.");
    assert_eq!(
        apply_single_fix(&file, &diagnostics[0]),
        "declare const o: Foo;\no.c;\n"
    );
}

#[test]
fn test_optional_access_on_nullable_receiver() {
    let file = optional_access("Foo | undefined");
    let mut table = table_with_shapes();
    table.bind(&file);

    assert!(lint(RULE, &file, &table).is_empty());
}

#[test]
fn test_optional_access_on_any() {
    let file = optional_access("any");
    let mut table = table_with_shapes();
    table.bind(&file);

    assert!(lint(RULE, &file, &table).is_empty());
}

#[test]
fn test_inherited_nullability_in_chain() {
    // `a?.b` is `Foo | undefined` only because of the first step.
    let mut b = SourceBuilder::new("test.ts");
    let decl = b.declare_var(VariableKind::Const, "a", "Bar | undefined");
    let stmt = b.expr_stmt(|b| {
        let a = b.ident("a");
        let ab = b.optional_property_access(a, "b");
        b.optional_property_access(ab, "c")
    });
    let file = b.finish(vec![decl, stmt]);
    assert_eq!(
        file.text(),
        "declare const a: Bar | undefined;\na?.b?.c;\n"
    );
    let mut table = table_with_shapes();
    table.bind(&file);

    let diagnostics = lint(RULE, &file, &table);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].start, 38);
    assert_eq!(
        apply_single_fix(&file, &diagnostics[0]),
        "declare const a: Bar | undefined;\na?.b.c;\n"
    );
}

#[test]
fn test_optional_call_on_function() {
    let mut b = SourceBuilder::new("test.ts");
    let decl = b.declare_var(VariableKind::Const, "f", "Fn");
    let stmt = b.expr_stmt(|b| {
        let f = b.ident("f");
        b.optional_call(f, |_| vec![])
    });
    let file = b.finish(vec![decl, stmt]);
    let mut table = TypeTable::new();
    let function = table.interner().function(TypeId::NUMBER);
    table.define_type("Fn", function);
    table.bind(&file);

    let diagnostics = lint(RULE, &file, &table);
    assert_eq!(message_ids(&diagnostics), vec!["neverOptionalChain"]);
    assert_eq!(
        apply_single_fix(&file, &diagnostics[0]),
        "declare const f: Fn;\nf();\n"
    );
}
