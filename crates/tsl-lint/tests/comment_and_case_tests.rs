mod support;

use pretty_assertions::assert_eq;
use serde_json::Value;
use support::{apply_single_fix, lint_syntactic, message_ids, reported_text};
use tsl_syntax::{SourceBuilder, SourceFile};

const EXPECT_ERROR: &str = "prefer-ts-expect-error";
const DUPLICATE_CASE: &str = "no-duplicate-case";

fn commented_statement(comment: &str) -> SourceFile {
    let mut b = SourceBuilder::new("test.ts");
    b.comment(comment);
    let stmt = b.expr_stmt(|b| b.ident("x"));
    b.finish(vec![stmt])
}

fn rewrite(comment: &str) -> Option<String> {
    let file = commented_statement(comment);
    let diagnostics = lint_syntactic(EXPECT_ERROR, Value::Null, &file);
    match diagnostics.as_slice() {
        [] => None,
        [diagnostic] => {
            assert_eq!(diagnostic.message_id, "preferExpectErrorComment");
            assert_eq!(reported_text(&file, diagnostic), comment);
            Some(apply_single_fix(&file, diagnostic))
        }
        more => panic!("expected at most one diagnostic, got {}", more.len()),
    }
}

#[test]
fn test_line_comment_directive() {
    assert_eq!(
        rewrite("// @ts-ignore").as_deref(),
        Some("// @ts-expect-error\nx;\n")
    );
    assert_eq!(
        rewrite("/// @ts-ignore").as_deref(),
        Some("/// @ts-expect-error\nx;\n")
    );
}

#[test]
fn test_block_comment_directive() {
    assert_eq!(
        rewrite("/* @ts-ignore */").as_deref(),
        Some("/* @ts-expect-error */\nx;\n")
    );
    assert_eq!(
        rewrite("/**\n * @ts-ignore */").as_deref(),
        Some("/**\n * @ts-expect-error */\nx;\n")
    );
}

#[test]
fn test_comments_that_are_not_directives() {
    assert_eq!(rewrite("// @ts-expect-error"), None);
    assert_eq!(rewrite("// some @ts-ignore"), None);
    assert_eq!(rewrite("/* @ts-ignore\n * is not on the last line */"), None);
}

#[test]
fn test_each_comment_reported_once() {
    let mut b = SourceBuilder::new("test.ts");
    b.comment("// @ts-ignore");
    let first = b.expr_stmt(|b| b.ident("x"));
    b.comment("// @ts-ignore");
    let second = b.expr_stmt(|b| b.ident("y"));
    let file = b.finish(vec![first, second]);

    let diagnostics = lint_syntactic(EXPECT_ERROR, Value::Null, &file);
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics[0].start < diagnostics[1].start);
}

fn switch_with_cases(tests: &[&str]) -> SourceFile {
    let mut b = SourceBuilder::new("test.ts");
    let stmt = b.switch_stmt(
        |b| b.ident("x"),
        |b| {
            tests
                .iter()
                .map(|test| b.case_clause(|b| b.number(test), |b| vec![b.break_stmt()]))
                .collect()
        },
    );
    b.finish(vec![stmt])
}

#[test]
fn test_duplicate_case_label() {
    let file = switch_with_cases(&["1", "2", "1"]);
    let diagnostics = lint_syntactic(DUPLICATE_CASE, Value::Null, &file);
    assert_eq!(message_ids(&diagnostics), vec!["unexpected"]);
    assert_eq!(diagnostics[0].message_text, "Duplicate case label.");
    assert_eq!(
        reported_text(&file, &diagnostics[0]),
        "case 1:\n        break;"
    );
    let third_case = file.text().rfind("case 1").unwrap() as u32;
    assert_eq!(diagnostics[0].start, third_case);
}

#[test]
fn test_repeated_duplicates_compare_against_first() {
    let file = switch_with_cases(&["1", "1", "1"]);
    let diagnostics = lint_syntactic(DUPLICATE_CASE, Value::Null, &file);
    assert_eq!(diagnostics.len(), 2);
}

#[test]
fn test_distinct_case_labels() {
    let file = switch_with_cases(&["1", "2", "3"]);
    assert!(lint_syntactic(DUPLICATE_CASE, Value::Null, &file).is_empty());
}

#[test]
fn test_duplicate_case_rejects_options() {
    let error = support::linter_error(DUPLICATE_CASE, serde_json::json!({ "foo": 1 }));
    assert!(error.contains("no-duplicate-case"));
}
