use pretty_assertions::assert_eq;
use tsl_common::diagnostics::format_message;
use tsl_common::{Diagnostic, DiagnosticCategory, EditError, Fix, TextEdit};

fn edit(start: u32, end: u32, text: &str) -> TextEdit {
    TextEdit::new("test.ts", start, end, text)
}

#[test]
fn test_fix_apply_removal_and_replacement() {
    let text = "const x = <number>(3 + 5);";
    let fix = Fix::new("Remove assertion", vec![edit(10, 18, "")]);
    assert_eq!(fix.apply(text).unwrap(), "const x = (3 + 5);");

    let fix = Fix::new("Use ??", vec![edit(2, 4, "??")]);
    assert_eq!(fix.apply("a || b").unwrap(), "a ?? b");
}

#[test]
fn test_fix_apply_keeps_insertion_order() {
    let fix = Fix::new(
        "Wrap",
        vec![edit(0, 0, "("), edit(6, 6, ")"), edit(2, 4, "??")],
    );
    assert_eq!(fix.apply("a || b").unwrap(), "(a ?? b)");
}

#[test]
fn test_fix_rejects_overlap_and_out_of_bounds() {
    let overlapping = Fix::new("bad", vec![edit(0, 3, ""), edit(2, 4, "")]);
    assert!(matches!(
        overlapping.apply("abcdef"),
        Err(EditError::Overlapping { .. })
    ));

    let out_of_bounds = Fix::new("bad", vec![edit(4, 40, "")]);
    assert!(matches!(
        out_of_bounds.apply("abcdef"),
        Err(EditError::OutOfBounds { .. })
    ));

    let inverted = Fix::new("bad", vec![edit(4, 2, "")]);
    assert!(inverted.validate(6).is_err());
}

#[test]
fn test_format_message() {
    assert_eq!(
        format_message("Cases not matched: {0} in {1}", &["\"b\"", "x"]),
        "Cases not matched: \"b\" in x"
    );
}

#[test]
fn test_diagnostic_serializes_camel_case() {
    let diagnostic = Diagnostic {
        file: "test.ts".to_string(),
        rule: "no-duplicate-case".to_string(),
        message_id: "unexpected".to_string(),
        category: DiagnosticCategory::Error,
        message_text: "Duplicate case label.".to_string(),
        start: 4,
        end: 10,
        fixes: Vec::new(),
    };
    let json = diagnostic.to_json();
    assert_eq!(json["messageId"], "unexpected");
    assert_eq!(json["category"], "error");
    assert!(json.get("fixes").is_none());
    assert_eq!(diagnostic.length(), 6);
}
