use super::*;
use tsl_types::TypeInterner;

#[test]
fn test_evaluate_literal_comparisons() {
    let db = TypeInterner::new();
    let one = db.literal_number(1.0);
    let two = db.literal_number(2.0);
    let nan = db.literal_number(f64::NAN);
    let a = db.literal_string("a");
    let b = db.literal_string("b");
    let eq3 = SyntaxKind::EqualsEqualsEqualsToken;

    assert_eq!(evaluate_comparison(&db, eq3, one, one), Some(true));
    assert_eq!(evaluate_comparison(&db, eq3, one, two), Some(false));
    assert_eq!(evaluate_comparison(&db, eq3, nan, nan), Some(false));
    assert_eq!(
        evaluate_comparison(&db, SyntaxKind::LessThanToken, a, b),
        Some(true)
    );
    assert_eq!(
        evaluate_comparison(&db, SyntaxKind::EqualsEqualsToken, TypeId::NULL, TypeId::UNDEFINED),
        Some(true)
    );
    // `1 == "1"` coerces; not evaluated
    let one_str = db.literal_string("1");
    assert_eq!(evaluate_comparison(&db, SyntaxKind::EqualsEqualsToken, one, one_str), None);
    assert_eq!(evaluate_comparison(&db, eq3, TypeId::VOID, TypeId::UNDEFINED), None);
}
