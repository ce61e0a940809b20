use tsl_types::type_queries::*;
use tsl_types::{
    IndexSignature, ObjectShape, PropertyInfo, TypeFlags, TypeId, TypeInterner, type_to_string,
};

#[test]
fn test_flags_of_boolean_and_literals() {
    let db = TypeInterner::new();
    assert!(flags_of(&db, TypeId::BOOLEAN).contains(TypeFlags::UNION | TypeFlags::BOOLEAN));
    assert_eq!(flags_of(&db, TypeId::TRUE), TypeFlags::BOOLEAN_LITERAL);
    assert_eq!(flags_of(&db, db.literal_string("a")), TypeFlags::STRING_LITERAL);
    assert_eq!(flags_of(&db, TypeId::OBJECT), TypeFlags::NON_PRIMITIVE);
    assert_eq!(flags_of(&db, db.array(TypeId::STRING)), TypeFlags::OBJECT);
}

#[test]
fn test_flag_set_aggregates_union_parts() {
    let db = TypeInterner::new();
    let maybe = db.union2(TypeId::STRING, TypeId::UNDEFINED);
    assert!(is_type_flag_set(&db, maybe, TypeFlags::UNDEFINED));
    assert!(is_type_flag_set(&db, maybe, TypeFlags::STRING));
    assert!(!is_type_flag_set(&db, maybe, TypeFlags::NULL));
    assert!(is_nullable_type(&db, maybe));
    assert!(is_possibly_nullish(&db, maybe));
    assert!(!is_always_nullish(&db, maybe));
    assert!(is_always_nullish(&db, db.union2(TypeId::NULL, TypeId::UNDEFINED)));
}

#[test]
fn test_atomic_parts_flatten_intersections() {
    let db = TypeInterner::new();
    let brand = db.unique_symbol("brand");
    let branded = db.intersection(vec![TypeId::STRING, brand]);
    let either = db.union2(branded, TypeId::NUMBER);
    assert_eq!(union_type_parts(&db, either).len(), 2);
    assert_eq!(atomic_type_parts(&db, either).len(), 3);
    assert!(is_union_type(&db, either));
    assert!(is_intersection_type(&db, branded));
}

#[test]
fn test_truthiness_queries() {
    let db = TypeInterner::new();
    let empty = db.literal_string("");
    let word = db.literal_string("x");

    assert!(is_possibly_falsy(&db, TypeId::STRING));
    assert!(is_possibly_truthy(&db, TypeId::STRING));
    assert!(!is_possibly_falsy(&db, word));
    assert!(is_possibly_truthy(&db, word));
    assert!(is_possibly_falsy(&db, empty));
    assert!(!is_possibly_truthy(&db, empty));
    assert!(is_possibly_falsy(&db, TypeId::BOOLEAN));
    assert!(!is_possibly_truthy(&db, TypeId::NULL));
    assert!(!is_possibly_truthy(&db, TypeId::VOID));
    assert!(!is_possibly_falsy(&db, db.array(TypeId::NUMBER)));
    assert!(is_truthy_literal(&db, TypeId::TRUE));
    assert!(is_falsy_type(&db, db.literal_number(0.0)));
    assert!(is_literal_like(&db, TypeId::UNDEFINED));
    assert!(!is_literal_like(&db, TypeId::STRING));
}

#[test]
fn test_base_constraint_follows_chain() {
    let db = TypeInterner::new();
    let u = db.type_parameter("U", Some(TypeId::STRING));
    let t = db.type_parameter("T", Some(u));
    let free = db.type_parameter("V", None);
    assert_eq!(base_constraint(&db, t), TypeId::STRING);
    assert_eq!(base_constraint(&db, free), free);
    assert!(is_type_parameter(&db, free));
}

#[test]
fn test_property_and_index_lookup() {
    let db = TypeInterner::new();
    let object = db.object(ObjectShape {
        properties: vec![
            PropertyInfo::new("a", TypeId::NUMBER),
            PropertyInfo::optional("b", TypeId::STRING),
        ],
        index_signatures: vec![IndexSignature {
            key_type: TypeId::STRING,
            value_type: TypeId::BOOLEAN,
        }],
        ..ObjectShape::default()
    });
    assert_eq!(property_type(&db, object, "a"), Some(TypeId::NUMBER));
    assert_eq!(
        property_type(&db, object, "b"),
        Some(db.union2(TypeId::STRING, TypeId::UNDEFINED))
    );
    assert_eq!(property_type(&db, object, "c"), None);
    assert_eq!(index_signature_key_types(&db, object), vec![TypeId::STRING]);
    assert_eq!(
        index_signature_type(&db, object, TypeId::STRING),
        Some(TypeId::BOOLEAN)
    );

    let pair = db.tuple(vec![TypeId::STRING, TypeId::NUMBER]);
    assert_eq!(property_type(&db, pair, "1"), Some(TypeId::NUMBER));
    assert!(is_array_or_tuple_type(&db, pair));
    assert_eq!(
        index_signature_key_types(&db, db.array(TypeId::STRING)),
        vec![TypeId::NUMBER]
    );
}

#[test]
fn test_call_signature_returns() {
    let db = TypeInterner::new();
    let f = db.function(TypeId::VOID);
    let g = db.function(TypeId::NUMBER);
    let either = db.union2(f, g);
    let mut returns = call_signature_return_types(&db, either);
    returns.sort();
    assert_eq!(returns, vec![TypeId::VOID, TypeId::NUMBER]);
}

#[test]
fn test_type_to_string() {
    let db = TypeInterner::new();
    let maybe = db.union(vec![TypeId::UNDEFINED, TypeId::STRING, TypeId::NULL]);
    assert_eq!(type_to_string(&db, maybe), "string | null | undefined");
    assert_eq!(type_to_string(&db, TypeId::BOOLEAN), "boolean");
    assert_eq!(
        type_to_string(&db, db.union2(TypeId::BOOLEAN, TypeId::NUMBER)),
        "number | boolean"
    );
    assert_eq!(type_to_string(&db, db.literal_string("a")), "\"a\"");
    assert_eq!(type_to_string(&db, db.literal_number(1.5)), "1.5");
    assert_eq!(type_to_string(&db, db.literal_number(2.0)), "2");
    assert_eq!(type_to_string(&db, db.literal_bigint("10")), "10n");
    assert_eq!(type_to_string(&db, db.unique_symbol("key")), "typeof key");
    assert_eq!(
        type_to_string(&db, db.array(db.union2(TypeId::STRING, TypeId::NUMBER))),
        "(string | number)[]"
    );
    assert_eq!(type_to_string(&db, db.function(TypeId::VOID)), "() => void");
}
