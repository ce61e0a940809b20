use pretty_assertions::assert_eq;
use tsl_types::{LiteralValue, OrderedFloat, TypeData, TypeDatabase, TypeId, TypeInterner};

#[test]
fn test_builtins_have_fixed_ids() {
    let interner = TypeInterner::new();
    assert_eq!(interner.len(), TypeId::FIRST_USER as usize);
    assert_eq!(
        interner.lookup(TypeId::BOOLEAN),
        Some(TypeData::Union([TypeId::TRUE, TypeId::FALSE].into()))
    );
    assert!(TypeId::NULL.is_builtin());
    assert!(!TypeId(TypeId::FIRST_USER).is_builtin());
}

#[test]
fn test_interning_is_structural() {
    let interner = TypeInterner::new();
    let a = interner.literal_string("a");
    let again = interner.literal_string("a");
    let b = interner.literal_string("b");
    assert_eq!(a, again);
    assert_ne!(a, b);
    assert_eq!(interner.literal_number(1.0), interner.literal_number(1.0));
    assert_eq!(interner.literal_boolean(true), TypeId::TRUE);
}

#[test]
fn test_union_normalization() {
    let interner = TypeInterner::new();
    let a = interner.literal_string("a");
    let b = interner.literal_string("b");

    let ab = interner.union(vec![b, a, a]);
    let ba = interner.union(vec![a, b]);
    assert_eq!(ab, ba);

    // Nested unions flatten.
    let abc = interner.union(vec![ab, interner.literal_string("c")]);
    let flat = interner.union(vec![
        a,
        b,
        interner.literal_string("c"),
    ]);
    assert_eq!(abc, flat);

    assert_eq!(interner.union(vec![a, TypeId::STRING]), TypeId::STRING);
    assert_eq!(interner.union(vec![a, TypeId::ANY]), TypeId::ANY);
    assert_eq!(interner.union(vec![a, TypeId::UNKNOWN]), TypeId::UNKNOWN);
    assert_eq!(interner.union(vec![a, TypeId::NEVER]), a);
    assert_eq!(interner.union(vec![]), TypeId::NEVER);
    assert_eq!(
        interner.union(vec![TypeId::TRUE, TypeId::FALSE]),
        TypeId::BOOLEAN
    );
}

#[test]
fn test_intersection_normalization() {
    let interner = TypeInterner::new();
    let a = interner.literal_string("a");
    assert_eq!(interner.intersection(vec![a, TypeId::UNKNOWN]), a);
    assert_eq!(interner.intersection(vec![a, TypeId::NEVER]), TypeId::NEVER);
    assert_eq!(interner.intersection(vec![]), TypeId::UNKNOWN);
    let both = interner.intersection(vec![TypeId::STRING, interner.unique_symbol("brand")]);
    assert!(matches!(
        interner.lookup(both),
        Some(TypeData::Intersection(parts)) if parts.len() == 2
    ));
}

#[test]
fn test_enum_type_is_union_of_members() {
    let interner = TypeInterner::new();
    let fruit = interner.enum_type(
        "Fruit",
        &[
            ("Apple", LiteralValue::Number(OrderedFloat(0.0))),
            ("Banana", LiteralValue::Number(OrderedFloat(1.0))),
        ],
    );
    let Some(TypeData::Union(members)) = interner.lookup(fruit) else {
        panic!("enum should be a union");
    };
    assert_eq!(members.len(), 2);
    let names: Vec<String> = members
        .iter()
        .filter_map(|&m| interner.symbol_name(m))
        .map(|n| n.to_string())
        .collect();
    assert!(names.contains(&"Apple".to_string()));
    assert!(names.contains(&"Banana".to_string()));
}

#[test]
fn test_literal_truthiness() {
    assert!(!LiteralValue::String("".into()).is_truthy());
    assert!(LiteralValue::String("0".into()).is_truthy());
    assert!(!LiteralValue::Number(OrderedFloat(0.0)).is_truthy());
    assert!(!LiteralValue::Number(OrderedFloat(f64::NAN)).is_truthy());
    assert!(!LiteralValue::BigInt("0".into()).is_truthy());
    assert!(LiteralValue::BigInt("10".into()).is_truthy());
}
