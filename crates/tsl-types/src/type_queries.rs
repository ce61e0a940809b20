//! Type Query Functions
//!
//! High-level queries used by lint rules: flag testing, union and
//! intersection decomposition, property lookup, nullability and truthiness.
//! All queries take a `&dyn TypeDatabase` and never match on `TypeData`
//! outside this module.

use crate::db::TypeDatabase;
use crate::flags::TypeFlags;
use crate::oracle::TypeOracle;
use crate::types::{IntrinsicKind, LiteralValue, TypeData, TypeId};
use smallvec::SmallVec;
use std::sync::Arc;
use tsl_syntax::NodeIndex;

pub type TypeParts = SmallVec<[TypeId; 4]>;

// =============================================================================
// Flags
// =============================================================================

/// Raw flags of a type. Unions report `UNION` (plus `BOOLEAN` for
/// `true | false`), not the flags of their members.
pub fn flags_of(db: &dyn TypeDatabase, type_id: TypeId) -> TypeFlags {
    match db.lookup(type_id) {
        Some(TypeData::Intrinsic(kind)) => match kind {
            IntrinsicKind::Any => TypeFlags::ANY,
            IntrinsicKind::Unknown => TypeFlags::UNKNOWN,
            IntrinsicKind::Never => TypeFlags::NEVER,
            IntrinsicKind::Void => TypeFlags::VOID,
            IntrinsicKind::Undefined => TypeFlags::UNDEFINED,
            IntrinsicKind::Null => TypeFlags::NULL,
            IntrinsicKind::String => TypeFlags::STRING,
            IntrinsicKind::Number => TypeFlags::NUMBER,
            IntrinsicKind::BigInt => TypeFlags::BIGINT,
            IntrinsicKind::EsSymbol => TypeFlags::ES_SYMBOL,
            IntrinsicKind::Object => TypeFlags::NON_PRIMITIVE,
        },
        Some(TypeData::Literal(value)) => literal_flags(&value),
        Some(TypeData::EnumLiteral { value, .. }) => {
            TypeFlags::ENUM_LITERAL | literal_flags(&value)
        }
        Some(TypeData::UniqueSymbol { .. }) => TypeFlags::UNIQUE_ES_SYMBOL,
        Some(TypeData::TypeParameter { .. }) => TypeFlags::TYPE_PARAMETER,
        Some(TypeData::Union(_)) if type_id == TypeId::BOOLEAN => {
            TypeFlags::UNION | TypeFlags::BOOLEAN
        }
        Some(TypeData::Union(_)) => TypeFlags::UNION,
        Some(TypeData::Intersection(_)) => TypeFlags::INTERSECTION,
        Some(TypeData::Array(_) | TypeData::Tuple(_) | TypeData::Object(_)) => TypeFlags::OBJECT,
        None => TypeFlags::empty(),
    }
}

fn literal_flags(value: &LiteralValue) -> TypeFlags {
    match value {
        LiteralValue::String(_) => TypeFlags::STRING_LITERAL,
        LiteralValue::Number(_) => TypeFlags::NUMBER_LITERAL,
        LiteralValue::BigInt(_) => TypeFlags::BIGINT_LITERAL,
        LiteralValue::Boolean(_) => TypeFlags::BOOLEAN_LITERAL,
    }
}

/// True when any union part of the type carries one of `flags`.
pub fn is_type_flag_set(db: &dyn TypeDatabase, type_id: TypeId, flags: TypeFlags) -> bool {
    union_type_parts(db, type_id)
        .iter()
        .any(|&part| flags_of(db, part).intersects(flags))
}

// =============================================================================
// Decomposition
// =============================================================================

/// Members of a union, or the type itself.
pub fn union_type_parts(db: &dyn TypeDatabase, type_id: TypeId) -> TypeParts {
    match db.lookup(type_id) {
        Some(TypeData::Union(members)) => members.iter().copied().collect(),
        _ => SmallVec::from_slice(&[type_id]),
    }
}

/// Members of an intersection, or the type itself.
pub fn intersection_type_parts(db: &dyn TypeDatabase, type_id: TypeId) -> TypeParts {
    match db.lookup(type_id) {
        Some(TypeData::Intersection(members)) => members.iter().copied().collect(),
        _ => SmallVec::from_slice(&[type_id]),
    }
}

/// Union parts flattened through their intersections.
pub fn atomic_type_parts(db: &dyn TypeDatabase, type_id: TypeId) -> TypeParts {
    union_type_parts(db, type_id)
        .into_iter()
        .flat_map(|part| intersection_type_parts(db, part))
        .collect()
}

pub fn is_union_type(db: &dyn TypeDatabase, type_id: TypeId) -> bool {
    matches!(db.lookup(type_id), Some(TypeData::Union(_)))
}

pub fn is_intersection_type(db: &dyn TypeDatabase, type_id: TypeId) -> bool {
    matches!(db.lookup(type_id), Some(TypeData::Intersection(_)))
}

pub fn is_type_parameter(db: &dyn TypeDatabase, type_id: TypeId) -> bool {
    matches!(db.lookup(type_id), Some(TypeData::TypeParameter { .. }))
}

pub fn is_array_type(db: &dyn TypeDatabase, type_id: TypeId) -> bool {
    matches!(db.lookup(type_id), Some(TypeData::Array(_)))
}

pub fn is_tuple_type(db: &dyn TypeDatabase, type_id: TypeId) -> bool {
    matches!(db.lookup(type_id), Some(TypeData::Tuple(_)))
}

/// Array or tuple, including unions made only of arrays and tuples.
pub fn is_array_or_tuple_type(db: &dyn TypeDatabase, type_id: TypeId) -> bool {
    union_type_parts(db, type_id).iter().all(|&part| {
        matches!(
            db.lookup(part),
            Some(TypeData::Array(_) | TypeData::Tuple(_))
        )
    })
}

// =============================================================================
// Constraints
// =============================================================================

/// Resolve a type parameter to its upper bound, transitively. Unconstrained
/// parameters and other types are returned unchanged.
pub fn base_constraint(db: &dyn TypeDatabase, type_id: TypeId) -> TypeId {
    let mut current = type_id;
    // Bounded walk: constraint cycles are a checker error, not ours to loop on.
    for _ in 0..16 {
        match db.base_constraint(current) {
            Some(constraint) if constraint != current => current = constraint,
            _ => break,
        }
    }
    current
}

/// Type at a node with type parameters replaced by their constraints.
pub fn constrained_type(oracle: &dyn TypeOracle, node: NodeIndex) -> Option<TypeId> {
    let type_id = oracle.type_at_node(node)?;
    Some(base_constraint(oracle.db(), type_id))
}

// =============================================================================
// Members
// =============================================================================

/// Type of a named property. Optional properties include `undefined`.
/// Intersections are searched member by member; unions are not resolved.
pub fn property_type(db: &dyn TypeDatabase, object: TypeId, name: &str) -> Option<TypeId> {
    for part in intersection_type_parts(db, object) {
        if let Some(property) = db.properties(part).into_iter().find(|p| &*p.name == name) {
            return Some(if property.optional {
                db.union(vec![property.type_id, TypeId::UNDEFINED])
            } else {
                property.type_id
            });
        }
        if let Some(TypeData::Tuple(elements)) = db.lookup(part)
            && let Ok(index) = name.parse::<usize>()
        {
            return elements.get(index).copied();
        }
    }
    None
}

/// Whether the named property is declared optional (`name?: T`) on every
/// non-nullish union part that has it.
pub fn is_optional_property(db: &dyn TypeDatabase, object: TypeId, name: &str) -> bool {
    let mut found = false;
    for part in union_type_parts(db, object) {
        if is_nullish_part(db, part) {
            continue;
        }
        let property = intersection_type_parts(db, part)
            .into_iter()
            .find_map(|p| db.properties(p).into_iter().find(|prop| &*prop.name == name));
        match property {
            Some(property) if property.optional => found = true,
            Some(_) => {}
            None => return false,
        }
    }
    found
}

/// Key types of the index signatures of an object type.
pub fn index_signature_key_types(db: &dyn TypeDatabase, object: TypeId) -> Vec<TypeId> {
    intersection_type_parts(db, object)
        .into_iter()
        .flat_map(|part| db.index_signatures(part))
        .map(|signature| signature.key_type)
        .collect()
}

/// Value type of the index signature accepting `key_type`.
pub fn index_signature_type(
    db: &dyn TypeDatabase,
    object: TypeId,
    key_type: TypeId,
) -> Option<TypeId> {
    intersection_type_parts(db, object)
        .into_iter()
        .flat_map(|part| db.index_signatures(part))
        .find(|signature| signature.key_type == key_type)
        .map(|signature| signature.value_type)
}

/// Return types of every call signature of every union part.
pub fn call_signature_return_types(db: &dyn TypeDatabase, type_id: TypeId) -> Vec<TypeId> {
    union_type_parts(db, type_id)
        .into_iter()
        .flat_map(|part| db.call_signatures(part))
        .map(|signature| signature.return_type)
        .collect()
}

// =============================================================================
// Nullability
// =============================================================================

/// Any union part is `null` or `undefined`.
pub fn is_nullable_type(db: &dyn TypeDatabase, type_id: TypeId) -> bool {
    is_type_flag_set(db, type_id, TypeFlags::NULLABLE)
}

fn is_nullish_part(db: &dyn TypeDatabase, part: TypeId) -> bool {
    flags_of(db, part).intersects(TypeFlags::NULLABLE)
}

pub fn is_possibly_nullish(db: &dyn TypeDatabase, type_id: TypeId) -> bool {
    union_type_parts(db, type_id)
        .iter()
        .any(|&part| is_nullish_part(db, part))
}

pub fn is_always_nullish(db: &dyn TypeDatabase, type_id: TypeId) -> bool {
    union_type_parts(db, type_id)
        .iter()
        .all(|&part| is_nullish_part(db, part))
}

/// `null`, `undefined` or `void` somewhere in the type, or a type that may
/// hold anything (`any`, `unknown`).
pub fn is_nullable_like(db: &dyn TypeDatabase, type_id: TypeId) -> bool {
    is_type_flag_set(
        db,
        type_id,
        TypeFlags::ANY_OR_UNKNOWN | TypeFlags::NULLABLE | TypeFlags::VOID,
    )
}

pub fn is_any_or_unknown(db: &dyn TypeDatabase, type_id: TypeId) -> bool {
    is_type_flag_set(db, type_id, TypeFlags::ANY_OR_UNKNOWN)
}

// =============================================================================
// Symbols
// =============================================================================

/// Name of the enum a type belongs to: the enum of an enum literal, or of a
/// union whose parts are all members of the same enum.
pub fn enum_name_of(db: &dyn TypeDatabase, type_id: TypeId) -> Option<Arc<str>> {
    let mut name: Option<Arc<str>> = None;
    for part in union_type_parts(db, type_id) {
        let Some(TypeData::EnumLiteral { enum_name, .. }) = db.lookup(part) else {
            return None;
        };
        match &name {
            Some(existing) if *existing != enum_name => return None,
            Some(_) => {}
            None => name = Some(enum_name),
        }
    }
    name
}

/// Member name of an enum literal, or the name of a unique symbol.
pub fn member_name_of(db: &dyn TypeDatabase, type_id: TypeId) -> Option<Arc<str>> {
    match db.lookup(type_id)? {
        TypeData::EnumLiteral { member, .. } => Some(member),
        TypeData::UniqueSymbol { name } => Some(name),
        _ => None,
    }
}

// =============================================================================
// Literals & truthiness
// =============================================================================

/// Value of a literal or enum literal type.
pub fn literal_value(db: &dyn TypeDatabase, type_id: TypeId) -> Option<LiteralValue> {
    match db.lookup(type_id)? {
        TypeData::Literal(value) | TypeData::EnumLiteral { value, .. } => Some(value),
        _ => None,
    }
}

/// A type that represents one concrete value: literals, `null`,
/// `undefined` and unique symbols.
pub fn is_literal_like(db: &dyn TypeDatabase, type_id: TypeId) -> bool {
    flags_of(db, type_id).intersects(
        TypeFlags::LITERAL | TypeFlags::UNDEFINED | TypeFlags::NULL | TypeFlags::UNIQUE_ES_SYMBOL,
    )
}

/// `true`, or a string/number/bigint literal with a truthy value.
pub fn is_truthy_literal(db: &dyn TypeDatabase, type_id: TypeId) -> bool {
    literal_value(db, type_id).is_some_and(|value| value.is_truthy())
}

/// A single part that can only hold falsy values.
pub fn is_falsy_type(db: &dyn TypeDatabase, type_id: TypeId) -> bool {
    if flags_of(db, type_id).intersects(TypeFlags::VOID | TypeFlags::NULLABLE) {
        return true;
    }
    literal_value(db, type_id).is_some_and(|value| !value.is_truthy())
}

/// Some value of the type is falsy.
pub fn is_possibly_falsy(db: &dyn TypeDatabase, type_id: TypeId) -> bool {
    atomic_type_parts(db, type_id)
        .into_iter()
        .filter(|&part| !is_truthy_literal(db, part))
        .any(|part| flags_of(db, part).intersects(TypeFlags::POSSIBLY_FALSY))
}

/// Some value of the type is truthy.
pub fn is_possibly_truthy(db: &dyn TypeDatabase, type_id: TypeId) -> bool {
    union_type_parts(db, type_id).into_iter().any(|part| {
        intersection_type_parts(db, part)
            .into_iter()
            .all(|p| !is_falsy_type(db, p))
    })
}
