//! The type database interface.
//!
//! Rules never match on `TypeData` themselves; they go through the query
//! functions in `type_queries`, which only need a `&dyn TypeDatabase`.

use crate::types::{IndexSignature, PropertyInfo, SignatureInfo, TypeData, TypeId};
use std::sync::Arc;

pub trait TypeDatabase {
    fn lookup(&self, id: TypeId) -> Option<TypeData>;
    fn intern(&self, data: TypeData) -> TypeId;
    fn union(&self, members: Vec<TypeId>) -> TypeId;

    /// Upper bound of a constrained type parameter.
    fn base_constraint(&self, id: TypeId) -> Option<TypeId> {
        match self.lookup(id) {
            Some(TypeData::TypeParameter { constraint, .. }) => constraint,
            _ => None,
        }
    }

    /// Name of the symbol behind a type: enum members, unique symbols, type
    /// parameters and named object types.
    fn symbol_name(&self, id: TypeId) -> Option<Arc<str>> {
        match self.lookup(id)? {
            TypeData::EnumLiteral { member, .. } => Some(member),
            TypeData::UniqueSymbol { name } | TypeData::TypeParameter { name, .. } => Some(name),
            TypeData::Object(shape) => shape.name.clone(),
            _ => None,
        }
    }

    fn call_signatures(&self, id: TypeId) -> Vec<SignatureInfo> {
        match self.lookup(id) {
            Some(TypeData::Object(shape)) => shape.call_signatures.clone(),
            _ => Vec::new(),
        }
    }

    fn properties(&self, id: TypeId) -> Vec<PropertyInfo> {
        match self.lookup(id) {
            Some(TypeData::Object(shape)) => shape.properties.clone(),
            _ => Vec::new(),
        }
    }

    fn index_signatures(&self, id: TypeId) -> Vec<IndexSignature> {
        match self.lookup(id) {
            Some(TypeData::Object(shape)) => shape.index_signatures.clone(),
            Some(TypeData::Array(element)) => vec![IndexSignature {
                key_type: TypeId::NUMBER,
                value_type: element,
            }],
            _ => Vec::new(),
        }
    }
}
