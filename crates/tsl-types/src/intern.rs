//! Type interning.
//!
//! Converts `TypeData` structures into `TypeId` handles so that type
//! equality is a `u32` comparison. Builtin types occupy fixed ids (see the
//! constants on `TypeId`).

use crate::db::TypeDatabase;
use crate::types::{
    IntrinsicKind, LiteralValue, ObjectShape, OrderedFloat, SignatureInfo, TypeData, TypeId,
};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::sync::{Arc, PoisonError, RwLock};

const TYPE_LIST_INLINE: usize = 8;

type TypeListBuffer = SmallVec<[TypeId; TYPE_LIST_INLINE]>;

#[derive(Default)]
struct InternState {
    types: Vec<TypeData>,
    map: FxHashMap<TypeData, TypeId>,
}

impl InternState {
    fn intern(&mut self, data: TypeData) -> TypeId {
        if let Some(&id) = self.map.get(&data) {
            return id;
        }
        let id = TypeId(self.types.len() as u32);
        self.types.push(data.clone());
        self.map.insert(data, id);
        id
    }
}

/// Thread-safe type interner.
pub struct TypeInterner {
    state: RwLock<InternState>,
}

impl Default for TypeInterner {
    fn default() -> Self {
        TypeInterner::new()
    }
}

impl TypeInterner {
    #[must_use]
    pub fn new() -> TypeInterner {
        let mut state = InternState::default();
        for kind in [
            IntrinsicKind::Any,
            IntrinsicKind::Unknown,
            IntrinsicKind::Never,
            IntrinsicKind::Void,
            IntrinsicKind::Undefined,
            IntrinsicKind::Null,
            IntrinsicKind::String,
            IntrinsicKind::Number,
            IntrinsicKind::BigInt,
            IntrinsicKind::EsSymbol,
            IntrinsicKind::Object,
        ] {
            state.intern(TypeData::Intrinsic(kind));
        }
        state.intern(TypeData::Literal(LiteralValue::Boolean(true)));
        state.intern(TypeData::Literal(LiteralValue::Boolean(false)));
        state.intern(TypeData::Union(Arc::from([TypeId::TRUE, TypeId::FALSE])));
        debug_assert_eq!(state.types.len() as u32, TypeId::FIRST_USER);

        TypeInterner {
            state: RwLock::new(state),
        }
    }

    /// Number of interned types, builtins included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .types
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn literal_string(&self, value: &str) -> TypeId {
        self.intern(TypeData::Literal(LiteralValue::String(Arc::from(value))))
    }

    pub fn literal_number(&self, value: f64) -> TypeId {
        self.intern(TypeData::Literal(LiteralValue::Number(OrderedFloat(value))))
    }

    /// `digits` may carry a leading `-` and must not carry the `n` suffix.
    pub fn literal_bigint(&self, digits: &str) -> TypeId {
        self.intern(TypeData::Literal(LiteralValue::BigInt(Arc::from(digits))))
    }

    #[must_use]
    pub const fn literal_boolean(&self, value: bool) -> TypeId {
        if value { TypeId::TRUE } else { TypeId::FALSE }
    }

    pub fn enum_literal(&self, enum_name: &str, member: &str, value: LiteralValue) -> TypeId {
        self.intern(TypeData::EnumLiteral {
            enum_name: Arc::from(enum_name),
            member: Arc::from(member),
            value,
        })
    }

    /// An enum type: the union of its member literals.
    pub fn enum_type(&self, enum_name: &str, members: &[(&str, LiteralValue)]) -> TypeId {
        let members = members
            .iter()
            .map(|(member, value)| self.enum_literal(enum_name, member, value.clone()))
            .collect();
        self.union(members)
    }

    pub fn unique_symbol(&self, name: &str) -> TypeId {
        self.intern(TypeData::UniqueSymbol {
            name: Arc::from(name),
        })
    }

    pub fn type_parameter(&self, name: &str, constraint: Option<TypeId>) -> TypeId {
        self.intern(TypeData::TypeParameter {
            name: Arc::from(name),
            constraint,
        })
    }

    pub fn array(&self, element: TypeId) -> TypeId {
        self.intern(TypeData::Array(element))
    }

    pub fn tuple(&self, elements: Vec<TypeId>) -> TypeId {
        self.intern(TypeData::Tuple(Arc::from(elements)))
    }

    pub fn object(&self, shape: ObjectShape) -> TypeId {
        self.intern(TypeData::Object(Arc::new(shape)))
    }

    /// A function type with a single call signature.
    pub fn function(&self, return_type: TypeId) -> TypeId {
        self.object(ObjectShape {
            call_signatures: vec![SignatureInfo { return_type }],
            ..ObjectShape::default()
        })
    }

    pub fn union2(&self, left: TypeId, right: TypeId) -> TypeId {
        self.union(vec![left, right])
    }

    /// Normalized union: nested unions are flattened, `never` dropped,
    /// literals absorbed by their primitive, members sorted and deduplicated.
    /// `any` and `unknown` absorb everything.
    pub fn union(&self, members: Vec<TypeId>) -> TypeId {
        let mut flat = TypeListBuffer::new();
        for member in members {
            match self.lookup(member) {
                Some(TypeData::Union(parts)) => flat.extend(parts.iter().copied()),
                _ => flat.push(member),
            }
        }
        if flat.contains(&TypeId::ANY) {
            return TypeId::ANY;
        }
        if flat.contains(&TypeId::UNKNOWN) {
            return TypeId::UNKNOWN;
        }
        flat.retain(|id| *id != TypeId::NEVER);

        let (has_string, has_number, has_bigint) = (
            flat.contains(&TypeId::STRING),
            flat.contains(&TypeId::NUMBER),
            flat.contains(&TypeId::BIGINT),
        );
        if has_string || has_number || has_bigint {
            flat.retain(|id| match self.lookup(*id) {
                Some(TypeData::Literal(LiteralValue::String(_))) => !has_string,
                Some(TypeData::Literal(LiteralValue::Number(_))) => !has_number,
                Some(TypeData::Literal(LiteralValue::BigInt(_))) => !has_bigint,
                _ => true,
            });
        }

        flat.sort_unstable();
        flat.dedup();
        match flat.len() {
            0 => TypeId::NEVER,
            1 => flat[0],
            _ => self.intern(TypeData::Union(Arc::from(flat.as_slice()))),
        }
    }

    /// Normalized intersection: flattened, `unknown` dropped, `never` and
    /// `any` absorb everything.
    pub fn intersection(&self, members: Vec<TypeId>) -> TypeId {
        let mut flat = TypeListBuffer::new();
        for member in members {
            match self.lookup(member) {
                Some(TypeData::Intersection(parts)) => flat.extend(parts.iter().copied()),
                _ => flat.push(member),
            }
        }
        if flat.contains(&TypeId::NEVER) {
            return TypeId::NEVER;
        }
        if flat.contains(&TypeId::ANY) {
            return TypeId::ANY;
        }
        flat.retain(|id| *id != TypeId::UNKNOWN);
        flat.sort_unstable();
        flat.dedup();
        match flat.len() {
            0 => TypeId::UNKNOWN,
            1 => flat[0],
            _ => self.intern(TypeData::Intersection(Arc::from(flat.as_slice()))),
        }
    }
}

impl TypeDatabase for TypeInterner {
    fn lookup(&self, id: TypeId) -> Option<TypeData> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .types
            .get(id.0 as usize)
            .cloned()
    }

    fn intern(&self, data: TypeData) -> TypeId {
        if let Some(&id) = self
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .map
            .get(&data)
        {
            return id;
        }
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .intern(data)
    }

    fn union(&self, members: Vec<TypeId>) -> TypeId {
        TypeInterner::union(self, members)
    }
}
