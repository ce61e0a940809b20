//! Type representations.
//!
//! A `TypeId` is an interned handle; two handles are the same type exactly
//! when the ids are equal. `TypeData` is the structural view of a handle,
//! cheap to clone because all lists are `Arc`-shared.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Interned type handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const ANY: TypeId = TypeId(0);
    pub const UNKNOWN: TypeId = TypeId(1);
    pub const NEVER: TypeId = TypeId(2);
    pub const VOID: TypeId = TypeId(3);
    pub const UNDEFINED: TypeId = TypeId(4);
    pub const NULL: TypeId = TypeId(5);
    pub const STRING: TypeId = TypeId(6);
    pub const NUMBER: TypeId = TypeId(7);
    pub const BIGINT: TypeId = TypeId(8);
    pub const ES_SYMBOL: TypeId = TypeId(9);
    /// The `object` keyword type
    pub const OBJECT: TypeId = TypeId(10);
    pub const TRUE: TypeId = TypeId(11);
    pub const FALSE: TypeId = TypeId(12);
    /// `true | false`
    pub const BOOLEAN: TypeId = TypeId(13);

    /// First id handed out for non-builtin types.
    pub const FIRST_USER: u32 = 14;

    #[inline]
    #[must_use]
    pub const fn is_builtin(self) -> bool {
        self.0 < Self::FIRST_USER
    }
}

/// Intrinsic (keyword) types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntrinsicKind {
    Any,
    Unknown,
    Never,
    Void,
    Undefined,
    Null,
    String,
    Number,
    BigInt,
    EsSymbol,
    Object,
}

impl IntrinsicKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            IntrinsicKind::Any => "any",
            IntrinsicKind::Unknown => "unknown",
            IntrinsicKind::Never => "never",
            IntrinsicKind::Void => "void",
            IntrinsicKind::Undefined => "undefined",
            IntrinsicKind::Null => "null",
            IntrinsicKind::String => "string",
            IntrinsicKind::Number => "number",
            IntrinsicKind::BigInt => "bigint",
            IntrinsicKind::EsSymbol => "symbol",
            IntrinsicKind::Object => "object",
        }
    }
}

/// `f64` with bitwise equality so number literals can be interned.
#[derive(Clone, Copy, Debug)]
pub struct OrderedFloat(pub f64);

impl PartialEq for OrderedFloat {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for OrderedFloat {}

impl std::hash::Hash for OrderedFloat {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

/// The value carried by a literal type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LiteralValue {
    String(Arc<str>),
    Number(OrderedFloat),
    /// Decimal digits with an optional leading `-`, without the `n` suffix
    BigInt(Arc<str>),
    Boolean(bool),
}

impl LiteralValue {
    /// JavaScript truthiness of the value.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            LiteralValue::String(s) => !s.is_empty(),
            LiteralValue::Number(n) => n.0 != 0.0 && !n.0.is_nan(),
            LiteralValue::BigInt(digits) => {
                !digits.trim_start_matches('-').trim_start_matches('0').is_empty()
            }
            LiteralValue::Boolean(b) => *b,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyInfo {
    pub name: Arc<str>,
    pub type_id: TypeId,
    pub optional: bool,
    pub readonly: bool,
}

impl PropertyInfo {
    #[must_use]
    pub fn new(name: &str, type_id: TypeId) -> Self {
        PropertyInfo {
            name: Arc::from(name),
            type_id,
            optional: false,
            readonly: false,
        }
    }

    #[must_use]
    pub fn optional(name: &str, type_id: TypeId) -> Self {
        PropertyInfo {
            optional: true,
            ..PropertyInfo::new(name, type_id)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IndexSignature {
    pub key_type: TypeId,
    pub value_type: TypeId,
}

/// A call signature. Parameters are not modelled; lint rules only look at
/// return types.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SignatureInfo {
    pub return_type: TypeId,
}

/// Structural description of an object, array-like or function type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ObjectShape {
    /// Declared name for interfaces and classes, printed instead of the shape
    pub name: Option<Arc<str>>,
    pub properties: Vec<PropertyInfo>,
    pub index_signatures: Vec<IndexSignature>,
    pub call_signatures: Vec<SignatureInfo>,
}

/// Structural view of a `TypeId`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    Intrinsic(IntrinsicKind),
    Literal(LiteralValue),
    /// A member of an enum, e.g. `Fruit.Apple`
    EnumLiteral {
        enum_name: Arc<str>,
        member: Arc<str>,
        value: LiteralValue,
    },
    /// `unique symbol`, printed as `typeof name`
    UniqueSymbol { name: Arc<str> },
    TypeParameter {
        name: Arc<str>,
        constraint: Option<TypeId>,
    },
    /// Flattened, deduplicated, sorted members
    Union(Arc<[TypeId]>),
    Intersection(Arc<[TypeId]>),
    Array(TypeId),
    Tuple(Arc<[TypeId]>),
    Object(Arc<ObjectShape>),
}
