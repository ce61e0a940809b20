//! Type representation and type-oracle interface for the tsl lint engine.
//!
//! - `TypeId` handles and `TypeData` structure (`types`)
//! - `TypeFlags` classification bits (`flags`)
//! - The `TypeDatabase` lookup trait and its interner (`db`, `intern`)
//! - Query helpers rules use to inspect types (`type_queries`)
//! - The `TypeOracle` a host implements, plus the in-memory `TypeTable`

pub mod types;
pub use types::{
    IndexSignature, IntrinsicKind, LiteralValue, ObjectShape, OrderedFloat, PropertyInfo,
    SignatureInfo, TypeData, TypeId,
};

pub mod flags;
pub use flags::TypeFlags;

pub mod db;
pub use db::TypeDatabase;

pub mod intern;
pub use intern::TypeInterner;

pub mod type_queries;

pub mod oracle;
pub use oracle::{CompilerOptions, TypeOracle};

pub mod table;
pub use table::TypeTable;

pub mod format;
pub use format::type_to_string;
