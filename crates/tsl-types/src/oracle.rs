//! The type-checking oracle interface.
//!
//! The lint engine never computes types. A host (compiler front-end, editor
//! service, or test) implements `TypeOracle` and answers per-node queries.

use crate::db::TypeDatabase;
use crate::types::TypeId;
use serde::{Deserialize, Serialize};
use tsl_common::ScriptTarget;
use tsl_syntax::NodeIndex;

/// The compiler options rules consult.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompilerOptions {
    pub strict_null_checks: bool,
    pub exact_optional_property_types: bool,
    pub no_unchecked_indexed_access: bool,
    pub target: ScriptTarget,
}

impl Default for CompilerOptions {
    /// `strict` project defaults.
    fn default() -> Self {
        CompilerOptions {
            strict_null_checks: true,
            exact_optional_property_types: false,
            no_unchecked_indexed_access: false,
            target: ScriptTarget::ESNext,
        }
    }
}

pub trait TypeOracle {
    fn db(&self) -> &dyn TypeDatabase;

    /// Type of an expression (or declaration name) node.
    fn type_at_node(&self, node: NodeIndex) -> Option<TypeId>;

    /// Type denoted by a type node (`string`, `Foo | null`, ...).
    fn type_from_type_node(&self, node: NodeIndex) -> Option<TypeId>;

    /// Type expected at an expression's position by its context, if any.
    fn contextual_type(&self, node: NodeIndex) -> Option<TypeId>;

    /// Declaration node an identifier resolves to.
    fn declaration_of(&self, node: NodeIndex) -> Option<NodeIndex>;

    fn compiler_options(&self) -> &CompilerOptions;
}
