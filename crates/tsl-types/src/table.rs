//! `TypeTable`: an in-memory `TypeOracle`.
//!
//! Hosts that already know their types (and tests) record them here per
//! node. `bind` fills in what can be read straight off the tree: keyword,
//! literal and union type nodes, literal expressions, declared types of
//! variables and the types of identifiers referring to them. Entries recorded
//! before `bind` always win.

use crate::db::TypeDatabase;
use crate::intern::TypeInterner;
use crate::oracle::{CompilerOptions, TypeOracle};
use crate::type_queries::{call_signature_return_types, property_type, union_type_parts};
use crate::types::{LiteralValue, TypeData, TypeId};
use rustc_hash::FxHashMap;
use tracing::trace;
use tsl_syntax::{NodeArena, NodeIndex, SourceFile, SyntaxKind, VariableKind};

#[derive(Default)]
pub struct TypeTable {
    interner: TypeInterner,
    options: CompilerOptions,
    node_types: FxHashMap<NodeIndex, TypeId>,
    type_node_types: FxHashMap<NodeIndex, TypeId>,
    contextual_types: FxHashMap<NodeIndex, TypeId>,
    declarations: FxHashMap<NodeIndex, NodeIndex>,
    named_types: FxHashMap<String, TypeId>,
}

impl TypeTable {
    #[must_use]
    pub fn new() -> TypeTable {
        TypeTable::default()
    }

    #[must_use]
    pub fn with_options(options: CompilerOptions) -> TypeTable {
        TypeTable {
            options,
            ..TypeTable::default()
        }
    }

    #[must_use]
    pub fn interner(&self) -> &TypeInterner {
        &self.interner
    }

    pub fn options_mut(&mut self) -> &mut CompilerOptions {
        &mut self.options
    }

    pub fn set_type(&mut self, node: NodeIndex, type_id: TypeId) {
        self.node_types.insert(node, type_id);
    }

    pub fn set_type_node_type(&mut self, node: NodeIndex, type_id: TypeId) {
        self.type_node_types.insert(node, type_id);
    }

    pub fn set_contextual_type(&mut self, node: NodeIndex, type_id: TypeId) {
        self.contextual_types.insert(node, type_id);
    }

    pub fn set_declaration(&mut self, node: NodeIndex, declaration: NodeIndex) {
        self.declarations.insert(node, declaration);
    }

    /// Name a type so `TypeReference` nodes spelling `name` resolve to it.
    pub fn define_type(&mut self, name: &str, type_id: TypeId) {
        self.named_types.insert(name.to_string(), type_id);
    }

    /// Derive the types that follow directly from the tree.
    pub fn bind(&mut self, file: &SourceFile) {
        let mut scope: FxHashMap<String, NodeIndex> = FxHashMap::default();
        self.bind_node(file.arena(), file.root(), &mut scope);
        trace!(
            file = file.file_name(),
            node_types = self.node_types.len(),
            declarations = self.declarations.len(),
            "bound type table"
        );
    }

    fn bind_node(
        &mut self,
        arena: &NodeArena,
        index: NodeIndex,
        scope: &mut FxHashMap<String, NodeIndex>,
    ) {
        for &child in arena.children(index) {
            self.bind_node(arena, child, scope);
        }
        let Some(node) = arena.get(index) else {
            return;
        };

        let inferred = match node.kind {
            SyntaxKind::StringLiteral | SyntaxKind::NoSubstitutionTemplateLiteral => arena
                .get_literal(node)
                .map(|l| self.interner.literal_string(&l.text)),
            SyntaxKind::NumericLiteral => arena
                .get_literal(node)
                .and_then(|l| l.text.parse::<f64>().ok())
                .map(|v| self.interner.literal_number(v)),
            SyntaxKind::BigIntLiteral => arena
                .get_literal(node)
                .map(|l| self.interner.literal_bigint(l.text.trim_end_matches('n'))),
            SyntaxKind::TemplateExpression => Some(TypeId::STRING),
            SyntaxKind::TrueKeyword if !is_type_position(arena, index) => Some(TypeId::TRUE),
            SyntaxKind::FalseKeyword if !is_type_position(arena, index) => Some(TypeId::FALSE),
            SyntaxKind::NullKeyword if !is_type_position(arena, index) => Some(TypeId::NULL),
            SyntaxKind::Identifier => self.bind_identifier(arena, index, scope),
            SyntaxKind::ParenthesizedExpression => arena
                .get_parenthesized(node)
                .and_then(|p| self.node_types.get(&p.expression).copied()),
            SyntaxKind::NonNullExpression => arena
                .get_non_null_expr(node)
                .and_then(|n| self.node_types.get(&n.expression).copied())
                .map(|t| self.remove_nullish(t)),
            SyntaxKind::PrefixUnaryExpression => arena
                .get_unary_expr(node)
                .filter(|u| u.operator == SyntaxKind::ExclamationToken)
                .map(|_| TypeId::BOOLEAN),
            SyntaxKind::TypeOfExpression => Some(TypeId::STRING),
            SyntaxKind::BinaryExpression => arena.get_binary_expr(node).and_then(|b| {
                (b.operator.is_equality_operator() || b.operator.is_relational_operator())
                    .then_some(TypeId::BOOLEAN)
            }),
            SyntaxKind::PropertyAccessExpression => self.bind_property_access(arena, index),
            SyntaxKind::CallExpression => arena.get_call_expr(node).and_then(|call| {
                let callee = self.node_types.get(&call.expression).copied()?;
                let returns = call_signature_return_types(&self.interner, callee);
                (!returns.is_empty()).then(|| self.interner.union(returns))
            }),
            SyntaxKind::AsExpression
            | SyntaxKind::TypeAssertionExpression
            | SyntaxKind::SatisfiesExpression => self.bind_assertion(arena, index),
            SyntaxKind::VariableDeclaration => {
                self.bind_variable_declaration(arena, index, scope);
                None
            }
            _ => None,
        };
        if let Some(type_id) = inferred {
            self.node_types.entry(index).or_insert(type_id);
        }
    }

    fn bind_identifier(
        &mut self,
        arena: &NodeArena,
        index: NodeIndex,
        scope: &FxHashMap<String, NodeIndex>,
    ) -> Option<TypeId> {
        let name = arena.identifier_text(index)?;
        if !is_reference(arena, index) {
            return None;
        }
        if name == "undefined" {
            return Some(TypeId::UNDEFINED);
        }
        let declaration = *scope.get(name)?;
        self.declarations.entry(index).or_insert(declaration);
        let declared_name = arena
            .get(declaration)
            .and_then(|d| arena.get_variable_declaration(d))?
            .name;
        self.node_types.get(&declared_name).copied()
    }

    fn bind_variable_declaration(
        &mut self,
        arena: &NodeArena,
        index: NodeIndex,
        scope: &mut FxHashMap<String, NodeIndex>,
    ) {
        let Some(decl) = arena.get(index).and_then(|n| arena.get_variable_declaration(n)) else {
            return;
        };
        if let Some(name) = arena.identifier_text(decl.name) {
            scope.insert(name.to_string(), index);
        }

        let annotated = self.bind_type_node(arena, decl.type_annotation);
        let initialized = self.node_types.get(&decl.initializer).copied();
        let is_const = arena
            .get(arena.parent(index))
            .and_then(|list| arena.get_variable_list(list))
            .is_some_and(|list| list.kind == VariableKind::Const);
        let declared = annotated.or_else(|| {
            initialized.map(|t| if is_const { t } else { self.widen_literal(t) })
        });
        if let Some(declared) = declared {
            self.node_types.entry(decl.name).or_insert(declared);
        }
    }

    fn bind_assertion(&mut self, arena: &NodeArena, index: NodeIndex) -> Option<TypeId> {
        let node = arena.get(index)?;
        let assertion = arena.get_type_assertion(node)?;
        let expression_type = self.node_types.get(&assertion.expression).copied();
        let is_const = arena
            .get(assertion.type_node)
            .and_then(|t| arena.get_type_ref(t))
            .is_some_and(|r| arena.identifier_text(r.type_name) == Some("const"));
        let asserted = if is_const {
            None
        } else {
            self.bind_type_node(arena, assertion.type_node)
        };
        if node.kind == SyntaxKind::SatisfiesExpression {
            return expression_type;
        }
        asserted.or(expression_type)
    }

    fn bind_property_access(&mut self, arena: &NodeArena, index: NodeIndex) -> Option<TypeId> {
        let node = arena.get(index)?;
        let access = arena.get_access_expr(node)?;
        let object = self.node_types.get(&access.expression).copied()?;
        let name = arena.identifier_text(access.name_or_argument)?;
        let non_nullish = self.remove_nullish(object);
        let property = property_type(&self.interner, non_nullish, name)?;
        if node.is_optional_chain() && non_nullish != object {
            Some(self.interner.union2(property, TypeId::UNDEFINED))
        } else {
            Some(property)
        }
    }

    /// Resolve and record the type denoted by a type node.
    fn bind_type_node(&mut self, arena: &NodeArena, index: NodeIndex) -> Option<TypeId> {
        if let Some(&known) = self.type_node_types.get(&index) {
            return Some(known);
        }
        let resolved = self.resolve_type_node(arena, index)?;
        self.type_node_types.insert(index, resolved);
        Some(resolved)
    }

    fn resolve_type_node(&self, arena: &NodeArena, index: NodeIndex) -> Option<TypeId> {
        let node = arena.get(index)?;
        let resolved = match node.kind {
            SyntaxKind::AnyKeyword => TypeId::ANY,
            SyntaxKind::UnknownKeyword => TypeId::UNKNOWN,
            SyntaxKind::NeverKeyword => TypeId::NEVER,
            SyntaxKind::VoidKeyword => TypeId::VOID,
            SyntaxKind::UndefinedKeyword => TypeId::UNDEFINED,
            SyntaxKind::StringKeyword => TypeId::STRING,
            SyntaxKind::NumberKeyword => TypeId::NUMBER,
            SyntaxKind::BooleanKeyword => TypeId::BOOLEAN,
            SyntaxKind::BigIntKeyword => TypeId::BIGINT,
            SyntaxKind::SymbolKeyword => TypeId::ES_SYMBOL,
            SyntaxKind::ObjectKeyword => TypeId::OBJECT,
            SyntaxKind::LiteralType => {
                let literal = arena.get_wrapped_type(node)?.type_node;
                let literal_node = arena.get(literal)?;
                match literal_node.kind {
                    SyntaxKind::NullKeyword => TypeId::NULL,
                    SyntaxKind::TrueKeyword => TypeId::TRUE,
                    SyntaxKind::FalseKeyword => TypeId::FALSE,
                    SyntaxKind::StringLiteral => self
                        .interner
                        .literal_string(&arena.get_literal(literal_node)?.text),
                    SyntaxKind::NumericLiteral => self
                        .interner
                        .literal_number(arena.get_literal(literal_node)?.text.parse().ok()?),
                    _ => return None,
                }
            }
            SyntaxKind::UnionType | SyntaxKind::IntersectionType => {
                let composite = arena.get_composite_type(node)?;
                let parts = composite
                    .types
                    .iter()
                    .map(|&t| self.resolve_type_node(arena, t))
                    .collect::<Option<Vec<_>>>()?;
                if node.kind == SyntaxKind::UnionType {
                    self.interner.union(parts)
                } else {
                    self.interner.intersection(parts)
                }
            }
            SyntaxKind::ArrayType => {
                let element = arena.get_wrapped_type(node)?.type_node;
                self.interner.array(self.resolve_type_node(arena, element)?)
            }
            SyntaxKind::TypeReference => {
                let name = arena.identifier_text(arena.get_type_ref(node)?.type_name)?;
                *self.named_types.get(name)?
            }
            _ => return None,
        };
        Some(resolved)
    }

    fn remove_nullish(&self, type_id: TypeId) -> TypeId {
        let parts: Vec<TypeId> = union_type_parts(&self.interner, type_id)
            .into_iter()
            .filter(|&t| t != TypeId::NULL && t != TypeId::UNDEFINED)
            .collect();
        self.interner.union(parts)
    }

    fn widen_literal(&self, type_id: TypeId) -> TypeId {
        let widened: Vec<TypeId> = union_type_parts(&self.interner, type_id)
            .into_iter()
            .map(|part| match self.interner.lookup(part) {
                Some(TypeData::Literal(LiteralValue::String(_))) => TypeId::STRING,
                Some(TypeData::Literal(LiteralValue::Number(_))) => TypeId::NUMBER,
                Some(TypeData::Literal(LiteralValue::BigInt(_))) => TypeId::BIGINT,
                Some(TypeData::Literal(LiteralValue::Boolean(_))) => TypeId::BOOLEAN,
                _ => part,
            })
            .collect();
        self.interner.union(widened)
    }
}

/// Keyword tokens inside type nodes denote types, not values.
fn is_type_position(arena: &NodeArena, index: NodeIndex) -> bool {
    matches!(
        arena.kind(arena.parent(index)),
        Some(SyntaxKind::LiteralType | SyntaxKind::UnionType | SyntaxKind::IntersectionType)
    )
}

/// Identifiers that name a value being read, as opposed to declaration
/// names, property names and type names.
fn is_reference(arena: &NodeArena, index: NodeIndex) -> bool {
    let parent = arena.parent(index);
    let Some(parent_node) = arena.get(parent) else {
        return false;
    };
    match parent_node.kind {
        SyntaxKind::VariableDeclaration => arena
            .get_variable_declaration(parent_node)
            .is_some_and(|d| d.name != index),
        SyntaxKind::PropertyAccessExpression => arena
            .get_access_expr(parent_node)
            .is_some_and(|a| a.name_or_argument != index),
        SyntaxKind::Parameter | SyntaxKind::TypeReference => false,
        _ => true,
    }
}

impl TypeOracle for TypeTable {
    fn db(&self) -> &dyn TypeDatabase {
        &self.interner
    }

    fn type_at_node(&self, node: NodeIndex) -> Option<TypeId> {
        self.node_types.get(&node).copied()
    }

    fn type_from_type_node(&self, node: NodeIndex) -> Option<TypeId> {
        self.type_node_types.get(&node).copied()
    }

    fn contextual_type(&self, node: NodeIndex) -> Option<TypeId> {
        self.contextual_types.get(&node).copied()
    }

    fn declaration_of(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.declarations.get(&node).copied()
    }

    fn compiler_options(&self) -> &CompilerOptions {
        &self.options
    }
}
