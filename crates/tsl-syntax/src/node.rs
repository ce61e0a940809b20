//! Syntax tree nodes and the arena that owns them.
//!
//! Nodes are stored in a flat `Vec` and referenced by `NodeIndex`. Every node
//! knows its parent and its ordered children; tokens are leaves, so the
//! children of a composite node interleave punctuation with sub-nodes exactly
//! as they appear in the text.
//!
//! Kind-specific fields live in `NodeData`. The typed accessors
//! (`get_binary_expr`, `get_access_expr`, ...) check the kind before handing
//! out the payload, so rules never match on `NodeData` directly.

use crate::SyntaxKind;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Index of a node in its `NodeArena`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    #[must_use]
    pub const fn is_some(self) -> bool {
        self.0 != u32::MAX
    }

    /// `None` for the `NONE` sentinel.
    #[inline]
    #[must_use]
    pub const fn into_option(self) -> Option<NodeIndex> {
        if self.is_none() { None } else { Some(self) }
    }
}

/// Packed node flags.
pub mod node_flags {
    /// The node is a link of an optional chain (`a?.b.c`: both accesses).
    pub const OPTIONAL_CHAIN: u16 = 1 << 0;
}

pub type NodeList = SmallVec<[NodeIndex; 4]>;

/// A node in the syntax tree.
#[derive(Clone, Debug)]
pub struct Node {
    pub kind: SyntaxKind,
    pub flags: u16,
    /// Full start, including leading trivia
    pub pos: u32,
    /// Start of the first token
    pub start: u32,
    pub end: u32,
    pub parent: NodeIndex,
    pub children: NodeList,
    pub data: NodeData,
}

impl Node {
    #[inline]
    #[must_use]
    pub const fn is_optional_chain(&self) -> bool {
        self.flags & node_flags::OPTIONAL_CHAIN != 0
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }
}

// =============================================================================
// Node Data
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct IdentifierData {
    pub escaped_text: String,
}

/// Data for string, numeric, bigint and template literal tokens.
#[derive(Clone, Debug, PartialEq)]
pub struct LiteralData {
    /// Cooked text (string contents without quotes, numeric text as written)
    pub text: String,
}

#[derive(Clone, Debug)]
pub struct TemplateExprData {
    pub head: NodeIndex,
    pub template_spans: NodeList,
}

#[derive(Clone, Debug)]
pub struct TemplateSpanData {
    pub expression: NodeIndex,
    pub literal: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct BinaryExprData {
    pub left: NodeIndex,
    pub operator_token: NodeIndex,
    pub operator: SyntaxKind,
    pub right: NodeIndex,
}

/// Prefix, postfix and `typeof` expressions.
#[derive(Clone, Debug)]
pub struct UnaryExprData {
    pub operator: SyntaxKind,
    pub operand: NodeIndex,
}

/// Parenthesized, non-null and expression-statement payloads.
#[derive(Clone, Debug)]
pub struct WrappedExprData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ConditionalExprData {
    pub condition: NodeIndex,
    pub when_true: NodeIndex,
    pub when_false: NodeIndex,
}

/// Property and element access.
#[derive(Clone, Debug)]
pub struct AccessExprData {
    pub expression: NodeIndex,
    pub name_or_argument: NodeIndex,
    /// The `?.` token, `NONE` for plain access
    pub question_dot_token: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct CallExprData {
    pub expression: NodeIndex,
    pub arguments: NodeList,
    pub question_dot_token: NodeIndex,
}

/// `x as T`, `<T>x` and `x satisfies T`.
#[derive(Clone, Debug)]
pub struct TypeAssertionData {
    pub expression: NodeIndex,
    pub type_node: NodeIndex,
}

/// Function expressions and arrow functions.
#[derive(Clone, Debug)]
pub struct FunctionData {
    pub parameters: NodeList,
    /// A `Block` or, for concise arrows, an expression
    pub body: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ParameterData {
    pub name: NodeIndex,
    pub type_annotation: NodeIndex,
}

/// Array and object literal elements.
#[derive(Clone, Debug)]
pub struct LiteralExprData {
    pub elements: NodeList,
}

/// Statements of a block, case block or source file.
#[derive(Clone, Debug)]
pub struct BlockData {
    pub statements: NodeList,
}

#[derive(Clone, Debug)]
pub struct VariableStatementData {
    pub is_declare: bool,
    pub declaration_list: NodeIndex,
}

/// Declaration keyword of a variable list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

impl VariableKind {
    #[must_use]
    pub const fn keyword(self) -> SyntaxKind {
        match self {
            VariableKind::Var => SyntaxKind::VarKeyword,
            VariableKind::Let => SyntaxKind::LetKeyword,
            VariableKind::Const => SyntaxKind::ConstKeyword,
        }
    }
}

#[derive(Clone, Debug)]
pub struct VariableListData {
    pub kind: VariableKind,
    pub declarations: NodeList,
}

#[derive(Clone, Debug)]
pub struct VariableDeclarationData {
    pub name: NodeIndex,
    /// Definite assignment assertion (`let x!: T`)
    pub exclamation_token: bool,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct IfStatementData {
    pub expression: NodeIndex,
    pub then_statement: NodeIndex,
    pub else_statement: NodeIndex,
}

/// `while`, `do`-`while` and `for` loops. `for (;;)` has a `NONE` condition.
#[derive(Clone, Debug)]
pub struct LoopData {
    pub initializer: NodeIndex,
    pub condition: NodeIndex,
    pub incrementor: NodeIndex,
    pub statement: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct SwitchData {
    pub expression: NodeIndex,
    pub case_block: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct CaseClauseData {
    /// `NONE` for the default clause
    pub expression: NodeIndex,
    pub statements: NodeList,
}

/// `return`, `throw` and `break`; `expression` may be `NONE`.
#[derive(Clone, Debug)]
pub struct JumpData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct TypeRefData {
    pub type_name: NodeIndex,
}

/// Union and intersection type nodes.
#[derive(Clone, Debug)]
pub struct CompositeTypeData {
    pub types: NodeList,
}

/// Literal types and array element types.
#[derive(Clone, Debug)]
pub struct WrappedTypeData {
    pub type_node: NodeIndex,
}

/// Kind-specific payload of a node.
#[derive(Clone, Debug)]
pub enum NodeData {
    /// Punctuation, keywords and nodes without fields
    None,
    Identifier(IdentifierData),
    Literal(LiteralData),
    Template(TemplateExprData),
    TemplateSpan(TemplateSpanData),
    Binary(BinaryExprData),
    Unary(UnaryExprData),
    Wrapped(WrappedExprData),
    Conditional(ConditionalExprData),
    Access(AccessExprData),
    Call(CallExprData),
    TypeAssertion(TypeAssertionData),
    Function(FunctionData),
    Parameter(ParameterData),
    LiteralExpr(LiteralExprData),
    Block(BlockData),
    VariableStatement(VariableStatementData),
    VariableList(VariableListData),
    VariableDeclaration(VariableDeclarationData),
    If(IfStatementData),
    Loop(LoopData),
    Switch(SwitchData),
    CaseClause(CaseClauseData),
    Jump(JumpData),
    TypeRef(TypeRefData),
    CompositeType(CompositeTypeData),
    WrappedType(WrappedTypeData),
}

// =============================================================================
// Arena
// =============================================================================

/// Owns every node of one source file.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

macro_rules! data_accessor {
    ($(#[$doc:meta])* $name:ident, $variant:ident, $ty:ty, [$($kind:ident),+]) => {
        $(#[$doc])*
        #[inline]
        #[must_use]
        pub fn $name<'a>(&self, node: &'a Node) -> Option<&'a $ty> {
            match (&node.data, node.kind) {
                (NodeData::$variant(data), $(SyntaxKind::$kind)|+) => Some(data),
                _ => None,
            }
        }
    };
}

impl NodeArena {
    #[must_use]
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a node by index
    #[inline]
    #[must_use]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    #[must_use]
    pub fn kind(&self, index: NodeIndex) -> Option<SyntaxKind> {
        self.get(index).map(|n| n.kind)
    }

    /// Parent of a node, `NONE` for the root or an unknown index.
    #[inline]
    #[must_use]
    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.get(index).map_or(NodeIndex::NONE, |n| n.parent)
    }

    #[inline]
    #[must_use]
    pub fn children(&self, index: NodeIndex) -> &[NodeIndex] {
        self.get(index).map_or(&[], |n| n.children.as_slice())
    }

    /// Iterate over every node index in creation order.
    pub fn indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        (0..self.nodes.len() as u32).map(NodeIndex)
    }

    /// Add a node and adopt `children`. Positions are taken as given.
    pub fn add_node(
        &mut self,
        kind: SyntaxKind,
        flags: u16,
        (pos, start, end): (u32, u32, u32),
        children: NodeList,
        data: NodeData,
    ) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        for &child in &children {
            if let Some(node) = self.nodes.get_mut(child.0 as usize) {
                node.parent = index;
            }
        }
        self.nodes.push(Node {
            kind,
            flags,
            pos,
            start,
            end,
            parent: NodeIndex::NONE,
            children,
            data,
        });
        index
    }

    data_accessor!(get_identifier, Identifier, IdentifierData, [Identifier]);
    data_accessor!(
        /// String, numeric, bigint and template literal tokens.
        get_literal,
        Literal,
        LiteralData,
        [
            StringLiteral,
            NumericLiteral,
            BigIntLiteral,
            NoSubstitutionTemplateLiteral,
            TemplateHead,
            TemplateMiddle,
            TemplateTail
        ]
    );
    data_accessor!(get_template_expr, Template, TemplateExprData, [TemplateExpression]);
    data_accessor!(get_template_span, TemplateSpan, TemplateSpanData, [TemplateSpan]);
    data_accessor!(get_binary_expr, Binary, BinaryExprData, [BinaryExpression]);
    data_accessor!(
        get_unary_expr,
        Unary,
        UnaryExprData,
        [PrefixUnaryExpression, PostfixUnaryExpression, TypeOfExpression]
    );
    data_accessor!(get_parenthesized, Wrapped, WrappedExprData, [ParenthesizedExpression]);
    data_accessor!(get_non_null_expr, Wrapped, WrappedExprData, [NonNullExpression]);
    data_accessor!(get_expression_statement, Wrapped, WrappedExprData, [ExpressionStatement]);
    data_accessor!(
        get_conditional_expr,
        Conditional,
        ConditionalExprData,
        [ConditionalExpression]
    );
    data_accessor!(
        /// Property access or element access.
        get_access_expr,
        Access,
        AccessExprData,
        [PropertyAccessExpression, ElementAccessExpression]
    );
    data_accessor!(get_call_expr, Call, CallExprData, [CallExpression, NewExpression]);
    data_accessor!(
        /// `as`, angle-bracket and `satisfies` expressions.
        get_type_assertion,
        TypeAssertion,
        TypeAssertionData,
        [AsExpression, TypeAssertionExpression, SatisfiesExpression]
    );
    data_accessor!(get_function, Function, FunctionData, [ArrowFunction, FunctionExpression]);
    data_accessor!(get_parameter, Parameter, ParameterData, [Parameter]);
    data_accessor!(
        get_literal_expr,
        LiteralExpr,
        LiteralExprData,
        [ArrayLiteralExpression, ObjectLiteralExpression]
    );
    data_accessor!(get_block, Block, BlockData, [Block, CaseBlock, SourceFile]);
    data_accessor!(
        get_variable_statement,
        VariableStatement,
        VariableStatementData,
        [VariableStatement]
    );
    data_accessor!(
        get_variable_list,
        VariableList,
        VariableListData,
        [VariableDeclarationList]
    );
    data_accessor!(
        get_variable_declaration,
        VariableDeclaration,
        VariableDeclarationData,
        [VariableDeclaration]
    );
    data_accessor!(get_if_statement, If, IfStatementData, [IfStatement]);
    data_accessor!(
        get_loop,
        Loop,
        LoopData,
        [WhileStatement, DoStatement, ForStatement]
    );
    data_accessor!(get_switch, Switch, SwitchData, [SwitchStatement]);
    data_accessor!(get_case_clause, CaseClause, CaseClauseData, [CaseClause, DefaultClause]);
    data_accessor!(
        get_jump,
        Jump,
        JumpData,
        [ReturnStatement, ThrowStatement, BreakStatement]
    );
    data_accessor!(get_type_ref, TypeRef, TypeRefData, [TypeReference]);
    data_accessor!(
        get_composite_type,
        CompositeType,
        CompositeTypeData,
        [UnionType, IntersectionType]
    );
    data_accessor!(get_wrapped_type, WrappedType, WrappedTypeData, [LiteralType, ArrayType]);

    /// Identifier text, `None` for non-identifiers.
    #[must_use]
    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        self.get_identifier(node).map(|d| d.escaped_text.as_str())
    }
}
