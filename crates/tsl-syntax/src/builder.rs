//! Streaming tree builder for tests and hosts without a front-end.
//!
//! `SourceBuilder` writes canonical source text while it creates nodes, in
//! source order, so every span in the resulting `SourceFile` is exact.
//! Operands that come after an operator are passed as closures; operands that
//! come before it are passed as already-built nodes:
//!
//! ```
//! use tsl_syntax::{SourceBuilder, SyntaxKind};
//!
//! let mut b = SourceBuilder::new("test.ts");
//! let stmt = b.expr_stmt(|b| {
//!     let left = b.ident("a");
//!     b.binary(left, SyntaxKind::BarBarToken, |b| b.string("x"))
//! });
//! let file = b.finish(vec![stmt]);
//! assert_eq!(file.text(), "a || 'x';\n");
//! ```

use crate::SyntaxKind;
use crate::node::{
    AccessExprData, BinaryExprData, BlockData, CallExprData, CaseClauseData, CompositeTypeData,
    ConditionalExprData, FunctionData, IdentifierData, IfStatementData, JumpData, LiteralData,
    LiteralExprData, LoopData, NodeArena, NodeData, NodeIndex, NodeList, ParameterData,
    SwitchData, TemplateExprData, TemplateSpanData, TypeAssertionData, TypeRefData, UnaryExprData,
    VariableDeclarationData, VariableKind, VariableListData, VariableStatementData,
    WrappedExprData, WrappedTypeData, node_flags,
};
use crate::source_file::SourceFile;

const INDENT: &str = "    ";

pub struct SourceBuilder {
    file_name: String,
    text: String,
    arena: NodeArena,
    /// End of the last token; the next token's trivia starts here
    trivia_start: u32,
    indent: usize,
    /// The next statement continues the current line (`if (x) {`)
    inline_statement: bool,
}

impl SourceBuilder {
    #[must_use]
    pub fn new(file_name: impl Into<String>) -> SourceBuilder {
        SourceBuilder {
            file_name: file_name.into(),
            text: String::new(),
            arena: NodeArena::new(),
            trivia_start: 0,
            indent: 0,
            inline_statement: false,
        }
    }

    /// Text written so far.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// Close the file: append the end-of-file token and the root node.
    #[must_use]
    pub fn finish(mut self, statements: Vec<NodeIndex>) -> SourceFile {
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.text.push('\n');
        }
        let eof = self.push_token(SyntaxKind::EndOfFileToken, "", NodeData::None);
        let mut children: NodeList = statements.iter().copied().collect();
        children.push(eof);
        let root = self.node(
            SyntaxKind::SourceFile,
            children,
            NodeData::Block(BlockData {
                statements: statements.into_iter().collect(),
            }),
        );
        SourceFile::assemble(self.file_name, self.text, self.arena, root)
    }

    // =========================================================================
    // Primitives
    // =========================================================================

    fn offset(&self) -> u32 {
        self.text.len() as u32
    }

    fn push_token(&mut self, kind: SyntaxKind, text: &str, data: NodeData) -> NodeIndex {
        let start = self.offset();
        self.text.push_str(text);
        let end = self.offset();
        let index = self.arena.add_node(
            kind,
            0,
            (self.trivia_start, start, end),
            NodeList::new(),
            data,
        );
        self.trivia_start = end;
        index
    }

    /// A punctuation or keyword token with its fixed spelling.
    pub fn token(&mut self, kind: SyntaxKind) -> NodeIndex {
        self.push_token(kind, kind.text().unwrap_or(""), NodeData::None)
    }

    fn space(&mut self) {
        self.text.push(' ');
    }

    fn newline(&mut self) {
        self.text.push('\n');
        for _ in 0..self.indent {
            self.text.push_str(INDENT);
        }
    }

    fn node(&mut self, kind: SyntaxKind, children: NodeList, data: NodeData) -> NodeIndex {
        self.node_with_flags(kind, 0, children, data)
    }

    fn node_with_flags(
        &mut self,
        kind: SyntaxKind,
        flags: u16,
        children: NodeList,
        data: NodeData,
    ) -> NodeIndex {
        let first = children.first().and_then(|&c| self.arena.get(c));
        let (pos, start) = first.map_or((self.trivia_start, self.offset()), |n| (n.pos, n.start));
        let end = children
            .last()
            .and_then(|&c| self.arena.get(c))
            .map_or(start, |n| n.end);
        self.arena
            .add_node(kind, flags, (pos, start, end), children, data)
    }

    fn begin_statement(&mut self) {
        if std::mem::take(&mut self.inline_statement) {
            return;
        }
        if !self.text.is_empty() {
            self.newline();
        }
    }

    /// Links of an optional chain propagate the flag to their parent link.
    fn chain_flags(&self, expression: NodeIndex, question_dot: NodeIndex) -> u16 {
        let inherited = self.arena.get(expression).is_some_and(|n| {
            n.is_optional_chain()
                && matches!(
                    n.kind,
                    SyntaxKind::PropertyAccessExpression
                        | SyntaxKind::ElementAccessExpression
                        | SyntaxKind::CallExpression
                        | SyntaxKind::NonNullExpression
                )
        });
        if question_dot.is_some() || inherited {
            node_flags::OPTIONAL_CHAIN
        } else {
            0
        }
    }

    // =========================================================================
    // Comments
    // =========================================================================

    /// A comment on its own line, in the trivia of whatever follows it.
    pub fn comment(&mut self, text: &str) {
        self.begin_statement();
        self.text.push_str(text);
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    pub fn ident(&mut self, name: &str) -> NodeIndex {
        self.push_token(
            SyntaxKind::Identifier,
            name,
            NodeData::Identifier(IdentifierData {
                escaped_text: name.to_string(),
            }),
        )
    }

    /// A single-quoted string literal.
    pub fn string(&mut self, value: &str) -> NodeIndex {
        let mut raw = String::with_capacity(value.len() + 2);
        raw.push('\'');
        for ch in value.chars() {
            match ch {
                '\'' => raw.push_str("\\'"),
                '\\' => raw.push_str("\\\\"),
                '\n' => raw.push_str("\\n"),
                '\r' => raw.push_str("\\r"),
                _ => raw.push(ch),
            }
        }
        raw.push('\'');
        self.literal_token(SyntaxKind::StringLiteral, &raw, value)
    }

    pub fn number(&mut self, text: &str) -> NodeIndex {
        self.literal_token(SyntaxKind::NumericLiteral, text, text)
    }

    /// A bigint literal; `text` includes the `n` suffix.
    pub fn bigint(&mut self, text: &str) -> NodeIndex {
        self.literal_token(SyntaxKind::BigIntLiteral, text, text)
    }

    /// A template literal without substitutions.
    pub fn template(&mut self, text: &str) -> NodeIndex {
        let raw = format!("`{text}`");
        self.literal_token(SyntaxKind::NoSubstitutionTemplateLiteral, &raw, text)
    }

    /// A template literal with substitutions: `head${name}lit...`. Each span
    /// is an identifier followed by the literal text after it.
    pub fn template_expr(&mut self, head: &str, spans: &[(&str, &str)]) -> NodeIndex {
        let head_raw = format!("`{head}${{");
        let head_token = self.literal_token(SyntaxKind::TemplateHead, &head_raw, head);
        let mut children: NodeList = NodeList::new();
        children.push(head_token);
        let mut template_spans = NodeList::new();
        for (i, (name, literal)) in spans.iter().enumerate() {
            let expression = self.ident(name);
            let literal_token = if i + 1 == spans.len() {
                let raw = format!("}}{literal}`");
                self.literal_token(SyntaxKind::TemplateTail, &raw, literal)
            } else {
                let raw = format!("}}{literal}${{");
                self.literal_token(SyntaxKind::TemplateMiddle, &raw, literal)
            };
            let span = self.node(
                SyntaxKind::TemplateSpan,
                NodeList::from_slice(&[expression, literal_token]),
                NodeData::TemplateSpan(TemplateSpanData {
                    expression,
                    literal: literal_token,
                }),
            );
            children.push(span);
            template_spans.push(span);
        }
        self.node(
            SyntaxKind::TemplateExpression,
            children,
            NodeData::Template(TemplateExprData {
                head: head_token,
                template_spans,
            }),
        )
    }

    fn literal_token(&mut self, kind: SyntaxKind, raw: &str, text: &str) -> NodeIndex {
        self.push_token(
            kind,
            raw,
            NodeData::Literal(LiteralData {
                text: text.to_string(),
            }),
        )
    }

    /// `true`, `false`, `null` or `this`.
    pub fn keyword(&mut self, kind: SyntaxKind) -> NodeIndex {
        self.token(kind)
    }

    pub fn paren(&mut self, inner: impl FnOnce(&mut Self) -> NodeIndex) -> NodeIndex {
        let open = self.token(SyntaxKind::OpenParenToken);
        let expression = inner(self);
        let close = self.token(SyntaxKind::CloseParenToken);
        self.node(
            SyntaxKind::ParenthesizedExpression,
            NodeList::from_slice(&[open, expression, close]),
            NodeData::Wrapped(WrappedExprData { expression }),
        )
    }

    /// `left op right`, assignments included.
    pub fn binary(
        &mut self,
        left: NodeIndex,
        operator: SyntaxKind,
        right: impl FnOnce(&mut Self) -> NodeIndex,
    ) -> NodeIndex {
        self.space();
        let operator_token = self.token(operator);
        self.space();
        let right = right(self);
        self.node(
            SyntaxKind::BinaryExpression,
            NodeList::from_slice(&[left, operator_token, right]),
            NodeData::Binary(BinaryExprData {
                left,
                operator_token,
                operator,
                right,
            }),
        )
    }

    /// `!x`, `-x`, `typeof x`, `void x`.
    pub fn prefix(
        &mut self,
        operator: SyntaxKind,
        operand: impl FnOnce(&mut Self) -> NodeIndex,
    ) -> NodeIndex {
        let operator_token = self.token(operator);
        if operator.is_keyword() {
            self.space();
        }
        let operand = operand(self);
        let kind = if operator == SyntaxKind::TypeOfKeyword {
            SyntaxKind::TypeOfExpression
        } else {
            SyntaxKind::PrefixUnaryExpression
        };
        self.node(
            kind,
            NodeList::from_slice(&[operator_token, operand]),
            NodeData::Unary(UnaryExprData { operator, operand }),
        )
    }

    pub fn postfix(&mut self, operand: NodeIndex, operator: SyntaxKind) -> NodeIndex {
        let operator_token = self.token(operator);
        self.node(
            SyntaxKind::PostfixUnaryExpression,
            NodeList::from_slice(&[operand, operator_token]),
            NodeData::Unary(UnaryExprData { operator, operand }),
        )
    }

    /// `expr!`
    pub fn non_null(&mut self, expression: NodeIndex) -> NodeIndex {
        let bang = self.token(SyntaxKind::ExclamationToken);
        let flags = self.chain_flags(expression, NodeIndex::NONE);
        self.node_with_flags(
            SyntaxKind::NonNullExpression,
            flags,
            NodeList::from_slice(&[expression, bang]),
            NodeData::Wrapped(WrappedExprData { expression }),
        )
    }

    /// `expr.name`
    pub fn property_access(&mut self, expression: NodeIndex, name: &str) -> NodeIndex {
        let dot = self.token(SyntaxKind::DotToken);
        self.finish_property_access(expression, dot, NodeIndex::NONE, name)
    }

    /// `expr?.name`
    pub fn optional_property_access(&mut self, expression: NodeIndex, name: &str) -> NodeIndex {
        let question_dot = self.token(SyntaxKind::QuestionDotToken);
        self.finish_property_access(expression, question_dot, question_dot, name)
    }

    fn finish_property_access(
        &mut self,
        expression: NodeIndex,
        dot: NodeIndex,
        question_dot_token: NodeIndex,
        name: &str,
    ) -> NodeIndex {
        let name = self.ident(name);
        let flags = self.chain_flags(expression, question_dot_token);
        self.node_with_flags(
            SyntaxKind::PropertyAccessExpression,
            flags,
            NodeList::from_slice(&[expression, dot, name]),
            NodeData::Access(AccessExprData {
                expression,
                name_or_argument: name,
                question_dot_token,
            }),
        )
    }

    /// `expr[arg]`
    pub fn element_access(
        &mut self,
        expression: NodeIndex,
        argument: impl FnOnce(&mut Self) -> NodeIndex,
    ) -> NodeIndex {
        self.finish_element_access(expression, NodeIndex::NONE, argument)
    }

    /// `expr?.[arg]`
    pub fn optional_element_access(
        &mut self,
        expression: NodeIndex,
        argument: impl FnOnce(&mut Self) -> NodeIndex,
    ) -> NodeIndex {
        let question_dot = self.token(SyntaxKind::QuestionDotToken);
        self.finish_element_access(expression, question_dot, argument)
    }

    fn finish_element_access(
        &mut self,
        expression: NodeIndex,
        question_dot_token: NodeIndex,
        argument: impl FnOnce(&mut Self) -> NodeIndex,
    ) -> NodeIndex {
        let open = self.token(SyntaxKind::OpenBracketToken);
        let argument = argument(self);
        let close = self.token(SyntaxKind::CloseBracketToken);
        let mut children = NodeList::from_slice(&[expression]);
        if question_dot_token.is_some() {
            children.push(question_dot_token);
        }
        children.extend([open, argument, close]);
        let flags = self.chain_flags(expression, question_dot_token);
        self.node_with_flags(
            SyntaxKind::ElementAccessExpression,
            flags,
            children,
            NodeData::Access(AccessExprData {
                expression,
                name_or_argument: argument,
                question_dot_token,
            }),
        )
    }

    /// `callee(args)`. The closure returns the argument nodes, interleaved
    /// with the tokens from `comma()` when there are several.
    pub fn call(
        &mut self,
        callee: NodeIndex,
        arguments: impl FnOnce(&mut Self) -> Vec<NodeIndex>,
    ) -> NodeIndex {
        self.finish_call(callee, NodeIndex::NONE, arguments)
    }

    /// `callee?.(args)`
    pub fn optional_call(
        &mut self,
        callee: NodeIndex,
        arguments: impl FnOnce(&mut Self) -> Vec<NodeIndex>,
    ) -> NodeIndex {
        let question_dot = self.token(SyntaxKind::QuestionDotToken);
        self.finish_call(callee, question_dot, arguments)
    }

    fn finish_call(
        &mut self,
        callee: NodeIndex,
        question_dot_token: NodeIndex,
        arguments: impl FnOnce(&mut Self) -> Vec<NodeIndex>,
    ) -> NodeIndex {
        let open = self.token(SyntaxKind::OpenParenToken);
        let items = arguments(self);
        let close = self.token(SyntaxKind::CloseParenToken);
        let mut children = NodeList::from_slice(&[callee]);
        if question_dot_token.is_some() {
            children.push(question_dot_token);
        }
        children.push(open);
        children.extend(items.iter().copied());
        children.push(close);
        let arguments = self.without_commas(&items);
        let flags = self.chain_flags(callee, question_dot_token);
        self.node_with_flags(
            SyntaxKind::CallExpression,
            flags,
            children,
            NodeData::Call(CallExprData {
                expression: callee,
                arguments,
                question_dot_token,
            }),
        )
    }

    /// A list separator: `, `.
    pub fn comma(&mut self) -> NodeIndex {
        let comma = self.token(SyntaxKind::CommaToken);
        self.space();
        comma
    }

    fn without_commas(&self, items: &[NodeIndex]) -> NodeList {
        items
            .iter()
            .copied()
            .filter(|&i| self.arena.kind(i) != Some(SyntaxKind::CommaToken))
            .collect()
    }

    /// `condition ? when_true : when_false`
    pub fn conditional(
        &mut self,
        condition: NodeIndex,
        when_true: impl FnOnce(&mut Self) -> NodeIndex,
        when_false: impl FnOnce(&mut Self) -> NodeIndex,
    ) -> NodeIndex {
        self.space();
        let question = self.token(SyntaxKind::QuestionToken);
        self.space();
        let when_true = when_true(self);
        self.space();
        let colon = self.token(SyntaxKind::ColonToken);
        self.space();
        let when_false = when_false(self);
        self.node(
            SyntaxKind::ConditionalExpression,
            NodeList::from_slice(&[condition, question, when_true, colon, when_false]),
            NodeData::Conditional(ConditionalExprData {
                condition,
                when_true,
                when_false,
            }),
        )
    }

    /// `expr as T`; `T` is written by `type_node`.
    pub fn as_expr(&mut self, expression: NodeIndex, type_text: &str) -> NodeIndex {
        self.suffix_assertion(SyntaxKind::AsExpression, expression, type_text)
    }

    /// `expr satisfies T`
    pub fn satisfies(&mut self, expression: NodeIndex, type_text: &str) -> NodeIndex {
        self.suffix_assertion(SyntaxKind::SatisfiesExpression, expression, type_text)
    }

    fn suffix_assertion(
        &mut self,
        kind: SyntaxKind,
        expression: NodeIndex,
        type_text: &str,
    ) -> NodeIndex {
        self.space();
        let keyword = if kind == SyntaxKind::AsExpression {
            self.token(SyntaxKind::AsKeyword)
        } else {
            self.token(SyntaxKind::SatisfiesKeyword)
        };
        self.space();
        let type_node = self.type_node(type_text);
        self.node(
            kind,
            NodeList::from_slice(&[expression, keyword, type_node]),
            NodeData::TypeAssertion(TypeAssertionData {
                expression,
                type_node,
            }),
        )
    }

    /// `<T>expr`
    pub fn type_assertion(
        &mut self,
        type_text: &str,
        expression: impl FnOnce(&mut Self) -> NodeIndex,
    ) -> NodeIndex {
        let open = self.token(SyntaxKind::LessThanToken);
        let type_node = self.type_node(type_text);
        let close = self.token(SyntaxKind::GreaterThanToken);
        let expression = expression(self);
        self.node(
            SyntaxKind::TypeAssertionExpression,
            NodeList::from_slice(&[open, type_node, close, expression]),
            NodeData::TypeAssertion(TypeAssertionData {
                expression,
                type_node,
            }),
        )
    }

    fn parameter_list(&mut self, names: &[&str], children: &mut NodeList) -> NodeList {
        let mut parameters = NodeList::new();
        children.push(self.token(SyntaxKind::OpenParenToken));
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                let comma = self.comma();
                children.push(comma);
            }
            let ident = self.ident(name);
            let parameter = self.node(
                SyntaxKind::Parameter,
                NodeList::from_slice(&[ident]),
                NodeData::Parameter(ParameterData {
                    name: ident,
                    type_annotation: NodeIndex::NONE,
                }),
            );
            children.push(parameter);
            parameters.push(parameter);
        }
        children.push(self.token(SyntaxKind::CloseParenToken));
        parameters
    }

    /// `(a, b) => body` with an expression body.
    pub fn arrow(
        &mut self,
        parameters: &[&str],
        body: impl FnOnce(&mut Self) -> NodeIndex,
    ) -> NodeIndex {
        let mut children = NodeList::new();
        let parameters = self.parameter_list(parameters, &mut children);
        self.space();
        children.push(self.token(SyntaxKind::EqualsGreaterThanToken));
        self.space();
        let body = body(self);
        children.push(body);
        self.node(
            SyntaxKind::ArrowFunction,
            children,
            NodeData::Function(FunctionData { parameters, body }),
        )
    }

    /// `(a, b) => { ... }`
    pub fn arrow_block(
        &mut self,
        parameters: &[&str],
        statements: impl FnOnce(&mut Self) -> Vec<NodeIndex>,
    ) -> NodeIndex {
        self.arrow(parameters, |b| b.block_body(statements))
    }

    /// `function(a, b) { ... }`
    pub fn function_expr(
        &mut self,
        parameters: &[&str],
        statements: impl FnOnce(&mut Self) -> Vec<NodeIndex>,
    ) -> NodeIndex {
        let mut children = NodeList::from_slice(&[self.token(SyntaxKind::FunctionKeyword)]);
        let parameters = self.parameter_list(parameters, &mut children);
        self.space();
        let body = self.block_body(statements);
        children.push(body);
        self.node(
            SyntaxKind::FunctionExpression,
            children,
            NodeData::Function(FunctionData { parameters, body }),
        )
    }

    /// `[a, b]`; elements interleaved with `comma()` tokens.
    pub fn array_literal(
        &mut self,
        elements: impl FnOnce(&mut Self) -> Vec<NodeIndex>,
    ) -> NodeIndex {
        let open = self.token(SyntaxKind::OpenBracketToken);
        let items = elements(self);
        let close = self.token(SyntaxKind::CloseBracketToken);
        let mut children = NodeList::from_slice(&[open]);
        children.extend(items.iter().copied());
        children.push(close);
        let elements = self.without_commas(&items);
        self.node(
            SyntaxKind::ArrayLiteralExpression,
            children,
            NodeData::LiteralExpr(LiteralExprData { elements }),
        )
    }

    /// `{}`
    pub fn empty_object(&mut self) -> NodeIndex {
        let open = self.token(SyntaxKind::OpenBraceToken);
        let close = self.token(SyntaxKind::CloseBraceToken);
        self.node(
            SyntaxKind::ObjectLiteralExpression,
            NodeList::from_slice(&[open, close]),
            NodeData::LiteralExpr(LiteralExprData {
                elements: NodeList::new(),
            }),
        )
    }

    // =========================================================================
    // Types
    // =========================================================================

    /// Write a type node from its text. Understands unions (`A | B`),
    /// intersections (`A & B`), arrays (`T[]`), keywords, string, numeric and
    /// boolean literal types and named references (`Foo`, `Enum.Member`).
    pub fn type_node(&mut self, text: &str) -> NodeIndex {
        if text.contains(" | ") {
            let parts: Vec<&str> = text.split(" | ").collect();
            return self.composite_type(SyntaxKind::UnionType, SyntaxKind::BarToken, &parts);
        }
        if text.contains(" & ") {
            let parts: Vec<&str> = text.split(" & ").collect();
            return self.composite_type(
                SyntaxKind::IntersectionType,
                SyntaxKind::AmpersandToken,
                &parts,
            );
        }
        if let Some(element) = text.strip_suffix("[]") {
            let element = self.type_node(element);
            let open = self.token(SyntaxKind::OpenBracketToken);
            let close = self.token(SyntaxKind::CloseBracketToken);
            return self.node(
                SyntaxKind::ArrayType,
                NodeList::from_slice(&[element, open, close]),
                NodeData::WrappedType(WrappedTypeData { type_node: element }),
            );
        }

        let literal = match text {
            "null" => Some(self.token(SyntaxKind::NullKeyword)),
            "true" => Some(self.token(SyntaxKind::TrueKeyword)),
            "false" => Some(self.token(SyntaxKind::FalseKeyword)),
            _ if text.starts_with('\'') || text.starts_with('"') => {
                let value = &text[1..text.len().saturating_sub(1).max(1)];
                Some(self.literal_token(SyntaxKind::StringLiteral, text, value))
            }
            _ if text.starts_with(|c: char| c.is_ascii_digit()) => Some(self.number(text)),
            _ => None,
        };
        if let Some(literal) = literal {
            return self.node(
                SyntaxKind::LiteralType,
                NodeList::from_slice(&[literal]),
                NodeData::WrappedType(WrappedTypeData { type_node: literal }),
            );
        }

        if let Some(keyword) = SyntaxKind::type_keyword(text) {
            return self.token(keyword);
        }

        let type_name = self.ident(text);
        self.node(
            SyntaxKind::TypeReference,
            NodeList::from_slice(&[type_name]),
            NodeData::TypeRef(TypeRefData { type_name }),
        )
    }

    fn composite_type(
        &mut self,
        kind: SyntaxKind,
        separator: SyntaxKind,
        parts: &[&str],
    ) -> NodeIndex {
        let mut children = NodeList::new();
        let mut types = NodeList::new();
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                self.space();
                children.push(self.token(separator));
                self.space();
            }
            let ty = self.type_node(part);
            children.push(ty);
            types.push(ty);
        }
        self.node(
            kind,
            children,
            NodeData::CompositeType(CompositeTypeData { types }),
        )
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// `expr;`
    pub fn expr_stmt(&mut self, expression: impl FnOnce(&mut Self) -> NodeIndex) -> NodeIndex {
        self.begin_statement();
        let expression = expression(self);
        let semicolon = self.token(SyntaxKind::SemicolonToken);
        self.node(
            SyntaxKind::ExpressionStatement,
            NodeList::from_slice(&[expression, semicolon]),
            NodeData::Wrapped(WrappedExprData { expression }),
        )
    }

    /// `kind name: T = init;`
    pub fn var_decl(
        &mut self,
        kind: VariableKind,
        name: &str,
        type_text: Option<&str>,
        initializer: impl FnOnce(&mut Self) -> NodeIndex,
    ) -> NodeIndex {
        self.variable_statement(false, kind, name, false, type_text, Some(initializer))
    }

    /// `kind name: T;`
    pub fn var_decl_uninit(
        &mut self,
        kind: VariableKind,
        name: &str,
        type_text: Option<&str>,
    ) -> NodeIndex {
        self.variable_statement(false, kind, name, false, type_text, NO_INITIALIZER)
    }

    /// `declare kind name: T;`
    pub fn declare_var(&mut self, kind: VariableKind, name: &str, type_text: &str) -> NodeIndex {
        self.variable_statement(true, kind, name, false, Some(type_text), NO_INITIALIZER)
    }

    /// `let name!: T;`
    pub fn definite_var(&mut self, name: &str, type_text: &str) -> NodeIndex {
        self.variable_statement(
            false,
            VariableKind::Let,
            name,
            true,
            Some(type_text),
            NO_INITIALIZER,
        )
    }

    fn variable_statement<F: FnOnce(&mut Self) -> NodeIndex>(
        &mut self,
        is_declare: bool,
        kind: VariableKind,
        name: &str,
        definite: bool,
        type_text: Option<&str>,
        initializer: Option<F>,
    ) -> NodeIndex {
        self.begin_statement();
        let mut statement_children = NodeList::new();
        if is_declare {
            statement_children.push(self.token(SyntaxKind::DeclareKeyword));
            self.space();
        }

        let keyword = self.token(kind.keyword());
        self.space();
        let name = self.ident(name);
        let mut decl_children = NodeList::from_slice(&[name]);
        if definite {
            decl_children.push(self.token(SyntaxKind::ExclamationToken));
        }
        let mut type_annotation = NodeIndex::NONE;
        if let Some(type_text) = type_text {
            decl_children.push(self.token(SyntaxKind::ColonToken));
            self.space();
            type_annotation = self.type_node(type_text);
            decl_children.push(type_annotation);
        }
        let mut init = NodeIndex::NONE;
        if let Some(initializer) = initializer {
            self.space();
            decl_children.push(self.token(SyntaxKind::EqualsToken));
            self.space();
            init = initializer(self);
            decl_children.push(init);
        }
        let declaration = self.node(
            SyntaxKind::VariableDeclaration,
            decl_children,
            NodeData::VariableDeclaration(VariableDeclarationData {
                name,
                exclamation_token: definite,
                type_annotation,
                initializer: init,
            }),
        );
        let declaration_list = self.node(
            SyntaxKind::VariableDeclarationList,
            NodeList::from_slice(&[keyword, declaration]),
            NodeData::VariableList(VariableListData {
                kind,
                declarations: NodeList::from_slice(&[declaration]),
            }),
        );
        statement_children.push(declaration_list);
        statement_children.push(self.token(SyntaxKind::SemicolonToken));
        self.node(
            SyntaxKind::VariableStatement,
            statement_children,
            NodeData::VariableStatement(VariableStatementData {
                is_declare,
                declaration_list,
            }),
        )
    }

    /// `{ ... }` as a statement.
    pub fn block(&mut self, statements: impl FnOnce(&mut Self) -> Vec<NodeIndex>) -> NodeIndex {
        self.begin_statement();
        self.block_body(statements)
    }

    fn block_body(&mut self, statements: impl FnOnce(&mut Self) -> Vec<NodeIndex>) -> NodeIndex {
        let (open, statements, close) = self.braced(statements);
        let mut children = NodeList::from_slice(&[open]);
        children.extend(statements.iter().copied());
        children.push(close);
        self.node(
            SyntaxKind::Block,
            children,
            NodeData::Block(BlockData {
                statements: statements.into_iter().collect(),
            }),
        )
    }

    fn braced(
        &mut self,
        contents: impl FnOnce(&mut Self) -> Vec<NodeIndex>,
    ) -> (NodeIndex, Vec<NodeIndex>, NodeIndex) {
        let open = self.token(SyntaxKind::OpenBraceToken);
        self.indent += 1;
        let mark = self.offset();
        let items = contents(self);
        self.indent -= 1;
        if self.offset() > mark {
            self.newline();
        }
        let close = self.token(SyntaxKind::CloseBraceToken);
        (open, items, close)
    }

    /// Write `keyword (` condition `)` and return the three tokens and the
    /// condition.
    fn parenthesized_head(
        &mut self,
        keyword: SyntaxKind,
        condition: impl FnOnce(&mut Self) -> NodeIndex,
    ) -> (NodeList, NodeIndex) {
        let keyword = self.token(keyword);
        self.space();
        let open = self.token(SyntaxKind::OpenParenToken);
        let condition = condition(self);
        let close = self.token(SyntaxKind::CloseParenToken);
        (NodeList::from_slice(&[keyword, open, condition, close]), condition)
    }

    fn inline_body(&mut self, statement: impl FnOnce(&mut Self) -> NodeIndex) -> NodeIndex {
        self.space();
        self.inline_statement = true;
        let statement = statement(self);
        self.inline_statement = false;
        statement
    }

    /// `if (cond) then`
    pub fn if_stmt(
        &mut self,
        condition: impl FnOnce(&mut Self) -> NodeIndex,
        then_statement: impl FnOnce(&mut Self) -> NodeIndex,
    ) -> NodeIndex {
        self.if_else_opt(condition, then_statement, None::<fn(&mut Self) -> NodeIndex>)
    }

    /// `if (cond) then else otherwise`
    pub fn if_else(
        &mut self,
        condition: impl FnOnce(&mut Self) -> NodeIndex,
        then_statement: impl FnOnce(&mut Self) -> NodeIndex,
        else_statement: impl FnOnce(&mut Self) -> NodeIndex,
    ) -> NodeIndex {
        self.if_else_opt(condition, then_statement, Some(else_statement))
    }

    fn if_else_opt<E: FnOnce(&mut Self) -> NodeIndex>(
        &mut self,
        condition: impl FnOnce(&mut Self) -> NodeIndex,
        then_statement: impl FnOnce(&mut Self) -> NodeIndex,
        else_statement: Option<E>,
    ) -> NodeIndex {
        self.begin_statement();
        let (mut children, expression) = self.parenthesized_head(SyntaxKind::IfKeyword, condition);
        let then_statement = self.inline_body(then_statement);
        children.push(then_statement);
        let mut else_index = NodeIndex::NONE;
        if let Some(else_statement) = else_statement {
            self.space();
            children.push(self.token(SyntaxKind::ElseKeyword));
            else_index = self.inline_body(else_statement);
            children.push(else_index);
        }
        self.node(
            SyntaxKind::IfStatement,
            children,
            NodeData::If(IfStatementData {
                expression,
                then_statement,
                else_statement: else_index,
            }),
        )
    }

    /// `while (cond) body`
    pub fn while_stmt(
        &mut self,
        condition: impl FnOnce(&mut Self) -> NodeIndex,
        body: impl FnOnce(&mut Self) -> NodeIndex,
    ) -> NodeIndex {
        self.begin_statement();
        let (mut children, condition) =
            self.parenthesized_head(SyntaxKind::WhileKeyword, condition);
        let statement = self.inline_body(body);
        children.push(statement);
        self.loop_node(SyntaxKind::WhileStatement, children, condition, statement)
    }

    /// `do body while (cond);`
    pub fn do_while(
        &mut self,
        body: impl FnOnce(&mut Self) -> NodeIndex,
        condition: impl FnOnce(&mut Self) -> NodeIndex,
    ) -> NodeIndex {
        self.begin_statement();
        let mut children = NodeList::from_slice(&[self.token(SyntaxKind::DoKeyword)]);
        let statement = self.inline_body(body);
        children.push(statement);
        self.space();
        let (head, condition) = self.parenthesized_head(SyntaxKind::WhileKeyword, condition);
        children.extend(head);
        children.push(self.token(SyntaxKind::SemicolonToken));
        self.loop_node(SyntaxKind::DoStatement, children, condition, statement)
    }

    /// `for (; cond;) body`, or `for (;;) body` when `condition` returns `None`.
    pub fn for_stmt(
        &mut self,
        condition: impl FnOnce(&mut Self) -> Option<NodeIndex>,
        body: impl FnOnce(&mut Self) -> NodeIndex,
    ) -> NodeIndex {
        self.begin_statement();
        let mut children = NodeList::from_slice(&[self.token(SyntaxKind::ForKeyword)]);
        self.space();
        children.push(self.token(SyntaxKind::OpenParenToken));
        children.push(self.token(SyntaxKind::SemicolonToken));
        let mark = self.offset();
        self.space();
        let condition = match condition(self) {
            Some(condition) => {
                children.push(condition);
                condition
            }
            None => {
                // `for (;;)` has no space between the semicolons.
                self.text.truncate(mark as usize);
                NodeIndex::NONE
            }
        };
        children.push(self.token(SyntaxKind::SemicolonToken));
        children.push(self.token(SyntaxKind::CloseParenToken));
        let statement = self.inline_body(body);
        children.push(statement);
        self.loop_node(SyntaxKind::ForStatement, children, condition, statement)
    }

    fn loop_node(
        &mut self,
        kind: SyntaxKind,
        children: NodeList,
        condition: NodeIndex,
        statement: NodeIndex,
    ) -> NodeIndex {
        self.node(
            kind,
            children,
            NodeData::Loop(LoopData {
                initializer: NodeIndex::NONE,
                condition,
                incrementor: NodeIndex::NONE,
                statement,
            }),
        )
    }

    /// `switch (expr) { clauses }`
    pub fn switch_stmt(
        &mut self,
        expression: impl FnOnce(&mut Self) -> NodeIndex,
        clauses: impl FnOnce(&mut Self) -> Vec<NodeIndex>,
    ) -> NodeIndex {
        self.begin_statement();
        let (mut children, expression) =
            self.parenthesized_head(SyntaxKind::SwitchKeyword, expression);
        self.space();
        let (open, clauses, close) = self.braced(clauses);
        let mut block_children = NodeList::from_slice(&[open]);
        block_children.extend(clauses.iter().copied());
        block_children.push(close);
        let case_block = self.node(
            SyntaxKind::CaseBlock,
            block_children,
            NodeData::Block(BlockData {
                statements: clauses.into_iter().collect(),
            }),
        );
        children.push(case_block);
        self.node(
            SyntaxKind::SwitchStatement,
            children,
            NodeData::Switch(SwitchData {
                expression,
                case_block,
            }),
        )
    }

    /// `case expr:` followed by statements.
    pub fn case_clause(
        &mut self,
        expression: impl FnOnce(&mut Self) -> NodeIndex,
        statements: impl FnOnce(&mut Self) -> Vec<NodeIndex>,
    ) -> NodeIndex {
        self.begin_statement();
        let keyword = self.token(SyntaxKind::CaseKeyword);
        self.space();
        let expression = expression(self);
        let colon = self.token(SyntaxKind::ColonToken);
        self.clause(
            SyntaxKind::CaseClause,
            NodeList::from_slice(&[keyword, expression, colon]),
            expression,
            statements,
        )
    }

    /// `default:` followed by statements.
    pub fn default_clause(
        &mut self,
        statements: impl FnOnce(&mut Self) -> Vec<NodeIndex>,
    ) -> NodeIndex {
        self.begin_statement();
        let keyword = self.token(SyntaxKind::DefaultKeyword);
        let colon = self.token(SyntaxKind::ColonToken);
        self.clause(
            SyntaxKind::DefaultClause,
            NodeList::from_slice(&[keyword, colon]),
            NodeIndex::NONE,
            statements,
        )
    }

    fn clause(
        &mut self,
        kind: SyntaxKind,
        mut children: NodeList,
        expression: NodeIndex,
        statements: impl FnOnce(&mut Self) -> Vec<NodeIndex>,
    ) -> NodeIndex {
        self.indent += 1;
        let statements = statements(self);
        self.indent -= 1;
        children.extend(statements.iter().copied());
        self.node(
            kind,
            children,
            NodeData::CaseClause(CaseClauseData {
                expression,
                statements: statements.into_iter().collect(),
            }),
        )
    }

    /// `break;`
    pub fn break_stmt(&mut self) -> NodeIndex {
        self.begin_statement();
        let keyword = self.token(SyntaxKind::BreakKeyword);
        let semicolon = self.token(SyntaxKind::SemicolonToken);
        self.node(
            SyntaxKind::BreakStatement,
            NodeList::from_slice(&[keyword, semicolon]),
            NodeData::Jump(JumpData {
                expression: NodeIndex::NONE,
            }),
        )
    }

    /// `return expr;`
    pub fn return_stmt(&mut self, expression: impl FnOnce(&mut Self) -> NodeIndex) -> NodeIndex {
        self.jump_with_expression(
            SyntaxKind::ReturnKeyword,
            SyntaxKind::ReturnStatement,
            expression,
        )
    }

    /// `throw expr;`
    pub fn throw_stmt(&mut self, expression: impl FnOnce(&mut Self) -> NodeIndex) -> NodeIndex {
        self.jump_with_expression(SyntaxKind::ThrowKeyword, SyntaxKind::ThrowStatement, expression)
    }

    fn jump_with_expression(
        &mut self,
        keyword: SyntaxKind,
        kind: SyntaxKind,
        expression: impl FnOnce(&mut Self) -> NodeIndex,
    ) -> NodeIndex {
        self.begin_statement();
        let keyword = self.token(keyword);
        self.space();
        let expression = expression(self);
        let semicolon = self.token(SyntaxKind::SemicolonToken);
        self.node(
            kind,
            NodeList::from_slice(&[keyword, expression, semicolon]),
            NodeData::Jump(JumpData { expression }),
        )
    }
}

const NO_INITIALIZER: Option<fn(&mut SourceBuilder) -> NodeIndex> = None;
