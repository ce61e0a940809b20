//! Syntax kinds for tokens, keywords, expressions, statements and type nodes.
//!
//! The tree stores every token as its own leaf node so rules can locate
//! operators and punctuation (`as`, `!`, `?.`, `||`) by position.

use serde::{Deserialize, Serialize};

#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SyntaxKind {
    Unknown = 0,
    EndOfFileToken,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    CommaToken,
    QuestionDotToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    EqualsGreaterThanToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    PercentToken,
    PlusPlusToken,
    MinusMinusToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    ExclamationToken,
    TildeToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionToken,
    ColonToken,
    QuestionQuestionToken,

    // Assignments
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AmpersandAmpersandEqualsToken,
    BarBarEqualsToken,
    QuestionQuestionEqualsToken,

    // Keywords
    AsKeyword,
    BreakKeyword,
    CaseKeyword,
    ConstKeyword,
    DeclareKeyword,
    DefaultKeyword,
    DoKeyword,
    ElseKeyword,
    FalseKeyword,
    ForKeyword,
    FunctionKeyword,
    IfKeyword,
    InKeyword,
    InstanceOfKeyword,
    LetKeyword,
    NewKeyword,
    NullKeyword,
    ReadonlyKeyword,
    ReturnKeyword,
    SatisfiesKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TrueKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,
    WhileKeyword,

    // Type keywords
    AnyKeyword,
    UnknownKeyword,
    NeverKeyword,
    StringKeyword,
    NumberKeyword,
    BooleanKeyword,
    BigIntKeyword,
    SymbolKeyword,
    ObjectKeyword,
    UndefinedKeyword,

    // Literal tokens and names
    Identifier,
    StringLiteral,
    NumericLiteral,
    BigIntLiteral,
    NoSubstitutionTemplateLiteral,
    TemplateHead,
    TemplateMiddle,
    TemplateTail,

    // Expressions
    ArrayLiteralExpression,
    ObjectLiteralExpression,
    PropertyAccessExpression,
    ElementAccessExpression,
    CallExpression,
    NewExpression,
    ParenthesizedExpression,
    FunctionExpression,
    ArrowFunction,
    TypeOfExpression,
    PrefixUnaryExpression,
    PostfixUnaryExpression,
    BinaryExpression,
    ConditionalExpression,
    TemplateExpression,
    TemplateSpan,
    AsExpression,
    TypeAssertionExpression,
    SatisfiesExpression,
    NonNullExpression,
    Parameter,

    // Statements
    Block,
    VariableStatement,
    VariableDeclarationList,
    VariableDeclaration,
    ExpressionStatement,
    IfStatement,
    DoStatement,
    WhileStatement,
    ForStatement,
    SwitchStatement,
    CaseBlock,
    CaseClause,
    DefaultClause,
    BreakStatement,
    ReturnStatement,
    ThrowStatement,
    EmptyStatement,

    // Type nodes
    TypeReference,
    LiteralType,
    UnionType,
    IntersectionType,
    ArrayType,

    SourceFile,
}

impl SyntaxKind {
    /// The fixed spelling of a token or keyword kind.
    #[must_use]
    pub const fn text(self) -> Option<&'static str> {
        use SyntaxKind::*;
        let s = match self {
            OpenBraceToken => "{",
            CloseBraceToken => "}",
            OpenParenToken => "(",
            CloseParenToken => ")",
            OpenBracketToken => "[",
            CloseBracketToken => "]",
            DotToken => ".",
            DotDotDotToken => "...",
            SemicolonToken => ";",
            CommaToken => ",",
            QuestionDotToken => "?.",
            LessThanToken => "<",
            GreaterThanToken => ">",
            LessThanEqualsToken => "<=",
            GreaterThanEqualsToken => ">=",
            EqualsEqualsToken => "==",
            ExclamationEqualsToken => "!=",
            EqualsEqualsEqualsToken => "===",
            ExclamationEqualsEqualsToken => "!==",
            EqualsGreaterThanToken => "=>",
            PlusToken => "+",
            MinusToken => "-",
            AsteriskToken => "*",
            SlashToken => "/",
            PercentToken => "%",
            PlusPlusToken => "++",
            MinusMinusToken => "--",
            AmpersandToken => "&",
            BarToken => "|",
            CaretToken => "^",
            ExclamationToken => "!",
            TildeToken => "~",
            AmpersandAmpersandToken => "&&",
            BarBarToken => "||",
            QuestionToken => "?",
            ColonToken => ":",
            QuestionQuestionToken => "??",
            EqualsToken => "=",
            PlusEqualsToken => "+=",
            MinusEqualsToken => "-=",
            AmpersandAmpersandEqualsToken => "&&=",
            BarBarEqualsToken => "||=",
            QuestionQuestionEqualsToken => "??=",
            AsKeyword => "as",
            BreakKeyword => "break",
            CaseKeyword => "case",
            ConstKeyword => "const",
            DeclareKeyword => "declare",
            DefaultKeyword => "default",
            DoKeyword => "do",
            ElseKeyword => "else",
            FalseKeyword => "false",
            ForKeyword => "for",
            FunctionKeyword => "function",
            IfKeyword => "if",
            InKeyword => "in",
            InstanceOfKeyword => "instanceof",
            LetKeyword => "let",
            NewKeyword => "new",
            NullKeyword => "null",
            ReadonlyKeyword => "readonly",
            ReturnKeyword => "return",
            SatisfiesKeyword => "satisfies",
            SwitchKeyword => "switch",
            ThisKeyword => "this",
            ThrowKeyword => "throw",
            TrueKeyword => "true",
            TypeOfKeyword => "typeof",
            VarKeyword => "var",
            VoidKeyword => "void",
            WhileKeyword => "while",
            AnyKeyword => "any",
            UnknownKeyword => "unknown",
            NeverKeyword => "never",
            StringKeyword => "string",
            NumberKeyword => "number",
            BooleanKeyword => "boolean",
            BigIntKeyword => "bigint",
            SymbolKeyword => "symbol",
            ObjectKeyword => "object",
            UndefinedKeyword => "undefined",
            _ => return None,
        };
        Some(s)
    }

    /// Keyword kind for a type keyword spelling (`string`, `number`, ...).
    #[must_use]
    pub fn type_keyword(text: &str) -> Option<SyntaxKind> {
        use SyntaxKind::*;
        let kind = match text {
            "any" => AnyKeyword,
            "unknown" => UnknownKeyword,
            "never" => NeverKeyword,
            "void" => VoidKeyword,
            "string" => StringKeyword,
            "number" => NumberKeyword,
            "boolean" => BooleanKeyword,
            "bigint" => BigIntKeyword,
            "symbol" => SymbolKeyword,
            "object" => ObjectKeyword,
            "undefined" => UndefinedKeyword,
            "null" => NullKeyword,
            _ => return None,
        };
        Some(kind)
    }

    /// Tokens are leaves: punctuation, keywords, names and literal tokens.
    #[must_use]
    pub const fn is_token(self) -> bool {
        (self as u16) <= (SyntaxKind::TemplateTail as u16)
    }

    #[must_use]
    pub const fn is_punctuation(self) -> bool {
        let k = self as u16;
        k >= SyntaxKind::OpenBraceToken as u16
            && k <= SyntaxKind::QuestionQuestionEqualsToken as u16
    }

    #[must_use]
    pub const fn is_keyword(self) -> bool {
        let k = self as u16;
        k >= SyntaxKind::AsKeyword as u16 && k <= SyntaxKind::UndefinedKeyword as u16
    }

    #[must_use]
    pub const fn is_assignment_operator(self) -> bool {
        let k = self as u16;
        k >= SyntaxKind::EqualsToken as u16 && k <= SyntaxKind::QuestionQuestionEqualsToken as u16
    }

    /// `&&=`, `||=` and `??=`.
    #[must_use]
    pub const fn is_logical_assignment_operator(self) -> bool {
        matches!(
            self,
            SyntaxKind::AmpersandAmpersandEqualsToken
                | SyntaxKind::BarBarEqualsToken
                | SyntaxKind::QuestionQuestionEqualsToken
        )
    }

    /// `&&`, `||` and `??`.
    #[must_use]
    pub const fn is_logical_operator(self) -> bool {
        matches!(
            self,
            SyntaxKind::AmpersandAmpersandToken
                | SyntaxKind::BarBarToken
                | SyntaxKind::QuestionQuestionToken
        )
    }

    #[must_use]
    pub const fn is_equality_operator(self) -> bool {
        matches!(
            self,
            SyntaxKind::EqualsEqualsToken
                | SyntaxKind::ExclamationEqualsToken
                | SyntaxKind::EqualsEqualsEqualsToken
                | SyntaxKind::ExclamationEqualsEqualsToken
        )
    }

    #[must_use]
    pub const fn is_relational_operator(self) -> bool {
        matches!(
            self,
            SyntaxKind::LessThanToken
                | SyntaxKind::GreaterThanToken
                | SyntaxKind::LessThanEqualsToken
                | SyntaxKind::GreaterThanEqualsToken
        )
    }

    /// Binary operator precedence, higher binds tighter. Non-operators are 0.
    #[must_use]
    pub const fn operator_precedence(self) -> u8 {
        use SyntaxKind::*;
        match self {
            CommaToken => 0,
            EqualsToken
            | PlusEqualsToken
            | MinusEqualsToken
            | AmpersandAmpersandEqualsToken
            | BarBarEqualsToken
            | QuestionQuestionEqualsToken => 2,
            QuestionQuestionToken => 4,
            BarBarToken => 5,
            AmpersandAmpersandToken => 6,
            BarToken => 7,
            CaretToken => 8,
            AmpersandToken => 9,
            EqualsEqualsToken
            | ExclamationEqualsToken
            | EqualsEqualsEqualsToken
            | ExclamationEqualsEqualsToken => 10,
            LessThanToken | GreaterThanToken | LessThanEqualsToken | GreaterThanEqualsToken
            | InKeyword | InstanceOfKeyword => 11,
            PlusToken | MinusToken => 13,
            AsteriskToken | SlashToken | PercentToken => 14,
            _ => 0,
        }
    }

    /// Kinds that are function-like containers (conditional-test walks stop here).
    #[must_use]
    pub const fn is_function_like(self) -> bool {
        matches!(self, SyntaxKind::ArrowFunction | SyntaxKind::FunctionExpression)
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}
