//! SyntaxKind enum - all token and node kinds in the ILang syntax tree.

/// The kind of a syntax token or node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    // ========================================================================
    // Tokens
    // ========================================================================
    Unknown = 0,
    EndOfFileToken = 1,

    // Literals
    NumericLiteral = 2,
    Identifier = 3,

    // Punctuation
    OpenBraceToken = 4,
    CloseBraceToken = 5,
    OpenParenToken = 6,
    CloseParenToken = 7,
    LessThanToken = 8,
    GreaterThanToken = 9,
    LessThanEqualsToken = 10,
    GreaterThanEqualsToken = 11,
    EqualsEqualsToken = 12,
    ExclamationEqualsToken = 13,
    PlusToken = 14,
    MinusToken = 15,
    AsteriskToken = 16,
    SlashToken = 17,
    AmpersandToken = 18,
    BarToken = 19,
    CaretToken = 20,
    ExclamationToken = 21,
    TildeToken = 22,
    AmpersandAmpersandToken = 23,
    BarBarToken = 24,
    EqualsToken = 25,

    // Keywords
    ElseKeyword = 26,
    FalseKeyword = 27,
    ForKeyword = 28,
    IfKeyword = 29,
    LetKeyword = 30,
    ToKeyword = 31,
    TrueKeyword = 32,
    VarKeyword = 33,
    WhileKeyword = 34,

    // ========================================================================
    // Nodes
    // ========================================================================
    CompilationUnit = 35,
    ElseClause = 36,

    // Statements
    BlockStatement = 37,
    VariableDeclaration = 38,
    IfStatement = 39,
    WhileStatement = 40,
    ForStatement = 41,
    ExpressionStatement = 42,

    // Expressions
    LiteralExpression = 43,
    NameExpression = 44,
    AssignmentExpression = 45,
    UnaryExpression = 46,
    BinaryExpression = 47,
    ParenthesizedExpression = 48,
}

impl SyntaxKind {
    pub const FIRST_PUNCTUATION: SyntaxKind = SyntaxKind::OpenBraceToken;
    pub const LAST_PUNCTUATION: SyntaxKind = SyntaxKind::EqualsToken;
    pub const FIRST_KEYWORD: SyntaxKind = SyntaxKind::ElseKeyword;
    pub const LAST_KEYWORD: SyntaxKind = SyntaxKind::WhileKeyword;
    pub const LAST_TOKEN: SyntaxKind = SyntaxKind::WhileKeyword;

    /// Every punctuation kind, in declaration order.
    pub const PUNCTUATION: &'static [SyntaxKind] = &[
        SyntaxKind::OpenBraceToken,
        SyntaxKind::CloseBraceToken,
        SyntaxKind::OpenParenToken,
        SyntaxKind::CloseParenToken,
        SyntaxKind::LessThanToken,
        SyntaxKind::GreaterThanToken,
        SyntaxKind::LessThanEqualsToken,
        SyntaxKind::GreaterThanEqualsToken,
        SyntaxKind::EqualsEqualsToken,
        SyntaxKind::ExclamationEqualsToken,
        SyntaxKind::PlusToken,
        SyntaxKind::MinusToken,
        SyntaxKind::AsteriskToken,
        SyntaxKind::SlashToken,
        SyntaxKind::AmpersandToken,
        SyntaxKind::BarToken,
        SyntaxKind::CaretToken,
        SyntaxKind::ExclamationToken,
        SyntaxKind::TildeToken,
        SyntaxKind::AmpersandAmpersandToken,
        SyntaxKind::BarBarToken,
        SyntaxKind::EqualsToken,
    ];

    /// Every keyword kind, in declaration order.
    pub const KEYWORDS: &'static [SyntaxKind] = &[
        SyntaxKind::ElseKeyword,
        SyntaxKind::FalseKeyword,
        SyntaxKind::ForKeyword,
        SyntaxKind::IfKeyword,
        SyntaxKind::LetKeyword,
        SyntaxKind::ToKeyword,
        SyntaxKind::TrueKeyword,
        SyntaxKind::VarKeyword,
        SyntaxKind::WhileKeyword,
    ];
}

impl SyntaxKind {
    /// Whether this kind represents a keyword.
    #[inline]
    pub fn is_keyword(self) -> bool {
        let v = self as u16;
        v >= SyntaxKind::FIRST_KEYWORD as u16 && v <= SyntaxKind::LAST_KEYWORD as u16
    }

    /// Whether this kind represents punctuation (operators, braces, parens).
    #[inline]
    pub fn is_punctuation(self) -> bool {
        let v = self as u16;
        v >= SyntaxKind::FIRST_PUNCTUATION as u16 && v <= SyntaxKind::LAST_PUNCTUATION as u16
    }

    /// Whether this kind is a token (as opposed to a node).
    #[inline]
    pub fn is_token(self) -> bool {
        self as u16 <= SyntaxKind::LAST_TOKEN as u16
    }

    /// Get the source text of a keyword kind.
    pub fn keyword_text(self) -> Option<&'static str> {
        match self {
            SyntaxKind::ElseKeyword => Some("else"),
            SyntaxKind::FalseKeyword => Some("false"),
            SyntaxKind::ForKeyword => Some("for"),
            SyntaxKind::IfKeyword => Some("if"),
            SyntaxKind::LetKeyword => Some("let"),
            SyntaxKind::ToKeyword => Some("to"),
            SyntaxKind::TrueKeyword => Some("true"),
            SyntaxKind::VarKeyword => Some("var"),
            SyntaxKind::WhileKeyword => Some("while"),
            _ => None,
        }
    }

    /// Look up a keyword by its text.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        match text {
            "else" => Some(SyntaxKind::ElseKeyword),
            "false" => Some(SyntaxKind::FalseKeyword),
            "for" => Some(SyntaxKind::ForKeyword),
            "if" => Some(SyntaxKind::IfKeyword),
            "let" => Some(SyntaxKind::LetKeyword),
            "to" => Some(SyntaxKind::ToKeyword),
            "true" => Some(SyntaxKind::TrueKeyword),
            "var" => Some(SyntaxKind::VarKeyword),
            "while" => Some(SyntaxKind::WhileKeyword),
            _ => None,
        }
    }

    /// Get the source text of a punctuation kind.
    pub fn punctuation_text(self) -> Option<&'static str> {
        match self {
            SyntaxKind::OpenBraceToken => Some("{"),
            SyntaxKind::CloseBraceToken => Some("}"),
            SyntaxKind::OpenParenToken => Some("("),
            SyntaxKind::CloseParenToken => Some(")"),
            SyntaxKind::LessThanToken => Some("<"),
            SyntaxKind::GreaterThanToken => Some(">"),
            SyntaxKind::LessThanEqualsToken => Some("<="),
            SyntaxKind::GreaterThanEqualsToken => Some(">="),
            SyntaxKind::EqualsEqualsToken => Some("=="),
            SyntaxKind::ExclamationEqualsToken => Some("!="),
            SyntaxKind::PlusToken => Some("+"),
            SyntaxKind::MinusToken => Some("-"),
            SyntaxKind::AsteriskToken => Some("*"),
            SyntaxKind::SlashToken => Some("/"),
            SyntaxKind::AmpersandToken => Some("&"),
            SyntaxKind::BarToken => Some("|"),
            SyntaxKind::CaretToken => Some("^"),
            SyntaxKind::ExclamationToken => Some("!"),
            SyntaxKind::TildeToken => Some("~"),
            SyntaxKind::AmpersandAmpersandToken => Some("&&"),
            SyntaxKind::BarBarToken => Some("||"),
            SyntaxKind::EqualsToken => Some("="),
            _ => None,
        }
    }

    /// The fixed source text of this kind, if it has one.
    pub fn text(self) -> Option<&'static str> {
        self.punctuation_text().or_else(|| self.keyword_text())
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
