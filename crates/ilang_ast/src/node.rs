//! Syntax tree node definitions.
//!
//! Nodes are plain data borrowed from a bump arena owned by the caller of the
//! parser. Child nodes are `&'a` references and child lists are `&'a [T]`
//! slices, so a whole tree is `Copy`-cheap to walk and needs no drop glue.

use crate::syntax_kind::SyntaxKind;
use ilang_core::text::TextSpan;
use ilang_core::value::Value;

/// A list of child nodes allocated in the arena.
pub type NodeList<'a, T> = &'a [T];

// ============================================================================
// Tokens
// ============================================================================

/// A token produced by the scanner.
///
/// Tokens synthesized by the parser for missing input have empty `text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxToken<'a> {
    pub kind: SyntaxKind,
    pub span: TextSpan,
    pub text: &'a str,
    /// The literal value carried by numeric and boolean tokens.
    pub value: Option<Value>,
}

impl<'a> SyntaxToken<'a> {
    pub fn new(kind: SyntaxKind, span: TextSpan, text: &'a str, value: Option<Value>) -> Self {
        Self {
            kind,
            span,
            text,
            value,
        }
    }

    /// A zero-width token standing in for one the parser expected but did not find.
    pub fn missing(kind: SyntaxKind, position: u32) -> Self {
        Self {
            kind,
            span: TextSpan::empty(position),
            text: "",
            value: None,
        }
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        self.text.is_empty() && self.kind != SyntaxKind::EndOfFileToken
    }
}

// ============================================================================
// Compilation unit
// ============================================================================

/// The root of a parsed submission: one statement followed by end of file.
#[derive(Debug, Clone, Copy)]
pub struct CompilationUnitSyntax<'a> {
    pub statement: &'a StatementSyntax<'a>,
    pub end_of_file_token: SyntaxToken<'a>,
}

impl<'a> CompilationUnitSyntax<'a> {
    pub fn span(&self) -> TextSpan {
        self.statement.span().union(&self.end_of_file_token.span)
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum StatementSyntax<'a> {
    Block(BlockStatementSyntax<'a>),
    VariableDeclaration(VariableDeclarationSyntax<'a>),
    If(IfStatementSyntax<'a>),
    While(WhileStatementSyntax<'a>),
    For(ForStatementSyntax<'a>),
    Expression(ExpressionStatementSyntax<'a>),
}

impl<'a> StatementSyntax<'a> {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            StatementSyntax::Block(_) => SyntaxKind::BlockStatement,
            StatementSyntax::VariableDeclaration(_) => SyntaxKind::VariableDeclaration,
            StatementSyntax::If(_) => SyntaxKind::IfStatement,
            StatementSyntax::While(_) => SyntaxKind::WhileStatement,
            StatementSyntax::For(_) => SyntaxKind::ForStatement,
            StatementSyntax::Expression(_) => SyntaxKind::ExpressionStatement,
        }
    }

    pub fn span(&self) -> TextSpan {
        match self {
            StatementSyntax::Block(n) => n.open_brace_token.span.union(&n.close_brace_token.span),
            StatementSyntax::VariableDeclaration(n) => n.keyword.span.union(&n.initializer.span()),
            StatementSyntax::If(n) => {
                let last = match &n.else_clause {
                    Some(else_clause) => else_clause.else_statement.span(),
                    None => n.then_statement.span(),
                };
                n.if_keyword.span.union(&last)
            }
            StatementSyntax::While(n) => n.while_keyword.span.union(&n.body.span()),
            StatementSyntax::For(n) => n.for_keyword.span.union(&n.body.span()),
            StatementSyntax::Expression(n) => n.expression.span(),
        }
    }
}

/// `{ statement* }`
#[derive(Debug, Clone, Copy)]
pub struct BlockStatementSyntax<'a> {
    pub open_brace_token: SyntaxToken<'a>,
    pub statements: NodeList<'a, StatementSyntax<'a>>,
    pub close_brace_token: SyntaxToken<'a>,
}

/// `let name = expr` or `var name = expr`
#[derive(Debug, Clone, Copy)]
pub struct VariableDeclarationSyntax<'a> {
    pub keyword: SyntaxToken<'a>,
    pub identifier: SyntaxToken<'a>,
    pub equals_token: SyntaxToken<'a>,
    pub initializer: &'a ExpressionSyntax<'a>,
}

impl<'a> VariableDeclarationSyntax<'a> {
    /// `let` declares a read-only variable.
    pub fn is_read_only(&self) -> bool {
        self.keyword.kind == SyntaxKind::LetKeyword
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IfStatementSyntax<'a> {
    pub if_keyword: SyntaxToken<'a>,
    pub condition: &'a ExpressionSyntax<'a>,
    pub then_statement: &'a StatementSyntax<'a>,
    pub else_clause: Option<ElseClauseSyntax<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct ElseClauseSyntax<'a> {
    pub else_keyword: SyntaxToken<'a>,
    pub else_statement: &'a StatementSyntax<'a>,
}

impl<'a> ElseClauseSyntax<'a> {
    pub fn span(&self) -> TextSpan {
        self.else_keyword.span.union(&self.else_statement.span())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WhileStatementSyntax<'a> {
    pub while_keyword: SyntaxToken<'a>,
    pub condition: &'a ExpressionSyntax<'a>,
    pub body: &'a StatementSyntax<'a>,
}

/// `for name = lower to upper body`
#[derive(Debug, Clone, Copy)]
pub struct ForStatementSyntax<'a> {
    pub for_keyword: SyntaxToken<'a>,
    pub identifier: SyntaxToken<'a>,
    pub equals_token: SyntaxToken<'a>,
    pub lower_bound: &'a ExpressionSyntax<'a>,
    pub to_keyword: SyntaxToken<'a>,
    pub upper_bound: &'a ExpressionSyntax<'a>,
    pub body: &'a StatementSyntax<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct ExpressionStatementSyntax<'a> {
    pub expression: &'a ExpressionSyntax<'a>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum ExpressionSyntax<'a> {
    Literal(LiteralExpressionSyntax<'a>),
    Name(NameExpressionSyntax<'a>),
    Assignment(AssignmentExpressionSyntax<'a>),
    Unary(UnaryExpressionSyntax<'a>),
    Binary(BinaryExpressionSyntax<'a>),
    Parenthesized(ParenthesizedExpressionSyntax<'a>),
}

impl<'a> ExpressionSyntax<'a> {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            ExpressionSyntax::Literal(_) => SyntaxKind::LiteralExpression,
            ExpressionSyntax::Name(_) => SyntaxKind::NameExpression,
            ExpressionSyntax::Assignment(_) => SyntaxKind::AssignmentExpression,
            ExpressionSyntax::Unary(_) => SyntaxKind::UnaryExpression,
            ExpressionSyntax::Binary(_) => SyntaxKind::BinaryExpression,
            ExpressionSyntax::Parenthesized(_) => SyntaxKind::ParenthesizedExpression,
        }
    }

    pub fn span(&self) -> TextSpan {
        match self {
            ExpressionSyntax::Literal(n) => n.literal_token.span,
            ExpressionSyntax::Name(n) => n.identifier_token.span,
            ExpressionSyntax::Assignment(n) => n.identifier_token.span.union(&n.expression.span()),
            ExpressionSyntax::Unary(n) => n.operator_token.span.union(&n.operand.span()),
            ExpressionSyntax::Binary(n) => n.left.span().union(&n.right.span()),
            ExpressionSyntax::Parenthesized(n) => {
                n.open_paren_token.span.union(&n.close_paren_token.span)
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LiteralExpressionSyntax<'a> {
    pub literal_token: SyntaxToken<'a>,
    pub value: Value,
}

#[derive(Debug, Clone, Copy)]
pub struct NameExpressionSyntax<'a> {
    pub identifier_token: SyntaxToken<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct AssignmentExpressionSyntax<'a> {
    pub identifier_token: SyntaxToken<'a>,
    pub equals_token: SyntaxToken<'a>,
    pub expression: &'a ExpressionSyntax<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct UnaryExpressionSyntax<'a> {
    pub operator_token: SyntaxToken<'a>,
    pub operand: &'a ExpressionSyntax<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct BinaryExpressionSyntax<'a> {
    pub left: &'a ExpressionSyntax<'a>,
    pub operator_token: SyntaxToken<'a>,
    pub right: &'a ExpressionSyntax<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct ParenthesizedExpressionSyntax<'a> {
    pub open_paren_token: SyntaxToken<'a>,
    pub expression: &'a ExpressionSyntax<'a>,
    pub close_paren_token: SyntaxToken<'a>,
}
