//! Generic traversal over the syntax tree.
//!
//! `SyntaxNode` is a borrowed view over any node or token, and
//! `children` lists its direct children in source order, tokens included.
//! The tree printer and the parser tests walk trees through it.

use crate::node::*;
use crate::syntax_kind::SyntaxKind;
use ilang_core::text::TextSpan;

/// A reference to any element of a syntax tree.
#[derive(Debug, Clone, Copy)]
pub enum SyntaxNode<'r, 'a> {
    CompilationUnit(&'r CompilationUnitSyntax<'a>),
    Statement(&'r StatementSyntax<'a>),
    ElseClause(&'r ElseClauseSyntax<'a>),
    Expression(&'r ExpressionSyntax<'a>),
    Token(&'r SyntaxToken<'a>),
}

impl<'r, 'a> SyntaxNode<'r, 'a> {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            SyntaxNode::CompilationUnit(_) => SyntaxKind::CompilationUnit,
            SyntaxNode::Statement(n) => n.kind(),
            SyntaxNode::ElseClause(_) => SyntaxKind::ElseClause,
            SyntaxNode::Expression(n) => n.kind(),
            SyntaxNode::Token(t) => t.kind,
        }
    }

    pub fn span(&self) -> TextSpan {
        match self {
            SyntaxNode::CompilationUnit(n) => n.span(),
            SyntaxNode::Statement(n) => n.span(),
            SyntaxNode::ElseClause(n) => n.span(),
            SyntaxNode::Expression(n) => n.span(),
            SyntaxNode::Token(t) => t.span,
        }
    }

    pub fn as_token(&self) -> Option<&'r SyntaxToken<'a>> {
        match self {
            SyntaxNode::Token(t) => Some(t),
            _ => None,
        }
    }

    /// The direct children of this element in source order.
    pub fn children(&self) -> Vec<SyntaxNode<'r, 'a>> {
        let mut out = Vec::new();
        for_each_child(*self, |child| out.push(child));
        out
    }

    /// This element and all of its descendants, depth-first pre-order.
    pub fn descendants(&self) -> Vec<SyntaxNode<'r, 'a>> {
        let mut out = Vec::new();
        let mut stack = vec![*self];
        while let Some(node) = stack.pop() {
            out.push(node);
            let children = node.children();
            stack.extend(children.into_iter().rev());
        }
        out
    }
}

/// Call `f` for each direct child of `node`, in source order.
pub fn for_each_child<'r, 'a>(node: SyntaxNode<'r, 'a>, mut f: impl FnMut(SyntaxNode<'r, 'a>)) {
    use SyntaxNode as N;
    match node {
        N::CompilationUnit(n) => {
            f(N::Statement(n.statement));
            f(N::Token(&n.end_of_file_token));
        }
        N::Statement(stmt) => match stmt {
            StatementSyntax::Block(n) => {
                f(N::Token(&n.open_brace_token));
                for s in n.statements.iter() {
                    f(N::Statement(s));
                }
                f(N::Token(&n.close_brace_token));
            }
            StatementSyntax::VariableDeclaration(n) => {
                f(N::Token(&n.keyword));
                f(N::Token(&n.identifier));
                f(N::Token(&n.equals_token));
                f(N::Expression(n.initializer));
            }
            StatementSyntax::If(n) => {
                f(N::Token(&n.if_keyword));
                f(N::Expression(n.condition));
                f(N::Statement(n.then_statement));
                if let Some(else_clause) = &n.else_clause {
                    f(N::ElseClause(else_clause));
                }
            }
            StatementSyntax::While(n) => {
                f(N::Token(&n.while_keyword));
                f(N::Expression(n.condition));
                f(N::Statement(n.body));
            }
            StatementSyntax::For(n) => {
                f(N::Token(&n.for_keyword));
                f(N::Token(&n.identifier));
                f(N::Token(&n.equals_token));
                f(N::Expression(n.lower_bound));
                f(N::Token(&n.to_keyword));
                f(N::Expression(n.upper_bound));
                f(N::Statement(n.body));
            }
            StatementSyntax::Expression(n) => f(N::Expression(n.expression)),
        },
        N::ElseClause(n) => {
            f(N::Token(&n.else_keyword));
            f(N::Statement(n.else_statement));
        }
        N::Expression(expr) => match expr {
            ExpressionSyntax::Literal(n) => f(N::Token(&n.literal_token)),
            ExpressionSyntax::Name(n) => f(N::Token(&n.identifier_token)),
            ExpressionSyntax::Assignment(n) => {
                f(N::Token(&n.identifier_token));
                f(N::Token(&n.equals_token));
                f(N::Expression(n.expression));
            }
            ExpressionSyntax::Unary(n) => {
                f(N::Token(&n.operator_token));
                f(N::Expression(n.operand));
            }
            ExpressionSyntax::Binary(n) => {
                f(N::Expression(n.left));
                f(N::Token(&n.operator_token));
                f(N::Expression(n.right));
            }
            ExpressionSyntax::Parenthesized(n) => {
                f(N::Token(&n.open_paren_token));
                f(N::Expression(n.expression));
                f(N::Token(&n.close_paren_token));
            }
        },
        N::Token(_) => {}
    }
}
