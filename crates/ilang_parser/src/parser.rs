//! The ILang parser implementation.
//!
//! A recursive descent parser over the scanner's token list. Unknown tokens
//! have already been reported by the scanner and are dropped before parsing.

use bumpalo::Bump;
use ilang_ast::node::*;
use ilang_ast::syntax_kind::SyntaxKind;
use ilang_core::value::Value;
use ilang_diagnostics::DiagnosticCollection;
use ilang_scanner::{tokenize, TokenInfo};

use crate::precedence::{
    get_binary_operator_precedence, get_unary_operator_precedence, OperatorPrecedence,
};

/// The parser produces a `CompilationUnitSyntax` from ILang source text.
pub struct Parser<'a> {
    arena: &'a Bump,
    tokens: Vec<SyntaxToken<'a>>,
    position: usize,
    diagnostics: DiagnosticCollection,
}

impl<'a> Parser<'a> {
    pub fn new(arena: &'a Bump, source_text: &str) -> Self {
        let (infos, diagnostics) = tokenize(source_text);
        let tokens = infos
            .into_iter()
            .filter(|t| t.kind != SyntaxKind::Unknown)
            .map(|t| Self::intern_token(arena, t))
            .collect();
        Self {
            arena,
            tokens,
            position: 0,
            diagnostics,
        }
    }

    fn intern_token(arena: &'a Bump, info: TokenInfo) -> SyntaxToken<'a> {
        let text: &'a str = arena.alloc_str(&info.text);
        SyntaxToken::new(info.kind, info.span(), text, info.value)
    }

    /// Parse a single statement followed by end of file.
    pub fn parse_compilation_unit(&mut self) -> &'a CompilationUnitSyntax<'a> {
        let statement = self.parse_statement();
        let end_of_file_token = self.expect_token(SyntaxKind::EndOfFileToken);
        self.arena.alloc(CompilationUnitSyntax {
            statement: self.arena.alloc(statement),
            end_of_file_token,
        })
    }

    /// Lexical and syntactic diagnostics, in the order they were reported.
    pub fn take_diagnostics(self) -> DiagnosticCollection {
        self.diagnostics
    }

    // ========================================================================
    // Token management
    // ========================================================================

    fn peek(&self, offset: usize) -> SyntaxToken<'a> {
        let index = self.position + offset;
        match self.tokens.get(index) {
            Some(token) => *token,
            // The token list always ends with the end of file token.
            None => self.tokens[self.tokens.len() - 1],
        }
    }

    #[inline]
    fn current(&self) -> SyntaxToken<'a> {
        self.peek(0)
    }

    #[inline]
    fn current_token(&self) -> SyntaxKind {
        self.current().kind
    }

    fn next_token(&mut self) -> SyntaxToken<'a> {
        let current = self.current();
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        current
    }

    fn expect_token(&mut self, kind: SyntaxKind) -> SyntaxToken<'a> {
        let current = self.current();
        if current.kind == kind {
            return self.next_token();
        }
        self.diagnostics
            .report_unexpected_token(current.span, current.kind, kind);
        SyntaxToken::missing(kind, current.span.start)
    }

    fn alloc_expression(&self, expression: ExpressionSyntax<'a>) -> &'a ExpressionSyntax<'a> {
        self.arena.alloc(expression)
    }

    fn alloc_statement(&self, statement: StatementSyntax<'a>) -> &'a StatementSyntax<'a> {
        self.arena.alloc(statement)
    }

    // ========================================================================
    // Statement parsing
    // ========================================================================

    fn parse_statement(&mut self) -> StatementSyntax<'a> {
        match self.current_token() {
            SyntaxKind::OpenBraceToken => self.parse_block_statement(),
            SyntaxKind::LetKeyword | SyntaxKind::VarKeyword => self.parse_variable_declaration(),
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_block_statement(&mut self) -> StatementSyntax<'a> {
        let open_brace_token = self.expect_token(SyntaxKind::OpenBraceToken);
        let mut statements = Vec::new();
        while self.current_token() != SyntaxKind::EndOfFileToken
            && self.current_token() != SyntaxKind::CloseBraceToken
        {
            let saved_pos = self.position;
            let statement = self.parse_statement();
            statements.push(statement);

            // A statement that consumed nothing was reported already; skip the
            // offending token so the loop makes progress.
            if self.position == saved_pos {
                self.next_token();
            }
        }
        let close_brace_token = self.expect_token(SyntaxKind::CloseBraceToken);
        StatementSyntax::Block(BlockStatementSyntax {
            open_brace_token,
            statements: self.arena.alloc_slice_copy(&statements),
            close_brace_token,
        })
    }

    fn parse_variable_declaration(&mut self) -> StatementSyntax<'a> {
        let expected = if self.current_token() == SyntaxKind::LetKeyword {
            SyntaxKind::LetKeyword
        } else {
            SyntaxKind::VarKeyword
        };
        let keyword = self.expect_token(expected);
        let identifier = self.expect_token(SyntaxKind::Identifier);
        let equals_token = self.expect_token(SyntaxKind::EqualsToken);
        let initializer = self.parse_expression();
        StatementSyntax::VariableDeclaration(VariableDeclarationSyntax {
            keyword,
            identifier,
            equals_token,
            initializer,
        })
    }

    fn parse_if_statement(&mut self) -> StatementSyntax<'a> {
        let if_keyword = self.expect_token(SyntaxKind::IfKeyword);
        let condition = self.parse_expression();
        let then_statement = self.parse_statement();
        let then_statement = self.alloc_statement(then_statement);
        let else_clause = self.parse_else_clause();
        StatementSyntax::If(IfStatementSyntax {
            if_keyword,
            condition,
            then_statement,
            else_clause,
        })
    }

    fn parse_else_clause(&mut self) -> Option<ElseClauseSyntax<'a>> {
        if self.current_token() != SyntaxKind::ElseKeyword {
            return None;
        }
        let else_keyword = self.next_token();
        let else_statement = self.parse_statement();
        Some(ElseClauseSyntax {
            else_keyword,
            else_statement: self.alloc_statement(else_statement),
        })
    }

    fn parse_while_statement(&mut self) -> StatementSyntax<'a> {
        let while_keyword = self.expect_token(SyntaxKind::WhileKeyword);
        let condition = self.parse_expression();
        let body = self.parse_statement();
        StatementSyntax::While(WhileStatementSyntax {
            while_keyword,
            condition,
            body: self.alloc_statement(body),
        })
    }

    fn parse_for_statement(&mut self) -> StatementSyntax<'a> {
        let for_keyword = self.expect_token(SyntaxKind::ForKeyword);
        let identifier = self.expect_token(SyntaxKind::Identifier);
        let equals_token = self.expect_token(SyntaxKind::EqualsToken);
        let lower_bound = self.parse_expression();
        let to_keyword = self.expect_token(SyntaxKind::ToKeyword);
        let upper_bound = self.parse_expression();
        let body = self.parse_statement();
        StatementSyntax::For(ForStatementSyntax {
            for_keyword,
            identifier,
            equals_token,
            lower_bound,
            to_keyword,
            upper_bound,
            body: self.alloc_statement(body),
        })
    }

    fn parse_expression_statement(&mut self) -> StatementSyntax<'a> {
        let expression = self.parse_expression();
        StatementSyntax::Expression(ExpressionStatementSyntax { expression })
    }

    // ========================================================================
    // Expression parsing
    // ========================================================================

    fn parse_expression(&mut self) -> &'a ExpressionSyntax<'a> {
        self.parse_assignment_expression()
    }

    fn parse_assignment_expression(&mut self) -> &'a ExpressionSyntax<'a> {
        if self.peek(0).kind == SyntaxKind::Identifier && self.peek(1).kind == SyntaxKind::EqualsToken
        {
            let identifier_token = self.next_token();
            let equals_token = self.next_token();
            let expression = self.parse_assignment_expression();
            return self.alloc_expression(ExpressionSyntax::Assignment(AssignmentExpressionSyntax {
                identifier_token,
                equals_token,
                expression,
            }));
        }
        self.parse_binary_expression(OperatorPrecedence::None)
    }

    fn parse_binary_expression(
        &mut self,
        parent_precedence: OperatorPrecedence,
    ) -> &'a ExpressionSyntax<'a> {
        let unary_precedence = get_unary_operator_precedence(self.current_token());
        let mut left = if unary_precedence != OperatorPrecedence::None
            && unary_precedence >= parent_precedence
        {
            let operator_token = self.next_token();
            let operand = self.parse_binary_expression(unary_precedence);
            self.alloc_expression(ExpressionSyntax::Unary(UnaryExpressionSyntax {
                operator_token,
                operand,
            }))
        } else {
            self.parse_primary_expression()
        };

        loop {
            let precedence = get_binary_operator_precedence(self.current_token());
            if precedence == OperatorPrecedence::None || precedence <= parent_precedence {
                break;
            }
            let operator_token = self.next_token();
            let right = self.parse_binary_expression(precedence);
            left = self.alloc_expression(ExpressionSyntax::Binary(BinaryExpressionSyntax {
                left,
                operator_token,
                right,
            }));
        }
        left
    }

    fn parse_primary_expression(&mut self) -> &'a ExpressionSyntax<'a> {
        match self.current_token() {
            SyntaxKind::OpenParenToken => self.parse_parenthesized_expression(),
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => self.parse_boolean_literal(),
            SyntaxKind::NumericLiteral => self.parse_numeric_literal(),
            _ => self.parse_name_expression(),
        }
    }

    fn parse_parenthesized_expression(&mut self) -> &'a ExpressionSyntax<'a> {
        let open_paren_token = self.expect_token(SyntaxKind::OpenParenToken);
        let expression = self.parse_expression();
        let close_paren_token = self.expect_token(SyntaxKind::CloseParenToken);
        self.alloc_expression(ExpressionSyntax::Parenthesized(ParenthesizedExpressionSyntax {
            open_paren_token,
            expression,
            close_paren_token,
        }))
    }

    fn parse_boolean_literal(&mut self) -> &'a ExpressionSyntax<'a> {
        let is_true = self.current_token() == SyntaxKind::TrueKeyword;
        let expected = if is_true {
            SyntaxKind::TrueKeyword
        } else {
            SyntaxKind::FalseKeyword
        };
        let mut literal_token = self.expect_token(expected);
        literal_token.value = Some(Value::Boolean(is_true));
        self.alloc_expression(ExpressionSyntax::Literal(LiteralExpressionSyntax {
            literal_token,
            value: Value::Boolean(is_true),
        }))
    }

    fn parse_numeric_literal(&mut self) -> &'a ExpressionSyntax<'a> {
        let literal_token = self.expect_token(SyntaxKind::NumericLiteral);
        let value = literal_token.value.unwrap_or(Value::Int32(0));
        self.alloc_expression(ExpressionSyntax::Literal(LiteralExpressionSyntax {
            literal_token,
            value,
        }))
    }

    fn parse_name_expression(&mut self) -> &'a ExpressionSyntax<'a> {
        let identifier_token = self.expect_token(SyntaxKind::Identifier);
        self.alloc_expression(ExpressionSyntax::Name(NameExpressionSyntax { identifier_token }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ilang_core::text::TextSpan;

    #[test]
    fn test_missing_token_is_zero_width_at_current() {
        let arena = Bump::new();
        let mut parser = Parser::new(&arena, "(1");
        let unit = parser.parse_compilation_unit();
        let StatementSyntax::Expression(statement) = unit.statement else {
            panic!("expected expression statement");
        };
        let ExpressionSyntax::Parenthesized(parenthesized) = statement.expression else {
            panic!("expected parenthesized expression");
        };
        assert!(parenthesized.close_paren_token.is_missing());
        assert_eq!(parenthesized.close_paren_token.span, TextSpan::empty(2));

        let diagnostics = parser.take_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics.diagnostics()[0].message_text,
            "Error: Unexpected token <EndOfFileToken>, expected <CloseParenToken>"
        );
    }
}
