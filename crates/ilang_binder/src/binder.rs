//! The binder: syntax tree to bound tree.
//!
//! Scopes are passed down as `&mut BoundScope` parameters; a block or loop
//! body binds its children in a child scope that borrows the enclosing one.
//! Problems are reported to the diagnostic collection and binding continues
//! with a substitute node, so a bound tree is always produced.

use crate::bound_tree::{BoundExpression, BoundForStatement, BoundIfStatement, BoundStatement};
use crate::global_scope::BoundGlobalScope;
use crate::operators::{BoundBinaryOperator, BoundUnaryOperator};
use crate::scope::BoundScope;
use crate::symbol::VariableSymbol;
use ilang_ast::node::*;
use ilang_core::value::{TypeSymbol, Value};
use ilang_diagnostics::DiagnosticCollection;
use std::sync::Arc;
use tracing::{debug, trace};

/// The binder walks a syntax tree and produces the bound tree.
#[derive(Debug, Default)]
pub struct Binder {
    diagnostics: DiagnosticCollection,
}

impl Binder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind one compilation unit on top of the globals of every previous
    /// submission.
    pub fn bind_global_scope(
        previous: Option<Arc<BoundGlobalScope>>,
        syntax: &CompilationUnitSyntax<'_>,
    ) -> BoundGlobalScope {
        let chain: Vec<&BoundGlobalScope> = match previous.as_deref() {
            Some(previous) => previous.chain().collect(),
            None => Vec::new(),
        };

        let mut binder = Binder::new();
        let (statement, variables) = with_previous_scopes(&chain, None, &mut |parent| {
            let mut scope = BoundScope::new(parent);
            let statement = binder.bind_statement(&mut scope, syntax.statement);
            (statement, scope.declared_variables())
        });

        debug!(
            previous = chain.len(),
            variables = variables.len(),
            diagnostics = binder.diagnostics.len(),
            "bound global scope"
        );
        BoundGlobalScope::new(
            previous,
            binder.diagnostics.into_diagnostics(),
            variables,
            statement,
        )
    }

    // ========================================================================
    // Statements
    // ========================================================================

    pub fn bind_statement(
        &mut self,
        scope: &mut BoundScope<'_>,
        syntax: &StatementSyntax<'_>,
    ) -> Arc<BoundStatement> {
        match syntax {
            StatementSyntax::Block(n) => self.bind_block_statement(scope, n),
            StatementSyntax::VariableDeclaration(n) => self.bind_variable_declaration(scope, n),
            StatementSyntax::If(n) => self.bind_if_statement(scope, n),
            StatementSyntax::While(n) => self.bind_while_statement(scope, n),
            StatementSyntax::For(n) => self.bind_for_statement(scope, n),
            StatementSyntax::Expression(n) => {
                let expression = self.bind_expression(scope, n.expression);
                BoundStatement::expression(expression)
            }
        }
    }

    fn bind_block_statement(
        &mut self,
        scope: &mut BoundScope<'_>,
        syntax: &BlockStatementSyntax<'_>,
    ) -> Arc<BoundStatement> {
        let mut block_scope = BoundScope::new(Some(&*scope));
        let statements = syntax
            .statements
            .iter()
            .map(|statement| self.bind_statement(&mut block_scope, statement))
            .collect();
        BoundStatement::block(statements)
    }

    fn bind_variable_declaration(
        &mut self,
        scope: &mut BoundScope<'_>,
        syntax: &VariableDeclarationSyntax<'_>,
    ) -> Arc<BoundStatement> {
        let name = syntax.identifier.text;
        let initializer = self.bind_expression(scope, syntax.initializer);
        let variable = VariableSymbol::new(name, syntax.is_read_only(), initializer.ty());

        if !scope.try_declare(variable.clone()) {
            self.diagnostics
                .report_variable_already_declared(syntax.identifier.span, name);
        }
        trace!(name, ty = %variable.ty(), "declared variable");
        BoundStatement::variable_declaration(variable, initializer)
    }

    fn bind_if_statement(
        &mut self,
        scope: &mut BoundScope<'_>,
        syntax: &IfStatementSyntax<'_>,
    ) -> Arc<BoundStatement> {
        let condition = self.bind_expression_of_type(scope, syntax.condition, TypeSymbol::Boolean);
        let then_statement = self.bind_statement(scope, syntax.then_statement);
        let else_statement = syntax
            .else_clause
            .as_ref()
            .map(|else_clause| self.bind_statement(scope, else_clause.else_statement));
        Arc::new(BoundStatement::If(BoundIfStatement {
            condition,
            then_statement,
            else_statement,
        }))
    }

    fn bind_while_statement(
        &mut self,
        scope: &mut BoundScope<'_>,
        syntax: &WhileStatementSyntax<'_>,
    ) -> Arc<BoundStatement> {
        let condition = self.bind_expression_of_type(scope, syntax.condition, TypeSymbol::Boolean);
        let body = self.bind_statement(scope, syntax.body);
        BoundStatement::while_loop(condition, body)
    }

    fn bind_for_statement(
        &mut self,
        scope: &mut BoundScope<'_>,
        syntax: &ForStatementSyntax<'_>,
    ) -> Arc<BoundStatement> {
        let lower_bound = self.bind_expression_of_type(scope, syntax.lower_bound, TypeSymbol::Int32);
        let upper_bound = self.bind_expression_of_type(scope, syntax.upper_bound, TypeSymbol::Int32);

        let mut body_scope = BoundScope::new(Some(&*scope));
        let variable = VariableSymbol::new(syntax.identifier.text, true, TypeSymbol::Int32);
        body_scope.try_declare(variable.clone());
        let body = self.bind_statement(&mut body_scope, syntax.body);

        Arc::new(BoundStatement::For(BoundForStatement {
            variable,
            lower_bound,
            upper_bound,
            body,
        }))
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    /// Bind `syntax` and report if its type is not `target_type`. The bound
    /// expression is returned either way.
    fn bind_expression_of_type(
        &mut self,
        scope: &mut BoundScope<'_>,
        syntax: &ExpressionSyntax<'_>,
        target_type: TypeSymbol,
    ) -> Arc<BoundExpression> {
        let result = self.bind_expression(scope, syntax);
        if result.ty() != target_type {
            self.diagnostics
                .report_cannot_convert(syntax.span(), result.ty(), target_type);
        }
        result
    }

    pub fn bind_expression(
        &mut self,
        scope: &mut BoundScope<'_>,
        syntax: &ExpressionSyntax<'_>,
    ) -> Arc<BoundExpression> {
        match syntax {
            ExpressionSyntax::Parenthesized(n) => self.bind_expression(scope, n.expression),
            ExpressionSyntax::Literal(n) => BoundExpression::literal(n.value),
            ExpressionSyntax::Name(n) => self.bind_name_expression(scope, n),
            ExpressionSyntax::Assignment(n) => self.bind_assignment_expression(scope, n),
            ExpressionSyntax::Unary(n) => self.bind_unary_expression(scope, n),
            ExpressionSyntax::Binary(n) => self.bind_binary_expression(scope, n),
        }
    }

    fn bind_name_expression(
        &mut self,
        scope: &mut BoundScope<'_>,
        syntax: &NameExpressionSyntax<'_>,
    ) -> Arc<BoundExpression> {
        let name = syntax.identifier_token.text;

        // The parser already reported a missing identifier.
        if syntax.identifier_token.is_missing() {
            return BoundExpression::literal(Value::Int32(0));
        }

        match scope.try_lookup(name) {
            Some(variable) => BoundExpression::variable(variable),
            None => {
                self.diagnostics
                    .report_undefined_name(syntax.identifier_token.span, name);
                BoundExpression::literal(Value::Int32(0))
            }
        }
    }

    fn bind_assignment_expression(
        &mut self,
        scope: &mut BoundScope<'_>,
        syntax: &AssignmentExpressionSyntax<'_>,
    ) -> Arc<BoundExpression> {
        let name = syntax.identifier_token.text;
        let bound_expression = self.bind_expression(scope, syntax.expression);

        let Some(variable) = scope.try_lookup(name) else {
            self.diagnostics
                .report_undefined_name(syntax.identifier_token.span, name);
            return bound_expression;
        };

        if variable.is_read_only() {
            self.diagnostics
                .report_cannot_assign(syntax.equals_token.span, name);
        }

        if bound_expression.ty() != variable.ty() {
            self.diagnostics.report_cannot_convert(
                syntax.expression.span(),
                variable.ty(),
                bound_expression.ty(),
            );
            return bound_expression;
        }

        BoundExpression::assignment(variable, bound_expression)
    }

    fn bind_unary_expression(
        &mut self,
        scope: &mut BoundScope<'_>,
        syntax: &UnaryExpressionSyntax<'_>,
    ) -> Arc<BoundExpression> {
        let bound_operand = self.bind_expression(scope, syntax.operand);
        let operator_token = &syntax.operator_token;

        match BoundUnaryOperator::bind(operator_token.kind, bound_operand.ty()) {
            Some(op) => BoundExpression::unary(op, bound_operand),
            None => {
                self.diagnostics.report_undefined_unary_operator(
                    operator_token.span,
                    operator_token.text,
                    bound_operand.ty(),
                );
                bound_operand
            }
        }
    }

    fn bind_binary_expression(
        &mut self,
        scope: &mut BoundScope<'_>,
        syntax: &BinaryExpressionSyntax<'_>,
    ) -> Arc<BoundExpression> {
        let bound_left = self.bind_expression(scope, syntax.left);
        let bound_right = self.bind_expression(scope, syntax.right);
        let operator_token = &syntax.operator_token;

        match BoundBinaryOperator::bind(operator_token.kind, bound_left.ty(), bound_right.ty()) {
            Some(op) => BoundExpression::binary(bound_left, op, bound_right),
            None => {
                self.diagnostics.report_undefined_binary_operator(
                    operator_token.span,
                    operator_token.text,
                    bound_left.ty(),
                    bound_right.ty(),
                );
                bound_left
            }
        }
    }
}

/// Build one scope per previous submission, oldest outermost, and call `f`
/// with the innermost one. `chain` is ordered newest first.
fn with_previous_scopes<R>(
    chain: &[&BoundGlobalScope],
    parent: Option<&BoundScope<'_>>,
    f: &mut dyn FnMut(Option<&BoundScope<'_>>) -> R,
) -> R {
    let Some((oldest, newer)) = chain.split_last() else {
        return f(parent);
    };
    let mut scope = BoundScope::new(parent);
    for variable in oldest.variables() {
        scope.try_declare(variable.clone());
    }
    with_previous_scopes(newer, Some(&scope), f)
}
