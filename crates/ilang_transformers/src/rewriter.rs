//! Structural rewriting of the bound tree.
//!
//! Every method defaults to rewriting the node's children and rebuilding the
//! node only if one of them changed. When nothing changed the original `Arc`
//! comes back, so untouched subtrees keep their identity.

use ilang_binder::bound_tree::*;
use std::sync::Arc;

/// A transformation over bound statements and expressions.
///
/// Implementors override the methods for the node kinds they care about and
/// inherit the identity rewrite for the rest.
pub trait BoundTreeRewriter {
    fn rewrite_statement(&mut self, node: &Arc<BoundStatement>) -> Arc<BoundStatement> {
        match node.as_ref() {
            BoundStatement::Block(n) => self.rewrite_block_statement(node, n),
            BoundStatement::VariableDeclaration(n) => self.rewrite_variable_declaration(node, n),
            BoundStatement::If(n) => self.rewrite_if_statement(node, n),
            BoundStatement::While(n) => self.rewrite_while_statement(node, n),
            BoundStatement::For(n) => self.rewrite_for_statement(node, n),
            BoundStatement::Label(n) => self.rewrite_label_statement(node, n),
            BoundStatement::Goto(n) => self.rewrite_goto_statement(node, n),
            BoundStatement::ConditionalGoto(n) => self.rewrite_conditional_goto_statement(node, n),
            BoundStatement::Expression(n) => self.rewrite_expression_statement(node, n),
        }
    }

    fn rewrite_block_statement(
        &mut self,
        node: &Arc<BoundStatement>,
        block: &BoundBlockStatement,
    ) -> Arc<BoundStatement> {
        // Allocate a new list only once the first child changes.
        let mut builder: Option<Vec<Arc<BoundStatement>>> = None;
        for (i, old_statement) in block.statements.iter().enumerate() {
            let new_statement = self.rewrite_statement(old_statement);
            if builder.is_none() && !Arc::ptr_eq(&new_statement, old_statement) {
                let mut statements = Vec::with_capacity(block.statements.len());
                statements.extend(block.statements[..i].iter().cloned());
                builder = Some(statements);
            }
            if let Some(statements) = builder.as_mut() {
                statements.push(new_statement);
            }
        }
        match builder {
            Some(statements) => BoundStatement::block(statements),
            None => node.clone(),
        }
    }

    fn rewrite_variable_declaration(
        &mut self,
        node: &Arc<BoundStatement>,
        declaration: &BoundVariableDeclaration,
    ) -> Arc<BoundStatement> {
        let initializer = self.rewrite_expression(&declaration.initializer);
        if Arc::ptr_eq(&initializer, &declaration.initializer) {
            return node.clone();
        }
        BoundStatement::variable_declaration(declaration.variable.clone(), initializer)
    }

    fn rewrite_if_statement(
        &mut self,
        node: &Arc<BoundStatement>,
        statement: &BoundIfStatement,
    ) -> Arc<BoundStatement> {
        let condition = self.rewrite_expression(&statement.condition);
        let then_statement = self.rewrite_statement(&statement.then_statement);
        let else_statement = statement
            .else_statement
            .as_ref()
            .map(|else_statement| self.rewrite_statement(else_statement));

        let else_unchanged = match (&else_statement, &statement.else_statement) {
            (Some(new), Some(old)) => Arc::ptr_eq(new, old),
            (None, None) => true,
            _ => false,
        };
        if Arc::ptr_eq(&condition, &statement.condition)
            && Arc::ptr_eq(&then_statement, &statement.then_statement)
            && else_unchanged
        {
            return node.clone();
        }
        Arc::new(BoundStatement::If(BoundIfStatement {
            condition,
            then_statement,
            else_statement,
        }))
    }

    fn rewrite_while_statement(
        &mut self,
        node: &Arc<BoundStatement>,
        statement: &BoundWhileStatement,
    ) -> Arc<BoundStatement> {
        let condition = self.rewrite_expression(&statement.condition);
        let body = self.rewrite_statement(&statement.body);
        if Arc::ptr_eq(&condition, &statement.condition) && Arc::ptr_eq(&body, &statement.body) {
            return node.clone();
        }
        BoundStatement::while_loop(condition, body)
    }

    fn rewrite_for_statement(
        &mut self,
        node: &Arc<BoundStatement>,
        statement: &BoundForStatement,
    ) -> Arc<BoundStatement> {
        let lower_bound = self.rewrite_expression(&statement.lower_bound);
        let upper_bound = self.rewrite_expression(&statement.upper_bound);
        let body = self.rewrite_statement(&statement.body);
        if Arc::ptr_eq(&lower_bound, &statement.lower_bound)
            && Arc::ptr_eq(&upper_bound, &statement.upper_bound)
            && Arc::ptr_eq(&body, &statement.body)
        {
            return node.clone();
        }
        Arc::new(BoundStatement::For(BoundForStatement {
            variable: statement.variable.clone(),
            lower_bound,
            upper_bound,
            body,
        }))
    }

    fn rewrite_label_statement(
        &mut self,
        node: &Arc<BoundStatement>,
        _statement: &BoundLabelStatement,
    ) -> Arc<BoundStatement> {
        node.clone()
    }

    fn rewrite_goto_statement(
        &mut self,
        node: &Arc<BoundStatement>,
        _statement: &BoundGotoStatement,
    ) -> Arc<BoundStatement> {
        node.clone()
    }

    fn rewrite_conditional_goto_statement(
        &mut self,
        node: &Arc<BoundStatement>,
        statement: &BoundConditionalGotoStatement,
    ) -> Arc<BoundStatement> {
        let condition = self.rewrite_expression(&statement.condition);
        if Arc::ptr_eq(&condition, &statement.condition) {
            return node.clone();
        }
        BoundStatement::conditional_goto(statement.label.clone(), condition, statement.jump_if_true)
    }

    fn rewrite_expression_statement(
        &mut self,
        node: &Arc<BoundStatement>,
        statement: &BoundExpressionStatement,
    ) -> Arc<BoundStatement> {
        let expression = self.rewrite_expression(&statement.expression);
        if Arc::ptr_eq(&expression, &statement.expression) {
            return node.clone();
        }
        BoundStatement::expression(expression)
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn rewrite_expression(&mut self, node: &Arc<BoundExpression>) -> Arc<BoundExpression> {
        match node.as_ref() {
            BoundExpression::Literal(n) => self.rewrite_literal_expression(node, n),
            BoundExpression::Variable(n) => self.rewrite_variable_expression(node, n),
            BoundExpression::Assignment(n) => self.rewrite_assignment_expression(node, n),
            BoundExpression::Unary(n) => self.rewrite_unary_expression(node, n),
            BoundExpression::Binary(n) => self.rewrite_binary_expression(node, n),
        }
    }

    fn rewrite_literal_expression(
        &mut self,
        node: &Arc<BoundExpression>,
        _expression: &BoundLiteralExpression,
    ) -> Arc<BoundExpression> {
        node.clone()
    }

    fn rewrite_variable_expression(
        &mut self,
        node: &Arc<BoundExpression>,
        _expression: &BoundVariableExpression,
    ) -> Arc<BoundExpression> {
        node.clone()
    }

    fn rewrite_assignment_expression(
        &mut self,
        node: &Arc<BoundExpression>,
        expression: &BoundAssignmentExpression,
    ) -> Arc<BoundExpression> {
        let value = self.rewrite_expression(&expression.expression);
        if Arc::ptr_eq(&value, &expression.expression) {
            return node.clone();
        }
        BoundExpression::assignment(expression.variable.clone(), value)
    }

    fn rewrite_unary_expression(
        &mut self,
        node: &Arc<BoundExpression>,
        expression: &BoundUnaryExpression,
    ) -> Arc<BoundExpression> {
        let operand = self.rewrite_expression(&expression.operand);
        if Arc::ptr_eq(&operand, &expression.operand) {
            return node.clone();
        }
        BoundExpression::unary(expression.op, operand)
    }

    fn rewrite_binary_expression(
        &mut self,
        node: &Arc<BoundExpression>,
        expression: &BoundBinaryExpression,
    ) -> Arc<BoundExpression> {
        let left = self.rewrite_expression(&expression.left);
        let right = self.rewrite_expression(&expression.right);
        if Arc::ptr_eq(&left, &expression.left) && Arc::ptr_eq(&right, &expression.right) {
            return node.clone();
        }
        BoundExpression::binary(left, expression.op, right)
    }
}
