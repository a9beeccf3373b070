//! Lowering of structured control flow.
//!
//! `if`, `while` and `for` are rewritten into labels, gotos and conditional
//! gotos, then the result is flattened:
//!
//! ```text
//! if <condition> <then>              gotoFalse end <condition>
//!                                    <then>
//!                                    end:
//!
//! if <condition> <then> else <else>  gotoFalse else <condition>
//!                                    <then>
//!                                    goto end
//!                                    else:
//!                                    <else>
//!                                    end:
//!
//! while <condition> <body>           goto check
//!                                    continue:
//!                                    <body>
//!                                    check:
//!                                    gotoTrue continue <condition>
//!                                    end:
//!
//! for <var> = <lower> to <upper>     {
//!     <body>                             var <var> = <lower>
//!                                        while (<var> <= <upper>)
//!                                        {
//!                                            <body>
//!                                            <var> = <var> + 1
//!                                        }
//!                                    }
//! ```
//!
//! Each rewrite is lowered again, so a nested loop or conditional in the
//! replacement is lowered too.

use crate::flatten::flatten;
use crate::rewriter::BoundTreeRewriter;
use ilang_ast::syntax_kind::SyntaxKind;
use ilang_binder::bound_tree::*;
use ilang_binder::{BoundBinaryOperator, LabelSymbol};
use ilang_core::value::TypeSymbol;
use std::sync::Arc;
use tracing::{debug, trace};

/// Rewrites structured control flow into label/goto form.
///
/// Label names (`Label1`, `Label2`, ...) are unique within one `Lowerer`.
#[derive(Debug, Default)]
pub struct Lowerer {
    label_count: u32,
}

impl Lowerer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lower `statement` and flatten it into a single block.
    pub fn lower(statement: &Arc<BoundStatement>) -> Arc<BoundStatement> {
        let mut lowerer = Lowerer::new();
        let result = lowerer.rewrite_statement(statement);
        let flat = flatten(&result);
        debug!(labels = lowerer.label_count, "lowered program");
        flat
    }

    fn generate_label(&mut self) -> LabelSymbol {
        self.label_count += 1;
        let label = LabelSymbol::new(format!("Label{}", self.label_count));
        trace!(%label, "generated label");
        label
    }
}

impl BoundTreeRewriter for Lowerer {
    fn rewrite_if_statement(
        &mut self,
        _node: &Arc<BoundStatement>,
        statement: &BoundIfStatement,
    ) -> Arc<BoundStatement> {
        let result = match &statement.else_statement {
            None => {
                let end_label = self.generate_label();
                BoundStatement::block(vec![
                    BoundStatement::conditional_goto(end_label.clone(), statement.condition.clone(), false),
                    statement.then_statement.clone(),
                    BoundStatement::label(end_label),
                ])
            }
            Some(else_statement) => {
                let else_label = self.generate_label();
                let end_label = self.generate_label();
                BoundStatement::block(vec![
                    BoundStatement::conditional_goto(else_label.clone(), statement.condition.clone(), false),
                    statement.then_statement.clone(),
                    BoundStatement::goto(end_label.clone()),
                    BoundStatement::label(else_label),
                    else_statement.clone(),
                    BoundStatement::label(end_label),
                ])
            }
        };
        self.rewrite_statement(&result)
    }

    fn rewrite_while_statement(
        &mut self,
        _node: &Arc<BoundStatement>,
        statement: &BoundWhileStatement,
    ) -> Arc<BoundStatement> {
        let continue_label = self.generate_label();
        let check_label = self.generate_label();
        let end_label = self.generate_label();

        let result = BoundStatement::block(vec![
            BoundStatement::goto(check_label.clone()),
            BoundStatement::label(continue_label.clone()),
            statement.body.clone(),
            BoundStatement::label(check_label),
            BoundStatement::conditional_goto(continue_label, statement.condition.clone(), true),
            BoundStatement::label(end_label),
        ]);
        self.rewrite_statement(&result)
    }

    fn rewrite_for_statement(
        &mut self,
        _node: &Arc<BoundStatement>,
        statement: &BoundForStatement,
    ) -> Arc<BoundStatement> {
        let Some(less_or_equals) = BoundBinaryOperator::bind(
            SyntaxKind::LessThanEqualsToken,
            TypeSymbol::Int32,
            TypeSymbol::Int32,
        ) else {
            unreachable!("Int32 <= Int32 is in the operator table");
        };
        let Some(addition) =
            BoundBinaryOperator::bind(SyntaxKind::PlusToken, TypeSymbol::Int32, TypeSymbol::Int32)
        else {
            unreachable!("Int32 + Int32 is in the operator table");
        };

        let variable = &statement.variable;
        let declaration =
            BoundStatement::variable_declaration(variable.clone(), statement.lower_bound.clone());
        let condition = BoundExpression::binary(
            BoundExpression::variable(variable.clone()),
            less_or_equals,
            statement.upper_bound.clone(),
        );
        let increment = BoundStatement::expression(BoundExpression::assignment(
            variable.clone(),
            BoundExpression::binary(
                BoundExpression::variable(variable.clone()),
                addition,
                BoundExpression::literal(1),
            ),
        ));
        let while_body = BoundStatement::block(vec![statement.body.clone(), increment]);
        let while_statement = BoundStatement::while_loop(condition, while_body);

        let result = BoundStatement::block(vec![declaration, while_statement]);
        self.rewrite_statement(&result)
    }
}
