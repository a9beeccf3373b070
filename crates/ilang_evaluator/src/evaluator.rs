//! The label-indexed evaluator.

use ilang_binder::bound_tree::*;
use ilang_binder::{BoundBinaryOperatorKind, BoundUnaryOperatorKind, LabelSymbol, VariableSymbol};
use ilang_core::value::{TypeSymbol, Value};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// The variable store, in declaration order. Survives across evaluations so
/// later submissions see earlier values.
pub type Variables = IndexMap<VariableSymbol, Value>;

/// Executes a lowered program.
///
/// The program must be flat: a block of statements with no nested blocks
/// and no `if`, `while` or `for`. Anything else is a bug in the caller and
/// panics.
pub struct Evaluator<'v> {
    root: Arc<BoundStatement>,
    variables: &'v mut Variables,
    last_value: Option<Value>,
}

impl<'v> Evaluator<'v> {
    pub fn new(root: Arc<BoundStatement>, variables: &'v mut Variables) -> Self {
        Self {
            root,
            variables,
            last_value: None,
        }
    }

    /// Run the program and return the value of the last declaration or
    /// expression statement executed, if any.
    pub fn evaluate(&mut self) -> Option<Value> {
        let root = self.root.clone();
        let statements: &[Arc<BoundStatement>] = match root.as_ref() {
            BoundStatement::Block(block) => &block.statements,
            _ => std::slice::from_ref(&root),
        };

        // A jump lands on the statement after its label.
        let label_to_index: FxHashMap<&LabelSymbol, usize> = statements
            .iter()
            .enumerate()
            .filter_map(|(i, statement)| match statement.as_ref() {
                BoundStatement::Label(n) => Some((&n.label, i + 1)),
                _ => None,
            })
            .collect();
        debug!(
            statements = statements.len(),
            labels = label_to_index.len(),
            "evaluating program"
        );

        let target = |label: &LabelSymbol| -> usize {
            match label_to_index.get(label) {
                Some(&index) => index,
                None => panic!("jump to undefined label {label}"),
            }
        };

        let mut index = 0;
        while index < statements.len() {
            let statement = &statements[index];
            match statement.as_ref() {
                BoundStatement::VariableDeclaration(n) => {
                    let value = self.evaluate_expression(&n.initializer);
                    self.variables.insert(n.variable.clone(), value);
                    self.last_value = Some(value);
                    index += 1;
                }
                BoundStatement::Expression(n) => {
                    self.last_value = Some(self.evaluate_expression(&n.expression));
                    index += 1;
                }
                BoundStatement::Goto(n) => {
                    index = target(&n.label);
                }
                BoundStatement::ConditionalGoto(n) => {
                    let condition = expect_boolean(self.evaluate_expression(&n.condition));
                    if condition == n.jump_if_true {
                        trace!(label = %n.label, "jump taken");
                        index = target(&n.label);
                    } else {
                        index += 1;
                    }
                }
                BoundStatement::Label(_) => {
                    index += 1;
                }
                BoundStatement::Block(_)
                | BoundStatement::If(_)
                | BoundStatement::While(_)
                | BoundStatement::For(_) => {
                    panic!("unexpected {} in a lowered program", statement.kind())
                }
            }
        }

        self.last_value
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn evaluate_expression(&mut self, node: &BoundExpression) -> Value {
        match node {
            BoundExpression::Literal(n) => n.value,
            BoundExpression::Variable(n) => self
                .variables
                .get(&n.variable)
                .copied()
                .unwrap_or(Value::Int32(0)),
            BoundExpression::Assignment(n) => {
                let value = self.evaluate_expression(&n.expression);
                self.variables.insert(n.variable.clone(), value);
                value
            }
            BoundExpression::Unary(n) => self.evaluate_unary_expression(n),
            BoundExpression::Binary(n) => self.evaluate_binary_expression(n),
        }
    }

    fn evaluate_unary_expression(&mut self, node: &BoundUnaryExpression) -> Value {
        let operand = self.evaluate_expression(&node.operand);
        match node.op.kind {
            BoundUnaryOperatorKind::Identity => Value::Int32(expect_int32(operand)),
            BoundUnaryOperatorKind::Negation => Value::Int32(expect_int32(operand).wrapping_neg()),
            BoundUnaryOperatorKind::OnesComplement => Value::Int32(!expect_int32(operand)),
            BoundUnaryOperatorKind::LogicalNegation => Value::Boolean(!expect_boolean(operand)),
        }
    }

    fn evaluate_binary_expression(&mut self, node: &BoundBinaryExpression) -> Value {
        let left = self.evaluate_expression(&node.left);
        let right = self.evaluate_expression(&node.right);

        use BoundBinaryOperatorKind as K;
        match node.op.kind {
            K::Addition => Value::Int32(expect_int32(left).wrapping_add(expect_int32(right))),
            K::Subtraction => Value::Int32(expect_int32(left).wrapping_sub(expect_int32(right))),
            K::Multiplication => Value::Int32(expect_int32(left).wrapping_mul(expect_int32(right))),
            K::Division => {
                let divisor = expect_int32(right);
                if divisor == 0 {
                    Value::Int32(0)
                } else {
                    Value::Int32(expect_int32(left).wrapping_div(divisor))
                }
            }
            K::BitwiseAnd | K::BitwiseOr | K::BitwiseXor => match node.op.result_type {
                TypeSymbol::Int32 => {
                    let (l, r) = (expect_int32(left), expect_int32(right));
                    Value::Int32(match node.op.kind {
                        K::BitwiseAnd => l & r,
                        K::BitwiseOr => l | r,
                        _ => l ^ r,
                    })
                }
                TypeSymbol::Boolean => {
                    let (l, r) = (expect_boolean(left), expect_boolean(right));
                    Value::Boolean(match node.op.kind {
                        K::BitwiseAnd => l & r,
                        K::BitwiseOr => l | r,
                        _ => l ^ r,
                    })
                }
            },
            K::LogicalAnd => Value::Boolean(expect_boolean(left) && expect_boolean(right)),
            K::LogicalOr => Value::Boolean(expect_boolean(left) || expect_boolean(right)),
            K::Equals => Value::Boolean(left == right),
            K::NotEquals => Value::Boolean(left != right),
            K::Less => Value::Boolean(expect_int32(left) < expect_int32(right)),
            K::LessOrEquals => Value::Boolean(expect_int32(left) <= expect_int32(right)),
            K::Greater => Value::Boolean(expect_int32(left) > expect_int32(right)),
            K::GreaterOrEquals => Value::Boolean(expect_int32(left) >= expect_int32(right)),
        }
    }
}

fn expect_int32(value: Value) -> i32 {
    match value {
        Value::Int32(v) => v,
        Value::Boolean(_) => panic!("expected an Int32 operand, found {value}"),
    }
}

fn expect_boolean(value: Value) -> bool {
    match value {
        Value::Boolean(v) => v,
        Value::Int32(_) => panic!("expected a Boolean operand, found {value}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_variable(name: &str) -> VariableSymbol {
        VariableSymbol::new(name, false, TypeSymbol::Int32)
    }

    #[test]
    fn test_empty_program_has_no_value() {
        let mut variables = Variables::new();
        let program = BoundStatement::block(Vec::new());
        assert_eq!(Evaluator::new(program, &mut variables).evaluate(), None);
    }

    #[test]
    fn test_missing_variable_reads_zero() {
        let mut variables = Variables::new();
        let program = BoundStatement::expression(BoundExpression::variable(int_variable("ghost")));
        assert_eq!(
            Evaluator::new(program, &mut variables).evaluate(),
            Some(Value::Int32(0))
        );
    }

    #[test]
    fn test_goto_skips_statements() {
        let mut variables = Variables::new();
        let skip = LabelSymbol::new("Label1");
        let program = BoundStatement::block(vec![
            BoundStatement::expression(BoundExpression::literal(1)),
            BoundStatement::goto(skip.clone()),
            BoundStatement::expression(BoundExpression::literal(2)),
            BoundStatement::label(skip),
        ]);
        assert_eq!(
            Evaluator::new(program, &mut variables).evaluate(),
            Some(Value::Int32(1))
        );
    }

    #[test]
    #[should_panic(expected = "undefined label")]
    fn test_unresolved_label_panics() {
        let mut variables = Variables::new();
        let program = BoundStatement::block(vec![BoundStatement::goto(LabelSymbol::new("Nowhere"))]);
        Evaluator::new(program, &mut variables).evaluate();
    }

    #[test]
    #[should_panic(expected = "lowered program")]
    fn test_structured_statement_panics() {
        let mut variables = Variables::new();
        let program = BoundStatement::block(vec![BoundStatement::while_loop(
            BoundExpression::literal(false),
            BoundStatement::block(Vec::new()),
        )]);
        Evaluator::new(program, &mut variables).evaluate();
    }
}
