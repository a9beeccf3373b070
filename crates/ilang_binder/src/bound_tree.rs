//! The bound tree: the typed, name-resolved program.
//!
//! Nodes are immutable and shared through `Arc`. Transformations build new
//! parents around unchanged children, so an untouched subtree is the same
//! allocation before and after a rewrite.

use crate::operators::{BoundBinaryOperator, BoundUnaryOperator};
use crate::symbol::{LabelSymbol, VariableSymbol};
use ilang_core::value::{TypeSymbol, Value};
use std::fmt;
use std::sync::Arc;

/// The kind of a bound node, used for dumps and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundNodeKind {
    // Statements
    BlockStatement,
    VariableDeclaration,
    IfStatement,
    WhileStatement,
    ForStatement,
    LabelStatement,
    GotoStatement,
    ConditionalGotoStatement,
    ExpressionStatement,

    // Expressions
    LiteralExpression,
    VariableExpression,
    AssignmentExpression,
    UnaryExpression,
    BinaryExpression,
}

impl fmt::Display for BoundNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum BoundStatement {
    Block(BoundBlockStatement),
    VariableDeclaration(BoundVariableDeclaration),
    If(BoundIfStatement),
    While(BoundWhileStatement),
    For(BoundForStatement),
    Label(BoundLabelStatement),
    Goto(BoundGotoStatement),
    ConditionalGoto(BoundConditionalGotoStatement),
    Expression(BoundExpressionStatement),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundBlockStatement {
    pub statements: Vec<Arc<BoundStatement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundVariableDeclaration {
    pub variable: VariableSymbol,
    pub initializer: Arc<BoundExpression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundIfStatement {
    pub condition: Arc<BoundExpression>,
    pub then_statement: Arc<BoundStatement>,
    pub else_statement: Option<Arc<BoundStatement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundWhileStatement {
    pub condition: Arc<BoundExpression>,
    pub body: Arc<BoundStatement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundForStatement {
    pub variable: VariableSymbol,
    pub lower_bound: Arc<BoundExpression>,
    pub upper_bound: Arc<BoundExpression>,
    pub body: Arc<BoundStatement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundLabelStatement {
    pub label: LabelSymbol,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundGotoStatement {
    pub label: LabelSymbol,
}

/// Jump to `label` when `condition` evaluates to `jump_if_true`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundConditionalGotoStatement {
    pub label: LabelSymbol,
    pub condition: Arc<BoundExpression>,
    pub jump_if_true: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundExpressionStatement {
    pub expression: Arc<BoundExpression>,
}

impl BoundStatement {
    pub fn kind(&self) -> BoundNodeKind {
        match self {
            BoundStatement::Block(_) => BoundNodeKind::BlockStatement,
            BoundStatement::VariableDeclaration(_) => BoundNodeKind::VariableDeclaration,
            BoundStatement::If(_) => BoundNodeKind::IfStatement,
            BoundStatement::While(_) => BoundNodeKind::WhileStatement,
            BoundStatement::For(_) => BoundNodeKind::ForStatement,
            BoundStatement::Label(_) => BoundNodeKind::LabelStatement,
            BoundStatement::Goto(_) => BoundNodeKind::GotoStatement,
            BoundStatement::ConditionalGoto(_) => BoundNodeKind::ConditionalGotoStatement,
            BoundStatement::Expression(_) => BoundNodeKind::ExpressionStatement,
        }
    }

    pub fn block(statements: Vec<Arc<BoundStatement>>) -> Arc<Self> {
        Arc::new(BoundStatement::Block(BoundBlockStatement { statements }))
    }

    pub fn variable_declaration(
        variable: VariableSymbol,
        initializer: Arc<BoundExpression>,
    ) -> Arc<Self> {
        Arc::new(BoundStatement::VariableDeclaration(BoundVariableDeclaration {
            variable,
            initializer,
        }))
    }

    pub fn while_loop(condition: Arc<BoundExpression>, body: Arc<BoundStatement>) -> Arc<Self> {
        Arc::new(BoundStatement::While(BoundWhileStatement { condition, body }))
    }

    pub fn label(label: LabelSymbol) -> Arc<Self> {
        Arc::new(BoundStatement::Label(BoundLabelStatement { label }))
    }

    pub fn goto(label: LabelSymbol) -> Arc<Self> {
        Arc::new(BoundStatement::Goto(BoundGotoStatement { label }))
    }

    pub fn conditional_goto(
        label: LabelSymbol,
        condition: Arc<BoundExpression>,
        jump_if_true: bool,
    ) -> Arc<Self> {
        Arc::new(BoundStatement::ConditionalGoto(BoundConditionalGotoStatement {
            label,
            condition,
            jump_if_true,
        }))
    }

    pub fn expression(expression: Arc<BoundExpression>) -> Arc<Self> {
        Arc::new(BoundStatement::Expression(BoundExpressionStatement { expression }))
    }

    /// Whether this is structured control flow that lowering removes.
    pub fn is_structured(&self) -> bool {
        matches!(
            self,
            BoundStatement::If(_) | BoundStatement::While(_) | BoundStatement::For(_)
        )
    }
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum BoundExpression {
    Literal(BoundLiteralExpression),
    Variable(BoundVariableExpression),
    Assignment(BoundAssignmentExpression),
    Unary(BoundUnaryExpression),
    Binary(BoundBinaryExpression),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundLiteralExpression {
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundVariableExpression {
    pub variable: VariableSymbol,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundAssignmentExpression {
    pub variable: VariableSymbol,
    pub expression: Arc<BoundExpression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundUnaryExpression {
    pub op: &'static BoundUnaryOperator,
    pub operand: Arc<BoundExpression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundBinaryExpression {
    pub left: Arc<BoundExpression>,
    pub op: &'static BoundBinaryOperator,
    pub right: Arc<BoundExpression>,
}

impl BoundExpression {
    pub fn kind(&self) -> BoundNodeKind {
        match self {
            BoundExpression::Literal(_) => BoundNodeKind::LiteralExpression,
            BoundExpression::Variable(_) => BoundNodeKind::VariableExpression,
            BoundExpression::Assignment(_) => BoundNodeKind::AssignmentExpression,
            BoundExpression::Unary(_) => BoundNodeKind::UnaryExpression,
            BoundExpression::Binary(_) => BoundNodeKind::BinaryExpression,
        }
    }

    /// The static type, read from the node's value, symbol or operator.
    /// Never walks into operands.
    pub fn ty(&self) -> TypeSymbol {
        match self {
            BoundExpression::Literal(n) => n.value.ty(),
            BoundExpression::Variable(n) => n.variable.ty(),
            BoundExpression::Assignment(n) => n.variable.ty(),
            BoundExpression::Unary(n) => n.op.result_type,
            BoundExpression::Binary(n) => n.op.result_type,
        }
    }

    pub fn literal(value: impl Into<Value>) -> Arc<Self> {
        Arc::new(BoundExpression::Literal(BoundLiteralExpression {
            value: value.into(),
        }))
    }

    pub fn variable(variable: VariableSymbol) -> Arc<Self> {
        Arc::new(BoundExpression::Variable(BoundVariableExpression { variable }))
    }

    pub fn assignment(variable: VariableSymbol, expression: Arc<BoundExpression>) -> Arc<Self> {
        Arc::new(BoundExpression::Assignment(BoundAssignmentExpression {
            variable,
            expression,
        }))
    }

    pub fn unary(op: &'static BoundUnaryOperator, operand: Arc<BoundExpression>) -> Arc<Self> {
        Arc::new(BoundExpression::Unary(BoundUnaryExpression { op, operand }))
    }

    pub fn binary(
        left: Arc<BoundExpression>,
        op: &'static BoundBinaryOperator,
        right: Arc<BoundExpression>,
    ) -> Arc<Self> {
        Arc::new(BoundExpression::Binary(BoundBinaryExpression { left, op, right }))
    }
}
