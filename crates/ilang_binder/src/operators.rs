//! The fixed unary and binary operator tables.
//!
//! Binding an operator looks up the entry matching the operator token and
//! the operand types. Entries are `'static`, so bound nodes hold plain
//! references to them.

use ilang_ast::syntax_kind::SyntaxKind;
use ilang_core::value::TypeSymbol;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundUnaryOperatorKind {
    Identity,
    Negation,
    LogicalNegation,
    OnesComplement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundBinaryOperatorKind {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    LogicalAnd,
    LogicalOr,
    Equals,
    NotEquals,
    Less,
    LessOrEquals,
    Greater,
    GreaterOrEquals,
}

impl fmt::Display for BoundUnaryOperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl fmt::Display for BoundBinaryOperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A resolved unary operator.
#[derive(Debug, PartialEq, Eq)]
pub struct BoundUnaryOperator {
    pub syntax_kind: SyntaxKind,
    pub kind: BoundUnaryOperatorKind,
    pub operand_type: TypeSymbol,
    pub result_type: TypeSymbol,
}

impl BoundUnaryOperator {
    const fn new(syntax_kind: SyntaxKind, kind: BoundUnaryOperatorKind, ty: TypeSymbol) -> Self {
        Self {
            syntax_kind,
            kind,
            operand_type: ty,
            result_type: ty,
        }
    }

    /// Find the operator for `syntax_kind` applied to `operand_type`.
    pub fn bind(syntax_kind: SyntaxKind, operand_type: TypeSymbol) -> Option<&'static Self> {
        UNARY_OPERATORS
            .iter()
            .find(|op| op.syntax_kind == syntax_kind && op.operand_type == operand_type)
    }
}

/// A resolved binary operator.
#[derive(Debug, PartialEq, Eq)]
pub struct BoundBinaryOperator {
    pub syntax_kind: SyntaxKind,
    pub kind: BoundBinaryOperatorKind,
    pub left_type: TypeSymbol,
    pub right_type: TypeSymbol,
    pub result_type: TypeSymbol,
}

impl BoundBinaryOperator {
    const fn new(
        syntax_kind: SyntaxKind,
        kind: BoundBinaryOperatorKind,
        operand_type: TypeSymbol,
        result_type: TypeSymbol,
    ) -> Self {
        Self {
            syntax_kind,
            kind,
            left_type: operand_type,
            right_type: operand_type,
            result_type,
        }
    }

    /// Find the operator for `syntax_kind` applied to the given operand types.
    pub fn bind(
        syntax_kind: SyntaxKind,
        left_type: TypeSymbol,
        right_type: TypeSymbol,
    ) -> Option<&'static Self> {
        BINARY_OPERATORS.iter().find(|op| {
            op.syntax_kind == syntax_kind && op.left_type == left_type && op.right_type == right_type
        })
    }
}

use BoundBinaryOperatorKind as B;
use BoundUnaryOperatorKind as U;
use TypeSymbol::{Boolean, Int32};

static UNARY_OPERATORS: [BoundUnaryOperator; 4] = [
    BoundUnaryOperator::new(SyntaxKind::ExclamationToken, U::LogicalNegation, Boolean),
    BoundUnaryOperator::new(SyntaxKind::PlusToken, U::Identity, Int32),
    BoundUnaryOperator::new(SyntaxKind::MinusToken, U::Negation, Int32),
    BoundUnaryOperator::new(SyntaxKind::TildeToken, U::OnesComplement, Int32),
];

static BINARY_OPERATORS: [BoundBinaryOperator; 20] = [
    BoundBinaryOperator::new(SyntaxKind::PlusToken, B::Addition, Int32, Int32),
    BoundBinaryOperator::new(SyntaxKind::MinusToken, B::Subtraction, Int32, Int32),
    BoundBinaryOperator::new(SyntaxKind::AsteriskToken, B::Multiplication, Int32, Int32),
    BoundBinaryOperator::new(SyntaxKind::SlashToken, B::Division, Int32, Int32),
    BoundBinaryOperator::new(SyntaxKind::AmpersandToken, B::BitwiseAnd, Int32, Int32),
    BoundBinaryOperator::new(SyntaxKind::BarToken, B::BitwiseOr, Int32, Int32),
    BoundBinaryOperator::new(SyntaxKind::CaretToken, B::BitwiseXor, Int32, Int32),
    BoundBinaryOperator::new(SyntaxKind::EqualsEqualsToken, B::Equals, Int32, Boolean),
    BoundBinaryOperator::new(SyntaxKind::ExclamationEqualsToken, B::NotEquals, Int32, Boolean),
    BoundBinaryOperator::new(SyntaxKind::LessThanToken, B::Less, Int32, Boolean),
    BoundBinaryOperator::new(SyntaxKind::LessThanEqualsToken, B::LessOrEquals, Int32, Boolean),
    BoundBinaryOperator::new(SyntaxKind::GreaterThanToken, B::Greater, Int32, Boolean),
    BoundBinaryOperator::new(SyntaxKind::GreaterThanEqualsToken, B::GreaterOrEquals, Int32, Boolean),
    BoundBinaryOperator::new(SyntaxKind::AmpersandToken, B::BitwiseAnd, Boolean, Boolean),
    BoundBinaryOperator::new(SyntaxKind::AmpersandAmpersandToken, B::LogicalAnd, Boolean, Boolean),
    BoundBinaryOperator::new(SyntaxKind::BarToken, B::BitwiseOr, Boolean, Boolean),
    BoundBinaryOperator::new(SyntaxKind::BarBarToken, B::LogicalOr, Boolean, Boolean),
    BoundBinaryOperator::new(SyntaxKind::CaretToken, B::BitwiseXor, Boolean, Boolean),
    BoundBinaryOperator::new(SyntaxKind::EqualsEqualsToken, B::Equals, Boolean, Boolean),
    BoundBinaryOperator::new(SyntaxKind::ExclamationEqualsToken, B::NotEquals, Boolean, Boolean),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unary_lookup() {
        let op = BoundUnaryOperator::bind(SyntaxKind::TildeToken, Int32).unwrap();
        assert_eq!(op.kind, U::OnesComplement);
        assert!(BoundUnaryOperator::bind(SyntaxKind::MinusToken, Boolean).is_none());
        assert!(BoundUnaryOperator::bind(SyntaxKind::ExclamationToken, Int32).is_none());
    }

    #[test]
    fn test_bitwise_and_logical_stay_distinct() {
        let bitwise = BoundBinaryOperator::bind(SyntaxKind::AmpersandToken, Boolean, Boolean).unwrap();
        let logical =
            BoundBinaryOperator::bind(SyntaxKind::AmpersandAmpersandToken, Boolean, Boolean).unwrap();
        assert_eq!(bitwise.kind, B::BitwiseAnd);
        assert_eq!(logical.kind, B::LogicalAnd);
        assert_eq!(bitwise.result_type, Boolean);
        assert!(BoundBinaryOperator::bind(SyntaxKind::AmpersandAmpersandToken, Int32, Int32).is_none());
    }

    #[test]
    fn test_comparison_results_are_boolean() {
        for kind in [
            SyntaxKind::EqualsEqualsToken,
            SyntaxKind::ExclamationEqualsToken,
            SyntaxKind::LessThanToken,
            SyntaxKind::LessThanEqualsToken,
            SyntaxKind::GreaterThanToken,
            SyntaxKind::GreaterThanEqualsToken,
        ] {
            let op = BoundBinaryOperator::bind(kind, Int32, Int32).unwrap();
            assert_eq!(op.result_type, Boolean, "{kind}");
        }
        assert!(BoundBinaryOperator::bind(SyntaxKind::LessThanToken, Boolean, Boolean).is_none());
        assert!(BoundBinaryOperator::bind(SyntaxKind::PlusToken, Int32, Boolean).is_none());
    }

    #[test]
    fn test_lookup_returns_static_entry() {
        let a = BoundBinaryOperator::bind(SyntaxKind::PlusToken, Int32, Int32).unwrap();
        let b = BoundBinaryOperator::bind(SyntaxKind::PlusToken, Int32, Int32).unwrap();
        assert!(std::ptr::eq(a, b));
    }
}
