//! Operator precedence for binary and unary operators.

use ilang_ast::syntax_kind::SyntaxKind;

/// Operator precedence levels, lowest first. `None` marks a token that is
/// not an operator in that position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    None = 0,
    /// `|`, `||` and `^`
    LogicalOr = 1,
    /// `&` and `&&`
    LogicalAnd = 2,
    /// Equality and relational operators.
    Comparison = 3,
    Additive = 4,
    Multiplicative = 5,
    Unary = 6,
}

/// Get the binary operator precedence for a given token kind.
pub fn get_binary_operator_precedence(kind: SyntaxKind) -> OperatorPrecedence {
    match kind {
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken => OperatorPrecedence::Multiplicative,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => OperatorPrecedence::Additive,
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::ExclamationEqualsToken
        | SyntaxKind::LessThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::GreaterThanEqualsToken => OperatorPrecedence::Comparison,
        SyntaxKind::AmpersandToken | SyntaxKind::AmpersandAmpersandToken => {
            OperatorPrecedence::LogicalAnd
        }
        SyntaxKind::BarToken | SyntaxKind::BarBarToken | SyntaxKind::CaretToken => {
            OperatorPrecedence::LogicalOr
        }
        _ => OperatorPrecedence::None,
    }
}

/// Get the unary operator precedence for a given token kind.
pub fn get_unary_operator_precedence(kind: SyntaxKind) -> OperatorPrecedence {
    match kind {
        SyntaxKind::PlusToken
        | SyntaxKind::MinusToken
        | SyntaxKind::ExclamationToken
        | SyntaxKind::TildeToken => OperatorPrecedence::Unary,
        _ => OperatorPrecedence::None,
    }
}

/// All token kinds that parse as binary operators.
pub fn binary_operator_kinds() -> impl Iterator<Item = SyntaxKind> {
    SyntaxKind::PUNCTUATION
        .iter()
        .copied()
        .filter(|k| get_binary_operator_precedence(*k) != OperatorPrecedence::None)
}

/// All token kinds that parse as unary operators.
pub fn unary_operator_kinds() -> impl Iterator<Item = SyntaxKind> {
    SyntaxKind::PUNCTUATION
        .iter()
        .copied()
        .filter(|k| get_unary_operator_precedence(*k) != OperatorPrecedence::None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_sets() {
        assert_eq!(binary_operator_kinds().count(), 15);
        let unary: Vec<_> = unary_operator_kinds().collect();
        assert_eq!(
            unary,
            vec![
                SyntaxKind::PlusToken,
                SyntaxKind::MinusToken,
                SyntaxKind::ExclamationToken,
                SyntaxKind::TildeToken,
            ]
        );
    }

    #[test]
    fn test_unary_binds_tighter_than_any_binary() {
        for kind in binary_operator_kinds() {
            assert!(get_binary_operator_precedence(kind) < OperatorPrecedence::Unary);
        }
    }
}
