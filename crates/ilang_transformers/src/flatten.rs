//! Block flattening.

use ilang_binder::bound_tree::BoundStatement;
use std::sync::Arc;

/// Inline every nested block of `statement` into a single block whose
/// statements are never blocks. Statement order is preserved depth-first.
pub fn flatten(statement: &Arc<BoundStatement>) -> Arc<BoundStatement> {
    let mut builder = Vec::new();
    let mut stack = vec![statement.clone()];

    while let Some(current) = stack.pop() {
        match current.as_ref() {
            BoundStatement::Block(block) => {
                stack.extend(block.statements.iter().rev().cloned());
            }
            _ => builder.push(current),
        }
    }

    BoundStatement::block(builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ilang_binder::bound_tree::BoundExpression;

    fn number(value: i32) -> Arc<BoundStatement> {
        BoundStatement::expression(BoundExpression::literal(value))
    }

    #[test]
    fn test_flatten_preserves_order() {
        let tree = BoundStatement::block(vec![
            number(1),
            BoundStatement::block(vec![number(2), BoundStatement::block(vec![number(3)])]),
            BoundStatement::block(Vec::new()),
            number(4),
        ]);

        let BoundStatement::Block(flat) = flatten(&tree).as_ref().clone() else {
            panic!("flatten always returns a block");
        };
        let expected: Vec<_> = (1..=4).map(number).collect();
        assert_eq!(flat.statements, expected);
    }

    #[test]
    fn test_flatten_wraps_single_statement() {
        let statement = number(7);
        let BoundStatement::Block(flat) = flatten(&statement).as_ref().clone() else {
            panic!("flatten always returns a block");
        };
        assert_eq!(flat.statements.len(), 1);
        assert!(Arc::ptr_eq(&flat.statements[0], &statement));
    }

    #[test]
    fn test_flatten_is_idempotent() {
        let tree = BoundStatement::block(vec![
            BoundStatement::block(vec![number(1), number(2)]),
            number(3),
        ]);
        let once = flatten(&tree);
        let twice = flatten(&once);
        assert_eq!(once, twice);
    }
}
