//! Rewriter and lowerer integration tests.

use bumpalo::Bump;
use ilang_binder::bound_tree::*;
use ilang_binder::{Binder, BoundNodeKind, LabelSymbol};
use ilang_parser::SyntaxTree;
use ilang_transformers::{flatten, BoundTreeRewriter, Lowerer};
use std::sync::Arc;

/// Helper: parse and bind `source`, returning the bound statement.
fn bind(source: &str) -> Arc<BoundStatement> {
    let arena = Bump::new();
    let tree = SyntaxTree::parse(&arena, source);
    assert!(tree.diagnostics().is_empty(), "syntax errors in {source:?}");
    let scope = Binder::bind_global_scope(None, tree.root());
    assert!(scope.diagnostics().is_empty(), "binding errors in {source:?}");
    scope.statement().clone()
}

fn statements(block: &Arc<BoundStatement>) -> Vec<Arc<BoundStatement>> {
    match block.as_ref() {
        BoundStatement::Block(block) => block.statements.clone(),
        other => panic!("expected a block, got {}", other.kind()),
    }
}

fn kinds(block: &Arc<BoundStatement>) -> Vec<BoundNodeKind> {
    statements(block).iter().map(|s| s.kind()).collect()
}

fn label_of(statement: &BoundStatement) -> &LabelSymbol {
    match statement {
        BoundStatement::Label(n) => &n.label,
        BoundStatement::Goto(n) => &n.label,
        BoundStatement::ConditionalGoto(n) => &n.label,
        other => panic!("{} has no label", other.kind()),
    }
}

fn jump_if_true(statement: &BoundStatement) -> bool {
    match statement {
        BoundStatement::ConditionalGoto(n) => n.jump_if_true,
        other => panic!("{} is not a conditional goto", other.kind()),
    }
}

// ============================================================================
// Rewriter
// ============================================================================

struct Identity;

impl BoundTreeRewriter for Identity {}

/// Replaces every Int32 literal `1` with `2`.
struct OneToTwo;

impl BoundTreeRewriter for OneToTwo {
    fn rewrite_literal_expression(
        &mut self,
        node: &Arc<BoundExpression>,
        expression: &BoundLiteralExpression,
    ) -> Arc<BoundExpression> {
        match expression.value.as_int32() {
            Some(1) => BoundExpression::literal(2),
            _ => node.clone(),
        }
    }
}

#[test]
fn test_identity_rewrite_returns_same_allocation() {
    let tree = bind(
        "{ var a = 1 if a > 0 { a = a + 1 } else { a = -a } while a < 10 a = a * 2 for i = 0 to 3 { } }",
    );
    let rewritten = Identity.rewrite_statement(&tree);
    assert!(Arc::ptr_eq(&tree, &rewritten));
}

#[test]
fn test_rewrite_shares_unchanged_siblings() {
    let tree = bind("{ var a = 5 var b = 1 a + b }");
    let rewritten = OneToTwo.rewrite_statement(&tree);
    assert!(!Arc::ptr_eq(&tree, &rewritten));

    let before = statements(&tree);
    let after = statements(&rewritten);
    assert!(Arc::ptr_eq(&before[0], &after[0]));
    assert!(!Arc::ptr_eq(&before[1], &after[1]));
    assert!(Arc::ptr_eq(&before[2], &after[2]));

    let BoundStatement::VariableDeclaration(declaration) = after[1].as_ref() else {
        panic!("expected a declaration");
    };
    assert_eq!(*declaration.initializer, *BoundExpression::literal(2));
}

// ============================================================================
// Lowering
// ============================================================================

#[test]
fn test_lowering_without_control_flow_equals_flatten() {
    let tree = bind("{ var a = 1 { a = a + 2 { a } } a * 3 }");
    let lowered = Lowerer::lower(&tree);
    assert_eq!(lowered, flatten(&tree));
    assert_eq!(
        kinds(&lowered),
        vec![
            BoundNodeKind::VariableDeclaration,
            BoundNodeKind::ExpressionStatement,
            BoundNodeKind::ExpressionStatement,
            BoundNodeKind::ExpressionStatement,
        ]
    );
}

#[test]
fn test_if_without_else() {
    let lowered = Lowerer::lower(&bind("{ var a = 1 if a == 1 a = 2 }"));
    let program = statements(&lowered);
    assert_eq!(
        kinds(&lowered),
        vec![
            BoundNodeKind::VariableDeclaration,
            BoundNodeKind::ConditionalGotoStatement,
            BoundNodeKind::ExpressionStatement,
            BoundNodeKind::LabelStatement,
        ]
    );
    assert_eq!(label_of(&program[1]).name(), "Label1");
    assert!(!jump_if_true(&program[1]));
    assert_eq!(label_of(&program[3]).name(), "Label1");
}

#[test]
fn test_if_with_else() {
    let lowered = Lowerer::lower(&bind("{ var a = 1 if a == 1 a = 2 else a = 3 }"));
    let program = statements(&lowered);
    assert_eq!(
        kinds(&lowered),
        vec![
            BoundNodeKind::VariableDeclaration,
            BoundNodeKind::ConditionalGotoStatement,
            BoundNodeKind::ExpressionStatement,
            BoundNodeKind::GotoStatement,
            BoundNodeKind::LabelStatement,
            BoundNodeKind::ExpressionStatement,
            BoundNodeKind::LabelStatement,
        ]
    );
    let else_label = label_of(&program[1]);
    let end_label = label_of(&program[3]);
    assert_eq!(else_label.name(), "Label1");
    assert_eq!(end_label.name(), "Label2");
    assert_eq!(label_of(&program[4]), else_label);
    assert_eq!(label_of(&program[6]), end_label);
}

#[test]
fn test_while_loop() {
    let lowered = Lowerer::lower(&bind("{ var a = 0 while a < 3 a = a + 1 }"));
    let program = statements(&lowered);
    assert_eq!(
        kinds(&lowered),
        vec![
            BoundNodeKind::VariableDeclaration,
            BoundNodeKind::GotoStatement,
            BoundNodeKind::LabelStatement,
            BoundNodeKind::ExpressionStatement,
            BoundNodeKind::LabelStatement,
            BoundNodeKind::ConditionalGotoStatement,
            BoundNodeKind::LabelStatement,
        ]
    );
    // goto check; continue: body; check: gotoTrue continue; end:
    assert_eq!(label_of(&program[1]).name(), "Label2");
    assert_eq!(label_of(&program[2]).name(), "Label1");
    assert_eq!(label_of(&program[4]).name(), "Label2");
    assert_eq!(label_of(&program[5]).name(), "Label1");
    assert!(jump_if_true(&program[5]));
    assert_eq!(label_of(&program[6]).name(), "Label3");
}

#[test]
fn test_for_loop_becomes_counting_while() {
    let lowered = Lowerer::lower(&bind("for i = 1 to 10 { }"));
    let program = statements(&lowered);
    assert_eq!(
        kinds(&lowered),
        vec![
            BoundNodeKind::VariableDeclaration,
            BoundNodeKind::GotoStatement,
            BoundNodeKind::LabelStatement,
            BoundNodeKind::ExpressionStatement,
            BoundNodeKind::LabelStatement,
            BoundNodeKind::ConditionalGotoStatement,
            BoundNodeKind::LabelStatement,
        ]
    );

    let BoundStatement::ConditionalGoto(check) = program[5].as_ref() else {
        panic!("expected the loop check");
    };
    let BoundExpression::Binary(condition) = check.condition.as_ref() else {
        panic!("expected a comparison");
    };
    assert_eq!(condition.op.kind, ilang_binder::BoundBinaryOperatorKind::LessOrEquals);

    let BoundStatement::Expression(increment) = program[3].as_ref() else {
        panic!("expected the increment");
    };
    assert_eq!(increment.expression.kind(), BoundNodeKind::AssignmentExpression);
}

#[test]
fn test_nested_control_flow_is_fully_lowered() {
    let lowered = Lowerer::lower(&bind(
        "{ var s = 0 for i = 1 to 3 { if i == 2 { while s < 100 s = s * 2 } else s = s + i } }",
    ));
    let program = statements(&lowered);
    assert!(program.iter().all(|s| !s.is_structured()));
    assert!(program.iter().all(|s| s.kind() != BoundNodeKind::BlockStatement));

    // Every jump target is defined exactly once.
    let defined: Vec<_> = program
        .iter()
        .filter_map(|s| match s.as_ref() {
            BoundStatement::Label(n) => Some(n.label.clone()),
            _ => None,
        })
        .collect();
    for statement in &program {
        if let BoundStatement::Goto(_) | BoundStatement::ConditionalGoto(_) = statement.as_ref() {
            let target = label_of(statement);
            assert_eq!(defined.iter().filter(|l| *l == target).count(), 1, "{target}");
        }
    }
    // for (3 labels) + if/else (2) + while (3)
    assert_eq!(defined.len(), 8);
}

#[test]
fn test_lowering_is_idempotent_on_flat_programs() {
    let once = Lowerer::lower(&bind("{ var a = 0 while a < 3 a = a + 1 }"));
    let twice = Lowerer::lower(&once);
    assert_eq!(once, twice);
}
