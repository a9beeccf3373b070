//! Binder integration tests.

use bumpalo::Bump;
use ilang_binder::bound_tree::BoundExpression;
use ilang_binder::{
    Binder, BoundBinaryOperatorKind, BoundGlobalScope, BoundNodeKind, BoundStatement,
};
use ilang_core::text::TextSpan;
use ilang_core::value::{TypeSymbol, Value};
use ilang_parser::SyntaxTree;
use std::sync::Arc;

/// Helper: parse and bind `source` on top of `previous`.
fn bind(previous: Option<Arc<BoundGlobalScope>>, source: &str) -> Arc<BoundGlobalScope> {
    let arena = Bump::new();
    let tree = SyntaxTree::parse(&arena, source);
    assert!(tree.diagnostics().is_empty(), "syntax errors in {source:?}");
    Arc::new(Binder::bind_global_scope(previous, tree.root()))
}

fn messages(scope: &BoundGlobalScope) -> Vec<&str> {
    scope
        .diagnostics()
        .iter()
        .map(|d| d.message_text.as_str())
        .collect()
}

fn expression_of(scope: &BoundGlobalScope) -> Arc<BoundExpression> {
    match scope.statement().as_ref() {
        BoundStatement::Expression(statement) => statement.expression.clone(),
        other => panic!("expected an expression statement, got {:?}", other.kind()),
    }
}

// ============================================================================
// Declarations and scopes
// ============================================================================

#[test]
fn test_top_level_declaration_is_global() {
    let scope = bind(None, "let flag = true");
    assert!(scope.diagnostics().is_empty());
    assert_eq!(scope.variables().len(), 1);
    let flag = &scope.variables()[0];
    assert_eq!(flag.name(), "flag");
    assert!(flag.is_read_only());
    assert_eq!(flag.ty(), TypeSymbol::Boolean);
}

#[test]
fn test_block_declarations_are_not_global() {
    let scope = bind(None, "{ var a = 1 var b = a }");
    assert!(scope.diagnostics().is_empty());
    assert!(scope.variables().is_empty());
}

#[test]
fn test_redeclaration_in_same_block() {
    let arena = Bump::new();
    let tree = SyntaxTree::parse(&arena, "{ var x = 10 var y = 100 { var x = 10 } var x = 5 }");
    let scope = Binder::bind_global_scope(None, tree.root());
    assert_eq!(messages(&scope), vec!["Error: Variable 'x' is already declared"]);
    assert_eq!(scope.diagnostics()[0].span, TextSpan::new(44, 1));
}

#[test]
fn test_inner_scope_shadowing_is_allowed() {
    let scope = bind(None, "{ var x = 1 { var x = false } }");
    assert!(scope.diagnostics().is_empty());
}

#[test]
fn test_for_variable_is_read_only_and_scoped_to_body() {
    let scope = bind(None, "{ for i = 1 to 3 i = 2 }");
    assert_eq!(
        messages(&scope),
        vec!["Error: Variable 'i' is read-only and cannot be assigned to"]
    );
    assert_eq!(scope.diagnostics()[0].span, TextSpan::new(19, 1));

    let scope = bind(None, "{ for i = 1 to 3 { } i }");
    assert_eq!(messages(&scope), vec!["Error: Variable 'i' is not defined"]);
}

// ============================================================================
// Diagnostics and recovery
// ============================================================================

#[test]
fn test_undefined_name_becomes_zero() {
    let scope = bind(None, "x * 10");
    assert_eq!(messages(&scope), vec!["Error: Variable 'x' is not defined"]);
    assert_eq!(scope.diagnostics()[0].span, TextSpan::new(0, 1));

    let BoundExpression::Binary(binary) = expression_of(&scope).as_ref().clone() else {
        panic!("expected a binary expression");
    };
    assert_eq!(*binary.left, *BoundExpression::literal(Value::Int32(0)));
}

#[test]
fn test_undefined_assignment_target_returns_right_hand_side() {
    let scope = bind(None, "x = 10");
    assert_eq!(messages(&scope), vec!["Error: Variable 'x' is not defined"]);
    assert_eq!(expression_of(&scope).kind(), BoundNodeKind::LiteralExpression);
}

#[test]
fn test_assignment_type_mismatch() {
    let scope = bind(None, "{ var x = 10 x = true }");
    assert_eq!(messages(&scope), vec!["Error: Cannot convert type Int32 to Boolean"]);
    assert_eq!(scope.diagnostics()[0].span, TextSpan::new(17, 4));
}

#[test]
fn test_read_only_assignment_reports_once() {
    let scope = bind(None, "{ let x = 10 x = 0 }");
    assert_eq!(
        messages(&scope),
        vec!["Error: Variable 'x' is read-only and cannot be assigned to"]
    );
    assert_eq!(scope.diagnostics()[0].span, TextSpan::new(15, 1));
}

#[test]
fn test_conditions_must_be_boolean() {
    let scope = bind(None, "if 10 { }");
    assert_eq!(messages(&scope), vec!["Error: Cannot convert type Int32 to Boolean"]);
    assert_eq!(scope.diagnostics()[0].span, TextSpan::new(3, 2));

    let scope = bind(None, "while 1 + 2 { }");
    assert_eq!(scope.diagnostics()[0].span, TextSpan::new(6, 5));
}

#[test]
fn test_for_bounds_must_be_int32() {
    let scope = bind(None, "for i = false to true { }");
    assert_eq!(
        messages(&scope),
        vec![
            "Error: Cannot convert type Boolean to Int32",
            "Error: Cannot convert type Boolean to Int32",
        ]
    );
}

#[test]
fn test_undefined_unary_operator_returns_operand() {
    let scope = bind(None, "-true");
    assert_eq!(
        messages(&scope),
        vec!["Error: Unary operator '-' is not defined for type Boolean"]
    );
    assert_eq!(scope.diagnostics()[0].span, TextSpan::new(0, 1));
    assert_eq!(*expression_of(&scope), *BoundExpression::literal(true));
}

#[test]
fn test_undefined_binary_operator_returns_left() {
    let scope = bind(None, "10 + true");
    assert_eq!(
        messages(&scope),
        vec!["Error: Binary operator '+' is not defined for types Int32 and Boolean"]
    );
    assert_eq!(scope.diagnostics()[0].span, TextSpan::new(3, 1));
    assert_eq!(*expression_of(&scope), *BoundExpression::literal(10));
}

#[test]
fn test_boolean_ampersand_binds_bitwise_kind() {
    let scope = bind(None, "true & false");
    let BoundExpression::Binary(binary) = expression_of(&scope).as_ref().clone() else {
        panic!("expected a binary expression");
    };
    assert_eq!(binary.op.kind, BoundBinaryOperatorKind::BitwiseAnd);
    assert_eq!(binary.op.result_type, TypeSymbol::Boolean);
}

// ============================================================================
// Chained submissions
// ============================================================================

#[test]
fn test_previous_globals_are_visible() {
    let first = bind(None, "var x = 10");
    let second = bind(Some(first.clone()), "x + 1");
    assert!(second.diagnostics().is_empty());
    assert!(Arc::ptr_eq(second.previous().unwrap(), &first));
    assert_eq!(expression_of(&second).ty(), TypeSymbol::Int32);
}

#[test]
fn test_later_declaration_shadows_previous() {
    let first = bind(None, "var x = 10");
    let second = bind(Some(first), "var x = true");
    assert!(second.diagnostics().is_empty());
    let third = bind(Some(second), "x");
    assert_eq!(expression_of(&third).ty(), TypeSymbol::Boolean);
}

#[test]
fn test_oldest_globals_remain_visible_through_chain() {
    let first = bind(None, "var a = 1");
    let second = bind(Some(first), "var b = 2");
    let third = bind(Some(second), "var c = 3");
    let fourth = bind(Some(third), "a + b + c");
    assert!(fourth.diagnostics().is_empty());
    assert_eq!(fourth.chain().count(), 4);
}
