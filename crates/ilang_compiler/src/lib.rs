//! ilang_compiler: Compilation orchestration.
//!
//! A [`Compilation`] ties one parsed submission to the compilation before it.
//! Binding happens lazily on first access to the global scope; evaluation
//! lowers the bound tree and runs it against a caller-owned variable store.

use ilang_binder::{Binder, BoundGlobalScope, BoundStatement};
use ilang_core::value::Value;
use ilang_diagnostics::Diagnostic;
use ilang_evaluator::Evaluator;
use ilang_parser::SyntaxTree;
use ilang_printer::TreePrinter;
use ilang_transformers::Lowerer;
use once_cell::race::OnceBox;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

pub use ilang_evaluator::Variables;

/// The outcome of [`Compilation::evaluate`].
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    /// Syntax diagnostics followed by binding diagnostics.
    pub diagnostics: Vec<Diagnostic>,
    /// The value of the last statement executed. Always `None` when there
    /// are diagnostics.
    pub value: Option<Value>,
}

/// One submission, chained to the submissions before it.
pub struct Compilation<'a> {
    previous: Option<Arc<Compilation<'a>>>,
    syntax_tree: SyntaxTree<'a>,
    global_scope: OnceBox<Arc<BoundGlobalScope>>,
}

impl<'a> Compilation<'a> {
    /// Start a new chain.
    pub fn new(syntax_tree: SyntaxTree<'a>) -> Self {
        Self::with_previous(None, syntax_tree)
    }

    fn with_previous(previous: Option<Arc<Compilation<'a>>>, syntax_tree: SyntaxTree<'a>) -> Self {
        Self {
            previous,
            syntax_tree,
            global_scope: OnceBox::new(),
        }
    }

    /// A compilation that sees every global declared by `self` and its
    /// predecessors.
    pub fn continue_with(self: &Arc<Self>, syntax_tree: SyntaxTree<'a>) -> Compilation<'a> {
        Self::with_previous(Some(Arc::clone(self)), syntax_tree)
    }

    pub fn previous(&self) -> Option<&Arc<Compilation<'a>>> {
        self.previous.as_ref()
    }

    pub fn syntax_tree(&self) -> &SyntaxTree<'a> {
        &self.syntax_tree
    }

    /// The bound result of this submission, binding it on first use.
    ///
    /// Concurrent first calls may each bind; one result is published and
    /// every caller sees that one.
    pub fn global_scope(&self) -> &Arc<BoundGlobalScope> {
        self.global_scope.get_or_init(|| {
            let previous = self.previous.as_ref().map(|p| Arc::clone(p.global_scope()));
            Box::new(Arc::new(Binder::bind_global_scope(
                previous,
                self.syntax_tree.root(),
            )))
        })
    }

    /// Evaluate this submission against `variables`.
    ///
    /// Nothing runs if parsing or binding reported anything.
    pub fn evaluate(&self, variables: &mut Variables) -> EvaluationResult {
        let global_scope = self.global_scope();
        let diagnostics: Vec<Diagnostic> = self
            .syntax_tree
            .diagnostics()
            .iter()
            .chain(global_scope.diagnostics())
            .cloned()
            .collect();

        if !diagnostics.is_empty() {
            debug!(diagnostics = diagnostics.len(), "skipping evaluation");
            return EvaluationResult {
                diagnostics,
                value: None,
            };
        }

        let program = self.program();
        let value = Evaluator::new(program, variables).evaluate();
        debug!(?value, "evaluated submission");
        EvaluationResult {
            diagnostics,
            value,
        }
    }

    /// Write the lowered program as a tree.
    pub fn emit_tree(&self, writer: &mut impl fmt::Write) -> fmt::Result {
        let program = self.program();
        writer.write_str(&TreePrinter::new().print_bound_tree(&program))
    }

    fn program(&self) -> Arc<BoundStatement> {
        Lowerer::lower(self.global_scope().statement())
    }
}

impl fmt::Debug for Compilation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compilation")
            .field("text", &self.syntax_tree.text())
            .field("has_previous", &self.previous.is_some())
            .field("bound", &self.global_scope.get().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;

    #[test]
    fn test_global_scope_is_memoized() {
        let arena = Bump::new();
        let compilation = Compilation::new(SyntaxTree::parse(&arena, "var a = 1"));
        let first = Arc::clone(compilation.global_scope());
        let second = Arc::clone(compilation.global_scope());
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_continue_with_links_previous() {
        let arena = Bump::new();
        let first = Arc::new(Compilation::new(SyntaxTree::parse(&arena, "var a = 1")));
        let second = first.continue_with(SyntaxTree::parse(&arena, "a"));
        assert!(Arc::ptr_eq(second.previous().unwrap(), &first));
        assert!(Arc::ptr_eq(
            second.global_scope().previous().unwrap(),
            first.global_scope()
        ));
    }

    #[test]
    fn test_diagnostics_prevent_evaluation() {
        let arena = Bump::new();
        let compilation = Compilation::new(SyntaxTree::parse(&arena, "{ var a = 1 a = true }"));
        let mut variables = Variables::new();
        let result = compilation.evaluate(&mut variables);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.value, None);
        assert!(variables.is_empty());
    }

    #[test]
    fn test_emit_tree_prints_lowered_program() {
        let arena = Bump::new();
        let compilation = Compilation::new(SyntaxTree::parse(&arena, "if true 1"));
        let mut out = String::new();
        compilation.emit_tree(&mut out).unwrap();
        assert_eq!(
            out,
            "\
BlockStatement
├──ConditionalGotoStatement : Label = Label1, JumpIfTrue = false
│  └──LiteralExpression : Value = true, Type = Boolean
├──ExpressionStatement
│  └──LiteralExpression : Value = 1, Type = Int32
└──LabelStatement : Label = Label1
"
        );
    }
}
