//! ilang_printer: Tree dumps for syntax and bound trees.
//!
//! Both printers produce one line per node, drawn as an indented tree:
//!
//! ```text
//! BlockStatement
//! ├──VariableDeclaration : Variable = a
//! │  └──LiteralExpression : Value = 1, Type = Int32
//! └──ExpressionStatement
//!    └──AdditionExpression : Type = Int32
//! ```
//!
//! Syntax tokens carrying a value print it after the kind. Bound nodes print
//! their non-node properties after a colon; unary and binary expressions are
//! named after their operator kind.

use ilang_ast::node::CompilationUnitSyntax;
use ilang_ast::visitor::SyntaxNode;
use ilang_binder::bound_tree::*;
use std::fmt::Write;

/// Builds indented tree dumps.
pub struct TreePrinter {
    output: String,
}

impl Default for TreePrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl TreePrinter {
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(1024),
        }
    }

    /// Dump a syntax tree, starting at the compilation unit.
    pub fn print_syntax_tree(&mut self, root: &CompilationUnitSyntax<'_>) -> String {
        self.print_syntax_node(SyntaxNode::CompilationUnit(root))
    }

    /// Dump any syntax node or token and its descendants.
    pub fn print_syntax_node(&mut self, node: SyntaxNode<'_, '_>) -> String {
        self.output.clear();
        self.write_syntax_node(node, "", true, true);
        std::mem::take(&mut self.output)
    }

    /// Dump a bound statement and its descendants.
    pub fn print_bound_tree(&mut self, statement: &BoundStatement) -> String {
        self.output.clear();
        self.write_bound_node(BoundNode::Statement(statement), "", true, true);
        std::mem::take(&mut self.output)
    }

    // ========================================================================
    // Syntax trees
    // ========================================================================

    fn write_syntax_node(&mut self, node: SyntaxNode<'_, '_>, indent: &str, is_last: bool, is_first: bool) {
        self.write_marker(indent, is_last, is_first);
        let _ = write!(self.output, "{}", node.kind());
        if let Some(value) = node.as_token().and_then(|token| token.value) {
            let _ = write!(self.output, " {}", value);
        }
        self.output.push('\n');

        let indent = child_indent(indent, is_last, is_first);
        let children = node.children();
        let count = children.len();
        for (i, child) in children.into_iter().enumerate() {
            self.write_syntax_node(child, &indent, i + 1 == count, false);
        }
    }

    // ========================================================================
    // Bound trees
    // ========================================================================

    fn write_bound_node(&mut self, node: BoundNode<'_>, indent: &str, is_last: bool, is_first: bool) {
        self.write_marker(indent, is_last, is_first);
        self.output.push_str(&node.text());

        for (i, (name, value)) in node.properties().into_iter().enumerate() {
            self.output.push_str(if i == 0 { " : " } else { ", " });
            let _ = write!(self.output, "{} = {}", name, value);
        }
        self.output.push('\n');

        let indent = child_indent(indent, is_last, is_first);
        let children = node.children();
        let count = children.len();
        for (i, child) in children.into_iter().enumerate() {
            self.write_bound_node(child, &indent, i + 1 == count, false);
        }
    }

    fn write_marker(&mut self, indent: &str, is_last: bool, is_first: bool) {
        self.output.push_str(indent);
        if !is_first {
            self.output.push_str(if is_last { "└──" } else { "├──" });
        }
    }
}

fn child_indent(indent: &str, is_last: bool, is_first: bool) -> String {
    if is_first {
        indent.to_string()
    } else if is_last {
        format!("{indent}   ")
    } else {
        format!("{indent}│  ")
    }
}

/// A borrowed view over either half of the bound tree.
#[derive(Clone, Copy)]
enum BoundNode<'r> {
    Statement(&'r BoundStatement),
    Expression(&'r BoundExpression),
}

impl<'r> BoundNode<'r> {
    fn text(&self) -> String {
        match self {
            BoundNode::Statement(s) => s.kind().to_string(),
            BoundNode::Expression(BoundExpression::Unary(n)) => format!("{}Expression", n.op.kind),
            BoundNode::Expression(BoundExpression::Binary(n)) => format!("{}Expression", n.op.kind),
            BoundNode::Expression(e) => e.kind().to_string(),
        }
    }

    fn properties(&self) -> Vec<(&'static str, String)> {
        match self {
            BoundNode::Statement(statement) => match statement {
                BoundStatement::VariableDeclaration(n) => vec![("Variable", n.variable.to_string())],
                BoundStatement::For(n) => vec![("Variable", n.variable.to_string())],
                BoundStatement::Label(n) => vec![("Label", n.label.to_string())],
                BoundStatement::Goto(n) => vec![("Label", n.label.to_string())],
                BoundStatement::ConditionalGoto(n) => vec![
                    ("Label", n.label.to_string()),
                    ("JumpIfTrue", n.jump_if_true.to_string()),
                ],
                BoundStatement::Block(_)
                | BoundStatement::If(_)
                | BoundStatement::While(_)
                | BoundStatement::Expression(_) => Vec::new(),
            },
            BoundNode::Expression(expression) => {
                let ty = ("Type", expression.ty().to_string());
                match expression {
                    BoundExpression::Literal(n) => vec![("Value", n.value.to_string()), ty],
                    BoundExpression::Variable(n) => vec![("Variable", n.variable.to_string()), ty],
                    BoundExpression::Assignment(n) => {
                        vec![("Variable", n.variable.to_string()), ty]
                    }
                    BoundExpression::Unary(_) | BoundExpression::Binary(_) => vec![ty],
                }
            }
        }
    }

    fn children(&self) -> Vec<BoundNode<'r>> {
        use BoundNode::{Expression as E, Statement as S};
        match *self {
            S(statement) => match statement {
                BoundStatement::Block(n) => n.statements.iter().map(|s| S(s)).collect(),
                BoundStatement::VariableDeclaration(n) => vec![E(&n.initializer)],
                BoundStatement::If(n) => {
                    let mut children = vec![E(&n.condition), S(&n.then_statement)];
                    if let Some(else_statement) = &n.else_statement {
                        children.push(S(else_statement));
                    }
                    children
                }
                BoundStatement::While(n) => vec![E(&n.condition), S(&n.body)],
                BoundStatement::For(n) => vec![E(&n.lower_bound), E(&n.upper_bound), S(&n.body)],
                BoundStatement::Label(_) | BoundStatement::Goto(_) => Vec::new(),
                BoundStatement::ConditionalGoto(n) => vec![E(&n.condition)],
                BoundStatement::Expression(n) => vec![E(&n.expression)],
            },
            E(expression) => match expression {
                BoundExpression::Literal(_) | BoundExpression::Variable(_) => Vec::new(),
                BoundExpression::Assignment(n) => vec![E(&n.expression)],
                BoundExpression::Unary(n) => vec![E(&n.operand)],
                BoundExpression::Binary(n) => vec![E(&n.left), E(&n.right)],
            },
        }
    }
}
