//! A parsed submission: source text, root node and front-end diagnostics.

use bumpalo::Bump;
use ilang_ast::node::CompilationUnitSyntax;
use ilang_core::text::LineMap;
use ilang_diagnostics::Diagnostic;

use crate::parser::Parser;

/// The result of parsing one submission.
///
/// All nodes and token text live in the arena passed to [`SyntaxTree::parse`].
#[derive(Debug, Clone)]
pub struct SyntaxTree<'a> {
    text: &'a str,
    line_map: LineMap,
    root: &'a CompilationUnitSyntax<'a>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> SyntaxTree<'a> {
    /// Parse `text`. The text is copied into `arena` alongside the nodes.
    pub fn parse(arena: &'a Bump, text: &str) -> Self {
        let text: &'a str = arena.alloc_str(text);
        let mut parser = Parser::new(arena, text);
        let root = parser.parse_compilation_unit();
        let diagnostics = parser.take_diagnostics().into_diagnostics();
        Self {
            text,
            line_map: LineMap::new(text),
            root,
            diagnostics,
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn line_map(&self) -> &LineMap {
        &self.line_map
    }

    pub fn root(&self) -> &'a CompilationUnitSyntax<'a> {
        self.root
    }

    /// Lexical and syntactic diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
