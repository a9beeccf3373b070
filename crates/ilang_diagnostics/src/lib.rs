//! ilang_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Every user-facing problem (bad characters, unexpected tokens, undefined
//! names, type mismatches, ...) becomes a [`Diagnostic`] appended to a
//! [`DiagnosticCollection`]. Nothing in the pipeline throws for bad user
//! input; stages keep going and later stages check whether the collection is
//! empty before evaluating.

use ilang_core::text::TextSpan;
use ilang_core::value::TypeSymbol;
use std::fmt;

/// Which stage of the pipeline produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Lexical,
    Syntactic,
    Semantic,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Lexical => write!(f, "lexical"),
            DiagnosticCategory::Syntactic => write!(f, "syntactic"),
            DiagnosticCategory::Semantic => write!(f, "semantic"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 1001, 3004).
    pub code: u32,
    /// The category of this diagnostic.
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The source text span this diagnostic points at.
    pub span: TextSpan,
    /// The resolved message text.
    pub message_text: String,
    /// The diagnostic code.
    pub code: u32,
    /// The category.
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    /// Create a new diagnostic at `span`.
    pub fn new(span: TextSpan, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            span,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message_text)
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// An ordered collection of diagnostics. Never deduplicated.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    fn report(&mut self, span: TextSpan, message: &DiagnosticMessage, args: &[&str]) {
        self.add(Diagnostic::new(span, message, args));
    }

    // ========================================================================
    // Lexical
    // ========================================================================

    pub fn report_bad_character(&mut self, position: u32, character: char) {
        let text = character.to_string();
        self.report(TextSpan::new(position, 1), &messages::BAD_CHARACTER, &[&text]);
    }

    pub fn report_invalid_number(&mut self, span: TextSpan, text: &str, ty: TypeSymbol) {
        self.report(span, &messages::INVALID_NUMBER, &[text, ty.name()]);
    }

    // ========================================================================
    // Syntactic
    // ========================================================================

    pub fn report_unexpected_token(
        &mut self,
        span: TextSpan,
        actual: impl fmt::Display,
        expected: impl fmt::Display,
    ) {
        let actual = actual.to_string();
        let expected = expected.to_string();
        self.report(span, &messages::UNEXPECTED_TOKEN, &[&actual, &expected]);
    }

    // ========================================================================
    // Semantic
    // ========================================================================

    pub fn report_undefined_name(&mut self, span: TextSpan, name: &str) {
        self.report(span, &messages::UNDEFINED_NAME, &[name]);
    }

    pub fn report_variable_already_declared(&mut self, span: TextSpan, name: &str) {
        self.report(span, &messages::VARIABLE_ALREADY_DECLARED, &[name]);
    }

    pub fn report_cannot_assign(&mut self, span: TextSpan, name: &str) {
        self.report(span, &messages::CANNOT_ASSIGN_READ_ONLY, &[name]);
    }

    pub fn report_cannot_convert(&mut self, span: TextSpan, from: TypeSymbol, to: TypeSymbol) {
        self.report(span, &messages::CANNOT_CONVERT, &[from.name(), to.name()]);
    }

    pub fn report_undefined_unary_operator(
        &mut self,
        span: TextSpan,
        operator_text: &str,
        operand_type: TypeSymbol,
    ) {
        self.report(
            span,
            &messages::UNDEFINED_UNARY_OPERATOR,
            &[operator_text, operand_type.name()],
        );
    }

    pub fn report_undefined_binary_operator(
        &mut self,
        span: TextSpan,
        operator_text: &str,
        left_type: TypeSymbol,
        right_type: TypeSymbol,
    ) {
        self.report(
            span,
            &messages::UNDEFINED_BINARY_OPERATOR,
            &[operator_text, left_type.name(), right_type.name()],
        );
    }
}

impl<'c> IntoIterator for &'c DiagnosticCollection {
    type Item = &'c Diagnostic;
    type IntoIter = std::slice::Iter<'c, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, $category:ident, $msg:expr) => {
            DiagnosticMessage {
                code: $code,
                category: DiagnosticCategory::$category,
                message: $msg,
            }
        };
    }

    // Lexical (1000-1999)
    pub const BAD_CHARACTER: DiagnosticMessage = diag!(1001, Lexical, "Error: bad character in input '{0}'");
    pub const INVALID_NUMBER: DiagnosticMessage = diag!(1002, Lexical, "Error: The number {0} is not a valid {1}");

    // Syntactic (2000-2999)
    pub const UNEXPECTED_TOKEN: DiagnosticMessage = diag!(2001, Syntactic, "Error: Unexpected token <{0}>, expected <{1}>");

    // Semantic (3000-3999)
    pub const UNDEFINED_NAME: DiagnosticMessage = diag!(3001, Semantic, "Error: Variable '{0}' is not defined");
    pub const VARIABLE_ALREADY_DECLARED: DiagnosticMessage = diag!(3002, Semantic, "Error: Variable '{0}' is already declared");
    pub const CANNOT_ASSIGN_READ_ONLY: DiagnosticMessage = diag!(3003, Semantic, "Error: Variable '{0}' is read-only and cannot be assigned to");
    pub const CANNOT_CONVERT: DiagnosticMessage = diag!(3004, Semantic, "Error: Cannot convert type {0} to {1}");
    pub const UNDEFINED_UNARY_OPERATOR: DiagnosticMessage = diag!(3005, Semantic, "Error: Unary operator '{0}' is not defined for type {1}");
    pub const UNDEFINED_BINARY_OPERATOR: DiagnosticMessage = diag!(3006, Semantic, "Error: Binary operator '{0}' is not defined for types {1} and {2}");
}
