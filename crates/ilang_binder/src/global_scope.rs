//! The bound result of one compilation unit.

use crate::bound_tree::BoundStatement;
use crate::symbol::VariableSymbol;
use ilang_diagnostics::Diagnostic;
use std::sync::Arc;

/// Everything the binder produced for one submission, linked to the result
/// of the submission before it.
#[derive(Debug)]
pub struct BoundGlobalScope {
    previous: Option<Arc<BoundGlobalScope>>,
    diagnostics: Vec<Diagnostic>,
    variables: Vec<VariableSymbol>,
    statement: Arc<BoundStatement>,
}

impl BoundGlobalScope {
    pub fn new(
        previous: Option<Arc<BoundGlobalScope>>,
        diagnostics: Vec<Diagnostic>,
        variables: Vec<VariableSymbol>,
        statement: Arc<BoundStatement>,
    ) -> Self {
        Self {
            previous,
            diagnostics,
            variables,
            statement,
        }
    }

    pub fn previous(&self) -> Option<&Arc<BoundGlobalScope>> {
        self.previous.as_ref()
    }

    /// Semantic diagnostics of this submission only.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Variables declared at the top level of this submission, sorted by name.
    pub fn variables(&self) -> &[VariableSymbol] {
        &self.variables
    }

    pub fn statement(&self) -> &Arc<BoundStatement> {
        &self.statement
    }

    /// This scope followed by every previous one, newest first.
    pub fn chain(&self) -> impl Iterator<Item = &BoundGlobalScope> {
        std::iter::successors(Some(self), |scope| scope.previous.as_deref())
    }
}
