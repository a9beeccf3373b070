//! Scope management for the binder.

use crate::symbol::VariableSymbol;
use rustc_hash::FxHashMap;

/// A scope in the binding phase. Scopes form a chain from inner to outer.
///
/// A child scope borrows its parent, so scopes live on the binder's stack
/// and are dropped when the block, loop body or submission that opened them
/// is done.
#[derive(Debug, Default)]
pub struct BoundScope<'p> {
    /// The enclosing scope (None for the outermost scope).
    parent: Option<&'p BoundScope<'p>>,
    /// The variables declared directly in this scope.
    variables: FxHashMap<String, VariableSymbol>,
}

impl<'p> BoundScope<'p> {
    pub fn new(parent: Option<&'p BoundScope<'p>>) -> Self {
        Self {
            parent,
            variables: FxHashMap::default(),
        }
    }

    /// Declare `variable` in this scope. Returns false if the name is already
    /// declared here; declarations in enclosing scopes are shadowed.
    pub fn try_declare(&mut self, variable: VariableSymbol) -> bool {
        if self.variables.contains_key(variable.name()) {
            return false;
        }
        self.variables.insert(variable.name().to_string(), variable);
        true
    }

    /// Resolve `name` in this scope, then outward. The nearest declaration wins.
    pub fn try_lookup(&self, name: &str) -> Option<VariableSymbol> {
        let mut scope = Some(self);
        while let Some(current) = scope {
            if let Some(variable) = current.variables.get(name) {
                return Some(variable.clone());
            }
            scope = current.parent;
        }
        None
    }

    /// The variables declared directly in this scope, sorted by name.
    pub fn declared_variables(&self) -> Vec<VariableSymbol> {
        let mut variables: Vec<_> = self.variables.values().cloned().collect();
        variables.sort_by(|a, b| a.name().cmp(b.name()));
        variables
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ilang_core::value::TypeSymbol;

    fn int(name: &str) -> VariableSymbol {
        VariableSymbol::new(name, false, TypeSymbol::Int32)
    }

    #[test]
    fn test_declare_twice_in_same_scope() {
        let mut scope = BoundScope::new(None);
        assert!(scope.try_declare(int("a")));
        assert!(!scope.try_declare(VariableSymbol::new("a", true, TypeSymbol::Boolean)));
        assert_eq!(scope.try_lookup("a").unwrap().ty(), TypeSymbol::Int32);
    }

    #[test]
    fn test_child_shadows_parent() {
        let mut parent = BoundScope::new(None);
        parent.try_declare(int("a"));
        parent.try_declare(int("b"));

        let mut child = BoundScope::new(Some(&parent));
        assert!(child.try_declare(VariableSymbol::new("a", true, TypeSymbol::Boolean)));
        assert_eq!(child.try_lookup("a").unwrap().ty(), TypeSymbol::Boolean);
        assert_eq!(child.try_lookup("b").unwrap().ty(), TypeSymbol::Int32);
        assert!(child.try_lookup("c").is_none());
        assert_eq!(parent.try_lookup("a").unwrap().ty(), TypeSymbol::Int32);
    }

    #[test]
    fn test_declared_variables_sorted_and_local_only() {
        let mut parent = BoundScope::new(None);
        parent.try_declare(int("outer"));
        let mut child = BoundScope::new(Some(&parent));
        child.try_declare(int("zeta"));
        child.try_declare(int("alpha"));
        child.try_declare(int("mid"));

        let names: Vec<_> = child
            .declared_variables()
            .iter()
            .map(|v| v.name().to_string())
            .collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }
}
