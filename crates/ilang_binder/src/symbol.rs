//! Variable and label symbols.

use ilang_core::value::TypeSymbol;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_VARIABLE_ID: AtomicU64 = AtomicU64::new(0);

/// A named variable with a fixed static type.
///
/// Every call to [`VariableSymbol::new`] creates a distinct variable, even
/// when another one with the same name and type exists. Clones denote the
/// same variable, so a symbol found by scope lookup addresses the slot of
/// its declaration.
#[derive(Debug, Clone)]
pub struct VariableSymbol {
    id: u64,
    name: String,
    read_only: bool,
    ty: TypeSymbol,
}

impl VariableSymbol {
    pub fn new(name: impl Into<String>, read_only: bool, ty: TypeSymbol) -> Self {
        Self {
            id: NEXT_VARIABLE_ID.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
            read_only,
            ty,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn ty(&self) -> TypeSymbol {
        self.ty
    }
}

impl PartialEq for VariableSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for VariableSymbol {}

impl Hash for VariableSymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for VariableSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A jump target in the lowered program.
///
/// Labels are created by the lowerer with names unique within one lowering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelSymbol {
    name: String,
}

impl LabelSymbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for LabelSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
