//! ilang_binder: Name resolution, type checking and the bound tree.
//!
//! The binder walks a syntax tree inside a chain of scopes, resolving every
//! name to a `VariableSymbol` and every operator to an entry of the fixed
//! operator tables. The result is an immutable, typed bound tree plus the
//! semantic diagnostics found along the way.

mod binder;
pub mod bound_tree;
mod global_scope;
pub mod operators;
mod scope;
mod symbol;

pub use binder::Binder;
pub use bound_tree::{BoundExpression, BoundNodeKind, BoundStatement};
pub use global_scope::BoundGlobalScope;
pub use operators::{
    BoundBinaryOperator, BoundBinaryOperatorKind, BoundUnaryOperator, BoundUnaryOperatorKind,
};
pub use scope::BoundScope;
pub use symbol::{LabelSymbol, VariableSymbol};
