//! ilang_transformers: Bound tree transformations.
//!
//! - `BoundTreeRewriter`: a structural rewrite over the bound tree with an
//!   identity default for every node kind
//! - `Lowerer`: rewrites `if`, `while` and `for` into labels and gotos
//! - `flatten`: inlines nested blocks into one statement sequence

mod flatten;
mod lowerer;
mod rewriter;

pub use flatten::flatten;
pub use lowerer::Lowerer;
pub use rewriter::BoundTreeRewriter;
