//! ilang_evaluator: Execution of lowered programs.
//!
//! Runs the flat statement list produced by the lowerer against a variable
//! store owned by the caller. Control flow is an instruction pointer over
//! the list; labels are resolved to indices before the first statement runs.

mod evaluator;

pub use evaluator::{Evaluator, Variables};
