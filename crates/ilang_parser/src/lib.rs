//! ilang_parser: Recursive descent parser for ILang.
//!
//! Parses the scanner's token stream into an arena-allocated syntax tree.
//! Parsing always completes: missing tokens are reported and synthesized
//! with zero width.

mod parser;
pub mod precedence;
mod syntax_tree;

pub use parser::Parser;
pub use syntax_tree::SyntaxTree;
