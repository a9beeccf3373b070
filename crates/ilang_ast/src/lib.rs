//! ilang_ast: Syntax tree definitions for ILang.
//!
//! Defines the `SyntaxKind` enum, the token type, and the statement and
//! expression node types produced by the parser. Nodes reference their
//! children through arena-allocated references.

pub mod node;
pub mod syntax_kind;
pub mod visitor;

// Re-export key types
pub use node::*;
pub use syntax_kind::SyntaxKind;
pub use visitor::SyntaxNode;
