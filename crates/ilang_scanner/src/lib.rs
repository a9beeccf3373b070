//! ilang_scanner: Lexer for ILang source text.
//!
//! Produces tokens for integer literals, identifiers, keywords and the fixed
//! operator and bracket set. Whitespace is skipped; characters outside the
//! language are reported and skipped.

mod scanner;
mod token;

pub use scanner::{tokenize, Scanner};
pub use token::TokenInfo;
