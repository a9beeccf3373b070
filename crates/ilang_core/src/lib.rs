//! ilang_core: Core utilities shared by every stage of the ILang pipeline.
//!
//! Provides text spans and line lookup for diagnostics, and the small value
//! domain (`Int32` / `Boolean`) the language computes over.

pub mod text;
pub mod value;

// Re-export commonly used types
pub use text::{LineMap, TextSpan};
pub use value::{TypeSymbol, Value};
