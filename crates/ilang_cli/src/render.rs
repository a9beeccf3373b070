//! Diagnostic rendering for the terminal.

use ilang_core::text::TextSpan;
use ilang_diagnostics::Diagnostic;
use ilang_parser::SyntaxTree;
use std::io::{self, Write};

// ANSI color codes
pub const RED: &str = "\x1b[31m";
pub const DARK_RED: &str = "\x1b[2;31m";
pub const MAGENTA: &str = "\x1b[35m";
pub const GRAY: &str = "\x1b[90m";
pub const RESET: &str = "\x1b[0m";

/// Picks escape codes, or nothing when color is off.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn paint(&self, code: &'static str) -> &'static str {
        if self.enabled {
            code
        } else {
            ""
        }
    }

    pub fn reset(&self) -> &'static str {
        self.paint(RESET)
    }
}

/// Write each diagnostic as `(line:col) message`, followed by its source
/// line with the offending text highlighted.
pub fn write_diagnostics(
    out: &mut impl Write,
    tree: &SyntaxTree<'_>,
    diagnostics: &[Diagnostic],
    palette: Palette,
) -> io::Result<()> {
    let text = tree.text();
    let line_map = tree.line_map();

    for diagnostic in diagnostics {
        let position = line_map.line_and_column_of(diagnostic.span.start);
        let line = line_map.line_span(position.line);

        writeln!(
            out,
            "{}({}:{}) {}{}{}",
            palette.paint(GRAY),
            position.line + 1,
            position.character + 1,
            palette.paint(DARK_RED),
            diagnostic,
            palette.reset(),
        )?;

        // A span running past the end of its line is cut there.
        let error_end = diagnostic.span.end().min(line.end()).max(diagnostic.span.start);
        let prefix = TextSpan::from_bounds(line.start, diagnostic.span.start).slice(text);
        let error = TextSpan::from_bounds(diagnostic.span.start, error_end).slice(text);
        let suffix = TextSpan::from_bounds(error_end, line.end()).slice(text);

        writeln!(
            out,
            "    {}{}{}{}{}",
            prefix.trim_start(),
            palette.paint(RED),
            error,
            palette.reset(),
            suffix,
        )?;
    }
    writeln!(out)
}
