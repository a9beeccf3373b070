//! The submission loop.
//!
//! Lines are collected into a submission until it parses cleanly or a blank
//! line forces it through. A line starting with `#` at the start of a
//! submission is a meta command.

use crate::render::{self, Palette, GRAY, MAGENTA};
use bumpalo::Bump;
use ilang_compiler::{Compilation, Variables};
use ilang_parser::SyntaxTree;
use ilang_printer::TreePrinter;
use miette::Diagnostic;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Diagnostic)]
pub enum ReplError {
    #[error("failed to read a submission")]
    #[diagnostic(code(ilc::read))]
    Read(#[source] io::Error),

    #[error("failed to write output")]
    #[diagnostic(code(ilc::write))]
    Write(#[from] io::Error),

    #[error("failed to format the program")]
    #[diagnostic(code(ilc::format))]
    Format(#[from] fmt::Error),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReplOptions {
    pub show_tree: bool,
    pub show_program: bool,
    pub use_color: bool,
    /// Print prompts before each line.
    pub interactive: bool,
}

/// Session state: the compilation chain and the variable store.
///
/// Every submission's syntax tree lives in `arena` for the whole session,
/// since later compilations keep earlier ones alive.
pub struct Repl<'a, W: Write> {
    arena: &'a Bump,
    options: ReplOptions,
    palette: Palette,
    previous: Option<Arc<Compilation<'a>>>,
    variables: Variables,
    out: W,
}

enum Flow {
    Continue,
    Exit,
}

impl<'a, W: Write> Repl<'a, W> {
    pub fn new(arena: &'a Bump, options: ReplOptions, out: W) -> Self {
        Self {
            arena,
            options,
            palette: Palette::new(options.use_color),
            previous: None,
            variables: Variables::new(),
            out,
        }
    }

    /// Read submissions from `input` until end of input or `#exit`.
    pub fn run(&mut self, mut input: impl BufRead) -> Result<(), ReplError> {
        let mut submission = String::new();
        let mut line = String::new();

        loop {
            self.prompt(submission.is_empty())?;
            line.clear();
            if input.read_line(&mut line).map_err(ReplError::Read)? == 0 {
                if !submission.is_empty() {
                    self.evaluate_submission(&submission)?;
                }
                return Ok(());
            }
            let line = line.trim_end_matches(['\n', '\r']);

            if submission.is_empty() {
                if line.trim().is_empty() {
                    continue;
                }
                if line.starts_with('#') {
                    match self.evaluate_meta_command(line.trim())? {
                        Flow::Continue => continue,
                        Flow::Exit => return Ok(()),
                    }
                }
            } else {
                submission.push('\n');
            }
            submission.push_str(line);

            let force = line.trim().is_empty();
            if force || self.is_complete_submission(&submission) {
                self.evaluate_submission(&submission)?;
                submission.clear();
            }
        }
    }

    fn prompt(&mut self, first_line: bool) -> Result<(), ReplError> {
        if self.options.interactive {
            let marker = if first_line { "» " } else { "· " };
            write!(self.out, "{}", marker)?;
            self.out.flush()?;
        }
        Ok(())
    }

    fn is_complete_submission(&self, text: &str) -> bool {
        if text.is_empty() {
            return true;
        }
        let scratch = Bump::new();
        SyntaxTree::parse(&scratch, text).diagnostics().is_empty()
    }

    fn evaluate_meta_command(&mut self, input: &str) -> Result<Flow, ReplError> {
        match input {
            "#showTree" => {
                self.options.show_tree = !self.options.show_tree;
                let state = if self.options.show_tree { "Showing" } else { "Not showing" };
                writeln!(self.out, "{} parse tree\n", state)?;
            }
            "#showProgram" => {
                self.options.show_program = !self.options.show_program;
                let state = if self.options.show_program { "Showing" } else { "Not showing" };
                writeln!(self.out, "{} bound tree\n", state)?;
            }
            "#reset" => {
                self.previous = None;
                self.variables.clear();
                writeln!(self.out)?;
            }
            "#vars" => {
                for (variable, value) in &self.variables {
                    writeln!(self.out, "{}: {} = {}", variable, variable.ty(), value)?;
                }
                writeln!(self.out)?;
            }
            "#exit" => {
                writeln!(self.out, "{}Goodbye!{}\n", self.palette.paint(GRAY), self.palette.reset())?;
                return Ok(Flow::Exit);
            }
            _ => {
                writeln!(
                    self.out,
                    "{}Error: Invalid command {}{}\n",
                    self.palette.paint(render::DARK_RED),
                    input,
                    self.palette.reset()
                )?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Compile `text` on top of the previous submissions and run it.
    pub fn evaluate_submission(&mut self, text: &str) -> Result<(), ReplError> {
        let tree = SyntaxTree::parse(self.arena, text);
        let compilation = match &self.previous {
            Some(previous) => previous.continue_with(tree),
            None => Compilation::new(tree),
        };

        if self.options.show_tree {
            let dump = TreePrinter::new().print_syntax_tree(compilation.syntax_tree().root());
            writeln!(self.out, "{}Parse tree:", self.palette.paint(GRAY))?;
            write!(self.out, "{}", dump)?;
            if self.options.show_program {
                writeln!(self.out)?;
            }
            write!(self.out, "{}", self.palette.reset())?;
        }

        if self.options.show_program {
            let mut dump = String::new();
            compilation.emit_tree(&mut dump)?;
            writeln!(self.out, "{}Bound tree:", self.palette.paint(GRAY))?;
            write!(self.out, "{}{}", dump, self.palette.reset())?;
        }

        let result = compilation.evaluate(&mut self.variables);
        if result.diagnostics.is_empty() {
            if let Some(value) = result.value {
                writeln!(
                    self.out,
                    "{}{}{}",
                    self.palette.paint(MAGENTA),
                    value,
                    self.palette.reset()
                )?;
            }
            writeln!(self.out)?;
            debug!(variables = self.variables.len(), "submission accepted");
            self.previous = Some(Arc::new(compilation));
        } else {
            render::write_diagnostics(
                &mut self.out,
                compilation.syntax_tree(),
                &result.diagnostics,
                self.palette,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(input: &str) -> String {
        session_with(input, ReplOptions::default())
    }

    fn session_with(input: &str, options: ReplOptions) -> String {
        let arena = Bump::new();
        let mut out = Vec::new();
        Repl::new(&arena, options, &mut out)
            .run(Cursor::new(input))
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_single_line_submissions_chain() {
        assert_eq!(session("var x = 10\nx * 2\n"), "10\n\n20\n\n");
    }

    #[test]
    fn test_incomplete_submission_continues_on_next_line() {
        assert_eq!(session("{ var a = 2\na * 3\n}\n"), "6\n\n");
    }

    #[test]
    fn test_blank_line_forces_evaluation() {
        assert_eq!(
            session("{ var a = 2\n\n"),
            "(2:1) Error: Unexpected token <EndOfFileToken>, expected <CloseBraceToken>\n    \n\n"
        );
    }

    #[test]
    fn test_failed_submission_is_not_chained() {
        let output = session("var x = y\nx\n");
        assert!(output.starts_with("(1:9) Error: Variable 'y' is not defined\n"));
        assert!(output.ends_with("(1:1) Error: Variable 'x' is not defined\n    x\n\n"));
    }

    #[test]
    fn test_meta_commands() {
        assert_eq!(session("var a = 1\n#vars\n#reset\n#vars\n"), "1\n\na: Int32 = 1\n\n\n\n");
        assert_eq!(session("#exit\n1\n"), "Goodbye!\n\n");
        assert_eq!(session("#nope\n"), "Error: Invalid command #nope\n\n");
    }

    #[test]
    fn test_reset_drops_globals() {
        let output = session("var a = 1\n#reset\na\n");
        assert!(output.contains("Error: Variable 'a' is not defined"));
    }

    #[test]
    fn test_show_program_prints_lowered_tree() {
        let output = session("#showProgram\n1\n");
        assert_eq!(
            output,
            "Showing bound tree\n\nBound tree:\nBlockStatement\n└──ExpressionStatement\n   └──LiteralExpression : Value = 1, Type = Int32\n1\n\n"
        );
    }

    /// Accepts a fixed number of writes, then fails every write after.
    struct FailingWriter {
        remaining: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.remaining == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            self.remaining -= 1;
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_output_errors_are_reported() {
        let arena = Bump::new();
        let options = ReplOptions {
            show_program: true,
            ..ReplOptions::default()
        };
        let mut repl = Repl::new(&arena, options, FailingWriter { remaining: 0 });
        let error = repl.evaluate_submission("1 + 2").unwrap_err();
        assert!(matches!(error, ReplError::Write(_)));
        assert_eq!(error.to_string(), "failed to write output");
    }

    #[test]
    fn test_format_error_converts_to_repl_error() {
        let error = ReplError::from(fmt::Error);
        assert!(matches!(error, ReplError::Format(_)));
        assert_eq!(error.to_string(), "failed to format the program");
        assert_eq!(
            error.code().map(|code| code.to_string()),
            Some("ilc::format".to_string())
        );
    }

    #[test]
    fn test_show_tree_option() {
        let options = ReplOptions {
            show_tree: true,
            ..ReplOptions::default()
        };
        let output = session_with("true\n", options);
        assert_eq!(
            output,
            "Parse tree:\nCompilationUnit\n├──ExpressionStatement\n│  └──LiteralExpression\n│     └──True true\n└──EndOfFileToken\ntrue\n\n"
        );
    }
}
