//! ilc: The ILang read-eval-print loop.
//!
//! Usage:
//!   ilc [options]
//!   ilc --eval <TEXT>

mod render;
mod repl;

use bumpalo::Bump;
use clap::Parser as ClapParser;
use miette::Result;
use repl::{Repl, ReplOptions};
use std::io::{self, IsTerminal};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(ClapParser, Debug)]
#[command(name = "ilc", about = "Evaluate ILang submissions interactively")]
struct Cli {
    /// Print the parse tree of every submission.
    #[arg(long)]
    show_tree: bool,

    /// Print the lowered program of every submission.
    #[arg(long)]
    show_program: bool,

    /// Evaluate one submission and exit.
    #[arg(short = 'e', long = "eval", value_name = "TEXT")]
    eval: Option<String>,

    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let options = ReplOptions {
        show_tree: cli.show_tree,
        show_program: cli.show_program,
        use_color: !cli.no_color && stdout.is_terminal(),
        interactive: cli.eval.is_none() && stdin.is_terminal(),
    };

    let arena = Bump::new();
    let mut repl = Repl::new(&arena, options, stdout.lock());
    match cli.eval {
        Some(text) => repl.evaluate_submission(&text)?,
        None => repl.run(stdin.lock())?,
    }
    Ok(())
}

/// RUST_LOG selects the level; warnings and errors only by default.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
