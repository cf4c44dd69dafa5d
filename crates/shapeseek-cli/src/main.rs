//! CLI entrypoint for the shapeseek structural search tool.
//!
//! The binary delegates to [`shapeseek_cli::run`], which parses arguments,
//! loads configuration, runs the search and renders the results.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    shapeseek_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
