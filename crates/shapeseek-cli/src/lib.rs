//! Command-line interface runtime for shapeseek.
//!
//! The runner parses arguments, merges them with the optional TOML
//! configuration file, installs telemetry, expands the search paths and hands
//! everything to [`shapeseek_syntax::Searcher`]. IO streams are injected so
//! the whole flow can be exercised from tests.
//!
//! Exit status is success whenever every query compiled, even if individual
//! files failed to parse; those failures are reported alongside the matches.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use camino::Utf8Path;
use clap::Parser;
use clap::error::ErrorKind;
use shapeseek_core::{SearchErrorRecord, SearchResults};
use shapeseek_syntax::Searcher;
use tracing::debug;

mod cli;
mod config;
mod errors;
mod files;
mod output;
mod telemetry;

use cli::Cli;
use config::{FileConfig, ResolvedConfig};
use errors::AppError;
pub use output::OutputFormat;
pub use telemetry::LogFormat;

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let result = Cli::try_parse_from(args)
        .map_err(AppError::CliUsage)
        .and_then(|cli| execute(&cli, stdout, stderr));

    match result {
        Ok(exit_code) => exit_code,
        Err(AppError::CliUsage(error)) if is_informational(&error) => {
            let _ = write!(stdout, "{error}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            let _ = writeln!(stderr, "{}", error.to_string().trim_end());
            ExitCode::FAILURE
        }
    }
}

fn execute<W, E>(cli: &Cli, stdout: &mut W, stderr: &mut E) -> Result<ExitCode, AppError>
where
    W: Write,
    E: Write,
{
    let file_config = FileConfig::load(cli.config.as_deref(), Utf8Path::new("."))?;
    let config = ResolvedConfig::resolve(cli, file_config);
    telemetry::initialise(&config.telemetry)?;

    let queries = cli.collect_queries()?;
    let files = files::collect_files(&cli.paths, config.settings.language());
    debug!(
        queries = queries.len(),
        files = files.len(),
        mode = %config.settings.mode(),
        "starting search"
    );

    let mut searcher = Searcher::new(config.settings);
    let results = searcher.search_files(&files, &queries);
    output::render(&results, config.format, stdout, stderr)?;
    Ok(exit_code(&results))
}

fn exit_code(results: &SearchResults) -> ExitCode {
    let query_failed = results
        .errors
        .iter()
        .any(|error| matches!(error, SearchErrorRecord::Query { .. }));
    if query_failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn is_informational(error: &clap::Error) -> bool {
    matches!(error.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn run_with(args: &[&str]) -> (String, String) {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let argv = std::iter::once("shapeseek")
            .chain(args.iter().copied())
            .map(OsString::from);
        let _ = run(argv, &mut stdout, &mut stderr);
        (
            String::from_utf8(stdout).expect("utf-8 stdout"),
            String::from_utf8(stderr).expect("utf-8 stderr"),
        )
    }

    #[test]
    fn help_is_written_to_stdout() {
        let (stdout, stderr) = run_with(&["--help"]);
        assert!(stdout.contains("Usage: shapeseek"));
        assert!(stderr.is_empty());
    }

    #[test]
    fn usage_errors_are_written_to_stderr() {
        let (stdout, stderr) = run_with(&["--no-such-flag", "."]);
        assert!(stdout.is_empty());
        assert!(stderr.contains("--no-such-flag"));
    }

    #[test]
    fn searches_injected_paths() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = dir.path().join("calls.py");
        fs::write(&source, "print(1)\nlog(2)\nprint(3, 4)\n").expect("write source");
        let path = source.to_str().expect("utf-8 path");

        let (stdout, _) = run_with(&["-l", "python", "-q", "print($$$)", path]);

        assert!(stdout.ends_with("2 matches in 1 file\n"), "{stdout}");
    }

    #[test]
    fn broken_queries_are_reported_on_stderr() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = dir.path().join("a.ts");
        fs::write(&source, "f();").expect("write source");
        let path = source.to_str().expect("utf-8 path");

        let (_, stderr) = run_with(&["-q", "f(", path]);

        assert!(stderr.starts_with("error: query #0"), "{stderr}");
    }
}
