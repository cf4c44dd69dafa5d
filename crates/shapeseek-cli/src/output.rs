//! Rendering of search results.
//!
//! JSON output carries matches, errors and hints in one document on stdout.
//! Human output lists matches on stdout and reports errors and hints on
//! stderr so the match listing stays easy to pipe.

use std::io::Write;

use clap::ValueEnum;
use serde::Deserialize;
use shapeseek_core::{Match, SearchResults};

use crate::errors::AppError;

/// Output format selection for search results.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Locations followed by the matched code.
    #[default]
    Human,
    /// The full result set as pretty-printed JSON.
    Json,
}

pub(crate) fn render<W, E>(
    results: &SearchResults,
    format: OutputFormat,
    stdout: &mut W,
    stderr: &mut E,
) -> Result<(), AppError>
where
    W: Write,
    E: Write,
{
    match format {
        OutputFormat::Json => render_json(results, stdout),
        OutputFormat::Human => {
            render_matches(&results.matches, stdout)?;
            render_diagnostics(results, stderr)
        }
    }
}

fn render_json<W: Write>(results: &SearchResults, stdout: &mut W) -> Result<(), AppError> {
    serde_json::to_writer_pretty(&mut *stdout, results).map_err(AppError::SerialiseResults)?;
    stdout.write_all(b"\n")?;
    stdout.flush()?;
    Ok(())
}

fn render_matches<W: Write>(matches: &[Match], stdout: &mut W) -> Result<(), AppError> {
    for found in matches {
        let (start, end) = (found.start(), found.end());
        writeln!(
            stdout,
            "{}:{}:{}-{}:{}",
            found.file_path(),
            start.line,
            start.column,
            end.line,
            end.column
        )?;
        for line in found.code().lines() {
            writeln!(stdout, "    {line}")?;
        }
    }
    let mut files: Vec<_> = matches.iter().map(Match::file_path).collect();
    files.dedup();
    writeln!(
        stdout,
        "{} {} in {} {}",
        matches.len(),
        plural(matches.len(), "match", "matches"),
        files.len(),
        plural(files.len(), "file", "files")
    )?;
    stdout.flush()?;
    Ok(())
}

fn render_diagnostics<E: Write>(results: &SearchResults, stderr: &mut E) -> Result<(), AppError> {
    for error in &results.errors {
        writeln!(stderr, "error: {error}")?;
    }
    for (index, hints) in results.hints.iter().enumerate() {
        for hint in hints {
            writeln!(stderr, "hint: query #{index}: {}", hint.message())?;
        }
    }
    Ok(())
}

const fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
