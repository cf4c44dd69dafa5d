//! CLI argument definitions for shapeseek.

use std::fs;

use camino::Utf8PathBuf;
use clap::Parser;
use shapeseek_core::{Mode, SupportedLanguage};

use crate::errors::AppError;
use crate::output::OutputFormat;
use crate::telemetry::LogFormat;

/// Command-line interface for the shapeseek structural search tool.
///
/// Options left unset fall back to the configuration file and then to the
/// built-in defaults.
#[derive(Parser, Debug)]
#[command(
    name = "shapeseek",
    version,
    about = "Search source code by syntactic shape"
)]
pub(crate) struct Cli {
    /// Query pattern; repeat to search for several patterns at once.
    #[arg(short = 'q', long = "query", value_name = "PATTERN")]
    pub(crate) queries: Vec<String>,
    /// File holding one query pattern; may be repeated.
    #[arg(long = "query-file", value_name = "FILE")]
    pub(crate) query_files: Vec<Utf8PathBuf>,
    /// Matching mode: exact, include, include-with-order or text.
    #[arg(short, long, value_name = "MODE")]
    pub(crate) mode: Option<Mode>,
    /// Language of the queries and searched files.
    #[arg(short, long, value_name = "LANGUAGE")]
    pub(crate) language: Option<SupportedLanguage>,
    /// Fold case when comparing identifiers and literals.
    #[arg(short = 'i', long)]
    pub(crate) case_insensitive: bool,
    /// Maximum number of matches to report; `0` disables the limit.
    #[arg(long, value_name = "COUNT")]
    pub(crate) max_results: Option<usize>,
    /// Stop after the first file with results and trace matching steps.
    #[arg(long)]
    pub(crate) debug: bool,
    /// How results are written to stdout.
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub(crate) format: Option<OutputFormat>,
    /// Configuration file; defaults to `shapeseek.toml` when present.
    #[arg(long, value_name = "FILE")]
    pub(crate) config: Option<Utf8PathBuf>,
    /// Tracing filter directive, for example `shapeseek_syntax=debug`.
    #[arg(long, value_name = "FILTER")]
    pub(crate) log_filter: Option<String>,
    /// Log output format: json or compact.
    #[arg(long, value_name = "FORMAT")]
    pub(crate) log_format: Option<LogFormat>,
    /// Files or directories to search.
    #[arg(value_name = "PATHS", required = true)]
    pub(crate) paths: Vec<Utf8PathBuf>,
}

impl Cli {
    /// Collects inline queries followed by the contents of query files.
    pub(crate) fn collect_queries(&self) -> Result<Vec<String>, AppError> {
        let mut queries = self.queries.clone();
        for path in &self.query_files {
            let text = fs::read_to_string(path).map_err(|source| AppError::ReadQuery {
                path: path.clone(),
                source,
            })?;
            queries.push(text);
        }
        if queries.is_empty() {
            return Err(AppError::NoQueries);
        }
        Ok(queries)
    }
}
