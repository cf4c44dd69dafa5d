//! Configuration loading and precedence.
//!
//! Settings come from three layers: command-line flags, an optional TOML file
//! and built-in defaults, in that order of precedence. The file's keys mirror
//! the long flag names:
//!
//! ```toml
//! mode = "include-with-order"
//! language = "python"
//! case-insensitive = true
//! max-results = 500
//! format = "json"
//! log-filter = "shapeseek_syntax=debug"
//! log-format = "compact"
//! ```

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use shapeseek_core::{Mode, SearchSettings, SupportedLanguage};

use crate::cli::Cli;
use crate::errors::AppError;
use crate::output::OutputFormat;
use crate::telemetry::{DEBUG_LOG_FILTER, DEFAULT_LOG_FILTER, LogFormat, TelemetryConfig};

/// File name looked up in the working directory when `--config` is absent.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "shapeseek.toml";

/// Values read from a configuration file. Every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    pub(crate) mode: Option<Mode>,
    pub(crate) language: Option<SupportedLanguage>,
    pub(crate) case_insensitive: Option<bool>,
    pub(crate) max_results: Option<usize>,
    pub(crate) debug: Option<bool>,
    pub(crate) format: Option<OutputFormat>,
    pub(crate) log_filter: Option<String>,
    pub(crate) log_format: Option<LogFormat>,
}

impl FileConfig {
    /// Loads the explicit file, or `shapeseek.toml` inside `search_dir` when
    /// it exists.
    ///
    /// An explicit path must exist. A missing default file yields the empty
    /// configuration.
    pub(crate) fn load(
        explicit: Option<&Utf8Path>,
        search_dir: &Utf8Path,
    ) -> Result<Self, AppError> {
        if let Some(path) = explicit {
            return Self::read(path);
        }
        let path = search_dir.join(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::read(&path)
        } else {
            Ok(Self::default())
        }
    }

    fn read(path: &Utf8Path) -> Result<Self, AppError> {
        let contents = fs::read_to_string(path).map_err(|source| AppError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    fn parse(contents: &str, path: &Utf8Path) -> Result<Self, AppError> {
        toml::from_str(contents).map_err(|source| AppError::ParseConfig {
            path: Utf8PathBuf::from(path),
            source: Box::new(source),
        })
    }
}

/// Effective options after merging every layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedConfig {
    pub(crate) settings: SearchSettings,
    pub(crate) format: OutputFormat,
    pub(crate) telemetry: TelemetryConfig,
}

impl ResolvedConfig {
    /// Merges flags over file values over defaults.
    pub(crate) fn resolve(cli: &Cli, file: FileConfig) -> Self {
        let defaults = SearchSettings::default();
        let (default_mode, default_language) = (defaults.mode(), defaults.language());
        let default_limit = defaults.max_results();
        let max_results = cli
            .max_results
            .or(file.max_results)
            .map_or(default_limit, limit_from);
        let debug = cli.debug || file.debug.unwrap_or(false);

        let settings = defaults
            .with_mode(cli.mode.or(file.mode).unwrap_or(default_mode))
            .with_language(cli.language.or(file.language).unwrap_or(default_language))
            .with_case_insensitive(cli.case_insensitive || file.case_insensitive.unwrap_or(false))
            .with_debug(debug)
            .with_max_results(max_results);

        let filter = cli
            .log_filter
            .clone()
            .or(file.log_filter)
            .unwrap_or_else(|| String::from(default_filter(debug)));
        let telemetry = TelemetryConfig {
            filter,
            format: cli.log_format.or(file.log_format).unwrap_or_default(),
        };

        Self {
            settings,
            format: cli.format.or(file.format).unwrap_or_default(),
            telemetry,
        }
    }
}

/// Maps a configured limit to the search limit; zero means unlimited.
const fn limit_from(value: usize) -> Option<usize> {
    if value == 0 { None } else { Some(value) }
}

const fn default_filter(debug: bool) -> &'static str {
    if debug {
        DEBUG_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    }
}
