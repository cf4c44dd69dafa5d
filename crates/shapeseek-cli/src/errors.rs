//! Error types for the CLI runtime.

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to read configuration {path}: {source}")]
    ReadConfig { path: Utf8PathBuf, source: io::Error },
    #[error("failed to parse configuration {path}: {source}")]
    ParseConfig {
        path: Utf8PathBuf,
        source: Box<toml::de::Error>,
    },
    #[error("failed to read query file {path}: {source}")]
    ReadQuery { path: Utf8PathBuf, source: io::Error },
    #[error("no queries given; pass --query or --query-file")]
    NoQueries,
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("failed to serialise results: {0}")]
    SerialiseResults(serde_json::Error),
    #[error("failed to write results: {0}")]
    WriteResults(#[from] io::Error),
}
