//! Error types for parsing, query compilation and matching.
//!
//! Every fallible operation in `shapeseek-syntax` returns a [`SyntaxError`].
//! The search orchestrator converts these into
//! [`SearchErrorRecord`](shapeseek_core::SearchErrorRecord) values so a single
//! failing file never aborts a search.

use camino::Utf8PathBuf;
use shapeseek_core::SupportedLanguage;
use thiserror::Error;

/// Errors from structural search operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyntaxError {
    /// The grammar or its node metadata could not be loaded.
    #[error("failed to initialise {language} adapter: {message}")]
    AdapterInit {
        /// The language whose adapter failed to initialise.
        language: SupportedLanguage,
        /// Description of the failure.
        message: String,
    },

    /// Source text or query text is not syntactically valid.
    #[error("{message}")]
    Parse {
        /// The language the text was parsed as.
        language: SupportedLanguage,
        /// One-based line where the first error starts.
        line: u32,
        /// One-based column where the first error starts.
        column: u32,
        /// Description including the error range.
        message: String,
    },

    /// A query contained no comparable statements.
    #[error("query is empty")]
    EmptyQuery,

    /// The comparator produced work lists of different shapes for a file
    /// node and a query node.
    #[error("validator invariant violated comparing {file_kind} with {query_kind}: {message}")]
    ValidatorInvariant {
        /// Kind of the file node.
        file_kind: String,
        /// Kind of the query node.
        query_kind: String,
        /// Description of the mismatch.
        message: String,
    },

    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path of the unreadable file.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A text-mode query could not be turned into a regular expression.
    #[error("invalid text query: {message}")]
    InvalidTextQuery {
        /// Description of the failure.
        message: String,
    },
}

impl SyntaxError {
    /// Creates an adapter initialisation error.
    #[must_use]
    pub fn adapter_init(language: SupportedLanguage, message: impl Into<String>) -> Self {
        Self::AdapterInit {
            language,
            message: message.into(),
        }
    }

    /// Creates a parse error at a one-based location.
    #[must_use]
    pub fn parse(
        language: SupportedLanguage,
        line: u32,
        column: u32,
        message: impl Into<String>,
    ) -> Self {
        Self::Parse {
            language,
            line,
            column,
            message: message.into(),
        }
    }

    /// Creates a validator invariant error.
    #[must_use]
    pub fn validator_invariant(
        file_kind: impl Into<String>,
        query_kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::ValidatorInvariant {
            file_kind: file_kind.into(),
            query_kind: query_kind.into(),
            message: message.into(),
        }
    }

    /// Creates an I/O error for `path`.
    #[must_use]
    pub const fn io(path: Utf8PathBuf, source: std::io::Error) -> Self {
        Self::Io { path, source }
    }

    /// Creates an invalid text query error.
    #[must_use]
    pub fn invalid_text_query(message: impl Into<String>) -> Self {
        Self::InvalidTextQuery {
            message: message.into(),
        }
    }

    /// Returns the one-based `(line, column)` of a parse error.
    #[must_use]
    pub const fn location(&self) -> Option<(u32, u32)> {
        match self {
            Self::Parse { line, column, .. } => Some((*line, *column)),
            _ => None,
        }
    }
}
