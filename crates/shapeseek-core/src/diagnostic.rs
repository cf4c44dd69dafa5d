//! Query hints and structured error records.
//!
//! Search never fails as a whole because of a single bad file. Failures are
//! reported as [`SearchErrorRecord`] values alongside any matches, and
//! advisory [`Hint`]s are attached to each compiled query.

use std::fmt;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Category of an advisory query hint.
///
/// # Example
///
/// ```
/// use shapeseek_core::HintKind;
///
/// assert_eq!(HintKind::MultipleStatements.to_string(), "multiple-statements");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum HintKind {
    /// The query is a lone `$`, which only matches identifiers.
    IdentifierWildcardOnly,
    /// The query holds several statements and is matched against statement
    /// sequences.
    MultipleStatements,
}

impl fmt::Display for HintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IdentifierWildcardOnly => f.write_str("identifier-wildcard-only"),
            Self::MultipleStatements => f.write_str("multiple-statements"),
        }
    }
}

/// Advisory feedback about how a query will be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    kind: HintKind,
    message: String,
}

impl Hint {
    /// Creates a hint.
    #[must_use]
    pub const fn new(kind: HintKind, message: String) -> Self {
        Self { kind, message }
    }

    /// Hint for a query consisting only of the identifier wildcard.
    #[must_use]
    pub fn identifier_wildcard_only() -> Self {
        Self::new(
            HintKind::IdentifierWildcardOnly,
            String::from("`$` matches identifiers only; use `$$` to match any node"),
        )
    }

    /// Hint for a multi-statement query.
    #[must_use]
    pub fn multiple_statements(count: usize) -> Self {
        Self::new(
            HintKind::MultipleStatements,
            format!("query has {count} statements and is matched against statement sequences"),
        )
    }

    /// Returns the hint category.
    #[must_use]
    pub const fn kind(&self) -> HintKind {
        self.kind
    }

    /// Returns the hint text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A failure recorded during a search.
///
/// # Example
///
/// ```
/// use camino::Utf8PathBuf;
/// use shapeseek_core::SearchErrorRecord;
///
/// let record = SearchErrorRecord::file(Utf8PathBuf::from("a.py"), "parse error at 1:4");
/// assert_eq!(record.to_string(), "a.py: parse error at 1:4");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchErrorRecord {
    /// A file could not be read, parsed or searched.
    File {
        /// Path of the failing file.
        path: Utf8PathBuf,
        /// Description of the failure.
        message: String,
    },
    /// A query could not be compiled.
    Query {
        /// Zero-based index of the query in the input list.
        index: usize,
        /// Description of the failure.
        message: String,
        /// One-based line of the failure within the query, if known.
        line: Option<u32>,
        /// One-based column of the failure within the query, if known.
        column: Option<u32>,
    },
}

impl SearchErrorRecord {
    /// Creates a file-level record.
    #[must_use]
    pub fn file(path: Utf8PathBuf, message: impl Into<String>) -> Self {
        Self::File {
            path,
            message: message.into(),
        }
    }

    /// Creates a query-level record.
    #[must_use]
    pub fn query(
        index: usize,
        message: impl Into<String>,
        line: Option<u32>,
        column: Option<u32>,
    ) -> Self {
        Self::Query {
            index,
            message: message.into(),
            line,
            column,
        }
    }

    /// Returns the failure description.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::File { message, .. } | Self::Query { message, .. } => message,
        }
    }
}

impl fmt::Display for SearchErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File { path, message } => write!(f, "{path}: {message}"),
            Self::Query {
                index,
                message,
                line: Some(line),
                column: Some(column),
            } => write!(f, "query #{index} at {line}:{column}: {message}"),
            Self::Query { index, message, .. } => write!(f, "query #{index}: {message}"),
        }
    }
}
