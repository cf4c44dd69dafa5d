//! Match record produced by a search.
//!
//! A [`Match`] is created only once a candidate has been fully validated
//! against a query. It is never mutated afterwards.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::span::{Position, Span};

/// A validated, located occurrence of a query in a file.
///
/// # Example
///
/// ```
/// use camino::Utf8PathBuf;
/// use shapeseek_core::{Match, Position, Span};
///
/// let span = Span::new(Position::new(1, 1, 0), Position::new(1, 6, 5));
/// let m = Match::new(Utf8PathBuf::from("src/app.ts"), span, String::from("foo()"));
/// assert_eq!(m.code(), "foo()");
/// assert_eq!(m.start().line(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Path of the file containing the match.
    pub file_path: Utf8PathBuf,
    /// Start of the matched region (inclusive).
    pub start: Position,
    /// End of the matched region (exclusive).
    pub end: Position,
    /// Exact source text of the matched region.
    pub code: String,
}

impl Match {
    /// Creates a match record for `span` in `file_path`.
    #[must_use]
    pub const fn new(file_path: Utf8PathBuf, span: Span, code: String) -> Self {
        Self {
            file_path,
            start: span.start,
            end: span.end,
            code,
        }
    }

    /// Returns the path of the file containing the match.
    #[must_use]
    pub fn file_path(&self) -> &Utf8Path {
        &self.file_path
    }

    /// Returns the start position.
    #[must_use]
    pub const fn start(&self) -> &Position {
        &self.start
    }

    /// Returns the end position.
    #[must_use]
    pub const fn end(&self) -> &Position {
        &self.end
    }

    /// Returns the matched region as a span.
    #[must_use]
    pub const fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    /// Returns the matched source text.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }
}
