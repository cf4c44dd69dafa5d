//! Matching strictness modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How strictly a query must agree with the code it matches.
///
/// The structural modes form a strictness ordering: anything matched under
/// [`Exact`](Self::Exact) also matches under
/// [`IncludeWithOrder`](Self::IncludeWithOrder), and anything matched under
/// that also matches under [`Include`](Self::Include).
///
/// # Example
///
/// ```
/// use shapeseek_core::Mode;
///
/// assert_eq!(Mode::IncludeWithOrder.to_string(), "include-with-order");
/// assert!(Mode::Exact.is_structural());
/// assert!(!Mode::Text.is_structural());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Sequences must agree element for element; no extra fields are
    /// tolerated in the file.
    Exact,
    /// The query is a structural subset of the file; sequence order is
    /// ignored.
    #[default]
    Include,
    /// Like [`Include`](Self::Include), but matched sibling elements must
    /// appear in query order.
    IncludeWithOrder,
    /// Plain text search that bypasses the syntax tree entirely.
    Text,
}

impl Mode {
    /// Returns the kebab-case identifier for this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Include => "include",
            Self::IncludeWithOrder => "include-with-order",
            Self::Text => "text",
        }
    }

    /// Returns `true` for modes that compare syntax trees.
    #[must_use]
    pub const fn is_structural(self) -> bool {
        !matches!(self, Self::Text)
    }

    /// Returns all modes.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Exact, Self::Include, Self::IncludeWithOrder, Self::Text]
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when parsing a mode identifier fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported mode: '{0}'")]
pub struct ModeParseError(String);

impl ModeParseError {
    /// Returns the input that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.0
    }
}

impl FromStr for Mode {
    type Err = ModeParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalised = input.trim().to_ascii_lowercase().replace('_', "-");
        match normalised.as_str() {
            "exact" => Ok(Self::Exact),
            "include" => Ok(Self::Include),
            "include-with-order" | "ordered" => Ok(Self::IncludeWithOrder),
            "text" => Ok(Self::Text),
            other => Err(ModeParseError(other.to_owned())),
        }
    }
}
