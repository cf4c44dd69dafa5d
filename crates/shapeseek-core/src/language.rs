//! Supported host language identifiers.

use std::fmt;
use std::str::FromStr;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A host language with a registered parser adapter.
///
/// The identifier selects the grammar, the wildcard encoding rules and the
/// node classification tables used for both queries and searched files.
///
/// # Example
///
/// ```
/// use shapeseek_core::SupportedLanguage;
///
/// let lang = SupportedLanguage::Python;
/// assert_eq!(format!("{lang}"), "python");
/// assert_eq!(SupportedLanguage::from_extension("tsx"), Some(SupportedLanguage::TypeScript));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedLanguage {
    /// JavaScript, TypeScript and JSX, parsed with the TSX grammar.
    #[default]
    TypeScript,
    /// The Python programming language.
    Python,
    /// The C# programming language.
    CSharp,
    /// HTML-like templates.
    Html,
}

impl SupportedLanguage {
    /// Returns every supported language.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::TypeScript, Self::Python, Self::CSharp, Self::Html]
    }

    /// Returns the snake-case identifier for this language.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::Python => "python",
            Self::CSharp => "csharp",
            Self::Html => "html",
        }
    }

    /// Returns the file extensions (without the leading dot) handled by this
    /// language.
    #[must_use]
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::TypeScript => &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"],
            Self::Python => &["py", "pyi"],
            Self::CSharp => &["cs"],
            Self::Html => &["html", "htm"],
        }
    }

    /// Detects the language from a bare file extension.
    ///
    /// Matching is case-insensitive.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|lang| lang.extensions().contains(&ext.as_str()))
    }

    /// Detects the language from a file path's extension.
    #[must_use]
    pub fn from_path(path: &Utf8Path) -> Option<Self> {
        path.extension().and_then(Self::from_extension)
    }

    /// Returns `true` when `path` carries one of this language's extensions.
    #[must_use]
    pub fn handles(self, path: &Utf8Path) -> bool {
        Self::from_path(path) == Some(self)
    }
}

impl fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when a language identifier is not recognised.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported language: '{0}'")]
pub struct LanguageParseError(String);

impl LanguageParseError {
    /// Returns the input that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.0
    }
}

impl FromStr for SupportedLanguage {
    type Err = LanguageParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "typescript" | "ts" | "javascript" | "js" | "tsx" | "jsx" => Ok(Self::TypeScript),
            "python" | "py" => Ok(Self::Python),
            "csharp" | "c#" | "cs" => Ok(Self::CSharp),
            "html" | "angular" => Ok(Self::Html),
            other => Err(LanguageParseError(other.to_owned())),
        }
    }
}
