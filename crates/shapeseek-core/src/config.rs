//! Per-search options.

use serde::{Deserialize, Serialize};

use crate::language::SupportedLanguage;
use crate::mode::Mode;

/// Default cap on the number of matches returned by one search.
pub const DEFAULT_MAX_RESULTS: usize = 10_000;

/// Options controlling a single search invocation.
///
/// # Defaults
///
/// - `mode`: [`Mode::Include`]
/// - `case_insensitive`: `false`
/// - `debug`: `false`
/// - `max_results`: `Some(10_000)`
/// - `language`: [`SupportedLanguage::TypeScript`]
///
/// # Example
///
/// ```
/// use shapeseek_core::{Mode, SearchSettings, SupportedLanguage};
///
/// let settings = SearchSettings::default()
///     .with_mode(Mode::Exact)
///     .with_language(SupportedLanguage::Python)
///     .with_max_results(None);
/// assert_eq!(settings.mode(), Mode::Exact);
/// assert_eq!(settings.language(), SupportedLanguage::Python);
/// assert!(settings.max_results().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchSettings {
    /// Matching strictness.
    mode: Mode,
    /// Whether identifier and literal comparison folds case.
    case_insensitive: bool,
    /// Stop after the first file with matches or errors and trace verbosely.
    debug: bool,
    /// Upper bound on reported matches; `None` disables the limit.
    max_results: Option<usize>,
    /// Host language of queries and searched files.
    language: SupportedLanguage,
}

impl SearchSettings {
    /// Creates settings with explicit values.
    #[must_use]
    pub const fn new(
        mode: Mode,
        case_insensitive: bool,
        debug: bool,
        max_results: Option<usize>,
        language: SupportedLanguage,
    ) -> Self {
        Self {
            mode,
            case_insensitive,
            debug,
            max_results,
            language,
        }
    }

    /// Returns the matching mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns whether comparisons fold case.
    #[must_use]
    pub const fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// Returns whether debug mode is enabled.
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Returns the result limit.
    #[must_use]
    pub const fn max_results(&self) -> Option<usize> {
        self.max_results
    }

    /// Returns the host language.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Replaces the matching mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Replaces the case-folding flag.
    #[must_use]
    pub const fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// Replaces the debug flag.
    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Replaces the result limit.
    #[must_use]
    pub const fn with_max_results(mut self, max_results: Option<usize>) -> Self {
        self.max_results = max_results;
        self
    }

    /// Replaces the host language.
    #[must_use]
    pub const fn with_language(mut self, language: SupportedLanguage) -> Self {
        self.language = language;
        self
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            mode: Mode::Include,
            case_insensitive: false,
            debug: false,
            max_results: Some(DEFAULT_MAX_RESULTS),
            language: SupportedLanguage::TypeScript,
        }
    }
}
