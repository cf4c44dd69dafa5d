//! Matching context shared across recursive operations.

use std::borrow::Cow;

use shapeseek_core::Mode;

use crate::adapter::LanguageAdapter;

/// State for one candidate/query match attempt.
///
/// Created per pair and discarded afterwards. The comparison counter and
/// depth only feed tracing.
pub struct MatchContext<'a> {
    adapter: &'a dyn LanguageAdapter,
    mode: Mode,
    case_insensitive: bool,
    trace: bool,
    comparisons: usize,
    depth: usize,
}

impl<'a> MatchContext<'a> {
    /// Creates a context for one match attempt.
    #[must_use]
    pub const fn new(adapter: &'a dyn LanguageAdapter, mode: Mode, case_insensitive: bool) -> Self {
        Self {
            adapter,
            mode,
            case_insensitive,
            trace: false,
            comparisons: 0,
            depth: 0,
        }
    }

    /// Enables per-comparison tracing.
    #[must_use]
    pub const fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Returns the adapter of the language being matched.
    #[must_use]
    pub const fn adapter(&self) -> &'a dyn LanguageAdapter {
        self.adapter
    }

    /// Returns the matching mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns whether text comparison folds case.
    #[must_use]
    pub const fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// Returns whether tracing is enabled.
    #[must_use]
    pub const fn trace(&self) -> bool {
        self.trace
    }

    /// Returns the number of node comparisons performed so far.
    #[must_use]
    pub const fn comparisons(&self) -> usize {
        self.comparisons
    }

    /// Returns the current recursion depth.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    pub(super) const fn record_comparison(&mut self) {
        self.comparisons += 1;
    }

    pub(super) const fn descend(&mut self) {
        self.depth += 1;
    }

    pub(super) const fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Lower-cases `text` when comparison is case-insensitive.
    #[must_use]
    pub fn fold<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if self.case_insensitive {
            Cow::Owned(text.to_lowercase())
        } else {
            Cow::Borrowed(text)
        }
    }
}
