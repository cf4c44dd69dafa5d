//! Aggregated search output and cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use crate::diagnostic::{Hint, SearchErrorRecord};
use crate::match_result::Match;

/// Output of one search call.
///
/// `hints` holds one list per input query, in query order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Deduplicated matches, grouped by file in input order.
    pub matches: Vec<Match>,
    /// Per-file and per-query failures.
    pub errors: Vec<SearchErrorRecord>,
    /// Advisory hints, one list per query.
    pub hints: Vec<Vec<Hint>>,
}

impl SearchResults {
    /// Creates an empty result set carrying only failures.
    #[must_use]
    pub const fn from_errors(errors: Vec<SearchErrorRecord>, hints: Vec<Vec<Hint>>) -> Self {
        Self {
            matches: Vec::new(),
            errors,
            hints,
        }
    }

    /// Returns `true` when any failure was recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the number of matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Returns `true` when no match was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Shared cooperative cancellation flag.
///
/// Clones share the same underlying flag. A running search polls it between
/// files and returns what it has collected so far once it is raised.
///
/// # Example
///
/// ```
/// use shapeseek_core::StopFlag;
///
/// let flag = StopFlag::new();
/// let handle = flag.clone();
/// handle.stop();
/// assert!(flag.is_stopped());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    /// Creates a lowered flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the flag.
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Returns `true` once the flag has been raised.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
