//! Core data model for the shapeseek structural search engine.
//!
//! This crate provides the canonical type definitions shared by the search
//! pipeline and its front ends: matching modes, source positions, match
//! records, query hints, error records, and search settings. Everything here
//! is plain data with serde support so results can be streamed or persisted
//! without depending on the Tree-sitter backed engine.
//!
//! # Core types
//!
//! - [`Mode`] - matching strictness (`exact`, `include`,
//!   `include-with-order`, `text`)
//! - [`Position`] and [`Span`] - line/column/offset source positions
//! - [`Match`] - a validated, located occurrence of a query in a file
//! - [`Hint`] and [`SearchErrorRecord`] - query feedback and failures
//! - [`SupportedLanguage`] - host language selection
//! - [`SearchSettings`] - per-search options
//! - [`SearchResults`] - aggregated output of one search call
//! - [`StopFlag`] - cooperative cancellation handle
//!
//! # Example
//!
//! ```
//! use shapeseek_core::{Mode, Position, Span};
//!
//! let span = Span::new(Position::new(1, 1, 0), Position::new(1, 9, 8));
//! assert_eq!(span.len(), 8);
//! assert_eq!("include".parse::<Mode>(), Ok(Mode::Include));
//! ```

mod config;
mod diagnostic;
mod language;
mod match_result;
mod mode;
mod results;
mod span;

pub use config::{DEFAULT_MAX_RESULTS, SearchSettings};
pub use diagnostic::{Hint, HintKind, SearchErrorRecord};
pub use language::{LanguageParseError, SupportedLanguage};
pub use match_result::Match;
pub use mode::{Mode, ModeParseError};
pub use results::{SearchResults, StopFlag};
pub use span::{Position, Span};

#[cfg(test)]
mod tests;
