//! Tree-sitter powered structural code search.
//!
//! Queries are written in the searched language itself, with three wildcard
//! markers added:
//!
//! - `$` matches any identifier, or any run of characters when it appears
//!   inside a name or string (`on$`, `$Wrapper`, `"user:$"`)
//! - `$$` matches exactly one node of any kind
//! - `$$$` matches zero or more sibling nodes
//!
//! The numeric literal `0x0` matches any number.
//!
//! # Pipeline
//!
//! 1. [`compile_queries`] parses every query through the language's
//!    [`LanguageAdapter`] into a uniform [`Node`] tree and picks the match
//!    target.
//! 2. [`Searcher`] parses each file the same way and walks it for
//!    candidates.
//! 3. [`compare_nodes`] checks one candidate node against one query node;
//!    [`validate`] recurses through the fields it reports, applying the
//!    sequence rules of the selected [`Mode`].
//! 4. Matches are deduplicated per file and aggregated into
//!    [`SearchResults`].
//!
//! # Supported Languages
//!
//! - JavaScript, TypeScript and JSX (`.js`, `.jsx`, `.ts`, `.tsx`, ...)
//! - Python (`.py`, `.pyi`)
//! - C# (`.cs`)
//! - HTML templates (`.html`, `.htm`)
//!
//! # Example
//!
//! ```
//! use shapeseek_syntax::{Mode, SearchSettings, Searcher, SourceFile};
//!
//! let sources = [SourceFile::new(
//!     "app.tsx",
//!     "<Button onPress={go} label=\"ok\" />;\n<Button onChange={set} />;",
//! )];
//! let settings = SearchSettings::default().with_mode(Mode::Include);
//! let results = Searcher::new(settings).search_sources(&sources, &["<Button on$={$$} />"]);
//! assert_eq!(results.matches.len(), 2);
//! ```

mod adapter;
mod error;
mod matcher;
mod node;
mod parser;
mod position;
mod query;
mod search;
pub mod wildcard;

pub use adapter::{
    CSharpAdapter, HtmlAdapter, LanguageAdapter, PythonAdapter, TypeScriptAdapter, adapter_for,
};
pub use error::SyntaxError;
pub use matcher::{
    LevelMatch, MatchContext, compare_nodes, match_statements, validate, validate_sequence,
};
pub use node::{
    CHILDREN_FIELD, FieldValue, KEYWORDS_FIELD, KindSchema, Node, NodeSchema, PREFIX_MARKER,
};
pub use parser::{ParseResult, Parser, SyntaxErrorInfo};
pub use query::{CompiledQuery, QueryBatch, QueryTarget, compile_queries, compile_query};
pub use search::{Searcher, SourceFile, TextSearch, dedup_matches, text_pattern};
pub use shapeseek_core::{
    Hint, HintKind, Match, Mode, Position, SearchErrorRecord, SearchResults, SearchSettings, Span,
    StopFlag, SupportedLanguage,
};

#[cfg(test)]
mod tests;
