//! Plain-text search mode.
//!
//! Text queries skip parsing entirely. Each query becomes a regular
//! expression in which:
//!
//! - literal text is matched verbatim
//! - any whitespace run matches any non-empty whitespace run
//! - `$$` and `$$$` match any text, lazily and across lines
//! - `$` matches a possibly empty identifier fragment

use camino::Utf8Path;
use regex::Regex;
use shapeseek_core::{Match, SearchErrorRecord, Span};

use crate::error::SyntaxError;
use crate::position::LineIndex;

const WHITESPACE: &str = r"\s+";
const ANY_TEXT: &str = r"[\s\S]*?";
const IDENTIFIER_FRAGMENT: &str = r"[\w$]*";

/// Compiled text-mode queries.
#[derive(Debug)]
pub struct TextSearch {
    patterns: Vec<Regex>,
}

impl TextSearch {
    /// Compiles every query, collecting one error record per failure.
    ///
    /// # Errors
    ///
    /// Returns the query error records when any query fails to compile.
    pub fn new<Q: AsRef<str>>(
        queries: &[Q],
        case_insensitive: bool,
    ) -> Result<Self, Vec<SearchErrorRecord>> {
        let mut patterns = Vec::with_capacity(queries.len());
        let mut errors = Vec::new();
        for (index, query) in queries.iter().enumerate() {
            match text_pattern(query.as_ref(), case_insensitive) {
                Ok(pattern) => patterns.push(pattern),
                Err(err) => errors.push(SearchErrorRecord::query(index, err.to_string(), None, None)),
            }
        }
        if errors.is_empty() {
            Ok(Self { patterns })
        } else {
            Err(errors)
        }
    }

    /// Returns the number of compiled queries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns `true` when no query was compiled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Finds every non-empty occurrence of every query in `source`.
    #[must_use]
    pub fn find(&self, path: &Utf8Path, source: &str) -> Vec<Match> {
        let index = LineIndex::new(source);
        self.patterns
            .iter()
            .flat_map(|pattern| pattern.find_iter(source))
            .filter(|found| !found.is_empty())
            .map(|found| {
                let span = Span::new(index.position(found.start()), index.position(found.end()));
                Match::new(path.to_path_buf(), span, found.as_str().to_owned())
            })
            .collect()
    }
}

/// Translates a text query into a regular expression.
///
/// # Errors
///
/// Returns [`SyntaxError::EmptyQuery`] for blank queries and
/// [`SyntaxError::InvalidTextQuery`] when the expression cannot be built.
pub fn text_pattern(query: &str, case_insensitive: bool) -> Result<Regex, SyntaxError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(SyntaxError::EmptyQuery);
    }

    let mut pattern = String::new();
    if case_insensitive {
        pattern.push_str("(?i)");
    }
    let mut literal = String::new();
    let mut chars = trimmed.chars().peekable();
    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            while chars.next_if(|next| next.is_whitespace()).is_some() {}
            flush_literal(&mut pattern, &mut literal);
            pattern.push_str(WHITESPACE);
        } else if c == '$' {
            let mut run = 1;
            while run < 3 && chars.next_if_eq(&'$').is_some() {
                run += 1;
            }
            flush_literal(&mut pattern, &mut literal);
            pattern.push_str(if run == 1 { IDENTIFIER_FRAGMENT } else { ANY_TEXT });
        } else {
            literal.push(c);
        }
    }
    flush_literal(&mut pattern, &mut literal);

    Regex::new(&pattern).map_err(|err| SyntaxError::invalid_text_query(err.to_string()))
}

fn flush_literal(pattern: &mut String, literal: &mut String) {
    if !literal.is_empty() {
        pattern.push_str(&regex::escape(literal));
        literal.clear();
    }
}
