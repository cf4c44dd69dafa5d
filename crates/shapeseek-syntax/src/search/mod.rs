//! Search orchestration.
//!
//! A [`Searcher`] compiles its queries once, then walks the inputs in order:
//! read, parse, discover candidates, validate, deduplicate and report.
//! Failures local to one file become [`SearchErrorRecord::File`] entries and
//! never stop the batch. Query failures stop it before any file is read.

mod candidates;
mod dedup;
mod text;

use std::borrow::Cow;

use camino::{Utf8Path, Utf8PathBuf};
use shapeseek_core::{Hint, Match, SearchErrorRecord, SearchResults, SearchSettings, StopFlag};
use tracing::{debug, error, trace, warn};

use crate::error::SyntaxError;
use crate::matcher::MatchContext;
use crate::parser::Parser;
use crate::query::{CompiledQuery, compile_queries};

pub use dedup::dedup_matches;
pub use text::{TextSearch, text_pattern};

/// An in-memory source to search instead of a file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path reported in matches and error records.
    pub path: Utf8PathBuf,
    /// Source text.
    pub content: String,
}

impl SourceFile {
    /// Creates an in-memory source.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

type PartialResults<'cb> = Box<dyn FnMut(&[Match]) + 'cb>;

/// Runs structural or text searches over files or in-memory sources.
///
/// # Example
///
/// ```
/// use shapeseek_syntax::{SearchSettings, Searcher, SourceFile};
///
/// let sources = [SourceFile::new("a.ts", "fetch(url);\nlog(1);")];
/// let results = Searcher::new(SearchSettings::default())
///     .search_sources(&sources, &["fetch($$$)"]);
/// assert_eq!(results.matches.len(), 1);
/// assert_eq!(results.matches[0].code(), "fetch(url)");
/// ```
pub struct Searcher<'cb> {
    settings: SearchSettings,
    stop: Option<StopFlag>,
    on_partial: Option<PartialResults<'cb>>,
}

impl<'cb> Searcher<'cb> {
    /// Creates a searcher with the given settings.
    #[must_use]
    pub const fn new(settings: SearchSettings) -> Self {
        Self {
            settings,
            stop: None,
            on_partial: None,
        }
    }

    /// Installs a cancellation flag polled between files.
    #[must_use]
    pub fn with_stop_flag(mut self, stop: StopFlag) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Installs a callback receiving each file's new matches as soon as the
    /// file is done.
    #[must_use]
    pub fn with_partial_results(mut self, callback: impl FnMut(&[Match]) + 'cb) -> Self {
        self.on_partial = Some(Box::new(callback));
        self
    }

    /// Returns the search settings.
    #[must_use]
    pub const fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Searches files on disk, in the given order.
    pub fn search_files<Q: AsRef<str>>(
        &mut self,
        paths: &[Utf8PathBuf],
        queries: &[Q],
    ) -> SearchResults {
        let inputs = paths.iter().map(|path| {
            let content = std::fs::read_to_string(path)
                .map(Cow::Owned)
                .map_err(|err| SyntaxError::io(path.clone(), err));
            (path.as_path(), content)
        });
        self.run(inputs, queries)
    }

    /// Searches in-memory sources, in the given order.
    pub fn search_sources<Q: AsRef<str>>(
        &mut self,
        sources: &[SourceFile],
        queries: &[Q],
    ) -> SearchResults {
        let inputs = sources
            .iter()
            .map(|source| (source.path.as_path(), Ok(Cow::Borrowed(source.content.as_str()))));
        self.run(inputs, queries)
    }

    fn run<'s, I, Q>(&mut self, inputs: I, queries: &[Q]) -> SearchResults
    where
        I: Iterator<Item = (&'s Utf8Path, Result<Cow<'s, str>, SyntaxError>)>,
        Q: AsRef<str>,
    {
        let settings = self.settings;
        let mut engine = match Engine::prepare(&settings, queries) {
            Ok(engine) => engine,
            Err(failed) => return *failed,
        };
        let mut results = SearchResults {
            hints: engine.hints(queries.len()),
            ..SearchResults::default()
        };

        let mut files = 0_usize;
        for (path, content) in inputs {
            if self.stop.as_ref().is_some_and(StopFlag::is_stopped) {
                debug!(files, "search cancelled");
                break;
            }
            if settings
                .max_results()
                .is_some_and(|limit| results.matches.len() > limit)
            {
                debug!(files, "result limit exceeded");
                break;
            }
            files += 1;

            match content.and_then(|source| engine.search(&settings, path, &source)) {
                Ok(found) => {
                    let unique = dedup_matches(found);
                    debug!(%path, matches = unique.len(), "searched file");
                    if !unique.is_empty() {
                        if let Some(callback) = self.on_partial.as_mut() {
                            callback(&unique);
                        }
                    }
                    let done = settings.debug() && !unique.is_empty();
                    results.matches.extend(unique);
                    if done {
                        break;
                    }
                }
                Err(err) => {
                    if matches!(err, SyntaxError::ValidatorInvariant { .. }) {
                        error!(%path, error = %err, "validator invariant violated");
                    } else {
                        warn!(%path, error = %err, "skipping file");
                    }
                    results
                        .errors
                        .push(SearchErrorRecord::file(path.to_path_buf(), err.to_string()));
                    if settings.debug() {
                        break;
                    }
                }
            }
        }

        if let Some(limit) = settings.max_results() {
            results.matches.truncate(limit);
        }
        debug!(
            files,
            matches = results.matches.len(),
            errors = results.errors.len(),
            "search finished"
        );
        results
    }
}

enum Engine {
    Structural {
        parser: Box<Parser>,
        queries: Vec<CompiledQuery>,
    },
    Text(TextSearch),
}

impl Engine {
    fn prepare<Q: AsRef<str>>(
        settings: &SearchSettings,
        queries: &[Q],
    ) -> Result<Self, Box<SearchResults>> {
        if !settings.mode().is_structural() {
            return TextSearch::new(queries, settings.case_insensitive())
                .map(Self::Text)
                .map_err(|errors| {
                    Box::new(SearchResults::from_errors(errors, vec![Vec::new(); queries.len()]))
                });
        }

        let mut parser = Parser::new(settings.language()).map_err(|err| {
            let record = SearchErrorRecord::query(0, err.to_string(), None, None);
            Box::new(SearchResults::from_errors(vec![record], Vec::new()))
        })?;
        let batch = compile_queries(&mut parser, queries);
        if !batch.is_ok() {
            for record in &batch.errors {
                warn!(error = %record, "query failed to compile");
            }
            return Err(Box::new(SearchResults::from_errors(batch.errors, batch.hints)));
        }
        Ok(Self::Structural {
            parser: Box::new(parser),
            queries: batch.queries,
        })
    }

    fn hints(&self, count: usize) -> Vec<Vec<Hint>> {
        match self {
            Self::Structural { queries, .. } => {
                queries.iter().map(|query| query.hints().to_vec()).collect()
            }
            Self::Text(_) => vec![Vec::new(); count],
        }
    }

    fn search(
        &mut self,
        settings: &SearchSettings,
        path: &Utf8Path,
        source: &str,
    ) -> Result<Vec<Match>, SyntaxError> {
        let (parser, queries) = match self {
            Self::Text(text) => return Ok(text.find(path, source)),
            Self::Structural { parser, queries } => (parser, queries),
        };

        let root = parser.parse_node(source)?;
        let mut found = Vec::new();
        for query in queries.iter() {
            let mut ctx = MatchContext::new(
                parser.adapter(),
                settings.mode(),
                settings.case_insensitive(),
            )
            .with_trace(settings.debug());
            let spans = candidates::find_spans(&root, query, &mut ctx)?;
            if ctx.trace() {
                trace!(
                    query = query.index(),
                    comparisons = ctx.comparisons(),
                    matches = spans.len(),
                    "query evaluated"
                );
            }
            found.extend(spans.into_iter().map(|span| {
                let code = source.get(span.byte_range()).unwrap_or_default();
                Match::new(path.to_path_buf(), span, code.to_owned())
            }));
        }
        Ok(found)
    }
}
