//! Behaviour-driven tests for structural search.

use std::str::FromStr;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use crate::{Mode, SearchErrorRecord, SearchResults, SearchSettings, Searcher, SourceFile};

// ---------------------------------------------------------------------------
// Typed wrappers for Gherkin step parameters
// ---------------------------------------------------------------------------

/// A quoted string value with `\n` escapes expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
struct QuotedString(String);

impl FromStr for QuotedString {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim_matches('"').replace("\\n", "\n")))
    }
}

impl QuotedString {
    fn as_str(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Test world
// ---------------------------------------------------------------------------

#[derive(Default)]
struct TestWorld {
    settings: SearchSettings,
    sources: Vec<SourceFile>,
    results: Option<SearchResults>,
}

impl TestWorld {
    fn results(&self) -> &SearchResults {
        self.results.as_ref().expect("search should have run")
    }
}

#[fixture]
fn world() -> TestWorld {
    TestWorld::default()
}

// ---------------------------------------------------------------------------
// Given steps
// ---------------------------------------------------------------------------

#[given("the language {language}")]
fn given_language(world: &mut TestWorld, language: QuotedString) {
    let parsed = language.as_str().parse().expect("known language");
    world.settings = world.settings.with_language(parsed);
}

#[given("a source {path} containing {content}")]
fn given_source(world: &mut TestWorld, path: QuotedString, content: QuotedString) {
    world
        .sources
        .push(SourceFile::new(path.as_str(), content.as_str()));
}

#[given("the mode {mode}")]
fn given_mode(world: &mut TestWorld, mode: QuotedString) {
    let parsed: Mode = mode.as_str().parse().expect("known mode");
    world.settings = world.settings.with_mode(parsed);
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

#[when("I search for {query}")]
fn when_search(world: &mut TestWorld, query: QuotedString) {
    let results =
        Searcher::new(world.settings).search_sources(&world.sources, &[query.as_str()]);
    world.results = Some(results);
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

#[then("the search finds {count} matches")]
fn then_match_count(world: &mut TestWorld, count: usize) {
    let results = world.results();
    assert_eq!(results.matches.len(), count, "matches: {:?}", results.matches);
}

#[then("the search finds nothing")]
fn then_no_matches(world: &mut TestWorld) {
    let results = world.results();
    assert!(results.matches.is_empty(), "matches: {:?}", results.matches);
}

#[then("match {position} has code {code}")]
fn then_match_code(world: &mut TestWorld, position: usize, code: QuotedString) {
    let found = world
        .results()
        .matches
        .get(position.saturating_sub(1))
        .expect("match should exist");
    assert_eq!(found.code(), code.as_str());
}

#[then("a file error is reported for {path}")]
fn then_file_error(world: &mut TestWorld, path: QuotedString) {
    let reported = world.results().errors.iter().any(|record| {
        matches!(
            record,
            SearchErrorRecord::File { path: failed, .. } if failed.as_str() == path.as_str()
        )
    });
    assert!(reported, "errors: {:?}", world.results().errors);
}

#[then("a query error is reported at line {line}")]
fn then_query_error(world: &mut TestWorld, line: u32) {
    let reported = world.results().errors.iter().any(|record| {
        matches!(record, SearchErrorRecord::Query { line: Some(at), .. } if *at == line)
    });
    assert!(reported, "errors: {:?}", world.results().errors);
}

// ---------------------------------------------------------------------------
// Scenario registration
// ---------------------------------------------------------------------------

#[scenario(path = "tests/features/search.feature")]
fn search_behaviour(world: TestWorld) {
    let _ = world;
}
