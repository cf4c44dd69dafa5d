//! Unit tests for the search pipeline.

use std::cell::Cell;
use std::collections::BTreeSet;

use camino::Utf8PathBuf;
use rstest::{fixture, rstest};

use crate::{
    Mode, SearchErrorRecord, SearchResults, SearchSettings, Searcher, SourceFile, StopFlag,
    SupportedLanguage,
};

fn settings(language: SupportedLanguage, mode: Mode) -> SearchSettings {
    SearchSettings::default()
        .with_language(language)
        .with_mode(mode)
}

fn search(
    language: SupportedLanguage,
    mode: Mode,
    sources: &[SourceFile],
    queries: &[&str],
) -> SearchResults {
    Searcher::new(settings(language, mode)).search_sources(sources, queries)
}

fn codes(results: &SearchResults) -> Vec<&str> {
    results.matches.iter().map(|found| found.code()).collect()
}

fn spans(results: &SearchResults) -> BTreeSet<(u32, u32)> {
    results
        .matches
        .iter()
        .map(|found| (found.start.offset, found.end.offset))
        .collect()
}

#[fixture]
fn ts_sources() -> Vec<SourceFile> {
    vec![
        SourceFile::new("a.ts", "fetch(url, opts);\nfetch(opts, url);\nlog(fetch(url));"),
        SourceFile::new("b.ts", "function go() {\n  init();\n  fetch(url);\n  done();\n}"),
    ]
}

// =============================================================================
// Mode semantics
// =============================================================================

#[rstest]
#[case("fetch(url)")]
#[case("fetch(url, opts)")]
#[case("fetch($$$)")]
#[case("fetch($, opts)")]
#[case("init();\ndone();")]
fn stricter_modes_match_subsets(ts_sources: Vec<SourceFile>, #[case] query: &str) {
    let run = |mode| spans(&search(SupportedLanguage::TypeScript, mode, &ts_sources, &[query]));
    let exact = run(Mode::Exact);
    let ordered = run(Mode::IncludeWithOrder);
    let include = run(Mode::Include);

    assert!(exact.is_subset(&ordered), "{query}: {exact:?} vs {ordered:?}");
    assert!(ordered.is_subset(&include), "{query}: {ordered:?} vs {include:?}");
}

#[rstest]
fn node_wildcard_matches_each_statement_once() {
    let sources = [SourceFile::new("a.ts", "a();\nb = 1;\nif (x) { c(); }")];
    let results = search(SupportedLanguage::TypeScript, Mode::Include, &sources, &["$$"]);
    assert_eq!(codes(&results), ["a();", "b = 1;", "c();"]);
}

#[rstest]
#[case(Mode::Include, 1)]
#[case(Mode::IncludeWithOrder, 0)]
fn argument_order_only_matters_when_ordered(#[case] mode: Mode, #[case] expected: usize) {
    let sources = [SourceFile::new("a.ts", "f(1, 2);")];
    let results = search(SupportedLanguage::TypeScript, mode, &sources, &["f(2, 1)"]);
    assert_eq!(results.matches.len(), expected);
}

#[rstest]
fn statement_sequences_match_inside_blocks(ts_sources: Vec<SourceFile>) {
    let results = search(
        SupportedLanguage::TypeScript,
        Mode::Include,
        &ts_sources,
        &["init();\ndone();"],
    );
    let [found] = results.matches.as_slice() else {
        panic!("expected one match, got {:?}", results.matches);
    };
    assert_eq!(found.code(), "init();\n  fetch(url);\n  done();");
    assert_eq!((found.start.line, found.end.line), (2, 4));
    assert_eq!(results.hints.len(), 1);
}

// =============================================================================
// Wildcards and text comparison
// =============================================================================

#[rstest]
fn partial_identifier_wildcards_match_jsx_attributes() {
    let sources = [SourceFile::new(
        "app.tsx",
        "<Button onPress={go} label=\"ok\" />;\n<Button onChange={set} />;\n<Button title={t} />;",
    )];
    let results = search(
        SupportedLanguage::TypeScript,
        Mode::Include,
        &sources,
        &["<Button on$={$$} />"],
    );
    assert_eq!(results.matches.len(), 2);
}

#[rstest]
fn suffix_wildcards_match_declaration_names() {
    let sources = [SourceFile::new("a.ts", "class FooWrapper {}\nclass WrapperFoo {}")];
    let results = search(
        SupportedLanguage::TypeScript,
        Mode::Include,
        &sources,
        &["class $Wrapper {}"],
    );
    assert_eq!(codes(&results), ["class FooWrapper {}"]);
}

#[rstest]
#[case(false, 0)]
#[case(true, 1)]
fn case_folding_follows_the_setting(#[case] case_insensitive: bool, #[case] expected: usize) {
    let sources = [SourceFile::new("a.ts", "FooBar();")];
    let settings = settings(SupportedLanguage::TypeScript, Mode::Include)
        .with_case_insensitive(case_insensitive);
    let results = Searcher::new(settings).search_sources(&sources, &["foobar()"]);
    assert_eq!(results.matches.len(), expected);
}

#[rstest]
fn duplicate_queries_report_each_location_once() {
    let sources = [SourceFile::new("a.ts", "foo();\nfoo();")];
    let results = search(
        SupportedLanguage::TypeScript,
        Mode::Include,
        &sources,
        &["foo()", "foo()"],
    );
    assert_eq!(results.matches.len(), 2);
    assert_eq!(results.hints.len(), 2);
}

// =============================================================================
// Other languages
// =============================================================================

#[rstest]
fn python_wildcards_are_restored_after_parsing() {
    let sources = [SourceFile::new("a.py", "print(1, 2)\nprint()\nlog(3)\n")];
    let results = search(SupportedLanguage::Python, Mode::Include, &sources, &["print($$$)"]);
    assert_eq!(codes(&results), ["print(1, 2)", "print()"]);
}

#[rstest]
fn python_fstring_interpolations_match_node_wildcards() {
    let sources = [SourceFile::new(
        "a.py",
        "a = f\"user:{name}\"\nb = f\"admin:{name}\"\n",
    )];
    let results = search(
        SupportedLanguage::Python,
        Mode::Include,
        &sources,
        &["f\"user:{$$}\""],
    );
    assert_eq!(codes(&results), ["f\"user:{name}\""]);
}

#[rstest]
fn csharp_rest_wildcard_matches_any_arguments() {
    let sources = [SourceFile::new(
        "A.cs",
        "class A { void M() { Console.WriteLine(\"a\", 1); Console.Write(1); } }",
    )];
    let results = search(
        SupportedLanguage::CSharp,
        Mode::Include,
        &sources,
        &["Console.WriteLine($$$);"],
    );
    assert_eq!(codes(&results), ["Console.WriteLine(\"a\", 1)"]);
}

#[rstest]
fn html_attribute_values_accept_wildcards() {
    let sources = [SourceFile::new(
        "a.html",
        "<form><input type=\"text\"><input disabled></form>",
    )];
    let results = search(
        SupportedLanguage::Html,
        Mode::Include,
        &sources,
        &["<input type=\"$\">"],
    );
    assert_eq!(codes(&results), ["<input type=\"text\">"]);
}

#[rstest]
fn html_node_wildcard_reports_whole_elements() {
    let sources = [SourceFile::new("a.html", "<div><p>hi</p></div>")];
    let results = search(SupportedLanguage::Html, Mode::Include, &sources, &["$$"]);
    assert_eq!(codes(&results), ["<div><p>hi</p></div>", "<p>hi</p>"]);
}

// =============================================================================
// Orchestration
// =============================================================================

#[rstest]
fn failing_queries_stop_before_any_file() {
    let sources = [SourceFile::new("a.ts", "foo();")];
    let results = search(
        SupportedLanguage::TypeScript,
        Mode::Include,
        &sources,
        &["foo()", "foo("],
    );
    assert!(results.matches.is_empty());
    let [SearchErrorRecord::Query { index, line, .. }] = results.errors.as_slice() else {
        panic!("expected one query error, got {:?}", results.errors);
    };
    assert_eq!(*index, 1);
    assert_eq!(*line, Some(1));
}

#[rstest]
fn unparsable_files_do_not_stop_the_batch() {
    let dir = tempfile::tempdir().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 path");
    let good = root.join("good.ts");
    let bad = root.join("bad.ts");
    let missing = root.join("missing.ts");
    std::fs::write(&bad, "foo(").expect("write bad");
    std::fs::write(&good, "foo();").expect("write good");

    let results = Searcher::new(SearchSettings::default())
        .search_files(&[bad.clone(), missing.clone(), good.clone()], &["foo()"]);

    assert_eq!(results.matches.len(), 1);
    assert_eq!(
        results.matches.first().map(|found| found.file_path.clone()),
        Some(good)
    );
    let failed: Vec<_> = results
        .errors
        .iter()
        .map(|record| match record {
            SearchErrorRecord::File { path, .. } => path.clone(),
            SearchErrorRecord::Query { .. } => panic!("unexpected query error"),
        })
        .collect();
    assert_eq!(failed, [bad, missing]);
}

#[rstest]
fn limit_is_checked_between_files(ts_sources: Vec<SourceFile>) {
    let settings = SearchSettings::default().with_max_results(Some(1));
    let results = Searcher::new(settings).search_sources(&ts_sources, &["fetch($$$)"]);
    assert_eq!(results.matches.len(), 1);
}

#[rstest]
fn stop_flag_cancels_before_the_next_file(ts_sources: Vec<SourceFile>) {
    let stop = StopFlag::new();
    stop.stop();
    let results = Searcher::new(SearchSettings::default())
        .with_stop_flag(stop)
        .search_sources(&ts_sources, &["fetch($$$)"]);
    assert!(results.matches.is_empty());
}

#[rstest]
fn partial_results_arrive_per_file(ts_sources: Vec<SourceFile>) {
    let calls = Cell::new(0);
    let results = Searcher::new(SearchSettings::default())
        .with_partial_results(|batch| {
            assert!(!batch.is_empty());
            calls.set(calls.get() + 1);
        })
        .search_sources(&ts_sources, &["fetch($$$)"]);
    assert_eq!(calls.get(), 2);
    assert_eq!(results.matches.len(), 4);
}

#[rstest]
fn debug_mode_stops_after_first_file_with_matches(ts_sources: Vec<SourceFile>) {
    let settings = SearchSettings::default().with_debug(true);
    let results = Searcher::new(settings).search_sources(&ts_sources, &["fetch($$$)"]);
    assert!(results
        .matches
        .iter()
        .all(|found| found.file_path.as_str() == "a.ts"));
    assert_eq!(results.matches.len(), 3);
}

#[rstest]
fn text_mode_skips_parsing(ts_sources: Vec<SourceFile>) {
    let mut sources = ts_sources;
    sources.push(SourceFile::new("broken.ts", "fetch(url"));
    let results = search(SupportedLanguage::TypeScript, Mode::Text, &sources, &["fetch(url$"]);
    assert!(results.errors.is_empty());
    assert_eq!(results.matches.len(), 4);
}
