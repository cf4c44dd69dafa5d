//! End-to-end tests for `shapeseek-syntax` through its public API.
//!
//! Snapshots cover the user-facing shapes of results and error records.

use camino::Utf8PathBuf;
use insta::assert_snapshot;
use rstest::{fixture, rstest};

use shapeseek_syntax::{
    Mode, Parser, SearchResults, SearchSettings, Searcher, SourceFile, SupportedLanguage,
    compile_queries,
};

fn render(results: &SearchResults) -> String {
    let mut lines: Vec<String> = results
        .matches
        .iter()
        .map(|found| {
            format!(
                "{}:{}:{}-{}:{} {}",
                found.file_path,
                found.start.line,
                found.start.column,
                found.end.line,
                found.end.column,
                found.code().replace('\n', "\\n")
            )
        })
        .collect();
    lines.join("\n")
}

#[fixture]
fn workspace() -> (tempfile::TempDir, Vec<Utf8PathBuf>) {
    let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("temp dir: {err}"));
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
        .unwrap_or_else(|path| panic!("non UTF-8 temp dir: {}", path.display()));
    let files = [
        (
            "api.ts",
            "export async function load(url) {\n  return fetch(url, { cache: 'no-store' });\n}\n",
        ),
        ("broken.ts", "fetch(url"),
        ("view.tsx", "const v = <Button onPress={go} />;\nfetch(other);\n"),
    ];
    let paths = files
        .iter()
        .map(|(name, content)| {
            let path = root.join(name);
            std::fs::write(&path, content).unwrap_or_else(|err| panic!("write {name}: {err}"));
            path
        })
        .collect();
    (dir, paths)
}

#[rstest]
fn search_files_reports_matches_and_failures(workspace: (tempfile::TempDir, Vec<Utf8PathBuf>)) {
    let (dir, paths) = workspace;
    let results = Searcher::new(SearchSettings::default()).search_files(&paths, &["fetch($$$)"]);
    let prefix = format!("{}/", dir.path().display());
    let rendered = render(&results).replace(&prefix, "");

    assert_snapshot!(rendered, @r"
    api.ts:2:10-2:43 fetch(url, { cache: 'no-store' })
    view.tsx:2:1-2:13 fetch(other)
    ");
    let [failure] = results.errors.as_slice() else {
        panic!("expected one file error, got {:?}", results.errors);
    };
    let message = failure.to_string().replace(&prefix, "");
    assert!(message.starts_with("broken.ts: Parse error at 1:"), "{message}");
}

#[rstest]
#[case::exact(Mode::Exact, 0)]
#[case::include(Mode::Include, 1)]
fn modes_differ_on_extra_arguments(#[case] mode: Mode, #[case] expected: usize) {
    let sources = [SourceFile::new("a.ts", "fetch(url, opts);")];
    let results = Searcher::new(SearchSettings::default().with_mode(mode))
        .search_sources(&sources, &["fetch(url)"]);
    assert_eq!(results.matches.len(), expected);
}

#[test]
fn query_errors_are_reported_as_data() {
    let mut parser =
        Parser::new(SupportedLanguage::TypeScript).unwrap_or_else(|err| panic!("parser: {err}"));
    let batch = compile_queries(&mut parser, &["", "foo(", "$"]);
    let rendered: Vec<String> = batch.errors.iter().map(ToString::to_string).collect();

    let [empty, broken] = rendered.as_slice() else {
        panic!("expected two query errors, got {rendered:?}");
    };
    assert_snapshot!(empty, @"query #0: query is empty");
    assert!(broken.starts_with("query #1 at 1:"), "{broken}");
    assert_eq!(batch.queries.len(), 1);
    assert_eq!(batch.hints.get(2).map(Vec::len), Some(1));
}

#[test]
fn match_records_serialise_to_json() {
    let sources = [SourceFile::new("a.py", "x = 1\nprint(x)\n")];
    let settings = SearchSettings::default().with_language(SupportedLanguage::Python);
    let results = Searcher::new(settings).search_sources(&sources, &["print($)"]);
    let json = serde_json::to_string(&results.matches)
        .unwrap_or_else(|err| panic!("serialise: {err}"));

    assert_snapshot!(json, @r#"[{"file_path":"a.py","start":{"line":2,"column":1,"offset":6},"end":{"line":2,"column":9,"offset":14},"code":"print(x)"}]"#);
}
