//! Integration tests for the `shapeseek` binary entry point.
//!
//! Covers result rendering, configuration discovery and exit status for
//! failing queries.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;
use rstest::{fixture, rstest};
use tempfile::TempDir;

#[fixture]
fn project() -> TempDir {
    let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
    let write = |name: &str, contents: &str| {
        fs::write(dir.path().join(name), contents)
            .unwrap_or_else(|err| panic!("write {name}: {err}"));
    };
    write("api.ts", "const a = fetch(url);\nfetch(url, { cache: 'no-store' });\n");
    write("broken.ts", "fetch(\n");
    write("README.md", "fetch(url)\n");
    dir
}

#[rstest]
fn human_output_lists_matches(project: TempDir) {
    let mut command = cargo_bin_cmd!("shapeseek");
    command
        .current_dir(project.path())
        .args(["-q", "fetch($$$)", "."]);
    command
        .assert()
        .success()
        .stdout(contains("api.ts:1:11-1:21"))
        .stdout(contains("    fetch(url, { cache: 'no-store' })"))
        .stdout(contains("2 matches in 1 file"))
        .stderr(contains("broken.ts"));
}

#[rstest]
fn json_output_is_machine_readable(project: TempDir) {
    let mut command = cargo_bin_cmd!("shapeseek");
    command
        .current_dir(project.path())
        .args(["--format", "json", "-m", "exact", "-q", "fetch($)", "api.ts"]);
    let output = command.assert().success().get_output().stdout.clone();

    let value: serde_json::Value =
        serde_json::from_slice(&output).unwrap_or_else(|err| panic!("json: {err}"));
    let matches = value["matches"]
        .as_array()
        .unwrap_or_else(|| panic!("matches array in {value}"));
    let codes: Vec<_> = matches.iter().map(|found| found["code"].as_str()).collect();
    assert_eq!(codes, [Some("fetch(url)")]);
    assert_eq!(value["errors"].as_array().map(Vec::len), Some(0));
}

#[rstest]
fn configuration_file_is_discovered(project: TempDir) {
    fs::write(project.path().join("shapeseek.toml"), "mode = \"text\"\n")
        .unwrap_or_else(|err| panic!("write config: {err}"));
    let mut command = cargo_bin_cmd!("shapeseek");
    command
        .current_dir(project.path())
        .args(["-q", "cache:", "api.ts"]);
    command
        .assert()
        .success()
        .stdout(contains("api.ts:2:14-2:20"))
        .stdout(contains("1 match in 1 file"));
}

#[rstest]
fn invalid_configuration_is_rejected(project: TempDir) {
    fs::write(project.path().join("custom.toml"), "strictness = \"exact\"\n")
        .unwrap_or_else(|err| panic!("write config: {err}"));
    let mut command = cargo_bin_cmd!("shapeseek");
    command
        .current_dir(project.path())
        .args(["--config", "custom.toml", "-q", "fetch()", "api.ts"]);
    command
        .assert()
        .failure()
        .stderr(contains("failed to parse configuration custom.toml"));
}

#[rstest]
fn failing_query_exits_with_failure(project: TempDir) {
    let mut command = cargo_bin_cmd!("shapeseek");
    command
        .current_dir(project.path())
        .args(["-q", "fetch(url)", "-q", "fetch(", "api.ts"]);
    command
        .assert()
        .failure()
        .stdout(contains("0 matches in 0 files"))
        .stderr(contains("error: query #1"));
}

#[test]
fn missing_queries_exit_with_failure() {
    let mut command = cargo_bin_cmd!("shapeseek");
    command.arg(".");
    command
        .assert()
        .failure()
        .stderr(contains("no queries given"));
}
