//! Tests for [`SupportedLanguage`].

use camino::Utf8Path;
use rstest::rstest;

use crate::SupportedLanguage;

#[rstest]
#[case::ts("ts", Some(SupportedLanguage::TypeScript))]
#[case::jsx("JSX", Some(SupportedLanguage::TypeScript))]
#[case::python("py", Some(SupportedLanguage::Python))]
#[case::csharp("cs", Some(SupportedLanguage::CSharp))]
#[case::html("htm", Some(SupportedLanguage::Html))]
#[case::unknown("rs", None)]
fn detects_language_from_extension(
    #[case] ext: &str,
    #[case] expected: Option<SupportedLanguage>,
) {
    assert_eq!(SupportedLanguage::from_extension(ext), expected);
}

#[test]
fn detects_language_from_path() {
    let path = Utf8Path::new("src/components/Button.tsx");
    assert_eq!(
        SupportedLanguage::from_path(path),
        Some(SupportedLanguage::TypeScript)
    );
    assert!(SupportedLanguage::TypeScript.handles(path));
    assert!(!SupportedLanguage::Python.handles(path));
    assert_eq!(SupportedLanguage::from_path(Utf8Path::new("Makefile")), None);
}

#[rstest]
#[case::alias("js", SupportedLanguage::TypeScript)]
#[case::csharp("C#", SupportedLanguage::CSharp)]
#[case::angular("angular", SupportedLanguage::Html)]
fn parses_language_aliases(#[case] input: &str, #[case] expected: SupportedLanguage) {
    assert_eq!(input.parse::<SupportedLanguage>(), Ok(expected));
}

#[test]
fn display_round_trips_through_from_str() {
    for lang in SupportedLanguage::all() {
        assert_eq!(lang.to_string().parse::<SupportedLanguage>(), Ok(*lang));
    }
}

#[test]
fn rejects_unknown_language() {
    let err = "cobol".parse::<SupportedLanguage>().expect_err("unknown");
    assert_eq!(err.input(), "cobol");
}

#[test]
fn serialises_with_display_identifiers() {
    let json = serde_json::to_string(&SupportedLanguage::CSharp).expect("serialise");
    assert_eq!(json, "\"csharp\"");
    let parsed: SupportedLanguage = serde_json::from_str("\"typescript\"").expect("parse");
    assert_eq!(parsed, SupportedLanguage::TypeScript);
}
