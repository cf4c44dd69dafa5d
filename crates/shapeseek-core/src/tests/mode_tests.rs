//! Tests for [`Mode`].

use rstest::rstest;

use crate::Mode;

#[rstest]
#[case::exact("exact", Mode::Exact)]
#[case::include("include", Mode::Include)]
#[case::ordered("include-with-order", Mode::IncludeWithOrder)]
#[case::snake("include_with_order", Mode::IncludeWithOrder)]
#[case::upper("TEXT", Mode::Text)]
fn parses_mode_identifiers(#[case] input: &str, #[case] expected: Mode) {
    assert_eq!(input.parse::<Mode>(), Ok(expected));
}

#[test]
fn rejects_unknown_mode() {
    let err = "fuzzy".parse::<Mode>().expect_err("unknown mode");
    assert_eq!(err.input(), "fuzzy");
    assert_eq!(err.to_string(), "unsupported mode: 'fuzzy'");
}

#[test]
fn display_round_trips_through_from_str() {
    for mode in Mode::all() {
        assert_eq!(mode.to_string().parse::<Mode>(), Ok(*mode));
    }
}

#[test]
fn serde_uses_kebab_case() {
    let json = serde_json::to_string(&Mode::IncludeWithOrder).expect("serialize");
    assert_eq!(json, "\"include-with-order\"");
}

#[test]
fn default_is_include() {
    assert_eq!(Mode::default(), Mode::Include);
}
