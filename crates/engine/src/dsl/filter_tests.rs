use super::*;
use sieve_fs::FileAttrs;

fn rec(name: &str, size: u64, attrs: FileAttrs) -> FileRecord {
    FileRecord::from_parts(format!("/data/{name}"), size, attrs)
}

fn sized(size: u64) -> FileRecord {
    rec("f.bin", size, FileAttrs::empty())
}

fn build(line: &str) -> Result<Predicate, DirectiveError> {
    build_filter(line, FilterOptions::default())
}

fn filter_syntax_reason(line: &str) -> SyntaxReason {
    match build(line) {
        Err(DirectiveError::IllegalFilterSyntax { reason, .. }) => reason,
        other => panic!("expected IllegalFilterSyntax for {line:?}, got {other:?}"),
    }
}

#[test]
fn greater_than_uses_truncated_kb() {
    let pred = build("greater_than#1").expect("valid filter");

    let cases: &[(u64, bool)] = &[
        (0, false),
        (1024, false),
        (2047, false),
        (2048, true),
        (10 * 1024, true),
    ];

    for (bytes, expected) in cases {
        assert_eq!(pred.test(&sized(*bytes)), *expected, "bytes: {}", bytes);
    }
}

#[test]
fn smaller_than_uses_truncated_kb() {
    let pred = build("smaller_than#2").expect("valid filter");

    assert!(pred.test(&sized(0)));
    assert!(pred.test(&sized(2047)));
    assert!(!pred.test(&sized(2048)));
}

#[test]
fn greater_than_zero_excludes_files_under_one_kb() {
    let pred = build("greater_than#0").expect("valid filter");
    assert!(!pred.test(&sized(1023)));
    assert!(pred.test(&sized(1024)));
}

#[test]
fn between_is_inclusive_on_both_ends() {
    let pred = build("between#2#4").expect("valid filter");

    let cases: &[(u64, bool)] = &[
        (1024, false),
        (2 * 1024, true),
        (3 * 1024 + 500, true),
        (4 * 1024 + 1023, true),
        (5 * 1024, false),
    ];

    for (bytes, expected) in cases {
        assert_eq!(pred.test(&sized(*bytes)), *expected, "bytes: {}", bytes);
    }
}

#[test]
fn between_equal_bounds_is_a_single_kb() {
    let pred = build("between#3#3").expect("valid filter");
    assert!(pred.test(&sized(3 * 1024)));
    assert!(!pred.test(&sized(4 * 1024)));
}

#[test]
fn between_rejects_inverted_bounds_when_strict() {
    assert_eq!(
        filter_syntax_reason("between#5#2"),
        SyntaxReason::InvertedBounds { min: 5, max: 2 }
    );
}

#[test]
fn between_accepts_inverted_bounds_when_lax() {
    let opts = FilterOptions {
        between: BoundsCheck::Lax,
    };
    let pred = build_filter("between#5#2", opts).expect("lax accepts inverted bounds");

    for kb in 0..8 {
        assert!(!pred.test(&sized(kb * 1024)), "kb: {}", kb);
    }
}

#[test]
fn size_filters_reject_bad_values() {
    let cases: &[(&str, SyntaxReason)] = &[
        (
            "greater_than",
            SyntaxReason::WrongParamCount {
                expected: 1,
                found: 0,
            },
        ),
        ("greater_than#-1", SyntaxReason::NegativeSize("-1".into())),
        ("smaller_than#abc", SyntaxReason::InvalidSize("abc".into())),
        ("smaller_than#1.5", SyntaxReason::InvalidSize("1.5".into())),
        ("greater_than#-", SyntaxReason::InvalidSize("-".into())),
        (
            "greater_than#5#6",
            SyntaxReason::WrongParamCount {
                expected: 1,
                found: 2,
            },
        ),
        (
            "greater_than#5#foo#NOT",
            SyntaxReason::WrongParamCount {
                expected: 1,
                found: 2,
            },
        ),
        (
            "between#1",
            SyntaxReason::WrongParamCount {
                expected: 2,
                found: 1,
            },
        ),
        ("between#-1#4", SyntaxReason::NegativeSize("-1".into())),
        ("between#1#-4", SyntaxReason::NegativeSize("-4".into())),
        ("between##4", SyntaxReason::InvalidSize("".into())),
        (
            "between#1#4#x",
            SyntaxReason::WrongParamCount {
                expected: 2,
                found: 3,
            },
        ),
    ];

    for (line, expected) in cases {
        assert_eq!(filter_syntax_reason(line), *expected, "line: {:?}", line);
    }
}

#[test]
fn size_values_accept_plus_sign() {
    let pred = build("greater_than#+1").expect("valid filter");
    assert!(pred.test(&sized(2048)));
}

#[test]
fn negative_zero_size_reads_as_zero() {
    let pred = build("greater_than#-0").expect("-0 is not negative");
    assert!(!pred.test(&sized(1023)));
    assert!(pred.test(&sized(1024)));

    let pred = build("between#-00#2").expect("-00 is not negative");
    assert!(pred.test(&sized(0)));
    assert!(pred.test(&sized(2048)));
    assert!(!pred.test(&sized(3072)));

    assert_eq!(
        filter_syntax_reason("smaller_than#-01"),
        SyntaxReason::NegativeSize("-01".to_owned())
    );
}

#[test]
fn name_filters_test_base_name() {
    let report = rec("report.txt", 10, FileAttrs::empty());
    let notes = rec("notes.md", 10, FileAttrs::empty());

    let cases: &[(&str, bool, bool)] = &[
        ("file#report.txt", true, false),
        ("file#report", false, false),
        ("contains#port", true, false),
        ("contains#data", false, false),
        ("prefix#rep", true, false),
        ("prefix#note", false, true),
        ("suffix#.txt", true, false),
        ("suffix#.md", false, true),
    ];

    for (line, on_report, on_notes) in cases {
        let pred = build(line).expect("valid filter");
        assert_eq!(pred.test(&report), *on_report, "{line} on report.txt");
        assert_eq!(pred.test(&notes), *on_notes, "{line} on notes.md");
    }
}

#[test]
fn name_filters_require_exactly_one_parameter() {
    for line in ["file", "contains#", "prefix#a#b", "suffix#a#b#NOT", "file#NOT"] {
        assert!(
            matches!(
                filter_syntax_reason(line),
                SyntaxReason::WrongParamCount { expected: 1, .. }
            ),
            "line: {line:?}"
        );
    }
}

#[test]
fn empty_interior_parameter_is_allowed() {
    let pred = build("contains##NOT").expect("valid filter");
    // The empty string is contained in every name, so the negation is empty.
    assert!(!pred.test(&rec("any", 0, FileAttrs::empty())));
}

#[test]
fn attribute_filters_compare_flags() {
    let exec = rec("run.sh", 0, FileAttrs::EXECUTABLE | FileAttrs::WRITABLE);
    let hidden = rec(".env", 0, FileAttrs::HIDDEN);

    let cases: &[(&str, bool, bool)] = &[
        ("writable#YES", true, false),
        ("writable#NO", false, true),
        ("executable#YES", true, false),
        ("executable#NO", false, true),
        ("hidden#YES", false, true),
        ("hidden#NO", true, false),
    ];

    for (line, on_exec, on_hidden) in cases {
        let pred = build(line).expect("valid filter");
        assert_eq!(pred.test(&exec), *on_exec, "{line} on run.sh");
        assert_eq!(pred.test(&hidden), *on_hidden, "{line} on .env");
    }
}

#[test]
fn hidden_filter_ignores_executable_bit() {
    let pred = build("hidden#YES").expect("valid filter");
    let visible_exec = rec("tool", 0, FileAttrs::EXECUTABLE);
    assert!(!pred.test(&visible_exec));
}

#[test]
fn attribute_filters_reject_other_literals() {
    for value in ["yes", "no", "TRUE", "1", ""] {
        let line = format!("writable#{value}#NOT");
        let result = build(&line);
        let expected = DirectiveError::InvalidBooleanLiteral {
            kind: "writable",
            value: value.to_owned(),
        };
        assert_eq!(result, Err(expected), "line: {line:?}");
    }
}

#[test]
fn all_accepts_no_parameters() {
    let pred = build("all").expect("valid filter");
    assert!(pred.test(&sized(0)));

    assert_eq!(
        filter_syntax_reason("all#x"),
        SyntaxReason::WrongParamCount {
            expected: 0,
            found: 1
        }
    );
}

#[test]
fn not_negates_the_filter() {
    let pred = build("all#NOT").expect("valid filter");
    assert_eq!(pred, negate(Predicate::all()));
    assert!(!pred.test(&sized(0)));

    let pred = build("suffix#.txt#NOT").expect("valid filter");
    assert!(!pred.test(&rec("a.txt", 0, FileAttrs::empty())));
    assert!(pred.test(&rec("a.md", 0, FileAttrs::empty())));
}

#[test]
fn double_not_is_rejected() {
    assert_eq!(
        filter_syntax_reason("all#NOT#NOT"),
        SyntaxReason::RepeatedModifier("NOT")
    );
    assert_eq!(
        filter_syntax_reason("greater_than#1#NOT#NOT"),
        SyntaxReason::RepeatedModifier("NOT")
    );
}

#[test]
fn unknown_filter_names_are_reported() {
    let cases = ["bogus_kind", "ALL", "default", "NOT", "", "greater-than#5"];

    for line in cases {
        let kind = line.split('#').next().unwrap_or_default();
        assert_eq!(
            build(line),
            Err(DirectiveError::UnknownFilterName(kind.to_owned())),
            "line: {line:?}"
        );
    }
}

#[test]
fn negate_composes() {
    let pred = negate(negate(Predicate::Filter(FilterKind::Prefix("a".into()))));
    assert!(pred.test(&rec("abc", 0, FileAttrs::empty())));
    assert!(!pred.test(&rec("xyz", 0, FileAttrs::empty())));
}

#[test]
fn filter_tag_round_trips_names() {
    let names = [
        "greater_than",
        "smaller_than",
        "between",
        "file",
        "contains",
        "prefix",
        "suffix",
        "writable",
        "executable",
        "hidden",
        "all",
    ];

    for name in names {
        let tag = FilterTag::from_token(name).expect("known tag");
        assert_eq!(tag.as_str(), name);
    }
}
