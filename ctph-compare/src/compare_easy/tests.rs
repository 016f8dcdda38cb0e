// SPDX-License-Identifier: MIT

//! Tests: [`crate::compare_easy`].

#![cfg(test)]

use alloc::format;

use itertools::iproduct;

use super::{compare, ParseErrorEither, ParseErrorSide};
use crate::signature::ParseError;

/// Valid signatures exercising every orchestrator branch: equal, double
/// and far block sizes, empty and run-collapsed block hashes.
const CORPUS: &[&str] = &[
    "3:ABCDEFGHIJKLMN:OPQRSTUV",
    "3:ABCDEFGHIJKLMNX:OPQRSTUV",
    "3:abcdefghijklmn:opqrstuv",
    "6:ABCDEFGHI:JKLMNOPQR",
    "6:STUVWXYZa:ABCDEFGHI",
    "12:ABCDEFGHI:JKLMNOPQR",
    "24:uvwxyzABCDEF:GHIJKLMNOPQR",
    "48:ABCDEFGHIJKLMN:OPQRSTUV",
    "3:aaaaaa:bbbbbb",
    "3::",
    "0:ABC:DEF",
];

#[test]
fn known_scores() {
    // One character inserted into block hash 1; block hash 2 equal but
    // capped by the doubled block size (6 * 8 / 3 = 16).
    assert_eq!(
        compare("3:ABCDEFGHIJKLMN:OPQRSTUV", "3:ABCDEFGHIJKLMNX:OPQRSTUV").unwrap(),
        16
    );
    // Same edit at an uncapped block size (the second block hash is too
    // short for the prefilter): block hash 1 scores
    // 100 - 100 * (1 * 64 / 29) / 64 = 97.
    assert_eq!(
        compare("48:ABCDEFGHIJKLMN:OPQRST", "48:ABCDEFGHIJKLMNX:OPQRST").unwrap(),
        97
    );
    // Cross-resolution match: sig1's block hash 1 equals sig2's block
    // hash 2; cap = 6 * 9 / 3 = 18.
    assert_eq!(compare("12:ABCDEFGHI:JKLMNOPQR", "6:STUVWXYZa:ABCDEFGHI").unwrap(), 18);
}

#[test]
fn single_inserted_character_scores_between_0_and_100() {
    let score =
        compare("3:ABCDEFGHIJKLMN:OPQRSTUV", "3:ABCDEFGHIJKLMNX:OPQRSTUV").unwrap();
    assert!(score > 0);
    assert!(score < 100);
}

#[test]
fn no_shared_window_scores_zero() {
    assert_eq!(
        compare("3:ABCDEFGHIJKLMN:OPQRSTUV", "3:abcdefghijklmn:opqrstuv").unwrap(),
        0
    );
}

#[test]
fn far_block_sizes_score_zero_without_error() {
    // Ratio of 4 is not comparable; this is a defined zero, not an error.
    assert_eq!(compare("6:ABCDEFGHI:JKLMNOPQR", "24:ABCDEFGHI:JKLMNOPQR").unwrap(), 0);
    assert_eq!(compare("24:ABCDEFGHI:JKLMNOPQR", "6:ABCDEFGHI:JKLMNOPQR").unwrap(), 0);
}

#[test]
fn identity() {
    for &s in CORPUS {
        assert_eq!(compare(s, s).unwrap(), 100, "failed on s={:?}", s);
    }
}

#[test]
fn commutativity_and_bounds() {
    for (&s1, &s2) in iproduct!(CORPUS, CORPUS) {
        let score12 = compare(s1, s2)
            .unwrap_or_else(|err| panic!("failed on s1={:?}, s2={:?}: {}", s1, s2, err));
        let score21 = compare(s2, s1).unwrap();
        assert_eq!(score12, score21, "failed on s1={:?}, s2={:?}", s1, s2);
        assert!(score12 <= 100, "failed on s1={:?}, s2={:?}", s1, s2);
    }
}

#[test]
fn repeat_calls_are_identical() {
    for (&s1, &s2) in iproduct!(CORPUS, CORPUS) {
        assert_eq!(
            compare(s1, s2).unwrap(),
            compare(s1, s2).unwrap(),
            "failed on s1={:?}, s2={:?}",
            s1,
            s2
        );
    }
}

#[test]
fn parse_errors_report_the_failing_side() {
    const VALID: &str = "3:ABCDEF:GHIJKL";
    // The left hand side is parsed first.
    let err = compare("", VALID).unwrap_err();
    assert_eq!(err.side(), ParseErrorSide::Left);
    assert_eq!(*err.inner(), ParseError::EmptyInput);
    let err = compare("", "").unwrap_err();
    assert_eq!(err.side(), ParseErrorSide::Left);

    let err = compare(VALID, "3:aa").unwrap_err();
    assert_eq!(err.side(), ParseErrorSide::Right);
    assert_eq!(*err.inner(), ParseError::InvalidFormat(None));

    for bad in ["notanumber:aa:bb", "3:aa:bb:cc", "3:aa"] {
        assert!(compare(bad, VALID).is_err(), "failed on bad={:?}", bad);
        assert!(compare(VALID, bad).is_err(), "failed on bad={:?}", bad);
    }
}

#[test]
fn parse_error_either_impls() {
    // Test Display
    let err = compare("", "x").unwrap_err();
    assert_eq!(
        format!("{}", err),
        "error occurred while parsing fuzzy hash 1: empty string"
    );
    let err = compare("3:aa:bb", "3:aa:bb:cc").unwrap_err();
    assert_eq!(
        format!("{}", err),
        "error occurred while parsing fuzzy hash 2: invalid ssdeep format"
    );
    // Test source()
    use std::error::Error;
    let err = ParseErrorEither(ParseErrorSide::Left, ParseError::EmptyInput);
    assert!(err.source().is_some());
}
