//! The committed-failure discipline: when ordered choice falls through, when
//! it aborts, and how `attempt` changes that.

use thresh::prelude::*;

#[test]
fn choice_commits_after_consumption() {
    // "abc" consumes 'a', 'b' on "abd" before missing 'c': the choice is
    // committed and "abd" never runs
    let strict = "abc".or("abd");
    let result = strict.parse(TextCursor::new("abd"));
    assert!(!result.matches());
    assert!(result.committed());
    assert_eq!(result.failure().unwrap().at().position(), 2);
}

#[test]
fn attempt_enables_the_fallback() {
    let forgiving = attempt("abc").or("abd");
    assert_eq!(forgiving.parse(TextCursor::new("abd")).unwrap(), "abd");
    // and still takes the first branch when it fits
    assert_eq!(forgiving.parse(TextCursor::new("abc")).unwrap(), "abc");
}

#[test]
fn attempt_is_neutral_on_matches() {
    let input = TextCursor::new("abc rest");
    assert_eq!(
        attempt("abc").parse(input),
        "abc".parse(input),
        "attempt must not change a match"
    );
}

#[test]
fn attempt_is_neutral_on_plain_no_matches() {
    let plain = "abc".parse(TextCursor::new("xyz"));
    let wrapped = attempt("abc").parse(TextCursor::new("xyz"));
    assert_eq!(plain, wrapped);
}

#[test]
fn committed_failures_from_choices_propagate_outward() {
    // the committed failure escapes nested choices too
    let inner = "ab".or("cd");
    let outer = inner.or("ax");
    let result = outer.parse(TextCursor::new("ax"));
    assert!(result.committed(), "the outer choice must not mask a commit");
}

#[test]
fn sequences_commit_exactly_when_input_was_consumed() {
    // nothing consumed: backtrackable
    let p = 'a'.then('b');
    assert!(!p.parse(TextCursor::new("xx")).committed());
    // first element consumed: committed
    assert!(p.parse(TextCursor::new("ax")).committed());

    // a non-consuming first element does not commit
    let q = pure(()).then('a');
    assert!(!q.parse(TextCursor::new("b")).committed());
}

#[test]
fn attempt_rewinds_the_reported_position() {
    let result = attempt("hello").parse(TextCursor::new("help"));
    let failure = result.failure().unwrap();
    // the failure is backtrackable and anchored at the entry position
    assert!(!result.committed());
    assert_eq!(failure.at().position(), 0);
}

#[test]
fn or_after_attempt_reports_both_branches() {
    let p = attempt("hello").or(attempt("hi"));
    let report = p.parse(TextCursor::new("hx")).error().unwrap();
    assert!(report.contains("expected 'hello'"), "{report}");
    assert!(report.contains("expected 'hi'"), "{report}");
}

#[test]
fn repetition_respects_commits() {
    // the second "ab" is cut short: the whole repetition reports it
    let p = "ab".zero_or_more();
    let result = p.parse(TextCursor::new("abax"));
    assert!(result.committed());

    // wrapped in attempt, the repetition stops cleanly instead
    let lenient = attempt("ab").zero_or_more();
    match lenient.parse(TextCursor::new("abax")) {
        ParseResult::Match { value, next } => {
            assert_eq!(value, vec!["ab"]);
            assert_eq!(next.position(), 2);
        }
        other => panic!("expected a match, got {other:?}"),
    }
}
