//! Recursive references and the same-position re-entry guard.

use thresh::prelude::*;

fn digit<'s>() -> impl Parser<TextCursor<'s>, i64> {
    Parser::<TextCursor<'s>, char>::map(
        satisfy::<char, _>("digit", |c: &char| c.is_ascii_digit()),
        |c| i64::from(c as u8 - b'0'),
    )
}

#[test]
fn mutually_recursive_grammars() {
    // list = '(' items? ')', items = value (',' value)*, value = digit | list
    let value: Ref<'_, TextCursor<'_>, i64> = Ref::new();
    let list = value
        .clone()
        .separated0(',')
        .between('(', ')')
        .map(|items| items.into_iter().sum());
    value.set(digit().or(list));

    assert_eq!(value.parse_all(TextCursor::new("(1,2,(3,4))")).unwrap(), 10);
    assert_eq!(value.parse_all(TextCursor::new("()")).unwrap(), 0);
    assert_eq!(value.parse_all(TextCursor::new("((((5))))")).unwrap(), 5);
}

#[test]
fn left_recursion_reports_instead_of_looping() {
    // expr = expr '+' digit | digit: left-recursive as written
    let expr: Ref<'_, TextCursor<'_>, i64> = Ref::new().with_recursion_limit(16);
    expr.set(
        expr.clone()
            .then_skip('+')
            .then(digit())
            .map(|(a, b)| a + b)
            .or(digit()),
    );

    let result = expr.parse(TextCursor::new("1+2"));
    assert!(!result.matches());
    assert!(result.committed());
    assert!(
        result.error().unwrap().contains("recursion limit reached"),
        "{}",
        result.error().unwrap()
    );
}

#[test]
fn the_guard_bound_is_configurable() {
    let shallow: Ref<'_, TextCursor<'_>, i64> = Ref::new().with_recursion_limit(2);
    shallow.set(shallow.clone().then_skip('!').or(digit()));
    // self-reference without consuming: trips after two same-position entries
    let result = shallow.parse(TextCursor::new("9!"));
    assert!(result.error().unwrap().contains("recursion limit"));
}

#[test]
fn consuming_recursion_does_not_trip_the_guard() {
    // 100 levels deep, each entry at a new position
    let deep = format!("{}7{}", "<".repeat(100), ">".repeat(100));
    let nested: Ref<'_, TextCursor<'_>, i64> = Ref::new().with_recursion_limit(2);
    nested.set(nested.clone().between('<', '>').or(digit()));
    assert_eq!(nested.parse_all(TextCursor::new(&deep)).unwrap(), 7);
}

#[test]
fn unset_references_fail_with_their_own_label() {
    let unset: Ref<'_, TextCursor<'_>, char> = Ref::new();
    let result = unset.parse(TextCursor::new("anything"));
    assert!(!result.matches());
    assert!(result.committed());
    assert!(result
        .error()
        .unwrap()
        .contains("unassigned parser reference"));
}

#[test]
fn guard_state_is_released_between_parses() {
    let expr: Ref<'_, TextCursor<'_>, i64> = Ref::new().with_recursion_limit(4);
    expr.set(expr.clone().between('(', ')').or(digit()));
    // run the same parser many times; the thread-local counters must unwind
    // cleanly each time or later runs would trip early
    for _ in 0..100 {
        assert_eq!(expr.parse_all(TextCursor::new("((3))")).unwrap(), 3);
        assert!(!expr.parse_all(TextCursor::new("((x))")).matches());
    }
}
