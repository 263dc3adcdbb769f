//! Property tests for the engine's universal invariants: failures never
//! consume, committed failures always did, matches never move backwards.

use proptest::prelude::*;

use thresh::cursor::Cursor;
use thresh::prelude::*;

/// A grab-bag of parser shapes to run the invariants against.
fn shapes<'s>() -> Vec<BoxedParser<'s, TextCursor<'s>, ()>> {
    let digit = || satisfy("digit", |c: &char| c.is_ascii_digit());
    vec![
        "ab".value(()).boxed(),
        'x'.value(()).boxed(),
        digit().value(()).boxed(),
        digit().one_or_more().value(()).boxed(),
        "ab".or("ax").value(()).boxed(),
        attempt("ab").or("ax").value(()).boxed(),
        digit().then('x').value(()).boxed(),
        digit().separated1(',').value(()).boxed(),
        digit().between('(', ')').value(()).boxed(),
        eof().boxed(),
        not('z').boxed(),
        peek('a').value(()).boxed(),
        digit().opt().value(()).boxed(),
    ]
}

proptest! {
    #[test]
    #[cfg_attr(miri, ignore)]
    fn failures_obey_the_consumption_contract(input in "[abx0-9,()]{0,12}") {
        for parser in shapes() {
            let entry = TextCursor::new(&input);
            match parser.apply(entry) {
                ParseResult::Match { next, .. } => {
                    // matches never move backwards, never past the end
                    prop_assert!(next.position() >= entry.position());
                    prop_assert!(next.position() <= input.chars().count());
                }
                ParseResult::NoMatch(failure) => {
                    // a no-match consumed nothing
                    prop_assert_eq!(failure.at().position(), entry.position());
                }
                ParseResult::Partial(failure) => {
                    // a committed failure consumed something
                    prop_assert!(failure.at().position() > entry.position());
                }
            }
        }
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn applying_twice_gives_equal_results(input in "[abx0-9,()]{0,12}") {
        for parser in shapes() {
            let first = parser.apply(TextCursor::new(&input));
            let second = parser.apply(TextCursor::new(&input));
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn pure_matches_everywhere(value in any::<i32>(), input in "\\PC{0,8}") {
        let result = pure(value).parse(TextCursor::new(&input));
        match result {
            ParseResult::Match { value: v, next } => {
                prop_assert_eq!(v, value);
                prop_assert_eq!(next.position(), 0);
            }
            _ => prop_assert!(false, "pure must always match"),
        }
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn then_identities(input in "[ab0-9]{0,8}") {
        let p = || satisfy("digit", |c: &char| c.is_ascii_digit());
        // left identity: a pure prefix changes nothing
        let left = pure(()).skip_then(p()).parse(TextCursor::new(&input));
        let bare = p().parse(TextCursor::new(&input));
        prop_assert_eq!(left, bare.clone());
        // right identity: a pure suffix changes nothing
        let right = p().then_skip(pure(())).parse(TextCursor::new(&input));
        prop_assert_eq!(right, bare);
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn map_fuses(input in "[0-9a-z]{0,8}") {
        let p = || satisfy("digit", |c: &char| c.is_ascii_digit());
        let two_steps = p().map(|c| c as u32).map(|n| n + 1).parse(TextCursor::new(&input));
        let one_step = p().map(|c| c as u32 + 1).parse(TextCursor::new(&input));
        prop_assert_eq!(two_steps, one_step);
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn or_commits_on_partial(input in "a[a-c]{0,8}") {
        // "ab" either matches, misses cleanly, or commits; whenever it
        // commits, the composed choice returns the very same result
        let committed = "ab".parse(TextCursor::new(&input));
        if committed.committed() {
            let choice = "ab".or("ax").parse(TextCursor::new(&input));
            prop_assert_eq!(choice, committed);
        }
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn attempt_neutral_on_match(input in "ab[a-c]{0,8}") {
        let plain = "ab".parse(TextCursor::new(&input));
        prop_assert!(plain.matches());
        let wrapped = attempt("ab").parse(TextCursor::new(&input));
        prop_assert_eq!(plain, wrapped);
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn empty_repetition_terminates(input in "[ab]{0,8}") {
        // an accepts-empty child cannot loop a repetition
        let result = pure(()).zero_or_more().parse(TextCursor::new(&input));
        prop_assert!(result.matches());
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn parse_all_is_parse_plus_eof(input in "[0-9a-z]{0,8}") {
        let digits = || satisfy("digit", |c: &char| c.is_ascii_digit()).one_or_more();
        let all = digits().parse_all(TextCursor::new(&input));
        let plain = digits().parse(TextCursor::new(&input));
        match plain {
            ParseResult::Match { ref next, .. } => {
                prop_assert_eq!(all.matches(), next.is_eof());
            }
            _ => prop_assert!(!all.matches()),
        }
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn skip_clamps_to_input_length(input in "\\PC{0,16}", n in 0usize..64) {
        let cursor = TextCursor::new(&input).skip(n);
        let len = input.chars().count();
        prop_assert_eq!(cursor.position(), n.min(len));
        prop_assert_eq!(cursor.is_eof(), n >= len);
    }
}
