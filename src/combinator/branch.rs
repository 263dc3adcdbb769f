//! Ordered choice over tuples of parsers.

use crate::cursor::Cursor;
use crate::error::{Failure, ParseResult};
use crate::trace::traced;
use crate::Parser;

/// Helper trait for the [`one_of`] combinator, implemented for tuples of up
/// to eight parsers with a common output type.
pub trait Choice<C: Cursor, A> {
    /// Tries each alternative in order, first match wins.
    fn choice(&self, input: C) -> ParseResult<C, A>;

    /// `true` when any alternative accepts empty input.
    fn choice_accepts_empty(&self) -> bool;
}

/// Tries a tuple of parsers one by one until one matches.
///
/// A no-match falls through to the next alternative; a committed failure
/// aborts the whole choice (wrap the alternative in
/// [`attempt`][crate::combinator::attempt] to keep going). When every
/// alternative misses, the labels are aggregated into one no-match so the
/// report can list everything that would have been acceptable.
///
/// Nest calls for more than eight alternatives:
/// `one_of((a, one_of((b, c))))`.
///
/// # Example
///
/// ```rust
/// use thresh::prelude::*;
///
/// let keyword = one_of(("let", "if", "while"));
/// assert_eq!(keyword.parse(TextCursor::new("while")).unwrap(), "while");
///
/// let report = keyword.parse(TextCursor::new("for")).error().unwrap();
/// assert!(report.contains("expected 'let'"));
/// assert!(report.contains("expected 'while'"));
/// ```
pub fn one_of<C: Cursor, A, T: Choice<C, A>>(alternatives: T) -> OneOf<T> {
    OneOf { alternatives }
}

/// Implementation of [`one_of`].
#[derive(Debug, Clone)]
pub struct OneOf<T> {
    alternatives: T,
}

impl<C, A, T> Parser<C, A> for OneOf<T>
where
    C: Cursor,
    T: Choice<C, A>,
{
    fn apply(&self, input: C) -> ParseResult<C, A> {
        traced("one_of", input, |input| self.alternatives.choice(input))
    }

    fn accepts_empty(&self) -> bool {
        self.alternatives.choice_accepts_empty()
    }
}

macro_rules! choice_impl {
    ($($parser:ident $idx:tt),+) => {
        impl<C: Cursor, A, $($parser),+> Choice<C, A> for ($($parser,)+)
        where
            $($parser: Parser<C, A>),+
        {
            fn choice(&self, input: C) -> ParseResult<C, A> {
                let mut merged: Option<Failure<C>> = None;
                $(
                    match self.$idx.apply(input.clone()) {
                        hit @ ParseResult::Match { .. } => return hit,
                        committed @ ParseResult::Partial(_) => return committed,
                        ParseResult::NoMatch(failure) => {
                            merged = Some(match merged.take() {
                                Some(earlier) => earlier.merge(failure),
                                None => failure,
                            });
                        }
                    }
                )+
                ParseResult::NoMatch(merged.expect("choice over at least one alternative"))
            }

            fn choice_accepts_empty(&self) -> bool {
                $(self.$idx.accepts_empty() ||)+ false
            }
        }
    };
}

choice_impl!(P0 0, P1 1);
choice_impl!(P0 0, P1 1, P2 2);
choice_impl!(P0 0, P1 1, P2 2, P3 3);
choice_impl!(P0 0, P1 1, P2 2, P3 3, P4 4);
choice_impl!(P0 0, P1 1, P2 2, P3 3, P4 4, P5 5);
choice_impl!(P0 0, P1 1, P2 2, P3 3, P4 4, P5 5, P6 6);
choice_impl!(P0 0, P1 1, P2 2, P3 3, P4 4, P5 5, P6 6, P7 7);
