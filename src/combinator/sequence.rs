//! Flat sequences over tuples of parsers.

use crate::combinator::miss;
use crate::cursor::Cursor;
use crate::error::ParseResult;
use crate::trace::traced;
use crate::Parser;

/// Helper trait for the [`seq`] combinator, implemented for tuples of up to
/// eight parsers.
pub trait Sequence<C: Cursor, O> {
    /// Runs every parser in order, collecting the values into a flat tuple.
    fn sequence(&self, input: C) -> ParseResult<C, O>;

    /// `true` when every element accepts empty input.
    fn sequence_accepts_empty(&self) -> bool;
}

/// Runs a tuple of parsers in order and yields their values as a flat tuple.
///
/// Where [`Parser::then`] nests pairs, `seq` keeps up to eight values side by
/// side, ready for a single `map`. A miss after the first consumed token is a
/// committed failure, exactly as with `then`.
///
/// # Example
///
/// ```rust
/// use thresh::prelude::*;
///
/// let date = seq((number(), '-', number(), '-', number()))
///     .map(|(y, _, m, _, d)| (y, m, d));
/// # fn number<'s>() -> impl Parser<TextCursor<'s>, u32> {
/// #     satisfy("digit", |c: &char| c.is_ascii_digit())
/// #         .one_or_more()
/// #         .map(|ds| ds.into_iter().collect::<String>().parse().unwrap())
/// # }
///
/// let result = date.parse(TextCursor::new("2024-02-29"));
/// assert_eq!(result.unwrap(), (2024, 2, 29));
/// ```
pub fn seq<C: Cursor, O, T: Sequence<C, O>>(parsers: T) -> Seq<T> {
    Seq { parsers }
}

/// Implementation of [`seq`].
#[derive(Debug, Clone)]
pub struct Seq<T> {
    parsers: T,
}

impl<C, O, T> Parser<C, O> for Seq<T>
where
    C: Cursor,
    T: Sequence<C, O>,
{
    fn apply(&self, input: C) -> ParseResult<C, O> {
        traced("seq", input, |input| self.parsers.sequence(input))
    }

    fn accepts_empty(&self) -> bool {
        self.parsers.sequence_accepts_empty()
    }
}

macro_rules! sequence_impl {
    ($(($parser:ident, $output:ident, $value:ident, $idx:tt)),+) => {
        impl<C: Cursor, $($output,)+ $($parser,)+> Sequence<C, ($($output,)+)> for ($($parser,)+)
        where
            $($parser: Parser<C, $output>),+
        {
            fn sequence(&self, input: C) -> ParseResult<C, ($($output,)+)> {
                let entry = input.clone();
                let cur = input;
                $(
                    let ($value, cur) = match self.$idx.apply(cur.clone()) {
                        ParseResult::Match { value, next } => (value, next),
                        ParseResult::NoMatch(failure) => return miss(&entry, &cur, failure),
                        ParseResult::Partial(failure) => return ParseResult::Partial(failure),
                    };
                )+
                ParseResult::Match {
                    value: ($($value,)+),
                    next: cur,
                }
            }

            fn sequence_accepts_empty(&self) -> bool {
                $(self.$idx.accepts_empty() &&)+ true
            }
        }
    };
}

sequence_impl!((P0, A0, v0, 0), (P1, A1, v1, 1));
sequence_impl!((P0, A0, v0, 0), (P1, A1, v1, 1), (P2, A2, v2, 2));
sequence_impl!((P0, A0, v0, 0), (P1, A1, v1, 1), (P2, A2, v2, 2), (P3, A3, v3, 3));
sequence_impl!(
    (P0, A0, v0, 0),
    (P1, A1, v1, 1),
    (P2, A2, v2, 2),
    (P3, A3, v3, 3),
    (P4, A4, v4, 4)
);
sequence_impl!(
    (P0, A0, v0, 0),
    (P1, A1, v1, 1),
    (P2, A2, v2, 2),
    (P3, A3, v3, 3),
    (P4, A4, v4, 4),
    (P5, A5, v5, 5)
);
sequence_impl!(
    (P0, A0, v0, 0),
    (P1, A1, v1, 1),
    (P2, A2, v2, 2),
    (P3, A3, v3, 3),
    (P4, A4, v4, 4),
    (P5, A5, v5, 5),
    (P6, A6, v6, 6)
);
sequence_impl!(
    (P0, A0, v0, 0),
    (P1, A1, v1, 1),
    (P2, A2, v2, 2),
    (P3, A3, v3, 3),
    (P4, A4, v4, 4),
    (P5, A5, v5, 5),
    (P6, A6, v6, 6),
    (P7, A7, v7, 7)
);
