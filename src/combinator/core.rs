//! The primitive parsers and the wrappers that steer backtracking.

use std::marker::PhantomData;

use crate::cursor::Cursor;
use crate::error::{Expected, Failure, ParseResult};
use crate::trace::traced;
use crate::Parser;

/// Always matches with `value`, consuming nothing.
///
/// # Example
///
/// ```rust
/// use thresh::prelude::*;
///
/// let p = pure(7);
/// let result = p.parse(TextCursor::new("xyz"));
/// assert_eq!(result.unwrap(), 7);
/// ```
pub fn pure<A: Clone>(value: A) -> Pure<A> {
    Pure { value }
}

/// Implementation of [`pure`].
#[derive(Debug, Clone)]
pub struct Pure<A> {
    value: A,
}

impl<C: Cursor, A: Clone> Parser<C, A> for Pure<A> {
    fn apply(&self, input: C) -> ParseResult<C, A> {
        traced("pure", input, |input| ParseResult::Match {
            value: self.value.clone(),
            next: input,
        })
    }

    fn accepts_empty(&self) -> bool {
        true
    }
}

/// Always misses with the given label, consuming nothing.
///
/// Useful as the last alternative of a choice to control the reported
/// message.
pub fn fail<A>(label: impl Into<Expected>) -> Fail<A> {
    Fail {
        label: label.into(),
        output: PhantomData,
    }
}

/// Implementation of [`fail`].
#[derive(Debug, Clone)]
pub struct Fail<A> {
    label: Expected,
    output: PhantomData<fn() -> A>,
}

impl<C: Cursor, A> Parser<C, A> for Fail<A> {
    fn apply(&self, input: C) -> ParseResult<C, A> {
        traced("fail", input, |input| {
            ParseResult::NoMatch(Failure::new(input, self.label.clone()))
        })
    }

    fn label(&self) -> Option<Expected> {
        Some(self.label.clone())
    }
}

/// Matches only at end of input, with `()` as its value.
///
/// # Example
///
/// ```rust
/// use thresh::prelude::*;
///
/// assert!(eof().parse(TextCursor::new("")).matches());
/// assert!(!eof().parse(TextCursor::new("x")).matches());
/// ```
pub fn eof() -> Eof {
    Eof {}
}

/// Implementation of [`eof`].
#[derive(Debug, Clone)]
pub struct Eof {}

impl<C: Cursor> Parser<C, ()> for Eof {
    fn apply(&self, input: C) -> ParseResult<C, ()> {
        traced("eof", input, |input| {
            if input.is_eof() {
                ParseResult::Match {
                    value: (),
                    next: input,
                }
            } else {
                ParseResult::NoMatch(Failure::new(input, Expected::EndOfInput))
            }
        })
    }

    fn accepts_empty(&self) -> bool {
        true
    }

    fn label(&self) -> Option<Expected> {
        Some(Expected::EndOfInput)
    }
}

/// Matches any one token.
pub fn any() -> Any {
    Any {}
}

/// Implementation of [`any`].
#[derive(Debug, Clone)]
pub struct Any {}

impl<C: Cursor> Parser<C, C::Token> for Any {
    fn apply(&self, input: C) -> ParseResult<C, C::Token> {
        traced("any", input, |input| match input.current() {
            Some(token) => ParseResult::Match {
                value: token,
                next: input.advance(),
            },
            None => ParseResult::NoMatch(Failure::new(input, "any token")),
        })
    }

    fn label(&self) -> Option<Expected> {
        Some(Expected::Description("any token".into()))
    }
}

/// Matches one token for which `predicate` holds, reporting `label` when it
/// does not.
///
/// # Example
///
/// ```rust
/// use thresh::prelude::*;
///
/// let digit = satisfy("digit", |c: &char| c.is_ascii_digit());
/// assert_eq!(digit.parse(TextCursor::new("7")).unwrap(), '7');
/// assert!(!digit.parse(TextCursor::new("x")).matches());
/// ```
pub fn satisfy<T, F>(label: impl Into<Expected>, predicate: F) -> Satisfy<F>
where
    F: Fn(&T) -> bool,
{
    Satisfy {
        label: label.into(),
        predicate,
    }
}

/// Implementation of [`satisfy`].
#[derive(Debug, Clone)]
pub struct Satisfy<F> {
    label: Expected,
    predicate: F,
}

impl<C: Cursor, F> Parser<C, C::Token> for Satisfy<F>
where
    F: Fn(&C::Token) -> bool,
{
    fn apply(&self, input: C) -> ParseResult<C, C::Token> {
        traced("satisfy", input, |input| match input.current() {
            Some(token) if (self.predicate)(&token) => ParseResult::Match {
                value: token,
                next: input.advance(),
            },
            _ => ParseResult::NoMatch(Failure::new(input, self.label.clone())),
        })
    }

    fn label(&self) -> Option<Expected> {
        Some(self.label.clone())
    }
}

/// Turns a committed failure of `parser` back into a backtrackable no-match
/// at the entry position, so an enclosing choice can try its alternatives.
///
/// Matches and plain no-matches pass through unchanged.
///
/// # Example
///
/// ```rust
/// use thresh::prelude::*;
///
/// // "abc" consumes 'a', 'b' before missing: committed, so `or` gives up
/// let strict = "abc".or("abd");
/// assert!(!strict.parse(TextCursor::new("abd")).matches());
///
/// let forgiving = attempt("abc").or("abd");
/// assert_eq!(forgiving.parse(TextCursor::new("abd")).unwrap(), "abd");
/// ```
pub fn attempt<P>(parser: P) -> Attempt<P> {
    Attempt { parser }
}

/// Implementation of [`attempt`].
#[derive(Debug, Clone)]
pub struct Attempt<P> {
    parser: P,
}

impl<C: Cursor, A, P: Parser<C, A>> Parser<C, A> for Attempt<P> {
    fn apply(&self, input: C) -> ParseResult<C, A> {
        traced("attempt", input, |input: C| {
            let entry = input.clone();
            match self.parser.apply(input) {
                ParseResult::Partial(failure) => {
                    ParseResult::NoMatch(failure.rewind_to(entry))
                }
                other => other,
            }
        })
    }

    fn accepts_empty(&self) -> bool {
        self.parser.accepts_empty()
    }

    fn label(&self) -> Option<Expected> {
        self.parser.label()
    }
}

/// Runs `parser` as a lookahead: on a match the value is kept but the cursor
/// is rewound to the entry position; any failure becomes a no-match there.
pub fn peek<P>(parser: P) -> Peek<P> {
    Peek { parser }
}

/// Implementation of [`peek`].
#[derive(Debug, Clone)]
pub struct Peek<P> {
    parser: P,
}

impl<C: Cursor, A, P: Parser<C, A>> Parser<C, A> for Peek<P> {
    fn apply(&self, input: C) -> ParseResult<C, A> {
        traced("peek", input, |input: C| {
            let entry = input.clone();
            match self.parser.apply(input) {
                ParseResult::Match { value, .. } => ParseResult::Match {
                    value,
                    next: entry,
                },
                ParseResult::NoMatch(failure) | ParseResult::Partial(failure) => {
                    ParseResult::NoMatch(failure.rewind_to(entry))
                }
            }
        })
    }

    fn accepts_empty(&self) -> bool {
        true
    }

    fn label(&self) -> Option<Expected> {
        self.parser.label()
    }
}

/// Negative lookahead: matches with `()` exactly when `parser` misses, never
/// consuming input.
///
/// When `parser` matches, the reported label is `not <parser's label>`.
pub fn not<A, P>(parser: P) -> Not<P, A> {
    Not {
        parser,
        output: PhantomData,
    }
}

/// Implementation of [`not`].
#[derive(Debug, Clone)]
pub struct Not<P, A> {
    parser: P,
    output: PhantomData<fn() -> A>,
}

impl<C: Cursor, A, P: Parser<C, A>> Parser<C, ()> for Not<P, A> {
    fn apply(&self, input: C) -> ParseResult<C, ()> {
        traced("not", input, |input: C| {
            match self.parser.apply(input.clone()) {
                ParseResult::Match { .. } => {
                    let inner = self
                        .parser
                        .label()
                        .unwrap_or(Expected::Description("a match here".into()));
                    ParseResult::NoMatch(Failure::new(input, Expected::Not(Box::new(inner))))
                }
                _ => ParseResult::Match {
                    value: (),
                    next: input,
                },
            }
        })
    }

    fn accepts_empty(&self) -> bool {
        true
    }
}

/// Lazily parses a sequence of `parser` values out of `input`.
///
/// Equivalent to [`Parser::iterate`] in free-function form.
pub fn iterate<C: Cursor, A, P: Parser<C, A>>(parser: P, input: C) -> Parses<P, C, A> {
    Parses::new(parser, input)
}

/// Iterator over the values a parser finds in an input, produced by
/// [`Parser::iterate`].
///
/// After each match the iterator resumes where the match ended; after each
/// failure it skips one token and tries again; it is exhausted at end of
/// input. A match that consumed nothing also skips one token before the next
/// attempt, so iteration always terminates, even for parsers that accept
/// empty input.
pub struct Parses<P, C, A> {
    parser: P,
    cursor: C,
    output: PhantomData<fn() -> A>,
}

impl<P, C, A> Parses<P, C, A> {
    pub(crate) fn new(parser: P, cursor: C) -> Self {
        Self {
            parser,
            cursor,
            output: PhantomData,
        }
    }

    /// The position the iterator will try next.
    pub fn cursor(&self) -> &C {
        &self.cursor
    }
}

impl<C: Cursor, A, P: Parser<C, A>> Iterator for Parses<P, C, A> {
    type Item = A;

    fn next(&mut self) -> Option<A> {
        loop {
            if self.cursor.is_eof() {
                return None;
            }
            match self.parser.apply(self.cursor.clone()) {
                ParseResult::Match { value, next } => {
                    if next.position() > self.cursor.position() {
                        self.cursor = next;
                    } else {
                        self.cursor = self.cursor.skip(1);
                    }
                    return Some(value);
                }
                ParseResult::NoMatch(_) | ParseResult::Partial(_) => {
                    self.cursor = self.cursor.skip(1);
                }
            }
        }
    }
}
