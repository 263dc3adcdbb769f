//! Basic types to build the parsers

use std::rc::Rc;

use crate::combinator::{
    Between, ChainLeft, ChainRight, Expecting, Map, OnlyIf, Opt, Or, OrElse, Parses, Range,
    Recognize, Recover, RecoverWith, Repeat, RepeatTill, Separated, SkipThen, TakeWhile, Then,
    ThenSkip, TryMap, Value,
};
use crate::cursor::Cursor;
use crate::error::{Expected, Failure, ParseResult};

/// A parser from cursors of type `C` to values of type `A`.
///
/// The only required method is [`Parser::apply`]; everything else is the
/// combinator surface, implemented by wrapping `self` in small named parser
/// types. Applying a parser never mutates it, so the same parser value can be
/// shared and re-applied freely; backtracking re-runs branches, which is why
/// mapping functions passed to [`Parser::map`] should be pure.
///
/// Parsers are implemented by:
/// - closures `Fn(C) -> ParseResult<C, A>`,
/// - `char` (matches that character on char cursors),
/// - `&'static str` (matches the literal; a mismatch after the first
///   character is a committed failure),
/// - the combinator types in [`crate::combinator`].
///
/// # Example
///
/// ```rust
/// use thresh::prelude::*;
///
/// let digits = satisfy("digit", |c: &char| c.is_ascii_digit())
///     .one_or_more()
///     .map(|ds| ds.into_iter().collect::<String>());
/// let assignment = digits.then_skip('=').then(satisfy("letter", |c: &char| c.is_ascii_alphabetic()));
///
/// let result = assignment.parse(TextCursor::new("42=x"));
/// assert_eq!(result.unwrap(), ("42".to_owned(), 'x'));
/// ```
pub trait Parser<C: Cursor, A> {
    /// Runs the parser at `input`.
    ///
    /// The result obeys the engine contracts: a [`ParseResult::NoMatch`]
    /// reports at the entry position with nothing consumed, a
    /// [`ParseResult::Partial`] reports past it, and a
    /// [`ParseResult::Match`]'s cursor never moves backwards.
    fn apply(&self, input: C) -> ParseResult<C, A>;

    /// `true` when this parser can match without consuming input.
    ///
    /// Repetition combinators consult this structurally and also guard at
    /// runtime, refusing to iterate again at an unchanged position.
    fn accepts_empty(&self) -> bool {
        false
    }

    /// The label this parser reports when it misses, when it has one.
    ///
    /// Used by [`not`][crate::combinator::not] to describe what must *not*
    /// match.
    fn label(&self) -> Option<Expected> {
        None
    }

    /// Runs the parser at `input`, allowing unconsumed trailing input.
    ///
    /// This is the top-level entry point; it is [`Parser::apply`] under a
    /// friendlier name.
    fn parse(&self, input: C) -> ParseResult<C, A> {
        self.apply(input)
    }

    /// Runs the parser at `input` and requires it to consume everything.
    ///
    /// Trailing tokens turn a match into a no-match labeled `end of input`
    /// at the first unconsumed token.
    fn parse_all(&self, input: C) -> ParseResult<C, A> {
        match self.apply(input) {
            ParseResult::Match { value, next } => {
                if next.is_eof() {
                    ParseResult::Match { value, next }
                } else {
                    ParseResult::NoMatch(Failure::new(next, Expected::EndOfInput))
                }
            }
            miss => miss,
        }
    }

    /// Maps the matched value through `map`.
    fn map<B, F>(self, map: F) -> Map<Self, F, A>
    where
        Self: Sized,
        F: Fn(A) -> B,
    {
        Map::new(self, map)
    }

    /// Maps the matched value through a fallible `map`; an `Err` becomes a
    /// no-match at the entry position labeled with the error's message.
    fn try_map<B, E2, F>(self, map: F) -> TryMap<Self, F, A>
    where
        Self: Sized,
        F: Fn(A) -> Result<B, E2>,
        E2: std::fmt::Display,
    {
        TryMap::new(self, map)
    }

    /// Replaces the matched value with a constant.
    fn value<B>(self, value: B) -> Value<Self, A, B>
    where
        Self: Sized,
        B: Clone,
    {
        Value::new(self, value)
    }

    /// Overrides the label of an outermost no-match; matches and committed
    /// failures pass through untouched.
    fn expecting(self, label: impl Into<Expected>) -> Expecting<Self>
    where
        Self: Sized,
    {
        Expecting::new(self, label.into())
    }

    /// Discards the value and yields the raw input the parser consumed.
    fn recognize(self) -> Recognize<Self, A>
    where
        Self: Sized,
    {
        Recognize::new(self)
    }

    /// Sequences `second` after `self`, yielding both values as a pair.
    ///
    /// Longer sequences nest pairs; for a flat tuple of up to eight values
    /// use [`seq`][crate::combinator::seq]. A miss in `second` after `self`
    /// consumed input is a committed failure.
    fn then<B, Q>(self, second: Q) -> Then<Self, Q>
    where
        Self: Sized,
        Q: Parser<C, B>,
    {
        Then::new(self, second)
    }

    /// Sequences `second` after `self`, keeping `self`'s value.
    fn then_skip<B, Q>(self, second: Q) -> ThenSkip<Self, Q, B>
    where
        Self: Sized,
        Q: Parser<C, B>,
    {
        ThenSkip::new(self, second)
    }

    /// Sequences `second` after `self`, keeping `second`'s value.
    fn skip_then<B, Q>(self, second: Q) -> SkipThen<Self, Q, A>
    where
        Self: Sized,
        Q: Parser<C, B>,
    {
        SkipThen::new(self, second)
    }

    /// Ordered choice: tries `self`, falling back to `other` on a no-match.
    ///
    /// A committed failure in `self` aborts the choice; wrap `self` in
    /// [`attempt`][crate::combinator::attempt] to fall through anyway. When
    /// both miss, the labels are aggregated into one no-match. For more than
    /// two alternatives see [`one_of`][crate::combinator::one_of].
    fn or<Q>(self, other: Q) -> Or<Self, Q>
    where
        Self: Sized,
        Q: Parser<C, A>,
    {
        Or::new(self, other)
    }

    /// Makes the parser optional: `Some(value)` on a match, `None` on a
    /// no-match without consuming. Committed failures propagate.
    fn opt(self) -> Opt<Self>
    where
        Self: Sized,
    {
        Opt::new(self)
    }

    /// Yields `default` on a no-match without consuming. Committed failures
    /// propagate.
    fn or_else(self, default: A) -> OrElse<Self, A>
    where
        Self: Sized,
        A: Clone,
    {
        OrElse::new(self, default)
    }

    /// Succeeds with `self`'s result only when `guard` also matches as a
    /// lookahead at the entry position.
    fn only_if<B, Q>(self, guard: Q) -> OnlyIf<Self, Q, B>
    where
        Self: Sized,
        Q: Parser<C, B>,
    {
        OnlyIf::new(self, guard)
    }

    /// Parses `open self close`, keeping only `self`'s value.
    fn between<B1, B2, O, Cl>(self, open: O, close: Cl) -> Between<Self, O, Cl, B1, B2>
    where
        Self: Sized,
        O: Parser<C, B1>,
        Cl: Parser<C, B2>,
    {
        Between::new(open, self, close)
    }

    /// [`between`][Parser::between] with the same bracket on both sides.
    fn between_same<B, Br>(self, bracket: Br) -> Between<Self, Br, Br, B, B>
    where
        Self: Sized,
        Br: Parser<C, B> + Clone,
    {
        Between::new(bracket.clone(), self, bracket)
    }

    /// Applies the parser a bounded number of times, collecting the values.
    ///
    /// The bound is anything convertible to a [`Range`]: an exact count
    /// (`.repeat(3)`), a minimum (`.repeat(1..)`), a maximum (`.repeat(..=4)`)
    /// or both (`.repeat(2..=4)`). Missing inside the required range after
    /// consuming input is a committed failure.
    fn repeat(self, range: impl Into<Range>) -> Repeat<Self>
    where
        Self: Sized,
    {
        Repeat::new(self, range.into())
    }

    /// Applies the parser any number of times; never misses.
    fn zero_or_more(self) -> Repeat<Self>
    where
        Self: Sized,
    {
        self.repeat(0..)
    }

    /// Applies the parser at least once.
    fn one_or_more(self) -> Repeat<Self>
    where
        Self: Sized,
    {
        self.repeat(1..)
    }

    /// Collects `self` items separated by `sep`, zero or more times.
    ///
    /// The separator's value is discarded and a trailing separator is a
    /// committed failure: once a separator matched, an item must follow.
    fn separated0<B, S>(self, sep: S) -> Separated<Self, S, B>
    where
        Self: Sized,
        S: Parser<C, B>,
    {
        Separated::new(self, sep, 0)
    }

    /// Collects `self` items separated by `sep`, at least one item.
    fn separated1<B, S>(self, sep: S) -> Separated<Self, S, B>
    where
        Self: Sized,
        S: Parser<C, B>,
    {
        Separated::new(self, sep, 1)
    }

    /// Collects `self` items until `end` matches; `end`'s match is consumed
    /// and its value discarded.
    fn repeat_till0<B, Q>(self, end: Q) -> RepeatTill<Self, Q, B>
    where
        Self: Sized,
        Q: Parser<C, B>,
    {
        RepeatTill::new(self, end, 0)
    }

    /// Like [`repeat_till0`][Parser::repeat_till0] but requires at least one
    /// item before `end`.
    fn repeat_till1<B, Q>(self, end: Q) -> RepeatTill<Self, Q, B>
    where
        Self: Sized,
        Q: Parser<C, B>,
    {
        RepeatTill::new(self, end, 1)
    }

    /// Collects `self` items for as long as the `cond` lookahead matches at
    /// the current position. `cond` never consumes input.
    fn take_while<B, Q>(self, cond: Q) -> TakeWhile<Self, Q, B>
    where
        Self: Sized,
        Q: Parser<C, B>,
    {
        TakeWhile::new(self, cond)
    }

    /// Parses `self (op self)*` and folds left-associatively: the operator
    /// parser yields the function to combine the operands on each side of it.
    ///
    /// `"8/4/2"` with a division operator folds as `(8/4)/2`.
    fn chain_left1<F, Q>(self, op: Q) -> ChainLeft<Self, Q, A, F>
    where
        Self: Sized,
        Q: Parser<C, F>,
        F: Fn(A, A) -> A,
    {
        ChainLeft::new(self, op, None)
    }

    /// Like [`chain_left1`][Parser::chain_left1] but yields `default` when
    /// there is no operand at all.
    fn chain_left0<F, Q>(self, op: Q, default: A) -> ChainLeft<Self, Q, A, F>
    where
        Self: Sized,
        Q: Parser<C, F>,
        F: Fn(A, A) -> A,
    {
        ChainLeft::new(self, op, Some(default))
    }

    /// Parses `self (op self)*` and folds right-associatively.
    ///
    /// `"2^3^2"` with an exponentiation operator folds as `2^(3^2)`.
    fn chain_right1<F, Q>(self, op: Q) -> ChainRight<Self, Q, A, F>
    where
        Self: Sized,
        Q: Parser<C, F>,
        F: Fn(A, A) -> A,
    {
        ChainRight::new(self, op, None)
    }

    /// Like [`chain_right1`][Parser::chain_right1] but yields `default` when
    /// there is no operand at all.
    fn chain_right0<F, Q>(self, op: Q, default: A) -> ChainRight<Self, Q, A, F>
    where
        Self: Sized,
        Q: Parser<C, F>,
        F: Fn(A, A) -> A,
    {
        ChainRight::new(self, op, Some(default))
    }

    /// On any failure of `self`, tries `fallback` from the entry position;
    /// if it also fails, `self`'s original failure is reported.
    fn recover<Q>(self, fallback: Q) -> Recover<Self, Q>
    where
        Self: Sized,
        Q: Parser<C, A>,
    {
        Recover::new(self, fallback)
    }

    /// On any failure of `self`, hands the failure record (and whether it
    /// was committed) to `handler`, which decides the outcome.
    fn recover_with<H>(self, handler: H) -> RecoverWith<Self, H>
    where
        Self: Sized,
        H: Fn(Failure<C>, bool) -> ParseResult<C, A>,
    {
        RecoverWith::new(self, handler)
    }

    /// Lazily parses a sequence of values out of `input`.
    ///
    /// On each failure the iterator skips one token and tries again; it ends
    /// at end of input. See [`Parses`] for the termination policy on parsers
    /// that match without consuming.
    fn iterate(self, input: C) -> Parses<Self, C, A>
    where
        Self: Sized,
    {
        Parses::new(self, input)
    }

    /// Erases the parser's type behind a cheaply clonable handle, so grammars
    /// can be stored, shared, and named.
    fn boxed<'p>(self) -> BoxedParser<'p, C, A>
    where
        Self: Sized + 'p,
    {
        BoxedParser::new(self)
    }
}

impl<C: Cursor, A, F> Parser<C, A> for F
where
    F: Fn(C) -> ParseResult<C, A>,
{
    #[inline]
    fn apply(&self, input: C) -> ParseResult<C, A> {
        self(input)
    }
}

/// Matches exactly this character on char cursors.
impl<C> Parser<C, char> for char
where
    C: Cursor<Token = char>,
{
    fn apply(&self, input: C) -> ParseResult<C, char> {
        match input.current() {
            Some(c) if c == *self => ParseResult::Match {
                value: c,
                next: input.advance(),
            },
            _ => ParseResult::NoMatch(Failure::new(input, Expected::Char(*self))),
        }
    }

    fn label(&self) -> Option<Expected> {
        Some(Expected::Char(*self))
    }
}

/// Matches this literal, character by character, on char cursors.
///
/// A mismatch after the first character has consumed input and is therefore
/// a committed failure; wrap the literal in
/// [`attempt`][crate::combinator::attempt] when an enclosing choice should
/// still try other alternatives.
impl<C> Parser<C, &'static str> for &'static str
where
    C: Cursor<Token = char>,
{
    fn apply(&self, input: C) -> ParseResult<C, &'static str> {
        let mut cur = input.clone();
        for expected in self.chars() {
            match cur.current() {
                Some(c) if c == expected => cur = cur.advance(),
                _ => {
                    let failure = Failure::new(cur.clone(), Expected::Literal(*self));
                    return if cur.position() > input.position() {
                        ParseResult::Partial(failure)
                    } else {
                        ParseResult::NoMatch(failure)
                    };
                }
            }
        }
        ParseResult::Match {
            value: *self,
            next: cur,
        }
    }

    fn accepts_empty(&self) -> bool {
        self.is_empty()
    }

    fn label(&self) -> Option<Expected> {
        Some(Expected::Literal(*self))
    }
}

/// A type-erased, cheaply clonable parser handle.
///
/// Produced by [`Parser::boxed`]; cloning shares the underlying parser.
/// Grammar-building functions return these so recursive grammars can be
/// assembled without naming deeply nested combinator types. The lifetime is
/// that of the erased parser, which is in turn bounded by the cursor type it
/// parses (a grammar over borrowed text lives as long as that text's
/// lifetime parameter allows).
pub struct BoxedParser<'p, C, A> {
    inner: Rc<dyn Parser<C, A> + 'p>,
}

impl<'p, C: Cursor, A> BoxedParser<'p, C, A> {
    /// Erases `parser`.
    pub fn new(parser: impl Parser<C, A> + 'p) -> Self {
        Self {
            inner: Rc::new(parser),
        }
    }
}

impl<C, A> Clone for BoxedParser<'_, C, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<C: Cursor, A> Parser<C, A> for BoxedParser<'_, C, A> {
    #[inline]
    fn apply(&self, input: C) -> ParseResult<C, A> {
        self.inner.apply(input)
    }

    fn accepts_empty(&self) -> bool {
        self.inner.accepts_empty()
    }

    fn label(&self) -> Option<Expected> {
        self.inner.label()
    }
}
