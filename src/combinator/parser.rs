//! The named parser types behind the [`Parser`] trait's methods.

use std::marker::PhantomData;

use crate::combinator::miss;
use crate::cursor::Cursor;
use crate::error::{Expected, Failure, ParseResult};
use crate::trace::traced;
use crate::Parser;

/// Implementation of [`Parser::map`].
#[derive(Debug, Clone)]
pub struct Map<P, F, A> {
    parser: P,
    map: F,
    output: PhantomData<fn() -> A>,
}

impl<P, F, A> Map<P, F, A> {
    pub(crate) fn new(parser: P, map: F) -> Self {
        Self {
            parser,
            map,
            output: PhantomData,
        }
    }
}

impl<C, A, B, P, F> Parser<C, B> for Map<P, F, A>
where
    C: Cursor,
    P: Parser<C, A>,
    F: Fn(A) -> B,
{
    fn apply(&self, input: C) -> ParseResult<C, B> {
        traced("map", input, |input| {
            self.parser.apply(input).map(&self.map)
        })
    }

    fn accepts_empty(&self) -> bool {
        self.parser.accepts_empty()
    }

    fn label(&self) -> Option<Expected> {
        self.parser.label()
    }
}

/// Implementation of [`Parser::try_map`].
#[derive(Debug, Clone)]
pub struct TryMap<P, F, A> {
    parser: P,
    map: F,
    output: PhantomData<fn() -> A>,
}

impl<P, F, A> TryMap<P, F, A> {
    pub(crate) fn new(parser: P, map: F) -> Self {
        Self {
            parser,
            map,
            output: PhantomData,
        }
    }
}

impl<C, A, B, E2, P, F> Parser<C, B> for TryMap<P, F, A>
where
    C: Cursor,
    P: Parser<C, A>,
    F: Fn(A) -> Result<B, E2>,
    E2: std::fmt::Display,
{
    fn apply(&self, input: C) -> ParseResult<C, B> {
        traced("try_map", input, |input: C| {
            let entry = input.clone();
            match self.parser.apply(input) {
                ParseResult::Match { value, next } => match (self.map)(value) {
                    Ok(mapped) => ParseResult::Match {
                        value: mapped,
                        next,
                    },
                    Err(error) => {
                        ParseResult::NoMatch(Failure::new(entry, error.to_string()))
                    }
                },
                ParseResult::NoMatch(failure) => ParseResult::NoMatch(failure),
                ParseResult::Partial(failure) => ParseResult::Partial(failure),
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

/// Implementation of [`Parser::value`].
#[derive(Debug, Clone)]
pub struct Value<P, A, B> {
    parser: P,
    value: B,
    output: PhantomData<fn() -> A>,
}

impl<P, A, B> Value<P, A, B> {
    pub(crate) fn new(parser: P, value: B) -> Self {
        Self {
            parser,
            value,
            output: PhantomData,
        }
    }
}

impl<C, A, B, P> Parser<C, B> for Value<P, A, B>
where
    C: Cursor,
    P: Parser<C, A>,
    B: Clone,
{
    fn apply(&self, input: C) -> ParseResult<C, B> {
        traced("value", input, |input| {
            self.parser.apply(input).map(|_| self.value.clone())
        })
    }

    fn accepts_empty(&self) -> bool {
        self.parser.accepts_empty()
    }

    fn label(&self) -> Option<Expected> {
        self.parser.label()
    }
}

/// Implementation of [`Parser::expecting`].
#[derive(Debug, Clone)]
pub struct Expecting<P> {
    parser: P,
    label: Expected,
}

impl<P> Expecting<P> {
    pub(crate) fn new(parser: P, label: Expected) -> Self {
        Self { parser, label }
    }
}

impl<C, A, P> Parser<C, A> for Expecting<P>
where
    C: Cursor,
    P: Parser<C, A>,
{
    fn apply(&self, input: C) -> ParseResult<C, A> {
        traced("expecting", input, |input| {
            match self.parser.apply(input) {
                ParseResult::NoMatch(failure) => {
                    ParseResult::NoMatch(failure.relabel(self.label.clone()))
                }
                other => other,
            }
        })
    }

    fn accepts_empty(&self) -> bool {
        self.parser.accepts_empty()
    }

    fn label(&self) -> Option<Expected> {
        Some(self.label.clone())
    }
}

/// Implementation of [`Parser::recognize`].
#[derive(Debug, Clone)]
pub struct Recognize<P, A> {
    parser: P,
    output: PhantomData<fn() -> A>,
}

impl<P, A> Recognize<P, A> {
    pub(crate) fn new(parser: P) -> Self {
        Self {
            parser,
            output: PhantomData,
        }
    }
}

impl<C, A, P> Parser<C, C::Slice> for Recognize<P, A>
where
    C: Cursor,
    P: Parser<C, A>,
{
    fn apply(&self, input: C) -> ParseResult<C, C::Slice> {
        traced("recognize", input, |input: C| {
            let entry = input.clone();
            match self.parser.apply(input) {
                ParseResult::Match { next, .. } => ParseResult::Match {
                    value: entry.slice_to(&next),
                    next,
                },
                ParseResult::NoMatch(failure) => ParseResult::NoMatch(failure),
                ParseResult::Partial(failure) => ParseResult::Partial(failure),
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

/// Implementation of [`Parser::then`].
#[derive(Debug, Clone)]
pub struct Then<P, Q> {
    first: P,
    second: Q,
}

impl<P, Q> Then<P, Q> {
    pub(crate) fn new(first: P, second: Q) -> Self {
        Self { first, second }
    }
}

impl<C, A, B, P, Q> Parser<C, (A, B)> for Then<P, Q>
where
    C: Cursor,
    P: Parser<C, A>,
    Q: Parser<C, B>,
{
    fn apply(&self, input: C) -> ParseResult<C, (A, B)> {
        traced("then", input, |input: C| {
            let entry = input.clone();
            match self.first.apply(input) {
                ParseResult::Match { value: a, next } => {
                    match self.second.apply(next.clone()) {
                        ParseResult::Match {
                            value: b,
                            next: rest,
                        } => ParseResult::Match {
                            value: (a, b),
                            next: rest,
                        },
                        ParseResult::NoMatch(failure) => miss(&entry, &next, failure),
                        ParseResult::Partial(failure) => ParseResult::Partial(failure),
                    }
                }
                ParseResult::NoMatch(failure) => ParseResult::NoMatch(failure),
                ParseResult::Partial(failure) => ParseResult::Partial(failure),
            }
        })
    }

    fn accepts_empty(&self) -> bool {
        self.first.accepts_empty() && self.second.accepts_empty()
    }

    fn label(&self) -> Option<Expected> {
        self.first.label()
    }
}

/// Implementation of [`Parser::then_skip`].
#[derive(Debug, Clone)]
pub struct ThenSkip<P, Q, B> {
    first: P,
    second: Q,
    skipped: PhantomData<fn() -> B>,
}

impl<P, Q, B> ThenSkip<P, Q, B> {
    pub(crate) fn new(first: P, second: Q) -> Self {
        Self {
            first,
            second,
            skipped: PhantomData,
        }
    }
}

impl<C, A, B, P, Q> Parser<C, A> for ThenSkip<P, Q, B>
where
    C: Cursor,
    P: Parser<C, A>,
    Q: Parser<C, B>,
{
    fn apply(&self, input: C) -> ParseResult<C, A> {
        traced("then_skip", input, |input: C| {
            let entry = input.clone();
            match self.first.apply(input) {
                ParseResult::Match { value, next } => match self.second.apply(next.clone()) {
                    ParseResult::Match { next: rest, .. } => ParseResult::Match {
                        value,
                        next: rest,
                    },
                    ParseResult::NoMatch(failure) => miss(&entry, &next, failure),
                    ParseResult::Partial(failure) => ParseResult::Partial(failure),
                },
                ParseResult::NoMatch(failure) => ParseResult::NoMatch(failure),
                ParseResult::Partial(failure) => ParseResult::Partial(failure),
            }
        })
    }

    fn accepts_empty(&self) -> bool {
        self.first.accepts_empty() && self.second.accepts_empty()
    }

    fn label(&self) -> Option<Expected> {
        self.first.label()
    }
}

/// Implementation of [`Parser::skip_then`].
#[derive(Debug, Clone)]
pub struct SkipThen<P, Q, A> {
    first: P,
    second: Q,
    skipped: PhantomData<fn() -> A>,
}

impl<P, Q, A> SkipThen<P, Q, A> {
    pub(crate) fn new(first: P, second: Q) -> Self {
        Self {
            first,
            second,
            skipped: PhantomData,
        }
    }
}

impl<C, A, B, P, Q> Parser<C, B> for SkipThen<P, Q, A>
where
    C: Cursor,
    P: Parser<C, A>,
    Q: Parser<C, B>,
{
    fn apply(&self, input: C) -> ParseResult<C, B> {
        traced("skip_then", input, |input: C| {
            let entry = input.clone();
            match self.first.apply(input) {
                ParseResult::Match { next, .. } => match self.second.apply(next.clone()) {
                    hit @ ParseResult::Match { .. } => hit,
                    ParseResult::NoMatch(failure) => miss(&entry, &next, failure),
                    ParseResult::Partial(failure) => ParseResult::Partial(failure),
                },
                ParseResult::NoMatch(failure) => ParseResult::NoMatch(failure),
                ParseResult::Partial(failure) => ParseResult::Partial(failure),
            }
        })
    }

    fn accepts_empty(&self) -> bool {
        self.first.accepts_empty() && self.second.accepts_empty()
    }

    fn label(&self) -> Option<Expected> {
        self.first.label()
    }
}

/// Implementation of [`Parser::or`].
#[derive(Debug, Clone)]
pub struct Or<P, Q> {
    first: P,
    second: Q,
}

impl<P, Q> Or<P, Q> {
    pub(crate) fn new(first: P, second: Q) -> Self {
        Self { first, second }
    }
}

impl<C, A, P, Q> Parser<C, A> for Or<P, Q>
where
    C: Cursor,
    P: Parser<C, A>,
    Q: Parser<C, A>,
{
    fn apply(&self, input: C) -> ParseResult<C, A> {
        traced("or", input, |input: C| {
            match self.first.apply(input.clone()) {
                ParseResult::NoMatch(first_failure) => match self.second.apply(input) {
                    ParseResult::NoMatch(second_failure) => {
                        ParseResult::NoMatch(first_failure.merge(second_failure))
                    }
                    other => other,
                },
                other => other,
            }
        })
    }

    fn accepts_empty(&self) -> bool {
        self.first.accepts_empty() || self.second.accepts_empty()
    }
}

/// Implementation of [`Parser::opt`].
#[derive(Debug, Clone)]
pub struct Opt<P> {
    parser: P,
}

impl<P> Opt<P> {
    pub(crate) fn new(parser: P) -> Self {
        Self { parser }
    }
}

impl<C, A, P> Parser<C, Option<A>> for Opt<P>
where
    C: Cursor,
    P: Parser<C, A>,
{
    fn apply(&self, input: C) -> ParseResult<C, Option<A>> {
        traced("opt", input, |input: C| {
            match self.parser.apply(input.clone()) {
                ParseResult::Match { value, next } => ParseResult::Match {
                    value: Some(value),
                    next,
                },
                ParseResult::NoMatch(_) => ParseResult::Match {
                    value: None,
                    next: input,
                },
                ParseResult::Partial(failure) => ParseResult::Partial(failure),
            }
        })
    }

    fn accepts_empty(&self) -> bool {
        true
    }
}

/// Implementation of [`Parser::or_else`].
#[derive(Debug, Clone)]
pub struct OrElse<P, A> {
    parser: P,
    default: A,
}

impl<P, A> OrElse<P, A> {
    pub(crate) fn new(parser: P, default: A) -> Self {
        Self { parser, default }
    }
}

impl<C, A, P> Parser<C, A> for OrElse<P, A>
where
    C: Cursor,
    P: Parser<C, A>,
    A: Clone,
{
    fn apply(&self, input: C) -> ParseResult<C, A> {
        traced("or_else", input, |input: C| {
            match self.parser.apply(input.clone()) {
                ParseResult::NoMatch(_) => ParseResult::Match {
                    value: self.default.clone(),
                    next: input,
                },
                other => other,
            }
        })
    }

    fn accepts_empty(&self) -> bool {
        true
    }
}

/// Implementation of [`Parser::only_if`].
#[derive(Debug, Clone)]
pub struct OnlyIf<P, Q, B> {
    parser: P,
    guard: Q,
    guarded: PhantomData<fn() -> B>,
}

impl<P, Q, B> OnlyIf<P, Q, B> {
    pub(crate) fn new(parser: P, guard: Q) -> Self {
        Self {
            parser,
            guard,
            guarded: PhantomData,
        }
    }
}

impl<C, A, B, P, Q> Parser<C, A> for OnlyIf<P, Q, B>
where
    C: Cursor,
    P: Parser<C, A>,
    Q: Parser<C, B>,
{
    fn apply(&self, input: C) -> ParseResult<C, A> {
        traced("only_if", input, |input: C| {
            match self.guard.apply(input.clone()) {
                ParseResult::Match { .. } => self.parser.apply(input),
                ParseResult::NoMatch(failure) | ParseResult::Partial(failure) => {
                    ParseResult::NoMatch(failure.rewind_to(input))
                }
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

/// Implementation of [`Parser::between`].
#[derive(Debug, Clone)]
pub struct Between<P, O, Cl, B1, B2> {
    open: O,
    content: P,
    close: Cl,
    delimiters: PhantomData<fn() -> (B1, B2)>,
}

impl<P, O, Cl, B1, B2> Between<P, O, Cl, B1, B2> {
    pub(crate) fn new(open: O, content: P, close: Cl) -> Self {
        Self {
            open,
            content,
            close,
            delimiters: PhantomData,
        }
    }
}

impl<C, A, B1, B2, P, O, Cl> Parser<C, A> for Between<P, O, Cl, B1, B2>
where
    C: Cursor,
    P: Parser<C, A>,
    O: Parser<C, B1>,
    Cl: Parser<C, B2>,
{
    fn apply(&self, input: C) -> ParseResult<C, A> {
        traced("between", input, |input: C| {
            let entry = input.clone();
            let after_open = match self.open.apply(input) {
                ParseResult::Match { next, .. } => next,
                ParseResult::NoMatch(failure) => return ParseResult::NoMatch(failure),
                ParseResult::Partial(failure) => return ParseResult::Partial(failure),
            };
            let (value, after_content) = match self.content.apply(after_open.clone()) {
                ParseResult::Match { value, next } => (value, next),
                ParseResult::NoMatch(failure) => return miss(&entry, &after_open, failure),
                ParseResult::Partial(failure) => return ParseResult::Partial(failure),
            };
            match self.close.apply(after_content.clone()) {
                ParseResult::Match { next, .. } => ParseResult::Match { value, next },
                ParseResult::NoMatch(failure) => miss(&entry, &after_content, failure),
                ParseResult::Partial(failure) => ParseResult::Partial(failure),
            }
        })
    }

    fn accepts_empty(&self) -> bool {
        self.open.accepts_empty() && self.content.accepts_empty() && self.close.accepts_empty()
    }

    fn label(&self) -> Option<Expected> {
        self.open.label()
    }
}

/// Implementation of [`Parser::recover`].
#[derive(Debug, Clone)]
pub struct Recover<P, Q> {
    parser: P,
    fallback: Q,
}

impl<P, Q> Recover<P, Q> {
    pub(crate) fn new(parser: P, fallback: Q) -> Self {
        Self { parser, fallback }
    }
}

impl<C, A, P, Q> Parser<C, A> for Recover<P, Q>
where
    C: Cursor,
    P: Parser<C, A>,
    Q: Parser<C, A>,
{
    fn apply(&self, input: C) -> ParseResult<C, A> {
        traced("recover", input, |input: C| {
            match self.parser.apply(input.clone()) {
                hit @ ParseResult::Match { .. } => hit,
                original => match self.fallback.apply(input) {
                    hit @ ParseResult::Match { .. } => hit,
                    _ => original,
                },
            }
        })
    }

    fn accepts_empty(&self) -> bool {
        self.parser.accepts_empty() || self.fallback.accepts_empty()
    }
}

/// Implementation of [`Parser::recover_with`].
#[derive(Debug, Clone)]
pub struct RecoverWith<P, H> {
    parser: P,
    handler: H,
}

impl<P, H> RecoverWith<P, H> {
    pub(crate) fn new(parser: P, handler: H) -> Self {
        Self { parser, handler }
    }
}

impl<C, A, P, H> Parser<C, A> for RecoverWith<P, H>
where
    C: Cursor,
    P: Parser<C, A>,
    H: Fn(Failure<C>, bool) -> ParseResult<C, A>,
{
    fn apply(&self, input: C) -> ParseResult<C, A> {
        traced("recover_with", input, |input| {
            match self.parser.apply(input) {
                hit @ ParseResult::Match { .. } => hit,
                ParseResult::NoMatch(failure) => (self.handler)(failure, false),
                ParseResult::Partial(failure) => (self.handler)(failure, true),
            }
        })
    }

    fn accepts_empty(&self) -> bool {
        self.parser.accepts_empty()
    }
}
