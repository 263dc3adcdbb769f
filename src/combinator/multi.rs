//! Combinators applying their child parser multiple times.
//!
//! All of them share the repetition contract: a committed failure inside the
//! child propagates, a miss below the required minimum is committed exactly
//! when input was consumed, and iteration refuses to run the child twice at
//! an unchanged position, so parsers that accept empty input cannot loop.

use std::marker::PhantomData;

use crate::combinator::miss;
use crate::cursor::Cursor;
use crate::error::{Failure, ParseResult};
use crate::trace::traced;
use crate::Parser;

/// A repetition count range for [`Parser::repeat`].
///
/// Converted from the usual range syntax:
///
/// | input | meaning |
/// |---|---|
/// | `3` | exactly 3 |
/// | `1..` | at least 1 |
/// | `..=4` | at most 4 |
/// | `2..=4` | between 2 and 4 |
/// | `..` | any number |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub(crate) start_inclusive: usize,
    pub(crate) end_inclusive: Option<usize>,
}

impl From<usize> for Range {
    fn from(exact: usize) -> Self {
        Self {
            start_inclusive: exact,
            end_inclusive: Some(exact),
        }
    }
}

impl From<std::ops::RangeFrom<usize>> for Range {
    fn from(range: std::ops::RangeFrom<usize>) -> Self {
        Self {
            start_inclusive: range.start,
            end_inclusive: None,
        }
    }
}

impl From<std::ops::Range<usize>> for Range {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self {
            start_inclusive: range.start,
            end_inclusive: Some(range.end.saturating_sub(1)),
        }
    }
}

impl From<std::ops::RangeInclusive<usize>> for Range {
    fn from(range: std::ops::RangeInclusive<usize>) -> Self {
        Self {
            start_inclusive: *range.start(),
            end_inclusive: Some(*range.end()),
        }
    }
}

impl From<std::ops::RangeToInclusive<usize>> for Range {
    fn from(range: std::ops::RangeToInclusive<usize>) -> Self {
        Self {
            start_inclusive: 0,
            end_inclusive: Some(range.end),
        }
    }
}

impl From<std::ops::RangeTo<usize>> for Range {
    fn from(range: std::ops::RangeTo<usize>) -> Self {
        Self {
            start_inclusive: 0,
            end_inclusive: Some(range.end.saturating_sub(1)),
        }
    }
}

impl From<std::ops::RangeFull> for Range {
    fn from(_: std::ops::RangeFull) -> Self {
        Self {
            start_inclusive: 0,
            end_inclusive: None,
        }
    }
}

/// Implementation of [`Parser::repeat`], [`Parser::zero_or_more`] and
/// [`Parser::one_or_more`].
#[derive(Debug, Clone)]
pub struct Repeat<P> {
    parser: P,
    range: Range,
}

impl<P> Repeat<P> {
    pub(crate) fn new(parser: P, range: Range) -> Self {
        Self { parser, range }
    }
}

impl<C, A, P> Parser<C, Vec<A>> for Repeat<P>
where
    C: Cursor,
    P: Parser<C, A>,
{
    fn apply(&self, input: C) -> ParseResult<C, Vec<A>> {
        traced("repeat", input, |input: C| {
            let min = self.range.start_inclusive;
            let max = self.range.end_inclusive.unwrap_or(usize::MAX);
            if min > max {
                return ParseResult::Partial(Failure::new(
                    input,
                    format!("a repetition range with min <= max, got {min}..={max}"),
                ));
            }

            let entry = input.clone();
            let mut items = Vec::new();
            let mut cur = input;
            while items.len() < max {
                let before = cur.position();
                match self.parser.apply(cur.clone()) {
                    ParseResult::Match { value, next } => {
                        let progressed = next.position() > before;
                        items.push(value);
                        cur = next;
                        if !progressed {
                            // the child accepted empty input; take the value
                            // once and refuse to iterate here again
                            break;
                        }
                    }
                    ParseResult::NoMatch(failure) => {
                        if items.len() < min {
                            return miss(&entry, &cur, failure);
                        }
                        break;
                    }
                    ParseResult::Partial(failure) => return ParseResult::Partial(failure),
                }
            }
            if items.len() < min {
                let failure =
                    Failure::new(cur.clone(), format!("at least {min} repetitions"));
                return miss(&entry, &cur, failure);
            }
            ParseResult::Match {
                value: items,
                next: cur,
            }
        })
    }

    fn accepts_empty(&self) -> bool {
        self.range.start_inclusive == 0 || self.parser.accepts_empty()
    }
}

/// Implementation of [`Parser::separated0`] and [`Parser::separated1`].
#[derive(Debug, Clone)]
pub struct Separated<P, S, B> {
    parser: P,
    sep: S,
    min: usize,
    sep_output: PhantomData<fn() -> B>,
}

impl<P, S, B> Separated<P, S, B> {
    pub(crate) fn new(parser: P, sep: S, min: usize) -> Self {
        Self {
            parser,
            sep,
            min,
            sep_output: PhantomData,
        }
    }
}

impl<C, A, B, P, S> Parser<C, Vec<A>> for Separated<P, S, B>
where
    C: Cursor,
    P: Parser<C, A>,
    S: Parser<C, B>,
{
    fn apply(&self, input: C) -> ParseResult<C, Vec<A>> {
        traced("separated", input, |input: C| {
            let mut items = Vec::new();
            let mut cur = match self.parser.apply(input.clone()) {
                ParseResult::Match { value, next } => {
                    items.push(value);
                    next
                }
                ParseResult::NoMatch(failure) => {
                    return if self.min == 0 {
                        ParseResult::Match {
                            value: items,
                            next: input,
                        }
                    } else {
                        ParseResult::NoMatch(failure)
                    };
                }
                ParseResult::Partial(failure) => return ParseResult::Partial(failure),
            };

            loop {
                let after_sep = match self.sep.apply(cur.clone()) {
                    ParseResult::Match { next, .. } => next,
                    ParseResult::NoMatch(_) => break,
                    ParseResult::Partial(failure) => return ParseResult::Partial(failure),
                };
                match self.parser.apply(after_sep.clone()) {
                    ParseResult::Match { value, next } => {
                        let progressed = next.position() > cur.position();
                        items.push(value);
                        cur = next;
                        if !progressed {
                            // neither separator nor item consumed anything
                            break;
                        }
                    }
                    ParseResult::NoMatch(failure) => {
                        // a trailing separator: committed once it consumed;
                        // an empty separator match ends the list instead
                        if after_sep.position() > cur.position() {
                            return ParseResult::Partial(failure);
                        }
                        break;
                    }
                    ParseResult::Partial(failure) => return ParseResult::Partial(failure),
                }
            }
            ParseResult::Match {
                value: items,
                next: cur,
            }
        })
    }

    fn accepts_empty(&self) -> bool {
        self.min == 0 || self.parser.accepts_empty()
    }
}

/// Implementation of [`Parser::repeat_till0`] and [`Parser::repeat_till1`].
#[derive(Debug, Clone)]
pub struct RepeatTill<P, Q, B> {
    parser: P,
    end: Q,
    min: usize,
    end_output: PhantomData<fn() -> B>,
}

impl<P, Q, B> RepeatTill<P, Q, B> {
    pub(crate) fn new(parser: P, end: Q, min: usize) -> Self {
        Self {
            parser,
            end,
            min,
            end_output: PhantomData,
        }
    }
}

impl<C, A, B, P, Q> Parser<C, Vec<A>> for RepeatTill<P, Q, B>
where
    C: Cursor,
    P: Parser<C, A>,
    Q: Parser<C, B>,
{
    fn apply(&self, input: C) -> ParseResult<C, Vec<A>> {
        traced("repeat_till", input, |input: C| {
            let entry = input.clone();
            let mut items = Vec::new();
            let mut cur = input;
            let mut stalled_at: Option<usize> = None;
            loop {
                let end_failure = if items.len() >= self.min {
                    match self.end.apply(cur.clone()) {
                        ParseResult::Match { next, .. } => {
                            return ParseResult::Match {
                                value: items,
                                next,
                            };
                        }
                        ParseResult::NoMatch(failure) => Some(failure),
                        ParseResult::Partial(failure) => return ParseResult::Partial(failure),
                    }
                } else {
                    None
                };

                if stalled_at == Some(cur.position()) {
                    // the item parser idles here and the terminator does not
                    // match; report rather than loop
                    let failure = end_failure
                        .unwrap_or_else(|| Failure::new(cur.clone(), "a consuming item"));
                    return miss(&entry, &cur, failure);
                }
                match self.parser.apply(cur.clone()) {
                    ParseResult::Match { value, next } => {
                        stalled_at = if next.position() > cur.position() {
                            None
                        } else {
                            Some(cur.position())
                        };
                        items.push(value);
                        cur = next;
                    }
                    ParseResult::NoMatch(failure) => {
                        let combined = match end_failure {
                            Some(end_failure) => end_failure.merge(failure),
                            None => failure,
                        };
                        return miss(&entry, &cur, combined);
                    }
                    ParseResult::Partial(failure) => return ParseResult::Partial(failure),
                }
            }
        })
    }

    fn accepts_empty(&self) -> bool {
        self.min == 0 && self.end.accepts_empty()
    }
}

/// Implementation of [`Parser::take_while`].
#[derive(Debug, Clone)]
pub struct TakeWhile<P, Q, B> {
    parser: P,
    cond: Q,
    cond_output: PhantomData<fn() -> B>,
}

impl<P, Q, B> TakeWhile<P, Q, B> {
    pub(crate) fn new(parser: P, cond: Q) -> Self {
        Self {
            parser,
            cond,
            cond_output: PhantomData,
        }
    }
}

impl<C, A, B, P, Q> Parser<C, Vec<A>> for TakeWhile<P, Q, B>
where
    C: Cursor,
    P: Parser<C, A>,
    Q: Parser<C, B>,
{
    fn apply(&self, input: C) -> ParseResult<C, Vec<A>> {
        traced("take_while", input, |input: C| {
            let entry = input.clone();
            let mut items = Vec::new();
            let mut cur = input;
            loop {
                // the condition is a pure lookahead: any failure stops
                if !self.cond.apply(cur.clone()).matches() {
                    break;
                }
                let before = cur.position();
                match self.parser.apply(cur.clone()) {
                    ParseResult::Match { value, next } => {
                        let progressed = next.position() > before;
                        items.push(value);
                        cur = next;
                        if !progressed {
                            break;
                        }
                    }
                    ParseResult::NoMatch(failure) => return miss(&entry, &cur, failure),
                    ParseResult::Partial(failure) => return ParseResult::Partial(failure),
                }
            }
            ParseResult::Match {
                value: items,
                next: cur,
            }
        })
    }

    fn accepts_empty(&self) -> bool {
        true
    }
}

/// Implementation of [`Parser::chain_left1`] and [`Parser::chain_left0`].
#[derive(Debug, Clone)]
pub struct ChainLeft<P, Q, A, F> {
    operand: P,
    op: Q,
    default: Option<A>,
    op_output: PhantomData<fn() -> F>,
}

impl<P, Q, A, F> ChainLeft<P, Q, A, F> {
    pub(crate) fn new(operand: P, op: Q, default: Option<A>) -> Self {
        Self {
            operand,
            op,
            default,
            op_output: PhantomData,
        }
    }
}

impl<C, A, F, P, Q> Parser<C, A> for ChainLeft<P, Q, A, F>
where
    C: Cursor,
    P: Parser<C, A>,
    Q: Parser<C, F>,
    F: Fn(A, A) -> A,
    A: Clone,
{
    fn apply(&self, input: C) -> ParseResult<C, A> {
        traced("chain_left", input, |input: C| {
            let entry = input.clone();
            let (mut acc, mut cur) = match self.operand.apply(input) {
                ParseResult::Match { value, next } => (value, next),
                ParseResult::NoMatch(failure) => {
                    return match &self.default {
                        Some(default) => ParseResult::Match {
                            value: default.clone(),
                            next: entry,
                        },
                        None => ParseResult::NoMatch(failure),
                    };
                }
                ParseResult::Partial(failure) => return ParseResult::Partial(failure),
            };
            loop {
                let after_op = match self.op.apply(cur.clone()) {
                    ParseResult::Match { value, next } => (value, next),
                    ParseResult::NoMatch(_) => break,
                    ParseResult::Partial(failure) => return ParseResult::Partial(failure),
                };
                let (combine, after_op) = after_op;
                match self.operand.apply(after_op.clone()) {
                    ParseResult::Match { value, next } => {
                        let progressed = next.position() > cur.position();
                        acc = combine(acc, value);
                        cur = next;
                        if !progressed {
                            break;
                        }
                    }
                    ParseResult::NoMatch(failure) => {
                        // an operator with no right operand: committed once
                        // the operator consumed
                        return if after_op.position() > cur.position() {
                            ParseResult::Partial(failure)
                        } else {
                            break;
                        };
                    }
                    ParseResult::Partial(failure) => return ParseResult::Partial(failure),
                }
            }
            ParseResult::Match {
                value: acc,
                next: cur,
            }
        })
    }

    fn accepts_empty(&self) -> bool {
        self.default.is_some() || self.operand.accepts_empty()
    }
}

/// Implementation of [`Parser::chain_right1`] and [`Parser::chain_right0`].
#[derive(Debug, Clone)]
pub struct ChainRight<P, Q, A, F> {
    operand: P,
    op: Q,
    default: Option<A>,
    op_output: PhantomData<fn() -> F>,
}

impl<P, Q, A, F> ChainRight<P, Q, A, F> {
    pub(crate) fn new(operand: P, op: Q, default: Option<A>) -> Self {
        Self {
            operand,
            op,
            default,
            op_output: PhantomData,
        }
    }
}

impl<C, A, F, P, Q> Parser<C, A> for ChainRight<P, Q, A, F>
where
    C: Cursor,
    P: Parser<C, A>,
    Q: Parser<C, F>,
    F: Fn(A, A) -> A,
    A: Clone,
{
    fn apply(&self, input: C) -> ParseResult<C, A> {
        traced("chain_right", input, |input: C| {
            let entry = input.clone();
            let (first, mut cur) = match self.operand.apply(input) {
                ParseResult::Match { value, next } => (value, next),
                ParseResult::NoMatch(failure) => {
                    return match &self.default {
                        Some(default) => ParseResult::Match {
                            value: default.clone(),
                            next: entry,
                        },
                        None => ParseResult::NoMatch(failure),
                    };
                }
                ParseResult::Partial(failure) => return ParseResult::Partial(failure),
            };
            let mut tail: Vec<(F, A)> = Vec::new();
            loop {
                let (combine, after_op) = match self.op.apply(cur.clone()) {
                    ParseResult::Match { value, next } => (value, next),
                    ParseResult::NoMatch(_) => break,
                    ParseResult::Partial(failure) => return ParseResult::Partial(failure),
                };
                match self.operand.apply(after_op.clone()) {
                    ParseResult::Match { value, next } => {
                        let progressed = next.position() > cur.position();
                        tail.push((combine, value));
                        cur = next;
                        if !progressed {
                            break;
                        }
                    }
                    ParseResult::NoMatch(failure) => {
                        return if after_op.position() > cur.position() {
                            ParseResult::Partial(failure)
                        } else {
                            break;
                        };
                    }
                    ParseResult::Partial(failure) => return ParseResult::Partial(failure),
                }
            }
            // fold from the right: a ^ b ^ c groups as a ^ (b ^ c)
            let value = match tail
                .into_iter()
                .rev()
                .reduce(|(right_op, right), (left_op, left)| (left_op, right_op(left, right)))
            {
                Some((combine, rest)) => combine(first, rest),
                None => first,
            };
            ParseResult::Match { value, next: cur }
        })
    }

    fn accepts_empty(&self) -> bool {
        self.default.is_some() || self.operand.accepts_empty()
    }
}
