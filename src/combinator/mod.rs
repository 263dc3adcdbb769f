//! # List of parsers and combinators
//!
//! A quick map of the surface; the free functions live here, the methods on
//! [`Parser`][crate::Parser].
//!
//! ## Building blocks
//!
//! | parser | usage | comment |
//! |---|---|---|
//! | [`pure`] | `pure(1)` | Always matches with the given value, consuming nothing |
//! | [`fail`] | `fail("a digit")` | Always misses with the given label |
//! | [`eof`] | `eof()` | Matches only at end of input |
//! | [`any`] | `any()` | Matches any one token |
//! | [`satisfy`] | `satisfy("digit", char::is_ascii_digit)` | Matches one token passing a predicate |
//! | `char` | `'('` | A character is a parser for itself |
//! | `&str` | `"let"` | A literal matches itself; a mid-literal miss is committed |
//!
//! ## Combining
//!
//! | combinator | usage | comment |
//! |---|---|---|
//! | [`Parser::then`](crate::Parser::then) / [`seq`] | `p.then(q)`, `seq((p, q, r))` | Sequence, pair or flat tuple |
//! | [`Parser::then_skip`](crate::Parser::then_skip) / [`Parser::skip_then`](crate::Parser::skip_then) | `p.then_skip(ws)` | Sequence, keeping one side |
//! | [`Parser::or`](crate::Parser::or) / [`one_of`] | `one_of((p, q, r))` | Ordered choice; commits on consumption |
//! | [`attempt`] | `attempt(p).or(q)` | Makes a committed failure backtrackable |
//! | [`peek`] / [`not`] | `peek(p)`, `not(p)` | Lookahead without consuming |
//! | [`Parser::opt`](crate::Parser::opt) / [`Parser::or_else`](crate::Parser::or_else) | `p.opt()` | Optional / defaulted |
//! | [`Parser::between`](crate::Parser::between) | `p.between('(', ')')` | Delimited content |
//! | [`Parser::repeat`](crate::Parser::repeat) | `p.repeat(1..=3)` | Bounded repetition into a `Vec` |
//! | [`Parser::separated0`](crate::Parser::separated0) / [`Parser::separated1`](crate::Parser::separated1) | `item.separated1(',')` | Separated lists, no trailing separator |
//! | [`Parser::repeat_till0`](crate::Parser::repeat_till0) / [`Parser::repeat_till1`](crate::Parser::repeat_till1) | `p.repeat_till0(end)` | Repeat until a terminator matches |
//! | [`Parser::take_while`](crate::Parser::take_while) | `p.take_while(cond)` | Repeat while a lookahead holds |
//! | [`Parser::chain_left1`](crate::Parser::chain_left1) / [`Parser::chain_right1`](crate::Parser::chain_right1) | `term.chain_left1(op)` | Binary operator folds |
//! | [`Ref`] | `Ref::new()` | Recursive reference, assigned once |
//! | [`Parser::recover`](crate::Parser::recover) / [`Parser::recover_with`](crate::Parser::recover_with) | `p.recover(q)` | Failure fallback |
//! | [`iterate`] | `iterate(p, input)` | Lazy token-skipping parse iterator |

mod branch;
mod core;
mod multi;
mod parser;
mod recurse;
mod sequence;


pub use self::branch::{one_of, Choice, OneOf};
pub use self::core::{
    any, attempt, eof, fail, iterate, not, peek, pure, satisfy, Any, Attempt, Eof, Fail, Not,
    Parses, Peek, Pure, Satisfy,
};
pub use self::multi::{ChainLeft, ChainRight, Range, Repeat, RepeatTill, Separated, TakeWhile};
pub use self::parser::{
    Between, Expecting, Map, OnlyIf, Opt, Or, OrElse, Recognize, Recover, RecoverWith, SkipThen,
    Then, ThenSkip, TryMap, Value,
};
pub use self::recurse::{Ref, DEFAULT_RECURSION_LIMIT};
pub use self::sequence::{seq, Seq, Sequence};

use crate::cursor::Cursor;
use crate::error::{Failure, ParseResult};

/// A miss that is committed exactly when input was consumed between `entry`
/// and `at`.
pub(crate) fn miss<C: Cursor, A>(entry: &C, at: &C, failure: Failure<C>) -> ParseResult<C, A> {
    if at.position() > entry.position() {
        ParseResult::Partial(failure)
    } else {
        ParseResult::NoMatch(failure)
    }
}
