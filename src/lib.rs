//! # thresh, parsing by combination
//!
//! `thresh` is a parser combinator library: small, typed parsing functions
//! composed into larger ones with sequence, choice, repetition and recursion,
//! over any token stream — characters, bytes, or tokens of your own. Results
//! are values, never exceptions, and failures carry enough structure to
//! render a line/column report with a caret snippet.
//!
//! ## Example
//!
//! ```rust
//! use thresh::prelude::*;
//! use thresh::text::{digit1, quoted_string, space0};
//!
//! // key '=' value
//! let key = digit1().expecting("a numeric key");
//! let entry = key
//!     .then_skip(space0())
//!     .then_skip('=')
//!     .then_skip(space0())
//!     .then(quoted_string())
//!     .map(|(key, value)| (key.to_owned(), value));
//!
//! let hit = entry.parse(TextCursor::new("17 = \"seventeen\""));
//! assert_eq!(hit.unwrap(), ("17".to_owned(), "seventeen".to_owned()));
//!
//! let miss = entry.parse(TextCursor::new("x = \"one\""));
//! assert!(miss.error().unwrap().contains("expected a numeric key found 'x'"));
//! ```
//!
//! ## The pieces
//!
//! - [`cursor`]: persistent positions into token sequences. Advancing a
//!   cursor yields a new one; the old cursor stays valid, which is all the
//!   machinery backtracking needs.
//! - [`ParseResult`]: match, no-match, or *partial match* — the last one
//!   marks a failure after input was consumed. Ordered choice
//!   ([`Parser::or`], [`one_of`][combinator::one_of]) falls through only on
//!   no-matches, so a grammar commits to a branch as soon as the branch
//!   consumes; [`attempt`][combinator::attempt] undoes the commitment where
//!   full backtracking is wanted.
//! - [`Parser`]: the trait everything composes through; see
//!   [`combinator`] for a map of the surface.
//! - [`text`]: ready-made lexical parsers for char streams.
//! - [`error::Failure`]: the structured failure record and its rendered,
//!   caret-annotated report.
//!
//! Recursive grammars use [`combinator::Ref`], a placeholder assigned once
//! after construction. The engine is not a left-recursion parser: a rule
//! that re-enters itself at the same position beyond a configurable bound
//! reports a recursion failure instead of looping (left-associative
//! grammars are covered by [`Parser::chain_left1`]).
//!
//! Parsing is single-threaded, does no I/O of its own, and re-runs parsers
//! on alternative branches; mapping functions should be pure.
//!
//! ## Feature flags
//!
//! - `debug`: depth-indented execution traces on stderr, see [`trace`].

#![warn(missing_docs)]

pub mod combinator;
pub mod cursor;
pub mod error;
mod parser;
pub mod text;
pub mod trace;

pub use crate::error::{Expected, Failure, ParseResult, ReportConfig, ResultKind};
pub use crate::parser::{BoxedParser, Parser};

/// Core names for glob import.
///
/// ```rust
/// use thresh::prelude::*;
///
/// let p = satisfy("letter", |c: &char| c.is_ascii_alphabetic());
/// assert_eq!(p.parse(TextCursor::new("a")).unwrap(), 'a');
/// ```
pub mod prelude {
    pub use crate::combinator::{
        any, attempt, eof, fail, iterate, not, one_of, peek, pure, satisfy, seq, Ref,
    };
    pub use crate::cursor::{Cursor, IterCursor, SliceCursor, TextCursor};
    pub use crate::error::ParseResult;
    pub use crate::parser::{BoxedParser, Parser};
}
