//! Result algebra and error reporting
//!
//! Parse outcomes are values, never exceptions. [`ParseResult`] distinguishes
//! three cases:
//! - [`ParseResult::Match`] — the parser produced a value and a cursor past
//!   the consumed tokens,
//! - [`ParseResult::NoMatch`] — the parser missed without consuming anything;
//!   an enclosing choice is free to try the next alternative,
//! - [`ParseResult::Partial`] — the parser matched a prefix and then missed;
//!   the failure is *committed* and suppresses alternatives unless undone
//!   with [`attempt`][crate::combinator::attempt].
//!
//! The committed/backtrackable split is what gives ordered choice its
//! PEG-style semantics: `or` falls through on a `NoMatch` and aborts on a
//! `Partial`.
//!
//! Failures carry a [`Failure`] record: the cursor where the miss happened,
//! a structured [`Expected`] label, an optional nested cause, and the sibling
//! failures accumulated by a choice. [`Failure::render`] turns the record
//! into the human-readable report, with a caret snippet when the cursor is a
//! text cursor.

use std::borrow::Cow;
use std::fmt;

use crate::cursor::Cursor;

/// What a parser was looking for when it missed.
///
/// Labels are structured rather than preformatted so that choice aggregation
/// can deduplicate them and `not` can wrap them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Expected {
    /// A specific token.
    Char(char),
    /// A literal run of tokens.
    Literal(&'static str),
    /// A free-form description, e.g. `"digit"` or a user label.
    Description(Cow<'static, str>),
    /// End of input.
    EndOfInput,
    /// Anything but the wrapped expectation (negative lookahead).
    Not(Box<Expected>),
    /// A recursive reference was applied before it was assigned.
    Unassigned,
    /// The same-position recursion guard engaged.
    RecursionLimit,
}

impl Expected {
    /// `true` for the engine-fatal labels that render as a bare statement
    /// instead of an `expected … found …` line.
    fn is_bare(&self) -> bool {
        matches!(self, Expected::Unassigned | Expected::RecursionLimit)
    }
}

impl From<char> for Expected {
    fn from(c: char) -> Self {
        Expected::Char(c)
    }
}

impl From<&'static str> for Expected {
    fn from(label: &'static str) -> Self {
        Expected::Description(Cow::Borrowed(label))
    }
}

impl From<String> for Expected {
    fn from(label: String) -> Self {
        Expected::Description(Cow::Owned(label))
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Char('\n') => "newline".fmt(f),
            Expected::Char(c) if c.is_control() => write!(f, "'{}'", c.escape_debug()),
            Expected::Char(c) => write!(f, "'{c}'"),
            Expected::Literal(s) => write!(f, "'{s}'"),
            Expected::Description(d) => d.fmt(f),
            Expected::EndOfInput => "end of input".fmt(f),
            Expected::Not(inner) => write!(f, "not {inner}"),
            Expected::Unassigned => "unassigned parser reference applied".fmt(f),
            Expected::RecursionLimit => {
                "recursion limit reached (possible left recursion)".fmt(f)
            }
        }
    }
}

/// A structured parse failure: where, what was expected, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure<C> {
    pub(crate) at: C,
    pub(crate) expected: Expected,
    pub(crate) cause: Option<Box<Failure<C>>>,
    pub(crate) alternatives: Vec<Failure<C>>,
}

impl<C: Cursor> Failure<C> {
    /// Creates a failure at `at` looking for `expected`.
    pub fn new(at: C, expected: impl Into<Expected>) -> Self {
        Self {
            at,
            expected: expected.into(),
            cause: None,
            alternatives: Vec::new(),
        }
    }

    /// Attaches the inner failure that led to this one.
    pub fn with_cause(mut self, cause: Failure<C>) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// The cursor where the failure occurred.
    pub fn at(&self) -> &C {
        &self.at
    }

    /// The label of what was expected here.
    pub fn expected(&self) -> &Expected {
        &self.expected
    }

    /// The nested failure this one was caused by, if any.
    pub fn cause(&self) -> Option<&Failure<C>> {
        self.cause.as_deref()
    }

    /// Sibling failures from an ordered choice that missed at the same
    /// place, in the order the alternatives were tried.
    pub fn alternatives(&self) -> &[Failure<C>] {
        &self.alternatives
    }

    /// Folds another failed alternative into this one.
    ///
    /// The merged failure keeps `self`'s cursor; `other` (and any
    /// alternatives it already carries) are appended in order. Duplicate
    /// reasons are collapsed at render time.
    pub fn merge(mut self, other: Failure<C>) -> Self {
        let Failure {
            at,
            expected,
            cause,
            alternatives,
        } = other;
        self.alternatives.push(Failure {
            at,
            expected,
            cause,
            alternatives: Vec::new(),
        });
        self.alternatives.extend(alternatives);
        self
    }

    /// Replaces the outermost expectation, keeping location and causes.
    pub fn relabel(mut self, expected: impl Into<Expected>) -> Self {
        self.expected = expected.into();
        self
    }

    /// Moves the failure to `at`, used by `attempt` and lookaheads to report
    /// at the point where backtracking resumed.
    pub(crate) fn rewind_to(mut self, at: C) -> Self {
        self.at = at;
        self
    }

    /// Renders the report with the default snippet window.
    pub fn render(&self) -> String {
        self.render_with(&ReportConfig::default())
    }

    /// Renders the report with an explicit snippet window.
    ///
    /// For text cursors the report reads
    ///
    /// ```text
    /// Error: line 1 position 5
    /// 1 | name John
    ///   |     ^
    /// Reasons at this location:
    /// - expected '=' found 'J'
    /// ```
    ///
    /// For other cursors the header is `Error at position P` and no snippet
    /// is rendered. Reason lines are deduplicated textually and keep the
    /// order in which alternatives failed.
    pub fn render_with(&self, config: &ReportConfig) -> String {
        let mut out = String::new();
        match self.at.line_col() {
            Some((line, column)) => {
                out.push_str(&format!("Error: line {line} position {column}\n"));
                if let Some(snippet) = self
                    .at
                    .caret_snippet(config.lines_before, config.lines_after)
                {
                    out.push_str(&snippet);
                    out.push('\n');
                }
            }
            None => {
                out.push_str(&format!("Error at position {}\n", self.at.position()));
            }
        }
        out.push_str("Reasons at this location:");

        let mut seen: Vec<String> = Vec::new();
        for reason in std::iter::once(self).chain(self.alternatives.iter()) {
            let mut lines = String::new();
            reason.push_reason(&mut lines, 0);
            if !seen.iter().any(|s| s == &lines) {
                out.push('\n');
                out.push_str(&lines);
                seen.push(lines);
            }
        }
        out
    }

    /// One `- expected X found Y` line, plus indented `caused by:` lines for
    /// the cause chain.
    fn push_reason(&self, out: &mut String, depth: usize) {
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push('-');
        out.push(' ');
        if depth > 0 {
            out.push_str("caused by: ");
        }
        if self.expected.is_bare() {
            out.push_str(&self.expected.to_string());
        } else {
            let found = match self.at.current() {
                Some(token) => format!("{token:?}"),
                None => "end of input".to_owned(),
            };
            out.push_str(&format!("expected {} found {found}", self.expected));
        }
        if let Some(cause) = &self.cause {
            out.push('\n');
            cause.push_reason(out, depth + 1);
        }
    }
}

impl<C: Cursor> fmt::Display for Failure<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render().fmt(f)
    }
}

impl<C: Cursor + fmt::Debug> std::error::Error for Failure<C> {}

/// Snippet window sizes for [`Failure::render_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportConfig {
    /// Lines rendered above the failing line.
    pub lines_before: usize,
    /// Lines rendered below the failing line.
    pub lines_after: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            lines_before: 1,
            lines_after: 1,
        }
    }
}

/// The discriminant of a [`ParseResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    /// A successful match.
    Match,
    /// A backtrackable miss; nothing was consumed.
    NoMatch,
    /// A committed miss; input was consumed before the failure.
    Partial,
}

/// The outcome of applying a [`Parser`][crate::Parser] to a cursor.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult<C, A> {
    /// The parser consumed zero or more tokens and produced `value`; `next`
    /// points past the consumed input.
    Match {
        /// The parsed value.
        value: A,
        /// The cursor after the match.
        next: C,
    },
    /// The parser missed without consuming input past its entry cursor.
    NoMatch(Failure<C>),
    /// The parser matched a prefix and then missed: a committed failure that
    /// suppresses alternatives in an enclosing choice.
    Partial(Failure<C>),
}

impl<C: Cursor, A> ParseResult<C, A> {
    /// `true` on [`ParseResult::Match`].
    pub fn matches(&self) -> bool {
        matches!(self, ParseResult::Match { .. })
    }

    /// `true` on [`ParseResult::Partial`].
    pub fn committed(&self) -> bool {
        matches!(self, ParseResult::Partial(_))
    }

    /// The discriminant, for dispatch without destructuring.
    pub fn kind(&self) -> ResultKind {
        match self {
            ParseResult::Match { .. } => ResultKind::Match,
            ParseResult::NoMatch(_) => ResultKind::NoMatch,
            ParseResult::Partial(_) => ResultKind::Partial,
        }
    }

    /// The matched value and the cursor after it, or `None` on a failure.
    pub fn into_match(self) -> Option<(A, C)> {
        match self {
            ParseResult::Match { value, next } => Some((value, next)),
            _ => None,
        }
    }

    /// The matched value, or `None` on a failure.
    pub fn ok(self) -> Option<A> {
        self.into_match().map(|(value, _)| value)
    }

    /// The matched value.
    ///
    /// # Panics
    ///
    /// Panics with the rendered report when the result is not a match.
    #[track_caller]
    pub fn unwrap(self) -> A {
        match self {
            ParseResult::Match { value, .. } => value,
            ParseResult::NoMatch(failure) => {
                panic!("called `unwrap` on a no-match\n{}", failure.render())
            }
            ParseResult::Partial(failure) => {
                panic!("called `unwrap` on a partial match\n{}", failure.render())
            }
        }
    }

    /// The failure record, or `None` on a match.
    pub fn failure(&self) -> Option<&Failure<C>> {
        match self {
            ParseResult::Match { .. } => None,
            ParseResult::NoMatch(failure) | ParseResult::Partial(failure) => Some(failure),
        }
    }

    /// The failure record by value, or `None` on a match.
    pub fn into_failure(self) -> Option<Failure<C>> {
        match self {
            ParseResult::Match { .. } => None,
            ParseResult::NoMatch(failure) | ParseResult::Partial(failure) => Some(failure),
        }
    }

    /// The rendered report, or `None` on a match.
    pub fn error(&self) -> Option<String> {
        self.failure().map(Failure::render)
    }

    /// Maps the matched value, passing failures through untouched.
    pub fn map<B>(self, f: impl FnOnce(A) -> B) -> ParseResult<C, B> {
        match self {
            ParseResult::Match { value, next } => ParseResult::Match {
                value: f(value),
                next,
            },
            ParseResult::NoMatch(failure) => ParseResult::NoMatch(failure),
            ParseResult::Partial(failure) => ParseResult::Partial(failure),
        }
    }

    /// Dispatches on the outcome: `on_match` receives the value and the
    /// cursor after it, `on_miss` receives the failure and whether it was
    /// committed.
    pub fn handle<R>(
        self,
        on_match: impl FnOnce(A, C) -> R,
        on_miss: impl FnOnce(Failure<C>, bool) -> R,
    ) -> R {
        match self {
            ParseResult::Match { value, next } => on_match(value, next),
            ParseResult::NoMatch(failure) => on_miss(failure, false),
            ParseResult::Partial(failure) => on_miss(failure, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::{SliceCursor, TextCursor};

    #[test]
    fn merge_keeps_first_position_and_order() {
        let at = TextCursor::new("x");
        let merged = Failure::new(at, Expected::Char('a'))
            .merge(Failure::new(at.skip(1), Expected::Char('b')))
            .merge(Failure::new(at, Expected::Char('c')));
        assert_eq!(merged.at().position(), 0);
        let labels: Vec<_> = merged
            .alternatives()
            .iter()
            .map(|f| f.expected().clone())
            .collect();
        assert_eq!(labels, vec![Expected::Char('b'), Expected::Char('c')]);
    }

    #[test]
    fn merge_flattens_nested_alternatives() {
        let at = TextCursor::new("x");
        let pair =
            Failure::new(at, Expected::Char('b')).merge(Failure::new(at, Expected::Char('c')));
        let merged = Failure::new(at, Expected::Char('a')).merge(pair);
        assert_eq!(merged.alternatives().len(), 2);
        assert!(merged
            .alternatives()
            .iter()
            .all(|f| f.alternatives().is_empty()));
    }

    #[test]
    fn text_report_has_header_snippet_and_reasons() {
        let at = TextCursor::new("name John").skip(4);
        let failure = Failure::new(at, Expected::Char('='));
        assert_eq!(
            failure.render(),
            "Error: line 1 position 5\n\
             1 | name John\n  |     ^\n\
             Reasons at this location:\n\
             - expected '=' found ' '"
        );
    }

    #[test]
    fn token_report_uses_positions() {
        let tokens = [7u8, 8, 9];
        let at = SliceCursor::new(&tokens).skip(1);
        let failure = Failure::new(at, "even byte");
        assert_eq!(
            failure.render(),
            "Error at position 1\nReasons at this location:\n- expected even byte found 8"
        );
    }

    #[test]
    fn reasons_deduplicate_but_keep_order() {
        let at = TextCursor::new("z");
        let failure = Failure::new(at, Expected::Char('a'))
            .merge(Failure::new(at, Expected::Char('b')))
            .merge(Failure::new(at, Expected::Char('a')));
        let report = failure.render();
        assert_eq!(report.matches("expected 'a'").count(), 1);
        let a_line = report.find("expected 'a'").unwrap();
        let b_line = report.find("expected 'b'").unwrap();
        assert!(a_line < b_line);
    }

    #[test]
    fn causes_render_nested() {
        let at = TextCursor::new("q");
        let failure = Failure::new(at, Expected::Literal("key"))
            .with_cause(Failure::new(at, Expected::Char('k')));
        let report = failure.render();
        assert!(report.contains("- expected 'key' found 'q'"));
        assert!(report.contains("\n  - caused by: expected 'k' found 'q'"));
    }

    #[test]
    fn eof_reports_end_of_input() {
        let at = TextCursor::new("ab").skip(2);
        let failure = Failure::new(at, Expected::Char('c'));
        assert!(failure.render().contains("expected 'c' found end of input"));
    }

    #[test]
    #[should_panic(expected = "no-match")]
    fn unwrap_fails_loudly() {
        let at = TextCursor::new("x");
        let result: ParseResult<_, ()> = ParseResult::NoMatch(Failure::new(at, "anything"));
        result.unwrap();
    }

    #[test]
    fn handle_dispatches() {
        let at = TextCursor::new("x");
        let hit: ParseResult<_, i32> = ParseResult::Match { value: 3, next: at };
        assert_eq!(hit.handle(|v, _| v * 2, |_, _| -1), 6);
        let miss: ParseResult<_, i32> = ParseResult::Partial(Failure::new(at, "digit"));
        assert_eq!(miss.handle(|v, _| v, |_, committed| i32::from(committed)), 1);
    }
}
