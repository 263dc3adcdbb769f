//! Character and numeric parsers
//!
//! Ready-made lexical parsers for char cursors ([`TextCursor`] and
//! [`IterCursor`]): whitespace and character classes, quoted strings with
//! escapes, and checked numeric parsers. All of them work on any
//! [`Cursor<Token = char>`].
//!
//! [`TextCursor`]: crate::cursor::TextCursor
//! [`IterCursor`]: crate::cursor::IterCursor

#[cfg(test)]
mod tests;

use crate::cursor::Cursor;
use crate::error::{Expected, Failure, ParseResult};
use crate::trace::traced;
use crate::Parser;

/// Zero or more spaces and tabs, as the consumed slice.
pub fn space0() -> CharClass {
    CharClass {
        label: "space or tab",
        min: 0,
        predicate: |c| c == ' ' || c == '\t',
    }
}

/// One or more spaces and tabs.
pub fn space1() -> CharClass {
    CharClass {
        min: 1,
        ..space0()
    }
}

/// Zero or more spaces, tabs, carriage returns and newlines.
pub fn multispace0() -> CharClass {
    CharClass {
        label: "whitespace",
        min: 0,
        predicate: |c| c == ' ' || c == '\t' || c == '\r' || c == '\n',
    }
}

/// One or more spaces, tabs, carriage returns and newlines.
pub fn multispace1() -> CharClass {
    CharClass {
        min: 1,
        ..multispace0()
    }
}

/// One or more ASCII digits.
///
/// # Example
///
/// ```rust
/// use thresh::prelude::*;
/// use thresh::text::digit1;
///
/// assert_eq!(digit1().parse(TextCursor::new("42x")).unwrap(), "42");
/// assert!(!digit1().parse(TextCursor::new("x")).matches());
/// ```
pub fn digit1() -> CharClass {
    CharClass {
        label: "digit",
        min: 1,
        predicate: |c| c.is_ascii_digit(),
    }
}

/// One or more ASCII letters.
pub fn alpha1() -> CharClass {
    CharClass {
        label: "letter",
        min: 1,
        predicate: |c| c.is_ascii_alphabetic(),
    }
}

/// One or more ASCII letters and digits.
pub fn alphanumeric1() -> CharClass {
    CharClass {
        label: "letter or digit",
        min: 1,
        predicate: |c| c.is_ascii_alphanumeric(),
    }
}

/// One or more ASCII hex digits.
pub fn hex_digit1() -> CharClass {
    CharClass {
        label: "hexadecimal digit",
        min: 1,
        predicate: |c| c.is_ascii_hexdigit(),
    }
}

/// A run of characters in a class, as the consumed slice.
///
/// Produced by [`space0`], [`digit1`] and the other class parsers.
#[derive(Debug, Clone, Copy)]
pub struct CharClass {
    label: &'static str,
    min: usize,
    predicate: fn(char) -> bool,
}

impl<C> Parser<C, C::Slice> for CharClass
where
    C: Cursor<Token = char>,
{
    fn apply(&self, input: C) -> ParseResult<C, C::Slice> {
        traced(self.label, input, |input: C| {
            let entry = input.clone();
            let mut cur = input;
            while let Some(c) = cur.current() {
                if (self.predicate)(c) {
                    cur = cur.advance();
                } else {
                    break;
                }
            }
            if cur.position() - entry.position() < self.min {
                ParseResult::NoMatch(Failure::new(cur, self.label))
            } else {
                ParseResult::Match {
                    value: entry.slice_to(&cur),
                    next: cur,
                }
            }
        })
    }

    fn accepts_empty(&self) -> bool {
        self.min == 0
    }

    fn label(&self) -> Option<Expected> {
        Some(Expected::Description(self.label.into()))
    }
}

/// A `\n` or `\r\n` line ending, as the consumed slice.
///
/// Atomic: a lone `\r` is a plain no-match at the entry position.
pub fn line_ending() -> LineEnding {
    LineEnding {}
}

/// Implementation of [`line_ending`].
#[derive(Debug, Clone, Copy)]
pub struct LineEnding {}

impl<C> Parser<C, C::Slice> for LineEnding
where
    C: Cursor<Token = char>,
{
    fn apply(&self, input: C) -> ParseResult<C, C::Slice> {
        traced("line_ending", input, |input: C| {
            let next = match input.current() {
                Some('\n') => input.advance(),
                Some('\r') => {
                    let after = input.advance();
                    match after.current() {
                        Some('\n') => after.advance(),
                        _ => return ParseResult::NoMatch(Failure::new(input, "line ending")),
                    }
                }
                _ => return ParseResult::NoMatch(Failure::new(input, "line ending")),
            };
            ParseResult::Match {
                value: input.slice_to(&next),
                next,
            }
        })
    }

    fn label(&self) -> Option<Expected> {
        Some(Expected::Description("line ending".into()))
    }
}

/// One character out of `set`.
///
/// # Example
///
/// ```rust
/// use thresh::prelude::*;
/// use thresh::text::one_of_chars;
///
/// let sign = one_of_chars("+-");
/// assert_eq!(sign.parse(TextCursor::new("-3")).unwrap(), '-');
/// ```
pub fn one_of_chars(set: &'static str) -> OneOfChars {
    OneOfChars { set }
}

/// Implementation of [`one_of_chars`].
#[derive(Debug, Clone, Copy)]
pub struct OneOfChars {
    set: &'static str,
}

impl<C> Parser<C, char> for OneOfChars
where
    C: Cursor<Token = char>,
{
    fn apply(&self, input: C) -> ParseResult<C, char> {
        traced("one_of_chars", input, |input: C| match input.current() {
            Some(c) if self.set.contains(c) => ParseResult::Match {
                value: c,
                next: input.advance(),
            },
            _ => ParseResult::NoMatch(Failure::new(
                input,
                format!("one of {:?}", self.set),
            )),
        })
    }

    fn label(&self) -> Option<Expected> {
        Some(Expected::Description(format!("one of {:?}", self.set).into()))
    }
}

/// One character not in `set` (and not end of input).
pub fn none_of_chars(set: &'static str) -> NoneOfChars {
    NoneOfChars { set }
}

/// Implementation of [`none_of_chars`].
#[derive(Debug, Clone, Copy)]
pub struct NoneOfChars {
    set: &'static str,
}

impl<C> Parser<C, char> for NoneOfChars
where
    C: Cursor<Token = char>,
{
    fn apply(&self, input: C) -> ParseResult<C, char> {
        traced("none_of_chars", input, |input: C| match input.current() {
            Some(c) if !self.set.contains(c) => ParseResult::Match {
                value: c,
                next: input.advance(),
            },
            _ => ParseResult::NoMatch(Failure::new(
                input,
                format!("a character other than {:?}", self.set),
            )),
        })
    }

    fn label(&self) -> Option<Expected> {
        Some(Expected::Description(
            format!("a character other than {:?}", self.set).into(),
        ))
    }
}

/// A double-quoted string literal with backslash escapes, decoded.
///
/// Supported escapes: `\"`, `\\`, `\/`, `\n`, `\t`, `\r`, `\b`, `\f` and
/// `\uXXXX`. Once the opening quote matched, every malformed escape and an
/// unterminated literal are committed failures.
///
/// # Example
///
/// ```rust
/// use thresh::prelude::*;
/// use thresh::text::quoted_string;
///
/// let p = quoted_string();
/// assert_eq!(p.parse(TextCursor::new(r#""a\nb""#)).unwrap(), "a\nb");
/// ```
pub fn quoted_string() -> QuotedString {
    QuotedString {}
}

/// Implementation of [`quoted_string`].
#[derive(Debug, Clone, Copy)]
pub struct QuotedString {}

impl<C> Parser<C, String> for QuotedString
where
    C: Cursor<Token = char>,
{
    fn apply(&self, input: C) -> ParseResult<C, String> {
        traced("quoted_string", input, |input: C| {
            let mut cur = match input.current() {
                Some('"') => input.advance(),
                _ => return ParseResult::NoMatch(Failure::new(input, Expected::Char('"'))),
            };
            let mut out = String::new();
            loop {
                match cur.current() {
                    None => {
                        return ParseResult::Partial(Failure::new(cur, Expected::Char('"')));
                    }
                    Some('"') => {
                        return ParseResult::Match {
                            value: out,
                            next: cur.advance(),
                        };
                    }
                    Some('\\') => {
                        cur = cur.advance();
                        let escaped = match cur.current() {
                            None => {
                                return ParseResult::Partial(Failure::new(
                                    cur,
                                    "escape character",
                                ));
                            }
                            Some('"') => '"',
                            Some('\\') => '\\',
                            Some('/') => '/',
                            Some('n') => '\n',
                            Some('t') => '\t',
                            Some('r') => '\r',
                            Some('b') => '\u{8}',
                            Some('f') => '\u{c}',
                            Some('u') => {
                                cur = cur.advance();
                                let mut code = 0u32;
                                for _ in 0..4 {
                                    let digit = match cur.current().and_then(|c| c.to_digit(16))
                                    {
                                        Some(digit) => digit,
                                        None => {
                                            return ParseResult::Partial(Failure::new(
                                                cur,
                                                "hexadecimal digit",
                                            ));
                                        }
                                    };
                                    code = code * 16 + digit;
                                    cur = cur.advance();
                                }
                                match char::from_u32(code) {
                                    Some(c) => {
                                        out.push(c);
                                        continue;
                                    }
                                    None => {
                                        return ParseResult::Partial(Failure::new(
                                            cur,
                                            "a valid unicode scalar value",
                                        ));
                                    }
                                }
                            }
                            Some(_) => {
                                return ParseResult::Partial(Failure::new(
                                    cur,
                                    "escape character",
                                ));
                            }
                        };
                        out.push(escaped);
                        cur = cur.advance();
                    }
                    Some(c) => {
                        out.push(c);
                        cur = cur.advance();
                    }
                }
            }
        })
    }

    fn label(&self) -> Option<Expected> {
        Some(Expected::Description("string literal".into()))
    }
}

/// An unsigned decimal integer, with checked accumulation.
///
/// A value that does not fit a `u64` is a no-match at the entry position.
pub fn dec_uint() -> DecUint {
    DecUint {}
}

/// Implementation of [`dec_uint`].
#[derive(Debug, Clone, Copy)]
pub struct DecUint {}

impl<C> Parser<C, u64> for DecUint
where
    C: Cursor<Token = char>,
{
    fn apply(&self, input: C) -> ParseResult<C, u64> {
        traced("dec_uint", input, |input: C| {
            let entry = input.clone();
            let mut cur = input;
            let mut value: u64 = 0;
            let mut digits = 0usize;
            while let Some(digit) = cur.current().and_then(|c| c.to_digit(10)) {
                value = match value
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(u64::from(digit)))
                {
                    Some(value) => value,
                    None => {
                        return ParseResult::NoMatch(Failure::new(
                            entry,
                            "unsigned integer within range",
                        ));
                    }
                };
                digits += 1;
                cur = cur.advance();
            }
            if digits == 0 {
                ParseResult::NoMatch(Failure::new(cur, "unsigned integer"))
            } else {
                ParseResult::Match { value, next: cur }
            }
        })
    }

    fn label(&self) -> Option<Expected> {
        Some(Expected::Description("unsigned integer".into()))
    }
}

/// A signed decimal integer with an optional `+`/`-` sign.
///
/// A sign with no digit after it is a committed failure. The value is
/// accumulated negatively so `i64::MIN` parses without overflow.
pub fn dec_int() -> DecInt {
    DecInt {}
}

/// Implementation of [`dec_int`].
#[derive(Debug, Clone, Copy)]
pub struct DecInt {}

impl<C> Parser<C, i64> for DecInt
where
    C: Cursor<Token = char>,
{
    fn apply(&self, input: C) -> ParseResult<C, i64> {
        traced("dec_int", input, |input: C| {
            let entry = input.clone();
            let (negative, mut cur) = match input.current() {
                Some('-') => (true, input.advance()),
                Some('+') => (false, input.advance()),
                _ => (false, input),
            };
            let signed = cur.position() > entry.position();
            let mut value: i64 = 0;
            let mut digits = 0usize;
            while let Some(digit) = cur.current().and_then(|c| c.to_digit(10)) {
                value = match value
                    .checked_mul(10)
                    .and_then(|v| v.checked_sub(i64::from(digit)))
                {
                    Some(value) => value,
                    None => {
                        return ParseResult::NoMatch(Failure::new(
                            entry,
                            "integer within range",
                        ));
                    }
                };
                digits += 1;
                cur = cur.advance();
            }
            if digits == 0 {
                let failure = Failure::new(cur, "digit");
                return if signed {
                    ParseResult::Partial(failure)
                } else {
                    ParseResult::NoMatch(failure.relabel("integer"))
                };
            }
            if !negative {
                value = match value.checked_neg() {
                    Some(value) => value,
                    None => {
                        return ParseResult::NoMatch(Failure::new(
                            entry,
                            "integer within range",
                        ));
                    }
                };
            }
            ParseResult::Match { value, next: cur }
        })
    }

    fn label(&self) -> Option<Expected> {
        Some(Expected::Description("integer".into()))
    }
}

/// An unsigned hexadecimal integer (no `0x` prefix), with checked
/// accumulation.
pub fn hex_uint() -> HexUint {
    HexUint {}
}

/// Implementation of [`hex_uint`].
#[derive(Debug, Clone, Copy)]
pub struct HexUint {}

impl<C> Parser<C, u64> for HexUint
where
    C: Cursor<Token = char>,
{
    fn apply(&self, input: C) -> ParseResult<C, u64> {
        traced("hex_uint", input, |input: C| {
            let entry = input.clone();
            let mut cur = input;
            let mut value: u64 = 0;
            let mut digits = 0usize;
            while let Some(digit) = cur.current().and_then(|c| c.to_digit(16)) {
                value = match value
                    .checked_mul(16)
                    .and_then(|v| v.checked_add(u64::from(digit)))
                {
                    Some(value) => value,
                    None => {
                        return ParseResult::NoMatch(Failure::new(
                            entry,
                            "hexadecimal integer within range",
                        ));
                    }
                };
                digits += 1;
                cur = cur.advance();
            }
            if digits == 0 {
                ParseResult::NoMatch(Failure::new(cur, "hexadecimal integer"))
            } else {
                ParseResult::Match { value, next: cur }
            }
        })
    }

    fn label(&self) -> Option<Expected> {
        Some(Expected::Description("hexadecimal integer".into()))
    }
}

/// A floating point number: optional sign, integer part, optional fraction
/// and optional exponent.
///
/// A dot or exponent marker with no digits after it is a committed failure.
pub fn float() -> Float {
    Float {}
}

/// Implementation of [`float`].
#[derive(Debug, Clone, Copy)]
pub struct Float {}

impl<C> Parser<C, f64> for Float
where
    C: Cursor<Token = char>,
{
    fn apply(&self, input: C) -> ParseResult<C, f64> {
        traced("float", input, |input: C| {
            let entry = input.clone();
            let mut text = String::new();
            let mut cur = input;

            if let Some(sign @ ('+' | '-')) = cur.current() {
                text.push(sign);
                cur = cur.advance();
            }
            let int_digits = push_digits(&mut text, &mut cur);
            if int_digits == 0 {
                let failure = Failure::new(cur.clone(), "number");
                return crate::combinator::miss(&entry, &cur, failure);
            }
            if cur.current() == Some('.') {
                text.push('.');
                cur = cur.advance();
                if push_digits(&mut text, &mut cur) == 0 {
                    return ParseResult::Partial(Failure::new(cur, "digit"));
                }
            }
            if let Some(marker @ ('e' | 'E')) = cur.current() {
                text.push(marker);
                cur = cur.advance();
                if let Some(sign @ ('+' | '-')) = cur.current() {
                    text.push(sign);
                    cur = cur.advance();
                }
                if push_digits(&mut text, &mut cur) == 0 {
                    return ParseResult::Partial(Failure::new(cur, "digit"));
                }
            }

            match text.parse::<f64>() {
                Ok(value) => ParseResult::Match { value, next: cur },
                Err(_) => ParseResult::NoMatch(Failure::new(entry, "number")),
            }
        })
    }

    fn label(&self) -> Option<Expected> {
        Some(Expected::Description("number".into()))
    }
}

/// Appends a run of ASCII digits to `text`, returning how many were taken.
fn push_digits<C: Cursor<Token = char>>(text: &mut String, cur: &mut C) -> usize {
    let mut count = 0;
    while let Some(c) = cur.current() {
        if c.is_ascii_digit() {
            text.push(c);
            *cur = cur.advance();
            count += 1;
        } else {
            break;
        }
    }
    count
}
