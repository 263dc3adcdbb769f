use std::fmt;

use super::Cursor;

/// A cursor over a `&str` character stream.
///
/// Tokens are `char`s and positions count characters, not bytes. On top of
/// the [`Cursor`] contract a text cursor derives 1-based [`line`]/[`column`]
/// coordinates on demand (by scanning for `'\n'` from the start of the
/// source) and renders the snippets used by error reports.
///
/// [`line`]: TextCursor::line
/// [`column`]: TextCursor::column
///
/// # Example
///
/// ```rust
/// use thresh::cursor::{Cursor, TextCursor};
///
/// let start = TextCursor::new("ab\ncd");
/// let at_c = start.skip(3);
/// assert_eq!(at_c.current(), Some('c'));
/// assert_eq!(at_c.line(), 2);
/// assert_eq!(at_c.column(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextCursor<'s> {
    src: &'s str,
    /// Byte offset into `src`, always on a char boundary.
    byte: usize,
    /// Char index; the `position()` of this cursor.
    pos: usize,
}

impl<'s> TextCursor<'s> {
    /// Creates a cursor at the start of `src`.
    #[inline]
    pub fn new(src: &'s str) -> Self {
        Self {
            src,
            byte: 0,
            pos: 0,
        }
    }

    /// The full source text this cursor reads from.
    #[inline]
    pub fn source(&self) -> &'s str {
        self.src
    }

    /// The unread remainder of the source.
    #[inline]
    pub fn remaining(&self) -> &'s str {
        &self.src[self.byte..]
    }

    /// 1-based line number of the current position.
    pub fn line(&self) -> usize {
        self.src[..self.byte].matches('\n').count() + 1
    }

    /// 1-based column number of the current position.
    pub fn column(&self) -> usize {
        let line_start = self.src[..self.byte]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        self.src[line_start..self.byte].chars().count() + 1
    }

    /// The text of 1-based line `k`, without its terminator, or `None` when
    /// the source has fewer lines.
    pub fn get_line(&self, k: usize) -> Option<&'s str> {
        if k == 0 {
            return None;
        }
        self.src.split('\n').nth(k - 1).map(|l| l.trim_end_matches('\r'))
    }

    /// A one-line window of up to `before` characters left and `after`
    /// characters right of the current position, with a caret row underneath.
    ///
    /// Line breaks and tabs inside the window are flattened to spaces so the
    /// caret stays aligned.
    pub fn snippet(&self, before: usize, after: usize) -> String {
        let back: String = self.src[..self.byte]
            .chars()
            .rev()
            .take(before)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        let ahead: String = self.src[self.byte..].chars().take(after).collect();
        let flatten = |c: char| if c == '\n' || c == '\r' || c == '\t' { ' ' } else { c };
        let window: String = back.chars().chain(ahead.chars()).map(flatten).collect();
        let caret_at = back.chars().count();
        format!("{window}\n{:caret_at$}^", "")
    }

    /// A multi-line window of `lines_before` lines above and `lines_after`
    /// lines below the current line, with left-padded line numbers, a `|`
    /// separator, and a caret row under the current line.
    ///
    /// For `"name John"` with the cursor on the `J` this renders
    ///
    /// ```text
    /// 1 | name John
    ///   |      ^
    /// ```
    pub fn framed_snippet(&self, lines_before: usize, lines_after: usize) -> String {
        let lines: Vec<&str> = self.src.split('\n').collect();
        let cur = self.line();
        let col = self.column();
        let first = cur.saturating_sub(lines_before).max(1);
        let last = (cur + lines_after).min(lines.len());
        let width = last.to_string().len();

        let mut out = String::new();
        for k in first..=last {
            let text = lines[k - 1].trim_end_matches('\r');
            out.push_str(&format!("{k:>width$} | {text}\n"));
            if k == cur {
                out.push_str(&format!("{:>width$} | {:>col$}", "", "^", col = col));
                out.push('\n');
            }
        }
        // drop the trailing newline so callers control spacing
        out.pop();
        out
    }
}

impl<'s> Cursor for TextCursor<'s> {
    type Token = char;
    type Slice = &'s str;

    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.byte == self.src.len()
    }

    #[inline]
    fn current(&self) -> Option<char> {
        self.src[self.byte..].chars().next()
    }

    #[inline]
    fn advance(&self) -> Self {
        debug_assert!(!self.is_eof(), "advanced a cursor past end of input");
        match self.current() {
            Some(c) => Self {
                src: self.src,
                byte: self.byte + c.len_utf8(),
                pos: self.pos + 1,
            },
            None => *self,
        }
    }

    fn skip(&self, n: usize) -> Self {
        let mut cur = *self;
        for _ in 0..n {
            if cur.is_eof() {
                break;
            }
            cur = cur.advance();
        }
        cur
    }

    #[inline]
    fn slice_to(&self, end: &Self) -> &'s str {
        debug_assert!(self.byte <= end.byte, "sliced a cursor backwards");
        &self.src[self.byte..end.byte.max(self.byte)]
    }

    #[inline]
    fn line_col(&self) -> Option<(usize, usize)> {
        Some((self.line(), self.column()))
    }

    fn caret_snippet(&self, lines_before: usize, lines_after: usize) -> Option<String> {
        Some(self.framed_snippet(lines_before, lines_after))
    }
}

impl fmt::Display for TextCursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} position {}", self.line(), self.column())
    }
}
