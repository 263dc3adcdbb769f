use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::Cursor;

/// A cursor over a streaming character source.
///
/// The source is any `Iterator<Item = char>`; characters are pulled on demand
/// into a buffer shared by every cursor cloned from the same source, so prior
/// cursors stay valid and backtracking works exactly as with the in-memory
/// cursors. The buffer only ever grows while cursors are live; it is not
/// trimmed behind the oldest cursor.
///
/// Bridging from `io::Read` is left to the caller (wrap the reader in a
/// char-decoding iterator); the parsing side only needs characters.
///
/// # Example
///
/// ```rust
/// use thresh::cursor::{Cursor, IterCursor};
///
/// let start = IterCursor::new("hi".chars());
/// let next = start.advance();
/// assert_eq!(start.current(), Some('h'));
/// assert_eq!(next.current(), Some('i'));
/// assert!(next.advance().is_eof());
/// ```
pub struct IterCursor<I> {
    shared: Rc<RefCell<Buffered<I>>>,
    pos: usize,
}

struct Buffered<I> {
    source: I,
    buf: Vec<char>,
    exhausted: bool,
}

impl<I: Iterator<Item = char>> Buffered<I> {
    /// Pulls from the source until `len` characters are buffered or the
    /// source runs dry.
    fn fill_to(&mut self, len: usize) {
        while !self.exhausted && self.buf.len() < len {
            match self.source.next() {
                Some(c) => self.buf.push(c),
                None => self.exhausted = true,
            }
        }
    }
}

impl<I: Iterator<Item = char>> IterCursor<I> {
    /// Creates a cursor at the start of the stream.
    pub fn new(source: I) -> Self {
        Self {
            shared: Rc::new(RefCell::new(Buffered {
                source,
                buf: Vec::new(),
                exhausted: false,
            })),
            pos: 0,
        }
    }
}

impl<I> Clone for IterCursor<I> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
            pos: self.pos,
        }
    }
}

impl<I: Iterator<Item = char>> Cursor for IterCursor<I> {
    type Token = char;
    type Slice = String;

    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    fn is_eof(&self) -> bool {
        let mut shared = self.shared.borrow_mut();
        shared.fill_to(self.pos + 1);
        self.pos >= shared.buf.len()
    }

    fn current(&self) -> Option<char> {
        let mut shared = self.shared.borrow_mut();
        shared.fill_to(self.pos + 1);
        shared.buf.get(self.pos).copied()
    }

    fn advance(&self) -> Self {
        debug_assert!(!self.is_eof(), "advanced a cursor past end of input");
        self.skip(1)
    }

    fn skip(&self, n: usize) -> Self {
        let mut shared = self.shared.borrow_mut();
        shared.fill_to(self.pos + n);
        Self {
            shared: Rc::clone(&self.shared),
            pos: (self.pos + n).min(shared.buf.len()),
        }
    }

    fn slice_to(&self, end: &Self) -> String {
        debug_assert!(
            Rc::ptr_eq(&self.shared, &end.shared),
            "sliced between cursors of different streams"
        );
        debug_assert!(self.pos <= end.pos, "sliced a cursor backwards");
        let shared = self.shared.borrow();
        shared.buf[self.pos..end.pos.max(self.pos)].iter().collect()
    }
}

impl<I> PartialEq for IterCursor<I> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared) && self.pos == other.pos
    }
}

impl<I> fmt::Debug for IterCursor<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterCursor").field("pos", &self.pos).finish()
    }
}
