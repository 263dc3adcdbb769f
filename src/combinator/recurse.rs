//! Recursive references.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::cursor::Cursor;
use crate::error::{Expected, Failure, ParseResult};
use crate::trace::traced;
use crate::Parser;

/// Re-entries allowed at one input position before a reference reports a
/// recursion failure. See [`Ref::with_recursion_limit`].
pub const DEFAULT_RECURSION_LIMIT: usize = 64;

/// A placeholder parser for expressing recursive grammars.
///
/// Grammars are cyclic but values are built bottom-up, so cycles are broken
/// with a reference that is created first, used inside the grammar, and
/// [assigned][Ref::set] exactly once after the parsers that need it exist.
/// Clones share the assignment.
///
/// A reference also guards against unbounded left recursion: entering the
/// same reference at the same input position more than the configured limit
/// deep produces a failure labeled as a recursion limit. The failure is
/// committed (and so is the one for applying an unset reference) — both
/// describe a broken grammar, and a backtrackable miss would let an enclosing
/// choice absorb them and blame some unrelated token instead.
///
/// # Example
///
/// ```rust
/// use thresh::prelude::*;
///
/// // nested = '(' nested ')' | 'x'
/// let nested: Ref<TextCursor<'_>, char> = Ref::new();
/// nested.set(nested.clone().between('(', ')').or('x'));
///
/// assert_eq!(nested.parse(TextCursor::new("((x))")).unwrap(), 'x');
/// ```
pub struct Ref<'p, C, A> {
    target: Rc<RefCell<Option<Rc<dyn Parser<C, A> + 'p>>>>,
    id: u64,
    limit: usize,
}

impl<'p, C: Cursor, A> Ref<'p, C, A> {
    /// Creates an unassigned reference.
    pub fn new() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(0);
        Self {
            target: Rc::new(RefCell::new(None)),
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    /// Sets how many times this reference may be re-entered at one input
    /// position before it reports a recursion failure.
    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        debug_assert!(limit > 0, "the recursion limit must be positive");
        self.limit = limit;
        self
    }

    /// Assigns the target parser.
    ///
    /// # Panics
    ///
    /// Panics when the reference (or a clone of it) was already assigned;
    /// a reference is set exactly once.
    pub fn set(&self, target: impl Parser<C, A> + 'p) {
        let mut slot = self.target.borrow_mut();
        assert!(slot.is_none(), "parser reference assigned twice");
        *slot = Some(Rc::new(target));
    }

    /// `true` once [`Ref::set`] was called.
    pub fn is_set(&self) -> bool {
        self.target.borrow().is_some()
    }
}

impl<C: Cursor, A> Default for Ref<'_, C, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, A> Clone for Ref<'_, C, A> {
    fn clone(&self) -> Self {
        Self {
            target: Rc::clone(&self.target),
            id: self.id,
            limit: self.limit,
        }
    }
}

impl<C, A> fmt::Debug for Ref<'_, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ref")
            .field("id", &self.id)
            .field("set", &self.target.borrow().is_some())
            .finish()
    }
}

impl<C: Cursor, A> Parser<C, A> for Ref<'_, C, A> {
    fn apply(&self, input: C) -> ParseResult<C, A> {
        traced("ref", input, |input: C| {
            let target = match self.target.borrow().as_ref() {
                Some(target) => Rc::clone(target),
                None => {
                    return ParseResult::Partial(Failure::new(input, Expected::Unassigned));
                }
            };
            let _entry = match ReentryGuard::enter(self.id, input.position(), self.limit) {
                Some(entry) => entry,
                None => {
                    return ParseResult::Partial(Failure::new(input, Expected::RecursionLimit));
                }
            };
            target.apply(input)
        })
    }

    // a recursive production that consumes nothing is degenerate, so the
    // conservative answer is fine here and avoids walking the cycle
    fn accepts_empty(&self) -> bool {
        false
    }
}

thread_local! {
    /// Live re-entry counts per (reference, position), scoped to the call
    /// stack of the running parse.
    static REENTRIES: RefCell<HashMap<(u64, usize), usize>> = RefCell::new(HashMap::new());
}

struct ReentryGuard {
    key: (u64, usize),
}

impl ReentryGuard {
    fn enter(id: u64, position: usize, limit: usize) -> Option<Self> {
        REENTRIES.with(|table| {
            let mut table = table.borrow_mut();
            let count = table.entry((id, position)).or_insert(0);
            if *count >= limit {
                return None;
            }
            *count += 1;
            Some(Self {
                key: (id, position),
            })
        })
    }
}

impl Drop for ReentryGuard {
    fn drop(&mut self) {
        REENTRIES.with(|table| {
            let mut table = table.borrow_mut();
            if let Some(count) = table.get_mut(&self.key) {
                *count -= 1;
                if *count == 0 {
                    table.remove(&self.key);
                }
            }
        });
    }
}
