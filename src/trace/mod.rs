//! Parser execution tracing
//!
//! With the `debug` cargo feature enabled, every built-in combinator logs its
//! entry and outcome to stderr as a depth-indented tree, color-coded by
//! outcome (match, no-match, committed failure). Without the feature the
//! wrapper compiles away.

#[cfg(feature = "debug")]
mod internals;

use crate::cursor::Cursor;
use crate::error::ParseResult;

/// Runs `parser` on `input`, logging entry and outcome under `name` when the
/// `debug` feature is enabled.
///
/// Custom combinators can route their `apply` through this to show up in the
/// same trace as the built-ins.
#[cfg_attr(not(feature = "debug"), allow(unused_variables), inline(always))]
pub fn traced<C: Cursor, A>(
    name: &'static str,
    input: C,
    parser: impl FnOnce(C) -> ParseResult<C, A>,
) -> ParseResult<C, A> {
    #[cfg(feature = "debug")]
    {
        let depth = internals::Depth::new();
        let entry = input.position();
        internals::start(*depth, name, &input);
        let result = parser(input);
        internals::end(*depth, name, entry, &result);
        result
    }
    #[cfg(not(feature = "debug"))]
    {
        parser(input)
    }
}
