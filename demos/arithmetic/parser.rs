//! A calculator grammar: left-associative `+ - * /` via `chain_left1`,
//! parentheses via a recursive reference.

use thresh::prelude::*;
use thresh::text::{dec_uint, space0};

fn add(a: i64, b: i64) -> i64 {
    a + b
}
fn sub(a: i64, b: i64) -> i64 {
    a - b
}
fn mul(a: i64, b: i64) -> i64 {
    a * b
}
fn div(a: i64, b: i64) -> i64 {
    a / b
}

/// `expr = term (('+'|'-') term)*`, `term = factor (('*'|'/') factor)*`,
/// `factor = number | '(' expr ')'`. Whitespace is allowed around tokens.
pub fn expr<'s>() -> BoxedParser<'s, TextCursor<'s>, i64> {
    let expr: Ref<'_, TextCursor<'s>, i64> = Ref::new();

    let number = Parser::<TextCursor<'s>, u64>::map(dec_uint(), |n| n as i64);
    let number = Parser::<TextCursor<'s>, i64>::then_skip(number, space0());
    let factor = number.or(expr
        .clone()
        .between('('.then_skip(space0()), ')'.then_skip(space0())));

    let mul_op = '*'
        .value(mul as fn(i64, i64) -> i64)
        .or('/'.value(div as fn(i64, i64) -> i64))
        .then_skip(space0());
    let term = factor.chain_left1(mul_op);

    let add_op = '+'
        .value(add as fn(i64, i64) -> i64)
        .or('-'.value(sub as fn(i64, i64) -> i64))
        .then_skip(space0());
    expr.set(term.chain_left1(add_op));

    space0().skip_then(expr).boxed()
}
