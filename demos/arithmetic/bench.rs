mod parser;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use thresh::prelude::*;

use parser::expr;

fn bench_expr(c: &mut Criterion) {
    let small = "3+5*(2-8)/2";
    let nested = "((((((1+2))))))*((((((3+4))))))";
    let long = &"1+".repeat(200).trim_end_matches('+').to_owned();

    let parser = expr();
    let mut group = c.benchmark_group("arithmetic");
    group.bench_function("small", |b| {
        b.iter(|| parser.parse_all(TextCursor::new(black_box(small))).unwrap());
    });
    group.bench_function("nested", |b| {
        b.iter(|| parser.parse_all(TextCursor::new(black_box(nested))).unwrap());
    });
    group.bench_function("long_chain", |b| {
        b.iter(|| parser.parse_all(TextCursor::new(black_box(long))).unwrap());
    });
    group.finish();
}

criterion_group!(benches, bench_expr);
criterion_main!(benches);
