use algexact::prelude::*;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::str::FromStr;

fn bench_bigint_factorial(c: &mut Criterion) {
    c.bench_function("bigint_factorial_500", |b| {
        b.iter(|| black_box(BigInt::factorial(black_box(500u64))));
    });
}

fn bench_expand_cubic(c: &mut Criterion) {
    let e = Expr::from_str("(x + 2) * (x + 3) * (x + 4) * (x + 5)").unwrap();
    c.bench_function("expand_quartic_product", |b| {
        b.iter(|| black_box(expand(black_box(&e))));
    });
}

fn bench_poly_gcd(c: &mut Criterion) {
    let f = Expr::from_str("x^5 - x^3 - x^2 + 1").unwrap();
    let g = Expr::from_str("x^4 - 1").unwrap();
    c.bench_function("poly_gcd_quintic", |b| {
        b.iter(|| black_box(gcd(black_box(&f), black_box(&g)).unwrap()));
    });
}

fn bench_factor_quartic(c: &mut Criterion) {
    let e = Expr::from_str("x^4 - 1").unwrap();
    c.bench_function("factor_quartic", |b| {
        b.iter(|| black_box(factor(black_box(&e)).unwrap()));
    });
}

fn bench_derivative_chain_rule(c: &mut Criterion) {
    let e = Expr::from_str("sin(x^2) * cos(x^3)").unwrap();
    let x = Symbol::new("x");
    c.bench_function("derivative_product_of_trig", |b| {
        b.iter(|| black_box(derivative(black_box(&e), black_box(&x))));
    });
}

criterion_group!(
    benches,
    bench_bigint_factorial,
    bench_expand_cubic,
    bench_poly_gcd,
    bench_factor_quartic,
    bench_derivative_chain_rule,
);
criterion_main!(benches);
