//! Quantified invariants checked against many random inputs rather than
//! fixed examples: reduction idempotence, BigInt's Euclidean identity,
//! GF(p) field axioms, and GCD divisibility.

use algexact::prelude::*;
use proptest::prelude::*;
use std::str::FromStr;

fn small_int() -> impl Strategy<Value = i64> {
    -1_000_000i64..1_000_000i64
}

fn nonzero_small_int() -> impl Strategy<Value = i64> {
    small_int().prop_filter("nonzero", |n| *n != 0)
}

// A handful of polynomial shapes in `x`, built from random small integer
// coefficients, exercised both directly and combined pairwise.
fn poly_expr() -> impl Strategy<Value = Expr> {
    (-20i64..20, -20i64..20, -20i64..20).prop_map(|(a, b, c)| {
        let x = symbol("x");
        add(vec![
            mul(vec![int_from_long(a), pow(x.clone(), int_from_long(2))]),
            mul(vec![int_from_long(b), x]),
            int_from_long(c),
        ])
    })
}

proptest! {
    #[test]
    fn reduce_is_idempotent(e in poly_expr()) {
        let once = reduce(&e);
        let twice = reduce(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn expand_then_reduce_is_idempotent(e in poly_expr()) {
        let once = reduce(&expand(&e));
        let twice = reduce(&expand(&once));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn bigint_div_rem_satisfies_the_euclidean_identity(a in small_int(), b in nonzero_small_int()) {
        let ba = BigInt::from(a);
        let bb = BigInt::from(b);
        let (q, r) = ba.div_rem(&bb).unwrap();
        // a == q * b + r
        prop_assert_eq!(q.mul(&bb).add(&r), ba);
        // |r| < |b|
        prop_assert!(r.abs() < bb.abs());
        // r is zero or shares a's sign (truncating division)
        if !r.is_zero() {
            prop_assert_eq!(r.is_negative(), a.is_negative());
        }
    }

    #[test]
    fn gf_addition_is_commutative(a in 0i64..101, b in 0i64..101) {
        let ea = int_from_long(a);
        let eb = int_from_long(b);
        let lhs = gf_add(101, &ea, &eb).unwrap();
        let rhs = gf_add(101, &eb, &ea).unwrap();
        prop_assert_eq!(reduce(&lhs), reduce(&rhs));
    }

    #[test]
    fn gf_multiplication_distributes_over_addition(a in 0i64..101, b in 0i64..101, c in 0i64..101) {
        let ea = int_from_long(a);
        let eb = int_from_long(b);
        let ec = int_from_long(c);
        let sum = gf_add(101, &eb, &ec).unwrap();
        let lhs = gf_mul(101, &ea, &sum).unwrap();
        let rhs_1 = gf_mul(101, &ea, &eb).unwrap();
        let rhs_2 = gf_mul(101, &ea, &ec).unwrap();
        let rhs = gf_add(101, &rhs_1, &rhs_2).unwrap();
        prop_assert_eq!(reduce(&lhs), reduce(&rhs));
    }

    #[test]
    fn gf_division_by_self_is_one_for_nonzero_elements(a in 1i64..101) {
        let ea = int_from_long(a);
        let quotient = gf_div(101, &ea, &ea).unwrap().0;
        prop_assert_eq!(reduce(&quotient), Expr::Number(Number::one()));
    }

    #[test]
    fn gcd_divides_both_operands_with_zero_remainder(f in poly_expr(), g in poly_expr()) {
        let f = reduce(&expand(&f));
        let g = reduce(&expand(&g));
        if f == Expr::Number(Number::zero()) || g == Expr::Number(Number::zero()) {
            return Ok(());
        }
        let Ok(d) = gcd(&f, &g) else { return Ok(()) };
        let r1 = poly_rem(&f, &d).unwrap();
        let r2 = poly_rem(&g, &d).unwrap();
        prop_assert_eq!(reduce(&r1), Expr::Number(Number::zero()));
        prop_assert_eq!(reduce(&r2), Expr::Number(Number::zero()));
    }
}

#[test]
fn parsed_polynomial_survives_expand_reduce_round_trip() {
    let e = Expr::from_str("(x + 1)^3").unwrap();
    let once = reduce(&expand(&e));
    let twice = reduce(&expand(&once));
    assert_eq!(once, twice);
}
