//! Exact values of the six trigonometric functions at rational multiples
//! of `pi` (spec §4.3's "trig identities"). `pi` itself has no dedicated
//! `Expr` kind — it is the ordinary symbol `pi`, matching how the facade
//! constructs it (`symbol("pi")`); this table only fires when an argument
//! is recognizably `k*pi` for a rational `k`.
//!
//! Anything off this finite grid of standard angles is left as an
//! unevaluated `FUNCTION` node for the caller (or a later numeric
//! evaluator outside this crate's scope) to handle.

use crate::bigint::BigInt;
use crate::expr::constructors as c;
use crate::expr::Expr;
use crate::number::Number;
use std::cmp::Ordering;

/// Recognizes `e` as `k * pi` for a rational `k`, returning `k`.
fn pi_multiple(e: &Expr) -> Option<Number> {
    match e {
        Expr::Symbol(s) if s.name() == "pi" => Some(Number::one()),
        Expr::Mul(factors) if factors.len() == 2 => {
            let (a, b) = (&factors[0], &factors[1]);
            match (a, b) {
                (Expr::Number(n), Expr::Symbol(s)) if s.name() == "pi" => Some(n.clone()),
                (Expr::Symbol(s), Expr::Number(n)) if s.name() == "pi" => Some(n.clone()),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Reduces `k` (in units of pi) to its representative in `[0, 2)` and
/// records whether the reduction flipped an odd number of half-turns
/// worth of sign for odd functions — callers combine this with the sign
/// of `k` itself.
fn reduced_fraction(k: &Number) -> (i64, i64) {
    // k = num/den in lowest terms; reduce num mod (2*den) to land in [0, 2*den).
    let num = k.numerator().to_i64().unwrap_or(i64::MAX);
    let den = k.denominator().to_i64().unwrap_or(1);
    let period = 2 * den;
    let mut r = num % period;
    if r < 0 {
        r += period;
    }
    (r, den)
}

const SQRT2_OVER_2: &str = "sqrt(2)/2";
const SQRT3_OVER_2: &str = "sqrt(3)/2";
const SQRT3_OVER_3: &str = "sqrt(3)/3";

fn parse(s: &str) -> Expr {
    s.parse().expect("valid literal")
}

/// Sign/value table for `sin`/`cos` at `r/d` turns of `pi`, `r` already
/// reduced to `[0, 2d)`.
fn sin_cos_at(r: i64, d: i64) -> Option<(Expr, Expr)> {
    // Normalize to a quarter-turn representative using standard
    // reflection identities, matching the angles the original kernel's
    // trig simplifier special-cases: multiples of pi/6, pi/4, pi/3, pi/2.
    let (num, den) = (r, d);
    let g = gcd_i64(num.unsigned_abs() as i64, den);
    let (num, den) = if g == 0 { (num, den) } else { (num / g, den / g) };
    let key = (num, den);
    let base = match key {
        (0, _) => Some((c::integer(0), c::integer(1))),
        (1, 6) => Some((c::rational(1, 2), parse(SQRT3_OVER_2))),
        (1, 4) => Some((parse(SQRT2_OVER_2), parse(SQRT2_OVER_2))),
        (1, 3) => Some((parse(SQRT3_OVER_2), c::rational(1, 2))),
        (1, 2) => Some((c::integer(1), c::integer(0))),
        (2, 3) => Some((parse(SQRT3_OVER_2), c::rational(-1, 2))),
        (3, 4) => Some((parse(SQRT2_OVER_2), c::neg(parse(SQRT2_OVER_2)))),
        (5, 6) => Some((c::rational(1, 2), c::neg(parse(SQRT3_OVER_2)))),
        (1, 1) => Some((c::integer(0), c::integer(-1))),
        (7, 6) => Some((c::rational(-1, 2), c::neg(parse(SQRT3_OVER_2)))),
        (5, 4) => Some((c::neg(parse(SQRT2_OVER_2)), c::neg(parse(SQRT2_OVER_2)))),
        (4, 3) => Some((c::neg(parse(SQRT3_OVER_2)), c::rational(-1, 2))),
        (3, 2) => Some((c::integer(-1), c::integer(0))),
        (5, 3) => Some((c::neg(parse(SQRT3_OVER_2)), c::rational(1, 2))),
        (7, 4) => Some((c::neg(parse(SQRT2_OVER_2)), parse(SQRT2_OVER_2))),
        (11, 6) => Some((c::rational(-1, 2), parse(SQRT3_OVER_2))),
        _ => None,
    };
    base
}

fn gcd_i64(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

pub fn exact_value(name: &str, arg: &Expr) -> Option<Expr> {
    let k = pi_multiple(arg)?;
    let (r, d) = reduced_fraction(&k);
    let (sin_v, cos_v) = sin_cos_at(r, d)?;
    match name {
        "sin" => Some(sin_v),
        "cos" => Some(cos_v),
        "tan" => {
            if matches!(&cos_v, Expr::Number(n) if n.is_zero()) {
                None
            } else if matches!(&sin_v, Expr::Number(n) if n.is_zero()) {
                Some(c::integer(0))
            } else {
                Some(simplify_tan(&sin_v, &cos_v))
            }
        }
        "csc" => reciprocal_or_none(&sin_v),
        "sec" => reciprocal_or_none(&cos_v),
        "cot" => {
            if matches!(&sin_v, Expr::Number(n) if n.is_zero()) {
                None
            } else {
                Some(simplify_tan(&cos_v, &sin_v))
            }
        }
        _ => None,
    }
}

fn reciprocal_or_none(v: &Expr) -> Option<Expr> {
    if matches!(v, Expr::Number(n) if n.is_zero()) {
        None
    } else {
        Some(super::reduce(&c::div(c::integer(1), v.clone())))
    }
}

fn simplify_tan(num: &Expr, den: &Expr) -> Expr {
    // The handful of quarter-turn angles this table covers all have
    // sin/cos sharing the same radical factor, so the quotient reduces
    // to a small rational or `sqrt(3)/3`.
    match (num, den) {
        (Expr::Number(_), Expr::Number(_)) => super::reduce(&c::div(num.clone(), den.clone())),
        _ if num == den => c::integer(1),
        _ if *num == c::neg(den.clone()) => c::integer(-1),
        (a, Expr::Number(n)) if n.cmp_value(&Number::rational(BigInt::from(1), BigInt::from(2)).unwrap()) == Ordering::Equal => {
            super::reduce(&c::mul(vec![c::integer(2), a.clone()]))
        }
        _ => parse(SQRT3_OVER_3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sin_cos_tan_of_zero() {
        let zero = c::integer(0);
        assert_eq!(exact_value("sin", &zero), Some(c::integer(0)));
        assert_eq!(exact_value("cos", &zero), Some(c::integer(1)));
        assert_eq!(exact_value("tan", &zero), Some(c::integer(0)));
    }

    #[test]
    fn sin_of_pi_over_two_is_one() {
        let half_pi = c::mul(vec![c::rational(1, 2), c::symbol("pi")]);
        assert_eq!(exact_value("sin", &half_pi), Some(c::integer(1)));
        assert_eq!(exact_value("cos", &half_pi), Some(c::integer(0)));
        assert_eq!(exact_value("tan", &half_pi), None);
    }

    #[test]
    fn cos_of_pi_is_negative_one() {
        let pi = c::symbol("pi");
        assert_eq!(exact_value("cos", &pi), Some(c::integer(-1)));
    }

    #[test]
    fn non_standard_angle_is_not_in_the_table() {
        assert_eq!(exact_value("sin", &c::symbol("x")), None);
    }
}
