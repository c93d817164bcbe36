//! Exact rational numbers: the leaves of [`crate::expr::Expr`]'s `Integer`
//! and `Fraction` kinds.
//!
//! A `Number` is always kept in lowest terms with a positive denominator
//! (spec §3.2): `Rational` never has denominator `1` (that collapses to
//! `Integer`) and the stored fraction's `gcd(num, den) == 1`.

use crate::bigint::BigInt;
use crate::error::{MathError, MathResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Number {
    Integer(BigInt),
    Rational(BigInt, BigInt),
}

impl Number {
    pub fn integer(v: impl Into<BigInt>) -> Self {
        Number::Integer(v.into())
    }

    pub fn zero() -> Self {
        Number::Integer(BigInt::zero())
    }

    pub fn one() -> Self {
        Number::Integer(BigInt::one())
    }

    /// Builds a rational number, reducing to lowest terms and collapsing
    /// to `Integer` when the denominator becomes `1`. Errors on a zero
    /// denominator.
    pub fn rational(num: BigInt, den: BigInt) -> MathResult<Self> {
        if den.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        let (mut n, mut d) = (num, den);
        if d.is_negative() {
            n = n.neg();
            d = d.neg();
        }
        let g = n.gcd(&d);
        if !g.is_one() && !g.is_zero() {
            n = n.div_rem(&g).expect("gcd divides numerator").0;
            d = d.div_rem(&g).expect("gcd divides denominator").0;
        }
        if d.is_one() {
            Ok(Number::Integer(n))
        } else {
            Ok(Number::Rational(n, d))
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Number::Integer(n) => n.is_zero(),
            Number::Rational(n, _) => n.is_zero(),
        }
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Number::Integer(n) if n.is_one())
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Number::Integer(n) => n.is_negative(),
            Number::Rational(n, _) => n.is_negative(),
        }
    }

    pub fn numerator(&self) -> BigInt {
        match self {
            Number::Integer(n) => n.clone(),
            Number::Rational(n, _) => n.clone(),
        }
    }

    pub fn denominator(&self) -> BigInt {
        match self {
            Number::Integer(_) => BigInt::one(),
            Number::Rational(_, d) => d.clone(),
        }
    }

    pub fn neg(&self) -> Self {
        match self {
            Number::Integer(n) => Number::Integer(n.neg()),
            Number::Rational(n, d) => Number::Rational(n.neg(), d.clone()),
        }
    }

    pub fn add(&self, other: &Self) -> Self {
        let num = self.numerator().mul(&other.denominator()).add(&other.numerator().mul(&self.denominator()));
        let den = self.denominator().mul(&other.denominator());
        Number::rational(num, den).expect("denominators are nonzero")
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Self) -> Self {
        let num = self.numerator().mul(&other.numerator());
        let den = self.denominator().mul(&other.denominator());
        Number::rational(num, den).expect("denominators are nonzero")
    }

    pub fn div(&self, other: &Self) -> MathResult<Self> {
        if other.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        let num = self.numerator().mul(&other.denominator());
        let den = self.denominator().mul(&other.numerator());
        Number::rational(num, den)
    }

    /// Raises to a non-negative integer power by repeated squaring.
    pub fn pow_u64(&self, mut exp: u64) -> Self {
        let mut base = self.clone();
        let mut result = Number::one();
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.mul(&base);
            }
            base = base.mul(&base);
            exp >>= 1;
        }
        result
    }

    /// Raises to a (possibly negative) integer power. Errors on `0^(negative)`.
    pub fn pow_i64(&self, exp: i64) -> MathResult<Self> {
        if exp >= 0 {
            Ok(self.pow_u64(exp as u64))
        } else {
            if self.is_zero() {
                return Err(MathError::DivisionByZero);
            }
            Ok(Number::one().div(&self.pow_u64((-exp) as u64)).expect("nonzero base"))
        }
    }

    pub fn cmp_value(&self, other: &Self) -> Ordering {
        // a/b vs c/d, with b,d > 0: compare a*d vs c*b.
        let lhs = self.numerator().mul(&other.denominator());
        let rhs = other.numerator().mul(&self.denominator());
        lhs.cmp(&rhs)
    }

    /// Approximates a finite `f64` as `integral + n/d` with `d` bounded by
    /// `1e14`, following the original kernel's `numberFromDouble`
    /// (`modf` split + continued-fraction reduction of the fractional
    /// part). Non-finite input has no well-defined rational value; the
    /// caller maps that to `Expr::Undefined` (see `expr::constructors`).
    pub fn from_f64(v: f64) -> Option<Self> {
        if !v.is_finite() {
            return None;
        }
        let integral = v.trunc();
        let fractional = v - integral;

        let int_part = BigInt::from_decimal_str(&format!("{:.0}", integral)).ok()?;
        if fractional == 0.0 {
            return Some(Number::Integer(int_part));
        }

        let (n, d) = decimal_to_fraction(fractional.abs(), 100_000_000_000_000i64);
        let frac_num = if fractional < 0.0 { n.neg() } else { n };
        let frac = Number::rational(frac_num, d).ok()?;
        Some(Number::Integer(int_part).add(&frac))
    }
}

/// Continued-fraction approximation of `x` (`0 <= x < 1`) by `n/d` with
/// `d <= max_den`.
fn decimal_to_fraction(x: f64, max_den: i64) -> (BigInt, BigInt) {
    let (mut h_prev, mut h_cur) = (0i64, 1i64);
    let (mut k_prev, mut k_cur) = (1i64, 0i64);
    let mut r = x;
    for _ in 0..64 {
        let a = r.floor();
        let a_i = a as i64;
        let h_next = a_i.saturating_mul(h_cur).saturating_add(h_prev);
        let k_next = a_i.saturating_mul(k_cur).saturating_add(k_prev);
        if k_next > max_den || k_next <= 0 {
            break;
        }
        h_prev = h_cur;
        h_cur = h_next;
        k_prev = k_cur;
        k_cur = k_next;
        let frac = r - a;
        if frac.abs() < 1e-15 {
            break;
        }
        r = 1.0 / frac;
    }
    if k_cur == 0 {
        (BigInt::zero(), BigInt::one())
    } else {
        (BigInt::from(h_cur), BigInt::from(k_cur))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{n}"),
            Number::Rational(n, d) => write!(f, "{n}/{d}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rational_reduces_to_lowest_terms() {
        let n = Number::rational(BigInt::from(4i64), BigInt::from(8i64)).unwrap();
        assert_eq!(n, Number::rational(BigInt::from(1i64), BigInt::from(2i64)).unwrap());
    }

    #[test]
    fn denominator_one_collapses_to_integer() {
        let n = Number::rational(BigInt::from(6i64), BigInt::from(2i64)).unwrap();
        assert_eq!(n, Number::Integer(BigInt::from(3i64)));
    }

    #[test]
    fn negative_denominator_normalizes_sign() {
        let n = Number::rational(BigInt::from(1i64), BigInt::from(-2i64)).unwrap();
        assert_eq!(n, Number::rational(BigInt::from(-1i64), BigInt::from(2i64)).unwrap());
    }

    #[test]
    fn arithmetic_matches_rationals() {
        let half = Number::rational(BigInt::from(1i64), BigInt::from(2i64)).unwrap();
        let third = Number::rational(BigInt::from(1i64), BigInt::from(3i64)).unwrap();
        let sum = half.add(&third);
        assert_eq!(sum, Number::rational(BigInt::from(5i64), BigInt::from(6i64)).unwrap());
    }

    #[test]
    fn division_by_zero_number_errors() {
        assert!(Number::one().div(&Number::zero()).is_err());
    }

    #[test]
    fn from_f64_matches_simple_fractions() {
        let n = Number::from_f64(0.5).unwrap();
        assert_eq!(n, Number::rational(BigInt::from(1i64), BigInt::from(2i64)).unwrap());
    }

    #[test]
    fn from_f64_rejects_non_finite() {
        assert!(Number::from_f64(f64::NAN).is_none());
        assert!(Number::from_f64(f64::INFINITY).is_none());
    }
}
