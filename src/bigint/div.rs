//! Knuth Algorithm D division (The Art of Computer Programming, Vol. 2, §4.3.1).
//!
//! Sign handling follows the truncating-division table resolved in
//! `DESIGN.md`: `sign(quotient) = sign(x) * sign(y)`,
//! `sign(remainder) = sign(x)`.

use super::ops::{shl_small, shr_small};
use super::{cmp_digits, hbit, BigInt, BASE, BASE_BITS, DIGIT_MASK};
use crate::error::MathError;
use std::cmp::Ordering;

/// Divides magnitude `u` by magnitude `v` (`v` nonzero), returning
/// `(quotient, remainder)` magnitudes.
fn div_rem_abs(u: &[u32], v: &[u32]) -> (Vec<u32>, Vec<u32>) {
    debug_assert!(!v.is_empty());
    let n = v.len();

    if cmp_digits(u, v) == Ordering::Less {
        return (Vec::new(), u.to_vec());
    }

    if n == 1 {
        let v0 = v[0] as u64;
        let mut quotient = vec![0u32; u.len()];
        let mut rem: u64 = 0;
        for i in (0..u.len()).rev() {
            let cur = (rem << BASE_BITS) | u[i] as u64;
            quotient[i] = (cur / v0) as u32;
            rem = cur % v0;
        }
        let remainder = if rem == 0 { Vec::new() } else { vec![rem as u32] };
        return (BigInt::trim(quotient), remainder);
    }

    let m = u.len() - n;
    let d = BASE_BITS - hbit(v[n - 1]);

    let vn = shl_small(v, d); // exactly n digits, see DESIGN.md normalization note
    debug_assert_eq!(vn.len(), n);

    let mut un = shl_small(u, d);
    un.resize(m + n + 1, 0);

    let mut q = vec![0u32; m + 1];
    let v1 = vn[n - 1] as u64;
    let v2 = vn[n - 2] as u64;

    for j in (0..=m).rev() {
        let ujn = un[j + n] as u64;
        let ujn1 = un[j + n - 1] as u64;
        let numerator = (ujn << BASE_BITS) | ujn1;

        let mut qhat = numerator / v1;
        let mut rhat = numerator % v1;

        while qhat >= BASE || qhat * v2 > (rhat << BASE_BITS) | (un[j + n - 2] as u64) {
            qhat -= 1;
            rhat += v1;
            if rhat >= BASE {
                break;
            }
        }

        let mut borrow: i64 = 0;
        let mut carry: u64 = 0;
        for i in 0..n {
            let p = qhat * vn[i] as u64 + carry;
            carry = p >> BASE_BITS;
            let sub = un[j + i] as i64 - (p & DIGIT_MASK as u64) as i64 - borrow;
            if sub < 0 {
                un[j + i] = (sub + BASE as i64) as u32;
                borrow = 1;
            } else {
                un[j + i] = sub as u32;
                borrow = 0;
            }
        }
        let sub_top = un[j + n] as i64 - carry as i64 - borrow;
        let top_negative = sub_top < 0;
        un[j + n] = if top_negative { (sub_top + BASE as i64) as u32 } else { sub_top as u32 };

        if top_negative {
            qhat -= 1;
            let mut carry2: u64 = 0;
            for i in 0..n {
                let s = un[j + i] as u64 + vn[i] as u64 + carry2;
                un[j + i] = (s & DIGIT_MASK as u64) as u32;
                carry2 = s >> BASE_BITS;
            }
            un[j + n] = ((un[j + n] as u64 + carry2) & DIGIT_MASK as u64) as u32;
        }

        q[j] = qhat as u32;
    }

    let remainder = shr_small(&un[0..n], d);
    (BigInt::trim(q), remainder)
}

impl BigInt {
    /// Truncating division: `self == quotient * other + remainder`, with
    /// `remainder` taking the sign of `self` (or zero) and
    /// `|remainder| < |other|`.
    pub fn div_rem(&self, other: &Self) -> Result<(Self, Self), MathError> {
        if other.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        if self.is_zero() {
            return Ok((BigInt::zero(), BigInt::zero()));
        }
        let (q_digits, r_digits) = div_rem_abs(&self.digits, &other.digits);
        let q_sign = self.sign * other.sign;
        let quotient = if q_digits.is_empty() { BigInt::zero() } else { BigInt { sign: q_sign, digits: q_digits } };
        let remainder = if r_digits.is_empty() { BigInt::zero() } else { BigInt { sign: self.sign, digits: r_digits } };
        Ok((quotient, remainder))
    }

    /// Euclidean remainder: `0 <= self.rem_euclid(other) < |other|`.
    pub fn rem_euclid(&self, other: &Self) -> Result<Self, MathError> {
        let (_, r) = self.div_rem(other)?;
        if r.is_negative() {
            Ok(r.add(&other.abs()))
        } else {
            Ok(r)
        }
    }

    /// `true` if `other` divides `self` exactly.
    pub fn is_divisible_by(&self, other: &Self) -> bool {
        if other.is_zero() {
            return self.is_zero();
        }
        matches!(self.div_rem(other), Ok((_, r)) if r.is_zero())
    }
}
