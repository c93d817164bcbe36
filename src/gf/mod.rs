//! Univariate polynomials over the finite field `GF(p)` (spec §4.6),
//! `p` a prime fitting a signed 64-bit integer. Used by [`crate::factor`]
//! for distinct-degree/equal-degree factoring before Hensel lifting.
//!
//! Coefficients are kept as plain `i64` in `[0, p)` rather than routed
//! through [`crate::bigint::BigInt`]: `p < 2^63` and every intermediate
//! product is reduced mod `p` immediately, so `i128` is enough headroom
//! for the multiply-then-reduce step without arbitrary precision.

use crate::error::{MathError, MathResult};
use crate::number::Number;
use crate::polyexpr::PolyExpr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GfPoly {
    pub p: i64,
    /// `coeffs[i]` is the coefficient of `x^i`, each in `[0, p)`.
    /// Trimmed so the zero polynomial is exactly `[0]`.
    pub coeffs: Vec<i64>,
}

fn reduce_mod(v: i64, p: i64) -> i64 {
    let r = v % p;
    if r < 0 {
        r + p
    } else {
        r
    }
}

/// Trial-division primality check. `p` is expected to be a small working
/// prime chosen by the factoring pipeline, not an adversarial input, so
/// `O(sqrt(p))` trial division (rather than Miller-Rabin) is adequate.
pub fn is_prime(p: i64) -> bool {
    if p < 2 {
        return false;
    }
    if p % 2 == 0 {
        return p == 2;
    }
    let mut d = 3i64;
    while d.saturating_mul(d) <= p {
        if p % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

/// Extended Euclidean algorithm: returns `(g, x, y)` with `a*x + b*y = g`.
fn ext_gcd(a: i64, b: i64) -> (i64, i64, i64) {
    if b == 0 {
        (a, 1, 0)
    } else {
        let (g, x1, y1) = ext_gcd(b, a % b);
        (g, y1, x1 - (a / b) * y1)
    }
}

pub fn mod_inverse(a: i64, p: i64) -> MathResult<i64> {
    let a = reduce_mod(a, p);
    if a == 0 {
        return Err(MathError::DomainError {
            operation: "gf_inverse".to_string(),
            reason: "zero has no inverse".to_string(),
        });
    }
    let (g, x, _) = ext_gcd(a, p);
    if g != 1 {
        return Err(MathError::DomainError {
            operation: "gf_inverse".to_string(),
            reason: format!("{p} is not prime (gcd({a}, {p}) = {g})"),
        });
    }
    Ok(reduce_mod(x, p))
}

impl GfPoly {
    pub fn zero(p: i64) -> Self {
        GfPoly { p, coeffs: vec![0] }
    }

    pub fn constant(p: i64, c: i64) -> Self {
        GfPoly { p, coeffs: vec![reduce_mod(c, p)] }
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|&c| c == 0)
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    pub fn leading_coeff(&self) -> i64 {
        *self.coeffs.last().unwrap()
    }

    pub(crate) fn trimmed(p: i64, mut coeffs: Vec<i64>) -> Self {
        while coeffs.len() > 1 && *coeffs.last().unwrap() == 0 {
            coeffs.pop();
        }
        if coeffs.is_empty() {
            coeffs.push(0);
        }
        GfPoly { p, coeffs }
    }

    pub fn add(&self, other: &Self) -> Self {
        let n = self.coeffs.len().max(other.coeffs.len());
        let coeffs = (0..n)
            .map(|i| {
                let a = self.coeffs.get(i).copied().unwrap_or(0);
                let b = other.coeffs.get(i).copied().unwrap_or(0);
                reduce_mod(a + b, self.p)
            })
            .collect();
        Self::trimmed(self.p, coeffs)
    }

    pub fn neg(&self) -> Self {
        Self::trimmed(self.p, self.coeffs.iter().map(|&c| reduce_mod(-c, self.p)).collect())
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero(self.p);
        }
        let mut coeffs = vec![0i64; self.coeffs.len() + other.coeffs.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            if a == 0 {
                continue;
            }
            for (j, &b) in other.coeffs.iter().enumerate() {
                let prod = (a as i128) * (b as i128) % self.p as i128;
                coeffs[i + j] = reduce_mod(coeffs[i + j] + prod as i64, self.p);
            }
        }
        Self::trimmed(self.p, coeffs)
    }

    pub fn scalar_mul(&self, k: i64) -> Self {
        let k = reduce_mod(k, self.p);
        Self::trimmed(self.p, self.coeffs.iter().map(|&c| reduce_mod(c * k, self.p)).collect())
    }

    /// Division is always exact (every nonzero field element is
    /// invertible): `quo`/`rem` are the whole answer, not a partial one.
    pub fn div_rem(&self, other: &Self) -> MathResult<(Self, Self)> {
        if other.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        let inv_lc = mod_inverse(other.leading_coeff(), self.p)?;
        let mut r = self.coeffs.clone();
        let n = other.degree();
        let mut q = vec![0i64; r.len().saturating_sub(n)];
        loop {
            while r.len() > 1 && *r.last().unwrap() == 0 {
                r.pop();
            }
            if r.iter().all(|&c| c == 0) {
                break;
            }
            let m = r.len() - 1;
            if m < n {
                break;
            }
            let coeff = (r[m] as i128 * inv_lc as i128 % self.p as i128) as i64;
            let coeff = reduce_mod(coeff, self.p);
            let shift = m - n;
            if q.len() <= shift {
                q.resize(shift + 1, 0);
            }
            q[shift] = coeff;
            for (i, &b) in other.coeffs.iter().enumerate() {
                let idx = i + shift;
                if idx < r.len() {
                    let prod = (coeff as i128) * (b as i128) % self.p as i128;
                    r[idx] = reduce_mod(r[idx] - prod as i64, self.p);
                }
            }
        }
        Ok((Self::trimmed(self.p, q), Self::trimmed(self.p, r)))
    }

    pub fn quo(&self, other: &Self) -> MathResult<Self> {
        self.div_rem(other).map(|(q, _)| q)
    }

    pub fn rem(&self, other: &Self) -> MathResult<Self> {
        self.div_rem(other).map(|(_, r)| r)
    }

    pub fn gcd(&self, other: &Self) -> MathResult<Self> {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let (_, r) = a.div_rem(&b)?;
            a = b;
            b = r;
        }
        if a.is_zero() {
            return Ok(a);
        }
        let inv_lc = mod_inverse(a.leading_coeff(), self.p)?;
        Ok(a.scalar_mul(inv_lc))
    }

    pub fn pow_mod(&self, mut exp: u64, modulus: &Self) -> MathResult<Self> {
        let mut base = self.rem(modulus)?;
        let mut result = GfPoly::constant(self.p, 1);
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.mul(&base).rem(modulus)?;
            }
            base = base.mul(&base).rem(modulus)?;
            exp >>= 1;
        }
        Ok(result)
    }

    pub fn derivative(&self) -> Self {
        if self.coeffs.len() <= 1 {
            return Self::zero(self.p);
        }
        let coeffs = self.coeffs[1..]
            .iter()
            .enumerate()
            .map(|(i, &c)| reduce_mod(c * (i as i64 + 1), self.p))
            .collect();
        Self::trimmed(self.p, coeffs)
    }

    pub fn to_poly_expr(&self) -> PolyExpr {
        let coeffs: Vec<PolyExpr> =
            self.coeffs.iter().map(|&c| PolyExpr::constant(Number::integer(c))).collect();
        PolyExpr::from_coeffs(coeffs)
    }
}

/// Projects an integer-coefficient (or denominator-coprime-to-`p`
/// rational) `PolyExpr` into `GF(p)` (spec §4.6's `project`).
pub fn project(p: i64, poly: &PolyExpr) -> MathResult<GfPoly> {
    if !is_prime(p) {
        return Err(MathError::DomainError {
            operation: "gf_project".to_string(),
            reason: format!("{p} is not prime"),
        });
    }
    let coeffs_src = poly.to_coeff_vec();
    let mut coeffs = Vec::with_capacity(coeffs_src.len());
    for c in coeffs_src {
        let PolyExpr::Const(n) = c else {
            return Err(MathError::DomainError {
                operation: "gf_project".to_string(),
                reason: "multivariate coefficient cannot be projected into GF(p)".to_string(),
            });
        };
        coeffs.push(project_number(&n, p)?);
    }
    Ok(GfPoly::trimmed(p, coeffs))
}

fn project_number(n: &Number, p: i64) -> MathResult<i64> {
    let num = n.numerator().to_i64().ok_or_else(|| MathError::DomainError {
        operation: "gf_project".to_string(),
        reason: "coefficient too large to reduce mod p".to_string(),
    })?;
    let den = n.denominator().to_i64().ok_or_else(|| MathError::DomainError {
        operation: "gf_project".to_string(),
        reason: "coefficient too large to reduce mod p".to_string(),
    })?;
    let den_mod = reduce_mod(den, p);
    if den_mod == 0 {
        return Err(MathError::DomainError {
            operation: "gf_project".to_string(),
            reason: "denominator is divisible by p".to_string(),
        });
    }
    let inv_den = mod_inverse(den_mod, p)?;
    Ok(reduce_mod((reduce_mod(num, p) as i128 * inv_den as i128 % p as i128) as i64, p))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(p: i64, coeffs: &[i64]) -> GfPoly {
        GfPoly::trimmed(p, coeffs.to_vec())
    }

    #[test]
    fn addition_is_commutative() {
        let a = poly(7, &[1, 2, 3]);
        let b = poly(7, &[5, 6]);
        assert_eq!(a.add(&b), b.add(&a));
    }

    #[test]
    fn multiplying_by_one_is_identity() {
        let a = poly(7, &[1, 2, 3]);
        let one = GfPoly::constant(7, 1);
        assert_eq!(a.mul(&one), a);
    }

    #[test]
    fn division_then_remultiply_recovers_dividend() {
        let f = poly(5, &[1, 0, 1, 1]); // x^3 + x^2 + 1
        let g = poly(5, &[1, 1]); // x + 1
        let (q, r) = f.div_rem(&g).unwrap();
        let reconstructed = q.mul(&g).add(&r);
        assert_eq!(reconstructed, f);
    }

    #[test]
    fn non_prime_modulus_fails_projection() {
        let p = PolyExpr::constant(Number::integer(1));
        assert!(project(4, &p).is_err());
    }

    #[test]
    fn inverse_of_nonzero_element_round_trips() {
        for a in 1..7 {
            let inv = mod_inverse(a, 7).unwrap();
            assert_eq!((a * inv).rem_euclid(7), 1);
        }
    }
}
