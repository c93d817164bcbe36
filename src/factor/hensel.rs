//! Lifts a `GF(p)` factorization of a monic integer polynomial to a
//! factorization mod `p^k`, `k` chosen so `p^k` exceeds twice the
//! Mignotte bound on any true integer factor's coefficients (spec
//! §4.7). Limited to monic polynomials: a non-monic primitive part is
//! handled by the caller via the standard `lc^(n-1) f(x/lc)` reduction
//! (see `factor::factor_over_q`), which always hands this module a
//! monic target.

use crate::bigint::BigInt;
use crate::gf::{mod_inverse, GfPoly};
use crate::number::Number;
use crate::polyexpr::PolyExpr;

/// `sum |a_i|` bound doubled, per Mignotte: any integer factor of a
/// monic `f` has coefficients bounded by `2^deg(f) * ||f||`, `||f||`
/// the Euclidean norm of `f`'s coefficient vector. We use the simpler
/// (looser but easy to compute exactly in integers) bound
/// `2^deg(f) * sum(|a_i|)`.
fn mignotte_bound(f: &PolyExpr) -> BigInt {
    let coeffs = f.to_coeff_vec();
    let sum: BigInt = coeffs.iter().fold(BigInt::zero(), |acc, c| {
        let PolyExpr::Const(n) = c else { unreachable!("univariate") };
        acc.add(&n.numerator().abs())
    });
    let deg = coeffs.len().saturating_sub(1) as u64;
    let mut bound = BigInt::one();
    for _ in 0..deg {
        bound = bound.mul(&BigInt::from(2i64));
    }
    bound.mul(&sum).mul(&BigInt::from(2i64))
}

/// Maps each coefficient (assumed already in `[0, modulus)`) to its
/// symmetric representative in `(-modulus/2, modulus/2]`.
fn symmetric_representative(f: &PolyExpr, modulus: &BigInt) -> PolyExpr {
    let half = modulus.shr(1);
    let coeffs: Vec<PolyExpr> = f
        .to_coeff_vec()
        .iter()
        .map(|c| {
            let PolyExpr::Const(n) = c else { unreachable!("univariate") };
            let v = n.numerator();
            let rep = if v.cmp(&half) == std::cmp::Ordering::Greater { v.sub(modulus) } else { v };
            PolyExpr::constant(Number::Integer(rep))
        })
        .collect();
    PolyExpr::from_coeffs(coeffs)
}

fn bigint_poly_mod(f: &PolyExpr, modulus_p: i64) -> GfPoly {
    let coeffs: Vec<i64> = f
        .to_coeff_vec()
        .iter()
        .map(|c| {
            let PolyExpr::Const(n) = c else { unreachable!("univariate") };
            let rem = n.numerator().div_rem(&BigInt::from(modulus_p)).expect("modulus nonzero").1;
            rem.to_i64().expect("fits i64")
        })
        .collect();
    GfPoly::trimmed(modulus_p, coeffs)
}

/// Lifts `factors0` (monic `GF(p)` irreducibles, pairwise coprime, whose
/// product is `target mod p`) to integer polynomials whose product
/// equals `target` exactly, by lifting precision `p^k` one power of `p`
/// at a time. Each lift step reuses the Bezout coefficients of
/// `(factor_i mod p, product_of_others mod p)`, which never change
/// across precision levels since only the p-adic digits grow.
pub fn hensel_lift(target: &PolyExpr, p: i64, factors0: &[GfPoly]) -> Vec<PolyExpr> {
    if factors0.len() <= 1 {
        return vec![target.clone()];
    }
    let bound = mignotte_bound(target);
    let mut modulus = BigInt::from(p);
    let mut lifted: Vec<PolyExpr> = factors0.iter().map(|g| g.to_poly_expr()).collect();

    // Bezout coefficients for each `(factor_i, product of the rest)` pair
    // mod p, computed once and reused at every precision level.
    let bezout: Vec<(GfPoly, GfPoly)> = (0..factors0.len())
        .map(|i| {
            let gi = factors0[i].clone();
            let hi = factors0
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .fold(GfPoly::constant(p, 1), |acc, (_, g)| acc.mul(g));
            extended_gcd_poly(&gi, &hi)
        })
        .collect();

    while modulus.cmp(&bound) != std::cmp::Ordering::Greater {
        let product: PolyExpr = lifted.iter().fold(PolyExpr::one(), |acc, f| acc.mul(f));
        let error = target.sub(&product);
        if error.is_zero() {
            break;
        }
        let error_over_mod = divide_by_bigint(&error, &modulus);
        let error_mod_p = bigint_poly_mod(&error_over_mod, p);

        let mut next = Vec::with_capacity(lifted.len());
        for (i, f_i) in lifted.iter().enumerate() {
            // delta_i = (t_i * e) mod g_i, mod p: the correction paired
            // with h_i's Bezout coefficient (see two-factor derivation
            // above), reduced mod g_i to keep its degree bounded.
            let (_, t_i) = &bezout[i];
            let delta = t_i.mul(&error_mod_p).rem(&factors0[i]).unwrap();
            let delta_scaled = delta.to_poly_expr().scalar_mul(&Number::Integer(modulus.clone()));
            next.push(f_i.add(&delta_scaled));
        }
        lifted = next;
        modulus = modulus.mul(&BigInt::from(p));
    }

    lifted.into_iter().map(|f| symmetric_representative(&f, &modulus)).collect()
}

fn divide_by_bigint(f: &PolyExpr, modulus: &BigInt) -> PolyExpr {
    let coeffs: Vec<PolyExpr> = f
        .to_coeff_vec()
        .iter()
        .map(|c| {
            let PolyExpr::Const(n) = c else { unreachable!("univariate") };
            let q = n.numerator().div_rem(modulus).expect("modulus divides error exactly").0;
            PolyExpr::constant(Number::Integer(q))
        })
        .collect();
    PolyExpr::from_coeffs(coeffs)
}

/// Extended Euclidean algorithm over `GF(p)[x]`: returns `(s, t)` with
/// `s*a + t*b == 1`, assuming `a`, `b` are coprime.
fn extended_gcd_poly(a: &GfPoly, b: &GfPoly) -> (GfPoly, GfPoly) {
    let p = a.p;
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_s, mut s) = (GfPoly::constant(p, 1), GfPoly::constant(p, 0));
    let (mut old_t, mut t) = (GfPoly::constant(p, 0), GfPoly::constant(p, 1));
    while !r.is_zero() {
        let q = old_r.quo(&r).expect("GF(p) is a field");
        let new_r = old_r.sub(&q.mul(&r));
        old_r = r;
        r = new_r;
        let new_s = old_s.sub(&q.mul(&s));
        old_s = s;
        s = new_s;
        let new_t = old_t.sub(&q.mul(&t));
        old_t = t;
        t = new_t;
    }
    let inv_lc = mod_inverse(old_r.leading_coeff(), p).expect("p is prime");
    (old_s.scalar_mul(inv_lc), old_t.scalar_mul(inv_lc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Expr;
    use crate::symbol::Symbol;

    #[test]
    fn extended_gcd_recovers_bezout_identity() {
        let a = GfPoly::trimmed(5, vec![4, 0, 1]); // x^2 - 1 == x^2+4
        let b = GfPoly::trimmed(5, vec![4, 1]); // x - 1 == x+4
        let (s, t) = extended_gcd_poly(&a, &b);
        let combo = s.mul(&a).add(&t.mul(&b));
        assert_eq!(combo, GfPoly::constant(5, 1));
    }

    #[test]
    fn lifting_two_coprime_linear_factors_reconstructs_product() {
        let x = Symbol::new("x");
        let e: Expr = "x^2 - 1".parse().unwrap();
        let target = PolyExpr::normalize(&e, &[x.clone()]).unwrap();
        let f1 = GfPoly::trimmed(7, vec![6, 1]); // x - 1
        let f2 = GfPoly::trimmed(7, vec![1, 1]); // x + 1
        let lifted = hensel_lift(&target, 7, &[f1, f2]);
        assert_eq!(lifted.len(), 2);
        let product = lifted.iter().fold(PolyExpr::one(), |acc, f| acc.mul(f));
        assert_eq!(product.to_expr(&[x]), crate::reduce::reduce(&e));
    }
}
