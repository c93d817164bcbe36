//! Factoring a square-free `GF(p)` polynomial into irreducibles:
//! distinct-degree factorization (DDF) followed by Cantor-Zassenhaus
//! equal-degree factorization (EDF). Feeds Hensel lifting (spec §4.7).

use crate::gf::GfPoly;
use rand::Rng;

/// Splits a square-free `f` into groups of same-degree irreducible
/// factors: `[(product_of_factors_of_this_degree, degree)]`. Standard
/// DDF: `h` tracks `x^(p^d) mod rem`, squared-and-reduced (via
/// `pow_mod`) one `d` at a time; `gcd(h - x, rem)` collects every
/// degree-`d` irreducible factor still present in `rem` at once.
fn distinct_degree_split(f: &GfPoly) -> Vec<(GfPoly, usize)> {
    let p = f.p;
    let mut result = Vec::new();
    let mut rem = f.clone();
    let x_poly = GfPoly::trimmed(p, vec![0, 1]);
    let mut h = x_poly.clone();
    let mut d = 0usize;
    while rem.degree() > 0 && 2 * (d + 1) <= rem.degree() {
        d += 1;
        h = h.pow_mod(p as u64, &rem).unwrap();
        let g = h.sub(&x_poly).gcd(&rem).unwrap();
        if g.degree() > 0 {
            result.push((g.clone(), d));
            rem = rem.quo(&g).unwrap();
            h = h.rem(&rem).unwrap();
        }
    }
    if rem.degree() > 0 {
        result.push((rem.clone(), rem.degree()));
    }
    result
}

/// Splits a product of `count` irreducible factors, all of degree `d`,
/// into its individual irreducible factors (Cantor-Zassenhaus, for odd
/// `p`; `p == 2` is not exercised by this kernel's factoring entry point).
fn equal_degree_split(f: &GfPoly, d: usize, rng: &mut impl Rng) -> Vec<GfPoly> {
    if f.degree() == d {
        return vec![f.clone()];
    }
    let p = f.p;
    loop {
        let deg = f.degree();
        let coeffs: Vec<i64> = (0..deg).map(|_| rng.gen_range(0..p)).collect();
        let a = GfPoly::trimmed(p, coeffs);
        if a.degree() == 0 {
            continue;
        }
        let g = a.gcd(f).unwrap();
        let candidate = if g.degree() > 0 && g.degree() < f.degree() {
            Some(g)
        } else {
            let exp = (modpow_exponent(p, d) - 1) / 2;
            let b = a.pow_mod(exp, f).unwrap();
            let b_minus_one = b.sub(&GfPoly::constant(p, 1));
            let g2 = b_minus_one.gcd(f).unwrap();
            if g2.degree() > 0 && g2.degree() < f.degree() {
                Some(g2)
            } else {
                None
            }
        };
        if let Some(g) = candidate {
            let h = f.quo(&g).unwrap();
            let mut left = equal_degree_split(&g, d, rng);
            let mut right = equal_degree_split(&h, d, rng);
            left.append(&mut right);
            return left;
        }
    }
}

/// `p^d`, used only as the exponent `(p^d - 1)/2` in equal-degree
/// splitting; `d` and `p` are small enough in practice to fit `u64`.
fn modpow_exponent(p: i64, d: usize) -> u64 {
    let mut r: u64 = 1;
    for _ in 0..d {
        r *= p as u64;
    }
    r
}

/// Full factorization of a square-free `GF(p)` polynomial into monic
/// irreducible factors.
pub fn factor_square_free(f: &GfPoly) -> Vec<GfPoly> {
    let p = f.p;
    let inv_lc = crate::gf::mod_inverse(f.leading_coeff(), p).expect("p is prime");
    let monic = f.scalar_mul(inv_lc);
    let groups = distinct_degree_split(&monic);
    let mut rng = rand::thread_rng();
    let mut factors = Vec::new();
    for (g, d) in groups {
        factors.extend(equal_degree_split(&g, d, &mut rng));
    }
    factors
        .into_iter()
        .map(|fac| {
            let inv = crate::gf::mod_inverse(fac.leading_coeff(), p).expect("p is prime");
            fac.scalar_mul(inv)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factors_product_of_distinct_linear_factors() {
        // (x-1)(x-2)(x-3) mod 7
        let a = GfPoly::trimmed(7, vec![6, 1]); // x - 1
        let b = GfPoly::trimmed(7, vec![5, 1]); // x - 2
        let c = GfPoly::trimmed(7, vec![4, 1]); // x - 3
        let product = a.mul(&b).mul(&c);
        let factors = factor_square_free(&product);
        assert_eq!(factors.len(), 3);
        for factor in &factors {
            assert_eq!(factor.degree(), 1);
        }
    }

    #[test]
    fn irreducible_quadratic_stays_whole() {
        // x^2 + 1 is irreducible mod 3 (no root: 0^2=0,1^2=1,2^2=1)
        let f = GfPoly::trimmed(3, vec![1, 0, 1]);
        let factors = factor_square_free(&f);
        assert_eq!(factors.len(), 1);
        assert_eq!(factors[0].degree(), 2);
    }
}
