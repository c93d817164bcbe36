//! Factoring a univariate rational polynomial over ℚ (spec §4.7):
//! content/primitive split, square-free decomposition (Yun), then for
//! each square-free primitive factor — distinct-degree/equal-degree
//! factoring over a lucky `GF(p)`, Hensel lifting to `ℤ/p^k`, and
//! trial-subset recombination (Zassenhaus). Multivariate factoring is
//! out of scope (see DESIGN.md); `factor_expr` rejects more than one
//! free variable.

mod hensel;
mod modp;
mod squarefree;

pub use squarefree::square_free_decompose;

use crate::error::{MathError, MathResult};
use crate::expr::constructors as c;
use crate::expr::Expr;
use crate::number::Number;
use crate::polyexpr::{free_variables, PolyExpr};
use crate::reduce::reduce;

const SMALL_PRIMES: &[i64] =
    &[3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97];

/// Factors a reduced expression in at most one free variable into
/// irreducible rational-polynomial pieces (spec §6's `factor`),
/// returned as their (reduced) product.
pub fn factor_expr(e: &Expr) -> MathResult<Expr> {
    let vars: Vec<_> = free_variables(e).into_iter().collect();
    let reduced = reduce(e);
    if vars.is_empty() {
        return Ok(reduced);
    }
    if vars.len() > 1 {
        return Err(MathError::DomainError {
            operation: "factor".to_string(),
            reason: "multivariate factoring is not supported".to_string(),
        });
    }
    let x = vars.into_iter().next().unwrap();
    let p = PolyExpr::normalize(&reduced, std::slice::from_ref(&x))?;
    let (content, primitive) = crate::polyops::content_and_primitive(&p);

    let mut factors: Vec<Expr> = Vec::new();
    for (sf, mult) in square_free_decompose(&primitive) {
        for irr in factor_square_free_over_z(&sf) {
            let irr_expr = irr.to_expr(std::slice::from_ref(&x));
            for _ in 0..mult {
                factors.push(irr_expr.clone());
            }
        }
    }
    if !matches!(&content, PolyExpr::Const(n) if n.is_one()) {
        factors.push(content.to_expr(&[]));
    }
    if factors.is_empty() {
        return Ok(reduced);
    }
    Ok(reduce(&c::mul(factors)))
}

/// Factors a primitive, square-free integer `PolyExpr` into its
/// irreducible integer factors. Falls back to returning `f` unfactored
/// (rather than risking a wrong answer) whenever no working prime is
/// found or the GF(p) split turns out trivial.
fn factor_square_free_over_z(f: &PolyExpr) -> Vec<PolyExpr> {
    if f.main_degree() <= 1 {
        return vec![f.clone()];
    }
    let (g, lc) = monic_reduction(f);
    let Some(p) = pick_prime(&g) else {
        return vec![f.clone()];
    };
    let Ok(gp) = crate::gf::project(p, &g) else {
        return vec![f.clone()];
    };
    let gf_factors = modp::factor_square_free(&gp);
    if gf_factors.len() <= 1 {
        return vec![f.clone()];
    }
    let lifted = hensel::hensel_lift(&g, p, &gf_factors);
    let recombined = recombine(&lifted);
    if recombined.len() <= 1 {
        return vec![f.clone()];
    }

    let mut result: Vec<PolyExpr> = recombined.iter().map(|gi| undo_substitution(gi, &lc)).collect();
    reconcile_constant(f, &mut result);
    result
}

/// Picks the first small prime `p` (not dividing `g`'s leading
/// coefficient, trivially true here since `g` is monic) for which `g`
/// reduces to a square-free `GF(p)` polynomial.
fn pick_prime(g: &PolyExpr) -> Option<i64> {
    for &p in SMALL_PRIMES {
        let Ok(gp) = crate::gf::project(p, g) else { continue };
        let deriv = gp.derivative();
        if deriv.is_zero() {
            continue;
        }
        if let Ok(gcd) = gp.gcd(&deriv) {
            if gcd.degree() == 0 {
                return Some(p);
            }
        }
    }
    None
}

/// `g(y) = lc^(n-1-i)` scaling of each coefficient `a_i`, the classic
/// Kronecker/Zassenhaus substitution that turns a primitive polynomial
/// with leading coefficient `lc` into a monic integer polynomial of the
/// same degree (`y = lc * x`). `Hensel` lifting needs a monic target.
fn monic_reduction(f: &PolyExpr) -> (PolyExpr, Number) {
    let coeffs = f.to_coeff_vec();
    let n = coeffs.len() - 1;
    let PolyExpr::Const(lc) = coeffs[n].clone() else {
        unreachable!("univariate poly has scalar coefficients")
    };
    if lc.is_one() {
        return (f.clone(), lc);
    }
    let mut new_coeffs = Vec::with_capacity(n + 1);
    for (i, c) in coeffs.iter().enumerate() {
        let PolyExpr::Const(ci) = c else { unreachable!("univariate poly has scalar coefficients") };
        let coeff =
            if i == n { Number::one() } else { ci.mul(&lc.pow_u64((n - 1 - i) as u64)) };
        new_coeffs.push(PolyExpr::constant(coeff));
    }
    (PolyExpr::from_coeffs(new_coeffs), lc)
}

/// Undoes the `y = lc * x` substitution for one recombined monic
/// integer factor of `g`, then takes its primitive part: `g_i(lc*x)`
/// has integer coefficients `c_k * lc^k`, and its primitive part is the
/// canonical (up to sign and an overall rational unit, fixed up by
/// `reconcile_constant`) integer factor of `f`.
fn undo_substitution(g_i: &PolyExpr, lc: &Number) -> PolyExpr {
    let coeffs = g_i.to_coeff_vec();
    let raw_coeffs: Vec<PolyExpr> = coeffs
        .iter()
        .enumerate()
        .map(|(k, c)| {
            let PolyExpr::Const(ck) = c else { unreachable!("univariate poly has scalar coefficients") };
            PolyExpr::constant(ck.mul(&lc.pow_u64(k as u64)))
        })
        .collect();
    let raw = PolyExpr::from_coeffs(raw_coeffs);
    let (_, primitive) = crate::polyops::content_and_primitive(&raw);
    crate::polyops::normalize_sign(primitive)
}

/// The substitution trick only pins each factor down to a rational
/// unit; this folds whatever constant separates `product(result)` from
/// `f`'s actual leading coefficient back into the first factor.
fn reconcile_constant(f: &PolyExpr, result: &mut [PolyExpr]) {
    let product: PolyExpr = result.iter().fold(PolyExpr::one(), |acc, h| acc.mul(h));
    if let (PolyExpr::Const(target_lc), PolyExpr::Const(got_lc)) = (f.leading_coeff(), product.leading_coeff())
    {
        if !got_lc.is_zero() {
            if let Ok(ratio) = target_lc.div(got_lc) {
                if !ratio.is_one() {
                    if let Some(first) = result.first_mut() {
                        *first = first.scalar_mul(&ratio);
                    }
                }
            }
        }
    }
}

/// Zassenhaus trial recombination: searches increasing subset sizes of
/// the lifted `GF(p)`-derived factors for products that divide the
/// (shrinking) remainder exactly, since a true irreducible integer
/// factor can reduce mod `p` into several `GF(p)` irreducibles. Only
/// sizes up to half the remaining count need checking — the complement
/// of any successful subset is itself a valid candidate.
fn recombine(lifted: &[PolyExpr]) -> Vec<PolyExpr> {
    let mut cur = lifted.iter().fold(PolyExpr::one(), |acc, f| acc.mul(f));
    let mut remaining: Vec<usize> = (0..lifted.len()).collect();
    let mut true_factors = Vec::new();
    let mut size = 1;
    while size * 2 <= remaining.len() {
        let mut progressed = false;
        for combo in combinations(&remaining, size) {
            let candidate = combo.iter().fold(PolyExpr::one(), |acc, &i| acc.mul(&lifted[i]));
            if let Some(quotient) = try_divide(&cur, &candidate) {
                true_factors.push(candidate);
                cur = quotient;
                remaining.retain(|i| !combo.contains(i));
                progressed = true;
                break;
            }
        }
        if !progressed {
            size += 1;
        }
    }
    if !remaining.is_empty() {
        true_factors.push(cur);
    }
    true_factors
}

fn combinations(items: &[usize], size: usize) -> Vec<Vec<usize>> {
    if size == 0 {
        return vec![vec![]];
    }
    if items.len() < size {
        return vec![];
    }
    let mut result = Vec::new();
    for i in 0..=items.len() - size {
        for mut rest in combinations(&items[i + 1..], size - 1) {
            let mut combo = vec![items[i]];
            combo.append(&mut rest);
            result.push(combo);
        }
    }
    result
}

/// Schoolbook division assuming `candidate` is monic: returns the
/// quotient when `candidate` divides `cur` exactly, `None` otherwise.
fn try_divide(cur: &PolyExpr, candidate: &PolyExpr) -> Option<PolyExpr> {
    let n = candidate.main_degree();
    if n == 0 {
        return None;
    }
    let cc = candidate.to_coeff_vec();
    let mut r = cur.to_coeff_vec();
    let mut q: Vec<PolyExpr> = Vec::new();
    loop {
        while r.len() > 1 && r.last().map(PolyExpr::is_zero).unwrap_or(false) {
            r.pop();
        }
        if r.iter().all(PolyExpr::is_zero) {
            return Some(PolyExpr::from_coeffs(q));
        }
        let m = r.len() - 1;
        if m < n {
            return None;
        }
        let lc_r = r[m].clone();
        let shift = m - n;
        if q.len() <= shift {
            q.resize(shift + 1, PolyExpr::zero());
        }
        q[shift] = q[shift].add(&lc_r);
        for (i, ci) in cc.iter().enumerate() {
            let idx = i + shift;
            if idx < r.len() {
                r[idx] = r[idx].sub(&lc_r.mul(ci));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factors_difference_of_fourth_powers() {
        let e: Expr = "x^4 - 1".parse().unwrap();
        let result = factor_expr(&e).unwrap();
        let expected: Expr = "(x - 1) * (x + 1) * (x^2 + 1)".parse().unwrap();
        assert_eq!(result, reduce(&expected));
    }

    #[test]
    fn irreducible_polynomial_is_returned_whole() {
        let e: Expr = "x^2 + 1".parse().unwrap();
        let result = factor_expr(&e).unwrap();
        assert_eq!(result, reduce(&e));
    }

    #[test]
    fn constant_expression_factors_to_itself() {
        let e = c::integer(42);
        assert_eq!(factor_expr(&e).unwrap(), reduce(&e));
    }

    #[test]
    fn multivariate_input_is_rejected() {
        let e: Expr = "x*y + 1".parse().unwrap();
        assert!(factor_expr(&e).is_err());
    }
}
