//! Polynomial GCD, LCM, and resultant over ℚ (spec §4.5).
//!
//! Every operation here is structural on [`PolyExpr`] and agnostic to how
//! many variable levels deep it is called: "the main variable" always
//! means "the outermost `Poly` level of whichever `PolyExpr` was passed
//! in", so the same pseudo-division/content-splitting code handles a
//! univariate GCD and a coefficient-ring GCD one level down identically —
//! which is exactly how `content`/`primitive` splitting has to recurse
//! for a genuinely multivariate GCD (Geddes/Czapor/Labahn §7).

use crate::error::{MathError, MathResult};
use crate::expr::Expr;
use crate::number::Number;
use crate::polyexpr::PolyExpr;

/// Pseudo-division in the (implicit) main variable: finds `q`, `r` with
/// `lc(g)^(deg(f)-deg(g)+1) * f == q*g + r` and `deg(r) < deg(g)`.
pub fn pseudo_div(f: &PolyExpr, g: &PolyExpr) -> (PolyExpr, PolyExpr) {
    let gc = g.to_coeff_vec();
    let n = gc.len() - 1;
    let lcg = gc[n].clone();
    let mut r = f.to_coeff_vec();
    let mut q: Vec<PolyExpr> = Vec::new();
    loop {
        while r.len() > 1 && r.last().map(PolyExpr::is_zero).unwrap_or(false) {
            r.pop();
        }
        if r.iter().all(PolyExpr::is_zero) {
            break;
        }
        let m = r.len() - 1;
        if m < n {
            break;
        }
        let lc_r = r[m].clone();
        let shift = m - n;
        for qc in q.iter_mut() {
            *qc = qc.mul(&lcg);
        }
        if q.len() <= shift {
            q.resize(shift + 1, PolyExpr::zero());
        }
        q[shift] = q[shift].add(&lc_r);

        let mut new_r: Vec<PolyExpr> = r.iter().map(|ri| ri.mul(&lcg)).collect();
        for (i, gi) in gc.iter().enumerate() {
            let idx = i + shift;
            if idx < new_r.len() {
                new_r[idx] = new_r[idx].sub(&lc_r.mul(gi));
            }
        }
        r = new_r;
    }
    (PolyExpr::from_coeffs(q), PolyExpr::from_coeffs(r))
}

/// Ordinary division assuming `b` divides `a` exactly — exposed for
/// callers outside this module (square-free decomposition's `f / gcd(f, f')`)
/// that already know divisibility holds.
pub fn exact_quotient(a: &PolyExpr, b: &PolyExpr) -> PolyExpr {
    exact_div(a, b)
}

/// Ordinary (non-pseudo) division, for use only where `b` is known to
/// divide `a` exactly — content/primitive splitting's sole consumer.
fn exact_div(a: &PolyExpr, b: &PolyExpr) -> PolyExpr {
    if let (PolyExpr::Const(x), PolyExpr::Const(y)) = (a, b) {
        return PolyExpr::Const(x.div(y).expect("content divides coefficient exactly"));
    }
    let bc = b.to_coeff_vec();
    let n = bc.len() - 1;
    let lcb = bc[n].clone();
    let mut r = a.to_coeff_vec();
    let mut q: Vec<PolyExpr> = Vec::new();
    loop {
        while r.len() > 1 && r.last().map(PolyExpr::is_zero).unwrap_or(false) {
            r.pop();
        }
        if r.iter().all(PolyExpr::is_zero) {
            break;
        }
        let m = r.len() - 1;
        if m < n {
            break;
        }
        let lc_r = r[m].clone();
        let qk = exact_div(&lc_r, &lcb);
        let shift = m - n;
        if q.len() <= shift {
            q.resize(shift + 1, PolyExpr::zero());
        }
        q[shift] = q[shift].add(&qk);
        for (i, bi) in bc.iter().enumerate() {
            let idx = i + shift;
            if idx < r.len() {
                r[idx] = r[idx].sub(&qk.mul(bi));
            }
        }
    }
    PolyExpr::from_coeffs(q)
}

fn gcd_number(a: &Number, b: &Number) -> Number {
    if a.is_zero() {
        return b.clone();
    }
    if b.is_zero() {
        return a.clone();
    }
    Number::Integer(a.numerator().gcd(&b.numerator()))
}

/// `content(p)`: the gcd of `p`'s coefficients, an element of `p`'s
/// coefficient ring (one variable level down).
pub fn content(p: &PolyExpr) -> PolyExpr {
    match p {
        PolyExpr::Const(n) => PolyExpr::Const(if n.is_negative() { n.neg() } else { n.clone() }),
        PolyExpr::Poly(coeffs) => {
            let mut acc = PolyExpr::zero();
            for c in coeffs {
                acc = poly_gcd(&acc, c);
            }
            acc
        }
    }
}

/// `(content(p), primitive part)`.
pub fn content_and_primitive(p: &PolyExpr) -> (PolyExpr, PolyExpr) {
    if p.is_zero() {
        return (PolyExpr::zero(), PolyExpr::zero());
    }
    let ct = content(p);
    match p {
        PolyExpr::Const(_) => (ct, PolyExpr::one()),
        PolyExpr::Poly(coeffs) => {
            let primitive_coeffs: Vec<PolyExpr> = coeffs.iter().map(|c| exact_div(c, &ct)).collect();
            (ct, PolyExpr::from_coeffs(primitive_coeffs))
        }
    }
}

fn leading_coeff_positive(p: &PolyExpr) -> bool {
    match p.leading_coeff() {
        PolyExpr::Const(n) => !n.is_negative(),
        other => leading_coeff_positive(other),
    }
}

/// Multivariate `gcd` over ℚ (spec §4.5): content/primitive split, then
/// Euclidean PRS with pseudo-remainders on the primitive parts, with
/// contents multiplied back in recursively. Normalizes the result to a
/// positive leading coefficient.
pub fn poly_gcd(f: &PolyExpr, g: &PolyExpr) -> PolyExpr {
    if f.is_zero() {
        return normalize_sign(g.clone());
    }
    if g.is_zero() {
        return normalize_sign(f.clone());
    }
    if matches!((f, g), (PolyExpr::Const(_), PolyExpr::Const(_))) {
        let (PolyExpr::Const(a), PolyExpr::Const(b)) = (f, g) else { unreachable!() };
        return PolyExpr::Const(gcd_number(a, b));
    }

    let (cf, pf) = content_and_primitive(f);
    let (cg, pg) = content_and_primitive(g);
    let content_gcd = poly_gcd(&cf, &cg);

    let mut a = pf;
    let mut b = pg;
    while !b.is_zero() {
        let (_, r) = pseudo_div(&a, &b);
        let r = if r.is_zero() { r } else { content_and_primitive(&r).1 };
        a = b;
        b = r;
    }
    normalize_sign(content_gcd.mul(&a))
}

/// Flips sign so the leading coefficient is positive; exposed for
/// `factor`'s substitution bookkeeping, which needs the same
/// canonicalization `poly_gcd`/`poly_lcm` apply internally.
pub fn normalize_sign(p: PolyExpr) -> PolyExpr {
    if p.is_zero() || leading_coeff_positive(&p) {
        p
    } else {
        p.neg()
    }
}

/// `lcm(f, g) = f*g / gcd(f, g)`.
pub fn poly_lcm(f: &PolyExpr, g: &PolyExpr) -> PolyExpr {
    if f.is_zero() || g.is_zero() {
        return PolyExpr::zero();
    }
    let g_gcd = poly_gcd(f, g);
    let product = f.mul(g);
    normalize_sign(exact_div(&product, &g_gcd))
}

/// The resultant of `f` and `g` in the main variable: the determinant of
/// their `(m+n) x (m+n)` Sylvester matrix (spec §4.5), `m = deg(f)`,
/// `n = deg(g)`. Built and expanded directly over the coefficient ring
/// rather than through a pseudo-remainder sequence, which sidesteps the
/// leading-coefficient scaling corrections a PRS-based evaluation would
/// otherwise need to track (see DESIGN.md).
pub fn resultant(f: &PolyExpr, g: &PolyExpr) -> PolyExpr {
    if f.is_zero() || g.is_zero() {
        return PolyExpr::zero();
    }
    let fc = f.to_coeff_vec();
    let gc = g.to_coeff_vec();
    let m = fc.len() - 1;
    let n = gc.len() - 1;
    let size = m + n;
    if size == 0 {
        return PolyExpr::one();
    }
    let mut matrix = vec![vec![PolyExpr::zero(); size]; size];
    // Rows 0..n: shifted copies of f's coefficients, highest-degree first.
    for row in 0..n {
        for (i, c) in fc.iter().enumerate() {
            let col = row + (m - i);
            if col < size {
                matrix[row][col] = c.clone();
            }
        }
    }
    // Rows n..n+m: shifted copies of g's coefficients.
    for row in 0..m {
        for (i, c) in gc.iter().enumerate() {
            let col = row + (n - i);
            if col < size {
                matrix[n + row][col] = c.clone();
            }
        }
    }
    determinant(matrix)
}

/// Cofactor-expansion determinant over the `PolyExpr` ring. Exponential
/// in matrix size, which is acceptable for the modest degrees a
/// resultant call is expected to see (spec's Non-goals exclude
/// large-scale elimination).
fn determinant(matrix: Vec<Vec<PolyExpr>>) -> PolyExpr {
    let n = matrix.len();
    if n == 1 {
        return matrix[0][0].clone();
    }
    let mut total = PolyExpr::zero();
    for col in 0..n {
        if matrix[0][col].is_zero() {
            continue;
        }
        let minor: Vec<Vec<PolyExpr>> = matrix[1..]
            .iter()
            .map(|row| row.iter().enumerate().filter(|(c, _)| *c != col).map(|(_, v)| v.clone()).collect())
            .collect();
        let term = matrix[0][col].mul(&determinant(minor));
        total = if col % 2 == 0 { total.add(&term) } else { total.sub(&term) };
    }
    total
}

/// True (non-pseudo) division for a univariate polynomial with rational
/// coefficients: `f == q*g + r`, `deg(r) < deg(g)`. Unlike `pseudo_div`,
/// this only makes sense one variable deep — a multivariate coefficient
/// is itself a `PolyExpr`, not a field element, so this errors rather
/// than silently mishandling nested coefficients. Used by `roots`'s
/// Sturm sequence and the façade's ℚ `div`/`quo`/`rem`.
pub fn div_rem_rational(f: &PolyExpr, g: &PolyExpr) -> MathResult<(PolyExpr, PolyExpr)> {
    let gc = g.to_coeff_vec();
    let n = gc.len() - 1;
    let PolyExpr::Const(lcg) = gc[n].clone() else {
        return Err(MathError::DomainError {
            operation: "poly_div".to_string(),
            reason: "divisor is not a univariate rational polynomial".to_string(),
        });
    };
    let mut r = f.to_coeff_vec();
    let mut q: Vec<PolyExpr> = Vec::new();
    loop {
        while r.len() > 1 && r.last().map(PolyExpr::is_zero).unwrap_or(false) {
            r.pop();
        }
        if r.iter().all(PolyExpr::is_zero) {
            break;
        }
        let m = r.len() - 1;
        if m < n {
            break;
        }
        let PolyExpr::Const(lc_r) = r[m].clone() else {
            return Err(MathError::DomainError {
                operation: "poly_div".to_string(),
                reason: "dividend is not a univariate rational polynomial".to_string(),
            });
        };
        let qk = lc_r.div(&lcg).expect("rationals divide freely");
        let shift = m - n;
        if q.len() <= shift {
            q.resize(shift + 1, PolyExpr::zero());
        }
        q[shift] = q[shift].add(&PolyExpr::constant(qk.clone()));
        for (i, gi) in gc.iter().enumerate() {
            let idx = i + shift;
            if idx < r.len() {
                let PolyExpr::Const(gin) = gi else {
                    return Err(MathError::DomainError {
                        operation: "poly_div".to_string(),
                        reason: "divisor is not a univariate rational polynomial".to_string(),
                    });
                };
                r[idx] = r[idx].sub(&PolyExpr::constant(qk.mul(gin)));
            }
        }
    }
    Ok((PolyExpr::from_coeffs(q), PolyExpr::from_coeffs(r)))
}

/// `gcd`/`lcm`/`resultant` over reduced expressions rather than raw
/// `PolyExpr`s, matching the façade's public signatures.
pub fn gcd_expr(a: &Expr, b: &Expr) -> MathResult<Expr> {
    let (vars, pa, pb) = crate::polyexpr::normalize_to_poly_exprs(a, b)?;
    Ok(poly_gcd(&pa, &pb).to_expr(&vars))
}

pub fn lcm_expr(a: &Expr, b: &Expr) -> MathResult<Expr> {
    let (vars, pa, pb) = crate::polyexpr::normalize_to_poly_exprs(a, b)?;
    Ok(poly_lcm(&pa, &pb).to_expr(&vars))
}

pub fn resultant_expr(a: &Expr, b: &Expr) -> MathResult<Expr> {
    let (vars, pa, pb) = crate::polyexpr::normalize_to_poly_exprs(a, b)?;
    Ok(resultant(&pa, &pb).to_expr(&vars))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Expr;

    #[test]
    fn gcd_of_difference_and_sum_of_squares() {
        let f: Expr = "x^3 - x".parse().unwrap();
        let g: Expr = "x^2 - 1".parse().unwrap();
        let result = gcd_expr(&f, &g).unwrap();
        let expected: Expr = "x^2 - 1".parse().unwrap();
        assert_eq!(result, crate::reduce::reduce(&expected));
    }

    #[test]
    fn lcm_times_gcd_equals_product_up_to_sign() {
        let f: Expr = "x^2 - 1".parse().unwrap();
        let g: Expr = "x - 1".parse().unwrap();
        let gcd = gcd_expr(&f, &g).unwrap();
        let lcm = lcm_expr(&f, &g).unwrap();
        let product = crate::reduce::expand(&crate::expr::constructors::mul(vec![gcd, lcm]));
        let expected = crate::reduce::expand(&crate::expr::constructors::mul(vec![f, g]));
        assert_eq!(product, expected);
    }

    #[test]
    fn rational_division_recovers_dividend() {
        let f: Expr = "x^3 + x^2 + 1".parse().unwrap();
        let g: Expr = "x + 1".parse().unwrap();
        let x = crate::symbol::Symbol::new("x");
        let pf = crate::polyexpr::PolyExpr::normalize(&f, &[x.clone()]).unwrap();
        let pg = crate::polyexpr::PolyExpr::normalize(&g, &[x.clone()]).unwrap();
        let (q, r) = div_rem_rational(&pf, &pg).unwrap();
        let reconstructed = q.mul(&pg).add(&r);
        assert_eq!(reconstructed.to_expr(&[x]), crate::reduce::reduce(&f));
    }

    #[test]
    fn resultant_eliminates_x_from_bivariate_system() {
        let f: Expr = "x^2 - y".parse().unwrap();
        let g: Expr = "x - y^2".parse().unwrap();
        let result = resultant_expr(&f, &g).unwrap();
        let expected: Expr = "y^4 - y".parse().unwrap();
        assert_eq!(result, crate::reduce::reduce(&expected));
    }
}
