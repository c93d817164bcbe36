//! Real-root isolation for a univariate rational polynomial (spec
//! §4.8): clear denominators, square-free decompose, bracket each root
//! by Sturm-sequence sign-change counting, then bisect each bracket to
//! the requested precision.

use crate::error::{MathError, MathResult};
use crate::expr::Expr;
use crate::number::Number;
use crate::polyexpr::{free_variables, PolyExpr};
use crate::reduce::reduce;
use crate::symbol::Symbol;

/// One isolated real root: either pinned down exactly (the bisection
/// landed on it, or it was rational to begin with) or bracketed in an
/// interval narrower than the requested precision.
#[derive(Debug, Clone, PartialEq)]
pub enum RootIsolation {
    Exact(Number),
    Interval(Number, Number),
}

impl RootIsolation {
    /// `[value]` for an exact root, `[lo, hi]` for a bracket — the list
    /// form spec §4.8 describes as the return shape.
    pub fn to_expr(&self) -> Expr {
        match self {
            RootIsolation::Exact(n) => Expr::List(Box::new(vec![Expr::Number(n.clone())])),
            RootIsolation::Interval(lo, hi) => {
                Expr::List(Box::new(vec![Expr::Number(lo.clone()), Expr::Number(hi.clone())]))
            }
        }
    }
}

/// Isolates every real root of a reduced univariate expression, to
/// within `precision` (a positive rational bracket width). Returns one
/// `RootIsolation` per distinct real root, ascending by value.
pub fn isolate_real_roots(e: &Expr, precision: &Number) -> MathResult<Vec<RootIsolation>> {
    let reduced = reduce(e);
    let vars: Vec<Symbol> = free_variables(&reduced).into_iter().collect();
    if vars.len() > 1 {
        return Err(MathError::DomainError {
            operation: "roots".to_string(),
            reason: "multivariate input is not supported".to_string(),
        });
    }
    let Some(x) = vars.into_iter().next() else {
        return Ok(Vec::new());
    };
    let p = PolyExpr::normalize(&reduced, std::slice::from_ref(&x))?;
    if p.main_degree() == 0 {
        return Ok(Vec::new());
    }

    // Clear denominators: scaling the whole polynomial by a positive
    // constant changes none of its roots.
    let lcm = p.denominator_lcm();
    let integer_poly = p.scalar_mul(&Number::integer(lcm));

    let mut roots = Vec::new();
    for (sf, _mult) in crate::factor::square_free_decompose(&integer_poly) {
        if sf.main_degree() == 0 {
            continue;
        }
        roots.extend(isolate_square_free(&sf, precision));
    }
    roots.sort_by(|a, b| lower_bound(a).cmp_value(&lower_bound(b)));
    Ok(roots)
}

fn lower_bound(r: &RootIsolation) -> Number {
    match r {
        RootIsolation::Exact(n) => n.clone(),
        RootIsolation::Interval(lo, _) => lo.clone(),
    }
}

fn eval_at(coeffs: &[PolyExpr], t: &Number) -> Number {
    let mut acc = Number::zero();
    for c in coeffs.iter().rev() {
        let PolyExpr::Const(cn) = c else { unreachable!("univariate") };
        acc = acc.mul(t).add(cn);
    }
    acc
}

/// The Sturm sequence `s0 = f, s1 = f', s_{i+1} = -rem(s_{i-1}, s_i)`,
/// via exact (not pseudo-) division since coefficients live in the
/// rational field — no leading-coefficient scaling corrections needed.
fn sturm_sequence(f: &PolyExpr) -> Vec<Vec<PolyExpr>> {
    let mut seq = vec![f.to_coeff_vec(), derivative(f).to_coeff_vec()];
    loop {
        let len = seq.len();
        let a = PolyExpr::from_coeffs(seq[len - 2].clone());
        let b = PolyExpr::from_coeffs(seq[len - 1].clone());
        if b.is_zero() {
            break;
        }
        let (_, r) = crate::polyops::div_rem_rational(&a, &b).expect("Sturm sequence is univariate");
        if r.is_zero() {
            break;
        }
        seq.push(r.neg().to_coeff_vec());
    }
    seq
}

fn derivative(p: &PolyExpr) -> PolyExpr {
    match p {
        PolyExpr::Const(_) => PolyExpr::zero(),
        PolyExpr::Poly(coeffs) => {
            let new_coeffs: Vec<PolyExpr> = coeffs[1..]
                .iter()
                .enumerate()
                .map(|(i, c)| c.scalar_mul(&Number::integer(i as i64 + 1)))
                .collect();
            PolyExpr::from_coeffs(new_coeffs)
        }
    }
}

fn sign_changes(values: &[Number]) -> usize {
    let signs: Vec<i32> = values.iter().filter(|v| !v.is_zero()).map(|v| if v.is_negative() { -1 } else { 1 }).collect();
    signs.windows(2).filter(|w| w[0] != w[1]).count()
}

/// Number of real roots in the half-open interval `(a, b]`.
fn count_roots(chain: &[Vec<PolyExpr>], a: &Number, b: &Number) -> usize {
    let at_a: Vec<Number> = chain.iter().map(|c| eval_at(c, a)).collect();
    let at_b: Vec<Number> = chain.iter().map(|c| eval_at(c, b)).collect();
    sign_changes(&at_a) - sign_changes(&at_b)
}

/// Cauchy's bound: every real root of a monic-normalized `f` lies in
/// `(-B, B)`, `B = 1 + max_i |a_i / a_n|` over the non-leading coefficients.
fn cauchy_bound(coeffs: &[PolyExpr]) -> Number {
    let n = coeffs.len() - 1;
    let PolyExpr::Const(lc) = coeffs[n].clone() else { unreachable!("univariate") };
    let mut max_ratio = Number::zero();
    for c in &coeffs[..n] {
        let PolyExpr::Const(ci) = c else { unreachable!("univariate") };
        let ratio = ci.div(&lc).expect("leading coefficient nonzero");
        let ratio = if ratio.is_negative() { ratio.neg() } else { ratio };
        if ratio.cmp_value(&max_ratio) == std::cmp::Ordering::Greater {
            max_ratio = ratio;
        }
    }
    Number::one().add(&max_ratio)
}

fn isolate_square_free(f: &PolyExpr, precision: &Number) -> Vec<RootIsolation> {
    let coeffs = f.to_coeff_vec();
    let chain = sturm_sequence(f);
    let bound = cauchy_bound(&coeffs);
    let neg_bound = bound.neg();

    let mut stack = vec![(neg_bound, bound)];
    let mut results = Vec::new();
    while let Some((lo, hi)) = stack.pop() {
        let count = count_roots(&chain, &lo, &hi);
        if count == 0 {
            continue;
        }
        if count == 1 {
            results.push(refine(&coeffs, &chain, lo, hi, precision));
            continue;
        }
        let mid = lo.add(&hi).div(&Number::integer(2)).expect("2 is nonzero");
        stack.push((mid.clone(), hi));
        stack.push((lo, mid));
    }
    results
}

fn refine(coeffs: &[PolyExpr], chain: &[Vec<PolyExpr>], mut lo: Number, mut hi: Number, precision: &Number) -> RootIsolation {
    if eval_at(coeffs, &hi).is_zero() {
        return RootIsolation::Exact(hi);
    }
    loop {
        if hi.sub(&lo).cmp_value(precision) == std::cmp::Ordering::Less {
            return RootIsolation::Interval(lo, hi);
        }
        let mid = lo.add(&hi).div(&Number::integer(2)).expect("2 is nonzero");
        if eval_at(coeffs, &mid).is_zero() {
            return RootIsolation::Exact(mid);
        }
        if count_roots(chain, &lo, &mid) == 1 {
            hi = mid;
        } else {
            lo = mid;
        }
    }
}

/// `roots(e)` over the façade's default precision (spec §6).
pub fn roots_expr(e: &Expr, precision: &Number) -> MathResult<Expr> {
    let isolations = isolate_real_roots(e, precision)?;
    Ok(Expr::List(Box::new(isolations.iter().map(RootIsolation::to_expr).collect())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn precision() -> Number {
        Number::rational(1i64.into(), 1000i64.into()).unwrap()
    }

    #[test]
    fn isolates_three_real_roots_of_a_cubic() {
        // (x-1)(x)(x+1) = x^3 - x, roots at -1, 0, 1 — all rational,
        // so bisection should land on them exactly.
        let e: Expr = "x^3 - x".parse().unwrap();
        let roots = isolate_real_roots(&e, &precision()).unwrap();
        assert_eq!(roots.len(), 3);
        let exacts: Vec<Number> = roots
            .iter()
            .map(|r| match r {
                RootIsolation::Exact(n) => n.clone(),
                RootIsolation::Interval(lo, hi) => {
                    panic!("expected an exact rational root, got bracket [{lo:?}, {hi:?}]")
                }
            })
            .collect();
        assert_eq!(exacts, vec![Number::integer(-1), Number::integer(0), Number::integer(1)]);
    }

    #[test]
    fn isolates_irrational_root_of_x_squared_minus_two() {
        let e: Expr = "x^2 - 2".parse().unwrap();
        let roots = isolate_real_roots(&e, &precision()).unwrap();
        assert_eq!(roots.len(), 2);
        for root in &roots {
            if let RootIsolation::Interval(lo, hi) = root {
                assert_eq!(hi.sub(lo).cmp_value(&precision()), std::cmp::Ordering::Less);
            }
        }
    }

    #[test]
    fn polynomial_with_no_real_roots_isolates_nothing() {
        let e: Expr = "x^2 + 1".parse().unwrap();
        let roots = isolate_real_roots(&e, &precision()).unwrap();
        assert!(roots.is_empty());
    }

    #[test]
    fn multivariate_input_is_rejected() {
        let e: Expr = "x*y - 1".parse().unwrap();
        assert!(isolate_real_roots(&e, &precision()).is_err());
    }
}
