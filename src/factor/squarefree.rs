//! Square-free decomposition of a univariate integer polynomial (Yun's
//! algorithm), the first stage of factoring over ℚ (spec §4.7).

use crate::number::Number;
use crate::polyexpr::PolyExpr;
use crate::polyops::poly_gcd;

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

fn exact_div_poly(a: &PolyExpr, b: &PolyExpr) -> PolyExpr {
    crate::polyops::exact_quotient(a, b)
}

/// Returns `[(factor, multiplicity)]` with `f == product(factor_i^mult_i)`
/// up to a unit, each `factor_i` square-free and pairwise coprime.
pub fn square_free_decompose(f: &PolyExpr) -> Vec<(PolyExpr, u64)> {
    if f.is_zero() || f.main_degree() == 0 {
        return vec![(f.clone(), 1)];
    }
    let fp = derivative(f);
    let d = poly_gcd(f, &fp);
    if d.main_degree() == 0 {
        return vec![(f.clone(), 1)];
    }

    let mut a = exact_div_poly(f, &d);
    let b0 = exact_div_poly(&fp, &d);
    let mut c = b0.sub(&derivative(&a));
    let mut result = Vec::new();
    let mut i = 1u64;
    loop {
        let d_i = poly_gcd(&a, &c);
        let a_next = exact_div_poly(&a, &d_i);
        if d_i.main_degree() > 0 {
            result.push((d_i.clone(), i));
        }
        if a_next.main_degree() == 0 {
            break;
        }
        let b_next = exact_div_poly(&c, &d_i);
        c = b_next.sub(&derivative(&a_next));
        a = a_next;
        i += 1;
    }
    if result.is_empty() {
        result.push((f.clone(), 1));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Expr;
    use crate::symbol::Symbol;

    #[test]
    fn square_of_binomial_has_multiplicity_two() {
        let x = Symbol::new("x");
        let e: Expr = "x^2 - 2*x + 1".parse().unwrap(); // (x-1)^2
        let p = PolyExpr::normalize(&e, &[x.clone()]).unwrap();
        let parts = square_free_decompose(&p);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].1, 2);
        let linear: Expr = "x - 1".parse().unwrap();
        assert_eq!(parts[0].0.to_expr(&[x]), crate::reduce::reduce(&linear));
    }

    #[test]
    fn already_square_free_returns_single_factor() {
        let x = Symbol::new("x");
        let e: Expr = "x^4 - 1".parse().unwrap();
        let p = PolyExpr::normalize(&e, &[x]).unwrap();
        let parts = square_free_decompose(&p);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].1, 1);
    }
}
