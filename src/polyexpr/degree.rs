//! Degree/coefficient extraction by main variable (spec §4.4's
//! `degree`/`coeff`), and the free-variable sweep they and `PolyExpr`
//! normalization share.

use crate::error::{MathError, MathResult};
use crate::expr::constructors as c;
use crate::expr::Expr;
use crate::reduce::{expand, reduce};
use crate::symbol::Symbol;
use std::collections::BTreeSet;

/// The set of symbols occurring in `e`, excluding function-name heads
/// (spec §4.4's "free-variable sweep"). `FUNCTION` argument symbols are
/// still collected; only the head name string is excluded, since it is
/// never itself an `Expr::Symbol`.
pub fn free_variables(e: &Expr) -> BTreeSet<Symbol> {
    crate::expr::access::free_variables(e)
}

/// Splits an already-expanded term into `(power_of_main, rest)`, where
/// `rest` is the product of every factor not contributing a power of
/// `main`. Fails if `main` appears anywhere that isn't a clean
/// `main` or `main^k` factor (symbolic/non-integer exponent, or nested
/// inside another function/expression).
fn term_degree_and_rest(term: &Expr, main: &Symbol) -> MathResult<(u64, Expr)> {
    let factors: Vec<Expr> = match term {
        Expr::Mul(fs) => fs.as_ref().clone(),
        other => vec![other.clone()],
    };
    let mut total_degree = 0u64;
    let mut rest_factors = Vec::new();
    for factor in factors {
        match &factor {
            Expr::Symbol(s) if s == main => total_degree += 1,
            Expr::Pow(base, exp) if matches!(base.as_ref(), Expr::Symbol(s) if s == main) => {
                let exp = reduce(exp);
                match &exp {
                    Expr::Number(n) if !n.is_negative() && n.denominator().is_one() => {
                        let k = n.numerator().to_u64().ok_or_else(|| MathError::NotAPolynomial {
                            expression: term.clone(),
                            reason: format!("exponent of {main} too large"),
                        })?;
                        total_degree += k;
                    }
                    _ => {
                        return Err(MathError::NotAPolynomial {
                            expression: term.clone(),
                            reason: format!("non-integer or symbolic exponent of {main}"),
                        })
                    }
                }
            }
            _ => {
                if free_variables(&factor).contains(main) {
                    return Err(MathError::NotAPolynomial {
                        expression: term.clone(),
                        reason: format!("{main} does not appear as a clean power factor"),
                    });
                }
                rest_factors.push(factor);
            }
        }
    }
    let rest = match rest_factors.len() {
        0 => c::integer(1),
        1 => rest_factors.into_iter().next().unwrap(),
        _ => c::mul(rest_factors),
    };
    Ok((total_degree, rest))
}

/// Groups an already-expanded expression's terms by degree in `main`,
/// returning `coeffs` with `coeffs[i]` the (reduced) coefficient of
/// `main^i`, trailing-zero-trimmed so `coeffs.last()` is nonzero (or the
/// vector is `[0]` for the zero polynomial).
pub fn extract_by_degree(expanded: &Expr, main: &Symbol) -> MathResult<Vec<Expr>> {
    let terms: Vec<Expr> = match expanded {
        Expr::Add(ts) => ts.as_ref().clone(),
        other => vec![other.clone()],
    };
    let mut by_degree: Vec<Vec<Expr>> = Vec::new();
    for term in terms {
        let (deg, rest) = term_degree_and_rest(&term, main)?;
        let idx = deg as usize;
        if by_degree.len() <= idx {
            by_degree.resize(idx + 1, Vec::new());
        }
        by_degree[idx].push(rest);
    }
    let mut coeffs: Vec<Expr> = by_degree
        .into_iter()
        .map(|parts| if parts.is_empty() { c::integer(0) } else { reduce(&c::add(parts)) })
        .collect();
    if coeffs.is_empty() {
        coeffs.push(c::integer(0));
    }
    while coeffs.len() > 1 && matches!(coeffs.last(), Some(Expr::Number(n)) if n.is_zero()) {
        coeffs.pop();
    }
    Ok(coeffs)
}

/// Highest `n` such that `x^n` divides a nonzero term of `f`'s expansion.
pub fn degree(f: &Expr, x: &Symbol) -> MathResult<u64> {
    let coeffs = extract_by_degree(&expand(f), x)?;
    if coeffs.len() == 1 && matches!(&coeffs[0], Expr::Number(n) if n.is_zero()) {
        return Ok(0);
    }
    Ok(coeffs.len() as u64 - 1)
}

/// The (reduced) coefficient of `x^n` in `f`'s expansion.
pub fn coeff(f: &Expr, x: &Symbol, n: u64) -> MathResult<Expr> {
    let coeffs = extract_by_degree(&expand(f), x)?;
    Ok(coeffs.get(n as usize).cloned().unwrap_or_else(|| c::integer(0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_and_coeff_of_simple_polynomial() {
        let x = Symbol::new("x");
        let f: Expr = "3*x^2 + 5*x + 7".parse().unwrap();
        assert_eq!(degree(&f, &x).unwrap(), 2);
        assert_eq!(coeff(&f, &x, 2).unwrap(), c::integer(3));
        assert_eq!(coeff(&f, &x, 1).unwrap(), c::integer(5));
        assert_eq!(coeff(&f, &x, 0).unwrap(), c::integer(7));
        assert_eq!(coeff(&f, &x, 5).unwrap(), c::integer(0));
    }

    #[test]
    fn degree_zero_for_constant() {
        let x = Symbol::new("x");
        let f = c::integer(5);
        assert_eq!(degree(&f, &x).unwrap(), 0);
    }

    #[test]
    fn symbolic_exponent_fails() {
        let x = Symbol::new("x");
        let n = Symbol::new("n");
        let f = c::pow(c::symbol("x"), c::symbol("n"));
        let _ = n;
        assert!(degree(&f, &x).is_err());
    }
}
