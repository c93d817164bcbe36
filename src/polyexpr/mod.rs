//! The multivariate recursive polynomial form (spec §4.4): a dense
//! representation by degree in a designated "main" variable, whose
//! coefficients are themselves `PolyExpr`s in the remaining variables.
//!
//! This is the classic recursive representation from Cohen's *Computer
//! Algebra and Symbolic Computation* (there called the "recursive
//! sparse/dense" form): `f = sum_i coeffs[i] * L[0]^i`, `coeffs[i]` a
//! `PolyExpr` over `L[1..]`. An empty variable list bottoms out at a
//! bare coefficient-domain constant.

mod degree;

pub use degree::{coeff, degree, free_variables};

use crate::error::{MathError, MathResult};
use crate::expr::constructors as c;
use crate::expr::Expr;
use crate::number::Number;
use crate::reduce::{expand, reduce};
use crate::symbol::Symbol;

#[derive(Debug, Clone, PartialEq)]
pub enum PolyExpr {
    Const(Number),
    /// `coeffs[i]` is the coefficient of `L[0]^i`. Invariant: length >= 2
    /// and the last entry is not the zero polynomial (degree-0 results
    /// always collapse to `Const`/the inner coefficient instead).
    Poly(Vec<PolyExpr>),
}

impl PolyExpr {
    pub fn zero() -> Self {
        PolyExpr::Const(Number::zero())
    }

    pub fn one() -> Self {
        PolyExpr::Const(Number::one())
    }

    pub fn constant(n: Number) -> Self {
        PolyExpr::Const(n)
    }

    pub fn is_zero(&self) -> bool {
        match self {
            PolyExpr::Const(n) => n.is_zero(),
            PolyExpr::Poly(_) => false,
        }
    }

    /// Degree in the main variable (`0` for a bare constant).
    pub fn main_degree(&self) -> usize {
        match self {
            PolyExpr::Const(_) => 0,
            PolyExpr::Poly(coeffs) => coeffs.len() - 1,
        }
    }

    pub fn leading_coeff(&self) -> &PolyExpr {
        match self {
            PolyExpr::Const(_) => self,
            PolyExpr::Poly(coeffs) => coeffs.last().unwrap(),
        }
    }

    pub fn coeff_at(&self, i: usize) -> PolyExpr {
        match self {
            PolyExpr::Const(n) => {
                if i == 0 {
                    PolyExpr::Const(n.clone())
                } else {
                    PolyExpr::zero()
                }
            }
            PolyExpr::Poly(coeffs) => coeffs.get(i).cloned().unwrap_or_else(PolyExpr::zero),
        }
    }

    /// Builds `Poly(coeffs)`, trimming trailing zero coefficients and
    /// collapsing to the bare coefficient when the result has no
    /// dependence on the main variable at all.
    pub(crate) fn from_coeffs(mut coeffs: Vec<PolyExpr>) -> PolyExpr {
        while coeffs.len() > 1 && coeffs.last().map(PolyExpr::is_zero).unwrap_or(false) {
            coeffs.pop();
        }
        if coeffs.len() <= 1 {
            coeffs.into_iter().next().unwrap_or_else(PolyExpr::zero)
        } else {
            PolyExpr::Poly(coeffs)
        }
    }

    /// The degree-indexed coefficient array in the main variable: `[self]`
    /// for a bare constant, `coeffs.clone()` otherwise. Used by `polyops`'s
    /// pseudo-division and exact-division routines, which treat any
    /// `PolyExpr` — whatever its nesting depth — as a univariate
    /// polynomial over its own coefficient ring.
    pub(crate) fn to_coeff_vec(&self) -> Vec<PolyExpr> {
        match self {
            PolyExpr::Const(_) => vec![self.clone()],
            PolyExpr::Poly(coeffs) => coeffs.clone(),
        }
    }

    pub fn add(&self, other: &Self) -> Self {
        match (self, other) {
            (PolyExpr::Const(a), PolyExpr::Const(b)) => PolyExpr::Const(a.add(b)),
            _ => {
                let n = self.main_degree().max(other.main_degree()) + 1;
                let coeffs = (0..n).map(|i| self.coeff_at(i).add(&other.coeff_at(i))).collect();
                PolyExpr::from_coeffs(coeffs)
            }
        }
    }

    pub fn neg(&self) -> Self {
        match self {
            PolyExpr::Const(n) => PolyExpr::Const(n.neg()),
            PolyExpr::Poly(coeffs) => PolyExpr::Poly(coeffs.iter().map(PolyExpr::neg).collect()),
        }
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    pub fn scalar_mul(&self, k: &Number) -> Self {
        match self {
            PolyExpr::Const(n) => PolyExpr::Const(n.mul(k)),
            PolyExpr::Poly(coeffs) => PolyExpr::from_coeffs(coeffs.iter().map(|c| c.scalar_mul(k)).collect()),
        }
    }

    pub fn mul(&self, other: &Self) -> Self {
        match (self, other) {
            (PolyExpr::Const(a), _) => other.scalar_mul(a),
            (_, PolyExpr::Const(b)) => self.scalar_mul(b),
            (PolyExpr::Poly(a), PolyExpr::Poly(b)) => {
                let mut coeffs = vec![PolyExpr::zero(); a.len() + b.len() - 1];
                for (i, ai) in a.iter().enumerate() {
                    if ai.is_zero() {
                        continue;
                    }
                    for (j, bj) in b.iter().enumerate() {
                        coeffs[i + j] = coeffs[i + j].add(&ai.mul(bj));
                    }
                }
                PolyExpr::from_coeffs(coeffs)
            }
        }
    }

    pub fn pow(&self, exp: u64) -> Self {
        let mut base = self.clone();
        let mut result = PolyExpr::one();
        let mut e = exp;
        while e > 0 {
            if e & 1 == 1 {
                result = result.mul(&base);
            }
            base = base.mul(&base);
            e >>= 1;
        }
        result
    }

    /// Normalizes a reduced expression `e` into a `PolyExpr` over the
    /// variable list `L` (spec §4.4's `polyExpr`).
    pub fn normalize(e: &Expr, vars: &[Symbol]) -> MathResult<PolyExpr> {
        let expanded = expand(e);
        Self::normalize_expanded(&expanded, vars)
    }

    fn normalize_expanded(expanded: &Expr, vars: &[Symbol]) -> MathResult<PolyExpr> {
        match vars.split_first() {
            None => match expanded {
                Expr::Number(n) => Ok(PolyExpr::Const(n.clone())),
                other => Err(MathError::NotAPolynomial {
                    expression: other.clone(),
                    reason: "not constant once all variables are accounted for".to_string(),
                }),
            },
            Some((main, rest)) => {
                let by_degree = degree::extract_by_degree(expanded, main)?;
                let mut coeffs = Vec::with_capacity(by_degree.len());
                for coeff_expr in by_degree {
                    coeffs.push(Self::normalize_expanded(&reduce(&coeff_expr), rest)?);
                }
                Ok(PolyExpr::from_coeffs(coeffs))
            }
        }
    }

    /// Converts back to an `Expr`, reduced.
    pub fn to_expr(&self, vars: &[Symbol]) -> Expr {
        reduce(&self.to_expr_unreduced(vars))
    }

    fn to_expr_unreduced(&self, vars: &[Symbol]) -> Expr {
        match self {
            PolyExpr::Const(n) => Expr::Number(n.clone()),
            PolyExpr::Poly(coeffs) => {
                let main = &vars[0];
                let rest = &vars[1..];
                let terms: Vec<Expr> = coeffs
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| !c.is_zero())
                    .map(|(i, coeff)| {
                        let coeff_expr = coeff.to_expr_unreduced(rest);
                        let var_power = if i == 0 {
                            c::integer(1)
                        } else if i == 1 {
                            c::symbol(main.name())
                        } else {
                            c::pow(c::symbol(main.name()), c::integer(i as i64))
                        };
                        c::mul(vec![coeff_expr, var_power])
                    })
                    .collect();
                if terms.is_empty() {
                    c::integer(0)
                } else {
                    c::add(terms)
                }
            }
        }
    }

    /// `lcm` of every rational coefficient's denominator, so that
    /// `self.scalar_mul(&clear_denominators(self))` is an integer
    /// polynomial (spec §4.7's "multiply by lcm of denominators").
    pub fn denominator_lcm(&self) -> crate::bigint::BigInt {
        match self {
            PolyExpr::Const(n) => n.denominator(),
            PolyExpr::Poly(coeffs) => {
                coeffs.iter().fold(crate::bigint::BigInt::one(), |acc, c| acc.lcm(&c.denominator_lcm()))
            }
        }
    }
}

/// `normalizeToPolyExprs(a, b)`: `L = sortedUnion(freeVars(a), freeVars(b))`.
pub fn normalize_to_poly_exprs(a: &Expr, b: &Expr) -> MathResult<(Vec<Symbol>, PolyExpr, PolyExpr)> {
    let mut vars: Vec<Symbol> = free_variables(a).into_iter().chain(free_variables(b)).collect();
    vars.sort();
    vars.dedup();
    let pa = PolyExpr::normalize(a, &vars)?;
    let pb = PolyExpr::normalize(b, &vars)?;
    Ok((vars, pa, pb))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::constructors as c;

    fn x() -> Symbol {
        Symbol::new("x")
    }
    fn y() -> Symbol {
        Symbol::new("y")
    }

    #[test]
    fn normalizes_univariate_polynomial() {
        let e: Expr = "x^2 + 2*x + 1".parse().unwrap();
        let p = PolyExpr::normalize(&e, &[x()]).unwrap();
        assert_eq!(p.main_degree(), 2);
        assert_eq!(p.to_expr(&[x()]), reduce(&e));
    }

    #[test]
    fn rejects_symbolic_exponent() {
        let e: Expr = "x^n".parse().unwrap();
        let result = PolyExpr::normalize(&e, &[x()]);
        assert!(result.is_err());
    }

    #[test]
    fn multivariate_roundtrip() {
        let e: Expr = "x^2*y + x*y^2 + 1".parse().unwrap();
        let vars = vec![x(), y()];
        let p = PolyExpr::normalize(&e, &vars).unwrap();
        assert_eq!(p.to_expr(&vars), reduce(&e));
    }

    #[test]
    fn addition_and_multiplication_match_expression_arithmetic() {
        let f: Expr = "x + 1".parse().unwrap();
        let g: Expr = "x - 1".parse().unwrap();
        let pf = PolyExpr::normalize(&f, &[x()]).unwrap();
        let pg = PolyExpr::normalize(&g, &[x()]).unwrap();
        let product = pf.mul(&pg);
        let expected: Expr = "x^2 - 1".parse().unwrap();
        assert_eq!(product.to_expr(&[x()]), reduce(&expected));
    }
}
