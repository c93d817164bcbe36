//! Smart constructors for building expression trees before reduction
//! (spec §4.2/§6). These build exactly the syntactic node requested —
//! `sub`/`div` really do produce `Expr::Sub`/`Expr::Div` nodes, which only
//! [`crate::reduce::reduce`] eliminates. Callers who want an
//! already-canonical result should reduce after constructing.

use super::Expr;
use crate::bigint::BigInt;
use crate::number::Number;
use crate::symbol::Symbol;

pub fn integer(v: impl Into<BigInt>) -> Expr {
    Expr::Number(Number::integer(v))
}

pub fn rational(num: impl Into<BigInt>, den: impl Into<BigInt>) -> Expr {
    match Number::rational(num.into(), den.into()) {
        Ok(n) => Expr::Number(n),
        Err(_) => Expr::Undefined,
    }
}

pub fn symbol(name: impl AsRef<str>) -> Expr {
    Expr::Symbol(Symbol::new(name))
}

pub fn function(name: impl Into<String>, args: Vec<Expr>) -> Expr {
    Expr::Function { name: name.into(), args: Box::new(args) }
}

pub fn add(terms: Vec<Expr>) -> Expr {
    Expr::Add(Box::new(terms))
}

pub fn mul(factors: Vec<Expr>) -> Expr {
    Expr::Mul(Box::new(factors))
}

pub fn pow(base: Expr, exponent: Expr) -> Expr {
    Expr::Pow(Box::new(base), Box::new(exponent))
}

pub fn div(num: Expr, den: Expr) -> Expr {
    Expr::Div(Box::new(num), Box::new(den))
}

pub fn sub(lhs: Expr, rhs: Expr) -> Expr {
    Expr::Sub(Box::new(lhs), Box::new(rhs))
}

/// `n`th root, `index` defaulting to 2 for a plain square root.
pub fn root(radicand: Expr, index: Expr) -> Expr {
    Expr::Sqrt(Box::new(radicand), Box::new(index))
}

pub fn sqrt(radicand: Expr) -> Expr {
    root(radicand, integer(2))
}

pub fn factorial(e: Expr) -> Expr {
    Expr::Factorial(Box::new(e))
}

pub fn neg(e: Expr) -> Expr {
    mul(vec![integer(-1), e])
}

pub fn infinity() -> Expr {
    Expr::Infinity
}

pub fn neg_infinity() -> Expr {
    Expr::NegInfinity
}

pub fn undefined() -> Expr {
    Expr::Undefined
}

pub fn fail() -> Expr {
    Expr::Fail
}

/// Builds a numeric literal from an `f64`, following `numberFromDouble`:
/// non-finite input (`NaN`, `+-inf`) has no exact rational value and maps
/// to `Undefined` rather than erroring (spec §3, open question resolution).
pub fn from_f64(v: f64) -> Expr {
    match Number::from_f64(v) {
        Some(n) => Expr::Number(n),
        None => Expr::Undefined,
    }
}

impl std::ops::Add for Expr {
    type Output = Expr;
    fn add(self, rhs: Expr) -> Expr {
        add(vec![self, rhs])
    }
}

impl std::ops::Sub for Expr {
    type Output = Expr;
    fn sub(self, rhs: Expr) -> Expr {
        sub(self, rhs)
    }
}

impl std::ops::Mul for Expr {
    type Output = Expr;
    fn mul(self, rhs: Expr) -> Expr {
        mul(vec![self, rhs])
    }
}

impl std::ops::Div for Expr {
    type Output = Expr;
    fn div(self, rhs: Expr) -> Expr {
        div(self, rhs)
    }
}

impl std::ops::Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        neg(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_overloads_build_raw_nodes() {
        let e = symbol("x") + integer(1);
        assert!(matches!(e, Expr::Add(_)));
        let e = symbol("x") - integer(1);
        assert!(matches!(e, Expr::Sub(_, _)));
        let e = symbol("x") / integer(2);
        assert!(matches!(e, Expr::Div(_, _)));
    }

    #[test]
    fn sqrt_defaults_to_index_two() {
        assert_eq!(sqrt(symbol("x")), root(symbol("x"), integer(2)));
    }

    #[test]
    fn from_f64_undefined_for_nan() {
        assert_eq!(from_f64(f64::NAN), Expr::Undefined);
    }
}
