//! Inspection and structural-edit accessors (spec §6): `kindOf`, `is`,
//! `getOperand`/`setOperand`, `freeVariables`, and the `base`/`exponent`/
//! `numerator`/`denominator` helpers grounded on the original kernel's
//! `Algebra.cpp` accessor family.

use super::{kind_mask, Expr, Kind};
use crate::number::Number;
use crate::symbol::Symbol;
use std::collections::BTreeSet;

pub fn kind_of(e: &Expr) -> Kind {
    e.kind()
}

fn mask_of(kind: Kind) -> u32 {
    match kind {
        Kind::Integer => kind_mask::INTEGER,
        Kind::Fraction => kind_mask::FRACTION,
        Kind::Symbol => kind_mask::SYMBOL,
        Kind::Function => kind_mask::FUNCTION,
        Kind::Add => kind_mask::ADD,
        Kind::Mul => kind_mask::MUL,
        Kind::Pow => kind_mask::POW,
        Kind::Div => kind_mask::DIV,
        Kind::Sub => kind_mask::SUB,
        Kind::Sqrt => kind_mask::SQRT,
        Kind::Factorial => kind_mask::FACTORIAL,
        Kind::Infinity => kind_mask::INFINITY,
        Kind::NegInfinity => kind_mask::NEG_INFINITY,
        Kind::Undefined => kind_mask::UNDEFINED,
        Kind::Fail => kind_mask::FAIL,
        Kind::List => kind_mask::LIST,
    }
}

/// `true` if `e`'s kind is one of the kinds named in `mask` (spec §6's
/// `is(e, kindMask)`, e.g. `is(e, kind_mask::NUMBER)`).
pub fn is(e: &Expr, mask: u32) -> bool {
    mask_of(kind_of(e)) & mask != 0
}

/// Number of addressable operands for fixed/variable-arity kinds. Leaves
/// (`Symbol`, `Infinity`, `Undefined`, ...) have zero operands.
pub fn operand_count(e: &Expr) -> usize {
    match e {
        Expr::Pow(_, _) | Expr::Div(_, _) | Expr::Sub(_, _) | Expr::Sqrt(_, _) => 2,
        Expr::Factorial(_) => 1,
        Expr::Function { args, .. } | Expr::Add(args) | Expr::Mul(args) | Expr::List(args) => args.len(),
        _ => 0,
    }
}

/// 0-indexed operand access. Returns `None` out of range, matching the
/// original kernel's bounds-checked `getOperand`.
pub fn operand(e: &Expr, i: usize) -> Option<&Expr> {
    match e {
        Expr::Pow(a, b) | Expr::Div(a, b) | Expr::Sub(a, b) | Expr::Sqrt(a, b) => match i {
            0 => Some(a),
            1 => Some(b),
            _ => None,
        },
        Expr::Factorial(a) => (i == 0).then_some(a),
        Expr::Function { args, .. } | Expr::Add(args) | Expr::Mul(args) | Expr::List(args) => args.get(i),
        _ => None,
    }
}

/// Replaces the `i`th operand in place. A no-op (not an error) if `i` is
/// out of range, mirroring `getOperand`'s bounds behavior.
pub fn set_operand(e: &mut Expr, i: usize, value: Expr) {
    match e {
        Expr::Pow(a, b) | Expr::Div(a, b) | Expr::Sub(a, b) | Expr::Sqrt(a, b) => match i {
            0 => **a = value,
            1 => **b = value,
            _ => {}
        },
        Expr::Factorial(a) => {
            if i == 0 {
                **a = value;
            }
        }
        Expr::Function { args, .. } | Expr::Add(args) | Expr::Mul(args) | Expr::List(args) => {
            if let Some(slot) = args.get_mut(i) {
                *slot = value;
            }
        }
        _ => {}
    }
}

/// The base of a power-like expression: `base(x^n) = x`, `base(sqrt[n](x)) = x`,
/// and `base(x) = x` for anything else (spec's `base` accessor).
pub fn base(e: &Expr) -> &Expr {
    match e {
        Expr::Pow(b, _) => b,
        Expr::Sqrt(radicand, _) => radicand,
        other => other,
    }
}

/// The exponent of a power-like expression: `exponent(x^n) = n`,
/// `exponent(sqrt[n](x)) = 1/n`'s *integer* index `n` itself is returned by
/// callers that need it directly via `Sqrt`'s second operand; for a plain
/// expression, `exponent(x) = 1`.
pub fn exponent(e: &Expr) -> Expr {
    match e {
        Expr::Pow(_, exp) => (**exp).clone(),
        Expr::Sqrt(_, index) => {
            super::constructors::div(Expr::Number(Number::one()), (**index).clone())
        }
        _ => Expr::Number(Number::one()),
    }
}

/// `numerator(n/d) = n`; for anything that is not already a literal
/// rational number, the numerator is the expression itself.
pub fn numerator(e: &Expr) -> Expr {
    match e {
        Expr::Number(n) => Expr::Number(Number::Integer(n.numerator())),
        other => other.clone(),
    }
}

/// `denominator(n/d) = d`; `1` for anything that is not a literal
/// rational number.
pub fn denominator(e: &Expr) -> Expr {
    match e {
        Expr::Number(n) => Expr::Number(Number::Integer(n.denominator())),
        _ => Expr::Number(Number::one()),
    }
}

/// Collects the set of free symbols appearing in `e`, in lexicographic
/// order (`BTreeSet` gives us this for free via `Symbol`'s `Ord`).
pub fn free_variables(e: &Expr) -> BTreeSet<Symbol> {
    let mut out = BTreeSet::new();
    collect_free_variables(e, &mut out);
    out
}

fn collect_free_variables(e: &Expr, out: &mut BTreeSet<Symbol>) {
    match e {
        Expr::Symbol(s) => {
            out.insert(s.clone());
        }
        Expr::Pow(a, b) | Expr::Div(a, b) | Expr::Sub(a, b) | Expr::Sqrt(a, b) => {
            collect_free_variables(a, out);
            collect_free_variables(b, out);
        }
        Expr::Factorial(a) => collect_free_variables(a, out),
        Expr::Function { args, .. } | Expr::Add(args) | Expr::Mul(args) | Expr::List(args) => {
            for arg in args.iter() {
                collect_free_variables(arg, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::constructors as c;

    #[test]
    fn operand_roundtrips_power() {
        let e = c::pow(c::symbol("x"), c::integer(2));
        assert_eq!(operand(&e, 0), Some(&c::symbol("x")));
        assert_eq!(operand(&e, 1), Some(&c::integer(2)));
    }

    #[test]
    fn free_variables_collects_all_symbols_sorted() {
        let e = c::add(vec![c::symbol("y"), c::mul(vec![c::symbol("x"), c::symbol("z")])]);
        let vars: Vec<String> = free_variables(&e).iter().map(|s| s.name().to_string()).collect();
        assert_eq!(vars, vec!["x".to_string(), "y".to_string(), "z".to_string()]);
    }

    #[test]
    fn is_checks_kind_mask() {
        assert!(is(&c::integer(3), kind_mask::NUMBER));
        assert!(!is(&c::symbol("x"), kind_mask::NUMBER));
    }

    #[test]
    fn base_and_exponent_of_plain_symbol_default() {
        let x = c::symbol("x");
        assert_eq!(base(&x), &x);
        assert_eq!(exponent(&x), c::integer(1));
    }
}
