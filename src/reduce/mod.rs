//! The canonicalizing reducer (spec §4.3): automatic simplification of
//! sums, products, and powers, SUB/DIV elimination, substitution, and
//! evaluation.
//!
//! `reduce` is idempotent (`reduce(reduce(e)) == reduce(e)`) by
//! construction: every helper here only ever produces expressions already
//! in the normal form the next call to `reduce` would leave untouched —
//! there is no hidden fixed-point loop.

mod expand;
mod trig;

pub use expand::expand;

use crate::expr::access::{free_variables, operand};
use crate::expr::constructors as c;
use crate::expr::{order, Expr};
use crate::number::Number;
use crate::symbol::Symbol;
use std::collections::HashMap;

/// Canonicalizes `e` bottom-up: reduces every child first, then applies
/// the per-kind simplification rule to the reduced children.
pub fn reduce(e: &Expr) -> Expr {
    match e {
        Expr::Number(_) | Expr::Symbol(_) | Expr::Infinity | Expr::NegInfinity | Expr::Undefined | Expr::Fail => {
            e.clone()
        }
        Expr::Sub(a, b) => reduce(&c::add(vec![(**a).clone(), c::neg((**b).clone())])),
        Expr::Div(a, b) => reduce(&c::mul(vec![(**a).clone(), c::pow((**b).clone(), c::integer(-1))])),
        Expr::Add(terms) => reduce_sum(terms.iter().map(reduce).collect()),
        Expr::Mul(factors) => reduce_product(factors.iter().map(reduce).collect()),
        Expr::Pow(base, exp) => simplify_power(&reduce(base), &reduce(exp)),
        Expr::Sqrt(radicand, index) => simplify_sqrt(&reduce(radicand), &reduce(index)),
        Expr::Factorial(a) => simplify_factorial(&reduce(a)),
        Expr::Function { name, args } => simplify_function(name, args.iter().map(reduce).collect()),
        Expr::List(items) => Expr::List(Box::new(items.iter().map(reduce).collect())),
    }
}

/// `reduceRNE`: a fast path that reduces an expression known to contain
/// only numeric leaves to a single `Number`. Returns `None` if `e` (after
/// reduction) is not purely numeric.
pub fn reduce_rne(e: &Expr) -> Option<Number> {
    match reduce(e) {
        Expr::Number(n) => Some(n),
        _ => None,
    }
}

fn is_error_sentinel(e: &Expr) -> bool {
    matches!(e, Expr::Undefined | Expr::Fail)
}

/// Splits a reduced term `c·u` into its numeric coefficient `c` and base
/// `u`. A bare number has base `1` (folded into the sum's constant
/// accumulator by the caller, never reaching this path for sums — but
/// `reduce_product`'s per-factor exponent bookkeeping reuses it too).
fn term_coeff_base(e: &Expr) -> (Number, Expr) {
    match e {
        Expr::Number(n) => (n.clone(), Expr::Number(Number::one())),
        Expr::Mul(factors) => {
            let mut coeff = Number::one();
            let mut rest = Vec::new();
            for f in factors.iter() {
                match f {
                    Expr::Number(n) => coeff = coeff.mul(n),
                    other => rest.push(other.clone()),
                }
            }
            let base = match rest.len() {
                0 => Expr::Number(Number::one()),
                1 => rest.into_iter().next().unwrap(),
                _ => Expr::Mul(Box::new(rest)),
            };
            (coeff, base)
        }
        other => (Number::one(), other.clone()),
    }
}

fn reduce_sum(terms: Vec<Expr>) -> Expr {
    let mut flat = Vec::new();
    for t in terms {
        match t {
            Expr::Add(inner) => flat.extend(inner.into_iter()),
            other => flat.push(other),
        }
    }

    for t in &flat {
        if is_error_sentinel(t) {
            return t.clone();
        }
    }
    let saw_inf = flat.iter().any(|t| matches!(t, Expr::Infinity));
    let saw_neg_inf = flat.iter().any(|t| matches!(t, Expr::NegInfinity));
    if saw_inf && saw_neg_inf {
        return Expr::Undefined;
    }
    if saw_inf {
        return Expr::Infinity;
    }
    if saw_neg_inf {
        return Expr::NegInfinity;
    }

    let mut constant = Number::zero();
    let mut bases: Vec<Expr> = Vec::new();
    let mut coeffs: Vec<Number> = Vec::new();
    for t in flat {
        if let Expr::Number(n) = &t {
            constant = constant.add(n);
            continue;
        }
        let (coeff, base) = term_coeff_base(&t);
        if let Some(i) = bases.iter().position(|b| *b == base) {
            coeffs[i] = coeffs[i].add(&coeff);
        } else {
            bases.push(base);
            coeffs.push(coeff);
        }
    }

    let mut result_terms = Vec::new();
    if !constant.is_zero() {
        result_terms.push(Expr::Number(constant));
    }
    for (base, coeff) in bases.into_iter().zip(coeffs.into_iter()) {
        if coeff.is_zero() {
            continue;
        }
        let term = if coeff.is_one() {
            base
        } else {
            Expr::Mul(Box::new(vec![Expr::Number(coeff), base]))
        };
        result_terms.push(term);
    }

    match result_terms.len() {
        0 => Expr::Number(Number::zero()),
        1 => result_terms.into_iter().next().unwrap(),
        _ => {
            result_terms.sort_by(order::compare);
            Expr::Add(Box::new(result_terms))
        }
    }
}

/// Splits a reduced factor into `(base, exponent)`: `x^n` gives
/// `(x, n)`, `sqrt[n](x)` gives `(x, 1/n)`, anything else gives
/// `(e, 1)`.
fn factor_base_exponent(e: &Expr) -> (Expr, Expr) {
    match e {
        Expr::Pow(base, exp) => ((**base).clone(), (**exp).clone()),
        Expr::Sqrt(radicand, index) => {
            ((**radicand).clone(), reduce(&c::div(c::integer(1), (**index).clone())))
        }
        other => (other.clone(), Expr::Number(Number::one())),
    }
}

fn reduce_product(factors: Vec<Expr>) -> Expr {
    let mut flat = Vec::new();
    for f in factors {
        match f {
            Expr::Mul(inner) => flat.extend(inner.into_iter()),
            other => flat.push(other),
        }
    }

    for f in &flat {
        if is_error_sentinel(f) {
            return f.clone();
        }
    }

    let saw_inf = flat.iter().any(|f| matches!(f, Expr::Infinity | Expr::NegInfinity));
    if saw_inf {
        let has_zero = flat.iter().any(|f| matches!(f, Expr::Number(n) if n.is_zero()));
        if has_zero {
            return Expr::Undefined;
        }
        let mut negative = false;
        for f in &flat {
            let neg = match f {
                Expr::NegInfinity => true,
                Expr::Number(n) => n.is_negative(),
                _ => false,
            };
            if neg {
                negative = !negative;
            }
        }
        return if negative { Expr::NegInfinity } else { Expr::Infinity };
    }

    let mut constant = Number::one();
    let mut bases: Vec<Expr> = Vec::new();
    let mut exponents: Vec<Expr> = Vec::new();
    for f in flat {
        if let Expr::Number(n) = &f {
            constant = constant.mul(n);
            continue;
        }
        let (base, exp) = factor_base_exponent(&f);
        if let Some(i) = bases.iter().position(|b| *b == base) {
            exponents[i] = reduce(&c::add(vec![exponents[i].clone(), exp]));
        } else {
            bases.push(base);
            exponents.push(exp);
        }
    }

    if constant.is_zero() {
        return Expr::Number(Number::zero());
    }

    let mut result_factors = Vec::new();
    if !constant.is_one() {
        result_factors.push(Expr::Number(constant));
    }
    for (base, exp) in bases.into_iter().zip(exponents.into_iter()) {
        let factor = simplify_power(&base, &exp);
        match factor {
            Expr::Number(n) if n.is_one() => {}
            Expr::Number(n) => {
                // A symbolic base collapsed to a pure number (e.g. 1^x):
                // fold it into the leading coefficient rather than
                // emitting a bare numeric factor mid-product.
                if let Some(Expr::Number(c0)) = result_factors.first().cloned() {
                    result_factors[0] = Expr::Number(c0.mul(&n));
                } else if !n.is_one() {
                    result_factors.insert(0, Expr::Number(n));
                }
            }
            other => result_factors.push(other),
        }
    }

    match result_factors.len() {
        0 => Expr::Number(Number::one()),
        1 => result_factors.into_iter().next().unwrap(),
        _ => {
            result_factors.sort_by(order::compare);
            Expr::Mul(Box::new(result_factors))
        }
    }
}

/// Power reduction (spec §4.3): both operands are already reduced.
pub fn simplify_power(base: &Expr, exp: &Expr) -> Expr {
    if is_error_sentinel(base) || is_error_sentinel(exp) {
        return Expr::Undefined;
    }
    if let Expr::Number(e) = exp {
        if e.is_zero() {
            return if matches!(base, Expr::Number(n) if n.is_zero()) {
                Expr::Undefined
            } else {
                Expr::Number(Number::one())
            };
        }
        if e.is_one() {
            return base.clone();
        }
    }
    if let Expr::Number(b) = base {
        if b.is_zero() {
            if let Expr::Number(e) = exp {
                return if e.is_negative() { Expr::Undefined } else { Expr::Number(Number::zero()) };
            }
        }
        if b.is_one() {
            return Expr::Number(Number::one());
        }
        if let Expr::Number(e) = exp {
            let num = e.numerator();
            let den = e.denominator();
            if den.is_one() {
                if let Some(exp_i64) = num.to_i64() {
                    if let Ok(result) = b.pow_i64(exp_i64) {
                        return Expr::Number(result);
                    }
                }
            } else if den == crate::bigint::BigInt::from(2i64) {
                // c^(p/q): exact when c is a perfect qth power. Only the
                // square-root case (q == 2) is attempted here.
                if let Number::Integer(base_int) = b {
                    if !base_int.is_negative() {
                        let root = base_int.isqrt();
                        if root.mul(&root) == *base_int {
                            if let Some(p) = num.to_i64() {
                                if let Ok(r) = Number::Integer(root).pow_i64(p) {
                                    return Expr::Number(r);
                                }
                            }
                        }
                    }
                }
            }
        }
    }
    // (x^a)^b -> x^(a*b) when safe: b integer, or both a and b rational.
    if let Expr::Pow(inner_base, inner_exp) = base {
        let combinable = matches!(exp, Expr::Number(Number::Integer(_)))
            || matches!((&**inner_exp, exp), (Expr::Number(_), Expr::Number(_)));
        if combinable {
            let new_exp = reduce(&c::mul(vec![(**inner_exp).clone(), exp.clone()]));
            return simplify_power(inner_base, &new_exp);
        }
    }
    // (x*y)^n -> x^n * y^n for integer n.
    if let (Expr::Mul(factors), Expr::Number(Number::Integer(_))) = (base, exp) {
        let distributed: Vec<Expr> = factors.iter().map(|f| simplify_power(f, exp)).collect();
        return reduce_product(distributed);
    }
    c::pow(base.clone(), exp.clone())
}

fn simplify_sqrt(radicand: &Expr, index: &Expr) -> Expr {
    if is_error_sentinel(radicand) || is_error_sentinel(index) {
        return Expr::Undefined;
    }
    if let Expr::Number(idx) = index {
        if idx.is_one() {
            return radicand.clone();
        }
        if let Number::Integer(k) = idx {
            if *k == crate::bigint::BigInt::from(2i64) {
                return simplify_power(radicand, &Expr::Number(Number::rational(crate::bigint::BigInt::from(1i64), crate::bigint::BigInt::from(2i64)).expect("2 != 0")));
            }
        }
    }
    c::root(radicand.clone(), index.clone())
}

fn simplify_factorial(a: &Expr) -> Expr {
    if is_error_sentinel(a) {
        return Expr::Undefined;
    }
    if let Expr::Number(Number::Integer(n)) = a {
        if !n.is_negative() {
            if let Some(k) = n.to_u64() {
                return Expr::Number(Number::Integer(crate::bigint::BigInt::factorial(k)));
            }
        } else {
            return Expr::Undefined;
        }
    }
    c::factorial(a.clone())
}

fn simplify_function(name: &str, args: Vec<Expr>) -> Expr {
    if args.iter().any(is_error_sentinel) {
        return Expr::Undefined;
    }
    match name {
        "ln" if args.len() == 1 => {
            if let Expr::Number(n) = &args[0] {
                if n.is_one() {
                    return Expr::Number(Number::zero());
                }
                if n.is_zero() {
                    return Expr::NegInfinity;
                }
            }
            c::function(name, args)
        }
        "exp" if args.len() == 1 => {
            if let Expr::Number(n) = &args[0] {
                if n.is_zero() {
                    return Expr::Number(Number::one());
                }
            }
            c::function(name, args)
        }
        "log" if args.len() == 2 => {
            if args[0] == args[1] && !matches!(&args[0], Expr::Number(n) if n.is_zero() || n.is_one()) {
                return Expr::Number(Number::one());
            }
            c::function(name, args)
        }
        "sin" | "cos" | "tan" | "csc" | "sec" | "cot" | "asin" | "acos" | "atan" | "sinh" | "cosh"
        | "tanh" => {
            if args.len() == 1 {
                if let Some(exact) = trig::exact_value(name, &args[0]) {
                    return reduce(&exact);
                }
            }
            c::function(name, args)
        }
        _ => c::function(name, args),
    }
}

/// Structural substitution of every free occurrence of `x` by `v`,
/// without reducing the result (spec §4.3's `replace`).
pub fn replace(u: &Expr, x: &Symbol, v: &Expr) -> Expr {
    match u {
        Expr::Symbol(s) if s == x => v.clone(),
        Expr::Symbol(_) | Expr::Number(_) | Expr::Infinity | Expr::NegInfinity | Expr::Undefined | Expr::Fail => {
            u.clone()
        }
        Expr::Add(terms) => Expr::Add(Box::new(terms.iter().map(|t| replace(t, x, v)).collect())),
        Expr::Mul(factors) => Expr::Mul(Box::new(factors.iter().map(|f| replace(f, x, v)).collect())),
        Expr::List(items) => Expr::List(Box::new(items.iter().map(|i| replace(i, x, v)).collect())),
        Expr::Function { name, args } => {
            Expr::Function { name: name.clone(), args: Box::new(args.iter().map(|a| replace(a, x, v)).collect()) }
        }
        Expr::Pow(a, b) => Expr::Pow(Box::new(replace(a, x, v)), Box::new(replace(b, x, v))),
        Expr::Div(a, b) => Expr::Div(Box::new(replace(a, x, v)), Box::new(replace(b, x, v))),
        Expr::Sub(a, b) => Expr::Sub(Box::new(replace(a, x, v)), Box::new(replace(b, x, v))),
        Expr::Sqrt(a, b) => Expr::Sqrt(Box::new(replace(a, x, v)), Box::new(replace(b, x, v))),
        Expr::Factorial(a) => Expr::Factorial(Box::new(replace(a, x, v))),
    }
}

/// `replace` followed by `expand` and `reduce` (spec §4.3's `eval`).
pub fn eval(u: &Expr, x: &Symbol, v: &Expr) -> Expr {
    reduce(&expand(&replace(u, x, v)))
}

/// Evaluates `e` at a full set of symbol bindings, reducing after every
/// substitution so intermediate growth stays canonical.
pub fn eval_all(e: &Expr, bindings: &HashMap<Symbol, Expr>) -> Expr {
    let mut result = e.clone();
    for sym in free_variables(e) {
        if let Some(v) = bindings.get(&sym) {
            result = replace(&result, &sym, v);
        }
    }
    reduce(&expand(&result))
}

/// `getOperand`/`setOperand` are defined on `Expr` directly
/// ([`crate::expr::access`]); `reduce::simplify_power` is re-exported
/// because `polyops`'s power-of-polynomial helper reuses the same
/// zero/one/integer-exponent fast paths.
pub fn operand_or_self(e: &Expr, i: usize) -> Expr {
    operand(e, i).cloned().unwrap_or_else(|| e.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::constructors as c;

    fn x() -> Expr {
        c::symbol("x")
    }

    #[test]
    fn reduce_is_idempotent() {
        let e = c::mul(vec![c::add(vec![x(), c::integer(1)]), c::integer(2)]);
        let once = reduce(&e);
        let twice = reduce(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn scenario_difference_of_squares_cancels() {
        let lhs = c::mul(vec![c::add(vec![x(), c::integer(1)]), c::sub(x(), c::integer(1))]);
        let rhs = c::sub(c::pow(x(), c::integer(2)), c::integer(1));
        let e = c::sub(lhs, rhs);
        assert_eq!(reduce(&e), Expr::Number(Number::zero()));
    }

    #[test]
    fn like_terms_collect_with_coefficients() {
        let e = c::add(vec![x(), x(), x()]);
        assert_eq!(reduce(&e), c::mul(vec![c::integer(3), x()]));
    }

    #[test]
    fn power_of_power_combines_exponents() {
        let e = c::pow(c::pow(x(), c::integer(2)), c::integer(3));
        assert_eq!(reduce(&e), c::pow(x(), c::integer(6)));
    }

    #[test]
    fn zero_power_zero_is_undefined() {
        assert_eq!(reduce(&c::pow(c::integer(0), c::integer(0))), Expr::Undefined);
    }

    #[test]
    fn sqrt_of_product_self_simplifies_to_radicand() {
        let e = c::mul(vec![c::sqrt(x()), c::sqrt(x())]);
        assert_eq!(reduce(&e), x());
    }

    #[test]
    fn replace_requires_caller_to_reduce_separately() {
        let e = c::add(vec![x(), c::integer(1)]);
        let substituted = replace(&e, &Symbol::new("x"), &c::integer(5));
        assert_eq!(substituted, c::add(vec![c::integer(5), c::integer(1)]));
        assert_eq!(reduce(&substituted), c::integer(6));
    }

    #[test]
    fn eval_reduces_after_substitution() {
        let e = c::pow(c::add(vec![x(), c::integer(1)]), c::integer(2));
        assert_eq!(eval(&e, &Symbol::new("x"), &c::integer(2)), c::integer(9));
    }
}
