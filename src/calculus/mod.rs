//! Symbolic differentiation (spec §4.9): linearity, the product and
//! quotient rules, the power rule generalized to symbolic exponents via
//! logarithmic differentiation, and the chain rule through `FUNCTION`
//! heads. Deliberately thin — this kernel's calculus surface is just
//! `derivative`, matching the original's "specified for completeness"
//! framing.

use crate::expr::access::free_variables;
use crate::expr::constructors as c;
use crate::expr::Expr;
use crate::reduce::reduce;
use crate::symbol::Symbol;

/// `d(e)/dx`, reduced.
pub fn derivative(e: &Expr, x: &Symbol) -> Expr {
    reduce(&diff(e, x))
}

fn is_free_of(e: &Expr, x: &Symbol) -> bool {
    !free_variables(e).contains(x)
}

fn diff(e: &Expr, x: &Symbol) -> Expr {
    match e {
        Expr::Number(_) => c::integer(0),
        Expr::Symbol(s) => {
            if s == x {
                c::integer(1)
            } else {
                c::integer(0)
            }
        }
        Expr::Infinity | Expr::NegInfinity | Expr::Undefined | Expr::Fail => e.clone(),
        Expr::Add(terms) => c::add(terms.iter().map(|t| diff(t, x)).collect()),
        Expr::Sub(a, b) => c::sub(diff(a, x), diff(b, x)),
        Expr::Mul(factors) => diff_product(factors, x),
        Expr::Div(a, b) => diff_quotient(a, b, x),
        Expr::Pow(base, exp) => diff_pow(base, exp, x),
        Expr::Sqrt(radicand, index) => diff(&c::pow(radicand.as_ref().clone(), c::div(c::integer(1), index.as_ref().clone())), x),
        Expr::Factorial(a) => {
            if is_free_of(a, x) {
                c::integer(0)
            } else {
                c::undefined()
            }
        }
        Expr::Function { name, args } => diff_function(name, args, x),
        Expr::List(items) => Expr::List(Box::new(items.iter().map(|i| diff(i, x)).collect())),
    }
}

fn diff_product(factors: &[Expr], x: &Symbol) -> Expr {
    let mut terms = Vec::with_capacity(factors.len());
    for i in 0..factors.len() {
        let mut term_factors = Vec::with_capacity(factors.len());
        for (j, f) in factors.iter().enumerate() {
            term_factors.push(if i == j { diff(f, x) } else { f.clone() });
        }
        terms.push(c::mul(term_factors));
    }
    c::add(terms)
}

fn diff_quotient(a: &Expr, b: &Expr, x: &Symbol) -> Expr {
    let num = c::sub(c::mul(vec![diff(a, x), b.clone()]), c::mul(vec![a.clone(), diff(b, x)]));
    let den = c::pow(b.clone(), c::integer(2));
    c::div(num, den)
}

fn diff_pow(base: &Expr, exp: &Expr, x: &Symbol) -> Expr {
    let base_free = is_free_of(base, x);
    let exp_free = is_free_of(exp, x);
    match (base_free, exp_free) {
        (true, true) => c::integer(0),
        (false, true) => {
            // Power rule: d(base^n)/dx = n * base^(n-1) * d(base)/dx.
            let reduced_exp = exp.clone();
            let lowered = c::pow(base.clone(), c::sub(reduced_exp.clone(), c::integer(1)));
            c::mul(vec![reduced_exp, lowered, diff(base, x)])
        }
        (true, false) => {
            // Exponential rule: d(a^u)/dx = a^u * ln(a) * d(u)/dx.
            c::mul(vec![c::pow(base.clone(), exp.clone()), c::function("ln", vec![base.clone()]), diff(exp, x)])
        }
        (false, false) => {
            // Logarithmic differentiation for base(x)^exp(x).
            let d_log = c::add(vec![
                c::mul(vec![diff(exp, x), c::function("ln", vec![base.clone()])]),
                c::div(c::mul(vec![exp.clone(), diff(base, x)]), base.clone()),
            ]);
            c::mul(vec![c::pow(base.clone(), exp.clone()), d_log])
        }
    }
}

fn diff_function(name: &str, args: &[Expr], x: &Symbol) -> Expr {
    if name == "log" && args.len() == 2 {
        // log(base, arg) = ln(arg) / ln(base); base is conventionally constant.
        let rewritten = c::div(c::function("ln", vec![args[1].clone()]), c::function("ln", vec![args[0].clone()]));
        return diff(&rewritten, x);
    }
    if args.len() != 1 {
        return c::undefined();
    }
    let u = &args[0];
    let du = diff(u, x);
    let outer = match name {
        "sin" => c::function("cos", vec![u.clone()]),
        "cos" => c::mul(vec![c::integer(-1), c::function("sin", vec![u.clone()])]),
        "tan" => c::pow(c::function("sec", vec![u.clone()]), c::integer(2)),
        "csc" => c::mul(vec![c::integer(-1), c::function("csc", vec![u.clone()]), c::function("cot", vec![u.clone()])]),
        "sec" => c::mul(vec![c::function("sec", vec![u.clone()]), c::function("tan", vec![u.clone()])]),
        "cot" => c::mul(vec![c::integer(-1), c::pow(c::function("csc", vec![u.clone()]), c::integer(2))]),
        "asin" => c::div(c::integer(1), c::sqrt(c::sub(c::integer(1), c::pow(u.clone(), c::integer(2))))),
        "acos" => {
            c::mul(vec![c::integer(-1), c::div(c::integer(1), c::sqrt(c::sub(c::integer(1), c::pow(u.clone(), c::integer(2)))))])
        }
        "atan" => c::div(c::integer(1), c::add(vec![c::integer(1), c::pow(u.clone(), c::integer(2))])),
        "sinh" => c::function("cosh", vec![u.clone()]),
        "cosh" => c::function("sinh", vec![u.clone()]),
        "tanh" => c::sub(c::integer(1), c::pow(c::function("tanh", vec![u.clone()]), c::integer(2))),
        "ln" => c::div(c::integer(1), u.clone()),
        "exp" => c::function("exp", vec![u.clone()]),
        _ => return c::undefined(),
    };
    c::mul(vec![outer, du])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Symbol {
        Symbol::new("x")
    }

    #[test]
    fn derivative_of_sine_of_square_is_chain_rule() {
        let e: Expr = "sin(x^2)".parse().unwrap();
        let d = derivative(&e, &x());
        let expected: Expr = "2*x*cos(x^2)".parse().unwrap();
        assert_eq!(d, reduce(&expected));
    }

    #[test]
    fn derivative_of_constant_is_zero() {
        let e = c::integer(7);
        assert_eq!(derivative(&e, &x()), c::integer(0));
    }

    #[test]
    fn derivative_of_variable_with_respect_to_itself_is_one() {
        let e = c::symbol("x");
        assert_eq!(derivative(&e, &x()), c::integer(1));
    }

    #[test]
    fn power_rule_lowers_exponent() {
        let e: Expr = "x^3".parse().unwrap();
        let d = derivative(&e, &x());
        let expected: Expr = "3*x^2".parse().unwrap();
        assert_eq!(d, reduce(&expected));
    }

    #[test]
    fn product_rule_for_two_factors() {
        let e: Expr = "x*sin(x)".parse().unwrap();
        let d = derivative(&e, &x());
        let expected: Expr = "sin(x) + x*cos(x)".parse().unwrap();
        assert_eq!(d, reduce(&expected));
    }

    #[test]
    fn quotient_rule_matches_manual_expansion() {
        let e: Expr = "x / (x + 1)".parse().unwrap();
        let d = derivative(&e, &x());
        let expected: Expr = "((x + 1) - x) / (x + 1)^2".parse().unwrap();
        assert_eq!(d, reduce(&expected));
    }
}
