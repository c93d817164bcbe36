//! The public façade (spec §6): a flat set of free functions wrapping
//! every internal component — construction, arithmetic combinators,
//! inspection, transformation, trigonometric constructors, polynomial
//! operations over ℚ and `GF(p)`, calculus, and formatting. Naming and
//! namespacing here are ours to pick (spec §1 calls the façade surface
//! itself an external collaborator's contract); the operations it wraps
//! are not.

use crate::bigint::BigInt;
use crate::error::MathResult;
use crate::expr::constructors as c;
use crate::expr::{access, Expr, Kind};
use crate::gf::GfPoly;
use crate::number::Number;
use crate::polyexpr;
use crate::polyops;
use crate::symbol::Symbol;

// ---------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------

/// Parses a base-10, optionally-signed integer literal (spec §6's
/// `intFromString`).
pub fn int_from_string(s: &str) -> MathResult<Expr> {
    BigInt::from_decimal_str(s).map(c::integer).map_err(|e| crate::error::MathError::InvalidArgument {
        operation: "intFromString".to_string(),
        reason: e.to_string(),
    })
}

pub fn int_from_long(v: i64) -> Expr {
    c::integer(v)
}

/// Approximates `v` as a rational (`numberFromDouble`); non-finite input
/// maps to `Undefined` (spec §9 open question).
pub fn number_from_double(v: f64) -> Expr {
    c::from_f64(v)
}

pub fn symbol(name: &str) -> Expr {
    c::symbol(name)
}

// ---------------------------------------------------------------------
// Arithmetic combinators — raw constructors; callers `reduce` separately.
// ---------------------------------------------------------------------

pub fn add(terms: Vec<Expr>) -> Expr {
    c::add(terms)
}

pub fn sub(a: Expr, b: Expr) -> Expr {
    c::sub(a, b)
}

pub fn mul(factors: Vec<Expr>) -> Expr {
    c::mul(factors)
}

pub fn div(a: Expr, b: Expr) -> Expr {
    c::div(a, b)
}

pub fn pow(base: Expr, exponent: Expr) -> Expr {
    c::pow(base, exponent)
}

pub fn root(radicand: Expr, index: Expr) -> Expr {
    c::root(radicand, index)
}

pub fn sqrt(radicand: Expr) -> Expr {
    c::sqrt(radicand)
}

// ---------------------------------------------------------------------
// Inspection
// ---------------------------------------------------------------------

pub fn kind_of(e: &Expr) -> Kind {
    access::kind_of(e)
}

pub fn get_operand(e: &Expr, i: usize) -> Option<Expr> {
    access::operand(e, i).cloned()
}

pub fn set_operand(e: &mut Expr, i: usize, value: Expr) {
    access::set_operand(e, i, value)
}

pub fn is(e: &Expr, kind_mask: u32) -> bool {
    access::is(e, kind_mask)
}

// ---------------------------------------------------------------------
// Transformation
// ---------------------------------------------------------------------

pub fn expand(e: &Expr) -> Expr {
    crate::reduce::expand(e)
}

pub fn reduce(e: &Expr) -> Expr {
    crate::reduce::reduce(e)
}

pub fn replace(u: &Expr, x: &Symbol, v: &Expr) -> Expr {
    crate::reduce::replace(u, x, v)
}

pub fn eval(u: &Expr, x: &Symbol, v: &Expr) -> Expr {
    crate::reduce::eval(u, x, v)
}

pub fn free_variables(u: &Expr) -> Vec<Symbol> {
    access::free_variables(u).into_iter().collect()
}

pub fn log(base: Expr, arg: Expr) -> Expr {
    c::function("log", vec![base, arg])
}

pub fn ln(arg: Expr) -> Expr {
    c::function("ln", vec![arg])
}

pub fn exp(arg: Expr) -> Expr {
    c::function("exp", vec![arg])
}

// ---------------------------------------------------------------------
// Trigonometric constructors
// ---------------------------------------------------------------------

macro_rules! trig_constructors {
    ($($name:ident),*) => {
        $(
            pub fn $name(arg: Expr) -> Expr {
                c::function(stringify!($name), vec![arg])
            }
        )*
    };
}

trig_constructors!(sin, cos, tan, csc, sec, cot, asin, acos, atan, sinh, cosh, tanh);

// ---------------------------------------------------------------------
// Polynomial operations over ℚ
// ---------------------------------------------------------------------

pub fn factor(e: &Expr) -> MathResult<Expr> {
    crate::factor::factor_expr(e)
}

/// `factorPolyExprAndExpand`: factors `e` over ℚ, then fully expands the
/// resulting product back into an ADD/MUL tree equivalent to ∏(factors),
/// rather than leaving it in [`factor`]'s unexpanded product form.
pub fn factor_and_expand(e: &Expr) -> MathResult<Expr> {
    let factored = factor(e)?;
    Ok(expand(&factored))
}

pub fn degree(f: &Expr, x: &Symbol) -> MathResult<u64> {
    polyexpr::degree(f, x)
}

pub fn coeff(f: &Expr, x: &Symbol, n: u64) -> MathResult<Expr> {
    polyexpr::coeff(f, x, n)
}

/// The coefficient of the highest power of `x` present in `f`.
pub fn leading_coeff(f: &Expr, x: &Symbol) -> MathResult<Expr> {
    let d = degree(f, x)?;
    coeff(f, x, d)
}

pub fn resultant(a: &Expr, b: &Expr) -> MathResult<Expr> {
    polyops::resultant_expr(a, b)
}

pub fn roots(e: &Expr, precision: &Number) -> MathResult<Expr> {
    crate::roots::roots_expr(e, precision)
}

pub fn gcd(a: &Expr, b: &Expr) -> MathResult<Expr> {
    polyops::gcd_expr(a, b)
}

pub fn lcm(a: &Expr, b: &Expr) -> MathResult<Expr> {
    polyops::lcm_expr(a, b)
}

pub fn poly_add(a: &Expr, b: &Expr) -> MathResult<Expr> {
    let (vars, pa, pb) = polyexpr::normalize_to_poly_exprs(a, b)?;
    Ok(pa.add(&pb).to_expr(&vars))
}

pub fn poly_sub(a: &Expr, b: &Expr) -> MathResult<Expr> {
    let (vars, pa, pb) = polyexpr::normalize_to_poly_exprs(a, b)?;
    Ok(pa.sub(&pb).to_expr(&vars))
}

pub fn poly_mul(a: &Expr, b: &Expr) -> MathResult<Expr> {
    let (vars, pa, pb) = polyexpr::normalize_to_poly_exprs(a, b)?;
    Ok(pa.mul(&pb).to_expr(&vars))
}

/// `quo`, `rem`, and `div` (quotient paired with remainder) over ℚ: only
/// meaningful for a univariate `PolyExpr` — multivariate coefficients
/// are themselves polynomials, not field elements, so
/// [`polyops::div_rem_rational`] rejects those with a `DomainError`.
pub fn poly_quo(a: &Expr, b: &Expr) -> MathResult<Expr> {
    let (vars, pa, pb) = polyexpr::normalize_to_poly_exprs(a, b)?;
    let (q, _) = polyops::div_rem_rational(&pa, &pb)?;
    Ok(q.to_expr(&vars))
}

pub fn poly_rem(a: &Expr, b: &Expr) -> MathResult<Expr> {
    let (vars, pa, pb) = polyexpr::normalize_to_poly_exprs(a, b)?;
    let (_, r) = polyops::div_rem_rational(&pa, &pb)?;
    Ok(r.to_expr(&vars))
}

pub fn poly_div(a: &Expr, b: &Expr) -> MathResult<(Expr, Expr)> {
    let (vars, pa, pb) = polyexpr::normalize_to_poly_exprs(a, b)?;
    let (q, r) = polyops::div_rem_rational(&pa, &pb)?;
    Ok((q.to_expr(&vars), r.to_expr(&vars)))
}

// ---------------------------------------------------------------------
// Polynomial operations over GF(p)
// ---------------------------------------------------------------------

fn gf_pair(p: i64, a: &Expr, b: &Expr) -> MathResult<(Vec<Symbol>, GfPoly, GfPoly)> {
    let (vars, pa, pb) = polyexpr::normalize_to_poly_exprs(a, b)?;
    let ga = crate::gf::project(p, &pa)?;
    let gb = crate::gf::project(p, &pb)?;
    Ok((vars, ga, gb))
}

fn gf_to_expr(g: &GfPoly, vars: &[Symbol]) -> Expr {
    g.to_poly_expr().to_expr(vars)
}

pub fn gf_add(p: i64, a: &Expr, b: &Expr) -> MathResult<Expr> {
    let (vars, ga, gb) = gf_pair(p, a, b)?;
    Ok(gf_to_expr(&ga.add(&gb), &vars))
}

pub fn gf_sub(p: i64, a: &Expr, b: &Expr) -> MathResult<Expr> {
    let (vars, ga, gb) = gf_pair(p, a, b)?;
    Ok(gf_to_expr(&ga.sub(&gb), &vars))
}

pub fn gf_mul(p: i64, a: &Expr, b: &Expr) -> MathResult<Expr> {
    let (vars, ga, gb) = gf_pair(p, a, b)?;
    Ok(gf_to_expr(&ga.mul(&gb), &vars))
}

pub fn gf_quo(p: i64, a: &Expr, b: &Expr) -> MathResult<Expr> {
    let (vars, ga, gb) = gf_pair(p, a, b)?;
    Ok(gf_to_expr(&ga.quo(&gb)?, &vars))
}

pub fn gf_rem(p: i64, a: &Expr, b: &Expr) -> MathResult<Expr> {
    let (vars, ga, gb) = gf_pair(p, a, b)?;
    Ok(gf_to_expr(&ga.rem(&gb)?, &vars))
}

/// `div` over `GF(p)`: every nonzero element is invertible, so the
/// quotient is the whole answer (spec §4.6) — returned alongside the
/// (necessarily exact, but still computed) remainder for callers that
/// want to double-check divisibility.
pub fn gf_div(p: i64, a: &Expr, b: &Expr) -> MathResult<(Expr, Expr)> {
    let (vars, ga, gb) = gf_pair(p, a, b)?;
    let (q, r) = ga.div_rem(&gb)?;
    Ok((gf_to_expr(&q, &vars), gf_to_expr(&r, &vars)))
}

pub fn gf_gcd(p: i64, a: &Expr, b: &Expr) -> MathResult<Expr> {
    let (vars, ga, gb) = gf_pair(p, a, b)?;
    Ok(gf_to_expr(&ga.gcd(&gb)?, &vars))
}

pub fn gf_lcm(p: i64, a: &Expr, b: &Expr) -> MathResult<Expr> {
    let (vars, ga, gb) = gf_pair(p, a, b)?;
    if ga.is_zero() || gb.is_zero() {
        return Ok(gf_to_expr(&GfPoly::zero(p), &vars));
    }
    let g = ga.gcd(&gb)?;
    let product = ga.mul(&gb);
    Ok(gf_to_expr(&product.quo(&g)?, &vars))
}

// ---------------------------------------------------------------------
// Calculus
// ---------------------------------------------------------------------

pub fn derivative(e: &Expr, x: &Symbol) -> Expr {
    crate::calculus::derivative(e, x)
}

// ---------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------

pub fn to_string(e: &Expr) -> String {
    e.to_string()
}

/// A self-consistent LaTeX rendering (spec §6's `toLatex`) — not a
/// complete typesetting engine (spec §1 names that an external
/// collaborator's contract), just a `Display`-equivalent in LaTeX
/// syntax. `show_parens` forces explicit `\left( ... \right)` grouping
/// around every `Add` operand rather than only where precedence demands
/// it; `precision`, when given, renders a `Fraction` as a truncated
/// decimal instead of `\frac{num}{den}`.
pub fn to_latex(e: &Expr, show_parens: bool, precision: Option<usize>) -> String {
    latex::render(e, show_parens, precision)
}

mod latex {
    use super::*;

    pub(super) fn render(e: &Expr, show_parens: bool, precision: Option<usize>) -> String {
        match e {
            Expr::Number(n) => render_number(n, precision),
            Expr::Symbol(s) => s.name().to_string(),
            Expr::Infinity => r"\infty".to_string(),
            Expr::NegInfinity => r"-\infty".to_string(),
            Expr::Undefined => r"\text{undefined}".to_string(),
            Expr::Fail => r"\text{fail}".to_string(),
            Expr::Factorial(a) => format!("{}!", wrap(a, show_parens, precision)),
            Expr::Pow(b, e) => format!("{}^{{{}}}", wrap(b, show_parens, precision), render(e, show_parens, precision)),
            Expr::Div(a, b) => format!(r"\frac{{{}}}{{{}}}", render(a, show_parens, precision), render(b, show_parens, precision)),
            Expr::Sub(a, b) => format!("{} - {}", render(a, show_parens, precision), wrap(b, show_parens, precision)),
            Expr::Sqrt(radicand, index) => match &**index {
                Expr::Number(Number::Integer(n)) if *n == BigInt::from(2i64) => {
                    format!(r"\sqrt{{{}}}", render(radicand, show_parens, precision))
                }
                _ => format!(r"\sqrt[{}]{{{}}}", render(index, show_parens, precision), render(radicand, show_parens, precision)),
            },
            Expr::Function { name, args } => {
                let rendered_args: Vec<String> = args.iter().map(|a| render(a, show_parens, precision)).collect();
                match latex_macro(name) {
                    Some(cmd) if args.len() == 1 => format!(r"{cmd}\left({}\right)", rendered_args[0]),
                    _ => format!(r"\mathrm{{{name}}}\left({}\right)", rendered_args.join(", ")),
                }
            }
            Expr::List(items) => {
                let rendered: Vec<String> = items.iter().map(|i| render(i, show_parens, precision)).collect();
                format!(r"\left[{}\right]", rendered.join(", "))
            }
            Expr::Add(terms) => {
                terms.iter().enumerate().map(|(i, t)| {
                    let rendered = render(t, show_parens, precision);
                    if i == 0 { rendered } else { format!(" + {rendered}") }
                }).collect()
            }
            Expr::Mul(factors) => {
                factors.iter().map(|f| wrap(f, show_parens, precision)).collect::<Vec<_>>().join(" \\cdot ")
            }
        }
    }

    fn wrap(e: &Expr, show_parens: bool, precision: Option<usize>) -> String {
        let rendered = render(e, show_parens, precision);
        let needs_parens = show_parens || matches!(e, Expr::Add(_) | Expr::Sub(_, _));
        if needs_parens {
            format!(r"\left({rendered}\right)")
        } else {
            rendered
        }
    }

    fn render_number(n: &Number, precision: Option<usize>) -> String {
        match (n, precision) {
            (Number::Integer(v), _) => v.to_string(),
            (Number::Rational(num, den), None) => {
                if num.is_negative() {
                    format!(r"-\frac{{{}}}{{{}}}", num.abs(), den)
                } else {
                    format!(r"\frac{{{num}}}{{{den}}}")
                }
            }
            (Number::Rational(_, _), Some(digits)) => decimal_string(n, digits),
        }
    }

    /// Long-division decimal expansion to `digits` fractional places,
    /// truncated (not rounded) — adequate for a display-only collaborator
    /// contract, not a numeric library.
    fn decimal_string(n: &Number, digits: usize) -> String {
        let negative = n.is_negative();
        let num = n.numerator();
        let num = if negative { num.neg() } else { num };
        let den = n.denominator();
        let (int_part, mut rem) = num.div_rem(&den).expect("nonzero denominator");
        let mut out = String::new();
        if negative && !(int_part.is_zero() && rem.is_zero()) {
            out.push('-');
        }
        out.push_str(&int_part.to_string());
        if digits > 0 {
            out.push('.');
            let ten = BigInt::from(10i64);
            for _ in 0..digits {
                rem = rem.mul(&ten);
                let (digit, next_rem) = rem.div_rem(&den).expect("nonzero denominator");
                out.push_str(&digit.to_string());
                rem = next_rem;
            }
        }
        out
    }

    fn latex_macro(name: &str) -> Option<&'static str> {
        Some(match name {
            "sin" => r"\sin",
            "cos" => r"\cos",
            "tan" => r"\tan",
            "csc" => r"\csc",
            "sec" => r"\sec",
            "cot" => r"\cot",
            "asin" => r"\arcsin",
            "acos" => r"\arccos",
            "atan" => r"\arctan",
            "sinh" => r"\sinh",
            "cosh" => r"\cosh",
            "tanh" => r"\tanh",
            "ln" => r"\ln",
            "exp" => r"\exp",
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::kind_mask;

    fn x() -> Symbol {
        Symbol::new("x")
    }

    #[test]
    fn construction_round_trips_through_to_string() {
        let e = int_from_string("42").unwrap();
        assert_eq!(to_string(&e), "42");
        assert_eq!(int_from_long(-7), c::integer(-7));
    }

    #[test]
    fn arithmetic_combinators_build_raw_nodes_then_reduce() {
        let e = add(vec![symbol("x"), int_from_long(1)]);
        assert!(is(&e, kind_mask::ADD));
        assert_eq!(reduce(&mul(vec![int_from_long(2), int_from_long(3)])), int_from_long(6));
    }

    #[test]
    fn inspection_matches_expr_access() {
        let e = pow(symbol("x"), int_from_long(2));
        assert_eq!(kind_of(&e), Kind::Pow);
        assert_eq!(get_operand(&e, 1), Some(int_from_long(2)));
    }

    #[test]
    fn end_to_end_scenarios_from_the_operation_list() {
        let lhs: Expr = "(x + 1) * (x - 1) - (x^2 - 1)".parse().unwrap();
        assert_eq!(reduce(&lhs), int_from_long(0));

        let expanded: Expr = "(x + 2) * (x + 3) * (x + 4)".parse().unwrap();
        let expected: Expr = "x^3 + 9*x^2 + 26*x + 24".parse().unwrap();
        assert_eq!(expand(&expanded), reduce(&expected));

        let factored: Expr = "x^4 - 1".parse().unwrap();
        let expected_factors: Expr = "(x - 1) * (x + 1) * (x^2 + 1)".parse().unwrap();
        assert_eq!(factor(&factored).unwrap(), reduce(&expected_factors));

        let f: Expr = "x^3 - x".parse().unwrap();
        let g: Expr = "x^2 - 1".parse().unwrap();
        assert_eq!(gcd(&f, &g).unwrap(), reduce(&g));

        let sinx2: Expr = "sin(x^2)".parse().unwrap();
        let expected_derivative: Expr = "2*x*cos(x^2)".parse().unwrap();
        assert_eq!(derivative(&sinx2, &x()), reduce(&expected_derivative));

        let res_f: Expr = "x^2 - y".parse().unwrap();
        let res_g: Expr = "x - y^2".parse().unwrap();
        let expected_resultant: Expr = "y^4 - y".parse().unwrap();
        assert_eq!(resultant(&res_f, &res_g).unwrap(), reduce(&expected_resultant));

        let twenty = int_from_long(20);
        let fact = reduce(&c::factorial(twenty));
        assert_eq!(fact, int_from_string("2432902008176640000").unwrap());
    }

    #[test]
    fn factor_and_expand_rebuilds_the_expanded_tree_from_the_factored_form() {
        let e: Expr = "x^4 - 1".parse().unwrap();
        let factored = factor(&e).unwrap();
        assert_eq!(factor_and_expand(&e).unwrap(), expand(&factored));
        assert_eq!(factor_and_expand(&e).unwrap(), reduce(&e));
    }

    #[test]
    fn trig_constructors_build_function_nodes() {
        let e = sin(symbol("x"));
        assert!(is(&e, kind_mask::FUNCTION));
        assert_eq!(to_string(&e), "sin(x)");
    }

    #[test]
    fn gf_arithmetic_matches_modular_reduction() {
        let a: Expr = "x^2 + 3".parse().unwrap();
        let b: Expr = "x + 1".parse().unwrap();
        let sum = gf_add(5, &a, &b).unwrap();
        let expected: Expr = "x^2 + x + 4".parse().unwrap();
        assert_eq!(sum, expected);
    }

    #[test]
    fn poly_quo_and_rem_match_true_division() {
        let f: Expr = "x^2 - 1".parse().unwrap();
        let g: Expr = "x - 1".parse().unwrap();
        assert_eq!(poly_quo(&f, &g).unwrap(), reduce(&"x + 1".parse().unwrap()));
        assert_eq!(poly_rem(&f, &g).unwrap(), int_from_long(0));
    }

    #[test]
    fn to_latex_renders_fractions_and_functions() {
        let e: Expr = "1/2 + sin(x)".parse().unwrap();
        let reduced = reduce(&e);
        let latex = to_latex(&reduced, false, None);
        assert!(latex.contains(r"\frac{1}{2}"));
        assert!(latex.contains(r"\sin\left(x\right)"));
    }

    #[test]
    fn to_latex_with_precision_renders_decimal() {
        let e = c::rational(1, 4);
        assert_eq!(to_latex(&e, false, Some(2)), "0.25");
    }
}
