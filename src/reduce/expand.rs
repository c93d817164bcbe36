//! `expand` (spec §4.3): distributes multiplication over addition, applies
//! multinomial expansion to non-negative integer powers of a sum, and
//! lifts a `DIV` whose numerator is a sum through to each term. Always
//! followed by a `reduce` pass.

use super::reduce;
use crate::expr::constructors as c;
use crate::expr::Expr;
use crate::number::Number;

pub fn expand(e: &Expr) -> Expr {
    reduce(&expand_inner(e))
}

fn expand_inner(e: &Expr) -> Expr {
    match e {
        Expr::Add(terms) => c::add(terms.iter().map(expand_inner).collect()),
        Expr::Mul(factors) => {
            let expanded: Vec<Expr> = factors.iter().map(expand_inner).collect();
            expanded.into_iter().fold(c::integer(1), |acc, f| distribute(&acc, &f))
        }
        Expr::Div(num, den) => {
            let num = expand_inner(num);
            let den = expand_inner(den);
            match &num {
                Expr::Add(terms) => {
                    c::add(terms.iter().map(|t| c::div(t.clone(), den.clone())).collect())
                }
                _ => c::div(num, den),
            }
        }
        Expr::Sub(a, b) => c::add(vec![expand_inner(a), c::neg(expand_inner(b))]),
        Expr::Pow(base, exp) => {
            let base = expand_inner(base);
            if let Expr::Number(Number::Integer(n)) = exp.as_ref() {
                if let Some(k) = n.to_u64() {
                    if let Expr::Add(terms) = &base {
                        return multinomial_expand(terms, k);
                    }
                }
            }
            c::pow(base, (**exp).clone())
        }
        Expr::Sqrt(radicand, index) => c::root(expand_inner(radicand), (**index).clone()),
        Expr::Factorial(a) => c::factorial(expand_inner(a)),
        Expr::Function { name, args } => c::function(name.clone(), args.iter().map(expand_inner).collect()),
        Expr::List(items) => Expr::List(Box::new(items.iter().map(expand_inner).collect())),
        other => other.clone(),
    }
}

/// `(a + b)*(c + d) -> a*c + a*d + b*c + b*d`, generalized to `lhs` and
/// `rhs` each being an arbitrary (already-expanded) expression.
fn distribute(lhs: &Expr, rhs: &Expr) -> Expr {
    let lhs_terms: Vec<Expr> = match lhs {
        Expr::Add(terms) => terms.as_ref().clone(),
        other => vec![other.clone()],
    };
    let rhs_terms: Vec<Expr> = match rhs {
        Expr::Add(terms) => terms.as_ref().clone(),
        other => vec![other.clone()],
    };
    let mut products = Vec::with_capacity(lhs_terms.len() * rhs_terms.len());
    for l in &lhs_terms {
        for r in &rhs_terms {
            products.push(c::mul(vec![l.clone(), r.clone()]));
        }
    }
    c::add(products)
}

/// Expands `(t_0 + t_1 + ... + t_{m-1})^k` via repeated `distribute`
/// rather than the closed-form multinomial coefficient formula — `k` is
/// small in practice (bounded polynomial degrees), and this reuses the
/// same flattening `distribute` already provides.
fn multinomial_expand(terms: &[Expr], k: u64) -> Expr {
    if k == 0 {
        return c::integer(1);
    }
    let sum = c::add(terms.to_vec());
    let mut acc = sum.clone();
    for _ in 1..k {
        acc = distribute(&acc, &sum);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::constructors as c;

    #[test]
    fn expands_product_of_three_binomials() {
        let x = c::symbol("x");
        let e = c::mul(vec![
            c::add(vec![x.clone(), c::integer(2)]),
            c::add(vec![x.clone(), c::integer(3)]),
            c::add(vec![x.clone(), c::integer(4)]),
        ]);
        let expected: Expr = "x^3 + 9*x^2 + 26*x + 24".parse().unwrap();
        assert_eq!(expand(&e), reduce(&expected));
    }

    #[test]
    fn expands_square_of_binomial() {
        let x = c::symbol("x");
        let e = c::pow(c::add(vec![x.clone(), c::integer(1)]), c::integer(2));
        let expected: Expr = "x^2 + 2*x + 1".parse().unwrap();
        assert_eq!(expand(&e), reduce(&expected));
    }

    #[test]
    fn lifts_division_through_a_sum_numerator() {
        let x = c::symbol("x");
        let e = c::div(c::add(vec![x.clone(), c::integer(1)]), c::integer(2));
        let expected: Expr = "x/2 + 1/2".parse().unwrap();
        assert_eq!(expand(&e), reduce(&expected));
    }
}
