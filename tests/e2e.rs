//! End-to-end scenarios exercising the façade as an external caller would:
//! parse, transform, compare against the expected reduced form.

use algexact::prelude::*;
use std::str::FromStr;

#[test]
fn expanding_a_difference_of_squares_identity_reduces_to_zero() {
    let e = Expr::from_str("(x + 1) * (x - 1) - (x^2 - 1)").unwrap();
    let r = reduce(&expand(&e));
    assert_eq!(r, Expr::Number(Number::zero()));
}

#[test]
fn expanding_a_triple_product_matches_the_multiplied_out_polynomial() {
    let e = Expr::from_str("(x + 2) * (x + 3) * (x + 4)").unwrap();
    let lhs = reduce(&expand(&e));
    let rhs = reduce(&expand(&Expr::from_str("x^3 + 9*x^2 + 26*x + 24").unwrap()));
    assert_eq!(lhs, rhs);
}

#[test]
fn factoring_x_to_the_fourth_minus_one_splits_into_four_linear_and_irreducible_factors() {
    let e = Expr::from_str("x^4 - 1").unwrap();
    let factored = factor(&e).unwrap();
    let expected = reduce(&expand(&Expr::from_str("(x - 1) * (x + 1) * (x^2 + 1)").unwrap()));
    assert_eq!(reduce(&expand(&factored)), expected);
}

#[test]
fn gcd_of_x_cubed_minus_x_and_x_squared_minus_one_is_x_squared_minus_one() {
    let f = Expr::from_str("x^3 - x").unwrap();
    let g = Expr::from_str("x^2 - 1").unwrap();
    let d = gcd(&f, &g).unwrap();
    // gcd is only defined up to a unit scalar; check that d divides both
    // f and g with zero remainder, and has the expected degree.
    let r1 = poly_rem(&f, &d).unwrap();
    let r2 = poly_rem(&g, &d).unwrap();
    assert_eq!(reduce(&r1), Expr::Number(Number::zero()));
    assert_eq!(reduce(&r2), Expr::Number(Number::zero()));
    assert_eq!(degree(&d, &Symbol::new("x")).unwrap(), 2);
}

#[test]
fn derivative_of_sin_of_x_squared_is_two_x_cos_x_squared() {
    let e = Expr::from_str("sin(x^2)").unwrap();
    let x = Symbol::new("x");
    let d = derivative(&e, &x);
    let expected = Expr::from_str("2 * x * cos(x^2)").unwrap();
    assert_eq!(reduce(&expand(&d)), reduce(&expand(&expected)));
}

#[test]
fn resultant_of_x_squared_minus_y_and_x_minus_y_squared_is_y_to_the_fourth_minus_y() {
    let f = Expr::from_str("x^2 - y").unwrap();
    let g = Expr::from_str("x - y^2").unwrap();
    let r = resultant(&f, &g).unwrap();
    let expected = reduce(&expand(&Expr::from_str("y^4 - y").unwrap()));
    assert_eq!(reduce(&expand(&r)), expected);
}

#[test]
fn factorial_of_twenty_matches_the_known_big_integer() {
    let twenty_fact = BigInt::factorial(20);
    assert_eq!(twenty_fact.to_string(), "2432902008176640000");
}
