//! `Display` and a small recursive-descent parser (`FromStr`) so
//! expressions round-trip through text for tests and the facade's
//! `to_string`/`parse` pair (spec §6).

use super::Expr;
use crate::bigint::BigInt;
use crate::number::Number;
use std::fmt;
use std::str::FromStr;

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{n}"),
            Expr::Symbol(s) => write!(f, "{s}"),
            Expr::Infinity => write!(f, "oo"),
            Expr::NegInfinity => write!(f, "-oo"),
            Expr::Undefined => write!(f, "undefined"),
            Expr::Fail => write!(f, "fail"),
            Expr::Factorial(a) => write!(f, "{}!", Paren(a)),
            Expr::Pow(b, e) => write!(f, "{}^{}", Paren(b), Paren(e)),
            Expr::Div(a, b) => write!(f, "{}/{}", Paren(a), Paren(b)),
            Expr::Sub(a, b) => write!(f, "{} - {}", a, Paren(b)),
            Expr::Sqrt(radicand, index) => match &**index {
                Expr::Number(Number::Integer(n)) if *n == BigInt::from(2i64) => {
                    write!(f, "sqrt({radicand})")
                }
                _ => write!(f, "root({radicand}, {index})"),
            },
            Expr::Function { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
            Expr::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Expr::Add(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    if i == 0 {
                        write!(f, "{term}")?;
                    } else {
                        write!(f, " + {term}")?;
                    }
                }
                Ok(())
            }
            Expr::Mul(factors) => {
                for (i, factor) in factors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "*")?;
                    }
                    write!(f, "{}", Paren(factor))?;
                }
                Ok(())
            }
        }
    }
}

/// Wraps sub-expressions in parentheses when their top-level kind binds
/// looser than the context they're printed in (any `Add`/`Sub`).
struct Paren<'a>(&'a Expr);

impl fmt::Display for Paren<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Expr::Add(_) | Expr::Sub(_, _) => write!(f, "({})", self.0),
            other => write!(f, "{other}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseExprError(String);

impl fmt::Display for ParseExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not parse expression: {}", self.0)
    }
}
impl std::error::Error for ParseExprError {}

impl FromStr for Expr {
    type Err = ParseExprError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = lex(s).map_err(ParseExprError)?;
        let mut parser = Parser { tokens, pos: 0 };
        let e = parser.parse_add()?;
        if parser.pos != parser.tokens.len() {
            return Err(ParseExprError(format!("trailing input at token {}", parser.pos)));
        }
        Ok(e)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(String),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Bang,
    LParen,
    RParen,
    Comma,
}

fn lex(s: &str) -> Result<Vec<Token>, String> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' | '\n' | '\r' => i += 1,
            '+' => { out.push(Token::Plus); i += 1 }
            '-' => { out.push(Token::Minus); i += 1 }
            '*' => { out.push(Token::Star); i += 1 }
            '/' => { out.push(Token::Slash); i += 1 }
            '^' => { out.push(Token::Caret); i += 1 }
            '!' => { out.push(Token::Bang); i += 1 }
            '(' => { out.push(Token::LParen); i += 1 }
            ')' => { out.push(Token::RParen); i += 1 }
            ',' => { out.push(Token::Comma); i += 1 }
            c if c.is_ascii_digit() => {
                let start = i;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
                out.push(Token::Number(chars[start..i].iter().collect()));
            }
            c if c.is_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                out.push(Token::Ident(chars[start..i].iter().collect()));
            }
            other => return Err(format!("unexpected character '{other}'")),
        }
    }
    Ok(out)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<Token> {
        let t = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        t
    }

    fn expect(&mut self, t: &Token) -> Result<(), ParseExprError> {
        if self.peek() == Some(t) {
            self.pos += 1;
            Ok(())
        } else {
            Err(ParseExprError(format!("expected {t:?} at token {}", self.pos)))
        }
    }

    // additive: mul (('+' | '-') mul)*
    fn parse_add(&mut self) -> Result<Expr, ParseExprError> {
        let mut terms = vec![self.parse_mul()?];
        let mut is_add = vec![true];
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.bump();
                    terms.push(self.parse_mul()?);
                    is_add.push(true);
                }
                Some(Token::Minus) => {
                    self.bump();
                    terms.push(self.parse_mul()?);
                    is_add.push(false);
                }
                _ => break,
            }
        }
        if terms.len() == 1 {
            return Ok(terms.pop().unwrap());
        }
        let mut iter = terms.into_iter().zip(is_add.into_iter());
        let (first, _) = iter.next().unwrap();
        let mut result = first;
        for (term, positive) in iter {
            result = if positive {
                super::constructors::add(vec![result, term])
            } else {
                super::constructors::sub(result, term)
            };
        }
        Ok(result)
    }

    // mul: unary (('*' | '/') unary)*
    fn parse_mul(&mut self) -> Result<Expr, ParseExprError> {
        let mut result = self.parse_unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.bump();
                    let rhs = self.parse_unary()?;
                    result = match result {
                        Expr::Mul(mut factors) => {
                            factors.push(rhs);
                            Expr::Mul(factors)
                        }
                        other => super::constructors::mul(vec![other, rhs]),
                    };
                }
                Some(Token::Slash) => {
                    self.bump();
                    let rhs = self.parse_unary()?;
                    result = super::constructors::div(result, rhs);
                }
                _ => break,
            }
        }
        Ok(result)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseExprError> {
        if self.peek() == Some(&Token::Minus) {
            self.bump();
            let operand = self.parse_unary()?;
            return Ok(super::constructors::neg(operand));
        }
        self.parse_pow()
    }

    // pow: postfix ('^' unary)?   (right-associative)
    fn parse_pow(&mut self) -> Result<Expr, ParseExprError> {
        let base = self.parse_postfix()?;
        if self.peek() == Some(&Token::Caret) {
            self.bump();
            let exp = self.parse_unary()?;
            return Ok(super::constructors::pow(base, exp));
        }
        Ok(base)
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseExprError> {
        let mut e = self.parse_atom()?;
        while self.peek() == Some(&Token::Bang) {
            self.bump();
            e = super::constructors::factorial(e);
        }
        Ok(e)
    }

    fn parse_atom(&mut self) -> Result<Expr, ParseExprError> {
        match self.bump() {
            Some(Token::Number(digits)) => {
                let n = BigInt::from_decimal_str(&digits)
                    .map_err(|e| ParseExprError(e.to_string()))?;
                Ok(super::constructors::integer(n))
            }
            Some(Token::Ident(name)) => {
                if self.peek() == Some(&Token::LParen) {
                    self.bump();
                    let mut args = Vec::new();
                    if self.peek() != Some(&Token::RParen) {
                        args.push(self.parse_add()?);
                        while self.peek() == Some(&Token::Comma) {
                            self.bump();
                            args.push(self.parse_add()?);
                        }
                    }
                    self.expect(&Token::RParen)?;
                    if name == "sqrt" && args.len() == 1 {
                        Ok(super::constructors::sqrt(args.remove(0)))
                    } else {
                        Ok(super::constructors::function(name, args))
                    }
                } else if name == "oo" {
                    Ok(Expr::Infinity)
                } else if name == "undefined" {
                    Ok(Expr::Undefined)
                } else {
                    Ok(super::constructors::symbol(name))
                }
            }
            Some(Token::LParen) => {
                let e = self.parse_add()?;
                self.expect(&Token::RParen)?;
                Ok(e)
            }
            other => Err(ParseExprError(format!("unexpected token {other:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::constructors as c;

    #[test]
    fn displays_sum_and_product() {
        let e = c::add(vec![c::symbol("x"), c::integer(1)]);
        assert_eq!(e.to_string(), "x + 1");
    }

    #[test]
    fn parses_and_round_trips_polynomial() {
        let text = "x^2 + 2*x + 1";
        let e: Expr = text.parse().unwrap();
        assert_eq!(e.to_string(), text);
    }

    #[test]
    fn parses_function_calls_and_sqrt() {
        let e: Expr = "sin(x) + sqrt(y)".parse().unwrap();
        assert_eq!(e.to_string(), "sin(x) + sqrt(y)");
    }

    #[test]
    fn unary_minus_desugars_to_negative_one_times() {
        let e: Expr = "-x".parse().unwrap();
        assert_eq!(e, c::mul(vec![c::integer(-1), c::symbol("x")]));
    }

    #[test]
    fn rejects_garbage_input() {
        assert!("x +".parse::<Expr>().is_err());
        assert!("(x".parse::<Expr>().is_err());
    }
}
