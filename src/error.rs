//! Error taxonomy for operations that can fail outside the "always total"
//! algebraic core (spec §7).
//!
//! Mathematically meaningful "no answer" results — `0/0`, `0^0` — are
//! *not* represented here: they become the `Expr::Undefined` sentinel so
//! the reducer can keep propagating them structurally. `MathError` is
//! reserved for precondition violations and failures a caller must
//! actually branch on.

use crate::expr::Expr;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum MathError {
    /// A precondition on an operand was violated, e.g. `replace`'s key
    /// argument was not a `Symbol`.
    InvalidArgument { operation: String, reason: String },

    /// An expression could not be normalized into a `PolyExpr` against
    /// the requested variable list.
    NotAPolynomial { expression: Expr, reason: String },

    /// An operation is invalid in the active coefficient domain, e.g.
    /// `GF(p)` requested with a non-prime `p`.
    DomainError { operation: String, reason: String },

    /// Division by zero, or an integer-only operation applied to a
    /// non-integer value.
    ArithmeticError { operation: String },

    DivisionByZero,

    /// Internal inconsistency that should never occur in practice.
    Fail { context: String },
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathError::InvalidArgument { operation, reason } => {
                write!(f, "invalid argument to {operation}: {reason}")
            }
            MathError::NotAPolynomial { expression, reason } => {
                write!(f, "not a polynomial ({reason}): {expression}")
            }
            MathError::DomainError { operation, reason } => {
                write!(f, "domain error in {operation}: {reason}")
            }
            MathError::ArithmeticError { operation } => {
                write!(f, "arithmetic error in {operation}")
            }
            MathError::DivisionByZero => write!(f, "division by zero"),
            MathError::Fail { context } => write!(f, "internal failure: {context}"),
        }
    }
}

impl std::error::Error for MathError {}

pub type MathResult<T> = Result<T, MathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_readable_messages() {
        let err = MathError::DomainError {
            operation: "gf_project".to_string(),
            reason: "modulus is not prime".to_string(),
        };
        assert!(err.to_string().contains("domain error"));
    }
}
