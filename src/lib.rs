//! `algexact`: an exact symbolic computer algebra kernel.
//!
//! Component layering (spec §2): arbitrary-precision integers
//! ([`bigint`]) and exact rationals ([`number`]) underlie the tagged
//! expression tree ([`expr`]), which the canonicalizing reducer
//! ([`reduce`]) puts into normal form. [`polyexpr`] re-views a reduced
//! expression as a recursive multivariate polynomial for [`polyops`]
//! (gcd/lcm/resultant), [`gf`] (finite-field arithmetic), [`factor`]
//! (rational factorization via Hensel lifting), and [`roots`] (real-root
//! isolation). [`calculus`] differentiates directly on the expression
//! tree. [`facade`] re-exports the whole public surface as a flat set of
//! free functions.

pub mod bigint;
pub mod calculus;
pub mod error;
pub mod expr;
pub mod facade;
pub mod factor;
pub mod gf;
pub mod number;
pub mod polyexpr;
pub mod polyops;
pub mod reduce;
pub mod roots;
pub mod symbol;

/// Re-exports the full façade surface plus the core value types, so
/// `use algexact::prelude::*;` is enough for typical callers (spec §6).
pub mod prelude {
    pub use crate::bigint::BigInt;
    pub use crate::error::{MathError, MathResult};
    pub use crate::expr::{kind_mask, Expr, Kind};
    pub use crate::facade::*;
    pub use crate::number::Number;
    pub use crate::symbol::Symbol;
}
