//! Numeric domain shared by the expression-tree evaluator (exact rationals)
//! and the postfix engine (arbitrary-precision integers)

mod errors;
mod format;
mod integer;
mod parse;
mod rational;

pub use errors::{ArithmeticError, ParseNumberError};
pub use format::format_value;
pub use integer::{MAX_INTEGER_EXPONENT, MAX_INTEGER_RESULT_BITS, div_truncate, pow_integer};
pub use parse::parse_rational;
pub use rational::{
    MAX_EXPONENT, MAX_MAGNITUDE_BITS, checked_add, checked_div, checked_mul, checked_pow,
    checked_sub, within_limits,
};
