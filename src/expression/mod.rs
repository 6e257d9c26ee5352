//! Random expression trees: building, evaluation and rendering

mod ast;
mod builder;
mod display;
mod equation;
mod errors;
mod eval;

pub use ast::Expression;
pub use builder::{ExpressionBuilder, MAX_DIVISOR_REDRAWS};
pub use display::{Postfix, Rendered};
pub use equation::Equation;
pub use errors::BuildError;

#[cfg(test)]
mod tests;
