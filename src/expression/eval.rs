use log::trace;
use num_bigint::BigInt;
use num_rational::BigRational;

use crate::expression::ast::Expression;
use crate::numeric::{
    ArithmeticError, checked_add, checked_div, checked_mul, checked_pow, checked_sub,
};
use crate::pool::Operator;

fn apply(
    operator: Operator,
    left: &BigRational,
    right: &BigRational,
) -> Result<BigRational, ArithmeticError> {
    match operator {
        Operator::Add => checked_add(left, right),
        Operator::Sub => checked_sub(left, right),
        Operator::Mul => checked_mul(left, right),
        Operator::Div => checked_div(left, right),
        Operator::Pow => checked_pow(left, right),
    }
}

impl Expression {
    /// Evaluate bottom-up with exact rational arithmetic.
    ///
    /// # Errors
    ///
    /// Returns an error when the tree:
    /// - divides by a subexpression that evaluates to zero
    /// - raises to a non-integer power
    /// - produces a value beyond the supported magnitude
    pub fn evaluate(&self) -> Result<BigRational, ArithmeticError> {
        match self {
            Expression::Constant(n) => Ok(BigRational::from_integer(BigInt::from(*n))),
            Expression::Binary(op, l, r) => {
                let left = l.evaluate()?;
                let right = r.evaluate()?;
                let result = apply(*op, &left, &right);
                if let Err(e) = &result {
                    trace!("{} {} {} failed: {}", left, op, right, e);
                }
                result
            }
        }
    }
}
