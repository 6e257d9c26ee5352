use log::trace;
use rand::Rng;

use crate::expression::ast::Expression;
use crate::expression::errors::BuildError;
use crate::pool::{Operator, OperatorPool, TermPool};

/// Upper bound on operator/term redraws while avoiding a zero divisor
pub const MAX_DIVISOR_REDRAWS: usize = 64;

/// Builds random expression trees with a fixed number of operations
#[derive(Debug, Clone, Copy)]
pub struct ExpressionBuilder<'a> {
    operations: usize,
    terms: &'a TermPool,
    operators: &'a OperatorPool,
}

impl<'a> ExpressionBuilder<'a> {
    /// # Errors
    ///
    /// Returns an error if `operations` is zero or either pool is empty.
    pub fn new(
        operations: usize,
        terms: &'a TermPool,
        operators: &'a OperatorPool,
    ) -> Result<Self, BuildError> {
        if operations == 0 {
            return Err(BuildError::NoOperations);
        }
        if terms.is_empty() {
            return Err(BuildError::EmptyTermPool);
        }
        if operators.is_empty() {
            return Err(BuildError::EmptyOperatorPool);
        }
        Ok(Self {
            operations,
            terms,
            operators,
        })
    }

    pub fn operations(&self) -> usize {
        self.operations
    }

    /// Draw an operator and the term that will be its right operand, redrawing
    /// both while the pair would divide by a literal zero.
    fn draw_right_operand<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<(Operator, i64), BuildError> {
        for _ in 0..MAX_DIVISOR_REDRAWS {
            let op = self.operators.pick(rng);
            let term = self.terms.pick(rng);
            if op != Operator::Div || term != 0 {
                return Ok((op, term));
            }
            trace!("Redrawing zero divisor");
        }
        Err(BuildError::DivisorRedrawsExhausted(MAX_DIVISOR_REDRAWS))
    }

    /// Build one random tree with exactly `operations` operator nodes.
    ///
    /// Each operation after the first extends the accumulated tree on a fair
    /// coin flip: to the right (`acc op term`) or to the left (`term op acc`).
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::DivisorRedrawsExhausted`] if no usable divisor was
    /// drawn within [`MAX_DIVISOR_REDRAWS`] attempts; the caller should start a
    /// fresh expression.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Expression, BuildError> {
        let left = self.terms.pick(rng);
        let (op, right) = self.draw_right_operand(rng)?;
        let mut expression =
            Expression::binary(op, Expression::Constant(left), Expression::Constant(right));

        for _ in 1..self.operations {
            expression = if rng.gen_bool(0.5) {
                let (op, term) = self.draw_right_operand(rng)?;
                Expression::binary(op, expression, Expression::Constant(term))
            } else {
                // The divisor here is the accumulated tree, so there is no
                // literal to check; a zero value surfaces at evaluation.
                let op = self.operators.pick(rng);
                let term = self.terms.pick(rng);
                Expression::binary(op, Expression::Constant(term), expression)
            };
        }

        Ok(expression)
    }
}
