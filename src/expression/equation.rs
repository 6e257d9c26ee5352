use std::cell::OnceCell;
use std::fmt;

use num_rational::BigRational;

use crate::expression::ast::Expression;
use crate::numeric::{ArithmeticError, format_value};
use crate::pool::OperatorPool;

/// An expression checked against a round's target.
///
/// The value is computed on first use and cached; later queries (`value`,
/// `is_solution`, `Display`) read the cache.
#[derive(Debug)]
pub struct Equation<'a> {
    expression: Expression,
    target: &'a BigRational,
    operators: &'a OperatorPool,
    value: OnceCell<Result<BigRational, ArithmeticError>>,
}

impl<'a> Equation<'a> {
    pub fn new(expression: Expression, target: &'a BigRational, operators: &'a OperatorPool) -> Self {
        Self {
            expression,
            target,
            operators,
            value: OnceCell::new(),
        }
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn value(&self) -> &Result<BigRational, ArithmeticError> {
        self.value.get_or_init(|| self.expression.evaluate())
    }

    pub fn is_solution(&self) -> bool {
        matches!(self.value(), Ok(value) if value == self.target)
    }

    /// The expression text without the `= value` suffix
    pub fn expression_text(&self) -> String {
        self.expression.render(self.operators).to_string()
    }
}

impl fmt::Display for Equation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rendered = self.expression.render(self.operators);
        match self.value() {
            Ok(value) => write!(f, "{} = {}", rendered, format_value(value)),
            Err(e) => write!(f, "{} = <{}>", rendered, e),
        }
    }
}
