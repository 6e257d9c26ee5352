use thiserror::Error;

/// Failures shared by the expression-tree evaluator and the postfix engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Result exceeds the supported magnitude")]
    Overflow,
    #[error("Exponent must be an integer")]
    NonIntegerExponent,
    #[error("Exponent must not be negative")]
    NegativeExponent,
    #[error("Exponent {0} is too large")]
    ExponentTooLarge(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseNumberError {
    #[error("Number cannot be empty")]
    Empty,
    #[error("Not a decimal or fractional number: '{0}'")]
    Invalid(String),
    #[error("Denominator cannot be zero: '{0}'")]
    ZeroDenominator(String),
}
