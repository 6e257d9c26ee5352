use log::debug;
use num_bigint::BigInt;

use crate::numeric::{ArithmeticError, div_truncate, pow_integer};
use crate::pool::Operator;
use crate::postfix::errors::PostfixError;
use crate::postfix::lexer::{Token, check_arity, tokenize};

/// Integer semantics of one operator; division truncates toward zero.
pub(crate) fn apply(
    operator: Operator,
    left: &BigInt,
    right: &BigInt,
) -> Result<BigInt, ArithmeticError> {
    match operator {
        Operator::Add => Ok(left + right),
        Operator::Sub => Ok(left - right),
        Operator::Mul => Ok(left * right),
        Operator::Div => div_truncate(left, right),
        Operator::Pow => pow_integer(left, right),
    }
}

/// Evaluate a postfix expression such as `"5 1 2 + 4 * + 3 -"` in one pass.
///
/// The first value popped for an operator is its right operand.
///
/// # Errors
///
/// Returns a [`PostfixError`] for malformed input (checked before any
/// arithmetic runs) or for an arithmetic failure such as division by zero.
pub fn evaluate(input: &str) -> Result<BigInt, PostfixError> {
    let tokens = tokenize(input)?;
    let max_depth = check_arity(&tokens)?;

    let mut stack: Vec<BigInt> = Vec::with_capacity(max_depth);
    for (position, token) in tokens.into_iter().enumerate() {
        match token {
            Token::Number(value) => stack.push(value),
            Token::Operator(op) => {
                let (Some(right), Some(left)) = (stack.pop(), stack.pop()) else {
                    return Err(PostfixError::InsufficientOperands {
                        operator: op.symbol(),
                        position,
                    });
                };
                stack.push(apply(op, &left, &right)?);
            }
        }
    }

    let depth = stack.len();
    match (stack.pop(), depth) {
        (Some(value), 1) => {
            debug!("Postfix '{}' evaluated to {}", input.trim(), value);
            Ok(value)
        }
        _ => Err(PostfixError::UnbalancedStack { depth }),
    }
}
