use thiserror::Error;

use crate::numeric::ArithmeticError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PostfixError {
    #[error("Postfix expression must not be empty or whitespace")]
    Empty,
    #[error("Unrecognized character '{character}' in token {position} ('{token}')")]
    InvalidCharacter {
        token: String,
        character: char,
        position: usize,
    },
    #[error("Operators and operands must be separated by a space: '{token}' (token {position})")]
    MalformedToken { token: String, position: usize },
    #[error("Operator '{operator}' at token {position} needs two operands")]
    InsufficientOperands { operator: char, position: usize },
    #[error("Expression leaves {depth} values on the stack, expected exactly one")]
    UnbalancedStack { depth: usize },
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}
