use std::fmt;

use log::debug;
use num_bigint::BigInt;

use crate::pool::Operator;
use crate::postfix::errors::PostfixError;
use crate::postfix::eval::apply;
use crate::postfix::lexer::{Token, check_arity, tokenize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Push(BigInt),
    Apply(Operator),
}

/// A validated postfix program that can be evaluated any number of times.
///
/// Compilation rejects every malformed input, so running the program can
/// only fail on arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPostfix {
    instructions: Vec<Instruction>,
    /// Maximum stack depth needed (for pre-allocation)
    max_stack_depth: usize,
}

impl CompiledPostfix {
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn max_stack_depth(&self) -> usize {
        self.max_stack_depth
    }

    /// # Errors
    ///
    /// Returns [`PostfixError::Arithmetic`] when an operation fails, e.g. on
    /// division by zero.
    pub fn evaluate(&self) -> Result<BigInt, PostfixError> {
        let mut stack: Vec<BigInt> = Vec::with_capacity(self.max_stack_depth);

        for (position, instruction) in self.instructions.iter().enumerate() {
            match instruction {
                Instruction::Push(value) => stack.push(value.clone()),
                Instruction::Apply(op) => {
                    let (Some(right), Some(left)) = (stack.pop(), stack.pop()) else {
                        return Err(PostfixError::InsufficientOperands {
                            operator: op.symbol(),
                            position,
                        });
                    };
                    stack.push(apply(*op, &left, &right)?);
                }
            }
        }

        let depth = stack.len();
        match (stack.pop(), depth) {
            (Some(value), 1) => Ok(value),
            _ => Err(PostfixError::UnbalancedStack { depth }),
        }
    }
}

impl fmt::Display for CompiledPostfix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, instruction) in self.instructions.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            match instruction {
                Instruction::Push(value) => write!(f, "{}", value)?,
                Instruction::Apply(op) => write!(f, "{}", op)?,
            }
        }
        Ok(())
    }
}

/// Compile a postfix expression into a reusable program.
///
/// # Errors
///
/// Returns the same [`PostfixError`] classification as
/// [`evaluate`](crate::postfix::evaluate) for malformed input.
pub fn compile(input: &str) -> Result<CompiledPostfix, PostfixError> {
    let tokens = tokenize(input)?;
    let max_stack_depth = check_arity(&tokens)?;

    let instructions: Vec<Instruction> = tokens
        .into_iter()
        .map(|token| match token {
            Token::Number(value) => Instruction::Push(value),
            Token::Operator(op) => Instruction::Apply(op),
        })
        .collect();

    debug!(
        "Compiled {} postfix instructions (max depth {})",
        instructions.len(),
        max_stack_depth
    );
    Ok(CompiledPostfix {
        instructions,
        max_stack_depth,
    })
}
