//! Stack-machine evaluation of postfix (reverse Polish) integer expressions
//!
//! Independent of the expression-tree search; used to check and replay
//! expressions written in postfix form.

mod compiler;
mod errors;
mod eval;
mod lexer;

pub use compiler::{CompiledPostfix, Instruction, compile};
pub use errors::PostfixError;
pub use eval::evaluate;
pub use lexer::{Token, tokenize};

#[cfg(test)]
mod tests;
