use log::trace;
use num_bigint::BigInt;

use crate::pool::Operator;
use crate::postfix::errors::PostfixError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Number(BigInt),
    Operator(Operator),
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_digit() || Operator::from_symbol(c).is_some()
}

fn lex_token(token: &str, position: usize) -> Result<Token, PostfixError> {
    if let Some(character) = token.chars().find(|c| !is_allowed(*c)) {
        return Err(PostfixError::InvalidCharacter {
            token: token.to_string(),
            character,
            position,
        });
    }

    if token.chars().all(|c| c.is_ascii_digit()) {
        return token
            .parse::<BigInt>()
            .map(Token::Number)
            .map_err(|_| PostfixError::MalformedToken {
                token: token.to_string(),
                position,
            });
    }

    let mut chars = token.chars();
    match (chars.next().and_then(Operator::from_symbol), chars.next()) {
        (Some(op), None) => Ok(Token::Operator(op)),
        _ => Err(PostfixError::MalformedToken {
            token: token.to_string(),
            position,
        }),
    }
}

/// Split on whitespace and classify every token.
///
/// # Errors
///
/// Returns [`PostfixError::Empty`] for blank input, otherwise the first
/// invalid or malformed token.
pub fn tokenize(input: &str) -> Result<Vec<Token>, PostfixError> {
    let tokens = input
        .split_whitespace()
        .enumerate()
        .map(|(position, token)| lex_token(token, position))
        .collect::<Result<Vec<_>, _>>()?;

    if tokens.is_empty() {
        return Err(PostfixError::Empty);
    }
    trace!("Tokenized {} postfix tokens", tokens.len());
    Ok(tokens)
}

/// Simulate stack depth without doing arithmetic.
///
/// Returns the deepest stack the expression needs.
///
/// # Errors
///
/// - [`PostfixError::InsufficientOperands`] for an operator with fewer than two values below it
/// - [`PostfixError::UnbalancedStack`] if the final depth is not exactly one
pub fn check_arity(tokens: &[Token]) -> Result<usize, PostfixError> {
    let mut depth = 0usize;
    let mut max_depth = 0usize;

    for (position, token) in tokens.iter().enumerate() {
        match token {
            Token::Number(_) => {
                depth += 1;
                max_depth = max_depth.max(depth);
            }
            Token::Operator(op) => {
                if depth < 2 {
                    return Err(PostfixError::InsufficientOperands {
                        operator: op.symbol(),
                        position,
                    });
                }
                depth -= 1;
            }
        }
    }

    if depth == 1 {
        Ok(max_depth)
    } else {
        Err(PostfixError::UnbalancedStack { depth })
    }
}
