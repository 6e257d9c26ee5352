//! Term and operator pools a search round draws from

mod errors;
mod operator;
mod terms;

pub use errors::PoolError;
pub use operator::{Operator, OperatorPool};
pub use terms::TermPool;

#[cfg(test)]
mod tests;
