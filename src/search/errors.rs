use thiserror::Error;

use crate::numeric::ParseNumberError;
use crate::pool::PoolError;

/// Problems detected before any worker is spawned
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Term pool cannot be empty")]
    EmptyTermPool,
    #[error("Operator pool cannot be empty; select at least one operation")]
    EmptyOperatorPool,
    #[error("Number of operations must be at least 1")]
    NoOperations,
    #[error("Number of operations must not exceed {0}")]
    TooManyOperations(usize),
    #[error("Number of threads must be at least 1")]
    NoThreads,
    #[error("Time-to-live must be greater than zero")]
    ZeroTtl,
    #[error("Number of rounds must be at least 1")]
    NoRounds,
    #[error("Division is the only operator but every term is zero")]
    NoNonZeroDivisor,
    #[error("Invalid pool: {0}")]
    Pool(#[from] PoolError),
    #[error("Invalid target value: {0}")]
    Target(#[from] ParseNumberError),
}

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}
