use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("Unknown operator '{0}', expected one of + - * / ^")]
    UnknownOperator(char),
    #[error("Term must be an integer: '{0}'")]
    InvalidTerm(String),
}
