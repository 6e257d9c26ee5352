use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("An expression needs at least one operation")]
    NoOperations,
    #[error("Term pool is empty")]
    EmptyTermPool,
    #[error("Operator pool is empty")]
    EmptyOperatorPool,
    #[error("Gave up after {0} attempts to draw a nonzero divisor")]
    DivisorRedrawsExhausted(usize),
}
