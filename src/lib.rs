//! Equation Finder - A library for randomized search of arithmetic expressions
//!
//! Worker threads build random expression trees from a pool of integer terms
//! and a pool of binary operators, evaluate them exactly, and report every
//! distinct expression that hits the target value before a time-to-live
//! expires. A separate postfix engine evaluates expressions written in
//! reverse Polish notation.

pub mod expression;
pub mod numeric;
pub mod pool;
pub mod postfix;
pub mod results;
pub mod search;

// Re-export the main public API
pub use expression::{BuildError, Equation, Expression, ExpressionBuilder};
pub use numeric::{ArithmeticError, ParseNumberError, format_value, parse_rational};
pub use pool::{Operator, OperatorPool, PoolError, TermPool};
pub use postfix::PostfixError;
pub use results::{ResultLog, ResultLogError};
pub use search::{
    CancellationToken, ConfigError, ResultSink, RoundOutcome, RoundStats, SearchArgs,
    SearchConfig, SearchCoordinator, SearchError, SearchEvent, SearchResult,
};

/// Run a single search round and return the solutions it found
///
/// This is a convenience function that runs one round with a coordinator that
/// knows no earlier results and discards progress events.
///
/// # Errors
///
/// Returns [`SearchError::Spawn`] if a worker thread cannot be started.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use equation_finder::{OperatorPool, SearchArgs, SearchConfig, TermPool, find_solutions, parse_rational};
///
/// let target = parse_rational("27")?;
/// let operators = OperatorPool::parse("+-*")?;
/// let config = SearchConfig::new(target, 3, TermPool::countdown(9), operators)?;
/// let args = SearchArgs::new(config, 2, Duration::from_millis(100))?;
///
/// for solution in find_solutions(args)? {
///     println!("Found: {}", solution);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn find_solutions(args: SearchArgs) -> Result<Vec<SearchResult>, SearchError> {
    let mut coordinator = SearchCoordinator::new(args);
    coordinator.run(&|_: &SearchEvent| {})?;
    Ok(coordinator.solutions().to_vec())
}
