use std::sync::Arc;
use std::time::Duration;

use log::debug;
use num_rational::BigRational;

use crate::expression::{BuildError, ExpressionBuilder};
use crate::numeric::format_value;
use crate::pool::{Operator, OperatorPool, TermPool};
use crate::search::errors::ConfigError;

/// Deepest tree a round may ask for; evaluation and rendering recurse per node
pub const MAX_OPERATIONS: usize = 1024;

/// What a round searches for. Read-only once the round starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    target: BigRational,
    operations: usize,
    terms: TermPool,
    operators: OperatorPool,
}

impl SearchConfig {
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if:
    /// - `operations` is zero or larger than [`MAX_OPERATIONS`]
    /// - either pool is empty
    /// - division is the only operator and no term is nonzero
    pub fn new(
        target: BigRational,
        operations: usize,
        terms: TermPool,
        operators: OperatorPool,
    ) -> Result<Self, ConfigError> {
        if operations == 0 {
            return Err(ConfigError::NoOperations);
        }
        if operations > MAX_OPERATIONS {
            return Err(ConfigError::TooManyOperations(MAX_OPERATIONS));
        }
        if terms.is_empty() {
            return Err(ConfigError::EmptyTermPool);
        }
        if operators.is_empty() {
            return Err(ConfigError::EmptyOperatorPool);
        }
        if operators.sole_operator() == Some(Operator::Div) && !terms.has_nonzero() {
            return Err(ConfigError::NoNonZeroDivisor);
        }

        debug!(
            "Search config: target={}, operations={}, terms=[{}], operators='{}'",
            format_value(&target),
            operations,
            terms,
            operators
        );
        Ok(Self {
            target,
            operations,
            terms,
            operators,
        })
    }

    pub fn target(&self) -> &BigRational {
        &self.target
    }

    pub fn operations(&self) -> usize {
        self.operations
    }

    pub fn terms(&self) -> &TermPool {
        &self.terms
    }

    pub fn operators(&self) -> &OperatorPool {
        &self.operators
    }

    /// # Errors
    ///
    /// Cannot fail for a config built through [`SearchConfig::new`].
    pub fn builder(&self) -> Result<ExpressionBuilder<'_>, BuildError> {
        ExpressionBuilder::new(self.operations, &self.terms, &self.operators)
    }
}

/// Everything a coordinator needs to run rounds
#[derive(Debug, Clone)]
pub struct SearchArgs {
    config: Arc<SearchConfig>,
    threads: usize,
    ttl: Duration,
    seed: Option<u64>,
}

impl SearchArgs {
    /// # Errors
    ///
    /// Returns [`ConfigError::NoThreads`] or [`ConfigError::ZeroTtl`].
    pub fn new(config: SearchConfig, threads: usize, ttl: Duration) -> Result<Self, ConfigError> {
        if threads == 0 {
            return Err(ConfigError::NoThreads);
        }
        if ttl.is_zero() {
            return Err(ConfigError::ZeroTtl);
        }
        Ok(Self {
            config: Arc::new(config),
            threads,
            ttl,
            seed: None,
        })
    }

    /// Make worker random streams reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}
