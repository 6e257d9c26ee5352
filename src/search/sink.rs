use std::fmt;
use std::time::Duration;

use num_rational::BigRational;

use crate::expression::Equation;
use crate::numeric::format_value;

/// Text carried by every expiration line so a log view can prune them
pub const EXPIRATION_MESSAGE: &str = "Time-to-live expired";

/// A solution found by a worker. Never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    expression: String,
    postfix: String,
    value: BigRational,
    is_solution: bool,
    worker: usize,
}

impl SearchResult {
    /// Capture an evaluated equation; `None` if its evaluation failed.
    pub fn from_equation(equation: &Equation<'_>, worker: usize) -> Option<Self> {
        let value = equation.value().as_ref().ok()?.clone();
        Some(Self {
            expression: equation.expression_text(),
            postfix: equation.expression().postfix().to_string(),
            value,
            is_solution: equation.is_solution(),
            worker,
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The same expression in postfix form. Replays through the integer postfix
    /// engine to the same value only for trees without `/` or negative powers.
    pub fn postfix(&self) -> &str {
        &self.postfix
    }

    pub fn value(&self) -> &BigRational {
        &self.value
    }

    pub fn is_solution(&self) -> bool {
        self.is_solution
    }

    pub fn worker(&self) -> usize {
        self.worker
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {}", self.expression, format_value(&self.value))
    }
}

/// Messages a round streams to its caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    Solution(SearchResult),
    Expired {
        ttl: Duration,
        expressions_generated: u64,
    },
    WorkerFailed {
        worker: usize,
        message: String,
    },
}

impl SearchEvent {
    pub fn is_expiration(&self) -> bool {
        matches!(self, SearchEvent::Expired { .. })
    }
}

impl fmt::Display for SearchEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SearchEvent::Solution(result) => write!(f, "{}", result),
            SearchEvent::Expired {
                ttl,
                expressions_generated,
            } => write!(
                f,
                "{} after {:.1}s ({} expressions generated)",
                EXPIRATION_MESSAGE,
                ttl.as_secs_f64(),
                expressions_generated
            ),
            SearchEvent::WorkerFailed { worker, message } => {
                write!(f, "Worker {} failed: {}", worker, message)
            }
        }
    }
}

/// Receiver of round events. The core never assumes which thread owns it.
pub trait ResultSink: Send + Sync {
    fn report(&self, event: &SearchEvent);
}

impl<F> ResultSink for F
where
    F: Fn(&SearchEvent) + Send + Sync,
{
    fn report(&self, event: &SearchEvent) {
        self(event)
    }
}
