use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Live per-round counters, incremented by workers
#[derive(Debug, Default)]
pub struct RoundCounters {
    expressions_generated: AtomicU64,
    evaluation_errors: AtomicU64,
    build_failures: AtomicU64,
}

impl RoundCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_expression(&self) {
        self.expressions_generated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_evaluation_error(&self) {
        self.evaluation_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_build_failure(&self) {
        self.build_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn expressions_generated(&self) -> u64 {
        self.expressions_generated.load(Ordering::Relaxed)
    }

    pub fn evaluation_errors(&self) -> u64 {
        self.evaluation_errors.load(Ordering::Relaxed)
    }

    pub fn build_failures(&self) -> u64 {
        self.build_failures.load(Ordering::Relaxed)
    }

    pub(crate) fn reset(&self) {
        self.expressions_generated.store(0, Ordering::Relaxed);
        self.evaluation_errors.store(0, Ordering::Relaxed);
        self.build_failures.store(0, Ordering::Relaxed);
    }
}

/// How a round stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Expired,
    Cancelled,
    /// Every worker exited before the deadline
    WorkersStopped,
}

/// Summary of a completed round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundStats {
    pub round: usize,
    pub expressions_generated: u64,
    pub solutions: usize,
    pub duplicates: usize,
    pub evaluation_errors: u64,
    pub build_failures: u64,
    pub failed_workers: usize,
    pub elapsed: Duration,
    pub outcome: RoundOutcome,
}
