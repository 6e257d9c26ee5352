use std::any::Any;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread::{self, ScopedJoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError};
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::expression::BuildError;
use crate::search::cancel::CancellationToken;
use crate::search::config::SearchArgs;
use crate::search::errors::{ConfigError, SearchError};
use crate::search::sink::{ResultSink, SearchEvent, SearchResult};
use crate::search::stats::{RoundCounters, RoundOutcome, RoundStats};
use crate::search::worker::SearchWorker;

/// How often the coordinator looks at the cancellation token while waiting
const POLL_INTERVAL: Duration = Duration::from_millis(25);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Idle,
    Spawning,
    Running,
    Draining,
    Completed,
}

fn set_phase(phase: &mut RoundPhase, next: RoundPhase) {
    debug!("Round phase {:?} -> {:?}", phase, next);
    *phase = next;
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker panicked".to_string()
    }
}

/// Join one worker, turning a panic or a startup error into a failure event.
pub(crate) fn join_worker(
    id: usize,
    handle: ScopedJoinHandle<'_, Result<u64, BuildError>>,
) -> Option<SearchEvent> {
    let message = match handle.join() {
        Ok(Ok(generated)) => {
            debug!("Joined worker {} ({} expressions)", id, generated);
            return None;
        }
        Ok(Err(e)) => e.to_string(),
        Err(payload) => panic_message(payload.as_ref()),
    };
    warn!("Worker {} failed: {}", id, message);
    Some(SearchEvent::WorkerFailed {
        worker: id,
        message,
    })
}

/// Join every worker in spawn order, reporting each failure to the sink.
/// Returns how many workers failed.
pub(crate) fn join_all<S: ResultSink + ?Sized>(
    handles: Vec<ScopedJoinHandle<'_, Result<u64, BuildError>>>,
    sink: &S,
) -> usize {
    let mut failed = 0;
    for (id, handle) in handles.into_iter().enumerate() {
        if let Some(event) = join_worker(id, handle) {
            sink.report(&event);
            failed += 1;
        }
    }
    failed
}

/// Deduplicates solutions against everything already reported or logged
struct Collector<'a, S: ResultSink + ?Sized> {
    known: &'a mut HashSet<String>,
    solutions: &'a mut Vec<SearchResult>,
    sink: &'a S,
    accepted: usize,
    duplicates: usize,
}

impl<S: ResultSink + ?Sized> Collector<'_, S> {
    fn accept(&mut self, result: SearchResult) {
        if self.known.insert(result.to_string()) {
            info!("Solution: {}", result);
            self.sink.report(&SearchEvent::Solution(result.clone()));
            self.solutions.push(result);
            self.accepted += 1;
        } else {
            debug!("Duplicate solution suppressed: {}", result);
            self.duplicates += 1;
        }
    }

    /// Forward solutions until the deadline, cancellation, or all workers exit
    fn wait(
        &mut self,
        results: &Receiver<SearchResult>,
        cancel: &CancellationToken,
        deadline: Instant,
    ) -> RoundOutcome {
        loop {
            if cancel.is_cancelled() {
                return RoundOutcome::Cancelled;
            }
            let now = Instant::now();
            if now >= deadline {
                return RoundOutcome::Expired;
            }
            match results.recv_timeout((deadline - now).min(POLL_INTERVAL)) {
                Ok(result) => self.accept(result),
                Err(RecvTimeoutError::Timeout) => {}
                // A caller cancel wins over workers stopping on their own.
                Err(RecvTimeoutError::Disconnected) if cancel.is_cancelled() => {
                    return RoundOutcome::Cancelled;
                }
                Err(RecvTimeoutError::Disconnected) => return RoundOutcome::WorkersStopped,
            }
        }
    }
}

/// Runs search rounds: spawns workers, enforces the time-to-live, collects
/// unique solutions and reports round statistics.
pub struct SearchCoordinator {
    args: SearchArgs,
    phase: RoundPhase,
    counters: Arc<RoundCounters>,
    cancel: CancellationToken,
    known: HashSet<String>,
    solutions: Vec<SearchResult>,
    rounds_run: usize,
}

impl SearchCoordinator {
    pub fn new(args: SearchArgs) -> Self {
        Self {
            args,
            phase: RoundPhase::Idle,
            counters: Arc::new(RoundCounters::new()),
            cancel: CancellationToken::new(),
            known: HashSet::new(),
            solutions: Vec::new(),
            rounds_run: 0,
        }
    }

    /// Treat previously logged lines as already reported
    pub fn with_known_results<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.known.extend(
            lines
                .into_iter()
                .map(|line| line.as_ref().trim().to_string())
                .filter(|line| !line.is_empty()),
        );
        self
    }

    pub fn args(&self) -> &SearchArgs {
        &self.args
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Live counters of the current (or last) round
    pub fn counters(&self) -> Arc<RoundCounters> {
        Arc::clone(&self.counters)
    }

    /// Cancels the round in progress and every later round. A cancelled
    /// coordinator stays cancelled until [`reset_cancellation`](Self::reset_cancellation).
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Re-arm the token so the next round runs again
    pub fn reset_cancellation(&self) {
        self.cancel.reset();
    }

    /// Expressions generated by the current (or last) round
    pub fn total_expressions_generated(&self) -> u64 {
        self.counters.expressions_generated()
    }

    /// Every unique solution reported by this coordinator, oldest first
    pub fn solutions(&self) -> &[SearchResult] {
        &self.solutions
    }

    fn worker_rng(&self, id: usize) -> ChaCha8Rng {
        match self.args.seed() {
            Some(seed) => {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                rng.set_stream(((self.rounds_run as u64) << 32) | id as u64);
                rng
            }
            None => ChaCha8Rng::from_entropy(),
        }
    }

    /// Run one round to completion. A round started with the token already
    /// cancelled spawns no workers and ends as [`RoundOutcome::Cancelled`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Spawn`] if a worker thread cannot be started; the
    /// workers already running are stopped and joined first.
    pub fn run<S: ResultSink + ?Sized>(&mut self, sink: &S) -> Result<RoundStats, SearchError> {
        let started = Instant::now();
        let round = self.rounds_run + 1;
        let threads = self.args.threads();
        let ttl = self.args.ttl();

        self.counters.reset();
        if self.cancel.is_cancelled() {
            self.rounds_run = round;
            set_phase(&mut self.phase, RoundPhase::Completed);
            info!("Round {} cancelled before it started", round);
            return Ok(RoundStats {
                round,
                expressions_generated: 0,
                solutions: 0,
                duplicates: 0,
                evaluation_errors: 0,
                build_failures: 0,
                failed_workers: 0,
                elapsed: started.elapsed(),
                outcome: RoundOutcome::Cancelled,
            });
        }

        set_phase(&mut self.phase, RoundPhase::Spawning);
        let rngs: Vec<ChaCha8Rng> = (0..threads).map(|id| self.worker_rng(id)).collect();
        self.rounds_run = round;

        info!(
            "Starting round {} with {} workers, TTL {:.1}s",
            round,
            threads,
            ttl.as_secs_f64()
        );

        let config = self.args.config();
        let counters = self.counters.as_ref();
        let cancel = &self.cancel;
        // Stops this round's workers; the caller's token only ever requests it.
        let stop = CancellationToken::new();
        let phase = &mut self.phase;
        let mut collector = Collector {
            known: &mut self.known,
            solutions: &mut self.solutions,
            sink,
            accepted: 0,
            duplicates: 0,
        };

        let (outcome, failed_workers) = thread::scope(|scope| {
            let (tx, rx) = crossbeam_channel::unbounded();
            let mut handles = Vec::with_capacity(threads);

            for (id, rng) in rngs.into_iter().enumerate() {
                let worker = SearchWorker::new(id, config, stop.clone(), counters, tx.clone(), rng);
                let spawned = thread::Builder::new()
                    .name(format!("search-worker-{}", id))
                    .spawn_scoped(scope, move || worker.run());
                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(e) => {
                        warn!("Could not spawn worker {}: {}", id, e);
                        stop.cancel();
                        join_all(handles, sink);
                        return Err(SearchError::Spawn(e));
                    }
                }
            }
            drop(tx);

            set_phase(phase, RoundPhase::Running);
            let outcome = match collector.wait(&rx, cancel, started + ttl) {
                _ if cancel.is_cancelled() => RoundOutcome::Cancelled,
                outcome => outcome,
            };
            stop.cancel();

            if outcome == RoundOutcome::Expired {
                sink.report(&SearchEvent::Expired {
                    ttl,
                    expressions_generated: counters.expressions_generated(),
                });
            }

            set_phase(phase, RoundPhase::Draining);
            let failed = join_all(handles, sink);
            for result in rx.try_iter() {
                collector.accept(result);
            }

            Ok((outcome, failed))
        })?;

        let stats = RoundStats {
            round,
            expressions_generated: counters.expressions_generated(),
            solutions: collector.accepted,
            duplicates: collector.duplicates,
            evaluation_errors: counters.evaluation_errors(),
            build_failures: counters.build_failures(),
            failed_workers,
            elapsed: started.elapsed(),
            outcome,
        };
        set_phase(&mut self.phase, RoundPhase::Completed);

        info!(
            "Round {} {:?}: {} expressions, {} new solutions, {} duplicates",
            round, stats.outcome, stats.expressions_generated, stats.solutions, stats.duplicates
        );
        Ok(stats)
    }

    /// Run `rounds` rounds back to back, stopping early if one is cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoRounds`] for zero rounds, or the first round error.
    pub fn run_rounds<S: ResultSink + ?Sized>(
        &mut self,
        rounds: usize,
        sink: &S,
    ) -> Result<Vec<RoundStats>, SearchError> {
        self.run_rounds_with(rounds, sink, |_| {})
    }

    /// Like [`run_rounds`](Self::run_rounds), calling `on_round` after each
    /// round finishes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoRounds`] for zero rounds, or the first round error.
    pub fn run_rounds_with<S, F>(
        &mut self,
        rounds: usize,
        sink: &S,
        mut on_round: F,
    ) -> Result<Vec<RoundStats>, SearchError>
    where
        S: ResultSink + ?Sized,
        F: FnMut(&RoundStats),
    {
        if rounds == 0 {
            return Err(ConfigError::NoRounds.into());
        }

        let mut all = Vec::with_capacity(rounds);
        for _ in 0..rounds {
            let stats = self.run(sink)?;
            on_round(&stats);
            let cancelled = stats.outcome == RoundOutcome::Cancelled;
            all.push(stats);
            if cancelled {
                info!("Round cancelled, skipping remaining rounds");
                break;
            }
        }
        Ok(all)
    }
}
