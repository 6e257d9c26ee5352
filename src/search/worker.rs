use std::collections::HashSet;

use crossbeam_channel::Sender;
use log::{debug, trace};
use rand_chacha::ChaCha8Rng;

use crate::expression::{BuildError, Equation};
use crate::search::cancel::CancellationToken;
use crate::search::config::SearchConfig;
use crate::search::sink::SearchResult;
use crate::search::stats::RoundCounters;

/// One thread of the generate-and-test loop
pub struct SearchWorker<'a> {
    id: usize,
    config: &'a SearchConfig,
    cancel: CancellationToken,
    counters: &'a RoundCounters,
    results: Sender<SearchResult>,
    rng: ChaCha8Rng,
}

impl<'a> SearchWorker<'a> {
    pub fn new(
        id: usize,
        config: &'a SearchConfig,
        cancel: CancellationToken,
        counters: &'a RoundCounters,
        results: Sender<SearchResult>,
        rng: ChaCha8Rng,
    ) -> Self {
        Self {
            id,
            config,
            cancel,
            counters,
            results,
            rng,
        }
    }

    /// Build and evaluate expressions until cancelled, sending each distinct
    /// solution once, in generation order. Returns how many expressions this
    /// worker generated.
    ///
    /// # Errors
    ///
    /// Returns a [`BuildError`] if the config cannot produce a builder.
    pub fn run(mut self) -> Result<u64, BuildError> {
        let builder = self.config.builder()?;
        let target = self.config.target();
        let operators = self.config.operators();
        let mut generated = 0u64;
        let mut sent: HashSet<String> = HashSet::new();

        debug!("Worker {} started", self.id);

        while !self.cancel.is_cancelled() {
            let expression = match builder.build(&mut self.rng) {
                Ok(expression) => expression,
                Err(e) => {
                    trace!("Worker {} discarded a build: {}", self.id, e);
                    self.counters.record_build_failure();
                    continue;
                }
            };

            let equation = Equation::new(expression, target, operators);
            let evaluated = equation.value().is_ok();
            self.counters.record_expression();
            generated += 1;

            if !evaluated {
                self.counters.record_evaluation_error();
                continue;
            }

            if equation.is_solution()
                && let Some(result) = SearchResult::from_equation(&equation, self.id)
                && sent.insert(result.to_string())
            {
                trace!("Worker {} found {}", self.id, result);
                if self.results.send(result).is_err() {
                    debug!("Worker {} lost its coordinator", self.id);
                    break;
                }
            }
        }

        debug!("Worker {} stopped after {} expressions", self.id, generated);
        Ok(generated)
    }
}
