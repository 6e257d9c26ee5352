use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, info};

use crate::results::errors::ResultLogError;
use crate::search::{EXPIRATION_MESSAGE, ResultSink, SearchEvent};

#[derive(Debug, Default)]
struct LogState {
    /// Newest first
    lines: Vec<String>,
    this_round: u64,
    total: u64,
}

/// Session log fed by a search round. Safe to share between threads.
#[derive(Debug, Default)]
pub struct ResultLog {
    state: Mutex<LogState>,
}

impl ResultLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, LogState> {
        // Every update leaves the state consistent, so a poisoned lock is still usable
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Put a message at the top of the log
    pub fn push_line(&self, line: impl Into<String>) {
        self.state().lines.insert(0, line.into());
    }

    /// Lines, newest first
    pub fn lines(&self) -> Vec<String> {
        self.state().lines.clone()
    }

    pub fn len(&self) -> usize {
        self.state().lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().lines.is_empty()
    }

    /// The whole log as newline-joined text
    pub fn text(&self) -> String {
        self.state().lines.join("\n")
    }

    pub fn clear(&self) {
        self.state().lines.clear();
    }

    /// Store the expression count of a finished round and add it to the total
    pub fn record_round(&self, expressions_generated: u64) {
        let mut state = self.state();
        state.this_round = expressions_generated;
        state.total = state.total.saturating_add(expressions_generated);
    }

    pub fn expressions_this_round(&self) -> u64 {
        self.state().this_round
    }

    pub fn expressions_total(&self) -> u64 {
        self.state().total
    }

    pub fn reset_counters(&self) {
        let mut state = self.state();
        state.this_round = 0;
        state.total = 0;
    }

    /// Write the log as newline-joined text.
    ///
    /// # Errors
    ///
    /// Returns [`ResultLogError::Write`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ResultLogError> {
        let text = self.text();
        fs::write(path, text).map_err(|source| ResultLogError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Saved result log to {}", path.display());
        Ok(())
    }

    /// Replace the log with the lines stored at `path` and zero both counters.
    ///
    /// # Errors
    ///
    /// Returns [`ResultLogError::Read`] if the file cannot be read; the log is
    /// left untouched in that case.
    pub fn load(&self, path: &Path) -> Result<(), ResultLogError> {
        let text = fs::read_to_string(path).map_err(|source| ResultLogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let lines: Vec<String> = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        info!("Loaded {} lines from {}", lines.len(), path.display());

        let mut state = self.state();
        state.lines = lines;
        state.this_round = 0;
        state.total = 0;
        Ok(())
    }
}

impl ResultSink for ResultLog {
    fn report(&self, event: &SearchEvent) {
        let mut state = self.state();
        if event.is_expiration() {
            let before = state.lines.len();
            state.lines.retain(|line| !line.contains(EXPIRATION_MESSAGE));
            debug!(
                "Pruned {} earlier expiration lines",
                before - state.lines.len()
            );
        }
        state.lines.insert(0, event.to_string());
    }
}
