//! Concurrent randomized search: workers generate and test expressions while
//! a coordinator enforces the time-to-live and collects unique solutions

mod cancel;
mod config;
mod coordinator;
mod errors;
mod sink;
mod stats;
mod worker;

pub use cancel::CancellationToken;
pub use config::{MAX_OPERATIONS, SearchArgs, SearchConfig};
pub use coordinator::{RoundPhase, SearchCoordinator};
pub use errors::{ConfigError, SearchError};
pub use sink::{EXPIRATION_MESSAGE, ResultSink, SearchEvent, SearchResult};
pub use stats::{RoundCounters, RoundOutcome, RoundStats};
pub use worker::SearchWorker;
