//! Accumulated log of reported lines, shown newest first and persisted as
//! plain text between sessions

mod errors;
mod result_log;

pub use errors::ResultLogError;
pub use result_log::ResultLog;
