use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResultLogError {
    #[error("Failed to read result log {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write result log {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
