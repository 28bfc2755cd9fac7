//! Error types for shardbench
//!
//! Store operations are total and never fail. Everything here is raised
//! either while preparing a run (bad configuration, malformed input files)
//! or when a worker thread dies, which indicates a bug.

use thiserror::Error;

/// Errors raised while preparing or driving a benchmark run
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid run configuration, detected before any timing starts
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed line in a dataset or trace file
    #[error("parse error at line {line}: {reason}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// A worker thread panicked before returning its histogram
    #[error("worker {worker} panicked")]
    WorkerPanicked {
        /// Index of the failed worker
        worker: usize,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for shardbench operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build an [`Error::InvalidConfig`] from anything printable
    pub fn config(msg: impl Into<String>) -> Self {
        Error::InvalidConfig(msg.into())
    }

    /// Check if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::InvalidConfig(_))
    }

    /// Check if this is a parse error
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }
}
