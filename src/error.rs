//! Unified error types for shardbench.
//!
//! Wraps the errors of the member crates and adds the ones raised while
//! writing reports.

use thiserror::Error;

/// All shardbench errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid run configuration (raised before any worker starts)
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed dataset or trace line
    #[error("parse error at line {line}: {reason}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// A worker thread panicked
    #[error("worker {0} panicked")]
    WorkerPanicked(usize),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for shardbench operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a configuration error.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::InvalidConfig(_))
    }
}

// Convert from internal core errors
impl From<shardbench_core::Error> for Error {
    fn from(e: shardbench_core::Error) -> Self {
        use shardbench_core::Error as CoreError;
        match e {
            CoreError::InvalidConfig(msg) => Error::InvalidConfig(msg),
            CoreError::Parse { line, reason } => Error::Parse { line, reason },
            CoreError::WorkerPanicked { worker } => Error::WorkerPanicked(worker),
            CoreError::Io(io_err) => Error::Io(io_err),
        }
    }
}

// Convert from serde_json errors
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
