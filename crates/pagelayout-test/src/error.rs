//! Error types for the test framework

use pagelayout_io::IoError;
use thiserror::Error;

/// Errors raised by the harness itself, not by the code under test
#[derive(Debug, Error)]
pub enum TestError {
    /// A file under `tests/data/images` could not be decoded
    #[error("cannot load test image '{path}'")]
    Load {
        path: String,
        #[source]
        source: IoError,
    },

    /// A display-mode output could not be written
    #[error("cannot write regression output '{path}'")]
    Write {
        path: String,
        #[source]
        source: IoError,
    },

    /// The output directory could not be created
    #[error("regout directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for harness operations
pub type TestResult<T> = Result<T, TestError>;
