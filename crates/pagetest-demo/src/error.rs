//! Error types for the demo application

use thiserror::Error;

/// Result type for demo operations
pub type DemoResult<T> = Result<T, DemoError>;

/// Errors that can occur while starting the demo
#[derive(Debug, Error)]
pub enum DemoError {
    /// Harness setup or rendering failed
    #[error(transparent)]
    Harness(#[from] pagetest::PageTestError),

    /// Output file could not be written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },
}

impl DemoError {
    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
