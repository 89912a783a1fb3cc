//! Result and error types for pagetest.
//!
//! These are setup-time errors. A failing test body never produces one of
//! these; it produces a failed [`TestOutcome`](crate::TestOutcome) instead.

use thiserror::Error;

/// Result type for pagetest operations
pub type PageTestResult<T> = Result<T, PageTestError>;

/// Errors that can occur while configuring or driving a test run
#[derive(Debug, Error)]
pub enum PageTestError {
    /// The test name filter is not a valid regular expression
    #[error("Invalid test filter '{pattern}': {source}")]
    InvalidFilter {
        /// Pattern as supplied in the page URL
        pattern: String,
        /// Underlying regex compile error
        #[source]
        source: regex::Error,
    },

    /// Page URL could not be parsed
    #[error("Invalid page URL '{url}': {source}")]
    InvalidUrl {
        /// URL text that failed to parse
        url: String,
        /// Underlying parse error
        #[source]
        source: url::ParseError,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl PageTestError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
