//! Result and error types for page objects.

use thiserror::Error;

/// Result type for page object operations
pub type PageResult<T> = Result<T, PageError>;

/// Errors that can occur while driving a page object
#[derive(Debug, Error)]
pub enum PageError {
    /// The driver rejected an interaction
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// No element matched a selector that had to be present
    #[error("Element not found: {selector}")]
    ElementNotFound {
        /// Resolved selector
        selector: String,
    },

    /// A response was prepared but the page object has no mock server
    #[error("No mock server attached; cannot stub {method} {path}")]
    MissingServer {
        /// HTTP method of the stub
        method: String,
        /// Path of the stub
        path: String,
    },

    /// HTTP method the mock server does not understand
    #[error("Unsupported HTTP method: {method}")]
    UnsupportedMethod {
        /// Method as given by the caller
        method: String,
    },

    /// Collected assertions did not all pass
    #[error("{failed} of {total} assertions failed: {summary}")]
    AssertionsFailed {
        /// Number of failed assertions
        failed: usize,
        /// Number of recorded assertions
        total: usize,
        /// Failure messages joined by `; `
        summary: String,
    },

    /// Invalid configuration
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

impl PageError {
    /// Create a driver error
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
