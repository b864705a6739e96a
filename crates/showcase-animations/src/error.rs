//! Result and error types for the showcase.
//!
//! Unknown effect tags are deliberately absent from this taxonomy: an
//! unrecognized tag is a no-op effect, not a failure.

use thiserror::Error;

/// Result type for showcase operations
pub type ShowcaseResult<T> = Result<T, ShowcaseError>;

/// Errors that can occur in the showcase
#[derive(Debug, Error)]
pub enum ShowcaseError {
    /// Numeric input could not be parsed
    #[error("Invalid numeric input: {input:?}")]
    InvalidInput {
        /// The raw input text
        input: String,
    },

    /// An element id did not resolve in the document
    #[error("Element not found: {element}")]
    NotFound {
        /// The element id that was looked up
        element: String,
    },

    /// Configuration is unusable
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML (de)serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShowcaseError {
    /// Create an invalid input error
    #[must_use]
    pub fn invalid_input(input: impl Into<String>) -> Self {
        Self::InvalidInput {
            input: input.into(),
        }
    }

    /// Create a not found error
    #[must_use]
    pub fn not_found(element: impl Into<String>) -> Self {
        Self::NotFound {
            element: element.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this is a lookup failure
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
