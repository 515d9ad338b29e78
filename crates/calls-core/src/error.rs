//! Error types for the calls history

use thiserror::Error;

/// Main error type for the calls history
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message
        message: String,
    },

    /// Validation error
    #[error("Validation error: {field} - {message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// The request never produced a usable HTTP response
    #[error("Transport error: {0}")]
    Transport(String),

    /// The upstream API answered with a non-success status
    #[error("API returned error status {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// The GraphQL endpoint reported errors for the query
    #[error("GraphQL query failed: {}", messages.join("; "))]
    Query {
        /// Messages from the `errors` array of the response
        messages: Vec<String>,
    },

    /// Response body could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new configuration error
    #[must_use]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a new validation error
    #[must_use]
    pub fn validation<F: Into<String>, S: Into<String>>(field: F, message: S) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new transport error
    #[must_use]
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport(message.into())
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::error::Error as StdError;

    #[test]
    fn test_configuration_error() {
        let error = Error::configuration("page_size_options must not be empty");

        assert_eq!(
            error.to_string(),
            "Configuration error: page_size_options must not be empty"
        );
    }

    #[test]
    fn test_validation_error() {
        let error = Error::validation("page_size", "must be greater than zero");

        assert_eq!(
            error.to_string(),
            "Validation error: page_size - must be greater than zero"
        );
    }

    #[test]
    fn test_query_error_joins_messages() {
        let error = Error::Query {
            messages: vec!["Unauthorized".to_string(), "Bad offset".to_string()],
        };

        assert_eq!(error.to_string(), "GraphQL query failed: Unauthorized; Bad offset");
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{oops}").unwrap_err();
        let error = Error::from(json_error);

        assert!(matches!(error, Error::Serialization(_)));
        assert!(error.to_string().starts_with("Serialization error"));
        assert!(error.source().is_some());
    }
}
