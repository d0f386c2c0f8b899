//! Error Handling Module
//!
//! A single error enum covers every failure the generator can report:
//! - construction and validation errors (credentials, request shape, model capabilities)
//! - transport failures (the request never produced a response)
//! - upstream errors (the API answered with a non-success status)
//! - parse failures (the API answered with a body we could not decode)
//!
//! Construction and validation errors are raised before any network call.
//! Transport and parse errors carry the raw request/response text so callers
//! can diagnose what was sent and received.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_content::error::GeneratorError;
//!
//! let err = GeneratorError::UnsupportedFeature("Grounding is not supported".into());
//! assert!(err.is_client_error());
//! ```

use thiserror::Error;

/// Boxed error used at the transport seam.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Message used when a non-success response body cannot be decoded.
pub const UNDEFINED_UPSTREAM_ERROR: &str = "Undefined";

/// Errors returned by the content generator.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// Missing, empty or malformed credentials
    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    /// An operation was called in a state where it has no meaning
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The request asks for something the target model cannot do
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),

    /// The request itself is incomplete or malformed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// HTTP client, header or subscriber setup failed
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The request could not be sent or its response could not be read
    #[error("Failed to send request to Gemini: {message}")]
    TransportFailure {
        message: String,
        /// Serialized request body, kept for diagnosis
        request_json: String,
        #[source]
        source: BoxError,
    },

    /// The API answered with a non-success status
    #[error("{message}")]
    UpstreamError {
        http_status: u16,
        /// `STATUS (code): message`, or `Undefined` when the body was not an error object
        message: String,
        raw_body: String,
    },

    /// The response body could not be mapped into a result
    #[error("Failed to parse response from JSON:\n{raw_body}")]
    ResponseParseFailure {
        raw_body: String,
        #[source]
        source: BoxError,
    },

    /// The caller cancelled the request before it completed
    #[error("Request cancelled")]
    Cancelled,
}

impl GeneratorError {
    /// Build a transport failure from any error source.
    pub fn transport(source: impl Into<BoxError>, request_json: impl Into<String>) -> Self {
        let source = source.into();
        Self::TransportFailure {
            message: source.to_string(),
            request_json: request_json.into(),
            source,
        }
    }

    /// Build a parse failure from any error source.
    pub fn parse(source: impl Into<BoxError>, raw_body: impl Into<String>) -> Self {
        Self::ResponseParseFailure {
            raw_body: raw_body.into(),
            source: source.into(),
        }
    }

    /// Errors caused by the caller's input rather than by the network or upstream.
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredential(_)
                | Self::InvalidState(_)
                | Self::UnsupportedFeature(_)
                | Self::InvalidRequest(_)
        )
    }

    /// Raw response body attached to the error, if any.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            Self::UpstreamError { raw_body, .. } | Self::ResponseParseFailure { raw_body, .. } => {
                Some(raw_body)
            }
            _ => None,
        }
    }

    /// Serialized request attached to the error, if any.
    pub fn request_json(&self) -> Option<&str> {
        match self {
            Self::TransportFailure { request_json, .. } => Some(request_json),
            _ => None,
        }
    }

    /// HTTP status of an upstream error.
    pub const fn http_status(&self) -> Option<u16> {
        match self {
            Self::UpstreamError { http_status, .. } => Some(*http_status),
            _ => None,
        }
    }
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn upstream_error_displays_message_only() {
        let err = GeneratorError::UpstreamError {
            http_status: 500,
            message: UNDEFINED_UPSTREAM_ERROR.to_string(),
            raw_body: "<html>".to_string(),
        };
        assert_eq!(err.to_string(), "Undefined");
        assert_eq!(err.raw_body(), Some("<html>"));
        assert_eq!(err.http_status(), Some(500));
    }

    #[test]
    fn parse_failure_keeps_body_and_cause() {
        let cause = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = GeneratorError::parse(cause, "{");
        assert!(err.to_string().contains("Failed to parse response from JSON"));
        assert!(err.source().is_some());
        assert_eq!(err.raw_body(), Some("{"));
    }

    #[test]
    fn transport_failure_keeps_request_json() {
        let err = GeneratorError::transport("connection refused", r#"{"contents":[]}"#);
        assert_eq!(
            err.to_string(),
            "Failed to send request to Gemini: connection refused"
        );
        assert_eq!(err.request_json(), Some(r#"{"contents":[]}"#));
        assert!(!err.is_client_error());
    }

    #[test]
    fn validation_errors_are_client_errors() {
        assert!(GeneratorError::InvalidState("x".into()).is_client_error());
        assert!(GeneratorError::UnsupportedFeature("x".into()).is_client_error());
        assert!(!GeneratorError::Cancelled.is_client_error());
    }
}
