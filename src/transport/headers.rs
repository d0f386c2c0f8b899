//! HTTP Headers Utility
//!
//! Builds the header map for project credentials once, at construction.

use crate::error::GeneratorError;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};

/// HTTP header builder for API requests
pub struct HttpHeaderBuilder {
    headers: HeaderMap,
}

impl HttpHeaderBuilder {
    /// Create a new header builder
    pub fn new() -> Self {
        Self {
            headers: HeaderMap::new(),
        }
    }

    /// Add Bearer token authorization
    pub fn with_bearer_auth(mut self, token: &str) -> Result<Self, GeneratorError> {
        let mut auth_value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
            GeneratorError::InvalidCredential(format!("Invalid bearer token format: {e}"))
        })?;
        auth_value.set_sensitive(true);
        self.headers.insert(AUTHORIZATION, auth_value);
        Ok(self)
    }

    /// Accept JSON responses
    pub fn with_json_accept(mut self) -> Self {
        self.headers
            .insert(ACCEPT, HeaderValue::from_static("application/json"));
        self
    }

    /// Add a custom header
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, GeneratorError> {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            GeneratorError::InvalidCredential(format!("Invalid header name '{name}': {e}"))
        })?;
        self.headers.insert(
            header_name,
            HeaderValue::from_str(value).map_err(|e| {
                GeneratorError::InvalidCredential(format!("Invalid header value '{value}': {e}"))
            })?,
        );
        Ok(self)
    }

    /// Build the final HeaderMap
    pub fn build(self) -> HeaderMap {
        self.headers
    }
}

impl Default for HttpHeaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_project_headers() {
        let headers = HttpHeaderBuilder::new()
            .with_header("my-project", "project-123")
            .unwrap()
            .with_json_accept()
            .with_bearer_auth("tok")
            .unwrap()
            .build();
        assert_eq!(headers.get("my-project").unwrap(), "project-123");
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer tok");
        assert!(headers.get(AUTHORIZATION).unwrap().is_sensitive());
    }

    #[test]
    fn invalid_header_name_is_credential_error() {
        let err = HttpHeaderBuilder::new()
            .with_header("bad name", "v")
            .err()
            .unwrap();
        assert!(matches!(err, GeneratorError::InvalidCredential(_)));
    }

    #[test]
    fn control_characters_in_token_are_rejected() {
        let err = HttpHeaderBuilder::new()
            .with_bearer_auth("tok\nen")
            .err()
            .unwrap();
        assert!(err.to_string().contains("Invalid bearer token format"));
    }
}
