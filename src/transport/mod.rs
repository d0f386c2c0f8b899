//! HTTP transport abstraction
//!
//! The generator never talks to `reqwest` directly. It hands the final
//! URL, headers and JSON body to an [`HttpTransport`], which makes it possible
//! to observe requests or return synthetic responses in tests.

pub mod headers;

use async_trait::async_trait;
use reqwest::header::HeaderMap;

use crate::config::GeneratorConfig;
use crate::error::{BoxError, GeneratorError};

pub use headers::HttpHeaderBuilder;

/// Transport-level request data for JSON POST requests.
#[derive(Debug, Clone)]
pub struct HttpTransportRequest {
    pub url: String,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

/// Transport-level response data.
#[derive(Debug, Clone)]
pub struct HttpTransportResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpTransportResponse {
    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Custom HTTP transport for JSON requests.
///
/// Any error returned here is reported as a transport failure; non-success
/// statuses must be returned as responses, not errors.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute_json(
        &self,
        request: HttpTransportRequest,
    ) -> Result<HttpTransportResponse, BoxError>;
}

/// Default transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a client honouring the config's timeout and user agent.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, GeneratorError> {
        let mut builder = reqwest::Client::builder();

        if let Some(timeout) = config.timeout_duration() {
            builder = builder.timeout(timeout);
        }

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder.build().map_err(|e| {
            GeneratorError::ConfigurationError(format!("Failed to create HTTP client: {e}"))
        })?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute_json(
        &self,
        request: HttpTransportRequest,
    ) -> Result<HttpTransportResponse, BoxError> {
        let response = self
            .client
            .post(&request.url)
            .headers(request.headers)
            .json(&request.body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        Ok(HttpTransportResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_from_default_config() {
        assert!(ReqwestTransport::from_config(&GeneratorConfig::default()).is_ok());
        let config = GeneratorConfig::default()
            .without_timeout()
            .with_user_agent("test-agent/1.0");
        assert!(ReqwestTransport::from_config(&config).is_ok());
    }

    #[test]
    fn body_text_is_lossy_utf8() {
        let resp = HttpTransportResponse {
            status: 204,
            headers: HeaderMap::new(),
            body: b"ok".to_vec(),
        };
        assert_eq!(resp.body_text(), "ok");
        let resp = HttpTransportResponse {
            body: vec![0xff, b'k'],
            ..resp
        };
        assert_eq!(resp.body_text(), "\u{fffd}k");
    }
}
