//! Generator configuration and credentials

use reqwest::header::HeaderMap;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

use crate::error::{GeneratorError, Result};
use crate::transport::headers::HttpHeaderBuilder;
use crate::types::ResponseOptions;
use crate::utils::api_key::can_be_valid_api_key;

/// Model endpoint prefix of the public Gemini API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_BASE_URL: &str = "GEMINI_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "GEMINI_TIMEOUT_SECS";

/// Generator configuration parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Model endpoint prefix; `/{model}:generateContent` is appended
    pub base_url: String,
    /// HTTP timeout in seconds. `None` leaves the transport's own default,
    /// which for `reqwest` is no timeout.
    pub timeout: Option<u64>,
    /// User agent sent by the default transport
    pub user_agent: Option<String>,
    /// Grounding details copied into responses
    pub response_options: ResponseOptions,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            user_agent: Some(default_user_agent()),
            response_options: ResponseOptions::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL (trailing slashes are dropped)
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set HTTP timeout
    pub const fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disable the client-side timeout
    pub const fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub const fn with_response_options(mut self, options: ResponseOptions) -> Self {
        self.response_options = options;
        self
    }

    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    /// Defaults overridden by `GEMINI_BASE_URL` and `GEMINI_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`Self::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(base_url.trim());
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS).filter(|v| !v.trim().is_empty()) {
            let secs = timeout.trim().parse::<u64>().map_err(|e| {
                GeneratorError::ConfigurationError(format!(
                    "Invalid {ENV_TIMEOUT_SECS} value '{timeout}': {e}"
                ))
            })?;
            config = config.with_timeout(secs);
        }
        Ok(config)
    }
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// How requests are authenticated.
#[derive(Clone)]
pub enum Credentials {
    /// Sent as the `key` query parameter
    ApiKey(SecretString),
    /// Google Cloud project header plus a bearer token, prebuilt as headers
    Project {
        name: String,
        id: String,
        headers: HeaderMap,
    },
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApiKey(key) => f
                .debug_struct("ApiKey")
                .field("api_key_present", &!key.expose_secret().is_empty())
                .finish(),
            Self::Project { name, id, .. } => f
                .debug_struct("Project")
                .field("name", name)
                .field("id", id)
                .field("bearer", &"[REDACTED]")
                .finish(),
        }
    }
}

impl Credentials {
    /// Validate the key's shape and store it trimmed.
    pub fn api_key<S: AsRef<str>>(api_key: S) -> Result<Self> {
        let api_key = api_key.as_ref();
        if !can_be_valid_api_key(api_key) {
            return Err(GeneratorError::InvalidCredential(
                "Invalid or expired API key.".to_string(),
            ));
        }
        Ok(Self::ApiKey(SecretString::from(api_key.trim().to_string())))
    }

    /// Project credentials. Every argument is required and must be usable as
    /// an HTTP header.
    pub fn project<N, I, B>(name: N, id: I, bearer: B) -> Result<Self>
    where
        N: Into<String>,
        I: Into<String>,
        B: Into<String>,
    {
        let (name, id, bearer) = (name.into(), id.into(), bearer.into());
        if name.trim().is_empty() {
            return Err(GeneratorError::InvalidCredential(
                "Google Cloud project name is required.".to_string(),
            ));
        }
        if id.trim().is_empty() {
            return Err(GeneratorError::InvalidCredential(
                "Google Cloud project ID is required.".to_string(),
            ));
        }
        if bearer.trim().is_empty() {
            return Err(GeneratorError::InvalidCredential(
                "Bearer token is required.".to_string(),
            ));
        }
        let bearer = SecretString::from(bearer);
        let headers = HttpHeaderBuilder::new()
            .with_header(name.trim(), id.trim())?
            .with_json_accept()
            .with_bearer_auth(bearer.expose_secret().trim())?
            .build();
        Ok(Self::Project { name, id, headers })
    }

    /// API key from `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let key = std::env::var(ENV_API_KEY).map_err(|_| {
            GeneratorError::InvalidCredential(format!("{ENV_API_KEY} is not set."))
        })?;
        Self::api_key(key)
    }

    pub const fn is_api_key(&self) -> bool {
        matches!(self, Self::ApiKey(_))
    }

    /// `?key=...` suffix for API-key credentials.
    pub fn query_suffix(&self) -> Option<String> {
        match self {
            Self::ApiKey(key) => Some(format!(
                "?key={}",
                urlencoding::encode(key.expose_secret())
            )),
            Self::Project { .. } => None,
        }
    }

    /// Auth headers. Empty for API-key credentials.
    pub fn headers(&self) -> HeaderMap {
        match self {
            Self::ApiKey(_) => HeaderMap::new(),
            Self::Project { headers, .. } => headers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn valid_key() -> String {
        format!("AIza{}", "x".repeat(35))
    }

    #[test]
    fn api_key_is_trimmed_and_hidden() {
        let creds = Credentials::api_key(format!("  {}  ", valid_key())).unwrap();
        assert_eq!(
            creds.query_suffix().unwrap(),
            format!("?key={}", valid_key())
        );
        assert!(creds.headers().is_empty());
        let dbg = format!("{creds:?}");
        assert!(!dbg.contains(&valid_key()));
    }

    #[test]
    fn malformed_key_is_rejected() {
        let err = Credentials::api_key("not-a-key").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid credential: Invalid or expired API key."
        );
    }

    #[test]
    fn project_requires_every_argument() {
        let err = Credentials::project("", "id", "tok").unwrap_err();
        assert!(err.to_string().contains("project name is required"));
        let err = Credentials::project("name", "", "tok").unwrap_err();
        assert!(err.to_string().contains("project ID is required"));
        let err = Credentials::project("name", "id", "").unwrap_err();
        assert!(err.to_string().contains("Bearer token is required"));
    }

    #[test]
    fn project_headers() {
        let creds = Credentials::project("x-goog-user-project", "proj-1", "secret").unwrap();
        let headers = creds.headers();
        assert_eq!(headers.get("x-goog-user-project").unwrap(), "proj-1");
        assert_eq!(headers.get("authorization").unwrap(), "Bearer secret");
        assert_eq!(headers.get("accept").unwrap(), "application/json");
        assert!(creds.query_suffix().is_none());
        assert!(!format!("{creds:?}").contains("secret"));
    }

    #[test]
    fn unusable_project_header_fails_at_construction() {
        let err = Credentials::project("bad name", "p-1", "tok").unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidCredential(_)));
        assert!(err.to_string().contains("Invalid header name 'bad name'"));

        let err = Credentials::project("x-goog-user-project", "p\n1", "tok").unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidCredential(_)));
    }

    #[test]
    fn config_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (ENV_BASE_URL, "http://localhost:8080/models/"),
            (ENV_TIMEOUT_SECS, "5"),
        ]
        .into_iter()
        .collect();
        let config =
            GeneratorConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/models");
        assert_eq!(config.timeout_duration(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn bad_timeout_is_configuration_error() {
        let err = GeneratorConfig::from_lookup(|k| {
            (k == ENV_TIMEOUT_SECS).then(|| "soon".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, GeneratorError::ConfigurationError(_)));
    }

    #[test]
    fn defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, None);
        assert_eq!(config.timeout_duration(), None);
        assert!(!config.response_options.includes_grounding_detail());
    }
}
