//! Content generator
//!
//! Owns credentials, transport and response options. Each call validates the
//! request against the target model, sends it and maps the response.
//!
//! # Example
//! ```rust,ignore
//! use gemini_content::prelude::*;
//!
//! let generator = Generator::from_env()?
//!     .includes_grounding_detail_in_response()
//!     .includes_search_entry_point_in_response()?;
//!
//! let request = GenerationRequestBuilder::new()
//!     .with_prompt("Who won the last Tour de France?")
//!     .enable_grounding()
//!     .build()?;
//!
//! let response = generator
//!     .generate_content(&request, ModelVersion::Gemini20Flash)
//!     .await?;
//! ```

use std::sync::Arc;
use std::time::Instant;

use crate::config::{Credentials, GeneratorConfig};
use crate::error::{GeneratorError, Result};
use crate::models::{ModelTarget, ModelVersion};
use crate::observability::tracing::ProviderTracer;
use crate::transformers::{
    GeminiRequestTransformer, GeminiResponseTransformer, RequestTransformer, ResponseTransformer,
};
use crate::transport::{HttpTransport, HttpTransportRequest, ReqwestTransport};
use crate::types::{GenerationRequest, ModelResponse, ResponseOptions};
use crate::utils::cancel::CancelHandle;
use crate::validation;

const PROVIDER_ID: &str = "gemini";

/// Client for the `generateContent` endpoint.
///
/// Response options are fixed for the lifetime of a value: the toggles
/// consume the generator and return a new one.
#[derive(Clone)]
pub struct Generator {
    credentials: Credentials,
    config: GeneratorConfig,
    transport: Arc<dyn HttpTransport>,
    custom_transport: bool,
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("credentials", &self.credentials)
            .field("config", &self.config)
            .field("custom_transport", &self.custom_transport)
            .finish()
    }
}

impl Generator {
    /// Authenticate with an API key.
    pub fn new<S: AsRef<str>>(api_key: S) -> Result<Self> {
        Self::from_credentials(Credentials::api_key(api_key)?, GeneratorConfig::default())
    }

    /// Authenticate with a Google Cloud project header and bearer token.
    pub fn with_project<N, I, B>(name: N, id: I, bearer: B) -> Result<Self>
    where
        N: Into<String>,
        I: Into<String>,
        B: Into<String>,
    {
        Self::from_credentials(
            Credentials::project(name, id, bearer)?,
            GeneratorConfig::default(),
        )
    }

    /// API key from `GEMINI_API_KEY`, config from `GEMINI_BASE_URL` and
    /// `GEMINI_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_credentials(Credentials::from_env()?, GeneratorConfig::from_env()?)
    }

    pub fn from_credentials(credentials: Credentials, config: GeneratorConfig) -> Result<Self> {
        let transport = ReqwestTransport::from_config(&config)?;
        Ok(Self {
            credentials,
            config,
            transport: Arc::new(transport),
            custom_transport: false,
        })
    }

    /// Replace the configuration, rebuilding the default transport.
    ///
    /// Response options already set through the `includes_*` toggles are kept
    /// when `config` carries the default options; non-default options in
    /// `config` replace them. Use the `excludes_*` toggles to reset.
    pub fn with_config(mut self, mut config: GeneratorConfig) -> Result<Self> {
        if !self.custom_transport {
            self.transport = Arc::new(ReqwestTransport::from_config(&config)?);
        }
        if config.response_options == ResponseOptions::default() {
            config.response_options = self.config.response_options;
        }
        self.config = config;
        Ok(self)
    }

    /// Send requests through `transport` instead of `reqwest`.
    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = transport;
        self.custom_transport = true;
        self
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.config = self.config.with_base_url(base_url);
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn response_options(&self) -> ResponseOptions {
        self.config.response_options
    }

    /// Copy grounding detail into responses.
    pub fn includes_grounding_detail_in_response(mut self) -> Self {
        self.config.response_options = self.config.response_options.with_grounding_detail();
        self
    }

    /// Drop grounding detail from responses. Also drops the search entry point.
    pub fn excludes_grounding_detail_from_response(mut self) -> Self {
        self.config.response_options = self.config.response_options.without_grounding_detail();
        self
    }

    /// Copy the search entry point HTML into grounding detail.
    ///
    /// Fails unless grounding detail is already included.
    pub fn includes_search_entry_point_in_response(mut self) -> Result<Self> {
        self.config.response_options = self
            .config
            .response_options
            .with_search_entry_point()
            .ok_or_else(|| {
                GeneratorError::InvalidState(
                    "Grounding detail must be included in the response to include search entry point."
                        .to_string(),
                )
            })?;
        Ok(self)
    }

    pub fn excludes_search_entry_point_from_response(mut self) -> Self {
        self.config.response_options = self.config.response_options.without_search_entry_point();
        self
    }

    /// The model used by [`Self::generate_content_with_default_model`].
    pub fn latest_stable_model_version() -> ModelVersion {
        ModelVersion::latest_stable()
    }

    /// Generate content with `model`, a [`ModelVersion`] or an alias string.
    pub async fn generate_content(
        &self,
        request: &GenerationRequest,
        model: impl Into<ModelTarget>,
    ) -> Result<ModelResponse> {
        let options = self.config.response_options;
        self.generate_content_with_options(request, model, &options)
            .await
    }

    pub async fn generate_content_with_default_model(
        &self,
        request: &GenerationRequest,
    ) -> Result<ModelResponse> {
        self.generate_content(request, Self::latest_stable_model_version())
            .await
    }

    /// Generate content with per-call response options.
    pub async fn generate_content_with_options(
        &self,
        request: &GenerationRequest,
        model: impl Into<ModelTarget>,
        options: &ResponseOptions,
    ) -> Result<ModelResponse> {
        let target = model.into();
        let wire_name = validation::validate_target(request, &target)?;
        self.execute(request, wire_name, *options).await
    }

    /// Like [`Self::generate_content`], returning [`GeneratorError::Cancelled`]
    /// as soon as `cancel` fires. The in-flight request is dropped.
    pub async fn generate_content_with_cancel(
        &self,
        request: &GenerationRequest,
        model: impl Into<ModelTarget>,
        cancel: &CancelHandle,
    ) -> Result<ModelResponse> {
        if cancel.is_cancelled() {
            return Err(GeneratorError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(GeneratorError::Cancelled),
            result = self.generate_content(request, model) => result,
        }
    }

    /// Probe the configured credentials with a minimal request.
    pub async fn is_valid_api_key(&self) -> bool {
        let Ok(request) = validation::key_probe_request() else {
            return false;
        };
        self.generate_content(&request, validation::KEY_PROBE_MODEL)
            .await
            .is_ok()
    }

    fn endpoint(&self, wire_name: &str) -> String {
        let mut url = format!(
            "{}/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            wire_name
        );
        if let Some(query) = self.credentials.query_suffix() {
            url.push_str(&query);
        }
        url
    }

    async fn execute(
        &self,
        request: &GenerationRequest,
        wire_name: &str,
        options: ResponseOptions,
    ) -> Result<ModelResponse> {
        let url = self.endpoint(wire_name);
        let headers = self.credentials.headers();
        let body = GeminiRequestTransformer.transform_json(request)?;
        let request_json = body.to_string();

        let tracer = ProviderTracer::new(PROVIDER_ID).with_model(wire_name);
        let start = Instant::now();
        tracer.trace_request_start("POST", &url);
        tracer.trace_request_details(&headers, &body);

        let response = self
            .transport
            .execute_json(HttpTransportRequest { url, headers, body })
            .await
            .map_err(|e| {
                tracer.trace_request_error(None, &e.to_string(), start);
                GeneratorError::transport(e, request_json)
            })?;

        let raw_body = response.body_text();
        tracer.trace_response_body(response.status, &raw_body);

        let result = GeminiResponseTransformer::new(options).transform_raw(response.status, &raw_body);
        match &result {
            Ok(_) => tracer.trace_request_complete(start, raw_body.len()),
            Err(e) => tracer.trace_request_error(Some(response.status), &e.to_string(), start),
        }
        result
    }
}
