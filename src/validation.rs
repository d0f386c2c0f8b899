//! Request and credential validation
//!
//! Capability checks run before any network call. API key validation asks the
//! API and reports the outcome as a boolean.

use crate::builder::GenerationRequestBuilder;
use crate::config::GeneratorConfig;
use crate::error::{GeneratorError, Result};
use crate::generator::Generator;
use crate::models::{ModelTarget, ModelVersion};
use crate::types::GenerationRequest;

/// Prompt sent when probing an API key.
pub const KEY_PROBE_PROMPT: &str = "Say `Hello World` to me!";

/// Model used when probing an API key.
pub const KEY_PROBE_MODEL: ModelVersion = ModelVersion::Gemini15Flash;

/// Check `request` against the capabilities of `model`.
pub fn validate_capabilities(request: &GenerationRequest, model: ModelVersion) -> Result<()> {
    if request.grounding_enabled() && !model.supports_grounding() {
        return Err(GeneratorError::UnsupportedFeature(
            "Grounding is not supported for this model version.".to_string(),
        ));
    }

    if request.requests_json_output() && !model.supports_json_output() {
        return Err(GeneratorError::UnsupportedFeature(
            "JSON output is not supported for this model version.".to_string(),
        ));
    }

    if request.has_response_schema() && !model.supports_json_output() {
        return Err(GeneratorError::UnsupportedFeature(
            "Choose the model version that support JSON output or remove the ResponseSchema"
                .to_string(),
        ));
    }

    Ok(())
}

/// Validate `request` for `target` and return the wire name to call.
///
/// Aliases naming a known version are validated as that version; unknown
/// aliases are passed through unchecked.
pub fn validate_target<'a>(request: &GenerationRequest, target: &'a ModelTarget) -> Result<&'a str> {
    if let ModelTarget::Alias(alias) = target
        && alias.trim().is_empty()
    {
        return Err(GeneratorError::InvalidRequest(
            "Model alias is required.".to_string(),
        ));
    }

    if let Some(version) = target.resolve() {
        validate_capabilities(request, version)?;
    }

    Ok(target.wire_name())
}

/// The request used to probe an API key.
pub fn key_probe_request() -> Result<GenerationRequest> {
    GenerationRequestBuilder::new()
        .with_prompt(KEY_PROBE_PROMPT)
        .disable_all_safety_settings()
        .with_default_generation_config()
        .build()
}

/// Whether `api_key` is accepted by the API. Every failure yields `false`.
pub async fn is_valid_api_key(api_key: &str) -> bool {
    is_valid_api_key_with_config(api_key, GeneratorConfig::default()).await
}

/// Like [`is_valid_api_key`], against a custom endpoint or timeout.
pub async fn is_valid_api_key_with_config(api_key: &str, config: GeneratorConfig) -> bool {
    match Generator::new(api_key).and_then(|g| g.with_config(config)) {
        Ok(generator) => generator.is_valid_api_key().await,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GenerationConfig;
    use serde_json::json;

    fn request(builder: GenerationRequestBuilder) -> GenerationRequest {
        builder.with_prompt("x").build().unwrap()
    }

    #[test]
    fn grounding_needs_capable_model() {
        let req = request(GenerationRequestBuilder::new().enable_grounding());
        let err = validate_capabilities(&req, ModelVersion::Gemini20FlashLite).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported feature: Grounding is not supported for this model version."
        );
        assert!(validate_capabilities(&req, ModelVersion::Gemini20Flash).is_ok());
    }

    #[test]
    fn json_mime_needs_capable_model() {
        let req = request(GenerationRequestBuilder::new().with_json_output(None));
        let err = validate_capabilities(&req, ModelVersion::Gemini20FlashThinkingExp).unwrap_err();
        assert!(err.to_string().contains("JSON output is not supported"));
        assert!(validate_capabilities(&req, ModelVersion::Gemini15Flash8B).is_ok());
    }

    #[test]
    fn schema_needs_capable_model_even_without_json_mime() {
        let req = request(
            GenerationRequestBuilder::new()
                .with_generation_config(GenerationConfig::standard().with_response_schema(json!({}))),
        );
        let err = validate_capabilities(&req, ModelVersion::Gemini20FlashThinkingExp).unwrap_err();
        assert!(err.to_string().contains("remove the ResponseSchema"));
    }

    #[test]
    fn aliases() {
        let req = request(GenerationRequestBuilder::new().enable_grounding());

        let empty = ModelTarget::Alias("  ".to_string());
        assert!(matches!(
            validate_target(&req, &empty),
            Err(GeneratorError::InvalidRequest(_))
        ));

        let known = ModelTarget::from("gemini-2.0-flash-lite");
        assert!(matches!(
            validate_target(&req, &known),
            Err(GeneratorError::UnsupportedFeature(_))
        ));

        let unknown = ModelTarget::from("gemini-exp-1206");
        assert_eq!(validate_target(&req, &unknown).unwrap(), "gemini-exp-1206");
    }

    #[test]
    fn probe_request_shape() {
        let req = key_probe_request().unwrap();
        assert_eq!(req.prompt(), Some(KEY_PROBE_PROMPT));
        assert!(req.safety_settings().is_some());
        assert!(req.generation_config().is_some());
    }

    #[test]
    fn malformed_key_is_invalid_without_network() {
        assert!(!tokio_test::block_on(is_valid_api_key("nope")));
    }
}
