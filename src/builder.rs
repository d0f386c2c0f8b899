//! Request builder
//!
//! Fluent accumulation of prompt, history, images and options into an
//! immutable [`GenerationRequest`].

use crate::error::{GeneratorError, Result};
use crate::types::{ChatMessage, GenerationConfig, GenerationRequest, SafetySetting};
use crate::utils::image::ImageData;

/// Builder for [`GenerationRequest`].
///
/// # Example
/// ```rust,ignore
/// use gemini_content::builder::GenerationRequestBuilder;
///
/// let request = GenerationRequestBuilder::new()
///     .with_prompt("Summarize the news about Rust 2024")
///     .with_default_generation_config()
///     .enable_grounding()
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct GenerationRequestBuilder {
    /// Prompt for the current turn
    prompt: Option<String>,
    /// Prior turns
    chat_history: Vec<ChatMessage>,
    /// Images attached to the current turn
    images: Vec<ImageData>,
    /// System instruction
    system_instruction: Option<String>,
    /// Generation configuration
    generation_config: Option<GenerationConfig>,
    /// Safety settings
    safety_settings: Option<Vec<SafetySetting>>,
    /// Google Search grounding
    grounding: bool,
}

impl GenerationRequestBuilder {
    /// Create a new, empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the prompt, replacing any previous one
    pub fn with_prompt<S: Into<String>>(mut self, prompt: S) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Set prior turns. Order and roles are preserved.
    pub fn with_chat_history(mut self, messages: Vec<ChatMessage>) -> Self {
        self.chat_history = messages;
        self
    }

    /// Attach base64 images or data URIs to the current turn
    pub fn with_base64_images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.images
            .extend(images.into_iter().map(|i| ImageData::from_base64(i.as_ref())));
        self
    }

    /// Attach raw image bytes to the current turn, sniffing the MIME type
    pub fn with_image_bytes<I, B>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        self.images
            .extend(images.into_iter().map(|b| ImageData::from_bytes(b.as_ref())));
        self
    }

    /// Set the system instruction
    pub fn with_system_instruction<S: Into<String>>(mut self, instruction: S) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Use [`GenerationConfig::standard`]
    pub fn with_default_generation_config(mut self) -> Self {
        self.generation_config = Some(GenerationConfig::standard());
        self
    }

    /// Set the generation configuration as given
    ///
    /// A schema without the JSON MIME type is accepted here and rejected by
    /// the generator only if the target model cannot produce JSON.
    pub fn with_generation_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }

    /// Request JSON output, optionally constrained by a schema
    ///
    /// Applies to the current generation config, or to the standard one when
    /// none was set yet.
    pub fn with_json_output(mut self, schema: Option<serde_json::Value>) -> Self {
        let config = self
            .generation_config
            .take()
            .unwrap_or_else(GenerationConfig::standard);
        self.generation_config = Some(config.with_json_output(schema));
        self
    }

    /// Set every harm category to `BLOCK_NONE`
    pub fn disable_all_safety_settings(mut self) -> Self {
        self.safety_settings = Some(SafetySetting::disable_all());
        self
    }

    /// Set safety settings
    pub fn with_safety_settings(mut self, settings: Vec<SafetySetting>) -> Self {
        self.safety_settings = Some(settings);
        self
    }

    /// Enable Google Search grounding
    pub const fn enable_grounding(mut self) -> Self {
        self.grounding = true;
        self
    }

    /// Freeze the accumulated state.
    ///
    /// Fails when neither a non-blank prompt nor any chat history was supplied.
    pub fn build(self) -> Result<GenerationRequest> {
        let prompt = self.prompt.filter(|p| !p.trim().is_empty());
        if prompt.is_none() && self.chat_history.is_empty() {
            return Err(GeneratorError::InvalidRequest(
                "A prompt or chat history is required.".to_string(),
            ));
        }

        Ok(GenerationRequest {
            prompt,
            chat_history: self.chat_history,
            images: self.images,
            system_instruction: self.system_instruction,
            generation_config: self.generation_config,
            safety_settings: self.safety_settings,
            grounding: self.grounding,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HarmBlockThreshold, MIME_TYPE_JSON, MIME_TYPE_PLAIN_TEXT, Role};
    use crate::utils::image::ImageMimeType;
    use serde_json::json;

    #[test]
    fn build_without_prompt_or_history_fails() {
        let err = GenerationRequestBuilder::new().build().unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidRequest(_)));

        let err = GenerationRequestBuilder::new()
            .with_prompt("   ")
            .build()
            .unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidRequest(_)));
    }

    #[test]
    fn history_alone_is_enough() {
        let request = GenerationRequestBuilder::new()
            .with_chat_history(vec![ChatMessage::user("hi"), ChatMessage::model("hello")])
            .build()
            .unwrap();
        assert!(request.prompt().is_none());
        let roles: Vec<_> = request.chat_history().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Model]);
    }

    #[test]
    fn prompt_is_overwritten() {
        let request = GenerationRequestBuilder::new()
            .with_prompt("first")
            .with_prompt("second")
            .build()
            .unwrap();
        assert_eq!(request.prompt(), Some("second"));
    }

    #[test]
    fn default_generation_config() {
        let request = GenerationRequestBuilder::new()
            .with_prompt("x")
            .with_default_generation_config()
            .build()
            .unwrap();
        let config = request.generation_config().unwrap();
        assert_eq!(config.temperature, Some(1.0));
        assert_eq!(config.top_p, Some(0.95));
        assert_eq!(config.top_k, Some(40));
        assert_eq!(config.max_output_tokens, Some(8192));
        assert_eq!(config.response_mime_type.as_deref(), Some(MIME_TYPE_PLAIN_TEXT));
        assert!(config.response_schema.is_none());
    }

    #[test]
    fn json_output_keeps_existing_config() {
        let request = GenerationRequestBuilder::new()
            .with_prompt("x")
            .with_generation_config(GenerationConfig::new().with_temperature(0.2))
            .with_json_output(Some(json!({"type": "STRING"})))
            .build()
            .unwrap();
        let config = request.generation_config().unwrap();
        assert_eq!(config.temperature, Some(0.2));
        assert_eq!(config.response_mime_type.as_deref(), Some(MIME_TYPE_JSON));
        assert!(request.requests_json_output());
        assert!(request.has_response_schema());
    }

    #[test]
    fn schema_without_json_mime_is_accepted() {
        let request = GenerationRequestBuilder::new()
            .with_prompt("x")
            .with_generation_config(GenerationConfig::standard().with_response_schema(json!({})))
            .build()
            .unwrap();
        assert!(request.has_response_schema());
        assert!(!request.requests_json_output());
    }

    #[test]
    fn images_and_flags() {
        let request = GenerationRequestBuilder::new()
            .with_prompt("describe")
            .with_base64_images(["data:image/png;base64,AAA=", "BBB="])
            .disable_all_safety_settings()
            .enable_grounding()
            .with_system_instruction("be brief")
            .build()
            .unwrap();
        assert_eq!(request.images().len(), 2);
        assert_eq!(request.images()[0].mime_type, ImageMimeType::Png);
        assert_eq!(request.images()[1].mime_type, ImageMimeType::Jpeg);
        assert!(request.grounding_enabled());
        assert_eq!(request.system_instruction(), Some("be brief"));
        assert!(
            request
                .safety_settings()
                .unwrap()
                .iter()
                .all(|s| s.threshold == HarmBlockThreshold::BlockNone)
        );
    }
}
