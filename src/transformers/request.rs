//! Request transformation
//!
//! `contents` holds the chat history in order, followed by a `user` turn made
//! of the prompt text and any attached images.

use crate::error::{GeneratorError, Result};
use crate::types::{
    ChatMessage, Content, ContentPart, GeminiTool, GenerateContentRequest, GenerationRequest,
    ImageData, Part, Role,
};

/// Transform a [`GenerationRequest`] into a provider-specific payload
pub trait RequestTransformer: Send + Sync {
    /// Transform into the typed wire request
    fn transform(&self, req: &GenerationRequest) -> Result<GenerateContentRequest>;

    /// Transform into a JSON body
    fn transform_json(&self, req: &GenerationRequest) -> Result<serde_json::Value> {
        let body = self.transform(req)?;
        serde_json::to_value(&body).map_err(|e| {
            GeneratorError::InvalidRequest(format!("Failed to serialize request: {e}"))
        })
    }
}

/// `generateContent` request transformer
#[derive(Debug, Clone, Copy, Default)]
pub struct GeminiRequestTransformer;

impl RequestTransformer for GeminiRequestTransformer {
    fn transform(&self, req: &GenerationRequest) -> Result<GenerateContentRequest> {
        let mut contents: Vec<Content> = req.chat_history().iter().map(message_content).collect();

        let mut current = Vec::new();
        if let Some(prompt) = req.prompt() {
            current.push(ContentPart::text(prompt));
        }
        current.extend(req.images().iter().map(image_part));
        if !current.is_empty() {
            contents.push(Content {
                role: Some(Role::User.as_str().to_string()),
                parts: current,
            });
        }

        Ok(GenerateContentRequest {
            contents,
            system_instruction: req
                .system_instruction()
                .map(|text| Content::text(None, text)),
            tools: req
                .grounding_enabled()
                .then(|| vec![GeminiTool::google_search()]),
            safety_settings: req.safety_settings().map(<[_]>::to_vec),
            generation_config: req.generation_config().cloned(),
        })
    }
}

fn message_content(message: &ChatMessage) -> Content {
    Content {
        role: Some(message.role.as_str().to_string()),
        parts: message
            .parts
            .iter()
            .map(|part| match part {
                Part::Text(text) => ContentPart::text(text.as_str()),
                Part::Image(image) => image_part(image),
            })
            .collect(),
    }
}

fn image_part(image: &ImageData) -> ContentPart {
    ContentPart::inline_data(image.mime_type.as_str(), image.data.as_str())
}
