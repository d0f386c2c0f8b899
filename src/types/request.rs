//! Request-side types
//!
//! Chat turns, generation and safety configuration, and the frozen
//! [`GenerationRequest`] produced by [`crate::builder::GenerationRequestBuilder`].

use serde::{Deserialize, Serialize};

use crate::utils::image::ImageData;

/// Response MIME type for plain text output.
pub const MIME_TYPE_PLAIN_TEXT: &str = "text/plain";
/// Response MIME type for JSON output.
pub const MIME_TYPE_JSON: &str = "application/json";

/// Author of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

/// One piece of a chat turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Part {
    Text(String),
    Image(ImageData),
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Image(_) => None,
        }
    }
}

/// A prior turn in the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl ChatMessage {
    pub fn new(role: Role, parts: Vec<Part>) -> Self {
        Self { role, parts }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, vec![Part::text(text)])
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::new(Role::Model, vec![Part::text(text)])
    }

    /// Append an image to this turn.
    pub fn with_image(mut self, image: ImageData) -> Self {
        self.parts.push(Part::Image(image));
        self
    }
}

/// Configuration options for model generation and outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GenerationConfig {
    /// Optional. Controls the randomness of the output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Optional. The maximum cumulative probability of tokens to consider when sampling.
    #[serde(skip_serializing_if = "Option::is_none", rename = "topP")]
    pub top_p: Option<f64>,
    /// Optional. The maximum number of tokens to consider when sampling.
    #[serde(skip_serializing_if = "Option::is_none", rename = "topK")]
    pub top_k: Option<i32>,
    /// Optional. The maximum number of tokens to include in a candidate.
    #[serde(skip_serializing_if = "Option::is_none", rename = "maxOutputTokens")]
    pub max_output_tokens: Option<i32>,
    /// Optional. Output response mimetype of the generated candidate text.
    #[serde(skip_serializing_if = "Option::is_none", rename = "responseMimeType")]
    pub response_mime_type: Option<String>,
    /// Optional. Output response schema of the generated candidate text.
    #[serde(skip_serializing_if = "Option::is_none", rename = "responseSchema")]
    pub response_schema: Option<serde_json::Value>,
    /// Optional. The set of character sequences that will stop output generation.
    #[serde(skip_serializing_if = "Option::is_none", rename = "stopSequences")]
    pub stop_sequences: Option<Vec<String>>,
    /// Optional. Number of generated responses to return.
    #[serde(skip_serializing_if = "Option::is_none", rename = "candidateCount")]
    pub candidate_count: Option<i32>,
}

impl GenerationConfig {
    /// Create an empty generation configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Temperature 1.0, top-p 0.95, top-k 40, 8192 output tokens, plain text.
    pub fn standard() -> Self {
        Self {
            temperature: Some(1.0),
            top_p: Some(0.95),
            top_k: Some(40),
            max_output_tokens: Some(8192),
            response_mime_type: Some(MIME_TYPE_PLAIN_TEXT.to_string()),
            ..Self::default()
        }
    }

    /// Set temperature
    pub fn with_temperature(mut self, t: f64) -> Self {
        self.temperature = Some(t);
        self
    }
    /// Set top_p
    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }
    /// Set top_k
    pub fn with_top_k(mut self, top_k: i32) -> Self {
        self.top_k = Some(top_k);
        self
    }
    /// Set max output tokens
    pub fn with_max_output_tokens(mut self, max: i32) -> Self {
        self.max_output_tokens = Some(max);
        self
    }
    /// Set stop sequences
    pub fn with_stop_sequences(mut self, stop: Vec<String>) -> Self {
        self.stop_sequences = Some(stop);
        self
    }
    /// Set the number of candidates to generate
    pub fn with_candidate_count(mut self, count: i32) -> Self {
        self.candidate_count = Some(count);
        self
    }

    /// Set response mime type
    pub fn with_response_mime_type(mut self, mime: impl Into<String>) -> Self {
        self.response_mime_type = Some(mime.into());
        self
    }

    /// Set response schema. Does not touch the MIME type; see [`Self::with_json_output`].
    pub fn with_response_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    /// JSON MIME type plus an optional schema.
    pub fn with_json_output(mut self, schema: Option<serde_json::Value>) -> Self {
        self.response_mime_type = Some(MIME_TYPE_JSON.to_string());
        self.response_schema = schema;
        self
    }

    pub fn requests_json_output(&self) -> bool {
        self.response_mime_type
            .as_deref()
            .is_some_and(|m| m.trim().eq_ignore_ascii_case(MIME_TYPE_JSON))
    }
}

/// Harm categories covered by safety settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HarmCategory {
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
    #[serde(rename = "HARM_CATEGORY_CIVIC_INTEGRITY")]
    CivicIntegrity,
}

impl HarmCategory {
    pub const ALL: [Self; 5] = [
        Self::Harassment,
        Self::HateSpeech,
        Self::SexuallyExplicit,
        Self::DangerousContent,
        Self::CivicIntegrity,
    ];
}

/// Blocking threshold for a harm category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    BlockNone,
    BlockOnlyHigh,
    BlockMediumAndAbove,
    BlockLowAndAbove,
    Off,
}

/// Threshold for one harm category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

impl SafetySetting {
    pub const fn new(category: HarmCategory, threshold: HarmBlockThreshold) -> Self {
        Self {
            category,
            threshold,
        }
    }

    /// Every category set to `BLOCK_NONE`.
    pub fn disable_all() -> Vec<Self> {
        HarmCategory::ALL
            .iter()
            .map(|c| Self::new(*c, HarmBlockThreshold::BlockNone))
            .collect()
    }
}

/// A complete, immutable request.
///
/// Only [`crate::builder::GenerationRequestBuilder::build`] creates one.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub(crate) prompt: Option<String>,
    pub(crate) chat_history: Vec<ChatMessage>,
    pub(crate) images: Vec<ImageData>,
    pub(crate) system_instruction: Option<String>,
    pub(crate) generation_config: Option<GenerationConfig>,
    pub(crate) safety_settings: Option<Vec<SafetySetting>>,
    pub(crate) grounding: bool,
}

impl GenerationRequest {
    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    pub fn chat_history(&self) -> &[ChatMessage] {
        &self.chat_history
    }

    pub fn images(&self) -> &[ImageData] {
        &self.images
    }

    pub fn system_instruction(&self) -> Option<&str> {
        self.system_instruction.as_deref()
    }

    pub fn generation_config(&self) -> Option<&GenerationConfig> {
        self.generation_config.as_ref()
    }

    pub fn safety_settings(&self) -> Option<&[SafetySetting]> {
        self.safety_settings.as_deref()
    }

    pub fn grounding_enabled(&self) -> bool {
        self.grounding
    }

    /// JSON MIME type requested through the generation config.
    pub fn requests_json_output(&self) -> bool {
        self.generation_config
            .as_ref()
            .is_some_and(GenerationConfig::requests_json_output)
    }

    pub fn has_response_schema(&self) -> bool {
        self.generation_config
            .as_ref()
            .is_some_and(|c| c.response_schema.is_some())
    }
}
