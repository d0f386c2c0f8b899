//! Gemini API wire types
//!
//! Serde DTOs for the `generateContent` request body and both response
//! shapes. Unknown fields are ignored and missing optional fields decode to
//! `None` or empty.

use serde::{Deserialize, Serialize};

use super::request::{GenerationConfig, SafetySetting};

/// Gemini Generate Content Request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    /// Required. The content of the current conversation with the model.
    pub contents: Vec<Content>,
    /// Optional. Developer set system instructions.
    #[serde(skip_serializing_if = "Option::is_none", rename = "systemInstruction")]
    pub system_instruction: Option<Content>,
    /// Optional. A list of Tools the Model may use to generate the next response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<GeminiTool>>,
    /// Optional. A list of unique `SafetySetting` instances for blocking unsafe content.
    #[serde(skip_serializing_if = "Option::is_none", rename = "safetySettings")]
    pub safety_settings: Option<Vec<SafetySetting>>,
    /// Optional. Configuration options for model generation and outputs.
    #[serde(skip_serializing_if = "Option::is_none", rename = "generationConfig")]
    pub generation_config: Option<GenerationConfig>,
}

/// A role-tagged list of parts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<ContentPart>,
}

impl Content {
    pub fn text(role: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![ContentPart::text(text)],
        }
    }
}

/// One part of a `Content`. Exactly one field is expected to be set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "inlineData")]
    pub inline_data: Option<Blob>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "functionCall")]
    pub function_call: Option<FunctionCall>,
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            inline_data: Some(Blob {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
            ..Self::default()
        }
    }
}

/// Inline media bytes (base64).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blob {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

/// A function call predicted by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<serde_json::Value>,
}

/// Tool entry. Only Google Search grounding is produced by this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiTool {
    #[serde(skip_serializing_if = "Option::is_none", rename = "googleSearch")]
    pub google_search: Option<GoogleSearch>,
}

impl GeminiTool {
    pub fn google_search() -> Self {
        Self {
            google_search: Some(GoogleSearch {}),
        }
    }
}

/// Google Search grounding tool (serialized as an empty object).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoogleSearch {}

/// Gemini Generate Content Response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    /// Candidate responses from the model.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Returns the prompt's feedback related to the content filters.
    #[serde(skip_serializing_if = "Option::is_none", rename = "promptFeedback")]
    pub prompt_feedback: Option<PromptFeedback>,
    /// Output only. Metadata on the generation requests' token usage.
    #[serde(skip_serializing_if = "Option::is_none", rename = "usageMetadata")]
    pub usage_metadata: Option<UsageMetadata>,
    /// Output only. The model version used to generate the response.
    #[serde(skip_serializing_if = "Option::is_none", rename = "modelVersion")]
    pub model_version: Option<String>,
}

/// One generated response alternative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "finishReason")]
    pub finish_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "groundingMetadata")]
    pub grounding_metadata: Option<GroundingMetadata>,
    #[serde(default, rename = "safetyRatings")]
    pub safety_ratings: Vec<SafetyRating>,
}

/// Safety rating
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyRating {
    pub category: String,
    pub probability: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked: Option<bool>,
}

/// Feedback on the prompt itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptFeedback {
    /// Set when the prompt was blocked and no candidates are returned.
    #[serde(skip_serializing_if = "Option::is_none", rename = "blockReason")]
    pub block_reason: Option<String>,
    #[serde(default, rename = "safetyRatings")]
    pub safety_ratings: Vec<SafetyRating>,
}

/// Grounding metadata for search-grounded responses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroundingMetadata {
    #[serde(skip_serializing_if = "Option::is_none", rename = "searchEntryPoint")]
    pub search_entry_point: Option<SearchEntryPoint>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "webSearchQueries")]
    pub web_search_queries: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "groundingSupports")]
    pub grounding_supports: Option<Vec<GroundingSupport>>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "groundingChunks")]
    pub grounding_chunks: Option<Vec<GroundingChunk>>,
}

/// Search entry point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEntryPoint {
    /// Rendered HTML/CSS snippet for the search suggestions
    #[serde(skip_serializing_if = "Option::is_none", rename = "renderedContent")]
    pub rendered_content: Option<String>,
}

/// A grounded segment of the response and the chunks backing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundingSupport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<Segment>,
    #[serde(default, rename = "groundingChunkIndices")]
    pub grounding_chunk_indices: Vec<u32>,
    #[serde(default, rename = "confidenceScores")]
    pub confidence_scores: Vec<f64>,
}

impl GroundingSupport {
    /// Highest confidence score, if any.
    pub fn max_confidence(&self) -> Option<f64> {
        self.confidence_scores.iter().copied().reduce(f64::max)
    }
}

/// Segment information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    #[serde(skip_serializing_if = "Option::is_none", rename = "startIndex")]
    pub start_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "endIndex")]
    pub end_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A grounding source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundingChunk {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web: Option<WebGroundingChunk>,
}

/// Web source of a grounding chunk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebGroundingChunk {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Metadata on the generation requests' token usage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageMetadata {
    #[serde(skip_serializing_if = "Option::is_none", rename = "promptTokenCount")]
    pub prompt_token_count: Option<i32>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        rename = "candidatesTokenCount"
    )]
    pub candidates_token_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "totalTokenCount")]
    pub total_token_count: Option<i32>,
    #[serde(default, rename = "promptTokensDetails")]
    pub prompt_tokens_details: Vec<PromptTokensDetail>,
}

/// Token count for one input modality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptTokensDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "tokenCount")]
    pub token_count: Option<i32>,
}

/// Failure body: `{"error": {"code", "message", "status"}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

impl ApiErrorBody {
    /// `STATUS (code): message`
    pub fn describe(&self) -> String {
        format!("{} ({}): {}", self.status, self.code, self.message)
    }
}

/// A response body resolved by HTTP status.
#[derive(Debug, Clone)]
pub enum ApiResponse {
    Success(GenerateContentResponse),
    /// `error` is `None` when the body was not a failure object.
    Failure {
        http_status: u16,
        error: Option<ApiErrorBody>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn google_search_tool_wire_form() {
        let json = serde_json::to_value(vec![GeminiTool::google_search()]).unwrap();
        assert_eq!(json, json!([{"googleSearch": {}}]));
    }

    #[test]
    fn success_decodes_with_unknown_and_missing_fields() {
        let body = json!({
            "candidates": [{
                "content": {"parts": [{"text": "hi"}], "role": "model"},
                "finishReason": "STOP",
                "avgLogprobs": -0.1
            }],
            "usageMetadata": {
                "promptTokenCount": 3,
                "promptTokensDetails": [{"modality": "TEXT", "tokenCount": 3}]
            }
        });
        let resp: GenerateContentResponse = serde_json::from_value(body).unwrap();
        assert_eq!(resp.candidates.len(), 1);
        assert!(resp.candidates[0].grounding_metadata.is_none());
        let usage = resp.usage_metadata.unwrap();
        assert_eq!(usage.prompt_tokens_details[0].token_count, Some(3));
        assert!(resp.model_version.is_none());
    }

    #[test]
    fn max_confidence_handles_empty_scores() {
        let support = GroundingSupport {
            segment: None,
            grounding_chunk_indices: vec![],
            confidence_scores: vec![],
        };
        assert_eq!(support.max_confidence(), None);
        let support = GroundingSupport {
            confidence_scores: vec![0.2, 0.9, 0.5],
            ..support
        };
        assert_eq!(support.max_confidence(), Some(0.9));
    }

    #[test]
    fn error_body_describe() {
        let err: ApiErrorResponse = serde_json::from_value(json!({
            "error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}
        }))
        .unwrap();
        assert_eq!(
            err.error.describe(),
            "INVALID_ARGUMENT (400): API key not valid."
        );
    }
}
