//! Response transformation
//!
//! The raw body is first resolved into an [`ApiResponse`] using the HTTP
//! status, then mapped into a [`ModelResponse`].

use std::cmp::Ordering;

use crate::error::{GeneratorError, Result, UNDEFINED_UPSTREAM_ERROR};
use crate::types::{
    ApiErrorResponse, ApiResponse, Candidate, FALLBACK_CONTENT, GenerateContentResponse,
    GroundingDetail, GroundingMetadata, GroundingSource, ModelResponse, ResponseOptions,
};

/// Resolve a raw body into the success or failure shape.
///
/// A non-success body that is not an error object still yields
/// [`ApiResponse::Failure`], with `error: None`.
pub fn parse_api_response(http_status: u16, raw_body: &str) -> Result<ApiResponse> {
    if !(200..300).contains(&http_status) {
        let error = serde_json::from_str::<ApiErrorResponse>(raw_body)
            .ok()
            .map(|r| r.error);
        return Ok(ApiResponse::Failure { http_status, error });
    }

    serde_json::from_str::<GenerateContentResponse>(raw_body)
        .map(ApiResponse::Success)
        .map_err(|e| GeneratorError::parse(e, raw_body))
}

/// Transform provider responses into [`ModelResponse`]
pub trait ResponseTransformer: Send + Sync {
    /// Map a resolved response; `raw_body` is attached to any error.
    fn transform_response(&self, response: ApiResponse, raw_body: &str) -> Result<ModelResponse>;

    /// Parse and map in one step
    fn transform_raw(&self, http_status: u16, raw_body: &str) -> Result<ModelResponse> {
        let response = parse_api_response(http_status, raw_body)?;
        self.transform_response(response, raw_body)
    }
}

/// `generateContent` response transformer
#[derive(Debug, Clone, Copy, Default)]
pub struct GeminiResponseTransformer {
    options: ResponseOptions,
}

impl GeminiResponseTransformer {
    pub const fn new(options: ResponseOptions) -> Self {
        Self { options }
    }
}

impl ResponseTransformer for GeminiResponseTransformer {
    fn transform_response(&self, response: ApiResponse, raw_body: &str) -> Result<ModelResponse> {
        match response {
            ApiResponse::Failure { http_status, error } => Err(GeneratorError::UpstreamError {
                http_status,
                message: error
                    .map(|e| e.describe())
                    .unwrap_or_else(|| UNDEFINED_UPSTREAM_ERROR.to_string()),
                raw_body: raw_body.to_string(),
            }),
            ApiResponse::Success(success) => {
                let GenerateContentResponse {
                    candidates,
                    prompt_feedback,
                    model_version,
                    ..
                } = success;

                let Some(candidate) = candidates.into_iter().next() else {
                    let reason = prompt_feedback
                        .and_then(|f| f.block_reason)
                        .map(|r| format!("response contained no candidates (block reason: {r})"))
                        .unwrap_or_else(|| "response contained no candidates".to_string());
                    return Err(GeneratorError::parse(reason, raw_body));
                };

                Ok(self.map_candidate(candidate, model_version))
            }
        }
    }
}

impl GeminiResponseTransformer {
    fn map_candidate(&self, candidate: Candidate, model_version: Option<String>) -> ModelResponse {
        let parts = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default();

        let content = parts
            .first()
            .and_then(|p| p.text.as_deref())
            .map(|t| t.trim().to_string())
            .unwrap_or_else(|| FALLBACK_CONTENT.to_string());

        let function_calls = parts.into_iter().filter_map(|p| p.function_call).collect();

        let grounding_detail = candidate
            .grounding_metadata
            .filter(|_| self.options.includes_grounding_detail())
            .map(|m| grounding_detail(m, self.options));

        ModelResponse {
            content,
            grounding_detail,
            finish_reason: candidate.finish_reason,
            model_version,
            function_calls,
        }
    }
}

/// Derive the grounding summary from candidate metadata.
///
/// Reliable information is ordered by each support's highest confidence
/// score, descending. The sort is stable and supports without scores rank
/// lowest.
pub fn grounding_detail(metadata: GroundingMetadata, options: ResponseOptions) -> GroundingDetail {
    let rendered_content_as_html = if options.includes_search_entry_point() {
        metadata
            .search_entry_point
            .and_then(|entry| entry.rendered_content)
    } else {
        None
    };

    let reliable_information = metadata.grounding_supports.map(|mut supports| {
        supports.sort_by(|a, b| {
            b.max_confidence()
                .partial_cmp(&a.max_confidence())
                .unwrap_or(Ordering::Equal)
        });
        supports
            .into_iter()
            .filter_map(|s| s.segment.and_then(|seg| seg.text))
            .collect()
    });

    let sources = metadata.grounding_chunks.map(|chunks| {
        chunks
            .into_iter()
            .map(|chunk| {
                let web = chunk.web;
                GroundingSource {
                    domain: web.as_ref().and_then(|w| w.title.clone()),
                    url: web.and_then(|w| w.uri),
                }
            })
            .collect()
    });

    GroundingDetail {
        rendered_content_as_html,
        search_suggestions: metadata.web_search_queries,
        reliable_information,
        sources,
    }
}
