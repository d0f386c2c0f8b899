//! Normalized response types

use serde::{Deserialize, Serialize};

use super::wire::FunctionCall;

/// Content returned when the first candidate carries no text.
pub const FALLBACK_CONTENT: &str = "Failed to generate content";

/// Which grounding details a generator copies into [`ModelResponse`].
///
/// Search entry point inclusion requires grounding detail inclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResponseOptions {
    include_grounding_detail: bool,
    include_search_entry_point: bool,
}

impl ResponseOptions {
    pub const fn new() -> Self {
        Self {
            include_grounding_detail: false,
            include_search_entry_point: false,
        }
    }

    /// Grounding detail and search entry point both included.
    pub const fn full_grounding() -> Self {
        Self {
            include_grounding_detail: true,
            include_search_entry_point: true,
        }
    }

    pub const fn includes_grounding_detail(&self) -> bool {
        self.include_grounding_detail
    }

    pub const fn includes_search_entry_point(&self) -> bool {
        self.include_search_entry_point
    }

    pub const fn with_grounding_detail(mut self) -> Self {
        self.include_grounding_detail = true;
        self
    }

    /// Also clears search entry point inclusion.
    pub const fn without_grounding_detail(mut self) -> Self {
        self.include_grounding_detail = false;
        self.include_search_entry_point = false;
        self
    }

    /// Returns `None` unless grounding detail is already included.
    pub const fn with_search_entry_point(mut self) -> Option<Self> {
        if !self.include_grounding_detail {
            return None;
        }
        self.include_search_entry_point = true;
        Some(self)
    }

    pub const fn without_search_entry_point(mut self) -> Self {
        self.include_search_entry_point = false;
        self
    }
}

/// A web source backing the grounded answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    /// Source title as reported by the API (usually the domain)
    pub domain: Option<String>,
    pub url: Option<String>,
}

/// Grounding summary derived from the first candidate's metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroundingDetail {
    /// Search entry point HTML, only when requested
    pub rendered_content_as_html: Option<String>,
    pub search_suggestions: Option<Vec<String>>,
    /// Grounded segment texts, most confident first
    pub reliable_information: Option<Vec<String>>,
    pub sources: Option<Vec<GroundingSource>>,
}

/// Normalized result of a `generateContent` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResponse {
    pub content: String,
    pub grounding_detail: Option<GroundingDetail>,
    pub finish_reason: Option<String>,
    pub model_version: Option<String>,
    /// Function calls found in the first candidate's parts
    pub function_calls: Vec<FunctionCall>,
}

impl ModelResponse {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            grounding_detail: None,
            finish_reason: None,
            model_version: None,
            function_calls: Vec::new(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.content == FALLBACK_CONTENT
    }

    pub fn has_function_calls(&self) -> bool {
        !self.function_calls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_entry_point_requires_grounding_detail() {
        let options = ResponseOptions::new();
        assert!(options.with_search_entry_point().is_none());

        let options = options
            .with_grounding_detail()
            .with_search_entry_point()
            .unwrap();
        assert!(options.includes_search_entry_point());
        assert_eq!(options, ResponseOptions::full_grounding());
    }

    #[test]
    fn excluding_grounding_detail_clears_entry_point() {
        let options = ResponseOptions::full_grounding().without_grounding_detail();
        assert!(!options.includes_grounding_detail());
        assert!(!options.includes_search_entry_point());
    }

    #[test]
    fn toggles_are_idempotent() {
        let once = ResponseOptions::new().with_grounding_detail();
        assert_eq!(once, once.with_grounding_detail());
        let off = ResponseOptions::new().without_search_entry_point();
        assert_eq!(off, ResponseOptions::new());
    }
}
