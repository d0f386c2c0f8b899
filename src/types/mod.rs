//! Core types
//!
//! - `request`: chat turns, generation/safety configuration, [`GenerationRequest`]
//! - `wire`: serde DTOs for the HTTP request and both response shapes
//! - `response`: the normalized [`ModelResponse`] and [`ResponseOptions`]

pub mod request;
pub mod response;
pub mod wire;

pub use request::{
    ChatMessage, GenerationConfig, GenerationRequest, HarmBlockThreshold, HarmCategory,
    MIME_TYPE_JSON, MIME_TYPE_PLAIN_TEXT, Part, Role, SafetySetting,
};
pub use response::{
    FALLBACK_CONTENT, GroundingDetail, GroundingSource, ModelResponse, ResponseOptions,
};
pub use wire::{
    ApiErrorBody, ApiErrorResponse, ApiResponse, Candidate, Content, ContentPart, FunctionCall,
    GenerateContentRequest, GenerateContentResponse, GeminiTool, GroundingChunk,
    GroundingMetadata, GroundingSupport, SearchEntryPoint, Segment, UsageMetadata,
    WebGroundingChunk,
};

pub use crate::utils::image::{ImageData, ImageMimeType};
