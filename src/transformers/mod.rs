//! Transformers layer
//!
//! Request transformers turn a [`crate::types::GenerationRequest`] into the
//! Gemini wire body; response transformers turn a raw HTTP body into a
//! [`crate::types::ModelResponse`].

pub mod request;
pub mod response;

pub use request::{GeminiRequestTransformer, RequestTransformer};
pub use response::{GeminiResponseTransformer, ResponseTransformer, parse_api_response};
