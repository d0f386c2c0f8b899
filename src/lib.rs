//! # gemini-content - A typed Gemini `generateContent` client
//!
//! Builds well-formed requests (prompt, chat history, images, generation and
//! safety configuration, Google Search grounding), checks them against the
//! target model's capabilities, sends them and maps the response into a
//! [`ModelResponse`] with an optional ranked grounding summary.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gemini_content::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let generator = Generator::new("AIza...")?
//!         .includes_grounding_detail_in_response();
//!
//!     let request = GenerationRequestBuilder::new()
//!         .with_prompt("What happened in Rust this week?")
//!         .with_default_generation_config()
//!         .enable_grounding()
//!         .build()?;
//!
//!     let response = generator.generate_content_with_default_model(&request).await?;
//!     println!("{}", response.content);
//!     if let Some(detail) = response.grounding_detail {
//!         println!("{:?}", detail.sources);
//!     }
//!     Ok(())
//! }
//! ```

#![deny(unsafe_code)]

pub mod builder;
pub mod config;
pub mod error;
pub mod generator;
pub mod models;
pub mod observability;
pub mod transformers;
pub mod transport;
pub mod types;
pub mod utils;
pub mod validation;

pub use observability::telemetry;

pub use builder::GenerationRequestBuilder;
pub use config::{Credentials, GeneratorConfig};
pub use error::{GeneratorError, Result};
pub use generator::Generator;
pub use models::{ModelCapabilities, ModelDescriptor, ModelTarget, ModelVersion};
pub use transport::{HttpTransport, HttpTransportRequest, HttpTransportResponse, ReqwestTransport};
pub use types::{
    ChatMessage, GenerationConfig, GenerationRequest, GroundingDetail, GroundingSource,
    ModelResponse, ResponseOptions,
};
pub use utils::{CancelHandle, ImageData, ImageMimeType};

/// Common imports
pub mod prelude {
    pub use crate::builder::GenerationRequestBuilder;
    pub use crate::config::{Credentials, GeneratorConfig};
    pub use crate::error::GeneratorError;
    pub use crate::generator::Generator;
    pub use crate::models::{ModelTarget, ModelVersion};
    pub use crate::types::{
        ChatMessage, GenerationConfig, GenerationRequest, GroundingDetail, GroundingSource,
        HarmBlockThreshold, HarmCategory, ModelResponse, Part, ResponseOptions, Role,
        SafetySetting,
    };
    pub use crate::utils::{CancelHandle, ImageData, ImageMimeType};
}
