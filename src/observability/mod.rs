//! Observability
//!
//! - `telemetry`: subscriber initialization
//! - `tracing`: per-request events with secret masking

pub mod telemetry;
pub mod tracing;

pub use self::tracing::ProviderTracer;
