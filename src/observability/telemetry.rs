//! Telemetry and tracing utilities
//!
//! Initializes a `tracing-subscriber` for applications that do not install
//! their own.
//!
//! ## Example
//!
//! ```rust,ignore
//! use gemini_content::telemetry::{init_subscriber, SubscriberConfig, OutputFormat};
//!
//! let config = SubscriberConfig::builder()
//!     .log_level(tracing::Level::DEBUG)
//!     .output_format(OutputFormat::Json)
//!     .build();
//! let _guard = init_subscriber(config)?;
//! ```

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};

use crate::error::{GeneratorError, Result};

pub const ENV_LOG_LEVEL: &str = "GEMINI_CONTENT_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "GEMINI_CONTENT_LOG_FORMAT";
pub const ENV_LOG_FILE: &str = "GEMINI_CONTENT_LOG_FILE";

/// Output format for tracing logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format
    Json,
    /// Compact JSON format
    JsonCompact,
}

impl OutputFormat {
    pub fn parse(format: &str) -> Result<Self> {
        match format.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "json-compact" => Ok(Self::JsonCompact),
            "text" => Ok(Self::Text),
            _ => Err(GeneratorError::ConfigurationError(format!(
                "Invalid log format: {format}. Valid options: text, json, json-compact"
            ))),
        }
    }
}

/// Configuration for tracing subscriber
#[derive(Debug, Clone)]
pub struct SubscriberConfig {
    pub log_level: tracing::Level,
    pub output_format: OutputFormat,
    pub enable_console: bool,
    /// Log file path (optional); written through a non-blocking appender
    pub log_file: Option<PathBuf>,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            log_level: tracing::Level::INFO,
            output_format: OutputFormat::Text,
            enable_console: true,
            log_file: None,
        }
    }
}

impl SubscriberConfig {
    /// Create a new builder for SubscriberConfig
    pub fn builder() -> SubscriberConfigBuilder {
        SubscriberConfigBuilder::default()
    }

    /// Debug level, text, console only
    pub fn debug() -> Self {
        Self {
            log_level: tracing::Level::DEBUG,
            ..Self::default()
        }
    }

    /// `EnvFilter` directive for this crate.
    pub fn filter_directive(&self) -> String {
        format!(
            "gemini_content={}",
            self.log_level.as_str().to_ascii_lowercase()
        )
    }
}

/// Builder for SubscriberConfig
#[derive(Debug, Default)]
pub struct SubscriberConfigBuilder {
    log_level: Option<tracing::Level>,
    output_format: Option<OutputFormat>,
    enable_console: Option<bool>,
    log_file: Option<PathBuf>,
}

impl SubscriberConfigBuilder {
    /// Set the log level
    pub fn log_level(mut self, level: tracing::Level) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Set the log level from a string
    pub fn log_level_str(mut self, level: &str) -> Result<Self> {
        let level = match level.trim().to_lowercase().as_str() {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "info" => tracing::Level::INFO,
            "warn" => tracing::Level::WARN,
            "error" => tracing::Level::ERROR,
            _ => {
                return Err(GeneratorError::ConfigurationError(format!(
                    "Invalid log level: {level}. Valid options: trace, debug, info, warn, error"
                )));
            }
        };
        self.log_level = Some(level);
        Ok(self)
    }

    /// Set the output format
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    /// Enable or disable console output
    pub fn enable_console(mut self, enable: bool) -> Self {
        self.enable_console = Some(enable);
        self
    }

    /// Set the log file path
    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> SubscriberConfig {
        SubscriberConfig {
            log_level: self.log_level.unwrap_or(tracing::Level::INFO),
            output_format: self.output_format.unwrap_or_default(),
            enable_console: self.enable_console.unwrap_or(true),
            log_file: self.log_file,
        }
    }
}

fn file_writer(path: &Path) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let file_name = path.file_name().ok_or_else(|| {
        GeneratorError::ConfigurationError(format!("Invalid log file path: {}", path.display()))
    })?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let appender = tracing_appender::rolling::never(dir, file_name);
    Ok(tracing_appender::non_blocking(appender))
}

/// Initialize tracing subscriber with the given configuration
///
/// Returns the file appender's guard when `log_file` is set; keep it alive
/// for as long as logs should be flushed. An already-installed global
/// subscriber is not an error.
pub fn init_subscriber(config: SubscriberConfig) -> Result<Option<WorkerGuard>> {
    let filter = config.filter_directive();

    let (file, guard) = match config.log_file.as_deref() {
        Some(path) => {
            let (writer, guard) = file_writer(path)?;
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    let writer = match (config.enable_console, file) {
        (true, Some(file)) => BoxMakeWriter::new(std::io::stdout.and(file)),
        (false, Some(file)) => BoxMakeWriter::new(file),
        (true, None) => BoxMakeWriter::new(std::io::stdout),
        (false, None) => BoxMakeWriter::new(std::io::sink),
    };
    let ansi = config.enable_console && config.log_file.is_none();

    let init_result = match config.output_format {
        OutputFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .json()
            .try_init(),
        OutputFormat::JsonCompact => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_target(true)
            .json()
            .flatten_event(true)
            .try_init(),
        OutputFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(ansi)
            .with_target(true)
            .try_init(),
    };

    match init_result {
        Ok(()) => Ok(guard),
        Err(_) if tracing::dispatcher::has_been_set() => Ok(guard),
        Err(e) => Err(GeneratorError::ConfigurationError(format!(
            "Failed to initialize tracing: {e}"
        ))),
    }
}

/// Initialize tracing subscriber with default configuration
pub fn init_default() -> Result<Option<WorkerGuard>> {
    init_subscriber(SubscriberConfig::default())
}

/// Read a [`SubscriberConfig`] from the environment
///
/// Supported environment variables:
/// - `GEMINI_CONTENT_LOG_LEVEL`: trace, debug, info, warn, error
/// - `GEMINI_CONTENT_LOG_FORMAT`: text, json, json-compact
/// - `GEMINI_CONTENT_LOG_FILE`: log file path
pub fn config_from_env() -> Result<SubscriberConfig> {
    config_from_lookup(|name| std::env::var(name).ok())
}

/// Like [`config_from_env`], reading variables through `lookup`.
pub fn config_from_lookup<F>(lookup: F) -> Result<SubscriberConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut builder = SubscriberConfig::builder();

    if let Some(level) = lookup(ENV_LOG_LEVEL) {
        builder = builder.log_level_str(&level)?;
    }

    if let Some(format) = lookup(ENV_LOG_FORMAT) {
        builder = builder.output_format(OutputFormat::parse(&format)?);
    }

    if let Some(file_path) = lookup(ENV_LOG_FILE).filter(|p| !p.trim().is_empty()) {
        builder = builder.log_file(file_path);
    }

    Ok(builder.build())
}

/// Initialize tracing subscriber from environment variables
pub fn init_from_env() -> Result<Option<WorkerGuard>> {
    init_subscriber(config_from_env()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn config_from_lookup_reads_all_vars() {
        let vars: HashMap<&str, &str> = [
            (ENV_LOG_LEVEL, "debug"),
            (ENV_LOG_FORMAT, "json-compact"),
            (ENV_LOG_FILE, "/tmp/gemini.log"),
        ]
        .into_iter()
        .collect();
        let config = config_from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.log_level, tracing::Level::DEBUG);
        assert_eq!(config.output_format, OutputFormat::JsonCompact);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/gemini.log")));
        assert_eq!(config.filter_directive(), "gemini_content=debug");
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(config_from_lookup(|k| (k == ENV_LOG_LEVEL).then(|| "loud".to_string())).is_err());
        assert!(OutputFormat::parse("yaml").is_err());
    }
}
