//! Gemini model catalog
//!
//! Static capability table for the model versions this crate knows about.
//! Each version carries its wire name (used in the endpoint path), a stability
//! rank used to pick the default model, and the features it supports.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Features a model version supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModelCapabilities {
    /// Google Search grounding (`tools: [{googleSearch: {}}]`)
    pub grounding: bool,
    /// Structured output (`responseMimeType: application/json`, `responseSchema`)
    pub json_output: bool,
}

impl ModelCapabilities {
    pub const fn new() -> Self {
        Self {
            grounding: false,
            json_output: false,
        }
    }

    pub const fn with_grounding(mut self) -> Self {
        self.grounding = true;
        self
    }

    pub const fn with_json_output(mut self) -> Self {
        self.json_output = true;
        self
    }
}

/// Known Gemini model versions.
///
/// Variants are declared in ascending stability order, so the derived `Ord`
/// and [`ModelVersion::stability_rank`] agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ModelVersion {
    /// Experimental thinking model
    Gemini20FlashThinkingExp,
    Gemini15Flash8B,
    Gemini15Pro,
    Gemini15Flash,
    Gemini20FlashLite,
    Gemini20Flash,
}

impl ModelVersion {
    const ALL: [Self; 6] = [
        Self::Gemini20FlashThinkingExp,
        Self::Gemini15Flash8B,
        Self::Gemini15Pro,
        Self::Gemini15Flash,
        Self::Gemini20FlashLite,
        Self::Gemini20Flash,
    ];

    /// All known versions, lowest stability rank first.
    pub fn all() -> &'static [Self] {
        &Self::ALL
    }

    /// Model identifier used in the endpoint path.
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Gemini20FlashThinkingExp => "gemini-2.0-flash-thinking-exp-01-21",
            Self::Gemini15Flash8B => "gemini-1.5-flash-8b",
            Self::Gemini15Pro => "gemini-1.5-pro",
            Self::Gemini15Flash => "gemini-1.5-flash",
            Self::Gemini20FlashLite => "gemini-2.0-flash-lite",
            Self::Gemini20Flash => "gemini-2.0-flash",
        }
    }

    /// Higher is more stable. Experimental models rank 0.
    pub const fn stability_rank(self) -> u8 {
        match self {
            Self::Gemini20FlashThinkingExp => 0,
            Self::Gemini15Flash8B => 1,
            Self::Gemini15Pro => 2,
            Self::Gemini15Flash => 3,
            Self::Gemini20FlashLite => 4,
            Self::Gemini20Flash => 5,
        }
    }

    pub const fn capabilities(self) -> ModelCapabilities {
        match self {
            Self::Gemini20FlashThinkingExp => ModelCapabilities::new(),
            Self::Gemini15Flash8B | Self::Gemini20FlashLite => {
                ModelCapabilities::new().with_json_output()
            }
            Self::Gemini15Pro | Self::Gemini15Flash | Self::Gemini20Flash => {
                ModelCapabilities::new().with_grounding().with_json_output()
            }
        }
    }

    pub const fn supports_grounding(self) -> bool {
        self.capabilities().grounding
    }

    pub const fn supports_json_output(self) -> bool {
        self.capabilities().json_output
    }

    /// Look up a version by its wire name (case-insensitive, `models/` prefix allowed).
    pub fn from_wire_name(name: &str) -> Option<Self> {
        let name = name.trim();
        let name = name.strip_prefix("models/").unwrap_or(name);
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.wire_name().eq_ignore_ascii_case(name))
    }

    /// The version with the highest stability rank.
    pub fn latest_stable() -> Self {
        Self::ALL
            .iter()
            .copied()
            .max_by_key(|v| v.stability_rank())
            .unwrap_or(Self::Gemini20Flash)
    }

    pub fn descriptor(self) -> ModelDescriptor {
        ModelDescriptor {
            version: self,
            wire_name: self.wire_name(),
            stability_rank: self.stability_rank(),
            capabilities: self.capabilities(),
        }
    }
}

impl Default for ModelVersion {
    fn default() -> Self {
        Self::latest_stable()
    }
}

impl fmt::Display for ModelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Flattened view of one capability-table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub version: ModelVersion,
    pub wire_name: &'static str,
    pub stability_rank: u8,
    pub capabilities: ModelCapabilities,
}

/// The model a request is sent to: a known version or a free-form alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelTarget {
    Version(ModelVersion),
    /// Any model name accepted by the API (e.g. `gemini-exp-1206`)
    Alias(String),
}

impl ModelTarget {
    /// Resolve an alias that names a known version to that version.
    pub fn resolve(&self) -> Option<ModelVersion> {
        match self {
            Self::Version(v) => Some(*v),
            Self::Alias(alias) => ModelVersion::from_wire_name(alias),
        }
    }

    /// Name used in the endpoint path.
    pub fn wire_name(&self) -> &str {
        match self {
            Self::Version(v) => v.wire_name(),
            Self::Alias(alias) => alias.trim(),
        }
    }
}

impl Default for ModelTarget {
    fn default() -> Self {
        Self::Version(ModelVersion::latest_stable())
    }
}

impl From<ModelVersion> for ModelTarget {
    fn from(v: ModelVersion) -> Self {
        Self::Version(v)
    }
}

impl From<&str> for ModelTarget {
    fn from(alias: &str) -> Self {
        Self::Alias(alias.to_string())
    }
}

impl From<String> for ModelTarget {
    fn from(alias: String) -> Self {
        Self::Alias(alias)
    }
}
