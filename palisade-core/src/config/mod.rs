//! Configuration types.
//!
//! Everything is serde-deserializable with per-field defaults so a partial
//! TOML file (or none at all) yields a working configuration.

mod pipeline_config;
mod rules;

pub use pipeline_config::PipelineConfig;
pub use rules::FrameworkRules;

use serde::{Deserialize, Serialize};

use crate::errors::{PalisadeError, PalisadeResult};

/// Top-level configuration: pipeline tuning plus the compliance rule
/// vocabulary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PalisadeConfig {
    pub pipeline: PipelineConfig,
    pub rules: FrameworkRules,
}

impl PalisadeConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> PalisadeResult<Self> {
        toml::from_str(text).map_err(|e| PalisadeError::InvalidRequest {
            reason: format!("configuration parse failed: {e}"),
        })
    }

    /// Load a configuration from a TOML file on disk.
    pub fn from_path(path: &std::path::Path) -> PalisadeResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| PalisadeError::InvalidRequest {
            reason: format!("configuration file unreadable: {e}"),
        })?;
        Self::from_toml_str(&text)
    }
}
