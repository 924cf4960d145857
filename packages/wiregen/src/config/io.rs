//! Configuration I/O (YAML loading)
//!
//! Defines the YAML schema types. Loading and saving live on
//! [`GeneratorConfig`](super::GeneratorConfig).

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::sections::{DerivedCounter, EmitConfig, NamingConfig};

/// Schema versions this build understands
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1)
    pub version: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub naming: Option<NamingConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub emit: Option<EmitConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived_counters: Option<Vec<DerivedCounter>>,
}

impl ConfigFileV1 {
    /// Parse a YAML document, checking the version before the body so that
    /// a newer file fails with a version error instead of a field error.
    pub fn parse(content: &str) -> ConfigResult<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;

        let version = match value.get("version") {
            None | Some(serde_yaml::Value::Null) => return Err(ConfigError::MissingVersion),
            Some(v) => v.as_u64().ok_or_else(|| {
                ConfigError::Validation(format!("'version' must be an integer, got {:?}", v))
            })?,
        };

        if !SUPPORTED_VERSIONS.iter().any(|&s| u64::from(s) == version) {
            return Err(ConfigError::UnsupportedVersion {
                found: u32::try_from(version).unwrap_or(u32::MAX),
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        Ok(serde_yaml::from_value(value)?)
    }
}
