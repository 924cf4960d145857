//! Generator configuration
//!
//! Two ways to configure a run:
//! - Builder API: `GeneratorConfig::default().emit(|e| e.include_counters(false))`
//! - YAML file: `GeneratorConfig::from_yaml("wiregen.yaml")?`
//!
//! Both end in [`Validatable::validate`]; YAML loading validates eagerly.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::io::ConfigFileV1;
use super::sections::{DerivedCounter, EmitConfig, NamingConfig};
use super::validation::{Validatable, ValidatableCollection};

/// Complete configuration of one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub naming: NamingConfig,
    pub emit: EmitConfig,
    pub derived_counters: Vec<DerivedCounter>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            naming: NamingConfig::default(),
            emit: EmitConfig::default(),
            derived_counters: DerivedCounter::defaults(),
        }
    }
}

impl GeneratorConfig {
    /// Adjust the naming convention
    pub fn naming<F>(mut self, f: F) -> Self
    where
        F: FnOnce(NamingConfig) -> NamingConfig,
    {
        self.naming = f(self.naming);
        self
    }

    /// Adjust emission settings
    pub fn emit<F>(mut self, f: F) -> Self
    where
        F: FnOnce(EmitConfig) -> EmitConfig,
    {
        self.emit = f(self.emit);
        self
    }

    /// Replace the derived counter conventions
    pub fn derived_counters(mut self, counters: Vec<DerivedCounter>) -> Self {
        self.derived_counters = counters;
        self
    }

    /// Load and validate a YAML configuration file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load and validate a YAML configuration document
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file = ConfigFileV1::parse(content)?;
        let defaults = Self::default();

        let config = Self {
            naming: file.naming.unwrap_or(defaults.naming),
            emit: file.emit.unwrap_or(defaults.emit),
            derived_counters: file.derived_counters.unwrap_or(defaults.derived_counters),
        };
        config.validate()?;
        Ok(config)
    }

    /// Export to YAML (schema v1, every section written out)
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: 1,
            naming: Some(self.naming.clone()),
            emit: Some(self.emit.clone()),
            derived_counters: Some(self.derived_counters.clone()),
        };
        serde_yaml::to_string(&file).map_err(ConfigError::Yaml)
    }
}

impl Validatable for GeneratorConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.naming.validate()?;
        self.emit.validate()?;
        self.derived_counters.validate_all()?;

        for (i, a) in self.derived_counters.iter().enumerate() {
            for b in &self.derived_counters[i + 1..] {
                if a.suffix == b.suffix {
                    return Err(ConfigError::conflict(
                        format!("derived_counters[{}]", i),
                        "derived_counters",
                        &a.suffix,
                    ));
                }
            }
        }
        Ok(())
    }
}
