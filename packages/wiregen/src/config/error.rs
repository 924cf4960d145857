//! Configuration error types

use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A name that ends up in generated code is not a valid identifier
    #[error("Invalid identifier for field '{field}': '{value}'. {hint}")]
    InvalidIdentifier {
        field: String,
        value: String,
        hint: String,
    },

    /// Two naming settings collide
    #[error("Conflicting settings: '{first}' and '{second}' are both '{value}'")]
    Conflict {
        first: String,
        second: String,
        value: String,
    },

    /// Missing version field in YAML
    #[error(
        "Missing 'version' field in configuration file. Add 'version: 1' to the top."
    )]
    MissingVersion,

    /// Unsupported version
    #[error("Unsupported configuration version {found}. Supported versions: {}", .supported.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", "))]
    UnsupportedVersion { found: u32, supported: Vec<u32> },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    /// Create an invalid identifier error with a hint
    pub fn invalid_identifier(field: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        let hint = if value.is_empty() {
            "Value must not be empty.".to_string()
        } else {
            "Use letters, digits, '_' or '$', not starting with a digit.".to_string()
        };
        Self::InvalidIdentifier {
            field: field.into(),
            value,
            hint,
        }
    }

    /// Create a conflict error
    pub fn conflict(
        first: impl Into<String>,
        second: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::Conflict {
            first: first.into(),
            second: second.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_identifier_hint() {
        let err = ConfigError::invalid_identifier("emit.builder_name", "");
        assert!(err.to_string().contains("must not be empty"));

        let err = ConfigError::invalid_identifier("emit.builder_name", "1abc");
        assert!(err.to_string().contains("not starting with a digit"));
    }

    #[test]
    fn test_unsupported_version_lists_supported() {
        let err = ConfigError::UnsupportedVersion {
            found: 3,
            supported: vec![1],
        };
        assert_eq!(
            err.to_string(),
            "Unsupported configuration version 3. Supported versions: 1"
        );
    }
}
