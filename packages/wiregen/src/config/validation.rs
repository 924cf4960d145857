//! Configuration validation
//!
//! Provides the validation trait and the identifier checks shared by all
//! configuration sections.

use super::error::{ConfigError, ConfigResult};

/// Trait for validatable configuration objects
pub trait Validatable {
    /// Validate the configuration
    ///
    /// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
    fn validate(&self) -> ConfigResult<()>;
}

/// Extension trait for validating collections of configs
pub trait ValidatableCollection {
    /// Validate all configs in collection
    fn validate_all(&self) -> ConfigResult<()>;
}

impl<T: Validatable> ValidatableCollection for Vec<T> {
    fn validate_all(&self) -> ConfigResult<()> {
        for config in self {
            config.validate()?;
        }
        Ok(())
    }
}

/// Check that `value` can be used verbatim as a JavaScript identifier.
pub fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Check that `value` can start or end an identifier (prefixes and suffixes).
///
/// Unlike [`is_identifier`] a fragment may start with a digit when it is
/// only ever appended to another identifier, so only the character set is
/// checked here.
pub fn is_identifier_fragment(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

pub(crate) fn require_identifier(field: &str, value: &str) -> ConfigResult<()> {
    if is_identifier(value) {
        Ok(())
    } else {
        Err(ConfigError::invalid_identifier(field, value))
    }
}

pub(crate) fn require_fragment(field: &str, value: &str) -> ConfigResult<()> {
    if is_identifier_fragment(value) {
        Ok(())
    } else {
        Err(ConfigError::invalid_identifier(field, value))
    }
}
