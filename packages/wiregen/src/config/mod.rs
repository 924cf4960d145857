//! Configuration System
//!
//! A run is fully described by a [`GeneratorConfig`]: the naming convention
//! that classifies functions and maps parameters to providers, the names
//! used in the emitted code, and the derived counter conventions.
//!
//! # Examples
//!
//! ```rust,ignore
//! use wiregen::config::{FlagEncoding, GeneratorConfig};
//!
//! // Defaults match the page scripts (`build_ds`, `structure_flags`, ...)
//! let config = GeneratorConfig::default();
//!
//! // Override specific settings
//! let config = GeneratorConfig::default()
//!     .emit(|e| e.flag_encoding(FlagEncoding::Int32).include_counters(false));
//!
//! // YAML (schema v1)
//! let config = GeneratorConfig::from_yaml("wiregen.yaml")?;
//! ```

pub mod error;
pub mod generator_config;
pub mod io;
pub mod sections;
pub mod validation;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use generator_config::GeneratorConfig;
pub use io::{ConfigFileV1, SUPPORTED_VERSIONS};
pub use sections::{DerivedCounter, EmitConfig, FlagEncoding, NamingConfig};
pub use validation::{is_identifier, Validatable, ValidatableCollection};
