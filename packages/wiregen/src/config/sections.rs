//! Configuration sections
//!
//! Each section has defaults matching the conventions the generated page
//! logic expects, builder-style setters and a [`Validatable`] impl.

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::validation::{require_fragment, require_identifier, Validatable};

// ═══════════════════════════════════════════════════════════════════════════
// Naming convention
// ═══════════════════════════════════════════════════════════════════════════

/// Naming convention that turns function names into roles and parameter
/// names into providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamingConfig {
    /// Prefix of structure constructors (`construct_suffix_array`)
    pub construct_prefix: String,

    /// Prefix of counters (`count_sigma`)
    pub count_prefix: String,

    /// Prefix of string generators (`generate_fibonacci_word`)
    pub generate_prefix: String,

    /// Reserved parameter bound to the raw input text
    pub text_input: String,

    /// Reserved parameter bound to the length of the input text
    pub length_input: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            construct_prefix: "construct_".to_string(),
            count_prefix: "count_".to_string(),
            generate_prefix: "generate_".to_string(),
            text_input: "text".to_string(),
            length_input: "n".to_string(),
        }
    }
}

impl NamingConfig {
    pub fn construct_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.construct_prefix = prefix.into();
        self
    }

    pub fn count_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.count_prefix = prefix.into();
        self
    }

    pub fn generate_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.generate_prefix = prefix.into();
        self
    }

    pub fn reserved_inputs(mut self, text: impl Into<String>, length: impl Into<String>) -> Self {
        self.text_input = text.into();
        self.length_input = length.into();
        self
    }
}

impl Validatable for NamingConfig {
    fn validate(&self) -> ConfigResult<()> {
        require_fragment("naming.construct_prefix", &self.construct_prefix)?;
        require_fragment("naming.count_prefix", &self.count_prefix)?;
        require_fragment("naming.generate_prefix", &self.generate_prefix)?;
        require_identifier("naming.text_input", &self.text_input)?;
        require_identifier("naming.length_input", &self.length_input)?;

        let prefixes = [
            ("naming.construct_prefix", &self.construct_prefix),
            ("naming.count_prefix", &self.count_prefix),
            ("naming.generate_prefix", &self.generate_prefix),
        ];
        for (i, (first, a)) in prefixes.iter().enumerate() {
            for (second, b) in &prefixes[i + 1..] {
                // One prefix shadowing another makes classification ambiguous
                if a.starts_with(b.as_str()) || b.starts_with(a.as_str()) {
                    return Err(ConfigError::conflict(*first, *second, a.as_str()));
                }
            }
        }

        if self.text_input == self.length_input {
            return Err(ConfigError::conflict(
                "naming.text_input",
                "naming.length_input",
                &self.text_input,
            ));
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Emission
// ═══════════════════════════════════════════════════════════════════════════

/// How structure flags are written in the generated code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagEncoding {
    /// `1n << 5n`; unbounded number of structures
    BigInt,

    /// `1 << 5`; plain 32-bit integer flags, at most 31 structures
    Int32,
}

impl FlagEncoding {
    /// Largest number of structures representable, if bounded
    pub fn capacity(&self) -> Option<usize> {
        match self {
            Self::BigInt => None,
            Self::Int32 => Some(31),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BigInt => "bigint",
            Self::Int32 => "int32",
        }
    }
}

impl Default for FlagEncoding {
    fn default() -> Self {
        Self::BigInt
    }
}

impl std::fmt::Display for FlagEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Names and switches used when writing the artifacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmitConfig {
    /// Name of the generated construction routine
    pub builder_name: String,

    /// Name of the constant mapping output keys to flags
    pub flags_name: String,

    /// Name of the constant listing dependency bit indices per structure
    pub dependencies_name: String,

    /// Name of the constant associating counters with structures
    pub counter_structures_name: String,

    /// Name of the generator lookup table
    pub generators_name: String,

    /// Prefix of local variables holding constructed values
    pub variable_prefix: String,

    /// Prefix of counter output keys (`counter_sigma`)
    pub counter_key_prefix: String,

    /// Wire `count_` functions as selectable nodes of the builder
    pub include_counters: bool,

    /// Flag literal encoding
    pub flag_encoding: FlagEncoding,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            builder_name: "build_ds".to_string(),
            flags_name: "structure_flags".to_string(),
            dependencies_name: "structure_dependencies".to_string(),
            counter_structures_name: "counter_structures".to_string(),
            generators_name: "string_generators".to_string(),
            variable_prefix: "ds_".to_string(),
            counter_key_prefix: "counter_".to_string(),
            include_counters: true,
            flag_encoding: FlagEncoding::BigInt,
        }
    }
}

impl EmitConfig {
    pub fn builder_name(mut self, name: impl Into<String>) -> Self {
        self.builder_name = name.into();
        self
    }

    pub fn flags_name(mut self, name: impl Into<String>) -> Self {
        self.flags_name = name.into();
        self
    }

    pub fn variable_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.variable_prefix = prefix.into();
        self
    }

    pub fn include_counters(mut self, include: bool) -> Self {
        self.include_counters = include;
        self
    }

    pub fn flag_encoding(mut self, encoding: FlagEncoding) -> Self {
        self.flag_encoding = encoding;
        self
    }
}

impl Validatable for EmitConfig {
    fn validate(&self) -> ConfigResult<()> {
        let names = [
            ("emit.builder_name", &self.builder_name),
            ("emit.flags_name", &self.flags_name),
            ("emit.dependencies_name", &self.dependencies_name),
            (
                "emit.counter_structures_name",
                &self.counter_structures_name,
            ),
            ("emit.generators_name", &self.generators_name),
        ];
        for (field, value) in &names {
            require_identifier(field, value)?;
        }
        for (i, (first, a)) in names.iter().enumerate() {
            for (second, b) in &names[i + 1..] {
                if a == b {
                    return Err(ConfigError::conflict(*first, *second, a.as_str()));
                }
            }
        }

        // Locals are `<prefix><key>`; the prefix alone must already be an identifier
        require_identifier("emit.variable_prefix", &self.variable_prefix)?;
        require_identifier("emit.counter_key_prefix", &self.counter_key_prefix)?;
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Derived counters
// ═══════════════════════════════════════════════════════════════════════════

/// Post-processing counter attached to every structure whose stem ends with
/// `suffix`. The counter is computed by calling `transform` on the
/// structure's value whenever that structure was constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DerivedCounter {
    pub suffix: String,
    pub transform: String,
}

impl DerivedCounter {
    pub fn new(suffix: impl Into<String>, transform: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            transform: transform.into(),
        }
    }

    /// Default conventions: runs of a string result, factors of a factorization
    pub fn defaults() -> Vec<DerivedCounter> {
        vec![
            DerivedCounter::new("_transform", "number_of_runs"),
            DerivedCounter::new("_factorization", "number_of_factors"),
        ]
    }

    /// Whether this counter applies to the structure with the given stem
    pub fn applies_to(&self, stem: &str) -> bool {
        stem.ends_with(&self.suffix)
    }
}

impl Validatable for DerivedCounter {
    fn validate(&self) -> ConfigResult<()> {
        require_fragment("derived_counters.suffix", &self.suffix)?;
        require_identifier("derived_counters.transform", &self.transform)
    }
}
