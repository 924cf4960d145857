//! Naming convention
//!
//! Every prefix/suffix rule lives here so that extraction, resolution and
//! emission agree on one interpretation of a name.

use crate::config::{EmitConfig, NamingConfig};

use super::models::{FunctionKind, InputRole};

/// Key of the builder argument carrying externally supplied values
pub const EXTERNAL_KEY: &str = "external";

/// Provider of a parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provider {
    /// Reserved base input, never produced by a function
    Input(InputRole),
    /// Name of the function expected to produce the value
    Function(String),
}

/// Read-only view over the naming parts of a configuration
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention<'a> {
    naming: &'a NamingConfig,
    emit: &'a EmitConfig,
}

impl<'a> NamingConvention<'a> {
    pub fn new(naming: &'a NamingConfig, emit: &'a EmitConfig) -> Self {
        Self { naming, emit }
    }

    /// Kind and stem of a function name, or `None` for non-target names.
    ///
    /// A bare prefix (`construct_`) has an empty stem and is not a target.
    pub fn classify<'n>(&self, name: &'n str) -> Option<(FunctionKind, &'n str)> {
        let rules = [
            (
                FunctionKind::Construct,
                self.naming.construct_prefix.as_str(),
            ),
            (FunctionKind::Count, self.naming.count_prefix.as_str()),
            (FunctionKind::Generate, self.naming.generate_prefix.as_str()),
        ];
        rules.iter().find_map(|&(kind, prefix)| {
            name.strip_prefix(prefix)
                .filter(|stem| !stem.is_empty())
                .map(|stem| (kind, stem))
        })
    }

    /// Provider of a parameter: reserved inputs have none, everything else
    /// is produced by `<construct_prefix><param>`.
    pub fn provider_for(&self, param: &str) -> Provider {
        if param == self.naming.text_input {
            Provider::Input(InputRole::Text)
        } else if param == self.naming.length_input {
            Provider::Input(InputRole::Length)
        } else {
            Provider::Function(format!("{}{}", self.naming.construct_prefix, param))
        }
    }

    /// Key under which a function's value is published
    pub fn output_key(&self, kind: FunctionKind, stem: &str) -> String {
        match kind {
            FunctionKind::Construct | FunctionKind::Generate => stem.to_string(),
            FunctionKind::Count => self.counter_key(stem),
        }
    }

    /// Key of a counter (`counter_<stem>`)
    pub fn counter_key(&self, stem: &str) -> String {
        format!("{}{}", self.emit.counter_key_prefix, stem)
    }

    /// Local variable holding the value published under `key`
    pub fn variable(&self, key: &str) -> String {
        format!("{}{}", self.emit.variable_prefix, key)
    }

    /// Local variable bound to a reserved input
    pub fn input_variable(&self, role: InputRole) -> String {
        match role {
            InputRole::Text => self.variable(&self.naming.text_input),
            InputRole::Length => self.variable(&self.naming.length_input),
        }
    }

    /// Local variable of the externally supplied values object
    pub fn external_variable(&self) -> String {
        self.variable(EXTERNAL_KEY)
    }

    /// Keys whose locals the builder binds itself; no function may publish them
    pub fn reserved_keys(&self) -> [&'a str; 3] {
        [
            self.naming.text_input.as_str(),
            self.naming.length_input.as_str(),
            EXTERNAL_KEY,
        ]
    }

    pub fn naming(&self) -> &'a NamingConfig {
        self.naming
    }

    pub fn emit(&self) -> &'a EmitConfig {
        self.emit
    }
}
